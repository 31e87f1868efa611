use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use strum_macros::{EnumIter, EnumString, IntoStaticStr};

bitflags! {
    #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        const SHIFT = 0b0001;
        const CONTROL = 0b0010;
        const ALT = 0b0100;
        /// The Windows / Command / Super key.
        const META = 0b1000;
    }
}

impl Modifiers {
    fn from_token(token: &str) -> Option<Modifiers> {
        match token.to_lowercase().as_str() {
            "alt" | "option" => Some(Modifiers::ALT),
            "ctrl" | "control" => Some(Modifiers::CONTROL),
            "shift" => Some(Modifiers::SHIFT),
            "meta" | "win" | "windows" | "super" | "cmd" | "command" => Some(Modifiers::META),
            _ => None,
        }
    }
}

impl fmt::Display for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<&str> = Vec::new();
        if self.contains(Modifiers::CONTROL) {
            parts.push("Ctrl");
        }
        if self.contains(Modifiers::ALT) {
            parts.push("Alt");
        }
        if self.contains(Modifiers::SHIFT) {
            parts.push("Shift");
        }
        if self.contains(Modifiers::META) {
            parts.push("Meta");
        }
        write!(f, "{}", parts.join(" + "))
    }
}

impl FromStr for Modifiers {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut mods = Modifiers::empty();
        for part in s.split('+').map(str::trim).filter(|p| !p.is_empty()) {
            let Some(m) = Modifiers::from_token(part) else {
                anyhow::bail!("Unrecognized modifier: {part}");
            };
            mods.insert(m);
        }
        Ok(mods)
    }
}

impl Serialize for Modifiers {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where S: serde::Serializer {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Modifiers {
    fn deserialize<D>(deserializer: D) -> Result<Modifiers, D::Error>
    where D: serde::Deserializer<'de> {
        let s = String::deserialize(deserializer)?;
        Modifiers::from_str(&s).map_err(serde::de::Error::custom)
    }
}

#[derive(
    Serialize,
    Deserialize,
    Debug,
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
#[strum(ascii_case_insensitive)]
pub enum KeyCode {
    KeyA,
    KeyB,
    KeyC,
    KeyD,
    KeyE,
    KeyF,
    KeyG,
    KeyH,
    KeyI,
    KeyJ,
    KeyK,
    KeyL,
    KeyM,
    KeyN,
    KeyO,
    KeyP,
    KeyQ,
    KeyR,
    KeyS,
    KeyT,
    KeyU,
    KeyV,
    KeyW,
    KeyX,
    KeyY,
    KeyZ,
    Digit0,
    Digit1,
    Digit2,
    Digit3,
    Digit4,
    Digit5,
    Digit6,
    Digit7,
    Digit8,
    Digit9,
    #[strum(to_string = "Numpad0", serialize = "Num0")]
    Numpad0,
    #[strum(to_string = "Numpad1", serialize = "Num1")]
    Numpad1,
    #[strum(to_string = "Numpad2", serialize = "Num2")]
    Numpad2,
    #[strum(to_string = "Numpad3", serialize = "Num3")]
    Numpad3,
    #[strum(to_string = "Numpad4", serialize = "Num4")]
    Numpad4,
    #[strum(to_string = "Numpad5", serialize = "Num5")]
    Numpad5,
    #[strum(to_string = "Numpad6", serialize = "Num6")]
    Numpad6,
    #[strum(to_string = "Numpad7", serialize = "Num7")]
    Numpad7,
    #[strum(to_string = "Numpad8", serialize = "Num8")]
    Numpad8,
    #[strum(to_string = "Numpad9", serialize = "Num9")]
    Numpad9,
    NumpadAdd,
    NumpadSubtract,
    NumpadMultiply,
    NumpadDivide,
    NumpadDecimal,
    NumpadEnter,
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
    #[strum(to_string = "ArrowLeft", serialize = "Left")]
    ArrowLeft,
    #[strum(to_string = "ArrowRight", serialize = "Right")]
    ArrowRight,
    #[strum(to_string = "ArrowUp", serialize = "Up")]
    ArrowUp,
    #[strum(to_string = "ArrowDown", serialize = "Down")]
    ArrowDown,
    Home,
    End,
    PageUp,
    PageDown,
    Insert,
    Delete,
    Tab,
    Space,
    #[strum(to_string = "Enter", serialize = "Return")]
    Enter,
    #[strum(to_string = "Escape", serialize = "Esc")]
    Escape,
    Backspace,
    #[strum(to_string = "Minus", serialize = "-")]
    Minus,
    #[strum(to_string = "Equal", serialize = "=")]
    Equal,
    #[strum(to_string = "Comma", serialize = ",")]
    Comma,
    #[strum(to_string = "Period", serialize = ".")]
    Period,
    #[strum(to_string = "Slash", serialize = "/")]
    Slash,
    #[strum(to_string = "Semicolon", serialize = ";")]
    Semicolon,
    #[strum(to_string = "Quote", serialize = "'")]
    Quote,
    #[strum(to_string = "Backquote", serialize = "`")]
    Backquote,
    #[strum(to_string = "Backslash", serialize = "\\")]
    Backslash,
    BracketLeft,
    BracketRight,
}

impl KeyCode {
    /// Parses a single key token. Accepts the variant name (`Numpad7`,
    /// `KeyA`), bare letters and digits (`A`, `7`) and the aliases declared on
    /// the variants (`Left`, `Esc`, `Num7`, ...).
    pub fn parse_token(token: &str) -> Option<KeyCode> {
        let mut chars = token.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            if c.is_ascii_alphabetic() {
                return KeyCode::from_str(&format!("Key{}", c.to_ascii_uppercase())).ok();
            }
            if c.is_ascii_digit() {
                return KeyCode::from_str(&format!("Digit{c}")).ok();
            }
        }
        KeyCode::from_str(token).ok()
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name: &'static str = self.into();
        let short = name
            .strip_prefix("Key")
            .or_else(|| name.strip_prefix("Digit"))
            .or_else(|| name.strip_prefix("Arrow"))
            .unwrap_or(name);
        write!(f, "{short}")
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Hotkey {
    pub modifiers: Modifiers,
    pub key_code: KeyCode,
}

impl Hotkey {
    pub fn new(modifiers: Modifiers, key_code: KeyCode) -> Self { Self { modifiers, key_code } }
}

impl fmt::Display for Hotkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifiers.is_empty() {
            write!(f, "{}", self.key_code)
        } else {
            write!(f, "{} + {}", self.modifiers, self.key_code)
        }
    }
}

impl FromStr for Hotkey {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut mods = Modifiers::empty();
        let mut key_opt: Option<KeyCode> = None;

        let parts = s.split('+').map(str::trim).filter(|p| !p.is_empty());
        for part in parts {
            if let Some(m) = Modifiers::from_token(part) {
                mods.insert(m);
                continue;
            }
            let Some(code) = KeyCode::parse_token(part) else {
                anyhow::bail!("Unrecognized key token: {part}");
            };
            if let Some(prev) = key_opt.replace(code) {
                anyhow::bail!("Hotkey {s} names two keys: {prev} and {code}");
            }
        }

        let key_code =
            key_opt.ok_or_else(|| anyhow::anyhow!("No key specified in hotkey: {}", s))?;
        Ok(Hotkey::new(mods, key_code))
    }
}

impl Serialize for Hotkey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where S: serde::Serializer {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Hotkey {
    fn deserialize<D>(deserializer: D) -> Result<Hotkey, D::Error>
    where D: serde::Deserializer<'de> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum HotkeyRepr {
            Str(String),
            Map {
                modifiers: Modifiers,
                key_code: KeyCode,
            },
        }

        let repr = HotkeyRepr::deserialize(deserializer)?;
        match repr {
            HotkeyRepr::Str(s) => Hotkey::from_str(&s).map_err(serde::de::Error::custom),
            HotkeyRepr::Map { modifiers, key_code } => Ok(Hotkey::new(modifiers, key_code)),
        }
    }
}
