use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, bail};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::actor::dispatcher::Action;
use crate::common::collections::HashSet;
use crate::layout_engine::{Layout, LayoutSequence, NamedLayout, PercentageRegion, ScreenSelector};
use crate::sys::hotkey::{Hotkey, Modifiers};

pub fn config_file() -> Option<PathBuf> { dirs::home_dir().map(|home| home.join(".gridsnap.toml")) }

#[derive(Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    settings: Settings,
    keys: FxHashMap<String, KeyAction>,
    /// Modifier combinations that can be reused in key bindings
    /// e.g., "hyper" = "Meta + Alt" allows using "hyper + Numpad7" in keys
    #[serde(default)]
    modifier_combinations: FxHashMap<String, String>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Modifiers that turn the mouse wheel into "focus next window".
    #[serde(default)]
    pub scroll_cycle_modifiers: Option<Modifiers>,
}

impl Settings {
    pub fn validate(&self) -> Vec<String> {
        match self.scroll_cycle_modifiers {
            Some(mods) if mods.is_empty() => {
                vec!["scroll_cycle_modifiers must name at least one modifier".to_string()]
            }
            _ => Vec::new(),
        }
    }
}

/// A layout as written in the config: a preset name or a custom region.
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[serde(untagged)]
pub enum LayoutSpec {
    Named(NamedLayout),
    Region { region: PercentageRegion },
}

impl LayoutSpec {
    pub fn layout(&self) -> Layout {
        match self {
            LayoutSpec::Named(named) => named.layout(),
            LayoutSpec::Region { region } => Layout::Percentage(*region),
        }
    }

    fn validate(&self) -> Vec<String> {
        match self {
            LayoutSpec::Named(_) => Vec::new(),
            LayoutSpec::Region { region } => region.validate(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[serde(rename_all = "snake_case")]
pub enum KeyAction {
    Apply(LayoutSpec),
    Cycle(Vec<LayoutSpec>),
    MoveToScreen(ScreenSelector),
    WarpCursor(usize),
    FocusNextWindow,
}

impl KeyAction {
    pub fn to_action(&self) -> anyhow::Result<Action> {
        Ok(match self {
            KeyAction::Apply(spec) => Action::Apply(spec.layout()),
            KeyAction::Cycle(specs) => Action::Cycle(LayoutSequence::new(
                specs.iter().map(LayoutSpec::layout).collect(),
            )?),
            KeyAction::MoveToScreen(selector) => {
                Action::Apply(Layout::MoveToScreen(selector.clone()))
            }
            KeyAction::WarpCursor(index) => Action::WarpCursor(*index),
            KeyAction::FocusNextWindow => Action::FocusNextWindow,
        })
    }

    fn validate(&self) -> Vec<String> {
        match self {
            KeyAction::Apply(spec) => spec.validate(),
            KeyAction::Cycle(specs) if specs.is_empty() => {
                vec!["cycle needs at least one layout".to_string()]
            }
            KeyAction::Cycle(specs) => specs.iter().flat_map(LayoutSpec::validate).collect(),
            KeyAction::MoveToScreen(_) | KeyAction::WarpCursor(_) | KeyAction::FocusNextWindow => {
                Vec::new()
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub settings: Settings,
    /// Bindings in the order they sort by hotkey name.
    pub keys: Vec<(Hotkey, KeyAction)>,
}

impl Config {
    pub fn read(path: &Path) -> anyhow::Result<Config> {
        let buf = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::parse(&buf).with_context(|| format!("parsing {}", path.display()))
    }

    /// The built-in configuration.
    pub fn default() -> Config {
        Self::parse(include_str!("../../gridsnap.default.toml"))
            .expect("built-in configuration is valid")
    }

    /// The file at [`config_file`] if there is one, the built-in configuration
    /// otherwise.
    pub fn load() -> anyhow::Result<Config> {
        match config_file() {
            Some(path) if path.exists() => Self::read(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Reports every problem found. Never modifies the configuration.
    pub fn validate(&self) -> Vec<String> {
        let mut issues = self.settings.validate();

        let mut seen = HashSet::default();
        for (hotkey, action) in &self.keys {
            if !seen.insert(*hotkey) {
                issues.push(format!("{hotkey} is bound more than once"));
            }
            issues.extend(action.validate().into_iter().map(|issue| format!("{hotkey}: {issue}")));
        }

        issues
    }

    /// The bindings in dispatcher form.
    pub fn bindings(&self) -> anyhow::Result<Vec<(Hotkey, Action)>> {
        self.keys
            .iter()
            .map(|(hotkey, action)| {
                let action = action.to_action().with_context(|| format!("binding {hotkey}"))?;
                Ok((*hotkey, action))
            })
            .collect()
    }

    fn expand_modifier_combinations(key: &str, combinations: &FxHashMap<String, String>) -> String {
        if let Some(plus_pos) = key.find(" + ") {
            let potential_combo = &key[..plus_pos];
            if let Some(combo_value) = combinations.get(potential_combo) {
                let rest = &key[plus_pos + 3..];
                return format!("{} + {}", combo_value, rest);
            }
        }
        key.to_string()
    }

    pub fn parse(buf: &str) -> anyhow::Result<Config> {
        let c: ConfigFile = toml::from_str(buf)?;
        let mut keys = Vec::new();
        for (key, action) in c.keys {
            let expanded_key = Self::expand_modifier_combinations(&key, &c.modifier_combinations);
            let Ok(hotkey) = Hotkey::from_str(&expanded_key) else {
                bail!("Could not parse hotkey: {key}");
            };
            keys.push((hotkey, action));
        }
        keys.sort_by_cached_key(|(hotkey, _)| hotkey.to_string());
        Ok(Config { settings: c.settings, keys })
    }
}
