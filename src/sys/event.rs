//! Input events and hotkey registration.

use std::sync::Arc;

use parking_lot::Mutex;
use thiserror::Error;
use tracing::{debug, trace, warn};

use super::geometry::Point;
pub use super::hotkey::{Hotkey, KeyCode, Modifiers};
use crate::actor;
use crate::common::collections::HashSet;

/// Everything the dispatcher reacts to.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    HotkeyPressed(Hotkey),
    Scroll(MouseScroll),
    /// The display configuration changed and the screen list must be rebuilt.
    ScreensChanged,
    /// Release every hotkey and stop the consumer loop.
    Shutdown,
}

pub type Sender = actor::Sender<InputEvent>;
pub type Receiver = actor::Receiver<InputEvent>;

/// A wheel event from the low-level mouse hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseScroll {
    pub position: Point,
    pub delta: i16,
    pub horizontal: bool,
    /// Modifier keys held when the wheel moved.
    pub modifiers: Modifiers,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HotkeyError {
    #[error("hotkey {0} is already registered")]
    AlreadyRegistered(Hotkey),
    #[error("hotkey {0} is not registered")]
    NotRegistered(Hotkey),
}

/// Global hotkey registration. One binding per (modifiers, key) pair.
pub trait HotkeyService: Send + Sync {
    fn register(&self, hotkey: &Hotkey) -> Result<(), HotkeyError>;

    fn unregister(&self, hotkey: &Hotkey) -> Result<(), HotkeyError>;
}

/// Keeps a hotkey registered for as long as it is alive.
#[must_use = "dropping a Registration unregisters the hotkey"]
pub struct Registration {
    service: Arc<dyn HotkeyService>,
    hotkey: Hotkey,
}

impl Registration {
    pub fn new(service: Arc<dyn HotkeyService>, hotkey: Hotkey) -> Result<Self, HotkeyError> {
        service.register(&hotkey)?;
        debug!(%hotkey, "registered hotkey");
        Ok(Registration { service, hotkey })
    }

    pub fn hotkey(&self) -> &Hotkey { &self.hotkey }
}

impl Drop for Registration {
    fn drop(&mut self) {
        match self.service.unregister(&self.hotkey) {
            Ok(()) => debug!(hotkey = %self.hotkey, "unregistered hotkey"),
            Err(e) => warn!("failed to unregister hotkey: {e}"),
        }
    }
}

/// In-process hotkey table. The platform hook calls [`press`](Self::press)
/// for every key chord it sees; registered chords are forwarded to the
/// dispatcher queue, everything else is passed through.
pub struct HotkeyRegistry {
    registered: Mutex<HashSet<Hotkey>>,
    events_tx: Sender,
}

impl HotkeyRegistry {
    pub fn new(events_tx: Sender) -> Self {
        HotkeyRegistry {
            registered: Mutex::new(HashSet::default()),
            events_tx,
        }
    }

    /// Returns true if the chord was consumed.
    pub fn press(&self, hotkey: Hotkey) -> bool {
        if !self.registered.lock().contains(&hotkey) {
            trace!(%hotkey, "ignoring unbound chord");
            return false;
        }
        self.events_tx.send(InputEvent::HotkeyPressed(hotkey));
        true
    }

    pub fn is_registered(&self, hotkey: &Hotkey) -> bool { self.registered.lock().contains(hotkey) }

    pub fn len(&self) -> usize { self.registered.lock().len() }

    pub fn is_empty(&self) -> bool { self.registered.lock().is_empty() }
}

impl HotkeyService for HotkeyRegistry {
    fn register(&self, hotkey: &Hotkey) -> Result<(), HotkeyError> {
        if self.registered.lock().insert(*hotkey) {
            Ok(())
        } else {
            Err(HotkeyError::AlreadyRegistered(*hotkey))
        }
    }

    fn unregister(&self, hotkey: &Hotkey) -> Result<(), HotkeyError> {
        if self.registered.lock().remove(hotkey) {
            Ok(())
        } else {
            Err(HotkeyError::NotRegistered(*hotkey))
        }
    }
}
