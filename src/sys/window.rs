//! The contract a platform window handle must satisfy.
//!
//! Nothing behind these traits is cached: every getter goes to the OS, so two
//! consecutive reads may disagree if the user or another program moved the
//! window in between.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::geometry::{Point, Rect};

#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct WindowId(u64);

impl WindowId {
    pub const fn new(raw: u64) -> Self { WindowId(raw) }

    pub fn get(&self) -> u64 { self.0 }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{:#x}", self.0) }
}

#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum ShowState {
    #[default]
    Normal,
    Minimized,
    Maximized,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WindowError {
    #[error("window {0} no longer exists")]
    Gone(WindowId),
    #[error("{op} rejected for window {window}: {reason}")]
    Rejected {
        window: WindowId,
        op: &'static str,
        reason: String,
    },
    #[error("cursor move rejected: {0}")]
    Cursor(String),
}

pub trait Window {
    fn id(&self) -> WindowId;

    fn bounds(&self) -> Result<Rect, WindowError>;

    /// Moves and resizes the window without touching its show state or
    /// z-order.
    fn set_bounds(&self, bounds: Rect) -> Result<(), WindowError>;

    fn show_state(&self) -> Result<ShowState, WindowError>;

    fn set_show_state(&self, state: ShowState) -> Result<(), WindowError>;

    fn title(&self) -> Result<String, WindowError>;

    fn process_id(&self) -> Result<u32, WindowError>;

    fn is_visible(&self) -> bool;

    /// Brings the window to the foreground.
    fn focus(&self) -> Result<(), WindowError>;

    fn is_minimized(&self) -> bool { matches!(self.show_state(), Ok(ShowState::Minimized)) }

    fn is_maximized(&self) -> bool { matches!(self.show_state(), Ok(ShowState::Maximized)) }
}

/// Window enumeration and the pointer.
pub trait WindowSystem {
    type Window: Window;

    fn foreground_window(&self) -> Option<Self::Window>;

    /// All top-level windows in z-order.
    fn windows(&self) -> Vec<Self::Window>;

    fn cursor_position(&self) -> Option<Point>;

    fn set_cursor_position(&self, point: Point) -> Result<(), WindowError>;
}
