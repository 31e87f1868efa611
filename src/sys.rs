//! Platform-facing types and the contracts a platform backend implements.

pub mod event;
pub mod geometry;
pub mod headless;
pub mod hotkey;
pub mod screen;
pub mod window;
