//! Focus cycling among the windows of one screen.

use tracing::{debug, trace};

use crate::sys::geometry::Point;
use crate::sys::screen::ScreenProvider;
use crate::sys::window::{Window, WindowError, WindowId, WindowSystem};

/// Title of the shell's desktop window, which is never a cycling candidate.
const DESKTOP_WINDOW_TITLE: &str = "Program Manager";

/// The windows on the screen under `at` that can take part in cycling,
/// ordered by title.
pub fn cycle_candidates<W: WindowSystem>(
    system: &W,
    screens: &dyn ScreenProvider,
    at: Point,
) -> Vec<W::Window> {
    let Some(screen) = screens.for_point(at) else {
        return Vec::new();
    };
    let mut candidates: Vec<(String, W::Window)> = system
        .windows()
        .into_iter()
        .filter(|w| w.is_visible() && !w.is_minimized())
        .filter_map(|w| {
            let title = w.title().ok()?;
            if title.is_empty() || title == DESKTOP_WINDOW_TITLE {
                return None;
            }
            let on_screen = screens.for_window(&w).is_some_and(|s| s.id == screen.id);
            on_screen.then_some((title, w))
        })
        .collect();
    candidates.sort_by(|(a, _), (b, _)| a.cmp(b));
    candidates.into_iter().map(|(_, w)| w).collect()
}

/// Focuses the candidate after the foreground window, wrapping to the first
/// one. Returns the newly focused window, or `None` if there was nothing to
/// focus.
pub fn focus_next_window<W: WindowSystem>(
    system: &W,
    screens: &dyn ScreenProvider,
    at: Point,
) -> Result<Option<WindowId>, WindowError> {
    let candidates = cycle_candidates(system, screens, at);
    let active = system.foreground_window().map(|w| w.id());
    let next = active
        .and_then(|id| candidates.iter().position(|w| w.id() == id))
        .and_then(|i| candidates.get(i + 1))
        .or(candidates.first());
    let Some(next) = next else {
        trace!(%at, "no windows to cycle through");
        return Ok(None);
    };
    debug!(window = %next.id(), "focusing next window");
    next.focus()?;
    Ok(Some(next.id()))
}
