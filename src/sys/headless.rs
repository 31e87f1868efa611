//! An in-memory desktop.
//!
//! `HeadlessDesktop` stands in for the OS: it owns a list of screens, a set of
//! top-level windows and the cursor, and reproduces the side effects the
//! engine relies on (maximize fills the usable area, restore brings back the
//! pre-maximize bounds). Individual windows can be told to fail their reads or
//! writes.

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::trace;

use super::geometry::{Point, Rect};
use super::screen::{Screen, ScreenError, System, screen_for_rect};
use super::window::{ShowState, Window, WindowError, WindowId, WindowSystem};

/// Where a minimized window reports itself, mirroring what a desktop shell
/// does with iconic windows.
pub const MINIMIZED_BOUNDS: Rect = Rect::new(-32000, -32000, 160, 28);

#[derive(Debug, Clone)]
struct WindowState {
    bounds: Rect,
    restore_bounds: Rect,
    show_state: ShowState,
    title: String,
    process_id: u32,
    visible: bool,
    fail_reads: bool,
    fail_writes: bool,
}

#[derive(Debug, Default)]
struct Desktop {
    screens: Vec<Screen>,
    windows: BTreeMap<WindowId, WindowState>,
    foreground: Option<WindowId>,
    cursor: Point,
    fail_cursor: bool,
    next_id: u64,
}

/// Properties of a window to open on a [`HeadlessDesktop`].
#[derive(Debug, Clone)]
pub struct WindowSpec {
    pub title: String,
    pub bounds: Rect,
    pub process_id: u32,
    pub visible: bool,
    pub show_state: ShowState,
}

impl WindowSpec {
    pub fn new(title: impl Into<String>, bounds: Rect) -> Self {
        WindowSpec {
            title: title.into(),
            bounds,
            process_id: 1,
            visible: true,
            show_state: ShowState::Normal,
        }
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    pub fn minimized(mut self) -> Self {
        self.show_state = ShowState::Minimized;
        self
    }
}

#[derive(Clone, Default)]
pub struct HeadlessDesktop {
    inner: Arc<Mutex<Desktop>>,
}

impl HeadlessDesktop {
    pub fn new(screens: Vec<Screen>) -> Self {
        let desktop = Desktop {
            screens,
            next_id: 1,
            ..Desktop::default()
        };
        HeadlessDesktop { inner: Arc::new(Mutex::new(desktop)) }
    }

    /// Replaces the display configuration. Callers are expected to follow up
    /// with a refresh of whatever screen cache sits on top.
    pub fn set_screens(&self, screens: Vec<Screen>) { self.inner.lock().screens = screens; }

    /// Opens a window and gives it focus.
    pub fn open(&self, spec: WindowSpec) -> HeadlessWindow {
        let mut desktop = self.inner.lock();
        let id = WindowId::new(desktop.next_id);
        desktop.next_id += 1;
        let mut state = WindowState {
            bounds: spec.bounds,
            restore_bounds: spec.bounds,
            show_state: ShowState::Normal,
            title: spec.title,
            process_id: spec.process_id,
            visible: spec.visible,
            fail_reads: false,
            fail_writes: false,
        };
        apply_show_state(&desktop.screens, &mut state, spec.show_state);
        desktop.windows.insert(id, state);
        desktop.foreground = Some(id);
        HeadlessWindow { id, desktop: self.inner.clone() }
    }

    pub fn close(&self, id: WindowId) {
        let mut desktop = self.inner.lock();
        desktop.windows.remove(&id);
        if desktop.foreground == Some(id) {
            desktop.foreground = None;
        }
    }

    pub fn window(&self, id: WindowId) -> HeadlessWindow {
        HeadlessWindow { id, desktop: self.inner.clone() }
    }

    pub fn foreground_id(&self) -> Option<WindowId> { self.inner.lock().foreground }

    pub fn set_cursor(&self, point: Point) { self.inner.lock().cursor = point; }

    pub fn cursor(&self) -> Point { self.inner.lock().cursor }

    /// Makes every getter on the window fail, as if the handle went stale.
    pub fn fail_reads(&self, id: WindowId, fail: bool) {
        if let Some(w) = self.inner.lock().windows.get_mut(&id) {
            w.fail_reads = fail;
        }
    }

    /// Makes cursor moves fail, as if another desktop owned the input.
    pub fn fail_cursor(&self, fail: bool) { self.inner.lock().fail_cursor = fail; }

    /// Makes every setter on the window fail, as if the OS refused the call.
    pub fn fail_writes(&self, id: WindowId, fail: bool) {
        if let Some(w) = self.inner.lock().windows.get_mut(&id) {
            w.fail_writes = fail;
        }
    }
}

fn apply_show_state(screens: &[Screen], state: &mut WindowState, target: ShowState) {
    match (state.show_state, target) {
        (from, to) if from == to => {}
        (ShowState::Normal, ShowState::Maximized) => {
            state.restore_bounds = state.bounds;
            if let Some(screen) = screen_for_rect(screens.to_vec(), state.bounds) {
                state.bounds = screen.usable_bounds;
            }
        }
        (ShowState::Normal, ShowState::Minimized) => {
            state.restore_bounds = state.bounds;
        }
        (ShowState::Minimized | ShowState::Maximized, ShowState::Normal) => {
            state.bounds = state.restore_bounds;
        }
        (ShowState::Minimized, ShowState::Maximized) => {
            if let Some(screen) = screen_for_rect(screens.to_vec(), state.restore_bounds) {
                state.bounds = screen.usable_bounds;
            }
        }
        _ => {}
    }
    state.show_state = target;
}

impl System for HeadlessDesktop {
    fn screens(&self) -> Result<Vec<Screen>, ScreenError> { Ok(self.inner.lock().screens.clone()) }
}

#[derive(Clone)]
pub struct HeadlessWindow {
    id: WindowId,
    desktop: Arc<Mutex<Desktop>>,
}

impl HeadlessWindow {
    fn read<T>(&self, f: impl FnOnce(&WindowState) -> T) -> Result<T, WindowError> {
        let desktop = self.desktop.lock();
        match desktop.windows.get(&self.id) {
            Some(w) if !w.fail_reads => Ok(f(w)),
            _ => Err(WindowError::Gone(self.id)),
        }
    }

    fn write(
        &self,
        op: &'static str,
        f: impl FnOnce(&[Screen], &mut WindowState),
    ) -> Result<(), WindowError> {
        let mut desktop = self.desktop.lock();
        let Desktop { screens, windows, .. } = &mut *desktop;
        match windows.get_mut(&self.id) {
            None => Err(WindowError::Gone(self.id)),
            Some(w) if w.fail_writes => Err(WindowError::Rejected {
                window: self.id,
                op,
                reason: "access denied".to_string(),
            }),
            Some(w) => {
                f(screens, w);
                trace!(window = %self.id, op, bounds = %w.bounds, state = ?w.show_state);
                Ok(())
            }
        }
    }
}

impl Window for HeadlessWindow {
    fn id(&self) -> WindowId { self.id }

    fn bounds(&self) -> Result<Rect, WindowError> {
        self.read(|w| match w.show_state {
            ShowState::Minimized => MINIMIZED_BOUNDS,
            _ => w.bounds,
        })
    }

    fn set_bounds(&self, bounds: Rect) -> Result<(), WindowError> {
        self.write("set_bounds", |_, w| {
            w.bounds = bounds;
            if w.show_state == ShowState::Normal {
                w.restore_bounds = bounds;
            }
        })
    }

    fn show_state(&self) -> Result<ShowState, WindowError> { self.read(|w| w.show_state) }

    fn set_show_state(&self, state: ShowState) -> Result<(), WindowError> {
        self.write("set_show_state", |screens, w| apply_show_state(screens, w, state))
    }

    fn title(&self) -> Result<String, WindowError> { self.read(|w| w.title.clone()) }

    fn process_id(&self) -> Result<u32, WindowError> { self.read(|w| w.process_id) }

    fn is_visible(&self) -> bool { self.read(|w| w.visible).unwrap_or(false) }

    fn focus(&self) -> Result<(), WindowError> {
        let mut desktop = self.desktop.lock();
        if !desktop.windows.contains_key(&self.id) {
            return Err(WindowError::Gone(self.id));
        }
        desktop.foreground = Some(self.id);
        Ok(())
    }
}

impl WindowSystem for HeadlessDesktop {
    type Window = HeadlessWindow;

    fn foreground_window(&self) -> Option<HeadlessWindow> {
        let id = self.inner.lock().foreground?;
        Some(self.window(id))
    }

    fn windows(&self) -> Vec<HeadlessWindow> {
        let ids: Vec<WindowId> = self.inner.lock().windows.keys().copied().collect();
        ids.into_iter().map(|id| self.window(id)).collect()
    }

    fn cursor_position(&self) -> Option<Point> { Some(self.cursor()) }

    fn set_cursor_position(&self, point: Point) -> Result<(), WindowError> {
        let mut desktop = self.inner.lock();
        if desktop.fail_cursor {
            return Err(WindowError::Cursor(format!("cannot move to {point}")));
        }
        desktop.cursor = point;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::sys::screen::testing::dual_screens;

    #[test]
    fn maximize_fills_usable_area_and_restore_brings_it_back() {
        let desktop = HeadlessDesktop::new(dual_screens());
        let w = desktop.open(WindowSpec::new("editor", Rect::new(2000, 100, 800, 600)));

        w.set_show_state(ShowState::Maximized).unwrap();
        assert_eq!(w.bounds().unwrap(), Rect::new(1920, 0, 1920, 1040));
        assert!(w.is_maximized());

        w.set_show_state(ShowState::Normal).unwrap();
        assert_eq!(w.bounds().unwrap(), Rect::new(2000, 100, 800, 600));
    }

    #[test]
    fn failing_windows_report_errors() {
        let desktop = HeadlessDesktop::new(dual_screens());
        let w = desktop.open(WindowSpec::new("editor", Rect::new(0, 0, 100, 100)));

        desktop.fail_reads(w.id(), true);
        assert_eq!(w.bounds(), Err(WindowError::Gone(w.id())));
        assert!(!w.is_visible());

        desktop.fail_reads(w.id(), false);
        desktop.fail_writes(w.id(), true);
        assert!(matches!(
            w.set_bounds(Rect::new(0, 0, 5, 5)),
            Err(WindowError::Rejected { op: "set_bounds", .. })
        ));
        assert_eq!(w.bounds().unwrap(), Rect::new(0, 0, 100, 100));

        desktop.fail_cursor(true);
        assert!(matches!(
            desktop.set_cursor_position(Point::new(5, 5)),
            Err(WindowError::Cursor(_))
        ));
        assert_eq!(desktop.cursor(), Point::new(0, 0));
    }

    #[test]
    fn focus_follows_open_and_close() {
        let desktop = HeadlessDesktop::new(dual_screens());
        let a = desktop.open(WindowSpec::new("a", Rect::new(0, 0, 100, 100)));
        let b = desktop.open(WindowSpec::new("b", Rect::new(0, 0, 100, 100)));
        assert_eq!(desktop.foreground_id(), Some(b.id()));
        a.focus().unwrap();
        assert_eq!(desktop.foreground_id(), Some(a.id()));
        desktop.close(a.id());
        assert!(desktop.foreground_window().is_none());
        assert_eq!(desktop.windows().len(), 1);
    }
}
