//! The single consumer of input events.
//!
//! The dispatcher owns the hotkey bindings and performs the bound action for
//! each event it drains, one at a time, on the thread that calls
//! [`Dispatcher::run`].

use std::fmt;
use std::sync::Arc;

use tracing::{debug, info, instrument, trace, warn};

use super::window_cycler::focus_next_window;
use crate::common::collections::HashMap;
use crate::layout_engine::{Layout, LayoutError, LayoutSequence};
use crate::sys::event::{
    Hotkey, HotkeyError, HotkeyService, InputEvent, Modifiers, MouseScroll, Receiver,
    Registration,
};
use crate::sys::geometry::Point;
use crate::sys::screen::ScreenProvider;
use crate::sys::window::{Window, WindowError, WindowId, WindowSystem};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Apply(Layout),
    Cycle(LayoutSequence),
    /// Moves the cursor to the center of the screen at this index.
    WarpCursor(usize),
    FocusNextWindow,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Apply(layout) => write!(f, "apply {layout}"),
            Action::Cycle(seq) => {
                f.write_str("cycle [")?;
                for (i, layout) in seq.layouts().iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{layout}")?;
                }
                f.write_str("]")
            }
            Action::WarpCursor(i) => write!(f, "warp cursor to screen {i}"),
            Action::FocusNextWindow => f.write_str("focus next window"),
        }
    }
}

/// What an activation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    NoWindow,
    AlreadyApplied,
    Applied {
        /// Where the cursor was moved, if it was inside the window.
        cursor: Option<Point>,
    },
}

pub struct Dispatcher<W: WindowSystem, P: ScreenProvider> {
    system: W,
    screens: P,
    bindings: HashMap<Hotkey, Action>,
    registrations: Vec<Registration>,
    scroll_modifiers: Option<Modifiers>,
}

impl<W: WindowSystem, P: ScreenProvider> Dispatcher<W, P> {
    pub fn new(system: W, screens: P) -> Self {
        Dispatcher {
            system,
            screens,
            bindings: HashMap::default(),
            registrations: Vec::new(),
            scroll_modifiers: None,
        }
    }

    /// Scrolling with these modifiers held focuses the next window on the
    /// screen under the pointer.
    pub fn with_scroll_cycling(mut self, modifiers: Modifiers) -> Self {
        self.scroll_modifiers = Some(modifiers);
        self
    }

    pub fn system(&self) -> &W { &self.system }

    pub fn screens(&self) -> &P { &self.screens }

    pub fn bindings(&self) -> &HashMap<Hotkey, Action> { &self.bindings }

    /// Registers `hotkey` with `service` and binds it to `action`. The hotkey
    /// stays registered until [`shutdown`](Self::shutdown) or the dispatcher
    /// is dropped.
    pub fn bind(
        &mut self,
        service: &Arc<dyn HotkeyService>,
        hotkey: Hotkey,
        action: Action,
    ) -> Result<(), HotkeyError> {
        let registration = Registration::new(service.clone(), hotkey)?;
        debug!(%hotkey, %action, "bound");
        self.registrations.push(registration);
        self.bindings.insert(hotkey, action);
        Ok(())
    }

    /// Unregisters every hotkey.
    pub fn shutdown(&mut self) {
        let count = self.registrations.len();
        for registration in self.registrations.drain(..) {
            trace!(hotkey = %registration.hotkey(), "releasing");
        }
        self.bindings.clear();
        debug!(count, "released hotkeys");
    }

    /// Handles events until [`InputEvent::Shutdown`] arrives or every sender
    /// is gone. The hotkey registry holds a sender, so as long as any binding
    /// is registered only a shutdown event ends the loop.
    pub fn run(mut self, mut events: Receiver) {
        info!(bindings = self.bindings.len(), "dispatcher started");
        while let Some((span, event)) = events.recv_blocking() {
            let _guard = span.enter();
            let stop = event == InputEvent::Shutdown;
            self.handle_event(event);
            if stop {
                break;
            }
        }
        self.shutdown();
        info!("dispatcher stopped");
    }

    /// Handles everything already queued, returning the number of events.
    pub fn drain(&mut self, events: &mut Receiver) -> usize {
        let mut handled = 0;
        while let Some((span, event)) = events.try_recv() {
            let _guard = span.enter();
            self.handle_event(event);
            handled += 1;
        }
        handled
    }

    #[instrument(name = "dispatcher::handle_event", skip(self), fields(event = ?event))]
    pub fn handle_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::HotkeyPressed(hotkey) => {
                let Some(action) = self.bindings.get(&hotkey) else {
                    trace!(%hotkey, "no binding");
                    return;
                };
                self.perform(action);
            }
            InputEvent::Scroll(scroll) => self.on_scroll(scroll),
            InputEvent::ScreensChanged => self.screens.refresh(),
            InputEvent::Shutdown => self.shutdown(),
        }
    }

    fn on_scroll(&self, scroll: MouseScroll) {
        let Some(required) = self.scroll_modifiers else { return };
        if !scroll.modifiers.contains(required) {
            return;
        }
        if let Err(e) = focus_next_window(&self.system, &self.screens, scroll.position) {
            warn!("could not focus next window: {e}");
        }
    }

    fn perform(&self, action: &Action) {
        let result = match action {
            Action::Apply(layout) => self.activate(layout).map(drop),
            Action::Cycle(sequence) => self.cycle(sequence).map(drop),
            Action::WarpCursor(index) => self.warp_cursor(*index).map_err(LayoutError::from),
            Action::FocusNextWindow => self.focus_next().map(drop).map_err(LayoutError::from),
        };
        if let Err(e) = result {
            warn!(%action, "action failed: {e}");
        }
    }

    /// Advances `sequence` on the foreground window.
    pub fn cycle(&self, sequence: &LayoutSequence) -> Result<Activation, LayoutError> {
        let Some(window) = self.system.foreground_window() else {
            return Ok(Activation::NoWindow);
        };
        let layout = sequence.next_layout(&self.screens, &window);
        self.activate_on(&window, layout)
    }

    /// Applies `layout` to the foreground window, carrying the cursor along if
    /// it is inside the window.
    pub fn activate(&self, layout: &Layout) -> Result<Activation, LayoutError> {
        let Some(window) = self.system.foreground_window() else {
            trace!("no foreground window");
            return Ok(Activation::NoWindow);
        };
        self.activate_on(&window, layout)
    }

    fn activate_on(&self, window: &W::Window, layout: &Layout) -> Result<Activation, LayoutError> {
        let cursor = self.system.cursor_position();
        if layout.is_applied(&self.screens, window) {
            debug!(window = %window.id(), %layout, "already applied");
            return Ok(Activation::AlreadyApplied);
        }
        // Computed against the bounds the window has before it moves.
        let inside = window.bounds().ok().zip(cursor).filter(|(b, p)| b.contains(*p));
        let new_cursor =
            inside.and_then(|(_, p)| layout.transform_from_current(&self.screens, window, p));

        layout.apply(&self.screens, window)?;
        if let Some(point) = new_cursor {
            trace!(%point, "moving cursor");
            self.system.set_cursor_position(point)?;
        }
        Ok(Activation::Applied { cursor: new_cursor })
    }

    pub fn warp_cursor(&self, index: usize) -> Result<(), WindowError> {
        let Some(screen) = self.screens.by_index(index) else {
            warn!(index, "no screen to warp the cursor to");
            return Ok(());
        };
        let center = screen.bounds.center();
        debug!(screen = %screen.id, %center, "warping cursor");
        self.system.set_cursor_position(center)
    }

    pub fn focus_next(&self) -> Result<Option<WindowId>, WindowError> {
        let Some(at) = self.system.cursor_position() else {
            return Ok(None);
        };
        focus_next_window(&self.system, &self.screens, at)
    }
}
