use thiserror::Error;
use tracing::trace;

use super::layout::Layout;
use crate::sys::screen::ScreenProvider;
use crate::sys::window::Window;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SequenceError {
    #[error("a layout cycle needs at least one layout")]
    Empty,
}

/// An ordered, non-empty list of layouts advanced one step per activation.
///
/// The sequence keeps no cursor of its own: the current position is inferred
/// from the window each time, so a window moved by hand simply restarts the
/// cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutSequence(Vec<Layout>);

impl LayoutSequence {
    pub fn new(layouts: Vec<Layout>) -> Result<Self, SequenceError> {
        if layouts.is_empty() {
            return Err(SequenceError::Empty);
        }
        Ok(LayoutSequence(layouts))
    }

    pub fn layouts(&self) -> &[Layout] { &self.0 }

    /// Index of the first layout the window is currently in.
    pub fn applied_index(&self, screens: &dyn ScreenProvider, window: &dyn Window) -> Option<usize> {
        self.0.iter().position(|layout| layout.is_applied(screens, window))
    }

    /// The layout to apply next: the one after the first applied entry,
    /// wrapping around, or the first entry if none is applied.
    pub fn next_layout(&self, screens: &dyn ScreenProvider, window: &dyn Window) -> &Layout {
        let next = match self.applied_index(screens, window) {
            Some(i) => (i + 1) % self.0.len(),
            None => 0,
        };
        trace!(window = %window.id(), next, "cycle position");
        &self.0[next]
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use test_log::test;

    use super::*;
    use crate::layout_engine::presets::{SCREEN_LEFT, SCREEN_LEFT_1_3, SCREEN_LEFT_2_3};
    use crate::sys::geometry::Rect;
    use crate::sys::headless::{HeadlessDesktop, WindowSpec};
    use crate::sys::screen::testing::dual_screens;

    fn left_cycle() -> LayoutSequence {
        LayoutSequence::new(vec![
            Layout::Percentage(SCREEN_LEFT),
            Layout::Percentage(SCREEN_LEFT_1_3),
            Layout::Percentage(SCREEN_LEFT_2_3),
        ])
        .unwrap()
    }

    #[test]
    fn empty_sequences_are_rejected() {
        assert_eq!(LayoutSequence::new(vec![]), Err(SequenceError::Empty));
    }

    #[test]
    fn it_wraps_around() {
        let screens = dual_screens();
        let desktop = HeadlessDesktop::new(screens.clone());
        let w = desktop.open(WindowSpec::new("w", Rect::new(300, 300, 400, 300)));
        let cycle = left_cycle();

        let mut seen = Vec::new();
        for _ in 0..5 {
            let next = cycle.next_layout(&screens, &w).clone();
            next.apply(&screens, &w).unwrap();
            seen.push(cycle.applied_index(&screens, &w));
        }
        assert_eq!(seen, vec![Some(0), Some(1), Some(2), Some(0), Some(1)]);
    }

    #[test]
    fn foreign_state_resets_to_first() {
        let screens = dual_screens();
        let desktop = HeadlessDesktop::new(screens.clone());
        let w = desktop.open(WindowSpec::new("w", Rect::new(0, 0, 960, 1040)));
        let cycle = left_cycle();
        assert_eq!(cycle.next_layout(&screens, &w), &Layout::Percentage(SCREEN_LEFT_1_3));

        w.set_bounds(Rect::new(5, 5, 50, 50)).unwrap();
        assert_eq!(cycle.next_layout(&screens, &w), &Layout::Percentage(SCREEN_LEFT));
    }

    #[test]
    fn single_entry_cycle_reapplies_itself() {
        let screens = dual_screens();
        let desktop = HeadlessDesktop::new(screens.clone());
        let w = desktop.open(WindowSpec::new("w", Rect::new(0, 0, 960, 1040)));
        let cycle = LayoutSequence::new(vec![Layout::Percentage(SCREEN_LEFT)]).unwrap();
        assert_eq!(cycle.next_layout(&screens, &w), &Layout::Percentage(SCREEN_LEFT));
    }
}
