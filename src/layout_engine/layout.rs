//! Window layouts.
//!
//! A [`Layout`] maps a window and a target screen to a target rectangle or a
//! target show state. Each variant answers four questions:
//!
//! * `calc_bounds`: where the window should end up,
//! * `apply_on`: make it so,
//! * `is_applied_on`: is it already so,
//! * `transform_from_current_on`: where a point inside the window moves to.
//!
//! The `_on` forms take an explicit screen. The plain forms resolve the screen
//! from the window itself, except for [`Layout::MoveToScreen`], which resolves
//! its own selector at call time.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, trace};

use super::presets::current_screen_layout;
use super::transform::transform_point;
use crate::sys::geometry::{Point, Rect};
use crate::sys::screen::{Screen, ScreenId, ScreenProvider};
use crate::sys::window::{ShowState, Window, WindowError, WindowId};

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("no screen to lay the window out on")]
    NoScreen,
    #[error("cannot compute target bounds for window {0}")]
    NoBounds(WindowId),
    #[error(transparent)]
    Window(#[from] WindowError),
}

/// A rectangle expressed as fractions of a screen's usable bounds. Fractions
/// are expected to lie in `[0, 1]` but this is not enforced.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PercentageRegion {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PercentageRegion {
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        PercentageRegion { left, top, width, height }
    }

    /// Resolves the region against `area`, truncating to whole pixels.
    pub fn resolve(&self, area: Rect) -> Rect {
        let w = f64::from(area.width());
        let h = f64::from(area.height());
        Rect::new(
            (f64::from(area.left()) + w * self.left) as i32,
            (f64::from(area.top()) + h * self.top) as i32,
            (w * self.width) as i32,
            (h * self.height) as i32,
        )
    }

    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();
        for (name, value) in [
            ("left", self.left),
            ("top", self.top),
            ("width", self.width),
            ("height", self.height),
        ] {
            if !(0.0..=1.0).contains(&value) {
                issues.push(format!("region {name} must be within [0, 1], got {value}"));
            }
        }
        if self.left + self.width > 1.0 + f64::EPSILON {
            issues.push(format!(
                "region extends past the right edge (left {} + width {})",
                self.left, self.width
            ));
        }
        if self.top + self.height > 1.0 + f64::EPSILON {
            issues.push(format!(
                "region extends past the bottom edge (top {} + height {})",
                self.top, self.height
            ));
        }
        issues
    }
}

/// Chooses the destination of a [`Layout::MoveToScreen`]. Evaluated every
/// time the layout is used, never when it is bound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenSelector {
    /// Position in the left-to-right screen list.
    Index(usize),
    Primary,
    Device(ScreenId),
}

impl ScreenSelector {
    pub fn resolve(&self, screens: &dyn ScreenProvider) -> Option<Screen> {
        match self {
            ScreenSelector::Index(i) => screens.by_index(*i),
            ScreenSelector::Primary => screens.primary(),
            ScreenSelector::Device(id) => screens.by_id(id),
        }
    }
}

impl fmt::Display for ScreenSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScreenSelector::Index(i) => write!(f, "screen {i}"),
            ScreenSelector::Primary => write!(f, "primary screen"),
            ScreenSelector::Device(id) => write!(f, "screen {id}"),
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum ScreenSelectorRepr {
    Index(usize),
    Keyword(SelectorKeyword),
    Device { device: ScreenId },
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
enum SelectorKeyword {
    Primary,
}

impl Serialize for ScreenSelector {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where S: serde::Serializer {
        let repr = match self {
            ScreenSelector::Index(i) => ScreenSelectorRepr::Index(*i),
            ScreenSelector::Primary => ScreenSelectorRepr::Keyword(SelectorKeyword::Primary),
            ScreenSelector::Device(id) => ScreenSelectorRepr::Device { device: id.clone() },
        };
        repr.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ScreenSelector {
    fn deserialize<D>(deserializer: D) -> Result<ScreenSelector, D::Error>
    where D: serde::Deserializer<'de> {
        Ok(match ScreenSelectorRepr::deserialize(deserializer)? {
            ScreenSelectorRepr::Index(i) => ScreenSelector::Index(i),
            ScreenSelectorRepr::Keyword(SelectorKeyword::Primary) => ScreenSelector::Primary,
            ScreenSelectorRepr::Device { device } => ScreenSelector::Device(device),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Layout {
    /// A fraction of the screen's usable bounds.
    Percentage(PercentageRegion),
    /// The whole usable bounds, without maximizing.
    ScreenBounds,
    /// Native maximize on a particular screen.
    Maximize,
    /// Native minimize. Screen independent.
    Minimize,
    /// The window's current offset, re-based onto another screen and clipped
    /// to its usable bounds.
    KeepBounds,
    /// Whatever layout the window currently has, re-applied on the selected
    /// screen.
    MoveToScreen(ScreenSelector),
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Layout::Percentage(r) => {
                write!(f, "region({}, {}, {}, {})", r.left, r.top, r.width, r.height)
            }
            Layout::ScreenBounds => write!(f, "screen_bounds"),
            Layout::Maximize => write!(f, "maximize"),
            Layout::Minimize => write!(f, "minimize"),
            Layout::KeepBounds => write!(f, "keep_bounds"),
            Layout::MoveToScreen(sel) => write!(f, "move_to({sel})"),
        }
    }
}

impl Layout {
    /// Whether the layout's outcome depends on a target screen, i.e. whether
    /// it can take part in [`current_screen_layout`] resolution.
    pub fn is_screen_bound(&self) -> bool {
        !matches!(self, Layout::Minimize | Layout::MoveToScreen(_))
    }

    /// The screen the screen-free operations use.
    pub fn target_screen(&self, screens: &dyn ScreenProvider, window: &dyn Window) -> Option<Screen> {
        match self {
            Layout::MoveToScreen(selector) => selector.resolve(screens),
            _ => screens.for_window(window),
        }
    }

    /// The geometric target on `screen`. `None` for layouts without one
    /// (minimize) or when the window's state cannot be read.
    pub fn calc_bounds(
        &self,
        screens: &dyn ScreenProvider,
        window: &dyn Window,
        screen: &Screen,
    ) -> Option<Rect> {
        match self {
            Layout::Percentage(region) => Some(region.resolve(screen.usable_bounds)),
            Layout::ScreenBounds | Layout::Maximize => Some(screen.usable_bounds),
            Layout::KeepBounds => keep_bounds(screens, window, screen),
            Layout::Minimize => None,
            Layout::MoveToScreen(_) => {
                current_screen_layout(screens, window).calc_bounds(screens, window, screen)
            }
        }
    }

    pub fn apply_on(
        &self,
        screens: &dyn ScreenProvider,
        window: &dyn Window,
        screen: &Screen,
    ) -> Result<(), LayoutError> {
        match self {
            Layout::Minimize => minimize(window),
            Layout::Maximize => {
                Layout::ScreenBounds.apply_on(screens, window, screen)?;
                debug!(window = %window.id(), screen = %screen.id, "maximizing");
                window.set_show_state(ShowState::Maximized)?;
                Ok(())
            }
            Layout::MoveToScreen(_) => {
                let current = current_screen_layout(screens, window);
                debug!(window = %window.id(), %current, to = %screen.id, "moving layout to screen");
                current.apply_on(screens, window, screen)
            }
            Layout::Percentage(_) | Layout::ScreenBounds | Layout::KeepBounds => {
                // Computed before restoring: KeepBounds works from the bounds
                // the window has right now.
                let bounds = self
                    .calc_bounds(screens, window, screen)
                    .ok_or(LayoutError::NoBounds(window.id()))?;
                restore(window)?;
                debug!(window = %window.id(), layout = %self, %bounds, "setting bounds");
                window.set_bounds(bounds)?;
                Ok(())
            }
        }
    }

    /// Never fails: a window whose state cannot be read is reported as not
    /// having the layout.
    pub fn is_applied_on(
        &self,
        screens: &dyn ScreenProvider,
        window: &dyn Window,
        screen: &Screen,
    ) -> bool {
        match self {
            Layout::Minimize => window.is_minimized(),
            Layout::Maximize => {
                window.is_maximized()
                    && screens.for_window(window).is_some_and(|current| current.id == screen.id)
            }
            Layout::MoveToScreen(_) => {
                current_screen_layout(screens, window).is_applied_on(screens, window, screen)
            }
            Layout::Percentage(_) | Layout::ScreenBounds | Layout::KeepBounds => {
                let current = match window.bounds() {
                    Ok(bounds) => bounds,
                    Err(e) => {
                        trace!(window = %window.id(), "treating as not applied: {e}");
                        return false;
                    }
                };
                self.calc_bounds(screens, window, screen) == Some(current)
            }
        }
    }

    pub fn transform_from_current_on(
        &self,
        screens: &dyn ScreenProvider,
        window: &dyn Window,
        screen: &Screen,
        point: Point,
    ) -> Option<Point> {
        match self {
            Layout::Minimize => Some(point),
            Layout::MoveToScreen(_) => current_screen_layout(screens, window)
                .transform_from_current_on(screens, window, screen, point),
            _ => {
                let current = window.bounds().ok()?;
                let target = self.calc_bounds(screens, window, screen)?;
                transform_point(point, current, target)
            }
        }
    }

    pub fn apply(&self, screens: &dyn ScreenProvider, window: &dyn Window) -> Result<(), LayoutError> {
        if let Layout::Minimize = self {
            return minimize(window);
        }
        let screen = self.target_screen(screens, window).ok_or(LayoutError::NoScreen)?;
        self.apply_on(screens, window, &screen)
    }

    pub fn is_applied(&self, screens: &dyn ScreenProvider, window: &dyn Window) -> bool {
        if let Layout::Minimize = self {
            return window.is_minimized();
        }
        self.target_screen(screens, window)
            .is_some_and(|screen| self.is_applied_on(screens, window, &screen))
    }

    pub fn transform_from_current(
        &self,
        screens: &dyn ScreenProvider,
        window: &dyn Window,
        point: Point,
    ) -> Option<Point> {
        if let Layout::Minimize = self {
            return Some(point);
        }
        let screen = self.target_screen(screens, window)?;
        self.transform_from_current_on(screens, window, &screen, point)
    }
}

fn minimize(window: &dyn Window) -> Result<(), LayoutError> {
    debug!(window = %window.id(), "minimizing");
    window.set_show_state(ShowState::Minimized)?;
    Ok(())
}

/// Leaves maximized or minimized state so a following bounds write sticks.
fn restore(window: &dyn Window) -> Result<(), WindowError> {
    match window.show_state() {
        Ok(ShowState::Normal) => Ok(()),
        _ => window.set_show_state(ShowState::Normal),
    }
}

fn keep_bounds(screens: &dyn ScreenProvider, window: &dyn Window, target: &Screen) -> Option<Rect> {
    let current = window.bounds().ok()?;
    let from = screens.for_rect(current)?;
    let rebased = current.offset(
        target.bounds.left() - from.usable_bounds.left(),
        target.bounds.top() - from.usable_bounds.top(),
    );
    // An empty clip means the window was nowhere near a screen, e.g. parked
    // off-desktop while minimized.
    let clipped = rebased.intersection(&target.usable_bounds);
    (!clipped.is_empty()).then_some(clipped)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use test_log::test;

    use super::*;
    use crate::layout_engine::presets::{SCREEN_LEFT, SCREEN_TOP_LEFT};
    use crate::sys::headless::{HeadlessDesktop, WindowSpec};
    use crate::sys::screen::testing::{dual_screens, screen};

    fn full_hd() -> Vec<Screen> {
        vec![screen(
            "DISPLAY1",
            Rect::new(0, 0, 1920, 1080),
            Rect::new(0, 0, 1920, 1080),
            true,
        )]
    }

    #[test]
    fn top_left_quarter_of_full_hd() {
        let screens = full_hd();
        let desktop = HeadlessDesktop::new(screens.clone());
        let w = desktop.open(WindowSpec::new("w", Rect::new(0, 0, 960, 540)));
        let layout = Layout::Percentage(SCREEN_TOP_LEFT);

        assert_eq!(
            layout.calc_bounds(&screens, &w, &screens[0]),
            Some(Rect::new(0, 0, 960, 540))
        );
        assert!(layout.is_applied(&screens, &w));
    }

    #[test]
    fn apply_then_is_applied_for_assorted_regions() {
        let screens = dual_screens();
        let regions = [
            PercentageRegion::new(0.0, 0.0, 0.5, 0.5),
            PercentageRegion::new(0.67, 0.0, 0.33, 1.0),
            PercentageRegion::new(0.33, 0.0, 0.34, 1.0),
            PercentageRegion::new(0.0, 0.33, 1.0, 0.34),
            PercentageRegion::new(0.1, 0.2, 0.3, 0.4),
        ];
        let starts = [
            Rect::new(10, 10, 300, 200),
            Rect::new(1800, 500, 700, 700),
            Rect::new(-50, -50, 4000, 2000),
        ];
        for region in regions {
            for start in starts {
                let desktop = HeadlessDesktop::new(screens.clone());
                let w = desktop.open(WindowSpec::new("w", start));
                let layout = Layout::Percentage(region);
                layout.apply(&screens, &w).unwrap();
                assert!(layout.is_applied(&screens, &w), "{layout} from {start}");
            }
        }
    }

    #[test]
    fn apply_restores_maximized_windows_first() {
        let screens = dual_screens();
        let desktop = HeadlessDesktop::new(screens.clone());
        let w = desktop.open(WindowSpec::new("w", Rect::new(100, 100, 400, 300)));
        w.set_show_state(ShowState::Maximized).unwrap();

        Layout::Percentage(SCREEN_LEFT).apply(&screens, &w).unwrap();
        assert_eq!(w.show_state().unwrap(), ShowState::Normal);
        assert_eq!(w.bounds().unwrap(), Rect::new(0, 0, 960, 1040));
    }

    #[test]
    fn maximize_is_tied_to_a_screen() {
        let screens = dual_screens();
        let desktop = HeadlessDesktop::new(screens.clone());
        let w = desktop.open(WindowSpec::new("w", Rect::new(100, 100, 400, 300)));

        assert!(!Layout::Maximize.is_applied(&screens, &w));
        Layout::Maximize.apply_on(&screens, &w, &screens[1]).unwrap();
        assert!(w.is_maximized());
        assert_eq!(w.bounds().unwrap(), screens[1].usable_bounds);
        assert!(Layout::Maximize.is_applied_on(&screens, &w, &screens[1]));
        assert!(!Layout::Maximize.is_applied_on(&screens, &w, &screens[0]));
        assert!(Layout::Maximize.is_applied(&screens, &w));
    }

    #[test]
    fn minimize_ignores_screens() {
        let screens = dual_screens();
        let desktop = HeadlessDesktop::new(screens.clone());
        let w = desktop.open(WindowSpec::new("w", Rect::new(100, 100, 400, 300)));
        let p = Point::new(150, 150);

        assert_eq!(Layout::Minimize.transform_from_current(&screens, &w, p), Some(p));
        assert_eq!(Layout::Minimize.calc_bounds(&screens, &w, &screens[0]), None);
        Layout::Minimize.apply(&screens, &w).unwrap();
        assert!(Layout::Minimize.is_applied(&screens, &w));
        assert!(Layout::Minimize.is_applied_on(&screens, &w, &screens[1]));
        assert!(!Layout::Percentage(SCREEN_LEFT).is_applied(&screens, &w));
    }

    #[test]
    fn minimize_leaves_bounds_alone() {
        let screens = dual_screens();
        let desktop = HeadlessDesktop::new(screens.clone());
        let w = desktop.open(WindowSpec::new("w", Rect::new(100, 100, 400, 300)));

        Layout::Minimize.apply_on(&screens, &w, &screens[1]).unwrap();
        assert_eq!(w.show_state().unwrap(), ShowState::Minimized);
        w.set_show_state(ShowState::Normal).unwrap();
        assert_eq!(w.bounds().unwrap(), Rect::new(100, 100, 400, 300));
    }

    #[test]
    fn keep_bounds_rebases_and_clips() {
        let screens = dual_screens();
        let desktop = HeadlessDesktop::new(screens.clone());
        let w = desktop.open(WindowSpec::new("w", Rect::new(1200, 600, 1000, 600)));

        let target = Layout::KeepBounds.calc_bounds(&screens, &w, &screens[1]).unwrap();
        assert_eq!(target, Rect::new(3120, 600, 720, 440));
        assert_eq!(target.intersection(&screens[1].usable_bounds), target);

        Layout::KeepBounds.apply_on(&screens, &w, &screens[1]).unwrap();
        assert_eq!(w.bounds().unwrap(), target);
    }

    #[test]
    fn keep_bounds_has_no_target_for_parked_windows() {
        let screens = dual_screens();
        let desktop = HeadlessDesktop::new(screens.clone());
        let w = desktop.open(WindowSpec::new("w", Rect::new(100, 100, 400, 300)).minimized());
        assert_eq!(Layout::KeepBounds.calc_bounds(&screens, &w, &screens[1]), None);
        assert!(matches!(
            Layout::KeepBounds.apply_on(&screens, &w, &screens[1]),
            Err(LayoutError::NoBounds(_))
        ));
        assert!(w.is_minimized());
    }

    #[test]
    fn keep_bounds_is_applied_for_a_window_inside_its_screen() {
        let screens = dual_screens();
        let desktop = HeadlessDesktop::new(screens.clone());
        let w = desktop.open(WindowSpec::new("w", Rect::new(2000, 100, 800, 600)));
        assert!(Layout::KeepBounds.is_applied(&screens, &w));
    }

    #[test]
    fn transform_maps_cursor_into_target() {
        let screens = dual_screens();
        let desktop = HeadlessDesktop::new(screens.clone());
        let w = desktop.open(WindowSpec::new("w", Rect::new(100, 100, 400, 300)));

        let center = Rect::new(100, 100, 400, 300).center();
        let got = Layout::Percentage(SCREEN_LEFT)
            .transform_from_current(&screens, &w, center)
            .unwrap();
        assert_eq!(got, Point::new(480, 520));

        let got = Layout::Maximize.transform_from_current(&screens, &w, Point::new(100, 100));
        assert_eq!(got, Some(Point::new(0, 0)));
    }

    #[test]
    fn unreadable_windows_are_never_applied() {
        let screens = dual_screens();
        let desktop = HeadlessDesktop::new(screens.clone());
        let w = desktop.open(WindowSpec::new("w", Rect::new(0, 0, 960, 1040)));
        assert!(Layout::Percentage(SCREEN_LEFT).is_applied(&screens, &w));

        desktop.fail_reads(w.id(), true);
        for layout in [
            Layout::Percentage(SCREEN_LEFT),
            Layout::ScreenBounds,
            Layout::Maximize,
            Layout::Minimize,
            Layout::KeepBounds,
            Layout::MoveToScreen(ScreenSelector::Index(0)),
        ] {
            assert!(!layout.is_applied(&screens, &w), "{layout}");
            assert!(!layout.is_applied_on(&screens, &w, &screens[0]), "{layout}");
        }
        assert!(matches!(
            Layout::Percentage(SCREEN_LEFT).apply(&screens, &w),
            Err(LayoutError::NoScreen)
        ));
    }

    #[test]
    fn rejected_writes_surface_as_errors() {
        let screens = dual_screens();
        let desktop = HeadlessDesktop::new(screens.clone());
        let w = desktop.open(WindowSpec::new("w", Rect::new(0, 0, 100, 100)));
        desktop.fail_writes(w.id(), true);
        assert!(matches!(
            Layout::Percentage(SCREEN_LEFT).apply(&screens, &w),
            Err(LayoutError::Window(WindowError::Rejected { .. }))
        ));
    }

    #[test]
    fn move_to_screen_preserves_the_named_layout() {
        let screens = dual_screens();
        let desktop = HeadlessDesktop::new(screens.clone());
        let w = desktop.open(WindowSpec::new("w", Rect::new(0, 0, 960, 520)));
        let to_second = Layout::MoveToScreen(ScreenSelector::Index(1));

        assert!(!to_second.is_applied(&screens, &w));
        to_second.apply(&screens, &w).unwrap();
        assert_eq!(w.bounds().unwrap(), Rect::new(1920, 0, 960, 520));
        assert!(to_second.is_applied(&screens, &w));

        let before = w.bounds().unwrap();
        to_second.apply(&screens, &w).unwrap();
        assert_eq!(w.bounds().unwrap(), before);
    }

    #[test]
    fn move_to_screen_falls_back_to_keep_bounds() {
        let screens = dual_screens();
        let desktop = HeadlessDesktop::new(screens.clone());
        let w = desktop.open(WindowSpec::new("w", Rect::new(2020, 100, 500, 400)));
        let to_first = Layout::MoveToScreen(ScreenSelector::Primary);

        to_first.apply(&screens, &w).unwrap();
        assert_eq!(w.bounds().unwrap(), Rect::new(100, 100, 500, 400));
        to_first.apply(&screens, &w).unwrap();
        assert_eq!(w.bounds().unwrap(), Rect::new(100, 100, 500, 400));
    }

    #[test]
    fn move_to_screen_drifts_under_a_top_taskbar() {
        // Rebasing subtracts the usable origin but adds the full origin, so a
        // reserved strip at the top shifts the window up on every move.
        let screens = vec![
            screen(
                "DISPLAY1",
                Rect::new(0, 0, 1920, 1080),
                Rect::new(0, 40, 1920, 1040),
                true,
            ),
            screen(
                "DISPLAY2",
                Rect::new(1920, 0, 1920, 1080),
                Rect::new(1920, 40, 1920, 1040),
                false,
            ),
        ];
        let desktop = HeadlessDesktop::new(screens.clone());
        let w = desktop.open(WindowSpec::new("w", Rect::new(100, 300, 500, 400)));
        let to_second = Layout::MoveToScreen(ScreenSelector::Index(1));

        to_second.apply(&screens, &w).unwrap();
        assert_eq!(w.bounds().unwrap(), Rect::new(2020, 260, 500, 400));
        assert!(!to_second.is_applied(&screens, &w));

        to_second.apply(&screens, &w).unwrap();
        assert_eq!(w.bounds().unwrap(), Rect::new(2020, 220, 500, 400));
    }

    #[test]
    fn move_to_screen_keeps_windows_maximized() {
        let screens = dual_screens();
        let desktop = HeadlessDesktop::new(screens.clone());
        let w = desktop.open(WindowSpec::new("w", Rect::new(100, 100, 400, 300)));
        Layout::Maximize.apply(&screens, &w).unwrap();

        let to_second = Layout::MoveToScreen(ScreenSelector::Device(ScreenId::new("DISPLAY2")));
        to_second.apply(&screens, &w).unwrap();
        assert!(w.is_maximized());
        assert_eq!(w.bounds().unwrap(), screens[1].usable_bounds);
    }

    #[test]
    fn move_to_missing_screen_is_an_error() {
        let screens = dual_screens();
        let desktop = HeadlessDesktop::new(screens.clone());
        let w = desktop.open(WindowSpec::new("w", Rect::new(100, 100, 400, 300)));
        let to_third = Layout::MoveToScreen(ScreenSelector::Index(2));
        assert!(matches!(to_third.apply(&screens, &w), Err(LayoutError::NoScreen)));
        assert!(!to_third.is_applied(&screens, &w));
        assert_eq!(to_third.transform_from_current(&screens, &w, Point::new(150, 150)), None);
    }

    #[test]
    fn selectors_deserialize_from_config_shapes() {
        #[derive(Deserialize)]
        struct Wrapper {
            to: ScreenSelector,
        }
        let parse = |s: &str| toml::from_str::<Wrapper>(s).unwrap().to;
        assert_eq!(parse("to = 2"), ScreenSelector::Index(2));
        assert_eq!(parse(r#"to = "primary""#), ScreenSelector::Primary);
        assert_eq!(
            parse(r#"to = { device = "DISPLAY2" }"#),
            ScreenSelector::Device(ScreenId::new("DISPLAY2"))
        );
    }

    #[test]
    fn region_validation_flags_out_of_range_fractions() {
        assert!(SCREEN_TOP_LEFT.validate().is_empty());
        let issues = PercentageRegion::new(0.6, 0.0, 0.6, 1.2).validate();
        assert_eq!(issues.len(), 3, "{issues:?}");
    }
}
