//! The named layouts users bind to keys.

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

use super::layout::{Layout, PercentageRegion};
use crate::sys::screen::ScreenProvider;
use crate::sys::window::Window;

pub const SCREEN_TOP_LEFT: PercentageRegion = PercentageRegion::new(0.0, 0.0, 0.5, 0.5);
pub const SCREEN_TOP_RIGHT: PercentageRegion = PercentageRegion::new(0.5, 0.0, 0.5, 0.5);
pub const SCREEN_BOTTOM_LEFT: PercentageRegion = PercentageRegion::new(0.0, 0.5, 0.5, 0.5);
pub const SCREEN_BOTTOM_RIGHT: PercentageRegion = PercentageRegion::new(0.5, 0.5, 0.5, 0.5);

pub const SCREEN_LEFT: PercentageRegion = PercentageRegion::new(0.0, 0.0, 0.5, 1.0);
pub const SCREEN_RIGHT: PercentageRegion = PercentageRegion::new(0.5, 0.0, 0.5, 1.0);
pub const SCREEN_TOP: PercentageRegion = PercentageRegion::new(0.0, 0.0, 1.0, 0.5);
pub const SCREEN_BOTTOM: PercentageRegion = PercentageRegion::new(0.0, 0.5, 1.0, 0.5);

pub const SCREEN_LEFT_1_3: PercentageRegion = PercentageRegion::new(0.0, 0.0, 0.33, 1.0);
pub const SCREEN_LEFT_2_3: PercentageRegion = PercentageRegion::new(0.0, 0.0, 0.67, 1.0);
pub const SCREEN_RIGHT_1_3: PercentageRegion = PercentageRegion::new(0.67, 0.0, 0.33, 1.0);
pub const SCREEN_RIGHT_2_3: PercentageRegion = PercentageRegion::new(0.33, 0.0, 0.67, 1.0);

pub const SCREEN_TOP_1_3: PercentageRegion = PercentageRegion::new(0.0, 0.0, 1.0, 0.33);
pub const SCREEN_TOP_2_3: PercentageRegion = PercentageRegion::new(0.0, 0.0, 1.0, 0.67);
pub const SCREEN_BOTTOM_1_3: PercentageRegion = PercentageRegion::new(0.0, 0.67, 1.0, 0.33);
pub const SCREEN_BOTTOM_2_3: PercentageRegion = PercentageRegion::new(0.0, 0.33, 1.0, 0.67);

pub const SCREEN_VERTICAL_CENTER: PercentageRegion = PercentageRegion::new(0.33, 0.0, 0.34, 1.0);
pub const SCREEN_HORIZONTAL_CENTER: PercentageRegion =
    PercentageRegion::new(0.0, 0.33, 1.0, 0.34);

/// Declaration order is significant: it is the order in which
/// [`current_screen_layout`] tests for a match.
#[derive(
    Serialize,
    Deserialize,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    EnumString,
    Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum NamedLayout {
    ScreenTopLeft,
    ScreenTopRight,
    ScreenBottomLeft,
    ScreenBottomRight,
    ScreenLeft,
    ScreenRight,
    ScreenTop,
    ScreenBottom,
    #[serde(rename = "screen_left_1_3")]
    #[strum(serialize = "screen_left_1_3")]
    ScreenLeftThird,
    #[serde(rename = "screen_left_2_3")]
    #[strum(serialize = "screen_left_2_3")]
    ScreenLeftTwoThirds,
    #[serde(rename = "screen_right_1_3")]
    #[strum(serialize = "screen_right_1_3")]
    ScreenRightThird,
    #[serde(rename = "screen_right_2_3")]
    #[strum(serialize = "screen_right_2_3")]
    ScreenRightTwoThirds,
    #[serde(rename = "screen_top_1_3")]
    #[strum(serialize = "screen_top_1_3")]
    ScreenTopThird,
    #[serde(rename = "screen_top_2_3")]
    #[strum(serialize = "screen_top_2_3")]
    ScreenTopTwoThirds,
    #[serde(rename = "screen_bottom_1_3")]
    #[strum(serialize = "screen_bottom_1_3")]
    ScreenBottomThird,
    #[serde(rename = "screen_bottom_2_3")]
    #[strum(serialize = "screen_bottom_2_3")]
    ScreenBottomTwoThirds,
    ScreenVerticalCenter,
    ScreenHorizontalCenter,
    Maximize,
    Minimize,
}

impl NamedLayout {
    pub fn layout(self) -> Layout {
        use NamedLayout::*;
        let region = match self {
            ScreenTopLeft => SCREEN_TOP_LEFT,
            ScreenTopRight => SCREEN_TOP_RIGHT,
            ScreenBottomLeft => SCREEN_BOTTOM_LEFT,
            ScreenBottomRight => SCREEN_BOTTOM_RIGHT,
            ScreenLeft => SCREEN_LEFT,
            ScreenRight => SCREEN_RIGHT,
            ScreenTop => SCREEN_TOP,
            ScreenBottom => SCREEN_BOTTOM,
            ScreenLeftThird => SCREEN_LEFT_1_3,
            ScreenLeftTwoThirds => SCREEN_LEFT_2_3,
            ScreenRightThird => SCREEN_RIGHT_1_3,
            ScreenRightTwoThirds => SCREEN_RIGHT_2_3,
            ScreenTopThird => SCREEN_TOP_1_3,
            ScreenTopTwoThirds => SCREEN_TOP_2_3,
            ScreenBottomThird => SCREEN_BOTTOM_1_3,
            ScreenBottomTwoThirds => SCREEN_BOTTOM_2_3,
            ScreenVerticalCenter => SCREEN_VERTICAL_CENTER,
            ScreenHorizontalCenter => SCREEN_HORIZONTAL_CENTER,
            Maximize => return Layout::Maximize,
            Minimize => return Layout::Minimize,
        };
        Layout::Percentage(region)
    }

    /// The named layouts that depend on a target screen, in resolution order.
    pub fn screen_layouts() -> impl Iterator<Item = Layout> {
        NamedLayout::iter().map(NamedLayout::layout).filter(Layout::is_screen_bound)
    }
}

/// The layout the window is in right now: the first screen-bound named layout
/// that reports itself applied on the window's current screen, or
/// [`Layout::KeepBounds`] when none does.
pub fn current_screen_layout(screens: &dyn ScreenProvider, window: &dyn Window) -> Layout {
    NamedLayout::screen_layouts()
        .find(|layout| layout.is_applied(screens, window))
        .unwrap_or(Layout::KeepBounds)
}
