use std::fmt;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use super::geometry::{Point, Rect};
use super::window::Window;

/// Stable identity of a display device. Unlike a position in the screen list,
/// this survives a refresh of the display configuration.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct ScreenId(String);

impl ScreenId {
    pub fn new(device: impl Into<String>) -> Self { ScreenId(device.into()) }

    pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

/// A read-only snapshot of one display.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Screen {
    pub id: ScreenId,
    /// The whole display.
    pub bounds: Rect,
    /// The display minus taskbars, docks and other reserved chrome.
    pub usable_bounds: Rect,
    pub primary: bool,
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.id, self.usable_bounds)?;
        if self.primary {
            write!(f, " (primary)")?;
        }
        Ok(())
    }
}

/// Read access to the current display configuration.
///
/// Every method returns owned snapshots. Callers must not hold on to indices
/// or screens across an activation because a refresh may renumber the list.
pub trait ScreenProvider {
    /// All screens, ordered by left edge.
    fn list(&self) -> Vec<Screen>;

    /// Incremented every time the list is rebuilt.
    fn version(&self) -> u64 { 0 }

    /// Rebuild the list from the display backend. Providers backed by a fixed
    /// list have nothing to do.
    fn refresh(&self) {}

    fn by_index(&self, index: usize) -> Option<Screen> { self.list().into_iter().nth(index) }

    fn by_id(&self, id: &ScreenId) -> Option<Screen> {
        self.list().into_iter().find(|s| &s.id == id)
    }

    fn primary(&self) -> Option<Screen> {
        let screens = self.list();
        let idx = screens.iter().position(|s| s.primary).unwrap_or(0);
        screens.into_iter().nth(idx)
    }

    fn for_rect(&self, rect: Rect) -> Option<Screen> { screen_for_rect(self.list(), rect) }

    fn for_point(&self, point: Point) -> Option<Screen> { screen_for_point(self.list(), point) }

    /// The screen a window currently lives on. `None` if the window's bounds
    /// cannot be read or there are no screens.
    fn for_window(&self, window: &dyn Window) -> Option<Screen> {
        match window.bounds() {
            Ok(bounds) => self.for_rect(bounds),
            Err(e) => {
                debug!(window = ?window.id(), "cannot resolve screen: {e}");
                None
            }
        }
    }
}

impl ScreenProvider for Vec<Screen> {
    fn list(&self) -> Vec<Screen> {
        let mut screens = self.clone();
        sort_screens(&mut screens);
        screens
    }
}

/// Orders screens left to right, then top to bottom.
pub fn sort_screens(screens: &mut [Screen]) {
    screens.sort_by_key(|s| (s.bounds.left(), s.bounds.top()));
}

/// Picks the screen with the largest overlap with `rect`. A rectangle that
/// touches no screen goes to the one nearest its center.
pub fn screen_for_rect(screens: Vec<Screen>, rect: Rect) -> Option<Screen> {
    let best = screens
        .iter()
        .enumerate()
        .map(|(i, s)| (i, s.bounds.intersection(&rect).area()))
        .filter(|&(_, area)| area > 0)
        // max_by_key keeps the last maximum; reverse so the leftmost screen wins ties.
        .rev()
        .max_by_key(|&(_, area)| area)
        .map(|(i, _)| i);
    match best {
        Some(i) => screens.into_iter().nth(i),
        None => nearest_screen(screens, rect.center()),
    }
}

pub fn screen_for_point(screens: Vec<Screen>, point: Point) -> Option<Screen> {
    match screens.iter().position(|s| s.bounds.contains(point)) {
        Some(i) => screens.into_iter().nth(i),
        None => nearest_screen(screens, point),
    }
}

fn nearest_screen(screens: Vec<Screen>, point: Point) -> Option<Screen> {
    screens.into_iter().min_by_key(|s| {
        let clamped = Point::new(
            point.x.clamp(s.bounds.left(), (s.bounds.right() - 1).max(s.bounds.left())),
            point.y.clamp(s.bounds.top(), (s.bounds.bottom() - 1).max(s.bounds.top())),
        );
        clamped.distance_squared(point)
    })
}

#[derive(Debug, Error)]
pub enum ScreenError {
    #[error("display enumeration failed: {0}")]
    Enumeration(String),
}

/// The display backend a [`ScreenCache`] pulls from.
pub trait System {
    fn screens(&self) -> Result<Vec<Screen>, ScreenError>;
}

#[derive(Debug, Default)]
struct Snapshot {
    version: u64,
    screens: Vec<Screen>,
}

/// Process-wide screen registry.
///
/// The list is rebuilt wholesale by [`refresh`](ScreenCache::refresh), which
/// must be called whenever the display configuration changes. Readers always
/// see a complete list, either the old one or the new one.
pub struct ScreenCache<S: System> {
    system: S,
    snapshot: RwLock<Snapshot>,
}

impl<S: System> ScreenCache<S> {
    pub fn new(system: S) -> Self {
        let cache = ScreenCache {
            system,
            snapshot: RwLock::new(Snapshot::default()),
        };
        cache.update_screen_config();
        cache
    }

    pub fn system(&self) -> &S { &self.system }

    /// Re-enumerates the displays. Returns the new version number. If the
    /// backend fails the previous list is kept and the version is unchanged.
    pub fn update_screen_config(&self) -> u64 {
        let mut screens = match self.system.screens() {
            Ok(screens) => screens,
            Err(e) => {
                warn!("keeping previous screen list: {e}");
                return self.snapshot.read().version;
            }
        };
        sort_screens(&mut screens);

        info!("screens updated:");
        for screen in &screens {
            info!("\t{screen}");
        }

        let mut snapshot = self.snapshot.write();
        snapshot.version += 1;
        snapshot.screens = screens;
        snapshot.version
    }
}

impl<S: System> ScreenProvider for ScreenCache<S> {
    fn list(&self) -> Vec<Screen> { self.snapshot.read().screens.clone() }

    fn version(&self) -> u64 { self.snapshot.read().version }

    fn refresh(&self) { self.update_screen_config(); }
}
