pub mod cycle;
pub mod layout;
pub mod presets;
pub mod transform;

pub use cycle::{LayoutSequence, SequenceError};
pub use layout::{Layout, LayoutError, PercentageRegion, ScreenSelector};
pub use presets::{NamedLayout, current_screen_layout};
pub use transform::transform_point;
