//! Chart state: fields, scales, animated scene, tooltips and the selection
//! controller. Nothing in here touches egui.

mod field;
mod scale;
mod scene;
mod selection;
mod tooltip;
mod transition;

pub use field::{Axis, Field};
pub use scale::{build_scale, format_ticks, Extent, LinearScale, Padding};
pub use scene::Scene;
pub use selection::{Chart, LabelState, SelectOutcome, Selection};
pub use tooltip::{format_tooltip, tooltip_label};
pub use transition::{ease_cubic_in_out, Animated, Transition, AXIS_DURATION, MARK_DURATION};
