//! Editable cubic Bézier paths for authoring easing and thickness profiles.
//!
//! A [`Path`] is a chain of [`Segment`]s, each holding one anchor and the
//! two control points of the arc arriving at it. Moving a point through
//! [`Path::set_position`] keeps interior joints smooth: anchors carry their
//! control points along, and a control point next to an interior anchor
//! pushes its partner on the other side of the anchor by the opposite
//! amount.
//!
//! The [`Resampler`] turns one path into evenly spaced rows, or two paths
//! into rows that also record the vertical gap between them. In the
//! two-curve case the rows can be spaced by the local gap, so that regions
//! where the curves diverge get proportionally more room.
//!
//! Paths are loaded from, and saved to, a plain [`CurveDescription`]:
//!
//! ```json
//! [ { "pt": [0, 0] }, { "cp1": [100, 0], "cp2": [100, 250], "pt": [300, 250] } ]
//! ```

mod description;
mod error;
mod path;
mod point;
mod resample;
mod segment;

pub use description::{CurveDescription, ProfileDescription, SegmentDescription};
pub use error::{Error, Result};
pub use path::{Axis, DenseSamples, Path, DEFAULT_DENSE_STEPS};
pub use point::{CurvePoint, PointRole, VisualState, DEFAULT_RADIUS};
pub use resample::{GapRow, Resampler, SampleRow, Spacing, DEFAULT_DOMAIN};
pub use segment::{Controls, PointId, PointKind, Segment};
