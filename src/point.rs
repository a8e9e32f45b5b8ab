//! Movable points on a path.

use kurbo::{Point, Vec2};

/// The default hit-test radius of a point.
pub const DEFAULT_RADIUS: f64 = 5.0;

/// Whether a point lies on the curve or only shapes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointRole {
    Anchor,
    Control,
}

/// The interaction state of a point.
///
/// This is written by the editor and only stored here so that a renderer
/// can find it next to the position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VisualState {
    Base,
    Hover,
    Active,
}

impl Default for VisualState {
    fn default() -> Self {
        VisualState::Base
    }
}

/// A point owned by a [`Segment`](crate::Segment).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurvePoint {
    pos: Point,
    role: PointRole,
    radius: f64,
    state: VisualState,
}

impl CurvePoint {
    pub fn anchor(pos: Point) -> CurvePoint {
        CurvePoint::new(pos, PointRole::Anchor)
    }

    pub fn control(pos: Point) -> CurvePoint {
        CurvePoint::new(pos, PointRole::Control)
    }

    fn new(pos: Point, role: PointRole) -> CurvePoint {
        debug_assert!(pos.is_finite(), "point positions must be finite");
        CurvePoint {
            pos,
            role,
            radius: DEFAULT_RADIUS,
            state: VisualState::Base,
        }
    }

    /// Set the hit-test radius.
    pub fn with_radius(mut self, radius: f64) -> CurvePoint {
        self.radius = radius;
        self
    }

    pub fn pos(&self) -> Point {
        self.pos
    }

    pub fn role(&self) -> PointRole {
        self.role
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn is_anchor(&self) -> bool {
        self.role == PointRole::Anchor
    }

    pub fn is_control(&self) -> bool {
        self.role == PointRole::Control
    }

    pub fn state(&self) -> VisualState {
        self.state
    }

    pub fn set_state(&mut self, state: VisualState) -> &mut CurvePoint {
        self.state = state;
        self
    }

    /// Translate the point.
    ///
    /// This never propagates to other points.
    pub fn set_offset(&mut self, delta: Vec2) {
        self.pos += delta;
    }

    /// Move the point to an absolute position, returning the delta that was
    /// applied.
    ///
    /// Propagation of the delta to sibling points is the job of the owning
    /// [`Path`](crate::Path); see [`Path::set_position`](crate::Path::set_position).
    pub fn set_position(&mut self, pos: Point) -> Vec2 {
        let delta = pos - self.pos;
        self.pos = pos;
        delta
    }

    pub fn distance_to(&self, pos: Point) -> f64 {
        self.pos.distance(pos)
    }

    /// Returns `true` if `pos` lies within this point's radius.
    pub fn is_hit(&self, pos: Point) -> bool {
        self.distance_to(pos) <= self.radius
    }

    /// The position as an `[x, y]` pair, in the same frame it is stored in.
    pub fn to_coordinate_pair(&self) -> [f64; 2] {
        [self.pos.x, self.pos.y]
    }
}
