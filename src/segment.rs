//! Path segments and the rule that keeps joints smooth while editing.

use std::iter::once;

use kurbo::{CubicBez, Point, Vec2};

use crate::point::CurvePoint;

/// Which point of a segment is meant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointKind {
    /// The control point leaving the previous anchor.
    Cp1,
    /// The control point arriving at this segment's anchor.
    Cp2,
    Anchor,
}

/// Identifies a point within a [`Path`](crate::Path).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PointId {
    pub segment: usize,
    pub kind: PointKind,
}

/// The two control points of a cubic arc.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Controls {
    pub cp1: CurvePoint,
    pub cp2: CurvePoint,
}

/// One anchor of a path, together with the arc arriving at it.
///
/// The first segment of a path has no controls: it only marks where the
/// curve starts.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    anchor: CurvePoint,
    controls: Option<Controls>,
    pub(crate) prev: Option<usize>,
    pub(crate) next: Option<usize>,
}

impl PointId {
    pub fn anchor(segment: usize) -> PointId {
        PointId {
            segment,
            kind: PointKind::Anchor,
        }
    }

    pub fn cp1(segment: usize) -> PointId {
        PointId {
            segment,
            kind: PointKind::Cp1,
        }
    }

    pub fn cp2(segment: usize) -> PointId {
        PointId {
            segment,
            kind: PointKind::Cp2,
        }
    }
}

impl Segment {
    /// The start of a path.
    pub fn start(anchor: Point) -> Segment {
        Segment {
            anchor: CurvePoint::anchor(anchor),
            controls: None,
            prev: None,
            next: None,
        }
    }

    /// A cubic arc from the previous anchor to `anchor`.
    pub fn curve(cp1: Point, cp2: Point, anchor: Point) -> Segment {
        Segment {
            anchor: CurvePoint::anchor(anchor),
            controls: Some(Controls {
                cp1: CurvePoint::control(cp1),
                cp2: CurvePoint::control(cp2),
            }),
            prev: None,
            next: None,
        }
    }

    pub fn anchor(&self) -> &CurvePoint {
        &self.anchor
    }

    pub fn controls(&self) -> Option<&Controls> {
        self.controls.as_ref()
    }

    pub fn prev(&self) -> Option<usize> {
        self.prev
    }

    pub fn next(&self) -> Option<usize> {
        self.next
    }

    pub fn is_first(&self) -> bool {
        self.prev.is_none()
    }

    pub fn is_last(&self) -> bool {
        self.next.is_none()
    }

    pub fn point(&self, kind: PointKind) -> Option<&CurvePoint> {
        match kind {
            PointKind::Anchor => Some(&self.anchor),
            PointKind::Cp1 => self.controls.as_ref().map(|c| &c.cp1),
            PointKind::Cp2 => self.controls.as_ref().map(|c| &c.cp2),
        }
    }

    pub fn point_mut(&mut self, kind: PointKind) -> Option<&mut CurvePoint> {
        match kind {
            PointKind::Anchor => Some(&mut self.anchor),
            PointKind::Cp1 => self.controls.as_mut().map(|c| &mut c.cp1),
            PointKind::Cp2 => self.controls.as_mut().map(|c| &mut c.cp2),
        }
    }

    /// The points of this segment in drawing order: `cp1`, `cp2`, anchor.
    pub fn points(&self) -> impl Iterator<Item = (PointKind, &CurvePoint)> + '_ {
        let controls = self
            .controls
            .iter()
            .flat_map(|c| once((PointKind::Cp1, &c.cp1)).chain(once((PointKind::Cp2, &c.cp2))));
        controls.chain(once((PointKind::Anchor, &self.anchor)))
    }

    /// The cubic arc arriving at this segment, given the previous anchor.
    ///
    /// Returns `None` for the first segment.
    pub fn cubic(&self, start: Point) -> Option<CubicBez> {
        self.controls
            .as_ref()
            .map(|c| CubicBez::new(start, c.cp1.pos(), c.cp2.pos(), self.anchor.pos()))
    }

    /// Silently translate one of this segment's points, if it exists.
    fn offset(&mut self, kind: PointKind, delta: Vec2) {
        if let Some(pt) = self.point_mut(kind) {
            pt.set_offset(delta);
        }
    }
}

/// Adjust the siblings of a point that has just moved by `delta`.
///
/// Anchors carry both adjacent control points with them. A control point
/// next to an interior anchor pushes the control point on the other side of
/// that anchor by the opposite delta, so the tangent through the joint
/// stays continuous. All adjustments are plain offsets and never propagate
/// further.
pub(crate) fn propagate(segments: &mut [Segment], id: PointId, delta: Vec2) {
    let seg = &segments[id.segment];
    let (prev, next) = (seg.prev, seg.next);
    match id.kind {
        PointKind::Anchor => {
            if prev.is_some() {
                segments[id.segment].offset(PointKind::Cp2, delta);
            }
            if let Some(next) = next {
                segments[next].offset(PointKind::Cp1, delta);
            }
        }
        PointKind::Cp1 => {
            if let Some(prev) = prev {
                if !segments[prev].is_first() {
                    segments[prev].offset(PointKind::Cp2, -delta);
                }
            }
        }
        PointKind::Cp2 => {
            if let Some(next) = next {
                segments[next].offset(PointKind::Cp1, -delta);
            }
        }
    }
}
