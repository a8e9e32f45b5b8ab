//! A single editable multi-segment cubic Bézier path.

use kurbo::{BezPath, Point, Vec2};

use crate::description::{CurveDescription, SegmentDescription};
use crate::point::CurvePoint;
use crate::segment::{self, PointId, PointKind, Segment};
use crate::{Error, Result};

/// The number of steps per segment used by [`Path::sample_dense`] by default.
pub const DEFAULT_DENSE_STEPS: usize = 1000;

/// A coordinate axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
}

/// A chain of segments forming one continuous curve.
///
/// Segments are stored in path order and linked by index; the head is always
/// at index 0 and the tail at the last index. The chain is built once and
/// never rewired; to load another curve, build a new `Path`.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    segments: Vec<Segment>,
}

impl Axis {
    pub fn coord(self, pt: Point) -> f64 {
        match self {
            Axis::X => pt.x,
            Axis::Y => pt.y,
        }
    }
}

impl Path {
    /// Build a path from its description.
    ///
    /// The first entry must be a bare anchor; every later entry must carry
    /// both control points. All coordinates must be finite.
    pub fn from_description(desc: &CurveDescription) -> Result<Path> {
        if desc.is_empty() {
            return Err(Error::malformed(0, "curve has no segments"));
        }
        let mut segments = desc
            .segments()
            .iter()
            .enumerate()
            .map(|(i, el)| segment_from_description(i, el))
            .collect::<Result<Vec<_>>>()?;
        for i in 1..segments.len() {
            segments[i - 1].next = Some(i);
            segments[i].prev = Some(i - 1);
        }
        log::debug!("loaded path with {} segments", segments.len());
        Ok(Path { segments })
    }

    /// The description of this path, suitable for serialization.
    pub fn to_description(&self) -> CurveDescription {
        self.segments
            .iter()
            .map(|seg| match seg.controls() {
                Some(c) => SegmentDescription::curve(
                    c.cp1.to_coordinate_pair(),
                    c.cp2.to_coordinate_pair(),
                    seg.anchor().to_coordinate_pair(),
                ),
                None => SegmentDescription::start(seg.anchor().to_coordinate_pair()),
            })
            .collect::<Vec<_>>()
            .into()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn head(&self) -> &Segment {
        &self.segments[0]
    }

    pub fn tail(&self) -> &Segment {
        &self.segments[self.segments.len() - 1]
    }

    pub fn point(&self, id: PointId) -> Option<&CurvePoint> {
        self.segments.get(id.segment)?.point(id.kind)
    }

    /// Mutable access to a point, without any propagation.
    ///
    /// This is intended for editor state such as the visual state or radius;
    /// moving a point this way bypasses the smoothness rule.
    pub fn point_mut(&mut self, id: PointId) -> Option<&mut CurvePoint> {
        self.segments.get_mut(id.segment)?.point_mut(id.kind)
    }

    /// All points of the path, in path order.
    pub fn all_points(&self) -> impl Iterator<Item = (PointId, &CurvePoint)> + '_ {
        self.segments.iter().enumerate().flat_map(|(i, seg)| {
            seg.points().map(move |(kind, pt)| (PointId { segment: i, kind }, pt))
        })
    }

    /// Returns `true` if `id` is the first or last anchor of the path.
    pub fn is_end_anchor(&self, id: PointId) -> bool {
        id.kind == PointKind::Anchor && (id.segment == 0 || id.segment == self.segments.len() - 1)
    }

    /// Move a point and adjust its siblings to keep the joints smooth.
    ///
    /// Returns the delta that was applied to the point, or `None` if `id`
    /// does not name a point of this path or `pos` is not finite. Nothing
    /// moves in the latter cases.
    pub fn set_position(&mut self, id: PointId, pos: Point) -> Option<Vec2> {
        let delta = self.set_position_silent(id, pos)?;
        self.propagate_move(id, delta);
        Some(delta)
    }

    /// Move a point without touching any other point.
    pub fn set_position_silent(&mut self, id: PointId, pos: Point) -> Option<Vec2> {
        if !pos.is_finite() {
            log::warn!("ignoring move of {:?} to non-finite {:?}", id, pos);
            return None;
        }
        self.point_mut(id).map(|pt| pt.set_position(pos))
    }

    /// Translate a point without touching any other point.
    pub fn set_offset(&mut self, id: PointId, delta: Vec2) -> bool {
        if !delta.is_finite() {
            log::warn!("ignoring non-finite offset {:?} of {:?}", delta, id);
            return false;
        }
        match self.point_mut(id) {
            Some(pt) => {
                pt.set_offset(delta);
                true
            }
            None => false,
        }
    }

    /// Apply the smoothness rule for a point that has moved by `delta`.
    ///
    /// The point itself is not moved.
    pub fn propagate_move(&mut self, id: PointId, delta: Vec2) {
        if self.point(id).is_some() {
            segment::propagate(&mut self.segments, id, delta);
        }
    }

    /// Evaluate the arc arriving at segment `ix` along one axis.
    ///
    /// For the first segment, which has no arc, this is the anchor coordinate.
    ///
    /// # Panics
    ///
    /// Panics if `ix` is out of bounds.
    pub fn evaluate(&self, ix: usize, t: f64, axis: Axis) -> f64 {
        let seg = &self.segments[ix];
        match (seg.prev, seg.controls()) {
            (Some(prev), Some(c)) => {
                let p0 = axis.coord(self.segments[prev].anchor().pos());
                let p1 = axis.coord(c.cp1.pos());
                let p2 = axis.coord(c.cp2.pos());
                let p3 = axis.coord(seg.anchor().pos());
                let mt = 1.0 - t;
                mt * mt * mt * p0 + 3.0 * mt * mt * t * p1 + 3.0 * mt * t * t * p2 + t * t * t * p3
            }
            _ => axis.coord(seg.anchor().pos()),
        }
    }

    /// Evaluate the arc arriving at segment `ix` as a point.
    pub fn eval(&self, ix: usize, t: f64) -> Point {
        Point::new(
            self.evaluate(ix, t, Axis::X),
            self.evaluate(ix, t, Axis::Y),
        )
    }

    /// A dense, ordered sampling of the whole curve.
    ///
    /// The head contributes its anchor; every other segment contributes
    /// `step_count` points at `t = k / step_count` for `k` in
    /// `0..step_count`; the tail anchor closes the sequence. The iterator is
    /// cheap to clone, which restarts it.
    pub fn sample_dense(&self, step_count: usize) -> DenseSamples<'_> {
        DenseSamples {
            path: self,
            seg: 0,
            step: 0,
            step_count: step_count.max(1),
            done: false,
        }
    }

    /// The smallest and largest x of the path's anchors and control points.
    pub fn x_extent(&self) -> (f64, f64) {
        self.all_points()
            .map(|(_, pt)| pt.pos().x)
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), x| {
                (lo.min(x), hi.max(x))
            })
    }

    /// Render the path to a Bézier path, for drawing.
    pub fn render(&self) -> BezPath {
        let mut path = BezPath::new();
        path.move_to(self.head().anchor().pos());
        for seg in &self.segments[1..] {
            if let Some(c) = seg.controls() {
                path.curve_to(c.cp1.pos(), c.cp2.pos(), seg.anchor().pos());
            }
        }
        path
    }

    /// The arcs of the path as kurbo cubics, in order.
    pub fn cubics(&self) -> impl Iterator<Item = kurbo::CubicBez> + '_ {
        self.segments
            .windows(2)
            .filter_map(|w| w[1].cubic(w[0].anchor().pos()))
    }

    /// Check the link invariants of the chain.
    #[cfg(test)]
    fn links_consistent(&self) -> bool {
        let n = self.segments.len();
        self.segments[0].prev.is_none()
            && self.segments[n - 1].next.is_none()
            && self
                .segments
                .iter()
                .enumerate()
                .all(|(i, seg)| seg.next.map(|j| self.segments[j].prev == Some(i)).unwrap_or(true))
    }
}

fn segment_from_description(index: usize, el: &SegmentDescription) -> Result<Segment> {
    let pt = el
        .pt
        .ok_or_else(|| Error::malformed(index, "missing `pt`"))
        .and_then(|pt| to_point(index, pt))?;
    match (index, el.cp1, el.cp2) {
        (0, None, None) => Ok(Segment::start(pt)),
        (0, _, _) => Err(Error::malformed(index, "first segment cannot have control points")),
        (_, Some(cp1), Some(cp2)) => Ok(Segment::curve(
            to_point(index, cp1)?,
            to_point(index, cp2)?,
            pt,
        )),
        _ => Err(Error::malformed(index, "segment needs both `cp1` and `cp2`")),
    }
}

fn to_point(index: usize, [x, y]: [f64; 2]) -> Result<Point> {
    let pt = Point::new(x, y);
    if pt.is_finite() {
        Ok(pt)
    } else {
        Err(Error::malformed(index, "coordinate is not finite"))
    }
}

/// Iterator returned by [`Path::sample_dense`].
#[derive(Debug, Clone)]
pub struct DenseSamples<'a> {
    path: &'a Path,
    seg: usize,
    step: usize,
    step_count: usize,
    done: bool,
}

impl<'a> Iterator for DenseSamples<'a> {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        if self.done {
            return None;
        }
        let segments = self.path.segments();
        if self.seg == 0 {
            self.seg = 1;
            return Some(segments[0].anchor().pos());
        }
        if self.seg < segments.len() {
            let t = self.step as f64 / self.step_count as f64;
            let pt = self.path.eval(self.seg, t);
            self.step += 1;
            if self.step == self.step_count {
                self.step = 0;
                self.seg += 1;
            }
            return Some(pt);
        }
        self.done = true;
        Some(self.path.tail().anchor().pos())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.path.segments().len();
        let remaining = if self.done {
            0
        } else if self.seg == 0 {
            2 + (n - 1) * self.step_count
        } else {
            (n - self.seg) * self.step_count - self.step + 1
        };
        (remaining, Some(remaining))
    }
}

impl<'a> ExactSizeIterator for DenseSamples<'a> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn example() -> CurveDescription {
        vec![
            SegmentDescription::start([0., 0.]),
            SegmentDescription::curve([100., 0.], [100., 250.], [300., 250.]),
            SegmentDescription::curve([500., 250.], [500., 500.], [600., 500.]),
        ]
        .into()
    }

    #[test]
    fn builds_linked_chain() {
        let path = Path::from_description(&example()).unwrap();
        assert_eq!(path.segments().len(), 3);
        assert!(path.links_consistent());
        assert!(path.head().is_first());
        assert!(path.tail().is_last());
        assert_eq!(path.all_points().count(), 7);
    }

    #[test]
    fn description_round_trip() {
        let desc = example();
        let path = Path::from_description(&desc).unwrap();
        assert_eq!(path.to_description(), desc);
        let again = Path::from_description(&path.to_description()).unwrap();
        assert_eq!(again, path);
    }

    #[test]
    fn rejects_malformed_descriptions() {
        let empty = CurveDescription::default();
        assert!(matches!(
            Path::from_description(&empty),
            Err(Error::MalformedCurveDescription { index: 0, .. })
        ));

        let mut desc = example();
        desc.0[2].cp2 = None;
        assert!(matches!(
            Path::from_description(&desc),
            Err(Error::MalformedCurveDescription { index: 2, .. })
        ));

        let mut desc = example();
        desc.0[0].cp1 = Some([1., 1.]);
        desc.0[0].cp2 = Some([1., 1.]);
        assert!(Path::from_description(&desc).is_err());

        let mut desc = example();
        desc.0[1].pt = None;
        assert!(matches!(
            Path::from_description(&desc),
            Err(Error::MalformedCurveDescription { index: 1, .. })
        ));

        let mut desc = example();
        desc.0[1].cp1 = Some([f64::NAN, 0.]);
        assert!(Path::from_description(&desc).is_err());
    }

    #[test]
    fn evaluate_hits_anchors() {
        let path = Path::from_description(&example()).unwrap();
        assert_eq!(path.eval(1, 1.0), Point::new(300., 250.));
        assert_eq!(path.eval(2, 0.0), Point::new(300., 250.));
        for ix in 1..path.segments().len() {
            let start = path.segments()[ix - 1].anchor().pos();
            let end = path.segments()[ix].anchor().pos();
            for &axis in &[Axis::X, Axis::Y] {
                assert_eq!(path.evaluate(ix, 0.0, axis), axis.coord(start));
                assert_eq!(path.evaluate(ix, 1.0, axis), axis.coord(end));
            }
        }
        assert_eq!(path.eval(0, 0.5), Point::new(0., 0.));
    }

    #[test]
    fn evaluate_agrees_with_kurbo() {
        use kurbo::ParamCurve;

        let path = Path::from_description(&example()).unwrap();
        let cubics: Vec<_> = path.cubics().collect();
        assert_eq!(cubics.len(), 2);
        for (i, c) in cubics.iter().enumerate() {
            for &t in &[0.1, 0.25, 0.5, 0.9] {
                let ours = path.eval(i + 1, t);
                let theirs = c.eval(t);
                approx::assert_abs_diff_eq!(ours.x, theirs.x, epsilon = 1e-9);
                approx::assert_abs_diff_eq!(ours.y, theirs.y, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn dense_sampling_shape() {
        let path = Path::from_description(&example()).unwrap();
        let samples = path.sample_dense(10);
        assert_eq!(samples.len(), 1 + 2 * 10 + 1);
        let pts: Vec<_> = samples.clone().collect();
        assert_eq!(pts.len(), 22);
        assert_eq!(pts[0], Point::new(0., 0.));
        // t = 0 of the first arc repeats the start anchor
        assert_eq!(pts[1], Point::new(0., 0.));
        assert_eq!(pts[11], Point::new(300., 250.));
        assert_eq!(pts[21], Point::new(600., 500.));
        // restartable
        assert_eq!(samples.collect::<Vec<_>>(), pts);
    }

    #[test]
    fn single_anchor_path_samples_twice() {
        let desc: CurveDescription = vec![SegmentDescription::start([5., 6.])].into();
        let path = Path::from_description(&desc).unwrap();
        let pts: Vec<_> = path.sample_dense(DEFAULT_DENSE_STEPS).collect();
        assert_eq!(pts, vec![Point::new(5., 6.), Point::new(5., 6.)]);
        assert_eq!(path.head(), path.tail());
    }

    #[test]
    fn dragging_shared_anchor_moves_adjacent_controls() {
        let mut path = Path::from_description(&example()).unwrap();
        let delta = path
            .set_position(PointId::anchor(1), Point::new(310., 245.))
            .unwrap();
        assert_eq!(delta, Vec2::new(10., -5.));
        let pos = |path: &Path, id| path.point(id).unwrap().pos();
        assert_eq!(pos(&path, PointId::cp2(1)), Point::new(110., 245.));
        assert_eq!(pos(&path, PointId::cp1(2)), Point::new(510., 245.));
        assert_eq!(pos(&path, PointId::cp1(1)), Point::new(100., 0.));
        assert_eq!(pos(&path, PointId::cp2(2)), Point::new(500., 500.));
    }

    #[test]
    fn silent_moves_do_not_propagate() {
        let mut path = Path::from_description(&example()).unwrap();
        let before = path.clone();
        path.set_position_silent(PointId::anchor(1), Point::new(310., 245.));
        assert!(path.set_offset(PointId::anchor(1), Vec2::new(-10., 5.)));
        assert_eq!(path, before);
        assert!(!path.set_offset(PointId::cp1(0), Vec2::new(1., 1.)));
        assert!(path.set_position(PointId::cp1(7), Point::ORIGIN).is_none());
    }

    #[test]
    fn non_finite_moves_are_ignored() {
        let mut path = Path::from_description(&example()).unwrap();
        let before = path.clone();
        assert!(path
            .set_position(PointId::anchor(1), Point::new(600., f64::NAN))
            .is_none());
        assert!(path
            .set_position_silent(PointId::cp2(2), Point::new(f64::INFINITY, 0.))
            .is_none());
        assert!(!path.set_offset(PointId::cp1(1), Vec2::new(f64::NAN, 1.)));
        assert_eq!(path, before);
    }

    #[test]
    fn mirrored_offsets_are_exact_under_random_drags() {
        use rand::Rng;

        let mut rng = rand::thread_rng();
        let mut path = Path::from_description(&example()).unwrap();
        for _ in 0..200 {
            let ids: Vec<PointId> = path.all_points().map(|(id, _)| id).collect();
            let id = ids[rng.gen_range(0, ids.len())];
            let target = Point::new(rng.gen_range(-50.0, 650.0), rng.gen_range(-50.0, 550.0));
            let before = path.clone();
            let delta = path.set_position(id, target).unwrap();
            let moved = |other: PointId| {
                path.point(other).unwrap().pos() - before.point(other).unwrap().pos()
            };
            let same = |a: Vec2, b: Vec2| {
                approx::abs_diff_eq!(a.x, b.x, epsilon = 1e-9)
                    && approx::abs_diff_eq!(a.y, b.y, epsilon = 1e-9)
            };
            match id {
                PointId { segment: 2, kind: PointKind::Cp1 } => {
                    assert!(same(moved(PointId::cp2(1)), -delta))
                }
                PointId { segment: 1, kind: PointKind::Cp2 } => {
                    assert!(same(moved(PointId::cp1(2)), -delta))
                }
                PointId { segment: 1, kind: PointKind::Anchor } => {
                    assert!(same(moved(PointId::cp2(1)), delta));
                    assert!(same(moved(PointId::cp1(2)), delta));
                }
                _ => (),
            }
            assert!(path.links_consistent());
        }
    }

    #[test]
    fn render_matches_segments() {
        let path = Path::from_description(&example()).unwrap();
        let bez = path.render();
        assert_eq!(bez.elements().len(), 3);
        assert_eq!(path.x_extent(), (0., 600.));
    }
}
