use bezier_profile::{Path, PointId, Resampler, VisualState};
use kurbo::{Point, Rect, Vec2};

use crate::options::EditorOptions;
use crate::save::{Document, Rows};

/// A point of one of the session's curves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle {
    pub curve: usize,
    pub point: PointId,
}

/// The editor state: one or two curves, the pointer state, and the rows
/// derived from the curves.
///
/// Positions passed in are screen positions; the session removes the
/// padding, clamps to the canvas and keeps the first and last anchor of
/// every curve on the left and right edge before moving anything.
#[derive(Debug, Clone)]
pub struct EditSession {
    curves: Vec<Path>,
    canvas: Rect,
    padding: f64,
    point_radius: f64,
    sample_count: usize,
    resampler: Resampler,
    hover: Option<Handle>,
    active: Option<Handle>,
    rows: Rows,
}

impl EditSession {
    pub fn new(doc: &Document, options: &EditorOptions) -> Result<EditSession, bezier_profile::Error> {
        let mut session = EditSession {
            curves: Vec::new(),
            canvas: options.canvas(),
            padding: options.padding,
            point_radius: options.point_radius,
            sample_count: options.sample_count,
            resampler: options.resampler(),
            hover: None,
            active: None,
            rows: Rows::default(),
        };
        session.load(doc)?;
        Ok(session)
    }

    /// Replace all curves.
    ///
    /// Nothing changes unless every curve of `doc` is well formed and the
    /// curves can be resampled.
    pub fn load(&mut self, doc: &Document) -> Result<(), bezier_profile::Error> {
        let mut curves = match doc {
            Document::Single(curve) => vec![Path::from_description(curve)?],
            Document::Pair(pair) => vec![
                Path::from_description(&pair.curve1)?,
                Path::from_description(&pair.curve2)?,
            ],
        };
        for curve in &mut curves {
            let ids: Vec<PointId> = curve.all_points().map(|(id, _)| id).collect();
            for id in ids {
                if let Some(pt) = curve.point_mut(id) {
                    *pt = pt.with_radius(self.point_radius);
                }
            }
        }
        let rows = resample(&curves, &self.resampler, self.sample_count)?;
        self.curves = curves;
        self.hover = None;
        self.active = None;
        self.rows = rows;
        Ok(())
    }

    pub fn curves(&self) -> &[Path] {
        &self.curves
    }

    pub fn rows(&self) -> &Rows {
        &self.rows
    }

    pub fn hover(&self) -> Option<Handle> {
        self.hover
    }

    pub fn active(&self) -> Option<Handle> {
        self.active
    }

    pub fn set_sample_count(&mut self, n: usize) -> Result<&Rows, bezier_profile::Error> {
        self.sample_count = n;
        self.refresh()
    }

    /// The curves as a document, in curve coordinates.
    pub fn to_document(&self) -> Document {
        match self.curves.as_slice() {
            [curve1, curve2] => Document::Pair(bezier_profile::ProfileDescription {
                curve1: curve1.to_description(),
                curve2: curve2.to_description(),
            }),
            [curve, ..] => Document::Single(curve.to_description()),
            [] => Document::Single(Default::default()),
        }
    }

    pub fn to_screen(&self, pt: Point) -> Point {
        pt + Vec2::new(self.padding, self.padding)
    }

    pub fn from_screen(&self, pt: Point) -> Point {
        pt - Vec2::new(self.padding, self.padding)
    }

    /// The first point, in curve order, whose radius covers `pos`.
    pub fn hit_test_points(&self, pos: Point) -> Option<Handle> {
        let pos = self.from_screen(pos);
        self.curves.iter().enumerate().find_map(|(curve, path)| {
            path.all_points()
                .find(|(_, pt)| pt.is_hit(pos))
                .map(|(point, _)| Handle { curve, point })
        })
    }

    /// Update the hovered point for a pointer at `pos`.
    pub fn update_hover(&mut self, pos: Point) -> Option<Handle> {
        let hit = self.hit_test_points(pos);
        if let Some(old) = self.hover {
            if Some(old) != hit {
                self.set_state(old, VisualState::Base);
            }
        }
        if let Some(new) = hit {
            self.set_state(new, VisualState::Hover);
        }
        self.hover = hit;
        hit
    }

    pub fn set_active(&mut self, handle: Handle) {
        self.active = Some(handle);
        self.set_state(handle, VisualState::Active);
    }

    pub fn release(&mut self) {
        if let Some(handle) = self.active.take() {
            let state = if self.hover == Some(handle) {
                VisualState::Hover
            } else {
                VisualState::Base
            };
            self.set_state(handle, state);
        }
    }

    /// Drag a point to a screen position and resample.
    ///
    /// The move is applied even if resampling then fails, so that a drag
    /// passing through a degenerate shape can continue.
    pub fn move_point(&mut self, handle: Handle, pos: Point) -> Result<&Rows, bezier_profile::Error> {
        let pos = self.constrain(handle, self.from_screen(pos));
        if let Some(path) = self.curves.get_mut(handle.curve) {
            path.set_position(handle.point, pos);
        }
        self.refresh()
    }

    /// Clamp to the canvas and pin the end anchors to the canvas edges.
    fn constrain(&self, handle: Handle, pos: Point) -> Point {
        let mut pos = Point::new(
            pos.x.max(self.canvas.x0).min(self.canvas.x1),
            pos.y.max(self.canvas.y0).min(self.canvas.y1),
        );
        if let Some(path) = self.curves.get(handle.curve) {
            if path.is_end_anchor(handle.point) {
                pos.x = if handle.point.segment == 0 {
                    self.canvas.x0
                } else {
                    self.canvas.x1
                };
            }
        }
        pos
    }

    fn set_state(&mut self, handle: Handle, state: VisualState) {
        if let Some(pt) = self
            .curves
            .get_mut(handle.curve)
            .and_then(|path| path.point_mut(handle.point))
        {
            pt.set_state(state);
        }
    }

    /// Recompute the rows from the current curves.
    pub fn refresh(&mut self) -> Result<&Rows, bezier_profile::Error> {
        match resample(&self.curves, &self.resampler, self.sample_count) {
            Ok(rows) => {
                self.rows = rows;
                Ok(&self.rows)
            }
            Err(e) => {
                log::warn!("resampling failed: {}", e);
                self.rows = Rows::default();
                Err(e)
            }
        }
    }
}

fn resample(curves: &[Path], resampler: &Resampler, n: usize) -> Result<Rows, bezier_profile::Error> {
    match curves {
        [curve1, curve2] => resampler.compute_pair(curve1, curve2, n).map(Rows::Pair),
        [curve, ..] => resampler.compute(curve, n).map(Rows::Single),
        [] => Ok(Rows::default()),
    }
}
