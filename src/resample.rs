//! Turning paths into a fixed number of x-ordered sample rows.
//!
//! Lookups are a step function: the value at a target x is taken from the
//! first dense sample (in path order) whose x is at or past the target. No
//! interpolation between dense samples is done; with the default of 1000
//! steps per segment the error is well below what the rows are used for.

use kurbo::{Point, Rect};
#[cfg(feature = "serde")]
use serde_::{Deserialize, Serialize};

use crate::path::{Path, DEFAULT_DENSE_STEPS};
use crate::{Error, Result};

/// The sampling domain used when none is given: the editor's canvas.
pub const DEFAULT_DOMAIN: Rect = Rect::new(0.0, 0.0, 600.0, 500.0);

/// How rows are spaced along x in two-curve mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_", rename_all = "snake_case")
)]
pub enum Spacing {
    /// Rows at equal x intervals.
    Even,
    /// Each step along x is proportional to the gap at the previous row, so
    /// rows crowd together where the curves are close and spread out where
    /// they diverge.
    GapWeighted,
}

impl Default for Spacing {
    fn default() -> Self {
        Spacing::GapWeighted
    }
}

/// A sample of a single curve, normalized to the sampling domain.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_")
)]
pub struct SampleRow {
    pub x: f64,
    pub y: f64,
}

/// A sample of two curves at the same x.
///
/// `x`, `y` and `y2` are normalized to the sampling domain; `gap` is
/// `y2 - y` in the curves' own units.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_")
)]
pub struct GapRow {
    pub x: f64,
    pub y: f64,
    pub y2: f64,
    pub gap: f64,
}

impl GapRow {
    /// The local scale of the profile; the same value as `gap`.
    pub fn scale(&self) -> f64 {
        self.gap
    }
}

/// Produces sample rows from one or two paths.
#[derive(Debug, Clone, PartialEq)]
pub struct Resampler {
    domain: Rect,
    dense_steps: usize,
    spacing: Spacing,
}

/// The dense samples of one path, ready for x lookups.
struct Lookup {
    samples: Vec<Point>,
}

impl Default for Resampler {
    fn default() -> Self {
        Resampler {
            domain: DEFAULT_DOMAIN,
            dense_steps: DEFAULT_DENSE_STEPS,
            spacing: Spacing::default(),
        }
    }
}

impl Resampler {
    pub fn new() -> Resampler {
        Resampler::default()
    }

    /// Set the rectangle that rows are normalized against.
    ///
    /// The left and right edges are the first and last sample positions.
    pub fn with_domain(mut self, domain: Rect) -> Resampler {
        self.domain = domain;
        self
    }

    /// Set the number of dense steps taken per segment.
    pub fn with_dense_steps(mut self, steps: usize) -> Resampler {
        self.dense_steps = steps.max(1);
        self
    }

    pub fn with_spacing(mut self, spacing: Spacing) -> Resampler {
        self.spacing = spacing;
        self
    }

    pub fn domain(&self) -> Rect {
        self.domain
    }

    pub fn dense_steps(&self) -> usize {
        self.dense_steps
    }

    pub fn spacing(&self) -> Spacing {
        self.spacing
    }

    /// Sample a single curve at `n` equally spaced x positions.
    pub fn compute(&self, path: &Path, n: usize) -> Result<Vec<SampleRow>> {
        self.validate(n)?;
        let lookup = Lookup::new(path, self.dense_steps)?;
        let rows = self
            .even_targets(n)
            .map(|x| SampleRow {
                x: self.norm_x(x),
                y: self.norm_y(lookup.y_at(x)),
            })
            .collect::<Vec<_>>();
        log::debug!("resampled single curve into {} rows", rows.len());
        Ok(rows)
    }

    /// Sample two curves in lock-step, recording the gap between them.
    ///
    /// With [`Spacing::GapWeighted`], rows start out evenly spaced and are
    /// then walked from the left edge, each step proportional to the gap
    /// at the previous row, scaled so that the mean step equals the even
    /// spacing. The first row stays on the left edge and the last row is
    /// always on the right edge.
    pub fn compute_pair(&self, curve1: &Path, curve2: &Path, n: usize) -> Result<Vec<GapRow>> {
        self.validate(n)?;
        let upper = Lookup::new(curve1, self.dense_steps)?;
        let lower = Lookup::new(curve2, self.dense_steps)?;
        let row_at = |x: f64| {
            let y = upper.y_at(x);
            let y2 = lower.y_at(x);
            GapRow {
                x: self.norm_x(x),
                y: self.norm_y(y),
                y2: self.norm_y(y2),
                gap: y2 - y,
            }
        };

        let mut rows = self.even_targets(n).map(|x| row_at(x)).collect::<Vec<_>>();
        if self.spacing == Spacing::GapWeighted {
            // The last row is pinned to the right edge and drives no step.
            let avg_gap = rows[..n - 1].iter().map(|r| r.gap).sum::<f64>() / (n - 1) as f64;
            if avg_gap == 0.0 || !avg_gap.is_finite() {
                return Err(Error::DegenerateCurve("average gap between the curves is zero"));
            }
            let ratio = self.even_spacing(n) / avg_gap;
            let (left, right) = (self.domain.x0, self.domain.x1);
            let mut x = left;
            for i in 1..n - 1 {
                let step = (rows[i - 1].gap * ratio).max(0.0);
                x = (x + step).min(right);
                rows[i] = row_at(x);
            }
        }
        log::debug!(
            "resampled curve pair into {} rows ({:?} spacing)",
            rows.len(),
            self.spacing
        );
        Ok(rows)
    }

    fn validate(&self, n: usize) -> Result<()> {
        if n < 2 {
            return Err(Error::InvalidSampleCount(n));
        }
        let (width, height) = (self.domain.width(), self.domain.height());
        if !(width > 0.0 && height > 0.0 && width.is_finite() && height.is_finite()) {
            return Err(Error::InvalidDomain { width, height });
        }
        Ok(())
    }

    fn even_spacing(&self, n: usize) -> f64 {
        self.domain.width() / (n - 1) as f64
    }

    /// `n - 1` equally spaced positions from the left edge, then the right edge.
    fn even_targets(&self, n: usize) -> impl Iterator<Item = f64> {
        let left = self.domain.x0;
        let right = self.domain.x1;
        let spacing = self.even_spacing(n);
        (0..n - 1)
            .map(move |i| left + spacing * i as f64)
            .chain(std::iter::once(right))
    }

    fn norm_x(&self, x: f64) -> f64 {
        (x - self.domain.x0) / self.domain.width()
    }

    fn norm_y(&self, y: f64) -> f64 {
        (y - self.domain.y0) / self.domain.height()
    }
}

impl Lookup {
    fn new(path: &Path, steps: usize) -> Result<Lookup> {
        let samples = path.sample_dense(steps).collect::<Vec<_>>();
        if samples.iter().any(|p| !p.is_finite()) {
            return Err(Error::DegenerateCurve("curve has non-finite points"));
        }
        let (lo, hi) = samples
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
                (lo.min(p.x), hi.max(p.x))
            });
        if !(hi > lo) {
            return Err(Error::DegenerateCurve("curve has no horizontal extent"));
        }
        Ok(Lookup { samples })
    }

    fn y_at(&self, x: f64) -> f64 {
        match self.samples.iter().find(|p| p.x >= x) {
            Some(p) => p.y,
            None => {
                // Only reachable when the curve ends short of the domain.
                let last = self.samples[self.samples.len() - 1];
                log::warn!("no sample at or past x = {}, using curve end {:?}", x, last);
                last.y
            }
        }
    }
}
