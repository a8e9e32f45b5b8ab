//! Errors reported by loading and resampling.

use thiserror::Error;

/// The error type for this crate.
#[derive(Error, Debug)]
pub enum Error {
    /// A curve description could not be turned into a path.
    #[error("malformed curve description at segment {index}: {reason}")]
    MalformedCurveDescription { index: usize, reason: &'static str },
    /// The curve has no usable horizontal extent, or the average gap
    /// between two curves is zero.
    #[error("degenerate curve: {0}")]
    DegenerateCurve(&'static str),
    /// Resampling needs at least two rows.
    #[error("invalid sample count {0}, at least 2 samples are required")]
    InvalidSampleCount(usize),
    /// The sampling domain has a non-positive width or height.
    #[error("invalid sampling domain {width}x{height}")]
    InvalidDomain { width: f64, height: f64 },
    #[cfg(feature = "serde")]
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn malformed(index: usize, reason: &'static str) -> Error {
        Error::MalformedCurveDescription { index, reason }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
