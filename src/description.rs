//! The plain, serializable description of one or two curves.

#[cfg(feature = "serde")]
use serde_::{Deserialize, Serialize};

/// One entry of a curve description.
///
/// The first entry of a curve only has `pt`; every later entry has both
/// control points of the arc that ends at `pt`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_")
)]
pub struct SegmentDescription {
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub cp1: Option<[f64; 2]>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub cp2: Option<[f64; 2]>,
    /// Missing only in malformed input; loading rejects it.
    #[cfg_attr(feature = "serde", serde(default))]
    pub pt: Option<[f64; 2]>,
}

/// The description of a single curve, in path order.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_", transparent)
)]
pub struct CurveDescription(pub Vec<SegmentDescription>);

/// An upper and a lower curve, sampled together to get a gap profile.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_")
)]
pub struct ProfileDescription {
    pub curve1: CurveDescription,
    pub curve2: CurveDescription,
}

impl SegmentDescription {
    /// The start of a curve.
    pub fn start(pt: [f64; 2]) -> SegmentDescription {
        SegmentDescription {
            cp1: None,
            cp2: None,
            pt: Some(pt),
        }
    }

    /// A cubic arc from the previous anchor to `pt`.
    pub fn curve(cp1: [f64; 2], cp2: [f64; 2], pt: [f64; 2]) -> SegmentDescription {
        SegmentDescription {
            cp1: Some(cp1),
            cp2: Some(cp2),
            pt: Some(pt),
        }
    }
}

impl CurveDescription {
    pub fn segments(&self) -> &[SegmentDescription] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<SegmentDescription>> for CurveDescription {
    fn from(segments: Vec<SegmentDescription>) -> Self {
        CurveDescription(segments)
    }
}

#[cfg(feature = "serde")]
impl CurveDescription {
    pub fn from_json(json: &str) -> crate::Result<CurveDescription> {
        serde_json::from_str(json).map_err(Into::into)
    }

    pub fn to_json(&self) -> crate::Result<String> {
        serde_json::to_string(self).map_err(Into::into)
    }
}

#[cfg(feature = "serde")]
impl ProfileDescription {
    pub fn from_json(json: &str) -> crate::Result<ProfileDescription> {
        serde_json::from_str(json).map_err(Into::into)
    }

    pub fn to_json(&self) -> crate::Result<String> {
        serde_json::to_string(self).map_err(Into::into)
    }

    pub fn to_json_pretty(&self) -> crate::Result<String> {
        serde_json::to_string_pretty(self).map_err(Into::into)
    }
}
