//! A headless editor for gap profiles.
//!
//! This holds everything the interactive tool does besides drawing: the
//! screen frame, hover and drag handling, and resampling after every edit.
//! A front end feeds pointer positions to [`Select`] and draws
//! [`EditSession::curves`] and [`EditSession::rows`].

mod edit_session;
mod options;
mod save;
mod select;

pub use edit_session::{EditSession, Handle};
pub use options::EditorOptions;
pub use save::{Document, Rows};
pub use select::Select;

use bezier_profile::{CurveDescription, SegmentDescription};

/// The curve the tool starts with when nothing is loaded.
pub fn default_curve() -> CurveDescription {
    vec![
        SegmentDescription::start([0., 0.]),
        SegmentDescription::curve([100., 0.], [100., 250.], [300., 250.]),
        SegmentDescription::curve([500., 250.], [500., 500.], [600., 500.]),
    ]
    .into()
}
