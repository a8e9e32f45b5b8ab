//! Editor settings, loaded from a TOML file.

use std::path::Path;

use bezier_profile::{Resampler, Spacing, DEFAULT_DENSE_STEPS, DEFAULT_RADIUS};
use kurbo::Rect;
use serde::{Deserialize, Serialize};

/// Width of the editable area, in curve units.
pub const CANVAS_WIDTH: f64 = 600.0;
/// Height of the editable area, in curve units.
pub const CANVAS_HEIGHT: f64 = 500.0;
/// Margin between the screen edge and the editable area.
pub const CANVAS_PADDING: f64 = 40.0;
/// Rows produced per resample.
pub const SAMPLE_COUNT: usize = 8;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorOptions {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
    pub point_radius: f64,
    pub sample_count: usize,
    pub dense_steps: usize,
    pub spacing: Spacing,
}

impl Default for EditorOptions {
    fn default() -> Self {
        EditorOptions {
            width: CANVAS_WIDTH,
            height: CANVAS_HEIGHT,
            padding: CANVAS_PADDING,
            point_radius: DEFAULT_RADIUS,
            sample_count: SAMPLE_COUNT,
            dense_steps: DEFAULT_DENSE_STEPS,
            spacing: Spacing::default(),
        }
    }
}

impl EditorOptions {
    /// Load options from a TOML file, falling back to the defaults if the
    /// file is missing or cannot be parsed.
    pub fn load_from_file(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(opts) => {
                    log::info!("loaded options from {}", path.display());
                    opts
                }
                Err(e) => {
                    log::warn!("bad options file {}, using defaults: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("no options file at {}, using defaults", path.display());
                Self::default()
            }
        }
    }

    pub fn save_to_file(&self, path: &Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::info!("saved options to {}", path.display());
        Ok(())
    }

    /// The editable area in curve coordinates.
    pub fn canvas(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }

    /// A resampler over the editable area.
    pub fn resampler(&self) -> Resampler {
        Resampler::new()
            .with_domain(self.canvas())
            .with_dense_steps(self.dense_steps)
            .with_spacing(self.spacing)
    }
}
