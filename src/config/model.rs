use crate::foundation::{
    core::{DensityScale, Grid, SheetIndex, Size},
    error::{FlipbookError, FlipbookResult},
};

fn default_fps() -> f64 {
    12.0
}

fn default_true() -> bool {
    true
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Immutable description of one flip-book animation.
///
/// Sheet `i` of the animation is fetched from `{base_url}{i}.png`. All fields
/// are fixed after [`AnimationConfig::validate`] succeeds; live playback-rate
/// changes go through the scheduler, not the config.
pub struct AnimationConfig {
    /// URL prefix for sheet images.
    pub base_url: String,
    /// Frames per sheet, as columns x rows.
    pub grid: Grid,
    /// Pixel size of one rendered frame.
    pub block: Size,
    /// Total number of frames across all sheets.
    pub frame_count: u32,
    /// Playback rate in frames per second.
    #[serde(default = "default_fps")]
    pub frames_per_second: f64,
    /// Pixel-density multiplier for high-resolution sheets.
    #[serde(default)]
    pub density: DensityScale,
    /// Start playback automatically once sheet 0 has loaded.
    #[serde(default = "default_true")]
    pub autoplay: bool,
    /// Load and display frame 0 eagerly at construction.
    #[serde(default = "default_true")]
    pub autoload: bool,
}

impl AnimationConfig {
    /// Check the config invariants.
    ///
    /// Fatal at construction: an engine instance is never built from an
    /// invalid config, so callers see no partial state.
    pub fn validate(&self) -> FlipbookResult<()> {
        if self.base_url.is_empty() {
            return Err(FlipbookError::config("no base url defined"));
        }
        if self.grid.cols == 0 || self.grid.rows == 0 {
            return Err(FlipbookError::config("grid dimensions must be >= 1"));
        }
        if !(self.block.width > 0.0 && self.block.height > 0.0)
            || !self.block.width.is_finite()
            || !self.block.height.is_finite()
        {
            return Err(FlipbookError::config("block size must be positive"));
        }
        if self.frame_count == 0 {
            return Err(FlipbookError::config("frame count must be >= 1"));
        }
        if !self.frames_per_second.is_finite() || self.frames_per_second <= 0.0 {
            return Err(FlipbookError::config("frames per second must be > 0"));
        }
        Ok(())
    }

    /// Resource URL for one sheet image.
    pub fn sheet_url(&self, sheet: SheetIndex) -> String {
        format!("{}{}.png", self.base_url, sheet.0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/model.rs"]
mod tests;
