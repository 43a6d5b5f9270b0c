use crate::foundation::error::{FlipbookError, FlipbookResult};

pub use kurbo::{Point, Rect, Size, Vec2};

/// Global frame index across all sheets of an animation.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u32);

/// Index of one sprite-sheet image within an animation.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct SheetIndex(pub u32);

/// Sheet grid layout: how many frame columns and rows one sheet holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Grid {
    /// Frame columns per sheet.
    pub cols: u32,
    /// Frame rows per sheet.
    pub rows: u32,
}

impl Grid {
    /// Build a grid, rejecting empty dimensions.
    pub fn new(cols: u32, rows: u32) -> FlipbookResult<Self> {
        if cols == 0 || rows == 0 {
            return Err(FlipbookError::config("grid dimensions must be >= 1"));
        }
        Ok(Self { cols, rows })
    }

    /// Number of frames one full sheet holds.
    pub fn frames_per_sheet(self) -> u32 {
        self.cols * self.rows
    }
}

/// Pixel-density multiplier applied to all on-surface dimensions.
///
/// High-density sheets are authored at twice the display resolution, so every
/// rendered dimension is halved.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum DensityScale {
    /// 1:1 sheet pixels to surface pixels.
    #[default]
    Normal,
    /// 2:1 sheet pixels to surface pixels (0.5 multiplier).
    High,
}

impl DensityScale {
    /// Multiplier applied to sheet pixel dimensions.
    pub fn factor(self) -> f64 {
        match self {
            Self::Normal => 1.0,
            Self::High => 0.5,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
