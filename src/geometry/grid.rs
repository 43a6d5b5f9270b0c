use crate::{
    config::model::AnimationConfig,
    foundation::core::{FrameIndex, Grid, Point, Rect, SheetIndex, Size},
};

/// Pure frame-to-sheet geometry for one animation.
///
/// All methods are total for frames in `[0, frame_count)`; the scheduler and
/// surface controller never hand out anything else.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SheetGeometry {
    grid: Grid,
    block: Size,
    frame_count: u32,
    scale: f64,
}

impl SheetGeometry {
    /// Derive the geometry of a validated config.
    pub fn of(config: &AnimationConfig) -> Self {
        Self {
            grid: config.grid,
            block: config.block,
            frame_count: config.frame_count,
            scale: config.density.factor(),
        }
    }

    /// Number of frames one full sheet holds.
    pub fn frames_per_sheet(&self) -> u32 {
        self.grid.frames_per_sheet()
    }

    /// Total number of sheets, the last possibly partially filled.
    pub fn sheet_count(&self) -> u32 {
        self.frame_count.div_ceil(self.frames_per_sheet())
    }

    /// Sheet holding the given frame.
    pub fn sheet_index_of(&self, frame: FrameIndex) -> SheetIndex {
        SheetIndex(frame.0 / self.frames_per_sheet())
    }

    /// Sheet that takes over after the given frame's sheet, wrapping to 0.
    ///
    /// With a single sheet this is a self-reference.
    pub fn next_sheet_index_of(&self, frame: FrameIndex) -> SheetIndex {
        SheetIndex((self.sheet_index_of(frame).0 + 1) % self.sheet_count())
    }

    /// Successor frame in the playback cycle.
    ///
    /// `None` (playback not started) yields frame 0; the frame after the last
    /// one is frame 0 again. The animation is cyclic and never terminates on
    /// its own.
    pub fn next_frame(&self, current: Option<FrameIndex>) -> FrameIndex {
        match current {
            None => FrameIndex(0),
            Some(f) => FrameIndex((f.0 + 1) % self.frame_count),
        }
    }

    /// Whether the frame is the last valid index.
    pub fn is_last_frame(&self, frame: FrameIndex) -> bool {
        frame.0 + 1 == self.frame_count
    }

    /// Crop origin of the frame within its sheet, in surface pixels.
    ///
    /// Floored to whole pixels so high-density sheets never sample on
    /// sub-pixel boundaries (visible as seams between frames).
    pub fn crop_origin(&self, frame: FrameIndex) -> Point {
        let local = frame.0 % self.frames_per_sheet();
        let col = local % self.grid.cols;
        let row = local / self.grid.cols;
        Point::new(
            (f64::from(col) * self.block.width * self.scale).floor(),
            (f64::from(row) * self.block.height * self.scale).floor(),
        )
    }

    /// Crop rectangle of the frame within its sheet, in surface pixels.
    pub fn crop_rect(&self, frame: FrameIndex) -> Rect {
        let origin = self.crop_origin(frame);
        Rect::from_origin_size(origin, self.frame_size())
    }

    /// On-surface size of one rendered frame.
    pub fn frame_size(&self) -> Size {
        self.block * self.scale
    }

    /// Number of frames actually present on the given sheet.
    pub fn frames_on_sheet(&self, sheet: SheetIndex) -> u32 {
        let per_sheet = self.frames_per_sheet();
        let start = sheet.0.saturating_mul(per_sheet);
        self.frame_count.saturating_sub(start).min(per_sheet)
    }

    /// Pixel dimensions of the given sheet, scaled to surface pixels.
    ///
    /// The last sheet may be partially filled: its height covers only the
    /// occupied rows, and a sheet holding at most one row's worth of frames
    /// reports its natural single-row width.
    pub fn sheet_size(&self, sheet: SheetIndex) -> Size {
        let items = self.frames_on_sheet(sheet);
        let rows_used = items.div_ceil(self.grid.cols);
        let cols_used = items.min(self.grid.cols);
        Size::new(
            f64::from(cols_used) * self.block.width * self.scale,
            f64::from(rows_used) * self.block.height * self.scale,
        )
    }

    /// How many paintable surfaces the double buffer needs: 1 for a
    /// single-sheet animation, otherwise exactly 2 regardless of sheet count.
    pub fn surface_count(&self) -> usize {
        if self.sheet_count() > 1 { 2 } else { 1 }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/grid.rs"]
mod tests;
