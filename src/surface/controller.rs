use crate::{
    config::model::AnimationConfig,
    foundation::core::{FrameIndex, Point, SheetIndex, Size},
    foundation::error::{FlipbookError, FlipbookResult},
    geometry::grid::SheetGeometry,
};

/// Where a surface sits relative to the visible viewport.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlotPosition {
    /// At the visible origin (0% offset).
    Front,
    /// Just outside the visible area (100% offset), ready to swap in.
    Staged,
}

/// Everything needed to repaint one surface with a frame crop.
#[derive(Clone, Debug, PartialEq)]
pub struct SheetPaint {
    /// Sheet image URL to paint with.
    pub image_url: String,
    /// Crop origin within the sheet, in surface pixels.
    pub crop_offset: Point,
    /// Scaled pixel dimensions of the whole sheet (background sizing).
    pub sheet_size: Size,
    /// On-surface size of the rendered frame.
    pub frame_size: Size,
}

/// A paintable 2D rendering surface supplied by the host.
///
/// In a browser host this is a positioned element painted via CSS background
/// properties; any target that can place, paint, and pre-decode an image crop
/// works.
pub trait Surface {
    /// Move the surface to the given slot.
    fn place(&mut self, position: SlotPosition);

    /// Repaint the surface with an image crop.
    fn paint(&mut self, paint: &SheetPaint);

    /// Set the surface's image without repositioning or repainting, so the
    /// resource is decoded and cached before it becomes visible.
    fn stage_image(&mut self, image_url: &str);
}

/// Double-buffered sheet presenter.
///
/// Owns one surface for single-sheet animations, otherwise exactly two that
/// are reused cyclically as sheets advance, bounding memory and paint cost
/// independent of animation length. The surface showing
/// `sheet_index_of(current_frame)` is front; the other always holds (or is
/// loading) the sheet that becomes front next.
#[derive(Debug)]
pub struct SurfaceController<S: Surface> {
    config: AnimationConfig,
    geometry: SheetGeometry,
    surfaces: Vec<S>,
}

impl<S: Surface> SurfaceController<S> {
    /// Build a controller over exactly [`SheetGeometry::surface_count`]
    /// surfaces.
    pub fn new(config: &AnimationConfig, surfaces: Vec<S>) -> FlipbookResult<Self> {
        let geometry = SheetGeometry::of(config);
        if surfaces.len() != geometry.surface_count() {
            return Err(FlipbookError::config(format!(
                "expected {} surface(s), got {}",
                geometry.surface_count(),
                surfaces.len()
            )));
        }
        Ok(Self {
            config: config.clone(),
            geometry,
            surfaces,
        })
    }

    fn front_slot(&self, frame: FrameIndex) -> usize {
        self.geometry.sheet_index_of(frame).0 as usize % self.surfaces.len()
    }

    /// Bring the frame's sheet to the front and repaint it with the frame's
    /// crop.
    ///
    /// The front surface goes to the visible origin and the other allocated
    /// surface (if any) just outside it, in that deterministic order, so a
    /// later sheet swap is a pure placement change rather than a re-layout.
    /// When `loaded` reports the sheet as not yet available the repaint is
    /// skipped and the previous visual state is retained until a load
    /// notification triggers a fresh call.
    pub fn show_frame(&mut self, frame: FrameIndex, loaded: impl Fn(SheetIndex) -> bool) {
        let sheet = self.geometry.sheet_index_of(frame);
        let front = self.front_slot(frame);

        self.surfaces[front].place(SlotPosition::Front);
        if self.surfaces.len() == 2 {
            self.surfaces[1 - front].place(SlotPosition::Staged);
        }

        if loaded(sheet) {
            let paint = SheetPaint {
                image_url: self.config.sheet_url(sheet),
                crop_offset: self.geometry.crop_origin(frame),
                sheet_size: self.geometry.sheet_size(sheet),
                frame_size: self.geometry.frame_size(),
            };
            self.surfaces[front].paint(&paint);
        }
    }

    /// Pre-set the non-front surface's image to the sheet that takes over
    /// next, without moving it into view.
    ///
    /// No-op for single-sheet animations (the next sheet is the current one).
    pub fn prepare_next_sheet(&mut self, frame: FrameIndex) {
        if self.surfaces.len() < 2 {
            return;
        }
        let next = self.geometry.next_sheet_index_of(frame);
        let back = 1 - self.front_slot(frame);
        let url = self.config.sheet_url(next);
        self.surfaces[back].stage_image(&url);
    }

    /// Sheets a committed frame depends on: its own and the one staged next.
    pub fn sheets_for(&self, frame: FrameIndex) -> Vec<SheetIndex> {
        let sheet = self.geometry.sheet_index_of(frame);
        let next = self.geometry.next_sheet_index_of(frame);
        if next == sheet {
            vec![sheet]
        } else {
            vec![sheet, next]
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/surface/controller.rs"]
mod tests;
