use super::*;
use crate::foundation::core::{DensityScale, Grid};
use std::{cell::RefCell, rc::Rc};

#[derive(Debug, Default)]
struct SurfaceState {
    position: Option<SlotPosition>,
    painted: Option<SheetPaint>,
    staged: Option<String>,
}

#[derive(Clone, Debug, Default)]
struct FakeSurface(Rc<RefCell<SurfaceState>>);

impl Surface for FakeSurface {
    fn place(&mut self, position: SlotPosition) {
        self.0.borrow_mut().position = Some(position);
    }

    fn paint(&mut self, paint: &SheetPaint) {
        self.0.borrow_mut().painted = Some(paint.clone());
    }

    fn stage_image(&mut self, image_url: &str) {
        self.0.borrow_mut().staged = Some(image_url.to_string());
    }
}

fn config(frames: u32) -> AnimationConfig {
    AnimationConfig {
        base_url: "sheets/".to_string(),
        grid: Grid { cols: 2, rows: 2 },
        block: Size::new(100.0, 100.0),
        frame_count: frames,
        frames_per_second: 10.0,
        density: DensityScale::Normal,
        autoplay: false,
        autoload: false,
    }
}

fn rig(frames: u32) -> (SurfaceController<FakeSurface>, Vec<FakeSurface>) {
    let cfg = config(frames);
    let geometry = SheetGeometry::of(&cfg);
    let handles: Vec<FakeSurface> = (0..geometry.surface_count())
        .map(|_| FakeSurface::default())
        .collect();
    let ctrl = SurfaceController::new(&cfg, handles.clone()).unwrap();
    (ctrl, handles)
}

#[test]
fn surface_count_is_enforced() {
    let cfg = config(5);
    assert!(SurfaceController::new(&cfg, vec![FakeSurface::default()]).is_err());
    assert!(
        SurfaceController::new(
            &cfg,
            vec![FakeSurface::default(), FakeSurface::default(), FakeSurface::default()]
        )
        .is_err()
    );
}

#[test]
fn show_frame_places_and_paints_the_front() {
    let (mut ctrl, handles) = rig(5);
    ctrl.show_frame(FrameIndex(1), |_| true);

    let front = handles[0].0.borrow();
    assert_eq!(front.position, Some(SlotPosition::Front));
    let paint = front.painted.as_ref().unwrap();
    assert_eq!(paint.image_url, "sheets/0.png");
    assert_eq!(paint.crop_offset, Point::new(100.0, 0.0));
    assert_eq!(paint.sheet_size, Size::new(200.0, 200.0));
    assert_eq!(paint.frame_size, Size::new(100.0, 100.0));

    assert_eq!(handles[1].0.borrow().position, Some(SlotPosition::Staged));
}

#[test]
fn double_buffer_invariant_holds_across_the_boundary() {
    let (mut ctrl, handles) = rig(5);

    for f in 0..5u32 {
        let frame = FrameIndex(f);
        ctrl.show_frame(frame, |_| true);
        ctrl.prepare_next_sheet(frame);

        let sheet = (f / 4) as usize;
        let front = sheet % 2;
        let back = 1 - front;
        let painted = handles[front].0.borrow().painted.clone().unwrap();
        assert_eq!(painted.image_url, format!("sheets/{sheet}.png"));
        assert_eq!(handles[front].0.borrow().position, Some(SlotPosition::Front));
        assert_eq!(handles[back].0.borrow().position, Some(SlotPosition::Staged));

        let next_sheet = (sheet + 1) % 2;
        let staged = handles[back].0.borrow().staged.clone().unwrap();
        assert_eq!(staged, format!("sheets/{next_sheet}.png"));
    }
}

#[test]
fn unloaded_sheet_retains_previous_paint() {
    let (mut ctrl, handles) = rig(5);
    ctrl.show_frame(FrameIndex(0), |_| false);

    let front = handles[0].0.borrow();
    // Repositioned, but never painted.
    assert_eq!(front.position, Some(SlotPosition::Front));
    assert!(front.painted.is_none());
}

#[test]
fn partial_last_sheet_paints_with_its_natural_size() {
    let (mut ctrl, handles) = rig(5);
    ctrl.show_frame(FrameIndex(4), |_| true);

    let front = handles[1].0.borrow();
    let paint = front.painted.as_ref().unwrap();
    assert_eq!(paint.image_url, "sheets/1.png");
    assert_eq!(paint.sheet_size, Size::new(100.0, 100.0));
    assert_eq!(paint.crop_offset, Point::new(0.0, 0.0));
}

#[test]
fn single_sheet_never_stages() {
    let (mut ctrl, handles) = rig(4);
    assert_eq!(handles.len(), 1);
    ctrl.show_frame(FrameIndex(3), |_| true);
    ctrl.prepare_next_sheet(FrameIndex(3));
    assert!(handles[0].0.borrow().staged.is_none());
}

#[test]
fn sheets_for_lists_current_then_next() {
    let (ctrl, _) = rig(5);
    assert_eq!(ctrl.sheets_for(FrameIndex(0)), vec![SheetIndex(0), SheetIndex(1)]);
    assert_eq!(ctrl.sheets_for(FrameIndex(4)), vec![SheetIndex(1), SheetIndex(0)]);

    let (ctrl, _) = rig(4);
    assert_eq!(ctrl.sheets_for(FrameIndex(2)), vec![SheetIndex(0)]);
}
