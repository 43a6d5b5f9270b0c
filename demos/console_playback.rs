use flipbook::{
    AnimationConfig, SheetFetcher, SheetGeometry, SheetIndex, SheetLoadSender, SheetPaint, Signal,
    SignalResponse, SlotPosition, SpriteAnimation, Surface, TickTimer,
};
use std::time::Duration;

struct ConsoleSurface(usize);

impl Surface for ConsoleSurface {
    fn place(&mut self, position: SlotPosition) {
        println!("surface {} -> {position:?}", self.0);
    }

    fn paint(&mut self, paint: &SheetPaint) {
        println!(
            "surface {} paints {} crop {:?}",
            self.0, paint.image_url, paint.crop_offset
        );
    }

    fn stage_image(&mut self, image_url: &str) {
        println!("surface {} stages {image_url}", self.0);
    }
}

/// Fetcher standing in for an image cache that always hits.
struct LocalFetcher;

impl SheetFetcher for LocalFetcher {
    fn fetch(&mut self, _sheet: SheetIndex, _url: &str, done: SheetLoadSender) {
        done.resolve();
    }
}

struct NullTimer;

impl TickTimer for NullTimer {
    fn start(&mut self, interval: Duration) {
        println!("timer armed at {interval:?}");
    }

    fn stop(&mut self) {}
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let config = AnimationConfig::from_attrs(|name| {
        match name {
            "base-url" => Some("sheets/walk-"),
            "grid" => Some("4x4"),
            "block-size" => Some("120x90"),
            "frame-count" => Some("53"),
            "fps" => Some("24"),
            _ => None,
        }
        .map(str::to_string)
    })?;

    let geometry = SheetGeometry::of(&config);
    let surfaces: Vec<ConsoleSurface> = (0..geometry.surface_count()).map(ConsoleSurface).collect();

    let sink = |signal: &Signal| {
        println!("signal: {signal}");
        SignalResponse::Continue
    };
    let mut engine = SpriteAnimation::new(
        config,
        surfaces,
        Box::new(LocalFetcher),
        Box::new(NullTimer),
        Box::new(sink),
    )?;

    // One full cycle, ticked by hand instead of a platform timer.
    for _ in 0..geometry.frames_per_sheet() * geometry.sheet_count() {
        engine.tick();
    }
    Ok(())
}
