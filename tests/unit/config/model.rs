use super::*;

fn base_config() -> AnimationConfig {
    AnimationConfig {
        base_url: "https://cdn.example/anim/".to_string(),
        grid: Grid { cols: 2, rows: 2 },
        block: Size::new(100.0, 100.0),
        frame_count: 5,
        frames_per_second: 10.0,
        density: DensityScale::Normal,
        autoplay: true,
        autoload: true,
    }
}

#[test]
fn valid_config_passes() {
    assert!(base_config().validate().is_ok());
}

#[test]
fn invariants_are_fatal() {
    let mut c = base_config();
    c.base_url.clear();
    assert!(c.validate().is_err());

    let mut c = base_config();
    c.frame_count = 0;
    assert!(c.validate().is_err());

    let mut c = base_config();
    c.grid.cols = 0;
    assert!(c.validate().is_err());

    let mut c = base_config();
    c.block = Size::new(0.0, 100.0);
    assert!(c.validate().is_err());

    let mut c = base_config();
    c.frames_per_second = 0.0;
    assert!(c.validate().is_err());
}

#[test]
fn sheet_url_appends_index_and_extension() {
    let c = base_config();
    assert_eq!(c.sheet_url(SheetIndex(0)), "https://cdn.example/anim/0.png");
    assert_eq!(c.sheet_url(SheetIndex(12)), "https://cdn.example/anim/12.png");
}

#[test]
fn json_defaults_apply() {
    let c: AnimationConfig = serde_json::from_str(
        r#"{
            "base_url": "sheets/",
            "grid": { "cols": 4, "rows": 2 },
            "block": { "width": 64.0, "height": 48.0 },
            "frame_count": 30
        }"#,
    )
    .unwrap();
    assert!(c.validate().is_ok());
    assert_eq!(c.frames_per_second, 12.0);
    assert_eq!(c.density, DensityScale::Normal);
    assert!(c.autoplay);
    assert!(c.autoload);
}
