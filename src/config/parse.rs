use crate::{
    config::model::AnimationConfig,
    foundation::core::{DensityScale, Grid, Size},
    foundation::error::{FlipbookError, FlipbookResult},
};

/// Parse a `"AxB"` numeric pair, e.g. `"4x2"` or `"100x100"`.
///
/// Components are trimmed before parsing; anything other than exactly two
/// numeric components is a parse error.
pub fn parse_pair(raw: &str, what: &str) -> FlipbookResult<(f64, f64)> {
    let mut parts = raw.split('x');
    let (Some(a), Some(b), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(FlipbookError::parse(format!(
            "{what} '{raw}' must have exactly two components separated by 'x'"
        )));
    };

    let parse_component = |s: &str| -> FlipbookResult<f64> {
        let s = s.trim();
        s.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| FlipbookError::parse(format!("{what}: '{s}' is not a number")))
    };

    Ok((parse_component(a)?, parse_component(b)?))
}

/// Interpret a host flag attribute.
///
/// Missing values take `default`; `"true"` in any case or a number >= 1 means
/// true; anything else (including garbage) means false.
pub fn parse_flag(raw: Option<&str>, default: bool) -> bool {
    let Some(raw) = raw else {
        return default;
    };
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("true") {
        return true;
    }
    matches!(raw.parse::<f64>(), Ok(v) if v >= 1.0)
}

fn whole_pair(raw: &str, what: &str) -> FlipbookResult<(u32, u32)> {
    let (a, b) = parse_pair(raw, what)?;
    let whole = |v: f64| v.fract() == 0.0 && (0.0..=u32::MAX as f64).contains(&v);
    if !whole(a) || !whole(b) {
        return Err(FlipbookError::parse(format!(
            "{what} components must be whole non-negative numbers"
        )));
    }
    Ok((a as u32, b as u32))
}

impl AnimationConfig {
    /// Build a config from host-markup attributes.
    ///
    /// `lookup` abstracts the host's attribute store (e.g. `data-*`
    /// attributes). Recognized names: `base-url`, `grid`, `block-size`,
    /// `frame-count`, `fps`, `autoplay`, `autoload`, `high-density`.
    ///
    /// Missing required attributes and malformed pairs are fatal. An absent
    /// or non-positive `fps` falls back to the default of 12.
    pub fn from_attrs<F>(lookup: F) -> FlipbookResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup("base-url")
            .filter(|s| !s.is_empty())
            .ok_or_else(|| FlipbookError::config("no base-url defined"))?;

        let grid_raw = lookup("grid").ok_or_else(|| FlipbookError::config("no grid defined"))?;
        let (cols, rows) = whole_pair(&grid_raw, "grid")?;
        let grid = Grid::new(cols, rows)?;

        let block_raw =
            lookup("block-size").ok_or_else(|| FlipbookError::config("no block size defined"))?;
        let (block_w, block_h) = parse_pair(&block_raw, "block size")?;

        let frames_raw =
            lookup("frame-count").ok_or_else(|| FlipbookError::config("no frame count defined"))?;
        let frame_count = frames_raw.trim().parse::<u32>().map_err(|_| {
            FlipbookError::parse(format!(
                "frame count '{frames_raw}' is not a positive integer"
            ))
        })?;

        let frames_per_second = lookup("fps")
            .and_then(|s| s.trim().parse::<f64>().ok())
            .filter(|v| v.is_finite() && *v > 0.0)
            .unwrap_or(12.0);

        let density = if parse_flag(lookup("high-density").as_deref(), false) {
            DensityScale::High
        } else {
            DensityScale::Normal
        };

        let config = Self {
            base_url,
            grid,
            block: Size::new(block_w, block_h),
            frame_count,
            frames_per_second,
            density,
            autoplay: parse_flag(lookup("autoplay").as_deref(), true),
            autoload: parse_flag(lookup("autoload").as_deref(), true),
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/parse.rs"]
mod tests;
