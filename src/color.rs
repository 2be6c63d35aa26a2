use crate::error::{IconError, Result};
use image::Rgba;
use std::str::FromStr;

pub type Color = Rgba<u8>;

pub const WHITE: Color = Rgba([255, 255, 255, 255]);

/// `#FF9A00`
pub const ORANGE: Color = Rgba([255, 154, 0, 255]);

/// Parse a CSS color string (`#fff`, `#FF9A00`, `rgb(...)`, ...)
pub fn parse_color(value: &str) -> Result<Color> {
    let color = css_color::Srgb::from_str(value.trim())
        .map_err(|_| IconError::Config(format!("unrecognized color: {value:?}")))?;

    Ok(Rgba([
        unit_to_channel(color.red),
        unit_to_channel(color.green),
        unit_to_channel(color.blue),
        unit_to_channel(color.alpha),
    ]))
}

// Rounded rather than truncated: 154/255 does not survive `as u8` on its own.
fn unit_to_channel(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}
