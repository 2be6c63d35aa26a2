//! Vertical two-color gradient backgrounds.

use crate::color::Color;
use image::{Rgba, RgbaImage};

/// Shape of a vertical gradient background.
#[derive(Debug, Clone, PartialEq)]
pub struct GradientSpec {
    pub width: u32,
    pub height: u32,
    pub start: Color,
    pub end: Color,
    /// Fraction of the height over which the colors blend. Rows past
    /// `floor(height * stop)` are filled with `end`.
    pub stop: f64,
}

impl GradientSpec {
    /// Number of rows that are interpolated before the flat `end` fill.
    pub fn gradient_height(&self) -> u32 {
        (self.height as f64 * self.stop).floor().max(0.0) as u32
    }

    /// Color shared by every pixel of row `y`.
    pub fn row_color(&self, y: u32) -> Color {
        let gradient_height = self.gradient_height();
        if y >= gradient_height {
            return self.end;
        }

        let t = y as f64 / gradient_height as f64;
        let mut color = Rgba([0u8; 4]);
        for c in 0..4 {
            color[c] = lerp_channel(self.start[c], self.end[c], t);
        }
        color
    }
}

/// Paint `spec` into a new buffer, one flat color per row.
pub fn paint_gradient(spec: &GradientSpec) -> RgbaImage {
    let mut image = RgbaImage::new(spec.width, spec.height);

    for (y, row) in image.enumerate_rows_mut() {
        let color = spec.row_color(y);
        for (_, _, pixel) in row {
            *pixel = color;
        }
    }

    image
}

// Round half up.
fn lerp_channel(start: u8, end: u8, t: f64) -> u8 {
    let value = start as f64 + (end as f64 - start as f64) * t;
    (value + 0.5).floor().clamp(0.0, 255.0) as u8
}
