use crate::error::{IconError, Result};
use image::{
    codecs::png::{CompressionType, FilterType as PngFilterType, PngEncoder},
    imageops::{self, FilterType},
    ColorType, ImageEncoder, Rgba, RgbaImage,
};
use log::info;
use std::{
    fs::{create_dir_all, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

/// One file to write, optionally downscaled to a square `size`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputTarget {
    pub path: PathBuf,
    pub size: Option<u32>,
}

impl OutputTarget {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            size: None,
        }
    }

    pub fn with_size(mut self, size: u32) -> Self {
        self.size = Some(size);
        self
    }
}

/// Load the foreground asset as RGBA.
pub fn load_foreground(path: &Path) -> Result<RgbaImage> {
    let image = image::open(path).map_err(|source| IconError::AssetLoad {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(image.to_rgba8())
}

/// Resize `image` to `width`x`height` with Lanczos3. Images already at that
/// size are returned untouched.
pub fn fit_to(image: RgbaImage, width: u32, height: u32) -> Result<RgbaImage> {
    if image.dimensions() == (width, height) {
        return Ok(image);
    }
    check_resize(&image, width, height)?;

    info!(
        "Resizing foreground from {:?} to {:?}",
        image.dimensions(),
        (width, height)
    );
    Ok(imageops::resize(&image, width, height, FilterType::Lanczos3))
}

/// Source-over blend of `foreground` onto a copy of `background`.
pub fn composite(background: &RgbaImage, foreground: &RgbaImage) -> Result<RgbaImage> {
    if background.dimensions() != foreground.dimensions() {
        return Err(IconError::Resize {
            from_width: foreground.width(),
            from_height: foreground.height(),
            to_width: background.width(),
            to_height: background.height(),
        });
    }

    let mut combined = background.clone();
    for (dst, src) in combined.pixels_mut().zip(foreground.pixels()) {
        *dst = blend_over(*dst, *src);
    }
    Ok(combined)
}

/// Porter-Duff "over" for one pixel, rounding each channel back to `u8`.
pub fn blend_over(background: Rgba<u8>, foreground: Rgba<u8>) -> Rgba<u8> {
    match foreground[3] {
        0 => return background,
        255 => return foreground,
        _ => {}
    }

    let fg_a = foreground[3] as f32 / 255.0;
    let bg_a = background[3] as f32 / 255.0;
    let bg_weight = bg_a * (1.0 - fg_a);
    let out_a = fg_a + bg_weight;

    let mut out = Rgba([0u8; 4]);
    for c in 0..3 {
        let value = (foreground[c] as f32 * fg_a + background[c] as f32 * bg_weight) / out_a;
        out[c] = value.round().clamp(0.0, 255.0) as u8;
    }
    out[3] = (out_a * 255.0).round().clamp(0.0, 255.0) as u8;
    out
}

/// Save `image` to every target in order, resolving relative paths against
/// `root`. Stops at the first failure; files already written are kept.
pub fn save_targets(
    image: &RgbaImage,
    targets: &[OutputTarget],
    root: &Path,
) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(targets.len());

    for target in targets {
        let path = root.join(&target.path);
        info!("Saving to {}...", target.path.display());

        match target.size {
            Some(size) if (size, size) != image.dimensions() => {
                check_resize(image, size, size)?;
                let resized = imageops::resize(image, size, size, FilterType::Lanczos3);
                save_png(&resized, &path)?;
            }
            _ => save_png(image, &path)?,
        }

        written.push(path);
    }

    Ok(written)
}

fn check_resize(image: &RgbaImage, width: u32, height: u32) -> Result<()> {
    if width == 0 || height == 0 || image.width() == 0 || image.height() == 0 {
        return Err(IconError::Resize {
            from_width: image.width(),
            from_height: image.height(),
            to_width: width,
            to_height: height,
        });
    }
    Ok(())
}

fn save_png(image: &RgbaImage, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        create_dir_all(parent).map_err(|e| IconError::write(path, e))?;
    }

    let file = File::create(path).map_err(|e| IconError::write(path, e))?;
    let mut out = BufWriter::new(file);
    write_png(image, &mut out).map_err(|e| IconError::write(path, e))?;
    out.flush().map_err(|e| IconError::write(path, e))?;
    Ok(())
}

// Encode image data as PNG with compression
fn write_png<W: Write>(image: &RgbaImage, w: W) -> image::ImageResult<()> {
    let encoder = PngEncoder::new_with_quality(w, CompressionType::Best, PngFilterType::Adaptive);
    encoder.write_image(image.as_raw(), image.width(), image.height(), ColorType::Rgba8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn checkerboard(size: u32) -> RgbaImage {
        RgbaImage::from_fn(size, size, |x, y| {
            if (x + y) % 2 == 0 {
                Rgba([200, 30, 90, 255])
            } else {
                Rgba([10, 220, 40, 255])
            }
        })
    }

    #[test]
    fn test_opaque_foreground_replaces_background() {
        let background = RgbaImage::from_pixel(8, 8, Rgba([255, 154, 0, 255]));
        let foreground = checkerboard(8);

        let combined = composite(&background, &foreground).unwrap();
        assert_eq!(combined, foreground);
    }

    #[test]
    fn test_transparent_foreground_keeps_background() {
        let background = checkerboard(8);
        let foreground = RgbaImage::from_pixel(8, 8, Rgba([12, 34, 56, 0]));

        let combined = composite(&background, &foreground).unwrap();
        assert_eq!(combined, background);
    }

    #[test]
    fn test_partial_alpha_blends() {
        let background = RgbaImage::from_pixel(2, 2, Rgba([0, 0, 0, 255]));
        let foreground = RgbaImage::from_pixel(2, 2, Rgba([255, 255, 255, 128]));

        let combined = composite(&background, &foreground).unwrap();
        // 255 * 128/255 == 128
        assert_eq!(*combined.get_pixel(1, 1), Rgba([128, 128, 128, 255]));
    }

    #[test]
    fn test_partial_alpha_over_opaque_stays_opaque() {
        let background = Rgba([255, 154, 0, 255]);

        for a in 1..255u8 {
            let foreground = Rgba([200, 30, 90, a]);
            let out = blend_over(background, foreground);
            assert_eq!(out[3], 255, "alpha {a} gave non-opaque output");

            let t = a as f32 / 255.0;
            for c in 0..3 {
                let expected = foreground[c] as f32 * t + background[c] as f32 * (1.0 - t);
                let diff = (out[c] as f32 - expected).abs();
                assert!(diff <= 0.501, "alpha {a} channel {c}: {} vs {expected}", out[c]);
            }
        }
    }

    #[test]
    fn test_blend_over_translucent_background() {
        // Roughly half over half covers three quarters: 0.752 * 255 rounds to 192.
        let out = blend_over(Rgba([0, 0, 255, 128]), Rgba([255, 0, 0, 128]));
        assert_eq!(out[3], 192);
        assert!(out[0] > out[2], "foreground should dominate: {out:?}");
    }

    #[test]
    fn test_composite_rejects_size_mismatch() {
        let err = composite(&checkerboard(4), &checkerboard(8)).unwrap_err();
        assert!(matches!(err, IconError::Resize { .. }));
    }

    #[test]
    fn test_fit_to_same_size_is_identity() {
        let image = checkerboard(16);
        let fitted = fit_to(image.clone(), 16, 16).unwrap();
        assert_eq!(fitted, image);
    }

    #[test]
    fn test_fit_to_resizes_and_keeps_alpha() {
        let image = RgbaImage::from_pixel(10, 10, Rgba([40, 80, 120, 0]));
        let fitted = fit_to(image, 32, 32).unwrap();
        assert_eq!(fitted.dimensions(), (32, 32));
        assert!(fitted.pixels().all(|p| p[3] == 0));
    }

    #[test]
    fn test_fit_to_zero_is_resize_error() {
        let err = fit_to(checkerboard(4), 0, 4).unwrap_err();
        assert!(matches!(err, IconError::Resize { .. }));
    }

    #[test]
    fn test_load_missing_foreground() {
        let temp_dir = TempDir::new().unwrap();
        let err = load_foreground(&temp_dir.path().join("missing.png")).unwrap_err();
        assert!(matches!(err, IconError::AssetLoad { .. }));
        assert!(err.to_string().contains("missing.png"));
    }

    #[test]
    fn test_load_corrupt_foreground() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("logo.png");
        std::fs::write(&path, b"definitely not a png").unwrap();

        let err = load_foreground(&path).unwrap_err();
        assert!(matches!(err, IconError::AssetLoad { .. }));
    }

    #[test]
    fn test_save_targets_writes_every_target() {
        let temp_dir = TempDir::new().unwrap();
        let image = checkerboard(24);
        let targets = vec![
            OutputTarget::new("app/icon.png"),
            OutputTarget::new("public/icon-8x8.png").with_size(8),
            OutputTarget::new("public/same.png").with_size(24),
        ];

        let written = save_targets(&image, &targets, temp_dir.path()).unwrap();
        assert_eq!(written.len(), 3);

        let full = image::open(temp_dir.path().join("app/icon.png")).unwrap();
        assert_eq!(full.to_rgba8(), image);

        let small = image::open(temp_dir.path().join("public/icon-8x8.png")).unwrap();
        assert_eq!((small.width(), small.height()), (8, 8));

        let same = image::open(temp_dir.path().join("public/same.png")).unwrap();
        assert_eq!(same.to_rgba8(), image);
    }

    #[test]
    fn test_save_targets_overwrites_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("icon.png");
        std::fs::write(&path, b"stale").unwrap();

        save_targets(&checkerboard(4), &[OutputTarget::new("icon.png")], temp_dir.path()).unwrap();

        let reloaded = image::open(&path).unwrap();
        assert_eq!(reloaded.to_rgba8(), checkerboard(4));
    }

    #[test]
    fn test_save_targets_stops_at_first_write_error() {
        let temp_dir = TempDir::new().unwrap();
        // A regular file where a directory is expected.
        std::fs::write(temp_dir.path().join("blocked"), b"").unwrap();

        let targets = vec![
            OutputTarget::new("first.png"),
            OutputTarget::new("blocked/second.png"),
            OutputTarget::new("third.png"),
        ];
        let err = save_targets(&checkerboard(4), &targets, temp_dir.path()).unwrap_err();

        assert!(matches!(err, IconError::Write { .. }));
        assert!(temp_dir.path().join("first.png").exists());
        assert!(!temp_dir.path().join("third.png").exists());
    }
}
