// File: crates/plot-core/src/downsample.rs
// Summary: Surface readback and anti-alias reduction of the supersampled canvas.

use image::imageops::{self, FilterType};
use image::{DynamicImage, RgbImage, RgbaImage};
use skia_safe as skia;

use crate::error::{PlotError, Result};

/// Copy a raster surface out as unpremultiplied RGBA8.
pub fn read_rgba(surface: &mut skia::Surface) -> Result<RgbaImage> {
    let (w, h) = (surface.width(), surface.height());
    let info = skia::ImageInfo::new(
        (w, h),
        skia::ColorType::RGBA8888,
        skia::AlphaType::Unpremul,
        None,
    );
    let row_bytes = w as usize * 4;
    let mut pixels = vec![0u8; row_bytes * h as usize];
    if !surface.read_pixels(&info, &mut pixels, row_bytes, (0, 0)) {
        return Err(PlotError::ReadPixels);
    }
    RgbaImage::from_raw(w as u32, h as u32, pixels).ok_or(PlotError::ReadPixels)
}

/// Shrink by `factor` in both directions with a Lanczos filter, dropping alpha.
pub fn reduce(rgba: RgbaImage, factor: u32) -> RgbImage {
    let rgb = DynamicImage::ImageRgba8(rgba).into_rgb8();
    if factor <= 1 {
        return rgb;
    }
    let (w, h) = (rgb.width() / factor, rgb.height() / factor);
    imageops::resize(&rgb, w.max(1), h.max(1), FilterType::Lanczos3)
}
