// File: crates/plot-core/src/rose.rs
// Summary: Compass rose overlay drawn in its own transparent buffer and composited onto the chart.

use skia_safe as skia;

use crate::color::Rgb;
use crate::error::{PlotError, Result};
use crate::options::RoseOptions;
use crate::scaled::stroke_paint;
use crate::text::{baseline, draw_text, ink_size, TextAnchor};

const BARB_WIDTH: f32 = 3.0;
const BARB_HEIGHT: f32 = 3.0;

/// Colors and orientation resolved for one render.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RoseStyle {
    pub color: Rgb,
    pub label_color: Rgb,
    /// Degrees counter-clockwise; `None` or zero leaves the arrow pointing up.
    pub rotation: Option<f64>,
}

/// Render the rose into a transparent image of `opts.width` x `opts.height` pixels.
pub fn rose_image(opts: &RoseOptions, style: &RoseStyle, label_font: &skia::Font) -> Result<skia::Image> {
    let (w, h) = (opts.width as i32, opts.height as i32);
    let mut surface =
        skia::surfaces::raster_n32_premul((w, h)).ok_or(PlotError::Surface { width: w, height: h })?;
    let canvas = surface.canvas();
    canvas.clear(skia::Color::TRANSPARENT);

    let cx = (opts.width / 2 + 1) as f32;
    let cy = (opts.height / 2 + 1) as f32;
    let paint = stroke_paint(style.color.opaque().into(), opts.line_width as f32);

    canvas.save();
    if let Some(deg) = style.rotation.filter(|d| *d != 0.0) {
        canvas.rotate(-deg as f32, Some(skia::Point::new(w as f32 / 2.0, h as f32 / 2.0)));
    }
    canvas.draw_line((cx, 0.0), (cx, h as f32), &paint);
    canvas.draw_line((cx - BARB_WIDTH, BARB_HEIGHT), (cx, 0.0), &paint);
    canvas.draw_line((cx, 0.0), (cx + BARB_WIDTH, BARB_HEIGHT), &paint);
    canvas.draw_circle((cx, cy), opts.diameter as f32 / 2.0, &paint);
    canvas.restore();

    // The label stays upright over the rotated arrow.
    let (lw, lh) = ink_size(label_font, &opts.label);
    let top = cy - lh / 2.0 - 1.0;
    let origin = (cx - lw / 2.0 - 1.0, baseline(label_font, &opts.label, top, TextAnchor::InkTop));
    draw_text(canvas, &opts.label, origin, label_font, style.label_color.into());

    Ok(surface.image_snapshot())
}

/// Composite the rose onto `canvas` with its top-left corner at `origin`. Pixels the rose
/// left transparent do not touch the canvas.
pub fn draw_rose(
    canvas: &skia::Canvas,
    origin: (i32, i32),
    opts: &RoseOptions,
    style: &RoseStyle,
    label_font: &skia::Font,
) -> Result<()> {
    let image = rose_image(opts, style, label_font)?;
    tracing::debug!(?origin, rotation = ?style.rotation, "compositing compass rose");
    canvas.draw_image(&image, (origin.0 as f32, origin.1 as f32), None);
    Ok(())
}
