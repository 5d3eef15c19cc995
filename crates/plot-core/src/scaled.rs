// File: crates/plot-core/src/scaled.rs
// Summary: Drawing primitives expressed in data coordinates on top of a Skia canvas.

use skia_safe as skia;

use crate::geometry::{AffineMap, RectI32};
use crate::scale::Scale;
use crate::series::{LineStyle, Marker, Vector2};

/// How to stroke a polyline and decorate its samples.
#[derive(Clone, Copy, Debug)]
pub struct LineOptions {
    pub color: skia::Color,
    pub width: f32,
    pub style: LineStyle,
    pub marker: Option<Marker>,
    pub marker_size: f32,
    /// Largest X step that is still connected; `None` connects everything.
    pub max_dx: Option<f64>,
}

/// Split samples into connected runs. A missing Y ends a run, as does an X step wider
/// than `max_dx`.
pub fn split_runs(x: &[f64], y: &[Option<f64>], max_dx: Option<f64>) -> Vec<Vec<(f64, f64)>> {
    let mut runs = Vec::new();
    let mut current: Vec<(f64, f64)> = Vec::new();
    for (&xv, yv) in x.iter().zip(y) {
        let Some(yv) = *yv else {
            if !current.is_empty() {
                runs.push(std::mem::take(&mut current));
            }
            continue;
        };
        if let (Some(limit), Some(&(last_x, _))) = (max_dx, current.last()) {
            if (xv - last_x).abs() > limit {
                runs.push(std::mem::take(&mut current));
            }
        }
        current.push((xv, yv));
    }
    if !current.is_empty() {
        runs.push(current);
    }
    runs
}

pub fn stroke_paint(color: skia::Color, width: f32) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Stroke);
    paint.set_stroke_width(width);
    paint.set_color(color);
    paint
}

pub fn fill_paint(color: skia::Color) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Fill);
    paint.set_color(color);
    paint
}

/// A canvas plus the affine map from data space onto the plot rectangle.
pub struct ScaledDraw<'a> {
    canvas: &'a skia::Canvas,
    map: AffineMap,
}

impl<'a> ScaledDraw<'a> {
    pub fn new(canvas: &'a skia::Canvas, plot: RectI32, x: &Scale, y: &Scale) -> Self {
        Self { canvas, map: AffineMap::new(plot, x, y) }
    }

    pub fn map(&self) -> &AffineMap {
        &self.map
    }

    pub fn canvas(&self) -> &'a skia::Canvas {
        self.canvas
    }

    fn point(&self, x: f64, y: f64) -> skia::Point {
        skia::Point::new(self.map.x(x), self.map.y(y))
    }

    /// Straight segment from `(x0, y0)` to `(x1, y1)`.
    pub fn segment(&self, from: (f64, f64), to: (f64, f64), color: skia::Color, width: f32) {
        let paint = stroke_paint(color, width);
        self.canvas.draw_line(self.point(from.0, from.1), self.point(to.0, to.1), &paint);
    }

    /// Axis-aligned rectangle between two data-space corners.
    pub fn rectangle(
        &self,
        corner_a: (f64, f64),
        corner_b: (f64, f64),
        fill: Option<skia::Color>,
        outline: Option<skia::Color>,
    ) {
        let a = self.point(corner_a.0, corner_a.1);
        let b = self.point(corner_b.0, corner_b.1);
        let rect = skia::Rect::from_ltrb(a.x.min(b.x), a.y.min(b.y), a.x.max(b.x), a.y.max(b.y));
        if let Some(color) = fill {
            self.canvas.draw_rect(rect, &fill_paint(color));
        }
        if let Some(color) = outline {
            self.canvas.draw_rect(rect, &stroke_paint(color, 1.0));
        }
    }

    /// Polyline with optional markers, broken at data gaps.
    pub fn line(&self, x: &[f64], y: &[Option<f64>], opts: &LineOptions) {
        let runs = split_runs(x, y, opts.max_dx);
        let paint = stroke_paint(opts.color, opts.width);

        if opts.style == LineStyle::Solid {
            for run in runs.iter().filter(|r| r.len() > 1) {
                let mut path = skia::PathBuilder::new();
                path.move_to(self.point(run[0].0, run[0].1));
                for &(xv, yv) in &run[1..] {
                    path.line_to(self.point(xv, yv));
                }
                self.canvas.draw_path(&path.detach(), &paint);
            }
        }

        if let Some(marker) = opts.marker {
            for &(xv, yv) in runs.iter().flatten() {
                self.marker(self.point(xv, yv), marker, opts.marker_size, &paint);
            }
        }
    }

    fn marker(&self, at: skia::Point, kind: Marker, size: f32, paint: &skia::Paint) {
        let h = size / 2.0;
        let (x, y) = (at.x, at.y);
        match kind {
            Marker::Cross => {
                self.canvas.draw_line((x - h, y), (x + h, y), paint);
                self.canvas.draw_line((x, y - h), (x, y + h), paint);
            }
            Marker::X => {
                self.canvas.draw_line((x - h, y - h), (x + h, y + h), paint);
                self.canvas.draw_line((x - h, y + h), (x + h, y - h), paint);
            }
            Marker::Circle => {
                self.canvas.draw_circle((x, y), h, paint);
            }
            Marker::Box => {
                self.canvas.draw_rect(skia::Rect::from_ltrb(x - h, y - h, x + h, y + h), paint);
            }
        }
    }

    /// A vector drawn from `(x, 0)`, scaled in Y units and rotated by `rotate` degrees.
    pub fn vector(&self, x: f64, v: Vector2, rotate: Option<f64>, color: skia::Color, width: f32) {
        let (_, per_unit) = self.map.pixels_per_unit();
        let (mut dx, mut dy) = (v.x * per_unit, v.y * per_unit);
        if let Some(deg) = rotate {
            let (sin, cos) = deg.to_radians().sin_cos();
            (dx, dy) = (dx * cos - dy * sin, dx * sin + dy * cos);
        }
        let start = self.point(x, 0.0);
        // Screen Y grows downward.
        let end = (start.x + dx as f32, start.y - dy as f32);
        self.canvas.draw_line(start, end, &stroke_paint(color, width));
    }
}
