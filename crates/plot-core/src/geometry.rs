// File: crates/plot-core/src/geometry.rs
// Summary: Pixel rectangles and the affine map from data space onto them.

use crate::scale::Scale;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RectI32 {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl RectI32 {
    pub const fn from_ltrb(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self { left, top, right, bottom }
    }
    pub const fn width(&self) -> i32 { self.right - self.left }
    pub const fn height(&self) -> i32 { self.bottom - self.top }
    pub const fn inset(&self, by: i32) -> Self {
        Self::from_ltrb(self.left + by, self.top + by, self.right - by, self.bottom - by)
    }
}

/// Affine transform taking `(xmin..xmax, ymin..ymax)` onto a pixel rectangle, Y flipped.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AffineMap {
    x_scale: f64,
    x_offset: f64,
    y_scale: f64,
    y_offset: f64,
}

impl AffineMap {
    pub fn new(px: RectI32, x: &Scale, y: &Scale) -> Self {
        let xspan = x.span();
        let yspan = y.span();
        let x_scale = if xspan.abs() > 1e-12 { px.width() as f64 / xspan } else { 0.0 };
        let y_scale = if yspan.abs() > 1e-12 { px.height() as f64 / yspan } else { 0.0 };
        Self {
            x_scale,
            x_offset: px.left as f64 - x_scale * x.min,
            y_scale,
            y_offset: px.bottom as f64 + y_scale * y.min,
        }
    }

    #[inline]
    pub fn x(&self, x: f64) -> f32 {
        (self.x_scale * x + self.x_offset) as f32
    }

    #[inline]
    pub fn y(&self, y: f64) -> f32 {
        (self.y_offset - self.y_scale * y) as f32
    }

    /// Pixels per data unit along each axis.
    pub fn pixels_per_unit(&self) -> (f64, f64) {
        (self.x_scale, self.y_scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_corners() {
        let px = RectI32::from_ltrb(10, 20, 110, 70);
        let m = AffineMap::new(px, &Scale::new(0.0, 50.0, 10.0), &Scale::new(-1.0, 1.0, 0.5));
        assert_eq!(m.x(0.0), 10.0);
        assert_eq!(m.x(50.0), 110.0);
        assert_eq!(m.y(-1.0), 70.0);
        assert_eq!(m.y(1.0), 20.0);
        assert_eq!(m.y(0.0), 45.0);
    }

    #[test]
    fn inset_shrinks_each_side() {
        let r = RectI32::from_ltrb(0, 0, 100, 50).inset(3);
        assert_eq!((r.width(), r.height()), (94, 44));
    }
}
