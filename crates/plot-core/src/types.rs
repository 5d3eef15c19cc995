// File: crates/plot-core/src/types.rs
// Summary: Shared constants and the pixel layout derived from plot options.

use crate::geometry::RectI32;
use crate::options::PlotOptions;

/// Default image width in pixels.
pub const WIDTH: u32 = 300;
/// Default image height in pixels.
pub const HEIGHT: u32 = 180;

/// Screen margins, in pixels.
/// Contract: all fields are non-negative.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Insets {
    pub left: u32,
    pub right: u32,
    pub top: u32,
    pub bottom: u32,
}

impl Insets {
    pub const fn new(left: u32, right: u32, top: u32, bottom: u32) -> Self {
        Self { left, right, top, bottom }
    }
}

/// Site coordinates in decimal degrees (north and east positive).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

/// Canvas geometry in supersampled pixels.
///
/// Everything here is already multiplied by the anti-alias factor except the compass
/// rose, whose buffer is sized in final pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Layout {
    pub aa: u32,
    pub width: i32,
    pub height: i32,
    pub margins: Insets,
    pub top_band: i32,
    pub padding: i32,
    pub top_font: f32,
    pub unit_font: f32,
    pub bottom_font: f32,
    pub axis_font: f32,
    pub unit_label_origin: (f32, f32),
    pub rose_origin: (i32, i32),
}

impl Layout {
    pub fn new(o: &PlotOptions) -> Self {
        let aa = o.aa();
        let scaled = |v: u32| (v * aa) as f32;
        let axis_font = scaled(o.axis_label_font.size);
        let top_font = scaled(o.top_label_font.size);
        let bottom_font = scaled(o.bottom_label_font.size);

        let side_margin = |labelled: bool| {
            if labelled { (4.0 * axis_font) as u32 } else { 20 * aa }
        };
        let margins = Insets::new(
            side_margin(o.y_label_side.left()),
            side_margin(o.y_label_side.right()),
            (1.5 * top_font + 0.5) as u32,
            (1.5 * (bottom_font + axis_font) + 0.5) as u32,
        );
        let width = (o.image_width * aa) as i32;
        let height = (o.image_height * aa) as i32;
        let padding = 3 * aa as i32;

        Self {
            aa,
            width,
            height,
            margins,
            top_band: (1.2 * top_font + 0.5) as i32,
            padding,
            top_font,
            unit_font: scaled(o.unit_label_font.size),
            bottom_font,
            axis_font,
            unit_label_origin: ((10 * aa) as f32, 0.0),
            rose_origin: (
                margins.left as i32 + padding + 5,
                height - margins.bottom as i32 - padding - o.rose.height as i32,
            ),
        }
    }

    /// The chart-background rectangle inside the margins.
    pub fn chart_rect(&self) -> RectI32 {
        RectI32::from_ltrb(
            self.margins.left as i32,
            self.margins.top as i32,
            self.width - self.margins.right as i32,
            self.height - self.margins.bottom as i32,
        )
    }

    /// The rectangle data coordinates are mapped onto.
    pub fn plot_rect(&self) -> RectI32 {
        self.chart_rect().inset(self.padding)
    }

    /// Final image size after downsampling.
    pub fn output_size(&self) -> (u32, u32) {
        (self.width as u32 / self.aa, self.height as u32 / self.aa)
    }
}
