// File: crates/plot-core/src/color.rs
// Summary: Structured RGB/RGBA colors, color-string parsing, and HLS blending used for day/night fades.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use skia_safe as skia;

use crate::error::PlotError;

/// Opaque color with channels in R, G, B order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Color with an explicit alpha channel; only the compass-rose buffer needs one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build from a `0xRRGGBB` integer.
    pub const fn from_hex(v: u32) -> Self {
        Self::new(((v >> 16) & 0xff) as u8, ((v >> 8) & 0xff) as u8, (v & 0xff) as u8)
    }

    pub const fn to_hex(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    /// Extend with a fully opaque alpha channel.
    pub const fn opaque(self) -> Rgba {
        Rgba { r: self.r, g: self.g, b: self.b, a: 0xff }
    }

    /// Hue, lightness and saturation, each in `[0, 1]`.
    pub fn to_hls(self) -> (f64, f64, f64) {
        rgb_to_hls(self.r as f64 / 255.0, self.g as f64 / 255.0, self.b as f64 / 255.0)
    }

    pub fn from_hls(h: f64, l: f64, s: f64) -> Self {
        let (r, g, b) = hls_to_rgb(h, l, s);
        Self::new(to_channel(r), to_channel(g), to_channel(b))
    }
}

impl From<Rgb> for skia::Color {
    fn from(c: Rgb) -> Self {
        skia::Color::from_argb(255, c.r, c.g, c.b)
    }
}

impl From<Rgba> for skia::Color {
    fn from(c: Rgba) -> Self {
        skia::Color::from_argb(c.a, c.r, c.g, c.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06x}", self.to_hex())
    }
}

impl FromStr for Rgb {
    type Err = PlotError;

    /// Accepts `0xRRGGBB`, `#RRGGBB` or a handful of common color names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        let hex = t
            .strip_prefix("0x")
            .or_else(|| t.strip_prefix("0X"))
            .or_else(|| t.strip_prefix('#'));
        if let Some(hex) = hex {
            if hex.len() != 6 {
                return Err(PlotError::InvalidColor(s.to_string()));
            }
            return u32::from_str_radix(hex, 16)
                .map(Rgb::from_hex)
                .map_err(|_| PlotError::InvalidColor(s.to_string()));
        }
        let named = match t.to_ascii_lowercase().as_str() {
            "black" => 0x000000,
            "white" => 0xffffff,
            "red" => 0xff0000,
            "green" => 0x008000,
            "lime" => 0x00ff00,
            "blue" => 0x0000ff,
            "yellow" => 0xffff00,
            "orange" => 0xffa500,
            "purple" => 0x800080,
            "grey" | "gray" => 0x808080,
            "lightgrey" | "lightgray" => 0xd3d3d3,
            _ => return Err(PlotError::InvalidColor(s.to_string())),
        };
        Ok(Rgb::from_hex(named))
    }
}

impl TryFrom<String> for Rgb {
    type Error = PlotError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Rgb> for String {
    fn from(c: Rgb) -> Self {
        c.to_string()
    }
}

/// Fade `fg` toward `bg` across hue, lightness and saturation with one shared weight.
pub fn fade(fg: Rgb, bg: Rgb, weight: f64) -> Rgb {
    blend(fg, bg, weight, weight, weight)
}

/// Fade only lightness and saturation; the hue stays exactly that of `fg`.
pub fn fade_lightness(fg: Rgb, bg: Rgb, weight: f64) -> Rgb {
    blend(fg, bg, 1.0, weight, weight)
}

/// Interpolate between two colors in HLS space.
///
/// Each weight is the share of `fg` that survives in that channel: `1.0` keeps `fg`,
/// `0.0` yields `bg`. Hue travels the shorter way around the color wheel, and a grey
/// endpoint borrows the other endpoint's hue so it never drags the result through an
/// unrelated hue.
pub fn blend(fg: Rgb, bg: Rgb, w_hue: f64, w_light: f64, w_sat: f64) -> Rgb {
    let (mut h1, l1, s1) = fg.to_hls();
    let (mut h2, l2, s2) = bg.to_hls();

    if s1 == 0.0 {
        h1 = h2;
    }
    if s2 == 0.0 {
        h2 = h1;
    }

    let delta = h2 - h1;
    let h = if delta.abs() > 0.5 {
        // Walk back from bg's hue along the wrap-around arc.
        let span = 1.0 - delta.abs();
        let dir = if delta < 0.0 { 1.0 } else { -1.0 };
        let mut h = h2 - dir * span * w_hue;
        if h < 0.0 {
            h += 1.0;
        }
        if h > 1.0 {
            h -= 1.0;
        }
        h
    } else {
        w_hue * h1 + (1.0 - w_hue) * h2
    };

    let l = w_light * l1 + (1.0 - w_light) * l2;
    let s = w_sat * s1 + (1.0 - w_sat) * s2;
    Rgb::from_hls(h, l, s)
}

fn to_channel(v: f64) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

fn rgb_to_hls(r: f64, g: f64, b: f64) -> (f64, f64, f64) {
    let maxc = r.max(g).max(b);
    let minc = r.min(g).min(b);
    let sum = maxc + minc;
    let range = maxc - minc;
    let l = sum / 2.0;
    if range == 0.0 {
        return (0.0, l, 0.0);
    }
    let s = if l <= 0.5 { range / sum } else { range / (2.0 - sum) };
    let rc = (maxc - r) / range;
    let gc = (maxc - g) / range;
    let bc = (maxc - b) / range;
    let h = if r == maxc {
        bc - gc
    } else if g == maxc {
        2.0 + rc - bc
    } else {
        4.0 + gc - rc
    };
    ((h / 6.0).rem_euclid(1.0), l, s)
}

fn hls_to_rgb(h: f64, l: f64, s: f64) -> (f64, f64, f64) {
    if s == 0.0 {
        return (l, l, l);
    }
    let m2 = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let m1 = 2.0 * l - m2;
    (
        hue_channel(m1, m2, h + 1.0 / 3.0),
        hue_channel(m1, m2, h),
        hue_channel(m1, m2, h - 1.0 / 3.0),
    )
}

fn hue_channel(m1: f64, m2: f64, hue: f64) -> f64 {
    let hue = hue.rem_euclid(1.0);
    if hue < 1.0 / 6.0 {
        m1 + (m2 - m1) * hue * 6.0
    } else if hue < 0.5 {
        m2
    } else if hue < 2.0 / 3.0 {
        m1 + (m2 - m1) * (2.0 / 3.0 - hue) * 6.0
    } else {
        m1
    }
}
