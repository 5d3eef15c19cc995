// File: crates/plot-core/src/options.rs
// Summary: Plot configuration (sizes, fonts, axis layout, rose and day/night settings) with weewx-style defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::axis::LabelSide;
use crate::color::Rgb;
use crate::theme::Theme;
use crate::types::{HEIGHT, WIDTH};

/// A font file and its nominal size in pixels. `path: None` selects the default typeface.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FontSpec {
    pub path: Option<PathBuf>,
    pub size: u32,
}

impl FontSpec {
    pub fn sized(size: u32) -> Self {
        Self { path: None, size }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoseOptions {
    pub width: u32,
    pub height: u32,
    pub diameter: u32,
    pub line_width: u32,
    pub label: String,
    /// Label font; a missing path borrows the bottom label's font file.
    pub label_font: FontSpec,
    /// Glyph color; when unset the first vector series' color is used.
    pub color: Option<Rgb>,
}

impl Default for RoseOptions {
    fn default() -> Self {
        Self {
            width: 21,
            height: 21,
            diameter: 10,
            line_width: 1,
            label: "N".into(),
            label_font: FontSpec::sized(10),
            color: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DayNightOptions {
    pub show: bool,
    pub day_color: Rgb,
    pub night_color: Rgb,
    pub edge_color: Rgb,
    /// Number of fade steps around each transition; 0 disables the fade.
    pub gradient: u32,
}

impl Default for DayNightOptions {
    fn default() -> Self {
        Self {
            show: false,
            day_color: Rgb::from_hex(0xffffff),
            night_color: Rgb::from_hex(0xf0f0f0),
            edge_color: Rgb::from_hex(0xefefef),
            gradient: 20,
        }
    }
}

/// Everything about a plot except its data. Pixel quantities are given at the final
/// (downsampled) resolution; the renderer multiplies them by `anti_alias`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotOptions {
    pub image_width: u32,
    pub image_height: u32,
    pub anti_alias: u32,
    pub theme: Theme,

    pub top_label_font: FontSpec,
    pub unit_label_font: FontSpec,
    pub bottom_label_font: FontSpec,
    pub axis_label_font: FontSpec,
    pub bottom_label_offset: u32,

    pub x_label_format: Option<String>,
    pub y_label_format: Option<String>,
    pub x_nticks: usize,
    pub y_nticks: usize,
    pub x_label_spacing: usize,
    pub y_label_spacing: usize,
    pub y_label_side: LabelSide,

    pub rose: RoseOptions,
    pub daynight: DayNightOptions,

    /// Base directory that relative font paths are resolved against.
    pub skin_dir: Option<PathBuf>,
}

impl Default for PlotOptions {
    fn default() -> Self {
        Self {
            image_width: WIDTH,
            image_height: HEIGHT,
            anti_alias: 1,
            theme: Theme::default(),
            top_label_font: FontSpec::sized(10),
            unit_label_font: FontSpec::sized(10),
            bottom_label_font: FontSpec::sized(10),
            axis_label_font: FontSpec::sized(10),
            bottom_label_offset: 3,
            x_label_format: None,
            y_label_format: None,
            x_nticks: 10,
            y_nticks: 10,
            x_label_spacing: 2,
            y_label_spacing: 2,
            y_label_side: LabelSide::Left,
            rose: RoseOptions::default(),
            daynight: DayNightOptions::default(),
            skin_dir: None,
        }
    }
}

impl PlotOptions {
    /// Anti-alias factor, never below 1.
    pub fn aa(&self) -> u32 {
        self.anti_alias.max(1)
    }

    /// Resolve a configured font path against `skin_dir`.
    pub fn font_path(&self, path: Option<&Path>) -> Option<PathBuf> {
        let path = path?;
        Some(match &self.skin_dir {
            Some(dir) => dir.join(path),
            None => path.to_path_buf(),
        })
    }
}
