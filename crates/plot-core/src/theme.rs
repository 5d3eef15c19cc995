// File: crates/plot-core/src/theme.rs
// Summary: Chart color themes and the cyclic series palette.

use serde::{Deserialize, Serialize};

use crate::color::Rgb;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub name: String,
    pub image_background: Rgb,
    pub chart_background: Rgb,
    pub gridline: Rgb,
    /// Series stroke colors, reused cyclically.
    pub line_colors: Vec<Rgb>,
    /// Bar fill colors; empty means "same as `line_colors`".
    pub fill_colors: Vec<Rgb>,
    pub line_widths: Vec<u32>,
    pub unit_label: Rgb,
    pub bottom_label: Rgb,
    pub axis_label: Rgb,
    pub rose_label: Rgb,
}

impl Default for Theme {
    fn default() -> Self {
        Self::classic()
    }
}

impl Theme {
    pub fn classic() -> Self {
        Self {
            name: "classic".into(),
            image_background: Rgb::from_hex(0xf5f5f5),
            chart_background: Rgb::from_hex(0xd8d8d8),
            gridline: Rgb::from_hex(0xa0a0a0),
            line_colors: vec![Rgb::from_hex(0xff0000), Rgb::from_hex(0x00ff00), Rgb::from_hex(0x0000ff)],
            fill_colors: Vec::new(),
            line_widths: vec![1, 1, 1],
            unit_label: Rgb::BLACK,
            bottom_label: Rgb::BLACK,
            axis_label: Rgb::BLACK,
            rose_label: Rgb::BLACK,
        }
    }

    pub fn dark() -> Self {
        Self {
            name: "dark".into(),
            image_background: Rgb::new(18, 18, 20),
            chart_background: Rgb::new(28, 28, 32),
            gridline: Rgb::new(60, 60, 68),
            line_colors: vec![Rgb::new(64, 160, 255), Rgb::new(40, 200, 120), Rgb::new(220, 80, 80)],
            fill_colors: vec![Rgb::new(32, 90, 150), Rgb::new(20, 110, 70), Rgb::new(130, 45, 45)],
            line_widths: vec![1, 1, 1],
            unit_label: Rgb::new(210, 210, 220),
            bottom_label: Rgb::new(210, 210, 220),
            axis_label: Rgb::new(180, 180, 190),
            rose_label: Rgb::new(235, 235, 245),
        }
    }

    /// Stroke color for the series at `index`.
    pub fn line_color(&self, index: usize) -> Rgb {
        cycle(&self.line_colors, index).unwrap_or(Rgb::BLACK)
    }

    /// Fill color for the series at `index`, falling back to the stroke palette.
    pub fn fill_color(&self, index: usize) -> Rgb {
        cycle(&self.fill_colors, index).unwrap_or_else(|| self.line_color(index))
    }

    pub fn line_width(&self, index: usize) -> u32 {
        cycle(&self.line_widths, index).unwrap_or(1)
    }
}

/// `palette[index mod len]`, or `None` for an empty palette.
pub fn cycle<T: Copy>(palette: &[T], index: usize) -> Option<T> {
    if palette.is_empty() {
        None
    } else {
        Some(palette[index % palette.len()])
    }
}

/// Return a list of built-in theme presets.
pub fn presets() -> Vec<Theme> {
    vec![Theme::classic(), Theme::dark()]
}

/// Find a theme by its `name`, falling back to classic.
pub fn find(name: &str) -> Theme {
    presets()
        .into_iter()
        .find(|t| t.name.eq_ignore_ascii_case(name))
        .unwrap_or_else(Theme::classic)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_cycles() {
        let t = Theme::classic();
        assert_eq!(t.line_color(0), Rgb::from_hex(0xff0000));
        assert_eq!(t.line_color(3), Rgb::from_hex(0xff0000));
        assert_eq!(t.line_color(5), Rgb::from_hex(0x0000ff));
    }

    #[test]
    fn fill_falls_back_to_line_colors() {
        let t = Theme::classic();
        assert_eq!(t.fill_color(1), t.line_color(1));
        let d = Theme::dark();
        assert_ne!(d.fill_color(1), d.line_color(1));
    }

    #[test]
    fn empty_palettes_have_defaults() {
        let t = Theme { line_colors: Vec::new(), line_widths: Vec::new(), ..Theme::classic() };
        assert_eq!(t.line_color(7), Rgb::BLACK);
        assert_eq!(t.line_width(7), 1);
    }

    #[test]
    fn find_is_case_insensitive() {
        assert_eq!(find("DARK").name, "dark");
        assert_eq!(find("nope").name, "classic");
    }
}
