// File: crates/plot-core/src/series.rs
// Summary: Plot data model: caller-built `PlotLine`s and the validated `Series` the renderer draws.
// Notes:
// - X values arrive as `Option<f64>` because upstream queries can yield gaps; `Series`
//   only exists once every X is known to be present.
// - Y gaps are kept as `None` and break lines / skip bars and vectors.

use crate::color::Rgb;
use crate::error::{PlotError, Result};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LineStyle {
    #[default]
    Solid,
    /// Markers only, no connecting segments.
    None,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Marker {
    Cross,
    X,
    Circle,
    Box,
}

/// A 2-D vector sample, e.g. wind as (east, north) components.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vector2 {
    pub x: f64,
    pub y: f64,
}

impl Vector2 {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn magnitude(&self) -> f64 {
        self.x.hypot(self.y)
    }
}

/// What a series draws, together with the Y samples that variant needs.
#[derive(Clone, Debug, PartialEq)]
pub enum PlotKind {
    Line {
        y: Vec<Option<f64>>,
        style: LineStyle,
        marker: Option<Marker>,
        marker_size: u32,
    },
    Bar {
        y: Vec<Option<f64>>,
        /// One width per sample; each bar spans `x - width ..= x`.
        widths: Vec<f64>,
    },
    Vector {
        y: Vec<Option<Vector2>>,
        /// Rotation in degrees applied to every vector (and the compass rose).
        rotate: Option<f64>,
    },
}

impl PlotKind {
    fn len(&self) -> usize {
        match self {
            PlotKind::Line { y, .. } | PlotKind::Bar { y, .. } => y.len(),
            PlotKind::Vector { y, .. } => y.len(),
        }
    }
}

/// Per-series presentation. Unset colors and widths come from the theme palette.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SeriesStyle {
    pub label: String,
    pub color: Option<Rgb>,
    pub fill_color: Option<Rgb>,
    pub width: Option<u32>,
    /// Do not connect samples further apart than this fraction of the X range.
    pub gap_fraction: Option<f64>,
}

/// A series as supplied by the caller, before validation.
#[derive(Clone, Debug, PartialEq)]
pub struct PlotLine {
    pub x: Vec<Option<f64>>,
    pub kind: PlotKind,
    pub style: SeriesStyle,
}

impl PlotLine {
    pub fn line(x: Vec<Option<f64>>, y: Vec<Option<f64>>) -> Self {
        let kind = PlotKind::Line { y, style: LineStyle::Solid, marker: None, marker_size: 10 };
        Self { x, kind, style: SeriesStyle::default() }
    }

    pub fn bar(x: Vec<Option<f64>>, y: Vec<Option<f64>>, widths: Vec<f64>) -> Self {
        Self { x, kind: PlotKind::Bar { y, widths }, style: SeriesStyle::default() }
    }

    pub fn vector(x: Vec<Option<f64>>, y: Vec<Option<Vector2>>) -> Self {
        Self { x, kind: PlotKind::Vector { y, rotate: None }, style: SeriesStyle::default() }
    }

    /// Line series from fully-populated `(x, y)` pairs.
    pub fn from_xy(data: &[(f64, f64)]) -> Self {
        let (x, y) = data.iter().map(|&(x, y)| (Some(x), Some(y))).unzip();
        Self::line(x, y)
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.style.label = label.into();
        self
    }

    pub fn with_color(mut self, color: Rgb) -> Self {
        self.style.color = Some(color);
        self
    }

    pub fn with_fill_color(mut self, color: Rgb) -> Self {
        self.style.fill_color = Some(color);
        self
    }

    pub fn with_width(mut self, width: u32) -> Self {
        self.style.width = Some(width);
        self
    }

    pub fn with_gap_fraction(mut self, fraction: f64) -> Self {
        self.style.gap_fraction = Some(fraction);
        self
    }

    /// Marker glyphs on a line series; ignored for other kinds.
    pub fn with_marker(mut self, kind: Marker, size: u32) -> Self {
        if let PlotKind::Line { marker, marker_size, .. } = &mut self.kind {
            *marker = Some(kind);
            *marker_size = size;
        }
        self
    }

    /// Line drawing style; ignored for other kinds.
    pub fn with_line_style(mut self, new_style: LineStyle) -> Self {
        if let PlotKind::Line { style, .. } = &mut self.kind {
            *style = new_style;
        }
        self
    }

    /// Vector rotation in degrees; ignored for other kinds.
    pub fn with_rotation(mut self, degrees: f64) -> Self {
        if let PlotKind::Vector { rotate, .. } = &mut self.kind {
            *rotate = Some(degrees);
        }
        self
    }
}

/// A validated series: X complete, lengths consistent.
#[derive(Clone, Debug, PartialEq)]
pub struct Series {
    pub x: Vec<f64>,
    pub kind: PlotKind,
    pub style: SeriesStyle,
}

impl TryFrom<PlotLine> for Series {
    type Error = PlotError;

    fn try_from(line: PlotLine) -> Result<Self> {
        let series = line.style.label.clone();
        if let Some(index) = line.x.iter().position(Option::is_none) {
            return Err(PlotError::MissingX { series, index });
        }
        if line.x.len() != line.kind.len() {
            return Err(PlotError::LengthMismatch { series, x: line.x.len(), y: line.kind.len() });
        }
        if let PlotKind::Bar { widths, .. } = &line.kind {
            if widths.len() != line.x.len() {
                return Err(PlotError::BarWidthMismatch {
                    series,
                    samples: line.x.len(),
                    widths: widths.len(),
                });
            }
        }
        Ok(Series {
            x: line.x.into_iter().flatten().collect(),
            kind: line.kind,
            style: line.style,
        })
    }
}

impl Series {
    pub fn is_vector(&self) -> bool {
        matches!(self.kind, PlotKind::Vector { .. })
    }

    /// X range covered by the series. Bar series extend left by their first bar's width
    /// so the leftmost bar is not clipped.
    pub fn x_extent(&self) -> Option<(f64, f64)> {
        let (mut lo, hi) = min_max(self.x.iter().copied())?;
        if let PlotKind::Bar { widths, .. } = &self.kind {
            lo -= widths.first().copied().unwrap_or(0.0);
        }
        Some((lo, hi))
    }

    /// Y range covered by the series. Vectors contribute `-max|v| ..= max|v|`.
    pub fn y_extent(&self) -> Option<(f64, f64)> {
        match &self.kind {
            PlotKind::Line { y, .. } | PlotKind::Bar { y, .. } => min_max(y.iter().flatten().copied()),
            PlotKind::Vector { y, .. } => {
                let (_, max) = min_max(y.iter().flatten().map(Vector2::magnitude))?;
                Some((-max, max))
            }
        }
    }
}

/// Min and max of the finite values, or `None` if there are none.
pub fn min_max(values: impl IntoIterator<Item = f64>) -> Option<(f64, f64)> {
    values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// Union of two optional extents.
pub fn union(a: Option<(f64, f64)>, b: Option<(f64, f64)>) -> Option<(f64, f64)> {
    match (a, b) {
        (Some((a0, a1)), Some((b0, b1))) => Some((a0.min(b0), a1.max(b1))),
        (a, None) => a,
        (None, b) => b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn xs(v: &[f64]) -> Vec<Option<f64>> {
        v.iter().copied().map(Some).collect()
    }

    #[test]
    fn missing_x_is_rejected() {
        let line = PlotLine::line(vec![Some(0.0), None, Some(2.0)], xs(&[1.0, 2.0, 3.0])).with_label("rain");
        match Series::try_from(line) {
            Err(PlotError::MissingX { series, index }) => {
                assert_eq!(series, "rain");
                assert_eq!(index, 1);
            }
            other => panic!("expected MissingX, got {other:?}"),
        }
    }

    #[test]
    fn length_mismatches_are_rejected() {
        let line = PlotLine::line(xs(&[0.0, 1.0]), xs(&[1.0]));
        assert!(matches!(Series::try_from(line), Err(PlotError::LengthMismatch { .. })));
        let bar = PlotLine::bar(xs(&[0.0, 1.0]), xs(&[1.0, 2.0]), vec![1.0]);
        assert!(matches!(Series::try_from(bar), Err(PlotError::BarWidthMismatch { .. })));
    }

    #[test]
    fn bar_extent_includes_first_bar() {
        let bar = PlotLine::bar(xs(&[0.0, 10.0, 20.0]), xs(&[1.0, 2.0, 3.0]), vec![5.0; 3]);
        let s = Series::try_from(bar).unwrap();
        assert_eq!(s.x_extent(), Some((-5.0, 20.0)));
    }

    #[test]
    fn y_extent_skips_gaps() {
        let line = PlotLine::line(xs(&[0.0, 1.0, 2.0]), vec![Some(4.0), None, Some(-1.5)]);
        let s = Series::try_from(line).unwrap();
        assert_eq!(s.y_extent(), Some((-1.5, 4.0)));
    }

    #[test]
    fn vector_extent_is_symmetric_magnitude() {
        let v = PlotLine::vector(xs(&[0.0, 1.0]), vec![Some(Vector2::new(3.0, 4.0)), None]);
        let s = Series::try_from(v).unwrap();
        assert!(s.is_vector());
        assert_eq!(s.y_extent(), Some((-5.0, 5.0)));
    }

    #[test]
    fn all_missing_y_has_no_extent() {
        let line = PlotLine::line(xs(&[0.0, 1.0]), vec![None, None]);
        let s = Series::try_from(line).unwrap();
        assert_eq!(s.y_extent(), None);
        assert_eq!(s.x_extent(), Some((0.0, 1.0)));
    }

    #[test]
    fn builders_only_touch_matching_kind() {
        let l = PlotLine::from_xy(&[(0.0, 1.0)]).with_marker(Marker::Box, 6).with_rotation(90.0);
        assert!(matches!(l.kind, PlotKind::Line { marker: Some(Marker::Box), marker_size: 6, .. }));
        let v = PlotLine::vector(xs(&[0.0]), vec![None]).with_rotation(90.0).with_marker(Marker::X, 3);
        assert!(matches!(v.kind, PlotKind::Vector { rotate: Some(r), .. } if r == 90.0));
    }
}
