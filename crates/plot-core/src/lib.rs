// File: crates/plot-core/src/lib.rs
// Summary: Core library entry point; exports the public API for building and rendering weather plots.

pub mod almanac;
pub mod axis;
pub mod chart;
pub mod color;
pub mod daynight;
pub mod downsample;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod options;
pub mod rose;
pub mod scale;
pub mod scaled;
pub mod series;
pub mod text;
pub mod theme;
pub mod types;

pub use almanac::{Almanac, Condition, SunAlmanac};
pub use axis::LabelSide;
pub use chart::{Chart, RenderedChart};
pub use color::{blend, fade, fade_lightness, Rgb, Rgba};
pub use error::{PlotError, Result};
pub use options::{DayNightOptions, FontSpec, PlotOptions, RoseOptions};
pub use scale::{CalendarScaling, LinearScaling, Scale, ScaleHint, ScalingStrategy};
pub use series::{LineStyle, Marker, PlotKind, PlotLine, Series, SeriesStyle, Vector2};
pub use theme::Theme;
pub use types::{Location, HEIGHT, WIDTH};
