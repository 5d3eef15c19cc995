// File: crates/plot-core/src/error.rs
// Summary: Error type shared by chart accumulation, font resolution and rendering.

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, PlotError>;

#[derive(thiserror::Error, Debug)]
pub enum PlotError {
    /// An X value was missing; X vectors must be complete.
    #[error("series '{series}': X value at index {index} is missing")]
    MissingX { series: String, index: usize },

    #[error("series '{series}': {x} X values but {y} Y values")]
    LengthMismatch { series: String, x: usize, y: usize },

    #[error("series '{series}': {samples} samples but {widths} bar widths")]
    BarWidthMismatch { series: String, samples: usize, widths: usize },

    #[error("failed to read font '{}'", path.display())]
    FontLoad {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("font '{}' could not be decoded", path.display())]
    FontDecode { path: PathBuf },

    #[error("invalid color string '{0}'")]
    InvalidColor(String),

    #[error("failed to create {width}x{height} raster surface")]
    Surface { width: i32, height: i32 },

    #[error("failed to read back canvas pixels")]
    ReadPixels,

    #[error(transparent)]
    Image(#[from] image::ImageError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
