use std::path::PathBuf;

use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

/// Errors raised while constructing a [`ReturnSeries`](crate::ReturnSeries).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DataError {
    #[error("time series is empty")]
    Empty,

    #[error("time series length mismatch: {dates} dates vs {values} values")]
    LengthMismatch { dates: usize, values: usize },

    #[error("time series contains duplicate date {0}")]
    DuplicateDate(chrono::NaiveDate),
}

#[derive(Debug, Error)]
pub enum ChartError {
    #[error(transparent)]
    Data(#[from] DataError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot infer an image format for '{}'", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("{0} requires a benchmark series")]
    MissingBenchmark(&'static str),

    #[error("nothing to plot: {0}")]
    EmptySeries(String),

    #[error("render backend failed: {0}")]
    Render(String),

    #[error("invalid plot options: {0}")]
    Config(#[from] serde_json::Error),
}

/// Non-fatal layout adjustment failure; callers log it and keep rendering.
#[derive(Debug, Error, PartialEq)]
pub enum LayoutError {
    #[error("figure of {width:.0}x{height:.0}px is too small for its labels")]
    TooSmall { width: f64, height: f64 },

    #[error("figure has no axes")]
    NoAxes,
}
