//! Performance charts for daily return series: equity curves, drawdowns,
//! rolling statistics, return distributions and monthly heatmaps.
//!
//! Every chart function returns the built [`Figure`] unless it was shown,
//! and writes it to disk first when [`PlotOptions::savefig`] is set.

mod error;
pub mod figure;
pub mod format;
mod options;
pub mod output;
pub mod plotting;
pub mod render;
pub mod stats;
pub mod style;
mod utils;
mod wrappers;

pub use crate::error::{ChartError, ChartResult, DataError, LayoutError};
pub use crate::figure::Figure;
pub use crate::options::{
    BetaWindows, CurveOptions, HeatmapOptions, PlotOptions, RollingWindow, YLabel,
};
pub use crate::output::{ImageFormat, SaveOptions, SystemViewer, Viewer};
pub use crate::render::DisplayList;
pub use crate::utils::{
    make_portfolio, prepare_benchmark, prepare_returns, resample, Aggregation, Mode, Period,
    ReturnSeries,
};
pub use crate::wrappers::{
    daily_returns, distribution, drawdown, drawdown_ticks, drawdowns_periods, earnings,
    histogram, log_returns, monthly_heatmap, monthly_returns, return_ticks, returns,
    rolling_beta, rolling_sharpe, rolling_sortino, rolling_volatility, snapshot, yearly_returns,
    ChartOutput,
};
