//! Public chart functions.
//!
//! Each one prepares the input, applies its transform, builds a figure
//! through [`crate::plotting`] and hands it to [`output::finish`].

use tracing::debug;

use crate::error::{ChartError, ChartResult};
use crate::figure::{Artist, Figure, Fill, Line, RefLine, Stroke, XAxis, YAxis};
use crate::format::{date_span, group_float, group_thousands, score_str, TickFormat};
use crate::options::{BetaWindows, CurveOptions, HeatmapOptions, PlotOptions, RollingWindow, YLabel};
use crate::output;
use crate::plotting::{self, Frame, RollingLine, TimeseriesStyle};
use crate::stats;
use crate::style::Color;
use crate::utils::{
    arange, make_portfolio, pct_change, prepare_benchmark, prepare_returns, resample,
    round_to_closest, Aggregation, Mode, Period, ReturnSeries,
};

pub type ChartOutput = ChartResult<Option<Figure>>;

const STRATEGY: &str = "Strategy";
const BENCHMARK: &str = "Benchmark";

fn ensure_data(series: &ReturnSeries, what: &str) -> ChartResult<()> {
    if series.is_empty() {
        return Err(ChartError::EmptySeries(what.to_string()));
    }
    Ok(())
}

fn scaled(values: &[f64], factor: f64) -> Vec<f64> {
    values.iter().map(|v| v * factor).collect()
}

/// Label for the secondary panels of a multi-panel chart: a custom label
/// only replaces the first panel's.
fn panel_label(ylabel: &YLabel, default: &str) -> Option<String> {
    match ylabel {
        YLabel::Hidden => None,
        _ => Some(default.to_string()),
    }
}

/// Drawdown panel ticks: `-ddmin` up to zero in steps of 5, widened for
/// deep drawdowns.
pub fn drawdown_ticks(dd_min_pct: f64) -> Vec<f64> {
    let ddmin = round_to_closest(dd_min_pct.abs(), 5.0);
    let mut step = 5.0;
    if ddmin > 50.0 {
        step = ddmin / 4.0;
    } else if ddmin > 20.0 {
        step = ddmin / 3.0;
    }
    let step = round_to_closest(step, 5.0).trunc();
    arange(-ddmin, 0.0, step)
}

/// Daily return panel ticks between the rounded extremes.
pub fn return_ticks(min_pct: f64, max_pct: f64) -> Vec<f64> {
    let retmax = round_to_closest(max_pct, 5.0);
    let retmin = round_to_closest(min_pct, 5.0);
    let diff = retmax - retmin;
    let mut step = 5.0;
    if diff > 50.0 {
        step = diff / 5.0;
    } else if diff > 30.0 {
        step = diff / 4.0;
    }
    let step = round_to_closest(step, 5.0).trunc();
    arange(retmin, retmax, step)
}

fn extremes(values: &[f64]) -> (f64, f64) {
    values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)))
}

/// Three stacked panels: cumulative return, drawdown and daily returns.
#[tracing::instrument(skip_all, fields(len = returns.len(), mode = %mode))]
pub fn snapshot(returns: &ReturnSeries, mode: Mode, opts: &PlotOptions) -> ChartOutput {
    ensure_data(returns, "snapshot")?;

    let portfolio = make_portfolio(returns, 1.0, mode);
    let daily = ReturnSeries {
        dates: portfolio.dates.clone(),
        values: pct_change(&portfolio.values),
        name: returns.name.clone(),
    };
    let cumulative = stats::cumsum(&daily.values);
    let drawdown = scaled(&stats::to_drawdown_series(&daily).values, 100.0);
    let sharpe = stats::sharpe(&daily.values, 0.0, opts.periods_per_year);

    let (first, last) = daily
        .date_range()
        .ok_or_else(|| ChartError::EmptySeries("snapshot".to_string()))?;
    let frame = Frame::new(opts, "Portfolio Summary", (10.0, 8.0), "Cumulative Return")
        .with_subtitle(format!("{} ;  Sharpe: {sharpe:.2}", date_span(first, last)));
    let palette = &frame.palette;
    let lw = opts.lw_or(1.5);
    let xs: Vec<f64> = (0..daily.len()).map(|i| i as f64).collect();
    let dates = XAxis::Dates(daily.dates.clone());
    let zero = || {
        Artist::HLine(RefLine {
            value: 0.0,
            stroke: Stroke::solid(Color::SILVER, 1.0),
            label: None,
        })
    };

    let mut equity = frame.axes(dates.clone(), YAxis::new(TickFormat::PercentPoints));
    equity.show_xticklabels = false;
    equity.push(zero());
    equity.push(Artist::Line(Line {
        xs: xs.clone(),
        ys: scaled(&cumulative, 100.0),
        stroke: Stroke::solid(palette.strategy(), lw),
        label: None,
    }));

    let mut dd_axis = YAxis::new(TickFormat::PercentPoints);
    let (dd_min, _) = extremes(&drawdown);
    dd_axis.ticks = Some(drawdown_ticks(if dd_min.is_finite() { dd_min } else { 0.0 }));
    let mut underwater = frame.axes(dates.clone(), dd_axis);
    underwater.subtitle = None;
    underwater.ylabel = panel_label(&opts.ylabel, "Drawdown");
    underwater.show_xticklabels = false;
    underwater.push(zero());
    underwater.push(Artist::Fill(Fill {
        xs: xs.clone(),
        ys: drawdown.clone(),
        baseline: 0.0,
        color: palette.drawdown(),
        alpha: 0.1,
    }));
    underwater.push(Artist::Line(Line {
        xs: xs.clone(),
        ys: drawdown,
        stroke: Stroke::solid(palette.drawdown(), 1.0),
        label: None,
    }));

    let daily_pct = scaled(&daily.values, 100.0);
    let (ret_min, ret_max) = extremes(&daily_pct);
    let mut ret_axis = YAxis::new(TickFormat::PercentPoints);
    ret_axis.ticks = Some(return_ticks(ret_min, ret_max));
    let mut daily_panel = frame.axes(dates, ret_axis);
    daily_panel.subtitle = None;
    daily_panel.ylabel = panel_label(&opts.ylabel, "Daily Return");
    daily_panel.push(zero());
    daily_panel.push(Artist::Line(Line {
        xs,
        ys: daily_pct,
        stroke: Stroke::solid(palette.benchmark(), 0.5),
        label: None,
    }));
    daily_panel.push(Artist::HLine(RefLine {
        value: 0.0,
        stroke: Stroke::dashed(palette.last(), 1.0),
        label: None,
    }));

    let mut fig = frame.figure();
    fig.add_axes(equity, 3.0);
    fig.add_axes(underwater, 1.0);
    fig.add_axes(daily_panel, 1.0);
    debug!(sharpe, "snapshot built");
    output::finish(fig, opts)
}

/// Portfolio value from `start_balance`, with the peak marked.
#[tracing::instrument(skip_all, fields(len = returns.len(), start_balance = start_balance, mode = %mode))]
pub fn earnings(
    returns: &ReturnSeries,
    start_balance: f64,
    mode: Mode,
    opts: &PlotOptions,
) -> ChartOutput {
    ensure_data(returns, "earnings")?;

    let curve = make_portfolio(returns, start_balance, mode);
    let (Some(&opening), Some(&closing)) = (curve.values.first(), curve.values.last()) else {
        return Err(ChartError::EmptySeries("earnings".to_string()));
    };
    let pnl = ((closing - opening) * 100.0).round() / 100.0;
    let pnl_pct = ((closing / opening - 1.0) * 100.0 * 100.0).round() / 100.0;

    let first = curve.dates.get(1).copied().unwrap_or(curve.dates[0]);
    let last = curve.dates[curve.dates.len() - 1];
    let subtitle = format!(
        "{} ;  P&L: {} ({})",
        date_span(first, last),
        score_str(&format!("${}", group_float(pnl))),
        score_str(&format!("{}%", group_float(pnl_pct))),
    );
    let ylabel = format!("Value of  ${}", group_thousands(start_balance, 0));
    let frame = Frame::new(opts, "Portfolio Earnings", (10.0, 6.0), &ylabel).with_subtitle(subtitle);
    let palette = &frame.palette;
    let marker_alpha = if opts.grayscale { 0.5 } else { 0.8 };

    let mut axes = frame.axes(XAxis::Dates(curve.dates.clone()), YAxis::new(TickFormat::Currency));
    if let Some(marker) = plotting::peak_marker(&curve, palette.benchmark(), marker_alpha) {
        axes.push(marker);
    }
    axes.push(Artist::Line(Line {
        xs: (0..curve.len()).map(|i| i as f64).collect(),
        ys: curve.values.clone(),
        stroke: Stroke::solid(palette.strategy(), opts.lw_or(1.5)),
        label: None,
    }));

    let mut fig = frame.figure();
    fig.add_axes(axes, 1.0);
    output::finish(fig, opts)
}

fn curve_title(
    compound: bool,
    benchmark: Option<&ReturnSeries>,
    match_volatility: bool,
    log_scale: bool,
) -> String {
    let mut title = if compound { "Cumulative Returns" } else { "Returns" }.to_string();
    let versus = benchmark.map(|b| match &b.name {
        Some(name) => format!(" vs {}", name.to_uppercase()),
        None => " vs Benchmark".to_string(),
    });

    if log_scale {
        match versus {
            Some(vs) => {
                title.push_str(&vs);
                title.push_str(" (Log Scaled");
                if match_volatility {
                    title.push_str(", Volatility Matched");
                }
            }
            None => title.push_str(" (Log Scaled"),
        }
        title.push(')');
    } else if let Some(vs) = versus {
        title.push_str(&vs);
        if match_volatility {
            title.push_str(" (Volatility Matched)");
        }
    }
    title
}

/// Apply volatility matching, accumulation and resampling to one series.
fn curve_transform(series: &ReturnSeries, curve: &CurveOptions, vol_ratio: Option<f64>) -> ReturnSeries {
    let mut values = series.values.clone();
    if let Some(ratio) = vol_ratio {
        values = scaled(&values, ratio);
    }
    let values = match (curve.compound, curve.cumulative) {
        (true, true) => stats::compsum(&values),
        (true, false) => stats::cumsum(&values),
        (false, _) => values,
    };
    let transformed = series.with_values(values);
    match curve.resample {
        Some(period) => {
            let agg = if curve.compound {
                Aggregation::Last
            } else {
                Aggregation::Sum
            };
            resample(&transformed, period, agg)
        }
        None => transformed,
    }
}

fn plot_curve(
    returns: &ReturnSeries,
    benchmark: Option<&ReturnSeries>,
    curve: &CurveOptions,
    log_scale: bool,
    opts: &PlotOptions,
) -> ChartOutput {
    ensure_data(returns, "returns")?;
    if curve.match_volatility && benchmark.is_none() {
        return Err(ChartError::MissingBenchmark("volatility matching"));
    }

    let prepared = prepare_returns(returns, 0.0, None);
    let bench = benchmark.map(|b| prepare_benchmark(b, &prepared.dates, 0.0, None));

    let vol_ratio = match (&bench, curve.match_volatility) {
        (Some(b), true) => {
            let own = stats::std_dev(&prepared.values);
            let theirs = stats::std_dev(&b.values);
            debug!(own, theirs, "matching volatility");
            (own > 0.0).then(|| theirs / own)
        }
        _ => None,
    };

    let strategy = curve_transform(&prepared, curve, vol_ratio);
    let bench_curve = bench.as_ref().map(|b| curve_transform(b, curve, None));

    let title = curve_title(curve.compound, benchmark, curve.match_volatility, log_scale);
    let figsize = if log_scale { (10.0, 5.0) } else { (10.0, 6.0) };
    let frame = Frame::new(opts, &title, figsize, "Cumulative Returns").with_date_subtitle(&prepared);

    let mut style = TimeseriesStyle::new(returns.label(STRATEGY), opts.lw_or(1.5));
    style.log_scale = log_scale;
    if let Some(b) = benchmark {
        style.benchmark_label = b.label(BENCHMARK);
    }

    let fig = plotting::plot_timeseries(&frame, &strategy, bench_curve.as_ref(), &style);
    output::finish(fig, opts)
}

/// Cumulative (or plain) returns against an optional benchmark.
#[tracing::instrument(skip_all, fields(len = returns.len(), benchmark = benchmark.is_some()))]
pub fn returns(
    returns: &ReturnSeries,
    benchmark: Option<&ReturnSeries>,
    curve: &CurveOptions,
    opts: &PlotOptions,
) -> ChartOutput {
    plot_curve(returns, benchmark, curve, false, opts)
}

/// As [`returns`], on a symmetric-log y axis.
#[tracing::instrument(skip_all, fields(len = returns.len(), benchmark = benchmark.is_some()))]
pub fn log_returns(
    returns: &ReturnSeries,
    benchmark: Option<&ReturnSeries>,
    curve: &CurveOptions,
    opts: &PlotOptions,
) -> ChartOutput {
    plot_curve(returns, benchmark, curve, true, opts)
}

#[tracing::instrument(skip_all, fields(len = returns.len()))]
pub fn daily_returns(returns: &ReturnSeries, log_scale: bool, opts: &PlotOptions) -> ChartOutput {
    ensure_data(returns, "daily returns")?;

    let prepared = prepare_returns(returns, 0.0, None);
    let daily = resample(&prepared, Period::Daily, Aggregation::Sum);
    let frame = Frame::new(opts, "Daily Returns", (10.0, 4.0), "Returns").with_date_subtitle(&prepared);

    let mut style = TimeseriesStyle::new(returns.label(STRATEGY), opts.lw_or(0.5));
    style.log_scale = log_scale;

    let fig = plotting::plot_timeseries(&frame, &daily, None, &style);
    output::finish(fig, opts)
}

/// End-of-year returns as bars, with a dashed line at their mean.
#[tracing::instrument(skip_all, fields(len = returns.len(), compounded = compounded))]
pub fn yearly_returns(
    returns: &ReturnSeries,
    benchmark: Option<&ReturnSeries>,
    compounded: bool,
    opts: &PlotOptions,
) -> ChartOutput {
    ensure_data(returns, "yearly returns")?;

    let prepared = prepare_returns(returns, 0.0, None);
    let yearly = resample(&prepared, Period::Annual, Aggregation::returns(compounded));
    let bench_yearly = benchmark.map(|b| {
        let aligned = prepare_benchmark(b, &prepared.dates, 0.0, None);
        resample(&aligned, Period::Annual, Aggregation::Compound)
    });

    let title = if benchmark.is_some() {
        "EOY Returns  vs Benchmark"
    } else {
        "EOY Returns"
    };
    let frame = Frame::new(opts, title, (10.0, 5.0), "Returns").with_date_subtitle(&prepared);
    let years = yearly
        .dates
        .iter()
        .map(|d| d.format("%Y").to_string())
        .collect();
    let hline = stats::mean(&yearly.values).map(|avg| (avg, 1.5));
    debug!(years = yearly.len(), "annual returns resampled");

    let fig = plotting::plot_returns_bars(
        &frame,
        &yearly,
        bench_yearly.as_ref(),
        years,
        hline,
        &returns.label(STRATEGY),
    );
    output::finish(fig, opts)
}

/// Box plots of daily, weekly, monthly, quarterly and yearly returns.
#[tracing::instrument(skip_all, fields(len = returns.len(), compounded = compounded))]
pub fn distribution(returns: &ReturnSeries, compounded: bool, opts: &PlotOptions) -> ChartOutput {
    ensure_data(returns, "distribution")?;

    let prepared = prepare_returns(returns, 0.0, None);
    let agg = Aggregation::returns(compounded);
    let groups: Vec<(String, Vec<f64>)> = [
        ("Daily", None),
        ("Weekly", Some(Period::Weekly)),
        ("Monthly", Some(Period::Monthly)),
        ("Quarterly", Some(Period::Quarterly)),
        ("Yearly", Some(Period::Annual)),
    ]
    .into_iter()
    .map(|(label, period)| {
        let values = match period {
            Some(p) => resample(&prepared, p, agg).values,
            None => prepared.values.clone(),
        };
        (label.to_string(), values)
    })
    .collect();

    let frame = Frame::new(opts, "Return Quantiles", (10.0, 6.0), "Returns").with_date_subtitle(&prepared);
    let fig = plotting::plot_distribution(&frame, &groups);
    output::finish(fig, opts)
}

/// 20-bin density histogram of returns resampled to `period`.
#[tracing::instrument(skip_all, fields(len = returns.len(), period = %period, compounded = compounded))]
pub fn histogram(
    returns: &ReturnSeries,
    period: Period,
    compounded: bool,
    opts: &PlotOptions,
) -> ChartOutput {
    ensure_data(returns, "histogram")?;

    let prepared = prepare_returns(returns, 0.0, None);
    let resampled = resample(&prepared, period, Aggregation::returns(compounded));
    let title = format!("Distribution of {}Returns", period.title_prefix());
    let frame = Frame::new(opts, &title, (10.0, 5.0), "Occurrences").with_date_subtitle(&prepared);

    let fig = plotting::plot_histogram(&frame, &resampled.values, 20);
    output::finish(fig, opts)
}

/// Underwater plot of the drawdown series with its average.
#[tracing::instrument(skip_all, fields(len = returns.len()))]
pub fn drawdown(returns: &ReturnSeries, log_scale: bool, opts: &PlotOptions) -> ChartOutput {
    ensure_data(returns, "drawdown")?;

    let prepared = prepare_returns(returns, 0.0, None);
    let dd = stats::to_drawdown_series(&prepared);
    let frame = Frame::new(opts, "Underwater Plot", (10.0, 5.0), "Drawdown").with_date_subtitle(&dd);

    let mut style = TimeseriesStyle::new("Drawdown", opts.lw_or(1.0));
    style.fill = true;
    style.log_scale = log_scale;
    style.hline = stats::mean(&dd.values).map(|avg| (avg, 2.0, Some("Average".to_string())));

    let fig = plotting::plot_timeseries(&frame, &dd, None, &style);
    output::finish(fig, opts)
}

/// Cumulative returns with the `periods` longest drawdowns shaded.
#[tracing::instrument(skip_all, fields(len = returns.len(), periods = periods, compounded = compounded))]
pub fn drawdowns_periods(
    returns: &ReturnSeries,
    periods: usize,
    compounded: bool,
    log_scale: bool,
    opts: &PlotOptions,
) -> ChartOutput {
    ensure_data(returns, "drawdown periods")?;

    let prepared = prepare_returns(returns, 0.0, None);
    let curve = prepared.with_values(if compounded {
        stats::compsum(&prepared.values)
    } else {
        stats::cumsum(&prepared.values)
    });
    let worst = stats::longest_drawdowns(&prepared, periods);
    debug!(found = worst.len(), "longest drawdowns selected");

    let title = format!("Worst {periods} Drawdown Periods");
    let frame = Frame::new(opts, &title, (10.0, 5.0), "Cumulative Returns").with_date_subtitle(&prepared);

    let fig = plotting::plot_longest_drawdowns(&frame, &curve, &worst, opts.lw_or(1.5), log_scale);
    output::finish(fig, opts)
}

/// Rolling beta to the benchmark over one or two windows.
#[tracing::instrument(skip_all, fields(len = returns.len(), window1 = windows.window1.period))]
pub fn rolling_beta(
    returns: &ReturnSeries,
    benchmark: &ReturnSeries,
    windows: &BetaWindows,
    opts: &PlotOptions,
) -> ChartOutput {
    ensure_data(returns, "rolling beta")?;

    let prepared = prepare_returns(returns, 0.0, None);
    let bench = prepare_benchmark(benchmark, &prepared.dates, 0.0, None);

    let primary = RollingLine {
        label: windows.window1.label.clone(),
        values: stats::rolling_beta(&prepared.values, &bench.values, windows.window1.period),
    };
    let secondary = windows.window2.as_ref().map(|w| RollingLine {
        label: w.label.clone(),
        values: stats::rolling_beta(&prepared.values, &bench.values, w.period),
    });

    let frame = Frame::new(opts, "Rolling Beta to Benchmark", (10.0, 3.0), "Beta")
        .with_date_subtitle(&prepared);
    let fig = plotting::plot_rolling_beta(&frame, &prepared.dates, primary, secondary, opts.lw_or(1.5));
    output::finish(fig, opts)
}

/// Which rolling statistic a chart shows.
#[derive(Clone, Copy)]
enum Rolling {
    Volatility,
    Sharpe,
    Sortino,
}

impl Rolling {
    fn name(self) -> &'static str {
        match self {
            Rolling::Volatility => "Volatility",
            Rolling::Sharpe => "Sharpe",
            Rolling::Sortino => "Sortino",
        }
    }

    fn default_lw(self) -> f64 {
        match self {
            Rolling::Volatility => 1.5,
            Rolling::Sharpe | Rolling::Sortino => 1.25,
        }
    }

    fn apply(self, values: &[f64], window: usize, periods_per_year: u32) -> Vec<f64> {
        match self {
            Rolling::Volatility => stats::rolling_volatility(values, window, periods_per_year),
            Rolling::Sharpe => stats::rolling_sharpe(values, window),
            Rolling::Sortino => stats::rolling_sortino(values, window),
        }
    }
}

fn plot_rolling(
    kind: Rolling,
    returns: &ReturnSeries,
    benchmark: Option<&ReturnSeries>,
    rf: f64,
    window: &RollingWindow,
    opts: &PlotOptions,
) -> ChartOutput {
    ensure_data(returns, kind.name())?;

    let ppy = opts.periods_per_year;
    let prepared = prepare_returns(returns, rf, None);
    let line = RollingLine {
        label: returns.label(STRATEGY),
        values: kind.apply(&prepared.values, window.period, ppy),
    };
    let bench_line = benchmark.map(|b| {
        let aligned = prepare_benchmark(b, &prepared.dates, rf, None);
        RollingLine {
            label: BENCHMARK.to_string(),
            values: kind.apply(&aligned.values, window.period, ppy),
        }
    });
    debug!(window = window.period, statistic = kind.name(), "rolling statistic computed");

    let title = format!("Rolling {} ({})", kind.name(), window.label);
    let frame = Frame::new(opts, &title, (10.0, 3.0), kind.name()).with_date_subtitle(&prepared);
    let fig = plotting::plot_rolling_stats(
        &frame,
        &prepared.dates,
        line,
        bench_line,
        opts.lw_or(kind.default_lw()),
    );
    output::finish(fig, opts)
}

#[tracing::instrument(skip_all, fields(len = returns.len(), window = window.period))]
pub fn rolling_volatility(
    returns: &ReturnSeries,
    benchmark: Option<&ReturnSeries>,
    window: &RollingWindow,
    opts: &PlotOptions,
) -> ChartOutput {
    plot_rolling(Rolling::Volatility, returns, benchmark, 0.0, window, opts)
}

/// Rolling Sharpe ratio of returns in excess of the per-period rate `rf`.
#[tracing::instrument(skip_all, fields(len = returns.len(), window = window.period, rf = rf))]
pub fn rolling_sharpe(
    returns: &ReturnSeries,
    benchmark: Option<&ReturnSeries>,
    rf: f64,
    window: &RollingWindow,
    opts: &PlotOptions,
) -> ChartOutput {
    plot_rolling(Rolling::Sharpe, returns, benchmark, rf, window, opts)
}

/// Rolling Sortino ratio of returns in excess of the per-period rate `rf`.
#[tracing::instrument(skip_all, fields(len = returns.len(), window = window.period, rf = rf))]
pub fn rolling_sortino(
    returns: &ReturnSeries,
    benchmark: Option<&ReturnSeries>,
    rf: f64,
    window: &RollingWindow,
    opts: &PlotOptions,
) -> ChartOutput {
    plot_rolling(Rolling::Sortino, returns, benchmark, rf, window, opts)
}

/// Year × month heatmap of returns in percent.
#[tracing::instrument(skip_all, fields(len = returns.len(), eoy = heatmap.eoy))]
pub fn monthly_heatmap(
    returns: &ReturnSeries,
    heatmap: &HeatmapOptions,
    opts: &PlotOptions,
) -> ChartOutput {
    ensure_data(returns, "monthly heatmap")?;

    let prepared = prepare_returns(returns, 0.0, None);
    let grid = stats::monthly_returns(&prepared, heatmap.eoy, heatmap.compounded).scaled(100.0);

    let (width, height) = opts.figsize_or((10.0, 5.0));
    let height = height.max(grid.years.len() as f64 / 3.0);
    let width = if heatmap.cbar { width * 1.04 } else { width };
    debug!(years = grid.years.len(), cells = grid.defined_cells(), "monthly grid built");

    let mut frame = Frame::new(opts, "Monthly Returns (%)", (width, height), "Years");
    frame.figsize = (width, height);
    let fig = plotting::plot_heatmap(&frame, &grid, heatmap);
    output::finish(fig, opts)
}

/// Same chart as [`monthly_heatmap`].
pub fn monthly_returns(
    returns: &ReturnSeries,
    heatmap: &HeatmapOptions,
    opts: &PlotOptions,
) -> ChartOutput {
    monthly_heatmap(returns, heatmap, opts)
}
