//! Low-level figure builders shared by the public chart functions.
//!
//! Builders take series that are already transformed and only decide how
//! they are drawn.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::figure::{
    Artist, Axes, Bars, BoxPlot, BoxStats, Colorbar, Figure, Fill, Heatmap, Line, Markers,
    RefLine, Scale, Span, Stroke, Title, XAxis, YAxis,
};
use crate::format::{date_span, TickFormat};
use crate::options::{HeatmapOptions, PlotOptions};
use crate::stats::{self, Drawdown, MonthlyReturns};
use crate::style::{Color, Palette};
use crate::utils::ReturnSeries;

const TITLE_SIZE: f64 = 14.0;
const SUBTITLE_SIZE: f64 = 12.0;
const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Chrome shared by every chart: titles, size, palette and y label.
#[derive(Clone, Debug)]
pub struct Frame {
    pub title: String,
    pub subtitle: Option<String>,
    pub show_subtitle: bool,
    pub figsize: (f64, f64),
    pub dpi: f64,
    pub fontname: String,
    pub palette: Palette,
    pub ylabel: Option<String>,
}

impl Frame {
    pub fn new(opts: &PlotOptions, title: &str, figsize: (f64, f64), ylabel: &str) -> Self {
        Self {
            title: opts.title_or(title),
            subtitle: None,
            show_subtitle: opts.subtitle,
            figsize: opts.figsize_or(figsize),
            dpi: opts.dpi,
            fontname: opts.fontname.clone(),
            palette: opts.palette(),
            ylabel: opts.ylabel.resolve(ylabel),
        }
    }

    /// Set the subtitle unless subtitles are turned off.
    pub fn with_subtitle(mut self, text: impl Into<String>) -> Self {
        if self.show_subtitle {
            self.subtitle = Some(text.into());
        }
        self
    }

    pub fn with_date_subtitle(self, series: &ReturnSeries) -> Self {
        match series.date_range() {
            Some((start, end)) => self.with_subtitle(date_span(start, end)),
            None => self,
        }
    }

    pub(crate) fn figure(&self) -> Figure {
        let mut fig = Figure::new(self.figsize, self.fontname.clone())
            .with_suptitle(Title::bold(self.title.clone(), TITLE_SIZE));
        fig.dpi = self.dpi;
        fig
    }

    pub(crate) fn axes(&self, xaxis: XAxis, yaxis: YAxis) -> Axes {
        let mut axes = Axes::new(xaxis, yaxis);
        axes.subtitle = self
            .subtitle
            .as_ref()
            .map(|text| Title::muted(text.clone(), SUBTITLE_SIZE));
        axes.ylabel = self.ylabel.clone();
        axes
    }

    fn reference(&self, value: f64, width: f64, label: Option<&str>) -> RefLine {
        RefLine {
            value,
            stroke: Stroke::dashed(self.palette.accent, width),
            label: label.map(str::to_string),
        }
    }
}

fn index_xs(n: usize) -> Vec<f64> {
    (0..n).map(|i| i as f64).collect()
}

/// Values of `series` looked up on `dates`; absent dates are NaN.
fn align_to(dates: &[NaiveDate], series: &ReturnSeries) -> Vec<f64> {
    let by_date: BTreeMap<NaiveDate, f64> = series
        .dates
        .iter()
        .copied()
        .zip(series.values.iter().copied())
        .collect();
    dates
        .iter()
        .map(|d| by_date.get(d).copied().unwrap_or(f64::NAN))
        .collect()
}

fn zero_line(color: Color, dash: bool) -> Artist {
    let stroke = if dash {
        Stroke::dashed(color, 1.0)
    } else {
        Stroke::solid(color, 1.0)
    };
    Artist::HLine(RefLine {
        value: 0.0,
        stroke,
        label: None,
    })
}

/// Drawing choices for [`plot_timeseries`].
#[derive(Clone, Debug)]
pub struct TimeseriesStyle {
    pub returns_label: String,
    pub benchmark_label: String,
    pub lw: f64,
    pub fill: bool,
    /// Dashed reference line: value, width and legend label.
    pub hline: Option<(f64, f64, Option<String>)>,
    pub log_scale: bool,
    pub format: TickFormat,
}

impl TimeseriesStyle {
    pub fn new(returns_label: impl Into<String>, lw: f64) -> Self {
        Self {
            returns_label: returns_label.into(),
            benchmark_label: "Benchmark".to_string(),
            lw,
            fill: false,
            hline: None,
            log_scale: false,
            format: TickFormat::Percent,
        }
    }
}

/// Strategy line over a date axis with an optional benchmark overlay.
pub fn plot_timeseries(
    frame: &Frame,
    returns: &ReturnSeries,
    benchmark: Option<&ReturnSeries>,
    style: &TimeseriesStyle,
) -> Figure {
    let palette = &frame.palette;
    let xs = index_xs(returns.len());

    let mut yaxis = YAxis::new(style.format);
    if style.log_scale {
        yaxis.scale = Scale::SymLog;
    }
    let mut axes = frame.axes(XAxis::Dates(returns.dates.clone()), yaxis);
    axes.push(zero_line(Color::SILVER, false));

    if let Some(bench) = benchmark {
        axes.push(Artist::Line(Line {
            xs: xs.clone(),
            ys: align_to(&returns.dates, bench),
            stroke: Stroke::solid(palette.benchmark(), style.lw),
            label: Some(style.benchmark_label.clone()),
        }));
    }

    if style.fill {
        axes.push(Artist::Fill(Fill {
            xs: xs.clone(),
            ys: returns.values.clone(),
            baseline: 0.0,
            color: palette.strategy(),
            alpha: 0.25,
        }));
    }

    axes.push(Artist::Line(Line {
        xs,
        ys: returns.values.clone(),
        stroke: Stroke::solid(palette.strategy(), style.lw),
        label: Some(style.returns_label.clone()),
    }));

    let labelled_hline = match &style.hline {
        Some((value, width, label)) => {
            axes.push(Artist::HLine(frame.reference(*value, *width, label.as_deref())));
            label.as_ref().is_some_and(|l| !l.is_empty())
        }
        None => false,
    };

    axes.legend = benchmark.is_some() || labelled_hline;

    let mut fig = frame.figure();
    fig.add_axes(axes, 1.0);
    fig
}

/// Bars per category (typically years), benchmark first when present.
pub fn plot_returns_bars(
    frame: &Frame,
    returns: &ReturnSeries,
    benchmark: Option<&ReturnSeries>,
    categories: Vec<String>,
    hline: Option<(f64, f64)>,
    returns_label: &str,
) -> Figure {
    let palette = &frame.palette;
    let xs = index_xs(returns.len());
    let mut axes = frame.axes(XAxis::Categories(categories), YAxis::new(TickFormat::Percent));
    axes.push(zero_line(Color::BLACK, false));

    let strategy_xs = match benchmark {
        Some(bench) => {
            axes.push(Artist::Bars(Bars {
                xs: xs.iter().map(|x| x - 0.2).collect(),
                heights: align_to(&returns.dates, bench),
                width: 0.4,
                color: palette.benchmark(),
                alpha: 1.0,
                label: Some(bench.label("Benchmark")),
            }));
            xs.iter().map(|x| x + 0.2).collect()
        }
        None => xs,
    };

    axes.push(Artist::Bars(Bars {
        xs: strategy_xs,
        heights: returns.values.clone(),
        width: if benchmark.is_some() { 0.4 } else { 0.8 },
        color: palette.strategy(),
        alpha: 1.0,
        label: Some(returns_label.to_string()),
    }));

    if let Some((value, width)) = hline {
        axes.push(Artist::HLine(frame.reference(value, width, None)));
    }
    axes.legend = benchmark.is_some();

    let mut fig = frame.figure();
    fig.add_axes(axes, 1.0);
    fig
}

/// Bin edges and density heights over the finite values.
pub(crate) fn histogram_density(values: &[f64], bins: usize) -> (Vec<f64>, Vec<f64>) {
    let clean: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if clean.is_empty() || bins == 0 {
        return (Vec::new(), Vec::new());
    }

    let mut lo = clean.iter().copied().fold(f64::INFINITY, f64::min);
    let mut hi = clean.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if hi == lo {
        let pad = if lo == 0.0 { 0.005 } else { lo.abs() * 0.05 };
        lo -= pad;
        hi += pad;
    }

    let width = (hi - lo) / bins as f64;
    let mut counts = vec![0usize; bins];
    for v in &clean {
        let idx = (((v - lo) / width) as usize).min(bins - 1);
        counts[idx] += 1;
    }

    let edges = (0..=bins).map(|i| lo + i as f64 * width).collect();
    let norm = clean.len() as f64 * width;
    let heights = counts.into_iter().map(|c| c as f64 / norm).collect();
    (edges, heights)
}

/// Gaussian kernel density with Scott's bandwidth, evaluated at `xs`.
pub(crate) fn gaussian_kde(values: &[f64], xs: &[f64]) -> Vec<f64> {
    let clean: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    let n = clean.len() as f64;
    let bandwidth = stats::std_dev(&clean) * n.powf(-0.2);
    if clean.len() < 2 || bandwidth <= 0.0 {
        return vec![0.0; xs.len()];
    }

    let norm = 1.0 / (n * bandwidth * (2.0 * std::f64::consts::PI).sqrt());
    xs.iter()
        .map(|x| {
            clean
                .iter()
                .map(|v| {
                    let z = (x - v) / bandwidth;
                    (-0.5 * z * z).exp()
                })
                .sum::<f64>()
                * norm
        })
        .collect()
}

/// Density histogram with KDE, mean and zero markers.
pub fn plot_histogram(frame: &Frame, values: &[f64], bins: usize) -> Figure {
    let palette = &frame.palette;
    let mut axes = frame.axes(XAxis::Numeric(TickFormat::Percent), YAxis::new(TickFormat::Decimal(0)));

    let (edges, heights) = histogram_density(values, bins);
    if let (Some(first), Some(last)) = (edges.first().copied(), edges.last().copied()) {
        let width = edges[1] - edges[0];
        axes.push(Artist::Bars(Bars {
            xs: edges.windows(2).map(|w| (w[0] + w[1]) / 2.0).collect(),
            heights,
            width,
            color: palette.strategy(),
            alpha: 0.7,
            label: None,
        }));

        let steps = 100;
        let kde_xs: Vec<f64> = (0..=steps)
            .map(|i| first + (last - first) * i as f64 / steps as f64)
            .collect();
        let kde_ys = gaussian_kde(values, &kde_xs);
        axes.push(Artist::Line(Line {
            xs: kde_xs,
            ys: kde_ys,
            stroke: Stroke::solid(Color::BLACK, 1.5),
            label: None,
        }));
    }

    if let Some(avg) = stats::mean(values) {
        axes.push(Artist::VLine(RefLine {
            value: avg,
            stroke: Stroke::dashed(palette.accent, 1.5),
            label: Some("Average".to_string()),
        }));
    }
    axes.push(Artist::VLine(RefLine {
        value: 0.0,
        stroke: Stroke::solid(Color::BLACK, 1.0),
        label: None,
    }));
    axes.legend = true;

    let mut fig = frame.figure();
    fig.add_axes(axes, 1.0);
    fig
}

fn percentile(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    let pos = p.clamp(0.0, 1.0) * (sorted.len() as f64 - 1.0);
    let idx = pos.floor() as usize;
    let frac = pos - idx as f64;
    match sorted.get(idx + 1) {
        Some(upper) => sorted[idx] + (upper - sorted[idx]) * frac,
        None => sorted[idx],
    }
}

/// Five-number summary with linearly interpolated quartiles.
pub fn box_stats(values: &[f64]) -> Option<BoxStats> {
    let mut clean: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if clean.is_empty() {
        return None;
    }
    clean.sort_by(f64::total_cmp);
    Some(BoxStats {
        min: clean[0],
        q1: percentile(&clean, 0.25),
        median: percentile(&clean, 0.5),
        q3: percentile(&clean, 0.75),
        max: clean[clean.len() - 1],
    })
}

/// One box per labelled group; empty groups are skipped.
pub fn plot_distribution(frame: &Frame, groups: &[(String, Vec<f64>)]) -> Figure {
    let palette = &frame.palette;
    let kept: Vec<(&String, BoxStats)> = groups
        .iter()
        .filter_map(|(label, values)| box_stats(values).map(|s| (label, s)))
        .collect();

    let labels = kept.iter().map(|(label, _)| (*label).clone()).collect();
    let mut axes = frame.axes(XAxis::Categories(labels), YAxis::new(TickFormat::Percent));
    axes.push(zero_line(Color::SILVER, false));

    for (i, (_, stats)) in kept.into_iter().enumerate() {
        axes.push(Artist::BoxPlot(BoxPlot {
            x: i as f64,
            stats,
            width: 0.5,
            color: palette.get(i),
        }));
    }

    let mut fig = frame.figure();
    fig.add_axes(axes, 1.0);
    fig
}

/// Cumulative curve with the given drawdown periods shaded.
pub fn plot_longest_drawdowns(
    frame: &Frame,
    curve: &ReturnSeries,
    periods: &[Drawdown],
    lw: f64,
    log_scale: bool,
) -> Figure {
    let palette = &frame.palette;
    let mut yaxis = YAxis::new(TickFormat::Percent);
    if log_scale {
        yaxis.scale = Scale::SymLog;
    }
    let mut axes = frame.axes(XAxis::Dates(curve.dates.clone()), yaxis);
    axes.push(zero_line(Color::SILVER, false));

    let position = |date: NaiveDate| curve.dates.partition_point(|d| *d < date) as f64;
    for period in periods {
        axes.push(Artist::Span(Span {
            x0: position(period.start),
            x1: position(period.end),
            color: palette.drawdown(),
            alpha: 0.1,
        }));
    }

    axes.push(Artist::Line(Line {
        xs: index_xs(curve.len()),
        ys: curve.values.clone(),
        stroke: Stroke::solid(palette.strategy(), lw),
        label: Some(curve.label("Strategy")),
    }));

    let mut fig = frame.figure();
    fig.add_axes(axes, 1.0);
    fig
}

/// Y ticks for beta: whole and half units spanning at least `[-1, 1]`.
pub fn beta_ticks(values: &[f64]) -> Vec<f64> {
    let finite = values.iter().copied().filter(|v| v.is_finite());
    let (lo, hi) = finite.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    let mmin = if lo.is_finite() {
        (-100).min((lo * 100.0) as i64)
    } else {
        -100
    };
    let mmax = if hi.is_finite() {
        100.max((hi * 100.0) as i64)
    } else {
        100
    };
    let step = if mmax - mmin >= 200 { 50 } else { 100 };
    (mmin..mmax)
        .step_by(step)
        .map(|v| v as f64 / 100.0)
        .collect()
}

/// One labelled rolling-window line.
#[derive(Clone, Debug)]
pub struct RollingLine {
    pub label: String,
    pub values: Vec<f64>,
}

/// Rolling beta for one or two windows, the second drawn in gray.
pub fn plot_rolling_beta(
    frame: &Frame,
    dates: &[NaiveDate],
    primary: RollingLine,
    secondary: Option<RollingLine>,
    lw: f64,
) -> Figure {
    let palette = &frame.palette;
    let mut yaxis = YAxis::new(TickFormat::Decimal(2));
    yaxis.ticks = Some(beta_ticks(&primary.values));
    let mut axes = frame.axes(XAxis::Dates(dates.to_vec()), yaxis);
    let xs = index_xs(dates.len());
    let avg = stats::mean(&primary.values);

    axes.push(Artist::Line(Line {
        xs: xs.clone(),
        ys: primary.values,
        stroke: Stroke::solid(palette.strategy(), lw),
        label: Some(primary.label),
    }));
    if let Some(second) = secondary {
        axes.push(Artist::Line(Line {
            xs,
            ys: second.values,
            stroke: Stroke::solid(Color::GRAY, lw).with_alpha(0.8),
            label: Some(second.label),
        }));
    }

    if let Some(avg) = avg {
        axes.push(Artist::HLine(frame.reference(avg, 1.5, None)));
    }
    axes.push(zero_line(Color::BLACK, true));
    axes.legend = true;

    let mut fig = frame.figure();
    fig.add_axes(axes, 1.0);
    fig
}

/// A rolling statistic with an optional benchmark and a dashed mean line.
pub fn plot_rolling_stats(
    frame: &Frame,
    dates: &[NaiveDate],
    returns: RollingLine,
    benchmark: Option<RollingLine>,
    lw: f64,
) -> Figure {
    let palette = &frame.palette;
    let mut axes = frame.axes(XAxis::Dates(dates.to_vec()), YAxis::new(TickFormat::Decimal(2)));
    let xs = index_xs(dates.len());
    let avg = stats::mean(&returns.values);

    if let Some(bench) = benchmark {
        axes.push(Artist::Line(Line {
            xs: xs.clone(),
            ys: bench.values,
            stroke: Stroke::solid(palette.benchmark(), lw).with_alpha(0.8),
            label: Some(bench.label),
        }));
    }
    axes.push(Artist::Line(Line {
        xs,
        ys: returns.values,
        stroke: Stroke::solid(palette.strategy(), lw),
        label: Some(returns.label),
    }));

    if let Some(avg) = avg {
        axes.push(Artist::HLine(frame.reference(avg, 1.5, None)));
    }
    axes.push(zero_line(Color::BLACK, true));
    axes.legend = true;

    let mut fig = frame.figure();
    fig.add_axes(axes, 1.0);
    fig
}

/// Annotated year × month heatmap; `grid` is already in percent points.
///
/// The chart title sits on the axes rather than the figure.
pub fn plot_heatmap(frame: &Frame, grid: &MonthlyReturns, options: &HeatmapOptions) -> Figure {
    let palette = &frame.palette;
    let mut columns: Vec<String> = MONTHS.iter().map(|m| m.to_string()).collect();

    let mut rows: Vec<Vec<Option<f64>>> = grid.cells.iter().map(|row| row.to_vec()).collect();
    if let Some(eoy) = &grid.eoy {
        columns.push("EOY".to_string());
        for (row, value) in rows.iter_mut().zip(eoy) {
            row.push(Some(*value));
        }
    }

    let defined: Vec<f64> = rows.iter().flatten().flatten().copied().collect();
    let min = defined.iter().copied().fold(f64::INFINITY, f64::min);
    let max = defined.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let max_abs = if defined.is_empty() {
        1.0
    } else {
        min.abs().max(max.abs())
    };

    let mut yaxis = YAxis::new(TickFormat::Decimal(0));
    yaxis.labels = Some(grid.years.iter().map(|y| y.to_string()).collect());
    yaxis.inverted = true;

    let mut axes = Axes::new(XAxis::Categories(columns), yaxis);
    axes.title = Some(Title::bold(frame.title.clone(), TITLE_SIZE));
    axes.ylabel = frame.ylabel.clone();
    axes.push(Artist::Heatmap(Heatmap {
        cells: rows,
        colormap: palette.colormap,
        max_abs,
        annot_decimals: Some(2),
        annot_size: options.annot_size,
        square: options.square,
    }));
    if options.cbar && !defined.is_empty() {
        axes.colorbar = Some(Colorbar {
            colormap: palette.colormap,
            min,
            max,
            format: TickFormat::PercentPoints,
        });
    }

    let mut fig = Figure::new(frame.figsize, frame.fontname.clone());
    fig.dpi = frame.dpi;
    fig.add_axes(axes, 1.0);
    fig
}

/// Mark the first occurrence of the curve's maximum.
pub(crate) fn peak_marker(curve: &ReturnSeries, color: Color, alpha: f64) -> Option<Artist> {
    let (idx, value) = curve
        .values
        .iter()
        .copied()
        .enumerate()
        .filter(|(_, v)| v.is_finite())
        .fold(None, |best: Option<(usize, f64)>, (i, v)| match best {
            Some((_, b)) if b >= v => best,
            _ => Some((i, v)),
        })?;
    Some(Artist::Markers(Markers {
        xs: vec![idx as f64],
        ys: vec![value],
        radius: 6.0,
        color,
        alpha,
    }))
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn series(values: &[f64]) -> ReturnSeries {
        let start = NaiveDate::from_ymd_opt(2021, 1, 4).unwrap();
        let dates = (0..values.len())
            .map(|i| start + chrono::Days::new(i as u64))
            .collect();
        ReturnSeries::new(dates, values.to_vec(), None).unwrap()
    }

    fn frame() -> Frame {
        Frame::new(&PlotOptions::default(), "Test", (10.0, 5.0), "Returns")
    }

    #[test]
    fn histogram_density_integrates_to_one() {
        let values = [0.01, 0.02, -0.03, 0.04, 0.0, 0.015, -0.01];
        let (edges, heights) = histogram_density(&values, 20);
        assert_eq!(edges.len(), 21);
        let width = edges[1] - edges[0];
        let area: f64 = heights.iter().map(|h| h * width).sum();
        assert_relative_eq!(area, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn kde_peaks_near_the_data() {
        let values = [0.0, 0.001, -0.001, 0.0005];
        let ys = gaussian_kde(&values, &[0.0, 0.05]);
        assert!(ys[0] > ys[1]);
        assert!(gaussian_kde(&[0.1], &[0.1]).iter().all(|v| *v == 0.0));
    }

    #[test]
    fn box_stats_interpolate_quartiles() {
        let stats = box_stats(&[4.0, 1.0, 3.0, 2.0, f64::NAN]).unwrap();
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.max, 4.0);
        assert_relative_eq!(stats.q1, 1.75);
        assert_relative_eq!(stats.median, 2.5);
        assert_relative_eq!(stats.q3, 3.25);
        assert!(box_stats(&[f64::NAN]).is_none());
    }

    #[test]
    fn beta_ticks_cover_unit_range() {
        assert_eq!(beta_ticks(&[0.5, 0.9]), vec![-1.0, -0.5, 0.0, 0.5]);
        assert_eq!(beta_ticks(&[0.2, 0.4]), vec![-1.0, -0.5, 0.0, 0.5]);
        assert_eq!(beta_ticks(&[f64::NAN, -1.2, 1.6]), vec![-1.2, -0.7, -0.2, 0.3, 0.8, 1.3]);
    }

    #[test]
    fn benchmark_line_precedes_strategy_and_enables_legend() {
        let r = series(&[0.1, 0.2, 0.3]);
        let b = series(&[0.0, 0.1, 0.1]);
        let fig = plot_timeseries(&frame(), &r, Some(&b), &TimeseriesStyle::new("Strategy", 1.5));
        let axes = &fig.axes[0];
        let labels: Vec<_> = axes.lines().filter_map(|l| l.label.clone()).collect();
        assert_eq!(labels, vec!["Benchmark".to_string(), "Strategy".to_string()]);
        assert!(axes.legend);
        assert_eq!(axes.subtitle, None);
    }

    #[test]
    fn peak_marker_picks_first_maximum() {
        let curve = series(&[1.0, 3.0, 2.0, 3.0]);
        match peak_marker(&curve, Color::RED, 0.8) {
            Some(Artist::Markers(m)) => {
                assert_eq!(m.xs, vec![1.0]);
                assert_eq!(m.ys, vec![3.0]);
            }
            other => panic!("unexpected marker {other:?}"),
        }
    }

    #[test]
    fn heatmap_appends_eoy_column() {
        let grid = MonthlyReturns {
            years: vec![2021],
            cells: vec![[Some(1.0), Some(-2.0), None, None, None, None, None, None, None, None, None, None]],
            eoy: Some(vec![-1.02]),
        };
        let fig = plot_heatmap(&frame(), &grid, &HeatmapOptions::default().with_eoy(true));
        let axes = &fig.axes[0];
        assert!(matches!(&axes.xaxis, XAxis::Categories(c) if c.len() == 13 && c[12] == "EOY"));
        match &axes.artists[0] {
            Artist::Heatmap(hm) => {
                assert_eq!(hm.cells[0].len(), 13);
                assert_eq!(hm.max_abs, 2.0);
            }
            other => panic!("unexpected artist {other:?}"),
        }
        assert!(fig.suptitle.is_none());
        assert!(axes.colorbar.is_some());
    }
}
