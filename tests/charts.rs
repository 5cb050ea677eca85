use chrono::{Datelike, Days, NaiveDate, Weekday};
use quantstats_plots::figure::Artist;
use quantstats_plots::{
    BetaWindows, ChartError, CurveOptions, DisplayList, Figure, HeatmapOptions, Mode, Period,
    PlotOptions, ReturnSeries, RollingWindow, YLabel,
};

fn business_days(start: NaiveDate, count: usize) -> Vec<NaiveDate> {
    let mut dates = Vec::with_capacity(count);
    let mut day = start;
    while dates.len() < count {
        if !matches!(day.weekday(), Weekday::Sat | Weekday::Sun) {
            dates.push(day);
        }
        day = day + Days::new(1);
    }
    dates
}

fn synthetic(count: usize, seed: f64, name: Option<&str>) -> ReturnSeries {
    let start = NaiveDate::from_ymd_opt(2020, 1, 2).unwrap();
    let values = (0..count)
        .map(|i| {
            let t = i as f64;
            0.0004 + 0.012 * (t * 0.37 + seed).sin() + 0.006 * (t * 0.11 + seed * 2.0).cos()
        })
        .collect();
    ReturnSeries::new(business_days(start, count), values, name.map(str::to_string)).unwrap()
}

fn strategy() -> ReturnSeries {
    synthetic(600, 0.3, Some("Alpha"))
}

fn benchmark() -> ReturnSeries {
    synthetic(600, 1.7, Some("spy"))
}

fn suptitle(fig: &Figure) -> &str {
    fig.suptitle.as_ref().map(|t| t.text.as_str()).unwrap_or_default()
}

fn built(result: Result<Option<Figure>, ChartError>) -> Figure {
    result.unwrap().expect("figure is returned when show is off")
}

#[test]
fn every_chart_returns_its_figure() {
    let r = strategy();
    let b = benchmark();
    let opts = PlotOptions::default();

    let figures = vec![
        (built(quantstats_plots::snapshot(&r, Mode::Compounded, &opts)), "Portfolio Summary"),
        (built(quantstats_plots::earnings(&r, 100_000.0, Mode::Compounded, &opts)), "Portfolio Earnings"),
        (
            built(quantstats_plots::returns(&r, Some(&b), &CurveOptions::default(), &opts)),
            "Cumulative Returns vs SPY",
        ),
        (
            built(quantstats_plots::log_returns(&r, None, &CurveOptions::default(), &opts)),
            "Cumulative Returns (Log Scaled)",
        ),
        (built(quantstats_plots::daily_returns(&r, false, &opts)), "Daily Returns"),
        (built(quantstats_plots::yearly_returns(&r, Some(&b), true, &opts)), "EOY Returns  vs Benchmark"),
        (built(quantstats_plots::distribution(&r, true, &opts)), "Return Quantiles"),
        (
            built(quantstats_plots::histogram(&r, Period::Monthly, true, &opts)),
            "Distribution of Monthly Returns",
        ),
        (built(quantstats_plots::drawdown(&r, false, &opts)), "Underwater Plot"),
        (
            built(quantstats_plots::drawdowns_periods(&r, 5, true, false, &opts)),
            "Worst 5 Drawdown Periods",
        ),
        (
            built(quantstats_plots::rolling_beta(&r, &b, &BetaWindows::default(), &opts)),
            "Rolling Beta to Benchmark",
        ),
        (
            built(quantstats_plots::rolling_volatility(&r, Some(&b), &RollingWindow::default(), &opts)),
            "Rolling Volatility (6-Months)",
        ),
        (
            built(quantstats_plots::rolling_sharpe(&r, None, 0.0, &RollingWindow::default(), &opts)),
            "Rolling Sharpe (6-Months)",
        ),
        (
            built(quantstats_plots::rolling_sortino(&r, None, 0.02, &RollingWindow::twelve_months(), &opts)),
            "Rolling Sortino (12-Months)",
        ),
    ];

    for (fig, title) in &figures {
        assert_eq!(suptitle(fig), *title);
        assert!(!fig.axes.is_empty());
        assert!(fig.to_svg().contains(title.replace('&', "&amp;").as_str()));
    }
}

#[test]
fn snapshot_stacks_three_panels() {
    let fig = built(quantstats_plots::snapshot(&strategy(), Mode::Compounded, &PlotOptions::default()));
    assert_eq!(fig.axes.len(), 3);
    assert_eq!(fig.height_ratios, vec![3.0, 1.0, 1.0]);
    assert!(!fig.axes[0].show_xticklabels);
    assert!(fig.axes[2].show_xticklabels);

    let subtitle = &fig.axes[0].subtitle.as_ref().unwrap().text;
    assert!(subtitle.contains(";  Sharpe: "), "{subtitle}");

    let labels: Vec<_> = fig.axes.iter().map(|ax| ax.ylabel.clone()).collect();
    assert_eq!(
        labels,
        vec![
            Some("Cumulative Return".to_string()),
            Some("Drawdown".to_string()),
            Some("Daily Return".to_string()),
        ]
    );

    let hidden = PlotOptions::default().with_ylabel(YLabel::Hidden);
    let fig = built(quantstats_plots::snapshot(&strategy(), Mode::Summed, &hidden));
    assert!(fig.axes.iter().all(|ax| ax.ylabel.is_none()));
}

#[test]
fn snapshot_drawdown_panel_never_rises_above_zero() {
    let fig = built(quantstats_plots::snapshot(&strategy(), Mode::Compounded, &PlotOptions::default()));
    let dd = fig.axes[1].lines().next().unwrap();
    assert_eq!(dd.ys[0], 0.0);
    assert!(dd.ys.iter().all(|v| *v <= 0.0));
}

#[test]
fn earnings_reports_profit_and_marks_peak() {
    let fig = built(quantstats_plots::earnings(
        &strategy(),
        100_000.0,
        Mode::Compounded,
        &PlotOptions::default(),
    ));
    let axes = &fig.axes[0];
    assert_eq!(axes.ylabel.as_deref(), Some("Value of  $100,000"));
    let subtitle = &axes.subtitle.as_ref().unwrap().text;
    assert!(subtitle.contains("P&L: "), "{subtitle}");
    assert!(matches!(axes.artists[0], Artist::Markers(_)));

    let curve = axes.lines().next().unwrap();
    assert_eq!(curve.ys[0], 100_000.0);
    assert_eq!(curve.ys.len(), strategy().len() + 1);
}

#[test]
fn volatility_matching_needs_a_benchmark() {
    let curve = CurveOptions::default().with_match_volatility(true);
    let err = quantstats_plots::returns(&strategy(), None, &curve, &PlotOptions::default()).unwrap_err();
    assert!(matches!(err, ChartError::MissingBenchmark(_)));

    let fig = built(quantstats_plots::returns(
        &strategy(),
        Some(&benchmark()),
        &curve,
        &PlotOptions::default(),
    ));
    assert_eq!(suptitle(&fig), "Cumulative Returns vs SPY (Volatility Matched)");
}

#[test]
fn rolling_statistics_start_after_a_full_window() {
    let window = RollingWindow::new(20, "1-Month");
    let fig = built(quantstats_plots::rolling_volatility(
        &strategy(),
        None,
        &window,
        &PlotOptions::default(),
    ));
    let line = fig.axes[0].lines().next().unwrap();
    assert!(line.ys[..19].iter().all(|v| v.is_nan()));
    assert!(line.ys[19..].iter().all(|v| v.is_finite()));
}

#[test]
fn monthly_heatmap_has_one_cell_per_month() {
    let r = strategy();
    let fig = built(quantstats_plots::monthly_heatmap(
        &r,
        &HeatmapOptions::default().with_eoy(true),
        &PlotOptions::default(),
    ));
    assert!(fig.suptitle.is_none());
    let axes = &fig.axes[0];
    assert_eq!(axes.title.as_ref().unwrap().text, "Monthly Returns (%)");
    assert_eq!(axes.ylabel.as_deref(), Some("Years"));
    assert!(axes.colorbar.is_some());

    let mut months: Vec<(i32, u32)> = r.dates.iter().map(|d| (d.year(), d.month())).collect();
    months.dedup();
    match &axes.artists[0] {
        Artist::Heatmap(hm) => {
            let monthly: usize = hm
                .cells
                .iter()
                .map(|row| row[..12].iter().filter(|c| c.is_some()).count())
                .sum();
            assert_eq!(monthly, months.len());
            assert!(hm.cells.iter().all(|row| row.len() == 13));
        }
        other => panic!("expected a heatmap, got {other:?}"),
    }

    let alias = built(quantstats_plots::monthly_returns(
        &r,
        &HeatmapOptions::default().with_cbar(false),
        &PlotOptions::default(),
    ));
    assert!(alias.axes[0].colorbar.is_none());
    assert!(alias.figsize.0 < fig.figsize.0);
}

#[test]
fn grayscale_changes_colours_only() {
    let r = strategy();
    let b = benchmark();
    let render = |grayscale: bool| {
        let opts = PlotOptions::default().with_grayscale(grayscale);
        let figures = vec![
            built(quantstats_plots::snapshot(&r, Mode::Compounded, &opts)),
            built(quantstats_plots::returns(&r, Some(&b), &CurveOptions::default(), &opts)),
            built(quantstats_plots::histogram(&r, Period::Weekly, true, &opts)),
            built(quantstats_plots::monthly_heatmap(&r, &HeatmapOptions::default(), &opts)),
        ];
        figures
            .iter()
            .map(|fig| {
                DisplayList::record(fig)
                    .items
                    .iter()
                    .map(|p| p.geometry())
                    .collect::<Vec<_>>()
            })
            .collect::<Vec<_>>()
    };

    assert_eq!(render(false), render(true));
}

#[test]
fn custom_options_override_defaults() {
    let opts = PlotOptions::default()
        .with_title("My Drawdown")
        .with_figsize(6.0, 3.0)
        .with_subtitle(false)
        .with_ylabel(YLabel::Custom("Underwater".into()));
    let fig = built(quantstats_plots::drawdown(&strategy(), false, &opts));
    assert_eq!(suptitle(&fig), "My Drawdown");
    assert_eq!(fig.figsize, (6.0, 3.0));
    assert!(fig.axes[0].subtitle.is_none());
    assert_eq!(fig.axes[0].ylabel.as_deref(), Some("Underwater"));
}

#[test]
fn savefig_writes_requested_formats() {
    let dir = tempfile::tempdir().unwrap();
    let r = strategy();

    for name in ["yearly.svg", "yearly.html", "yearly.png"] {
        let path = dir.path().join(name);
        let opts = PlotOptions::default().with_savefig(&path);
        let fig = quantstats_plots::yearly_returns(&r, None, true, &opts).unwrap();
        assert!(fig.is_some());
        let meta = std::fs::metadata(&path).unwrap();
        assert!(meta.len() > 0, "{name} is empty");
    }

    let pdf = PlotOptions::default().with_savefig(dir.path().join("yearly.pdf"));
    let err = quantstats_plots::yearly_returns(&r, None, true, &pdf).unwrap_err();
    assert!(matches!(err, ChartError::UnsupportedFormat(_)));
}

#[test]
fn options_load_from_json() {
    let opts = PlotOptions::from_json(r#"{"grayscale": true, "title": "From JSON", "lw": 2.5}"#).unwrap();
    let fig = built(quantstats_plots::daily_returns(&strategy(), false, &opts));
    assert_eq!(suptitle(&fig), "From JSON");
    let line = fig.axes[0].lines().next().unwrap();
    assert_eq!(line.stroke.width, 2.5);
}

#[test]
fn drawdown_marks_its_average() {
    let fig = built(quantstats_plots::drawdown(&strategy(), false, &PlotOptions::default()));
    let average = fig.axes[0]
        .hlines()
        .find(|line| line.label.as_deref() == Some("Average"))
        .expect("average line");
    assert!(average.value < 0.0);
    assert!(average.stroke.dash);

    let list = DisplayList::record(&fig);
    assert!(list.texts().any(|t| t == "Underwater Plot"));
    assert!(list.texts().any(|t| t == "Average"));
}

#[test]
fn resampled_simple_returns_have_one_point_per_month() {
    let curve = CurveOptions::default()
        .with_compound(false)
        .with_cumulative(false)
        .with_resample(Period::Monthly);
    let fig = built(quantstats_plots::returns(&strategy(), None, &curve, &PlotOptions::default()));
    assert_eq!(suptitle(&fig), "Returns");

    let mut months: Vec<(i32, u32)> = strategy().dates.iter().map(|d| (d.year(), d.month())).collect();
    months.dedup();
    let line = fig.axes[0].lines().next().unwrap();
    assert_eq!(line.ys.len(), months.len());
}

#[test]
fn snapshot_cumulative_panel_sums_daily_changes() {
    let start = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
    let series = ReturnSeries::new(
        business_days(start, 4),
        vec![0.10, 0.10, 0.10, -0.05],
        None,
    )
    .unwrap();

    for mode in [Mode::Compounded, Mode::Summed] {
        let fig = built(quantstats_plots::snapshot(&series, mode, &PlotOptions::default()));
        let curve = fig.axes[0].lines().next().unwrap();
        let expected = [0.0, 10.0, 20.0, 30.0, 25.0];
        assert_eq!(curve.ys.len(), expected.len());
        for (got, want) in curve.ys.iter().zip(expected) {
            approx::assert_relative_eq!(*got, want, epsilon = 1e-9);
        }
    }
}

#[test]
fn rolling_ratios_subtract_rf_per_period_and_scale_by_window() {
    let r = strategy();
    let rf = 0.01;
    let window = RollingWindow::new(20, "1-Month");
    let at = 30;
    let excess: Vec<f64> = r.values[at + 1 - 20..=at].iter().map(|v| v - rf).collect();
    let avg = excess.iter().sum::<f64>() / excess.len() as f64;
    let scale = 20f64.sqrt();

    let sharpe = built(quantstats_plots::rolling_sharpe(&r, None, rf, &window, &PlotOptions::default()));
    let line = sharpe.axes[0].lines().next().unwrap();
    let expected = avg / quantstats_plots::stats::std_dev(&excess) * scale;
    approx::assert_relative_eq!(line.ys[at], expected, epsilon = 1e-9);
    assert!(line.ys[at] < 0.0);

    let sortino = built(quantstats_plots::rolling_sortino(&r, None, rf, &window, &PlotOptions::default()));
    let line = sortino.axes[0].lines().next().unwrap();
    let down: f64 = excess.iter().filter(|v| **v < 0.0).map(|v| v * v).sum();
    let expected = avg / (down / excess.len() as f64).sqrt() * scale;
    approx::assert_relative_eq!(line.ys[at], expected, epsilon = 1e-9);
}
