use std::path::Path;

use chrono::NaiveDate;
use quantstats_plots::{
    BetaWindows, CurveOptions, HeatmapOptions, Mode, Period, PlotOptions, ReturnSeries,
    RollingWindow,
};
use tracing_subscriber::EnvFilter;

fn fake_series(name: &str, days: u64, phase: f64) -> Result<ReturnSeries, Box<dyn std::error::Error>> {
    let start = NaiveDate::from_ymd_opt(2021, 1, 4).expect("valid date");
    let mut dates = Vec::new();
    let mut returns = Vec::new();

    for i in 0..days {
        dates.push(start + chrono::Days::new(i));

        // Small drift plus two overlapping cycles
        let t = i as f64;
        returns.push(0.0005 + 0.011 * (t * 0.29 + phase).sin() + 0.004 * (t * 0.07).cos());
    }

    Ok(ReturnSeries::new(dates, returns, Some(name.to_string()))?)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let strategy = fake_series("Demo Strategy", 900, 0.0)?;
    let benchmark = fake_series("SPY", 900, 1.3)?;

    let out = Path::new("charts");
    std::fs::create_dir_all(out)?;
    let save = |name: &str| PlotOptions::default().with_savefig(out.join(name));

    quantstats_plots::snapshot(&strategy, Mode::Compounded, &save("snapshot.svg"))?;
    quantstats_plots::earnings(&strategy, 100_000.0, Mode::Compounded, &save("earnings.svg"))?;
    quantstats_plots::returns(
        &strategy,
        Some(&benchmark),
        &CurveOptions::default(),
        &save("returns.svg"),
    )?;
    quantstats_plots::log_returns(
        &strategy,
        Some(&benchmark),
        &CurveOptions::default().with_match_volatility(true),
        &save("log_returns.svg"),
    )?;
    quantstats_plots::daily_returns(&strategy, false, &save("daily_returns.svg"))?;
    quantstats_plots::yearly_returns(&strategy, Some(&benchmark), true, &save("yearly_returns.svg"))?;
    quantstats_plots::distribution(&strategy, true, &save("distribution.svg"))?;
    quantstats_plots::histogram(&strategy, Period::Monthly, true, &save("histogram.svg"))?;
    quantstats_plots::drawdown(&strategy, false, &save("drawdown.svg"))?;
    quantstats_plots::drawdowns_periods(&strategy, 5, true, false, &save("drawdowns_periods.svg"))?;
    quantstats_plots::rolling_beta(&strategy, &benchmark, &BetaWindows::default(), &save("rolling_beta.svg"))?;
    quantstats_plots::rolling_volatility(
        &strategy,
        Some(&benchmark),
        &RollingWindow::default(),
        &save("rolling_volatility.svg"),
    )?;
    quantstats_plots::rolling_sharpe(&strategy, None, 0.0, &RollingWindow::default(), &save("rolling_sharpe.svg"))?;
    quantstats_plots::rolling_sortino(&strategy, None, 0.0, &RollingWindow::default(), &save("rolling_sortino.svg"))?;
    quantstats_plots::monthly_heatmap(
        &strategy,
        &HeatmapOptions::default().with_eoy(true),
        &save("monthly_heatmap.html"),
    )?;
    quantstats_plots::monthly_returns(
        &strategy,
        &HeatmapOptions::default(),
        &save("monthly_returns.png").with_grayscale(true),
    )?;

    println!("Wrote charts to {}", out.display());
    Ok(())
}
