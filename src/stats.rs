use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};

use crate::utils::ReturnSeries;

/// Cumulative compounded return: `cumprod(1 + r) - 1`. Missing values carry
/// the previous level forward.
pub fn compsum(returns: &[f64]) -> Vec<f64> {
    let mut out = Vec::with_capacity(returns.len());
    let mut eq = 1.0_f64;
    for r in returns {
        if r.is_finite() {
            eq *= 1.0 + *r;
        }
        out.push(eq - 1.0);
    }
    out
}

/// Cumulative simple return.
pub fn cumsum(returns: &[f64]) -> Vec<f64> {
    let mut out = Vec::with_capacity(returns.len());
    let mut acc = 0.0_f64;
    for r in returns {
        if r.is_finite() {
            acc += *r;
        }
        out.push(acc);
    }
    out
}

/// Total compounded return of a slice.
pub fn comp(returns: &[f64]) -> f64 {
    returns
        .iter()
        .filter(|v| v.is_finite())
        .fold(1.0, |acc, r| acc * (1.0 + r))
        - 1.0
}

pub fn mean(values: &[f64]) -> Option<f64> {
    let clean: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if clean.is_empty() {
        None
    } else {
        Some(clean.iter().sum::<f64>() / clean.len() as f64)
    }
}

/// Sample standard deviation (ddof = 1) of the finite values.
pub fn std_dev(values: &[f64]) -> f64 {
    let clean: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if clean.len() < 2 {
        return 0.0;
    }

    let n = clean.len() as f64;
    let m = clean.iter().sum::<f64>() / n;
    let var = clean
        .iter()
        .map(|x| {
            let d = x - m;
            d * d
        })
        .sum::<f64>()
        / (n - 1.0);
    var.sqrt()
}

/// Annualized Sharpe ratio of per-period returns. `rf` is annual.
pub fn sharpe(returns: &[f64], rf: f64, periods_per_year: u32) -> f64 {
    let vals: Vec<f64> = returns.iter().copied().filter(|v| v.is_finite()).collect();
    if vals.len() < 2 {
        return 0.0;
    }

    let rf_per_period = if rf != 0.0 {
        (1.0 + rf).powf(1.0 / periods_per_year as f64) - 1.0
    } else {
        0.0
    };

    let excess: Vec<f64> = vals.into_iter().map(|r| r - rf_per_period).collect();
    let n = excess.len() as f64;
    let m = excess.iter().sum::<f64>() / n;
    let std = std_dev(&excess);

    if std == 0.0 {
        0.0
    } else {
        m / std * (periods_per_year as f64).sqrt()
    }
}

/// Percentage decline of the compounded curve from its running peak.
///
/// The running peak starts at the first observation, so the first value is
/// always zero and every value is `<= 0`.
pub fn to_drawdown_series(returns: &ReturnSeries) -> ReturnSeries {
    let equity: Vec<f64> = compsum(&returns.values).into_iter().map(|v| v + 1.0).collect();

    let mut peak = f64::NEG_INFINITY;
    let mut drawdowns = Vec::with_capacity(equity.len());
    for e in equity {
        if e > peak {
            peak = e;
        }
        let dd = e / peak - 1.0;
        // -0.0 and non-finite values (a wiped-out peak) read as flat.
        drawdowns.push(if dd.is_finite() && dd < 0.0 { dd } else { 0.0 });
    }

    returns.with_values(drawdowns)
}

#[derive(Clone, Debug, PartialEq)]
pub struct Drawdown {
    pub start: NaiveDate,
    pub valley: NaiveDate,
    /// Recovery date, or the last date for a drawdown still open.
    pub end: NaiveDate,
    /// Calendar days from start to end, inclusive.
    pub days: i64,
    /// Depth as a negative fraction (e.g. -0.25 for -25%)
    pub max_drawdown: f64,
}

/// Every drawdown period, from the first underwater observation until the
/// curve regains its peak (or the series ends).
pub fn drawdown_details(returns: &ReturnSeries) -> Vec<Drawdown> {
    let dd = to_drawdown_series(returns);
    let n = dd.values.len();

    let mut segments = Vec::new();
    let mut open: Option<(usize, usize, f64)> = None;

    for (i, &value) in dd.values.iter().enumerate() {
        match open {
            None => {
                if value < 0.0 {
                    open = Some((i, i, value));
                }
            }
            Some((start, mut valley, mut depth)) => {
                if value < depth {
                    depth = value;
                    valley = i;
                }
                if value >= 0.0 {
                    segments.push(make_drawdown(&dd.dates, start, valley, i, depth));
                    open = None;
                } else {
                    open = Some((start, valley, depth));
                }
            }
        }
    }

    if let Some((start, valley, depth)) = open {
        segments.push(make_drawdown(&dd.dates, start, valley, n - 1, depth));
    }

    segments
}

fn make_drawdown(dates: &[NaiveDate], start: usize, valley: usize, end: usize, depth: f64) -> Drawdown {
    Drawdown {
        start: dates[start],
        valley: dates[valley],
        end: dates[end],
        days: (dates[end] - dates[start]).num_days() + 1,
        max_drawdown: depth,
    }
}

/// The `top_n` longest drawdown periods, in chronological order.
pub fn longest_drawdowns(returns: &ReturnSeries, top_n: usize) -> Vec<Drawdown> {
    let mut segments = drawdown_details(returns);
    segments.sort_by(|a, b| b.days.cmp(&a.days).then(a.start.cmp(&b.start)));
    segments.truncate(top_n);
    segments.sort_by_key(|d| d.start);
    segments
}

/// Apply `f` over every full window ending at each position. Positions
/// before the first full window are NaN.
fn rolling_apply(values: &[f64], window: usize, f: impl Fn(&[f64]) -> f64) -> Vec<f64> {
    let mut out = vec![f64::NAN; values.len()];
    if window == 0 || values.len() < window {
        return out;
    }

    for end in window - 1..values.len() {
        let start = end + 1 - window;
        out[end] = f(&values[start..=end]);
    }
    out
}

/// Rolling sample standard deviation, annualized by `sqrt(periods_per_year)`.
pub fn rolling_volatility(returns: &[f64], window: usize, periods_per_year: u32) -> Vec<f64> {
    let ann = (periods_per_year as f64).sqrt();
    rolling_apply(returns, window, |win| std_dev(win) * ann)
}

/// Rolling mean over standard deviation of (already excess) returns,
/// scaled by `sqrt(window)`.
pub fn rolling_sharpe(returns: &[f64], window: usize) -> Vec<f64> {
    let ann = (window as f64).sqrt();
    rolling_apply(returns, window, |win| {
        let std = std_dev(win);
        match mean(win) {
            Some(m) if std > 0.0 => m / std * ann,
            _ => 0.0,
        }
    })
}

/// Rolling mean over downside deviation of (already excess) returns,
/// scaled by `sqrt(window)`.
pub fn rolling_sortino(returns: &[f64], window: usize) -> Vec<f64> {
    let ann = (window as f64).sqrt();
    rolling_apply(returns, window, |win| {
        let clean: Vec<f64> = win.iter().copied().filter(|v| v.is_finite()).collect();
        if clean.len() < 2 {
            return 0.0;
        }
        let n = clean.len() as f64;
        let m = clean.iter().sum::<f64>() / n;
        let sum_sq_down: f64 = clean.iter().filter(|x| **x < 0.0).map(|x| x * x).sum();
        if sum_sq_down == 0.0 {
            return 0.0;
        }
        let downside = (sum_sq_down / n).sqrt();
        m / downside * ann
    })
}

/// Rolling `cov(returns, benchmark) / var(benchmark)`.
pub fn rolling_beta(returns: &[f64], benchmark: &[f64], window: usize) -> Vec<f64> {
    let len = returns.len().min(benchmark.len());
    let mut out = vec![f64::NAN; returns.len()];
    if window == 0 || len < window {
        return out;
    }

    for end in window - 1..len {
        let start = end + 1 - window;
        let pairs: Vec<(f64, f64)> = (start..=end)
            .map(|i| (returns[i], benchmark[i]))
            .filter(|(s, b)| s.is_finite() && b.is_finite())
            .collect();
        if pairs.len() < 2 {
            out[end] = 0.0;
            continue;
        }

        let n = pairs.len() as f64;
        let mean_s = pairs.iter().map(|(s, _)| s).sum::<f64>() / n;
        let mean_b = pairs.iter().map(|(_, b)| b).sum::<f64>() / n;
        let mut cov = 0.0_f64;
        let mut var_b = 0.0_f64;
        for (s, b) in &pairs {
            let ds = *s - mean_s;
            let db = *b - mean_b;
            cov += ds * db;
            var_b += db * db;
        }
        out[end] = if var_b == 0.0 { 0.0 } else { cov / var_b };
    }
    out
}

/// Year-by-month return grid.
#[derive(Clone, Debug, PartialEq)]
pub struct MonthlyReturns {
    pub years: Vec<i32>,
    /// One row per year; `None` marks months outside the series' date range.
    pub cells: Vec<[Option<f64>; 12]>,
    /// Full-year return per row, when requested.
    pub eoy: Option<Vec<f64>>,
}

impl MonthlyReturns {
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            years: self.years.clone(),
            cells: self
                .cells
                .iter()
                .map(|row| row.map(|cell| cell.map(|v| v * factor)))
                .collect(),
            eoy: self
                .eoy
                .as_ref()
                .map(|eoy| eoy.iter().map(|v| v * factor).collect()),
        }
    }

    pub fn defined_cells(&self) -> usize {
        self.cells.iter().flatten().filter(|c| c.is_some()).count()
    }
}

/// Pivot returns into a year × month grid, compounded or summed per month.
pub fn monthly_returns(returns: &ReturnSeries, eoy: bool, compounded: bool) -> MonthlyReturns {
    let Some((first, last)) = returns.date_range() else {
        return MonthlyReturns {
            years: Vec::new(),
            cells: Vec::new(),
            eoy: eoy.then(Vec::new),
        };
    };

    let mut grouped: BTreeMap<(i32, u32), Vec<f64>> = BTreeMap::new();
    for (date, r) in returns.dates.iter().zip(&returns.values) {
        if r.is_finite() {
            grouped.entry((date.year(), date.month())).or_default().push(*r);
        }
    }

    let reduce = |vals: &[f64]| {
        if compounded {
            comp(vals)
        } else {
            vals.iter().sum()
        }
    };

    let first_key = (first.year(), first.month());
    let last_key = (last.year(), last.month());
    let years: Vec<i32> = (first.year()..=last.year()).collect();

    let mut cells = Vec::with_capacity(years.len());
    let mut yearly = Vec::with_capacity(years.len());
    for year in &years {
        let mut row = [None; 12];
        for (idx, cell) in row.iter_mut().enumerate() {
            let key = (*year, idx as u32 + 1);
            if key < first_key || key > last_key {
                continue;
            }
            *cell = Some(grouped.get(&key).map(|v| reduce(v.as_slice())).unwrap_or(0.0));
        }
        cells.push(row);

        let year_values: Vec<f64> = returns
            .dates
            .iter()
            .zip(&returns.values)
            .filter(|(d, _)| d.year() == *year)
            .map(|(_, r)| *r)
            .filter(|r| r.is_finite())
            .collect();
        yearly.push(reduce(year_values.as_slice()));
    }

    MonthlyReturns {
        years,
        cells,
        eoy: eoy.then_some(yearly),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn daily(values: &[f64]) -> ReturnSeries {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let dates = (0..values.len())
            .map(|i| start + chrono::Days::new(i as u64))
            .collect();
        ReturnSeries::new(dates, values.to_vec(), None).unwrap()
    }

    #[test]
    fn cumulative_curves_match_independent_reconstruction() {
        let values = [0.01, -0.02, 0.03, f64::NAN, 0.005];

        let mut product = 1.0;
        let mut total = 0.0;
        for (i, r) in values.iter().enumerate() {
            if r.is_finite() {
                product *= 1.0 + r;
                total += r;
            }
            assert_relative_eq!(compsum(&values)[i], product - 1.0, epsilon = 1e-12);
            assert_relative_eq!(cumsum(&values)[i], total, epsilon = 1e-12);
        }
        assert_relative_eq!(comp(&values), product - 1.0, epsilon = 1e-12);
    }

    #[test]
    fn drawdown_starts_at_zero_and_stays_non_positive() {
        let series = daily(&[-0.05, 0.02, -0.10, 0.30, -0.01]);
        let dd = to_drawdown_series(&series);
        assert_eq!(dd.values[0], 0.0);
        assert!(dd.values.iter().all(|v| *v <= 0.0));
        assert_relative_eq!(dd.values[2], -0.10, epsilon = 1e-12);
        assert_eq!(dd.values[3], 0.0);
    }

    #[test]
    fn drawdown_details_finds_recovered_and_open_periods() {
        let series = daily(&[0.01, -0.05, -0.05, 0.20, 0.0, -0.02, 0.01]);
        let periods = drawdown_details(&series);
        assert_eq!(periods.len(), 2);

        assert_eq!(periods[0].start, series.dates[1]);
        assert_eq!(periods[0].valley, series.dates[2]);
        assert_eq!(periods[0].end, series.dates[3]);
        assert_eq!(periods[0].days, 3);
        assert_relative_eq!(periods[0].max_drawdown, 0.95 * 0.95 - 1.0, epsilon = 1e-12);

        assert_eq!(periods[1].start, series.dates[5]);
        assert_eq!(periods[1].end, series.dates[6]);

        let longest = longest_drawdowns(&series, 1);
        assert_eq!(longest, vec![periods[0].clone()]);
    }

    #[test]
    fn rolling_windows_are_undefined_until_full() {
        let values: Vec<f64> = (0..20).map(|i| ((i * 7) % 5) as f64 / 100.0 - 0.02).collect();
        let bench: Vec<f64> = values.iter().map(|v| v * 0.5 + 0.001).collect();
        let window = 6;

        for rolled in [
            rolling_volatility(&values, window, 252),
            rolling_sharpe(&values, window),
            rolling_sortino(&values, window),
            rolling_beta(&values, &bench, window),
        ] {
            assert_eq!(rolled.len(), values.len());
            assert!(rolled[..window - 1].iter().all(|v| v.is_nan()));
            assert!(rolled[window - 1..].iter().all(|v| v.is_finite()));
        }

        let beta = rolling_beta(&values, &bench, window);
        assert_relative_eq!(beta[window], 2.0, epsilon = 1e-9);
    }

    #[test]
    fn rolling_volatility_matches_sample_std() {
        let values = [0.01, 0.03, -0.02, 0.04];
        let vol = rolling_volatility(&values, 4, 252);
        let expected = std_dev(&values) * 252f64.sqrt();
        assert_relative_eq!(vol[3], expected, epsilon = 1e-12);
    }

    #[test]
    fn rolling_ratios_scale_by_window_length() {
        let values = [0.02, -0.01, 0.015, -0.005, 0.01, 0.03];
        let window = 4;
        let last = &values[2..];

        let sharpe = rolling_sharpe(&values, window);
        assert_relative_eq!(sharpe[5], 0.0125 / std_dev(last) * 2.0, epsilon = 1e-12);

        let sortino = rolling_sortino(&values, window);
        let downside = (0.005f64 * 0.005 / 4.0).sqrt();
        assert_relative_eq!(sortino[5], 0.0125 / downside * 2.0, epsilon = 1e-12);
    }

    #[test]
    fn window_longer_than_series_is_all_nan() {
        assert!(rolling_volatility(&[0.01, 0.02], 5, 252).iter().all(|v| v.is_nan()));
    }

    #[test]
    fn monthly_pivot_has_one_cell_per_month_in_range() {
        let start = NaiveDate::from_ymd_opt(2023, 11, 15).unwrap();
        let dates: Vec<NaiveDate> = (0..120).map(|i| start + chrono::Days::new(i)).collect();
        let values = vec![0.001; dates.len()];
        let series = ReturnSeries::new(dates, values, None).unwrap();

        let table = monthly_returns(&series, true, true);
        assert_eq!(table.years, vec![2023, 2024]);
        // Nov 2023 .. Mar 2024
        assert_eq!(table.defined_cells(), 5);
        assert!(table.cells[0][9].is_none());
        assert!(table.cells[0][10].is_some());
        assert!(table.cells[1][2].is_some());
        assert!(table.cells[1][3].is_none());

        let jan = table.cells[1][0].unwrap();
        assert_relative_eq!(jan, 1.001f64.powi(31) - 1.0, epsilon = 1e-12);
        assert_eq!(table.eoy.as_ref().map(Vec::len), Some(2));

        let summed = monthly_returns(&series, false, false);
        assert_relative_eq!(summed.cells[1][0].unwrap(), 0.031, epsilon = 1e-12);
        assert!(summed.eoy.is_none());
    }
}
