use std::collections::BTreeMap;

use chrono::{Datelike, Days, NaiveDate};
use strum_macros::{Display, EnumString};

use crate::error::DataError;

#[derive(Clone, Debug, PartialEq)]
pub struct ReturnSeries {
    pub dates: Vec<NaiveDate>,
    pub values: Vec<f64>,
    pub name: Option<String>,
}

impl ReturnSeries {
    pub fn new(
        dates: Vec<NaiveDate>,
        values: Vec<f64>,
        name: Option<String>,
    ) -> Result<Self, DataError> {
        if dates.is_empty() || values.is_empty() {
            return Err(DataError::Empty);
        }

        if dates.len() != values.len() {
            return Err(DataError::LengthMismatch {
                dates: dates.len(),
                values: values.len(),
            });
        }

        let mut paired: Vec<(NaiveDate, f64)> = dates.into_iter().zip(values).collect();
        paired.sort_by_key(|(d, _)| *d);

        if let Some(w) = paired.windows(2).find(|w| w[0].0 == w[1].0) {
            return Err(DataError::DuplicateDate(w[0].0));
        }

        let (sorted_dates, sorted_values): (Vec<_>, Vec<_>) = paired.into_iter().unzip();

        Ok(Self {
            dates: sorted_dates,
            values: sorted_values,
            name,
        })
    }

    /// Same index and name, new values. Lengths must already agree.
    pub(crate) fn with_values(&self, values: Vec<f64>) -> Self {
        debug_assert_eq!(values.len(), self.dates.len());
        Self {
            dates: self.dates.clone(),
            values,
            name: self.name.clone(),
        }
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        Some((*self.dates.first()?, *self.dates.last()?))
    }

    pub fn label(&self, fallback: &str) -> String {
        self.name.clone().unwrap_or_else(|| fallback.to_string())
    }
}

/// How periodic returns accumulate into a portfolio value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, EnumString, Display)]
#[strum(ascii_case_insensitive)]
pub enum Mode {
    #[default]
    #[strum(to_string = "comp", serialize = "compounded")]
    Compounded,
    #[strum(to_string = "sum", serialize = "simple")]
    Summed,
}

/// Resampling target frequency, parsed from pandas-style aliases.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumString, Display)]
#[strum(ascii_case_insensitive)]
pub enum Period {
    #[strum(to_string = "D")]
    Daily,
    #[strum(to_string = "W")]
    Weekly,
    #[strum(to_string = "M", serialize = "ME")]
    Monthly,
    #[strum(to_string = "Q", serialize = "QE")]
    Quarterly,
    #[strum(to_string = "A", serialize = "Y", serialize = "YE")]
    Annual,
}

impl Period {
    pub(crate) fn key(self, date: &NaiveDate) -> (i32, u32) {
        match self {
            Period::Daily => (date.year(), date.ordinal()),
            Period::Weekly => {
                let iso = date.iso_week();
                (iso.year(), iso.week())
            }
            Period::Monthly => (date.year(), date.month()),
            Period::Quarterly => (date.year(), (date.month() - 1) / 3 + 1),
            Period::Annual => (date.year(), 0),
        }
    }

    /// Adjective used in histogram titles, with a trailing space. Daily
    /// data is the unqualified case.
    pub fn title_prefix(self) -> &'static str {
        match self {
            Period::Daily => "",
            Period::Weekly => "Weekly ",
            Period::Monthly => "Monthly ",
            Period::Quarterly => "Quarterly ",
            Period::Annual => "Annual ",
        }
    }
}

/// Reduction applied to each resampled bucket.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Aggregation {
    Compound,
    Sum,
    Last,
}

impl Aggregation {
    pub fn returns(compounded: bool) -> Self {
        if compounded {
            Aggregation::Compound
        } else {
            Aggregation::Sum
        }
    }
}

/// Replace missing values with zero and subtract the risk-free rate.
///
/// `rf` is annual when `nperiods` is given and de-annualized geometrically,
/// otherwise it is taken as a per-period rate.
pub fn prepare_returns(series: &ReturnSeries, rf: f64, nperiods: Option<u32>) -> ReturnSeries {
    let rf = match nperiods {
        Some(n) if rf != 0.0 && n > 0 => (1.0 + rf).powf(1.0 / n as f64) - 1.0,
        _ => rf,
    };

    let values = series
        .values
        .iter()
        .map(|v| if v.is_finite() { *v - rf } else { -rf })
        .collect();

    series.with_values(values)
}

/// Reindex a benchmark onto `index`; dates the benchmark lacks become zero.
pub fn prepare_benchmark(
    benchmark: &ReturnSeries,
    index: &[NaiveDate],
    rf: f64,
    nperiods: Option<u32>,
) -> ReturnSeries {
    let by_date: BTreeMap<NaiveDate, f64> = benchmark
        .dates
        .iter()
        .copied()
        .zip(benchmark.values.iter().copied())
        .collect();

    let aligned = ReturnSeries {
        dates: index.to_vec(),
        values: index
            .iter()
            .map(|d| by_date.get(d).copied().unwrap_or(0.0))
            .collect(),
        name: benchmark.name.clone(),
    };

    prepare_returns(&aligned, rf, nperiods)
}

/// Turn returns into a portfolio value curve starting at `start_balance`.
///
/// The curve carries one extra leading observation, dated the day before the
/// first return, holding the starting balance.
pub fn make_portfolio(returns: &ReturnSeries, start_balance: f64, mode: Mode) -> ReturnSeries {
    let mut dates = Vec::with_capacity(returns.len() + 1);
    let mut values = Vec::with_capacity(returns.len() + 1);

    if let Some(first) = returns.dates.first() {
        dates.push(first.checked_sub_days(Days::new(1)).unwrap_or(*first));
        values.push(start_balance);
    }

    let mut acc = match mode {
        Mode::Compounded => 1.0,
        Mode::Summed => 0.0,
    };
    for (date, r) in returns.dates.iter().zip(&returns.values) {
        let r = if r.is_finite() { *r } else { 0.0 };
        let value = match mode {
            Mode::Compounded => {
                acc *= 1.0 + r;
                start_balance * acc
            }
            Mode::Summed => {
                acc += r;
                start_balance + start_balance * acc
            }
        };
        dates.push(*date);
        values.push(value);
    }

    ReturnSeries {
        dates,
        values,
        name: returns.name.clone(),
    }
}

/// Period-over-period change; the first value is zero.
pub fn pct_change(values: &[f64]) -> Vec<f64> {
    let mut out = Vec::with_capacity(values.len());
    for (i, v) in values.iter().enumerate() {
        if i == 0 {
            out.push(0.0);
            continue;
        }
        let prev = values[i - 1];
        let change = *v / prev - 1.0;
        out.push(if change.is_finite() { change } else { 0.0 });
    }
    out
}

/// Group observations by `period` and reduce each bucket.
///
/// Each output point is dated with the last observation in its bucket.
pub fn resample(series: &ReturnSeries, period: Period, agg: Aggregation) -> ReturnSeries {
    let mut buckets: BTreeMap<(i32, u32), (NaiveDate, Vec<f64>)> = BTreeMap::new();
    for (date, value) in series.dates.iter().zip(&series.values) {
        let entry = buckets
            .entry(period.key(date))
            .or_insert_with(|| (*date, Vec::new()));
        entry.0 = *date;
        if value.is_finite() {
            entry.1.push(*value);
        }
    }

    let mut dates = Vec::with_capacity(buckets.len());
    let mut values = Vec::with_capacity(buckets.len());
    for (_, (date, vals)) in buckets {
        let reduced = match agg {
            Aggregation::Compound => vals.iter().fold(1.0, |acc, r| acc * (1.0 + r)) - 1.0,
            Aggregation::Sum => vals.iter().sum(),
            Aggregation::Last => vals.last().copied().unwrap_or(f64::NAN),
        };
        dates.push(date);
        values.push(reduced);
    }

    ReturnSeries {
        dates,
        values,
        name: series.name.clone(),
    }
}

/// Round `val` to the closest multiple of `res`, ties to even.
pub fn round_to_closest(val: f64, res: f64) -> f64 {
    if res == 0.0 || !val.is_finite() {
        return val;
    }
    (val / res).round_ties_even() * res
}

/// Evenly spaced values in `[start, stop)`.
pub fn arange(start: f64, stop: f64, step: f64) -> Vec<f64> {
    if step.is_nan() || step <= 0.0 || !start.is_finite() || !stop.is_finite() || start >= stop {
        return Vec::new();
    }
    let count = ((stop - start) / step).ceil() as usize;
    (0..count).map(|k| start + k as f64 * step).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn new_sorts_and_rejects_bad_input() {
        let series = ReturnSeries::new(
            vec![date(2024, 1, 3), date(2024, 1, 1), date(2024, 1, 2)],
            vec![0.3, 0.1, 0.2],
            None,
        )
        .unwrap();
        assert_eq!(series.values, vec![0.1, 0.2, 0.3]);

        assert_eq!(ReturnSeries::new(vec![], vec![], None), Err(DataError::Empty));
        assert_eq!(
            ReturnSeries::new(vec![date(2024, 1, 1)], vec![0.1, 0.2], None),
            Err(DataError::LengthMismatch { dates: 1, values: 2 })
        );
        assert_eq!(
            ReturnSeries::new(vec![date(2024, 1, 1), date(2024, 1, 1)], vec![0.1, 0.2], None),
            Err(DataError::DuplicateDate(date(2024, 1, 1)))
        );
    }

    #[test]
    fn parses_period_and_mode_aliases() {
        assert_eq!("M".parse::<Period>().unwrap(), Period::Monthly);
        assert_eq!("a".parse::<Period>().unwrap(), Period::Annual);
        assert_eq!("YE".parse::<Period>().unwrap(), Period::Annual);
        assert_eq!("comp".parse::<Mode>().unwrap(), Mode::Compounded);
        assert_eq!("SUM".parse::<Mode>().unwrap(), Mode::Summed);
        assert_eq!(Period::Quarterly.to_string(), "Q");
        assert!("fortnight".parse::<Period>().is_err());
    }

    #[test]
    fn prepare_returns_fills_gaps_and_subtracts_rf() {
        let series = ReturnSeries::new(
            vec![date(2024, 1, 1), date(2024, 1, 2)],
            vec![f64::NAN, 0.02],
            None,
        )
        .unwrap();
        let prepared = prepare_returns(&series, 0.01, None);
        assert_relative_eq!(prepared.values[0], -0.01);
        assert_relative_eq!(prepared.values[1], 0.01);

        let annual = prepare_returns(&series, 0.0, Some(252));
        assert_eq!(annual.values, vec![0.0, 0.02]);
    }

    #[test]
    fn benchmark_is_reindexed_to_returns() {
        let bench = ReturnSeries::new(
            vec![date(2024, 1, 2), date(2024, 1, 5)],
            vec![0.05, 0.07],
            Some("spy".into()),
        )
        .unwrap();
        let index = [date(2024, 1, 1), date(2024, 1, 2), date(2024, 1, 3)];
        let aligned = prepare_benchmark(&bench, &index, 0.0, None);
        assert_eq!(aligned.dates, index.to_vec());
        assert_eq!(aligned.values, vec![0.0, 0.05, 0.0]);
        assert_eq!(aligned.name.as_deref(), Some("spy"));
    }

    #[test]
    fn portfolio_prepends_start_balance() {
        let series = ReturnSeries::new(
            vec![date(2024, 1, 1), date(2024, 1, 2)],
            vec![0.1, -0.5],
            None,
        )
        .unwrap();
        let comp = make_portfolio(&series, 100.0, Mode::Compounded);
        assert_eq!(comp.dates[0], date(2023, 12, 31));
        assert_relative_eq!(comp.values[0], 100.0);
        assert_relative_eq!(comp.values[1], 110.0);
        assert_relative_eq!(comp.values[2], 55.0);

        let sum = make_portfolio(&series, 100.0, Mode::Summed);
        assert_relative_eq!(sum.values[2], 60.0);

        let back = pct_change(&comp.values);
        assert_relative_eq!(back[1], 0.1, epsilon = 1e-12);
        assert_relative_eq!(back[2], -0.5, epsilon = 1e-12);
    }

    #[test]
    fn resample_groups_by_period() {
        let series = ReturnSeries::new(
            vec![date(2023, 12, 29), date(2024, 1, 2), date(2024, 1, 3), date(2024, 2, 1)],
            vec![0.1, 0.1, 0.1, -0.2],
            None,
        )
        .unwrap();

        let monthly = resample(&series, Period::Monthly, Aggregation::Compound);
        assert_eq!(monthly.dates, vec![date(2023, 12, 29), date(2024, 1, 3), date(2024, 2, 1)]);
        assert_relative_eq!(monthly.values[1], 0.21, epsilon = 1e-12);

        let yearly = resample(&series, Period::Annual, Aggregation::Sum);
        assert_eq!(yearly.len(), 2);
        assert_relative_eq!(yearly.values[1], 0.0, epsilon = 1e-12);

        let last = resample(&series, Period::Annual, Aggregation::Last);
        assert_relative_eq!(last.values[1], -0.2);
    }

    #[test]
    fn rounding_and_ranges_follow_numpy() {
        assert_eq!(round_to_closest(12.4, 5.0), 10.0);
        assert_eq!(round_to_closest(12.5, 5.0), 10.0);
        assert_eq!(round_to_closest(17.5, 5.0), 20.0);
        assert_eq!(arange(-20.0, 0.0, 5.0), vec![-20.0, -15.0, -10.0, -5.0]);
        assert!(arange(0.0, 0.0, 5.0).is_empty());
        assert!(arange(0.0, 10.0, 0.0).is_empty());
    }
}
