//! Axis tick and annotation formatting.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// How tick values on an axis are printed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TickFormat {
    /// Fractions shown as percentages with K/M/B/T abbreviations.
    Percent,
    /// Values already in percent points, `{x:,.0f}%`.
    PercentPoints,
    /// Dollar amounts with K/M/B/T abbreviations.
    Currency,
    /// Fixed number of decimals.
    Decimal(usize),
}

impl TickFormat {
    pub fn format(self, value: f64) -> String {
        match self {
            TickFormat::Percent => format_pct_axis(value),
            TickFormat::PercentPoints => format!("{}%", group_thousands(value, 0)),
            TickFormat::Currency => format_cur_axis(value),
            TickFormat::Decimal(places) => format!("{value:.places$}"),
        }
    }
}

fn abbreviate(x: f64, prefix: &str, suffix: &str) -> Option<String> {
    const UNITS: [(f64, &str); 4] = [(1e12, "T"), (1e9, "B"), (1e6, "M"), (1e3, "K")];
    UNITS.iter().find(|(scale, _)| x >= *scale).map(|(scale, unit)| {
        let res = format!("{prefix}{:.1}{unit}{suffix}", x / scale);
        res.replace(&format!(".0{unit}"), unit)
    })
}

pub fn format_pct_axis(value: f64) -> String {
    let x = value * 100.0;
    abbreviate(x, "", "%").unwrap_or_else(|| {
        let res = format!("{x:.0}%");
        if res == "-0%" {
            "0%".to_string()
        } else {
            res
        }
    })
}

pub fn format_cur_axis(value: f64) -> String {
    abbreviate(value, "$", "").unwrap_or_else(|| format!("${value:.0}"))
}

/// `{:,.N}` formatting: thousands separators and `decimals` places.
pub fn group_thousands(value: f64, decimals: usize) -> String {
    let raw = format!("{:.*}", decimals, value.abs());
    let negative = value < 0.0 && raw.chars().any(|c| c.is_ascii_digit() && c != '0');
    let (int_part, frac_part) = match raw.split_once('.') {
        Some((i, f)) => (i.to_string(), Some(f.to_string())),
        None => (raw, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&grouped);
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(&frac);
    }
    out
}

/// `{:,}` formatting of a float: shortest representation, at least one
/// decimal, thousands separators.
pub fn group_float(value: f64) -> String {
    let repr = format!("{}", value.abs());
    let (int_part, frac_part) = repr.split_once('.').unwrap_or((repr.as_str(), "0"));
    let int_value: f64 = int_part.parse().unwrap_or(0.0);
    let sign = if value < 0.0 { "-" } else { "" };
    format!("{sign}{}.{frac_part}", group_thousands(int_value, 0))
}

/// Prefix non-negative scores with `+`.
pub fn score_str(value: &str) -> String {
    if value.contains('-') {
        value.to_string()
    } else {
        format!("+{value}")
    }
}

/// Space-padded day, abbreviated month and two-digit year, e.g. ` 2 Jan '24`.
pub fn short_date(date: NaiveDate) -> String {
    date.format("%e %b '%y").to_string()
}

pub fn date_span(start: NaiveDate, end: NaiveDate) -> String {
    format!("{} - {}", short_date(start), short_date(end))
}

/// Escape text for inclusion in SVG/HTML.
pub fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_axis_abbreviates_large_values() {
        assert_eq!(format_pct_axis(0.25), "25%");
        assert_eq!(format_pct_axis(-0.1), "-10%");
        assert_eq!(format_pct_axis(-0.001), "0%");
        assert_eq!(format_pct_axis(15.0), "1.5K%");
        assert_eq!(format_pct_axis(20.0), "2K%");
    }

    #[test]
    fn currency_axis_abbreviates_large_values() {
        assert_eq!(format_cur_axis(950.0), "$950");
        assert_eq!(format_cur_axis(100_000.0), "$100K");
        assert_eq!(format_cur_axis(1_300_000.0), "$1.3M");
        assert_eq!(format_cur_axis(3e9), "$3B");
    }

    #[test]
    fn thousands_are_grouped() {
        assert_eq!(group_thousands(100_000.0, 0), "100,000");
        assert_eq!(group_thousands(-1234.567, 2), "-1,234.57");
        assert_eq!(group_thousands(12.0, 0), "12");
        assert_eq!(group_thousands(-0.2, 0), "0");
        assert_eq!(TickFormat::PercentPoints.format(-1500.0), "-1,500%");
        assert_eq!(TickFormat::Decimal(2).format(1.0), "1.00");
    }

    #[test]
    fn floats_group_like_python() {
        assert_eq!(group_float(1234.5), "1,234.5");
        assert_eq!(group_float(100.0), "100.0");
        assert_eq!(group_float(-98765.43), "-98,765.43");
        assert_eq!(group_float(0.25), "0.25");
    }

    #[test]
    fn scores_and_dates() {
        assert_eq!(score_str("$1,200.5"), "+$1,200.5");
        assert_eq!(score_str("-3.2%"), "-3.2%");
        let d = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        assert_eq!(short_date(d), " 2 Jan '24");
        assert_eq!(escape_xml("P&L <x>"), "P&amp;L &lt;x&gt;");
    }
}
