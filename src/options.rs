//! Per-call chart configuration.

use serde::{Deserialize, Serialize};

use crate::error::ChartResult;
use crate::figure::DEFAULT_DPI;
use crate::output::SaveOptions;
use crate::style::Palette;
use crate::utils::Period;

pub const DEFAULT_PERIODS_PER_YEAR: u32 = 252;
pub const DEFAULT_FONT: &str = "Arial";

/// Y axis label: the chart's own, none, or a custom one.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum YLabel {
    #[default]
    Default,
    Hidden,
    Custom(String),
}

impl YLabel {
    pub(crate) fn resolve(&self, default: &str) -> Option<String> {
        match self {
            YLabel::Default => Some(default.to_string()),
            YLabel::Hidden => None,
            YLabel::Custom(label) => Some(label.clone()),
        }
    }
}

/// Options shared by every chart function.
///
/// `figsize`, `title` and `lw` override the chart's own defaults when set.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotOptions {
    pub grayscale: bool,
    /// Size in inches.
    pub figsize: Option<(f64, f64)>,
    pub title: Option<String>,
    pub fontname: String,
    pub lw: Option<f64>,
    pub ylabel: YLabel,
    pub subtitle: bool,
    pub savefig: Option<SaveOptions>,
    pub show: bool,
    pub periods_per_year: u32,
    pub dpi: f64,
}

impl Default for PlotOptions {
    fn default() -> Self {
        Self {
            grayscale: false,
            figsize: None,
            title: None,
            fontname: DEFAULT_FONT.to_string(),
            lw: None,
            ylabel: YLabel::Default,
            subtitle: true,
            savefig: None,
            show: false,
            periods_per_year: DEFAULT_PERIODS_PER_YEAR,
            dpi: DEFAULT_DPI,
        }
    }
}

impl PlotOptions {
    /// Parse options from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> ChartResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_grayscale(mut self, grayscale: bool) -> Self {
        self.grayscale = grayscale;
        self
    }

    pub fn with_figsize(mut self, width: f64, height: f64) -> Self {
        self.figsize = Some((width, height));
        self
    }

    pub fn with_title<S: Into<String>>(mut self, title: S) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_fontname<S: Into<String>>(mut self, fontname: S) -> Self {
        self.fontname = fontname.into();
        self
    }

    pub fn with_lw(mut self, lw: f64) -> Self {
        self.lw = Some(lw);
        self
    }

    pub fn with_ylabel(mut self, ylabel: YLabel) -> Self {
        self.ylabel = ylabel;
        self
    }

    pub fn with_subtitle(mut self, subtitle: bool) -> Self {
        self.subtitle = subtitle;
        self
    }

    pub fn with_savefig<S: Into<SaveOptions>>(mut self, save: S) -> Self {
        self.savefig = Some(save.into());
        self
    }

    pub fn with_show(mut self, show: bool) -> Self {
        self.show = show;
        self
    }

    pub fn with_periods_per_year(mut self, periods: u32) -> Self {
        self.periods_per_year = periods;
        self
    }

    pub fn with_dpi(mut self, dpi: f64) -> Self {
        self.dpi = dpi;
        self
    }

    pub(crate) fn palette(&self) -> Palette {
        Palette::for_mode(self.grayscale)
    }

    pub(crate) fn figsize_or(&self, default: (f64, f64)) -> (f64, f64) {
        self.figsize.unwrap_or(default)
    }

    pub(crate) fn lw_or(&self, default: f64) -> f64 {
        self.lw.unwrap_or(default)
    }

    pub(crate) fn title_or(&self, default: &str) -> String {
        self.title.clone().unwrap_or_else(|| default.to_string())
    }
}

/// Transform applied by the cumulative-returns charts.
#[derive(Clone, Debug, PartialEq)]
pub struct CurveOptions {
    /// Scale returns to the benchmark's volatility; requires a benchmark.
    pub match_volatility: bool,
    pub compound: bool,
    pub cumulative: bool,
    pub resample: Option<Period>,
}

impl Default for CurveOptions {
    fn default() -> Self {
        Self {
            match_volatility: false,
            compound: true,
            cumulative: true,
            resample: None,
        }
    }
}

impl CurveOptions {
    pub fn with_match_volatility(mut self, enabled: bool) -> Self {
        self.match_volatility = enabled;
        self
    }

    pub fn with_compound(mut self, compound: bool) -> Self {
        self.compound = compound;
        self
    }

    pub fn with_cumulative(mut self, cumulative: bool) -> Self {
        self.cumulative = cumulative;
        self
    }

    pub fn with_resample(mut self, period: Period) -> Self {
        self.resample = Some(period);
        self
    }
}

/// Rolling window length in observations and its legend/title label.
#[derive(Clone, Debug, PartialEq)]
pub struct RollingWindow {
    pub period: usize,
    pub label: String,
}

impl RollingWindow {
    pub fn new<S: Into<String>>(period: usize, label: S) -> Self {
        Self {
            period,
            label: label.into(),
        }
    }

    pub fn six_months() -> Self {
        Self::new(126, "6-Months")
    }

    pub fn twelve_months() -> Self {
        Self::new(252, "12-Months")
    }
}

impl Default for RollingWindow {
    fn default() -> Self {
        Self::six_months()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct BetaWindows {
    pub window1: RollingWindow,
    pub window2: Option<RollingWindow>,
}

impl Default for BetaWindows {
    fn default() -> Self {
        Self {
            window1: RollingWindow::six_months(),
            window2: Some(RollingWindow::twelve_months()),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct HeatmapOptions {
    pub annot_size: f64,
    pub cbar: bool,
    pub square: bool,
    pub compounded: bool,
    /// Append an end-of-year column.
    pub eoy: bool,
}

impl Default for HeatmapOptions {
    fn default() -> Self {
        Self {
            annot_size: 10.0,
            cbar: true,
            square: false,
            compounded: true,
            eoy: false,
        }
    }
}

impl HeatmapOptions {
    pub fn with_annot_size(mut self, size: f64) -> Self {
        self.annot_size = size;
        self
    }

    pub fn with_cbar(mut self, cbar: bool) -> Self {
        self.cbar = cbar;
        self
    }

    pub fn with_square(mut self, square: bool) -> Self {
        self.square = square;
        self
    }

    pub fn with_compounded(mut self, compounded: bool) -> Self {
        self.compounded = compounded;
        self
    }

    pub fn with_eoy(mut self, eoy: bool) -> Self {
        self.eoy = eoy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_fills_missing_fields_with_defaults() {
        let opts = PlotOptions::from_json(r#"{"grayscale": true, "figsize": [8.0, 4.0]}"#).unwrap();
        assert!(opts.grayscale);
        assert_eq!(opts.figsize, Some((8.0, 4.0)));
        assert_eq!(opts.fontname, DEFAULT_FONT);
        assert_eq!(opts.periods_per_year, 252);
        assert!(!opts.show);
        assert!(opts.subtitle);
    }

    #[test]
    fn json_accepts_ylabel_variants_and_save_path() {
        let opts = PlotOptions::from_json(
            r#"{"ylabel": {"custom": "Equity"}, "savefig": {"path": "out.svg"}}"#,
        )
        .unwrap();
        assert_eq!(opts.ylabel.resolve("Returns"), Some("Equity".to_string()));
        assert_eq!(
            opts.savefig.map(|s| s.path),
            Some(std::path::PathBuf::from("out.svg"))
        );

        let hidden = PlotOptions::from_json(r#"{"ylabel": "hidden"}"#).unwrap();
        assert_eq!(hidden.ylabel.resolve("Returns"), None);
    }

    #[test]
    fn invalid_json_is_a_config_error() {
        let err = PlotOptions::from_json("{\"show\": 3}").unwrap_err();
        assert!(matches!(err, crate::error::ChartError::Config(_)));
    }

    #[test]
    fn builders_override_chart_defaults() {
        let opts = PlotOptions::default()
            .with_figsize(6.0, 3.0)
            .with_lw(2.0)
            .with_title("Mine");
        assert_eq!(opts.figsize_or((10.0, 5.0)), (6.0, 3.0));
        assert_eq!(opts.lw_or(1.0), 2.0);
        assert_eq!(opts.title_or("Default"), "Mine");
        assert_eq!(PlotOptions::default().lw_or(1.5), 1.5);
    }
}
