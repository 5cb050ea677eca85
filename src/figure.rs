//! Backend-independent figure model.
//!
//! A [`Figure`] holds one or more [`Axes`], each with artists expressed in
//! data coordinates. Pixel geometry is only resolved at render time, so the
//! same figure can be written as SVG or PNG.

use std::path::Path;

use chrono::{Datelike, NaiveDate};
use tracing::debug;

use crate::error::{ChartResult, LayoutError};
use crate::format::TickFormat;
use crate::output::{self, SaveOptions};
use crate::style::{Color, Colormap};

/// Pixels per inch used when converting a figure size to pixels.
pub const DEFAULT_DPI: f64 = 72.0;
pub const FONT_SIZE: f64 = 10.0;
const MAX_DATE_LABELS: usize = 8;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Title {
    pub text: String,
    pub size: f64,
    pub bold: bool,
    pub color: Color,
}

impl Title {
    pub fn bold(text: impl Into<String>, size: f64) -> Self {
        Self {
            text: text.into(),
            size,
            bold: true,
            color: Color::BLACK,
        }
    }

    pub fn muted(text: impl Into<String>, size: f64) -> Self {
        Self {
            text: text.into(),
            size,
            bold: false,
            color: Color::GRAY,
        }
    }

    fn line_height(&self) -> f64 {
        self.size * 1.6
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f64,
    pub dash: bool,
    pub alpha: f64,
}

impl Stroke {
    pub fn solid(color: Color, width: f64) -> Self {
        Self {
            color,
            width,
            dash: false,
            alpha: 1.0,
        }
    }

    pub fn dashed(color: Color, width: f64) -> Self {
        Self {
            dash: true,
            ..Self::solid(color, width)
        }
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Line {
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,
    pub stroke: Stroke,
    pub label: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Fill {
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,
    pub baseline: f64,
    pub color: Color,
    pub alpha: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Bars {
    pub xs: Vec<f64>,
    pub heights: Vec<f64>,
    /// Bar width in data units.
    pub width: f64,
    pub color: Color,
    pub alpha: f64,
    pub label: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Markers {
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,
    /// Radius in pixels.
    pub radius: f64,
    pub color: Color,
    pub alpha: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RefLine {
    pub value: f64,
    pub stroke: Stroke,
    pub label: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Span {
    pub x0: f64,
    pub x1: f64,
    pub color: Color,
    pub alpha: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoxStats {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct BoxPlot {
    pub x: f64,
    pub stats: BoxStats,
    pub width: f64,
    pub color: Color,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Heatmap {
    /// Row-major cells; row 0 is drawn at the top.
    pub cells: Vec<Vec<Option<f64>>>,
    pub colormap: Colormap,
    /// Colour scale spans `±max_abs` around zero.
    pub max_abs: f64,
    /// Decimals shown in each cell, `None` disables annotations.
    pub annot_decimals: Option<usize>,
    pub annot_size: f64,
    pub square: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Colorbar {
    pub colormap: Colormap,
    pub min: f64,
    pub max: f64,
    pub format: TickFormat,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Artist {
    Line(Line),
    Fill(Fill),
    Bars(Bars),
    Markers(Markers),
    HLine(RefLine),
    VLine(RefLine),
    Span(Span),
    BoxPlot(BoxPlot),
    Heatmap(Heatmap),
}

impl Artist {
    pub fn label(&self) -> Option<(&str, Color, bool)> {
        match self {
            Artist::Line(l) => l.label.as_deref().map(|s| (s, l.stroke.color, l.stroke.dash)),
            Artist::Bars(b) => b.label.as_deref().map(|s| (s, b.color, false)),
            Artist::HLine(r) | Artist::VLine(r) => {
                r.label.as_deref().map(|s| (s, r.stroke.color, r.stroke.dash))
            }
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum XAxis {
    /// One position per date; x coordinates are indices.
    Dates(Vec<NaiveDate>),
    /// Labelled slots at integer positions.
    Categories(Vec<String>),
    /// Continuous values.
    Numeric(TickFormat),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scale {
    Linear,
    /// Symmetric log: `sign(y) * ln(1 + |y|)`.
    SymLog,
}

impl Scale {
    pub fn forward(self, v: f64) -> f64 {
        match self {
            Scale::Linear => v,
            Scale::SymLog => v.signum() * v.abs().ln_1p(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct YAxis {
    pub scale: Scale,
    pub ticks: Option<Vec<f64>>,
    pub limits: Option<(f64, f64)>,
    pub format: TickFormat,
    /// Category labels at integer positions, replacing numeric ticks.
    pub labels: Option<Vec<String>>,
    /// Draw larger values towards the bottom.
    pub inverted: bool,
}

impl YAxis {
    pub fn new(format: TickFormat) -> Self {
        Self {
            scale: Scale::Linear,
            ticks: None,
            limits: None,
            format,
            labels: None,
            inverted: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Axes {
    pub title: Option<Title>,
    pub subtitle: Option<Title>,
    pub ylabel: Option<String>,
    pub xaxis: XAxis,
    pub yaxis: YAxis,
    pub artists: Vec<Artist>,
    pub legend: bool,
    pub show_xticklabels: bool,
    pub colorbar: Option<Colorbar>,
}

impl Axes {
    pub fn new(xaxis: XAxis, yaxis: YAxis) -> Self {
        Self {
            title: None,
            subtitle: None,
            ylabel: None,
            xaxis,
            yaxis,
            artists: Vec::new(),
            legend: false,
            show_xticklabels: true,
            colorbar: None,
        }
    }

    pub fn push(&mut self, artist: Artist) {
        self.artists.push(artist);
    }

    pub fn lines(&self) -> impl Iterator<Item = &Line> {
        self.artists.iter().filter_map(|a| match a {
            Artist::Line(l) => Some(l),
            _ => None,
        })
    }

    pub fn hlines(&self) -> impl Iterator<Item = &RefLine> {
        self.artists.iter().filter_map(|a| match a {
            Artist::HLine(r) => Some(r),
            _ => None,
        })
    }

    pub fn legend_entries(&self) -> Vec<(&str, Color, bool)> {
        self.artists
            .iter()
            .filter_map(Artist::label)
            .filter(|(label, _, _)| !label.is_empty())
            .collect()
    }

    /// Horizontal data range.
    pub fn x_limits(&self) -> (f64, f64) {
        match &self.xaxis {
            XAxis::Dates(dates) => (0.0, dates.len().saturating_sub(1).max(1) as f64),
            XAxis::Categories(labels) => (-0.5, labels.len().max(1) as f64 - 0.5),
            XAxis::Numeric(_) => {
                let mut lo = f64::INFINITY;
                let mut hi = f64::NEG_INFINITY;
                let mut take = |v: f64| {
                    if v.is_finite() {
                        lo = lo.min(v);
                        hi = hi.max(v);
                    }
                };
                for artist in &self.artists {
                    match artist {
                        Artist::Line(l) => l.xs.iter().copied().for_each(&mut take),
                        Artist::Fill(f) => f.xs.iter().copied().for_each(&mut take),
                        Artist::Markers(m) => m.xs.iter().copied().for_each(&mut take),
                        Artist::Bars(b) => b.xs.iter().for_each(|x| {
                            take(x - b.width / 2.0);
                            take(x + b.width / 2.0);
                        }),
                        Artist::VLine(r) => take(r.value),
                        Artist::Span(s) => {
                            take(s.x0);
                            take(s.x1);
                        }
                        _ => {}
                    }
                }
                pad_range(lo, hi)
            }
        }
    }

    /// Vertical data range, before scale transforms.
    pub fn y_limits(&self) -> (f64, f64) {
        if let Some(limits) = self.yaxis.limits {
            return limits;
        }
        if let Some(labels) = &self.yaxis.labels {
            return (-0.5, labels.len().max(1) as f64 - 0.5);
        }

        let mut lo = f64::INFINITY;
        let mut hi = f64::NEG_INFINITY;
        let mut take = |v: f64| {
            if v.is_finite() {
                lo = lo.min(v);
                hi = hi.max(v);
            }
        };
        for artist in &self.artists {
            match artist {
                Artist::Line(l) => l.ys.iter().copied().for_each(&mut take),
                Artist::Fill(f) => {
                    f.ys.iter().copied().for_each(&mut take);
                    take(f.baseline);
                }
                Artist::Bars(b) => {
                    b.heights.iter().copied().for_each(&mut take);
                    take(0.0);
                }
                Artist::Markers(m) => m.ys.iter().copied().for_each(&mut take),
                Artist::HLine(r) => take(r.value),
                Artist::BoxPlot(bp) => {
                    take(bp.stats.min);
                    take(bp.stats.max);
                }
                _ => {}
            }
        }
        if let Some(ticks) = &self.yaxis.ticks {
            ticks.iter().copied().for_each(&mut take);
        }
        pad_range(lo, hi)
    }

    /// Tick positions and labels for the y axis.
    pub fn y_ticks(&self) -> Vec<(f64, String)> {
        if let Some(labels) = &self.yaxis.labels {
            return labels
                .iter()
                .enumerate()
                .map(|(i, l)| (i as f64, l.clone()))
                .collect();
        }
        let values = match &self.yaxis.ticks {
            Some(ticks) if !ticks.is_empty() => ticks.clone(),
            _ => {
                let (lo, hi) = self.y_limits();
                nice_ticks(lo, hi, 5)
            }
        };
        values
            .into_iter()
            .map(|v| (v, self.yaxis.format.format(v)))
            .collect()
    }

    /// Tick positions and labels for the x axis.
    pub fn x_ticks(&self) -> Vec<(f64, String)> {
        match &self.xaxis {
            XAxis::Dates(dates) => date_ticks(dates)
                .into_iter()
                .map(|(idx, label)| (idx as f64, label))
                .collect(),
            XAxis::Categories(labels) => labels
                .iter()
                .enumerate()
                .map(|(i, l)| (i as f64, l.clone()))
                .collect(),
            XAxis::Numeric(format) => {
                let (lo, hi) = self.x_limits();
                nice_ticks(lo, hi, 6)
                    .into_iter()
                    .map(|v| (v, format.format(v)))
                    .collect()
            }
        }
    }

    fn has_heatmap(&self) -> bool {
        self.artists.iter().any(|a| matches!(a, Artist::Heatmap(_)))
    }

    fn title_height(&self) -> f64 {
        self.title.as_ref().map_or(0.0, Title::line_height)
            + self.subtitle.as_ref().map_or(0.0, Title::line_height)
    }
}

/// Widen a range by 5% on each side, and flat ranges to something drawable.
fn pad_range(lo: f64, hi: f64) -> (f64, f64) {
    if !lo.is_finite() || !hi.is_finite() {
        return (-1.0, 1.0);
    }
    if lo == hi {
        let adjust = if lo == 0.0 { 1.0 } else { lo.abs() * 0.1 };
        return (lo - adjust, hi + adjust);
    }
    let pad = (hi - lo) * 0.05;
    (lo - pad, hi + pad)
}

/// Roughly `target` ticks at 1/2/2.5/5 × 10^k steps inside `[lo, hi]`.
pub fn nice_ticks(lo: f64, hi: f64, target: usize) -> Vec<f64> {
    if !lo.is_finite() || !hi.is_finite() || hi <= lo || target == 0 {
        return Vec::new();
    }
    let raw = (hi - lo) / target as f64;
    let magnitude = 10f64.powf(raw.log10().floor());
    let step = [1.0, 2.0, 2.5, 5.0, 10.0]
        .iter()
        .map(|m| m * magnitude)
        .find(|s| *s >= raw)
        .unwrap_or(10.0 * magnitude);

    let first = (lo / step).ceil() as i64;
    let last = (hi / step).floor() as i64;
    (first..=last)
        .map(|k| {
            let v = k as f64 * step;
            if v.abs() < step * 1e-9 {
                0.0
            } else {
                v
            }
        })
        .collect()
}

/// Label positions for a date index: month starts for short series, year
/// starts (thinned to at most eight labels) for long ones.
pub fn date_ticks(dates: &[NaiveDate]) -> Vec<(usize, String)> {
    let starts = |key: fn(&NaiveDate) -> (i32, u32)| {
        let mut out = Vec::new();
        let mut last = None;
        for (idx, date) in dates.iter().enumerate() {
            let k = key(date);
            if last != Some(k) {
                out.push(idx);
                last = Some(k);
            }
        }
        out
    };

    let months = starts(|d| (d.year(), d.month()));
    let (indices, fmt) = if months.len() <= MAX_DATE_LABELS {
        (months, "%Y-%m")
    } else if months.len() <= 24 {
        (months, "%b '%y")
    } else {
        (starts(|d| (d.year(), 0)), "%Y")
    };

    let step = indices.len().div_ceil(MAX_DATE_LABELS).max(1);
    indices
        .into_iter()
        .step_by(step)
        .map(|idx| (idx, dates[idx].format(fmt).to_string()))
        .collect()
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Margins {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Figure {
    /// Size in inches.
    pub figsize: (f64, f64),
    pub dpi: f64,
    pub facecolor: Color,
    pub fontname: String,
    pub suptitle: Option<Title>,
    pub axes: Vec<Axes>,
    pub height_ratios: Vec<f64>,
    /// Vertical gap between stacked axes, in pixels.
    pub hspace: f64,
    pub margins: Margins,
}

impl Figure {
    pub fn new(figsize: (f64, f64), fontname: impl Into<String>) -> Self {
        Self {
            figsize,
            dpi: DEFAULT_DPI,
            facecolor: Color::WHITE,
            fontname: fontname.into(),
            suptitle: None,
            axes: Vec::new(),
            height_ratios: Vec::new(),
            hspace: 0.0,
            margins: Margins {
                left: 72.0,
                right: 24.0,
                top: 16.0,
                bottom: 36.0,
            },
        }
    }

    pub fn with_suptitle(mut self, title: Title) -> Self {
        self.suptitle = Some(title);
        self
    }

    pub fn add_axes(&mut self, axes: Axes, height_ratio: f64) {
        self.axes.push(axes);
        self.height_ratios.push(height_ratio);
    }

    pub fn width_px(&self) -> f64 {
        (self.figsize.0 * self.dpi).round().max(1.0)
    }

    pub fn height_px(&self) -> f64 {
        (self.figsize.1 * self.dpi).round().max(1.0)
    }

    /// Pixel rectangles of every axes, top to bottom.
    pub fn axes_rects(&self) -> Vec<Rect> {
        let width = self.width_px();
        let height = self.height_px();
        let header = self.suptitle.as_ref().map_or(0.0, Title::line_height);

        let left = self.margins.left;
        let mut top = self.margins.top + header;
        let inner_w = (width - left - self.margins.right).max(1.0);

        let titles: f64 = self.axes.iter().map(Axes::title_height).sum();
        let gaps = self.hspace * self.axes.len().saturating_sub(1) as f64;
        let available = (height - top - self.margins.bottom - titles - gaps).max(1.0);
        let total_ratio: f64 = self.height_ratios.iter().sum::<f64>().max(f64::EPSILON);

        let mut rects = Vec::with_capacity(self.axes.len());
        for (axes, ratio) in self.axes.iter().zip(&self.height_ratios) {
            top += axes.title_height();
            let h = available * ratio / total_ratio;
            let mut rect = Rect {
                x: left,
                y: top,
                w: inner_w,
                h,
            };
            if axes.colorbar.is_some() {
                rect.w = (rect.w - 64.0).max(1.0);
            }
            if axes.has_heatmap() {
                rect = square_heatmap(axes, rect);
            }
            rects.push(rect);
            top += h + self.hspace;
        }
        rects
    }

    /// Fit margins to tick labels and axis labels.
    ///
    /// Returns an error when the figure is too small to hold them; the
    /// figure keeps its previous margins in that case.
    pub fn tight_layout(&mut self) -> Result<(), LayoutError> {
        if self.axes.is_empty() {
            return Err(LayoutError::NoAxes);
        }

        let widest_tick = self
            .axes
            .iter()
            .flat_map(|ax| ax.y_ticks())
            .map(|(_, label)| text_width(&label, FONT_SIZE))
            .fold(0.0, f64::max);
        let has_ylabel = self.axes.iter().any(|ax| ax.ylabel.is_some());
        let has_xlabels = self.axes.last().is_some_and(|ax| ax.show_xticklabels);

        let margins = Margins {
            left: widest_tick + 14.0 + if has_ylabel { 24.0 } else { 0.0 },
            right: 16.0,
            top: 10.0,
            bottom: if has_xlabels { 30.0 } else { 10.0 },
        };

        let header = self.suptitle.as_ref().map_or(0.0, Title::line_height)
            + self.axes.iter().map(Axes::title_height).sum::<f64>();
        let inner_w = self.width_px() - margins.left - margins.right;
        let inner_h = self.height_px() - margins.top - margins.bottom - header;
        if inner_w < 40.0 || inner_h < 20.0 * self.axes.len() as f64 {
            return Err(LayoutError::TooSmall {
                width: self.width_px(),
                height: self.height_px(),
            });
        }

        debug!(?margins, "tight layout applied");
        self.margins = margins;
        Ok(())
    }

    /// Render to a standalone SVG document.
    pub fn to_svg(&self) -> String {
        output::svg_document(self, false)
    }

    /// Write the figure to disk; the format follows the file extension
    /// unless the options name one.
    pub fn save(&self, options: impl Into<SaveOptions>) -> ChartResult<()> {
        output::save_figure(self, &options.into())
    }

    pub fn save_to(&self, path: impl AsRef<Path>) -> ChartResult<()> {
        self.save(SaveOptions::new(path))
    }
}

/// Approximate rendered width of `text` at `size` px.
pub fn text_width(text: &str, size: f64) -> f64 {
    text.chars().count() as f64 * size * 0.6
}

fn square_heatmap(axes: &Axes, rect: Rect) -> Rect {
    let square = axes.artists.iter().any(|a| matches!(a, Artist::Heatmap(h) if h.square));
    if !square {
        return rect;
    }
    let cols = match &axes.xaxis {
        XAxis::Categories(labels) => labels.len().max(1),
        _ => 1,
    };
    let rows = axes.yaxis.labels.as_ref().map_or(1, |l| l.len().max(1));
    let cell = (rect.w / cols as f64).min(rect.h / rows as f64);
    Rect {
        w: cell * cols as f64,
        h: cell * rows as f64,
        ..rect
    }
}
