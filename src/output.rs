//! Saving, showing and returning finished figures.

use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use tracing::{debug, info, warn};

use crate::error::{ChartError, ChartResult};
use crate::figure::Figure;
use crate::format::escape_xml;
use crate::options::PlotOptions;
use crate::render::{self, bitmap, svg::SvgCanvas};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, EnumString, Display)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Svg,
    Png,
    #[strum(to_string = "html", serialize = "htm")]
    Html,
}

impl ImageFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| ext.parse().ok())
    }
}

/// Where and how a figure is written.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SaveOptions {
    pub path: PathBuf,
    /// Overrides the format implied by the extension.
    #[serde(default)]
    pub format: Option<ImageFormat>,
    /// Overrides the figure's dpi.
    #[serde(default)]
    pub dpi: Option<f64>,
    #[serde(default)]
    pub transparent: bool,
}

impl SaveOptions {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            format: None,
            dpi: None,
            transparent: false,
        }
    }

    pub fn with_format(mut self, format: ImageFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn with_dpi(mut self, dpi: f64) -> Self {
        self.dpi = Some(dpi);
        self
    }

    pub fn with_transparent(mut self, transparent: bool) -> Self {
        self.transparent = transparent;
        self
    }

    pub fn resolve_format(&self) -> ChartResult<ImageFormat> {
        self.format
            .or_else(|| ImageFormat::from_path(&self.path))
            .ok_or_else(|| ChartError::UnsupportedFormat(self.path.clone()))
    }
}

impl From<&str> for SaveOptions {
    fn from(path: &str) -> Self {
        SaveOptions::new(path)
    }
}

impl From<String> for SaveOptions {
    fn from(path: String) -> Self {
        SaveOptions::new(path)
    }
}

impl From<&Path> for SaveOptions {
    fn from(path: &Path) -> Self {
        SaveOptions::new(path)
    }
}

impl From<PathBuf> for SaveOptions {
    fn from(path: PathBuf) -> Self {
        SaveOptions::new(path)
    }
}

impl From<&PathBuf> for SaveOptions {
    fn from(path: &PathBuf) -> Self {
        SaveOptions::new(path)
    }
}

pub(crate) fn svg_document(figure: &Figure, transparent: bool) -> String {
    let mut canvas = SvgCanvas::new(figure.width_px(), figure.height_px(), &figure.fontname);
    render::draw_figure(figure, &mut canvas, transparent);
    canvas.finish()
}

/// Minimal HTML page embedding the figure as inline SVG.
pub fn html_document(figure: &Figure, transparent: bool) -> String {
    let title = figure
        .suptitle
        .as_ref()
        .map(|t| t.text.as_str())
        .or_else(|| figure.axes.first().and_then(|ax| ax.title.as_ref()).map(|t| t.text.as_str()))
        .unwrap_or("Chart");
    format!(
        r#"<!DOCTYPE html><html><head><meta charset="utf-8"><title>{title}</title></head><body><div class="qs-plot">{svg}</div></body></html>"#,
        title = escape_xml(title),
        svg = svg_document(figure, transparent),
    )
}

pub fn save_figure(figure: &Figure, options: &SaveOptions) -> ChartResult<()> {
    let format = options.resolve_format()?;

    let rescaled;
    let figure = match options.dpi {
        Some(dpi) if dpi > 0.0 && dpi != figure.dpi => {
            rescaled = Figure {
                dpi,
                ..figure.clone()
            };
            &rescaled
        }
        _ => figure,
    };

    match format {
        ImageFormat::Svg => std::fs::write(&options.path, svg_document(figure, options.transparent))?,
        ImageFormat::Html => {
            std::fs::write(&options.path, html_document(figure, options.transparent))?
        }
        ImageFormat::Png => {
            if options.transparent {
                debug!("transparent background is not available for PNG output");
            }
            bitmap::render_png(figure, &options.path)?
        }
    }

    info!(path = %options.path.display(), %format, "figure saved");
    Ok(())
}

/// Something that can display a finished figure.
pub trait Viewer {
    fn show(&self, figure: Figure) -> ChartResult<()>;
}

/// Opens figures with the platform's default HTML handler.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemViewer;

static SHOWN: AtomicUsize = AtomicUsize::new(0);

impl SystemViewer {
    fn opener(path: &Path) -> Command {
        if cfg!(target_os = "macos") {
            let mut cmd = Command::new("open");
            cmd.arg(path);
            cmd
        } else if cfg!(target_os = "windows") {
            let mut cmd = Command::new("cmd");
            cmd.args(["/C", "start", ""]).arg(path);
            cmd
        } else {
            let mut cmd = Command::new("xdg-open");
            cmd.arg(path);
            cmd
        }
    }
}

impl Viewer for SystemViewer {
    fn show(&self, figure: Figure) -> ChartResult<()> {
        let seq = SHOWN.fetch_add(1, Ordering::Relaxed);
        let path = std::env::temp_dir().join(format!(
            "quantstats-plot-{}-{seq}.html",
            std::process::id()
        ));
        std::fs::write(&path, html_document(&figure, false))?;

        match Self::opener(&path).spawn() {
            Ok(_) => info!(path = %path.display(), "figure opened"),
            Err(err) => warn!(path = %path.display(), %err, "could not open figure viewer"),
        }
        Ok(())
    }
}

/// Lay out the figure, save it when requested, then show or return it.
pub fn finish(figure: Figure, options: &PlotOptions) -> ChartResult<Option<Figure>> {
    finish_with(figure, options, &SystemViewer)
}

pub fn finish_with(
    mut figure: Figure,
    options: &PlotOptions,
    viewer: &dyn Viewer,
) -> ChartResult<Option<Figure>> {
    if let Err(err) = figure.tight_layout() {
        debug!(%err, "tight layout skipped");
    }

    if let Some(save) = &options.savefig {
        save_figure(&figure, save)?;
    }

    if options.show {
        viewer.show(figure)?;
        return Ok(None);
    }
    Ok(Some(figure))
}
