//! PNG output through the plotters bitmap backend.
//!
//! Text needs a font rasterizer, which plotters only ships behind its `ttf`
//! feature. Builds without the `ttf` feature skip text in PNG output.

use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::{BitMapBackend, Circle, DrawingArea, IntoDrawingArea, PathElement, Polygon, Rectangle, Text};
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{Color as _, FontDesc, FontFamily, FontStyle, FontTransform, RGBColor, ShapeStyle};
use tracing::{debug, warn};

use super::{dash_segments, Anchor, Canvas, Paint, TextStyle};
use crate::error::{ChartError, ChartResult};
use crate::figure::{Figure, Rect, Stroke};
use crate::style::Color;

const DASH: (f64, f64) = (4.0, 3.0);

struct BitmapCanvas<'a, 'b> {
    area: &'a DrawingArea<BitMapBackend<'b>, Shift>,
    fontname: &'a str,
    error: Option<String>,
    skipped_text: usize,
}

fn shape(color: Color, alpha: f64, filled: bool, width: f64) -> ShapeStyle {
    ShapeStyle {
        color: RGBColor(color.r, color.g, color.b).mix(alpha.clamp(0.0, 1.0)),
        filled,
        stroke_width: width.round().max(1.0) as u32,
    }
}

fn px(point: (f64, f64)) -> (i32, i32) {
    (point.0.round() as i32, point.1.round() as i32)
}

impl BitmapCanvas<'_, '_> {
    fn check<E: std::fmt::Debug>(&mut self, result: Result<(), E>) {
        if let Err(err) = result {
            self.error.get_or_insert_with(|| format!("{err:?}"));
        }
    }
}

impl Canvas for BitmapCanvas<'_, '_> {
    fn fill_rect(&mut self, rect: Rect, paint: Paint) {
        let style = shape(paint.color, paint.alpha, true, 1.0);
        let result = self.area.draw(&Rectangle::new(
            [px((rect.x, rect.y)), px((rect.right(), rect.bottom()))],
            style,
        ));
        self.check(result);
    }

    fn polyline(&mut self, points: &[(f64, f64)], stroke: &Stroke) {
        let style = shape(stroke.color, stroke.alpha, false, stroke.width);
        let runs = if stroke.dash {
            dash_segments(points, DASH.0 * stroke.width, DASH.1 * stroke.width)
        } else {
            vec![points.to_vec()]
        };
        for run in runs {
            let path: Vec<(i32, i32)> = run.into_iter().map(px).collect();
            let result = self.area.draw(&PathElement::new(path, style));
            self.check(result);
        }
    }

    fn polygon(&mut self, points: &[(f64, f64)], paint: Paint) {
        let path: Vec<(i32, i32)> = points.iter().copied().map(px).collect();
        let result = self
            .area
            .draw(&Polygon::new(path, shape(paint.color, paint.alpha, true, 1.0)));
        self.check(result);
    }

    fn circle(&mut self, center: (f64, f64), radius: f64, paint: Paint) {
        let result = self.area.draw(&Circle::new(
            px(center),
            radius.round().max(1.0) as i32,
            shape(paint.color, paint.alpha, true, 1.0),
        ));
        self.check(result);
    }

    fn text(&mut self, pos: (f64, f64), text: &str, style: &TextStyle) {
        if !cfg!(feature = "ttf") {
            self.skipped_text += 1;
            return;
        }
        let font_style = if style.bold {
            FontStyle::Bold
        } else {
            FontStyle::Normal
        };
        let hpos = match style.anchor {
            Anchor::Start => HPos::Left,
            Anchor::Middle => HPos::Center,
            Anchor::End => HPos::Right,
        };
        let mut text_style = FontDesc::new(FontFamily::Name(self.fontname), style.size, font_style)
            .color(&RGBColor(style.color.r, style.color.g, style.color.b))
            .pos(Pos::new(hpos, VPos::Bottom));
        if style.vertical {
            text_style = text_style.transform(FontTransform::Rotate270);
        }
        let result = self.area.draw(&Text::new(text, px(pos), text_style));
        self.check(result);
    }
}

/// Rasterize `figure` and write it to `path` as PNG.
pub fn render_png(figure: &Figure, path: &Path) -> ChartResult<()> {
    let size = (figure.width_px() as u32, figure.height_px() as u32);
    let root = BitMapBackend::new(path, size).into_drawing_area();

    let mut canvas = BitmapCanvas {
        area: &root,
        fontname: &figure.fontname,
        error: None,
        skipped_text: 0,
    };
    // the bitmap backend has no alpha channel, so the face is always painted
    super::draw_figure(figure, &mut canvas, false);

    if canvas.skipped_text > 0 {
        warn!(
            count = canvas.skipped_text,
            "PNG text skipped; enable the `ttf` feature to rasterize labels"
        );
    }
    if let Some(err) = canvas.error {
        return Err(ChartError::Render(err));
    }

    root.present()
        .map_err(|err| ChartError::Render(format!("{err:?}")))?;
    debug!(width = size.0, height = size.1, "bitmap presented");
    Ok(())
}
