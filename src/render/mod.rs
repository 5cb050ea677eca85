//! Turns a [`Figure`] into drawing primitives on a [`Canvas`].

pub mod bitmap;
pub mod svg;

use crate::figure::{Artist, Axes, Figure, Rect, Scale, Stroke, Title, XAxis, FONT_SIZE};
use crate::figure::{text_width, BoxPlot, Heatmap};
use crate::format::TickFormat;
use crate::style::{Color, Colormap};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Anchor {
    Start,
    Middle,
    End,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    pub size: f64,
    pub color: Color,
    pub anchor: Anchor,
    pub bold: bool,
    /// Rotated 90° counter-clockwise.
    pub vertical: bool,
}

impl TextStyle {
    fn tick(anchor: Anchor) -> Self {
        Self {
            size: FONT_SIZE,
            color: Color::TICK,
            anchor,
            bold: false,
            vertical: false,
        }
    }

    fn title(title: &Title) -> Self {
        Self {
            size: title.size,
            color: title.color,
            anchor: Anchor::Middle,
            bold: title.bold,
            vertical: false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Paint {
    pub color: Color,
    pub alpha: f64,
}

impl Paint {
    pub fn solid(color: Color) -> Self {
        Self { color, alpha: 1.0 }
    }

    pub fn new(color: Color, alpha: f64) -> Self {
        Self { color, alpha }
    }
}

/// Drawing surface in pixel coordinates, origin top-left.
///
/// Text positions are the baseline anchor point.
pub trait Canvas {
    fn fill_rect(&mut self, rect: Rect, paint: Paint);
    fn polyline(&mut self, points: &[(f64, f64)], stroke: &Stroke);
    fn polygon(&mut self, points: &[(f64, f64)], paint: Paint);
    fn circle(&mut self, center: (f64, f64), radius: f64, paint: Paint);
    fn text(&mut self, pos: (f64, f64), text: &str, style: &TextStyle);
}

/// A recorded primitive, as emitted by [`draw_figure`].
#[derive(Clone, Debug, PartialEq)]
pub enum Primitive {
    Rect(Rect, Paint),
    Polyline(Vec<(f64, f64)>, Stroke),
    Polygon(Vec<(f64, f64)>, Paint),
    Circle((f64, f64), f64, Paint),
    Text((f64, f64), String, TextStyle),
}

impl Primitive {
    /// The primitive with every colour and opacity erased.
    pub fn geometry(&self) -> Primitive {
        let paint = Paint::solid(Color::BLACK);
        match self {
            Primitive::Rect(r, _) => Primitive::Rect(*r, paint),
            Primitive::Polyline(pts, s) => Primitive::Polyline(
                pts.clone(),
                Stroke {
                    color: Color::BLACK,
                    alpha: 1.0,
                    ..*s
                },
            ),
            Primitive::Polygon(pts, _) => Primitive::Polygon(pts.clone(), paint),
            Primitive::Circle(c, r, _) => Primitive::Circle(*c, *r, paint),
            Primitive::Text(p, t, style) => Primitive::Text(
                *p,
                t.clone(),
                TextStyle {
                    color: Color::BLACK,
                    ..*style
                },
            ),
        }
    }
}

/// Canvas that records primitives instead of drawing them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DisplayList {
    pub items: Vec<Primitive>,
}

impl DisplayList {
    pub fn record(figure: &Figure) -> Self {
        let mut list = Self::default();
        draw_figure(figure, &mut list, false);
        list
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.items.iter().filter_map(|p| match p {
            Primitive::Text(_, text, _) => Some(text.as_str()),
            _ => None,
        })
    }
}

impl Canvas for DisplayList {
    fn fill_rect(&mut self, rect: Rect, paint: Paint) {
        self.items.push(Primitive::Rect(rect, paint));
    }

    fn polyline(&mut self, points: &[(f64, f64)], stroke: &Stroke) {
        self.items.push(Primitive::Polyline(points.to_vec(), *stroke));
    }

    fn polygon(&mut self, points: &[(f64, f64)], paint: Paint) {
        self.items.push(Primitive::Polygon(points.to_vec(), paint));
    }

    fn circle(&mut self, center: (f64, f64), radius: f64, paint: Paint) {
        self.items.push(Primitive::Circle(center, radius, paint));
    }

    fn text(&mut self, pos: (f64, f64), text: &str, style: &TextStyle) {
        self.items.push(Primitive::Text(pos, text.to_string(), *style));
    }
}

/// Maps data coordinates of one axes into its pixel rectangle.
#[derive(Clone, Copy, Debug)]
struct Transform {
    rect: Rect,
    xlim: (f64, f64),
    ylim: (f64, f64),
    scale: Scale,
    inverted: bool,
}

impl Transform {
    fn new(axes: &Axes, rect: Rect) -> Self {
        let (y0, y1) = axes.y_limits();
        Self {
            rect,
            xlim: axes.x_limits(),
            ylim: (axes.yaxis.scale.forward(y0), axes.yaxis.scale.forward(y1)),
            scale: axes.yaxis.scale,
            inverted: axes.yaxis.inverted,
        }
    }

    fn x(&self, v: f64) -> f64 {
        let span = self.xlim.1 - self.xlim.0;
        if span.abs() < f64::EPSILON {
            return self.rect.x + self.rect.w / 2.0;
        }
        self.rect.x + (v - self.xlim.0) / span * self.rect.w
    }

    fn y(&self, v: f64) -> f64 {
        let span = self.ylim.1 - self.ylim.0;
        if span.abs() < f64::EPSILON {
            return self.rect.y + self.rect.h / 2.0;
        }
        let norm = (self.scale.forward(v) - self.ylim.0) / span;
        if self.inverted {
            self.rect.y + norm * self.rect.h
        } else {
            self.rect.y + (1.0 - norm) * self.rect.h
        }
    }

    fn contains_y(&self, v: f64) -> bool {
        let t = self.scale.forward(v);
        let (lo, hi) = (self.ylim.0.min(self.ylim.1), self.ylim.0.max(self.ylim.1));
        t >= lo - 1e-9 && t <= hi + 1e-9
    }
}

/// Split a polyline into its dashes, `on` pixels drawn and `off` skipped.
pub fn dash_segments(points: &[(f64, f64)], on: f64, off: f64) -> Vec<Vec<(f64, f64)>> {
    let mut out = Vec::new();
    if points.len() < 2 || on <= 0.0 {
        return out;
    }

    let period = on + off;
    let mut phase = 0.0_f64;
    let mut current: Vec<(f64, f64)> = vec![points[0]];

    for pair in points.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let len = ((b.0 - a.0).powi(2) + (b.1 - a.1).powi(2)).sqrt();
        if len == 0.0 {
            continue;
        }
        let (ux, uy) = ((b.0 - a.0) / len, (b.1 - a.1) / len);
        let mut travelled = 0.0_f64;
        while travelled < len {
            let drawing = phase < on;
            let remaining_in_phase = if drawing { on - phase } else { period - phase };
            let step = remaining_in_phase.min(len - travelled);
            travelled += step;
            phase += step;
            let p = (a.0 + ux * travelled, a.1 + uy * travelled);
            if drawing {
                current.push(p);
            }
            if phase >= period - 1e-12 {
                phase = 0.0;
                current = vec![p];
            } else if drawing && phase >= on - 1e-12 {
                if current.len() > 1 {
                    out.push(std::mem::take(&mut current));
                }
            }
        }
    }

    if current.len() > 1 {
        out.push(current);
    }
    out
}

/// Break a series into drawable runs at non-finite values.
fn finite_runs(xs: &[f64], ys: &[f64], t: &Transform) -> Vec<Vec<(f64, f64)>> {
    let mut runs = Vec::new();
    let mut current = Vec::new();
    for (x, y) in xs.iter().zip(ys) {
        if x.is_finite() && y.is_finite() {
            current.push((t.x(*x), t.y(*y)));
        } else if !current.is_empty() {
            runs.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }
    runs
}

pub fn draw_figure(figure: &Figure, canvas: &mut dyn Canvas, transparent: bool) {
    let width = figure.width_px();
    let height = figure.height_px();

    if !transparent {
        canvas.fill_rect(
            Rect {
                x: 0.0,
                y: 0.0,
                w: width,
                h: height,
            },
            Paint::solid(figure.facecolor),
        );
    }

    if let Some(title) = &figure.suptitle {
        canvas.text(
            (width / 2.0, figure.margins.top + title.size),
            &title.text,
            &TextStyle::title(title),
        );
    }

    let rects = figure.axes_rects();
    for (axes, rect) in figure.axes.iter().zip(rects) {
        draw_axes(axes, rect, canvas);
    }
}

fn draw_axes(axes: &Axes, rect: Rect, canvas: &mut dyn Canvas) {
    let t = Transform::new(axes, rect);
    let is_heatmap = axes.artists.iter().any(|a| matches!(a, Artist::Heatmap(_)));

    let mut header_y = rect.y
        - axes.title.as_ref().map_or(0.0, |t| t.size * 1.6)
        - axes.subtitle.as_ref().map_or(0.0, |t| t.size * 1.6);
    for title in [&axes.title, &axes.subtitle].into_iter().flatten() {
        header_y += title.size * 1.6;
        canvas.text(
            (rect.x + rect.w / 2.0, header_y - title.size * 0.5),
            &title.text,
            &TextStyle::title(title),
        );
    }

    let y_ticks: Vec<(f64, String)> = axes
        .y_ticks()
        .into_iter()
        .filter(|(v, _)| t.contains_y(*v))
        .collect();
    for (value, label) in &y_ticks {
        let y = t.y(*value);
        if !is_heatmap {
            canvas.polyline(&[(rect.x, y), (rect.right(), y)], &Stroke::solid(Color::GRID, 1.0));
        }
        canvas.text((rect.x - 6.0, y + 3.5), label, &TextStyle::tick(Anchor::End));
    }

    for artist in &axes.artists {
        draw_artist(artist, axes, &t, canvas);
    }

    if !is_heatmap {
        canvas.polyline(
            &[(rect.x, rect.bottom()), (rect.right(), rect.bottom())],
            &Stroke::solid(Color::SILVER, 1.0),
        );
    }

    if axes.show_xticklabels {
        for (value, label) in axes.x_ticks() {
            let x = t.x(value);
            canvas.polyline(
                &[(x, rect.bottom()), (x, rect.bottom() + 4.0)],
                &Stroke::solid(Color::SILVER, 1.0),
            );
            canvas.text((x, rect.bottom() + 16.0), &label, &TextStyle::tick(Anchor::Middle));
        }
    }

    if let Some(ylabel) = &axes.ylabel {
        let widest = y_ticks
            .iter()
            .map(|(_, l)| text_width(l, FONT_SIZE))
            .fold(0.0, f64::max);
        let x = (rect.x - widest - 14.0).max(12.0);
        canvas.text(
            (x, rect.y + rect.h / 2.0),
            ylabel,
            &TextStyle {
                size: 12.0,
                color: Color::BLACK,
                anchor: Anchor::Middle,
                bold: true,
                vertical: true,
            },
        );
    }

    if axes.legend {
        draw_legend(axes, rect, canvas);
    }

    if let Some(cbar) = &axes.colorbar {
        draw_colorbar(cbar.colormap, cbar.min, cbar.max, cbar.format, rect, canvas);
    }
}

fn draw_artist(artist: &Artist, axes: &Axes, t: &Transform, canvas: &mut dyn Canvas) {
    let rect = t.rect;
    match artist {
        Artist::Line(line) => {
            for run in finite_runs(&line.xs, &line.ys, t) {
                canvas.polyline(&run, &line.stroke);
            }
        }
        Artist::Fill(fill) => {
            let base = t.y(fill.baseline);
            for run in finite_runs(&fill.xs, &fill.ys, t) {
                let (Some(first), Some(last)) = (run.first().copied(), run.last().copied()) else {
                    continue;
                };
                let mut poly = Vec::with_capacity(run.len() + 2);
                poly.push((first.0, base));
                poly.extend(run);
                poly.push((last.0, base));
                canvas.polygon(&poly, Paint::new(fill.color, fill.alpha));
            }
        }
        Artist::Bars(bars) => {
            let zero = t.y(0.0);
            for (x, h) in bars.xs.iter().zip(&bars.heights) {
                if !h.is_finite() {
                    continue;
                }
                let left = t.x(x - bars.width / 2.0);
                let right = t.x(x + bars.width / 2.0);
                let top = t.y(*h);
                canvas.fill_rect(
                    Rect {
                        x: left,
                        y: top.min(zero),
                        w: (right - left).abs(),
                        h: (zero - top).abs(),
                    },
                    Paint::new(bars.color, bars.alpha),
                );
            }
        }
        Artist::Markers(markers) => {
            for (x, y) in markers.xs.iter().zip(&markers.ys) {
                if x.is_finite() && y.is_finite() {
                    canvas.circle(
                        (t.x(*x), t.y(*y)),
                        markers.radius,
                        Paint::new(markers.color, markers.alpha),
                    );
                }
            }
        }
        Artist::HLine(line) => {
            if line.value.is_finite() && t.contains_y(line.value) {
                let y = t.y(line.value);
                canvas.polyline(&[(rect.x, y), (rect.right(), y)], &line.stroke);
            }
        }
        Artist::VLine(line) => {
            if line.value.is_finite() {
                let x = t.x(line.value);
                canvas.polyline(&[(x, rect.y), (x, rect.bottom())], &line.stroke);
            }
        }
        Artist::Span(span) => {
            let x0 = t.x(span.x0);
            let x1 = t.x(span.x1);
            canvas.fill_rect(
                Rect {
                    x: x0.min(x1),
                    y: rect.y,
                    w: (x1 - x0).abs().max(1.0),
                    h: rect.h,
                },
                Paint::new(span.color, span.alpha),
            );
        }
        Artist::BoxPlot(bp) => draw_boxplot(bp, t, canvas),
        Artist::Heatmap(hm) => draw_heatmap(hm, axes, t, canvas),
    }
}

fn draw_boxplot(bp: &BoxPlot, t: &Transform, canvas: &mut dyn Canvas) {
    let cx = t.x(bp.x);
    let half = (t.x(bp.x + bp.width / 2.0) - cx).abs();
    let s = bp.stats;
    let stroke = Stroke::solid(bp.color, 1.0);

    canvas.polyline(&[(cx, t.y(s.max)), (cx, t.y(s.q3))], &stroke);
    canvas.polyline(&[(cx, t.y(s.q1)), (cx, t.y(s.min))], &stroke);
    for whisker in [s.max, s.min] {
        let y = t.y(whisker);
        canvas.polyline(&[(cx - half * 0.5, y), (cx + half * 0.5, y)], &stroke);
    }

    let top = t.y(s.q3).min(t.y(s.q1));
    let height = (t.y(s.q1) - t.y(s.q3)).abs().max(1.0);
    canvas.fill_rect(
        Rect {
            x: cx - half,
            y: top,
            w: half * 2.0,
            h: height,
        },
        Paint::new(bp.color, 0.8),
    );
    let median = t.y(s.median);
    canvas.polyline(
        &[(cx - half, median), (cx + half, median)],
        &Stroke::solid(Color::BLACK, 1.5),
    );
}

fn draw_heatmap(hm: &Heatmap, axes: &Axes, t: &Transform, canvas: &mut dyn Canvas) {
    let cols = match &axes.xaxis {
        XAxis::Categories(labels) => labels.len(),
        _ => hm.cells.first().map_or(0, Vec::len),
    };

    for (r, row) in hm.cells.iter().enumerate() {
        for (c, cell) in row.iter().enumerate().take(cols) {
            let Some(value) = cell else {
                continue;
            };
            let x0 = t.x(c as f64 - 0.5);
            let x1 = t.x(c as f64 + 0.5);
            let y0 = t.y(r as f64 - 0.5);
            let y1 = t.y(r as f64 + 0.5);
            let fill = hm.colormap.centered(*value, hm.max_abs);
            let cell_rect = Rect {
                x: x0.min(x1),
                y: y0.min(y1),
                w: (x1 - x0).abs(),
                h: (y1 - y0).abs(),
            };
            canvas.fill_rect(cell_rect, Paint::solid(fill));
            canvas.polyline(
                &[
                    (cell_rect.x, cell_rect.y),
                    (cell_rect.right(), cell_rect.y),
                    (cell_rect.right(), cell_rect.bottom()),
                    (cell_rect.x, cell_rect.bottom()),
                    (cell_rect.x, cell_rect.y),
                ],
                &Stroke::solid(Color::WHITE, 0.5),
            );

            if let Some(decimals) = hm.annot_decimals {
                let text_color = if fill.luminance() < 0.5 {
                    Color::WHITE
                } else {
                    Color::rgb(0x26, 0x26, 0x26)
                };
                canvas.text(
                    (
                        cell_rect.x + cell_rect.w / 2.0,
                        cell_rect.y + cell_rect.h / 2.0 + hm.annot_size * 0.35,
                    ),
                    &format!("{value:.decimals$}"),
                    &TextStyle {
                        size: hm.annot_size,
                        color: text_color,
                        anchor: Anchor::Middle,
                        bold: false,
                        vertical: false,
                    },
                );
            }
        }
    }
}

fn draw_legend(axes: &Axes, rect: Rect, canvas: &mut dyn Canvas) {
    let entries = axes.legend_entries();
    if entries.is_empty() {
        return;
    }

    let widest = entries
        .iter()
        .map(|(label, _, _)| text_width(label, FONT_SIZE))
        .fold(0.0, f64::max);
    let x = rect.x + 10.0;
    let mut y = rect.y + 10.0;
    canvas.fill_rect(
        Rect {
            x: x - 4.0,
            y: y - 4.0,
            w: widest + 40.0,
            h: entries.len() as f64 * 16.0 + 6.0,
        },
        Paint::new(Color::WHITE, 0.8),
    );

    for (label, color, dash) in entries {
        let stroke = Stroke {
            color,
            width: 1.5,
            dash,
            alpha: 1.0,
        };
        canvas.polyline(&[(x, y + 6.0), (x + 20.0, y + 6.0)], &stroke);
        canvas.text(
            (x + 26.0, y + 10.0),
            label,
            &TextStyle {
                color: Color::TEXT,
                ..TextStyle::tick(Anchor::Start)
            },
        );
        y += 16.0;
    }
}

fn draw_colorbar(
    colormap: Colormap,
    min: f64,
    max: f64,
    format: TickFormat,
    rect: Rect,
    canvas: &mut dyn Canvas,
) {
    const STEPS: usize = 32;
    let x = rect.right() + 12.0;
    let w = 14.0;
    let step_h = rect.h / STEPS as f64;
    let max_abs = min.abs().max(max.abs());

    for i in 0..STEPS {
        // top of the bar is the maximum
        let value = max - (max - min) * (i as f64 + 0.5) / STEPS as f64;
        canvas.fill_rect(
            Rect {
                x,
                y: rect.y + i as f64 * step_h,
                w,
                h: step_h + 0.5,
            },
            Paint::solid(colormap.centered(value, max_abs)),
        );
    }

    if max > min {
        for tick in crate::figure::nice_ticks(min, max, 5) {
            let y = rect.y + (max - tick) / (max - min) * rect.h;
            canvas.text(
                (x + w + 4.0, y + 3.5),
                &format.format(tick),
                &TextStyle::tick(Anchor::Start),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dashes_alternate_along_a_line() {
        let segments = dash_segments(&[(0.0, 0.0), (20.0, 0.0)], 4.0, 3.0);
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0], vec![(0.0, 0.0), (4.0, 0.0)]);
        assert_eq!(segments[1], vec![(7.0, 0.0), (11.0, 0.0)]);
        assert_eq!(segments[2], vec![(14.0, 0.0), (18.0, 0.0)]);
    }

    #[test]
    fn dashes_continue_across_vertices() {
        let segments = dash_segments(&[(0.0, 0.0), (2.0, 0.0), (2.0, 5.0)], 4.0, 3.0);
        assert_eq!(segments[0], vec![(0.0, 0.0), (2.0, 0.0), (2.0, 2.0)]);
    }

    #[test]
    fn non_finite_values_split_lines() {
        let rect = Rect {
            x: 0.0,
            y: 0.0,
            w: 100.0,
            h: 100.0,
        };
        let t = Transform {
            rect,
            xlim: (0.0, 4.0),
            ylim: (0.0, 1.0),
            scale: Scale::Linear,
            inverted: false,
        };
        let runs = finite_runs(&[0.0, 1.0, 2.0, 3.0, 4.0], &[0.0, 1.0, f64::NAN, 0.0, 1.0], &t);
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0], vec![(0.0, 100.0), (25.0, 0.0)]);
    }
}
