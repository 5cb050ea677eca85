use std::fmt::Write as _;

use super::{Anchor, Canvas, Paint, TextStyle};
use crate::figure::{Rect, Stroke};
use crate::format::escape_xml;

/// Builds a standalone SVG document as a string.
pub struct SvgCanvas {
    body: String,
    header: String,
}

impl SvgCanvas {
    pub fn new(width: f64, height: f64, fontname: &str) -> Self {
        let header = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}"><style>text{{font-family:{font},sans-serif;font-size:10px;fill:#666}}</style>"#,
            w = width,
            h = height,
            font = escape_xml(fontname),
        );
        Self {
            body: String::new(),
            header,
        }
    }

    pub fn finish(self) -> String {
        let mut svg = self.header;
        svg.push_str(&self.body);
        svg.push_str("</svg>");
        svg
    }
}

fn opacity(attr: &str, alpha: f64) -> String {
    if alpha < 1.0 {
        format!(r#" {attr}="{alpha:.2}""#)
    } else {
        String::new()
    }
}

fn points_attr(points: &[(f64, f64)]) -> String {
    points
        .iter()
        .map(|(x, y)| format!("{x:.2},{y:.2}"))
        .collect::<Vec<_>>()
        .join(" ")
}

impl Canvas for SvgCanvas {
    fn fill_rect(&mut self, rect: Rect, paint: Paint) {
        let _ = write!(
            self.body,
            r#"<rect x="{x:.2}" y="{y:.2}" width="{w:.2}" height="{h:.2}" fill="{color}"{op} />"#,
            x = rect.x,
            y = rect.y,
            w = rect.w,
            h = rect.h,
            color = paint.color.to_hex(),
            op = opacity("fill-opacity", paint.alpha),
        );
    }

    fn polyline(&mut self, points: &[(f64, f64)], stroke: &Stroke) {
        if points.len() < 2 {
            return;
        }
        let dash = if stroke.dash { "4 3" } else { "none" };
        let _ = write!(
            self.body,
            r#"<polyline fill="none" stroke="{color}" stroke-width="{width}" stroke-dasharray="{dash}"{op} points="{points}" />"#,
            color = stroke.color.to_hex(),
            width = stroke.width,
            op = opacity("stroke-opacity", stroke.alpha),
            points = points_attr(points),
        );
    }

    fn polygon(&mut self, points: &[(f64, f64)], paint: Paint) {
        if points.len() < 3 {
            return;
        }
        let _ = write!(
            self.body,
            r#"<polygon fill="{color}"{op} stroke="none" points="{points}" />"#,
            color = paint.color.to_hex(),
            op = opacity("fill-opacity", paint.alpha),
            points = points_attr(points),
        );
    }

    fn circle(&mut self, center: (f64, f64), radius: f64, paint: Paint) {
        let _ = write!(
            self.body,
            r#"<circle cx="{x:.2}" cy="{y:.2}" r="{radius:.2}" fill="{color}"{op} />"#,
            x = center.0,
            y = center.1,
            color = paint.color.to_hex(),
            op = opacity("fill-opacity", paint.alpha),
        );
    }

    fn text(&mut self, pos: (f64, f64), text: &str, style: &TextStyle) {
        let anchor = match style.anchor {
            Anchor::Start => "start",
            Anchor::Middle => "middle",
            Anchor::End => "end",
        };
        let weight = if style.bold { r#" font-weight="bold""# } else { "" };
        let rotate = if style.vertical {
            format!(r#" transform="rotate(-90 {:.2} {:.2})""#, pos.0, pos.1)
        } else {
            String::new()
        };
        let _ = write!(
            self.body,
            r#"<text x="{x:.2}" y="{y:.2}" text-anchor="{anchor}" fill="{color}" font-size="{size}"{weight}{rotate}>{label}</text>"#,
            x = pos.0,
            y = pos.1,
            color = style.color.to_hex(),
            size = style.size,
            label = escape_xml(text),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Color;

    #[test]
    fn document_wraps_elements() {
        let mut canvas = SvgCanvas::new(100.0, 50.0, "Arial");
        canvas.fill_rect(
            Rect {
                x: 0.0,
                y: 0.0,
                w: 10.0,
                h: 5.0,
            },
            Paint::new(Color::RED, 0.5),
        );
        canvas.polyline(&[(0.0, 0.0), (1.0, 1.0)], &Stroke::dashed(Color::BLACK, 1.5));
        canvas.text(
            (5.0, 5.0),
            "P&L",
            &TextStyle {
                size: 12.0,
                color: Color::BLACK,
                anchor: Anchor::Middle,
                bold: true,
                vertical: false,
            },
        );
        let svg = canvas.finish();
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains(r##"fill="#ff0000" fill-opacity="0.50""##));
        assert!(svg.contains(r#"stroke-dasharray="4 3""#));
        assert!(svg.contains(">P&amp;L</text>"));
        assert!(svg.contains(r#"font-weight="bold""#));
    }

    #[test]
    fn degenerate_shapes_are_skipped() {
        let mut canvas = SvgCanvas::new(10.0, 10.0, "Arial");
        canvas.polyline(&[(0.0, 0.0)], &Stroke::solid(Color::BLACK, 1.0));
        canvas.polygon(&[(0.0, 0.0), (1.0, 1.0)], Paint::solid(Color::BLACK));
        assert!(!canvas.finish().contains("<poly"));
    }
}
