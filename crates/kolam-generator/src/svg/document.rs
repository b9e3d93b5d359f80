//! Minimal SVG writer used by the pattern styles

use quick_xml::escape::escape;
use std::fmt::{self, Write};

const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// A point in SVG user space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Point at `radius` from `self` along `angle` (radians, clockwise from +x)
    pub fn polar(&self, angle: f64, radius: f64) -> Self {
        Self::new(self.x + angle.cos() * radius, self.y + angle.sin() * radius)
    }

    pub fn midpoint(&self, other: &Point) -> Self {
        Self::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

/// Number formatter: shortest round-trip form, `-0` and non-finite values print as `0`
struct Num(f64);

impl fmt::Display for Num {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.0.is_finite() || self.0 == 0.0 {
            f.write_str("0")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// Stroke presentation attributes
#[derive(Debug, Clone)]
pub struct Stroke<'a> {
    color: &'a str,
    width: f64,
    round_cap: bool,
    round_join: bool,
    dash: Option<f64>,
    opacity: Option<f64>,
}

impl<'a> Stroke<'a> {
    pub fn new(color: &'a str, width: f64) -> Self {
        Self {
            color,
            width,
            round_cap: false,
            round_join: false,
            dash: None,
            opacity: None,
        }
    }

    pub fn round_cap(mut self) -> Self {
        self.round_cap = true;
        self
    }

    pub fn round_join(mut self) -> Self {
        self.round_join = true;
        self
    }

    pub fn dashed(mut self, length: f64) -> Self {
        self.dash = Some(length);
        self
    }

    pub fn opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity);
        self
    }

    fn write_attrs(&self, out: &mut String) {
        let _ = write!(
            out,
            r#" stroke="{}" stroke-width="{}""#,
            escape(self.color),
            Num(self.width)
        );
        if self.round_cap {
            out.push_str(r#" stroke-linecap="round""#);
        }
        if self.round_join {
            out.push_str(r#" stroke-linejoin="round""#);
        }
        if let Some(dash) = self.dash {
            let _ = write!(out, r#" stroke-dasharray="{}""#, Num(dash));
        }
        if let Some(opacity) = self.opacity {
            let _ = write!(out, r#" opacity="{}""#, Num(opacity));
        }
    }
}

/// Append-only SVG document
pub struct SvgDocument {
    buf: String,
}

impl SvgDocument {
    /// Open a document of the given size with a full-canvas background rectangle
    pub fn new(width: f64, height: f64, background: &str) -> Self {
        let mut buf = String::with_capacity(4096);
        let _ = write!(
            buf,
            r#"<svg xmlns="{ns}" viewBox="0 0 {w} {h}" width="{w}" height="{h}">"#,
            ns = SVG_NS,
            w = Num(width),
            h = Num(height)
        );
        let _ = write!(
            buf,
            r#"<rect width="100%" height="100%" fill="{}"/>"#,
            escape(background)
        );
        Self { buf }
    }

    /// Filled circle, used for grid dots and center markers
    pub fn dot(&mut self, center: Point, radius: f64, fill: &str) {
        let _ = write!(
            self.buf,
            r#"<circle cx="{}" cy="{}" r="{}" fill="{}"/>"#,
            Num(center.x),
            Num(center.y),
            Num(radius),
            escape(fill)
        );
    }

    /// Unfilled stroked circle
    pub fn ring(&mut self, center: Point, radius: f64, stroke: &Stroke<'_>) {
        let _ = write!(
            self.buf,
            r#"<circle cx="{}" cy="{}" r="{}" fill="none""#,
            Num(center.x),
            Num(center.y),
            Num(radius)
        );
        stroke.write_attrs(&mut self.buf);
        self.buf.push_str("/>");
    }

    /// Quadratic Bézier from `from` to `to` through `ctrl`
    pub fn quadratic(&mut self, from: Point, ctrl: Point, to: Point, stroke: &Stroke<'_>) {
        let _ = write!(
            self.buf,
            r#"<path d="M {} {} Q {} {} {} {}" fill="none""#,
            Num(from.x),
            Num(from.y),
            Num(ctrl.x),
            Num(ctrl.y),
            Num(to.x),
            Num(to.y)
        );
        stroke.write_attrs(&mut self.buf);
        self.buf.push_str("/>");
    }

    /// Cubic Bézier from `from` to `to` with two control points
    pub fn cubic(&mut self, from: Point, ctrl1: Point, ctrl2: Point, to: Point, stroke: &Stroke<'_>) {
        let _ = write!(
            self.buf,
            r#"<path d="M {} {} C {} {} {} {} {} {}" fill="none""#,
            Num(from.x),
            Num(from.y),
            Num(ctrl1.x),
            Num(ctrl1.y),
            Num(ctrl2.x),
            Num(ctrl2.y),
            Num(to.x),
            Num(to.y)
        );
        stroke.write_attrs(&mut self.buf);
        self.buf.push_str("/>");
    }

    pub fn line(&mut self, from: Point, to: Point, stroke: &Stroke<'_>) {
        let _ = write!(
            self.buf,
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}""#,
            Num(from.x),
            Num(from.y),
            Num(to.x),
            Num(to.y)
        );
        stroke.write_attrs(&mut self.buf);
        self.buf.push_str("/>");
    }

    /// Closed unfilled polygon
    pub fn polygon(&mut self, points: &[Point], stroke: &Stroke<'_>) {
        let coords = points
            .iter()
            .map(|p| format!("{},{}", Num(p.x), Num(p.y)))
            .collect::<Vec<_>>()
            .join(" ");

        let _ = write!(self.buf, r#"<polygon points="{}" fill="none""#, coords);
        stroke.write_attrs(&mut self.buf);
        self.buf.push_str("/>");
    }

    /// Close the root element and return the markup
    pub fn finish(mut self) -> String {
        self.buf.push_str("</svg>");
        self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbers_render_like_coordinates() {
        assert_eq!(Num(50.0).to_string(), "50");
        assert_eq!(Num(37.5).to_string(), "37.5");
        assert_eq!(Num(-0.0).to_string(), "0");
        assert_eq!(Num(f64::NAN).to_string(), "0");
    }

    #[test]
    fn test_empty_document() {
        let doc = SvgDocument::new(100.0, 60.0, "transparent");
        assert_eq!(
            doc.finish(),
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 60" width="100" height="60"><rect width="100%" height="100%" fill="transparent"/></svg>"#
        );
    }

    #[test]
    fn test_stroke_attributes() {
        let mut doc = SvgDocument::new(10.0, 10.0, "none");
        let stroke = Stroke::new("#333", 1.4).round_cap().dashed(4.0);
        doc.line(Point::new(0.0, 0.0), Point::new(5.0, 5.0), &stroke);

        let svg = doc.finish();
        assert!(svg.contains(
            r##"<line x1="0" y1="0" x2="5" y2="5" stroke="#333" stroke-width="1.4" stroke-linecap="round" stroke-dasharray="4"/>"##
        ));
    }

    #[test]
    fn test_colors_are_escaped() {
        let mut doc = SvgDocument::new(10.0, 10.0, "none");
        doc.dot(Point::new(1.0, 1.0), 1.0, r#""/><script>"#);

        let svg = doc.finish();
        assert!(!svg.contains("<script>"));
        assert!(svg.contains("&quot;/&gt;&lt;script&gt;"));
    }

    #[test]
    fn test_stroke_color_is_escaped() {
        let mut doc = SvgDocument::new(10.0, 10.0, "a&b");
        let stroke = Stroke::new("red' onload='x", 1.0);
        doc.line(Point::new(0.0, 0.0), Point::new(1.0, 1.0), &stroke);

        let svg = doc.finish();
        assert!(svg.contains(r#"fill="a&amp;b""#));
        assert!(svg.contains(r#"stroke="red&apos; onload=&apos;x""#));
    }

    #[test]
    fn test_polar_and_midpoint() {
        let center = Point::new(10.0, 10.0);
        let east = center.polar(0.0, 5.0);
        assert!((east.x - 15.0).abs() < 1e-9);
        assert!((east.y - 10.0).abs() < 1e-9);

        let mid = center.midpoint(&Point::new(20.0, 30.0));
        assert_eq!(mid, Point::new(15.0, 20.0));
    }
}
