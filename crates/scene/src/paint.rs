//! Drawing seam between the scene and whatever surface hosts it.
//!
//! Generators and the renderer only talk to [`Painter`]. The browser app
//! implements it over `CanvasRenderingContext2d`; tests use
//! [`RecordingPainter`].

use foundation::math::Vec2;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Rgb(pub [u8; 3]);

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb([r, g, b])
    }

    pub fn with_alpha(self, alpha: f64) -> Rgba {
        Rgba { rgb: self, alpha }
    }

    pub fn hex(self) -> String {
        let [r, g, b] = self.0;
        format!("#{r:02X}{g:02X}{b:02X}")
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Rgba {
    pub rgb: Rgb,
    pub alpha: f64,
}

impl Rgba {
    /// Same color, alpha multiplied by `k`.
    pub fn fade(self, k: f64) -> Self {
        Self {
            rgb: self.rgb,
            alpha: self.alpha * k,
        }
    }

    pub fn with_alpha(self, alpha: f64) -> Self {
        Self {
            rgb: self.rgb,
            alpha,
        }
    }

    pub fn css(&self) -> String {
        let [r, g, b] = self.rgb.0;
        let a = if self.alpha.is_finite() {
            self.alpha.clamp(0.0, 1.0)
        } else {
            0.0
        };
        format!("rgba({r},{g},{b},{a})")
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Glow {
    pub color: Rgba,
    pub blur_px: f64,
}

pub trait Painter {
    fn clear(&mut self, width: f64, height: f64);

    /// Fills the whole surface with a top-to-bottom gradient.
    fn fill_vertical_gradient(&mut self, width: f64, height: f64, stops: &[(f64, Rgba)]);

    /// Closed ring, filled then stroked.
    fn fill_polygon(&mut self, points: &[Vec2], fill: Rgba, stroke: Rgba, line_width: f64);

    /// Open path.
    fn stroke_polyline(&mut self, points: &[Vec2], color: Rgba, line_width: f64);

    fn fill_circle(&mut self, center: Vec2, radius: f64, color: Rgba);

    fn stroke_circle(&mut self, center: Vec2, radius: f64, color: Rgba, line_width: f64);

    /// Text centered horizontally on `at`.
    fn fill_text(&mut self, text: &str, at: Vec2, font_px: f64, color: Rgba);

    /// Shadow applied to everything drawn until the next call.
    fn set_glow(&mut self, glow: Option<Glow>);

    fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Rgba, line_width: f64) {
        self.stroke_polyline(&[from, to], color, line_width);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Clear {
        width: f64,
        height: f64,
    },
    Gradient {
        height: f64,
        stops: Vec<(f64, Rgba)>,
    },
    Polygon {
        points: Vec<Vec2>,
        fill: Rgba,
        stroke: Rgba,
        line_width: f64,
    },
    Polyline {
        points: Vec<Vec2>,
        color: Rgba,
        line_width: f64,
    },
    FillCircle {
        center: Vec2,
        radius: f64,
        color: Rgba,
    },
    StrokeCircle {
        center: Vec2,
        radius: f64,
        color: Rgba,
        line_width: f64,
    },
    Text {
        text: String,
        at: Vec2,
        font_px: f64,
        color: Rgba,
    },
    Glow(Option<Glow>),
}

/// Keeps every call in order. Used by tests and headless snapshots.
#[derive(Debug, Default, Clone)]
pub struct RecordingPainter {
    pub calls: Vec<DrawCall>,
}

impl RecordingPainter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn polygons(&self) -> impl Iterator<Item = &DrawCall> + '_ {
        self.calls
            .iter()
            .filter(|c| matches!(c, DrawCall::Polygon { .. }))
    }

    pub fn texts(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Painter for RecordingPainter {
    fn clear(&mut self, width: f64, height: f64) {
        self.calls.push(DrawCall::Clear { width, height });
    }

    fn fill_vertical_gradient(&mut self, _width: f64, height: f64, stops: &[(f64, Rgba)]) {
        self.calls.push(DrawCall::Gradient {
            height,
            stops: stops.to_vec(),
        });
    }

    fn fill_polygon(&mut self, points: &[Vec2], fill: Rgba, stroke: Rgba, line_width: f64) {
        if points.len() < 2 {
            return;
        }
        self.calls.push(DrawCall::Polygon {
            points: points.to_vec(),
            fill,
            stroke,
            line_width,
        });
    }

    fn stroke_polyline(&mut self, points: &[Vec2], color: Rgba, line_width: f64) {
        if points.len() < 2 {
            return;
        }
        self.calls.push(DrawCall::Polyline {
            points: points.to_vec(),
            color,
            line_width,
        });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f64, color: Rgba) {
        self.calls.push(DrawCall::FillCircle {
            center,
            radius,
            color,
        });
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f64, color: Rgba, line_width: f64) {
        self.calls.push(DrawCall::StrokeCircle {
            center,
            radius,
            color,
            line_width,
        });
    }

    fn fill_text(&mut self, text: &str, at: Vec2, font_px: f64, color: Rgba) {
        self.calls.push(DrawCall::Text {
            text: text.to_string(),
            at,
            font_px,
            color,
        });
    }

    fn set_glow(&mut self, glow: Option<Glow>) {
        self.calls.push(DrawCall::Glow(glow));
    }
}

#[cfg(test)]
mod tests {
    use super::{DrawCall, Painter, RecordingPainter, Rgb};
    use foundation::math::Vec2;

    #[test]
    fn css_clamps_alpha() {
        let c = Rgb::new(0, 217, 255);
        assert_eq!(c.with_alpha(0.5).css(), "rgba(0,217,255,0.5)");
        assert_eq!(c.with_alpha(1.7).css(), "rgba(0,217,255,1)");
        assert_eq!(c.with_alpha(-0.2).css(), "rgba(0,217,255,0)");
        assert_eq!(c.with_alpha(f64::NAN).css(), "rgba(0,217,255,0)");
    }

    #[test]
    fn hex_is_uppercase() {
        assert_eq!(Rgb::new(0, 255, 136).hex(), "#00FF88");
    }

    #[test]
    fn recording_painter_skips_degenerate_paths() {
        let mut p = RecordingPainter::new();
        let c = Rgb::new(1, 2, 3).with_alpha(1.0);
        p.fill_polygon(&[Vec2::ZERO], c, c, 1.0);
        p.stroke_line(Vec2::ZERO, Vec2::new(1.0, 1.0), c, 1.0);
        assert_eq!(p.calls.len(), 1);
        assert!(matches!(p.calls[0], DrawCall::Polyline { .. }));
    }
}
