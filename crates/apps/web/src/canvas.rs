//! [`Painter`] over a browser 2D context.

use std::f64::consts::TAU;

use foundation::math::Vec2;
use scene::{Glow, Painter, Rgba};
use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

const LABEL_FONT_FAMILY: &str = "'Courier New', monospace";

pub struct CanvasPainter<'a> {
    ctx: &'a CanvasRenderingContext2d,
}

impl<'a> CanvasPainter<'a> {
    pub fn new(ctx: &'a CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }

    fn trace(&self, points: &[Vec2]) -> bool {
        let Some((first, rest)) = points.split_first() else {
            return false;
        };
        if rest.is_empty() {
            return false;
        }
        self.ctx.begin_path();
        self.ctx.move_to(first.x, first.y);
        for p in rest {
            self.ctx.line_to(p.x, p.y);
        }
        true
    }

    fn circle(&self, center: Vec2, radius: f64) {
        self.ctx.begin_path();
        let _ = self.ctx.arc(center.x, center.y, radius.max(0.0), 0.0, TAU);
    }
}

impl Painter for CanvasPainter<'_> {
    fn clear(&mut self, width: f64, height: f64) {
        self.ctx.clear_rect(0.0, 0.0, width, height);
    }

    fn fill_vertical_gradient(&mut self, width: f64, height: f64, stops: &[(f64, Rgba)]) {
        let gradient = self.ctx.create_linear_gradient(0.0, 0.0, 0.0, height);
        for (offset, color) in stops {
            let _ = gradient.add_color_stop(*offset as f32, &color.css());
        }
        ctx_set_fill_style(self.ctx, gradient.as_ref());
        self.ctx.fill_rect(0.0, 0.0, width, height);
    }

    fn fill_polygon(&mut self, points: &[Vec2], fill: Rgba, stroke: Rgba, line_width: f64) {
        if !self.trace(points) {
            return;
        }
        self.ctx.close_path();
        ctx_set_fill_style(self.ctx, &JsValue::from_str(&fill.css()));
        self.ctx.fill();
        ctx_set_stroke_style(self.ctx, &stroke.css());
        self.ctx.set_line_width(line_width);
        self.ctx.stroke();
    }

    fn stroke_polyline(&mut self, points: &[Vec2], color: Rgba, line_width: f64) {
        if !self.trace(points) {
            return;
        }
        ctx_set_stroke_style(self.ctx, &color.css());
        self.ctx.set_line_width(line_width);
        self.ctx.stroke();
    }

    fn fill_circle(&mut self, center: Vec2, radius: f64, color: Rgba) {
        self.circle(center, radius);
        ctx_set_fill_style(self.ctx, &JsValue::from_str(&color.css()));
        self.ctx.fill();
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f64, color: Rgba, line_width: f64) {
        self.circle(center, radius);
        ctx_set_stroke_style(self.ctx, &color.css());
        self.ctx.set_line_width(line_width);
        self.ctx.stroke();
    }

    fn fill_text(&mut self, text: &str, at: Vec2, font_px: f64, color: Rgba) {
        self.ctx.set_font(&format!("{font_px}px {LABEL_FONT_FAMILY}"));
        self.ctx.set_text_align("center");
        ctx_set_fill_style(self.ctx, &JsValue::from_str(&color.css()));
        let _ = self.ctx.fill_text(text, at.x, at.y);
    }

    fn set_glow(&mut self, glow: Option<Glow>) {
        match glow {
            Some(g) => {
                self.ctx.set_shadow_color(&g.color.css());
                self.ctx.set_shadow_blur(g.blur_px.max(0.0));
            }
            None => {
                self.ctx.set_shadow_color("transparent");
                self.ctx.set_shadow_blur(0.0);
            }
        }
    }
}

// Plain property writes; accepts both color strings and gradients.
fn ctx_set_fill_style(ctx: &CanvasRenderingContext2d, value: &JsValue) {
    let _ = js_sys::Reflect::set(ctx.as_ref(), &JsValue::from_str("fillStyle"), value);
}

fn ctx_set_stroke_style(ctx: &CanvasRenderingContext2d, value: &str) {
    let _ = js_sys::Reflect::set(
        ctx.as_ref(),
        &JsValue::from_str("strokeStyle"),
        &JsValue::from_str(value),
    );
}
