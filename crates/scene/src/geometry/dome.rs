use std::f64::consts::{FRAC_PI_2, PI, TAU};

use super::{Anchors, ShapeContext};
use crate::landmark::WorldPosition;
use crate::paint::Painter;

const BASE_RADIUS: f64 = 42.0;
const RINGS: usize = 5;
const SEGMENTS: usize = 16;
const CURVES: usize = 3;
const CURVE_SAMPLES: usize = 20;

pub(super) fn draw<P: Painter + ?Sized>(
    pos: &WorldPosition,
    ctx: &ShapeContext<'_>,
    painter: &mut P,
) -> Anchors {
    let h = pos.height;
    let peak = ctx.project(pos.at(h));

    let rings: Vec<Vec<_>> = (0..=RINGS)
        .map(|r| {
            let t = r as f64 / RINGS as f64;
            let radius = BASE_RADIUS * (1.0 - t * t);
            let y = h * (t * FRAC_PI_2).sin();
            (0..SEGMENTS)
                .map(|i| {
                    let angle = i as f64 / SEGMENTS as f64 * TAU;
                    let wobble = 1.0 + (angle * 3.0 + t * 5.0).sin() * 0.08;
                    ctx.project(pos.at(0.0).on_circle(angle, radius * wobble, y))
                })
                .collect()
        })
        .collect();

    for (r, pair) in rings.windows(2).enumerate() {
        ctx.band(painter, &pair[0], &pair[1], 0.8 + r as f64 * 0.15, 0.7);
    }

    let curve_color = ctx.style.stroke(0.25);
    for w in 0..CURVES {
        let curve: Vec<_> = (0..=CURVE_SAMPLES)
            .map(|i| {
                let t = i as f64 / CURVE_SAMPLES as f64;
                let angle = t * TAU + w as f64 * 2.1 + ctx.phase * 0.3;
                let radius = BASE_RADIUS * (0.3 + t * 0.5);
                let y = h * 0.3 + (t * PI).sin() * h * 0.4;
                ctx.project(pos.at(0.0).on_circle(angle, radius, y))
            })
            .collect();
        painter.stroke_polyline(&curve, curve_color, 0.8);
    }

    Anchors::from_ring(peak, &rings[0])
}
