use std::f64::consts::TAU;

use super::{Anchors, ShapeContext, highest};
use crate::landmark::WorldPosition;
use crate::paint::Painter;

const PLATFORM_RADIUS: f64 = 35.0;
const PLATFORM_SIDES: usize = 6;
const SPIRE_HALF_WIDTH: f64 = 5.0;

/// Spire offsets from the anchor and their height factors.
const SPIRES: [(f64, f64, f64); 6] = [
    (0.0, -18.0, 1.1),
    (-16.0, -6.0, 0.8),
    (16.0, -6.0, 0.85),
    (-12.0, 12.0, 0.65),
    (12.0, 12.0, 0.7),
    (0.0, 5.0, 0.9),
];

/// Hexagonal plinth carrying a cluster of thin triangular spires.
pub(super) fn draw<P: Painter + ?Sized>(
    pos: &WorldPosition,
    ctx: &ShapeContext<'_>,
    painter: &mut P,
) -> Anchors {
    let h = pos.height;
    let plinth_h = h * 0.15;

    let base = ctx.ring(pos, PLATFORM_SIDES, PLATFORM_RADIUS, 0.0, 0.0);
    let top = ctx.ring(pos, PLATFORM_SIDES, PLATFORM_RADIUS, plinth_h, 0.0);
    ctx.band(painter, &base, &top, 0.6, 0.5);
    ctx.poly(painter, &top, 0.8, 0.5);

    let mut tips = Vec::with_capacity(SPIRES.len());
    for (si, &(dx, dz, height_k)) in SPIRES.iter().enumerate() {
        let foot = pos.offset(dx, 0.0, dz);
        let tip = ctx.project(pos.offset(dx, h * height_k, dz));
        let corners: Vec<_> = (0..3)
            .map(|k| {
                let angle = k as f64 / 3.0 * TAU;
                ctx.project(foot.on_circle(angle, SPIRE_HALF_WIDTH, plinth_h))
            })
            .collect();
        for k in 0..3 {
            let next = (k + 1) % 3;
            ctx.poly(painter, &[corners[k], corners[next], tip], 1.0 + si as f64 * 0.1, 1.0);
        }
        tips.push(tip);
    }

    let link_color = ctx.style.stroke(0.15);
    for i in 0..tips.len() {
        let next = (i + 1) % tips.len();
        painter.stroke_line(tips[i], tips[next], link_color, 0.6);
    }

    let peak = highest(tips.iter().copied()).unwrap_or_else(|| ctx.project(pos.at(h)));
    Anchors::from_ring(peak, &base)
}
