use std::f64::consts::{FRAC_PI_6, TAU};

use super::{Anchors, ShapeContext};
use crate::landmark::WorldPosition;
use crate::paint::Painter;

const BASE_RADIUS: f64 = 28.0;
const SIDES: usize = 6;
const RING_SEGMENTS: usize = 12;

/// Hexagonal frustums stacked to an apex, circled by two counter-paced rings.
pub(super) fn draw<P: Painter + ?Sized>(
    pos: &WorldPosition,
    ctx: &ShapeContext<'_>,
    painter: &mut P,
) -> Anchors {
    let h = pos.height;
    let peak = ctx.project(pos.at(h * 1.2));

    let layers = [
        (0.0, BASE_RADIUS),
        (h * 0.3, BASE_RADIUS * 0.7),
        (h * 0.6, BASE_RADIUS * 0.45),
        (h * 0.85, BASE_RADIUS * 0.2),
    ];
    let rings: Vec<Vec<_>> = layers
        .iter()
        .map(|&(y, r)| ctx.ring(pos, SIDES, r, y, FRAC_PI_6))
        .collect();

    for (l, pair) in rings.windows(2).enumerate() {
        ctx.band(painter, &pair[0], &pair[1], 1.0 + l as f64 * 0.3, 1.0);
    }

    let top = &rings[rings.len() - 1];
    for i in 0..SIDES {
        let next = (i + 1) % SIDES;
        ctx.poly(painter, &[top[i], top[next], peak], 2.0, 1.0);
    }

    let ring_color = ctx.style.stroke(0.5);
    for (k, level) in [h * 0.35, h * 0.65].into_iter().enumerate() {
        let fk = k as f64;
        let radius = BASE_RADIUS * (1.3 + fk * 0.2);
        let rotation = ctx.phase * (0.3 + fk * 0.2);
        let outline: Vec<_> = (0..=RING_SEGMENTS)
            .map(|i| {
                let angle = i as f64 / RING_SEGMENTS as f64 * TAU + rotation;
                ctx.project(pos.at(0.0).on_circle(angle, radius, level))
            })
            .collect();
        painter.stroke_polyline(&outline, ring_color, 1.0);
    }

    Anchors::from_ring(peak, &rings[0])
}
