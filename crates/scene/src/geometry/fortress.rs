use std::f64::consts::{FRAC_PI_8, TAU};

use super::{Anchors, ShapeContext};
use crate::landmark::WorldPosition;
use crate::paint::Painter;

const OUTER_RADIUS: f64 = 38.0;
const INNER_RADIUS: f64 = OUTER_RADIUS * 0.5;
const SIDES: usize = 8;
const SCAN_LINES: usize = 4;

/// Octagonal curtain wall with corner pillars and a sweeping courtyard scan.
pub(super) fn draw<P: Painter + ?Sized>(
    pos: &WorldPosition,
    ctx: &ShapeContext<'_>,
    painter: &mut P,
) -> Anchors {
    let h = pos.height;
    let wall_h = h * 0.4;
    let pillar_h = h * 0.75;

    let outer_base = ctx.ring(pos, SIDES, OUTER_RADIUS, 0.0, FRAC_PI_8);
    let outer_top = ctx.ring(pos, SIDES, OUTER_RADIUS, wall_h, FRAC_PI_8);
    let inner_base = ctx.ring(pos, SIDES, INNER_RADIUS, 0.0, FRAC_PI_8);

    ctx.band(painter, &outer_base, &outer_top, 1.0, 1.0);
    ctx.poly(painter, &outer_top, 1.2, 1.0);

    let pillar_color = ctx.style.stroke(1.0);
    let cap_color = ctx.style.stroke(0.8);
    for i in (0..SIDES).step_by(2) {
        let angle = i as f64 / SIDES as f64 * TAU + FRAC_PI_8;
        let bottom = ctx.project(pos.at(0.0).on_circle(angle, OUTER_RADIUS, wall_h));
        let top = ctx.project(pos.at(0.0).on_circle(angle, OUTER_RADIUS, pillar_h));
        painter.stroke_line(bottom, top, pillar_color, 2.5);
        painter.fill_circle(top, 3.0, cap_color);
    }

    ctx.poly(painter, &inner_base, 0.5, 0.4);

    let scan_color = ctx.style.stroke(0.3);
    let hub = ctx.project(pos.at(2.0));
    for i in 0..SCAN_LINES {
        let angle = i as f64 / SCAN_LINES as f64 * TAU + ctx.phase * 0.4;
        let tip = ctx.project(pos.at(0.0).on_circle(angle, INNER_RADIUS * 0.6, 2.0));
        painter.stroke_line(hub, tip, scan_color, 0.8);
    }

    let peak = ctx.project(pos.at(pillar_h));
    Anchors::from_ring(peak, &outer_base)
}
