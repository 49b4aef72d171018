use std::f64::consts::TAU;

use super::{Anchors, ShapeContext};
use crate::landmark::WorldPosition;
use crate::paint::Painter;

const BASE_RADIUS: f64 = 40.0;
const SPIKES: usize = 8;
const GLITCH_LINES: usize = 5;

/// Sunken pit inside a jagged raised rim; the label sits on the pit.
pub(super) fn draw<P: Painter + ?Sized>(
    pos: &WorldPosition,
    ctx: &ShapeContext<'_>,
    painter: &mut P,
) -> Anchors {
    let h = pos.height;
    let rim_h = h * 0.35;
    let pit_depth = h * 0.15;

    let rim: Vec<_> = (0..SPIKES)
        .map(|i| {
            let fi = i as f64;
            let angle = fi / SPIKES as f64 * TAU;
            let r = BASE_RADIUS * (0.85 + (fi * 3.7).sin() * 0.25);
            let spike_h = rim_h * (0.6 + (fi * 2.3).sin() * 0.4);
            ctx.project(pos.at(0.0).on_circle(angle, r, spike_h))
        })
        .collect();
    let base = ctx.ring(pos, SPIKES, BASE_RADIUS, 0.0, 0.0);
    let pit = ctx.project(pos.at(-pit_depth));

    for i in 0..SPIKES {
        let next = (i + 1) % SPIKES;
        ctx.poly(painter, &[base[i], base[next], rim[next], rim[i]], 1.0, 1.0);
        ctx.poly(painter, &[rim[i], rim[next], pit], 1.5, 1.0);
    }

    let glitch = ctx.style.stroke(0.3);
    let reach = BASE_RADIUS * 0.3;
    for i in 0..GLITCH_LINES {
        let fi = i as f64;
        let angle = fi / GLITCH_LINES as f64 * TAU + ctx.phase * 0.5;
        let y = -pit_depth * 0.5 + (ctx.phase + fi).sin() * 5.0;
        let tip = ctx.project(pos.at(0.0).on_circle(angle, reach, y));
        painter.stroke_line(pit, tip, glitch, 0.8);
    }

    Anchors::from_ring(pit, &rim)
}
