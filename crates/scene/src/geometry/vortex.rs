use std::f64::consts::{PI, TAU};

use super::{Anchors, ShapeContext};
use crate::landmark::WorldPosition;
use crate::paint::Painter;

const BASE_RADIUS: f64 = 36.0;
const RINGS: usize = 6;
const SEGMENTS: usize = 20;

/// Twisting funnel. Ring rotation follows the phase, so consecutive frames
/// differ; anchors only depend on the base ring and the spire tip.
pub(super) fn draw<P: Painter + ?Sized>(
    pos: &WorldPosition,
    ctx: &ShapeContext<'_>,
    painter: &mut P,
) -> Anchors {
    let h = pos.height;

    let rings: Vec<Vec<_>> = (0..=RINGS)
        .map(|r| {
            let t = r as f64 / RINGS as f64;
            let radius = BASE_RADIUS * (1.0 - t * 0.85);
            let y = h * t * 0.8;
            let twist = t * PI * 1.5 + ctx.phase * 0.4;
            ctx.ring(pos, SEGMENTS, radius, y, twist)
        })
        .collect();

    for (r, pair) in rings.windows(2).enumerate() {
        ctx.band(painter, &pair[0], &pair[1], 0.6 + r as f64 * 0.2, 0.6);
    }

    let spire_base = ctx.project(pos.at(h * 0.8));
    let spire_tip = ctx.project(pos.at(h * 1.3));
    painter.stroke_line(spire_base, spire_tip, ctx.style.stroke(1.0), 2.0);
    let pulse = 4.0 + (ctx.phase * 2.0).sin() * 2.0;
    painter.fill_circle(spire_tip, pulse, ctx.style.stroke(0.6));

    // The base ring's own twist is phase-driven, so anchor on an unrotated ring.
    let footprint = ctx.ring(pos, SEGMENTS, BASE_RADIUS, 0.0, 0.0);
    Anchors::from_ring(spire_tip, &footprint)
}

#[cfg(test)]
mod tests {
    use super::draw;
    use crate::geometry::{ShapeContext, ShapeStyle};
    use crate::landmark::WorldPosition;
    use crate::paint::{RecordingPainter, Rgb};
    use foundation::math::{IsoCamera, Vec2};

    fn ctx(camera: &IsoCamera, phase: f64) -> ShapeContext<'_> {
        ShapeContext {
            camera,
            center: Vec2::new(400.0, 300.0),
            phase,
            style: ShapeStyle {
                rgb: Rgb::new(0, 255, 255),
                fill_alpha: 0.07,
                stroke_alpha: 0.4,
                line_width: 1.2,
            },
        }
    }

    #[test]
    fn rings_rotate_with_phase_but_anchors_hold_still() {
        let camera = IsoCamera::default();
        let pos = WorldPosition::new(50.0, -20.0, 80.0);

        let mut a = RecordingPainter::new();
        let mut b = RecordingPainter::new();
        let anchors_a = draw(&pos, &ctx(&camera, 0.0), &mut a);
        let anchors_b = draw(&pos, &ctx(&camera, 1.0), &mut b);

        assert_ne!(a.calls, b.calls);
        assert_eq!(anchors_a, anchors_b);
    }
}
