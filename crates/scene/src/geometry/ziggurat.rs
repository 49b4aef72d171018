use super::{Anchors, ShapeContext};
use crate::landmark::WorldPosition;
use crate::paint::Painter;

const BASE_HALF_EXTENT: f64 = 40.0;
const TIERS: usize = 5;

/// Stepped rectangular terraces, narrower in depth than in width.
pub(super) fn draw<P: Painter + ?Sized>(
    pos: &WorldPosition,
    ctx: &ShapeContext<'_>,
    painter: &mut P,
) -> Anchors {
    let h = pos.height;

    let tiers: Vec<Vec<_>> = (0..=TIERS)
        .map(|t| {
            let p = t as f64 / TIERS as f64;
            let rx = BASE_HALF_EXTENT * (1.0 - p * 0.75);
            let rz = rx * 0.7;
            let y = h * p;
            [(-rx, -rz), (rx, -rz), (rx, rz), (-rx, rz)]
                .into_iter()
                .map(|(dx, dz)| ctx.project(pos.offset(dx, y, dz)))
                .collect()
        })
        .collect();

    for (t, pair) in tiers.windows(2).enumerate() {
        let fade = 0.7 + t as f64 * 0.2;
        ctx.poly(painter, &pair[1], fade * 1.3, 1.0);
        ctx.band(painter, &pair[0], &pair[1], fade, 0.8);
    }

    let apex = ctx.project(pos.at(h * 1.05));
    painter.fill_circle(apex, 3.0, ctx.style.stroke(0.7));

    Anchors::from_ring(apex, &tiers[0])
}
