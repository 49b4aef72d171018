use super::{Anchors, ShapeContext};
use crate::landmark::WorldPosition;
use crate::paint::Painter;

const HALF_BASE: f64 = 35.0;

/// Square pyramid; the shape for any landmark without a bespoke archetype.
pub(super) fn draw<P: Painter + ?Sized>(
    pos: &WorldPosition,
    ctx: &ShapeContext<'_>,
    painter: &mut P,
) -> Anchors {
    let peak = ctx.project(pos.at(pos.height));
    let base: Vec<_> = [
        (-HALF_BASE, -HALF_BASE),
        (HALF_BASE, -HALF_BASE),
        (HALF_BASE, HALF_BASE),
        (-HALF_BASE, HALF_BASE),
    ]
    .into_iter()
    .map(|(dx, dz)| ctx.project(pos.offset(dx, 0.0, dz)))
    .collect();

    const FACE_FILL: [f64; 4] = [1.0, 1.2, 0.8, 1.1];
    for (i, fill_k) in FACE_FILL.into_iter().enumerate() {
        let next = (i + 1) % base.len();
        ctx.poly(painter, &[base[i], base[next], peak], fill_k, 1.0);
    }

    Anchors::from_ring(peak, &base)
}
