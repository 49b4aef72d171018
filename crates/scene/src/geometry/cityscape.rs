use foundation::math::precision::stable_total_cmp_f64;

use super::{Anchors, ShapeContext, highest};
use crate::landmark::WorldPosition;
use crate::paint::Painter;

/// One tower: offset from the landmark anchor, footprint, height factor.
struct Tower {
    dx: f64,
    dz: f64,
    width: f64,
    depth: f64,
    height_k: f64,
}

const TOWERS: [Tower; 6] = [
    Tower { dx: 0.0, dz: 0.0, width: 14.0, depth: 14.0, height_k: 1.0 },
    Tower { dx: -20.0, dz: -8.0, width: 10.0, depth: 10.0, height_k: 0.7 },
    Tower { dx: 18.0, dz: -5.0, width: 12.0, depth: 10.0, height_k: 0.85 },
    Tower { dx: -8.0, dz: 18.0, width: 10.0, depth: 12.0, height_k: 0.55 },
    Tower { dx: 15.0, dz: 16.0, width: 8.0, depth: 8.0, height_k: 0.45 },
    Tower { dx: -18.0, dz: 12.0, width: 9.0, depth: 9.0, height_k: 0.6 },
];

/// Vertical spacing of window bands, in world units.
const FLOOR_HEIGHT: f64 = 20.0;

pub(super) fn draw<P: Painter + ?Sized>(
    pos: &WorldPosition,
    ctx: &ShapeContext<'_>,
    painter: &mut P,
) -> Anchors {
    let h = pos.height;

    // Towers occlude each other, so they get their own back-to-front pass.
    let mut order: Vec<(&Tower, f64)> = TOWERS
        .iter()
        .map(|t| (t, ctx.project(pos.offset(t.dx, 0.0, t.dz)).y))
        .collect();
    order.sort_by(|a, b| stable_total_cmp_f64(a.1, b.1));

    let window_color = ctx.style.stroke(0.15);
    let mut first_base = Vec::new();
    let mut rooftops = Vec::with_capacity(TOWERS.len());

    for (tower, _) in order {
        let hw = tower.width / 2.0;
        let hd = tower.depth / 2.0;
        let bh = h * tower.height_k;
        let corners = [(-hw, -hd), (hw, -hd), (hw, hd), (-hw, hd)];

        let top: Vec<_> = corners
            .iter()
            .map(|&(cx, cz)| ctx.project(pos.offset(tower.dx + cx, bh, tower.dz + cz)))
            .collect();
        let bottom: Vec<_> = corners
            .iter()
            .map(|&(cx, cz)| ctx.project(pos.offset(tower.dx + cx, 0.0, tower.dz + cz)))
            .collect();

        ctx.poly(painter, &top, 1.5, 1.0);
        for i in 0..4 {
            let next = (i + 1) % 4;
            ctx.poly(
                painter,
                &[bottom[i], bottom[next], top[next], top[i]],
                0.8 + i as f64 * 0.15,
                0.8,
            );
        }

        let floors = (bh / FLOOR_HEIGHT).floor() as usize;
        for f in 1..=floors {
            let fy = bh * (f as f64 / (floors + 1) as f64);
            let left = ctx.project(pos.offset(tower.dx - hw, fy, tower.dz - hd));
            let right = ctx.project(pos.offset(tower.dx + hw, fy, tower.dz - hd));
            painter.stroke_line(left, right, window_color, 0.5);
        }

        rooftops.push(ctx.project(pos.offset(tower.dx, bh, tower.dz)));
        if first_base.is_empty() {
            first_base = bottom;
        }
    }

    let peak = highest(rooftops).unwrap_or_else(|| ctx.project(pos.at(h)));
    Anchors::from_ring(peak, &first_base)
}
