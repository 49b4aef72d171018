use foundation::math::precision::stable_total_cmp_f64;
use foundation::math::{IsoCamera, Vec2};

use crate::landmark::LandmarkSet;

/// Pointer capture radii in CSS pixels at zoom 1.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct HitRadii {
    pub hover_px: f64,
    pub click_px: f64,
}

impl Default for HitRadii {
    fn default() -> Self {
        Self {
            hover_px: 40.0,
            click_px: 35.0,
        }
    }
}

impl HitRadii {
    pub fn hover(&self, camera: &IsoCamera) -> f64 {
        self.hover_px * camera.hit_scale()
    }

    pub fn click(&self, camera: &IsoCamera) -> f64 {
        self.click_px * camera.hit_scale()
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PickHit {
    /// Index into the [`LandmarkSet`].
    pub index: usize,
    pub distance: f64,
}

/// Nearest landmark whose screen anchor lies strictly within `radius` of
/// `pointer`.
///
/// Ordering contract:
/// - The smallest distance wins.
/// - On exactly equal distances the lower id wins (the set is iterated in id
///   order, so the earlier index is kept).
///
/// Landmarks that have not been drawn this frame have no anchor and are
/// skipped.
pub fn nearest_landmark(set: &LandmarkSet, pointer: Vec2, radius: f64) -> Option<PickHit> {
    let mut best: Option<PickHit> = None;

    for (index, landmark) in set.iter().enumerate() {
        let Some(anchor) = landmark.screen_anchor else {
            continue;
        };
        let distance = anchor.distance(pointer);
        if distance.is_nan() || distance >= radius {
            continue;
        }

        best = match best {
            None => Some(PickHit { index, distance }),
            Some(b) => {
                let ord = stable_total_cmp_f64(distance, b.distance)
                    .then_with(|| index.cmp(&b.index));
                if ord.is_lt() {
                    Some(PickHit { index, distance })
                } else {
                    Some(b)
                }
            }
        };
    }

    best
}
