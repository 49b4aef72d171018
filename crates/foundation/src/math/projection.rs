//! Fixed isometric-style perspective camera.
//!
//! The camera looks at the ground plane from a constant pitch after a half
//! turn about the vertical axis. Nothing here holds state between calls: the
//! renderer and the hit-tester both go through [`IsoCamera::project`], so a
//! point is always placed at the same pixel by both.

use super::{Vec2, Vec3};

/// Camera constants for the zone map.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct IsoCamera {
    /// Pitch applied to `(y, z)` after the half turn. Negative tilts the far
    /// side of the ground plane up the screen.
    pub tilt_rad: f64,
    /// World units to CSS pixels at the focal plane.
    pub scale: f64,
    /// Distance from the eye to the focal plane, in world units.
    pub focal_length: f64,
    pub zoom: f64,
    pub pan: Vec2,
}

impl Default for IsoCamera {
    fn default() -> Self {
        Self {
            tilt_rad: -0.35,
            scale: 1.6,
            focal_length: 600.0,
            zoom: 1.0,
            pan: Vec2::ZERO,
        }
    }
}

impl IsoCamera {
    /// Half turn about the vertical axis followed by the tilt.
    ///
    /// Returns `(x', rotated_y, rotated_z)` in camera space.
    #[inline]
    fn to_camera(&self, world: Vec3) -> (f64, f64, f64) {
        let x = -world.x;
        let z = -world.z;
        let (sin_t, cos_t) = self.tilt_rad.sin_cos();
        let ry = world.y * cos_t - z * sin_t;
        let rz = world.y * sin_t + z * cos_t;
        (x, ry, rz)
    }

    /// Perspective divisor `focal_length + rotated_z` for `world`.
    ///
    /// Strictly positive for every point inside [`ProjectionBounds`].
    pub fn depth_denominator(&self, world: Vec3) -> f64 {
        let (_, _, rz) = self.to_camera(world);
        self.focal_length + rz
    }

    /// Projects a world point to screen space around `center`.
    ///
    /// Callers keep their points inside [`ProjectionBounds`]; outside it the
    /// divisor may reach zero and the result is meaningless.
    pub fn project(&self, world: Vec3, center: Vec2) -> Vec2 {
        let (x, ry, rz) = self.to_camera(world);
        let denom = self.focal_length + rz;
        debug_assert!(
            denom > 0.0,
            "projection divisor {denom} <= 0 for {world:?}; point is outside ProjectionBounds"
        );
        let k = (self.focal_length / denom) * self.scale * self.zoom;
        Vec2::new(center.x + self.pan.x + x * k, center.y + self.pan.y - ry * k)
    }

    /// Hit radii grow with zoom but never shrink below 60% of nominal.
    pub fn hit_scale(&self) -> f64 {
        self.zoom.max(0.6)
    }
}

/// Region of world space every generator and the ground grid stay inside.
///
/// For the default camera the divisor is smallest at the far grid edge
/// (`z = +600`, `y = 0`), where it is about 36 world units. Landmark anchors
/// are clamped to `|x|, |z| <= anchor_extent` and heights to
/// `[0, max_landmark_height]`; generators place points at most
/// `footprint_radius` from their anchor and between `min_y` and
/// `max_y_factor * height + max_y_slack`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ProjectionBounds {
    pub anchor_extent: f64,
    pub footprint_radius: f64,
    pub max_landmark_height: f64,
    pub min_y: f64,
    pub max_y_factor: f64,
    pub max_y_slack: f64,
    pub grid_extent: f64,
}

impl Default for ProjectionBounds {
    fn default() -> Self {
        Self {
            anchor_extent: 400.0,
            footprint_radius: 60.0,
            max_landmark_height: 160.0,
            min_y: -40.0,
            max_y_factor: 1.3,
            max_y_slack: 10.0,
            grid_extent: 600.0,
        }
    }
}

impl ProjectionBounds {
    pub fn clamp_anchor(&self, v: f64) -> f64 {
        v.clamp(-self.anchor_extent, self.anchor_extent)
    }

    pub fn clamp_height(&self, h: f64) -> f64 {
        h.clamp(0.0, self.max_landmark_height)
    }

    pub fn max_y(&self) -> f64 {
        self.max_y_factor * self.max_landmark_height + self.max_y_slack
    }

    /// Corner points of the landmark envelope and the grid, the extremes of
    /// the projection divisor over this region (it is linear in `y` and `z`).
    pub fn extreme_points(&self) -> Vec<Vec3> {
        let h = self.anchor_extent + self.footprint_radius;
        let mut out = Vec::with_capacity(12);
        for &x in &[-h, h] {
            for &z in &[-h, h] {
                for &y in &[self.min_y, self.max_y()] {
                    out.push(Vec3::new(x, y, z));
                }
            }
        }
        let g = self.grid_extent;
        for &z in &[-g, g] {
            out.push(Vec3::new(0.0, 0.0, z));
            out.push(Vec3::new(g, 0.0, z));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::{IsoCamera, ProjectionBounds};
    use crate::math::{Vec2, Vec3};

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    #[test]
    fn origin_projects_to_center() {
        let cam = IsoCamera::default();
        let p = cam.project(Vec3::new(0.0, 0.0, 0.0), Vec2::new(400.0, 380.0));
        assert_close(p.x, 400.0, 1e-9);
        assert_close(p.y, 380.0, 1e-9);
    }

    #[test]
    fn half_turn_mirrors_x() {
        let cam = IsoCamera::default();
        let c = Vec2::new(0.0, 0.0);
        let right = cam.project(Vec3::new(10.0, 0.0, 0.0), c);
        assert!(right.x < 0.0);
        assert_close(right.y, 0.0, 1e-9);
    }

    #[test]
    fn height_moves_up_the_screen() {
        let cam = IsoCamera::default();
        let c = Vec2::new(0.0, 0.0);
        let ground = cam.project(Vec3::new(0.0, 0.0, 0.0), c);
        let raised = cam.project(Vec3::new(0.0, 50.0, 0.0), c);
        assert!(raised.y < ground.y);
    }

    #[test]
    fn matches_hand_computed_value() {
        let cam = IsoCamera::default();
        let (s, c) = (-0.35f64).sin_cos();
        // world (20, 30, 40): x' = -20, z' = -40
        let ry = 30.0 * c - (-40.0) * s;
        let rz = 30.0 * s + (-40.0) * c;
        let k = 600.0 / (600.0 + rz) * 1.6;
        let p = cam.project(Vec3::new(20.0, 30.0, 40.0), Vec2::new(100.0, 200.0));
        assert_close(p.x, 100.0 - 20.0 * k, 1e-9);
        assert_close(p.y, 200.0 - ry * k, 1e-9);
    }

    #[test]
    fn pan_and_zoom_apply_after_perspective() {
        let mut cam = IsoCamera::default();
        let w = Vec3::new(15.0, 5.0, -10.0);
        let base = cam.project(w, Vec2::ZERO);
        cam.zoom = 2.0;
        cam.pan = Vec2::new(3.0, -4.0);
        let zoomed = cam.project(w, Vec2::ZERO);
        assert_close(zoomed.x, base.x * 2.0 + 3.0, 1e-9);
        assert_close(zoomed.y, base.y * 2.0 - 4.0, 1e-9);
    }

    #[test]
    fn divisor_is_positive_over_documented_bounds() {
        let cam = IsoCamera::default();
        let bounds = ProjectionBounds::default();
        for p in bounds.extreme_points() {
            let d = cam.depth_denominator(p);
            assert!(d > 30.0, "divisor {d} too small at {p:?}");
        }
    }

    #[test]
    fn hit_scale_has_floor() {
        let mut cam = IsoCamera::default();
        assert_eq!(cam.hit_scale(), 1.0);
        cam.zoom = 0.2;
        assert_eq!(cam.hit_scale(), 0.6);
    }
}
