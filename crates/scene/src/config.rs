use foundation::math::{IsoCamera, ProjectionBounds, Vec2};
use runtime::DEFAULT_PHASE_STEP;

use crate::picking::HitRadii;

/// Ground grid drawn under the landmarks.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GridConfig {
    /// World units between adjacent lines.
    pub spacing: f64,
    /// Lines on each side of the origin; `2 * half_count + 1` per axis.
    pub half_count: i32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            spacing: 50.0,
            half_count: 12,
        }
    }
}

impl GridConfig {
    pub fn extent(&self) -> f64 {
        self.spacing * f64::from(self.half_count)
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SceneConfig {
    pub camera: IsoCamera,
    pub bounds: ProjectionBounds,
    /// The scene center sits this many CSS px below the canvas middle.
    pub center_offset_y: f64,
    pub grid: GridConfig,
    pub hit_radii: HitRadii,
    pub phase_step: f64,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            camera: IsoCamera::default(),
            bounds: ProjectionBounds::default(),
            center_offset_y: 80.0,
            grid: GridConfig::default(),
            hit_radii: HitRadii::default(),
            phase_step: DEFAULT_PHASE_STEP,
        }
    }
}

/// Canvas size in CSS pixels (before the device-pixel-ratio transform).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    pub fn scene_center(&self, config: &SceneConfig) -> Vec2 {
        Vec2::new(
            self.width / 2.0,
            self.height / 2.0 + config.center_offset_y,
        )
    }
}
