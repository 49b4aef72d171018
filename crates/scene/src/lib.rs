pub mod archetype;
pub mod clearance;
pub mod config;
pub mod geometry;
pub mod hover;
pub mod landmark;
pub mod paint;
pub mod picking;
pub mod render;
pub mod state;

pub use archetype::Archetype;
pub use clearance::{ClearanceTier, RequiredClearance};
pub use config::{GridConfig, SceneConfig, Viewport};
pub use hover::{HoverChange, HoverState, Selection, UiEvent};
pub use landmark::{Landmark, LandmarkSet, WorldPosition};
pub use paint::{DrawCall, Glow, Painter, RecordingPainter, Rgb, Rgba};
pub use picking::{HitRadii, PickHit, nearest_landmark};
pub use render::{FramePass, FrameSummary};
pub use state::SceneState;
