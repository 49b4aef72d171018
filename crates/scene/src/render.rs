//! Frame composition.
//!
//! A frame is: background, ground grid, then every landmark in
//! painter's-algorithm order, run twice. The [`FramePass::Geometry`] pass
//! draws solids and writes each landmark's anchors; the [`FramePass::Markers`]
//! pass reads those anchors for dots and labels, so every label sits above
//! every solid.
//!
//! Rendering never advances the animation phase. Two renders of an
//! unchanged state produce identical draw calls and anchors.

use std::borrow::Cow;

use foundation::math::precision::stable_total_cmp_f64;
use foundation::math::{IsoCamera, Vec2, Vec3};

use crate::clearance::ClearanceTier;
use crate::config::{SceneConfig, Viewport};
use crate::geometry::{ShapeContext, ShapeStyle, draw_landmark};
use crate::landmark::{Landmark, LandmarkSet};
use crate::paint::{Glow, Painter, Rgb, Rgba};

pub const BACKGROUND_STOPS: [(f64, Rgba); 3] = [
    (0.0, Rgba { rgb: Rgb::new(0x04, 0x07, 0x10), alpha: 1.0 }),
    (0.4, Rgba { rgb: Rgb::new(0x0a, 0x0e, 0x27), alpha: 1.0 }),
    (1.0, Rgba { rgb: Rgb::new(0x0d, 0x12, 0x33), alpha: 1.0 }),
];

const GRID_RGB: Rgb = Rgb::new(0, 217, 255);
const LOCKED_RGB: Rgb = Rgb::new(255, 0, 85);

const LABEL_MAX_CHARS: usize = 20;
const LABEL_KEEP_CHARS: usize = 18;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FramePass {
    Geometry,
    Markers,
}

impl FramePass {
    pub const ORDER: [FramePass; 2] = [FramePass::Geometry, FramePass::Markers];
}

/// Everything a frame reads besides the landmarks themselves.
#[derive(Debug, Copy, Clone)]
pub struct FrameParams<'a> {
    pub config: &'a SceneConfig,
    pub viewport: Viewport,
    pub hovered: Option<&'a str>,
    pub phase: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FrameSummary {
    /// Landmark ids, back to front.
    pub draw_order: Vec<String>,
    pub phase: f64,
}

/// Draws one frame and rewrites every landmark's anchors.
pub fn render_frame<P: Painter + ?Sized>(
    params: &FrameParams<'_>,
    landmarks: &mut LandmarkSet,
    painter: &mut P,
) -> FrameSummary {
    let FrameParams {
        config,
        viewport,
        hovered,
        phase,
    } = *params;
    let camera = &config.camera;
    let center = viewport.scene_center(config);

    painter.clear(viewport.width, viewport.height);
    painter.fill_vertical_gradient(viewport.width, viewport.height, &BACKGROUND_STOPS);
    draw_grid(config, center, painter);

    landmarks.invalidate_anchors();
    let order = depth_order(landmarks, camera, center);

    for pass in FramePass::ORDER {
        for &index in &order {
            let Some(landmark) = landmarks.get_mut(index) else {
                continue;
            };
            let is_hovered = hovered == Some(landmark.id.as_str());
            match pass {
                FramePass::Geometry => {
                    draw_geometry(landmark, camera, center, is_hovered, phase, painter);
                }
                FramePass::Markers => draw_marker(landmark, is_hovered, phase, painter),
            }
        }
    }

    FrameSummary {
        draw_order: order
            .iter()
            .filter_map(|&i| landmarks.get(i).map(|l| l.id.clone()))
            .collect(),
        phase,
    }
}

/// Indices into `set`, back to front by the projected y of each ground
/// anchor. The sort is stable, so equal depths keep id order.
pub fn depth_order(set: &LandmarkSet, camera: &IsoCamera, center: Vec2) -> Vec<usize> {
    let mut keyed: Vec<(usize, f64)> = set
        .iter()
        .enumerate()
        .map(|(i, l)| (i, camera.project(l.position.at(0.0), center).y))
        .collect();
    keyed.sort_by(|a, b| stable_total_cmp_f64(a.1, b.1));
    keyed.into_iter().map(|(i, _)| i).collect()
}

fn draw_grid<P: Painter + ?Sized>(config: &SceneConfig, center: Vec2, painter: &mut P) {
    let camera = &config.camera;
    let n = config.grid.half_count;
    let extent = config.grid.extent();

    for i in -n..=n {
        let offset = f64::from(i) * config.grid.spacing;
        let fade = 1.0 - f64::from(i.abs()) / f64::from(n.max(1));
        let color = GRID_RGB.with_alpha(0.04 + fade * 0.04);

        let from = camera.project(Vec3::new(-extent, 0.0, offset), center);
        let to = camera.project(Vec3::new(extent, 0.0, offset), center);
        painter.stroke_line(from, to, color, 1.0);

        let from = camera.project(Vec3::new(offset, 0.0, -extent), center);
        let to = camera.project(Vec3::new(offset, 0.0, extent), center);
        painter.stroke_line(from, to, color, 1.0);
    }
}

/// Base color and fill alpha by access and required tier.
pub fn base_palette(landmark: &Landmark) -> (Rgb, f64) {
    let tier = match landmark.required.known() {
        Some(tier) if landmark.accessible => tier,
        _ => return (LOCKED_RGB, 0.03),
    };
    match tier {
        ClearanceTier::Guest => (Rgb::new(0, 217, 255), 0.05),
        ClearanceTier::Observer => (Rgb::new(0, 217, 255), 0.07),
        ClearanceTier::Initiate => (Rgb::new(0, 255, 255), 0.07),
        ClearanceTier::Vibraline => (Rgb::new(0, 255, 136), 0.07),
    }
}

/// Solid style for a landmark, plus the glow to apply while drawing it.
pub fn shape_style(landmark: &Landmark, hovered: bool, phase: f64) -> (ShapeStyle, Option<Glow>) {
    let (rgb, fill_alpha) = base_palette(landmark);
    if !hovered {
        let style = ShapeStyle {
            rgb,
            fill_alpha,
            stroke_alpha: 0.4,
            line_width: 1.2,
        };
        return (style, None);
    }

    let pulse = (phase * 3.0).sin() * 0.12;
    let style = ShapeStyle {
        rgb,
        fill_alpha: fill_alpha + 0.08 + pulse * 0.03,
        stroke_alpha: 0.85 + pulse,
        line_width: 2.5,
    };
    let glow = Glow {
        color: rgb.with_alpha(0.5),
        blur_px: 30.0 + pulse * 20.0,
    };
    (style, Some(glow))
}

fn draw_geometry<P: Painter + ?Sized>(
    landmark: &mut Landmark,
    camera: &IsoCamera,
    center: Vec2,
    hovered: bool,
    phase: f64,
    painter: &mut P,
) {
    let (style, glow) = shape_style(landmark, hovered, phase);
    let glowing = glow.is_some();
    if glowing {
        painter.set_glow(glow);
    }

    let ctx = ShapeContext {
        camera,
        center,
        phase,
        style,
    };
    let anchors = draw_landmark(landmark.archetype, &landmark.position, &ctx, painter);
    landmark.screen_anchor = Some(anchors.screen);
    landmark.peak_anchor = Some(anchors.peak);

    if glowing {
        painter.set_glow(None);
    }
}

/// Marker dot color by access and required tier.
pub fn marker_color(landmark: &Landmark) -> Rgba {
    let tier = match landmark.required.known() {
        Some(tier) if landmark.accessible => tier,
        _ => return LOCKED_RGB.with_alpha(0.7),
    };
    match tier {
        ClearanceTier::Vibraline => Rgb::new(0, 255, 136).with_alpha(0.8),
        ClearanceTier::Initiate => Rgb::new(0, 255, 255).with_alpha(0.8),
        ClearanceTier::Guest | ClearanceTier::Observer => Rgb::new(0, 217, 255).with_alpha(0.7),
    }
}

/// Names longer than 20 characters keep their first 18 plus an ellipsis.
pub fn truncate_label(name: &str) -> Cow<'_, str> {
    if name.chars().count() <= LABEL_MAX_CHARS {
        return Cow::Borrowed(name);
    }
    let mut out: String = name.chars().take(LABEL_KEEP_CHARS).collect();
    out.push('…');
    Cow::Owned(out)
}

fn draw_marker<P: Painter + ?Sized>(
    landmark: &Landmark,
    hovered: bool,
    phase: f64,
    painter: &mut P,
) {
    let Some(peak) = landmark.peak_anchor else {
        return;
    };
    let color = marker_color(landmark);
    let dot = peak - Vec2::new(0.0, 4.0);

    if hovered {
        let inner = 14.0 + (phase * 3.0).sin() * 5.0;
        painter.stroke_circle(dot, inner, color, 1.5);
        let outer = 22.0 + (phase * 2.0 + 1.0).sin() * 4.0;
        painter.stroke_circle(dot, outer, color.fade(0.3), 1.5);
    }

    painter.fill_circle(dot, if hovered { 4.5 } else { 2.5 }, color);

    let (font_px, label_color) = if hovered {
        (11.0, color)
    } else {
        (9.0, color.with_alpha(0.45))
    };
    painter.fill_text(
        &truncate_label(&landmark.name),
        peak + Vec2::new(0.0, 14.0),
        font_px,
        label_color,
    );
}

#[cfg(test)]
mod tests {
    use super::{
        FrameParams, FrameSummary, depth_order, marker_color, render_frame, shape_style,
        truncate_label,
    };
    use crate::clearance::{ClearanceTier, RequiredClearance};
    use crate::config::{SceneConfig, Viewport};
    use crate::landmark::{Landmark, LandmarkSet, WorldPosition};
    use crate::paint::{DrawCall, RecordingPainter, Rgb};
    use foundation::math::Vec2;
    use pretty_assertions::assert_eq;

    fn landmarks() -> LandmarkSet {
        let mut set = LandmarkSet::new(vec![
            Landmark::new(
                "the-maw",
                "The Maw",
                WorldPosition::new(-80.0, 120.0, 70.0),
                ClearanceTier::Initiate,
            ),
            Landmark::new(
                "null-zone",
                "Null Zone",
                WorldPosition::new(150.0, -100.0, 60.0),
                ClearanceTier::Guest,
            ),
            Landmark::new(
                "homelands",
                "Homelands",
                WorldPosition::new(0.0, 0.0, 90.0),
                ClearanceTier::Observer,
            ),
        ]);
        set.refresh_access(ClearanceTier::Observer);
        set
    }

    fn render(
        config: &SceneConfig,
        viewport: Viewport,
        hovered: Option<&str>,
        phase: f64,
        set: &mut LandmarkSet,
    ) -> (FrameSummary, RecordingPainter) {
        let mut painter = RecordingPainter::new();
        let params = FrameParams {
            config,
            viewport,
            hovered,
            phase,
        };
        let summary = render_frame(&params, set, &mut painter);
        (summary, painter)
    }

    fn anchors(set: &LandmarkSet) -> Vec<(Option<Vec2>, Option<Vec2>)> {
        set.iter().map(|l| (l.screen_anchor, l.peak_anchor)).collect()
    }

    #[test]
    fn empty_scene_still_draws_background_and_grid() {
        let config = SceneConfig::default();
        let mut set = LandmarkSet::empty();
        let (summary, painter) = render(&config, Viewport::new(800.0, 600.0), None, 0.0, &mut set);

        assert!(summary.draw_order.is_empty());
        assert!(matches!(
            painter.calls[0],
            DrawCall::Clear { width, height } if width == 800.0 && height == 600.0
        ));
        assert!(matches!(painter.calls[1], DrawCall::Gradient { .. }));
        let lines = painter
            .calls
            .iter()
            .filter(|c| matches!(c, DrawCall::Polyline { .. }))
            .count();
        assert_eq!(lines, 2 * 25);
        assert_eq!(painter.calls.len(), 2 + 50);
    }

    #[test]
    fn zero_sized_viewport_does_not_panic() {
        let config = SceneConfig::default();
        let mut set = landmarks();
        let (summary, _) = render(&config, Viewport::new(0.0, 0.0), None, 0.0, &mut set);
        assert_eq!(summary.draw_order.len(), 3);
    }

    #[test]
    fn every_label_is_drawn_after_every_solid() {
        let config = SceneConfig::default();
        let mut set = landmarks();
        let (_, painter) = render(&config, Viewport::default(), Some("homelands"), 0.5, &mut set);

        let last_polygon = painter
            .calls
            .iter()
            .rposition(|c| matches!(c, DrawCall::Polygon { .. }))
            .unwrap();
        let first_text = painter
            .calls
            .iter()
            .position(|c| matches!(c, DrawCall::Text { .. }))
            .unwrap();
        assert!(last_polygon < first_text);
        assert_eq!(painter.texts(), vec!["Null Zone", "Homelands", "The Maw"]);
    }

    #[test]
    fn back_to_front_by_ground_depth() {
        let config = SceneConfig::default();
        let mut set = landmarks();
        let (summary, _) = render(&config, Viewport::default(), None, 0.0, &mut set);
        // Larger z projects lower on screen, so it is drawn later.
        assert_eq!(summary.draw_order, vec!["null-zone", "homelands", "the-maw"]);
    }

    #[test]
    fn equal_depths_keep_id_order() {
        let config = SceneConfig::default();
        let set = LandmarkSet::new(vec![
            Landmark::new("b", "B", WorldPosition::new(50.0, 0.0, 40.0), ClearanceTier::Guest),
            Landmark::new("a", "A", WorldPosition::new(-50.0, 0.0, 40.0), ClearanceTier::Guest),
        ]);
        let center = Viewport::default().scene_center(&config);
        assert_eq!(depth_order(&set, &config.camera, center), vec![0, 1]);
    }

    #[test]
    fn rendering_twice_is_idempotent() {
        let config = SceneConfig::default();
        let mut set = landmarks();
        let (s1, p1) = render(&config, Viewport::default(), Some("the-maw"), 2.4, &mut set);
        let a1 = anchors(&set);
        let (s2, p2) = render(&config, Viewport::default(), Some("the-maw"), 2.4, &mut set);
        let a2 = anchors(&set);

        assert_eq!(s1, s2);
        assert_eq!(a1, a2);
        assert_eq!(p1.calls, p2.calls);
        assert!(a1.iter().all(|(s, p)| s.is_some() && p.is_some()));
    }

    #[test]
    fn resize_moves_anchors_but_keeps_order() {
        let config = SceneConfig::default();
        let mut set = landmarks();
        let (big, _) = render(&config, Viewport::new(800.0, 600.0), None, 0.0, &mut set);
        let before = anchors(&set);
        let (small, _) = render(&config, Viewport::new(400.0, 300.0), None, 0.0, &mut set);
        let after = anchors(&set);

        assert_eq!(big.draw_order, small.draw_order);
        assert_ne!(before, after);
        // Shrinking moves the scene center by (-200, -150); anchors follow it.
        let (s0, _) = before[0];
        let (s1, _) = after[0];
        let shift = s1.unwrap() - s0.unwrap();
        assert!((shift.x + 200.0).abs() < 1e-9);
        assert!((shift.y + 150.0).abs() < 1e-9);
    }

    #[test]
    fn hover_brightens_and_glows() {
        let set = landmarks();
        let landmark = set.find("homelands").unwrap();
        let (idle, no_glow) = shape_style(landmark, false, 0.0);
        let (hot, glow) = shape_style(landmark, true, 0.0);

        assert!(no_glow.is_none());
        assert_eq!(idle.stroke_alpha, 0.4);
        assert_eq!(idle.line_width, 1.2);
        assert_eq!(hot.stroke_alpha, 0.85);
        assert_eq!(hot.line_width, 2.5);
        assert!((hot.fill_alpha - (idle.fill_alpha + 0.08)).abs() < 1e-12);
        assert_eq!(glow.map(|g| g.blur_px), Some(30.0));
    }

    #[test]
    fn locked_landmarks_render_red() {
        let set = landmarks();
        let locked = set.find("the-maw").unwrap();
        assert!(!locked.accessible);
        let (style, _) = shape_style(locked, false, 0.0);
        assert_eq!(style.rgb, Rgb::new(255, 0, 85));
        assert_eq!(style.fill_alpha, 0.03);
        assert_eq!(marker_color(locked), Rgb::new(255, 0, 85).with_alpha(0.7));
    }

    #[test]
    fn unrecognised_requirement_renders_locked_even_if_flagged_open() {
        let mut vault = Landmark::new(
            "vault",
            "Vault",
            WorldPosition::new(0.0, 0.0, 50.0),
            RequiredClearance::from_dataset(Some("supreme")),
        );
        vault.accessible = true;
        let (style, _) = shape_style(&vault, false, 0.0);
        assert_eq!(style.rgb, Rgb::new(255, 0, 85));
        assert_eq!(marker_color(&vault), Rgb::new(255, 0, 85).with_alpha(0.7));
    }

    #[test]
    fn long_names_are_truncated() {
        assert_eq!(truncate_label("Short"), "Short");
        assert_eq!(truncate_label("Exactly twenty chars"), "Exactly twenty chars");
        assert_eq!(
            truncate_label("The Resonance Gauntlet Arena"),
            "The Resonance Gaun…"
        );
    }
}
