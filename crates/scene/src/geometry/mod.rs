//! Procedural landmark solids.
//!
//! Every generator takes the landmark's ground anchor and height, projects
//! its own points through the shared camera, paints filled and stroked
//! polygons, and reports the two anchors the rest of the scene reads:
//!
//! - `screen`: mean of the generator's base ring plus its peak point, used
//!   for hit-testing;
//! - `peak`: the most salient projected point (tip, pit, rooftop), used for
//!   the marker and label.
//!
//! No generator reaches further than 60 world units from its anchor, below
//! `-0.15 * height - 5`, or above `1.3 * height`, which keeps all of them
//! inside [`foundation::math::ProjectionBounds`].

mod cityscape;
mod crater;
mod crown;
mod dome;
mod fortress;
mod pyramid;
mod spire;
mod vortex;
mod ziggurat;

use std::f64::consts::TAU;

use foundation::math::{IsoCamera, Vec2, Vec3};

use crate::archetype::Archetype;
use crate::landmark::WorldPosition;
use crate::paint::{Painter, Rgb, Rgba};

/// Colors and line weight for one landmark, already adjusted for access and
/// hover.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ShapeStyle {
    pub rgb: Rgb,
    pub fill_alpha: f64,
    pub stroke_alpha: f64,
    pub line_width: f64,
}

impl ShapeStyle {
    /// Fill color at `k` times the base fill alpha.
    pub fn fill(&self, k: f64) -> Rgba {
        self.rgb.with_alpha(self.fill_alpha * k)
    }

    /// Stroke color at `k` times the base stroke alpha.
    pub fn stroke(&self, k: f64) -> Rgba {
        self.rgb.with_alpha(self.stroke_alpha * k)
    }
}

pub struct ShapeContext<'a> {
    pub camera: &'a IsoCamera,
    pub center: Vec2,
    pub phase: f64,
    pub style: ShapeStyle,
}

impl ShapeContext<'_> {
    pub fn project(&self, world: Vec3) -> Vec2 {
        #[cfg(test)]
        tests::record_world_point(world);
        self.camera.project(world, self.center)
    }

    /// `sides` evenly spaced points on a horizontal circle, starting at
    /// `angle_offset`.
    pub fn ring(
        &self,
        pos: &WorldPosition,
        sides: usize,
        radius: f64,
        y: f64,
        angle_offset: f64,
    ) -> Vec<Vec2> {
        (0..sides)
            .map(|i| {
                let angle = (i as f64 / sides as f64) * TAU + angle_offset;
                self.project(pos.at(0.0).on_circle(angle, radius, y))
            })
            .collect()
    }

    /// Polygon filled at `fill_k` and stroked at `stroke_k` of the base style.
    pub fn poly<P: Painter + ?Sized>(
        &self,
        painter: &mut P,
        points: &[Vec2],
        fill_k: f64,
        stroke_k: f64,
    ) {
        painter.fill_polygon(
            points,
            self.style.fill(fill_k),
            self.style.stroke(stroke_k),
            self.style.line_width,
        );
    }

    /// Quads joining two rings of equal length, wrapping around.
    pub fn band<P: Painter + ?Sized>(
        &self,
        painter: &mut P,
        lower: &[Vec2],
        upper: &[Vec2],
        fill_k: f64,
        stroke_k: f64,
    ) {
        let n = lower.len().min(upper.len());
        for i in 0..n {
            let next = (i + 1) % n;
            self.poly(
                painter,
                &[lower[i], lower[next], upper[next], upper[i]],
                fill_k,
                stroke_k,
            );
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Anchors {
    pub screen: Vec2,
    pub peak: Vec2,
}

impl Anchors {
    /// `screen` is the mean of `peak` and every point of `ring`.
    pub fn from_ring(peak: Vec2, ring: &[Vec2]) -> Self {
        let sum = ring.iter().fold(peak, |acc, p| acc + *p);
        let n = (ring.len() + 1) as f64;
        Self {
            screen: sum.scale(1.0 / n),
            peak,
        }
    }
}

/// Draws `archetype` for a landmark at `pos` and returns its anchors.
pub fn draw_landmark<P: Painter + ?Sized>(
    archetype: Archetype,
    pos: &WorldPosition,
    ctx: &ShapeContext<'_>,
    painter: &mut P,
) -> Anchors {
    match archetype {
        Archetype::Crater => crater::draw(pos, ctx, painter),
        Archetype::TieredSpire => spire::draw(pos, ctx, painter),
        Archetype::OrganicDome => dome::draw(pos, ctx, painter),
        Archetype::Cityscape => cityscape::draw(pos, ctx, painter),
        Archetype::Fortress => fortress::draw(pos, ctx, painter),
        Archetype::Vortex => vortex::draw(pos, ctx, painter),
        Archetype::Ziggurat => ziggurat::draw(pos, ctx, painter),
        Archetype::CrownCluster => crown::draw(pos, ctx, painter),
        Archetype::Pyramid => pyramid::draw(pos, ctx, painter),
    }
}

/// The highest point on screen (smallest y); first wins on ties.
fn highest(points: impl IntoIterator<Item = Vec2>) -> Option<Vec2> {
    points.into_iter().fold(None, |best, p| match best {
        Some(b) if b.y <= p.y => Some(b),
        _ => Some(p),
    })
}

#[cfg(test)]
mod tests {
    use super::{Anchors, ShapeContext, ShapeStyle, draw_landmark};
    use crate::archetype::Archetype;
    use crate::landmark::WorldPosition;
    use crate::paint::{DrawCall, RecordingPainter, Rgb};
    use foundation::math::{IsoCamera, ProjectionBounds, Vec2, Vec3};
    use std::cell::RefCell;

    thread_local! {
        static WORLD_POINTS: RefCell<Option<Vec<Vec3>>> = const { RefCell::new(None) };
    }

    /// Logs `world` while a [`world_points_of`] call is active on this thread.
    pub(super) fn record_world_point(world: Vec3) {
        WORLD_POINTS.with(|log| {
            if let Some(points) = log.borrow_mut().as_mut() {
                points.push(world);
            }
        });
    }

    /// Every world point `f` sends through [`ShapeContext::project`].
    fn world_points_of(f: impl FnOnce()) -> Vec<Vec3> {
        WORLD_POINTS.with(|log| *log.borrow_mut() = Some(Vec::new()));
        f();
        WORLD_POINTS.with(|log| log.borrow_mut().take().unwrap_or_default())
    }

    const ALL: [Archetype; 9] = [
        Archetype::Crater,
        Archetype::TieredSpire,
        Archetype::OrganicDome,
        Archetype::Cityscape,
        Archetype::Fortress,
        Archetype::Vortex,
        Archetype::Ziggurat,
        Archetype::CrownCluster,
        Archetype::Pyramid,
    ];

    fn style() -> ShapeStyle {
        ShapeStyle {
            rgb: Rgb::new(0, 217, 255),
            fill_alpha: 0.05,
            stroke_alpha: 0.4,
            line_width: 1.2,
        }
    }

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    #[test]
    fn centroid_includes_peak() {
        let a = Anchors::from_ring(
            Vec2::new(0.0, -30.0),
            &[Vec2::new(-10.0, 0.0), Vec2::new(10.0, 0.0)],
        );
        assert_close(a.screen.x, 0.0, 1e-12);
        assert_close(a.screen.y, -10.0, 1e-12);
        assert_eq!(a.peak, Vec2::new(0.0, -30.0));
    }

    #[test]
    fn every_archetype_draws_and_anchors_near_its_position() {
        let camera = IsoCamera::default();
        let center = Vec2::new(400.0, 380.0);
        let pos = WorldPosition::new(-120.0, 60.0, 70.0);
        let ground = camera.project(pos.at(0.0), center);

        for archetype in ALL {
            let ctx = ShapeContext {
                camera: &camera,
                center,
                phase: 1.3,
                style: style(),
            };
            let mut painter = RecordingPainter::new();
            let anchors = draw_landmark(archetype, &pos, &ctx, &mut painter);

            assert!(
                painter.polygons().count() >= 4,
                "{archetype:?} drew too few polygons"
            );
            for call in &painter.calls {
                if let DrawCall::Polygon { points, .. } = call {
                    assert!(points.iter().all(|p| p.x.is_finite() && p.y.is_finite()));
                }
            }
            // Anchors land within a generous screen radius of the ground point.
            assert!(anchors.screen.distance(ground) < 200.0, "{archetype:?}");
            assert!(anchors.peak.distance(ground) < 300.0, "{archetype:?}");
        }
    }

    #[test]
    fn generators_stay_inside_projection_bounds_at_extremes() {
        let camera = IsoCamera::default();
        let bounds = ProjectionBounds::default();
        let center = Vec2::new(0.0, 0.0);
        let extremes = [
            WorldPosition::new(900.0, 900.0, 500.0),
            WorldPosition::new(-900.0, 900.0, 500.0),
            WorldPosition::new(900.0, -900.0, 0.0),
            WorldPosition::new(-900.0, -900.0, -20.0),
            WorldPosition::new(0.0, 0.0, 160.0),
        ];
        for raw in extremes {
            let pos = raw.clamped(&bounds);
            let anchor = pos.at(0.0);
            let top = bounds.max_y_factor * pos.height + bounds.max_y_slack;
            for archetype in ALL {
                for phase in [0.0, 1.7, 12.0] {
                    let ctx = ShapeContext {
                        camera: &camera,
                        center,
                        phase,
                        style: style(),
                    };
                    let points = world_points_of(|| {
                        draw_landmark(archetype, &pos, &ctx, &mut RecordingPainter::new());
                    });
                    assert!(!points.is_empty(), "{archetype:?}");
                    for p in points {
                        let d = p - anchor;
                        let reach = d.x.hypot(d.z);
                        assert!(
                            camera.depth_denominator(p) > 0.0,
                            "{archetype:?} {p:?} projects behind the camera"
                        );
                        assert!(
                            reach <= bounds.footprint_radius,
                            "{archetype:?} {p:?} is {reach} from its anchor"
                        );
                        assert!(
                            p.y >= bounds.min_y && p.y <= top && p.y <= bounds.max_y(),
                            "{archetype:?} {p:?} leaves the height envelope"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn anchors_are_a_pure_function_of_inputs() {
        let camera = IsoCamera::default();
        let pos = WorldPosition::new(30.0, -40.0, 90.0);
        for archetype in ALL {
            let ctx = ShapeContext {
                camera: &camera,
                center: Vec2::new(300.0, 300.0),
                phase: 0.7,
                style: style(),
            };
            let a = draw_landmark(archetype, &pos, &ctx, &mut RecordingPainter::new());
            let b = draw_landmark(archetype, &pos, &ctx, &mut RecordingPainter::new());
            assert_eq!(a, b);
        }
    }
}
