use foundation::math::{ProjectionBounds, Vec2, Vec3};

use crate::archetype::Archetype;
use crate::clearance::{ClearanceTier, RequiredClearance};

/// Ground anchor and vertical extent of a landmark, in world units.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct WorldPosition {
    pub x: f64,
    pub z: f64,
    pub height: f64,
}

impl WorldPosition {
    pub fn new(x: f64, z: f64, height: f64) -> Self {
        Self { x, z, height }
    }

    /// Pulls the anchor and height into the region the camera can project.
    pub fn clamped(self, bounds: &ProjectionBounds) -> Self {
        Self {
            x: bounds.clamp_anchor(self.x),
            z: bounds.clamp_anchor(self.z),
            height: bounds.clamp_height(self.height),
        }
    }

    /// Point above (or below) the anchor at height `y`.
    pub fn at(&self, y: f64) -> Vec3 {
        Vec3::new(self.x, y, self.z)
    }

    /// Point offset horizontally from the anchor.
    pub fn offset(&self, dx: f64, y: f64, dz: f64) -> Vec3 {
        Vec3::new(self.x + dx, y, self.z + dz)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Landmark {
    pub id: String,
    pub name: String,
    pub position: WorldPosition,
    pub required: RequiredClearance,
    pub archetype: Archetype,
    /// Derived from the viewer's clearance; see [`LandmarkSet::refresh_access`].
    pub accessible: bool,
    /// Hit-test point for the current frame.
    pub screen_anchor: Option<Vec2>,
    /// Label/marker point for the current frame.
    pub peak_anchor: Option<Vec2>,
}

impl Landmark {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        position: WorldPosition,
        required: impl Into<RequiredClearance>,
    ) -> Self {
        let id = id.into();
        let archetype = Archetype::for_id(&id);
        Self {
            id,
            name: name.into(),
            position,
            required: required.into(),
            archetype,
            accessible: false,
            screen_anchor: None,
            peak_anchor: None,
        }
    }
}

/// Landmarks in ascending id order.
///
/// The order is fixed at construction and drives every iteration: depth-sort
/// ties and hit-test ties both resolve to the lower id.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct LandmarkSet {
    items: Vec<Landmark>,
}

impl LandmarkSet {
    /// Sorts by id; on duplicate ids the first occurrence wins.
    pub fn new(mut items: Vec<Landmark>) -> Self {
        items.sort_by(|a, b| a.id.cmp(&b.id));
        items.dedup_by(|later, earlier| later.id == earlier.id);
        Self { items }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Landmark> + '_ {
        self.items.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Landmark> {
        self.items.get(index)
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut Landmark> {
        self.items.get_mut(index)
    }

    pub fn find(&self, id: &str) -> Option<&Landmark> {
        self.position(id).and_then(|i| self.items.get(i))
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.items
            .binary_search_by(|l| l.id.as_str().cmp(id))
            .ok()
    }

    /// Recomputes `accessible` for every landmark against `viewer`.
    pub fn refresh_access(&mut self, viewer: ClearanceTier) {
        for l in &mut self.items {
            l.accessible = viewer.admits(&l.required);
        }
    }

    /// Drops last frame's anchors; the next render pass rewrites them.
    pub fn invalidate_anchors(&mut self) {
        for l in &mut self.items {
            l.screen_anchor = None;
            l.peak_anchor = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Landmark, LandmarkSet, WorldPosition};
    use crate::archetype::Archetype;
    use crate::clearance::{ClearanceTier, RequiredClearance};
    use foundation::math::ProjectionBounds;

    fn lm(id: &str, tier: ClearanceTier) -> Landmark {
        Landmark::new(id, id.to_uppercase(), WorldPosition::new(0.0, 0.0, 50.0), tier)
    }

    #[test]
    fn set_is_sorted_and_deduplicated_by_id() {
        let mut first_b = lm("b", ClearanceTier::Guest);
        first_b.name = "first".to_string();
        let set = LandmarkSet::new(vec![
            first_b,
            lm("a", ClearanceTier::Guest),
            lm("b", ClearanceTier::Vibraline),
        ]);
        let ids: Vec<&str> = set.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(set.find("b").map(|l| l.name.as_str()), Some("first"));
        assert_eq!(set.position("zzz"), None);
    }

    #[test]
    fn refresh_access_follows_viewer_tier() {
        let mut set = LandmarkSet::new(
            ClearanceTier::ALL
                .iter()
                .map(|t| lm(t.as_str(), *t))
                .collect(),
        );
        for viewer in ClearanceTier::ALL {
            set.refresh_access(viewer);
            for l in set.iter() {
                let required = l.required.known().unwrap();
                assert_eq!(l.accessible, viewer.rank() >= required.rank());
            }
        }
        set.refresh_access(ClearanceTier::Guest);
        let open: Vec<&str> = set
            .iter()
            .filter(|l| l.accessible)
            .map(|l| l.id.as_str())
            .collect();
        assert_eq!(open, vec!["guest"]);
    }

    #[test]
    fn unrecognised_requirement_stays_locked_at_every_tier() {
        let mut set = LandmarkSet::new(vec![
            Landmark::new(
                "vault",
                "Vault",
                WorldPosition::new(0.0, 0.0, 50.0),
                RequiredClearance::from_dataset(Some("supreme")),
            ),
            Landmark::new(
                "attic",
                "Attic",
                WorldPosition::new(0.0, 0.0, 50.0),
                RequiredClearance::from_dataset(None),
            ),
        ]);
        for viewer in ClearanceTier::ALL {
            set.refresh_access(viewer);
            assert!(set.iter().all(|l| !l.accessible), "{viewer}");
        }
    }

    #[test]
    fn archetype_follows_id() {
        assert_eq!(lm("the-maw", ClearanceTier::Guest).archetype, Archetype::Vortex);
        assert_eq!(lm("elsewhere", ClearanceTier::Guest).archetype, Archetype::Pyramid);
    }

    #[test]
    fn clamped_position_stays_projectable() {
        let bounds = ProjectionBounds::default();
        let p = WorldPosition::new(9_000.0, -9_000.0, 1e6).clamped(&bounds);
        assert_eq!(p, WorldPosition::new(400.0, -400.0, 160.0));
        let q = WorldPosition::new(10.0, 20.0, -5.0).clamped(&bounds);
        assert_eq!(q.height, 0.0);
    }
}
