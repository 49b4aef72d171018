//! Pointer state machine: which landmark is hovered, and what a click means.
//!
//! Hover and click share [`nearest_landmark`]; only the radius differs.

use foundation::math::Vec2;

use crate::clearance::RequiredClearance;
use crate::landmark::LandmarkSet;
use crate::picking::nearest_landmark;

/// Events the host reacts to by updating the DOM.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// `None` hides the intel panel.
    HoverChanged { id: Option<String> },
    OpenDetail { id: String },
    AccessDenied {
        name: String,
        required: RequiredClearance,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoverChange {
    pub previous: Option<String>,
    pub current: Option<String>,
}

impl HoverChange {
    pub fn into_event(self) -> UiEvent {
        UiEvent::HoverChanged { id: self.current }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Open {
        id: String,
    },
    Denied {
        id: String,
        name: String,
        required: RequiredClearance,
    },
}

impl Selection {
    pub fn into_event(self) -> UiEvent {
        match self {
            Selection::Open { id } => UiEvent::OpenDetail { id },
            Selection::Denied { name, required, .. } => UiEvent::AccessDenied { name, required },
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct HoverState {
    hovered: Option<String>,
}

impl HoverState {
    pub fn hovered(&self) -> Option<&str> {
        self.hovered.as_deref()
    }

    /// Re-resolves the hover target; `None` when it did not change.
    pub fn pointer_moved(
        &mut self,
        set: &LandmarkSet,
        pointer: Vec2,
        radius: f64,
    ) -> Option<HoverChange> {
        let next = nearest_landmark(set, pointer, radius)
            .and_then(|hit| set.get(hit.index))
            .map(|l| l.id.clone());
        self.replace(next)
    }

    pub fn pointer_left(&mut self) -> Option<HoverChange> {
        self.replace(None)
    }

    fn replace(&mut self, next: Option<String>) -> Option<HoverChange> {
        if next == self.hovered {
            return None;
        }
        let previous = std::mem::replace(&mut self.hovered, next);
        Some(HoverChange {
            previous,
            current: self.hovered.clone(),
        })
    }
}

/// Resolves a click to the detail view or an access denial. Hover state is
/// not consulted; a click away from every landmark selects nothing.
pub fn resolve_click(set: &LandmarkSet, pointer: Vec2, radius: f64) -> Option<Selection> {
    let hit = nearest_landmark(set, pointer, radius)?;
    let landmark = set.get(hit.index)?;
    Some(if landmark.accessible {
        Selection::Open {
            id: landmark.id.clone(),
        }
    } else {
        Selection::Denied {
            id: landmark.id.clone(),
            name: landmark.name.clone(),
            required: landmark.required.clone(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::{HoverChange, HoverState, Selection, UiEvent, resolve_click};
    use crate::clearance::ClearanceTier;
    use crate::landmark::{Landmark, LandmarkSet, WorldPosition};
    use foundation::math::Vec2;
    use pretty_assertions::assert_eq;

    fn set() -> LandmarkSet {
        let mut set = LandmarkSet::new(vec![
            Landmark::new(
                "open",
                "Open Zone",
                WorldPosition::new(0.0, 0.0, 50.0),
                ClearanceTier::Guest,
            ),
            Landmark::new(
                "sealed",
                "Sealed Zone",
                WorldPosition::new(0.0, 0.0, 50.0),
                ClearanceTier::Initiate,
            ),
        ]);
        set.refresh_access(ClearanceTier::Guest);
        let i = set.position("open").unwrap();
        set.get_mut(i).unwrap().screen_anchor = Some(Vec2::new(100.0, 100.0));
        let i = set.position("sealed").unwrap();
        set.get_mut(i).unwrap().screen_anchor = Some(Vec2::new(300.0, 100.0));
        set
    }

    #[test]
    fn hover_reports_only_transitions() {
        let set = set();
        let mut hover = HoverState::default();

        let change = hover.pointer_moved(&set, Vec2::new(105.0, 100.0), 40.0);
        assert_eq!(
            change,
            Some(HoverChange {
                previous: None,
                current: Some("open".to_string()),
            })
        );
        assert_eq!(hover.pointer_moved(&set, Vec2::new(100.0, 104.0), 40.0), None);

        let change = hover.pointer_moved(&set, Vec2::new(200.0, 100.0), 40.0).unwrap();
        assert_eq!(change.into_event(), UiEvent::HoverChanged { id: None });
        assert_eq!(hover.hovered(), None);
        assert_eq!(hover.pointer_left(), None);
    }

    #[test]
    fn pointer_leaving_clears_hover() {
        let set = set();
        let mut hover = HoverState::default();
        hover.pointer_moved(&set, Vec2::new(300.0, 90.0), 40.0);
        assert_eq!(hover.hovered(), Some("sealed"));
        let change = hover.pointer_left().unwrap();
        assert_eq!(change.previous.as_deref(), Some("sealed"));
        assert_eq!(hover.hovered(), None);
    }

    #[test]
    fn click_on_locked_landmark_is_denied() {
        let set = set();
        let selection = resolve_click(&set, Vec2::new(300.0, 100.0), 35.0).unwrap();
        assert_eq!(
            selection.clone(),
            Selection::Denied {
                id: "sealed".to_string(),
                name: "Sealed Zone".to_string(),
                required: ClearanceTier::Initiate.into(),
            }
        );
        assert_eq!(
            selection.into_event(),
            UiEvent::AccessDenied {
                name: "Sealed Zone".to_string(),
                required: ClearanceTier::Initiate.into(),
            }
        );
    }

    #[test]
    fn click_radius_is_tighter_than_hover() {
        let set = set();
        let pointer = Vec2::new(137.0, 100.0);
        let mut hover = HoverState::default();
        assert!(hover.pointer_moved(&set, pointer, 40.0).is_some());
        assert_eq!(resolve_click(&set, pointer, 35.0), None);
        assert_eq!(
            resolve_click(&set, Vec2::new(110.0, 100.0), 35.0),
            Some(Selection::Open {
                id: "open".to_string()
            })
        );
    }
}
