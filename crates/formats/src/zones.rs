//! Zone dataset: the `zones.json` document keyed by landmark id.

use std::collections::BTreeMap;
use std::fmt;

use foundation::math::ProjectionBounds;
use scene::{Landmark, LandmarkSet, RequiredClearance, WorldPosition};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZonePosition {
    pub x: f64,
    pub z: f64,
    pub height: f64,
}

impl ZonePosition {
    fn is_finite(&self) -> bool {
        self.x.is_finite() && self.z.is_finite() && self.height.is_finite()
    }

    fn to_world(self) -> WorldPosition {
        WorldPosition::new(self.x, self.z, self.height)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Homeland {
    #[serde(default)]
    pub element: String,
    pub name: String,
    #[serde(default)]
    pub essence: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Faction {
    #[serde(default)]
    pub icon: String,
    pub name: String,
    #[serde(default)]
    pub essence: String,
    #[serde(default)]
    pub homeland: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepthLayer {
    pub name: String,
    #[serde(default)]
    pub depth: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub creatures: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tool {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// One zone as authored. Descriptive fields are optional; anything the map
/// does not read is kept in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneRecord {
    /// Filled from the dataset key, which wins over any `id` in the body.
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub position: ZonePosition,
    /// Required tier as authored; unknown values mean guest.
    #[serde(default)]
    pub clearance: Option<String>,
    #[serde(default)]
    pub tagline: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub aliases: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub functions: Vec<String>,
    #[serde(default)]
    pub homelands: Vec<Homeland>,
    #[serde(default)]
    pub factions: Vec<Faction>,
    #[serde(default)]
    pub primary_law: Option<String>,
    #[serde(default)]
    pub layers: Vec<DepthLayer>,
    #[serde(default)]
    pub tools: Vec<Tool>,
    #[serde(default)]
    pub survival_protocol: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl ZoneRecord {
    /// Unknown or missing values lock the zone for every viewer.
    pub fn required(&self) -> RequiredClearance {
        RequiredClearance::from_dataset(self.clearance.as_deref())
    }

    pub fn to_landmark(&self) -> Landmark {
        Landmark::new(
            self.id.clone(),
            self.name.clone(),
            self.position.to_world(),
            self.required(),
        )
    }
}

#[derive(Debug)]
pub enum ZoneDatasetError {
    Parse(serde_json::Error),
    InvalidPosition { id: String },
}

impl fmt::Display for ZoneDatasetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ZoneDatasetError::Parse(err) => write!(f, "Zone dataset parse error: {err}"),
            ZoneDatasetError::InvalidPosition { id } => {
                write!(f, "Zone {id} has a non-finite position")
            }
        }
    }
}

impl std::error::Error for ZoneDatasetError {}

impl From<serde_json::Error> for ZoneDatasetError {
    fn from(err: serde_json::Error) -> Self {
        ZoneDatasetError::Parse(err)
    }
}

/// Validated zones in id order, positions clamped into the projectable region.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ZoneDataset {
    zones: BTreeMap<String, ZoneRecord>,
}

impl ZoneDataset {
    pub fn from_json_str(json: &str) -> Result<Self, ZoneDatasetError> {
        Self::from_json_str_with(json, &ProjectionBounds::default())
    }

    pub fn from_json_str_with(
        json: &str,
        bounds: &ProjectionBounds,
    ) -> Result<Self, ZoneDatasetError> {
        let zones: BTreeMap<String, ZoneRecord> = serde_json::from_str(json)?;
        Self::from_records(zones, bounds)
    }

    pub fn from_records(
        zones: BTreeMap<String, ZoneRecord>,
        bounds: &ProjectionBounds,
    ) -> Result<Self, ZoneDatasetError> {
        let mut out = BTreeMap::new();
        for (id, mut record) in zones {
            if !record.position.is_finite() {
                return Err(ZoneDatasetError::InvalidPosition { id });
            }
            let clamped = record.position.to_world().clamped(bounds);
            record.position = ZonePosition {
                x: clamped.x,
                z: clamped.z,
                height: clamped.height,
            };
            record.id = id.clone();
            out.insert(id, record);
        }
        Ok(Self { zones: out })
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&ZoneRecord> {
        self.zones.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ZoneRecord> + '_ {
        self.zones.values()
    }

    pub fn to_landmarks(&self) -> LandmarkSet {
        LandmarkSet::new(self.iter().map(ZoneRecord::to_landmark).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::{ZoneDataset, ZoneDatasetError, ZonePosition};
    use foundation::math::ProjectionBounds;
    use scene::{Archetype, ClearanceTier, RequiredClearance};
    use std::collections::BTreeMap;

    const SAMPLE: &str = r#"{
        "the-maw": {
            "id": "ignored",
            "name": "The Maw",
            "position": { "x": -80, "z": 120, "height": 70 },
            "clearance": "initiate",
            "tagline": "It listens back.",
            "description": "First.\n\nSecond.",
            "icon": "@",
            "type": "ABYSSAL ZONE",
            "primaryLaw": "Do not answer.",
            "layers": [
                { "name": "Lip", "depth": "0-10m", "description": "Edge.", "creatures": "Echoes" }
            ],
            "survivalProtocol": "Keep moving.",
            "soundtrack": ["a", "b"]
        },
        "homelands": {
            "name": "Homelands",
            "position": { "x": 900, "z": -20, "height": 400 },
            "clearance": "SUPREME"
        }
    }"#;

    #[test]
    fn parses_records_in_id_order() {
        let dataset = ZoneDataset::from_json_str(SAMPLE).unwrap();
        let ids: Vec<&str> = dataset.iter().map(|z| z.id.as_str()).collect();
        assert_eq!(ids, vec!["homelands", "the-maw"]);

        let maw = dataset.get("the-maw").unwrap();
        assert_eq!(maw.id, "the-maw");
        assert_eq!(maw.kind, "ABYSSAL ZONE");
        assert_eq!(maw.primary_law.as_deref(), Some("Do not answer."));
        assert_eq!(maw.layers[0].creatures, "Echoes");
        assert_eq!(maw.required(), RequiredClearance::Tier(ClearanceTier::Initiate));
        assert!(maw.extra.contains_key("soundtrack"));
        assert!(!maw.extra.contains_key("primaryLaw"));
    }

    #[test]
    fn unknown_clearance_is_kept_raw_and_positions_are_clamped() {
        let dataset = ZoneDataset::from_json_str(SAMPLE).unwrap();
        let homelands = dataset.get("homelands").unwrap();
        assert_eq!(
            homelands.required(),
            RequiredClearance::Unrecognised("SUPREME".to_string())
        );
        assert_eq!(
            homelands.position,
            ZonePosition {
                x: 400.0,
                z: -20.0,
                height: 160.0
            }
        );
    }

    #[test]
    fn landmarks_carry_archetype_and_tier() {
        let set = ZoneDataset::from_json_str(SAMPLE).unwrap().to_landmarks();
        assert_eq!(set.len(), 2);
        let maw = set.find("the-maw").unwrap();
        assert_eq!(maw.archetype, Archetype::Vortex);
        assert_eq!(maw.required, RequiredClearance::Tier(ClearanceTier::Initiate));
        assert!(maw.screen_anchor.is_none());
    }

    #[test]
    fn unknown_or_missing_clearance_locks_zone_for_every_viewer() {
        let doc = r#"{
            "vault": {
                "name": "Vault",
                "position": { "x": 0, "z": 0, "height": 50 },
                "clearance": "supreme"
            },
            "attic": {
                "name": "Attic",
                "position": { "x": 10, "z": 10, "height": 50 }
            }
        }"#;
        let mut set = ZoneDataset::from_json_str(doc).unwrap().to_landmarks();
        for viewer in ClearanceTier::ALL {
            set.refresh_access(viewer);
            assert!(set.iter().all(|l| !l.accessible), "{viewer}");
        }
        let labels: Vec<String> = set.iter().map(|l| l.required.label().into_owned()).collect();
        assert_eq!(labels, vec!["UNKNOWN", "SUPREME"]);
    }

    #[test]
    fn malformed_documents_are_parse_errors() {
        for bad in ["", "[]", "{\"a\": {\"name\": \"A\"}}", "{\"a\": 3}"] {
            assert!(matches!(
                ZoneDataset::from_json_str(bad),
                Err(ZoneDatasetError::Parse(_))
            ));
        }
        assert!(ZoneDataset::from_json_str("{}").unwrap().is_empty());
    }

    #[test]
    fn non_finite_positions_are_rejected() {
        let mut dataset = ZoneDataset::from_json_str(SAMPLE).unwrap();
        let mut records: BTreeMap<_, _> = std::mem::take(&mut dataset.zones);
        if let Some(r) = records.get_mut("homelands") {
            r.position.height = f64::NAN;
        }
        let err = ZoneDataset::from_records(records, &ProjectionBounds::default()).unwrap_err();
        assert_eq!(err.to_string(), "Zone homelands has a non-finite position");
    }
}
