/// DOM ids and resource locations the page is expected to provide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebConfig {
    pub canvas_id: String,
    pub dataset_url: String,
    pub storage_key: String,
    pub intel_panel_id: String,
    pub modal_id: String,
    pub modal_content_id: String,
    pub badge_id: String,
    pub clearance_display_id: String,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            canvas_id: "terrain-canvas".to_string(),
            dataset_url: "zones.json".to_string(),
            storage_key: catalog::DEFAULT_CLEARANCE_KEY.to_string(),
            intel_panel_id: "zone-intel-panel".to_string(),
            modal_id: "zone-modal".to_string(),
            modal_content_id: "zone-detail-content".to_string(),
            badge_id: "clearance-badge".to_string(),
            clearance_display_id: "clearance-display".to_string(),
        }
    }
}
