//! Text models for the intel panel and the zone detail modal.
//!
//! These carry plain strings only. Turning them into markup (and escaping)
//! is the host's job.

use std::borrow::Cow;

use scene::RequiredClearance;

use crate::zones::{DepthLayer, ZoneRecord};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum IntelStatus {
    Restricted,
    Open,
}

impl IntelStatus {
    pub fn text(self) -> &'static str {
        match self {
            IntelStatus::Restricted => "\u{2298} ACCESS RESTRICTED",
            IntelStatus::Open => "\u{25B8} CLICK TO ACCESS BRIEFING",
        }
    }
}

/// Hover card for one zone.
#[derive(Debug, Clone, PartialEq)]
pub struct IntelSummary {
    pub icon: String,
    pub name: String,
    pub kind: String,
    pub required: RequiredClearance,
    /// `#RRGGBB` accent for the required tier.
    pub accent: String,
    pub tagline: String,
    pub status: IntelStatus,
}

impl IntelSummary {
    pub fn for_zone(zone: &ZoneRecord, accessible: bool) -> Self {
        let required = zone.required();
        Self {
            icon: zone.icon.clone(),
            name: zone.name.clone(),
            kind: zone.kind.clone(),
            accent: required.accent().hex(),
            required,
            tagline: zone.tagline.clone(),
            status: if accessible {
                IntelStatus::Open
            } else {
                IntelStatus::Restricted
            },
        }
    }

    pub fn tier_label(&self) -> Cow<'_, str> {
        self.required.label()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DetailHeader {
    pub icon: String,
    pub title: String,
    pub subtitle: String,
    pub aliases: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub title: String,
    pub text: String,
    pub note: Option<String>,
}

/// Emphasis for a single highlighted quote.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum QuoteTone {
    Warning,
    Calm,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SectionBody {
    Paragraphs(Vec<String>),
    Items(Vec<String>),
    /// `(label, text)` pairs.
    Labeled(Vec<(String, String)>),
    Cards(Vec<Card>),
    Quote { text: String, tone: QuoteTone },
    /// Ordered shallow to deep; hosts shade them by index.
    Layers(Vec<DepthLayer>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DetailSection {
    pub title: Option<String>,
    pub body: SectionBody,
}

impl DetailSection {
    fn titled(title: &str, body: SectionBody) -> Self {
        Self {
            title: Some(title.to_string()),
            body,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DetailDocument {
    pub header: DetailHeader,
    pub sections: Vec<DetailSection>,
}

impl DetailDocument {
    /// Full briefing. Sections appear in a fixed order and only when the zone
    /// has content for them; core identity is always present.
    pub fn for_zone(zone: &ZoneRecord) -> Self {
        let mut sections = vec![DetailSection::titled(
            "CORE IDENTITY",
            SectionBody::Paragraphs(paragraphs(&zone.description)),
        )];

        if let Some(location) = non_empty(&zone.location) {
            sections.push(DetailSection::titled(
                "LOCATION",
                SectionBody::Paragraphs(vec![location.to_string()]),
            ));
        }
        if !zone.functions.is_empty() {
            sections.push(DetailSection::titled(
                "PRIMARY FUNCTIONS",
                SectionBody::Items(zone.functions.clone()),
            ));
        }
        if !zone.homelands.is_empty() {
            let cards = zone
                .homelands
                .iter()
                .map(|h| Card {
                    title: join_icon(&h.element, &h.name),
                    text: h.essence.clone(),
                    note: None,
                })
                .collect();
            sections.push(DetailSection::titled("HOMELANDS", SectionBody::Cards(cards)));
        }
        if !zone.factions.is_empty() {
            let cards = zone
                .factions
                .iter()
                .map(|f| Card {
                    title: join_icon(&f.icon, &f.name),
                    text: f.essence.clone(),
                    note: (!f.homeland.is_empty()).then(|| f.homeland.clone()),
                })
                .collect();
            sections.push(DetailSection::titled("FACTIONS", SectionBody::Cards(cards)));
        }
        if let Some(law) = non_empty(&zone.primary_law) {
            sections.push(DetailSection::titled(
                "PRIMARY LAW",
                SectionBody::Quote {
                    text: law.to_string(),
                    tone: QuoteTone::Warning,
                },
            ));
        }
        if !zone.layers.is_empty() {
            sections.push(DetailSection::titled(
                "DEPTH LAYERS",
                SectionBody::Layers(zone.layers.clone()),
            ));
        }
        if !zone.tools.is_empty() {
            let tools = zone
                .tools
                .iter()
                .map(|t| (t.name.clone(), t.description.clone()))
                .collect();
            sections.push(DetailSection::titled(
                "TOOLS & TACTICS",
                SectionBody::Labeled(tools),
            ));
        }
        if let Some(protocol) = non_empty(&zone.survival_protocol) {
            sections.push(DetailSection::titled(
                "SURVIVAL PROTOCOL",
                SectionBody::Quote {
                    text: protocol.to_string(),
                    tone: QuoteTone::Calm,
                },
            ));
        }

        Self {
            header: DetailHeader {
                icon: zone.icon.clone(),
                title: zone.name.clone(),
                subtitle: zone.tagline.clone(),
                aliases: non_empty(&zone.aliases).map(str::to_string),
            },
            sections,
        }
    }

    /// Shown instead of the briefing when the viewer's tier is too low.
    pub fn access_denied(name: &str, required: &RequiredClearance) -> Self {
        Self {
            header: DetailHeader {
                icon: "X".to_string(),
                title: "RESTRICTED ACCESS".to_string(),
                subtitle: format!("\"{name}\" requires {} clearance.", required.label()),
                aliases: None,
            },
            sections: vec![DetailSection {
                title: None,
                body: SectionBody::Paragraphs(vec![
                    "Your current clearance level does not permit access to this zone's briefing materials."
                        .to_string(),
                    "Upgrade your clearance through the Command Log to unlock deeper intelligence."
                        .to_string(),
                ]),
            }],
        }
    }

    pub fn section(&self, title: &str) -> Option<&DetailSection> {
        self.sections
            .iter()
            .find(|s| s.title.as_deref() == Some(title))
    }
}

/// Blank-line separated paragraphs, trimmed; empty ones are dropped.
fn paragraphs(text: &str) -> Vec<String> {
    text.split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn join_icon(icon: &str, name: &str) -> String {
    if icon.is_empty() {
        name.to_string()
    } else {
        format!("{icon} {name}")
    }
}
