use std::borrow::Cow;

use crate::paint::Rgb;

/// Self-selected access level, lowest to highest.
///
/// The value comes from browser storage and is never verified, so every
/// parse path falls back to [`ClearanceTier::Guest`].
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ClearanceTier {
    #[default]
    Guest,
    Observer,
    Initiate,
    Vibraline,
}

impl ClearanceTier {
    pub const ALL: [ClearanceTier; 4] = [
        ClearanceTier::Guest,
        ClearanceTier::Observer,
        ClearanceTier::Initiate,
        ClearanceTier::Vibraline,
    ];

    pub fn rank(self) -> u8 {
        match self {
            ClearanceTier::Guest => 0,
            ClearanceTier::Observer => 1,
            ClearanceTier::Initiate => 2,
            ClearanceTier::Vibraline => 3,
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "guest" => Some(ClearanceTier::Guest),
            "observer" => Some(ClearanceTier::Observer),
            "initiate" => Some(ClearanceTier::Initiate),
            "vibraline" => Some(ClearanceTier::Vibraline),
            _ => None,
        }
    }

    /// Reads the viewer's stored tier; anything unrecognised is Guest.
    pub fn from_untrusted(raw: Option<&str>) -> Self {
        raw.and_then(Self::parse).unwrap_or_default()
    }

    /// Storage form.
    pub fn as_str(self) -> &'static str {
        match self {
            ClearanceTier::Guest => "guest",
            ClearanceTier::Observer => "observer",
            ClearanceTier::Initiate => "initiate",
            ClearanceTier::Vibraline => "vibraline",
        }
    }

    /// Display form used by badges, the intel panel and the denial modal.
    pub fn label(self) -> &'static str {
        match self {
            ClearanceTier::Guest => "GUEST",
            ClearanceTier::Observer => "OBSERVER",
            ClearanceTier::Initiate => "INITIATE",
            ClearanceTier::Vibraline => "VIBRALINE",
        }
    }

    /// True when a viewer at `self` may open content gated at `required`.
    pub fn grants(self, required: ClearanceTier) -> bool {
        self.rank() >= required.rank()
    }

    /// Like [`Self::grants`], but an unrecognised requirement admits nobody.
    pub fn admits(self, required: &RequiredClearance) -> bool {
        required.known().is_some_and(|tier| self.grants(tier))
    }

    /// Intel panel accent.
    pub fn accent(self) -> Rgb {
        match self {
            ClearanceTier::Guest | ClearanceTier::Observer => Rgb::new(0x00, 0xD9, 0xFF),
            ClearanceTier::Initiate => Rgb::new(0x00, 0xFF, 0xFF),
            ClearanceTier::Vibraline => Rgb::new(0x00, 0xFF, 0x88),
        }
    }
}

impl std::fmt::Display for ClearanceTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Tier a landmark asks for, as authored in the dataset.
///
/// Unlike the viewer's own tier, a requirement that names no known tier does
/// not fall back to guest: the landmark stays locked for every viewer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RequiredClearance {
    Tier(ClearanceTier),
    /// Raw authored value, trimmed; empty when the field is missing.
    Unrecognised(String),
}

impl RequiredClearance {
    pub fn from_dataset(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return RequiredClearance::Unrecognised(String::new());
        };
        match ClearanceTier::parse(raw) {
            Some(tier) => RequiredClearance::Tier(tier),
            None => RequiredClearance::Unrecognised(raw.trim().to_string()),
        }
    }

    pub fn known(&self) -> Option<ClearanceTier> {
        match self {
            RequiredClearance::Tier(tier) => Some(*tier),
            RequiredClearance::Unrecognised(_) => None,
        }
    }

    /// Upper-cased display form; unrecognised values are shown as authored.
    pub fn label(&self) -> Cow<'_, str> {
        match self {
            RequiredClearance::Tier(tier) => Cow::Borrowed(tier.label()),
            RequiredClearance::Unrecognised(raw) if raw.is_empty() => Cow::Borrowed("UNKNOWN"),
            RequiredClearance::Unrecognised(raw) => Cow::Owned(raw.to_uppercase()),
        }
    }

    /// Intel panel accent; unrecognised values use the guest accent.
    pub fn accent(&self) -> Rgb {
        self.known().unwrap_or_default().accent()
    }
}

impl From<ClearanceTier> for RequiredClearance {
    fn from(tier: ClearanceTier) -> Self {
        RequiredClearance::Tier(tier)
    }
}

impl std::fmt::Display for RequiredClearance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.label())
    }
}
