/// Procedural solid used to draw a landmark.
///
/// Every landmark id resolves to exactly one variant; ids without a bespoke
/// shape get [`Archetype::Pyramid`] so they still render and still receive
/// anchors.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Archetype {
    /// Jagged inverted rim around a sunken pit.
    Crater,
    /// Stacked hexagonal frustums with two orbiting rings.
    TieredSpire,
    /// Wobbling concentric rings with drifting surface curves.
    OrganicDome,
    /// Cluster of box towers with window bands.
    Cityscape,
    /// Octagonal walled arena with pillars.
    Fortress,
    /// Twisting funnel crowned by a thin spire.
    Vortex,
    /// Terraced rectangular pyramid.
    Ziggurat,
    /// Hexagonal platform bristling with triangular spires.
    CrownCluster,
    /// Square pyramid.
    Pyramid,
}

impl Archetype {
    pub const BESPOKE: [(&'static str, Archetype); 8] = [
        ("null-zone", Archetype::Crater),
        ("vibraline-hub", Archetype::TieredSpire),
        ("field-of-feels", Archetype::OrganicDome),
        ("earth-tiff", Archetype::Cityscape),
        ("resonance-gauntlet", Archetype::Fortress),
        ("the-maw", Archetype::Vortex),
        ("homelands", Archetype::Ziggurat),
        ("factions", Archetype::CrownCluster),
    ];

    pub fn for_id(id: &str) -> Self {
        Self::BESPOKE
            .iter()
            .find(|(key, _)| *key == id)
            .map(|(_, a)| *a)
            .unwrap_or(Archetype::Pyramid)
    }
}
