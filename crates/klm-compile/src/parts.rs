//! Catalog of photonic part templates.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A physical part that can be instantiated in the photonic program.
///
/// The template string is emitted verbatim as the component name, including
/// the fixed geometry parameters of the couplers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Part {
    /// Standard directional coupler.
    DirectionalStandard,
    /// Thermally tuned directional coupler.
    DirectionalHeated,
    /// Heated ring resonator.
    HResonator,
    /// Heated directional coupler.
    HDirectional,
    /// Waveguide with a superconducting single-photon detector.
    WaveguideSspd,
    /// Passive waveguide crossing.
    WaveguideCrossing,
}

impl Part {
    /// Every part in the catalog.
    pub const ALL: [Part; 6] = [
        Part::DirectionalStandard,
        Part::DirectionalHeated,
        Part::HResonator,
        Part::HDirectional,
        Part::WaveguideSspd,
        Part::WaveguideCrossing,
    ];

    /// The template emitted for this part.
    pub fn template(&self) -> &'static str {
        match self {
            Part::DirectionalStandard => "directional_standard 5 20 0.4 15",
            Part::DirectionalHeated => "directional_heated 5 20 0.4 15",
            Part::HResonator => "hresonator",
            Part::HDirectional => "hdirectional",
            Part::WaveguideSspd => "waveguide_sspd",
            Part::WaveguideCrossing => "waveguide_crossing",
        }
    }

    /// Check if this part is a waveguide crossing.
    pub fn is_crossing(&self) -> bool {
        matches!(self, Part::WaveguideCrossing)
    }
}

impl fmt::Display for Part {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.template())
    }
}
