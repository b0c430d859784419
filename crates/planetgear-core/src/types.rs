//! Kinematic tags, candidates and validated designs.
//!
//! # Member Naming
//!
//! - `1`: sun gear (Z1)
//! - `3`: annular (ring) gear (Z3)
//! - `v`: carrier
//!
//! A member function names input then output; the third member is held fixed.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Number of planet gears. The assembly condition is only defined for this count.
pub const PLANET_COUNT: u32 = 3;

/// Minimum gap between the outer diameters of adjacent planets (mm).
pub const PLANET_CLEARANCE_MM: f64 = 2.0;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Mechanical layout of the planetary train.
///
/// Digit = number of planet faces (`1` single planet, `2` stepped planet),
/// letters = mesh type at the sun and annular side (`A` external, `I` internal).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Configuration {
    /// Simple train: one planet face, external sun mesh, internal ring mesh.
    OneAi,
    /// Stepped planet, external sun mesh, internal ring mesh.
    TwoAi,
    /// Stepped planet, both meshes external.
    TwoAa,
    /// Stepped planet, both meshes internal.
    TwoIi,
}

impl Configuration {
    pub const ALL: [Self; 4] = [Self::OneAi, Self::TwoAi, Self::TwoAa, Self::TwoIi];

    /// Canonical tag, e.g. `"2AA"`.
    pub const fn tag(self) -> &'static str {
        match self {
            Self::OneAi => "1AI",
            Self::TwoAi => "2AI",
            Self::TwoAa => "2AA",
            Self::TwoIi => "2II",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::OneAi => "single planet, external sun mesh, internal annular mesh",
            Self::TwoAi => "stepped planet, external sun mesh, internal annular mesh",
            Self::TwoAa => "stepped planet, external sun mesh, external annular mesh",
            Self::TwoIi => "stepped planet, internal sun mesh, internal annular mesh",
        }
    }

    /// Whether the efficiency formulas use the external-external form
    /// (carrier modes `3v`/`v3`).
    pub const fn is_same_mesh_type(self) -> bool {
        matches!(self, Self::TwoAa | Self::TwoIi)
    }
}

impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Configuration {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.tag() == s)
            .ok_or_else(|| ConfigError::UnknownConfiguration(s.to_owned()))
    }
}

impl TryFrom<String> for Configuration {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Configuration> for String {
    fn from(value: Configuration) -> Self {
        value.tag().to_owned()
    }
}

// ---------------------------------------------------------------------------
// MemberFunction
// ---------------------------------------------------------------------------

/// Which members drive and are driven. The remaining member is held at rest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum MemberFunction {
    /// `13`: sun in, annular out, carrier fixed.
    SunToAnnular,
    /// `31`: annular in, sun out, carrier fixed.
    AnnularToSun,
    /// `1v`: sun in, carrier out, annular fixed.
    SunToCarrier,
    /// `v1`: carrier in, sun out, annular fixed.
    CarrierToSun,
    /// `3v`: annular in, carrier out, sun fixed.
    AnnularToCarrier,
    /// `v3`: carrier in, annular out, sun fixed.
    CarrierToAnnular,
}

impl MemberFunction {
    pub const ALL: [Self; 6] = [
        Self::SunToAnnular,
        Self::AnnularToSun,
        Self::SunToCarrier,
        Self::CarrierToSun,
        Self::AnnularToCarrier,
        Self::CarrierToAnnular,
    ];

    /// Canonical tag, e.g. `"1v"`.
    pub const fn tag(self) -> &'static str {
        match self {
            Self::SunToAnnular => "13",
            Self::AnnularToSun => "31",
            Self::SunToCarrier => "1v",
            Self::CarrierToSun => "v1",
            Self::AnnularToCarrier => "3v",
            Self::CarrierToAnnular => "v3",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::SunToAnnular => "sun -> annular, carrier fixed",
            Self::AnnularToSun => "annular -> sun, carrier fixed",
            Self::SunToCarrier => "sun -> carrier, annular fixed",
            Self::CarrierToSun => "carrier -> sun, annular fixed",
            Self::AnnularToCarrier => "annular -> carrier, sun fixed",
            Self::CarrierToAnnular => "carrier -> annular, sun fixed",
        }
    }
}

impl fmt::Display for MemberFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for MemberFunction {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.tag() == s)
            .ok_or_else(|| ConfigError::UnknownMemberFunction(s.to_owned()))
    }
}

impl TryFrom<String> for MemberFunction {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MemberFunction> for String {
    fn from(value: MemberFunction) -> Self {
        value.tag().to_owned()
    }
}

// ---------------------------------------------------------------------------
// Candidate
// ---------------------------------------------------------------------------

/// One tooth-count combination produced by the enumerator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Candidate {
    /// Sun gear.
    pub z1: u32,
    /// Planet face meshing with the sun.
    pub z2a: u32,
    /// Planet face meshing with the annular gear.
    pub z2b: u32,
    /// Annular gear.
    pub z3: u32,
}

impl Candidate {
    pub const fn new(z1: u32, z2a: u32, z2b: u32, z3: u32) -> Self {
        Self { z1, z2a, z2b, z3 }
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Z1={}, Z2a={}, Z2b={}, Z3={}",
            self.z1, self.z2a, self.z2b, self.z3
        )
    }
}

// ---------------------------------------------------------------------------
// Moduli
// ---------------------------------------------------------------------------

/// Gear moduli (mm) of the two meshes.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Moduli {
    /// Sun gear and the Z2a planet face.
    pub modulus_z1: f64,
    /// Annular gear and the Z2b planet face.
    pub modulus_z3: f64,
}

/// Pitch diameters (mm) of every gear in the train.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PitchDiameters {
    pub d1: f64,
    pub d2a: f64,
    pub d2b: f64,
    pub d3: f64,
}

impl PitchDiameters {
    pub fn new(candidate: &Candidate, moduli: &Moduli) -> Self {
        Self {
            d1: f64::from(candidate.z1) * moduli.modulus_z1,
            d2a: f64::from(candidate.z2a) * moduli.modulus_z1,
            d2b: f64::from(candidate.z2b) * moduli.modulus_z3,
            d3: f64::from(candidate.z3) * moduli.modulus_z3,
        }
    }
}

// ---------------------------------------------------------------------------
// ValidatedDesign
// ---------------------------------------------------------------------------

/// A candidate that survived every validator and met the ratio tolerance.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ValidatedDesign {
    #[serde(flatten)]
    pub candidate: Candidate,
    #[serde(flatten)]
    pub moduli: Moduli,
    #[serde(flatten)]
    pub pitch_diameters: PitchDiameters,
    /// Realized ratio (input/output).
    pub ratio: f64,
    /// Overall transmission efficiency.
    pub efficiency: f64,
    /// Percentage error against the target ratio, rounded to 6 places.
    pub error_percent: f64,
    pub configuration: Configuration,
    pub member_function: MemberFunction,
    pub planet_count: u32,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
