//! Search request: the [`GearTrainSpec`] and its TOML loading.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, SpecError};
use crate::types::{Configuration, MemberFunction};

// ---------------------------------------------------------------------------
// Serde default functions
// ---------------------------------------------------------------------------

const fn default_ratio() -> f64 {
    1.0
}
const fn default_tolerance() -> f64 {
    0.01
}
const fn default_annular_gear_pitch_diameter() -> f64 {
    100.0
}
const fn default_min_gear_teeth() -> u32 {
    10
}
const fn default_z3_min() -> u32 {
    10
}
const fn default_min_gear_modulus() -> f64 {
    1.0
}
const fn default_max_gear_modulus() -> f64 {
    10.0
}
const fn default_mesh_efficiency() -> f64 {
    1.0
}
const fn default_member_function() -> MemberFunction {
    MemberFunction::SunToAnnular
}
const fn default_configuration() -> Configuration {
    Configuration::OneAi
}

// ---------------------------------------------------------------------------
// ModulusZ3Source
// ---------------------------------------------------------------------------

/// Where the annular modulus of a `2II` train comes from.
///
/// The `2II` meshing equation only fixes the ratio between the two moduli, so
/// one of them needs an external scale.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModulusZ3Source {
    /// No scale: modulus_Z3 stays 0 and every `2II` candidate fails the
    /// modulus range check.
    #[default]
    Unset,
    /// modulus_Z3 = annular pitch diameter / Z3.
    AnnularDiameter,
}

// ---------------------------------------------------------------------------
// GearTrainSpec
// ---------------------------------------------------------------------------

/// Search request for one planetary train. Immutable for the duration of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GearTrainSpec {
    /// Target ratio, normalised input/output.
    #[serde(default = "default_ratio")]
    pub ratio: f64,

    /// Accepted percentage error between the realized and target ratio.
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,

    /// Pitch diameter of the annular gear (mm). Reference scale for every
    /// neighbouring check.
    #[serde(default = "default_annular_gear_pitch_diameter")]
    pub annular_gear_pitch_diameter: f64,

    /// Minimum tooth count of the sun and planet gears.
    #[serde(default = "default_min_gear_teeth")]
    pub min_gear_teeth: u32,

    /// Minimum tooth count of the annular gear.
    #[serde(default = "default_z3_min")]
    pub z3_min: u32,

    /// Smallest allowed gear modulus (mm).
    #[serde(default = "default_min_gear_modulus")]
    pub min_gear_modulus: f64,

    /// Largest allowed gear modulus (mm).
    #[serde(default = "default_max_gear_modulus")]
    pub max_gear_modulus: f64,

    /// Efficiency of a single gear pair mesh, in (0, 1].
    #[serde(default = "default_mesh_efficiency")]
    pub mesh_efficiency: f64,

    #[serde(default = "default_member_function")]
    pub member_function: MemberFunction,

    #[serde(default = "default_configuration")]
    pub configuration: Configuration,

    /// Annular modulus policy for the `2II` configuration.
    #[serde(default)]
    pub two_ii_modulus: ModulusZ3Source,
}

impl Default for GearTrainSpec {
    fn default() -> Self {
        Self {
            ratio: default_ratio(),
            tolerance: default_tolerance(),
            annular_gear_pitch_diameter: default_annular_gear_pitch_diameter(),
            min_gear_teeth: default_min_gear_teeth(),
            z3_min: default_z3_min(),
            min_gear_modulus: default_min_gear_modulus(),
            max_gear_modulus: default_max_gear_modulus(),
            mesh_efficiency: default_mesh_efficiency(),
            member_function: default_member_function(),
            configuration: default_configuration(),
            two_ii_modulus: ModulusZ3Source::default(),
        }
    }
}

impl GearTrainSpec {
    /// Check field values. Returns Err on values that would make the search
    /// meaningless rather than merely empty.
    pub fn validate(&self) -> Result<(), SpecError> {
        if !self.ratio.is_finite() || self.ratio <= 0.0 {
            return Err(SpecError::InvalidRatio(self.ratio));
        }
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(SpecError::InvalidTolerance(self.tolerance));
        }
        if !self.annular_gear_pitch_diameter.is_finite() || self.annular_gear_pitch_diameter <= 0.0
        {
            return Err(SpecError::InvalidPitchDiameter(
                self.annular_gear_pitch_diameter,
            ));
        }
        if !self.min_gear_modulus.is_finite() || self.min_gear_modulus <= 0.0 {
            return Err(SpecError::InvalidMinModulus(self.min_gear_modulus));
        }
        if !self.max_gear_modulus.is_finite() || self.max_gear_modulus < self.min_gear_modulus {
            return Err(SpecError::ModulusBoundsUnordered {
                min: self.min_gear_modulus,
                max: self.max_gear_modulus,
            });
        }
        if !(self.mesh_efficiency > 0.0 && self.mesh_efficiency <= 1.0) {
            return Err(SpecError::InvalidMeshEfficiency(self.mesh_efficiency));
        }
        if self.min_gear_teeth == 0 {
            return Err(SpecError::ZeroMinTeeth("sun/planet gears"));
        }
        if self.z3_min == 0 {
            return Err(SpecError::ZeroMinTeeth("annular gear"));
        }
        Ok(())
    }

    /// Parse from a TOML document and validate.
    pub fn from_toml_str(content: &str) -> Result<Self, crate::SynthError> {
        let spec: Self = toml::from_str(content).map_err(ConfigError::from)?;
        spec.validate()?;
        Ok(spec)
    }

    /// Load from TOML file.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, crate::SynthError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::from)?;
        Self::from_toml_str(&content)
    }

    /// Builder: set the target ratio.
    #[must_use]
    pub const fn with_ratio(mut self, ratio: f64) -> Self {
        self.ratio = ratio;
        self
    }

    /// Builder: set the percentage tolerance.
    #[must_use]
    pub const fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Builder: set the annular pitch diameter (mm).
    #[must_use]
    pub const fn with_annular_gear_pitch_diameter(mut self, diameter: f64) -> Self {
        self.annular_gear_pitch_diameter = diameter;
        self
    }

    /// Builder: set minimum tooth counts for sun/planets and the annular gear.
    #[must_use]
    pub const fn with_min_teeth(mut self, min_gear_teeth: u32, z3_min: u32) -> Self {
        self.min_gear_teeth = min_gear_teeth;
        self.z3_min = z3_min;
        self
    }

    /// Builder: set the allowed modulus range (mm).
    #[must_use]
    pub const fn with_modulus_range(mut self, min: f64, max: f64) -> Self {
        self.min_gear_modulus = min;
        self.max_gear_modulus = max;
        self
    }

    /// Builder: set the per-mesh efficiency.
    #[must_use]
    pub const fn with_mesh_efficiency(mut self, efficiency: f64) -> Self {
        self.mesh_efficiency = efficiency;
        self
    }

    #[must_use]
    pub const fn with_member_function(mut self, member_function: MemberFunction) -> Self {
        self.member_function = member_function;
        self
    }

    #[must_use]
    pub const fn with_configuration(mut self, configuration: Configuration) -> Self {
        self.configuration = configuration;
        self
    }

    #[must_use]
    pub const fn with_two_ii_modulus(mut self, source: ModulusZ3Source) -> Self {
        self.two_ii_modulus = source;
        self
    }

    /// Builder: set both kinematic tags from their string form.
    pub fn with_tags(self, member_function: &str, configuration: &str) -> Result<Self, ConfigError> {
        Ok(self
            .with_member_function(member_function.parse()?)
            .with_configuration(configuration.parse()?))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
