use thiserror::Error;

/// Top-level error type for planetgear-core.
#[derive(Debug, Error)]
pub enum SynthError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid gear train spec: {0}")]
    Spec(#[from] SpecError),
}

/// Fatal configuration errors. Any of these aborts a run before the first
/// candidate is evaluated.
///
/// Unknown tags read from TOML arrive as [`ConfigError::Toml`], with the tag
/// message embedded in the parse error. The `Unknown*` variants come from
/// parsing a tag string directly (`str::parse`, `GearTrainSpec::with_tags`).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Configuration not valid: {0:?} (expected one of 1AI, 2AI, 2AA, 2II)")]
    UnknownConfiguration(String),

    #[error("Member function not valid: {0:?} (expected one of 13, 31, 1v, v1, 3v, v3)")]
    UnknownMemberFunction(String),
}

/// Entry validation errors for a [`GearTrainSpec`](crate::config::GearTrainSpec).
///
/// Copy + static messages, same as the per-candidate [`Rejection`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum SpecError {
    #[error("Invalid ratio: {0} (must be finite and > 0)")]
    InvalidRatio(f64),

    #[error("Invalid tolerance: {0} (must be finite and >= 0)")]
    InvalidTolerance(f64),

    #[error("Invalid annular gear pitch diameter: {0} mm (must be finite and > 0)")]
    InvalidPitchDiameter(f64),

    #[error("Invalid min_gear_modulus: {0} mm (must be finite and > 0)")]
    InvalidMinModulus(f64),

    #[error("max_gear_modulus {max} must be >= min_gear_modulus {min}")]
    ModulusBoundsUnordered { min: f64, max: f64 },

    #[error("Invalid mesh efficiency: {0} (must be in (0, 1])")]
    InvalidMeshEfficiency(f64),

    #[error("Minimum tooth count for {0} must be at least 1")]
    ZeroMinTeeth(&'static str),
}

/// Why a single candidate was dropped from the search.
///
/// Not an error: the candidate is skipped and enumeration continues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum Rejection {
    #[error("planets cannot be mounted at equal spacing")]
    Assembly,

    #[error("condition of neighbouring violated")]
    Geometry,

    #[error("derived modulus outside the allowed range")]
    ModulusRange,

    #[error("adjacent planet gears collide")]
    Clearance,

    #[error("degenerate ratio or efficiency")]
    Degenerate,

    #[error("ratio outside tolerance")]
    Tolerance,
}
