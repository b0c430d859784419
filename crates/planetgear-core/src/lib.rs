//! Tooth-count synthesis for single-stage planetary gear trains.
//!
//! Given a target transmission ratio, a tolerance and an annular pitch
//! diameter, enumerate every tooth combination `(Z1, Z2a, Z2b, Z3)` and keep
//! the ones that can be assembled with three equally spaced planets, mesh
//! with consistent moduli, leave room between neighbouring planets, and hit
//! the ratio.
//!
//! # Synthesis Pipeline
//!
//! ```text
//! Spec → Bounds → Enumerate → Assembly → Geometry → Clearance → Ratio/Efficiency → Sink
//!                 (Z3 outer)  (3 planets) (moduli)   (L ≥ D2+2)  (Willis)
//! ```
//!
//! Configurations: `1AI` (simple train), `2AI`, `2AA`, `2II` (stepped planets
//! with external/internal meshes). Member functions: `13`, `31`, `1v`, `v1`,
//! `3v`, `v3` (driving and driven member; `v` is the carrier).
//!
//! # Quick Start
//!
//! ```
//! use planetgear_core::prelude::*;
//!
//! let spec = GearTrainSpec::default()
//!     .with_annular_gear_pitch_diameter(60.0)
//!     .with_min_teeth(12, 55)
//!     .with_ratio(5.0)
//!     .with_tolerance(1.0);
//!
//! let synth = Synthesizer::new(spec).unwrap();
//! let mut sink = CollectSink::new();
//! let summary = synth.run(&mut sink, &CancelToken::new());
//!
//! assert_eq!(summary.candidates_visited, synth.candidate_space().len());
//! for design in &sink.designs {
//!     assert!(design.error_percent < 1.0);
//! }
//! ```

pub mod assembly;
pub mod bounds;
pub mod clearance;
pub mod config;
pub mod enumerate;
pub mod error;
pub mod geometry;
pub mod presets;
pub mod ratio;
pub mod report;
pub mod search;
pub mod sink;
pub mod types;

pub use error::{ConfigError, Rejection, SpecError, SynthError};

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::bounds::ToothBounds;
    pub use crate::config::{GearTrainSpec, ModulusZ3Source};
    pub use crate::enumerate::{CandidateSpace, ToothRange};
    pub use crate::error::{ConfigError, Rejection, SpecError, SynthError};
    pub use crate::presets;
    pub use crate::report::{JsonLinesReport, TextReport};
    pub use crate::search::{CancelToken, RejectionCounts, SearchSummary, Synthesizer};
    pub use crate::sink::{CollectSink, NullSink, SearchEvent, SearchSink};
    pub use crate::types::{
        Candidate, Configuration, MemberFunction, Moduli, PitchDiameters, ValidatedDesign,
        PLANET_CLEARANCE_MM, PLANET_COUNT,
    };
}
