//! The synthesis pipeline.
//!
//! ```text
//! Candidate → Assembly → Geometry (+ modulus range) → Clearance → Ratio/Efficiency → Tolerance
//! ```
//!
//! Each stage either passes the candidate on or rejects it; the first
//! rejection ends that candidate. Configuration errors never reach this
//! module: they are caught when the [`GearTrainSpec`] is parsed or when the
//! [`Synthesizer`] is built.

use std::ops::Range;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::bounds::ToothBounds;
use crate::config::{GearTrainSpec, ModulusZ3Source};
use crate::enumerate::CandidateSpace;
use crate::error::{Rejection, SynthError};
use crate::ratio;
use crate::sink::{SearchEvent, SearchSink};
use crate::types::{
    Candidate, Configuration, PLANET_CLEARANCE_MM, PLANET_COUNT, PitchDiameters, ValidatedDesign,
};
use crate::{assembly, clearance, geometry};

// ---------------------------------------------------------------------------
// CancelToken
// ---------------------------------------------------------------------------

/// Shared stop flag, checked once per annular tooth count.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

// ---------------------------------------------------------------------------
// RejectionCounts
// ---------------------------------------------------------------------------

/// Number of candidates dropped at each stage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RejectionCounts {
    pub assembly: u64,
    pub geometry: u64,
    pub modulus_range: u64,
    pub clearance: u64,
    pub degenerate: u64,
    pub tolerance: u64,
}

impl RejectionCounts {
    pub const fn record(&mut self, rejection: Rejection) {
        match rejection {
            Rejection::Assembly => self.assembly += 1,
            Rejection::Geometry => self.geometry += 1,
            Rejection::ModulusRange => self.modulus_range += 1,
            Rejection::Clearance => self.clearance += 1,
            Rejection::Degenerate => self.degenerate += 1,
            Rejection::Tolerance => self.tolerance += 1,
        }
    }

    pub const fn merge(&mut self, other: &Self) {
        self.assembly += other.assembly;
        self.geometry += other.geometry;
        self.modulus_range += other.modulus_range;
        self.clearance += other.clearance;
        self.degenerate += other.degenerate;
        self.tolerance += other.tolerance;
    }

    pub const fn total(&self) -> u64 {
        self.assembly
            + self.geometry
            + self.modulus_range
            + self.clearance
            + self.degenerate
            + self.tolerance
    }
}

// ---------------------------------------------------------------------------
// SearchSummary
// ---------------------------------------------------------------------------

/// Outcome of a run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SearchSummary {
    pub bounds: ToothBounds,
    /// Size of the full candidate space.
    pub candidates_total: u64,
    /// Candidates actually visited. Equals `candidates_total` unless cancelled.
    pub candidates_visited: u64,
    pub accepted: u64,
    pub rejections: RejectionCounts,
    /// Annular tooth counts fully searched.
    pub z3_completed: u64,
    pub cancelled: bool,
}

impl SearchSummary {
    fn new(bounds: ToothBounds, candidates_total: u64) -> Self {
        Self {
            bounds,
            candidates_total,
            candidates_visited: 0,
            accepted: 0,
            rejections: RejectionCounts::default(),
            z3_completed: 0,
            cancelled: false,
        }
    }

    fn absorb(&mut self, shard: &Shard) {
        self.candidates_visited += shard.visited;
        self.accepted += u64::try_from(shard.designs.len()).unwrap_or(u64::MAX);
        self.rejections.merge(&shard.rejections);
        self.z3_completed += 1;
    }
}

// Results for one annular tooth count.
struct Shard {
    z3: u32,
    designs: Vec<ValidatedDesign>,
    visited: u64,
    rejections: RejectionCounts,
}

// ---------------------------------------------------------------------------
// Synthesizer
// ---------------------------------------------------------------------------

/// Validated search over one [`GearTrainSpec`].
#[derive(Clone, Debug)]
pub struct Synthesizer {
    spec: GearTrainSpec,
    bounds: ToothBounds,
    space: CandidateSpace,
}

impl Synthesizer {
    /// Validate `spec` and compute the candidate space.
    pub fn new(spec: GearTrainSpec) -> Result<Self, SynthError> {
        spec.validate()?;
        let bounds = ToothBounds::from_spec(&spec);
        let space = CandidateSpace::new(&spec, &bounds);
        Ok(Self {
            spec,
            bounds,
            space,
        })
    }

    pub const fn spec(&self) -> &GearTrainSpec {
        &self.spec
    }

    pub const fn bounds(&self) -> ToothBounds {
        self.bounds
    }

    pub const fn candidate_space(&self) -> &CandidateSpace {
        &self.space
    }

    /// Run one candidate through every stage.
    pub fn evaluate(&self, candidate: &Candidate) -> Result<ValidatedDesign, Rejection> {
        let spec = &self.spec;

        assembly::check(candidate)?;
        let moduli = geometry::check(candidate, spec)?;
        clearance::check(candidate, &moduli, PLANET_CLEARANCE_MM)?;
        let kinematics =
            spec.member_function
                .evaluate(candidate, spec.configuration, spec.mesh_efficiency)?;
        let error_percent = ratio::percentage_error(kinematics.ratio, spec.ratio);
        ratio::within_tolerance(error_percent, spec.tolerance)?;

        Ok(ValidatedDesign {
            candidate: *candidate,
            moduli,
            pitch_diameters: PitchDiameters::new(candidate, &moduli),
            ratio: kinematics.ratio,
            efficiency: kinematics.efficiency,
            error_percent,
            configuration: spec.configuration,
            member_function: spec.member_function,
            planet_count: PLANET_COUNT,
        })
    }

    /// Lazy sequence of accepted designs, in enumeration order.
    pub fn designs(&self) -> impl Iterator<Item = ValidatedDesign> + '_ {
        self.space
            .iter()
            .filter_map(move |candidate| self.evaluate(&candidate).ok())
    }

    /// Lazy sequence of progress markers (one per annular tooth count).
    pub const fn progress(&self) -> Range<u32> {
        self.space.z3_values()
    }

    /// Search sequentially, reporting to `sink`.
    pub fn run<S: SearchSink + ?Sized>(&self, sink: &mut S, cancel: &CancelToken) -> SearchSummary {
        let mut summary = self.start(sink);

        for z3 in self.space.z3_values() {
            if cancel.is_cancelled() {
                summary.cancelled = true;
                break;
            }
            sink.event(&SearchEvent::Progress { z3 });
            let shard = self.search_shard(z3);
            for design in &shard.designs {
                sink.event(&SearchEvent::Accepted(design));
            }
            summary.absorb(&shard);
        }

        self.finish(summary, sink)
    }

    /// Search with one rayon task per annular tooth count.
    ///
    /// Z3 values are fanned out in chunks of a few tasks per worker thread.
    /// Each chunk is reassembled in Z3 order before any event is emitted, so
    /// the sink sees exactly the sequence [`run`](Self::run) would produce.
    /// Cancellation is checked before each chunk and before each shard.
    pub fn run_parallel<S: SearchSink + ?Sized>(
        &self,
        sink: &mut S,
        cancel: &CancelToken,
    ) -> SearchSummary {
        let mut summary = self.start(sink);
        let z3_values = self.space.z3_values();
        let chunk = u32::try_from(rayon::current_num_threads().saturating_mul(4))
            .unwrap_or(u32::MAX)
            .max(1);

        let mut next = z3_values.start;
        while next < z3_values.end && !summary.cancelled {
            if cancel.is_cancelled() {
                summary.cancelled = true;
                break;
            }
            let end = next.saturating_add(chunk).min(z3_values.end);
            let shards: Vec<Option<Shard>> = (next..end)
                .into_par_iter()
                .map(|z3| (!cancel.is_cancelled()).then(|| self.search_shard(z3)))
                .collect();

            for shard in shards {
                let Some(shard) = shard else {
                    summary.cancelled = true;
                    break;
                };
                sink.event(&SearchEvent::Progress { z3: shard.z3 });
                for design in &shard.designs {
                    sink.event(&SearchEvent::Accepted(design));
                }
                summary.absorb(&shard);
            }
            next = end;
        }

        self.finish(summary, sink)
    }

    fn start<S: SearchSink + ?Sized>(&self, sink: &mut S) -> SearchSummary {
        if self.spec.configuration == Configuration::TwoIi
            && self.spec.two_ii_modulus == ModulusZ3Source::Unset
        {
            warn!(
                "2II has no annular modulus scale (two_ii_modulus = \"unset\"); \
                 every candidate will fail the modulus range check"
            );
        }

        debug!(
            z1_max = self.bounds.z1_max,
            z2_max = self.bounds.z2_max,
            z3_max = self.bounds.z3_max,
            candidates = self.space.len(),
            "beginning search"
        );
        sink.event(&SearchEvent::Started {
            spec: &self.spec,
            bounds: self.bounds,
            candidates: self.space.len(),
        });
        SearchSummary::new(self.bounds, self.space.len())
    }

    fn finish<S: SearchSink + ?Sized>(
        &self,
        summary: SearchSummary,
        sink: &mut S,
    ) -> SearchSummary {
        if summary.cancelled {
            warn!(
                z3_completed = summary.z3_completed,
                "search cancelled at annular tooth boundary"
            );
        }
        info!(
            configuration = %self.spec.configuration,
            member_function = %self.spec.member_function,
            visited = summary.candidates_visited,
            accepted = summary.accepted,
            "search complete"
        );
        sink.event(&SearchEvent::Completed(&summary));
        summary
    }

    fn search_shard(&self, z3: u32) -> Shard {
        let mut shard = Shard {
            z3,
            designs: Vec::new(),
            visited: 0,
            rejections: RejectionCounts::default(),
        };
        for candidate in self.space.shard(z3) {
            shard.visited += 1;
            match self.evaluate(&candidate) {
                Ok(design) => shard.designs.push(design),
                Err(rejection) => shard.rejections.record(rejection),
            }
        }
        debug!(z3, visited = shard.visited, accepted = shard.designs.len(), "shard done");
        shard
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
