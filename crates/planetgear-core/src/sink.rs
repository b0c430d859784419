//! Search events and the sinks that consume them.
//!
//! A run emits, in order:
//!
//! ```text
//! Started → (Progress{z3} → Accepted*)* → Completed
//! ```
//!
//! Sinks decide how to render or store the events; the pipeline itself never
//! prints.

use serde::Serialize;

use crate::bounds::ToothBounds;
use crate::config::GearTrainSpec;
use crate::search::SearchSummary;
use crate::types::ValidatedDesign;

/// One event of a search run.
#[derive(Clone, Copy, Debug, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SearchEvent<'a> {
    /// Bounds are known; enumeration is about to begin.
    Started {
        spec: &'a GearTrainSpec,
        bounds: ToothBounds,
        candidates: u64,
    },
    /// Enumeration moved to a new annular tooth count.
    Progress { z3: u32 },
    /// A candidate passed every stage.
    Accepted(&'a ValidatedDesign),
    /// The run finished, or stopped at a Z3 boundary after cancellation.
    Completed(&'a SearchSummary),
}

/// Receiver of [`SearchEvent`]s.
pub trait SearchSink {
    fn event(&mut self, event: &SearchEvent<'_>);
}

impl<S: SearchSink + ?Sized> SearchSink for &mut S {
    fn event(&mut self, event: &SearchEvent<'_>) {
        (**self).event(event);
    }
}

// ---------------------------------------------------------------------------
// CollectSink
// ---------------------------------------------------------------------------

/// Sink that keeps everything in memory, in arrival order.
#[derive(Clone, Debug, Default)]
pub struct CollectSink {
    pub bounds: Option<ToothBounds>,
    pub progress: Vec<u32>,
    pub designs: Vec<ValidatedDesign>,
    pub summary: Option<SearchSummary>,
}

impl CollectSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SearchSink for CollectSink {
    fn event(&mut self, event: &SearchEvent<'_>) {
        match *event {
            SearchEvent::Started { bounds, .. } => self.bounds = Some(bounds),
            SearchEvent::Progress { z3 } => self.progress.push(z3),
            SearchEvent::Accepted(design) => self.designs.push(design.clone()),
            SearchEvent::Completed(summary) => self.summary = Some(summary.clone()),
        }
    }
}

/// Sink that drops every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl SearchSink for NullSink {
    fn event(&mut self, _event: &SearchEvent<'_>) {}
}
