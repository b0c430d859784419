//! Exhaustive candidate enumeration.
//!
//! The candidate space is the cartesian product
//! `Z3 × Z2a × Z2b × Z1`, visited with Z3 as the outermost (slowest) digit and
//! Z1 as the innermost. The order is part of the contract: regression output
//! and parallel shards both depend on it.

use std::iter::FusedIterator;
use std::ops::Range;

use crate::bounds::ToothBounds;
use crate::config::GearTrainSpec;
use crate::types::Candidate;

// ---------------------------------------------------------------------------
// ToothRange
// ---------------------------------------------------------------------------

/// Half-open range of tooth counts. Empty when the upper bound falls below
/// the minimum.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ToothRange {
    start: u32,
    end: u32,
}

impl ToothRange {
    /// Range `[min, max]`, where `max` may be below `min` (or negative).
    /// Bounds past `u32::MAX` are clamped.
    pub fn inclusive(min: u32, max: i64) -> Self {
        let end = max.saturating_add(1).clamp(i64::from(min), i64::from(u32::MAX));
        Self {
            start: min,
            end: u32::try_from(end).unwrap_or(u32::MAX),
        }
    }

    pub const fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    #[allow(clippy::cast_lossless)]
    pub const fn len(&self) -> u64 {
        (self.end - self.start) as u64
    }

    pub const fn contains(&self, teeth: u32) -> bool {
        self.start <= teeth && teeth < self.end
    }

    pub const fn iter(&self) -> Range<u32> {
        self.start..self.end
    }

    /// Single-value range, used to pin Z3 for one shard.
    const fn single(teeth: u32) -> Self {
        Self {
            start: teeth,
            end: teeth + 1,
        }
    }
}

// ---------------------------------------------------------------------------
// CandidateSpace
// ---------------------------------------------------------------------------

/// The four tooth ranges of a search. Cheap to copy; iterate as many times
/// as needed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CandidateSpace {
    pub z1: ToothRange,
    pub z2: ToothRange,
    pub z3: ToothRange,
}

impl CandidateSpace {
    pub fn new(spec: &GearTrainSpec, bounds: &ToothBounds) -> Self {
        Self {
            z1: ToothRange::inclusive(spec.min_gear_teeth, bounds.z1_max),
            z2: ToothRange::inclusive(spec.min_gear_teeth, bounds.z2_max),
            z3: ToothRange::inclusive(spec.z3_min, bounds.z3_max),
        }
    }

    /// Total number of candidates, i.e. the product of the four range sizes.
    /// Saturates at `u64::MAX` for spaces too large to count.
    pub const fn len(&self) -> u64 {
        self.z3
            .len()
            .saturating_mul(self.z2.len())
            .saturating_mul(self.z2.len())
            .saturating_mul(self.z1.len())
    }

    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Outer-loop values, one per progress marker.
    pub const fn z3_values(&self) -> Range<u32> {
        self.z3.iter()
    }

    /// Every candidate, in enumeration order.
    pub fn iter(&self) -> Candidates {
        Candidates::new(*self)
    }

    /// Candidates sharing one annular tooth count. Empty if `z3` is outside
    /// the Z3 range.
    pub fn shard(&self, z3: u32) -> Candidates {
        if !self.z3.contains(z3) {
            return Candidates::exhausted(*self);
        }
        Candidates::new(Self {
            z3: ToothRange::single(z3),
            ..*self
        })
    }

    fn first(&self) -> Option<Candidate> {
        if self.is_empty() {
            return None;
        }
        let z2 = self.z2.start;
        Some(Candidate::new(self.z1.start, z2, z2, self.z3.start))
    }

    // Odometer step: Z1 fastest, Z3 slowest.
    const fn successor(&self, c: Candidate) -> Option<Candidate> {
        if c.z1 + 1 < self.z1.end {
            return Some(Candidate::new(c.z1 + 1, c.z2a, c.z2b, c.z3));
        }
        let z1 = self.z1.start;
        if c.z2b + 1 < self.z2.end {
            return Some(Candidate::new(z1, c.z2a, c.z2b + 1, c.z3));
        }
        let z2b = self.z2.start;
        if c.z2a + 1 < self.z2.end {
            return Some(Candidate::new(z1, c.z2a + 1, z2b, c.z3));
        }
        let z2a = self.z2.start;
        if c.z3 + 1 < self.z3.end {
            return Some(Candidate::new(z1, z2a, z2b, c.z3 + 1));
        }
        None
    }
}

impl IntoIterator for &CandidateSpace {
    type Item = Candidate;
    type IntoIter = Candidates;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ---------------------------------------------------------------------------
// Candidates
// ---------------------------------------------------------------------------

/// Lazy iterator over a [`CandidateSpace`].
#[derive(Clone, Debug)]
pub struct Candidates {
    space: CandidateSpace,
    next: Option<Candidate>,
    remaining: u64,
}

impl Candidates {
    fn new(space: CandidateSpace) -> Self {
        Self {
            space,
            next: space.first(),
            remaining: space.len(),
        }
    }

    const fn exhausted(space: CandidateSpace) -> Self {
        Self {
            space,
            next: None,
            remaining: 0,
        }
    }
}

impl Iterator for Candidates {
    type Item = Candidate;

    fn next(&mut self) -> Option<Candidate> {
        let current = self.next?;
        self.next = self.space.successor(current);
        self.remaining = self.remaining.saturating_sub(1);
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = usize::try_from(self.remaining).unwrap_or(usize::MAX);
        // u64::MAX means the count saturated.
        if self.remaining == u64::MAX {
            return (n, None);
        }
        (n, usize::try_from(self.remaining).ok())
    }
}

impl FusedIterator for Candidates {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
