//! Realized ratio and efficiency per member function.
//!
//! # Basic Ratio
//!
//! With the carrier held, the sun-to-annular ratio of a stepped planet train
//! is `u = (Z2a·Z3) / (Z2b·Z1)`. Every other member function follows from
//! `u` by the Willis equation:
//!
//! | Mode | Ratio `i` | Efficiency `η` |
//! |------|-----------|----------------|
//! | `13` | `u` | `η0` |
//! | `31` | `|1/u|` | `η0` |
//! | `1v` | `|1 − u|` | `(1 − u·η0)/(1 − u)` |
//! | `v1` | `|1/(1 − u)|` | `(1 − u)/(1 − u/η0)` |
//! | `3v` | `1 − 1/u` | `(u − η0^±1)/(u − 1)` |
//! | `v3` | `|u/(u − 1)|` | `(u − 1)/(u − η0^∓1)` |
//!
//! `η0` is the mesh efficiency. In the carrier modes driven or driving the
//! annular gear, the exponent depends on whether both meshes are of the same
//! type (`2AA`, `2II`) or mixed (`1AI`, `2AI`).

use crate::error::Rejection;
use crate::types::{Candidate, Configuration, MemberFunction};

/// Ratio and efficiency of one candidate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Kinematics {
    pub ratio: f64,
    pub efficiency: f64,
}

/// Basic ratio `u` with the carrier held.
pub fn basic_ratio(candidate: &Candidate) -> f64 {
    (f64::from(candidate.z2a) * f64::from(candidate.z3))
        / (f64::from(candidate.z2b) * f64::from(candidate.z1))
}

// Exact integer test for u = 1.
fn is_unity(candidate: &Candidate) -> bool {
    u64::from(candidate.z2a) * u64::from(candidate.z3)
        == u64::from(candidate.z2b) * u64::from(candidate.z1)
}

impl MemberFunction {
    /// Ratio and efficiency of `candidate` in this mode.
    ///
    /// Candidates whose formulas divide by zero are rejected as
    /// [`Rejection::Degenerate`].
    #[allow(clippy::float_cmp)]
    pub fn evaluate(
        self,
        candidate: &Candidate,
        configuration: Configuration,
        mesh_efficiency: f64,
    ) -> Result<Kinematics, Rejection> {
        let u = basic_ratio(candidate);
        let unity = is_unity(candidate);
        let eta = mesh_efficiency;

        let (ratio, efficiency) = match self {
            Self::SunToAnnular => (u, eta),
            Self::AnnularToSun => ((1.0 / u).abs(), eta),
            Self::SunToCarrier => {
                let efficiency = if unity {
                    0.0
                } else {
                    u.mul_add(-eta, 1.0) / (1.0 - u)
                };
                ((1.0 - u).abs(), efficiency)
            }
            Self::CarrierToSun => {
                if unity {
                    return Err(Rejection::Degenerate);
                }
                let denominator = 1.0 - u / eta;
                let efficiency = if denominator == 0.0 {
                    0.0
                } else {
                    (1.0 - u) / denominator
                };
                ((1.0 / (1.0 - u)).abs(), efficiency)
            }
            Self::AnnularToCarrier => {
                let efficiency = if unity {
                    0.0
                } else if configuration.is_same_mesh_type() {
                    (u - 1.0 / eta) / (u - 1.0)
                } else {
                    (u - eta) / (u - 1.0)
                };
                (1.0 - 1.0 / u, efficiency)
            }
            Self::CarrierToAnnular => {
                if unity {
                    return Err(Rejection::Degenerate);
                }
                let pole = if configuration.is_same_mesh_type() {
                    eta
                } else {
                    1.0 / eta
                };
                if u == pole {
                    return Err(Rejection::Degenerate);
                }
                ((u / (u - 1.0)).abs(), (u - 1.0) / (u - pole))
            }
        };

        Ok(Kinematics { ratio, efficiency })
    }
}

/// Percentage error of `ratio` against `target`, rounded to 6 decimals.
pub fn percentage_error(ratio: f64, target: f64) -> f64 {
    let error = ((ratio - target) / target * 100.0).abs();
    (error * 1e6).round() / 1e6
}

/// Acceptance test: strictly inside the tolerance.
pub fn within_tolerance(error_percent: f64, tolerance: f64) -> Result<(), Rejection> {
    if error_percent < tolerance {
        Ok(())
    } else {
        Err(Rejection::Tolerance)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
