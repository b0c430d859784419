//! Upper tooth-count limits derived from the annular pitch diameter.
//!
//! With `D` the annular pitch diameter, `m` the minimum modulus and `n` the
//! minimum sun/planet tooth count:
//!
//! ```text
//! Z3_max = floor(D / m)
//! Z2_max = floor(0.45·D / m − 2)
//! Z1_max = floor(0.9·D / m − 2·n − 4)
//! ```
//!
//! All three are additionally capped at `Z3_max`. A bound below its minimum is
//! not an error; the matching range is simply empty.

use serde::Serialize;

use crate::config::GearTrainSpec;

/// Inclusive upper bounds. Signed so that a geometry too small for the
/// minimum tooth count reads as a negative bound instead of wrapping.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ToothBounds {
    pub z1_max: i64,
    pub z2_max: i64,
    pub z3_max: i64,
}

impl ToothBounds {
    /// Compute bounds for `spec`.
    #[allow(clippy::cast_possible_truncation, clippy::suboptimal_flops)]
    pub fn from_spec(spec: &GearTrainSpec) -> Self {
        let d = spec.annular_gear_pitch_diameter;
        let m = spec.min_gear_modulus;
        let n = f64::from(spec.min_gear_teeth);
        let max_gear_teeth = (d / m).floor() as i64;

        let z3_max = max_gear_teeth;
        let z2_max = (0.45 * d / m - 2.0).floor() as i64;
        let z1_max = (0.9 * d / m - 2.0 * n - 4.0).floor() as i64;

        Self {
            z1_max: z1_max.min(max_gear_teeth),
            z2_max: z2_max.min(max_gear_teeth),
            z3_max,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_spec_bounds() {
        // D = 100, m = 1, n = 10
        let b = ToothBounds::from_spec(&GearTrainSpec::default());
        assert_eq!(b.z3_max, 100);
        assert_eq!(b.z2_max, 43);
        assert_eq!(b.z1_max, 66);
    }

    #[test]
    fn reference_scenario_bounds() {
        // D = 125, m = 2, n = 12: 62.5 -> 62, 28.125 - 2 -> 26, 56.25 - 28 -> 28
        let spec = GearTrainSpec::default()
            .with_annular_gear_pitch_diameter(125.0)
            .with_modulus_range(2.0, 3.0)
            .with_min_teeth(12, 12);
        let b = ToothBounds::from_spec(&spec);
        assert_eq!(b.z3_max, 62);
        assert_eq!(b.z2_max, 26);
        assert_eq!(b.z1_max, 28);
    }

    #[test]
    fn small_geometry_gives_negative_bounds() {
        let spec = GearTrainSpec::default()
            .with_annular_gear_pitch_diameter(10.0)
            .with_modulus_range(2.0, 3.0);
        let b = ToothBounds::from_spec(&spec);
        assert_eq!(b.z3_max, 5);
        assert_eq!(b.z2_max, 0);
        assert!(b.z1_max < 0);
    }
}
