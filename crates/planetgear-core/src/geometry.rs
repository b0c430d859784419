//! Modulus derivation and the condition of neighbouring.
//!
//! Each [`Configuration`] fixes one modulus from the annular pitch diameter
//! `D` (or the minimum modulus) and derives the other from the meshing
//! equation of the train:
//!
//! | Config | modulus_Z3 | modulus_Z1 |
//! |--------|------------|------------|
//! | `1AI`  | `D / Z3`   | modulus_Z3 |
//! | `2AI`  | `D / Z3`   | `m3·(Z3 − Z2b) / (Z1 + Z2a)` |
//! | `2AA`  | min modulus | `m3·(Z3 + Z2b) / (Z1 + Z2a)` |
//! | `2II`  | see [`ModulusZ3Source`] | `m3·(Z3 − Z2b) / (Z1 − Z2a)` |
//!
//! Both moduli are then checked against the allowed modulus range.

use crate::config::{GearTrainSpec, ModulusZ3Source};
use crate::error::Rejection;
use crate::types::{Candidate, Configuration, Moduli};

impl Configuration {
    /// Derive both moduli for `candidate` and apply this layout's
    /// neighbouring checks.
    pub fn derive_moduli(
        self,
        candidate: &Candidate,
        spec: &GearTrainSpec,
    ) -> Result<Moduli, Rejection> {
        match self {
            Self::OneAi => one_ai(candidate, spec),
            Self::TwoAi => two_ai(candidate, spec),
            Self::TwoAa => two_aa(candidate, spec),
            Self::TwoIi => two_ii(candidate, spec),
        }
    }
}

/// Reject moduli outside `[min_gear_modulus, max_gear_modulus]`.
pub fn check_modulus_range(moduli: &Moduli, spec: &GearTrainSpec) -> Result<(), Rejection> {
    let range = spec.min_gear_modulus..=spec.max_gear_modulus;
    if range.contains(&moduli.modulus_z1) && range.contains(&moduli.modulus_z3) {
        Ok(())
    } else {
        Err(Rejection::ModulusRange)
    }
}

/// Derive moduli, then range-check them.
pub fn check(candidate: &Candidate, spec: &GearTrainSpec) -> Result<Moduli, Rejection> {
    let moduli = spec.configuration.derive_moduli(candidate, spec)?;
    check_modulus_range(&moduli, spec)?;
    Ok(moduli)
}

fn teeth(c: &Candidate) -> (f64, f64, f64, f64) {
    (
        f64::from(c.z1),
        f64::from(c.z2a),
        f64::from(c.z2b),
        f64::from(c.z3),
    )
}

// Single planet: one modulus for the whole train and the coaxial condition
// Z1 + 2·Z2 = Z3.
fn one_ai(c: &Candidate, spec: &GearTrainSpec) -> Result<Moduli, Rejection> {
    if c.z2a != c.z2b {
        return Err(Rejection::Geometry);
    }
    let modulus_z3 = spec.annular_gear_pitch_diameter / f64::from(c.z3);
    if c.z1 + 2 * c.z2a != c.z3 {
        return Err(Rejection::Geometry);
    }
    Ok(Moduli {
        modulus_z1: modulus_z3,
        modulus_z3,
    })
}

#[allow(clippy::suboptimal_flops)]
fn two_ai(c: &Candidate, spec: &GearTrainSpec) -> Result<Moduli, Rejection> {
    let d = spec.annular_gear_pitch_diameter;
    let (z1, z2a, z2b, z3) = teeth(c);
    let modulus_z3 = d / z3;
    let modulus_z1 = modulus_z3 * (z3 - z2b) / (z1 + z2a);

    if modulus_z1 * z1 + 2.0 * modulus_z1 * z2a > d {
        return Err(Rejection::Geometry);
    }
    if modulus_z3 * z2b > 0.45 * d {
        return Err(Rejection::Geometry);
    }
    // Z2b is added as a tooth count here, not scaled by the modulus.
    if modulus_z1 * (z1 + z2a) + modulus_z3 + z2b > d {
        return Err(Rejection::Geometry);
    }
    Ok(Moduli {
        modulus_z1,
        modulus_z3,
    })
}

fn two_aa(c: &Candidate, spec: &GearTrainSpec) -> Result<Moduli, Rejection> {
    let d = spec.annular_gear_pitch_diameter;
    let (z1, z2a, z2b, z3) = teeth(c);
    let modulus_z3 = spec.min_gear_modulus;
    let modulus_z1 = modulus_z3 * (z3 + z2b) / (z1 + z2a);

    if modulus_z1 * (z1 + z2a) > d {
        return Err(Rejection::Geometry);
    }
    if modulus_z3 * (z3 + z2b) > d {
        return Err(Rejection::Geometry);
    }
    Ok(Moduli {
        modulus_z1,
        modulus_z3,
    })
}

fn two_ii(c: &Candidate, spec: &GearTrainSpec) -> Result<Moduli, Rejection> {
    if c.z1 == c.z2a {
        return Err(Rejection::Degenerate);
    }
    let d = spec.annular_gear_pitch_diameter;
    let (z1, z2a, z2b, z3) = teeth(c);
    let modulus_z3 = match spec.two_ii_modulus {
        ModulusZ3Source::Unset => 0.0,
        ModulusZ3Source::AnnularDiameter => d / z3,
    };
    let modulus_z1 = modulus_z3 * (z3 - z2b) / (z1 - z2a);

    if modulus_z1 * z1 > d {
        return Err(Rejection::Geometry);
    }
    if modulus_z3 * z3 > d {
        return Err(Rejection::Geometry);
    }
    Ok(Moduli {
        modulus_z1,
        modulus_z3,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn spec(configuration: Configuration) -> GearTrainSpec {
        GearTrainSpec::default()
            .with_configuration(configuration)
            .with_modulus_range(1.0, 10.0)
    }

    // ---- 1AI ----

    #[test]
    fn one_ai_shares_modulus() {
        let m = Configuration::OneAi
            .derive_moduli(&Candidate::new(20, 15, 15, 50), &spec(Configuration::OneAi))
            .unwrap();
        assert_relative_eq!(m.modulus_z3, 2.0);
        assert_relative_eq!(m.modulus_z1, 2.0);
    }

    #[test]
    fn one_ai_requires_equal_planet_faces() {
        let r = Configuration::OneAi
            .derive_moduli(&Candidate::new(20, 15, 16, 50), &spec(Configuration::OneAi));
        assert_eq!(r, Err(Rejection::Geometry));
    }

    #[test]
    fn one_ai_requires_coaxial_teeth() {
        let r = Configuration::OneAi
            .derive_moduli(&Candidate::new(21, 15, 15, 50), &spec(Configuration::OneAi));
        assert_eq!(r, Err(Rejection::Geometry));
    }

    // ---- 2AI ----

    #[test]
    fn two_ai_derives_sun_modulus_from_meshing() {
        // m3 = 100/60, m1 = m3·(60 − 25)/(20 + 15)
        let m = Configuration::TwoAi
            .derive_moduli(&Candidate::new(20, 15, 25, 60), &spec(Configuration::TwoAi))
            .unwrap();
        assert_relative_eq!(m.modulus_z3, 100.0 / 60.0);
        assert_relative_eq!(m.modulus_z1, (100.0 / 60.0) * 35.0 / 35.0);
    }

    #[test]
    fn two_ai_rejects_oversized_planet() {
        // m3·Z2b = 2·30 = 60 > 45
        let r = Configuration::TwoAi
            .derive_moduli(&Candidate::new(10, 10, 30, 50), &spec(Configuration::TwoAi));
        assert_eq!(r, Err(Rejection::Geometry));
    }

    #[test]
    fn two_ai_rejects_sun_plus_planets_beyond_annulus() {
        // m3 = 2.5, m1 = 2.5·(40 − 10)/(10 + 20) = 2.5, 2.5·10 + 2·2.5·20 = 125 > 100
        let r = Configuration::TwoAi
            .derive_moduli(&Candidate::new(10, 20, 10, 40), &spec(Configuration::TwoAi));
        assert_eq!(r, Err(Rejection::Geometry));
    }

    // ---- 2AA ----

    #[test]
    fn two_aa_fixes_annular_modulus_to_minimum() {
        let s = spec(Configuration::TwoAa).with_modulus_range(2.0, 3.0);
        let m = Configuration::TwoAa
            .derive_moduli(&Candidate::new(12, 12, 12, 20), &s)
            .unwrap();
        assert_relative_eq!(m.modulus_z3, 2.0);
        assert_relative_eq!(m.modulus_z1, 2.0 * 32.0 / 24.0);
    }

    #[test]
    fn two_aa_rejects_centre_distance_beyond_diameter() {
        // m3·(Z3 + Z2b) = 1·(90 + 20) = 110 > 100
        let r = Configuration::TwoAa
            .derive_moduli(&Candidate::new(20, 20, 20, 90), &spec(Configuration::TwoAa));
        assert_eq!(r, Err(Rejection::Geometry));
    }

    // ---- 2II ----

    #[test]
    fn two_ii_equal_sun_and_planet_is_degenerate() {
        let r = Configuration::TwoIi
            .derive_moduli(&Candidate::new(15, 15, 12, 40), &spec(Configuration::TwoIi));
        assert_eq!(r, Err(Rejection::Degenerate));
    }

    #[test]
    fn two_ii_unset_annular_modulus_fails_range() {
        let s = spec(Configuration::TwoIi);
        let c = Candidate::new(30, 15, 12, 40);
        let m = Configuration::TwoIi.derive_moduli(&c, &s).unwrap();
        assert!(m.modulus_z3.abs() < f64::EPSILON);
        assert!(m.modulus_z1.abs() < f64::EPSILON);
        assert_eq!(check(&c, &s), Err(Rejection::ModulusRange));
    }

    #[test]
    fn two_ii_annular_diameter_policy() {
        let s = spec(Configuration::TwoIi).with_two_ii_modulus(ModulusZ3Source::AnnularDiameter);
        // m3 = 100/40 = 2.5, m1 = 2.5·(40 − 30)/(20 − 10) = 2.5
        let m = check(&Candidate::new(20, 10, 30, 40), &s).unwrap();
        assert_relative_eq!(m.modulus_z3, 2.5);
        assert_relative_eq!(m.modulus_z1, 2.5);
    }

    #[test]
    fn two_ii_rejects_oversized_sun() {
        let s = spec(Configuration::TwoIi).with_two_ii_modulus(ModulusZ3Source::AnnularDiameter);
        // m1 = 2.5·28/2 = 35, m1·Z1 = 35·17 > 100
        let r = Configuration::TwoIi.derive_moduli(&Candidate::new(17, 15, 12, 40), &s);
        assert_eq!(r, Err(Rejection::Geometry));
    }

    // ---- modulus range ----

    #[test]
    fn modulus_range_inclusive_bounds() {
        let s = spec(Configuration::TwoAa).with_modulus_range(2.0, 3.0);
        let at_bounds = Moduli {
            modulus_z1: 3.0,
            modulus_z3: 2.0,
        };
        assert!(check_modulus_range(&at_bounds, &s).is_ok());
        let above = Moduli {
            modulus_z1: 3.000_001,
            modulus_z3: 2.0,
        };
        assert_eq!(check_modulus_range(&above, &s), Err(Rejection::ModulusRange));
        let below = Moduli {
            modulus_z1: 2.5,
            modulus_z3: 1.999,
        };
        assert_eq!(check_modulus_range(&below, &s), Err(Rejection::ModulusRange));
    }

    #[test]
    fn negative_sun_modulus_fails_range() {
        // 2AI with Z2b > Z3 gives a negative sun modulus.
        let s = spec(Configuration::TwoAi);
        let c = Candidate::new(10, 10, 12, 11);
        assert!(check(&c, &s).is_err());
    }
}
