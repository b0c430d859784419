//! Planet-to-planet clearance.
//!
//! With `N` planets on a circle of radius `A`, adjacent planet centres are
//! `L = 2·A·sin(π/N)` apart. A planet face of pitch diameter `D2` fits only
//! if `D2 + f <= L`, where `f` is the minimum gap. Both planet faces are
//! checked: the Z2a face on the sun-mesh circle and the Z2b face on the
//! annular-mesh circle.

use std::f64::consts::PI;

use crate::error::Rejection;
use crate::types::{Candidate, Moduli, PLANET_COUNT};

/// Planet spacing for one planet face.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FaceSpacing {
    /// Radius of the circle through the planet centres (mm).
    pub centre_radius: f64,
    /// Distance between adjacent planet centres (mm).
    pub centre_spacing: f64,
    /// Pitch diameter of the planet face (mm).
    pub planet_diameter: f64,
}

impl FaceSpacing {
    fn new(modulus: f64, centre_teeth: u32, planet_teeth: u32) -> Self {
        let centre_radius = modulus * (f64::from(centre_teeth) + f64::from(planet_teeth)) / 2.0;
        let centre_spacing = 2.0 * centre_radius * (PI / f64::from(PLANET_COUNT)).sin();
        Self {
            centre_radius,
            centre_spacing,
            planet_diameter: modulus * f64::from(planet_teeth),
        }
    }

    /// Whether the planet faces keep at least `clearance` mm between them.
    pub fn fits(&self, clearance: f64) -> bool {
        self.planet_diameter + clearance <= self.centre_spacing
    }
}

/// Spacing of the sun-side (Z2a) and annular-side (Z2b) planet faces.
pub fn spacing(candidate: &Candidate, moduli: &Moduli) -> (FaceSpacing, FaceSpacing) {
    (
        FaceSpacing::new(moduli.modulus_z1, candidate.z1, candidate.z2a),
        FaceSpacing::new(moduli.modulus_z3, candidate.z3, candidate.z2b),
    )
}

/// Reject candidates whose adjacent planets would overlap.
pub fn check(candidate: &Candidate, moduli: &Moduli, clearance: f64) -> Result<(), Rejection> {
    let (sun_face, annular_face) = spacing(candidate, moduli);
    if sun_face.fits(clearance) && annular_face.fits(clearance) {
        Ok(())
    } else {
        Err(Rejection::Clearance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PLANET_CLEARANCE_MM;
    use approx::assert_relative_eq;

    const fn moduli(modulus_z1: f64, modulus_z3: f64) -> Moduli {
        Moduli {
            modulus_z1,
            modulus_z3,
        }
    }

    #[test]
    fn spacing_uses_sixty_degree_chord() {
        let (sun_face, annular_face) = spacing(&Candidate::new(20, 10, 12, 40), &moduli(2.0, 1.0));
        // A2a = 2·30/2 = 30, L2a = 2·30·sin(60°)
        assert_relative_eq!(sun_face.centre_radius, 30.0);
        assert_relative_eq!(sun_face.centre_spacing, 60.0 * (PI / 3.0).sin());
        assert_relative_eq!(sun_face.planet_diameter, 20.0);
        // A2b = 1·52/2 = 26
        assert_relative_eq!(annular_face.centre_radius, 26.0);
        assert_relative_eq!(annular_face.planet_diameter, 12.0);
    }

    #[test]
    fn small_planets_fit() {
        // L2a ≈ 51.96 vs D2a + 2 = 22; L2b ≈ 45.03 vs 14
        assert!(check(&Candidate::new(20, 10, 12, 40), &moduli(2.0, 1.0), PLANET_CLEARANCE_MM).is_ok());
    }

    #[test]
    fn large_planets_collide() {
        // Sun-side: A = 1·(10 + 40)/2 = 25, L ≈ 43.3, D2a + 2 = 42 -> fits.
        // Annular-side: A = 1·(10 + 45)/2 = 27.5, L ≈ 47.6, D2b + 2 = 47 -> fits.
        let c = Candidate::new(10, 40, 45, 10);
        assert!(check(&c, &moduli(1.0, 1.0), PLANET_CLEARANCE_MM).is_ok());
        // A larger planet on the sun side no longer fits.
        let c = Candidate::new(10, 60, 45, 10);
        assert_eq!(
            check(&c, &moduli(1.0, 1.0), PLANET_CLEARANCE_MM),
            Err(Rejection::Clearance)
        );
    }

    #[test]
    fn clearance_margin_matters() {
        let c = Candidate::new(10, 40, 40, 10);
        // L = 50·sin(60°) ≈ 43.30, D2 = 40
        assert!(check(&c, &moduli(1.0, 1.0), 3.0).is_ok());
        assert_eq!(
            check(&c, &moduli(1.0, 1.0), 3.5),
            Err(Rejection::Clearance)
        );
    }

    #[test]
    fn zero_modulus_fails() {
        let c = Candidate::new(20, 10, 12, 40);
        assert!(check(&c, &moduli(0.0, 0.0), PLANET_CLEARANCE_MM).is_err());
    }
}
