//! Assembly condition for equally spaced planets.
//!
//! `k = (Z1·Z2b − Z2a·Z3) / (gcd(Z2a, Z2b) · N)` must be an integer, with
//! `N` the planet count. Otherwise the planets cannot all be mounted at
//! `360°/N` without tooth interference.

use num_integer::Integer;

use crate::error::Rejection;
use crate::types::{Candidate, PLANET_COUNT};

/// Check the assembly condition.
pub fn check(candidate: &Candidate) -> Result<(), Rejection> {
    let Candidate { z1, z2a, z2b, z3 } = *candidate;
    let numerator = i64::from(z1) * i64::from(z2b) - i64::from(z2a) * i64::from(z3);
    let divisor = i64::from(z2a.gcd(&z2b)) * i64::from(PLANET_COUNT);
    if divisor != 0 && numerator % divisor == 0 {
        Ok(())
    } else {
        Err(Rejection::Assembly)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_planet_faces_share_full_gcd() {
        // gcd(12, 12)·3 = 36; 30·12 − 12·57 = −324 = −9·36
        assert!(check(&Candidate::new(30, 12, 12, 57)).is_ok());
        // 31·12 − 12·57 = −312, not a multiple of 36
        assert!(check(&Candidate::new(31, 12, 12, 57)).is_err());
    }

    #[test]
    fn simple_train_needs_tooth_difference_divisible_by_three() {
        // Single planet: k = Z2·(Z1 − Z3) / (Z2·3), passes iff 3 | (Z3 − Z1).
        assert!(check(&Candidate::new(21, 20, 20, 60)).is_ok());
        assert!(check(&Candidate::new(20, 20, 20, 60)).is_err());
    }

    #[test]
    fn stepped_planet_uses_gcd() {
        // 24·18 − 12·30 = 72, gcd(12, 18)·3 = 18, 72 / 18 = 4
        assert!(check(&Candidate::new(24, 12, 18, 30)).is_ok());
        // 25·18 − 12·30 = 90, 90 / 18 = 5
        assert!(check(&Candidate::new(25, 12, 18, 30)).is_ok());
        // 26·18 − 12·30 = 108, 108 / 18 = 6
        assert!(check(&Candidate::new(26, 12, 18, 30)).is_ok());
        // 24·18 − 13·30 = 42, gcd(13, 18)·3 = 3, 42 / 3 = 14
        assert!(check(&Candidate::new(24, 13, 18, 30)).is_ok());
        // 24·17 − 13·30 = 18, gcd(13, 17)·3 = 3 -> ok; 25·17 − 390 = 35 -> not
        assert!(check(&Candidate::new(24, 13, 17, 30)).is_ok());
        assert_eq!(
            check(&Candidate::new(25, 13, 17, 30)),
            Err(Rejection::Assembly)
        );
    }

    #[test]
    fn negative_numerator_handled() {
        // 10·10 − 10·40 = −300, divisor 30 -> −10
        assert!(check(&Candidate::new(10, 10, 10, 40)).is_ok());
        // 10·10 − 10·41 = −310 -> not divisible by 30
        assert!(check(&Candidate::new(10, 10, 10, 41)).is_err());
    }
}
