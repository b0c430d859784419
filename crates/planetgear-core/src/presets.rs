//! Ready-made search requests for common planetary trains.

use crate::config::{GearTrainSpec, ModulusZ3Source};
use crate::types::{Configuration, MemberFunction};

/// Reference scenario: a `2AA` train driven at the sun with the carrier as
/// output, target ratio 6.5 within 0.1 %, annular pitch diameter 125 mm and
/// modules between 2 and 3 mm.
pub const fn reference_2aa_sun_to_carrier() -> GearTrainSpec {
    GearTrainSpec {
        ratio: 6.5,
        tolerance: 0.1,
        annular_gear_pitch_diameter: 125.0,
        min_gear_teeth: 12,
        z3_min: 12,
        min_gear_modulus: 2.0,
        max_gear_modulus: 3.0,
        mesh_efficiency: 0.9,
        member_function: MemberFunction::SunToCarrier,
        configuration: Configuration::TwoAa,
        two_ii_modulus: ModulusZ3Source::Unset,
    }
}

/// Simple planetary reducer (`1AI`, sun in, carrier out).
pub const fn simple_reducer(ratio: f64, annular_gear_pitch_diameter: f64) -> GearTrainSpec {
    GearTrainSpec {
        ratio,
        tolerance: 1.0,
        annular_gear_pitch_diameter,
        min_gear_teeth: 12,
        z3_min: 30,
        min_gear_modulus: 1.0,
        max_gear_modulus: 3.0,
        mesh_efficiency: 0.98,
        member_function: MemberFunction::SunToCarrier,
        configuration: Configuration::OneAi,
        two_ii_modulus: ModulusZ3Source::Unset,
    }
}

/// Stepped-planet train with two internal meshes and the annular modulus
/// taken from the pitch diameter.
pub const fn two_ii_carrier_to_annular(ratio: f64, annular_gear_pitch_diameter: f64) -> GearTrainSpec {
    GearTrainSpec {
        ratio,
        tolerance: 1.0,
        annular_gear_pitch_diameter,
        min_gear_teeth: 12,
        z3_min: 12,
        min_gear_modulus: 1.0,
        max_gear_modulus: 3.0,
        mesh_efficiency: 0.95,
        member_function: MemberFunction::CarrierToAnnular,
        configuration: Configuration::TwoIi,
        two_ii_modulus: ModulusZ3Source::AnnularDiameter,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_is_valid() {
        let spec = reference_2aa_sun_to_carrier();
        assert!(spec.validate().is_ok());
        assert!((spec.ratio - 6.5).abs() < f64::EPSILON);
        assert!((spec.tolerance - 0.1).abs() < f64::EPSILON);
        assert_eq!(spec.configuration, Configuration::TwoAa);
        assert_eq!(spec.member_function, MemberFunction::SunToCarrier);
    }

    #[test]
    fn reference_matches_toml_form() {
        let from_toml = GearTrainSpec::from_toml_str(
            r#"
            ratio = 6.5
            tolerance = 0.1
            annular_gear_pitch_diameter = 125.0
            min_gear_teeth = 12
            z3_min = 12
            min_gear_modulus = 2.0
            max_gear_modulus = 3.0
            mesh_efficiency = 0.9
            member_function = "1v"
            configuration = "2AA"
        "#,
        )
        .unwrap();
        assert_eq!(from_toml, reference_2aa_sun_to_carrier());
    }

    #[test]
    fn simple_reducer_valid() {
        let spec = simple_reducer(5.0, 120.0);
        assert!(spec.validate().is_ok());
        assert_eq!(spec.configuration, Configuration::OneAi);
    }

    #[test]
    fn two_ii_preset_sets_modulus_source() {
        let spec = two_ii_carrier_to_annular(20.0, 100.0);
        assert!(spec.validate().is_ok());
        assert_eq!(spec.two_ii_modulus, ModulusZ3Source::AnnularDiameter);
    }
}
