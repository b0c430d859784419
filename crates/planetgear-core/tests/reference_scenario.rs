//! Integration test: the 2AA sun-to-carrier reference train.
//!
//! Reference request:
//!   ratio 6.5 ± 0.1 %, annular pitch diameter 125 mm, min teeth 12/12,
//!   modulus 2..=3 mm, mesh efficiency 0.9, member function 1v, config 2AA
//!
//! Expected bounds: Z1_max = 28, Z2_max = 26, Z3_max = 62.

use approx::assert_relative_eq;
use planetgear_core::prelude::*;

fn reference() -> (Synthesizer, CollectSink, SearchSummary) {
    let synth = Synthesizer::new(presets::reference_2aa_sun_to_carrier()).unwrap();
    let mut sink = CollectSink::new();
    let summary = synth.run(&mut sink, &CancelToken::new());
    (synth, sink, summary)
}

#[test]
fn reference_bounds() {
    let (synth, sink, _) = reference();
    let expected = ToothBounds {
        z1_max: 28,
        z2_max: 26,
        z3_max: 62,
    };
    assert_eq!(synth.bounds(), expected);
    assert_eq!(sink.bounds, Some(expected));
}

#[test]
fn reference_runs_to_completion() {
    let (synth, sink, summary) = reference();
    // Z1: 12..=28 (17), Z2: 12..=26 (15), Z3: 12..=62 (51)
    assert_eq!(summary.candidates_visited, 51 * 15 * 15 * 17);
    assert_eq!(summary.candidates_visited, synth.candidate_space().len());
    assert!(!summary.cancelled);
    assert_eq!(sink.progress.first(), Some(&12));
    assert_eq!(sink.progress.last(), Some(&62));
    assert_eq!(sink.summary, Some(summary));
}

#[test]
fn reference_designs_use_minimum_annular_modulus() {
    let (_, sink, _) = reference();
    assert!(!sink.designs.is_empty());
    for d in &sink.designs {
        assert_relative_eq!(d.moduli.modulus_z3, 2.0);
        assert!(
            (2.0..=3.0).contains(&d.moduli.modulus_z1),
            "{}: modulus_z1 {}",
            d.candidate,
            d.moduli.modulus_z1
        );
        assert!(d.error_percent < 0.1);
        assert_eq!(d.configuration, Configuration::TwoAa);
        assert_eq!(d.member_function, MemberFunction::SunToCarrier);
    }
}

#[test]
fn reference_contains_exact_design() {
    // u = (26·45)/(12·13) = 7.5, i = |1 − 7.5| = 6.5
    // m1 = 2·(45 + 12)/(13 + 26) = 114/39
    let (_, sink, _) = reference();
    let design = sink
        .designs
        .iter()
        .find(|d| d.candidate == Candidate::new(13, 26, 12, 45))
        .unwrap();
    assert_relative_eq!(design.ratio, 6.5);
    assert_relative_eq!(design.error_percent, 0.0);
    assert_relative_eq!(design.moduli.modulus_z1, 114.0 / 39.0, epsilon = 1e-12);
    // η = (1 − 7.5·0.9)/(1 − 7.5)
    assert_relative_eq!(design.efficiency, (1.0 - 6.75) / (1.0 - 7.5), epsilon = 1e-12);
    assert_relative_eq!(design.pitch_diameters.d3, 90.0);
    assert_relative_eq!(design.pitch_diameters.d2b, 24.0);
}

#[test]
fn reference_text_report() {
    let synth = Synthesizer::new(presets::reference_2aa_sun_to_carrier()).unwrap();
    let mut report = TextReport::new(Vec::new());
    synth.run(&mut report, &CancelToken::new());
    let text = String::from_utf8(report.finish().unwrap()).unwrap();

    assert!(text.starts_with("Beginning search...\nZ1_max=28, Z2_max=26, Z3_max=62\n\n"));
    assert!(text.contains(
        "Ratio=6.5, Config=2AA, Member Function=1v, Error=0, Num. Planets = 3\n\
         Z1=13, Z2a=26, Z2b=12, Z3=45\n"
    ));
    assert!(text.contains(", D2b=24, D3=90\n"));
    assert!(text.contains(", Modulus_Z3=2, Efficiency=0.885\n"));
    assert!(text.ends_with("Search complete\n"));
}

// ---------------------------------------------------------------------------
// Fatal configuration errors
// ---------------------------------------------------------------------------

#[test]
fn bogus_configuration_fails_before_search() {
    let err = presets::reference_2aa_sun_to_carrier()
        .with_tags("1v", "bogus")
        .unwrap_err();
    assert!(matches!(err, ConfigError::UnknownConfiguration(ref tag) if tag == "bogus"));
}

#[test]
fn bogus_configuration_in_toml_fails_before_search() {
    let err = GearTrainSpec::from_toml_str(
        r#"
        ratio = 6.5
        member_function = "1v"
        configuration = "bogus"
    "#,
    )
    .unwrap_err();
    assert!(matches!(err, SynthError::Config(_)));
}

#[test]
fn bogus_member_function_fails_before_search() {
    let err = "2v".parse::<MemberFunction>().unwrap_err();
    assert!(matches!(err, ConfigError::UnknownMemberFunction(_)));
}

#[test]
fn invalid_spec_fails_fast() {
    let spec = presets::reference_2aa_sun_to_carrier().with_modulus_range(3.0, 2.0);
    let err = Synthesizer::new(spec).unwrap_err();
    assert!(matches!(
        err,
        SynthError::Spec(SpecError::ModulusBoundsUnordered { .. })
    ));
}
