//! End-to-end pipeline tests: annotation files -> manifest -> dataset.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p claraprint-tests --test e2e_pipeline
//! ```

use pretty_assertions::assert_eq;

use claraprint_core::alphabet::{CHORD_ALPHABET, OVERLAP_ALPHABET};
use claraprint_core::{
    encode, fingerprint, normalize_chords, shingle, Algorithm, AlphabetKind, Annotation,
    ChordCleaning, ChordEvent, FingerprintOptions, WordLengths,
};
use claraprint_eval::{build_dataset_from_file, Dataset, DatasetError};
use claraprint_tests::fixtures::ManifestFixture;
use serde_json::json;

const C4: f64 = 261.63;
const G4: f64 = 392.0;

fn frames(frequency: f64, count: usize) -> Vec<f64> {
    vec![frequency; count]
}

// ============================================================================
// Chord scenario
// ============================================================================

#[test]
fn chord_scenario_normalizes_encodes_and_shingles() {
    let events = vec![
        ChordEvent::new(0.0, "C"),
        ChordEvent::new(0.2, "N"),
        ChordEvent::new(0.5, "G"),
        ChordEvent::new(0.5, "N"),
        ChordEvent::new(0.9, "C"),
    ];

    let symbols = normalize_chords(&events, &ChordCleaning::default());
    assert_eq!(symbols.as_slice(), ["C", "G", "C"]);

    // C -> G is up 8, rewritten as down 6; G -> C is down 8, rewritten as up 6
    let fp = encode(&symbols, &CHORD_ALPHABET).unwrap();
    assert_eq!(fp.as_str(), "fm");

    let lengths = WordLengths::new(2, 3).unwrap();
    let words = shingle(fp.as_str(), lengths);
    assert_eq!(words, ["fm"]);
    assert!(words.iter().all(|w| w.len() == 2));
}

#[test]
fn overlap_alphabet_spells_three_letters_per_transition() {
    let symbols = ["C", "G", "C"].into_iter().collect();
    let fp = encode(&symbols, &OVERLAP_ALPHABET).unwrap();
    assert_eq!(fp.as_str(), "fghbuv");
}

#[test]
fn melody_annotation_uses_algorithm_run_length() {
    let mut frequencies = frames(C4, 10);
    frequencies.extend(frames(G4, 10));
    frequencies.extend(frames(C4, 10));
    // too short for melodia, dropped
    frequencies.extend(frames(440.0, 4));
    let annotation = Annotation::Melody { frequencies };

    let melodia = fingerprint(
        &annotation,
        Algorithm::MelodyMelodia,
        &FingerprintOptions::default(),
    )
    .unwrap();
    assert_eq!(melodia.symbols.as_slice(), ["C", "G", "C"]);
    assert_eq!(melodia.fingerprint.as_str(), "t$");

    let chord_letters = fingerprint(
        &annotation,
        Algorithm::MelodyMelodia,
        &FingerprintOptions {
            alphabet: Some(AlphabetKind::Chord),
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(chord_letters.fingerprint.as_str(), "fm");
}

#[test]
fn repeated_calls_are_identical() {
    let annotation = Annotation::Chords {
        events: vec![
            ChordEvent::new(0.0, "Am7"),
            ChordEvent::new(1.0, "Dm"),
            ChordEvent::new(2.0, "G7/B"),
            ChordEvent::new(3.0, "Cmaj7"),
            ChordEvent::new(4.0, "Fmaj7"),
        ],
    };
    let first = fingerprint(&annotation, Algorithm::ChordsCrema, &FingerprintOptions::default())
        .unwrap();
    for _ in 0..5 {
        let again =
            fingerprint(&annotation, Algorithm::ChordsCrema, &FingerprintOptions::default())
                .unwrap();
        assert_eq!(again, first);
    }
}

// ============================================================================
// Manifest -> dataset
// ============================================================================

#[test]
fn manifest_builds_multi_algorithm_dataset() {
    let mut fixture = ManifestFixture::new();
    fixture.add_chords(
        "w1_a_chords.json",
        &[(0.0, "C"), (1.0, "G"), (2.0, "C"), (3.0, "F")],
    );
    fixture.add_chords("w1_b_chords.json", &[(0.0, "C"), (1.0, "G"), (2.0, "C")]);
    let mut melody = frames(C4, 5);
    melody.extend(frames(G4, 5));
    fixture.add_melody("w1_a_melody.json", &melody);

    fixture.add_work(
        "w1",
        &[
            (
                "w1/a",
                &[
                    (30, Algorithm::ChordsChordino, "w1_a_chords.json"),
                    (30, Algorithm::MelodyPiptrack, "w1_a_melody.json"),
                ],
            ),
            ("w1/b", &[(30, Algorithm::ChordsChordino, "w1_b_chords.json")]),
        ],
    );
    let manifest = fixture.write_manifest(json!({}));

    let dataset = build_dataset_from_file(&manifest).unwrap();
    assert_eq!(dataset.works.len(), 1);
    assert_eq!(dataset.recording_count(), 2);

    let a = &dataset.works[0].recordings[0];
    assert_eq!(
        a.fingerprint(30, Algorithm::ChordsChordino).unwrap().as_str(),
        "fmm"
    );
    assert_eq!(
        a.fingerprint(30, Algorithm::MelodyPiptrack).unwrap().as_str(),
        "t"
    );
    assert!(a
        .fingerprints_for(30, &[Algorithm::ChordsChordino, Algorithm::MelodyPiptrack])
        .is_some());

    let b = &dataset.works[0].recordings[1];
    assert!(b
        .fingerprints_for(30, &[Algorithm::ChordsChordino, Algorithm::MelodyPiptrack])
        .is_none());

    // survives a write and reload
    let out = fixture.path().join("dataset.json");
    dataset.write(&out).unwrap();
    assert_eq!(Dataset::from_file(&out).unwrap(), dataset);
}

#[test]
fn manifest_options_reach_the_chord_cleaner() {
    let mut fixture = ManifestFixture::new();
    fixture.add_chords("slash.json", &[(0.0, "C"), (1.0, "G/B"), (2.0, "C")]);
    fixture.add_work(
        "w",
        &[("r", &[(120, Algorithm::ChordsCrema, "slash.json")])],
    );

    let plain = build_dataset_from_file(&fixture.write_manifest(json!({}))).unwrap();
    let slash = build_dataset_from_file(
        &fixture.write_manifest(json!({"chords": {"right_slash": true}})),
    )
    .unwrap();

    let fp = |d: &Dataset| {
        d.works[0].recordings[0]
            .fingerprint(120, Algorithm::ChordsCrema)
            .unwrap()
            .as_str()
            .to_string()
    };
    assert_eq!(fp(&plain), "fm");
    // C, B, C: down 2 then up 2
    assert_eq!(fp(&slash), "bi");
}

#[test]
fn mismatched_annotation_fails_the_build() {
    let mut fixture = ManifestFixture::new();
    fixture.add_melody("melody.json", &frames(C4, 20));
    fixture.add_work(
        "w",
        &[("r", &[(30, Algorithm::ChordsCrema, "melody.json")])],
    );

    let err = build_dataset_from_file(&fixture.write_manifest(json!({}))).unwrap_err();
    assert!(matches!(err, DatasetError::Fingerprint { .. }), "{err}");
}

#[test]
fn missing_annotation_file_fails_the_build() {
    let mut fixture = ManifestFixture::new();
    fixture.add_work(
        "w",
        &[("r", &[(30, Algorithm::ChordsCrema, "absent.json")])],
    );

    let err = build_dataset_from_file(&fixture.write_manifest(json!({}))).unwrap_err();
    assert!(matches!(err, DatasetError::Io { .. }), "{err}");
}

#[test]
fn out_of_range_manifest_options_fail_the_build() {
    let mut fixture = ManifestFixture::new();
    fixture.add_chords("c.json", &[(0.0, "C"), (1.0, "G")]);
    fixture.add_melody("m.json", &frames(C4, 20));
    fixture.add_work(
        "w",
        &[(
            "r",
            &[
                (30, Algorithm::ChordsCrema, "c.json"),
                (30, Algorithm::MelodyMelodia, "m.json"),
            ],
        )],
    );

    let negative = build_dataset_from_file(
        &fixture.write_manifest(json!({"chords": {"duration_threshold_ms": -100.0}})),
    )
    .unwrap_err();
    assert!(matches!(negative, DatasetError::Options(_)), "{negative}");
    assert!(negative.to_string().contains("duration_threshold_ms"));

    let zero = build_dataset_from_file(&fixture.write_manifest(json!({"min_count": 0})))
        .unwrap_err();
    assert!(matches!(zero, DatasetError::Options(_)), "{zero}");

    // the same tree builds with in-range options
    assert!(build_dataset_from_file(&fixture.write_manifest(json!({"min_count": 1}))).is_ok());
}
