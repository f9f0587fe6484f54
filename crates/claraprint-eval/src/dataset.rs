//! Labeled fingerprint collections.
//!
//! A [`Dataset`] groups recordings by work. Each recording carries one
//! fingerprint per `(duration, algorithm)` excerpt. Datasets are built from a
//! [`DatasetManifest`] pointing at annotation files, or loaded from JSON
//! written by an earlier build.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use claraprint_core::pipeline::{fingerprint, Annotation, FingerprintOptions};
use claraprint_core::{Algorithm, Fingerprint};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::DatasetError;

/// One fingerprint of one recording.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Excerpt {
    /// Length of the analysed audio excerpt in seconds.
    pub duration_secs: u32,
    /// Extraction algorithm that produced the annotation.
    pub algorithm: Algorithm,
    /// Encoded fingerprint.
    pub fingerprint: Fingerprint,
}

/// One performance of a work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recording {
    /// Opaque recording identifier.
    pub recording_id: String,
    /// Fingerprints of this recording.
    #[serde(default)]
    pub excerpts: Vec<Excerpt>,
}

impl Recording {
    /// Fingerprint for a given duration and algorithm, if present.
    pub fn fingerprint(&self, duration_secs: u32, algorithm: Algorithm) -> Option<&Fingerprint> {
        self.excerpts
            .iter()
            .find(|e| e.duration_secs == duration_secs && e.algorithm == algorithm)
            .map(|e| &e.fingerprint)
    }

    /// Fingerprints for every algorithm in `algorithms`, in that order.
    ///
    /// Returns `None` when any of them is missing.
    pub fn fingerprints_for(
        &self,
        duration_secs: u32,
        algorithms: &[Algorithm],
    ) -> Option<Vec<&Fingerprint>> {
        algorithms
            .iter()
            .map(|a| self.fingerprint(duration_secs, *a))
            .collect()
    }
}

/// A musical work and its recordings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Work {
    /// Opaque work identifier.
    pub work_id: String,
    /// Recordings of this work.
    #[serde(default)]
    pub recordings: Vec<Recording>,
}

/// A labeled collection of works.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    /// Works in a stable order.
    pub works: Vec<Work>,
}

impl Dataset {
    /// Parses a dataset from JSON. Identifiers are not checked; see [`Dataset::validate`].
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Reads and validates a dataset file.
    pub fn from_file(path: &Path) -> Result<Self, DatasetError> {
        let content = fs::read_to_string(path).map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let dataset = Self::from_json_str(&content).map_err(|source| DatasetError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        dataset.validate()?;
        Ok(dataset)
    }

    /// Writes the dataset as pretty-printed JSON.
    pub fn write(&self, path: &Path) -> Result<(), DatasetError> {
        let json = serde_json::to_string_pretty(self).map_err(|source| DatasetError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, json).map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Checks that work ids, recording ids and excerpt keys are unique.
    pub fn validate(&self) -> Result<(), DatasetError> {
        let mut works = HashSet::new();
        let mut recordings = HashSet::new();
        for work in &self.works {
            if !works.insert(work.work_id.as_str()) {
                return Err(DatasetError::DuplicateWork(work.work_id.clone()));
            }
            for recording in &work.recordings {
                if !recordings.insert(recording.recording_id.as_str()) {
                    return Err(DatasetError::DuplicateRecording(
                        recording.recording_id.clone(),
                    ));
                }
                let mut keys = HashSet::new();
                for excerpt in &recording.excerpts {
                    if !keys.insert((excerpt.duration_secs, excerpt.algorithm)) {
                        return Err(DatasetError::DuplicateExcerpt {
                            recording_id: recording.recording_id.clone(),
                            algorithm: excerpt.algorithm,
                            duration_secs: excerpt.duration_secs,
                        });
                    }
                }
            }
        }
        Ok(())
    }

    /// Total number of recordings across works.
    pub fn recording_count(&self) -> usize {
        self.works.iter().map(|w| w.recordings.len()).sum()
    }

    /// Looks up a work by identifier.
    pub fn work(&self, work_id: &str) -> Option<&Work> {
        self.works.iter().find(|w| w.work_id == work_id)
    }
}

/// Description of the annotation files a dataset is built from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatasetManifest {
    /// Encoding options applied to every annotation.
    #[serde(default)]
    pub options: FingerprintOptions,
    /// Works to build.
    pub works: Vec<ManifestWork>,
}

/// A work entry in a [`DatasetManifest`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ManifestWork {
    /// Work identifier.
    pub work_id: String,
    /// Recordings of this work.
    pub recordings: Vec<ManifestRecording>,
}

/// A recording entry in a [`DatasetManifest`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ManifestRecording {
    /// Recording identifier.
    pub recording_id: String,
    /// Annotation files of this recording.
    pub annotations: Vec<ManifestAnnotation>,
}

/// One annotation file in a [`DatasetManifest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ManifestAnnotation {
    /// Excerpt duration in seconds.
    pub duration_secs: u32,
    /// Algorithm that produced the file.
    pub algorithm: Algorithm,
    /// Path to an [`Annotation`] JSON file, relative to the manifest.
    pub path: PathBuf,
}

impl DatasetManifest {
    /// Reads a manifest file.
    pub fn from_file(path: &Path) -> Result<Self, DatasetError> {
        let content = fs::read_to_string(path).map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| DatasetError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Checks that the encoding options are in range.
    pub fn validate(&self) -> Result<(), DatasetError> {
        self.options.validate().map_err(DatasetError::Options)
    }
}

/// Builds a dataset by fingerprinting every annotation listed in `manifest`.
///
/// Relative annotation paths are resolved against `base_dir`. Out-of-range
/// options are rejected before any file is read. Any missing, unreadable or
/// mismatched annotation aborts the build.
pub fn build_dataset(manifest: &DatasetManifest, base_dir: &Path) -> Result<Dataset, DatasetError> {
    manifest.validate()?;
    let mut works = Vec::with_capacity(manifest.works.len());

    for manifest_work in &manifest.works {
        let mut recordings = Vec::with_capacity(manifest_work.recordings.len());
        for manifest_recording in &manifest_work.recordings {
            let mut excerpts = Vec::with_capacity(manifest_recording.annotations.len());
            for entry in &manifest_recording.annotations {
                let path = base_dir.join(&entry.path);
                let annotation = read_annotation(&path)?;
                let encoded = fingerprint(&annotation, entry.algorithm, &manifest.options)
                    .map_err(|source| DatasetError::Fingerprint {
                        path: path.clone(),
                        source,
                    })?;
                debug!(
                    recording = %manifest_recording.recording_id,
                    algorithm = %entry.algorithm,
                    symbols = encoded.symbols.len(),
                    "fingerprinted annotation"
                );
                excerpts.push(Excerpt {
                    duration_secs: entry.duration_secs,
                    algorithm: entry.algorithm,
                    fingerprint: encoded.fingerprint,
                });
            }
            recordings.push(Recording {
                recording_id: manifest_recording.recording_id.clone(),
                excerpts,
            });
        }
        works.push(Work {
            work_id: manifest_work.work_id.clone(),
            recordings,
        });
    }

    let dataset = Dataset { works };
    dataset.validate()?;
    info!(
        works = dataset.works.len(),
        recordings = dataset.recording_count(),
        "built dataset"
    );
    Ok(dataset)
}

/// Reads a manifest and builds its dataset, resolving paths next to it.
pub fn build_dataset_from_file(manifest_path: &Path) -> Result<Dataset, DatasetError> {
    let manifest = DatasetManifest::from_file(manifest_path)?;
    let base_dir = manifest_path.parent().unwrap_or_else(|| Path::new("."));
    build_dataset(&manifest, base_dir)
}

fn read_annotation(path: &Path) -> Result<Annotation, DatasetError> {
    let content = fs::read_to_string(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| DatasetError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, content: &str) {
        fs::write(dir.join(name), content).unwrap();
    }

    fn chord_file(labels: &[&str]) -> String {
        let events: Vec<String> = labels
            .iter()
            .enumerate()
            .map(|(i, l)| format!(r#"{{"time": {}.0, "label": "{}"}}"#, i, l))
            .collect();
        format!(r#"{{"kind": "chords", "events": [{}]}}"#, events.join(","))
    }

    #[test]
    fn test_build_dataset_from_manifest() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "r1.json", &chord_file(&["C", "G", "C"]));
        write(dir.path(), "r2.json", &chord_file(&["D", "A", "D"]));
        write(
            dir.path(),
            "manifest.json",
            r#"{
                "works": [{
                    "work_id": "w1",
                    "recordings": [
                        {"recording_id": "r1", "annotations": [
                            {"duration_secs": 120, "algorithm": "chords_chordino", "path": "r1.json"}
                        ]},
                        {"recording_id": "r2", "annotations": [
                            {"duration_secs": 120, "algorithm": "chords_chordino", "path": "r2.json"}
                        ]}
                    ]
                }]
            }"#,
        );

        let dataset = build_dataset_from_file(&dir.path().join("manifest.json")).unwrap();
        assert_eq!(dataset.recording_count(), 2);

        let work = dataset.work("w1").unwrap();
        let fp1 = work.recordings[0].fingerprint(120, Algorithm::ChordsChordino).unwrap();
        let fp2 = work.recordings[1].fingerprint(120, Algorithm::ChordsChordino).unwrap();
        // transposed progressions share a fingerprint
        assert_eq!(fp1, fp2);
        assert_eq!(fp1.as_str(), "fm");
        assert!(work.recordings[0].fingerprint(30, Algorithm::ChordsChordino).is_none());
    }

    #[test]
    fn test_missing_annotation_aborts_build() {
        let dir = TempDir::new().unwrap();
        let manifest: DatasetManifest = serde_json::from_str(
            r#"{"works": [{"work_id": "w", "recordings": [{"recording_id": "r", "annotations": [
                {"duration_secs": 30, "algorithm": "melody_melodia", "path": "missing.json"}
            ]}]}]}"#,
        )
        .unwrap();
        let err = build_dataset(&manifest, dir.path()).unwrap_err();
        assert!(matches!(err, DatasetError::Io { .. }));
    }

    #[test]
    fn test_mismatched_annotation_aborts_build() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "r.json", &chord_file(&["C", "G"]));
        let manifest: DatasetManifest = serde_json::from_str(
            r#"{"works": [{"work_id": "w", "recordings": [{"recording_id": "r", "annotations": [
                {"duration_secs": 30, "algorithm": "melody_melodia", "path": "r.json"}
            ]}]}]}"#,
        )
        .unwrap();
        let err = build_dataset(&manifest, dir.path()).unwrap_err();
        assert!(matches!(err, DatasetError::Fingerprint { .. }));
    }

    #[test]
    fn test_out_of_range_options_abort_build() {
        let dir = TempDir::new().unwrap();
        for options in [
            r#"{"chords": {"duration_threshold_ms": -5.0}}"#,
            r#"{"min_count": 0}"#,
        ] {
            // no annotation is listed, so only the options can fail
            let manifest: DatasetManifest =
                serde_json::from_str(&format!(r#"{{"options": {}, "works": []}}"#, options))
                    .unwrap();
            let err = build_dataset(&manifest, dir.path()).unwrap_err();
            assert!(matches!(err, DatasetError::Options(_)), "{err}");
        }

        let mut manifest = DatasetManifest::default();
        manifest.options.chords.duration_threshold_ms = f64::NAN;
        assert!(matches!(manifest.validate(), Err(DatasetError::Options(_))));
    }

    #[test]
    fn test_duplicate_ids_are_rejected() {
        let json = r#"{"works": [
            {"work_id": "w1", "recordings": [{"recording_id": "r1"}]},
            {"work_id": "w2", "recordings": [{"recording_id": "r1"}]}
        ]}"#;
        let dataset = Dataset::from_json_str(json).unwrap();
        assert!(matches!(
            dataset.validate(),
            Err(DatasetError::DuplicateRecording(id)) if id == "r1"
        ));
    }

    #[test]
    fn test_dataset_file_round_trip() {
        let dir = TempDir::new().unwrap();
        let dataset = Dataset {
            works: vec![Work {
                work_id: "w".into(),
                recordings: vec![Recording {
                    recording_id: "r".into(),
                    excerpts: vec![Excerpt {
                        duration_secs: 30,
                        algorithm: Algorithm::MelodyPiptrack,
                        fingerprint: Fingerprint::new("bwx$"),
                    }],
                }],
            }],
        };
        let path = dir.path().join("dataset.json");
        dataset.write(&path).unwrap();
        assert_eq!(Dataset::from_file(&path).unwrap(), dataset);
    }

    #[test]
    fn test_fingerprints_for_requires_every_algorithm() {
        let recording = Recording {
            recording_id: "r".into(),
            excerpts: vec![Excerpt {
                duration_secs: 30,
                algorithm: Algorithm::ChordsCrema,
                fingerprint: Fingerprint::new("abc"),
            }],
        };
        assert_eq!(
            recording.fingerprints_for(30, &[Algorithm::ChordsCrema]).unwrap().len(),
            1
        );
        assert!(recording
            .fingerprints_for(30, &[Algorithm::ChordsCrema, Algorithm::MelodyMelodia])
            .is_none());
    }
}
