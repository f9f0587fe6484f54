//! Test fixture utilities for annotation trees and synthetic datasets.

use std::fs;
use std::path::{Path, PathBuf};

use claraprint_core::{Algorithm, Fingerprint};
use claraprint_eval::dataset::{Excerpt, Recording, Work};
use claraprint_eval::Dataset;
use serde_json::json;
use tempfile::TempDir;

/// A temporary directory holding annotation files and a manifest.
pub struct ManifestFixture {
    pub root: TempDir,
    works: Vec<serde_json::Value>,
}

impl ManifestFixture {
    /// Create a new empty fixture.
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp dir");
        Self {
            root,
            works: Vec::new(),
        }
    }

    /// Get the fixture root path.
    pub fn path(&self) -> &Path {
        self.root.path()
    }

    /// Write a chord annotation file from `(time, label)` pairs.
    pub fn add_chords(&self, name: &str, events: &[(f64, &str)]) -> PathBuf {
        let events: Vec<_> = events
            .iter()
            .map(|(time, label)| json!({"time": time, "label": label}))
            .collect();
        self.write_annotation(name, json!({"kind": "chords", "events": events}))
    }

    /// Write a melody annotation file from frame frequencies.
    pub fn add_melody(&self, name: &str, frequencies: &[f64]) -> PathBuf {
        self.write_annotation(name, json!({"kind": "melody", "frequencies": frequencies}))
    }

    /// Register a work whose recordings each list `(duration, algorithm, file)` annotations.
    pub fn add_work(&mut self, work_id: &str, recordings: &[(&str, &[(u32, Algorithm, &str)])]) {
        let recordings: Vec<_> = recordings
            .iter()
            .map(|(recording_id, annotations)| {
                let annotations: Vec<_> = annotations
                    .iter()
                    .map(|(duration, algorithm, file)| {
                        json!({
                            "duration_secs": duration,
                            "algorithm": algorithm.as_str(),
                            "path": file,
                        })
                    })
                    .collect();
                json!({"recording_id": recording_id, "annotations": annotations})
            })
            .collect();
        self.works
            .push(json!({"work_id": work_id, "recordings": recordings}));
    }

    /// Write the manifest with the given `options` object and return its path.
    pub fn write_manifest(&self, options: serde_json::Value) -> PathBuf {
        let path = self.path().join("manifest.json");
        let manifest = json!({"options": options, "works": self.works});
        fs::write(
            &path,
            serde_json::to_string_pretty(&manifest).expect("Failed to serialize manifest"),
        )
        .expect("Failed to write manifest");
        path
    }

    fn write_annotation(&self, name: &str, value: serde_json::Value) -> PathBuf {
        let path = self.path().join(name);
        fs::write(&path, value.to_string()).expect("Failed to write annotation");
        path
    }
}

impl Default for ManifestFixture {
    fn default() -> Self {
        Self::new()
    }
}

const LETTERS: &[u8] = b"abcdefghijklmn";

/// A characteristic chord-alphabet fingerprint for work number `work`.
///
/// Different works share few words; recordings derived from the same base
/// share most of theirs.
pub fn base_fingerprint(work: usize, len: usize) -> String {
    (0..len)
        .map(|i| {
            let step = (work * 7 + i * (work % 5 + 1) + i * i) % LETTERS.len();
            LETTERS[step] as char
        })
        .collect()
}

/// `base` with the letter at every `period`-th position shifted.
pub fn perturb(base: &str, period: usize, offset: usize) -> String {
    base.bytes()
        .enumerate()
        .map(|(i, b)| {
            if period > 0 && i % period == offset % period {
                let pos = LETTERS.iter().position(|&l| l == b).unwrap_or(0);
                LETTERS[(pos + 1) % LETTERS.len()] as char
            } else {
                b as char
            }
        })
        .collect()
}

/// A dataset of `works` works with `recordings` cover versions each.
///
/// Every recording carries a `duration_secs` fingerprint for each algorithm.
pub fn synthetic_dataset(
    works: usize,
    recordings: usize,
    duration_secs: u32,
    algorithms: &[Algorithm],
) -> Dataset {
    let works = (0..works)
        .map(|w| {
            let base = base_fingerprint(w, 40);
            Work {
                work_id: format!("work-{:03}", w),
                recordings: (0..recordings)
                    .map(|r| Recording {
                        recording_id: format!("work-{:03}/rec-{}", w, r),
                        excerpts: algorithms
                            .iter()
                            .enumerate()
                            .map(|(a, algorithm)| Excerpt {
                                duration_secs,
                                algorithm: *algorithm,
                                fingerprint: Fingerprint::new(perturb(&base, 9, r + a)),
                            })
                            .collect(),
                    })
                    .collect(),
            }
        })
        .collect();
    Dataset { works }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synthetic_dataset_shape() {
        let dataset = synthetic_dataset(4, 3, 30, &[Algorithm::ChordsCrema]);
        assert_eq!(dataset.works.len(), 4);
        assert_eq!(dataset.recording_count(), 12);
        assert!(dataset.validate().is_ok());
    }

    #[test]
    fn test_perturb_changes_one_letter_per_period() {
        let base = "aaaaaaaaa";
        assert_eq!(perturb(base, 3, 1), "abaabaaba");
        assert_eq!(perturb(base, 0, 0), base);
    }
}
