//! Symbol normalization.
//!
//! Raw extractor output (timed chord labels or frame-wise pitch estimates) is
//! reduced to a [`SymbolSequence`]: pitch classes with no two consecutive
//! entries equal.

use serde::{Deserialize, Serialize};

use crate::notes::nearest_note;

/// Chord labels that mean "no chord" (`N` from chordino, `X` from crema).
pub const NO_CHORD_LABELS: [&str; 2] = ["N", "X"];

/// Flat roots and their sharp-spelled equivalents on the transition scale.
const ENHARMONICS: [(&str, &str); 7] = [
    ("Ab", "G#"),
    ("Bb", "A#"),
    ("Cb", "B"),
    ("Db", "C#"),
    ("Eb", "D#"),
    ("Fb", "E"),
    ("Gb", "F#"),
];

/// One timestamped chord label emitted by a chord extractor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChordEvent {
    /// Onset time in seconds.
    pub time: f64,
    /// Chord label such as "Ebmaj7", "G7/B" or "N". JAMS data calls it `value`.
    #[serde(alias = "value")]
    pub label: String,
}

impl ChordEvent {
    /// Creates a chord event.
    pub fn new(time: f64, label: impl Into<String>) -> Self {
        Self {
            time,
            label: label.into(),
        }
    }
}

/// Options for [`normalize_chords`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChordCleaning {
    /// Chords lasting less than this many milliseconds are dropped.
    pub duration_threshold_ms: f64,
    /// Use the bass note of a slash chord ("G7/B" becomes "B").
    pub right_slash: bool,
    /// Respell flat roots as sharps ("Db" becomes "C#").
    pub resolve_enharmonics: bool,
}

impl Default for ChordCleaning {
    fn default() -> Self {
        Self {
            duration_threshold_ms: 100.0,
            right_slash: false,
            resolve_enharmonics: true,
        }
    }
}

/// An ordered sequence of canonical symbols.
///
/// Consecutive duplicates are collapsed on construction, so two neighbouring
/// entries are never equal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SymbolSequence(Vec<String>);

impl SymbolSequence {
    /// Returns the symbols as a slice.
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Number of symbols.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when there are no symbols.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the symbols.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Consumes the sequence.
    pub fn into_vec(self) -> Vec<String> {
        self.0
    }

    fn push_collapsed(&mut self, symbol: String) {
        if self.0.last() != Some(&symbol) {
            self.0.push(symbol);
        }
    }
}

impl<S: Into<String>> FromIterator<S> for SymbolSequence {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut seq = SymbolSequence::default();
        for symbol in iter {
            seq.push_collapsed(symbol.into());
        }
        seq
    }
}

/// Normalizes a chord annotation.
///
/// Steps, in order:
/// 1. drop "no chord" events ([`NO_CHORD_LABELS`]);
/// 2. drop an event whose gap to the next remaining event is shorter than
///    `duration_threshold_ms` (the last event is always kept);
/// 3. optionally keep only the part after a slash;
/// 4. reduce the label to its root letter plus an optional `#`/`b`;
/// 5. optionally respell flat roots as sharps;
/// 6. collapse consecutive duplicates.
///
/// # Examples
/// ```
/// use claraprint_core::normalize::{normalize_chords, ChordCleaning, ChordEvent};
///
/// let events = vec![
///     ChordEvent::new(0.0, "Cmaj7"),
///     ChordEvent::new(1.0, "Ebm"),
///     ChordEvent::new(2.0, "N"),
///     ChordEvent::new(2.5, "D#7"),
/// ];
/// let symbols = normalize_chords(&events, &ChordCleaning::default());
/// assert_eq!(symbols.as_slice(), ["C", "D#"]);
/// ```
pub fn normalize_chords(events: &[ChordEvent], options: &ChordCleaning) -> SymbolSequence {
    let voiced: Vec<&ChordEvent> = events
        .iter()
        .filter(|e| !NO_CHORD_LABELS.contains(&e.label.as_str()))
        .collect();

    let mut symbols = SymbolSequence::default();
    for (i, event) in voiced.iter().enumerate() {
        if let Some(next) = voiced.get(i + 1) {
            let gap_ms = next.time * 1000.0 - event.time * 1000.0;
            if gap_ms < options.duration_threshold_ms {
                continue;
            }
        }

        if let Some(root) = chord_root(&event.label, options) {
            symbols.push_collapsed(root);
        }
    }
    symbols
}

/// Reduces a chord label to its root, e.g. "Ebmaj7" to "D#".
fn chord_root(label: &str, options: &ChordCleaning) -> Option<String> {
    let label = if options.right_slash {
        label.rsplit('/').next().unwrap_or(label)
    } else {
        label
    };

    let mut chars = label.chars();
    let mut root = String::from(chars.next()?);
    if let Some(accidental @ ('#' | 'b')) = chars.next() {
        root.push(accidental);
    }

    if options.resolve_enharmonics {
        if let Some((_, sharp)) = ENHARMONICS.iter().find(|(flat, _)| *flat == root) {
            root = (*sharp).to_string();
        }
    }
    Some(root)
}

/// Normalizes a melody annotation.
///
/// Non-positive estimates (unvoiced frames) are dropped. Every remaining
/// frequency is snapped to the nearest table note and reduced to its pitch
/// class. A pitch class is emitted once it has been seen `min_count` times in
/// a row, and never twice in a row.
///
/// # Examples
/// ```
/// use claraprint_core::normalize::normalize_melody;
///
/// let freqs = [440.0, 441.0, -1.0, 439.0, 262.0, 523.0, 0.0, 261.0];
/// let symbols = normalize_melody(&freqs, 3);
/// assert_eq!(symbols.as_slice(), ["A", "C"]);
/// ```
pub fn normalize_melody(frequencies: &[f64], min_count: usize) -> SymbolSequence {
    let mut symbols = SymbolSequence::default();
    let mut run = 0usize;
    let mut last: Option<&'static str> = None;

    for &freq in frequencies.iter().filter(|f| **f > 0.0) {
        let pitch = nearest_note(freq).pitch_class;

        if last.is_none() || last == Some(pitch) {
            run += 1;
        } else {
            run = 1;
        }

        if run >= min_count {
            symbols.push_collapsed(pitch.to_string());
        }
        last = Some(pitch);
    }
    symbols
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn events(raw: &[(f64, &str)]) -> Vec<ChordEvent> {
        raw.iter().map(|(t, l)| ChordEvent::new(*t, *l)).collect()
    }

    #[test]
    fn test_sentinels_do_not_shorten_neighbours() {
        let evs = events(&[(0.0, "C"), (0.2, "N"), (0.5, "G"), (0.5, "N"), (0.9, "C")]);
        let seq = normalize_chords(&evs, &ChordCleaning::default());
        assert_eq!(seq.as_slice(), ["C", "G", "C"]);
    }

    #[test]
    fn test_short_chords_are_dropped() {
        let evs = events(&[(0.0, "C"), (0.05, "F"), (1.0, "G"), (1.09, "A"), (2.0, "E")]);
        let seq = normalize_chords(&evs, &ChordCleaning::default());
        assert_eq!(seq.as_slice(), ["F", "A", "E"]);
    }

    #[test]
    fn test_threshold_is_configurable() {
        let evs = events(&[(0.0, "C"), (0.05, "F"), (1.0, "G")]);
        let options = ChordCleaning {
            duration_threshold_ms: 10.0,
            ..ChordCleaning::default()
        };
        let seq = normalize_chords(&evs, &options);
        assert_eq!(seq.as_slice(), ["C", "F", "G"]);
    }

    #[test]
    fn test_last_event_is_always_kept() {
        let evs = events(&[(0.0, "C"), (5.0, "Am")]);
        let seq = normalize_chords(&evs, &ChordCleaning::default());
        assert_eq!(seq.as_slice(), ["C", "A"]);
    }

    #[test]
    fn test_quality_and_extensions_are_discarded() {
        let evs = events(&[(0.0, "Adim"), (1.0, "C#m7"), (2.0, "Bbmaj7"), (3.0, "Fsus4")]);
        let seq = normalize_chords(&evs, &ChordCleaning::default());
        assert_eq!(seq.as_slice(), ["A", "C#", "A#", "F"]);
    }

    #[test]
    fn test_enharmonics_can_be_kept() {
        let evs = events(&[(0.0, "Db"), (1.0, "Cb")]);
        let options = ChordCleaning {
            resolve_enharmonics: false,
            ..ChordCleaning::default()
        };
        assert_eq!(normalize_chords(&evs, &options).as_slice(), ["Db", "Cb"]);
        assert_eq!(
            normalize_chords(&evs, &ChordCleaning::default()).as_slice(),
            ["C#", "B"]
        );
    }

    #[test]
    fn test_slash_chords() {
        let evs = events(&[(0.0, "G7/B"), (1.0, "C")]);
        assert_eq!(
            normalize_chords(&evs, &ChordCleaning::default()).as_slice(),
            ["G", "C"]
        );
        let options = ChordCleaning {
            right_slash: true,
            ..ChordCleaning::default()
        };
        assert_eq!(normalize_chords(&evs, &options).as_slice(), ["B", "C"]);
    }

    #[test]
    fn test_repeated_roots_collapse() {
        let evs = events(&[(0.0, "C"), (1.0, "Cm"), (2.0, "C7"), (3.0, "G")]);
        let seq = normalize_chords(&evs, &ChordCleaning::default());
        assert_eq!(seq.as_slice(), ["C", "G"]);
    }

    #[test]
    fn test_empty_labels_are_skipped() {
        let evs = events(&[(0.0, ""), (1.0, "E")]);
        let seq = normalize_chords(&evs, &ChordCleaning::default());
        assert_eq!(seq.as_slice(), ["E"]);
    }

    #[test]
    fn test_melody_run_length_filter() {
        let freqs = [
            440.0, 440.0, 440.0, // A x3
            261.63, 261.63, // C x2 (too short)
            440.0, 440.0, 440.0, // A again, already last emitted
            293.66, 293.66, 293.66, 293.66, // D x4
        ];
        let seq = normalize_melody(&freqs, 3);
        assert_eq!(seq.as_slice(), ["A", "D"]);
    }

    #[test]
    fn test_melody_octaves_share_pitch_class() {
        let freqs = [110.0, 220.0, 440.0, 880.0];
        let seq = normalize_melody(&freqs, 4);
        assert_eq!(seq.as_slice(), ["A"]);
    }

    #[test]
    fn test_melody_drops_unvoiced_frames() {
        let freqs = [-440.0, 0.0, 0.0, 329.63];
        let seq = normalize_melody(&freqs, 1);
        assert_eq!(seq.as_slice(), ["E"]);
    }

    #[test]
    fn test_symbol_sequence_collapses_on_collect() {
        let seq: SymbolSequence = ["C", "C", "D", "D", "C"].into_iter().collect();
        assert_eq!(seq.as_slice(), ["C", "D", "C"]);
        assert_eq!(seq.len(), 3);
    }

    #[test]
    fn test_chord_event_accepts_jams_value_key() {
        let ev: ChordEvent = serde_json::from_str(r#"{"time": 0.5, "value": "A:min"}"#).unwrap();
        assert_eq!(ev, ChordEvent::new(0.5, "A:min"));
    }
}
