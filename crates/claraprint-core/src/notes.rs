//! Equal-tempered note frequency table.
//!
//! Pitches are spelled with sharps only (D# rather than Eb); the table runs
//! from C0 to B8 at twelve notes per octave.

/// One entry of the note table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Note {
    /// Pitch class without octave, e.g. "C#".
    pub pitch_class: &'static str,
    /// Octave number.
    pub octave: u8,
    /// Frequency in Hz.
    pub frequency: f64,
}

impl Note {
    const fn new(pitch_class: &'static str, octave: u8, frequency: f64) -> Self {
        Self {
            pitch_class,
            octave,
            frequency,
        }
    }

    /// Note name with octave, e.g. "C#4".
    pub fn name(&self) -> String {
        format!("{}{}", self.pitch_class, self.octave)
    }
}

/// Number of entries in [`NOTE_TABLE`].
pub const NOTE_COUNT: usize = 108;

/// Note frequencies in ascending order, rounded to 0.01 Hz.
pub static NOTE_TABLE: [Note; NOTE_COUNT] = [
    Note::new("C", 0, 16.35),
    Note::new("C#", 0, 17.32),
    Note::new("D", 0, 18.35),
    Note::new("D#", 0, 19.45),
    Note::new("E", 0, 20.60),
    Note::new("F", 0, 21.83),
    Note::new("F#", 0, 23.12),
    Note::new("G", 0, 24.50),
    Note::new("G#", 0, 25.96),
    Note::new("A", 0, 27.50),
    Note::new("A#", 0, 29.14),
    Note::new("B", 0, 30.87),
    Note::new("C", 1, 32.70),
    Note::new("C#", 1, 34.65),
    Note::new("D", 1, 36.71),
    Note::new("D#", 1, 38.89),
    Note::new("E", 1, 41.20),
    Note::new("F", 1, 43.65),
    Note::new("F#", 1, 46.25),
    Note::new("G", 1, 49.00),
    Note::new("G#", 1, 51.91),
    Note::new("A", 1, 55.00),
    Note::new("A#", 1, 58.27),
    Note::new("B", 1, 61.74),
    Note::new("C", 2, 65.41),
    Note::new("C#", 2, 69.30),
    Note::new("D", 2, 73.42),
    Note::new("D#", 2, 77.78),
    Note::new("E", 2, 82.41),
    Note::new("F", 2, 87.31),
    Note::new("F#", 2, 92.50),
    Note::new("G", 2, 98.00),
    Note::new("G#", 2, 103.83),
    Note::new("A", 2, 110.00),
    Note::new("A#", 2, 116.54),
    Note::new("B", 2, 123.47),
    Note::new("C", 3, 130.81),
    Note::new("C#", 3, 138.59),
    Note::new("D", 3, 146.83),
    Note::new("D#", 3, 155.56),
    Note::new("E", 3, 164.81),
    Note::new("F", 3, 174.61),
    Note::new("F#", 3, 185.00),
    Note::new("G", 3, 196.00),
    Note::new("G#", 3, 207.65),
    Note::new("A", 3, 220.00),
    Note::new("A#", 3, 233.08),
    Note::new("B", 3, 246.94),
    Note::new("C", 4, 261.63),
    Note::new("C#", 4, 277.18),
    Note::new("D", 4, 293.66),
    Note::new("D#", 4, 311.13),
    Note::new("E", 4, 329.63),
    Note::new("F", 4, 349.23),
    Note::new("F#", 4, 369.99),
    Note::new("G", 4, 392.00),
    Note::new("G#", 4, 415.30),
    Note::new("A", 4, 440.00),
    Note::new("A#", 4, 466.16),
    Note::new("B", 4, 493.88),
    Note::new("C", 5, 523.25),
    Note::new("C#", 5, 554.37),
    Note::new("D", 5, 587.33),
    Note::new("D#", 5, 622.25),
    Note::new("E", 5, 659.25),
    Note::new("F", 5, 698.46),
    Note::new("F#", 5, 739.99),
    Note::new("G", 5, 783.99),
    Note::new("G#", 5, 830.61),
    Note::new("A", 5, 880.00),
    Note::new("A#", 5, 932.33),
    Note::new("B", 5, 987.77),
    Note::new("C", 6, 1046.50),
    Note::new("C#", 6, 1108.73),
    Note::new("D", 6, 1174.66),
    Note::new("D#", 6, 1244.51),
    Note::new("E", 6, 1318.51),
    Note::new("F", 6, 1396.91),
    Note::new("F#", 6, 1479.98),
    Note::new("G", 6, 1567.98),
    Note::new("G#", 6, 1661.22),
    Note::new("A", 6, 1760.00),
    Note::new("A#", 6, 1864.66),
    Note::new("B", 6, 1975.53),
    Note::new("C", 7, 2093.00),
    Note::new("C#", 7, 2217.46),
    Note::new("D", 7, 2349.32),
    Note::new("D#", 7, 2489.02),
    Note::new("E", 7, 2637.02),
    Note::new("F", 7, 2793.83),
    Note::new("F#", 7, 2959.96),
    Note::new("G", 7, 3135.96),
    Note::new("G#", 7, 3322.44),
    Note::new("A", 7, 3520.00),
    Note::new("A#", 7, 3729.31),
    Note::new("B", 7, 3951.07),
    Note::new("C", 8, 4186.01),
    Note::new("C#", 8, 4434.92),
    Note::new("D", 8, 4698.63),
    Note::new("D#", 8, 4978.03),
    Note::new("E", 8, 5274.04),
    Note::new("F", 8, 5587.65),
    Note::new("F#", 8, 5919.91),
    Note::new("G", 8, 6271.93),
    Note::new("G#", 8, 6644.88),
    Note::new("A", 8, 7040.00),
    Note::new("A#", 8, 7458.62),
    Note::new("B", 8, 7902.13),
];

/// Returns the table entry closest to `frequency`.
///
/// The table is scanned in ascending order. An exact tie between two
/// neighbouring entries resolves to the lower one. Frequencies below C0 map
/// to C0 and frequencies above B8 map to B8.
///
/// # Examples
/// ```
/// use claraprint_core::notes::nearest_note;
///
/// assert_eq!(nearest_note(440.0).name(), "A4");
/// assert_eq!(nearest_note(445.0).name(), "A4");
/// assert_eq!(nearest_note(460.0).name(), "A#4");
/// ```
pub fn nearest_note(frequency: f64) -> &'static Note {
    let mut previous: Option<&'static Note> = None;

    for note in NOTE_TABLE.iter() {
        if frequency > note.frequency {
            previous = Some(note);
            continue;
        }
        if frequency == note.frequency {
            return note;
        }

        let Some(prev) = previous else {
            return note;
        };
        if (note.frequency - frequency).abs() < (prev.frequency - frequency).abs() {
            return note;
        }
        return prev;
    }

    &NOTE_TABLE[NOTE_COUNT - 1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_ascending() {
        for pair in NOTE_TABLE.windows(2) {
            assert!(pair[0].frequency < pair[1].frequency);
        }
        assert_eq!(NOTE_TABLE[0].name(), "C0");
        assert_eq!(NOTE_TABLE[NOTE_COUNT - 1].name(), "B8");
    }

    #[test]
    fn test_exact_frequency() {
        assert_eq!(nearest_note(261.63).name(), "C4");
    }

    #[test]
    fn test_out_of_range_frequencies_clamp() {
        assert_eq!(nearest_note(1.0).name(), "C0");
        assert_eq!(nearest_note(20_000.0).name(), "B8");
    }

    #[test]
    fn test_tie_resolves_to_lower_note() {
        // F#3 = 185.00, G3 = 196.00
        assert_eq!(nearest_note(190.5).name(), "F#3");
        assert_eq!(nearest_note(190.51).name(), "G3");
    }
}
