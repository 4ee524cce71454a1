use std::collections::HashSet;
use std::ops::RangeInclusive;

use serde::Serialize;

use crate::notes::{Note, PracticeKey, Staff, StaffMode};
use crate::{DomainError, Pitch};

/// MIDI range of the treble practice notes, G3..=D6.
pub const TREBLE_RANGE: RangeInclusive<u8> = 55..=86;
/// MIDI range of the bass practice notes, B1..=F4.
pub const BASS_RANGE: RangeInclusive<u8> = 35..=65;
/// MIDI range of the on-screen keyboard, B1..=D6.
pub const KEYBOARD_RANGE: RangeInclusive<u8> = 35..=86;

/// Immutable reference data: the notes that can be drawn and the keys that
/// can be pressed.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct NoteCatalog {
    notes: Vec<Note>,
    keys: Vec<PracticeKey>,
}

impl NoteCatalog {
    /// Validates the catalog once so that note selection and matching never
    /// have to: both staves are populated, position ids are unique per staff,
    /// key names are unique and every note can be played on the keyboard.
    pub fn new(notes: Vec<Note>, keys: Vec<PracticeKey>) -> Result<Self, DomainError> {
        for staff in [Staff::Treble, Staff::Bass] {
            if !notes.iter().any(|note| note.staff == staff) {
                return Err(DomainError::validation(format!(
                    "catalog has no {staff} notes"
                )));
            }
        }

        let mut positions = HashSet::new();
        for note in &notes {
            if !positions.insert((note.staff, note.position_id.as_str())) {
                return Err(DomainError::validation(format!(
                    "duplicate position {} on the {} staff",
                    note.position_id, note.staff
                )));
            }
        }

        let mut key_pitches = HashSet::new();
        for key in &keys {
            if !key_pitches.insert(key.pitch) {
                return Err(DomainError::validation(format!(
                    "duplicate key {}",
                    key.pitch
                )));
            }
        }

        if let Some(note) = notes.iter().find(|note| !key_pitches.contains(&note.pitch)) {
            return Err(DomainError::validation(format!(
                "note {} on the {} staff has no keyboard key",
                note.pitch, note.staff
            )));
        }

        Ok(Self { notes, keys })
    }

    /// The trainer's fixed catalog: naturals G3..D6 on the treble staff,
    /// naturals B1..F4 on the bass staff and a chromatic keyboard B1..D6.
    pub fn standard() -> Self {
        let naturals = |range: RangeInclusive<u8>, staff: Staff| {
            range
                .filter_map(Pitch::from_midi)
                .filter(|pitch| !pitch.is_sharp())
                .map(move |pitch| Note::new(pitch, staff))
        };
        let notes = naturals(TREBLE_RANGE, Staff::Treble)
            .chain(naturals(BASS_RANGE, Staff::Bass))
            .collect();
        let keys = KEYBOARD_RANGE
            .filter_map(Pitch::from_midi)
            .map(PracticeKey::new)
            .collect();
        Self::new(notes, keys).expect("standard catalog is valid")
    }

    pub fn all_notes(&self) -> &[Note] {
        &self.notes
    }

    /// Notes whose staff is included by `filter`, in catalog order. Never
    /// empty for a constructed catalog.
    pub fn notes(&self, filter: StaffMode) -> Vec<&Note> {
        self.notes
            .iter()
            .filter(|note| filter.includes(note.staff))
            .collect()
    }

    pub fn keys(&self) -> &[PracticeKey] {
        &self.keys
    }

    pub fn key(&self, pitch: &Pitch) -> Option<&PracticeKey> {
        self.keys.iter().find(|key| key.pitch == *pitch)
    }

    pub fn contains_key(&self, pitch: &Pitch) -> bool {
        self.key(pitch).is_some()
    }

    /// Display frequency for a key name; `None` for malformed names and for
    /// pitches outside the keyboard.
    pub fn pitch_frequency(&self, pitch_name: &str) -> Option<f64> {
        let pitch: Pitch = pitch_name.parse().ok()?;
        self.key(&pitch).map(|key| key.frequency_hz)
    }
}

impl Default for NoteCatalog {
    fn default() -> Self {
        Self::standard()
    }
}
