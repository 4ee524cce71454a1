use serde::{Deserialize, Serialize};
use stave_domain::{Letter, NoteCatalog, Pitch};
use tracing::trace;

/// Octave physical letter keys are mapped into.
pub const DEFAULT_OCTAVE: u8 = 4;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum InputSource {
    /// A letter typed on the computer keyboard.
    PhysicalKey,
    /// A key clicked on the on-screen piano.
    OnScreenKey,
}

/// A normalized answer, whichever channel it came from.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PitchInput {
    pub pitch: Pitch,
    pub source: InputSource,
}

impl PitchInput {
    /// Maps `a`..`g` to `A4`..`G4`. Other characters are not inputs.
    pub fn physical(key: char) -> Option<Self> {
        let pitch = physical_key_pitch(key);
        if pitch.is_none() {
            trace!(?key, "ignoring unmapped physical key");
        }
        pitch.map(|pitch| Self {
            pitch,
            source: InputSource::PhysicalKey,
        })
    }

    /// Accepts only names of keys that exist on the catalog keyboard.
    pub fn key_click(pitch_name: &str, catalog: &NoteCatalog) -> Option<Self> {
        let pitch = match pitch_name.parse::<Pitch>() {
            Ok(pitch) if catalog.contains_key(&pitch) => pitch,
            _ => {
                trace!(pitch_name, "ignoring click on unknown key");
                return None;
            }
        };
        Some(Self {
            pitch,
            source: InputSource::OnScreenKey,
        })
    }

    /// The comparison mode this input is judged under. Letter keys cannot
    /// spell accidentals, so they are always judged relaxed.
    pub fn strict(&self, configured_strict: bool) -> bool {
        match self.source {
            InputSource::PhysicalKey => false,
            InputSource::OnScreenKey => configured_strict,
        }
    }
}

/// Physical key mapping, case-insensitive.
pub fn physical_key_pitch(key: char) -> Option<Pitch> {
    let letter = Letter::from_char(key.to_ascii_uppercase())?;
    Some(Pitch::natural(letter, DEFAULT_OCTAVE))
}
