use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{DomainError, Pitch};

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Staff {
    Treble,
    Bass,
}

impl Staff {
    pub fn as_str(self) -> &'static str {
        match self {
            Staff::Treble => "treble",
            Staff::Bass => "bass",
        }
    }
}

impl fmt::Display for Staff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which staves new notes are drawn from.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum StaffMode {
    #[default]
    Both,
    Treble,
    Bass,
}

impl StaffMode {
    pub fn includes(self, staff: Staff) -> bool {
        match self {
            StaffMode::Both => true,
            StaffMode::Treble => staff == Staff::Treble,
            StaffMode::Bass => staff == Staff::Bass,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StaffMode::Both => "both",
            StaffMode::Treble => "treble",
            StaffMode::Bass => "bass",
        }
    }
}

impl fmt::Display for StaffMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StaffMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "both" => Ok(StaffMode::Both),
            "treble" => Ok(StaffMode::Treble),
            "bass" => Ok(StaffMode::Bass),
            other => Err(DomainError::validation(format!(
                "unknown staff mode {other:?}, expected both, treble or bass"
            ))),
        }
    }
}

/// A practice note: a pitch placed on one staff.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Note {
    pub pitch: Pitch,
    pub staff: Staff,
    /// Layout slot on the staff, e.g. `treble-g3`. Unique per staff.
    pub position_id: String,
}

impl Note {
    pub fn new(pitch: Pitch, staff: Staff) -> Self {
        let position_id = format!("{}-{}", staff, pitch.to_string().to_lowercase());
        Self {
            pitch,
            staff,
            position_id,
        }
    }

    pub fn pitch_name(&self) -> String {
        self.pitch.to_string()
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum KeyColor {
    White,
    Black,
}

/// One key of the on-screen piano.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PracticeKey {
    pub pitch: Pitch,
    pub solfege: String,
    pub color: KeyColor,
    /// Display-only frequency, rounded to hundredths of a hertz.
    pub frequency_hz: f64,
}

impl PracticeKey {
    pub fn new(pitch: Pitch) -> Self {
        let mut solfege = pitch.letter().solfege().to_string();
        let color = if pitch.is_sharp() {
            solfege.push('#');
            KeyColor::Black
        } else {
            KeyColor::White
        };
        let frequency_hz = (pitch.equal_tempered_hz() * 100.0).round() / 100.0;
        Self {
            pitch,
            solfege,
            color,
            frequency_hz,
        }
    }

    pub fn pitch_name(&self) -> String {
        self.pitch.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Letter;

    #[test]
    fn staff_mode_filters_staves() {
        assert!(StaffMode::Both.includes(Staff::Treble));
        assert!(StaffMode::Both.includes(Staff::Bass));
        assert!(StaffMode::Treble.includes(Staff::Treble));
        assert!(!StaffMode::Treble.includes(Staff::Bass));
        assert!(!StaffMode::Bass.includes(Staff::Treble));
    }

    #[test]
    fn staff_mode_parses_case_insensitively() {
        assert_eq!("Treble".parse::<StaffMode>().unwrap(), StaffMode::Treble);
        assert_eq!("bass".parse::<StaffMode>().unwrap(), StaffMode::Bass);
        assert!("alto".parse::<StaffMode>().is_err());
    }

    #[test]
    fn note_position_id_names_staff_and_pitch() {
        let note = Note::new(Pitch::natural(Letter::G, 3), Staff::Treble);
        assert_eq!(note.position_id, "treble-g3");
        assert_eq!(note.pitch_name(), "G3");
    }

    #[test]
    fn black_keys_carry_sharp_solfege() {
        let key = PracticeKey::new(Pitch::sharp(Letter::F, 4));
        assert_eq!(key.solfege, "Fa#");
        assert_eq!(key.color, KeyColor::Black);
        let white = PracticeKey::new(Pitch::natural(Letter::B, 1));
        assert_eq!(white.solfege, "Si");
        assert_eq!(white.color, KeyColor::White);
    }
}
