use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::DomainError;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Letter {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl Letter {
    pub const ALL: [Letter; 7] = [
        Letter::C,
        Letter::D,
        Letter::E,
        Letter::F,
        Letter::G,
        Letter::A,
        Letter::B,
    ];

    /// Semitones above C within one octave.
    pub fn semitone(self) -> u8 {
        match self {
            Letter::C => 0,
            Letter::D => 2,
            Letter::E => 4,
            Letter::F => 5,
            Letter::G => 7,
            Letter::A => 9,
            Letter::B => 11,
        }
    }

    /// Fixed-do syllable.
    pub fn solfege(self) -> &'static str {
        match self {
            Letter::C => "Do",
            Letter::D => "Re",
            Letter::E => "Mi",
            Letter::F => "Fa",
            Letter::G => "Sol",
            Letter::A => "La",
            Letter::B => "Si",
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Letter::C => 'C',
            Letter::D => 'D',
            Letter::E => 'E',
            Letter::F => 'F',
            Letter::G => 'G',
            Letter::A => 'A',
            Letter::B => 'B',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'C' => Some(Letter::C),
            'D' => Some(Letter::D),
            'E' => Some(Letter::E),
            'F' => Some(Letter::F),
            'G' => Some(Letter::G),
            'A' => Some(Letter::A),
            'B' => Some(Letter::B),
            _ => None,
        }
    }
}

/// A pitch name such as `C#4`: letter, optional sharp and a single octave digit.
///
/// Flats are not modelled; the keyboard names every black key by its sharp.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct Pitch {
    letter: Letter,
    sharp: bool,
    octave: u8,
}

impl Pitch {
    /// Highest octave a single-digit pitch name can spell.
    pub const MAX_OCTAVE: u8 = 9;

    pub fn new(letter: Letter, sharp: bool, octave: u8) -> Result<Self, DomainError> {
        if octave > Self::MAX_OCTAVE {
            return Err(DomainError::validation(format!(
                "octave {octave} is outside 0..={}",
                Self::MAX_OCTAVE
            )));
        }
        Ok(Self {
            letter,
            sharp,
            octave,
        })
    }

    /// Panics if `octave` exceeds [`Pitch::MAX_OCTAVE`].
    pub const fn natural(letter: Letter, octave: u8) -> Self {
        assert!(octave <= Self::MAX_OCTAVE, "octave must be a single digit");
        Self {
            letter,
            sharp: false,
            octave,
        }
    }

    /// Panics if `octave` exceeds [`Pitch::MAX_OCTAVE`].
    pub const fn sharp(letter: Letter, octave: u8) -> Self {
        assert!(octave <= Self::MAX_OCTAVE, "octave must be a single digit");
        Self {
            letter,
            sharp: true,
            octave,
        }
    }

    pub const fn letter(&self) -> Letter {
        self.letter
    }

    pub const fn is_sharp(&self) -> bool {
        self.sharp
    }

    pub const fn octave(&self) -> u8 {
        self.octave
    }

    /// MIDI note number, middle C (`C4`) being 60.
    pub fn midi_number(&self) -> u8 {
        (self.octave + 1) * 12 + self.letter.semitone() + u8::from(self.sharp)
    }

    /// Spells a MIDI note number with sharps. Octaves outside 0..=9 have no
    /// single-digit name and yield `None`.
    pub fn from_midi(number: u8) -> Option<Self> {
        let octave = (number / 12).checked_sub(1)?;
        if octave > Self::MAX_OCTAVE {
            return None;
        }
        let (letter, sharp) = match number % 12 {
            0 => (Letter::C, false),
            1 => (Letter::C, true),
            2 => (Letter::D, false),
            3 => (Letter::D, true),
            4 => (Letter::E, false),
            5 => (Letter::F, false),
            6 => (Letter::F, true),
            7 => (Letter::G, false),
            8 => (Letter::G, true),
            9 => (Letter::A, false),
            10 => (Letter::A, true),
            _ => (Letter::B, false),
        };
        Some(Self {
            letter,
            sharp,
            octave,
        })
    }

    /// The letter left over once octave and accidental are ignored.
    pub fn base_letter(&self) -> Letter {
        self.letter
    }

    /// Equal-temperament frequency with A4 at 440 Hz.
    pub fn equal_tempered_hz(&self) -> f64 {
        440.0 * 2f64.powf((f64::from(self.midi_number()) - 69.0) / 12.0)
    }
}

impl fmt::Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}",
            self.letter.as_char(),
            if self.sharp { "#" } else { "" },
            self.octave
        )
    }
}

impl FromStr for Pitch {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DomainError::InvalidPitch(s.to_string());
        let mut chars = s.chars();
        let letter = chars.next().and_then(Letter::from_char).ok_or_else(invalid)?;
        let rest: Vec<char> = chars.collect();
        let (sharp, digits) = match rest.as_slice() {
            ['#', tail @ ..] => (true, tail),
            tail => (false, tail),
        };
        let octave = match digits {
            [digit] => digit.to_digit(10).ok_or_else(invalid)? as u8,
            _ => return Err(invalid()),
        };
        Self::new(letter, sharp, octave)
    }
}

impl TryFrom<String> for Pitch {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Pitch> for String {
    fn from(pitch: Pitch) -> Self {
        pitch.to_string()
    }
}
