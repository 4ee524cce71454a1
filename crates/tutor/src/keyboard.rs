use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use stave_domain::{DomainError, Letter, NoteCatalog, Pitch, PracticeKey};

/// What is printed on each on-screen key.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum KeyLabelMode {
    Both,
    Name,
    Solfege,
    #[default]
    None,
}

impl fmt::Display for KeyLabelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            KeyLabelMode::Both => "both",
            KeyLabelMode::Name => "name",
            KeyLabelMode::Solfege => "solfege",
            KeyLabelMode::None => "none",
        })
    }
}

impl FromStr for KeyLabelMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "both" => Ok(KeyLabelMode::Both),
            "name" => Ok(KeyLabelMode::Name),
            "solfege" => Ok(KeyLabelMode::Solfege),
            "none" => Ok(KeyLabelMode::None),
            other => Err(DomainError::validation(format!(
                "unknown label mode {other:?}, expected both, name, solfege or none"
            ))),
        }
    }
}

const MIDDLE_C: Pitch = Pitch::natural(Letter::C, 4);

/// Keys the on-screen piano offers. Relaxed matching ignores the octave, so
/// only the octave starting at middle C is shown.
pub fn visible_keys(catalog: &NoteCatalog, strict: bool) -> Vec<&PracticeKey> {
    catalog
        .keys()
        .iter()
        .filter(|key| strict || key.pitch.octave() == MIDDLE_C.octave())
        .collect()
}

/// Middle C is marked only when octaves matter.
pub fn is_central_c(key: &PracticeKey, strict: bool) -> bool {
    strict && key.pitch == MIDDLE_C
}

pub fn key_labels(key: &PracticeKey, mode: KeyLabelMode) -> Vec<String> {
    match mode {
        KeyLabelMode::Both => vec![key.pitch_name(), key.solfege.clone()],
        KeyLabelMode::Name => vec![key.pitch_name()],
        KeyLabelMode::Solfege => vec![key.solfege.clone()],
        KeyLabelMode::None => Vec::new(),
    }
}
