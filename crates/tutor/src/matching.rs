use stave_domain::{Note, Pitch};

/// Whether `input` answers `target`.
///
/// Strict comparison needs the exact pitch name: letter, accidental and
/// octave. Relaxed comparison drops octave and accidental on both sides and
/// compares the bare letter, so `C4`, `C#5` and `C2` all answer a `C#4`.
pub fn is_match(input: &Pitch, target: &Note, strict: bool) -> bool {
    if strict {
        *input == target.pitch
    } else {
        input.base_letter() == target.pitch.base_letter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stave_domain::Staff;

    fn pitch(name: &str) -> Pitch {
        name.parse().unwrap()
    }

    fn note(name: &str) -> Note {
        Note::new(pitch(name), Staff::Treble)
    }

    #[test]
    fn strict_requires_exact_name() {
        let target = note("C#4");
        assert!(is_match(&pitch("C#4"), &target, true));
        assert!(!is_match(&pitch("C4"), &target, true));
        assert!(!is_match(&pitch("C#5"), &target, true));
        assert!(!is_match(&pitch("D4"), &target, true));
    }

    #[test]
    fn relaxed_compares_base_letter() {
        let target = note("C#4");
        assert!(is_match(&pitch("C4"), &target, false));
        assert!(is_match(&pitch("C#5"), &target, false));
        assert!(is_match(&pitch("C2"), &target, false));
        assert!(!is_match(&pitch("D4"), &target, false));
        assert!(!is_match(&pitch("B3"), &note("C4"), false));
    }
}
