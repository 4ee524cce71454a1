use stave_domain::StaffMode;
use stave_tutor::KeyLabelMode;

/// One line typed at the trainer prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptLine {
    /// A single letter, treated like a key on the computer keyboard.
    Physical(char),
    /// Anything else that is not a command, treated like a piano key click.
    Click(String),
    Staff(StaffMode),
    Strict(bool),
    Labels(KeyLabelMode),
    ShowPitch(bool),
    Keys,
    Help,
    Quit,
    Empty,
    Invalid(String),
}

pub const HELP: &str = "\
Name the note on the staff.
  a-g              answer with a letter (octave and sharps ignored)
  C#4, G3, ...     press that piano key (strict mode needs the exact name)
  :staff MODE      draw from both, treble or bass
  :strict on|off   exact pitch names or letters only
  :labels MODE     key labels: both, name, solfege or none
  :pitch on|off    print the pitch name under the note
  :keys            show the piano
  :help            this text
  :quit            leave";

pub fn parse_line(line: &str) -> PromptLine {
    let line = line.trim();
    if line.is_empty() {
        return PromptLine::Empty;
    }
    let Some(command) = line.strip_prefix(':') else {
        let mut chars = line.chars();
        return match (chars.next(), chars.next()) {
            (Some(key), None) => PromptLine::Physical(key),
            _ => PromptLine::Click(line.to_string()),
        };
    };

    let mut words = command.split_whitespace();
    let name = words.next().unwrap_or_default();
    let argument = words.next();
    match (name, argument) {
        ("staff", Some(mode)) => mode
            .parse()
            .map(PromptLine::Staff)
            .unwrap_or_else(|err| PromptLine::Invalid(err.to_string())),
        ("labels", Some(mode)) => mode
            .parse()
            .map(PromptLine::Labels)
            .unwrap_or_else(|err| PromptLine::Invalid(err.to_string())),
        ("strict", Some(flag)) => on_off(flag, PromptLine::Strict),
        ("pitch", Some(flag)) => on_off(flag, PromptLine::ShowPitch),
        ("keys", None) => PromptLine::Keys,
        ("help", None) => PromptLine::Help,
        ("quit" | "q", None) => PromptLine::Quit,
        _ => PromptLine::Invalid(format!("unknown command {line:?}, try :help")),
    }
}

fn on_off(flag: &str, build: fn(bool) -> PromptLine) -> PromptLine {
    match flag {
        "on" | "true" | "yes" => build(true),
        "off" | "false" | "no" => build(false),
        other => PromptLine::Invalid(format!("expected on or off, got {other:?}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_characters_are_physical_keys() {
        assert_eq!(parse_line("f"), PromptLine::Physical('f'));
        assert_eq!(parse_line("  x "), PromptLine::Physical('x'));
    }

    #[test]
    fn longer_input_is_a_click() {
        assert_eq!(parse_line("C#4"), PromptLine::Click("C#4".into()));
        assert_eq!(parse_line("hello"), PromptLine::Click("hello".into()));
        assert_eq!(parse_line("   "), PromptLine::Empty);
    }

    #[test]
    fn commands_parse() {
        assert_eq!(parse_line(":staff treble"), PromptLine::Staff(StaffMode::Treble));
        assert_eq!(parse_line(":strict off"), PromptLine::Strict(false));
        assert_eq!(parse_line(":pitch on"), PromptLine::ShowPitch(true));
        assert_eq!(
            parse_line(":labels name"),
            PromptLine::Labels(KeyLabelMode::Name)
        );
        assert_eq!(parse_line(":keys"), PromptLine::Keys);
        assert_eq!(parse_line(":q"), PromptLine::Quit);
    }

    #[test]
    fn bad_commands_explain_themselves() {
        assert!(matches!(parse_line(":staff alto"), PromptLine::Invalid(msg) if msg.contains("alto")));
        assert!(matches!(parse_line(":labels colors"), PromptLine::Invalid(msg) if msg.contains("colors")));
        assert!(matches!(parse_line(":strict maybe"), PromptLine::Invalid(_)));
        assert!(matches!(parse_line(":dance"), PromptLine::Invalid(_)));
        assert!(matches!(parse_line(":keys now"), PromptLine::Invalid(_)));
    }
}
