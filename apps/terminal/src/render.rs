use stave_domain::{KeyColor, NoteCatalog};
use stave_tutor::{is_central_c, key_labels, visible_keys, SessionSnapshot};

use crate::settings::TrainerSettings;

/// Whether two snapshots differ in anything besides the running clock.
pub fn status_changed(previous: &SessionSnapshot, next: &SessionSnapshot) -> bool {
    previous.current_note != next.current_note
        || previous.last_success_elapsed_ms != next.last_success_elapsed_ms
        || previous.error_active != next.error_active
        || previous.phase != next.phase
}

pub fn render_snapshot(snapshot: &SessionSnapshot, settings: &TrainerSettings) -> String {
    let Some(note) = &snapshot.current_note else {
        return "(no note)".to_string();
    };
    let mut line = format!("{} staff, {}", note.staff, note.position_id);
    if settings.show_pitch {
        line.push_str(&format!("  [{}]", note.pitch));
    }
    if let Some(elapsed) = snapshot.last_success_elapsed_ms {
        line.push_str(&format!("  ok {elapsed}ms"));
    }
    if snapshot.error_active {
        line.push_str("  x");
    }
    line
}

/// Acknowledges an on/off prompt command.
pub fn render_toggle(name: &str, on: bool) -> String {
    format!("{name}: {}", if on { "on" } else { "off" })
}

/// One line per visible key; black keys are indented, middle C is starred.
pub fn render_keyboard(catalog: &NoteCatalog, settings: &TrainerSettings) -> String {
    let strict = settings.session.strict_mode;
    visible_keys(catalog, strict)
        .into_iter()
        .map(|key| {
            let indent = match key.color {
                KeyColor::White => "",
                KeyColor::Black => "   ",
            };
            let marker = if is_central_c(key, strict) { "*" } else { " " };
            let labels = key_labels(key, settings.key_labels).join(" / ");
            format!("{indent}{marker}[{:>4}] {labels}", key.pitch_name())
                .trim_end()
                .to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use stave_domain::{Note, Pitch, Staff};
    use stave_tutor::{KeyLabelMode, SessionPhase};

    fn snapshot() -> SessionSnapshot {
        SessionSnapshot {
            current_note: Some(Note::new(
                "G3".parse::<Pitch>().unwrap(),
                Staff::Treble,
            )),
            elapsed_since_shown_ms: Some(10),
            last_success_elapsed_ms: None,
            error_active: false,
            phase: SessionPhase::Presenting,
        }
    }

    #[test]
    fn snapshot_line_shows_indicators() {
        let mut settings = TrainerSettings::default();
        let mut snap = snapshot();
        assert_eq!(render_snapshot(&snap, &settings), "treble staff, treble-g3");

        settings.show_pitch = true;
        snap.last_success_elapsed_ms = Some(812);
        assert_eq!(
            render_snapshot(&snap, &settings),
            "treble staff, treble-g3  [G3]  ok 812ms"
        );

        snap.last_success_elapsed_ms = None;
        snap.error_active = true;
        assert!(render_snapshot(&snap, &settings).ends_with("  x"));
    }

    #[test]
    fn clock_ticks_are_not_status_changes() {
        let a = snapshot();
        let mut b = snapshot();
        b.elapsed_since_shown_ms = Some(900);
        assert!(!status_changed(&a, &b));
        b.error_active = true;
        assert!(status_changed(&a, &b));
    }

    #[test]
    fn toggles_print_their_state() {
        assert_eq!(render_toggle("pitch", true), "pitch: on");
        assert_eq!(render_toggle("strict", false), "strict: off");
    }

    #[test]
    fn relaxed_keyboard_lists_one_octave() {
        let catalog = NoteCatalog::standard();
        let mut settings = TrainerSettings::default();
        settings.session.strict_mode = false;
        settings.key_labels = KeyLabelMode::Solfege;
        let text = render_keyboard(&catalog, &settings);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 12);
        assert_eq!(lines[0], " [  C4] Do");
        assert_eq!(lines[1], "    [ C#4] Do#");
        assert!(!text.contains('*'));
    }

    #[test]
    fn strict_keyboard_stars_middle_c() {
        let catalog = NoteCatalog::standard();
        let text = render_keyboard(&catalog, &TrainerSettings::default());
        assert_eq!(text.lines().count(), 52);
        assert!(text.lines().any(|line| line == "*[  C4]"));
    }
}
