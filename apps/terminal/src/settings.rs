use std::io;
use std::path::{Path, PathBuf};

use anyhow::Context;

use serde::{Deserialize, Serialize};
use stave_domain::StaffMode;
use stave_tutor::{KeyLabelMode, SessionSettings};

/// On-disk form. Every field is optional so older files keep loading.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PersistedSettings {
    pub staff_mode: Option<StaffMode>,
    pub strict_mode: Option<bool>,
    pub show_pitch: Option<bool>,
    pub key_labels: Option<KeyLabelMode>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrainerSettings {
    pub session: SessionSettings,
    pub show_pitch: bool,
    pub key_labels: KeyLabelMode,
}

impl Default for TrainerSettings {
    fn default() -> Self {
        Self {
            session: SessionSettings::default(),
            show_pitch: false,
            key_labels: KeyLabelMode::None,
        }
    }
}

impl TrainerSettings {
    pub fn from_persisted(data: &PersistedSettings) -> Self {
        let defaults = Self::default();
        Self {
            session: SessionSettings {
                staff_mode: data.staff_mode.unwrap_or(defaults.session.staff_mode),
                strict_mode: data.strict_mode.unwrap_or(defaults.session.strict_mode),
            },
            show_pitch: data.show_pitch.unwrap_or(defaults.show_pitch),
            key_labels: data.key_labels.unwrap_or(defaults.key_labels),
        }
    }

    pub fn to_persisted(&self) -> PersistedSettings {
        PersistedSettings {
            staff_mode: Some(self.session.staff_mode),
            strict_mode: Some(self.session.strict_mode),
            show_pitch: Some(self.show_pitch),
            key_labels: Some(self.key_labels),
        }
    }
}

fn settings_path() -> Option<PathBuf> {
    let base = dirs::config_dir()?;
    let dir = base.join("stave");
    std::fs::create_dir_all(&dir).ok()?;
    Some(dir.join("settings.json"))
}

pub fn save_settings(data: &PersistedSettings) -> anyhow::Result<()> {
    if let Some(path) = settings_path() {
        let json = serde_json::to_string_pretty(data)?;
        std::fs::write(path, json)?;
    }
    Ok(())
}

/// `Ok(None)` when nothing has been saved yet; unreadable or corrupt files are errors.
pub fn load_settings() -> anyhow::Result<Option<PersistedSettings>> {
    match settings_path() {
        Some(path) => read_settings(&path),
        None => Ok(None),
    }
}

fn read_settings(path: &Path) -> anyhow::Result<Option<PersistedSettings>> {
    let data = match std::fs::read_to_string(path) {
        Ok(data) => data,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(err) => {
            return Err(err).with_context(|| format!("failed to read {}", path.display()))
        }
    };
    let settings = serde_json::from_str(&data)
        .with_context(|| format!("{} is not a valid settings file", path.display()))?;
    Ok(Some(settings))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let data: PersistedSettings = serde_json::from_str("{}").unwrap();
        let settings = TrainerSettings::from_persisted(&data);
        assert_eq!(settings, TrainerSettings::default());
        assert!(settings.session.strict_mode);
        assert_eq!(settings.session.staff_mode, StaffMode::Both);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let data: PersistedSettings =
            serde_json::from_str(r#"{"staff_mode":"bass","key_labels":"solfege"}"#).unwrap();
        let settings = TrainerSettings::from_persisted(&data);
        assert_eq!(settings.session.staff_mode, StaffMode::Bass);
        assert!(settings.session.strict_mode);
        assert_eq!(settings.key_labels, KeyLabelMode::Solfege);
        assert!(!settings.show_pitch);
    }

    #[test]
    fn persisted_form_restores_settings() {
        let settings = TrainerSettings {
            session: SessionSettings {
                staff_mode: StaffMode::Treble,
                strict_mode: false,
            },
            show_pitch: true,
            key_labels: KeyLabelMode::Both,
        };
        let json = serde_json::to_string(&settings.to_persisted()).unwrap();
        let back: PersistedSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(TrainerSettings::from_persisted(&back), settings);
    }

    fn scratch_file(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("stave-{}-{name}.json", std::process::id()))
    }

    #[test]
    fn missing_file_is_not_an_error() {
        let path = scratch_file("missing");
        let _ = std::fs::remove_file(&path);
        assert_eq!(read_settings(&path).unwrap(), None);
    }

    #[test]
    fn corrupt_file_is_reported() {
        let path = scratch_file("corrupt");
        std::fs::write(&path, "{\"staff_mode\": ").unwrap();
        let err = read_settings(&path).unwrap_err();
        std::fs::remove_file(&path).unwrap();
        assert!(err.to_string().contains("not a valid settings file"));
    }

    #[test]
    fn saved_file_loads_back() {
        let path = scratch_file("saved");
        let json = r#"{"staff_mode":"treble","show_pitch":true}"#;
        std::fs::write(&path, json).unwrap();
        let loaded = read_settings(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        let loaded = loaded.unwrap();
        assert_eq!(loaded.staff_mode, Some(StaffMode::Treble));
        assert_eq!(loaded.show_pitch, Some(true));
        assert_eq!(loaded.key_labels, None);
    }
}
