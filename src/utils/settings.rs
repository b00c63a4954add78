//! User preferences, kept in ~/.slogi/settings.json.

use super::persistence::{load_json_or_default, save_json};
use crate::drill::{Background, DrillPrefs};
use crate::speech::SpeechOptions;
use crate::syllables::SyllableOrder;
use serde::{Deserialize, Serialize};
use std::io;

pub const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub order: SyllableOrder,
    pub uppercase: bool,
    /// Drill cards are read aloud on Space.
    pub sound_enabled: bool,
    pub background: Background,
    pub speech: SpeechOptions,
}

impl Default for Settings {
    fn default() -> Self {
        let prefs = DrillPrefs::default();
        Self {
            order: SyllableOrder::Cv,
            uppercase: prefs.uppercase,
            sound_enabled: prefs.sound_enabled,
            background: prefs.background,
            speech: SpeechOptions::default(),
        }
    }
}

/// Command-line choices for one run. Never written back to disk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionOverrides {
    pub order: Option<SyllableOrder>,
    pub lowercase: bool,
    pub mute: bool,
}

impl SessionOverrides {
    /// The settings this run plays with.
    pub fn effective(&self, saved: &Settings) -> Settings {
        let mut settings = saved.clone();
        if let Some(order) = self.order {
            settings.order = order;
        }
        if self.lowercase {
            settings.uppercase = false;
        }
        if self.mute {
            settings.sound_enabled = false;
        }
        settings
    }
}

impl Settings {
    pub fn load() -> Self {
        Self::load_from(SETTINGS_FILE)
    }

    pub fn save(&self) -> io::Result<()> {
        self.save_to(SETTINGS_FILE)
    }

    /// Load from `filename` inside the data directory.
    pub fn load_from(filename: &str) -> Self {
        load_json_or_default(filename)
    }

    pub fn save_to(&self, filename: &str) -> io::Result<()> {
        save_json(filename, self)
    }

    pub fn drill_prefs(&self) -> DrillPrefs {
        DrillPrefs {
            sound_enabled: self.sound_enabled,
            uppercase: self.uppercase,
            background: self.background,
        }
    }

    /// Remember the toggles changed during a drill.
    pub fn apply_drill_prefs(&mut self, prefs: DrillPrefs) {
        self.sound_enabled = prefs.sound_enabled;
        self.uppercase = prefs.uppercase;
        self.background = prefs.background;
    }

    /// Copy only the toggles that differ between `before` and `after`.
    pub fn apply_drill_changes(&mut self, before: DrillPrefs, after: DrillPrefs) {
        if before.sound_enabled != after.sound_enabled {
            self.sound_enabled = after.sound_enabled;
        }
        if before.uppercase != after.uppercase {
            self.uppercase = after.uppercase;
        }
        if before.background != after.background {
            self.background = after.background;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.order, SyllableOrder::Cv);
        assert!(settings.uppercase);
        assert!(!settings.sound_enabled);
        assert_eq!(settings.background, Background::White);
        assert_eq!(settings.speech.voice, "ru");
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{"order":"vc","speech":{"command":"espeak"}}"#).unwrap();
        assert_eq!(settings.order, SyllableOrder::Vc);
        assert!(settings.uppercase);
        assert_eq!(settings.speech.command, "espeak");
        assert_eq!(settings.speech.voice, "ru");
    }

    #[test]
    fn test_serialized_names() {
        let json = serde_json::to_string(&Settings::default()).unwrap();
        assert!(json.contains(r#""order":"cv""#));
        assert!(json.contains(r#""background":"white""#));
    }

    #[test]
    fn test_drill_prefs_round_trip() {
        let mut settings = Settings::default();
        let prefs = DrillPrefs {
            sound_enabled: true,
            uppercase: false,
            background: Background::Beige,
        };
        settings.apply_drill_prefs(prefs);
        assert_eq!(settings.drill_prefs(), prefs);
    }

    #[test]
    fn test_overrides_leave_saved_untouched() {
        let saved = Settings {
            sound_enabled: true,
            ..Default::default()
        };
        let overrides = SessionOverrides {
            order: Some(SyllableOrder::Vc),
            lowercase: true,
            mute: true,
        };
        let effective = overrides.effective(&saved);
        assert_eq!(effective.order, SyllableOrder::Vc);
        assert!(!effective.uppercase);
        assert!(!effective.sound_enabled);
        assert_eq!(saved.order, SyllableOrder::Cv);
        assert!(saved.uppercase);
        assert!(saved.sound_enabled);
        assert_eq!(SessionOverrides::default().effective(&saved), saved);
    }

    #[test]
    fn test_drill_changes_copy_only_toggled_fields() {
        let mut saved = Settings {
            sound_enabled: true,
            ..Default::default()
        };
        // Played muted and lowercase; only the background was changed by hand
        let before = DrillPrefs {
            sound_enabled: false,
            uppercase: false,
            background: Background::White,
        };
        let after = DrillPrefs {
            background: Background::Blue,
            ..before
        };
        saved.apply_drill_changes(before, after);
        assert!(saved.sound_enabled);
        assert!(saved.uppercase);
        assert_eq!(saved.background, Background::Blue);
    }

    #[test]
    fn test_save_to_and_load_from() {
        let file = "settings_round_trip_test.json";
        let settings = Settings {
            order: SyllableOrder::Vc,
            background: Background::Gray,
            ..Default::default()
        };
        settings.save_to(file).unwrap();
        assert_eq!(Settings::load_from(file), settings);
        if let Ok(path) = crate::utils::persistence::data_path(file) {
            std::fs::remove_file(path).ok();
        }
    }
}
