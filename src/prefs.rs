//! Persisted user preferences
//!
//! The theme choice is the only state that survives a restart. It is
//! stored as a small JSON file in the user's data directory:
//! - Linux: ~/.local/share/folio/preferences.json
//! - macOS: ~/Library/Application Support/folio/preferences.json
//! - Windows: %APPDATA%\folio\preferences.json
//!
//! Loading falls back to defaults on any error; saving failures are
//! logged and never fatal.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// The two supported color schemes.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemeChoice {
    #[default]
    Dark,
    Light,
}

impl ThemeChoice {
    /// The other scheme, for the toggle button.
    pub fn toggled(self) -> Self {
        match self {
            ThemeChoice::Dark => ThemeChoice::Light,
            ThemeChoice::Light => ThemeChoice::Dark,
        }
    }
}

/// All persisted preferences.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Preferences {
    pub theme: ThemeChoice,
}

impl Preferences {
    /// Where the preferences file lives.
    pub fn default_path() -> PathBuf {
        let mut path = dirs::data_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));
        path.push("folio");
        path.push("preferences.json");
        path
    }

    /// Load preferences, falling back to defaults if the file is
    /// missing or unreadable.
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(prefs) => prefs,
                Err(e) => {
                    tracing::warn!(?path, error = %e, "malformed preferences, using defaults");
                    Preferences::default()
                }
            },
            Err(_) => Preferences::default(),
        }
    }

    /// Write preferences, creating the parent directory if needed.
    pub fn save(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_theme_is_dark() {
        assert_eq!(Preferences::default().theme, ThemeChoice::Dark);
    }

    #[test]
    fn test_toggle_round_trips() {
        assert_eq!(ThemeChoice::Dark.toggled(), ThemeChoice::Light);
        assert_eq!(ThemeChoice::Light.toggled().toggled(), ThemeChoice::Light);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let path = std::env::temp_dir()
            .join(format!("folio-prefs-test-{}", std::process::id()))
            .join("preferences.json");

        let prefs = Preferences { theme: ThemeChoice::Light };
        prefs.save(&path).unwrap();
        assert_eq!(Preferences::load(&path), prefs);

        std::fs::remove_dir_all(path.parent().unwrap()).unwrap();
    }

    #[test]
    fn test_missing_or_malformed_file_falls_back_to_defaults() {
        let missing = Path::new("/nonexistent/folio/preferences.json");
        assert_eq!(Preferences::load(missing), Preferences::default());

        let path = std::env::temp_dir().join(format!("folio-prefs-bad-{}.json", std::process::id()));
        std::fs::write(&path, "{not json").unwrap();
        assert_eq!(Preferences::load(&path), Preferences::default());
        std::fs::remove_file(&path).unwrap();
    }
}
