use crate::text::Style;
use crate::theme::ThemeName;
use maze_core::Strategy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Smallest and largest side accepted anywhere in the front-end
pub const MIN_SIDE: i32 = 1;
pub const MAX_SIDE: i32 = 200;

/// Saved front-end defaults. Command-line flags take precedence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub width: i32,
    pub height: i32,
    pub strategy: Strategy,
    pub style: Style,
    pub theme: ThemeName,
    /// Mark start/end cells as S and E
    pub show_endpoints: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            width: 10,
            height: 10,
            strategy: Strategy::Iterative,
            style: Style::Unicode,
            theme: ThemeName::Dark,
            show_endpoints: true,
        }
    }
}

impl Preferences {
    /// Get the preferences file path
    pub fn save_path() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("maze_prefs.json")
    }

    /// Load from the default location, falling back to defaults
    pub fn load() -> Self {
        Self::load_from(&Self::save_path())
    }

    pub fn load_from(path: &Path) -> Self {
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::debug!("no preferences at {}: {e}", path.display());
                return Self::default();
            }
        };
        match serde_json::from_str::<Self>(&json) {
            Ok(prefs) => prefs.sanitized(),
            Err(e) => {
                log::warn!("ignoring unreadable preferences {}: {e}", path.display());
                Self::default()
            }
        }
    }

    pub fn save(&self) -> io::Result<()> {
        self.save_to(&Self::save_path())
    }

    pub fn save_to(&self, path: &Path) -> io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)
    }

    /// Clamp dimensions a hand-edited file may have put out of range
    fn sanitized(mut self) -> Self {
        self.width = self.width.clamp(MIN_SIDE, MAX_SIDE);
        self.height = self.height.clamp(MIN_SIDE, MAX_SIDE);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_file(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("maze-cli-{}-{name}", std::process::id()))
    }

    #[test]
    fn test_round_trip_through_file() {
        let path = temp_file("prefs.json");
        let prefs = Preferences {
            width: 33,
            height: 12,
            strategy: Strategy::Recursive,
            style: Style::Ascii,
            theme: ThemeName::Light,
            show_endpoints: false,
        };
        prefs.save_to(&path).unwrap();
        assert_eq!(Preferences::load_from(&path), prefs);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_missing_or_invalid_file_gives_defaults() {
        let path = temp_file("missing.json");
        assert_eq!(Preferences::load_from(&path), Preferences::default());

        let path = temp_file("broken.json");
        fs::write(&path, "{ not json").unwrap();
        assert_eq!(Preferences::load_from(&path), Preferences::default());
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_partial_file_fills_defaults_and_clamps() {
        let path = temp_file("partial.json");
        fs::write(&path, r#"{ "width": 5000, "height": -4, "style": "Ascii" }"#).unwrap();
        let prefs = Preferences::load_from(&path);
        assert_eq!(prefs.width, MAX_SIDE);
        assert_eq!(prefs.height, MIN_SIDE);
        assert_eq!(prefs.style, Style::Ascii);
        assert_eq!(prefs.strategy, Strategy::Iterative);
        let _ = fs::remove_file(&path);
    }
}
