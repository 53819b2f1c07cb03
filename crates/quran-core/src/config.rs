use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::platform;

pub const FONT_SIZE_MIN: u16 = 16;
pub const FONT_SIZE_MAX: u16 = 48;

/// User settings, persisted as a whole: the store never writes a partial
/// record, so a half-updated settings file cannot exist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    /// Verse display size, clamped to 16..=48.
    #[serde(default = "default_font_size")]
    pub font_size: u16,
    /// Audio edition identifier used for verse playback.
    #[serde(default = "default_reciter")]
    pub default_reciter: String,
    #[serde(default = "default_volume")]
    pub volume: f32,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            font_size: default_font_size(),
            default_reciter: default_reciter(),
            volume: default_volume(),
        }
    }
}

fn default_font_size() -> u16 {
    24
}

fn default_reciter() -> String {
    "ar.alafasy".to_string()
}

fn default_volume() -> f32 {
    0.5
}

impl AppSettings {
    /// Load from the default config path; missing or unreadable files yield
    /// the defaults (first run behaves identically to a wiped config).
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str::<Self>(&content) {
                Ok(mut settings) => {
                    settings.clamp();
                    settings
                }
                Err(e) => {
                    tracing::warn!("invalid settings file {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    pub fn save(&self) -> anyhow::Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        platform::config_dir().join("config.toml")
    }

    pub fn set_font_size(&mut self, size: u16) {
        self.font_size = size.clamp(FONT_SIZE_MIN, FONT_SIZE_MAX);
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
    }

    fn clamp(&mut self) {
        self.font_size = self.font_size.clamp(FONT_SIZE_MIN, FONT_SIZE_MAX);
        self.volume = self.volume.clamp(0.0, 1.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let settings = AppSettings::default();
        assert_eq!(settings.font_size, 24);
        assert_eq!(settings.default_reciter, "ar.alafasy");
        assert_eq!(settings.volume, 0.5);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = AppSettings::load_from(&dir.path().join("nope.toml"));
        assert_eq!(settings.font_size, 24);
    }

    #[test]
    fn roundtrip_and_clamp() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut settings = AppSettings::default();
        settings.set_font_size(200); // clamped to max
        settings.default_reciter = "ar.husary".to_string();
        settings.save_to(&path).unwrap();

        let loaded = AppSettings::load_from(&path);
        assert_eq!(loaded.font_size, FONT_SIZE_MAX);
        assert_eq!(loaded.default_reciter, "ar.husary");
    }

    #[test]
    fn corrupt_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "font_size = \"not a number").unwrap();
        let settings = AppSettings::load_from(&path);
        assert_eq!(settings.default_reciter, "ar.alafasy");
    }
}
