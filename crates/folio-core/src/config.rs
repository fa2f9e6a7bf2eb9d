//! Runtime configuration
//!
//! Loaded from TOML. Every field has a default, so an empty file (or no file)
//! yields the stock site behaviour:
//!
//! ```toml
//! [theme]
//! default = "dark"
//!
//! [reveal]
//! threshold = 0.1
//! root_margin = 0.0
//!
//! [particles.dark]
//! count = 5000
//! bounds = [60.0, 50.0, 50.0]
//!
//! [frame]
//! target_fps = 60
//! seed = 42
//! ```

use crate::error::{FolioError, Result};
use folio_reveal::ObserverOptions;
use folio_scene::{FieldConfig, FieldSettings};
use folio_theme::Theme;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable naming an optional config file
pub const CONFIG_ENV: &str = "FOLIO_CONFIG";

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FolioConfig {
    /// `[theme]`
    pub theme: ThemeSettings,
    /// `[reveal]`
    pub reveal: ObserverOptions,
    /// `[particles.dark]` and `[particles.light]`
    pub particles: ParticleSettings,
    /// `[frame]`
    pub frame: FrameSettings,
}

/// Theme preference settings
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeSettings {
    /// Theme used when nothing valid is stored
    pub default: Theme,
    /// JSON file backing the preference store; in-memory when absent
    pub store: Option<PathBuf>,
}

/// Per-theme particle overrides
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleSettings {
    /// Overrides for the dark field
    pub dark: FieldSettings,
    /// Overrides for the light field
    pub light: FieldSettings,
}

/// Frame loop settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameSettings {
    /// Frames per second when pacing in real time
    pub target_fps: u32,
    /// Particle generation seed; random when absent
    pub seed: Option<u64>,
}

impl Default for FrameSettings {
    fn default() -> Self {
        Self {
            target_fps: 60,
            seed: None,
        }
    }
}

impl FrameSettings {
    /// Seconds per frame at the target rate (at least 1 fps)
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn frame_seconds(&self) -> f32 {
        1.0 / self.target_fps.max(1) as f32
    }

    /// Wall-clock interval between frames
    #[must_use]
    pub fn interval(&self) -> Duration {
        Duration::from_secs_f32(self.frame_seconds())
    }
}

impl FolioConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse TOML
    ///
    /// # Errors
    /// Returns error if the text is not valid TOML or has wrongly typed fields
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(raw)?;
        config.reveal = config.reveal.sanitized();
        Ok(config)
    }

    /// Read and parse a TOML file
    ///
    /// # Errors
    /// Returns error if the file cannot be read or parsed
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| FolioError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let config = Self::from_toml_str(&raw)?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load `path` if given, otherwise defaults
    ///
    /// # Errors
    /// Returns error if a given file cannot be read or parsed
    pub fn load_optional(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Builder: default theme
    #[inline]
    #[must_use]
    pub fn with_default_theme(mut self, theme: Theme) -> Self {
        self.theme.default = theme;
        self
    }

    /// Builder: generation seed
    #[inline]
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.frame.seed = Some(seed);
        self
    }

    /// Builder: observer options
    #[inline]
    #[must_use]
    pub fn with_reveal(mut self, options: ObserverOptions) -> Self {
        self.reveal = options.sanitized();
        self
    }

    /// Resolved field configuration for a theme
    #[must_use]
    pub fn field_config(&self, theme: Theme) -> FieldConfig {
        let settings = match theme {
            Theme::Dark => &self.particles.dark,
            Theme::Light => &self.particles.light,
        };
        settings.resolve(theme)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_toml_is_default() {
        assert_eq!(FolioConfig::from_toml_str("").unwrap(), FolioConfig::default());
    }

    #[test]
    fn sections_override_defaults() {
        let raw = r#"
            [theme]
            default = "light"

            [reveal]
            threshold = 3.0

            [particles.light]
            count = 120

            [frame]
            seed = 9
        "#;
        let config = FolioConfig::from_toml_str(raw).unwrap();

        assert_eq!(config.theme.default, Theme::Light);
        assert_eq!(config.reveal.threshold, 1.0);
        assert_eq!(config.field_config(Theme::Light).count, 120);
        assert_eq!(config.field_config(Theme::Dark).count, 5000);
        assert_eq!(config.frame.seed, Some(9));
        assert_eq!(config.frame.target_fps, 60);
    }

    #[test]
    fn negative_count_clamps_to_zero() {
        let config = FolioConfig::from_toml_str("[particles.dark]\ncount = -50\n").unwrap();
        assert_eq!(config.field_config(Theme::Dark).count, 0);
    }

    #[test]
    fn wrong_type_is_rejected() {
        let err = FolioConfig::from_toml_str("[theme]\ndefault = 3\n").unwrap_err();
        assert!(matches!(err, FolioError::Config(_)));
    }

    #[test]
    fn zero_fps_is_one() {
        let frame = FrameSettings {
            target_fps: 0,
            seed: None,
        };
        assert_eq!(frame.frame_seconds(), 1.0);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = FolioConfig::load(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, FolioError::Io { .. }));
    }
}
