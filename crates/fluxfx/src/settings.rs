//! Host settings file.
//!
//! ```toml
//! effect_mode = "VORTEX"
//! frame_interval_ms = 16
//! seed = 42
//!
//! [engine]
//! max_particles = 200
//! ```
//!
//! Every key is optional.

use std::path::Path;
use std::time::Duration;

use fluxfx_core::{EffectMode, EngineConfig};
use serde::Deserialize;
use tracing::{info, warn};

use crate::error::{HostError, HostResult};

/// Default gap between frames (about 60 Hz).
pub const DEFAULT_FRAME_INTERVAL_MS: u64 = 16;

/// Parsed settings file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Persisted effect mode name.
    pub effect_mode: Option<String>,
    /// Gap between frames (ms).
    pub frame_interval_ms: u64,
    /// Seed for deterministic randomness. OS entropy when absent.
    pub seed: Option<u64>,
    /// Engine tuning.
    pub engine: EngineConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            effect_mode: None,
            frame_interval_ms: DEFAULT_FRAME_INTERVAL_MS,
            seed: None,
            engine: EngineConfig::default(),
        }
    }
}

impl Settings {
    /// Parses settings from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::Settings`] when the text is not valid settings TOML.
    pub fn from_toml_str(text: &str) -> HostResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Reads and parses a settings file.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::SettingsIo`] when the file cannot be read and
    /// [`HostError::Settings`] when it does not parse.
    pub fn load(path: impl AsRef<Path>) -> HostResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| HostError::SettingsIo {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_toml_str(&text)?;
        info!(
            path = %path.display(),
            mode = %settings.resolved_mode(),
            "Settings loaded"
        );
        Ok(settings)
    }

    /// The persisted mode, or LIGHTNING when absent or unknown.
    #[must_use]
    pub fn resolved_mode(&self) -> EffectMode {
        resolve_mode(self.effect_mode.as_deref())
    }

    /// Gap between frames.
    #[must_use]
    pub const fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }
}

/// Resolves a persisted mode name, warning when it is not recognized.
#[must_use]
pub fn resolve_mode(name: Option<&str>) -> EffectMode {
    if let Some(name) = name {
        if let Err(err) = name.parse::<EffectMode>() {
            warn!(%err, fallback = %EffectMode::DEFAULT, "Unknown effect mode preference");
        }
    }
    EffectMode::from_preference(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_all_defaults() {
        let settings = Settings::from_toml_str("").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.resolved_mode(), EffectMode::Lightning);
        assert_eq!(settings.frame_interval(), Duration::from_millis(16));
    }

    #[test]
    fn test_partial_engine_table() {
        let settings = Settings::from_toml_str(
            r#"
            effect_mode = "vortex"
            seed = 42

            [engine]
            max_particles = 120
            "#,
        )
        .unwrap();
        assert_eq!(settings.resolved_mode(), EffectMode::Vortex);
        assert_eq!(settings.seed, Some(42));
        assert_eq!(settings.engine.max_particles, 120);
        assert_eq!(settings.engine.input_debounce_ms, 50);
    }

    #[test]
    fn test_unknown_mode_falls_back() {
        let settings = Settings::from_toml_str(r#"effect_mode = "PLASMA""#).unwrap();
        assert_eq!(settings.resolved_mode(), EffectMode::Lightning);
    }

    #[test]
    fn test_malformed_toml_is_an_error() {
        let err = Settings::from_toml_str("frame_interval_ms = \"fast\"").unwrap_err();
        assert!(matches!(err, HostError::Settings(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = Settings::load("/nonexistent/fluxfx.toml").unwrap_err();
        assert!(matches!(err, HostError::SettingsIo { .. }));
    }
}
