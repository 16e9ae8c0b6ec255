use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

/// Environment variable that overrides the stored API key.
pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

/// Language the UI falls back to when nothing is configured.
pub const DEFAULT_LANGUAGE: &str = "es";

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// api_key = "..."
/// language = "es"
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// OpenWeatherMap API key; [`API_KEY_ENV`] takes precedence.
    pub api_key: Option<String>,

    /// Preferred UI language code, e.g. "es" or "en". Read once at startup.
    pub language: Option<String>,
}

impl Config {
    /// API key from the environment or the config file.
    pub fn resolved_api_key(&self) -> Result<String> {
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.is_empty() {
                return Ok(key);
            }
        }

        self.api_key.clone().filter(|k| !k.is_empty()).ok_or_else(|| {
            anyhow!(
                "No API key configured.\n\
                 Hint: run `clima configure` or set the {API_KEY_ENV} environment variable."
            )
        })
    }

    /// Preferred language, defaulting to [`DEFAULT_LANGUAGE`].
    pub fn resolved_language(&self) -> &str {
        self.language.as_deref().filter(|l| !l.is_empty()).unwrap_or(DEFAULT_LANGUAGE)
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "clima", "clima")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolved_api_key_errors_when_not_set() {
        let cfg = Config::default();
        let err = cfg.resolved_api_key().unwrap_err();

        assert!(err.to_string().contains("No API key configured"));
    }

    #[test]
    fn resolved_api_key_reads_config_value() {
        let cfg = Config { api_key: Some("KEY".into()), language: None };
        assert_eq!(cfg.resolved_api_key().expect("key must resolve"), "KEY");
    }

    #[test]
    fn empty_api_key_counts_as_unset() {
        let cfg = Config { api_key: Some(String::new()), language: None };
        assert!(cfg.resolved_api_key().is_err());
    }

    #[test]
    fn language_defaults_to_spanish() {
        let cfg = Config::default();
        assert_eq!(cfg.resolved_language(), "es");
    }

    #[test]
    fn configured_language_wins() {
        let cfg = Config { api_key: None, language: Some("en".into()) };
        assert_eq!(cfg.resolved_language(), "en");
    }

    #[test]
    fn config_round_trips_through_toml() {
        let cfg = Config { api_key: Some("KEY".into()), language: Some("en".into()) };

        let toml = toml::to_string_pretty(&cfg).expect("serialize");
        let parsed: Config = toml::from_str(&toml).expect("parse");

        assert_eq!(parsed.api_key.as_deref(), Some("KEY"));
        assert_eq!(parsed.language.as_deref(), Some("en"));
    }
}
