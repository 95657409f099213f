use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::ui::theme::ThemePreset;
use crate::variant::Variant;

/// Default text-generation API base URL
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub generator: GeneratorConfig,
    #[serde(default)]
    pub spin: SpinConfig,
}

/// Appearance and startup settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UiConfig {
    /// Color theme preset
    #[serde(default)]
    pub theme: ThemePreset,
    /// Variant shown on startup
    #[serde(default)]
    pub variant: Variant,
}

/// Text-generation service settings.
///
/// The API key itself is never stored here; only the name of the
/// environment variable that holds it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// API base URL (point this at a key-holding proxy to avoid local keys)
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Model override; each variant's model is used when unset
    #[serde(default)]
    pub model: Option<String>,
    /// Environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: None,
            api_key_env: default_api_key_env(),
        }
    }
}

impl GeneratorConfig {
    /// Read the API key from the configured environment variable
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
    }
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_api_key_env() -> String {
    "GOOGLE_API_KEY".to_string()
}

/// Spin behavior settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpinConfig {
    /// Re-roll every slot once more, 1s into the spin
    #[serde(default)]
    pub legacy_double_roll: bool,
}

impl Config {
    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("com", "recipe-roulette", "RecipeRoulette")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        let config_dir = dirs.config_dir();
        std::fs::create_dir_all(config_dir)?;

        Ok(config_dir.join("config.toml"))
    }

    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from a file, using defaults if it does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = toml::from_str(&content)?;
            tracing::info!("Loaded configuration from {:?}", path);
            Ok(config)
        } else {
            tracing::info!("No configuration file found, using defaults");
            Ok(Self::default())
        }
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to a file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        tracing::info!("Saved configuration to {:?}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.ui.theme, ThemePreset::Curry);
        assert_eq!(config.ui.variant, Variant::Fusion);
        assert_eq!(config.generator.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.generator.api_key_env, "GOOGLE_API_KEY");
        assert!(config.generator.model.is_none());
        assert!(!config.spin.legacy_double_roll);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config.ui.variant, Variant::Fusion);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[ui]\nvariant = \"chef\"\n\n[spin]\nlegacy_double_roll = true\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.ui.variant, Variant::Chef);
        assert_eq!(config.ui.theme, ThemePreset::Curry);
        assert!(config.spin.legacy_double_roll);
        assert_eq!(config.generator.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.ui.theme = ThemePreset::Matcha;
        config.generator.model = Some("gemini-2.0-flash".to_string());
        config.save_to(&path).unwrap();

        let saved = std::fs::read_to_string(&path).unwrap();
        assert!(!saved.contains("api_key ="), "key must never be written: {}", saved);

        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded.ui.theme, ThemePreset::Matcha);
        assert_eq!(reloaded.generator.model.as_deref(), Some("gemini-2.0-flash"));
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[ui]\nvariant = \"buffet\"\n").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_api_key_from_env() {
        let config = GeneratorConfig {
            api_key_env: "RECIPE_ROULETTE_TEST_KEY_UNSET".to_string(),
            ..Default::default()
        };
        assert!(config.api_key().is_none());
    }
}
