//! User settings for fintrack
//!
//! Where the REST store lives, who the user is, and presentation preferences.
//! Every field has a serde default so older or hand-edited files keep loading.

use serde::{Deserialize, Serialize};

use super::paths::FintrackPaths;
use crate::error::FinanceError;

/// Where category suggestions come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionSource {
    /// Ask the store's categorisation endpoint
    #[default]
    Remote,
    /// Use the built-in keyword rules (no network)
    Keywords,
}

/// User settings for fintrack
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Base URL of the REST expense store
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// User the store scopes listings to
    #[serde(default)]
    pub user_id: Option<String>,

    /// Per-request timeout, in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Default suggestion source for `suggest` and `expenses add`
    #[serde(default)]
    pub suggestion_source: SuggestionSource,

    /// Currency symbol used when printing amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Log filter used when neither RUST_LOG nor -v is given
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_api_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_currency() -> String {
    "€".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            api_base_url: default_api_base_url(),
            user_id: None,
            request_timeout_secs: default_request_timeout_secs(),
            suggestion_source: SuggestionSource::default(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            log_level: default_log_level(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or fall back to defaults if the file doesn't exist
    pub fn load_or_default(paths: &FintrackPaths) -> Result<Self, FinanceError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| FinanceError::Io(format!("Failed to read settings file: {}", e)))?;

        let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
            FinanceError::Config(format!("Failed to parse settings file: {}", e))
        })?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &FintrackPaths) -> Result<(), FinanceError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            FinanceError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| FinanceError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Update one setting by its file key, validating the result
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), FinanceError> {
        let value = value.trim();
        let mut updated = self.clone();
        match key {
            "api_base_url" => updated.api_base_url = value.trim_end_matches('/').to_string(),
            "user_id" => {
                updated.user_id = if value.is_empty() {
                    None
                } else {
                    Some(value.to_string())
                }
            }
            "request_timeout_secs" => {
                updated.request_timeout_secs = value.parse().map_err(|_| {
                    FinanceError::Config(format!("request_timeout_secs must be a number, got '{}'", value))
                })?
            }
            "suggestion_source" => {
                updated.suggestion_source = match value.to_lowercase().as_str() {
                    "remote" => SuggestionSource::Remote,
                    "keywords" => SuggestionSource::Keywords,
                    _ => {
                        return Err(FinanceError::Config(format!(
                            "suggestion_source must be 'remote' or 'keywords', got '{}'",
                            value
                        )))
                    }
                }
            }
            "currency_symbol" => updated.currency_symbol = value.to_string(),
            "date_format" => updated.date_format = value.to_string(),
            "log_level" => updated.log_level = value.to_string(),
            _ => return Err(FinanceError::Config(format!("Unknown setting '{}'", key))),
        }
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Reject settings the client cannot work with
    pub fn validate(&self) -> Result<(), FinanceError> {
        let url = self.api_base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(FinanceError::Config(format!(
                "api_base_url must start with http:// or https://, got '{}'",
                self.api_base_url
            )));
        }
        if self.request_timeout_secs == 0 {
            return Err(FinanceError::Config(
                "request_timeout_secs must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.api_base_url, "http://localhost:5000");
        assert_eq!(settings.request_timeout_secs, 10);
        assert_eq!(settings.suggestion_source, SuggestionSource::Remote);
        assert!(settings.user_id.is_none());
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FintrackPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.user_id = Some("user-42".into());
        settings.suggestion_source = SuggestionSource::Keywords;
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_default(&paths).unwrap();
        assert_eq!(loaded.user_id.as_deref(), Some("user-42"));
        assert_eq!(loaded.suggestion_source, SuggestionSource::Keywords);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FintrackPaths::with_base_dir(temp_dir.path().to_path_buf());

        let loaded = Settings::load_or_default(&paths).unwrap();
        assert_eq!(loaded.currency_symbol, "€");
    }

    #[test]
    fn test_set_known_keys() {
        let mut settings = Settings::default();
        settings.set("user_id", " user-7 ").unwrap();
        settings.set("suggestion_source", "Keywords").unwrap();
        settings.set("api_base_url", "https://api.example.com/").unwrap();
        assert_eq!(settings.user_id.as_deref(), Some("user-7"));
        assert_eq!(settings.suggestion_source, SuggestionSource::Keywords);
        assert_eq!(settings.api_base_url, "https://api.example.com");

        settings.set("user_id", "").unwrap();
        assert!(settings.user_id.is_none());
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut settings = Settings::default();
        assert!(settings.set("colour", "blue").is_err());
        assert!(settings.set("request_timeout_secs", "0").is_err());
        assert!(settings.set("api_base_url", "localhost").is_err());
        // A rejected update leaves the settings untouched
        assert_eq!(settings.request_timeout_secs, 10);
        assert_eq!(settings.api_base_url, "http://localhost:5000");
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FintrackPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(
            paths.settings_file(),
            r#"{"api_base_url": "https://budget.example.com"}"#,
        )
        .unwrap();

        let loaded = Settings::load_or_default(&paths).unwrap();
        assert_eq!(loaded.api_base_url, "https://budget.example.com");
        assert_eq!(loaded.request_timeout_secs, 10);
        assert_eq!(loaded.log_level, "warn");
    }

    #[test]
    fn test_rejects_bad_url() {
        let settings = Settings {
            api_base_url: "localhost:5000".into(),
            ..Settings::default()
        };
        assert!(matches!(settings.validate(), Err(FinanceError::Config(_))));
    }

    #[test]
    fn test_rejects_corrupt_file() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FintrackPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), "{not json").unwrap();

        let err = Settings::load_or_default(&paths).unwrap_err();
        assert!(matches!(err, FinanceError::Config(_)));
    }
}
