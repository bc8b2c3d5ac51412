//! Runtime configuration for auto-tagging.

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

/// Environment variable controlling [`AutotagConfig::only_qualified_performers`].
pub const ONLY_QUALIFIED_ENV: &str = "AUTOTAG_ONLY_QUALIFIED";

/// Settings read once per tagging pass and passed explicitly to the matcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutotagConfig {
    /// When set, only qualified names and aliases may produce a match.
    pub only_qualified_performers: bool,
}

impl Default for AutotagConfig {
    fn default() -> Self {
        Self {
            only_qualified_performers: true,
        }
    }
}

impl AutotagConfig {
    /// Builds the configuration from the process environment.
    ///
    /// Unset variables fall back to the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set to a value that is not a boolean.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        if let Ok(raw) = std::env::var(ONLY_QUALIFIED_ENV) {
            config.only_qualified_performers = parse_bool(&raw).ok_or_else(|| {
                anyhow::anyhow!("{ONLY_QUALIFIED_ENV} must be a boolean, got '{raw}'")
            })?;
        }
        Ok(config)
    }

    /// Returns a copy with the qualification gate overridden, if given.
    #[must_use]
    pub fn with_only_qualified(mut self, only_qualified: Option<bool>) -> Self {
        if let Some(value) = only_qualified {
            self.only_qualified_performers = value;
        }
        self
    }
}

/// Parses the boolean spellings accepted in configuration values.
pub fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Parses a boolean CLI argument.
pub fn parse_bool_arg(raw: &str) -> Result<bool> {
    match parse_bool(raw) {
        Some(value) => Ok(value),
        None => bail!("expected a boolean, got '{raw}'"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn default_requires_qualified_names() {
        assert!(AutotagConfig::default().only_qualified_performers);
    }

    #[test]
    fn parse_bool_accepts_common_spellings() {
        for raw in ["true", "TRUE", " 1 ", "yes", "On"] {
            assert_eq!(parse_bool(raw), Some(true), "{raw}");
        }
        for raw in ["false", "0", "No", "off"] {
            assert_eq!(parse_bool(raw), Some(false), "{raw}");
        }
        assert_eq!(parse_bool("maybe"), None);
        assert!(parse_bool_arg("").is_err());
    }

    #[test]
    #[serial]
    fn from_env_reads_flag() {
        unsafe { std::env::set_var(ONLY_QUALIFIED_ENV, "false") };
        let config = AutotagConfig::from_env();
        unsafe { std::env::remove_var(ONLY_QUALIFIED_ENV) };

        assert!(!config.unwrap().only_qualified_performers);
    }

    #[test]
    #[serial]
    fn from_env_defaults_when_unset() {
        unsafe { std::env::remove_var(ONLY_QUALIFIED_ENV) };
        assert_eq!(AutotagConfig::from_env().unwrap(), AutotagConfig::default());
    }

    #[test]
    #[serial]
    fn from_env_rejects_garbage() {
        unsafe { std::env::set_var(ONLY_QUALIFIED_ENV, "sometimes") };
        let result = AutotagConfig::from_env();
        unsafe { std::env::remove_var(ONLY_QUALIFIED_ENV) };

        let err = result.unwrap_err();
        assert!(err.to_string().contains("sometimes"));
    }

    #[test]
    fn override_takes_precedence() {
        let config = AutotagConfig::default();
        assert!(!config.with_only_qualified(Some(false)).only_qualified_performers);
        assert!(config.with_only_qualified(None).only_qualified_performers);
    }

    #[test]
    fn deserializes_with_missing_fields() {
        let config: AutotagConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, AutotagConfig::default());

        let config: AutotagConfig =
            serde_json::from_str(r#"{"only_qualified_performers": false}"#).unwrap();
        assert!(!config.only_qualified_performers);
    }
}
