#![forbid(unsafe_code)]

//! Dialog defaults.
//!
//! [`DialogsConfig`] supplies the initial payloads that stateful dialogs
//! start from and reset to on `clear()`. With the `config` feature it can be
//! read from TOML:
//!
//! ```toml
//! in_app_browser_consent_initial = "https://example.com/welcome"
//!
//! [link_warning_initial]
//! href = "https://example.com"
//! display_text = "Example"
//! ```
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | Unreadable file | Missing path, permissions | `ConfigError::Io` |
//! | Bad TOML | Syntax or type mismatch | `ConfigError::Parse` |
//! | Missing keys | Partial file | Field falls back to `None` |

use crate::registry::LinkWarning;

/// Initial payloads for the stateful dialogs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "config", serde(default, deny_unknown_fields))]
pub struct DialogsConfig {
    /// Initial URL of the in-app browser consent dialog.
    pub in_app_browser_consent_initial: Option<String>,
    /// Initial payload of the link-warning dialog.
    pub link_warning_initial: Option<LinkWarning>,
}

/// Errors from loading a [`DialogsConfig`].
#[cfg(feature = "config")]
#[derive(Debug)]
pub enum ConfigError {
    /// The file could not be read.
    Io(std::io::Error),
    /// The contents were not a valid dialogs config.
    Parse(String),
}

#[cfg(feature = "config")]
impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "failed to read dialogs config: {err}"),
            Self::Parse(msg) => write!(f, "invalid dialogs config: {msg}"),
        }
    }
}

#[cfg(feature = "config")]
impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(_) => None,
        }
    }
}

#[cfg(feature = "config")]
impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

#[cfg(feature = "config")]
impl DialogsConfig {
    /// Parse a config from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|err| ConfigError::Parse(err.to_string()))
    }

    /// Read and parse a TOML config file.
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), "loaded dialogs config");
        Ok(config)
    }
}

#[cfg(all(test, feature = "config"))]
mod tests {
    use super::*;

    #[test]
    fn empty_text_is_default() {
        let config = DialogsConfig::from_toml_str("").unwrap();
        assert_eq!(config, DialogsConfig::default());
    }

    #[test]
    fn parses_both_payloads() {
        let config = DialogsConfig::from_toml_str(
            r#"
in_app_browser_consent_initial = "https://example.com/welcome"

[link_warning_initial]
href = "https://example.com"
display_text = "Example"
share = true
"#,
        )
        .unwrap();
        assert_eq!(
            config.in_app_browser_consent_initial.as_deref(),
            Some("https://example.com/welcome")
        );
        assert_eq!(
            config.link_warning_initial,
            Some(LinkWarning::new("https://example.com", "Example").shared(true))
        );
    }

    #[test]
    fn unknown_key_is_parse_error() {
        let err = DialogsConfig::from_toml_str("bogus = 1").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().starts_with("invalid dialogs config"));
    }

    #[test]
    fn wrong_type_is_parse_error() {
        let err = DialogsConfig::from_toml_str("in_app_browser_consent_initial = 3").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
