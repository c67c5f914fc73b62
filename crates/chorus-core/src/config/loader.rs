//! Top-level configuration file

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use super::{ConversationConfig, LoggingConfig};
use crate::error::{ChorusError, ChorusResult};

/// Complete Chorus configuration, as loaded from a TOML file
///
/// ```toml
/// storage_dir = "/var/lib/chorus/trees"
///
/// [conversation]
/// max_rounds = 5
/// timeout = "2m"
/// termination_words = ["TERMINATE"]
///
/// [logging]
/// level = "debug"
/// format = "json"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChorusConfig {
    /// Conversation loop settings
    pub conversation: ConversationConfig,
    /// Logging settings
    pub logging: LoggingConfig,
    /// Directory for persisted history trees (None = storage default)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_dir: Option<PathBuf>,
}

impl ChorusConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> ChorusResult<Self> {
        let config: ChorusConfig = toml::from_str(content)?;
        config.conversation.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> ChorusResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            ChorusError::config(format!("failed to read {}: {}", path.display(), e))
        })?;
        debug!(path = %path.display(), "loading configuration");
        Self::from_toml_str(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::time::Duration;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = ChorusConfig::from_toml_str("").unwrap();
        assert_eq!(config, ChorusConfig::default());
    }

    #[test]
    fn test_sections_override_defaults() {
        let config = ChorusConfig::from_toml_str(
            r#"
storage_dir = "/tmp/trees"

[conversation]
max_rounds = 5
timeout = "2m"
termination_words = ["STOP"]

[logging]
format = "json"
"#,
        )
        .unwrap();

        assert_eq!(config.conversation.max_rounds, 5);
        assert_eq!(config.conversation.timeout, Duration::from_secs(120));
        assert_eq!(config.conversation.termination_words, vec!["STOP"]);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.storage_dir, Some(PathBuf::from("/tmp/trees")));
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = ChorusConfig::from_toml_str("max_rounds = [").unwrap_err();
        assert_eq!(err.error_code(), "CHORUS_CONFIG");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[conversation]\nmax_messages = 7").unwrap();

        let config = ChorusConfig::load(file.path()).unwrap();
        assert_eq!(config.conversation.max_messages, 7);
    }

    #[test]
    fn test_load_missing_file() {
        let err = ChorusConfig::load("/nonexistent/chorus.toml").unwrap_err();
        assert!(matches!(err, ChorusError::Config { .. }));
    }
}
