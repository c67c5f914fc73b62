//! From trait implementations for ChorusError conversions

use super::types::ChorusError;

impl From<std::io::Error> for ChorusError {
    fn from(error: std::io::Error) -> Self {
        Self::io(error.to_string())
    }
}

impl From<serde_json::Error> for ChorusError {
    fn from(error: serde_json::Error) -> Self {
        Self::json(error.to_string())
    }
}

impl From<toml::de::Error> for ChorusError {
    fn from(error: toml::de::Error) -> Self {
        Self::config(error.to_string())
    }
}
