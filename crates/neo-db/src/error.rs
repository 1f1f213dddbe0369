//! Error types for the NEO database

use thiserror::Error;

/// Result type alias for NEO database operations
pub type Result<T> = std::result::Result<T, Error>;

/// NEO database errors
#[derive(Debug, Error)]
pub enum Error {
    /// A required field is absent from a raw record
    #[error("Record {record}: missing required key '{key}'")]
    MissingKey { record: String, key: String },

    /// A field is present but cannot be coerced to its expected type
    #[error("Record {record}: malformed value '{value}' for key '{key}': {reason}")]
    MalformedRecord {
        record: String,
        key: String,
        value: String,
        reason: String,
    },

    /// Two NEO records share a designation and duplicates are rejected
    #[error("Duplicate NEO designation: {0}")]
    DuplicateDesignation(String),

    /// Output path has an extension no writer handles
    #[error("Unsupported output format: {0}")]
    UnsupportedOutput(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl Error {
    /// Create a missing key error
    pub fn missing_key(record: impl Into<String>, key: impl Into<String>) -> Self {
        Self::MissingKey {
            record: record.into(),
            key: key.into(),
        }
    }

    /// Create a malformed record error
    pub fn malformed(
        record: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
        reason: impl ToString,
    ) -> Self {
        Self::MalformedRecord {
            record: record.into(),
            key: key.into(),
            value: value.into(),
            reason: reason.to_string(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_record() {
        let err = Error::missing_key("neos.csv row 3", "pdes");
        assert_eq!(err.to_string(), "Record neos.csv row 3: missing required key 'pdes'");

        let err = Error::malformed("cad.json row 7", "dist", "far", "invalid float literal");
        assert!(err.to_string().contains("'far'"));
        assert!(err.to_string().contains("dist"));

        let err = Error::DuplicateDesignation("433".into());
        assert!(err.to_string().contains("433"));
    }
}
