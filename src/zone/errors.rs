use std::path::PathBuf;
use thiserror::Error;

/// Zone-related errors
#[derive(Error, Debug)]
pub enum ZoneError {
    /// A scalar could not be coerced into an integer
    #[error("Can't convert {value} to integer: {reason}")]
    ConfigValue { value: String, reason: String },

    /// A record's raw shape did not match its kind
    #[error("Invalid {kind} record for label '{label}': {reason}")]
    RecordFormat {
        label: String,
        kind: &'static str,
        reason: String,
    },

    /// The document is not valid JSON
    #[error(
        "error parsing JSON object in config file {file}:\nError at line {line}, column {column} (file offset {offset}):\n{excerpt}\n{message}"
    )]
    ZoneSyntax {
        file: String,
        line: usize,
        column: usize,
        offset: usize,
        excerpt: String,
        message: String,
    },

    /// The document is valid JSON but not a usable zone
    #[error("Zone error: {0}")]
    ZoneSemantic(String),

    /// The zone file itself could not be read
    #[error("Could not read {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The watched directory could not be listed
    #[error("Could not read {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ZoneError {
    pub(crate) fn config_value(value: &serde_json::Value, reason: impl Into<String>) -> Self {
        ZoneError::ConfigValue {
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn record_format(label: &str, kind: &'static str, reason: impl Into<String>) -> Self {
        ZoneError::RecordFormat {
            label: label.to_string(),
            kind,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ZoneError>;
