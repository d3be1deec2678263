use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum ConfigError {
    #[error("Invalid zone directory: {0}")]
    InvalidZoneDir(String),

    #[error("Invalid reload interval: {0}")]
    InvalidReloadInterval(String),
}
