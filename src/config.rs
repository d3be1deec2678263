use crate::error::ConfigError;
use crate::zone::constants;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeoDnsConfig {
    /// Directory holding `<zone>.json` files
    pub zone_dir: PathBuf,

    /// How often the zone directory is rescanned
    pub reload_interval: Duration,

    /// tracing-subscriber filter directive (e.g. "info,geodns=debug")
    pub log_filter: String,
}

impl Default for GeoDnsConfig {
    fn default() -> Self {
        Self {
            zone_dir: PathBuf::from("dns/"),
            reload_interval: Duration::from_secs(constants::RELOAD_INTERVAL_SECS),
            log_filter: "info".to_string(),
        }
    }
}

impl GeoDnsConfig {
    /// Create a GeoDnsConfig from environment variables
    /// Returns Err if a variable is set but cannot be parsed. Range checks
    /// are left to [`validate`](Self::validate) so later overrides apply first.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source; `from_env` uses the process
    /// environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(zone_dir) = lookup("GEODNS_ZONE_DIR") {
            config.zone_dir = PathBuf::from(zone_dir);
        }

        if let Some(interval) = lookup("GEODNS_RELOAD_INTERVAL") {
            let secs: u64 = interval.trim().parse().map_err(|_| {
                ConfigError::InvalidReloadInterval(format!(
                    "'{}' is not a number of seconds",
                    interval
                ))
            })?;
            config.reload_interval = Duration::from_secs(secs);
        }

        if let Some(filter) = lookup("GEODNS_LOG") {
            config.log_filter = filter;
        }

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.zone_dir.as_os_str().is_empty() {
            return Err(ConfigError::InvalidZoneDir(
                "zone directory cannot be empty".to_string(),
            ));
        }

        if self.reload_interval.is_zero() {
            return Err(ConfigError::InvalidReloadInterval(
                "reload interval must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
