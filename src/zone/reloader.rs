use super::parser::ZoneParser;
use super::store::ZoneStore;
use super::zone::Zone;
use super::{Result, ZoneError, constants};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

/// Outcome of one pass over the zone directory
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReloadSummary {
    /// Zones compiled and published this pass
    pub loaded: Vec<String>,
    /// Zones whose file failed to compile; each now has a placeholder
    pub failed: Vec<String>,
    /// Zones removed because their file is gone
    pub removed: Vec<String>,
    /// Zone files seen whose compiled version is current
    pub unchanged: usize,
}

impl ReloadSummary {
    pub fn has_changes(&self) -> bool {
        !(self.loaded.is_empty() && self.failed.is_empty() && self.removed.is_empty())
    }
}

/// Polls a directory of `<zone>.json` files and keeps a [`ZoneStore`] in
/// step with it.
#[derive(Clone)]
pub struct ZoneReloader {
    dir: PathBuf,
    store: Arc<ZoneStore>,
    interval: Duration,
}

impl ZoneReloader {
    pub fn new(dir: impl Into<PathBuf>, store: Arc<ZoneStore>) -> Self {
        Self {
            dir: dir.into(),
            store,
            interval: Duration::from_secs(constants::RELOAD_INTERVAL_SECS),
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn store(&self) -> &Arc<ZoneStore> {
        &self.store
    }

    /// Run one reload cycle.
    ///
    /// A file is compiled when its zone is unknown or the file is newer
    /// than the compiled version. A file that fails to compile is replaced
    /// by an empty placeholder stamped with the file's modification time,
    /// so it is not retried until it changes again. Zones whose file has
    /// disappeared are removed, except the reserved zone.
    ///
    /// Only a failure to list the directory is returned as an error; the
    /// store is left untouched in that case.
    pub fn reload_once(&self) -> Result<ReloadSummary> {
        let entries = fs::read_dir(&self.dir).map_err(|source| ZoneError::DirectoryRead {
            path: self.dir.clone(),
            source,
        })?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| ZoneError::DirectoryRead {
                path: self.dir.clone(),
                source,
            })?;
            let file_name = entry.file_name().to_string_lossy().into_owned();
            if let Some(zone_name) = zone_name_from_file(&file_name) {
                let zone_name = zone_name.to_string();
                files.push((file_name, zone_name));
            }
        }
        files.sort();

        let mut summary = ReloadSummary::default();
        let mut seen = HashSet::new();

        for (file_name, zone_name) in files {
            let path = self.dir.join(&file_name);
            seen.insert(zone_name.clone());

            let modified = match fs::metadata(&path) {
                Ok(meta) if meta.is_file() => match meta.modified() {
                    Ok(modified) => modified,
                    Err(e) => {
                        error!("Could not read modification time of {}: {}", path.display(), e);
                        continue;
                    }
                },
                Ok(_) => {
                    debug!("Skipping {}: not a regular file", path.display());
                    seen.remove(&zone_name);
                    continue;
                }
                Err(e) => {
                    error!("Could not stat {}: {}", path.display(), e);
                    continue;
                }
            };

            let current = self.store.get(&zone_name);
            match current.as_ref().and_then(|zone| zone.last_read) {
                Some(last_read) if modified <= last_read => {
                    summary.unchanged += 1;
                    continue;
                }
                _ => {}
            }

            if current.is_some() {
                info!("Reloading {}", file_name);
            } else {
                info!("Reading new file {}", file_name);
            }

            if self.load_file(&zone_name, &path, modified) {
                summary.loaded.push(zone_name);
            } else {
                summary.failed.push(zone_name);
            }
        }

        summary.removed = self.store.prune(|name| seen.contains(name));

        debug!(
            "Reload of {} done: {} loaded, {} failed, {} removed, {} unchanged",
            self.dir.display(),
            summary.loaded.len(),
            summary.failed.len(),
            summary.removed.len(),
            summary.unchanged
        );
        Ok(summary)
    }

    /// Compile one file and publish the result or a placeholder.
    /// Returns whether compilation succeeded.
    fn load_file(&self, zone_name: &str, path: &Path, modified: SystemTime) -> bool {
        match ZoneParser::new(zone_name).parse_file(path) {
            Ok(mut zone) => {
                zone.last_read = Some(modified);
                let stats = zone.stats();
                info!(
                    "Loaded zone {} ({} labels, {} records, modified {})",
                    zone_name,
                    stats.labels,
                    stats.records,
                    format_time(modified)
                );
                self.store.publish(zone);
                true
            }
            Err(e) => {
                error!("Reading {} failed: {}", path.display(), e);
                self.store.publish(Zone::placeholder(zone_name, modified));
                false
            }
        }
    }

    /// Reload forever on the configured interval.
    ///
    /// Each cycle runs on the blocking pool; errors are logged and the loop
    /// carries on with the next tick.
    pub async fn run(self) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;

            let reloader = self.clone();
            match tokio::task::spawn_blocking(move || reloader.reload_once()).await {
                Ok(Ok(summary)) if summary.has_changes() => {
                    debug!("Zone changes: {:?}", summary);
                }
                Ok(Ok(_)) => {}
                Ok(Err(e)) => error!("{}", e),
                Err(e) => warn!("Reload task failed: {}", e),
            }
        }
    }

    /// Spawn [`run`](Self::run) on the current runtime
    pub fn spawn(self) -> JoinHandle<()> {
        info!(
            "Watching {} for zone files every {:?}",
            self.dir.display(),
            self.interval
        );
        tokio::spawn(self.run())
    }
}

/// Zone name for a `*.json` file name (extension matched case-insensitively).
///
/// Trailing dots are dropped so the name matches the origin the zone is
/// published under.
pub fn zone_name_from_file(file_name: &str) -> Option<&str> {
    let (stem, extension) = file_name.rsplit_once('.')?;
    let stem = stem.trim_end_matches('.');
    if stem.is_empty() || !extension.eq_ignore_ascii_case(constants::ZONE_FILE_EXTENSION) {
        return None;
    }
    Some(stem)
}

fn format_time(time: SystemTime) -> String {
    chrono::DateTime::<chrono::Utc>::from(time).to_rfc3339()
}
