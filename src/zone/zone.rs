use super::label::Label;
use super::record::Record;
use super::{Result, constants, soa};
use crate::dns::{self, DNSResourceType};
use std::collections::HashMap;
use std::time::SystemTime;

/// Zone-wide defaults, read from the top level of a zone document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneOptions {
    pub ttl: u32,
    /// Kept wide here; the SOA builder checks it fits 32 bits
    pub serial: i64,
    pub contact: String,
    pub max_hosts: u32,
}

impl Default for ZoneOptions {
    fn default() -> Self {
        Self {
            ttl: constants::DEFAULT_TTL,
            serial: 0,
            contact: constants::DEFAULT_CONTACT.to_string(),
            max_hosts: constants::DEFAULT_MAX_HOSTS,
        }
    }
}

/// A compiled DNS zone.
///
/// Zones are immutable once published to the [`ZoneStore`](super::ZoneStore);
/// a reload builds a new `Zone` and swaps it in whole.
#[derive(Debug, Clone)]
pub struct Zone {
    /// Zone name without trailing dot (e.g., "example.com")
    pub origin: String,
    pub options: ZoneOptions,
    /// Labels by name; "" is the zone root
    pub labels: HashMap<String, Label>,
    /// Number of labels in the origin
    pub len_labels: usize,
    /// Modification time of the file this zone was compiled from
    pub last_read: Option<SystemTime>,
}

impl Zone {
    /// Create an empty zone with default options
    pub fn new(origin: impl Into<String>) -> Self {
        let origin = origin.into().trim_end_matches('.').to_string();
        Self {
            len_labels: dns::count_labels(&origin),
            origin,
            options: ZoneOptions::default(),
            labels: HashMap::new(),
            last_read: None,
        }
    }

    /// Stand-in for a zone whose file failed to compile. It has no labels
    /// and remembers the file version so the file is only retried once it
    /// changes.
    pub fn placeholder(origin: impl Into<String>, last_read: SystemTime) -> Self {
        let mut zone = Self::new(origin);
        zone.last_read = Some(last_read);
        zone
    }

    /// Self-description zone served under [`constants::RESERVED_ZONE`]
    pub fn reserved() -> Result<Self> {
        let mut zone = Self::new(constants::RESERVED_ZONE);
        zone.options.serial = generate_serial();
        zone.add_label("");
        soa::setup_soa(&mut zone)?;
        Ok(zone)
    }

    /// Get a label, creating an empty one if it does not exist yet
    pub fn add_label(&mut self, name: &str) -> &mut Label {
        self.labels
            .entry(name.to_string())
            .or_insert_with(|| Label::new(name))
    }

    pub fn label(&self, name: &str) -> Option<&Label> {
        self.labels.get(name)
    }

    pub fn root(&self) -> Option<&Label> {
        self.labels.get("")
    }

    pub fn soa(&self) -> Option<&Record> {
        self.root().and_then(|root| root.first(DNSResourceType::SOA))
    }

    /// True for zones standing in for a file that failed to compile
    pub fn is_placeholder(&self) -> bool {
        self.labels.is_empty()
    }

    /// Check if this zone is authoritative for a given name
    pub fn is_authoritative_for(&self, qname: &str) -> bool {
        self.label_for(qname).is_some()
    }

    /// Map a query name to its label key within this zone.
    ///
    /// Returns `Some("")` for the zone apex and `None` for names outside
    /// the zone. Comparison is case-insensitive.
    pub fn label_for<'q>(&self, qname: &'q str) -> Option<&'q str> {
        let qname = qname.strip_suffix('.').unwrap_or(qname);
        let head = if self.origin.is_empty() {
            if qname.is_empty() {
                return Some("");
            }
            qname
        } else {
            let split = qname.len().checked_sub(self.origin.len())?;
            if !qname.is_char_boundary(split) {
                return None;
            }
            let (head, tail) = qname.split_at(split);
            if !tail.eq_ignore_ascii_case(&self.origin) {
                return None;
            }
            if head.is_empty() {
                return Some("");
            }
            head.strip_suffix('.')?
        };
        // Every label of the relative name must be non-empty
        if head.is_empty() || head.split('.').any(str::is_empty) {
            return None;
        }
        Some(head)
    }

    /// Find the label answering for a query name
    pub fn find_label(&self, qname: &str) -> Option<&Label> {
        let name = self.label_for(qname)?;
        self.labels
            .get(name)
            .or_else(|| self.labels.get(&name.to_ascii_lowercase()))
    }

    pub fn stats(&self) -> ZoneStats {
        let mut stats = ZoneStats {
            labels: self.labels.len(),
            ..Default::default()
        };
        for label in self.labels.values() {
            for records in label.records.values() {
                stats.records += records.len();
                stats.weighted_records += records.iter().filter(|r| r.weight > 0).count();
            }
        }
        stats
    }
}

/// Serial in YYYYMMDD00 form for zones built in code
fn generate_serial() -> i64 {
    use chrono::{Datelike, Utc};

    let now = Utc::now();
    i64::from(now.year()) * 1_000_000 + i64::from(now.month()) * 10_000 + i64::from(now.day()) * 100
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ZoneStats {
    pub labels: usize,
    pub records: usize,
    pub weighted_records: usize,
}
