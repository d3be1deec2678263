use super::record::Record;
use super::zone::Zone;
use super::{Result, constants};
use crate::dns::DNSResourceType;
use dashmap::DashMap;
use std::sync::Arc;
use tracing::{debug, info};

/// Registry of published zones, keyed by zone name.
///
/// Each entry is an `Arc<Zone>` that is replaced whole on reload, so a
/// reader holding a zone keeps a consistent (possibly stale) view while the
/// reloader swaps in a new one.
pub struct ZoneStore {
    zones: DashMap<String, Arc<Zone>>,
}

impl ZoneStore {
    /// Create a store holding only the reserved self-description zone.
    ///
    /// The reserved zone exists before any reloader can see the store and
    /// is never pruned.
    pub fn new() -> Result<Self> {
        let store = Self::empty();
        store.publish(Zone::reserved()?);
        Ok(store)
    }

    /// Create a store without the reserved zone
    pub fn empty() -> Self {
        Self {
            zones: DashMap::new(),
        }
    }

    /// Publish a zone under its origin, replacing any previous entry.
    /// Returns the replaced zone.
    pub fn publish(&self, zone: Zone) -> Option<Arc<Zone>> {
        let origin = zone.origin.clone();
        debug!("Publishing zone: {}", origin);
        self.zones.insert(origin, Arc::new(zone))
    }

    /// Remove a zone from the store
    pub fn remove(&self, origin: &str) -> Option<Arc<Zone>> {
        self.zones.remove(origin).map(|(_, zone)| zone)
    }

    /// Get a zone by exact name
    pub fn get(&self, origin: &str) -> Option<Arc<Zone>> {
        self.zones.get(origin).map(|entry| Arc::clone(entry.value()))
    }

    pub fn contains(&self, origin: &str) -> bool {
        self.zones.contains_key(origin)
    }

    /// Find the zone that is authoritative for a query name
    pub fn find_zone(&self, qname: &str) -> Option<Arc<Zone>> {
        // Longest matching origin wins
        self.zones
            .iter()
            .filter(|entry| entry.value().is_authoritative_for(qname))
            .max_by_key(|entry| entry.value().len_labels)
            .map(|entry| Arc::clone(entry.value()))
    }

    /// Records of one type at a label in serving order. Empty when the zone,
    /// label or type is unknown.
    pub fn records(&self, origin: &str, label: &str, rtype: DNSResourceType) -> Vec<Record> {
        self.get(origin)
            .and_then(|zone| zone.label(label).map(|l| l.records(rtype).to_vec()))
            .unwrap_or_default()
    }

    /// Drop every zone for which `keep` returns false, except the reserved
    /// zone. Returns the removed names.
    pub fn prune<F>(&self, mut keep: F) -> Vec<String>
    where
        F: FnMut(&str) -> bool,
    {
        let mut removed = Vec::new();
        self.zones.retain(|name, zone| {
            if name == constants::RESERVED_ZONE || keep(name) {
                return true;
            }
            info!("Removing zone {} {}", name, zone.origin);
            removed.push(name.clone());
            false
        });
        removed.sort();
        removed
    }

    /// Get all zone names, sorted
    pub fn zone_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.zones.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    /// Get statistics for all zones
    pub fn stats(&self) -> StoreStats {
        let mut stats = StoreStats {
            zone_count: self.zones.len(),
            ..Default::default()
        };

        for entry in self.zones.iter() {
            let zone = entry.value();
            if zone.is_placeholder() {
                stats.placeholder_zones += 1;
            }
            let zone_stats = zone.stats();
            stats.total_labels += zone_stats.labels;
            stats.total_records += zone_stats.records;
        }

        stats
    }
}

/// Store statistics
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct StoreStats {
    pub zone_count: usize,
    pub placeholder_zones: usize,
    pub total_labels: usize,
    pub total_records: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zone::ZoneParser;
    use std::time::SystemTime;

    fn example_zone(origin: &str) -> Zone {
        ZoneParser::new(origin)
            .parse(r#"{"data": {"": {"ns": "ns1.example.net"}, "www": {"a": [["192.0.2.1", 1], ["192.0.2.2", 3]]}}}"#)
            .unwrap()
    }

    #[test]
    fn test_reserved_zone_seeded() {
        let store = ZoneStore::new().unwrap();
        assert_eq!(store.zone_names(), vec![constants::RESERVED_ZONE.to_string()]);
        assert!(store.get(constants::RESERVED_ZONE).unwrap().soa().is_some());
        assert!(ZoneStore::empty().is_empty());
    }

    #[test]
    fn test_publish_replaces_whole_zone() {
        let store = ZoneStore::empty();
        assert!(store.publish(example_zone("example.com")).is_none());

        let held = store.get("example.com").unwrap();
        let replaced = store
            .publish(Zone::placeholder("example.com", SystemTime::now()))
            .unwrap();

        // The reader's zone is untouched by the swap
        assert!(Arc::ptr_eq(&held, &replaced));
        assert!(!held.is_placeholder());
        assert!(store.get("example.com").unwrap().is_placeholder());
    }

    #[test]
    fn test_records_lookup() {
        let store = ZoneStore::empty();
        store.publish(example_zone("example.com"));

        let records = store.records("example.com", "www", DNSResourceType::A);
        let weights: Vec<u32> = records.iter().map(|r| r.weight).collect();
        assert_eq!(weights, vec![3, 1]);

        assert!(store.records("example.com", "www", DNSResourceType::AAAA).is_empty());
        assert!(store.records("example.com", "ftp", DNSResourceType::A).is_empty());
        assert!(store.records("example.org", "www", DNSResourceType::A).is_empty());
    }

    #[test]
    fn test_find_zone_longest_match() {
        let store = ZoneStore::empty();
        store.publish(example_zone("example.com"));
        store.publish(example_zone("geo.example.com"));

        assert_eq!(store.find_zone("www.example.com").unwrap().origin, "example.com");
        assert_eq!(
            store.find_zone("us.geo.example.com.").unwrap().origin,
            "geo.example.com"
        );
        assert!(store.find_zone("example.org").is_none());
    }

    #[test]
    fn test_prune_keeps_reserved() {
        let store = ZoneStore::new().unwrap();
        store.publish(example_zone("example.com"));
        store.publish(example_zone("example.net"));

        let removed = store.prune(|name| name == "example.net");
        assert_eq!(removed, vec!["example.com".to_string()]);
        assert!(store.contains(constants::RESERVED_ZONE));
        assert!(store.contains("example.net"));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_stats() {
        let store = ZoneStore::empty();
        store.publish(example_zone("example.com"));
        store.publish(Zone::placeholder("broken.com", SystemTime::now()));

        let stats = store.stats();
        assert_eq!(stats.zone_count, 2);
        assert_eq!(stats.placeholder_zones, 1);
        assert_eq!(stats.total_labels, 2);
        // ns + soa + 2 x a
        assert_eq!(stats.total_records, 4);
    }
}
