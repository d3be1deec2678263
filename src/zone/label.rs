use super::record::{Record, RecordContext, RecordKind};
use super::value::value_to;
use super::zone::ZoneOptions;
use super::{Result, ZoneError};
use crate::dns::DNSResourceType;
use serde_json::Value;
use std::collections::HashMap;
use tracing::trace;

/// One name within a zone and the records served for it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Label {
    pub name: String,
    /// 0 means "use the zone default"
    pub ttl: u32,
    /// 0 means "use the zone default"
    pub max_hosts: u32,
    /// Records per type, weight-ordered
    pub records: HashMap<DNSResourceType, Vec<Record>>,
    /// Sum of record weights per type
    pub weight: HashMap<DNSResourceType, u64>,
}

impl Label {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Compile one label object of a zone document.
    ///
    /// Keys other than the record kinds and `ttl`/`max_hosts` are ignored.
    pub fn compile(name: &str, raw: &Value, origin: &str, options: &ZoneOptions) -> Result<Label> {
        let fields = raw.as_object().ok_or_else(|| {
            ZoneError::ZoneSemantic(format!("label '{}' in {} is not an object", name, origin))
        })?;

        let mut label = Label::new(name);

        if let Some(ttl) = fields.get("ttl") {
            label.ttl = value_to(ttl)?;
        }
        if let Some(max_hosts) = fields.get("max_hosts") {
            label.max_hosts = value_to(max_hosts)?;
        }

        let ctx = RecordContext {
            origin,
            label: name,
            ttl: label.effective_ttl(options),
        };

        for kind in RecordKind::ALL {
            let raw = match fields.get(kind.key()) {
                None | Some(Value::Null) => continue,
                Some(raw) => raw,
            };

            let records = kind
                .entries(name, raw)?
                .iter()
                .map(|entry| kind.build(entry, &ctx))
                .collect::<Result<Vec<_>>>()?;

            trace!(
                "{} {} record(s) for label '{}' in {}",
                records.len(),
                kind.rtype(),
                name,
                origin
            );
            label.set_records(kind.rtype(), records);
        }

        Ok(label)
    }

    /// Store the records for one type, ordering them by descending weight
    /// when any of them is weighted.
    pub fn set_records(&mut self, rtype: DNSResourceType, mut records: Vec<Record>) {
        let sum: u64 = records.iter().map(|r| u64::from(r.weight)).sum();
        if sum > 0 {
            // stable: equal weights keep their written order
            records.sort_by(|a, b| b.weight.cmp(&a.weight));
        }
        self.weight.insert(rtype, sum);
        self.records.insert(rtype, records);
    }

    /// Records of one type in serving order; empty if there are none
    pub fn records(&self, rtype: DNSResourceType) -> &[Record] {
        self.records.get(&rtype).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn first(&self, rtype: DNSResourceType) -> Option<&Record> {
        self.records(rtype).first()
    }

    pub fn weight_sum(&self, rtype: DNSResourceType) -> u64 {
        self.weight.get(&rtype).copied().unwrap_or(0)
    }

    pub fn effective_ttl(&self, options: &ZoneOptions) -> u32 {
        if self.ttl > 0 { self.ttl } else { options.ttl }
    }

    pub fn effective_max_hosts(&self, options: &ZoneOptions) -> u32 {
        if self.max_hosts > 0 {
            self.max_hosts
        } else {
            options.max_hosts
        }
    }

    pub fn is_empty(&self) -> bool {
        self.records.values().all(Vec::is_empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn compile(raw: Value) -> Result<Label> {
        Label::compile("www", &raw, "example.com", &ZoneOptions::default())
    }

    fn weights(label: &Label, rtype: DNSResourceType) -> Vec<u32> {
        label.records(rtype).iter().map(|r| r.weight).collect()
    }

    #[test]
    fn test_weighted_records_sorted_descending() {
        let label = compile(json!({
            "a": [["192.0.2.1", 5], ["192.0.2.2", 0], ["192.0.2.3", 10]]
        }))
        .unwrap();
        assert_eq!(weights(&label, DNSResourceType::A), vec![10, 5, 0]);
        assert_eq!(label.weight_sum(DNSResourceType::A), 15);
        assert_eq!(
            label.first(DNSResourceType::A).unwrap().rr.rdata.to_string(),
            "192.0.2.3"
        );
    }

    #[test]
    fn test_ties_keep_written_order() {
        let label = compile(json!({
            "a": [["192.0.2.1", 1], ["192.0.2.2", 5], ["192.0.2.3", 1], ["192.0.2.4", 5]]
        }))
        .unwrap();
        let order: Vec<String> = label
            .records(DNSResourceType::A)
            .iter()
            .map(|r| r.rr.rdata.to_string())
            .collect();
        assert_eq!(order, vec!["192.0.2.2", "192.0.2.4", "192.0.2.1", "192.0.2.3"]);
    }

    #[test]
    fn test_unweighted_keeps_insertion_order() {
        let label = compile(json!({
            "a": [["192.0.2.9"], ["192.0.2.1"], ["192.0.2.5"]]
        }))
        .unwrap();
        let order: Vec<String> = label
            .records(DNSResourceType::A)
            .iter()
            .map(|r| r.rr.rdata.to_string())
            .collect();
        assert_eq!(order, vec!["192.0.2.9", "192.0.2.1", "192.0.2.5"]);
        assert_eq!(label.weight_sum(DNSResourceType::A), 0);
    }

    #[test]
    fn test_label_overrides() {
        let options = ZoneOptions::default();
        let label = compile(json!({"ttl": "300", "max_hosts": 1, "a": [["192.0.2.1"]]})).unwrap();
        assert_eq!(label.effective_ttl(&options), 300);
        assert_eq!(label.effective_max_hosts(&options), 1);
        assert_eq!(label.records(DNSResourceType::A)[0].rr.ttl, 300);

        let label = compile(json!({"a": [["192.0.2.1"]]})).unwrap();
        assert_eq!(label.effective_ttl(&options), options.ttl);
        assert_eq!(label.effective_max_hosts(&options), options.max_hosts);
        assert_eq!(label.records(DNSResourceType::A)[0].rr.ttl, options.ttl);
    }

    #[test]
    fn test_all_kinds_and_unknown_keys() {
        let label = compile(json!({
            "a": [["192.0.2.1", 10], ["192.0.2.2", 5]],
            "aaaa": [["2001:db8::1"]],
            "ns": "ns1.example.com",
            "cname": "target",
            "mx": {"mx": "mail.example.com", "preference": 10, "weight": 1},
            "alias": "internal-target",
            "txt": "ignored",
            "geo": {"whatever": true}
        }))
        .unwrap();
        for rtype in [
            DNSResourceType::A,
            DNSResourceType::AAAA,
            DNSResourceType::NS,
            DNSResourceType::CNAME,
            DNSResourceType::MX,
            DNSResourceType::MF,
        ] {
            assert!(!label.records(rtype).is_empty(), "missing {}", rtype);
        }
        assert_eq!(label.records.len(), 6);
        assert!(label.records(DNSResourceType::SOA).is_empty());
    }

    #[test]
    fn test_bad_record_fails_label() {
        let result = compile(json!({"a": [["192.0.2.1"], ["not-an-ip"]]}));
        assert!(matches!(result, Err(ZoneError::RecordFormat { .. })));

        let result = compile(json!({"ttl": "soon"}));
        assert!(matches!(result, Err(ZoneError::ConfigValue { .. })));

        let result = compile(json!(["192.0.2.1"]));
        assert!(matches!(result, Err(ZoneError::ZoneSemantic(_))));
    }

    #[test]
    fn test_null_kind_is_absent() {
        let label = compile(json!({"a": null, "ns": null})).unwrap();
        assert!(label.is_empty());
    }
}
