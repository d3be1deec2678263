use super::value::value_to;
use super::{Result, ZoneError, constants};
use crate::dns::{self, DNSResource, DNSResourceData, DNSResourceType};
use serde_json::Value;
use std::net::{Ipv4Addr, Ipv6Addr};
use tracing::warn;

/// One compiled resource record and its selection weight
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub rr: DNSResource,
    /// 0 means unweighted
    pub weight: u32,
}

impl Record {
    pub fn new(rr: DNSResource, weight: u32) -> Self {
        Self { rr, weight }
    }

    pub fn rtype(&self) -> DNSResourceType {
        self.rr.rtype()
    }
}

/// Record kinds that can be written in a zone document
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum RecordKind {
    A,
    AAAA,
    NS,
    CNAME,
    MX,
    Alias,
}

/// Where a record is being built: the zone, the label and its effective TTL
#[derive(Debug, Clone, Copy)]
pub struct RecordContext<'a> {
    pub origin: &'a str,
    pub label: &'a str,
    pub ttl: u32,
}

impl RecordContext<'_> {
    /// Owner name of records at this label
    pub fn owner(&self) -> String {
        if self.label.is_empty() {
            dns::fqdn(self.origin)
        } else {
            dns::fqdn(&format!("{}.{}", self.label, self.origin))
        }
    }
}

impl RecordKind {
    pub const ALL: [RecordKind; 6] = [
        RecordKind::A,
        RecordKind::AAAA,
        RecordKind::NS,
        RecordKind::CNAME,
        RecordKind::MX,
        RecordKind::Alias,
    ];

    /// Key used for this kind inside a label object
    pub fn key(self) -> &'static str {
        match self {
            RecordKind::A => "a",
            RecordKind::AAAA => "aaaa",
            RecordKind::NS => "ns",
            RecordKind::CNAME => "cname",
            RecordKind::MX => "mx",
            RecordKind::Alias => "alias",
        }
    }

    pub fn rtype(self) -> DNSResourceType {
        match self {
            RecordKind::A => DNSResourceType::A,
            RecordKind::AAAA => DNSResourceType::AAAA,
            RecordKind::NS => DNSResourceType::NS,
            RecordKind::CNAME => DNSResourceType::CNAME,
            RecordKind::MX => DNSResourceType::MX,
            RecordKind::Alias => DNSResourceType::MF,
        }
    }

    /// Split the raw value of this kind into one value per record.
    ///
    /// A string is a single record, a sequence holds one record per element
    /// and a mapping is turned into `[key, value-or-""]` pairs. The one
    /// exception is a mapping carrying an `mx` key, which is a single MX
    /// record.
    pub fn entries(self, label: &str, raw: &Value) -> Result<Vec<Value>> {
        match raw {
            Value::String(_) => Ok(vec![raw.clone()]),
            Value::Array(items) => Ok(items.clone()),
            Value::Object(map) if self == RecordKind::MX && map.contains_key("mx") => {
                Ok(vec![raw.clone()])
            }
            Value::Object(map) => map
                .iter()
                .map(|(key, value)| {
                    let value = match value {
                        Value::Null => Value::String(String::new()),
                        Value::String(_) | Value::Number(_) => value.clone(),
                        _ => {
                            return Err(self.format_error(
                                label,
                                format!("unsupported value for '{}': {}", key, value),
                            ));
                        }
                    };
                    Ok(Value::Array(vec![Value::String(key.clone()), value]))
                })
                .collect(),
            _ => Err(self.format_error(label, format!("unsupported syntax: {}", raw))),
        }
    }

    /// Build one record of this kind from a single entry.
    pub fn build(self, entry: &Value, ctx: &RecordContext<'_>) -> Result<Record> {
        match self {
            RecordKind::A => self.build_address(entry, ctx),
            RecordKind::AAAA => self.build_address(entry, ctx),
            RecordKind::NS => self.build_ns(entry, ctx),
            RecordKind::CNAME => self.build_cname(entry, ctx),
            RecordKind::MX => self.build_mx(entry, ctx),
            RecordKind::Alias => self.build_alias(entry, ctx),
        }
    }

    fn build_address(self, entry: &Value, ctx: &RecordContext<'_>) -> Result<Record> {
        let (address, weight) = match entry {
            Value::String(s) => (s.as_str(), None),
            Value::Array(items) if matches!(items.len(), 1 | 2) => {
                let address = items[0].as_str().ok_or_else(|| {
                    self.format_error(ctx.label, format!("address must be a string: {}", items[0]))
                })?;
                (address, items.get(1))
            }
            _ => {
                return Err(self.format_error(
                    ctx.label,
                    format!("expected [address, weight], got {}", entry),
                ));
            }
        };

        let rdata = match self {
            RecordKind::A => address.parse::<Ipv4Addr>().map(DNSResourceData::A),
            _ => address.parse::<Ipv6Addr>().map(DNSResourceData::AAAA),
        }
        .map_err(|_| self.format_error(ctx.label, format!("bad address {}", address)))?;

        let weight = weight_of(weight)?;
        Ok(Record::new(DNSResource::new(ctx.owner(), ctx.ttl, rdata), weight))
    }

    fn build_ns(self, entry: &Value, ctx: &RecordContext<'_>) -> Result<Record> {
        let host = match entry {
            Value::String(s) => s.as_str(),
            Value::Array(items) if matches!(items.len(), 1 | 2) => {
                let host = items[0].as_str().ok_or_else(|| {
                    self.format_error(ctx.label, format!("host must be a string: {}", items[0]))
                })?;
                match items.get(1) {
                    None | Some(Value::Null) => {}
                    Some(Value::String(extra)) if extra.is_empty() => {}
                    Some(extra) => warn!(
                        "NS records with names syntax not supported, ignoring {} for {} in {}",
                        extra, host, ctx.origin
                    ),
                }
                host
            }
            _ => {
                return Err(self.format_error(
                    ctx.label,
                    format!("unrecognized NS format/syntax: {}", entry),
                ));
            }
        };

        if host.is_empty() {
            return Err(self.format_error(ctx.label, "empty nameserver name"));
        }

        // A floor, not an override
        let ttl = ctx.ttl.max(constants::NS_MIN_TTL);
        let rdata = DNSResourceData::NS(dns::fqdn(host));
        Ok(Record::new(DNSResource::new(ctx.owner(), ttl, rdata), 0))
    }

    fn build_cname(self, entry: &Value, ctx: &RecordContext<'_>) -> Result<Record> {
        let target = self.string_entry(entry, ctx)?;
        let target = if dns::is_fqdn(target) {
            target.to_string()
        } else {
            dns::fqdn(&format!("{}.{}", target, ctx.origin))
        };
        let rdata = DNSResourceData::CNAME(target);
        Ok(Record::new(DNSResource::new(ctx.owner(), ctx.ttl, rdata), 0))
    }

    fn build_mx(self, entry: &Value, ctx: &RecordContext<'_>) -> Result<Record> {
        let fields = entry.as_object().ok_or_else(|| {
            self.format_error(ctx.label, format!("expected an object, got {}", entry))
        })?;

        let exchange = match fields.get("mx") {
            Some(Value::String(mx)) if !mx.is_empty() => dns::fqdn(mx),
            Some(other) => {
                return Err(self.format_error(ctx.label, format!("bad mx host {}", other)));
            }
            None => return Err(self.format_error(ctx.label, "missing mx host")),
        };

        let preference = match fields.get("preference") {
            Some(Value::Null) | None => 0,
            Some(pref) => value_to::<u16>(pref)?,
        };
        let weight = weight_of(fields.get("weight"))?;

        let rdata = DNSResourceData::MX {
            preference,
            exchange,
        };
        Ok(Record::new(
            DNSResource::new(ctx.owner(), ctx.ttl, rdata),
            weight,
        ))
    }

    fn build_alias(self, entry: &Value, ctx: &RecordContext<'_>) -> Result<Record> {
        // Never qualified
        let target = self.string_entry(entry, ctx)?;
        let rdata = DNSResourceData::Alias(target.to_string());
        Ok(Record::new(DNSResource::new(ctx.owner(), ctx.ttl, rdata), 0))
    }

    fn string_entry<'v>(self, entry: &'v Value, ctx: &RecordContext<'_>) -> Result<&'v str> {
        match entry {
            Value::String(s) if !s.is_empty() => Ok(s.as_str()),
            _ => Err(self.format_error(
                ctx.label,
                format!("expected a non-empty string, got {}", entry),
            )),
        }
    }

    fn format_error(self, label: &str, reason: impl Into<String>) -> ZoneError {
        ZoneError::record_format(label, self.key(), reason)
    }
}

/// Absent, null and empty-string weights all mean unweighted
fn weight_of(value: Option<&Value>) -> Result<u32> {
    match value {
        None | Some(Value::Null) => Ok(0),
        Some(Value::String(s)) if s.is_empty() => Ok(0),
        Some(weight) => value_to::<u32>(weight),
    }
}
