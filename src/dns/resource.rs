use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};

use super::enums::{DNSResourceClass, DNSResourceType};

/// A fully built resource record: owner name, class, TTL and typed rdata.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DNSResource {
    /// Fully qualified owner name, always dot-terminated
    pub name: String,
    pub rclass: DNSResourceClass,
    pub ttl: u32,
    pub rdata: DNSResourceData,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DNSResourceData {
    A(Ipv4Addr),
    AAAA(Ipv6Addr),
    NS(String),
    CNAME(String),
    MX { preference: u16, exchange: String },
    SOA(SoaData),
    /// Server-internal redirect target, stored exactly as written
    Alias(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SoaData {
    pub mname: String,
    pub rname: String,
    pub serial: u32,
    pub refresh: u32,
    pub retry: u32,
    pub expire: u32,
    pub minimum: u32,
}

impl DNSResource {
    pub fn new(name: String, ttl: u32, rdata: DNSResourceData) -> Self {
        Self {
            name,
            rclass: DNSResourceClass::IN,
            ttl,
            rdata,
        }
    }

    pub fn rtype(&self) -> DNSResourceType {
        self.rdata.rtype()
    }
}

impl DNSResourceData {
    pub fn rtype(&self) -> DNSResourceType {
        match self {
            DNSResourceData::A(_) => DNSResourceType::A,
            DNSResourceData::AAAA(_) => DNSResourceType::AAAA,
            DNSResourceData::NS(_) => DNSResourceType::NS,
            DNSResourceData::CNAME(_) => DNSResourceType::CNAME,
            DNSResourceData::MX { .. } => DNSResourceType::MX,
            DNSResourceData::SOA(_) => DNSResourceType::SOA,
            DNSResourceData::Alias(_) => DNSResourceType::MF,
        }
    }

    /// Target name for the name-bearing types
    pub fn target(&self) -> Option<&str> {
        match self {
            DNSResourceData::NS(name)
            | DNSResourceData::CNAME(name)
            | DNSResourceData::Alias(name) => Some(name.as_str()),
            DNSResourceData::MX { exchange, .. } => Some(exchange.as_str()),
            DNSResourceData::SOA(soa) => Some(soa.mname.as_str()),
            DNSResourceData::A(_) | DNSResourceData::AAAA(_) => None,
        }
    }
}

impl fmt::Display for DNSResourceData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DNSResourceData::A(addr) => write!(f, "{}", addr),
            DNSResourceData::AAAA(addr) => write!(f, "{}", addr),
            DNSResourceData::NS(name)
            | DNSResourceData::CNAME(name)
            | DNSResourceData::Alias(name) => f.write_str(name),
            DNSResourceData::MX {
                preference,
                exchange,
            } => write!(f, "{} {}", preference, exchange),
            DNSResourceData::SOA(soa) => write!(
                f,
                "{} {} {} {} {} {} {}",
                soa.mname, soa.rname, soa.serial, soa.refresh, soa.retry, soa.expire, soa.minimum
            ),
        }
    }
}

/// Presentation format, e.g. `www.example.com.\t120\tIN\tA\t192.0.2.1`
impl fmt::Display for DNSResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}\t{}",
            self.name,
            self.ttl,
            self.rclass,
            self.rtype(),
            self.rdata
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presentation_format() {
        let rr = DNSResource::new(
            "www.example.com.".to_string(),
            120,
            DNSResourceData::A(Ipv4Addr::new(192, 0, 2, 1)),
        );
        assert_eq!(rr.to_string(), "www.example.com.\t120\tIN\tA\t192.0.2.1");

        let mx = DNSResource::new(
            "example.com.".to_string(),
            300,
            DNSResourceData::MX {
                preference: 10,
                exchange: "mail.example.com.".to_string(),
            },
        );
        assert_eq!(mx.rtype(), DNSResourceType::MX);
        assert!(mx.to_string().ends_with("MX\t10 mail.example.com."));
    }

    #[test]
    fn test_alias_uses_mf_type() {
        let data = DNSResourceData::Alias("internal-target".to_string());
        assert_eq!(data.rtype(), DNSResourceType::MF);
        assert_eq!(data.target(), Some("internal-target"));
    }
}
