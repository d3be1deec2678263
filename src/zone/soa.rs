//! SOA synthesis. Zone documents never carry an SOA; every zone gets one
//! built from its options and root NS records.

use super::record::Record;
use super::zone::Zone;
use super::{Result, ZoneError, constants};
use crate::dns::{self, DNSResource, DNSResourceData, DNSResourceType, SoaData};
use tracing::{debug, warn};

/// Build the SOA record for `zone` and store it on the root label.
///
/// The primary nameserver is the first root NS record in serving order,
/// or [`constants::DEFAULT_PRIMARY_NS`] if the root has none.
pub fn setup_soa(zone: &mut Zone) -> Result<()> {
    if zone.root().is_none() {
        warn!(
            "{} doesn't have any 'root' records, you should probably add some NS records",
            zone.origin
        );
    }

    let serial = u32::try_from(zone.options.serial).map_err(|_| {
        ZoneError::ZoneSemantic(format!(
            "serial {} for {} does not fit in 32 bits",
            zone.options.serial, zone.origin
        ))
    })?;
    let rname = dns::fqdn(&zone.options.contact);
    check_domain_name(&rname, "contact", &zone.origin)?;

    let owner = dns::fqdn(&zone.origin);
    let minimum = zone.options.ttl;
    let origin = zone.origin.clone();

    let root = zone.add_label("");
    let mname = root
        .first(DNSResourceType::NS)
        .and_then(|ns| ns.rr.rdata.target())
        .map(str::to_string)
        .unwrap_or_else(|| dns::fqdn(constants::DEFAULT_PRIMARY_NS));
    check_domain_name(&mname, "primary nameserver", &origin)?;

    let soa = SoaData {
        mname,
        rname,
        serial,
        refresh: constants::SOA_REFRESH,
        retry: constants::SOA_RETRY,
        expire: constants::SOA_EXPIRE,
        minimum,
    };
    let rr = DNSResource::new(owner, constants::SOA_TTL, DNSResourceData::SOA(soa));
    debug!("SOA: {}", rr);

    root.set_records(DNSResourceType::SOA, vec![Record::new(rr, 0)]);
    Ok(())
}

/// Reject names that could not appear in an SOA rdata field
fn check_domain_name(name: &str, field: &str, origin: &str) -> Result<()> {
    let invalid = |reason: &str| {
        ZoneError::ZoneSemantic(format!(
            "invalid SOA {} '{}' for {}: {}",
            field, name, origin, reason
        ))
    };

    let trimmed = name.strip_suffix('.').unwrap_or(name);
    if trimmed.is_empty() {
        return Err(invalid("empty name"));
    }
    if name.len() > 255 {
        return Err(invalid("name too long"));
    }
    if name.chars().any(char::is_whitespace) {
        return Err(invalid("contains whitespace"));
    }
    for part in trimmed.split('.') {
        if part.is_empty() {
            return Err(invalid("empty label"));
        }
        if part.len() > 63 {
            return Err(invalid("label too long"));
        }
    }
    Ok(())
}
