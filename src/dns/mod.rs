//! Typed resource-record model produced by the zone compiler.

pub mod enums;
pub mod resource;

pub use enums::{DNSResourceClass, DNSResourceType};
pub use resource::{DNSResource, DNSResourceData, SoaData};

/// Append a trailing dot unless the name already has one
pub fn fqdn(name: &str) -> String {
    if is_fqdn(name) {
        name.to_string()
    } else {
        format!("{}.", name)
    }
}

pub fn is_fqdn(name: &str) -> bool {
    name.ends_with('.')
}

/// Number of labels in a domain name; the root has none
pub fn count_labels(name: &str) -> usize {
    name.split('.').filter(|l| !l.is_empty()).count()
}
