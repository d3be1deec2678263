//! Helpers shared by the zone directory tests

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

/// A fixed point in time so modification times are predictable
pub fn base_time() -> SystemTime {
    SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000)
}

/// Write a zone file and pin its modification time
pub fn write_zone(dir: &Path, file_name: &str, contents: &str, modified: SystemTime) -> PathBuf {
    let path = dir.join(file_name);
    fs::write(&path, contents).unwrap();
    let file = fs::File::options().write(true).open(&path).unwrap();
    file.set_modified(modified).unwrap();
    path
}

pub const EXAMPLE_ZONE: &str = r#"{
    "serial": 2024010100,
    "contact": "hostmaster.example.com",
    "data": {
        "": {
            "ns": ["ns2.example.com", "ns1.example.com"],
            "a": [["192.0.2.1", 10], ["192.0.2.2", 5]]
        },
        "www": {
            "ttl": 300,
            "a": [["192.0.2.10", "5"], ["192.0.2.11", 0], ["192.0.2.12", "10"]],
            "aaaa": [["2001:db8::1"]]
        },
        "ftp": { "cname": "www" },
        "mail": { "mx": {"mx": "mx.example.net", "preference": 10} },
        "geo": { "alias": "www" }
    }
}"#;

pub const OTHER_ZONE: &str = r#"{
    "ttl": "600",
    "data": {
        "": { "ns": {"ns1.example.net": null} },
        "www": { "a": [["198.51.100.1"]] }
    }
}"#;
