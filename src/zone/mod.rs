pub mod errors;
pub mod label;
pub mod parser;
pub mod record;
pub mod reloader;
pub mod soa;
pub mod store;
pub mod value;
#[allow(clippy::module_inception)]
pub mod zone;

pub use errors::{Result, ZoneError};
pub use label::Label;
pub use parser::ZoneParser;
pub use record::{Record, RecordContext, RecordKind};
pub use reloader::{ReloadSummary, ZoneReloader};
pub use store::{StoreStats, ZoneStore};
pub use zone::{Zone, ZoneOptions, ZoneStats};

/// Zone constants
pub mod constants {
    /// Default TTL for records when neither zone nor label sets one
    pub const DEFAULT_TTL: u32 = 120;

    /// Default cap on the number of hosts returned per answer
    pub const DEFAULT_MAX_HOSTS: u32 = 2;

    /// Default SOA contact (RNAME)
    pub const DEFAULT_CONTACT: &str = "support.bitnames.com";

    /// SOA primary nameserver when the zone root has no NS records
    pub const DEFAULT_PRIMARY_NS: &str = "ns";

    /// NS records are never served with a TTL below this
    pub const NS_MIN_TTL: u32 = 86400;

    /// TTL of the synthesized SOA record itself
    pub const SOA_TTL: u32 = 3600;
    pub const SOA_REFRESH: u32 = 5400;
    pub const SOA_RETRY: u32 = 5400;
    pub const SOA_EXPIRE: u32 = 2419200;

    /// Server self-description zone; built in code and never pruned
    pub const RESERVED_ZONE: &str = "pgeodns";

    /// Only files with this extension (any case) are zone files
    pub const ZONE_FILE_EXTENSION: &str = "json";

    /// How often the zone directory is rescanned, in seconds
    pub const RELOAD_INTERVAL_SECS: u64 = 5;
}
