pub mod config;
pub mod dns;
pub mod error;
pub mod zone;

pub use zone::{Zone, ZoneReloader, ZoneStore};
