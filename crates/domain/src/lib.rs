//! Ferrous Hosts Domain Layer
pub mod config;
pub mod dns_query;
pub mod dns_record;
pub mod errors;
pub mod host_entry;
pub mod reverse_name;

pub use config::{CliOverrides, Config, ConfigError, HostsConfig, LoggingConfig};
pub use dns_query::DnsQuery;
pub use dns_record::RecordType;
pub use errors::DomainError;
pub use host_entry::HostEntry;
