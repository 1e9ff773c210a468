use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum DomainError {
    #[error("Failed to read hosts source {path}: {reason}")]
    HostsSourceRead { path: String, reason: String },

    #[error("Hosts watcher error: {0}")]
    HostsWatch(String),
}
