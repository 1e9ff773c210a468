use super::parser::parse_hosts_text;
use ferrous_hosts_domain::{DomainError, HostEntry, HostsConfig};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, warn};

/// The configured hosts files and directories, in priority order.
///
/// Entries from earlier targets are scanned first, so they win reverse
/// lookups. Files inside a directory are scanned in file-name order.
#[derive(Debug, Clone)]
pub struct HostsSources {
    targets: Vec<PathBuf>,
}

impl HostsSources {
    pub fn new<P: Into<PathBuf>>(paths: impl IntoIterator<Item = P>) -> Self {
        let targets = paths
            .into_iter()
            .map(Into::into)
            .map(|path: PathBuf| std::path::absolute(&path).unwrap_or(path))
            .collect();
        Self { targets }
    }

    pub fn from_config(config: &HostsConfig) -> Self {
        Self::new(config.paths.iter().map(PathBuf::from))
    }

    pub fn targets(&self) -> &[PathBuf] {
        &self.targets
    }

    /// Resolves targets to the files that currently exist. Missing targets
    /// are skipped with a warning.
    pub async fn expand(&self) -> Result<Vec<PathBuf>, DomainError> {
        let mut files = Vec::new();

        for target in &self.targets {
            let metadata = match fs::metadata(target).await {
                Ok(metadata) => metadata,
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    warn!(path = %target.display(), "Hosts source does not exist, skipping");
                    continue;
                }
                Err(e) => return Err(read_error(target, e)),
            };

            if metadata.is_dir() {
                files.extend(list_directory(target).await?);
            } else {
                files.push(target.clone());
            }
        }

        Ok(files)
    }

    /// Reads and parses every source, concatenating entries in scan order.
    pub async fn load_entries(&self) -> Result<Vec<HostEntry>, DomainError> {
        let mut entries = Vec::new();

        for file in self.expand().await? {
            let bytes = match fs::read(&file).await {
                Ok(bytes) => bytes,
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    debug!(path = %file.display(), "Hosts file vanished before it was read");
                    continue;
                }
                Err(e) => return Err(read_error(&file, e)),
            };

            let parsed = parse_hosts_text(&String::from_utf8_lossy(&bytes));
            debug!(path = %file.display(), entries = parsed.len(), "Hosts file parsed");
            entries.extend(parsed);
        }

        Ok(entries)
    }
}

async fn list_directory(dir: &Path) -> Result<Vec<PathBuf>, DomainError> {
    let mut reader = fs::read_dir(dir).await.map_err(|e| read_error(dir, e))?;
    let mut files = Vec::new();

    while let Some(entry) = reader.next_entry().await.map_err(|e| read_error(dir, e))? {
        let path = entry.path();
        if is_ignored_file(&path) {
            continue;
        }
        // Follows symlinks so a linked file counts as a file.
        match fs::metadata(&path).await {
            Ok(metadata) if metadata.is_file() => files.push(path),
            Ok(_) => {}
            Err(e) => debug!(path = %path.display(), error = %e, "Skipping unreadable entry"),
        }
    }

    files.sort();
    Ok(files)
}

/// Hidden files and editor leftovers inside a watched directory.
pub(crate) fn is_ignored_file(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return true;
    };
    name.starts_with('.') || name.ends_with('~') || name.ends_with(".swp") || name.ends_with(".tmp")
}

fn read_error(path: &Path, e: std::io::Error) -> DomainError {
    DomainError::HostsSourceRead {
        path: path.display().to_string(),
        reason: e.to_string(),
    }
}
