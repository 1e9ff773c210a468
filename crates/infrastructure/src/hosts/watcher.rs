use super::sources::{is_ignored_file, HostsSources};
use async_trait::async_trait;
use ferrous_hosts_application::ports::{HostsChange, HostsChangeFeed};
use ferrous_hosts_domain::DomainError;
use notify::event::ModifyKind;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use rustc_hash::FxHashSet;
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Filesystem notifications for the configured hosts sources.
///
/// File targets are watched through their parent directory, so a file that
/// an editor replaces by rename keeps producing events. Dropping the feed
/// drops the underlying watcher and releases its OS handles.
pub struct NotifyChangeFeed {
    _watcher: RecommendedWatcher,
    rx: mpsc::UnboundedReceiver<HostsChange>,
}

impl NotifyChangeFeed {
    pub fn watch(sources: &HostsSources) -> Result<Self, DomainError> {
        let filter = ChangeFilter::new(sources.targets());
        let watch_dirs = watch_dirs(sources.targets());
        let (tx, rx) = mpsc::unbounded_channel();

        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
            match res {
                Ok(event) => {
                    if !is_content_event(&event.kind) {
                        return;
                    }
                    let paths: Vec<PathBuf> = event
                        .paths
                        .into_iter()
                        .filter(|p| filter.matches(p))
                        .collect();
                    if !paths.is_empty() {
                        // The receiver only goes away with the feed itself.
                        let _ = tx.send(HostsChange { paths });
                    }
                }
                Err(e) => warn!(error = %e, "Hosts watcher reported an error"),
            }
        })
        .map_err(|e| DomainError::HostsWatch(e.to_string()))?;

        let mut watched = 0;
        for dir in &watch_dirs {
            match watcher.watch(dir, RecursiveMode::NonRecursive) {
                Ok(()) => {
                    debug!(path = %dir.display(), "Watching hosts directory");
                    watched += 1;
                }
                Err(e) => warn!(path = %dir.display(), error = %e, "Failed to watch hosts path"),
            }
        }

        if watched == 0 && !watch_dirs.is_empty() {
            return Err(DomainError::HostsWatch(
                "none of the configured hosts paths could be watched".to_string(),
            ));
        }

        info!(directories = watched, "Hosts watcher started");
        Ok(Self {
            _watcher: watcher,
            rx,
        })
    }
}

#[async_trait]
impl HostsChangeFeed for NotifyChangeFeed {
    async fn next_change(&mut self) -> Option<HostsChange> {
        self.rx.recv().await
    }

    fn try_next_change(&mut self) -> Option<HostsChange> {
        self.rx.try_recv().ok()
    }
}

/// Reads and permission/timestamp changes never alter what a file resolves.
fn is_content_event(kind: &EventKind) -> bool {
    !matches!(
        kind,
        EventKind::Access(_) | EventKind::Modify(ModifyKind::Metadata(_))
    )
}

/// Directories to subscribe to: directory targets themselves, and the
/// parent of every file (or not yet existing) target. A symlinked file is
/// also watched through the directory holding the file it points at, since
/// writes land on that inode.
fn watch_dirs(targets: &[PathBuf]) -> Vec<PathBuf> {
    let mut dirs: Vec<PathBuf> = Vec::new();
    let mut push = |dir: PathBuf| {
        if dir.is_dir() && !dirs.contains(&dir) {
            dirs.push(dir);
        }
    };

    for target in targets {
        if target.is_dir() {
            push(target.clone());
            continue;
        }
        if let Some(parent) = target.parent() {
            push(parent.to_path_buf());
        }
        if let Some(real_parent) = symlink_target_dir(target) {
            push(real_parent);
        }
    }
    dirs
}

fn symlink_target_dir(target: &Path) -> Option<PathBuf> {
    let metadata = std::fs::symlink_metadata(target).ok()?;
    if !metadata.file_type().is_symlink() {
        return None;
    }
    let real = target.canonicalize().ok()?;
    real.parent().map(Path::to_path_buf)
}

/// Decides whether an event path belongs to a configured source.
struct ChangeFilter {
    targets: FxHashSet<PathBuf>,
}

impl ChangeFilter {
    fn new(targets: &[PathBuf]) -> Self {
        let mut set = FxHashSet::default();
        for target in targets {
            // Backends may report canonical paths (e.g. through symlinked
            // temp directories), so accept both spellings.
            if let Ok(canonical) = target.canonicalize() {
                set.insert(canonical);
            }
            set.insert(target.clone());
        }
        Self { targets: set }
    }

    fn matches(&self, path: &Path) -> bool {
        if self.targets.contains(path) {
            return true;
        }
        match path.parent() {
            Some(parent) => self.targets.contains(parent) && !is_ignored_file(path),
            None => false,
        }
    }
}
