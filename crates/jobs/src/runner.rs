use crate::HostsWatchJob;
use async_trait::async_trait;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

#[async_trait]
pub trait SpawnableJob: Send + 'static {
    fn with_cancellation(self, token: CancellationToken) -> Self;
    async fn start_job(self) -> JoinHandle<()>;
}

#[async_trait]
impl SpawnableJob for HostsWatchJob {
    fn with_cancellation(self, token: CancellationToken) -> Self {
        self.with_cancellation(token)
    }

    async fn start_job(self) -> JoinHandle<()> {
        self.start().await
    }
}

async fn spawn_job<J: SpawnableJob>(
    job: Option<J>,
    shutdown: &CancellationToken,
) -> Option<JoinHandle<()>> {
    match job {
        Some(job) => Some(job.with_cancellation(shutdown.clone()).start_job().await),
        None => None,
    }
}

pub struct JobRunner {
    hosts_watch: Option<HostsWatchJob>,
    shutdown: Option<CancellationToken>,
}

impl JobRunner {
    pub fn new() -> Self {
        Self {
            hosts_watch: None,
            shutdown: None,
        }
    }

    pub fn with_hosts_watch(mut self, job: HostsWatchJob) -> Self {
        self.hosts_watch = Some(job);
        self
    }

    pub fn with_shutdown_token(mut self, token: CancellationToken) -> Self {
        self.shutdown = Some(token);
        self
    }

    pub async fn start(self) -> RunningJobs {
        info!("Starting background job runner");

        let shutdown = self.shutdown.unwrap_or_default();
        let mut handles = Vec::new();
        handles.extend(spawn_job(self.hosts_watch, &shutdown).await);

        info!(jobs = handles.len(), "All background jobs started");
        RunningJobs { shutdown, handles }
    }
}

impl Default for JobRunner {
    fn default() -> Self {
        Self::new()
    }
}

/// Handles to the spawned jobs and the token that stops them.
pub struct RunningJobs {
    shutdown: CancellationToken,
    handles: Vec<JoinHandle<()>>,
}

impl RunningJobs {
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    /// Cancels every job and waits for it to finish.
    pub async fn shutdown(self) {
        self.shutdown.cancel();
        for handle in self.handles {
            if let Err(e) = handle.await {
                warn!(error = %e, "Background job ended abnormally");
            }
        }
        info!("Background jobs stopped");
    }
}
