use ferrous_hosts_application::ports::HostsTablePort;
use ferrous_hosts_application::use_cases::{ListHostsUseCase, ResolveLocalHostUseCase};
use ferrous_hosts_domain::Config;
use ferrous_hosts_infrastructure::hosts::{HostsResolver, HostsSources, NotifyChangeFeed};
use ferrous_hosts_jobs::{HostsWatchJob, JobRunner};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

pub struct HostsServices {
    pub resolver: Arc<HostsResolver>,
    pub resolve_local_host: Arc<ResolveLocalHostUseCase>,
    pub list_hosts: Arc<ListHostsUseCase>,
    enabled: bool,
    debounce_ms: u64,
}

impl HostsServices {
    pub fn new(config: &Config) -> Self {
        let sources = HostsSources::from_config(&config.hosts);
        info!(
            enabled = config.hosts.enabled,
            sources = sources.targets().len(),
            "Initializing hosts services"
        );

        let resolver = Arc::new(HostsResolver::new(sources));
        let table: Arc<dyn HostsTablePort> = resolver.clone();

        Self {
            resolve_local_host: Arc::new(
                ResolveLocalHostUseCase::new(table.clone()).with_enabled(config.hosts.enabled),
            ),
            list_hosts: Arc::new(ListHostsUseCase::new(table)),
            resolver,
            enabled: config.hosts.enabled,
            debounce_ms: config.hosts.debounce_ms,
        }
    }

    /// Loads the sources once without watching them.
    pub async fn load_once(&self) -> anyhow::Result<()> {
        if self.enabled {
            self.resolver.reload().await?;
        }
        Ok(())
    }

    /// Builds the runner for the hosts watch job. When the watch cannot be
    /// set up the table is still loaded once and served without live updates.
    pub async fn job_runner(&self, shutdown: CancellationToken) -> JobRunner {
        let runner = JobRunner::new().with_shutdown_token(shutdown);
        if !self.enabled {
            return runner;
        }

        match NotifyChangeFeed::watch(self.resolver.sources()) {
            Ok(feed) => runner.with_hosts_watch(
                HostsWatchJob::new(self.resolver.clone(), Box::new(feed))
                    .with_debounce(self.debounce_ms),
            ),
            Err(e) => {
                warn!(error = %e, "Hosts watch unavailable, serving a static table");
                // Failures are already logged by the resolver.
                let _ = self.resolver.reload().await;
                runner
            }
        }
    }
}
