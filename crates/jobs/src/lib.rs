pub mod hosts_watch;
pub mod runner;

pub use hosts_watch::HostsWatchJob;
pub use runner::{JobRunner, RunningJobs};
