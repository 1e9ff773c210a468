use clap::Parser;
use ferrous_hosts_domain::CliOverrides;
use tokio_util::sync::CancellationToken;
use tracing::info;

mod bootstrap;
mod console;
mod di;

#[derive(Parser)]
#[command(name = "ferrous-hosts")]
#[command(version)]
#[command(about = "Ferrous Hosts - live hosts-file resolver")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Hosts file or directory to serve (repeatable, replaces configured paths)
    #[arg(long = "hosts", value_name = "PATH")]
    hosts: Vec<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Print the current hosts table and exit
    #[arg(long)]
    list: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        hosts_paths: (!cli.hosts.is_empty()).then(|| cli.hosts.clone()),
        log_level: cli.log_level.clone(),
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;
    bootstrap::init_logging(&config);

    info!("Starting Ferrous Hosts v{}", env!("CARGO_PKG_VERSION"));

    let services = di::HostsServices::new(&config);

    if cli.list {
        services.load_once().await?;
        for (name, addresses) in services.list_hosts.execute() {
            let addresses: Vec<String> = addresses.iter().map(ToString::to_string).collect();
            println!("{} {}", name, addresses.join(" "));
        }
        return Ok(());
    }

    let shutdown = CancellationToken::new();
    let jobs = services.job_runner(shutdown).await.start().await;

    tokio::select! {
        result = console::run(&services.resolve_local_host) => result?,
        _ = tokio::signal::ctrl_c() => info!("Received Ctrl-C, shutting down"),
    }

    jobs.shutdown().await;
    info!("Shutdown complete");
    Ok(())
}
