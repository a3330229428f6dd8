use clap::Parser;
use regexblock_api::AppState;
use regexblock_domain::CliOverrides;
use regexblock_jobs::{CacheMaintenanceJob, ExpiredRulePurgeJob, JobRunner};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

mod bootstrap;
mod di;
mod server;

#[derive(Parser)]
#[command(name = "regexblock")]
#[command(version)]
#[command(about = "RegexBlock - name, regex and address blocking service")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Web server port
    #[arg(short = 'w', long)]
    web_port: Option<u16>,

    /// Bind address
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// Database path
    #[arg(long)]
    database: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Start with match recording disabled
    #[arg(long)]
    read_only: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        web_port: cli.web_port,
        bind_address: cli.bind.clone(),
        database_path: cli.database.clone(),
        log_level: cli.log_level.clone(),
        read_only: cli.read_only,
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config.logging);

    info!("Starting RegexBlock v{}", env!("CARGO_PKG_VERSION"));

    let pool = bootstrap::init_database(&config.database).await?;

    let repos = di::Repositories::new(pool, &config.blocking);
    let use_cases = di::UseCases::new(&repos, &config.blocking);

    let shutdown = CancellationToken::new();

    JobRunner::new()
        .with_expired_rule_purge(
            ExpiredRulePurgeJob::new(use_cases.purge_expired.clone())
                .with_interval(config.blocking.purge_interval_secs),
        )
        .with_cache_maintenance(CacheMaintenanceJob::new(repos.cache.clone()))
        .with_shutdown_token(shutdown.clone())
        .start()
        .await;

    let app_state = AppState {
        check_block: use_cases.check_block,
        rules: use_cases.rules,
        api_key: config.server.api_key.as_deref().map(Arc::from),
    };

    let web_addr: SocketAddr =
        format!("{}:{}", config.server.bind_address, config.server.web_port).parse()?;

    {
        let shutdown = shutdown.clone();
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!(error = %e, "Failed to listen for shutdown signal");
                return;
            }
            info!("Shutdown signal received");
            shutdown.cancel();
        });
    }

    server::start_web_server(web_addr, app_state, shutdown).await?;

    info!("Server shutdown complete");
    Ok(())
}
