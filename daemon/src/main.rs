//! fundpool daemon — entry point for running the funding-ledger service.

use clap::Parser;
use fundpool_rpc::ServiceConfig;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "fundpool-daemon", about = "fundpool funding-ledger daemon")]
struct Cli {
    /// Port for the RPC server.
    #[arg(long, env = "FUNDPOOL_LISTEN_PORT")]
    listen_port: Option<u16>,

    /// Owner address — the only identity allowed to withdraw.
    #[arg(long, env = "FUNDPOOL_OWNER")]
    owner: Option<String>,

    /// Minimum accepted contribution value in whole USD.
    #[arg(long, env = "FUNDPOOL_MINIMUM_USD")]
    minimum_usd: Option<u64>,

    /// Base URL of the price feed relay.
    #[arg(long, env = "FUNDPOOL_FEED_URL")]
    feed_url: Option<String>,

    /// Request timeout for price lookups, in seconds.
    #[arg(long, env = "FUNDPOOL_FEED_TIMEOUT_SECS")]
    feed_timeout_secs: Option<u64>,

    /// Disable permissive CORS headers (enabled by default for browser
    /// front-ends).
    #[arg(long, env = "FUNDPOOL_DISABLE_CORS")]
    disable_cors: bool,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, default_value = "info", env = "FUNDPOOL_LOG_LEVEL")]
    log_level: String,

    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    fundpool_utils::init_tracing(&cli.log_level);

    let file_config: Option<ServiceConfig> = if let Some(ref config_path) = cli.config {
        match std::fs::read_to_string(config_path) {
            Ok(contents) => match toml::from_str::<ServiceConfig>(&contents) {
                Ok(cfg) => {
                    tracing::info!("Loaded config from {}", config_path.display());
                    Some(cfg)
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config file: {e}, using CLI defaults");
                    None
                }
            },
            Err(e) => {
                tracing::warn!(
                    "Failed to read config file {}: {e}, using CLI defaults",
                    config_path.display()
                );
                None
            }
        }
    } else {
        None
    };

    let base = file_config.unwrap_or_default();
    let config = ServiceConfig {
        listen_port: cli.listen_port.unwrap_or(base.listen_port),
        owner: cli.owner.unwrap_or(base.owner),
        minimum_usd: cli.minimum_usd.unwrap_or(base.minimum_usd),
        feed_url: cli.feed_url.unwrap_or(base.feed_url),
        feed_timeout_secs: cli.feed_timeout_secs.unwrap_or(base.feed_timeout_secs),
        enable_cors: base.enable_cors && !cli.disable_cors,
        log_level: cli.log_level,
    };

    tracing::info!(
        "Starting fundpool service (RPC:{}, owner:{}, minimum:{} USD, feed:{})",
        config.listen_port,
        config.owner,
        config.minimum_usd,
        config.feed_url,
    );

    let ledger = fundpool_rpc::build_ledger(&config)?;
    fundpool_rpc::serve(&config, ledger).await?;

    tracing::info!("fundpool daemon exited cleanly");
    Ok(())
}
