use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{debug, error, trace};

use compliance_api::config::{ConfigLoader, ServerConfig};
use compliance_api::server::ApiServer;
use compliance_api::store::create_provider;

/// REST dispatch layer for the compliance tracking API
#[derive(Parser)]
#[command(name = "compliance-api")]
#[command(about = "Compliance API server", long_about = None, version)]
struct Cli {
    /// Enable verbose output (-v for debug, -vv for trace, -vvv for all)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server (default command)
    Serve {
        /// Path to configuration file
        #[arg(short = 'c', long)]
        config: Option<PathBuf>,

        /// Address to bind, overrides the configuration
        #[arg(long)]
        bind: Option<String>,

        /// Port to listen on, overrides the configuration
        #[arg(short = 'p', long)]
        port: Option<u16>,
    },
    /// Print the effective configuration as TOML
    CheckConfig {
        /// Path to configuration file
        #[arg(short = 'c', long)]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Serve { config, bind, port }) => {
            run_serve(cli.verbose, config, bind, port).await
        }
        Some(Commands::CheckConfig { config }) => run_check_config(config).await,
        None => run_serve(cli.verbose, None, None, None).await,
    };

    if let Err(e) = result {
        error!("Fatal error: {}", e);
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: u8, configured: Option<&str>) {
    let log_level = match verbose {
        0 => configured.unwrap_or("info"),
        1 => "debug",
        2 => "trace",
        _ => "trace,hyper=debug,tower=debug", // -vvv shows everything including dependencies
    };

    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_target(verbose >= 2)
        .with_thread_ids(verbose >= 3)
        .with_line_number(verbose >= 3)
        .init();

    debug!("compliance-api started with verbosity level: {}", verbose);
    trace!("Full CLI args: {:?}", std::env::args().collect::<Vec<_>>());
}

async fn load_config(path: Option<PathBuf>) -> anyhow::Result<ServerConfig> {
    Ok(ConfigLoader::new().with_optional_path(path).load().await?)
}

async fn run_serve(
    verbose: u8,
    config: Option<PathBuf>,
    bind: Option<String>,
    port: Option<u16>,
) -> anyhow::Result<()> {
    let mut config = load_config(config).await?;
    if let Some(bind) = bind {
        config.bind_address = bind;
    }
    if let Some(port) = port {
        config.port = port;
    }

    init_tracing(verbose, config.log_level.as_deref());

    let addr = config.socket_addr()?;
    let provider = create_provider(&config.store).await?;
    ApiServer::from_config(&config, provider).start(addr).await
}

async fn run_check_config(config: Option<PathBuf>) -> anyhow::Result<()> {
    let config = load_config(config).await?;
    print!("{}", config.to_toml()?);
    Ok(())
}
