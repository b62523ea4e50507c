//! Storefront services.
//!
//! One binary, one service per process:
//!
//! ```text
//! storefront-services quote            # POST / and /quote, port 8093
//! storefront-services recommendation   # GET / and /recommendations, port 8086
//! ```
//!
//! Both serve `GET /health` and, unless disabled, `GET /metrics`.

use std::path::PathBuf;

use clap::Parser;

use storefront_services::config::resolve_config;
use storefront_services::lifecycle::{start, Shutdown};
use storefront_services::observability::logging::init_logging;
use storefront_services::ServiceKind;

#[derive(Parser)]
#[command(name = "storefront-services")]
#[command(about = "Storefront shipping-quote and recommendation services", long_about = None)]
struct Cli {
    /// Which service to run
    #[arg(value_enum)]
    service: ServiceKind,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listen port; overrides the config file and PORT
    #[arg(short, long, value_parser = clap::value_parser!(u16).range(1..))]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = resolve_config(cli.config.as_deref())?;
    if let Some(port) = cli.port {
        config.listener.port = Some(port);
    }

    init_logging(&config.observability);
    tracing::info!(
        service = %cli.service,
        version = env!("CARGO_PKG_VERSION"),
        "storefront-services starting"
    );

    let shutdown = Shutdown::new();
    let receiver = shutdown.subscribe();
    shutdown.trigger_on_signal();

    start(cli.service, config, receiver).await?;
    Ok(())
}
