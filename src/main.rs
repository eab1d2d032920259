use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use telemetry_sandbox::config::load_config;
use telemetry_sandbox::observability::{logging, metrics};
use telemetry_sandbox::{SandboxServer, Shutdown};

#[derive(Parser)]
#[command(name = "telemetry-sandbox")]
#[command(about = "HTTP service that produces known telemetry signals on demand", long_about = None)]
struct Args {
    /// Optional TOML config file; defaults apply when omitted.
    #[arg(short, long, env = "SANDBOX_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;

    logging::init_tracing(&config.observability);

    tracing::info!("telemetry-sandbox v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        environment = %config.environment.name,
        access_gate = config.access_gate.is_enabled(),
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr);
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Arc::new(Shutdown::new());
    let server = SandboxServer::new(config);
    let server_shutdown = shutdown.subscribe();

    let signal = shutdown.clone();
    tokio::spawn(async move { signal.trigger_on_ctrl_c().await });

    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
