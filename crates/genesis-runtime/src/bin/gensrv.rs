//! HTTP genesis server.

use genesis_runtime::{load_config, run_server, telemetry};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init_tracing()?;

    info!("===========================================");
    info!("  Genesis-Forge gensrv v{}", env!("CARGO_PKG_VERSION"));
    info!("===========================================");

    let config = load_config();
    run_server(config).await?;

    info!("gensrv shutdown complete");
    Ok(())
}
