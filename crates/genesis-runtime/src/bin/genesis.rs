//! Print the genesis block header for a specification file.

use clap::Parser;
use genesis_runtime::{load_config, run_genesis, telemetry, GenesisArgs};

fn main() -> anyhow::Result<()> {
    let args = GenesisArgs::parse();
    telemetry::init_tracing()?;

    let config = load_config();
    let json = run_genesis(&args, &config)?;
    println!("{json}");
    Ok(())
}
