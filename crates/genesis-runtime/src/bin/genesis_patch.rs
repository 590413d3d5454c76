//! Write the genesis block header into a node configuration file.

use clap::Parser;
use genesis_runtime::{load_config, run_patch, telemetry, PatchArgs};

fn main() -> anyhow::Result<()> {
    let args = PatchArgs::parse();
    telemetry::init_tracing()?;

    let config = load_config();
    let header = run_patch(&args, &config)?;
    println!("genesis block hash {:?}", header.hash);
    Ok(())
}
