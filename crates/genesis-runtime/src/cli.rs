//! Command-line arguments.

use clap::Parser;
use std::path::PathBuf;

pub const DEFAULT_GENESIS_PATH: &str = "./genesis/regtest.json";
pub const DEFAULT_CONFIG_PATH: &str = "./genesis/regtest-config.json";

/// Build the genesis block for a specification and print its header.
#[derive(Debug, Clone, Parser)]
#[command(name = "genesis", version)]
pub struct GenesisArgs {
    /// Genesis specification (JSON)
    #[arg(long, default_value = DEFAULT_GENESIS_PATH)]
    pub genesis: PathBuf,
}

/// Build the genesis block and write its header into a node config.
#[derive(Debug, Clone, Parser)]
#[command(name = "genesis-patch", version)]
pub struct PatchArgs {
    /// Genesis specification (JSON)
    #[arg(long, default_value = DEFAULT_GENESIS_PATH)]
    pub genesis: PathBuf,

    /// Node configuration to patch in place
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,
}
