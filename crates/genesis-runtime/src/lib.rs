//! # Genesis Runtime
//!
//! Delivery adapters around the genesis service. The binaries in `src/bin`
//! stay thin; everything they do lives here so it can be tested.
//!
//! | Binary          | Store mode | Output                              |
//! |-----------------|------------|-------------------------------------|
//! | `genesis`       | durable    | header JSON on stdout               |
//! | `genesis-patch` | durable    | header written to `Consensus.Goat`  |
//! | `gensrv`        | ephemeral  | HTTP `POST /genesis`, `GET /`       |
//!
//! Configuration comes from the environment (see [`config`]); logs go to
//! stderr.

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod patch;
pub mod signal;
pub mod telemetry;

pub use cli::{GenesisArgs, PatchArgs};
pub use commands::{construct_from_file, run_genesis, run_patch, run_server};
pub use config::{load_config, RuntimeConfig};
pub use patch::{patch_config, render_patched, PatchError};
