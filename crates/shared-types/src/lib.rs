//! # Shared Types Crate
//!
//! Types shared by every Genesis-Forge subsystem.
//!
//! ## Contents
//!
//! - `primitives`: 20/32-byte identifiers, `U256`, the logs bloom and `keccak256`
//! - `constants`: published empty-set digests and network defaults
//! - `hexutil`: serde codecs for the Ethereum JSON encodings (quantities, bytes)
//! - `chain_config`: opaque chain configuration with a fork-marker view
//! - `genesis`: the genesis specification (`GenesisSpec`, `AccountState`)
//! - `header`: the block header record produced for the genesis block
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: the genesis input model and the header output
//!   model are defined once and reused by the service and every adapter.
//! - **Byte-exact encodings**: JSON codecs mirror the encodings every other
//!   Ethereum client reads and writes, so headers round-trip through files.

pub mod chain_config;
pub mod constants;
pub mod errors;
pub mod genesis;
pub mod header;
pub mod hexutil;
pub mod primitives;

pub use chain_config::{ChainConfig, ForkSchedule};
pub use constants::*;
pub use errors::SpecError;
pub use genesis::{AccountState, GenesisAlloc, GenesisSpec};
pub use header::BlockHeader;
pub use primitives::*;
