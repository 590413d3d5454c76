//! # gf-03-header-derivation
//!
//! Block Header Deriver for Genesis-Forge.
//!
//! ## Role in System
//!
//! - **Pure Function**: `(GenesisSpec, state_root) -> BlockHeader`, no I/O
//! - **Network Defaults**: fills in the gas limit, difficulty and base fee a
//!   genesis file may leave unset
//! - **Fork Aware**: adds the London, Shanghai, Cancun and Prague header
//!   fields when the chain config activates them at genesis
//!
//! The header hash is `keccak256(rlp(header))` with the fork-dependent
//! fields encoded as a trailing suffix, so a header produced here hashes the
//! same way in any Ethereum execution client.

pub mod domain;

pub use domain::derive::{derive, HeaderDeriver};
pub use domain::encoding::{encode_header, header_hash};
