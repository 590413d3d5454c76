//! # gf-02-state-commitment
//!
//! State Commitment Builder for Genesis-Forge.
//!
//! ## Role in System
//!
//! - **Pure Computation**: turns a genesis allocation into a state root
//! - **Secure Trie**: account keys are `keccak(address)`, storage keys are `keccak(slot)`
//! - **Writes Through**: every trie node, code blob and key preimage lands in
//!   the [`TrieDatabase`](gf_01_commitment_store::TrieDatabase) it is given
//!
//! ## Flow
//!
//! ```text
//! GenesisAlloc ──→ storage tries (rayon) ──→ account records ──→ state trie
//!                        │                                         │
//!                        └──────────────→ [Commitment Store] ←─────┘
//! ```
//!
//! The root only depends on the set of accounts, never on the order they
//! were supplied in.

pub mod domain;
pub mod service;

pub use domain::account::code_hash;
pub use domain::parallel::{commit_storage_tries, encode_storage_value, StorageJob};
pub use domain::proof::{prove, TrieProof};
pub use domain::*;
pub use service::{StateCommitment, StateCommitmentBuilder};
