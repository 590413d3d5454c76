//! # Parallel Storage Root Computation
//!
//! Storage tries of different accounts are independent, so they are built
//! with rayon. Results come back in input order; the caller writes the
//! produced nodes to the store sequentially afterwards.

use super::errors::BuilderError;
use super::trie::{commit, TrieCommit};
use rayon::prelude::*;
use shared_types::{keccak256, Address, H256, U256};
use std::collections::BTreeMap;

/// Parallel threshold - use sequential for small batches.
pub const PARALLEL_THRESHOLD: usize = 4;

/// Storage of one account, zero values already removed.
#[derive(Clone, Debug)]
pub struct StorageJob {
    pub address: Address,
    pub slots: Vec<(H256, H256)>,
}

impl StorageJob {
    /// Collect the non-zero slots of an account. `None` if there are none.
    pub fn from_storage(address: Address, storage: &BTreeMap<H256, H256>) -> Option<Self> {
        let slots: Vec<(H256, H256)> = storage
            .iter()
            .filter(|(_, value)| !value.is_zero())
            .map(|(slot, value)| (*slot, *value))
            .collect();
        if slots.is_empty() {
            None
        } else {
            Some(Self { address, slots })
        }
    }
}

/// Committed storage trie of one account.
#[derive(Clone, Debug)]
pub struct StorageCommit {
    pub address: Address,
    pub trie: TrieCommit,
    /// `(keccak(slot), slot)` for every committed slot.
    pub preimages: Vec<(H256, H256)>,
}

/// Compute storage tries for all jobs, in parallel above the threshold.
pub fn commit_storage_tries(jobs: Vec<StorageJob>) -> Result<Vec<StorageCommit>, BuilderError> {
    if jobs.len() < PARALLEL_THRESHOLD {
        jobs.into_iter().map(commit_single_storage).collect()
    } else {
        jobs.into_par_iter().map(commit_single_storage).collect()
    }
}

/// Storage trie of one account: keys are `keccak(slot)`, values are the RLP
/// of the value with leading zero bytes stripped.
pub fn commit_single_storage(job: StorageJob) -> Result<StorageCommit, BuilderError> {
    let mut preimages = Vec::with_capacity(job.slots.len());
    let mut entries = Vec::with_capacity(job.slots.len());
    for (slot, value) in &job.slots {
        let hashed = keccak256(slot);
        preimages.push((hashed, *slot));
        entries.push((hashed, encode_storage_value(value)));
    }

    Ok(StorageCommit {
        address: job.address,
        trie: commit(entries)?,
        preimages,
    })
}

/// RLP of a storage word as a minimal big-endian integer.
pub fn encode_storage_value(value: &H256) -> Vec<u8> {
    let as_int = U256::from_big_endian(value.as_bytes());
    rlp::encode(&as_int).to_vec()
}
