//! # State Commitment Builder
//!
//! Commits the genesis allocation to a secure Merkle Patricia Trie:
//!
//! 1. Storage tries for accounts with non-zero storage (in parallel).
//! 2. One account record per address: `[nonce, balance, storage_root, code_hash]`.
//! 3. The state trie, keyed by `keccak(address)`.
//!
//! Every node, the code of each contract and the preimage of every hashed
//! key are written to the supplied store.

use crate::domain::account::AccountRecord;
use crate::domain::errors::BuilderError;
use crate::domain::parallel::{commit_storage_tries, StorageJob};
use crate::domain::proof::{prove, TrieProof};
use crate::domain::trie::commit;
use gf_01_commitment_store::TrieDatabase;
use shared_types::{keccak256, Address, GenesisAlloc, Hash, EMPTY_ROOT_HASH};
use std::collections::HashMap;
use tracing::{debug, instrument};

/// Outcome of a successful build.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StateCommitment {
    pub root: Hash,
    pub accounts: usize,
    pub storage_tries: usize,
    /// Trie nodes handed to the store (state and storage tries).
    pub nodes_written: usize,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct StateCommitmentBuilder;

impl StateCommitmentBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Commit `accounts` and return the state root.
    #[instrument(skip_all, fields(accounts = accounts.len()))]
    pub fn build(
        &self,
        accounts: &GenesisAlloc,
        db: &dyn TrieDatabase,
    ) -> Result<StateCommitment, BuilderError> {
        let jobs: Vec<StorageJob> = accounts
            .iter()
            .filter_map(|(address, account)| StorageJob::from_storage(*address, &account.storage))
            .collect();

        let storage = commit_storage_tries(jobs)?;
        let storage_tries = storage.len();
        let mut nodes_written = 0;
        let mut storage_roots: HashMap<Address, Hash> = HashMap::with_capacity(storage.len());
        for committed in storage {
            nodes_written += committed.trie.nodes.len();
            db.batch_put(committed.trie.nodes)?;
            for (hashed, slot) in committed.preimages {
                db.put_preimage(hashed, slot.as_bytes().to_vec())?;
            }
            storage_roots.insert(committed.address, committed.trie.root);
        }

        let mut entries = Vec::with_capacity(accounts.len());
        for (address, account) in accounts {
            let storage_root = storage_roots
                .get(address)
                .copied()
                .unwrap_or(EMPTY_ROOT_HASH);
            let record = AccountRecord::from_state(account, storage_root);
            if !account.code.is_empty() {
                db.put_code(record.code_hash, account.code.clone())?;
            }
            let hashed = keccak256(address);
            db.put_preimage(hashed, address.as_bytes().to_vec())?;
            entries.push((hashed, record.rlp_bytes()));
        }

        let state = commit(entries)?;
        nodes_written += state.nodes.len();
        db.batch_put(state.nodes)?;

        debug!(
            "[gf-02] state root {:?} ({} storage tries, {} nodes)",
            state.root, storage_tries, nodes_written
        );

        Ok(StateCommitment {
            root: state.root,
            accounts: accounts.len(),
            storage_tries,
            nodes_written,
        })
    }

    /// Read an account back from a committed state trie.
    pub fn account(
        &self,
        db: &dyn TrieDatabase,
        root: &Hash,
        address: &Address,
    ) -> Result<(Option<AccountRecord>, TrieProof), BuilderError> {
        let proof = prove(db, root, keccak256(address).as_bytes())?;
        let record = match &proof.value {
            Some(raw) => Some(
                rlp::decode::<AccountRecord>(raw)
                    .map_err(|e| BuilderError::CorruptNode(e.to_string()))?,
            ),
            None => None,
        };
        Ok((record, proof))
    }
}
