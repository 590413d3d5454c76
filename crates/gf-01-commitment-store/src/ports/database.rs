//! Trie-facing view of a store handle.

use crate::domain::errors::StoreError;
use shared_types::Hash;

/// Where the state commitment builder writes what it produces.
///
/// Node writes are idempotent: a node is addressed by its own hash, so
/// writing the same node twice is a no-op.
pub trait TrieDatabase: Send + Sync {
    fn get_node(&self, hash: &Hash) -> Result<Option<Vec<u8>>, StoreError>;
    fn put_node(&self, hash: Hash, data: Vec<u8>) -> Result<(), StoreError>;
    fn batch_put(&self, nodes: Vec<(Hash, Vec<u8>)>) -> Result<(), StoreError>;

    /// Record the unhashed form of a trie key (an address or a slot).
    fn put_preimage(&self, hash: Hash, preimage: Vec<u8>) -> Result<(), StoreError>;

    /// Record contract code under its hash.
    fn put_code(&self, code_hash: Hash, code: Vec<u8>) -> Result<(), StoreError>;
}
