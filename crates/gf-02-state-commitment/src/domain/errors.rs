use gf_01_commitment_store::StoreError;
use thiserror::Error;

/// Failures while building the state commitment. For a validated
/// specification none of these is expected; they indicate a defect or a
/// failing store.
#[derive(Debug, Error)]
pub enum BuilderError {
    #[error("duplicate trie key 0x{0}")]
    DuplicateKey(String),

    #[error("empty value inserted into trie")]
    EmptyValue,

    #[error("trie node {hash:?} missing from store")]
    MissingNode { hash: shared_types::Hash },

    #[error("corrupt trie node: {0}")]
    CorruptNode(String),

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}
