//! # Proof Walk
//!
//! Reads a value back out of a committed trie using only the stored nodes,
//! collecting every hashed node on the way. The collected nodes form the
//! inclusion (or exclusion) proof for the key.

use super::errors::BuilderError;
use super::nibbles::{decode_hex_prefix, Nibbles};
use gf_01_commitment_store::TrieDatabase;
use rlp::Rlp;
use shared_types::{Hash, EMPTY_ROOT_HASH, H256};

/// Result of walking the trie for one key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrieProof {
    /// The stored value, if the key is present.
    pub value: Option<Vec<u8>>,
    /// Encodings of the hashed nodes visited, root first.
    pub nodes: Vec<Vec<u8>>,
}

fn corrupt(e: impl std::fmt::Display) -> BuilderError {
    BuilderError::CorruptNode(e.to_string())
}

fn load(db: &dyn TrieDatabase, hash: &Hash) -> Result<Vec<u8>, BuilderError> {
    db.get_node(hash)?
        .ok_or(BuilderError::MissingNode { hash: *hash })
}

/// Look up `key` (already hashed for a secure trie) under `root`.
pub fn prove(db: &dyn TrieDatabase, root: &Hash, key: &[u8]) -> Result<TrieProof, BuilderError> {
    let mut nodes = Vec::new();
    if *root == EMPTY_ROOT_HASH {
        return Ok(TrieProof { value: None, nodes });
    }

    let path = Nibbles::from_bytes(key);
    let mut remaining = path.as_slice();
    let mut current = load(db, root)?;
    nodes.push(current.clone());

    loop {
        let next = {
            let node = Rlp::new(&current);
            match node.item_count().map_err(corrupt)? {
                2 => {
                    let encoded_path = node.at(0).map_err(corrupt)?.data().map_err(corrupt)?.to_vec();
                    let (node_path, is_leaf) =
                        decode_hex_prefix(&encoded_path).ok_or_else(|| corrupt("bad hex-prefix"))?;
                    if is_leaf {
                        let value = if remaining == node_path.as_slice() {
                            Some(node.at(1).map_err(corrupt)?.data().map_err(corrupt)?.to_vec())
                        } else {
                            None
                        };
                        return Ok(TrieProof { value, nodes });
                    }
                    if !remaining.starts_with(&node_path) {
                        return Ok(TrieProof { value: None, nodes });
                    }
                    remaining = &remaining[node_path.len()..];
                    child(&node.at(1).map_err(corrupt)?)?
                }
                17 => {
                    let Some((&nibble, rest)) = remaining.split_first() else {
                        let slot = node.at(16).map_err(corrupt)?;
                        let value = slot.data().map_err(corrupt)?;
                        let value = (!value.is_empty()).then(|| value.to_vec());
                        return Ok(TrieProof { value, nodes });
                    };
                    remaining = rest;
                    child(&node.at(nibble as usize).map_err(corrupt)?)?
                }
                n => return Err(corrupt(format!("node with {n} items"))),
            }
        };

        match next {
            Child::Empty => return Ok(TrieProof { value: None, nodes }),
            Child::Inline(raw) => current = raw,
            Child::Hash(hash) => {
                current = load(db, &hash)?;
                nodes.push(current.clone());
            }
        }
    }
}

enum Child {
    Empty,
    Inline(Vec<u8>),
    Hash(Hash),
}

fn child(item: &Rlp) -> Result<Child, BuilderError> {
    if item.is_list() {
        return Ok(Child::Inline(item.as_raw().to_vec()));
    }
    let data = item.data().map_err(corrupt)?;
    match data.len() {
        0 => Ok(Child::Empty),
        32 => Ok(Child::Hash(H256::from_slice(data))),
        n => Err(corrupt(format!("child reference of {n} bytes"))),
    }
}
