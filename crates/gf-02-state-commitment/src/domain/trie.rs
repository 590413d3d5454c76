//! # Trie Commit
//!
//! Builds a Merkle Patricia Trie over a complete key/value set in one pass.
//!
//! Entries are sorted by key before the trie is built, so the root depends
//! only on the set of entries and never on the order they were supplied in.
//! Each subtree is built from the contiguous run of sorted keys that share
//! its prefix.

use super::errors::BuilderError;
use super::nibbles::{common_prefix_len, Nibbles};
use super::node::{reference, NodeRef, TrieNode};
use shared_types::{keccak256, Hash, EMPTY_ROOT_HASH};

/// A committed trie: its root and every node stored by hash.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TrieCommit {
    pub root: Hash,
    pub nodes: Vec<(Hash, Vec<u8>)>,
}

/// Commit a set of `(key, value)` entries.
///
/// Keys are used as-is (callers hash them first for a secure trie). Two
/// entries with the same key are rejected; empty values are not allowed, as
/// an empty value means "absent".
pub fn commit<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Result<TrieCommit, BuilderError>
where
    K: AsRef<[u8]>,
    V: Into<Vec<u8>>,
{
    let mut paths: Vec<(Nibbles, Vec<u8>)> = entries
        .into_iter()
        .map(|(k, v)| (Nibbles::from_bytes(k.as_ref()), v.into()))
        .collect();

    if paths.is_empty() {
        return Ok(TrieCommit {
            root: EMPTY_ROOT_HASH,
            nodes: Vec::new(),
        });
    }

    paths.sort_by(|a, b| a.0.cmp(&b.0));
    for pair in paths.windows(2) {
        if pair[0].0 == pair[1].0 {
            return Err(BuilderError::DuplicateKey(hex::encode(nibbles_to_bytes(&pair[0].0))));
        }
    }
    if paths.iter().any(|(_, v)| v.is_empty()) {
        return Err(BuilderError::EmptyValue);
    }

    let mut nodes = Vec::new();
    let root_node = build(&paths, 0, &mut nodes);
    let encoded = root_node.rlp_encode();
    let root = keccak256(&encoded);
    // The root is always stored by hash, even when it would fit inline.
    nodes.push((root, encoded));

    Ok(TrieCommit { root, nodes })
}

/// Build the subtree for `entries`, all of which share the first `depth`
/// nibbles. `entries` is sorted, unique and non-empty.
fn build(entries: &[(Nibbles, Vec<u8>)], depth: usize, sink: &mut Vec<(Hash, Vec<u8>)>) -> TrieNode {
    if let [(path, value)] = entries {
        return TrieNode::Leaf {
            path: path.as_slice()[depth..].to_vec(),
            value: value.clone(),
        };
    }

    // Sorted input: the prefix shared by the first and last entry is shared
    // by all of them.
    let first = &entries[0].0.as_slice()[depth..];
    let last = &entries[entries.len() - 1].0.as_slice()[depth..];
    let shared = common_prefix_len(first, last);
    if shared > 0 {
        let child = build_branch(entries, depth + shared, sink);
        return TrieNode::Extension {
            path: first[..shared].to_vec(),
            child: reference(&child, sink),
        };
    }

    build_branch(entries, depth, sink)
}

fn build_branch(
    entries: &[(Nibbles, Vec<u8>)],
    depth: usize,
    sink: &mut Vec<(Hash, Vec<u8>)>,
) -> TrieNode {
    let mut children: Box<[Option<NodeRef>; 16]> = Box::default();
    let mut value = None;

    let mut rest = entries;
    // A key that ends here sorts first.
    if let Some(((path, v), tail)) = rest.split_first() {
        if path.len() == depth {
            value = Some(v.clone());
            rest = tail;
        }
    }

    while let Some((head, _)) = rest.first() {
        let nibble = head.as_slice()[depth];
        let run = rest
            .iter()
            .take_while(|(p, _)| p.as_slice()[depth] == nibble)
            .count();
        let child = build(&rest[..run], depth + 1, sink);
        children[nibble as usize] = Some(reference(&child, sink));
        rest = &rest[run..];
    }

    TrieNode::Branch { children, value }
}

fn nibbles_to_bytes(path: &Nibbles) -> Vec<u8> {
    path.as_slice()
        .chunks(2)
        .map(|pair| (pair[0] << 4) | pair.get(1).copied().unwrap_or(0))
        .collect()
}
