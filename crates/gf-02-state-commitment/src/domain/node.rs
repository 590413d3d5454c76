use super::nibbles::encode_hex_prefix;
use rlp::RlpStream;
use shared_types::{keccak256, Hash};

// =============================================================================
// TRIE NODE: The node types in MPT
// =============================================================================

/// How a parent refers to a child node.
///
/// A child whose encoding is shorter than 32 bytes is embedded in its parent;
/// anything larger is stored separately and referenced by its hash.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeRef {
    Inline(Vec<u8>),
    Hash(Hash),
}

impl NodeRef {
    fn append_to(&self, stream: &mut RlpStream) {
        match self {
            NodeRef::Inline(raw) => {
                stream.append_raw(raw, 1);
            }
            NodeRef::Hash(hash) => {
                stream.append(hash);
            }
        }
    }
}

/// Node types in the Patricia Merkle Trie.
///
/// - Leaf: `[hex_prefix(path, true), value]`
/// - Extension: `[hex_prefix(path, false), child]`
/// - Branch: `[child_0, ..., child_15, value]`
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TrieNode {
    Leaf {
        path: Vec<u8>,
        value: Vec<u8>,
    },
    Extension {
        path: Vec<u8>,
        child: NodeRef,
    },
    Branch {
        children: Box<[Option<NodeRef>; 16]>,
        value: Option<Vec<u8>>,
    },
}

impl TrieNode {
    pub fn rlp_encode(&self) -> Vec<u8> {
        match self {
            TrieNode::Leaf { path, value } => {
                let mut stream = RlpStream::new_list(2);
                stream.append(&encode_hex_prefix(path, true));
                stream.append(value);
                stream.out().to_vec()
            }
            TrieNode::Extension { path, child } => {
                let mut stream = RlpStream::new_list(2);
                stream.append(&encode_hex_prefix(path, false));
                child.append_to(&mut stream);
                stream.out().to_vec()
            }
            TrieNode::Branch { children, value } => {
                let mut stream = RlpStream::new_list(17);
                for child in children.iter() {
                    match child {
                        Some(node) => node.append_to(&mut stream),
                        None => {
                            stream.append_empty_data();
                        }
                    }
                }
                match value {
                    Some(v) => {
                        stream.append(v);
                    }
                    None => {
                        stream.append_empty_data();
                    }
                }
                stream.out().to_vec()
            }
        }
    }
}

/// Encode `node` and decide how its parent refers to it. Hashed nodes are
/// pushed onto `sink` as `(hash, encoding)`.
pub fn reference(node: &TrieNode, sink: &mut Vec<(Hash, Vec<u8>)>) -> NodeRef {
    let encoded = node.rlp_encode();
    if encoded.len() < 32 {
        NodeRef::Inline(encoded)
    } else {
        let hash = keccak256(&encoded);
        sink.push((hash, encoded));
        NodeRef::Hash(hash)
    }
}
