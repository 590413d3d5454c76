//! Durable key layout.
//!
//! Trie nodes are stored under their 32-byte hash. Everything else carries a
//! short prefix. Block numbers are 8-byte big-endian.

use shared_types::Hash;

pub const CODE_PREFIX: &[u8] = b"c";
pub const PREIMAGE_PREFIX: &[u8] = b"secure-key-";
pub const HEADER_PREFIX: &[u8] = b"h";
pub const HEADER_HASH_SUFFIX: &[u8] = b"n";
pub const HEADER_TD_SUFFIX: &[u8] = b"t";
pub const HEADER_NUMBER_PREFIX: &[u8] = b"H";
pub const BODY_PREFIX: &[u8] = b"b";
pub const RECEIPTS_PREFIX: &[u8] = b"r";
pub const CONFIG_PREFIX: &[u8] = b"ethereum-config-";
pub const GENESIS_ALLOC_PREFIX: &[u8] = b"ethereum-genesis-";

/// Hash of the latest known header.
pub const HEAD_HEADER_KEY: &[u8] = b"LastHeader";
/// Hash of the latest known full block.
pub const HEAD_BLOCK_KEY: &[u8] = b"LastBlock";

fn concat(parts: &[&[u8]]) -> Vec<u8> {
    parts.concat()
}

/// Key of a trie node.
pub fn node_key(hash: &Hash) -> Vec<u8> {
    hash.as_bytes().to_vec()
}

/// `c ‖ code_hash` → contract code.
pub fn code_key(code_hash: &Hash) -> Vec<u8> {
    concat(&[CODE_PREFIX, code_hash.as_bytes()])
}

/// `secure-key- ‖ hash` → the address or slot that hashes to `hash`.
pub fn preimage_key(hash: &Hash) -> Vec<u8> {
    concat(&[PREIMAGE_PREFIX, hash.as_bytes()])
}

/// `h ‖ num ‖ hash` → header RLP.
pub fn header_key(number: u64, hash: &Hash) -> Vec<u8> {
    concat(&[HEADER_PREFIX, &number.to_be_bytes(), hash.as_bytes()])
}

/// `h ‖ num ‖ n` → canonical hash at `number`.
pub fn canonical_hash_key(number: u64) -> Vec<u8> {
    concat(&[HEADER_PREFIX, &number.to_be_bytes(), HEADER_HASH_SUFFIX])
}

/// `h ‖ num ‖ hash ‖ t` → total difficulty RLP.
pub fn td_key(number: u64, hash: &Hash) -> Vec<u8> {
    concat(&[HEADER_PREFIX, &number.to_be_bytes(), hash.as_bytes(), HEADER_TD_SUFFIX])
}

/// `b ‖ num ‖ hash` → block body RLP.
pub fn body_key(number: u64, hash: &Hash) -> Vec<u8> {
    concat(&[BODY_PREFIX, &number.to_be_bytes(), hash.as_bytes()])
}

/// `r ‖ num ‖ hash` → receipts RLP.
pub fn receipts_key(number: u64, hash: &Hash) -> Vec<u8> {
    concat(&[RECEIPTS_PREFIX, &number.to_be_bytes(), hash.as_bytes()])
}

/// `H ‖ hash` → block number (8 bytes).
pub fn header_number_key(hash: &Hash) -> Vec<u8> {
    concat(&[HEADER_NUMBER_PREFIX, hash.as_bytes()])
}

/// `ethereum-config- ‖ genesis_hash` → chain config JSON.
pub fn config_key(genesis_hash: &Hash) -> Vec<u8> {
    concat(&[CONFIG_PREFIX, genesis_hash.as_bytes()])
}

/// `ethereum-genesis- ‖ genesis_hash` → genesis allocation JSON.
pub fn genesis_alloc_key(genesis_hash: &Hash) -> Vec<u8> {
    concat(&[GENESIS_ALLOC_PREFIX, genesis_hash.as_bytes()])
}
