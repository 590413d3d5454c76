//! # Protocol Constants
//!
//! Published digests of empty structures and the network defaults applied to
//! a genesis header when the specification leaves a field unset.

use crate::primitives::Hash;
use primitive_types::H256;

/// Root of the empty Merkle Patricia Trie: `keccak256(rlp(""))`.
pub const EMPTY_ROOT_HASH: Hash = H256([
    0x56, 0xe8, 0x1f, 0x17, 0x1b, 0xcc, 0x55, 0xa6, 0xff, 0x83, 0x45, 0xe6, 0x92, 0xc0, 0xf8, 0x6e,
    0x5b, 0x48, 0xe0, 0x1b, 0x99, 0x6c, 0xad, 0xc0, 0x01, 0x62, 0x2f, 0xb5, 0xe3, 0x63, 0xb4, 0x21,
]);

/// Code hash of an account without code: `keccak256("")`.
pub const KECCAK_EMPTY: Hash = H256([
    0xc5, 0xd2, 0x46, 0x01, 0x86, 0xf7, 0x23, 0x3c, 0x92, 0x7e, 0x7d, 0xb2, 0xdc, 0xc7, 0x03, 0xc0,
    0xe5, 0x00, 0xb6, 0x53, 0xca, 0x82, 0x27, 0x3b, 0x7b, 0xfa, 0xd8, 0x04, 0x5d, 0x85, 0xa4, 0x70,
]);

/// Hash of the empty uncle list: `keccak256(rlp([]))`.
pub const EMPTY_UNCLE_HASH: Hash = H256([
    0x1d, 0xcc, 0x4d, 0xe8, 0xde, 0xc7, 0x5d, 0x7a, 0xab, 0x85, 0xb5, 0x67, 0xb6, 0xcc, 0xd4, 0x1a,
    0xd3, 0x12, 0x45, 0x1b, 0x94, 0x8a, 0x74, 0x13, 0xf0, 0xa1, 0x42, 0xfd, 0x40, 0xd4, 0x93, 0x47,
]);

/// Commitment to an empty execution-requests list: `sha256("")`.
pub const EMPTY_REQUESTS_HASH: Hash = H256([
    0xe3, 0xb0, 0xc4, 0x42, 0x98, 0xfc, 0x1c, 0x14, 0x9a, 0xfb, 0xf4, 0xc8, 0x99, 0x6f, 0xb9, 0x24,
    0x27, 0xae, 0x41, 0xe4, 0x64, 0x9b, 0x93, 0x4c, 0xa4, 0x95, 0x99, 0x1b, 0x78, 0x52, 0xb8, 0x55,
]);

/// Gas limit used when the specification sets `gasLimit` to zero.
pub const GENESIS_GAS_LIMIT: u64 = 4_712_388;

/// Difficulty used when none is given and the mix hash is zero.
pub const GENESIS_DIFFICULTY: u64 = 131_072;

/// Base fee of the first London block, in wei.
pub const INITIAL_BASE_FEE: u64 = 1_000_000_000;

/// Minimum `extraData` length for a clique chain: 32 vanity bytes plus a
/// 65-byte seal.
pub const CLIQUE_EXTRA_MIN_LEN: usize = 32 + 65;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::keccak256;
    use sha2::{Digest, Sha256};

    #[test]
    fn test_empty_digests_match_their_definitions() {
        assert_eq!(EMPTY_ROOT_HASH, keccak256(rlp::NULL_RLP));
        assert_eq!(KECCAK_EMPTY, keccak256(b""));
        assert_eq!(EMPTY_UNCLE_HASH, keccak256(rlp::EMPTY_LIST_RLP));
        let sha: [u8; 32] = Sha256::digest(b"").into();
        assert_eq!(EMPTY_REQUESTS_HASH, H256(sha));
    }
}
