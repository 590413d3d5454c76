//! # Header Encoding
//!
//! RLP layout of a block header:
//!
//! ```text
//! [parent, uncles, coinbase, state, txs, receipts, bloom, difficulty,
//!  number, gas_limit, gas_used, time, extra, mix, nonce(8 bytes),
//!  base_fee?, withdrawals_root?, blob_gas_used?, excess_blob_gas?,
//!  parent_beacon_root?, requests_hash?]
//! ```
//!
//! Optional fields form a suffix: the list ends at the last present field.
//! An absent field before a present one is encoded as the empty string.

use rlp::RlpStream;
use shared_types::{keccak256, BlockHeader, Hash, U256};

const BASE_FIELDS: usize = 15;

// Integers of any width share the minimal big-endian encoding.
enum Optional<'a> {
    Integer(Option<U256>),
    Word(Option<&'a Hash>),
}

impl Optional<'_> {
    fn is_present(&self) -> bool {
        match self {
            Optional::Integer(v) => v.is_some(),
            Optional::Word(v) => v.is_some(),
        }
    }

    fn append_to(&self, stream: &mut RlpStream) {
        match self {
            Optional::Integer(Some(v)) => {
                stream.append(v);
            }
            Optional::Word(Some(h)) => {
                stream.append(*h);
            }
            _ => {
                stream.append_empty_data();
            }
        }
    }
}

/// RLP encoding of `header`. The `hash` field is not part of the encoding.
pub fn encode_header(header: &BlockHeader) -> Vec<u8> {
    let optional = [
        Optional::Integer(header.base_fee_per_gas),
        Optional::Word(header.withdrawals_root.as_ref()),
        Optional::Integer(header.blob_gas_used.map(U256::from)),
        Optional::Integer(header.excess_blob_gas.map(U256::from)),
        Optional::Word(header.parent_beacon_block_root.as_ref()),
        Optional::Word(header.requests_hash.as_ref()),
    ];
    let suffix = optional
        .iter()
        .rposition(Optional::is_present)
        .map_or(0, |last| last + 1);

    let mut stream = RlpStream::new_list(BASE_FIELDS + suffix);
    stream.append(&header.parent_hash);
    stream.append(&header.uncles_hash);
    stream.append(&header.coinbase);
    stream.append(&header.state_root);
    stream.append(&header.transactions_root);
    stream.append(&header.receipts_root);
    stream.append(&header.logs_bloom.as_bytes().to_vec());
    stream.append(&header.difficulty);
    stream.append(&header.number);
    stream.append(&header.gas_limit);
    stream.append(&header.gas_used);
    stream.append(&header.timestamp);
    stream.append(&header.extra_data);
    stream.append(&header.mix_hash);
    stream.append(&header.nonce.to_be_bytes().to_vec());
    for field in &optional[..suffix] {
        field.append_to(&mut stream);
    }
    stream.out().to_vec()
}

/// `keccak256(rlp(header))`.
pub fn header_hash(header: &BlockHeader) -> Hash {
    keccak256(encode_header(header))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rlp::Rlp;
    use shared_types::{Address, Bloom, EMPTY_ROOT_HASH, EMPTY_UNCLE_HASH};

    fn header() -> BlockHeader {
        BlockHeader {
            parent_hash: Hash::zero(),
            uncles_hash: EMPTY_UNCLE_HASH,
            coinbase: Address::zero(),
            state_root: EMPTY_ROOT_HASH,
            transactions_root: EMPTY_ROOT_HASH,
            receipts_root: EMPTY_ROOT_HASH,
            logs_bloom: Bloom::zero(),
            difficulty: U256::one(),
            number: 0,
            gas_limit: 30_000_000,
            gas_used: 0,
            timestamp: 0,
            extra_data: vec![],
            mix_hash: Hash::zero(),
            nonce: 0,
            base_fee_per_gas: None,
            withdrawals_root: None,
            blob_gas_used: None,
            excess_blob_gas: None,
            parent_beacon_block_root: None,
            requests_hash: None,
            hash: Hash::zero(),
        }
    }

    #[test]
    fn test_legacy_header_has_fifteen_fields() {
        let encoded = encode_header(&header());
        let rlp = Rlp::new(&encoded);
        assert_eq!(rlp.item_count().unwrap(), 15);
        // Nonce is a fixed 8-byte string, even when zero.
        assert_eq!(rlp.at(14).unwrap().data().unwrap(), &[0u8; 8]);
        assert_eq!(rlp.at(6).unwrap().data().unwrap().len(), 256);
    }

    #[test]
    fn test_suffix_ends_at_last_present_field() {
        let mut h = header();
        h.base_fee_per_gas = Some(U256::from(7));
        assert_eq!(Rlp::new(&encode_header(&h)).item_count().unwrap(), 16);

        h.withdrawals_root = Some(EMPTY_ROOT_HASH);
        assert_eq!(Rlp::new(&encode_header(&h)).item_count().unwrap(), 17);
    }

    #[test]
    fn test_gap_is_encoded_as_empty_string() {
        let mut h = header();
        h.withdrawals_root = Some(EMPTY_ROOT_HASH);
        let encoded = encode_header(&h);
        let rlp = Rlp::new(&encoded);
        assert_eq!(rlp.item_count().unwrap(), 17);
        assert!(rlp.at(15).unwrap().is_empty());
    }

    #[test]
    fn test_hash_ignores_stored_hash_field() {
        let a = header();
        let mut b = header();
        b.hash = Hash::repeat_byte(0xff);
        assert_eq!(header_hash(&a), header_hash(&b));
    }
}
