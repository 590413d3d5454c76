//! Chain records written next to the state trie in durable mode, the same
//! set go-ethereum writes when it commits a genesis block: header, empty
//! body and receipts, total difficulty, canonical-chain entries, head
//! pointers, chain config and the allocation it was built from.

use crate::error::ConstructionFailure;
use gf_01_commitment_store::{schema, StoreHandle};
use gf_03_header_derivation::encode_header;
use rlp::RlpStream;
use shared_types::{BlockHeader, GenesisSpec};

pub fn write_genesis_block(
    store: &StoreHandle,
    header: &BlockHeader,
    spec: &GenesisSpec,
) -> Result<(), ConstructionFailure> {
    let hash = header.hash;
    let number = header.number;
    let config = spec
        .chain_config()
        .map_err(ConstructionFailure::Derivation)?;

    store.put(schema::genesis_alloc_key(&hash), spec.alloc_json()?)?;
    store.put(schema::td_key(number, &hash), rlp::encode(&header.difficulty).to_vec())?;
    store.put(schema::body_key(number, &hash), encode_empty_body(header))?;
    store.put(schema::receipts_key(number, &hash), rlp::EMPTY_LIST_RLP.to_vec())?;
    store.put(schema::header_key(number, &hash), encode_header(header))?;
    store.put(schema::canonical_hash_key(number), hash.as_bytes().to_vec())?;
    store.put(schema::header_number_key(&hash), number.to_be_bytes().to_vec())?;
    store.put(schema::HEAD_HEADER_KEY.to_vec(), hash.as_bytes().to_vec())?;
    store.put(schema::HEAD_BLOCK_KEY.to_vec(), hash.as_bytes().to_vec())?;
    store.put(schema::config_key(&hash), serde_json::to_vec(config)?)?;
    Ok(())
}

/// `[transactions, uncles]`, plus an empty withdrawals list once Shanghai
/// is active.
fn encode_empty_body(header: &BlockHeader) -> Vec<u8> {
    let with_withdrawals = header.withdrawals_root.is_some();
    let mut stream = RlpStream::new_list(if with_withdrawals { 3 } else { 2 });
    stream.begin_list(0);
    stream.begin_list(0);
    if with_withdrawals {
        stream.begin_list(0);
    }
    stream.out().to_vec()
}
