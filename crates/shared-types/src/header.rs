//! # Block Header
//!
//! The genesis block header in its JSON form. Field names and order match
//! the header JSON emitted by Ethereum execution clients, so the output can be
//! pasted into their configuration files. Fork-dependent fields that do not
//! apply are written as `null`.

use crate::hexutil;
use crate::primitives::{Address, Bloom, Hash, U256};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockHeader {
    pub parent_hash: Hash,
    #[serde(rename = "sha3Uncles")]
    pub uncles_hash: Hash,
    #[serde(rename = "miner")]
    pub coinbase: Address,
    pub state_root: Hash,
    pub transactions_root: Hash,
    pub receipts_root: Hash,
    pub logs_bloom: Bloom,
    #[serde(with = "hexutil::big")]
    pub difficulty: U256,
    #[serde(with = "hexutil::quantity")]
    pub number: u64,
    #[serde(with = "hexutil::quantity")]
    pub gas_limit: u64,
    #[serde(with = "hexutil::quantity")]
    pub gas_used: u64,
    #[serde(with = "hexutil::quantity")]
    pub timestamp: u64,
    #[serde(with = "hexutil::bytes")]
    pub extra_data: Vec<u8>,
    pub mix_hash: Hash,
    #[serde(with = "hexutil::nonce")]
    pub nonce: u64,
    #[serde(default, with = "hexutil::big::option")]
    pub base_fee_per_gas: Option<U256>,
    #[serde(default)]
    pub withdrawals_root: Option<Hash>,
    #[serde(default, with = "hexutil::quantity::option")]
    pub blob_gas_used: Option<u64>,
    #[serde(default, with = "hexutil::quantity::option")]
    pub excess_blob_gas: Option<u64>,
    #[serde(default)]
    pub parent_beacon_block_root: Option<Hash>,
    #[serde(default)]
    pub requests_hash: Option<Hash>,
    /// Keccak256 of the RLP encoding of every field above.
    pub hash: Hash,
}

impl BlockHeader {
    /// Render as indented JSON, the layout the command-line tools print:
    /// one space of indent per level, and every line after the first
    /// prefixed with one more space.
    pub fn to_pretty_json(&self) -> Result<String, serde_json::Error> {
        let mut out = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b" ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
        self.serialize(&mut serializer)?;
        // serde_json only ever writes valid UTF-8, and escapes newlines
        // inside strings, so every raw newline is a line break.
        Ok(String::from_utf8_lossy(&out).replace('\n', "\n "))
    }
}
