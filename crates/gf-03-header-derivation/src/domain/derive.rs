//! # Header Derivation
//!
//! Builds the genesis header from a validated specification and the state
//! root computed for its allocation.
//!
//! Fixed by definition for a genesis block: number 0, zero parent, no gas
//! used, no uncles, no transactions, no receipts, empty bloom. Everything
//! else is copied from the specification, with these substitutions:
//!
//! | Condition                                   | Effect                                   |
//! |---------------------------------------------|------------------------------------------|
//! | `gasLimit == 0`                             | gas limit = 4 712 388                    |
//! | no difficulty, zero mix hash                | difficulty = 131 072                     |
//! | London at block 0, no `baseFeePerGas`       | base fee = 1 gwei                        |
//! | London not at block 0                       | no base fee, even if `baseFeePerGas` set |
//! | Shanghai active at `timestamp`              | withdrawals root = empty trie            |
//! | Cancun active at `timestamp`                | blob gas fields, zero beacon root        |
//! | Prague active at `timestamp`                | requests hash = `sha256("")`             |

use super::encoding::header_hash;
use shared_types::{
    BlockHeader, Bloom, ForkSchedule, GenesisSpec, Hash, SpecError, EMPTY_REQUESTS_HASH,
    EMPTY_ROOT_HASH, EMPTY_UNCLE_HASH, GENESIS_DIFFICULTY, GENESIS_GAS_LIMIT, INITIAL_BASE_FEE,
    U256,
};
use tracing::debug;

/// Stateless deriver; exists so the service can hold it next to the builder.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeaderDeriver;

impl HeaderDeriver {
    pub fn new() -> Self {
        Self
    }

    pub fn derive(&self, spec: &GenesisSpec, state_root: Hash) -> Result<BlockHeader, SpecError> {
        derive(spec, state_root)
    }
}

/// Derive the genesis header. Only fails if `spec` was never validated.
pub fn derive(spec: &GenesisSpec, state_root: Hash) -> Result<BlockHeader, SpecError> {
    let forks = spec.chain_config()?.fork_schedule()?;

    let mut header = BlockHeader {
        parent_hash: Hash::zero(),
        uncles_hash: EMPTY_UNCLE_HASH,
        coinbase: spec.coinbase,
        state_root,
        transactions_root: EMPTY_ROOT_HASH,
        receipts_root: EMPTY_ROOT_HASH,
        logs_bloom: Bloom::zero(),
        difficulty: difficulty(spec),
        number: 0,
        gas_limit: if spec.gas_limit == 0 {
            GENESIS_GAS_LIMIT
        } else {
            spec.gas_limit
        },
        gas_used: 0,
        timestamp: spec.timestamp,
        extra_data: spec.extra_data.clone(),
        mix_hash: spec.mix_hash,
        nonce: spec.nonce,
        base_fee_per_gas: base_fee(spec, &forks),
        withdrawals_root: None,
        blob_gas_used: None,
        excess_blob_gas: None,
        parent_beacon_block_root: None,
        requests_hash: None,
        hash: Hash::zero(),
    };

    let time = spec.timestamp;
    if forks.is_shanghai(time) {
        header.withdrawals_root = Some(EMPTY_ROOT_HASH);
    }
    if forks.is_cancun(time) {
        header.blob_gas_used = Some(spec.blob_gas_used.unwrap_or(0));
        header.excess_blob_gas = Some(spec.excess_blob_gas.unwrap_or(0));
        header.parent_beacon_block_root = Some(Hash::zero());
    }
    if forks.is_prague(time) {
        header.requests_hash = Some(EMPTY_REQUESTS_HASH);
    }

    header.hash = header_hash(&header);
    debug!(
        "[gf-03] genesis header {:?} (london={}, shanghai={}, cancun={}, prague={})",
        header.hash,
        forks.is_london_at_genesis(),
        forks.is_shanghai(time),
        forks.is_cancun(time),
        forks.is_prague(time)
    );
    Ok(header)
}

fn difficulty(spec: &GenesisSpec) -> U256 {
    match spec.difficulty {
        Some(difficulty) => difficulty,
        None if spec.mix_hash.is_zero() => U256::from(GENESIS_DIFFICULTY),
        None => U256::zero(),
    }
}

/// Pre-London headers have no base fee field, even if `baseFeePerGas` is set.
fn base_fee(spec: &GenesisSpec, forks: &ForkSchedule) -> Option<U256> {
    if !forks.is_london_at_genesis() {
        return None;
    }
    Some(spec.base_fee_per_gas.unwrap_or_else(|| U256::from(INITIAL_BASE_FEE)))
}
