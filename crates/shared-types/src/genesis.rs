//! # Genesis Specification
//!
//! The input model: chain configuration, initial account allocation and the
//! fixed genesis header fields.
//!
//! Address and storage keys are normalized on read (`0x` optional, hex case
//! ignored). Two keys that normalize to the same address or slot are rejected
//! rather than silently merged.

use crate::chain_config::ChainConfig;
use crate::constants::CLIQUE_EXTRA_MIN_LEN;
use crate::errors::SpecError;
use crate::hexutil;
use crate::primitives::{Address, Hash, H256, U256};
use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Initial allocation keyed by address. Ordered so iteration is deterministic.
pub type GenesisAlloc = BTreeMap<Address, AccountState>;

/// Initial state of one account.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountState {
    #[serde(with = "hexutil::big")]
    pub balance: U256,
    #[serde(default, with = "hexutil::quantity")]
    pub nonce: u64,
    #[serde(default, with = "hexutil::bytes")]
    pub code: Vec<u8>,
    /// Slot to value. Zero values are allowed here and dropped at commit time.
    #[serde(default, with = "storage_map")]
    pub storage: BTreeMap<H256, H256>,
}

impl AccountState {
    /// An account holding only a balance.
    pub fn with_balance(balance: U256) -> Self {
        Self {
            balance,
            ..Default::default()
        }
    }
}

/// Full genesis description.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenesisSpec {
    #[serde(default)]
    pub config: Option<ChainConfig>,
    #[serde(with = "alloc_map")]
    pub alloc: GenesisAlloc,
    #[serde(default, with = "hexutil::quantity")]
    pub nonce: u64,
    #[serde(default, with = "hexutil::quantity")]
    pub timestamp: u64,
    #[serde(default, with = "hexutil::bytes")]
    pub extra_data: Vec<u8>,
    #[serde(with = "hexutil::quantity")]
    pub gas_limit: u64,
    /// Required in JSON. `None` is only reachable through the Rust API and
    /// selects the network default difficulty when the mix hash is zero.
    #[serde(
        serialize_with = "hexutil::big::option::serialize",
        deserialize_with = "hexutil::big::deserialize_some"
    )]
    pub difficulty: Option<U256>,
    #[serde(default)]
    pub mix_hash: Hash,
    #[serde(default)]
    pub coinbase: Address,
    #[serde(default, with = "hexutil::big::option")]
    pub base_fee_per_gas: Option<U256>,
    #[serde(default, with = "hexutil::quantity::option")]
    pub excess_blob_gas: Option<u64>,
    #[serde(default, with = "hexutil::quantity::option")]
    pub blob_gas_used: Option<u64>,

    // Accepted for compatibility with exported genesis files. A genesis block
    // always has number zero, no gas used and no parent.
    #[serde(default, with = "hexutil::quantity")]
    pub number: u64,
    #[serde(default, with = "hexutil::quantity")]
    pub gas_used: u64,
    #[serde(default)]
    pub parent_hash: Hash,
}

impl GenesisSpec {
    /// A specification with an empty allocation and the given chain config.
    pub fn new(config: ChainConfig, gas_limit: u64, difficulty: U256) -> Self {
        Self {
            config: Some(config),
            alloc: GenesisAlloc::new(),
            nonce: 0,
            timestamp: 0,
            extra_data: Vec::new(),
            gas_limit,
            difficulty: Some(difficulty),
            mix_hash: Hash::zero(),
            coinbase: Address::zero(),
            base_fee_per_gas: None,
            excess_blob_gas: None,
            blob_gas_used: None,
            number: 0,
            gas_used: 0,
            parent_hash: Hash::zero(),
        }
    }

    /// Decode and validate a JSON document.
    pub fn from_json(raw: &[u8]) -> Result<Self, SpecError> {
        let spec: Self =
            serde_json::from_slice(raw).map_err(|e| SpecError::Malformed(e.to_string()))?;
        spec.validate()?;
        Ok(spec)
    }

    /// Semantic checks that the JSON shape alone cannot express.
    pub fn validate(&self) -> Result<(), SpecError> {
        let config = match &self.config {
            Some(config) if config.is_object() => config,
            _ => return Err(SpecError::MissingChainConfig),
        };
        if self.number != 0 {
            return Err(SpecError::NonZeroNumber(self.number));
        }
        if config.is_clique() && self.extra_data.len() < CLIQUE_EXTRA_MIN_LEN {
            return Err(SpecError::CliqueWithoutSigners {
                len: self.extra_data.len(),
            });
        }
        config.fork_schedule()?;
        Ok(())
    }

    /// The allocation alone, in the JSON form it is read from.
    pub fn alloc_json(&self) -> Result<Vec<u8>, serde_json::Error> {
        struct Alloc<'a>(&'a GenesisAlloc);

        impl Serialize for Alloc<'_> {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                alloc_map::serialize(self.0, serializer)
            }
        }

        serde_json::to_vec(&Alloc(&self.alloc))
    }

    /// The chain configuration. Only valid after `validate` succeeded.
    pub fn chain_config(&self) -> Result<&ChainConfig, SpecError> {
        self.config.as_ref().ok_or(SpecError::MissingChainConfig)
    }
}

/// Key types accepted in the `alloc` and `storage` maps.
trait HexKey: Ord + Sized {
    const WHAT: &'static str;
    fn parse_key(text: &str) -> Result<Self, String>;
    fn render_key(&self) -> String;
}

impl HexKey for Address {
    const WHAT: &'static str = "address";

    fn parse_key(text: &str) -> Result<Self, String> {
        let digits = text
            .strip_prefix("0x")
            .or_else(|| text.strip_prefix("0X"))
            .unwrap_or(text);
        if digits.len() != 40 {
            return Err(format!("invalid address {text:?}: expected 20 bytes of hex"));
        }
        let bytes = hex::decode(digits).map_err(|e| format!("invalid address {text:?}: {e}"))?;
        Ok(Address::from_slice(&bytes))
    }

    fn render_key(&self) -> String {
        format!("0x{}", hex::encode(self.as_bytes()))
    }
}

impl HexKey for H256 {
    const WHAT: &'static str = "storage slot";

    fn parse_key(text: &str) -> Result<Self, String> {
        hexutil::parse_word(text).map(H256)
    }

    fn render_key(&self) -> String {
        format!("0x{}", hex::encode(self.as_bytes()))
    }
}

/// A storage value: same hex form as a slot.
struct StorageWord(H256);

impl<'de> Deserialize<'de> for StorageWord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        hexutil::parse_word(&text)
            .map(|w| StorageWord(H256(w)))
            .map_err(de::Error::custom)
    }
}

struct UniqueKeyVisitor<K, V, W> {
    convert: fn(W) -> V,
    _marker: std::marker::PhantomData<(K, V, W)>,
}

impl<'de, K, V, W> Visitor<'de> for UniqueKeyVisitor<K, V, W>
where
    K: HexKey,
    W: Deserialize<'de>,
{
    type Value = BTreeMap<K, V>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a map keyed by {}", K::WHAT)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut out = BTreeMap::new();
        while let Some(raw_key) = access.next_key::<String>()? {
            let key = K::parse_key(&raw_key).map_err(de::Error::custom)?;
            let value = (self.convert)(access.next_value::<W>()?);
            if out.contains_key(&key) {
                return Err(de::Error::custom(format!(
                    "duplicate {} {}",
                    K::WHAT,
                    key.render_key()
                )));
            }
            out.insert(key, value);
        }
        Ok(out)
    }
}

fn serialize_keyed<S, K, V, F, T>(
    map: &BTreeMap<K, V>,
    serializer: S,
    render_value: F,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    K: HexKey,
    F: Fn(&V) -> T,
    T: Serialize,
{
    let mut out = serializer.serialize_map(Some(map.len()))?;
    for (key, value) in map {
        out.serialize_entry(&key.render_key(), &render_value(value))?;
    }
    out.end()
}

mod alloc_map {
    use super::*;

    pub fn serialize<S: Serializer>(alloc: &GenesisAlloc, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_keyed(alloc, serializer, |account| account.clone())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<GenesisAlloc, D::Error> {
        deserializer.deserialize_map(UniqueKeyVisitor::<Address, AccountState, AccountState> {
            convert: |account| account,
            _marker: std::marker::PhantomData,
        })
    }
}

mod storage_map {
    use super::*;

    pub fn serialize<S: Serializer>(
        storage: &BTreeMap<H256, H256>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serialize_keyed(storage, serializer, |value| value.render_key())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<BTreeMap<H256, H256>, D::Error> {
        deserializer.deserialize_map(UniqueKeyVisitor::<H256, H256, StorageWord> {
            convert: |word| word.0,
            _marker: std::marker::PhantomData,
        })
    }
}
