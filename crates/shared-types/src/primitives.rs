//! # Primitive Types
//!
//! Fixed-width identifiers and the digest function used by the commitment.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use sha3::{Digest, Keccak256};

pub use primitive_types::{H160, H256, U256};

/// 32-byte digest (trie roots, code hashes, block hashes).
pub type Hash = H256;

/// 20-byte account address.
pub type Address = H160;

/// Size of the logs bloom filter in bytes.
pub const BLOOM_BYTE_LENGTH: usize = 256;

/// Compute Keccak256 hash.
pub fn keccak256(data: impl AsRef<[u8]>) -> Hash {
    let mut hasher = Keccak256::new();
    hasher.update(data.as_ref());
    H256(hasher.finalize().into())
}

/// 2048-bit logs bloom. Always zero for a genesis block, but carried so the
/// header encodes exactly like any other block header.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Bloom(pub [u8; BLOOM_BYTE_LENGTH]);

impl Bloom {
    pub const fn zero() -> Self {
        Bloom([0u8; BLOOM_BYTE_LENGTH])
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl Default for Bloom {
    fn default() -> Self {
        Self::zero()
    }
}

impl std::fmt::Debug for Bloom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0.iter().all(|b| *b == 0) {
            write!(f, "Bloom(zero)")
        } else {
            write!(f, "Bloom(0x{})", hex::encode(self.0))
        }
    }
}

impl Serialize for Bloom {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("0x{}", hex::encode(self.0)))
    }
}

impl<'de> Deserialize<'de> for Bloom {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        let digits = text
            .strip_prefix("0x")
            .ok_or_else(|| de::Error::custom("logs bloom without 0x prefix"))?;
        let bytes = hex::decode(digits).map_err(de::Error::custom)?;
        let array: [u8; BLOOM_BYTE_LENGTH] = bytes.try_into().map_err(|v: Vec<u8>| {
            de::Error::custom(format!(
                "logs bloom must be {} bytes, got {}",
                BLOOM_BYTE_LENGTH,
                v.len()
            ))
        })?;
        Ok(Bloom(array))
    }
}

/// Big-endian bytes of `value` with leading zero bytes removed.
pub fn trim_leading_zeros(value: &[u8]) -> &[u8] {
    let start = value.iter().position(|&b| b != 0).unwrap_or(value.len());
    &value[start..]
}
