//! # Hex Codecs
//!
//! Serde helpers for the JSON encodings used by genesis files and headers.
//!
//! Input is lenient: integers may be JSON numbers, decimal strings or
//! `0x`-prefixed hex strings. Output is canonical: integers are minimal
//! `0x` hex quantities and byte strings are `0x`-prefixed lowercase hex.

use primitive_types::U256;
use serde::de::{self, Visitor};
use serde::{Deserializer, Serializer};
use std::fmt;
use std::marker::PhantomData;

/// Integer types that can be read from a JSON number or string.
trait Quantity: Sized {
    const NAME: &'static str;
    fn from_u64(value: u64) -> Self;
    fn parse(text: &str) -> Result<Self, String>;
}

impl Quantity for u64 {
    const NAME: &'static str = "64-bit integer";

    fn from_u64(value: u64) -> Self {
        value
    }

    fn parse(text: &str) -> Result<Self, String> {
        parse_u64(text)
    }
}

impl Quantity for U256 {
    const NAME: &'static str = "256-bit integer";

    fn from_u64(value: u64) -> Self {
        U256::from(value)
    }

    fn parse(text: &str) -> Result<Self, String> {
        parse_u256(text)
    }
}

fn strip_hex_prefix(text: &str) -> Option<&str> {
    text.strip_prefix("0x").or_else(|| text.strip_prefix("0X"))
}

/// Parse a 64-bit integer from decimal or `0x` hex. The empty string is zero.
pub fn parse_u64(text: &str) -> Result<u64, String> {
    if text.is_empty() {
        return Ok(0);
    }
    match strip_hex_prefix(text) {
        Some(digits) => u64::from_str_radix(digits, 16)
            .map_err(|e| format!("invalid hex integer {text:?}: {e}")),
        None => text
            .parse::<u64>()
            .map_err(|e| format!("invalid integer {text:?}: {e}")),
    }
}

/// Parse a 256-bit integer from decimal or `0x` hex. The empty string is zero.
pub fn parse_u256(text: &str) -> Result<U256, String> {
    if text.is_empty() {
        return Ok(U256::zero());
    }
    match strip_hex_prefix(text) {
        Some(digits) => {
            if digits.is_empty() || digits.len() > 64 {
                return Err(format!("invalid 256-bit hex integer {text:?}"));
            }
            U256::from_str_radix(digits, 16)
                .map_err(|_| format!("invalid 256-bit hex integer {text:?}"))
        }
        None => U256::from_dec_str(text)
            .map_err(|_| format!("invalid 256-bit integer {text:?}")),
    }
}

/// Decode a hex word of at most 32 bytes, `0x` optional, left-padded to 32
/// bytes. Used for storage slots and values. The digits must be whole bytes,
/// so `0x1` is rejected and `0x01` is not.
pub fn parse_word(text: &str) -> Result<[u8; 32], String> {
    let digits = strip_hex_prefix(text).unwrap_or(text);
    if digits.len() > 64 {
        return Err(format!("hex word {text:?} is longer than 32 bytes"));
    }
    if digits.len() % 2 == 1 {
        return Err(format!("hex word {text:?} has an odd number of digits"));
    }
    let bytes = hex::decode(digits).map_err(|e| format!("invalid hex word {text:?}: {e}"))?;
    let mut word = [0u8; 32];
    word[32 - bytes.len()..].copy_from_slice(&bytes);
    Ok(word)
}

struct QuantityVisitor<T>(PhantomData<T>);

impl<'de, T: Quantity> Visitor<'de> for QuantityVisitor<T> {
    type Value = T;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a {} as a number, decimal string or 0x hex string", T::NAME)
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<T, E> {
        Ok(T::from_u64(value))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<T, E> {
        u64::try_from(value)
            .map(T::from_u64)
            .map_err(|_| E::custom(format!("negative {} {value}", T::NAME)))
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<T, E> {
        Err(E::custom(format!(
            "{value} is not representable as a JSON number; use a decimal or hex string"
        )))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<T, E> {
        T::parse(value).map_err(E::custom)
    }
}

/// 64-bit quantities (`nonce`, `gasLimit`, `timestamp`, ...).
pub mod quantity {
    use super::*;

    pub fn serialize<S: Serializer>(value: &u64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("{value:#x}"))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
        deserializer.deserialize_any(QuantityVisitor::<u64>(PhantomData))
    }

    /// Optional 64-bit quantity; JSON `null` is `None`.
    pub mod option {
        use super::*;

        pub fn serialize<S: Serializer>(
            value: &Option<u64>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match value {
                Some(v) => super::serialize(v, serializer),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<u64>, D::Error> {
            deserializer.deserialize_option(OptionVisitor::<u64>(PhantomData))
        }
    }
}

/// 256-bit quantities (`balance`, `difficulty`, `baseFeePerGas`).
pub mod big {
    use super::*;

    pub fn serialize<S: Serializer>(value: &U256, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("0x{value:x}"))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<U256, D::Error> {
        deserializer.deserialize_any(QuantityVisitor::<U256>(PhantomData))
    }

    /// Reads a required value into `Some`. A missing key or `null` is an error.
    pub fn deserialize_some<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<U256>, D::Error> {
        deserialize(deserializer).map(Some)
    }

    /// Optional 256-bit quantity; JSON `null` is `None`.
    pub mod option {
        use super::*;

        pub fn serialize<S: Serializer>(
            value: &Option<U256>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match value {
                Some(v) => super::serialize(v, serializer),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<U256>, D::Error> {
            deserializer.deserialize_option(OptionVisitor::<U256>(PhantomData))
        }
    }
}

struct OptionVisitor<T>(PhantomData<T>);

impl<'de, T: Quantity> Visitor<'de> for OptionVisitor<T> {
    type Value = Option<T>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "null or a {}", T::NAME)
    }

    fn visit_none<E: de::Error>(self) -> Result<Option<T>, E> {
        Ok(None)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Option<T>, E> {
        Ok(None)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Option<T>, D::Error> {
        deserializer
            .deserialize_any(QuantityVisitor::<T>(PhantomData))
            .map(Some)
    }
}

/// Arbitrary-length byte strings (`extraData`, `code`). `0x` is mandatory.
pub mod bytes {
    use super::*;

    pub fn serialize<S: Serializer>(value: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("0x{}", hex::encode(value)))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let text: String = serde::Deserialize::deserialize(deserializer)?;
        decode(&text).map_err(de::Error::custom)
    }

    pub fn decode(text: &str) -> Result<Vec<u8>, String> {
        let digits = text
            .strip_prefix("0x")
            .or_else(|| text.strip_prefix("0X"))
            .ok_or_else(|| format!("hex string {text:?} without 0x prefix"))?;
        hex::decode(digits).map_err(|e| format!("invalid hex string {text:?}: {e}"))
    }
}

/// The 8-byte header nonce, written as fixed-width hex.
pub mod nonce {
    use super::*;

    pub fn serialize<S: Serializer>(value: &u64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("0x{}", hex::encode(value.to_be_bytes())))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
        let text: String = serde::Deserialize::deserialize(deserializer)?;
        let bytes = bytes::decode(&text).map_err(de::Error::custom)?;
        let array: [u8; 8] = bytes
            .try_into()
            .map_err(|_| de::Error::custom(format!("block nonce {text:?} must be 8 bytes")))?;
        Ok(u64::from_be_bytes(array))
    }
}
