//! # Chain Configuration
//!
//! The chain configuration is carried as an opaque JSON object. It is written
//! back unmodified when persisted; the engine only reads the handful of
//! fork-activation markers that decide which optional header fields exist.

use crate::errors::SpecError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Opaque chain configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChainConfig(Value);

impl ChainConfig {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    /// Whether the value is a JSON object. Anything else is not a usable
    /// chain configuration.
    pub fn is_object(&self) -> bool {
        self.0.is_object()
    }

    /// Whether the chain uses clique proof-of-authority.
    pub fn is_clique(&self) -> bool {
        matches!(self.0.get("clique"), Some(v) if !v.is_null())
    }

    /// Read the fork markers that affect the genesis header.
    pub fn fork_schedule(&self) -> Result<ForkSchedule, SpecError> {
        Ok(ForkSchedule {
            london_block: self.marker("londonBlock")?,
            shanghai_time: self.marker("shanghaiTime")?,
            cancun_time: self.marker("cancunTime")?,
            prague_time: self.marker("pragueTime")?,
        })
    }

    fn marker(&self, field: &'static str) -> Result<Option<u64>, SpecError> {
        match self.0.get(field) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Number(n)) => n.as_u64().map(Some).ok_or_else(|| {
                SpecError::InvalidForkMarker {
                    field,
                    reason: format!("{n} is not a non-negative integer"),
                }
            }),
            Some(other) => Err(SpecError::InvalidForkMarker {
                field,
                reason: format!("expected a number, got {other}"),
            }),
        }
    }
}

/// Fork-activation markers, each either a block number or a timestamp.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ForkSchedule {
    pub london_block: Option<u64>,
    pub shanghai_time: Option<u64>,
    pub cancun_time: Option<u64>,
    pub prague_time: Option<u64>,
}

impl ForkSchedule {
    /// London is active in the genesis block only when it activates at block 0.
    pub fn is_london_at_genesis(&self) -> bool {
        self.london_block == Some(0)
    }

    /// Time-based forks also require London at genesis.
    pub fn is_shanghai(&self, time: u64) -> bool {
        self.is_london_at_genesis() && is_active(self.shanghai_time, time)
    }

    pub fn is_cancun(&self, time: u64) -> bool {
        self.is_london_at_genesis() && is_active(self.cancun_time, time)
    }

    pub fn is_prague(&self, time: u64) -> bool {
        self.is_london_at_genesis() && is_active(self.prague_time, time)
    }
}

fn is_active(marker: Option<u64>, head: u64) -> bool {
    marker.map_or(false, |m| m <= head)
}
