//! # Error Types
//!
//! Errors raised while reading and validating a genesis specification.

use thiserror::Error;

/// A genesis specification that cannot be turned into a genesis block.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpecError {
    /// The document is not valid JSON or a field has the wrong shape.
    #[error("malformed genesis specification: {0}")]
    Malformed(String),

    /// `config` is absent, `null` or not an object.
    #[error("invalid genesis without chain config")]
    MissingChainConfig,

    /// A genesis block has no parent, so its number must be zero.
    #[error("can't commit genesis block with number > 0 (got {0})")]
    NonZeroNumber(u64),

    /// Clique needs a signer list in `extraData`.
    #[error("can't start clique chain without signers (extraData is {len} bytes)")]
    CliqueWithoutSigners { len: usize },

    /// A fork-activation marker in `config` is not a non-negative integer.
    #[error("invalid fork marker config.{field}: {reason}")]
    InvalidForkMarker { field: &'static str, reason: String },
}
