//! Error types for genesis construction

use gf_01_commitment_store::StoreError;
use gf_02_state_commitment::BuilderError;
use serde::Serialize;
use shared_types::SpecError;
use std::fmt;
use thiserror::Error;

/// Result type alias for genesis construction
pub type Result<T> = std::result::Result<T, GenesisError>;

/// Error kind tags reported to callers (HTTP bodies, CLI output).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    InvalidSpec,
    BuilderError,
    StoreUnavailable,
    ConstructionFailed,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidSpec => "InvalidSpec",
            ErrorKind::BuilderError => "BuilderError",
            ErrorKind::StoreUnavailable => "StoreUnavailable",
            ErrorKind::ConstructionFailed => "ConstructionFailed",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a construction that passed validation did not complete.
#[derive(Debug, Error)]
pub enum ConstructionFailure {
    #[error(transparent)]
    Builder(#[from] BuilderError),

    #[error(transparent)]
    Store(#[from] StoreError),

    /// Header derivation rejected a specification that passed validation.
    #[error("header derivation: {0}")]
    Derivation(SpecError),

    #[error("encoding chain records: {0}")]
    Encoding(#[from] serde_json::Error),
}

impl ConstructionFailure {
    /// The underlying kind, before it is folded into `ConstructionFailed`.
    pub fn cause_kind(&self) -> ErrorKind {
        match self {
            ConstructionFailure::Builder(BuilderError::Store(e))
            | ConstructionFailure::Store(e)
                if e.is_unavailable() =>
            {
                ErrorKind::StoreUnavailable
            }
            ConstructionFailure::Builder(_) => ErrorKind::BuilderError,
            _ => ErrorKind::ConstructionFailed,
        }
    }
}

/// Errors returned by the genesis construction service
#[derive(Debug, Error)]
pub enum GenesisError {
    /// The specification could not be decoded or is semantically invalid
    #[error("invalid genesis specification: {0}")]
    InvalidSpec(#[from] SpecError),

    /// Commitment, derivation or persistence failed
    #[error("genesis construction failed: {0}")]
    ConstructionFailed(#[from] ConstructionFailure),
}

impl GenesisError {
    /// Tag of this error as seen by adapters.
    pub fn kind(&self) -> ErrorKind {
        match self {
            GenesisError::InvalidSpec(_) => ErrorKind::InvalidSpec,
            GenesisError::ConstructionFailed(_) => ErrorKind::ConstructionFailed,
        }
    }

    /// `kind()` refined to the underlying failure.
    pub fn cause_kind(&self) -> ErrorKind {
        match self {
            GenesisError::InvalidSpec(_) => ErrorKind::InvalidSpec,
            GenesisError::ConstructionFailed(failure) => failure.cause_kind(),
        }
    }

    /// User errors, as opposed to environment or internal failures.
    pub fn is_client_error(&self) -> bool {
        matches!(self, GenesisError::InvalidSpec(_))
    }
}

impl From<BuilderError> for GenesisError {
    fn from(e: BuilderError) -> Self {
        GenesisError::ConstructionFailed(e.into())
    }
}

impl From<StoreError> for GenesisError {
    fn from(e: StoreError) -> Self {
        GenesisError::ConstructionFailed(e.into())
    }
}
