//! # gf-04-genesis-service
//!
//! Genesis Construction Service for Genesis-Forge.
//!
//! ## Role in System
//!
//! - **Orchestrator**: the only entry point the delivery adapters call
//! - **Owns the store lifecycle**: opens one commitment store per
//!   construction and always closes (or discards) it before returning
//! - **Error boundary**: every failure surfaces as either `InvalidSpec`
//!   (the caller's fault) or `ConstructionFailed` (everything else)
//!
//! ## Flow
//!
//! ```text
//! raw JSON ──decode/validate──→ GenesisSpec
//!                                   │
//!            [Commitment Store] ←── open(mode)
//!                   ↑               │
//!                   └── nodes ── [State Commitment Builder] ── root
//!                                                              │
//!                                  [Header Deriver] ←──────────┘
//!                                        │
//!                  durable: header + config records, then flush
//!                                        ↓
//!                                   BlockHeader
//! ```

pub mod error;
pub mod metrics;
pub mod persist;
pub mod service;

pub use error::{ConstructionFailure, ErrorKind, GenesisError, Result};
pub use gf_01_commitment_store::{DurableConfig, StoreBackend, StoreMode};
pub use metrics::{MetricsSnapshot, ServiceMetrics};
pub use service::GenesisService;
