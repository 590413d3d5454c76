//! GF-05 API Gateway - HTTP interface for genesis construction.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │              API GATEWAY (gf-05)             │
//! ├──────────────────────────────────────────────┤
//! │   POST /genesis            GET /             │
//! │        │                     │               │
//! │  ┌─────┴─────────────────────┴─────┐         │
//! │  │  Tracing → BodyLimit → Handler  │         │
//! │  └─────┬───────────────────────────┘         │
//! │        │ spawn_blocking                      │
//! └────────┼─────────────────────────────────────┘
//!          ▼
//!   gf-04 GenesisService (ephemeral store per request)
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use gf_05_api_gateway::{GatewayConfig, GenesisServer};
//!
//! let server = GenesisServer::bind(&GatewayConfig::default(), GenesisService::new()).await?;
//! let handle = server.shutdown_handle();
//! tokio::spawn(async move { shutdown_signal().await; handle.shutdown() });
//! server.serve().await?;
//! ```
//!
//! # Status Codes
//!
//! - `200`: header JSON
//! - `400`: `InvalidSpec` with the decode or validation message
//! - `413`: body larger than `max_body_bytes`
//! - `500`: any other failure, with its message

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod domain;
pub mod middleware;
pub mod router;
pub mod server;

pub use domain::config::{ConfigError, GatewayConfig};
pub use domain::error::{ApiError, ApiResult, GatewayError};
pub use middleware::{GatewayMetrics, RequestCounts};
pub use router::{build_router, AppState};
pub use server::{GenesisServer, ShutdownHandle};
