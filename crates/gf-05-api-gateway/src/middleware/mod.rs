//! Middleware stack for the gateway.
//!
//! Layer order: Request → Tracing → BodyLimit → Handler

pub mod metrics;
pub mod tracing;

pub use self::metrics::{GatewayMetrics, RequestCounts};
pub use self::tracing::TracingLayer;
