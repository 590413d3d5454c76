//! Domain layer: store modes, key schema, the store handle and its errors.

pub mod config;
pub mod errors;
pub mod schema;
pub mod store;
