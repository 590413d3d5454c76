//! Ports: the trie-facing interface offered to the builder and the
//! key/value interface required from a durable backend.

pub mod database;
pub mod outbound;
