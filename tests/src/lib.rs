//! # Genesis-Forge Test Suite
//!
//! Unified test crate for flows that cross crate boundaries.
//!
//! ```text
//! tests/
//! ├── benches/          # Criterion benchmarks (commitment, derivation)
//! └── src/integration/
//!     ├── fixtures.rs   # Shared genesis specifications
//!     ├── flows.rs      # Service → store → patch flows
//!     ├── http.rs       # gensrv over real sockets
//!     └── vectors.rs    # Published hashes, end to end
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p gf-tests
//! cargo test -p gf-tests integration::http::
//! cargo bench -p gf-tests
//! ```

pub mod integration;
