//! Runtime configuration, read from the environment.
//!
//! | Variable                        | Default          |
//! |---------------------------------|------------------|
//! | `GENESIS_DATA_DIR`              | `./data/genesis` |
//! | `GENESIS_STORE_BACKEND`         | `file`           |
//! | `GENSRV_HOST`                   | `0.0.0.0`        |
//! | `GENSRV_PORT`                   | `8080`           |
//! | `GENSRV_SHUTDOWN_TIMEOUT_SECS`  | `30`             |
//! | `GENSRV_MAX_BODY_BYTES`         | 32 MiB           |
//!
//! Values that do not parse are logged and ignored.

use gf_04_genesis_service::{DurableConfig, StoreBackend, StoreMode};
use gf_05_api_gateway::GatewayConfig;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, warn};

#[derive(Debug, Clone, Default)]
pub struct RuntimeConfig {
    /// Durable store used by the command-line tools.
    pub store: DurableConfig,
    pub gateway: GatewayConfig,
}

impl RuntimeConfig {
    pub fn durable_mode(&self) -> StoreMode {
        StoreMode::Durable(self.store.clone())
    }

    /// Build from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        // Port 0 is for tests, not for a deployed server.
        config.gateway.allow_ephemeral_port = false;

        if let Some(dir) = lookup("GENESIS_DATA_DIR") {
            config.store.data_dir = PathBuf::from(dir);
        }
        if let Some(name) = lookup("GENESIS_STORE_BACKEND") {
            match StoreBackend::from_name(&name) {
                Some(backend) => config.store.backend = backend,
                None => warn!("GENESIS_STORE_BACKEND: unsupported backend {:?}, using file", name),
            }
        }
        if let Some(host) = parsed(&lookup, "GENSRV_HOST") {
            config.gateway.host = host;
        }
        if let Some(port) = parsed(&lookup, "GENSRV_PORT") {
            config.gateway.port = port;
        }
        if let Some(secs) = parsed::<u64>(&lookup, "GENSRV_SHUTDOWN_TIMEOUT_SECS") {
            config.gateway.shutdown_timeout = Duration::from_secs(secs);
        }
        if let Some(bytes) = parsed(&lookup, "GENSRV_MAX_BODY_BYTES") {
            config.gateway.max_body_bytes = bytes;
        }
        config
    }
}

fn parsed<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("{}: ignoring invalid value {:?}", key, raw);
            None
        }
    }
}

/// Load configuration from the process environment.
pub fn load_config() -> RuntimeConfig {
    let config = RuntimeConfig::from_lookup(|key| std::env::var(key).ok());
    info!(
        "Store: {} at {}",
        config.store.backend,
        config.store.data_dir.display()
    );
    config
}
