//! The work behind each binary. Binaries only parse arguments, call one of
//! these and turn an error into a non-zero exit.

use crate::cli::{GenesisArgs, PatchArgs};
use crate::config::RuntimeConfig;
use crate::patch::patch_config;
use crate::signal::shutdown_signal;
use anyhow::Context;
use gf_04_genesis_service::{GenesisService, ServiceMetrics, StoreMode};
use gf_05_api_gateway::GenesisServer;
use shared_types::BlockHeader;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Read a specification file and construct its genesis block.
pub fn construct_from_file(
    service: &GenesisService,
    path: &Path,
    mode: &StoreMode,
) -> anyhow::Result<BlockHeader> {
    let raw = std::fs::read(path)
        .with_context(|| format!("failed to read genesis spec {}", path.display()))?;
    let header = service
        .construct(&raw, mode)
        .with_context(|| format!("genesis spec {}", path.display()))?;
    Ok(header)
}

/// `genesis`: commit durably and return the header as printed JSON.
pub fn run_genesis(args: &GenesisArgs, config: &RuntimeConfig) -> anyhow::Result<String> {
    let header = construct_from_file(&GenesisService::new(), &args.genesis, &config.durable_mode())?;
    let json = header
        .to_pretty_json()
        .context("failed to render header")?;
    Ok(json)
}

/// `genesis-patch`: commit durably and store the header in the node config.
pub fn run_patch(args: &PatchArgs, config: &RuntimeConfig) -> anyhow::Result<BlockHeader> {
    let header = construct_from_file(&GenesisService::new(), &args.genesis, &config.durable_mode())?;
    patch_config(&args.config, &header)?;
    info!("Patched {}", args.config.display());
    Ok(header)
}

/// `gensrv`: serve until SIGINT or SIGTERM.
pub async fn run_server(config: RuntimeConfig) -> anyhow::Result<()> {
    let service_metrics = Arc::new(ServiceMetrics::new());
    let service = GenesisService::with_metrics(Arc::clone(&service_metrics));
    let server = GenesisServer::bind(&config.gateway, service)
        .await
        .context("failed to start genesis server")?;

    let handle = server.shutdown_handle();
    let metrics = server.metrics();
    tokio::spawn(async move {
        shutdown_signal().await;
        handle.shutdown();
    });

    server.serve().await?;

    let counts = metrics.snapshot();
    info!(
        total = counts.total,
        success = counts.success,
        client_errors = counts.client_errors,
        server_errors = counts.server_errors,
        "Served requests"
    );
    let built = service_metrics.snapshot();
    info!(
        succeeded = built.succeeded,
        invalid_specs = built.invalid_specs,
        failed = built.failed,
        accounts = built.accounts_committed,
        avg_us = service_metrics.avg_construction_time_us(),
        "Genesis constructions"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gf_04_genesis_service::DurableConfig;
    use std::path::PathBuf;

    const SPEC: &str = r#"{
        "config": {"chainId": 1337},
        "alloc": {"0x7e5f4552091a69125d5dfcb7b8c2659029395bdf": {"balance": "1000"}},
        "difficulty": "1",
        "gasLimit": "30000000"
    }"#;

    fn runtime_config(dir: &Path) -> RuntimeConfig {
        RuntimeConfig {
            store: DurableConfig::for_testing(dir.join("data")),
            ..Default::default()
        }
    }

    #[test]
    fn test_run_genesis_prints_header() {
        let dir = tempfile::tempdir().unwrap();
        let spec = dir.path().join("genesis.json");
        std::fs::write(&spec, SPEC).unwrap();

        let args = GenesisArgs { genesis: spec };
        let json = run_genesis(&args, &runtime_config(dir.path())).unwrap();

        assert!(json.starts_with("{\n  \"parentHash\""));
        let header: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(
            header["stateRoot"],
            "0x12f9a5f66fd529735f784f6452eb674390fd09339e8dfe38a2b9a6bca591c89b"
        );
        assert!(dir.path().join("data").exists());
    }

    #[test]
    fn test_run_genesis_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let args = GenesisArgs {
            genesis: PathBuf::from("/nonexistent/genesis.json"),
        };
        let err = run_genesis(&args, &runtime_config(dir.path())).unwrap_err();
        assert!(format!("{err:#}").contains("failed to read genesis spec"));
    }

    #[test]
    fn test_run_patch_writes_header() {
        let dir = tempfile::tempdir().unwrap();
        let spec = dir.path().join("genesis.json");
        let config = dir.path().join("config.json");
        std::fs::write(&spec, SPEC).unwrap();
        std::fs::write(&config, r#"{"Consensus": {}}"#).unwrap();

        let args = PatchArgs {
            genesis: spec,
            config: config.clone(),
        };
        let header = run_patch(&args, &runtime_config(dir.path())).unwrap();

        let patched: serde_json::Value =
            serde_json::from_slice(&std::fs::read(&config).unwrap()).unwrap();
        assert_eq!(
            patched["Consensus"]["Goat"],
            serde_json::to_value(&header).unwrap()
        );
    }

    #[test]
    fn test_run_patch_invalid_spec_leaves_config() {
        let dir = tempfile::tempdir().unwrap();
        let spec = dir.path().join("genesis.json");
        let config = dir.path().join("config.json");
        std::fs::write(&spec, r#"{"config": {}}"#).unwrap();
        std::fs::write(&config, r#"{"Consensus": {}}"#).unwrap();

        let args = PatchArgs {
            genesis: spec,
            config: config.clone(),
        };
        assert!(run_patch(&args, &runtime_config(dir.path())).is_err());
        assert_eq!(
            std::fs::read_to_string(&config).unwrap(),
            r#"{"Consensus": {}}"#
        );
    }
}
