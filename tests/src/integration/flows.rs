//! # Integration Test Flows
//!
//! The service, the durable store and the config patch working together:
//!
//! 1. **Service → durable store**: a durable construction can be reopened and
//!    read back (header records, accounts, code, preimages).
//! 2. **Service → patch**: `Consensus.Goat` holds exactly the header the
//!    service returns for the same spec.
//! 3. **Ephemeral vs durable**: both modes agree on every header field.

#[cfg(test)]
mod tests {
    use crate::integration::fixtures::{self, to_bytes, KEY_ONE_ADDRESS};
    use genesis_runtime::{run_patch, PatchArgs, RuntimeConfig};
    use gf_01_commitment_store::{schema, CommitmentStore, DurableConfig, StoreMode};
    use gf_02_state_commitment::{code_hash, StateCommitmentBuilder};
    use gf_03_header_derivation::encode_header;
    use gf_04_genesis_service::{ErrorKind, GenesisService};
    use shared_types::{keccak256, Address, BlockHeader, U256, EMPTY_ROOT_HASH};
    use std::path::Path;

    fn durable(dir: &Path) -> StoreMode {
        StoreMode::Durable(DurableConfig::for_testing(dir))
    }

    fn address(text: &str) -> Address {
        Address::from_slice(&hex::decode(text.trim_start_matches("0x")).unwrap())
    }

    // =========================================================================
    // SERVICE → DURABLE STORE
    // =========================================================================

    #[test]
    fn test_durable_commitment_can_be_reopened() {
        let dir = tempfile::tempdir().unwrap();
        let spec = fixtures::prague_devnet(7);
        let header = GenesisService::new()
            .construct(&to_bytes(&spec), &durable(dir.path()))
            .unwrap();

        let store = CommitmentStore::open(&durable(dir.path())).unwrap();

        // Header records
        let rlp = store
            .get(&schema::header_key(0, &header.hash))
            .unwrap()
            .unwrap();
        assert_eq!(rlp, encode_header(&header));
        assert_eq!(keccak256(&rlp), header.hash);
        assert_eq!(
            store.get(&schema::canonical_hash_key(0)).unwrap().unwrap(),
            header.hash.as_bytes()
        );
        assert_eq!(
            store.get(schema::HEAD_HEADER_KEY).unwrap().unwrap(),
            header.hash.as_bytes()
        );
        let config: serde_json::Value = serde_json::from_slice(
            &store.get(&schema::config_key(&header.hash)).unwrap().unwrap(),
        )
        .unwrap();
        assert_eq!(config, spec["config"]);

        // Accounts
        let builder = StateCommitmentBuilder::new();
        let contract = address("4242424242424242424242424242424242424242");
        let (record, proof) = builder
            .account(&store, &header.state_root, &contract)
            .unwrap();
        let record = record.unwrap();
        assert_eq!(record.nonce, 1);
        assert_ne!(record.storage_root, EMPTY_ROOT_HASH);
        assert!(!proof.nodes.is_empty());

        let code = hex::decode("6080604052").unwrap();
        assert_eq!(record.code_hash, code_hash(&code));
        assert_eq!(
            store.get(&schema::code_key(&record.code_hash)).unwrap().unwrap(),
            code
        );

        let funded = address(KEY_ONE_ADDRESS);
        assert_eq!(
            store
                .get(&schema::preimage_key(&keccak256(funded.as_bytes())))
                .unwrap()
                .unwrap(),
            funded.as_bytes()
        );
        let (record, _) = builder.account(&store, &header.state_root, &funded).unwrap();
        assert_eq!(record.unwrap().balance, U256::exp10(18));

        store.close().unwrap();
    }

    #[test]
    fn test_durable_and_ephemeral_agree() {
        let dir = tempfile::tempdir().unwrap();
        let service = GenesisService::new();
        for spec in [
            fixtures::single_account(),
            fixtures::prague_devnet(1),
            fixtures::many_accounts(64),
        ] {
            let raw = to_bytes(&spec);
            let ephemeral = service.construct(&raw, &StoreMode::Ephemeral).unwrap();
            let stored = service.construct(&raw, &durable(dir.path())).unwrap();
            assert_eq!(ephemeral, stored);
        }
        assert_eq!(service.metrics().snapshot().succeeded, 6);
    }

    #[test]
    fn test_second_durable_writer_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        let held = CommitmentStore::open(&durable(dir.path())).unwrap();

        let err = GenesisService::new()
            .construct(&to_bytes(&fixtures::single_account()), &durable(dir.path()))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConstructionFailed);
        assert_eq!(err.cause_kind(), ErrorKind::StoreUnavailable);

        held.close().unwrap();
        assert!(GenesisService::new()
            .construct(&to_bytes(&fixtures::single_account()), &durable(dir.path()))
            .is_ok());
    }

    // =========================================================================
    // SERVICE → PATCH
    // =========================================================================

    #[test]
    fn test_patch_round_trip_matches_service_output() {
        let dir = tempfile::tempdir().unwrap();
        let spec_path = dir.path().join("regtest.json");
        let config_path = dir.path().join("regtest-config.json");
        let spec = fixtures::prague_devnet(48815);
        std::fs::write(&spec_path, to_bytes(&spec)).unwrap();
        std::fs::write(
            &config_path,
            r#"{"Node": {"DataDir": "/data"}, "Consensus": {"Goat": null}}"#,
        )
        .unwrap();

        let runtime = RuntimeConfig {
            store: DurableConfig::for_testing(dir.path().join("chain")),
            ..Default::default()
        };
        let args = PatchArgs {
            genesis: spec_path,
            config: config_path.clone(),
        };
        let patched_header = run_patch(&args, &runtime).unwrap();

        let direct = GenesisService::new()
            .construct(&to_bytes(&spec), &StoreMode::Ephemeral)
            .unwrap();
        assert_eq!(patched_header, direct);

        let text = std::fs::read_to_string(&config_path).unwrap();
        let config: serde_json::Value = serde_json::from_str(&text).unwrap();
        let goat: BlockHeader =
            serde_json::from_value(config["Consensus"]["Goat"].clone()).unwrap();
        assert_eq!(goat, direct);
        assert_eq!(config["Node"]["DataDir"], "/data");
        // Two-space indentation, config keys sorted, header in field order.
        assert!(text.starts_with("{\n  \"Consensus\": {\n    \"Goat\": {\n      \"parentHash\""));
    }

    #[test]
    fn test_patch_without_consensus_fails_cleanly() {
        let dir = tempfile::tempdir().unwrap();
        let spec_path = dir.path().join("regtest.json");
        let config_path = dir.path().join("regtest-config.json");
        std::fs::write(&spec_path, to_bytes(&fixtures::single_account())).unwrap();
        std::fs::write(&config_path, r#"{"Node": {}}"#).unwrap();

        let runtime = RuntimeConfig {
            store: DurableConfig::for_testing(dir.path().join("chain")),
            ..Default::default()
        };
        let args = PatchArgs {
            genesis: spec_path,
            config: config_path.clone(),
        };
        let err = run_patch(&args, &runtime).unwrap_err();
        assert!(err.to_string().contains("Consensus"));
        assert_eq!(std::fs::read_to_string(&config_path).unwrap(), r#"{"Node": {}}"#);
    }
}
