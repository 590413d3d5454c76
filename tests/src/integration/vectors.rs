//! # Published vectors, end to end
//!
//! Raw JSON in, header out, through the same path the binaries and the
//! HTTP server take. Each hash was produced by an independent client for
//! the same input.

#[cfg(test)]
mod tests {
    use crate::integration::fixtures::{to_bytes, KEY_ONE_ADDRESS, SINGLE_ACCOUNT_ROOT};
    use gf_04_genesis_service::{GenesisService, StoreMode};
    use serde_json::{json, Value};

    fn header_for(config: Value) -> Value {
        let spec = json!({
            "config": config,
            "alloc": {KEY_ONE_ADDRESS: {"balance": "1000"}},
            "difficulty": "1",
            "gasLimit": "30000000"
        });
        let header = GenesisService::new()
            .construct(&to_bytes(&spec), &StoreMode::Ephemeral)
            .unwrap();
        serde_json::to_value(header).unwrap()
    }

    #[test]
    fn test_fork_vectors() {
        let cases = [
            (
                json!({"chainId": 1337}),
                "0x145559b8ece736e57525c81df52c19d928943a696440090edd1281be274a9df7",
            ),
            (
                json!({"chainId": 1337, "londonBlock": 0}),
                "0xa982c80d258ba97501a243fd76dcaeaef22189212956696b7dab76fd4b03fe0a",
            ),
            (
                json!({"chainId": 1337, "londonBlock": 0, "shanghaiTime": 0}),
                "0x37ef8dd6ce537a14143c8a640d2d3d47db6a96202030397ba013e7d089bc39ff",
            ),
            (
                json!({"chainId": 1337, "londonBlock": 0, "shanghaiTime": 0, "cancunTime": 0}),
                "0xb4fda4285ff92b429e432c6ddf5ce8ee649b56a660ff96a82cc6a0ca180005f2",
            ),
            (
                json!({
                    "chainId": 1337,
                    "londonBlock": 0,
                    "shanghaiTime": 0,
                    "cancunTime": 0,
                    "pragueTime": 0
                }),
                "0x057aa4973f434554bfb5cbf78e5c52683eaa026ecdedc7f070a0e5f3abd5e780",
            ),
        ];

        for (config, expected) in cases {
            let header = header_for(config.clone());
            assert_eq!(header["stateRoot"], SINGLE_ACCOUNT_ROOT, "{config}");
            assert_eq!(header["hash"], expected, "{config}");
        }
    }

    #[test]
    fn test_null_fields_follow_forks() {
        let plain = header_for(json!({}));
        for field in [
            "baseFeePerGas",
            "withdrawalsRoot",
            "blobGasUsed",
            "excessBlobGas",
            "parentBeaconBlockRoot",
            "requestsHash",
        ] {
            assert!(plain[field].is_null(), "{field}");
        }

        let prague = header_for(json!({
            "londonBlock": 0,
            "shanghaiTime": 0,
            "cancunTime": 0,
            "pragueTime": 0
        }));
        assert_eq!(prague["baseFeePerGas"], "0x3b9aca00");
        assert_eq!(prague["blobGasUsed"], "0x0");
        assert_eq!(
            prague["requestsHash"],
            "0xe3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_two_account_state_root() {
        let spec = json!({
            "config": {},
            "alloc": {
                KEY_ONE_ADDRESS: {"balance": "1000"},
                "0x2b5ad5c4795c026514f8317c7a215e218dccd6cf": {
                    "balance": "0xde0b6b3a7640000",
                    "nonce": 1,
                    "code": "0x6000",
                    "storage": {"0x01": "0x2a", "0x02": "0x00"}
                }
            },
            "difficulty": "1",
            "gasLimit": "30000000"
        });
        let header = GenesisService::new()
            .construct(&to_bytes(&spec), &StoreMode::Ephemeral)
            .unwrap();
        assert_eq!(
            hex::encode(header.state_root),
            "7be907fbe0a1113d280e89068cab29ad565d1477a7e070e19144d6f2942624e0"
        );
    }

    #[test]
    fn test_empty_state_with_default_gas_limit() {
        let spec = json!({"config": {}, "alloc": {}, "difficulty": "1", "gasLimit": "0"});
        let header = GenesisService::new()
            .construct(&to_bytes(&spec), &StoreMode::Ephemeral)
            .unwrap();
        assert_eq!(header.gas_limit, 4_712_388);
        assert_eq!(
            hex::encode(header.hash),
            "4bf0cc9cdd8f41a1fb60e11ad4c1259892d2c5f71d343e74ea4877852ee98b2a"
        );
    }

    #[test]
    fn test_numeric_encodings_are_equivalent() {
        let forms = [
            json!({"balance": 1000}),
            json!({"balance": "1000"}),
            json!({"balance": "0x3e8"}),
        ];
        let mut roots = forms.iter().map(|account| {
            let spec = json!({
                "config": {},
                "alloc": {KEY_ONE_ADDRESS: account},
                "difficulty": 1,
                "gasLimit": "0x1c9c380"
            });
            GenesisService::new()
                .construct(&to_bytes(&spec), &StoreMode::Ephemeral)
                .unwrap()
                .hash
        });
        let first = roots.next().unwrap();
        assert!(roots.all(|hash| hash == first));
    }
}
