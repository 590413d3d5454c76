//! Genesis specifications shared by the integration flows and benchmarks.

use serde_json::{json, Value};

/// Address of private key 1.
pub const KEY_ONE_ADDRESS: &str = "7e5f4552091a69125d5dfcb7b8c2659029395bdf";

/// State root of `KEY_ONE_ADDRESS` holding 1000 wei.
pub const SINGLE_ACCOUNT_ROOT: &str =
    "0x12f9a5f66fd529735f784f6452eb674390fd09339e8dfe38a2b9a6bca591c89b";

/// One funded account, no forks active.
pub fn single_account() -> Value {
    json!({
        "config": {"chainId": 1337},
        "alloc": {KEY_ONE_ADDRESS: {"balance": "1000"}},
        "difficulty": "1",
        "gasLimit": "30000000"
    })
}

/// Every fork up to Prague active at genesis, with a contract account.
pub fn prague_devnet(chain_id: u64) -> Value {
    json!({
        "config": {
            "chainId": chain_id,
            "londonBlock": 0,
            "shanghaiTime": 0,
            "cancunTime": 0,
            "pragueTime": 0
        },
        "alloc": {
            KEY_ONE_ADDRESS: {"balance": "0xde0b6b3a7640000"},
            "0x4242424242424242424242424242424242424242": {
                "balance": "0",
                "nonce": "1",
                "code": "0x6080604052",
                "storage": {
                    "0x00": "0x01",
                    "0x01": "0x0000000000000000000000000000000000000000000000000000000000000000"
                }
            }
        },
        "difficulty": "0",
        "gasLimit": "0x1c9c380",
        "extraData": "0x676f6174",
        "timestamp": "0x65f0a000"
    })
}

/// A spec with `count` funded accounts, addresses derived from the index.
pub fn many_accounts(count: u64) -> Value {
    let alloc: serde_json::Map<String, Value> = (1..=count)
        .map(|i| {
            let address = format!("{:040x}", i);
            (address, json!({"balance": format!("{}", i * 1_000)}))
        })
        .collect();
    json!({
        "config": {"chainId": 1337, "londonBlock": 0},
        "alloc": alloc,
        "difficulty": "1",
        "gasLimit": "30000000"
    })
}

pub fn to_bytes(spec: &Value) -> Vec<u8> {
    serde_json::to_vec(spec).unwrap_or_default()
}
