//! # gensrv over real sockets
//!
//! Servers bind ephemeral ports so several can run side by side.

#[cfg(test)]
mod tests {
    use crate::integration::fixtures::{self, to_bytes, SINGLE_ACCOUNT_ROOT};
    use gf_04_genesis_service::{GenesisService, ServiceMetrics, StoreMode};
    use gf_05_api_gateway::{GatewayConfig, GenesisServer, ShutdownHandle};
    use serde_json::Value;
    use std::collections::HashSet;
    use std::net::SocketAddr;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::task::JoinHandle;

    async fn start() -> (SocketAddr, ShutdownHandle, JoinHandle<()>) {
        let server = GenesisServer::bind(&GatewayConfig::for_testing(), GenesisService::new())
            .await
            .unwrap();
        let addr = server.local_addr();
        let handle = server.shutdown_handle();
        let task = tokio::spawn(async move {
            server.serve().await.unwrap();
        });
        (addr, handle, task)
    }

    async fn stop(handle: ShutdownHandle, task: JoinHandle<()>) {
        handle.shutdown();
        tokio::time::timeout(Duration::from_secs(10), task)
            .await
            .expect("server did not stop")
            .unwrap();
    }

    async fn post(client: &reqwest::Client, addr: SocketAddr, body: Vec<u8>) -> (u16, Value) {
        let response = client
            .post(format!("http://{addr}/genesis"))
            .header("content-type", "application/json")
            .body(body)
            .send()
            .await
            .unwrap();
        let status = response.status().as_u16();
        (status, response.json().await.unwrap())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_requests_return_their_own_headers() {
        let (addr, handle, task) = start().await;
        let client = reqwest::Client::new();

        let mut requests = tokio::task::JoinSet::new();
        for count in 1..=16u64 {
            let client = client.clone();
            requests.spawn(async move {
                let spec = fixtures::many_accounts(count);
                let (status, header) = post(&client, addr, to_bytes(&spec)).await;
                (spec, status, header)
            });
        }

        let service = GenesisService::new();
        let mut hashes = HashSet::new();
        while let Some(result) = requests.join_next().await {
            let (spec, status, header) = result.unwrap();
            assert_eq!(status, 200);

            let direct = service
                .construct(&to_bytes(&spec), &StoreMode::Ephemeral)
                .unwrap();
            assert_eq!(header, serde_json::to_value(&direct).unwrap());
            hashes.insert(header["hash"].as_str().unwrap().to_string());
        }
        assert_eq!(hashes.len(), 16);

        stop(handle, task).await;
    }

    #[tokio::test]
    async fn test_error_responses() {
        let (addr, handle, task) = start().await;
        let client = reqwest::Client::new();

        let (status, body) = post(
            &client,
            addr,
            br#"{"config": {}, "difficulty": "1", "gasLimit": "1"}"#.to_vec(),
        )
        .await;
        assert_eq!(status, 400);
        assert_eq!(body["kind"], "InvalidSpec");
        assert!(body["message"].as_str().unwrap().contains("alloc"));

        let (status, body) = post(&client, addr, b"[]".to_vec()).await;
        assert_eq!(status, 400);
        assert_eq!(body["kind"], "InvalidSpec");

        let pong = client
            .get(format!("http://{addr}/"))
            .send()
            .await
            .unwrap()
            .text()
            .await
            .unwrap();
        assert_eq!(pong, "pong");

        stop(handle, task).await;
    }

    #[tokio::test]
    async fn test_servers_run_side_by_side() {
        let (first, first_handle, first_task) = start().await;
        let (second, second_handle, second_task) = start().await;
        assert_ne!(first, second);

        let client = reqwest::Client::new();
        let body = to_bytes(&fixtures::single_account());
        let (_, a) = post(&client, first, body.clone()).await;
        stop(first_handle, first_task).await;

        let (status, b) = post(&client, second, body).await;
        assert_eq!(status, 200);
        assert_eq!(a, b);
        assert_eq!(b["stateRoot"], SINGLE_ACCOUNT_ROOT);

        stop(second_handle, second_task).await;
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_shutdown_lets_running_construction_finish() {
        let config = GatewayConfig {
            shutdown_timeout: Duration::from_secs(120),
            ..GatewayConfig::for_testing()
        };
        let metrics = Arc::new(ServiceMetrics::new());
        let server = GenesisServer::bind(&config, GenesisService::with_metrics(Arc::clone(&metrics)))
            .await
            .unwrap();
        let addr = server.local_addr();
        let handle = server.shutdown_handle();
        let task = tokio::spawn(server.serve());

        let body = to_bytes(&fixtures::many_accounts(40_000));
        let request = tokio::spawn(async move {
            let client = reqwest::Client::new();
            post(&client, addr, body).await
        });

        // Long enough for the body to arrive, far shorter than the build.
        tokio::time::sleep(Duration::from_millis(300)).await;
        handle.shutdown();

        let (status, header) = request.await.unwrap();
        assert_eq!(status, 200);
        assert!(header["stateRoot"].as_str().unwrap().starts_with("0x"));

        tokio::time::timeout(Duration::from_secs(10), task)
            .await
            .expect("server did not stop")
            .unwrap()
            .unwrap();

        let counts = metrics.snapshot();
        assert_eq!(counts.succeeded, 1);
        assert_eq!(counts.accounts_committed, 40_000);
    }
}
