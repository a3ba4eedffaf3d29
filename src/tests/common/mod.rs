// tests/common/mod.rs
pub use axum::Router;
pub use serde_json::json;
pub use tokio::task::JoinHandle;

use std::net::SocketAddr;

use crate::config::settings::ClientConfig;

/// Spawn an Axum router on an ephemeral port and return (JoinHandle, SocketAddr)
pub async fn spawn_axum(router: Router) -> (JoinHandle<()>, SocketAddr) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind failed");
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        axum::serve(listener, router).await.expect("server failed");
    });
    (handle, addr)
}

/// Client config pointed at a mock server
pub fn test_config(base_url: &str) -> ClientConfig {
    ClientConfig {
        corp_id: "ww-test-corp".to_owned(),
        agent_id: 1000002,
        agent_secret: "agent-secret-1".to_owned(),
        contacts_secret: None,
        base_url: base_url.trim_end_matches('/').to_owned(),
        safe_mode: false,
    }
}
