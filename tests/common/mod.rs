//! Spawns a gateway on an ephemeral port for integration tests.

#![allow(clippy::panic, dead_code)]

use std::net::SocketAddr;

use eventpro_gateway::config::GatewayConfig;
use eventpro_gateway::server::{build_app, build_state};

/// A running server and the data directory it writes to.
pub struct TestServer {
    pub addr: SocketAddr,
    pub dir: tempfile::TempDir,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    pub fn ws_url(&self) -> String {
        format!("ws://{}/ws", self.addr)
    }
}

pub async fn spawn() -> TestServer {
    let Ok(dir) = tempfile::tempdir() else {
        panic!("tempdir");
    };
    let config = GatewayConfig::for_data_dir(dir.path());
    let Ok(state) = build_state(&config).await else {
        panic!("state should build");
    };
    let app = build_app(state, &config);
    let Ok(listener) = tokio::net::TcpListener::bind(config.listen_addr).await else {
        panic!("bind");
    };
    let Ok(addr) = listener.local_addr() else {
        panic!("local addr");
    };
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    TestServer { addr, dir }
}
