//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::time::Duration;

use overflow_api::config::ServerConfig;
use overflow_api::http::ApiServer;
use overflow_api::lifecycle::Shutdown;
use overflow_api::ApiRegistry;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// A server running on an ephemeral local port.
pub struct TestServer {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    pub handle: JoinHandle<Result<(), std::io::Error>>,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

/// Start a server for `registry` on 127.0.0.1 with an OS-assigned port.
pub async fn start_server(mut config: ServerConfig, registry: ApiRegistry) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    config.listener.bind_address = addr.to_string();

    let server = ApiServer::new(config, registry).expect("registry should freeze");
    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let handle = tokio::spawn(async move { server.run(listener, server_shutdown).await });

    // Listener is already bound; give the accept loop a moment to start
    tokio::time::sleep(Duration::from_millis(50)).await;

    TestServer {
        addr,
        shutdown,
        handle,
    }
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
