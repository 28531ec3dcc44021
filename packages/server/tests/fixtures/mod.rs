//! Test fixtures shared by the integration tests.

use std::{
    net::TcpStream,
    thread,
    time::{Duration, Instant},
};

use rakugaki_server::ServerConfig;

/// A server running on its own thread and tokio runtime.
///
/// The thread lives until the test process exits.
pub struct TestServer {
    port: u16,
}

impl TestServer {
    /// Start a server on `127.0.0.1:port` with the default configuration.
    pub fn start(port: u16) -> Self {
        Self::start_with(ServerConfig {
            host: "127.0.0.1".to_string(),
            port,
            ..ServerConfig::default()
        })
    }

    /// Start a server with a custom configuration and wait until it accepts connections.
    pub fn start_with(config: ServerConfig) -> Self {
        let port = config.port;
        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("Failed to build runtime");
            runtime.block_on(async move {
                if let Err(e) = rakugaki_server::run_server(config).await {
                    panic!("Test server failed: {e}");
                }
            });
        });

        wait_for_port(port);
        Self { port }
    }

    pub fn base_url(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    pub fn ws_url(&self) -> String {
        format!("ws://127.0.0.1:{}/ws", self.port)
    }
}

fn wait_for_port(port: u16) {
    let deadline = Instant::now() + Duration::from_secs(5);
    while Instant::now() < deadline {
        if TcpStream::connect(("127.0.0.1", port)).is_ok() {
            return;
        }
        thread::sleep(Duration::from_millis(20));
    }
    panic!("Test server did not start on port {port}");
}
