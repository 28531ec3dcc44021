//! Command-line configuration for the canvas server.

use clap::{ArgAction, Parser};

/// Default listen address
pub const DEFAULT_HOST: &str = "0.0.0.0";
/// Default listen port
pub const DEFAULT_PORT: u16 = 3001;

/// Rakugaki canvas server
#[derive(Debug, Clone, Parser)]
#[command(name = "rakugaki-server", version, about)]
pub struct ServerArgs {
    /// Address to bind
    #[arg(long, default_value = DEFAULT_HOST)]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Log level for the workspace crates (overridden by RUST_LOG)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Drop drawing messages from connections that have not sent `user:join`
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub require_join: bool,
}

impl ServerArgs {
    pub fn into_config(self) -> ServerConfig {
        ServerConfig {
            host: self.host,
            port: self.port,
            require_join: self.require_join,
        }
    }
}

/// Runtime configuration of the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub require_join: bool,
}

impl ServerConfig {
    /// `host:port` to bind
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            require_join: true,
        }
    }
}
