//! Command-line configuration for the drawing client.

use clap::Parser;

/// Default server endpoint
pub const DEFAULT_URL: &str = "ws://127.0.0.1:3001/ws";

/// Rakugaki terminal drawing client
#[derive(Debug, Clone, Parser)]
#[command(name = "rakugaki-client", version, about)]
pub struct ClientArgs {
    /// WebSocket endpoint of the server
    #[arg(long, default_value = DEFAULT_URL)]
    pub url: String,

    /// Display name sent with user:join (prompted when absent)
    #[arg(short, long)]
    pub name: Option<String>,

    /// Log level for the workspace crates (overridden by RUST_LOG)
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        // テスト項目: 引数なしで既定の接続先とログレベルが使われる
        let args = ClientArgs::try_parse_from(["rakugaki-client"]).unwrap();
        assert_eq!(args.url, DEFAULT_URL);
        assert_eq!(args.name, None);
        assert_eq!(args.log_level, "warn");
    }

    #[test]
    fn test_name_argument() {
        // テスト項目: --name で参加名を指定できる
        let args = ClientArgs::try_parse_from(["rakugaki-client", "--name", "alice"]).unwrap();
        assert_eq!(args.name.as_deref(), Some("alice"));
    }
}
