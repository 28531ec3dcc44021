//! Rakugaki canvas server.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin rakugaki-server -- --port 3001
//! ```

use clap::Parser;
use rakugaki_server::ServerArgs;
use rakugaki_shared::logger::setup_logger;

#[tokio::main]
async fn main() {
    let args = ServerArgs::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &args.log_level);

    // Run the server
    if let Err(e) = rakugaki_server::run_server(args.into_config()).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
