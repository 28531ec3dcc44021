//! Terminal drawing client.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin rakugaki-client -- --name alice
//! ```

use clap::Parser;
use rakugaki_client::{ClientArgs, run_client};
use rakugaki_shared::logger::setup_logger;

#[tokio::main]
async fn main() {
    let args = ClientArgs::parse();
    setup_logger(env!("CARGO_BIN_NAME"), &args.log_level);

    let code = match run_client(args).await {
        Ok(()) => 0,
        Err(e) => {
            tracing::error!("Client error: {}", e);
            eprintln!("{e}");
            1
        }
    };
    std::process::exit(code);
}
