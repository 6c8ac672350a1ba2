//! Interactive chat client for one listing conversation.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin rentchat-client -- --listing L1 --receiver U2 --sender U1 --token U1
//! ```
//!
//! Add `--mock` to run without a backend.

use clap::Parser;
use rentchat_client::ui::ClientArgs;
use rentchat_shared::logger::setup_logger;

#[tokio::main]
async fn main() {
    let args = ClientArgs::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_PKG_NAME"), "info");

    if let Err(e) = rentchat_client::run_client(args).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
