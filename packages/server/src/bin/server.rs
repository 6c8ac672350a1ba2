//! Development relay server for listing chats.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin rentchat-server -- --port 8080
//! ```

use clap::Parser;
use rentchat_shared::logger::setup_logger;

/// Relay listing chat messages between connected users.
#[derive(Debug, Parser)]
#[command(name = "rentchat-server", version, about)]
struct ServerArgs {
    /// Address to bind
    #[arg(long, env = "RENTCHAT_SERVER_HOST", default_value = "127.0.0.1")]
    host: String,

    /// Port to bind
    #[arg(short, long, env = "RENTCHAT_SERVER_PORT", default_value_t = 8080)]
    port: u16,
}

#[tokio::main]
async fn main() {
    let args = ServerArgs::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_PKG_NAME"), "debug");

    if let Err(e) = rentchat_server::run(&args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
