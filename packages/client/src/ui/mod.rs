//! Command-line chat client.

mod cli;
mod command;
mod runner;

pub use cli::ClientArgs;
pub use command::Command;
pub use runner::run_client;
