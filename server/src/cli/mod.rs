// server/src/cli/mod.rs

pub mod cli;
pub mod commands;
pub mod handlers;

pub use cli::{build_context, run_command, start_cli};
pub use commands::{CliArgs, Commands};
pub use handlers::CliContext;
