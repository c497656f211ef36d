// server/src/main.rs

use anyhow::Result;
use medibook_server::cli::start_cli;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    start_cli().await
}
