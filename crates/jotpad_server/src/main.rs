use anyhow::Context;
use jotpad_core::init_logging;
use jotpad_server::{config::ServerConfig, start_server};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    let config = ServerConfig::load().context("server configuration")?;
    init_logging(&config.log_level, config.log_dir.as_deref()).map_err(anyhow::Error::msg)?;

    start_server(config).await?;
    Ok(())
}
