use anyhow::Context;
use button_web::board::Board;
use button_web::config::Config;
use button_web::server;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .with_level(true)
        .init();

    let cfg = Config::load().context("failed to load configuration")?;
    let board = Board::new(cfg.board.simulated()).into_shared();

    tokio::select! {
        res = server::listener::run(&cfg, board) => {
            res?;
        }

        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}
