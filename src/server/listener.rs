use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::board::SharedBoard;
use crate::config::Config;
use crate::http::connection::Connection;
use crate::http::handler::RequestHandler;

/// Binds `addr`, retrying up to `attempts` times with `delay` in between.
pub async fn bind_with_retry(addr: &str, attempts: u32, delay: Duration) -> anyhow::Result<TcpListener> {
    let attempts = attempts.max(1);
    let mut attempt = 1;

    loop {
        match TcpListener::bind(addr).await {
            Ok(listener) => return Ok(listener),
            Err(e) if attempt < attempts => {
                warn!(addr, attempt, attempts, error = %e, "Bind failed, retrying");
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(e) => {
                return Err(e).with_context(|| format!("failed to bind {} after {} attempts", addr, attempts));
            }
        }
    }
}

/// Accepts connections forever, giving each its own [`Connection`].
///
/// Connections are served on separate tasks. Request processing is still
/// serialized by the board lock inside the handler.
pub async fn serve(listener: TcpListener, handler: RequestHandler) -> anyhow::Result<()> {
    loop {
        let (socket, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                warn!(error = %e, "Accept failed");
                continue;
            }
        };
        info!("Accepted connection from {}", peer);

        let handler = handler.clone();
        tokio::spawn(async move {
            let mut conn = Connection::new(socket, handler);
            if let Err(e) = conn.run().await {
                tracing::error!("Connection error from {}: {:#}", peer, e);
            }
        });
    }
}

pub async fn run(cfg: &Config, board: SharedBoard) -> anyhow::Result<()> {
    let listener = bind_with_retry(&cfg.listen_addr, cfg.bind_attempts, cfg.bind_retry_delay()).await?;
    info!("Listening on {}", listener.local_addr()?);

    serve(listener, RequestHandler::from_config(cfg, board)).await
}
