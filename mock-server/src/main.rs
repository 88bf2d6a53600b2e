use std::sync::Arc;

use tokio::{net::TcpListener, sync::RwLock};

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    tracing_subscriber::fmt::try_init().ok();

    let port = std::env::var("PORT").unwrap_or_else(|_| "8080".to_string());
    let seed = std::env::var("SEED_BOOKS")
        .ok()
        .and_then(|n| n.parse().ok())
        .unwrap_or(0);
    let addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(%addr, seed, "mock inventory API listening");
    let db = Arc::new(RwLock::new(mock_server::Store::seeded(seed)));
    mock_server::run_with(listener, db).await
}
