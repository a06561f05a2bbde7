use std::env;
use std::net::SocketAddr;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    if let Err(err) = run().await {
        error!("{err}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), String> {
    let raw = env::var("SCORING_STUB_ADDR").unwrap_or_else(|_| scoring_stub::DEFAULT_ADDR.to_string());
    let addr: SocketAddr = raw
        .parse()
        .map_err(|err| format!("invalid SCORING_STUB_ADDR {raw:?}: {err}"))?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|err| format!("bind {addr}: {err}"))?;
    info!("scoring stub listening on http://{addr}");
    axum::serve(listener, scoring_stub::router())
        .await
        .map_err(|err| format!("server error: {err}"))
}
