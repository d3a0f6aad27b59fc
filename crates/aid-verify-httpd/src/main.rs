//! HTTP verification service.
//!
//! Serves the delegation-verification engine over a small JSON API backed
//! by an on-disk store. Configuration comes from the environment:
//!
//! - `AIDV_STORE_DIR`: store directory (default `$HOME/.aid-verify/store`)
//! - `AIDV_DEPTH`: default verification depth (default `full_chain`)
//! - `HOST` / `PORT`: bind address (default `0.0.0.0:9723`)

mod routes;
mod state;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, Context};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use aid_verify::store::FileStore;
use aid_verify::{AgentVerifier, VerificationDepth, VerifierConfig};

use crate::routes::create_router;
use crate::state::AppState;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("aid_verify_httpd=info,aid_verify=info,tower_http=info"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn store_dir() -> anyhow::Result<PathBuf> {
    if let Ok(dir) = std::env::var("AIDV_STORE_DIR") {
        return Ok(PathBuf::from(dir));
    }
    let home = std::env::var("HOME").context("neither AIDV_STORE_DIR nor HOME is set")?;
    Ok(PathBuf::from(home).join(".aid-verify").join("store"))
}

fn default_depth() -> anyhow::Result<VerificationDepth> {
    match std::env::var("AIDV_DEPTH") {
        Ok(raw) => raw
            .parse::<VerificationDepth>()
            .map_err(|e| anyhow!("invalid AIDV_DEPTH: {e}")),
        Err(_) => Ok(VerificationDepth::default()),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let dir = store_dir()?;
    let depth = default_depth()?;

    let store = Arc::new(
        FileStore::new(&dir)
            .with_context(|| format!("failed to open store at {}", dir.display()))?,
    );
    let verifier = AgentVerifier::new(
        store.clone(),
        store.clone(),
        store,
        VerifierConfig { depth },
    );
    let state = AppState::new(verifier);

    let app = create_router(state).layer(TraceLayer::new_for_http());

    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(9723);
    let addr = format!("{host}:{port}");

    tracing::info!(store = %dir.display(), %depth, "verification service starting");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("service stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install ctrl-c handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
