pub mod auth;
pub mod config;
pub mod error;
pub mod http;
pub mod models;
pub mod state;
pub mod telemetry;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use auth::Authorizer;
use tokenvault_core::authority::AuthoritySet;
use tokenvault_core::cache::TokenCache;
use tokenvault_core::transform::{Base64Transform, Transform};
use tokenvault_core::vault::TokenVault;
use tokio::net::TcpListener;
use tracing::{info, warn};

pub use state::AppState;
pub use telemetry::RequestId;

#[derive(Clone)]
pub struct VaultRuntimeConfig {
    pub http_addr: SocketAddr,
    pub store_kind: String,
    pub cache_sweep_interval: Duration,
}

pub async fn run(config: VaultRuntimeConfig) -> anyhow::Result<()> {
    let state = build_state_with_store(&config.store_kind)?;

    let http_listener = TcpListener::bind(config.http_addr).await.with_context(|| {
        format!(
            "failed to bind http listener on {addr}",
            addr = config.http_addr
        )
    })?;

    let http_addr = http_listener.local_addr()?;
    info!(%http_addr, store = %config.store_kind, "http server listening");

    let sweeper = tokio::spawn(sweep_cache(state.clone(), config.cache_sweep_interval));

    let http_router = http::router(state);
    axum::serve(http_listener, http_router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    sweeper.abort();
    Ok(())
}

pub fn build_state() -> anyhow::Result<AppState> {
    build_state_with_store(&config::default_store_kind())
}

pub fn build_state_with_store(store_kind: &str) -> anyhow::Result<AppState> {
    let authorizer = Authorizer::from_env();
    let authorities = AuthoritySet::from_env();
    let store = config::load_store(store_kind)?;
    let transform: Box<dyn Transform> = Box::new(Base64Transform);
    let vault = TokenVault::new(store, transform, TokenCache::from_env());
    Ok(AppState::new(
        Arc::new(vault),
        Arc::new(authorizer),
        Arc::new(authorities),
    ))
}

async fn sweep_cache(state: AppState, interval: Duration) {
    let mut ticker = tokio::time::interval(interval);
    loop {
        ticker.tick().await;
        state.vault.sweep_cache();
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(?err, "failed to install ctrl-c handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => warn!(?err, "failed to install sigterm handler"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
