//! HTTP surface: login page, home placeholder and the registry API.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tracing::info;

use crate::login::GateConfig;
use crate::session::SessionProvider;

mod handlers;

/// Shared request state.
#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn SessionProvider>,
    pub gate: GateConfig,
}

impl AppState {
    pub fn new(provider: Arc<dyn SessionProvider>, gate: GateConfig) -> Self {
        Self { provider, gate }
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/login", get(handlers::login_page))
        .route("/app", get(handlers::home))
        .route("/api/engines", get(handlers::list_engines))
        .route("/api/options", post(handlers::resolve_options))
        .with_state(state)
}

/// Serve on an already bound listener until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, state: AppState, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr()?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Bind `addr`, returning the listener and the address actually bound.
pub async fn bind(addr: SocketAddr) -> Result<(TcpListener, SocketAddr)> {
    let listener = TcpListener::bind(addr).await?;
    let local = listener.local_addr()?;
    Ok((listener, local))
}

#[cfg(test)]
mod tests;
