use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::server::{self, AppState};
use crate::session::SessionStore;

pub async fn run_serve(config: AppConfig, open_browser: bool) -> Result<()> {
    let store = SessionStore::new(&config.data_dir).context("Failed to open session store")?;
    let state = AppState::new(Arc::new(store), config.gate.clone());

    let (listener, addr) = server::bind(config.bind)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind))?;

    let login_url = format!("http://{}/login", addr);
    println!("Serving login page at {}", login_url);

    if open_browser && open::that(&login_url).is_err() {
        warn!("Could not open browser automatically");
    }

    server::serve(listener, state, async {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Received Ctrl-C, shutting down");
        }
    })
    .await
}
