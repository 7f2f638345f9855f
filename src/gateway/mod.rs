//! Axum-based HTTP front end for the search view.
//!
//! One page at `/`, a form post that starts a search, a JSON view of the
//! state and the current infographic as raw bytes. Request bodies are capped
//! and requests time out.

mod handlers;

use handlers::{
    handle_health, handle_index, handle_infographic, handle_search, handle_state,
};

use crate::config::Config;
use crate::services::{ComparisonService, GeminiComparisonService};
use crate::view::{HtmlRenderer, SearchController, ViewContext};
use anyhow::Result;
use axum::{
    Router,
    http::StatusCode,
    routing::{get, post},
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;

/// Maximum request body size (64KB)
pub const MAX_BODY_SIZE: usize = 65_536;
/// Request timeout (30s)
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Shared state for all axum handlers
#[derive(Clone)]
pub struct AppState {
    pub controller: SearchController,
    pub ctx: Arc<ViewContext>,
    pub html: Arc<HtmlRenderer>,
}

impl AppState {
    pub fn new(service: Arc<dyn ComparisonService>, ctx: ViewContext) -> crate::error::Result<Self> {
        let controller = SearchController::new(service, ctx.error_message());
        Ok(Self {
            controller,
            ctx: Arc::new(ctx),
            html: Arc::new(HtmlRenderer::new()?),
        })
    }

    pub fn from_config(config: &Config) -> crate::error::Result<Self> {
        let service: Arc<dyn ComparisonService> =
            Arc::new(GeminiComparisonService::from_config(config)?);
        Self::new(service, ViewContext::from_config(config))
    }
}

fn is_public_bind(host: &str) -> bool {
    !matches!(
        host,
        "127.0.0.1" | "localhost" | "::1" | "[::1]" | "0:0:0:0:0:0:0:1"
    )
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handle_index))
        .route("/search", post(handle_search))
        .route("/api/state", get(handle_state))
        .route("/infographic", get(handle_infographic))
        .route("/health", get(handle_health))
        .with_state(state)
        .layer(RequestBodyLimitLayer::new(MAX_BODY_SIZE))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(REQUEST_TIMEOUT_SECS),
        ))
}

/// Run the HTTP gateway on `host:port`.
pub async fn run_gateway(host: &str, port: u16, config: &Config) -> Result<()> {
    if is_public_bind(host) && !config.gateway.allow_public_bind {
        anyhow::bail!(
            "Refusing to bind to {host}: the page would be exposed beyond this machine.\n\
             Fix: use --host 127.0.0.1 (default), or set\n\
             [gateway] allow_public_bind = true in config.toml."
        );
    }

    let addr: SocketAddr = format!("{host}:{port}").parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    run_gateway_with_listener(host, listener, AppState::from_config(config)?).await
}

/// Run the HTTP gateway from a pre-bound listener until Ctrl+C.
pub async fn run_gateway_with_listener(
    host: &str,
    listener: tokio::net::TcpListener,
    state: AppState,
) -> Result<()> {
    let actual_port = listener.local_addr()?.port();
    let display_addr = format!("{host}:{actual_port}");
    let locale = state.ctx.locale.clone();

    println!(
        "◆ {}",
        t!("gateway.listening", locale = locale.as_str(), addr = display_addr)
    );
    println!("  {}\n", t!("gateway.stop_hint", locale = locale.as_str()));
    tracing::info!(addr = %display_addr, "gateway started");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for Ctrl+C: {e}");
        std::future::pending::<()>().await;
    }
}
