//! Router and server loop.

use super::dto::{ChatRequestDto, ChatResponseDto};
use super::error::ApiError;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use chat_gateway_application::HandleChatUseCase;
use chat_gateway_domain::CompletionRequest;
use serde_json::json;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

#[derive(Clone)]
struct AppState {
    use_case: HandleChatUseCase,
}

/// Build the gateway router around a configured use case.
pub fn router(use_case: HandleChatUseCase) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/chat", post(chat))
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { use_case })
}

/// Serve `router` on `addr` until Ctrl+C or SIGTERM.
pub async fn serve(router: Router, addr: SocketAddr) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "chat-gateway listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("chat-gateway shutting down");
    Ok(())
}

async fn root() -> impl IntoResponse {
    Json(json!({ "message": "chat-gateway is running" }))
}

async fn health() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Dropping this future (client disconnect) cancels the in-flight provider
/// call and any pending retry.
async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequestDto>, JsonRejection>,
) -> Result<Json<ChatResponseDto>, ApiError> {
    let Json(dto) = payload?;
    let request = CompletionRequest::try_from(dto)?;
    let result = state.use_case.execute(request).await?;
    Ok(Json(result.into()))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C signal"),
        _ = terminate => info!("Received SIGTERM signal"),
    }
}
