//! HTTP transport: one JSON-RPC envelope per POST
//!
//! Stateless across requests; no session or cookie continuity. Protocol
//! errors are not mapped to HTTP status codes: every routed request
//! answers 200 with an embedded JSON-RPC error where needed. CORS is
//! fully open because the server is a local development tool, not a
//! public API.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::cors::{Any, CorsLayer};

use super::dispatch::Dispatcher;
use super::protocol::{McpHandler, McpRequest, McpResponse};
use crate::error::Result;

/// HTTP server wrapping the dispatcher.
pub struct HttpServer {
    dispatcher: Arc<Dispatcher>,
    addr: String,
}

impl HttpServer {
    pub fn new(dispatcher: Arc<Dispatcher>, addr: String) -> Self {
        Self { dispatcher, addr }
    }

    /// Build the router
    pub fn router(dispatcher: Arc<Dispatcher>) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        Router::new()
            .route("/mcp", post(mcp_handler))
            .route("/health", get(health_handler))
            .layer(cors)
            .with_state(dispatcher)
    }

    /// Start the server
    pub async fn start(self) -> Result<()> {
        let app = Self::router(self.dispatcher);
        tracing::info!("HTTP transport listening on {}", self.addr);
        let listener = tokio::net::TcpListener::bind(self.addr.as_str()).await?;
        axum::serve(listener, app).await?;
        Ok(())
    }
}

/// Health check endpoint
async fn health_handler() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Decode one envelope, dispatch, encode one reply.
async fn mcp_handler(State(dispatcher): State<Arc<Dispatcher>>, body: String) -> Response {
    let request: McpRequest = match serde_json::from_str(&body) {
        Ok(request) => request,
        Err(e) => {
            return Json(McpResponse::error(
                None,
                -32700,
                format!("Parse error: {}", e),
            ))
            .into_response();
        }
    };
    // The dispatcher is synchronous; keep tool handlers off the reactor.
    let response = tokio::task::spawn_blocking(move || dispatcher.handle_request(request))
        .await
        .unwrap_or_else(|_| {
            Some(McpResponse::error(
                None,
                -32603,
                "Internal error".to_string(),
            ))
        });
    match response {
        Some(response) => Json(response).into_response(),
        // Notifications get no reply body.
        None => StatusCode::ACCEPTED.into_response(),
    }
}
