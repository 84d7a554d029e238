//! HTTP surface: status, health, metrics and the Telegram webhook.

use axum::{
    Json, Router,
    body::Bytes,
    extract::{Request, State},
    http::{StatusCode, header},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use progrev_core::prompt::SERVICE_NAME;
use progrev_telegram::Update;
use serde_json::json;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::state::AppState;
use crate::webhook_auth::WebhookAuth;

pub fn router(state: AppState) -> Router {
    let webhook = Router::new()
        .route("/webhook", post(webhook))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            WebhookAuth::verify,
        ))
        // outermost: refuse before the secret is even looked at
        .layer(middleware::from_fn_with_state(
            state.clone(),
            refuse_while_shutting_down,
        ));

    Router::new()
        .route("/", get(index))
        // GET routes also answer HEAD
        .route("/health", get(health))
        .route("/metrics", get(metrics))
        .merge(webhook)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::from_fn_with_state(
                    state.clone(),
                    track_requests,
                )),
        )
        .with_state(state)
}

/// Counts every request, and every 500 response as an error.
async fn track_requests(State(state): State<AppState>, request: Request, next: Next) -> Response {
    state.stats.record_request();
    let response = next.run(request).await;
    if response.status() == StatusCode::INTERNAL_SERVER_ERROR {
        state.stats.record_error();
    }
    response
}

/// Webhook deliveries get 503 once shutdown has begun so Telegram retries
/// them against the next instance.
async fn refuse_while_shutting_down(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    if state.shutdown.is_set() {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "error": "Shutting down" })),
        )
            .into_response();
    }
    next.run(request).await
}

async fn index() -> Json<serde_json::Value> {
    Json(json!({ "status": "running", "service": SERVICE_NAME }))
}

async fn health(State(state): State<AppState>) -> (StatusCode, &'static str) {
    if state.shutdown.is_set() {
        (StatusCode::SERVICE_UNAVAILABLE, "Shutting down")
    } else {
        (StatusCode::OK, "OK")
    }
}

async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    let body = state.metrics_snapshot().render();
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4; charset=utf-8")],
        body,
    )
}

async fn webhook(State(state): State<AppState>, body: Bytes) -> Response {
    let update: Update = match serde_json::from_slice(&body) {
        Ok(update) => update,
        Err(e) => {
            tracing::error!(error = %e, "malformed webhook payload");
            return error_response(e.to_string());
        }
    };

    let update_id = update.update_id;
    match state.bot.handle_update(update).await {
        Ok(()) => StatusCode::OK.into_response(),
        Err(e) => {
            tracing::error!(update_id, error = %e, "webhook error");
            error_response(e.to_string())
        }
    }
}

fn error_response(message: String) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": message })),
    )
        .into_response()
}
