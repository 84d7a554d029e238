use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
};
use secrecy::ExposeSecret;

use crate::state::AppState;

/// Header Telegram sets on webhook deliveries when a secret was registered.
pub const SECRET_TOKEN_HEADER: &str = "x-telegram-bot-api-secret-token";

/// Axum middleware guarding `POST /webhook`.
///
/// When [`AppState::webhook_secret`] is set, requests must carry a matching
/// `X-Telegram-Bot-Api-Secret-Token` header or they are rejected with 401.
/// Without a configured secret every request passes through.
///
/// ```rust,no_run
/// use axum::{Router, middleware, routing::post};
/// use progrev::{AppState, WebhookAuth};
///
/// async fn webhook() -> &'static str { "ok" }
///
/// fn app(state: AppState) -> Router {
///     Router::new()
///         .route("/webhook", post(webhook))
///         .layer(middleware::from_fn_with_state(state.clone(), WebhookAuth::verify))
///         .with_state(state)
/// }
/// ```
pub struct WebhookAuth;

impl WebhookAuth {
    pub async fn verify(
        State(state): State<AppState>,
        request: Request,
        next: Next,
    ) -> Result<Response, StatusCode> {
        let Some(expected) = state.webhook_secret.as_ref() else {
            return Ok(next.run(request).await);
        };

        let provided = request
            .headers()
            .get(SECRET_TOKEN_HEADER)
            // arch-lint: allow(no-silent-result-drop) reason="non-ASCII secret header cannot match; treating as absent triggers 401"
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                tracing::warn!(path = %request.uri(), "webhook call without secret token");
                StatusCode::UNAUTHORIZED
            })?;

        if !constant_time_eq(provided.as_bytes(), expected.expose_secret().as_bytes()) {
            tracing::warn!(path = %request.uri(), "invalid webhook secret token");
            return Err(StatusCode::UNAUTHORIZED);
        }

        Ok(next.run(request).await)
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter()
        .zip(b.iter())
        .fold(0u8, |acc, (x, y)| acc | (x ^ y))
        == 0
}

#[cfg(test)]
mod tests {
    use super::constant_time_eq;

    #[test]
    fn compares_bytes() {
        assert!(constant_time_eq(b"secret", b"secret"));
        assert!(!constant_time_eq(b"secret", b"secreT"));
        assert!(!constant_time_eq(b"secret", b"secret-longer"));
        assert!(constant_time_eq(b"", b""));
    }
}
