use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;

use crate::error::ApiError;
use crate::state::AppState;

/// Reject any request whose `Authorization` header is not exactly
/// `Bearer <token>` before a handler runs.
pub async fn require_bearer(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let presented = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));

    if presented != Some(&*state.bearer_token) {
        tracing::warn!(
            "Rejected {} {}: invalid or missing bearer token",
            request.method(),
            request.uri().path()
        );
        return Err(ApiError::Unauthorized);
    }

    Ok(next.run(request).await)
}
