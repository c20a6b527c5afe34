use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::errors::AppError;
use crate::state::AppState;

/// Gate for resume and session routes: the `Authorization` header must equal
/// the configured shared secret byte for byte. Runs before any extractor of
/// the wrapped handler, so the body is never looked at on rejection.
pub async fn require_api_key(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let secret = state.config.shared_secret().as_bytes();
    let authorized = request
        .headers()
        .get(AUTHORIZATION)
        .is_some_and(|value| !value.is_empty() && value.as_bytes() == secret);

    if !authorized {
        tracing::warn!(
            "Rejected {} {}: invalid or missing API key",
            request.method(),
            request.uri().path()
        );
        return Err(AppError::Unauthorized);
    }

    Ok(next.run(request).await)
}
