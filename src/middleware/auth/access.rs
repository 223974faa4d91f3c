//! access token (HMAC JWT) verification -> AuthCtx into request extensions
//!
//! - reads the raw `authorization` header value; no `Bearer ` prefix is stripped
//! - missing/empty header -> 401 `Access denied`
//! - anything that fails verification -> 400 `Invalid token`
//! - on success the handler chain runs with `AuthCtx` attached

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{Request, header},
    middleware::{self, Next},
    response::Response,
};

use crate::api::v1::extractors::AuthCtx;
use crate::error::AppError;
use crate::state::AppState;

/// Put the given router behind the auth gate.
///
/// Example:
/// ```ignore
/// let protected = Router::new().route("/me", get(me));
/// let protected = middleware::auth::access::apply(protected, state.clone());
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // from_fn cannot take a State extractor in axum 0.8, so the state is passed explicitly.
    router.layer(middleware::from_fn_with_state(state, access_middleware))
}

async fn access_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let raw = match req.headers().get(header::AUTHORIZATION) {
        Some(v) if !v.is_empty() => v,
        _ => return Err(AppError::MissingCredential),
    };

    let token = raw.to_str().map_err(|_| {
        tracing::warn!("authorization header is not visible ASCII");
        AppError::InvalidCredential
    })?;

    let verified = match state.auth.verify_verified(token) {
        Ok(verified) => verified,
        Err(err) => {
            tracing::warn!(error = %err, "access token verification failed");
            return Err(AppError::InvalidCredential);
        }
    };

    tracing::debug!(user_id = %verified.user_id, "access token verified");

    // middleware -> extractor handoff
    req.extensions_mut().insert(AuthCtx::new(verified.user_id));

    Ok(next.run(req).await)
}
