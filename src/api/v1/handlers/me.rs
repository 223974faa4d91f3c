/*
 * Responsibility
 * - GET /me: echo the identity the auth middleware attached
 * - no token handling here; AuthCtxExtractor is the only input
 */
use axum::Json;

use crate::api::v1::dto::me::MeResponse;
use crate::api::v1::extractors::AuthCtxExtractor;

pub async fn me(AuthCtxExtractor(ctx): AuthCtxExtractor) -> Json<MeResponse> {
    tracing::debug!(user_id = %ctx.user_id, "me");
    Json(MeResponse {
        user_id: ctx.user_id,
    })
}
