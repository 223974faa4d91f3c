use serde::Serialize;

use crate::services::auth::UserId;

/// Body of `GET /me`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeResponse {
    pub user_id: UserId,
}
