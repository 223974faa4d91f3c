/*
 * Responsibility
 * - the "authenticated context" type handlers see
 * - the auth middleware verifies the token and stores this in request extensions;
 *   handlers only ever receive this type
 *
 * Notes
 * - token verification lives in middleware/services
 * - kept as a small fixed contract, separate from the extractor plumbing
 */
use crate::services::auth::UserId;

/// Context attached to an authenticated request.
///
/// Lives for one request only; never cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthCtx {
    pub user_id: UserId,
}

impl AuthCtx {
    pub fn new(user_id: UserId) -> Self {
        Self { user_id }
    }
}
