/// Factory: build `AuthService` from application `Config`.
use std::sync::Arc;

use crate::config::Config;
use crate::services::auth::AuthService;

pub fn build_auth_service(config: &Config) -> Arc<AuthService> {
    let auth = AuthService::new(
        config.token_secret.as_ref(),
        config.access_token_leeway_seconds,
    );

    if !auth.secret_configured() {
        tracing::warn!("TOKEN_SECRET is not set; every access token will be rejected");
    }

    Arc::new(auth)
}
