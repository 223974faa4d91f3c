/*
 * Responsibility
 * - tracing / panic hook setup
 * - Config -> shared state -> Router
 * - cross-cutting middleware (http / CORS / security headers)
 * - axum::serve() with graceful shutdown
 */
use std::{panic, process};

use anyhow::Result;
use axum::Router;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::error::AppError;
use crate::services::auth::build_auth_service;
use crate::state::AppState;
use crate::{api, middleware};

fn init_tracing() {
    // RUST_LOG wins when set, e.g. RUST_LOG=info,ambulance_api=debug,tower_http=debug
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        // stderr may be hidden depending on how the process is launched
        tracing::error!(?info, "panic");

        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    // .env first so RUST_LOG from it reaches the tracing filter
    dotenvy::dotenv().ok();
    init_tracing();
    let config = Config::from_env()?;

    // Development: crash loudly. Production: keep serving.
    init_panic_hook(!config.app_env.is_production());

    tracing::info!(
        "starting API in {:?} mode on {}",
        config.app_env,
        config.addr
    );

    let state = build_state(&config);
    let app = build_router(state, &config);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

pub fn build_state(config: &Config) -> AppState {
    AppState::new(build_auth_service(config))
}

pub fn build_router(state: AppState, config: &Config) -> Router {
    let router = Router::new()
        .nest("/api/v1", api::v1::routes(state.clone()))
        .fallback(|| async { AppError::NotFound { resource: "route" } })
        .with_state(state);

    let router = middleware::security_headers::apply(router);
    let router = middleware::cors::apply(router, config);
    middleware::http::apply(router)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received");
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use super::*;
    use crate::config::TokenSecret;
    use crate::services::auth::TokenIssuer;

    fn config(vars: &[(&str, &str)]) -> Config {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_source(|key| map.get(key).cloned()).unwrap()
    }

    fn app() -> Router {
        let config = config(&[("TOKEN_SECRET", "s3cr3t")]);
        build_router(build_state(&config), &config)
    }

    fn get(uri: &str, token: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, token);
        }
        builder.body(Body::empty()).unwrap()
    }

    async fn json(resp: axum::response::Response) -> serde_json::Value {
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_needs_no_token() {
        let resp = app().oneshot(get("/api/v1/health", None)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(json(resp).await["status"], "ok");
    }

    #[tokio::test]
    async fn me_returns_identity_from_token() {
        let token = TokenIssuer::new(&TokenSecret::new("s3cr3t").unwrap(), 3600)
            .issue("u1")
            .unwrap();

        let resp = app()
            .oneshot(get("/api/v1/me", Some(&token)))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(json(resp).await, serde_json::json!({ "userId": "u1" }));
    }

    #[tokio::test]
    async fn me_without_token_is_401() {
        let resp = app().oneshot(get("/api/v1/me", None)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(json(resp).await["message"], "Access denied");
    }

    #[tokio::test]
    async fn me_with_foreign_token_is_400() {
        let token = TokenIssuer::new(&TokenSecret::new("other").unwrap(), 3600)
            .issue("u1")
            .unwrap();

        let resp = app()
            .oneshot(get("/api/v1/me", Some(&token)))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json(resp).await["message"], "Invalid token");
    }

    #[tokio::test]
    async fn unknown_route_is_json_404() {
        let resp = app().oneshot(get("/api/v1/nope", None)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(json(resp).await["message"], "route not found");
    }

    #[tokio::test]
    async fn responses_carry_request_id_and_security_headers() {
        let resp = app().oneshot(get("/api/v1/me", None)).await.unwrap();
        let headers = resp.headers();

        assert!(headers.contains_key("x-request-id"));
        assert_eq!(headers["x-frame-options"], "DENY");
        assert_eq!(headers["x-content-type-options"], "nosniff");
        assert_eq!(headers["referrer-policy"], "no-referrer");
    }

    #[tokio::test]
    async fn incoming_request_id_is_propagated() {
        let mut req = get("/api/v1/health", None);
        req.headers_mut()
            .insert("x-request-id", "req-123".parse().unwrap());

        let resp = app().oneshot(req).await.unwrap();
        assert_eq!(resp.headers()["x-request-id"], "req-123");
    }

    #[tokio::test]
    async fn production_cors_only_allows_listed_origins() {
        let config = config(&[
            ("APP_ENV", "production"),
            ("TOKEN_SECRET", "s3cr3t"),
            ("CORS_ALLOWED_ORIGINS", "https://book.example"),
        ]);
        let app = build_router(build_state(&config), &config);

        let mut allowed = get("/api/v1/health", None);
        allowed
            .headers_mut()
            .insert(header::ORIGIN, "https://book.example".parse().unwrap());
        let resp = app.clone().oneshot(allowed).await.unwrap();
        assert_eq!(
            resp.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "https://book.example"
        );

        let mut denied = get("/api/v1/health", None);
        denied
            .headers_mut()
            .insert(header::ORIGIN, "https://evil.example".parse().unwrap());
        let resp = app.oneshot(denied).await.unwrap();
        assert!(!resp.headers().contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
    }
}
