use axum::{
    Router,
    extract::{Request, State},
    http::HeaderValue,
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use tower_http::cors::{Any, CorsLayer};

use std::sync::Arc;

use crate::{ServerError, auth, feedback, health, token};
use engine::Engine;

/// Server-level configuration resolved by the caller at startup.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub jwt_secret: String,
    /// Allowed CORS origin; `"*"` allows any.
    pub cors_origin: String,
}

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
    pub config: Arc<ServerConfig>,
}

/// Bearer-token middleware for protected routes.
///
/// A missing header is 401, a token that fails signature or expiry
/// validation is 403. Verified claims land in the request extensions for
/// downstream handlers.
async fn authorize(
    State(state): State<ServerState>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ServerError> {
    let Some(TypedHeader(bearer)) = bearer else {
        return Err(ServerError::Unauthorized(
            "Access token required".to_string(),
        ));
    };

    let claims = token::verify(&state.config.jwt_secret, bearer.token())
        .map_err(|_| ServerError::Forbidden("Invalid or expired token".to_string()))?;

    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}

/// Companion admin check, layered after [`authorize`] on routes that need
/// it. Rejects authenticated requests whose claims lack the admin flag.
pub async fn require_admin(request: Request, next: Next) -> Result<Response, ServerError> {
    let is_admin = request
        .extensions()
        .get::<token::Claims>()
        .is_some_and(|claims| claims.is_admin);

    if !is_admin {
        return Err(ServerError::Forbidden("Admin access required".to_string()));
    }

    Ok(next.run(request).await)
}

fn cors_layer(origin: &str) -> CorsLayer {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if origin == "*" {
        return cors.allow_origin(Any);
    }

    match origin.parse::<HeaderValue>() {
        Ok(value) => cors.allow_origin(value),
        Err(err) => {
            tracing::warn!("invalid CORS origin {origin:?}, allowing none: {err}");
            cors
        }
    }
}

/// Build the full application router.
pub fn app(engine: Engine, config: ServerConfig) -> Router {
    let state = ServerState {
        engine: Arc::new(engine),
        config: Arc::new(config),
    };

    let protected = Router::new()
        .route("/api/auth/verify", get(auth::verify))
        .route_layer(middleware::from_fn_with_state(state.clone(), authorize));

    // Feedback listing and stats stay unauthenticated to keep the
    // published API contract; see DESIGN.md.
    Router::new()
        .route("/api/health", get(health::check))
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/feedback", post(feedback::submit).get(feedback::list))
        .route("/api/feedback/stats", get(feedback::stats))
        .merge(protected)
        .layer(cors_layer(&state.config.cors_origin))
        .with_state(state)
}

pub async fn run(engine: Engine, config: ServerConfig) {
    let listener = match tokio::net::TcpListener::bind("127.0.0.1:3001").await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind server listener: {err}");
            return;
        }
    };
    if let Err(err) = run_with_listener(engine, config, listener).await {
        tracing::error!("server failed: {err}");
    }
}

/// Serve until a termination signal arrives.
pub async fn run_with_listener(
    engine: Engine,
    config: ServerConfig,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app(engine, config))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {err}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!("failed to install terminate handler: {err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("received Ctrl+C, shutting down"),
        _ = terminate => tracing::info!("received terminate signal, shutting down"),
    }
}
