//! Authentication endpoints: register, login, verify.

use api_types::auth::{
    AuthResponse, LoginRequest, RegisterRequest, TokenUser, UserView, VerifyResponse,
};
use axum::{Extension, Json, extract::State, http::StatusCode};

use crate::{ServerError, server::ServerState, token};

fn user_view(user: &engine::users::Model) -> UserView {
    UserView {
        id: user.id,
        username: user.username.clone(),
        email: user.email.clone(),
        is_admin: user.is_admin,
    }
}

fn issue_token(state: &ServerState, user: &engine::users::Model) -> Result<String, ServerError> {
    token::issue(&state.config.jwt_secret, user)
        .map_err(|err| ServerError::Internal(format!("token issuance failed: {err}")))
}

pub async fn register(
    State(state): State<ServerState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ServerError> {
    // Absent fields validate like empty ones.
    let user = state
        .engine
        .register_account(
            payload.username.as_deref().unwrap_or(""),
            payload.email.as_deref().unwrap_or(""),
            payload.password.as_deref().unwrap_or(""),
        )
        .await?;
    let token = issue_token(&state, &user)?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            success: true,
            message: "User registered successfully".to_string(),
            token,
            user: user_view(&user),
        }),
    ))
}

pub async fn login(
    State(state): State<ServerState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ServerError> {
    let user = state
        .engine
        .verify_credentials(
            payload.username.as_deref().unwrap_or(""),
            payload.password.as_deref().unwrap_or(""),
        )
        .await?;
    let token = issue_token(&state, &user)?;

    Ok(Json(AuthResponse {
        success: true,
        message: "Login successful".to_string(),
        token,
        user: user_view(&user),
    }))
}

/// Report the identity of the presented token. No database read: the
/// claims were already validated by the middleware.
pub async fn verify(Extension(claims): Extension<token::Claims>) -> Json<VerifyResponse> {
    Json(VerifyResponse {
        success: true,
        user: TokenUser {
            id: claims.id,
            username: claims.username,
            is_admin: claims.is_admin,
        },
    })
}
