/*
 * Responsibility
 * - POST /login, POST /register (public: identity を得るための入口)
 */
use axum::{Json, extract::State, extract::rejection::JsonRejection};

use crate::{
    api::dto::auth::{CredentialsRequest, LoginResponse, MessageResponse},
    error::AppError,
    state::AppState,
};

pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<CredentialsRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, AppError> {
    let Json(req) = payload?;

    let token = state
        .backend
        .login(&req.email, &req.password)
        .await
        .inspect_err(|e| tracing::warn!(error = %e, "login failed"))?;

    Ok(Json(LoginResponse { token }))
}

pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<CredentialsRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let Json(req) = payload?;

    let message = state
        .backend
        .register(&req.email, &req.password)
        .await
        .inspect_err(|e| tracing::warn!(error = %e, "register failed"))?;

    Ok(Json(MessageResponse { message }))
}
