// src/handlers/auth.rs

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    response::IntoResponse,
};
use validator::Validate;

use crate::{
    config::Config,
    error::AppError,
    models::{
        account::{LoginRequest, LoginResponse, UserInfo},
        envelope::ApiResponse,
    },
    services::ScoreService,
    utils::jwt::sign_jwt,
};

/// Pseudonymous login.
///
/// Looks the account up by nickname and creates it with zeroed counters the
/// first time the name is seen. Returns a bearer token for the account.
pub async fn login(
    State(service): State<ScoreService>,
    State(config): State<Config>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let account = service.login(&payload.nick_name, &payload.avatar_url).await?;

    let token = sign_jwt(
        account.id,
        &account.display_name,
        &config.jwt_secret,
        config.jwt_expiration,
    )?;

    Ok(Json(ApiResponse::with_message(
        "login successful",
        LoginResponse {
            token,
            user_info: UserInfo::from(&account),
        },
    )))
}
