use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{CredentialsRequest, LoginResponse, SignupResponse},
        services::{self, Credentials},
    },
    error::ApiResult,
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/api/signup", post(signup))
        .route("/api/login", post(login))
}

#[instrument(skip(state, payload))]
pub async fn signup(
    State(state): State<AppState>,
    payload: Result<Json<CredentialsRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<SignupResponse>)> {
    let Json(payload) = payload?;
    let creds = Credentials::parse(payload.email, payload.password).map_err(|e| {
        warn!("signup without email or password");
        e
    })?;

    let user = services::register(&state.db, &creds).await?;

    info!(user_id = user.id, email = %user.email, "user registered");
    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            message: "User created successfully".into(),
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<CredentialsRequest>, JsonRejection>,
) -> ApiResult<Json<LoginResponse>> {
    let Json(payload) = payload?;
    let creds = Credentials::parse(payload.email, payload.password).map_err(|e| {
        warn!("login without email or password");
        e
    })?;

    let user = services::authenticate(&state.db, &creds).await.map_err(|e| {
        if matches!(e, services::AuthError::InvalidCredentials) {
            warn!(email = %creds.email, "login rejected");
        }
        e
    })?;

    info!(user_id = user.id, email = %user.email, "user logged in");
    Ok(Json(LoginResponse {
        message: "Login successful".into(),
        email: user.email,
    }))
}
