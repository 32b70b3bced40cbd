use axum::{routing::get, Json, Router};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
}

pub fn status_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/api/test", get(test))
}

pub async fn home() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "Houselandia API is running".into(),
    })
}

pub async fn test() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "Server is up and running!".into(),
    })
}
