use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::models::{CreatedGame, ErrorBody, GameState, GuessInput};
use crate::service::{ServiceError, SessionService};

// ============================================================
// Error Handling
// ============================================================

/// Soft failures become `{ "error": "..." }` with a matching status code.
pub enum ApiError {
    Service(ServiceError),
    /// The request body could not be read as the expected JSON.
    Body(JsonRejection),
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        Self::Service(e)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Body(rejection)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            Self::Service(e @ ServiceError::NotFound) => (StatusCode::NOT_FOUND, e.to_string()),
            Self::Service(e @ ServiceError::Rejected(_)) => {
                (StatusCode::UNPROCESSABLE_ENTITY, e.to_string())
            }
            Self::Body(rejection) => {
                tracing::debug!(%rejection, "Malformed request body");
                (rejection.status(), rejection.body_text())
            }
        };
        (status, Json(ErrorBody { error })).into_response()
    }
}

// ============================================================
// Health
// ============================================================

pub async fn health(State(service): State<SessionService>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "sessions": service.store().len(),
    }))
}

// ============================================================
// Games
// ============================================================

pub async fn create_game(
    State(service): State<SessionService>,
) -> (StatusCode, Json<CreatedGame>) {
    (StatusCode::CREATED, Json(service.create()))
}

pub async fn get_game(
    State(service): State<SessionService>,
    Path(id): Path<String>,
) -> Result<Json<GameState>, ApiError> {
    Ok(Json(service.state_by_key(&id)?))
}

pub async fn make_guess(
    State(service): State<SessionService>,
    Path(id): Path<String>,
    body: Result<Json<GuessInput>, JsonRejection>,
) -> Result<Json<GameState>, ApiError> {
    let Json(input) = body?;
    Ok(Json(service.guess_by_key(&id, &input.guess)?))
}
