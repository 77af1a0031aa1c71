use super::state::AppState;
use crate::error::TokenError;
use crate::token::{ConnectionDetails, ConnectionRequest, TokenMinter};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use tracing::{error, info_span};

/// GET /api/connection-details?language=<str>&voice=<str>
/// Mint a participant token for a freshly generated room
pub async fn connection_details(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Response {
    let req = ConnectionRequest::from_pairs(params);
    let request_id = uuid::Uuid::new_v4();
    let result = info_span!("connection_details", %request_id).in_scope(|| issue(&state, &req));

    match result {
        Ok(details) => (StatusCode::OK, Json(details)).into_response(),
        Err(e) => {
            error!("Failed to issue connection details: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

fn issue(state: &AppState, req: &ConnectionRequest) -> Result<ConnectionDetails, TokenError> {
    let minter = TokenMinter::from_config(&state.livekit)?;
    minter.mint(&req.metadata())
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
