use axum::extract::State;
use axum::Json;
use axum_extra::extract::WithRejection;

use crate::error::{ApiResponse, SubmitError};
use crate::state::SharedState;
use crate::submission::{pipeline, ContactPayload};

pub async fn send_message(
    State(state): State<SharedState>,
    WithRejection(Json(payload), _): WithRejection<Json<ContactPayload>, SubmitError>,
) -> Result<Json<ApiResponse>, SubmitError> {
    pipeline::run(&state, payload).await?;
    Ok(Json(ApiResponse::ok()))
}

pub async fn root() -> &'static str {
    "Backend is running!"
}
