//! Patient record update handler

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::models::{QueryEnvelope, UpdateRequest};
use crate::state::AppState;
use crate::Result;

/// Update the description of a patient record.
///
/// PUT /edit/:id
///
/// The body must be a JSON object with a `description` key; other keys are
/// ignored. The update itself is executed by the query service — this handler
/// validates, forwards, and relays the outcome. On success the caller gets a
/// fixed confirmation payload; the query service's response body is
/// discarded.
pub async fn update_description(
    State(state): State<AppState>,
    Path(patient_id): Path<String>,
    body: Bytes,
) -> Result<Response> {
    let request = UpdateRequest::from_slice(&body)?;
    let envelope = QueryEnvelope::update_description(request.description, &patient_id);

    state.query_client.execute(&envelope).await?;

    tracing::info!(patient_id = %patient_id, "patient record description updated");

    Ok((StatusCode::OK, Json(json!({ "message": "update succeeded" }))).into_response())
}
