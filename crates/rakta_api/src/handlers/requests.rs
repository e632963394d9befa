use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use rakta_core::models::blood_type::BloodType;
use rakta_core::models::request::{BloodRequest, RequestDraft};

use crate::error::ApiError;
use crate::AppState;

pub async fn create_request(
    State(state): State<AppState>,
    Json(draft): Json<RequestDraft>,
) -> Result<Json<Value>, ApiError> {
    let request = state.service.create_request(draft).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Blood request submitted successfully!",
        "id": request.id,
    })))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestListParams {
    pub blood_type: Option<String>,
    pub limit: Option<u32>,
}

/// Open requests for one blood type, most critical first. Reading prunes
/// requests whose deadline has passed.
pub async fn list_requests(
    State(state): State<AppState>,
    Query(params): Query<RequestListParams>,
) -> Result<Json<Vec<BloodRequest>>, ApiError> {
    let label = params.blood_type.ok_or_else(|| {
        ApiError::BadRequest("bloodType query parameter is required".to_string())
    })?;
    let blood_type: BloodType = label
        .parse()
        .map_err(|_| ApiError::BadRequest(format!("Unknown blood type: {}", label)))?;
    let requests = state
        .service
        .open_requests_of_type(blood_type, params.limit.unwrap_or(20))
        .await?;
    Ok(Json(requests))
}

/// The rotating "most urgent now" banner, capped across all types.
pub async fn urgent_requests(
    State(state): State<AppState>,
) -> Result<Json<Vec<BloodRequest>>, ApiError> {
    let requests = state.service.urgency_header().await?;
    Ok(Json(requests))
}

pub async fn get_request(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<BloodRequest>, ApiError> {
    let request = state.service.get_request(id).await?;
    Ok(Json(request))
}
