use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use rakta_core::models::blood_type::BloodType;
use rakta_core::models::donor::UserRecord;
use rakta_service::donors::DONOR_SEARCH_TARGET;

use crate::error::ApiError;
use crate::AppState;

pub async fn register_user(
    State(state): State<AppState>,
    Json(user): Json<UserRecord>,
) -> Result<Json<Value>, ApiError> {
    let saved = state.service.register_user(user).await?;
    Ok(Json(json!({
        "success": true,
        "message": "User profile saved successfully!",
        "id": saved.id,
    })))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DonorListParams {
    pub blood_type: Option<String>,
    pub limit: Option<u32>,
}

/// Donor directory, optionally narrowed to one blood type.
pub async fn list_donors(
    State(state): State<AppState>,
    Query(params): Query<DonorListParams>,
) -> Result<Json<Vec<UserRecord>>, ApiError> {
    let blood_type = params
        .blood_type
        .as_deref()
        .map(parse_blood_type)
        .transpose()?;
    let donors = state
        .service
        .list_donors(blood_type, params.limit.unwrap_or(50))
        .await?;
    Ok(Json(donors))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DonorSearchParams {
    pub blood_type: Option<String>,
    pub count: Option<u32>,
}

/// Compatibility-aware donor search: exact matches first, then compatible
/// types to make up the shortfall.
pub async fn search_donors(
    State(state): State<AppState>,
    Query(params): Query<DonorSearchParams>,
) -> Result<Json<Vec<UserRecord>>, ApiError> {
    let label = params.blood_type.ok_or_else(|| {
        ApiError::BadRequest("bloodType query parameter is required".to_string())
    })?;
    let blood_type = parse_blood_type(&label)?;
    let donors = state
        .service
        .find_donors_for_type(blood_type, params.count.unwrap_or(DONOR_SEARCH_TARGET))
        .await?;
    Ok(Json(donors))
}

fn parse_blood_type(label: &str) -> Result<BloodType, ApiError> {
    label
        .parse()
        .map_err(|_| ApiError::BadRequest(format!("Unknown blood type: {}", label)))
}
