use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use rakta_service::reports::ReportUpload;

use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcceptBody {
    pub donor_id: String,
    pub request_id: Uuid,
}

pub async fn accept_donation(
    State(state): State<AppState>,
    Json(body): Json<AcceptBody>,
) -> Result<Json<Value>, ApiError> {
    let acceptance = state
        .service
        .accept_request(&body.donor_id, body.request_id)
        .await?;
    Ok(Json(json!({
        "success": true,
        "id": acceptance.id,
    })))
}

/// Attaches the uploaded donation report and closes the linked request.
///
/// Unlike the other routes this one does not use the shared error mapping:
/// clients expect a 400 `{"error": "No file uploaded"}` when the field is
/// missing and a 500 for every lifecycle failure, unknown donation id
/// included.
pub async fn complete_donation(
    State(state): State<AppState>,
    Path(donation_id): Path<Uuid>,
    multipart: Multipart,
) -> (StatusCode, Json<Value>) {
    let upload = match read_report_field(multipart).await {
        Ok(Some(upload)) => upload,
        Ok(None) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "No file uploaded" })),
            );
        }
        Err(message) => {
            return (StatusCode::BAD_REQUEST, Json(json!({ "error": message })));
        }
    };

    match state.service.complete_donation(donation_id, upload).await {
        Ok(done) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "reportUrl": done.report_url,
            })),
        ),
        Err(e) => {
            tracing::error!("completing donation {} failed: {}", donation_id, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string() })),
            )
        }
    }
}

/// Pulls the `file` field out of the multipart stream. `Ok(None)` means the
/// form had no such field.
async fn read_report_field(mut multipart: Multipart) -> Result<Option<ReportUpload>, String> {
    while let Some(field) = multipart.next_field().await.map_err(|e| e.to_string())? {
        if field.name() != Some("file") {
            continue;
        }
        let original_name = field
            .file_name()
            .map(|n| n.to_string())
            .unwrap_or_else(|| "report".to_string());
        let bytes = field.bytes().await.map_err(|e| e.to_string())?;
        return Ok(Some(ReportUpload {
            bytes: bytes.to_vec(),
            original_name,
        }));
    }
    Ok(None)
}
