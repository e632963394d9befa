pub mod donation;
pub mod requests;
pub mod users;

use axum::Json;
use serde_json::{json, Value};

pub async fn ping() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
