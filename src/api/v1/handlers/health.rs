/*
 * Responsibility
 * - GET /health (疎通用)
 * - auth が環境設定で無効化されているかを返す (運用確認用)
 */
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde_json::json;

use crate::state::AppState;

pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let auth = if state.gate.policy().is_auth_disabled() {
        "disabled"
    } else {
        "enforced"
    };

    (StatusCode::OK, Json(json!({"status": "ok", "auth": auth})))
}
