/*
 * Responsibility
 * - v1 の URL 構造を定義
 * - auth gate は app 側で v1 全体に掛ける (Principal を要求するかは handler 次第)
 */
use axum::{Router, routing::get};

use crate::state::AppState;

use crate::api::v1::handlers::{health::health, me::me};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/me", get(me))
}
