/*
 * Responsibility
 * - GET /api/v1/me
 * - gate が付与した Principal をそのまま返す (無ければ extractor が 401)
 */
use axum::Json;

use crate::api::v1::extractors::{Principal, PrincipalExtractor};

pub async fn me(PrincipalExtractor(principal): PrincipalExtractor) -> Json<Principal> {
    Json(principal)
}
