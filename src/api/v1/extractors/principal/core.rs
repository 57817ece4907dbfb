use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;

use super::Principal;

/// Handler-side access to the Principal.
/// The gate middleware inserts it into request extensions on verified requests.
/// Missing (no token, or auth bypassed) -> 401.
pub struct PrincipalExtractor(pub Principal);

impl<S> FromRequestParts<S> for PrincipalExtractor
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Principal>()
            .cloned()
            .map(PrincipalExtractor)
            .ok_or(AppError::Unauthorized)
    }
}
