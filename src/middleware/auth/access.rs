//! Bearer token gate -> Principal in request extensions
//!
//! - Decision logic lives in `gate::AuthGate`; this module is only the axum glue.
//! - Rejection is returned as `AppError::Unauthorized`, which renders the 401.
//! - Authorization (which routes need a Principal) stays with handlers/extractors.

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{Request, header},
    middleware::{self, Next},
    response::Response,
};

use super::gate::GateOutcome;
use crate::error::AppError;
use crate::state::AppState;

/// Apply the authentication gate to every route of `router`.
///
/// ```ignore
/// let v1 = api::v1::routes();
/// let v1 = middleware::auth::access::apply(v1, state.clone());
/// app = app.nest("/api/v1", v1);
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // from_fn cannot take the State extractor; pass state explicitly
    router.layer(middleware::from_fn_with_state(state, access_middleware))
}

async fn access_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let authorization = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    match state.gate.decide(authorization) {
        Ok(GateOutcome::Bypass) => {
            tracing::debug!(
                environment = state.gate.policy().current_environment(),
                "authentication disabled for environment"
            );
        }
        Ok(GateOutcome::PassThrough(reason)) => {
            tracing::debug!(%reason, "no bearer token, continuing unauthenticated");
        }
        Ok(GateOutcome::Admit(principal)) => {
            tracing::debug!(subject = %principal.subject, "bearer token verified");
            // middleware -> extractor
            req.extensions_mut().insert(principal);
        }
        Err(err) => {
            tracing::warn!(error = %err, "bearer token verification failed");
            return Err(err.into());
        }
    }

    Ok(next.run(req).await)
}
