//! Per-request authentication decision.
//!
//! Inputs: the raw `Authorization` header (if any) and the environment policy.
//! Outcomes:
//! - `Bypass`: auth disabled for this environment; nothing is inspected.
//! - `PassThrough`: no token for this scheme; request continues without a principal.
//! - `Admit`: token verified; request continues with the principal attached.
//! - `Err(AuthError)`: token present but not valid; request is rejected.
//!
//! Kept free of axum types so the decision is testable on its own.

use crate::api::v1::extractors::Principal;
use crate::services::auth::{AuthError, EnvironmentPolicy, HeaderError, TokenVerifier};

pub const DEFAULT_HEADER_PREFIX: &str = "Bearer ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateOutcome {
    Bypass,
    PassThrough(HeaderError),
    Admit(Principal),
}

#[derive(Debug, Clone)]
pub struct AuthGate {
    verifier: TokenVerifier,
    policy: EnvironmentPolicy,
    header_prefix: String,
}

impl AuthGate {
    pub fn new(verifier: TokenVerifier, policy: EnvironmentPolicy) -> Self {
        Self::with_prefix(verifier, policy, DEFAULT_HEADER_PREFIX)
    }

    pub fn with_prefix(
        verifier: TokenVerifier,
        policy: EnvironmentPolicy,
        header_prefix: impl Into<String>,
    ) -> Self {
        Self {
            verifier,
            policy,
            header_prefix: header_prefix.into(),
        }
    }

    pub fn policy(&self) -> &EnvironmentPolicy {
        &self.policy
    }

    pub fn decide(&self, authorization: Option<&str>) -> Result<GateOutcome, AuthError> {
        if self.policy.is_auth_disabled() {
            return Ok(GateOutcome::Bypass);
        }

        let token = match self.extract_token(authorization) {
            Ok(token) => token,
            Err(reason) => return Ok(GateOutcome::PassThrough(reason)),
        };

        let subject = self.verifier.verify(token)?;
        Ok(GateOutcome::Admit(Principal::new(subject)))
    }

    /// Strip the scheme prefix from the header value.
    pub fn extract_token<'a>(&self, authorization: Option<&'a str>) -> Result<&'a str, HeaderError> {
        authorization
            .ok_or(HeaderError::Missing)?
            .strip_prefix(self.header_prefix.as_str())
            .ok_or(HeaderError::UnrecognizedScheme)
    }
}
