/// Factory: build the `AuthGate` from application `Config`.
use std::sync::Arc;

use crate::config::Config;
use crate::middleware::auth::AuthGate;
use crate::services::auth::TokenVerifier;

pub fn build_auth_gate(config: &Config) -> Arc<AuthGate> {
    let verifier = TokenVerifier::new(&config.auth_signing_key, config.verifier_options());
    let gate = AuthGate::with_prefix(
        verifier,
        config.environment_policy(),
        config.auth_header_prefix.clone(),
    );

    Arc::new(gate)
}
