use std::collections::HashSet;

use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::Deserialize;

use super::error::AuthError;

/// Claims read from a bearer token.
///
/// Only `sub` is read here. `exp`/`nbf`/`iss`/`aud` are left to
/// `jsonwebtoken::Validation`, so their JSON shape (e.g. fractional
/// NumericDate) is whatever the standard validation accepts.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenClaims {
    #[serde(default)]
    pub sub: Option<String>,
}

/// Optional claim checks on top of signature verification.
#[derive(Debug, Clone, Default)]
pub struct VerifierOptions {
    pub issuer: Option<String>,
    pub audience: Option<String>,
    pub leeway_seconds: u64,
}

/// HMAC (HS256/HS384/HS512) bearer-token verifier.
///
/// - The signing secret is shared with the issuer and never printed via Debug.
/// - `exp`/`nbf` are enforced when the token carries them; no claim other
///   than `sub` is required.
#[derive(Clone)]
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print key material
        f.debug_struct("TokenVerifier")
            .field("validation", &self.validation)
            .finish()
    }
}

impl TokenVerifier {
    pub fn new(signing_key: &[u8], options: VerifierOptions) -> Self {
        let decoding_key = DecodingKey::from_secret(signing_key);

        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = vec![Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];
        validation.required_spec_claims = HashSet::new();
        validation.validate_exp = true;
        validation.validate_nbf = true;
        validation.leeway = options.leeway_seconds;

        if let Some(issuer) = options.issuer.as_deref() {
            validation.set_issuer(&[issuer]);
        }
        match options.audience.as_deref() {
            Some(audience) => validation.set_audience(&[audience]),
            None => validation.validate_aud = false,
        }

        Self {
            decoding_key,
            validation,
        }
    }

    /// Check the signature and standard claims, returning the decoded claims.
    pub fn verify_claims(&self, token: &str) -> Result<TokenClaims, AuthError> {
        let data =
            jsonwebtoken::decode::<TokenClaims>(token, &self.decoding_key, &self.validation)?;
        Ok(data.claims)
    }

    /// Verify `token` and return its subject.
    ///
    /// A correctly signed token is rejected with [`AuthError::MissingSubject`]
    /// when `sub` is absent or `null`, and also when it is empty or only
    /// whitespace: a blank subject cannot name a principal.
    pub fn verify(&self, token: &str) -> Result<String, AuthError> {
        let claims = self.verify_claims(token)?;

        match claims.sub {
            Some(sub) if !sub.trim().is_empty() => Ok(sub),
            _ => Err(AuthError::MissingSubject),
        }
    }
}
