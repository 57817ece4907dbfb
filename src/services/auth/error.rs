use jsonwebtoken::errors::ErrorKind;
use thiserror::Error;

/// Authorization header did not carry a token for this scheme.
///
/// Not a rejection: the gate lets the request through unauthenticated so a
/// different mechanism (or the route's own requirement) can decide.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HeaderError {
    #[error("missing authorization header")]
    Missing,
    #[error("authorization header does not use the expected scheme")]
    UnrecognizedScheme,
}

/// Bearer token failed verification. Always a rejection.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("malformed token: {0}")]
    Malformed(String),
    #[error("invalid token signature")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
    #[error("token not yet valid")]
    NotYetValid,
    #[error("invalid token claims: {0}")]
    InvalidClaims(String),
    #[error("token has no subject claim")]
    MissingSubject,
}

impl From<jsonwebtoken::errors::Error> for AuthError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        match e.kind() {
            ErrorKind::InvalidSignature => Self::InvalidSignature,
            ErrorKind::ExpiredSignature => Self::Expired,
            ErrorKind::ImmatureSignature => Self::NotYetValid,
            ErrorKind::InvalidIssuer
            | ErrorKind::InvalidAudience
            | ErrorKind::InvalidSubject
            | ErrorKind::MissingRequiredClaim(_) => Self::InvalidClaims(e.to_string()),
            // Includes an `alg` outside the HMAC family: the token cannot
            // have been produced with the shared secret.
            ErrorKind::InvalidAlgorithm | ErrorKind::InvalidAlgorithmName => {
                Self::InvalidSignature
            }
            _ => Self::Malformed(e.to_string()),
        }
    }
}
