pub mod error;
pub mod policy;
pub mod token_verifier;

pub use error::{AuthError, HeaderError};
pub use policy::EnvironmentPolicy;
pub use token_verifier::{TokenClaims, TokenVerifier, VerifierOptions};
