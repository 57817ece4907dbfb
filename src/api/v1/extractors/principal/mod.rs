/*!
 * Principal extractor
 *
 * Responsibility:
 * - Provide the verified identity (Principal) attached by the auth gate to handlers
 * - Type definition lives in `types`, axum glue in `core`
 *
 * Public API:
 * - Principal
 * - PrincipalExtractor
 */

mod core;
mod types;

pub use self::core::PrincipalExtractor;
pub use self::types::Principal;
