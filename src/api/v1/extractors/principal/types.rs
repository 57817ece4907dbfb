/*
 * Responsibility
 * - The identity a handler sees for an authenticated request
 * - Built by the auth gate only after the bearer token was verified, and
 *   stored in request extensions (one per request, never shared)
 */
use std::collections::BTreeSet;

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Principal {
    pub subject: String,
    pub authorities: BTreeSet<String>,
}

impl Principal {
    /// Principal with no granted authorities.
    pub(crate) fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            authorities: BTreeSet::new(),
        }
    }
}
