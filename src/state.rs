/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 * - Clone 前提で持つ (内部は Arc)
 * - 中身は起動後 read-only (signing key / environment policy)
 */
use std::sync::Arc;

use crate::middleware::auth::AuthGate;

#[derive(Clone, Debug)]
pub struct AppState {
    pub gate: Arc<AuthGate>,
}

impl AppState {
    pub fn new(gate: Arc<AuthGate>) -> Self {
        Self { gate }
    }
}
