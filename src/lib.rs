//! Stateless bearer-token authentication gateway plus RSA payload encryption.
//!
//! - `middleware::auth`: per-request gate (bypass / pass-through / verify)
//! - `services::auth`: HMAC token verification and environment policy
//! - `services::crypto`: chunked RSA encrypt/decrypt and key codec
pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod services;
pub mod state;
