pub mod access;
pub mod factory;
pub mod gate;

pub use factory::build_auth_gate;
pub use gate::{AuthGate, DEFAULT_HEADER_PREFIX, GateOutcome};
