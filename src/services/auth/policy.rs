/// Decides whether authentication is enforced in the running environment.
///
/// Authentication is bypassed if and only if both identifiers are present
/// and equal. Empty identifiers count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvironmentPolicy {
    disable_auth_in: Option<String>,
    current_environment: Option<String>,
}

impl EnvironmentPolicy {
    pub fn new(disable_auth_in: Option<String>, current_environment: Option<String>) -> Self {
        Self {
            disable_auth_in: non_empty(disable_auth_in),
            current_environment: non_empty(current_environment),
        }
    }

    /// Policy that always enforces authentication.
    pub fn enforced() -> Self {
        Self::default()
    }

    pub fn is_auth_disabled(&self) -> bool {
        match (&self.disable_auth_in, &self.current_environment) {
            (Some(disabled), Some(current)) => disabled == current,
            _ => false,
        }
    }

    pub fn current_environment(&self) -> Option<&str> {
        self.current_environment.as_deref()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
