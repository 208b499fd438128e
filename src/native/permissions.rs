//! Host platform permission gateway

/// Outcome of a permission request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionDecision {
    /// The user granted the permission
    Granted,
    /// The user denied the permission, or the platform refused it
    Denied,
}

impl PermissionDecision {
    pub fn is_granted(&self) -> bool {
        matches!(self, PermissionDecision::Granted)
    }
}

/// Abstraction over the host platform's runtime permission service
///
/// `request_fine_location` blocks until the user resolves the prompt. It is
/// the only blocking call in the bridge, and there is no way to cancel it.
pub trait PermissionGateway {
    /// Ask the user for fine-grained location access
    fn request_fine_location(&mut self) -> PermissionDecision;
}
