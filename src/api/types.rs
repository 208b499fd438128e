//! Application-facing API types

use crate::native::{ErrorCallback, LocationCallback, StatusCallback};

/// Handler bundle registered by one positioning subscriber
///
/// Location and status handlers are mandatory. The error handler is
/// optional, subscribers without one simply receive no stream errors.
pub struct PositioningHandlers {
    pub on_location: LocationCallback,
    pub on_status: StatusCallback,
    pub on_error: Option<ErrorCallback>,
}

impl PositioningHandlers {
    /// Create a handler bundle without an error handler
    pub fn new(on_location: LocationCallback, on_status: StatusCallback) -> Self {
        Self {
            on_location,
            on_status,
            on_error: None,
        }
    }

    /// Attach a handler for location stream errors
    pub fn with_error_handler(mut self, on_error: ErrorCallback) -> Self {
        self.on_error = Some(on_error);
        self
    }
}
