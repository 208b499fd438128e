//! Native SDK boundary
//!
//! This module defines the opaque boundary to the platform positioning SDK:
//! the command and event-stream trait, the permission gateway, the error
//! types, and mock implementations for development and testing. Everything
//! behind the boundary (positioning algorithms, map data, geofence
//! evaluation) is out of scope for the bridge.

pub mod error;
pub mod interface;
pub mod mock;
pub mod permissions;

pub use error::{SdkError, SdkResult};
pub use interface::{LocationRequestOptions, NativeSdk};
pub use mock::{MockNativeSdk, MockPermissions};
pub use permissions::{PermissionDecision, PermissionGateway};

use crate::core::{Location, PositioningStatus};

/// Callback type for continuous location updates
pub type LocationCallback = Box<dyn FnMut(Location) + Send>;

/// Callback type for positioning status changes
pub type StatusCallback = Box<dyn FnMut(PositioningStatus) + Send>;

/// Callback type for errors raised by the active location stream
pub type ErrorCallback = Box<dyn FnMut(SdkError) + Send>;

/// Completion continuation for one-shot SDK operations
///
/// Invoked exactly once with the outcome of the operation. Callers that do
/// not care about failures can simply ignore the `Err` arm.
pub type Completion<T> = Box<dyn FnOnce(SdkResult<T>) + Send>;

/// Event kinds published by the native update stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// A new position fix is available
    LocationChanged,
    /// The positioning pipeline changed state
    StatusChanged,
    /// The location stream reported an error
    LocationError,
}

impl EventKind {
    /// Event name used on the native wire
    pub fn name(&self) -> &'static str {
        match self {
            EventKind::LocationChanged => "locationChanged",
            EventKind::StatusChanged => "statusChanged",
            EventKind::LocationError => "locationError",
        }
    }
}

/// Handle identifying one listener registration at the native boundary
///
/// Handles are minted by the `NativeSdk` implementation and disposed of
/// exactly once through `remove_listener`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerHandle(u64);

impl ListenerHandle {
    pub fn new(id: u64) -> Self {
        ListenerHandle(id)
    }

    pub fn id(&self) -> u64 {
        self.0
    }
}
