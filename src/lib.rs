//! Indoor Positioning SDK Bridge
//!
//! A client library bridging a native indoor-positioning SDK to application
//! code: one-shot requests for venue data and credentials, plus a managed
//! subscription lifecycle for the continuous location stream. The native
//! SDK and the platform permission service sit behind trait boundaries,
//! with mock implementations included for development and testing.

pub mod api;
pub mod core;
pub mod native;
pub mod registry;

// Re-export commonly used types
pub use crate::api::{PositioningClient, PositioningHandlers};
pub use crate::core::{
    Building, BuildingInfo, CartesianCoordinate, Coordinate, Dimensions, Floor, FloorMap,
    Geofence, Location, PositioningStatus,
};
pub use crate::native::{
    Completion, ErrorCallback, EventKind, ListenerHandle, LocationCallback,
    LocationRequestOptions, MockNativeSdk, MockPermissions, NativeSdk, PermissionDecision,
    PermissionGateway, SdkError, SdkResult, StatusCallback,
};
pub use crate::registry::{ListenerBindings, SubscriptionId, SubscriptionRegistry};
