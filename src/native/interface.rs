//! Native SDK trait and location request configuration

use crate::core::{Building, BuildingInfo, Floor, FloorMap, Geofence};
use crate::native::{Completion, ErrorCallback, ListenerHandle, LocationCallback, StatusCallback};
use serde::{Deserialize, Serialize};

/// Abstraction over the platform positioning SDK
///
/// One-shot commands deliver their outcome through a `Completion` and never
/// block. `start_positioning` is fire-and-forget; results of an active
/// stream arrive through the registered listeners instead. Implementations
/// own the failure semantics, the bridge adds no retries or timeouts on top.
pub trait NativeSdk {
    /// Initialize the underlying SDK
    fn init(&mut self);

    /// Authenticate with an email and API key pair
    fn set_api_key(&mut self, email: &str, api_key: &str, completion: Completion<()>);

    /// Authenticate with an email and password pair
    fn set_user_pass(&mut self, email: &str, password: &str, completion: Completion<()>);

    /// Set the maximum age of cached venue data, in seconds
    fn set_cache_max_age(&mut self, seconds: u32, completion: Completion<()>);

    /// Fetch all buildings visible to the authenticated account
    fn fetch_buildings(&mut self, completion: Completion<Vec<Building>>);

    /// Fetch a building together with its floors and geofences
    fn fetch_building_info(&mut self, building: &Building, completion: Completion<BuildingInfo>);

    /// Fetch the floors of a building
    fn fetch_floors_from_building(&mut self, building: &Building, completion: Completion<Vec<Floor>>);

    /// Fetch the floor plan image of a floor
    fn fetch_map_from_floor(&mut self, floor: &Floor, completion: Completion<FloorMap>);

    /// Fetch the geofences defined inside a building
    fn fetch_geofences_from_building(
        &mut self,
        building: &Building,
        completion: Completion<Vec<Geofence>>,
    );

    /// Start the continuous location stream
    fn start_positioning(&mut self, options: &LocationRequestOptions);

    /// Stop the continuous location stream
    fn stop_positioning(&mut self, completion: Completion<()>);

    /// Register a listener for location-changed events
    fn add_location_listener(&mut self, callback: LocationCallback) -> ListenerHandle;

    /// Register a listener for status-changed events
    fn add_status_listener(&mut self, callback: StatusCallback) -> ListenerHandle;

    /// Register a listener for location-error events
    fn add_error_listener(&mut self, callback: ErrorCallback) -> ListenerHandle;

    /// Remove a previously registered listener
    /// Returns false if the handle is unknown or already removed
    fn remove_listener(&mut self, handle: ListenerHandle) -> bool;
}

/// Options for starting the continuous location stream
///
/// The bridge passes these through to the native side unchanged and does
/// not interpret or validate them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationRequestOptions {
    /// Restrict positioning to one building, None selects global mode
    pub building_identifier: Option<String>,
    /// Blend inertial sensors into the position estimate
    pub use_dead_reckoning: bool,
    /// Target interval between position fixes, in milliseconds
    pub interval_ms: u32,
    /// Minimum movement before a new fix is published, in meters
    pub smallest_displacement_m: f32,
}

impl Default for LocationRequestOptions {
    fn default() -> Self {
        Self {
            building_identifier: None,
            use_dead_reckoning: false,
            interval_ms: 1000,
            smallest_displacement_m: 0.0,
        }
    }
}

impl LocationRequestOptions {
    /// Options for positioning restricted to a single building
    pub fn for_building(identifier: &str) -> Self {
        Self {
            building_identifier: Some(identifier.to_string()),
            ..Default::default()
        }
    }

    pub fn with_dead_reckoning(mut self, enable: bool) -> Self {
        self.use_dead_reckoning = enable;
        self
    }

    pub fn with_interval_ms(mut self, interval_ms: u32) -> Self {
        self.interval_ms = interval_ms;
        self
    }

    pub fn with_smallest_displacement_m(mut self, displacement_m: f32) -> Self {
        self.smallest_displacement_m = displacement_m;
        self
    }
}
