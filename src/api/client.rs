//! Positioning client over the native SDK boundary
//!
//! This module provides the application entry point for the bridge: one-shot
//! requests forwarded to the native SDK, and the subscription lifecycle of
//! the continuous location stream.

use crate::api::types::PositioningHandlers;
use crate::core::{Building, BuildingInfo, Floor, FloorMap, Geofence};
use crate::native::{
    Completion, LocationRequestOptions, NativeSdk, PermissionDecision, PermissionGateway,
};
use crate::registry::{ListenerBindings, SubscriptionId, SubscriptionRegistry};
use tracing::{debug, warn};

/// Client session over the native positioning SDK
///
/// Owns the subscription registry and both boundary objects. All mutating
/// operations take exclusive access, so subscription bookkeeping can never
/// interleave; the only blocking call is the permission request inside
/// `start_positioning`.
///
/// Dropping the client force-stops the update stream, so an abandoned
/// session cannot leak an active native stream.
pub struct PositioningClient {
    native: Box<dyn NativeSdk>,
    permissions: Box<dyn PermissionGateway>,
    registry: SubscriptionRegistry,
}

impl PositioningClient {
    /// Create a client over the given boundary implementations
    pub fn new(native: Box<dyn NativeSdk>, permissions: Box<dyn PermissionGateway>) -> Self {
        Self {
            native,
            permissions,
            registry: SubscriptionRegistry::new(),
        }
    }

    /// Initialize the underlying SDK
    pub fn init(&mut self) {
        self.native.init();
    }

    /// Authenticate with an email and API key pair
    pub fn set_api_key(&mut self, email: &str, api_key: &str, completion: Completion<()>) {
        self.native.set_api_key(email, api_key, completion);
    }

    /// Authenticate with an email and password pair
    pub fn set_user_pass(&mut self, email: &str, password: &str, completion: Completion<()>) {
        self.native.set_user_pass(email, password, completion);
    }

    /// Set the maximum age of cached venue data, in seconds
    pub fn set_cache_max_age(&mut self, seconds: u32, completion: Completion<()>) {
        self.native.set_cache_max_age(seconds, completion);
    }

    /// Fetch all buildings visible to the authenticated account
    pub fn fetch_buildings(&mut self, completion: Completion<Vec<Building>>) {
        self.native.fetch_buildings(completion);
    }

    /// Fetch a building together with its floors and geofences
    pub fn fetch_building_info(&mut self, building: &Building, completion: Completion<BuildingInfo>) {
        self.native.fetch_building_info(building, completion);
    }

    /// Fetch the floors of a building
    pub fn fetch_floors_from_building(
        &mut self,
        building: &Building,
        completion: Completion<Vec<Floor>>,
    ) {
        self.native.fetch_floors_from_building(building, completion);
    }

    /// Fetch the floor plan image of a floor
    pub fn fetch_map_from_floor(&mut self, floor: &Floor, completion: Completion<FloorMap>) {
        self.native.fetch_map_from_floor(floor, completion);
    }

    /// Fetch the geofences defined inside a building
    pub fn fetch_geofences_from_building(
        &mut self,
        building: &Building,
        completion: Completion<Vec<Geofence>>,
    ) {
        self.native.fetch_geofences_from_building(building, completion);
    }

    /// Request location permission, then subscribe to the update stream
    ///
    /// Blocks until the user resolves the permission prompt. Returns None
    /// when the permission is denied, in which case no subscription is
    /// created and the native side is not touched.
    pub fn start_positioning(
        &mut self,
        handlers: PositioningHandlers,
        options: LocationRequestOptions,
    ) -> Option<SubscriptionId> {
        match self.permissions.request_fine_location() {
            PermissionDecision::Granted => {
                Some(self.start_positioning_updates(handlers, options))
            }
            PermissionDecision::Denied => {
                warn!("location permission denied, positioning not started");
                None
            }
        }
    }

    /// Subscribe to the update stream without a permission check
    ///
    /// The first subscriber starts the native stream with its options.
    /// Followers join the already active stream and their options are
    /// ignored until the stream is next torn down.
    pub fn start_positioning_updates(
        &mut self,
        handlers: PositioningHandlers,
        options: LocationRequestOptions,
    ) -> SubscriptionId {
        if !self.registry.updates_enabled() {
            debug!("enabling native update stream");
            self.native.start_positioning(&options);
            self.registry.set_updates_enabled(true);
        } else {
            debug!("update stream already enabled, joining active stream");
        }

        let PositioningHandlers {
            on_location,
            on_status,
            on_error,
        } = handlers;

        let location = self.native.add_location_listener(on_location);
        let status = self.native.add_status_listener(on_status);
        let mut bindings = ListenerBindings::new(location, status);
        if let Some(on_error) = on_error {
            bindings = bindings.with_error(self.native.add_error_listener(on_error));
        }

        self.registry.register(bindings)
    }

    /// Unsubscribe one subscriber from the update stream
    ///
    /// Unknown, stale, or already released ids are a silent no-op. When the
    /// last live subscriber is released the native stream is stopped as
    /// well.
    pub fn stop_positioning(&mut self, id: SubscriptionId) {
        let bindings = match self.registry.release(id) {
            Some(bindings) => bindings,
            None => return,
        };

        for handle in bindings.handles() {
            self.native.remove_listener(handle);
        }

        if !self.registry.has_live_entries() {
            self.stop_positioning_updates();
        }
    }

    /// Stop the native update stream and drop every remaining subscriber
    ///
    /// A no-op while the stream is inactive. Live subscribers at this point
    /// are released with a warning; in the normal lifecycle the last
    /// `stop_positioning` call has already cleared them all.
    pub fn stop_positioning_updates(&mut self) {
        if !self.registry.updates_enabled() {
            return;
        }

        self.native.stop_positioning(Box::new(|result| match result {
            Ok(()) => debug!("native update stream stopped"),
            Err(error) => warn!("native stop reported an error: {}", error),
        }));
        self.registry.set_updates_enabled(false);

        let leftovers = self.registry.drain_live();
        if !leftovers.is_empty() {
            warn!(
                "stopping update stream with {} live subscriptions",
                leftovers.len()
            );
            for bindings in leftovers {
                for handle in bindings.handles() {
                    self.native.remove_listener(handle);
                }
            }
        }
    }

    /// Whether the native update stream is currently active
    pub fn updates_enabled(&self) -> bool {
        self.registry.updates_enabled()
    }

    /// Number of live positioning subscribers
    pub fn live_subscription_count(&self) -> usize {
        self.registry.live_count()
    }
}

impl Drop for PositioningClient {
    fn drop(&mut self) {
        self.stop_positioning_updates();
    }
}
