//! Mock native SDK and permission gateway for testing and development

use crate::core::{Building, BuildingInfo, Floor, FloorMap, Geofence, Location, PositioningStatus};
use crate::native::{
    Completion, ErrorCallback, EventKind, ListenerHandle, LocationCallback, LocationRequestOptions,
    NativeSdk, PermissionDecision, PermissionGateway, SdkError, StatusCallback,
};
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct MockState {
    init_calls: u32,
    api_key_sets: Vec<(String, String)>,
    user_pass_sets: Vec<(String, String)>,
    cache_max_ages: Vec<u32>,
    start_options: Vec<LocationRequestOptions>,
    stop_calls: u32,
    next_listener_id: u64,
    location_listeners: Vec<(ListenerHandle, LocationCallback)>,
    status_listeners: Vec<(ListenerHandle, StatusCallback)>,
    error_listeners: Vec<(ListenerHandle, ErrorCallback)>,
    added_listeners: Vec<(EventKind, ListenerHandle)>,
    removal_requests: Vec<ListenerHandle>,
    stub_buildings: Vec<Building>,
    stub_building_info: Option<BuildingInfo>,
    stub_floors: Vec<Floor>,
    stub_floor_map: Option<FloorMap>,
    stub_geofences: Vec<Geofence>,
    injected_failure: Option<SdkError>,
}

/// Mock native SDK for testing and development
///
/// Clones share one underlying state, so a test can hand a clone to the
/// client and keep another for stubbing data, injecting failures, emitting
/// events, and inspecting the recorded commands afterwards.
#[derive(Clone)]
pub struct MockNativeSdk {
    state: Arc<Mutex<MockState>>,
}

impl MockNativeSdk {
    /// Create a new mock with no stubbed data
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(MockState::default())),
        }
    }

    /// Stub the building list served by `fetch_buildings`
    /// Without a stub the fetch completes with an empty list
    pub fn stub_buildings(&self, buildings: Vec<Building>) {
        self.state.lock().unwrap().stub_buildings = buildings;
    }

    /// Stub the payload served by `fetch_building_info`
    /// Without a stub the fetch completes with an invalid-request error
    pub fn stub_building_info(&self, info: BuildingInfo) {
        self.state.lock().unwrap().stub_building_info = Some(info);
    }

    /// Stub the floor list served by `fetch_floors_from_building`
    pub fn stub_floors(&self, floors: Vec<Floor>) {
        self.state.lock().unwrap().stub_floors = floors;
    }

    /// Stub the floor plan served by `fetch_map_from_floor`
    /// Without a stub the fetch completes with an invalid-request error
    pub fn stub_floor_map(&self, map: FloorMap) {
        self.state.lock().unwrap().stub_floor_map = Some(map);
    }

    /// Stub the geofence list served by `fetch_geofences_from_building`
    pub fn stub_geofences(&self, geofences: Vec<Geofence>) {
        self.state.lock().unwrap().stub_geofences = geofences;
    }

    /// Make the next completed command fail with the given error
    pub fn fail_next_request(&self, error: SdkError) {
        self.state.lock().unwrap().injected_failure = Some(error);
    }

    /// Deliver a position fix to every registered location listener
    ///
    /// The state lock is held while listeners run, so a listener must not
    /// call back into the same mock.
    pub fn emit_location(&self, location: Location) {
        let mut state = self.state.lock().unwrap();
        for (_, callback) in state.location_listeners.iter_mut() {
            callback(location.clone());
        }
    }

    /// Deliver a status change to every registered status listener
    pub fn emit_status(&self, status: PositioningStatus) {
        let mut state = self.state.lock().unwrap();
        for (_, callback) in state.status_listeners.iter_mut() {
            callback(status);
        }
    }

    /// Deliver a stream error to every registered error listener
    pub fn emit_error(&self, error: SdkError) {
        let mut state = self.state.lock().unwrap();
        for (_, callback) in state.error_listeners.iter_mut() {
            callback(error.clone());
        }
    }

    /// Number of `init` calls received
    pub fn init_count(&self) -> u32 {
        self.state.lock().unwrap().init_calls
    }

    /// Every email and API key pair received through `set_api_key`
    pub fn api_key_sets(&self) -> Vec<(String, String)> {
        self.state.lock().unwrap().api_key_sets.clone()
    }

    /// Every email and password pair received through `set_user_pass`
    pub fn user_pass_sets(&self) -> Vec<(String, String)> {
        self.state.lock().unwrap().user_pass_sets.clone()
    }

    /// Every cache age received through `set_cache_max_age`
    pub fn cache_max_ages(&self) -> Vec<u32> {
        self.state.lock().unwrap().cache_max_ages.clone()
    }

    /// Options of every `start_positioning` command received
    pub fn start_options(&self) -> Vec<LocationRequestOptions> {
        self.state.lock().unwrap().start_options.clone()
    }

    /// Number of `start_positioning` commands received
    pub fn start_count(&self) -> usize {
        self.state.lock().unwrap().start_options.len()
    }

    /// Number of `stop_positioning` commands received
    pub fn stop_count(&self) -> u32 {
        self.state.lock().unwrap().stop_calls
    }

    /// Number of listeners currently registered across all event kinds
    pub fn active_listener_count(&self) -> usize {
        let state = self.state.lock().unwrap();
        state.location_listeners.len() + state.status_listeners.len() + state.error_listeners.len()
    }

    /// Every listener registration in order, with its event kind
    pub fn added_listeners(&self) -> Vec<(EventKind, ListenerHandle)> {
        self.state.lock().unwrap().added_listeners.clone()
    }

    /// Every `remove_listener` call in order, including misses
    pub fn removal_requests(&self) -> Vec<ListenerHandle> {
        self.state.lock().unwrap().removal_requests.clone()
    }
}

impl Default for MockNativeSdk {
    fn default() -> Self {
        Self::new()
    }
}

impl NativeSdk for MockNativeSdk {
    fn init(&mut self) {
        self.state.lock().unwrap().init_calls += 1;
    }

    fn set_api_key(&mut self, email: &str, api_key: &str, completion: Completion<()>) {
        let result = {
            let mut state = self.state.lock().unwrap();
            state
                .api_key_sets
                .push((email.to_string(), api_key.to_string()));
            match state.injected_failure.take() {
                Some(error) => Err(error),
                None => Ok(()),
            }
        };
        completion(result);
    }

    fn set_user_pass(&mut self, email: &str, password: &str, completion: Completion<()>) {
        let result = {
            let mut state = self.state.lock().unwrap();
            state
                .user_pass_sets
                .push((email.to_string(), password.to_string()));
            match state.injected_failure.take() {
                Some(error) => Err(error),
                None => Ok(()),
            }
        };
        completion(result);
    }

    fn set_cache_max_age(&mut self, seconds: u32, completion: Completion<()>) {
        let result = {
            let mut state = self.state.lock().unwrap();
            state.cache_max_ages.push(seconds);
            match state.injected_failure.take() {
                Some(error) => Err(error),
                None => Ok(()),
            }
        };
        completion(result);
    }

    fn fetch_buildings(&mut self, completion: Completion<Vec<Building>>) {
        let result = {
            let mut state = self.state.lock().unwrap();
            match state.injected_failure.take() {
                Some(error) => Err(error),
                None => Ok(state.stub_buildings.clone()),
            }
        };
        completion(result);
    }

    fn fetch_building_info(&mut self, building: &Building, completion: Completion<BuildingInfo>) {
        let result = {
            let mut state = self.state.lock().unwrap();
            match state.injected_failure.take() {
                Some(error) => Err(error),
                None => match state.stub_building_info.clone() {
                    Some(info) => Ok(info),
                    None => Err(SdkError::InvalidRequest {
                        reason: format!("no building info for {}", building.identifier),
                    }),
                },
            }
        };
        completion(result);
    }

    fn fetch_floors_from_building(
        &mut self,
        _building: &Building,
        completion: Completion<Vec<Floor>>,
    ) {
        let result = {
            let mut state = self.state.lock().unwrap();
            match state.injected_failure.take() {
                Some(error) => Err(error),
                None => Ok(state.stub_floors.clone()),
            }
        };
        completion(result);
    }

    fn fetch_map_from_floor(&mut self, floor: &Floor, completion: Completion<FloorMap>) {
        let result = {
            let mut state = self.state.lock().unwrap();
            match state.injected_failure.take() {
                Some(error) => Err(error),
                None => match state.stub_floor_map.clone() {
                    Some(map) => Ok(map),
                    None => Err(SdkError::InvalidRequest {
                        reason: format!("no floor map for {}", floor.identifier),
                    }),
                },
            }
        };
        completion(result);
    }

    fn fetch_geofences_from_building(
        &mut self,
        _building: &Building,
        completion: Completion<Vec<Geofence>>,
    ) {
        let result = {
            let mut state = self.state.lock().unwrap();
            match state.injected_failure.take() {
                Some(error) => Err(error),
                None => Ok(state.stub_geofences.clone()),
            }
        };
        completion(result);
    }

    fn start_positioning(&mut self, options: &LocationRequestOptions) {
        self.state.lock().unwrap().start_options.push(options.clone());
    }

    fn stop_positioning(&mut self, completion: Completion<()>) {
        let result = {
            let mut state = self.state.lock().unwrap();
            state.stop_calls += 1;
            match state.injected_failure.take() {
                Some(error) => Err(error),
                None => Ok(()),
            }
        };
        completion(result);
    }

    fn add_location_listener(&mut self, callback: LocationCallback) -> ListenerHandle {
        let mut state = self.state.lock().unwrap();
        state.next_listener_id += 1;
        let handle = ListenerHandle::new(state.next_listener_id);
        state.location_listeners.push((handle, callback));
        state.added_listeners.push((EventKind::LocationChanged, handle));
        handle
    }

    fn add_status_listener(&mut self, callback: StatusCallback) -> ListenerHandle {
        let mut state = self.state.lock().unwrap();
        state.next_listener_id += 1;
        let handle = ListenerHandle::new(state.next_listener_id);
        state.status_listeners.push((handle, callback));
        state.added_listeners.push((EventKind::StatusChanged, handle));
        handle
    }

    fn add_error_listener(&mut self, callback: ErrorCallback) -> ListenerHandle {
        let mut state = self.state.lock().unwrap();
        state.next_listener_id += 1;
        let handle = ListenerHandle::new(state.next_listener_id);
        state.error_listeners.push((handle, callback));
        state.added_listeners.push((EventKind::LocationError, handle));
        handle
    }

    fn remove_listener(&mut self, handle: ListenerHandle) -> bool {
        let mut state = self.state.lock().unwrap();
        state.removal_requests.push(handle);

        let before = state.location_listeners.len()
            + state.status_listeners.len()
            + state.error_listeners.len();
        state.location_listeners.retain(|(h, _)| *h != handle);
        state.status_listeners.retain(|(h, _)| *h != handle);
        state.error_listeners.retain(|(h, _)| *h != handle);
        let after = state.location_listeners.len()
            + state.status_listeners.len()
            + state.error_listeners.len();

        after < before
    }
}

/// Mock permission gateway with a fixed decision
///
/// Clones share the request counter, so a test can keep a probe after
/// handing a clone to the client.
#[derive(Clone)]
pub struct MockPermissions {
    decision: PermissionDecision,
    requests: Arc<Mutex<u32>>,
}

impl MockPermissions {
    /// Gateway that grants every request
    pub fn granting() -> Self {
        Self {
            decision: PermissionDecision::Granted,
            requests: Arc::new(Mutex::new(0)),
        }
    }

    /// Gateway that denies every request
    pub fn denying() -> Self {
        Self {
            decision: PermissionDecision::Denied,
            requests: Arc::new(Mutex::new(0)),
        }
    }

    /// Number of permission requests received
    pub fn request_count(&self) -> u32 {
        *self.requests.lock().unwrap()
    }
}

impl PermissionGateway for MockPermissions {
    fn request_fine_location(&mut self) -> PermissionDecision {
        *self.requests.lock().unwrap() += 1;
        self.decision
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CartesianCoordinate, Coordinate, Dimensions};

    fn sample_building() -> Building {
        Building {
            identifier: "B1".to_string(),
            name: "Headquarters".to_string(),
            address: "1 Main St".to_string(),
            center: Coordinate {
                latitude: 41.385,
                longitude: 2.173,
            },
            dimensions: Dimensions {
                width: 40.0,
                height: 25.0,
            },
            rotation: 0.0,
        }
    }

    fn sample_location() -> Location {
        Location {
            building_identifier: "B1".to_string(),
            floor_identifier: "F1".to_string(),
            coordinate: Coordinate {
                latitude: 41.385,
                longitude: 2.173,
            },
            cartesian_coordinate: CartesianCoordinate { x: 1.0, y: 2.0 },
            accuracy: 3.0,
            bearing: None,
            timestamp_ms: 1_700_000_000_000,
        }
    }

    #[test]
    fn test_mock_records_commands() {
        let mock = MockNativeSdk::new();
        let mut sdk: Box<dyn NativeSdk> = Box::new(mock.clone());

        sdk.init();
        sdk.set_api_key("dev@example.com", "key-123", Box::new(|_| {}));
        sdk.set_cache_max_age(3600, Box::new(|_| {}));

        assert_eq!(mock.init_count(), 1);
        assert_eq!(
            mock.api_key_sets(),
            vec![("dev@example.com".to_string(), "key-123".to_string())]
        );
        assert_eq!(mock.cache_max_ages(), vec![3600]);
    }

    #[test]
    fn test_stubbed_buildings_are_served() {
        let mock = MockNativeSdk::new();
        mock.stub_buildings(vec![sample_building()]);

        let received = Arc::new(Mutex::new(None));
        let captured = received.clone();
        let mut sdk: Box<dyn NativeSdk> = Box::new(mock.clone());
        sdk.fetch_buildings(Box::new(move |result| {
            *captured.lock().unwrap() = Some(result);
        }));

        let result = received.lock().unwrap().take().unwrap();
        assert_eq!(result, Ok(vec![sample_building()]));
    }

    #[test]
    fn test_unstubbed_building_info_is_an_error() {
        let mock = MockNativeSdk::new();
        let received = Arc::new(Mutex::new(None));
        let captured = received.clone();

        let mut sdk: Box<dyn NativeSdk> = Box::new(mock.clone());
        sdk.fetch_building_info(
            &sample_building(),
            Box::new(move |result| {
                *captured.lock().unwrap() = Some(result);
            }),
        );

        let result = received.lock().unwrap().take().unwrap();
        assert!(matches!(result, Err(SdkError::InvalidRequest { .. })));
    }

    #[test]
    fn test_fail_next_request_is_one_shot() {
        let mock = MockNativeSdk::new();
        mock.fail_next_request(SdkError::Network {
            message: "offline".to_string(),
        });

        let outcomes = Arc::new(Mutex::new(Vec::new()));
        let mut sdk: Box<dyn NativeSdk> = Box::new(mock.clone());
        for _ in 0..2 {
            let captured = outcomes.clone();
            sdk.fetch_buildings(Box::new(move |result| {
                captured.lock().unwrap().push(result.is_ok());
            }));
        }

        assert_eq!(*outcomes.lock().unwrap(), vec![false, true]);
    }

    #[test]
    fn test_listener_registry() {
        let mock = MockNativeSdk::new();
        let mut sdk: Box<dyn NativeSdk> = Box::new(mock.clone());

        let location = sdk.add_location_listener(Box::new(|_| {}));
        let status = sdk.add_status_listener(Box::new(|_| {}));
        let error = sdk.add_error_listener(Box::new(|_| {}));

        assert_ne!(location, status);
        assert_ne!(status, error);
        assert_eq!(mock.active_listener_count(), 3);
        assert_eq!(
            mock.added_listeners()
                .iter()
                .map(|(kind, _)| *kind)
                .collect::<Vec<_>>(),
            vec![
                EventKind::LocationChanged,
                EventKind::StatusChanged,
                EventKind::LocationError
            ]
        );

        assert!(sdk.remove_listener(status));
        assert_eq!(mock.active_listener_count(), 2);

        // A handle can only be removed once
        assert!(!sdk.remove_listener(status));
        assert_eq!(mock.removal_requests(), vec![status, status]);
    }

    #[test]
    fn test_emit_reaches_registered_listeners() {
        let mock = MockNativeSdk::new();
        let mut sdk: Box<dyn NativeSdk> = Box::new(mock.clone());

        let fixes = Arc::new(Mutex::new(Vec::new()));
        let sink = fixes.clone();
        let handle = sdk.add_location_listener(Box::new(move |location| {
            sink.lock().unwrap().push(location);
        }));

        mock.emit_location(sample_location());
        assert_eq!(fixes.lock().unwrap().len(), 1);

        sdk.remove_listener(handle);
        mock.emit_location(sample_location());
        assert_eq!(fixes.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_permission_gateway_counts_requests() {
        let probe = MockPermissions::denying();
        let mut gateway: Box<dyn PermissionGateway> = Box::new(probe.clone());

        assert_eq!(gateway.request_fine_location(), PermissionDecision::Denied);
        assert_eq!(gateway.request_fine_location(), PermissionDecision::Denied);
        assert_eq!(probe.request_count(), 2);

        let mut granting = MockPermissions::granting();
        assert!(granting.request_fine_location().is_granted());
    }
}
