//! Core data types for the indoor positioning domain
//!
//! These types mirror the payloads exchanged with the native SDK, which
//! speaks camelCase JSON. Serde renames keep the wire shape intact.

use serde::{Deserialize, Serialize};

/// Geographic coordinate in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

/// Building-local cartesian coordinate in meters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CartesianCoordinate {
    pub x: f64,
    pub y: f64,
}

/// Rectangular extent in meters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
}

/// A venue registered in the positioning service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Building {
    pub identifier: String,
    pub name: String,
    pub address: String,
    /// Geographic center of the building footprint
    pub center: Coordinate,
    pub dimensions: Dimensions,
    /// Rotation of the building footprint relative to west, in radians
    pub rotation: f64,
}

/// A building together with its floors and geofences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildingInfo {
    pub building: Building,
    pub floors: Vec<Floor>,
    pub geofences: Vec<Geofence>,
}

/// A single level of a building
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Floor {
    pub identifier: String,
    pub building_identifier: String,
    /// Vertical ordering within the building, ground floor is 0
    pub level: i32,
    /// Altitude above ground level in meters
    pub altitude: f64,
    pub map_url: Option<String>,
}

/// Floor plan image for a floor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FloorMap {
    pub floor_identifier: String,
    /// Base64-encoded bitmap, as delivered by the native side
    pub image: String,
}

/// Polygonal region of interest inside a building
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Geofence {
    pub identifier: String,
    pub building_identifier: String,
    pub floor_identifier: String,
    pub name: String,
    /// Boundary vertices in geographic coordinates
    pub polygon: Vec<Coordinate>,
}

/// A position fix delivered by the continuous location stream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub building_identifier: String,
    pub floor_identifier: String,
    pub coordinate: Coordinate,
    pub cartesian_coordinate: CartesianCoordinate,
    /// Estimated accuracy radius in meters
    pub accuracy: f32,
    /// Heading in degrees clockwise from north, if the device reports one
    pub bearing: Option<f32>,
    #[serde(rename = "timestamp")]
    pub timestamp_ms: u64,
}

/// State of the positioning pipeline, reported through status events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PositioningStatus {
    /// Positioning has been requested and the pipeline is warming up
    Starting,
    /// Position fixes are being computed
    Calculating,
    /// The user left the coverage of every known building
    UserNotInBuilding,
    /// The compass needs calibration before headings are reliable
    CompassCalibrationNeeded,
    /// The pipeline has been shut down
    Stopped,
}
