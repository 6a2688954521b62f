//! Geospatial helpers for VatavaranTrack maps.
//!
//! This crate provides:
//! - Haversine distance calculations
//! - Human-readable distance formatting
//! - Cosmetic curved routes for map overlays
//! - Bounding boxes for viewport fitting
//! - Ranking of drop-off zones by distance, with optional parallelism
//! - WASM bindings for browser usage
//!
//! # Example
//!
//! ```
//! use vatavaran_geo::{format_distance, haversine_distance, Coordinate};
//!
//! let connaught_place = Coordinate::new(28.6304, 77.2177);
//! let saket = Coordinate::new(28.5244, 77.2167);
//!
//! let distance_km = haversine_distance(&connaught_place, &saket);
//! assert!((distance_km - 11.8).abs() < 0.5);
//! assert!(format_distance(distance_km).unwrap().ends_with(" km"));
//! ```

mod bounds;
mod error;
mod format;
mod haversine;
pub mod ranking;
mod route;

#[cfg(feature = "wasm")]
mod wasm;

pub use bounds::{bounding_box, BoundingBox};
pub use error::{GeoError, GeoErrorCode, Result};
pub use format::format_distance;
pub use haversine::{haversine_distance, haversine_distance_meters, EARTH_RADIUS_KM, EARTH_RADIUS_M};
pub use ranking::{
    nearest, rank_by_distance, rank_by_distance_limited, rank_within_radius, Locatable, NamedZone, Ranked,
};
pub use route::{generate_route, generate_route_with, RouteOptions, CURVE_OFFSET, ROUTE_STEPS};

use serde::{Deserialize, Serialize};

/// A geographic coordinate with latitude and longitude.
///
/// Deserialization also accepts the short `lat`/`lng` keys used by the web
/// client and the zone backend.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees (-90 to 90)
    #[serde(alias = "lat")]
    pub latitude: f64,
    /// Longitude in degrees (-180 to 180)
    #[serde(alias = "lng", alias = "lon")]
    pub longitude: f64,
}

impl Coordinate {
    /// Creates a new coordinate without validation.
    ///
    /// # Arguments
    /// * `latitude` - Latitude in degrees (-90 to 90)
    /// * `longitude` - Longitude in degrees (-180 to 180)
    #[inline]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Creates a coordinate, rejecting NaN, infinities and out-of-range values.
    ///
    /// # Example
    /// ```
    /// use vatavaran_geo::Coordinate;
    ///
    /// assert!(Coordinate::try_new(28.6304, 77.2177).is_ok());
    /// assert!(Coordinate::try_new(f64::NAN, 77.2177).is_err());
    /// assert!(Coordinate::try_new(91.0, 0.0).is_err());
    /// ```
    pub fn try_new(latitude: f64, longitude: f64) -> Result<Self> {
        let coord = Self::new(latitude, longitude);
        coord.validate()?;
        Ok(coord)
    }

    /// Returns true if the coordinate has valid values.
    ///
    /// NaN fails every comparison, so it is never valid.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.latitude >= -90.0
            && self.latitude <= 90.0
            && self.longitude >= -180.0
            && self.longitude <= 180.0
    }

    /// Checks the coordinate, describing the first offending component.
    pub fn validate(&self) -> Result<()> {
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(GeoError::InvalidCoordinate(format!(
                "latitude {} is outside [-90, 90]",
                self.latitude
            )));
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(GeoError::InvalidCoordinate(format!(
                "longitude {} is outside [-180, 180]",
                self.longitude
            )));
        }
        Ok(())
    }

    /// Returns the coordinate as a `[lat, lng]` pair, the shape map libraries expect.
    #[inline]
    pub fn to_pair(&self) -> [f64; 2] {
        [self.latitude, self.longitude]
    }

    /// Converts degrees to radians for internal calculations.
    #[inline]
    pub(crate) fn to_radians(&self) -> (f64, f64) {
        (self.latitude.to_radians(), self.longitude.to_radians())
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self::new(lat, lng)
    }
}

impl From<Coordinate> for [f64; 2] {
    fn from(coord: Coordinate) -> Self {
        coord.to_pair()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_creation() {
        let coord = Coordinate::new(28.6304, 77.2177);
        assert_eq!(coord.latitude, 28.6304);
        assert_eq!(coord.longitude, 77.2177);
    }

    #[test]
    fn test_coordinate_validation() {
        assert!(Coordinate::new(0.0, 0.0).is_valid());
        assert!(Coordinate::new(90.0, 180.0).is_valid());
        assert!(Coordinate::new(-90.0, -180.0).is_valid());
        assert!(!Coordinate::new(91.0, 0.0).is_valid());
        assert!(!Coordinate::new(0.0, 181.0).is_valid());
        assert!(!Coordinate::new(f64::NAN, 0.0).is_valid());
        assert!(!Coordinate::new(0.0, f64::INFINITY).is_valid());
    }

    #[test]
    fn test_try_new_reports_component() {
        let err = Coordinate::try_new(12.0, -200.0).unwrap_err();
        assert_eq!(err.code(), GeoErrorCode::InvalidCoordinate);
        assert!(err.to_string().contains("longitude"));

        let err = Coordinate::try_new(f64::NAN, 0.0).unwrap_err();
        assert!(err.to_string().contains("latitude"));
    }

    #[test]
    fn test_coordinate_from_tuple() {
        let coord: Coordinate = (28.6304, 77.2177).into();
        assert_eq!(coord.latitude, 28.6304);
        assert_eq!(coord.to_pair(), [28.6304, 77.2177]);
    }

    #[test]
    fn test_deserialize_short_keys() {
        let coord: Coordinate = serde_json::from_str(r#"{"lat": 28.7041, "lng": 77.1025}"#).unwrap();
        assert_eq!(coord, Coordinate::new(28.7041, 77.1025));

        let coord: Coordinate =
            serde_json::from_str(r#"{"latitude": 28.7041, "longitude": 77.1025}"#).unwrap();
        assert_eq!(coord, Coordinate::new(28.7041, 77.1025));
    }
}
