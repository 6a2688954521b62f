//! Configuration schema definitions

use serde::{Deserialize, Serialize};
use vatavaran_geo::{Coordinate, RouteOptions, CURVE_OFFSET, ROUTE_STEPS};

use crate::catalog::FALLBACK_LOCATION;

/// Root configuration schema
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigSchema {
    /// Backend connection
    #[serde(default)]
    pub api: ApiConfig,

    /// Map display
    #[serde(default)]
    pub map: MapConfig,

    /// Zone listing
    #[serde(default)]
    pub zones: ZonesConfig,
}

/// Backend connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the REST backend
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:5000/api".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

/// Map display settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapConfig {
    /// Latitude used when the device position is unknown
    #[serde(default = "default_fallback_latitude")]
    pub fallback_latitude: f64,

    /// Longitude used when the device position is unknown
    #[serde(default = "default_fallback_longitude")]
    pub fallback_longitude: f64,

    /// Segments in a drawn route
    #[serde(default = "default_route_steps")]
    pub route_steps: usize,

    /// Bow of the drawn route
    #[serde(default = "default_curve_offset")]
    pub curve_offset: f64,

    /// Padding around fitted bounds, in degrees
    #[serde(default = "default_viewport_padding")]
    pub viewport_padding: f64,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            fallback_latitude: default_fallback_latitude(),
            fallback_longitude: default_fallback_longitude(),
            route_steps: default_route_steps(),
            curve_offset: default_curve_offset(),
            viewport_padding: default_viewport_padding(),
        }
    }
}

impl MapConfig {
    /// Position to use when no live location is available.
    pub fn fallback_location(&self) -> Coordinate {
        Coordinate::new(self.fallback_latitude, self.fallback_longitude)
    }

    /// Route shape derived from this configuration.
    pub fn route_options(&self) -> RouteOptions {
        RouteOptions {
            steps: self.route_steps,
            curve_offset: self.curve_offset,
        }
    }
}

fn default_fallback_latitude() -> f64 {
    FALLBACK_LOCATION.latitude
}

fn default_fallback_longitude() -> f64 {
    FALLBACK_LOCATION.longitude
}

fn default_route_steps() -> usize {
    ROUTE_STEPS
}

fn default_curve_offset() -> f64 {
    CURVE_OFFSET
}

fn default_viewport_padding() -> f64 {
    0.01
}

/// Zone listing settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ZonesConfig {
    /// Maximum zones to list (all when unset)
    #[serde(default)]
    pub max_results: Option<usize>,

    /// Only list zones within this many kilometers (all when unset)
    #[serde(default)]
    pub radius_km: Option<f64>,

    /// JSON file replacing the built-in zone catalog
    #[serde(default)]
    pub catalog_path: Option<String>,
}
