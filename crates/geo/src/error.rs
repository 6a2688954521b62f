//! Error types for the geo crate.

use thiserror::Error;

/// Result type alias for geo operations.
pub type Result<T> = std::result::Result<T, GeoError>;

/// Errors that can occur during geo operations.
#[derive(Debug, Error)]
pub enum GeoError {
    /// Invalid coordinate values
    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),

    /// Negative or non-finite distance
    #[error("Invalid distance: {0} km")]
    InvalidDistance(f64),

    /// A route needs at least one step
    #[error("Invalid route steps: {0} (must be at least 1)")]
    InvalidRouteSteps(usize),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Error code for integration with vatavaran-core error handling.
/// Range: 10xxx for geo errors.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeoErrorCode {
    /// Invalid coordinate values
    InvalidCoordinate = 10001,
    /// Negative or non-finite distance
    InvalidDistance = 10002,
    /// Route step count of zero
    InvalidRouteSteps = 10003,
    /// JSON parsing error
    JsonParsing = 10004,
}

impl GeoError {
    /// Returns the error code for this error.
    pub fn code(&self) -> GeoErrorCode {
        match self {
            GeoError::InvalidCoordinate(_) => GeoErrorCode::InvalidCoordinate,
            GeoError::InvalidDistance(_) => GeoErrorCode::InvalidDistance,
            GeoError::InvalidRouteSteps(_) => GeoErrorCode::InvalidRouteSteps,
            GeoError::JsonError(_) => GeoErrorCode::JsonParsing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_in_geo_range() {
        let errors = [
            GeoError::InvalidCoordinate("lat".into()),
            GeoError::InvalidDistance(-1.0),
            GeoError::InvalidRouteSteps(0),
        ];
        for err in errors {
            let code = err.code() as u32;
            assert_eq!(code / 1000, 10, "{err}");
        }
    }

    #[test]
    fn test_json_error_conversion() {
        let err: GeoError = serde_json::from_str::<f64>("nope").unwrap_err().into();
        assert_eq!(err.code(), GeoErrorCode::JsonParsing);
    }
}
