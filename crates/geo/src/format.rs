//! Distance formatting for display next to map markers.

use crate::{GeoError, Result};

/// Formats a distance in kilometers for display.
///
/// Distances under one kilometer are shown in whole meters (`"350 m"`),
/// everything else in kilometers with two decimals (`"4.27 km"`).
/// Negative and non-finite distances are rejected.
///
/// # Example
/// ```
/// use vatavaran_geo::format_distance;
///
/// assert_eq!(format_distance(0.35).unwrap(), "350 m");
/// assert_eq!(format_distance(4.2718).unwrap(), "4.27 km");
/// assert!(format_distance(-1.0).is_err());
/// ```
pub fn format_distance(km: f64) -> Result<String> {
    if !km.is_finite() || km < 0.0 {
        return Err(GeoError::InvalidDistance(km));
    }
    // -0.0 would print as "-0 m"
    let km = km + 0.0;

    if km < 1.0 {
        Ok(format!("{} m", (km * 1000.0).round()))
    } else {
        Ok(format!("{:.2} km", km))
    }
}
