//! Curved route overlays.
//!
//! The route drawn between a collection vehicle and a drop-off zone is a single
//! quadratic Bézier curve, not a road-network path. It exists only to give the
//! map a visible, slightly bowed polyline.

use crate::{Coordinate, GeoError, Result};

/// Number of segments in a generated route (the route has one more point).
pub const ROUTE_STEPS: usize = 20;

/// Perpendicular offset factor of the Bézier control point, in degrees.
///
/// Tuned for city-scale distances: across a country the bow is exaggerated,
/// across a street it is invisible.
pub const CURVE_OFFSET: f64 = 0.002;

/// Shape parameters for [`generate_route_with`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteOptions {
    /// Number of segments; the route contains `steps + 1` points.
    pub steps: usize,
    /// Control point offset factor.
    pub curve_offset: f64,
}

impl Default for RouteOptions {
    fn default() -> Self {
        Self {
            steps: ROUTE_STEPS,
            curve_offset: CURVE_OFFSET,
        }
    }
}

/// Generates the default 21-point curved route from `start` to `end`.
///
/// The first point equals `start`, the last equals `end`, and the same inputs
/// always produce the same points.
///
/// # Example
/// ```
/// use vatavaran_geo::{generate_route, Coordinate};
///
/// let truck = Coordinate::new(28.6304, 77.2177);
/// let zone = Coordinate::new(28.5450, 77.2732);
///
/// let route = generate_route(&truck, &zone);
/// assert_eq!(route.len(), 21);
/// assert_eq!(route[0], truck);
/// assert_eq!(route[20], zone);
/// ```
pub fn generate_route(start: &Coordinate, end: &Coordinate) -> Vec<Coordinate> {
    bezier_points(start, end, ROUTE_STEPS, CURVE_OFFSET)
}

/// Generates a curved route with custom step count and curve intensity.
///
/// Fails with [`GeoError::InvalidRouteSteps`] when `steps` is zero.
pub fn generate_route_with(
    start: &Coordinate,
    end: &Coordinate,
    options: &RouteOptions,
) -> Result<Vec<Coordinate>> {
    if options.steps == 0 {
        return Err(GeoError::InvalidRouteSteps(options.steps));
    }
    Ok(bezier_points(start, end, options.steps, options.curve_offset))
}

fn bezier_points(start: &Coordinate, end: &Coordinate, steps: usize, offset: f64) -> Vec<Coordinate> {
    let control = control_point(start, end, offset);

    (0..=steps)
        .map(|i| {
            let t = i as f64 / steps as f64;
            let u = 1.0 - t;
            let latitude = u.powi(2) * start.latitude
                + 2.0 * u * t * control.latitude
                + t.powi(2) * end.latitude;
            let longitude = u.powi(2) * start.longitude
                + 2.0 * u * t * control.longitude
                + t.powi(2) * end.longitude;
            Coordinate::new(latitude, longitude)
        })
        .collect()
}

/// Midpoint pushed sideways along the segment's normal `(-dx, dy)`.
fn control_point(start: &Coordinate, end: &Coordinate, offset: f64) -> Coordinate {
    let mid_lat = (start.latitude + end.latitude) / 2.0;
    let mid_lng = (start.longitude + end.longitude) / 2.0;

    let dx = end.longitude - start.longitude;
    let dy = end.latitude - start.latitude;

    Coordinate::new(mid_lat - dx * offset, mid_lng + dy * offset)
}
