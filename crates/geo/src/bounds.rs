//! Bounding boxes for fitting a map viewport around a set of points.

use crate::Coordinate;
use serde::{Deserialize, Serialize};

/// Axis-aligned box given by its south-west and north-east corners.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Minimum latitude and longitude
    pub sw: Coordinate,
    /// Maximum latitude and longitude
    pub ne: Coordinate,
}

impl BoundingBox {
    /// Returns true if `coord` lies inside the box or on its edge.
    pub fn contains(&self, coord: &Coordinate) -> bool {
        coord.latitude >= self.sw.latitude
            && coord.latitude <= self.ne.latitude
            && coord.longitude >= self.sw.longitude
            && coord.longitude <= self.ne.longitude
    }

    /// Center of the box.
    pub fn center(&self) -> Coordinate {
        Coordinate::new(
            (self.sw.latitude + self.ne.latitude) / 2.0,
            (self.sw.longitude + self.ne.longitude) / 2.0,
        )
    }

    /// Expands every side by `degrees`, clamped to valid coordinate ranges.
    pub fn padded(&self, degrees: f64) -> Self {
        Self {
            sw: Coordinate::new(
                (self.sw.latitude - degrees).max(-90.0),
                (self.sw.longitude - degrees).max(-180.0),
            ),
            ne: Coordinate::new(
                (self.ne.latitude + degrees).min(90.0),
                (self.ne.longitude + degrees).min(180.0),
            ),
        }
    }

    /// `[[minLat, minLng], [maxLat, maxLng]]`, the form Leaflet's `fitBounds` takes.
    pub fn to_pairs(&self) -> [[f64; 2]; 2] {
        [self.sw.to_pair(), self.ne.to_pair()]
    }
}

/// Computes the smallest box containing every point.
///
/// Returns `None` for an empty input so callers can skip viewport fitting.
///
/// # Example
/// ```
/// use vatavaran_geo::{bounding_box, Coordinate};
///
/// let points = [Coordinate::new(28.7041, 77.1025), Coordinate::new(28.5244, 77.2167)];
/// let bounds = bounding_box(points).unwrap();
/// assert_eq!(bounds.sw, Coordinate::new(28.5244, 77.1025));
/// assert_eq!(bounds.ne, Coordinate::new(28.7041, 77.2167));
///
/// assert!(bounding_box(Vec::<Coordinate>::new()).is_none());
/// ```
pub fn bounding_box<I>(points: I) -> Option<BoundingBox>
where
    I: IntoIterator,
    I::Item: std::borrow::Borrow<Coordinate>,
{
    use std::borrow::Borrow;

    let mut iter = points.into_iter();
    let first = *iter.next()?.borrow();

    let bounds = iter.fold(BoundingBox { sw: first, ne: first }, |mut acc, point| {
        let point = point.borrow();
        acc.sw.latitude = acc.sw.latitude.min(point.latitude);
        acc.sw.longitude = acc.sw.longitude.min(point.longitude);
        acc.ne.latitude = acc.ne.latitude.max(point.latitude);
        acc.ne.longitude = acc.ne.longitude.max(point.longitude);
        acc
    });

    Some(bounds)
}
