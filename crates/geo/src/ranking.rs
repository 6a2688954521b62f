//! Ranking drop-off zones by distance, with optional parallelism.
//!
//! Ranking never touches the caller's zones: each zone is cloned and wrapped in
//! a [`Ranked`] carrying the computed distance, so the same zone list can be
//! ranked again from a different position.

use crate::{haversine_distance, Coordinate};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Anything with a position on the map.
pub trait Locatable {
    /// The item's coordinate.
    fn coordinate(&self) -> Coordinate;
}

impl Locatable for Coordinate {
    fn coordinate(&self) -> Coordinate {
        *self
    }
}

impl<T: Locatable + ?Sized> Locatable for &T {
    fn coordinate(&self) -> Coordinate {
        (**self).coordinate()
    }
}

/// Minimal drop-off zone record: an identifier, a display name and a position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedZone {
    /// Zone ID
    pub id: i64,
    /// Display name
    pub name: String,
    /// Zone position
    #[serde(flatten)]
    pub coordinate: Coordinate,
}

impl NamedZone {
    /// Creates a zone record.
    pub fn new(id: i64, name: impl Into<String>, coordinate: Coordinate) -> Self {
        Self {
            id,
            name: name.into(),
            coordinate,
        }
    }
}

impl Locatable for NamedZone {
    fn coordinate(&self) -> Coordinate {
        self.coordinate
    }
}

/// A copy of an item decorated with its distance from the reference point.
///
/// Serializes as the item's own fields plus `distance`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ranked<T> {
    /// The ranked item
    #[serde(flatten)]
    pub item: T,
    /// Distance from the reference point in kilometers
    pub distance: f64,
}

/// Ranks items by distance from `reference`, closest first.
///
/// Items whose distance is NaN (invalid coordinates) sort last. Equal
/// distances keep no particular order.
///
/// # Example
/// ```
/// use vatavaran_geo::{rank_by_distance, Coordinate, NamedZone};
///
/// let zones = vec![
///     NamedZone::new(3, "Okhla Integrated Facility", Coordinate::new(28.5450, 77.2732)),
///     NamedZone::new(9, "Connaught Place Eco-bins", Coordinate::new(28.6304, 77.2177)),
/// ];
///
/// let ranked = rank_by_distance(&zones, &Coordinate::new(28.6315, 77.2167));
/// assert_eq!(ranked[0].item.id, 9);
/// assert!(ranked[0].distance < ranked[1].distance);
/// ```
pub fn rank_by_distance<T>(items: &[T], reference: &Coordinate) -> Vec<Ranked<T>>
where
    T: Locatable + Clone + Send + Sync,
{
    let mut ranked = measure(items, reference);
    sort_by_distance(&mut ranked);
    ranked
}

/// Ranks items and keeps at most `max_results` of them.
pub fn rank_by_distance_limited<T>(
    items: &[T],
    reference: &Coordinate,
    max_results: Option<usize>,
) -> Vec<Ranked<T>>
where
    T: Locatable + Clone + Send + Sync,
{
    let mut ranked = rank_by_distance(items, reference);

    if let Some(max) = max_results {
        ranked.truncate(max);
    }

    ranked
}

/// Ranks only the items within `radius_km` of `reference`.
pub fn rank_within_radius<T>(items: &[T], reference: &Coordinate, radius_km: f64) -> Vec<Ranked<T>>
where
    T: Locatable + Clone + Send + Sync,
{
    let mut ranked = measure(items, reference);

    ranked.retain(|r| r.distance <= radius_km);
    sort_by_distance(&mut ranked);

    ranked
}

/// Returns the closest item, or `None` when `items` is empty.
pub fn nearest<T>(items: &[T], reference: &Coordinate) -> Option<Ranked<T>>
where
    T: Locatable + Clone,
{
    items
        .iter()
        .map(|item| Ranked {
            distance: haversine_distance(&item.coordinate(), reference),
            item: item.clone(),
        })
        .min_by(|a, b| compare_distance(a.distance, b.distance))
}

fn measure<T>(items: &[T], reference: &Coordinate) -> Vec<Ranked<T>>
where
    T: Locatable + Clone + Send + Sync,
{
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        items
            .par_iter()
            .map(|item| rank_single(item, reference))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        items.iter().map(|item| rank_single(item, reference)).collect()
    }
}

#[inline]
fn rank_single<T: Locatable + Clone>(item: &T, reference: &Coordinate) -> Ranked<T> {
    Ranked {
        distance: haversine_distance(&item.coordinate(), reference),
        item: item.clone(),
    }
}

fn sort_by_distance<T>(ranked: &mut [Ranked<T>]) {
    ranked.sort_unstable_by(|a, b| compare_distance(a.distance, b.distance));
}

/// Total order on distances with NaN after every number.
fn compare_distance(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (false, false) => a.total_cmp(&b),
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (true, true) => Ordering::Equal,
    }
}
