//! WASM bindings for the geo crate.
//!
//! These bindings let the web dashboard call the helpers from JavaScript.
//! Coordinates arriving here are validated before any math runs.

use crate::{bounding_box, generate_route, rank_by_distance, Coordinate, NamedZone};
use wasm_bindgen::prelude::*;

fn to_js(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn coordinate(lat: f64, lng: f64) -> Result<Coordinate, JsValue> {
    Coordinate::try_new(lat, lng).map_err(to_js)
}

fn parse_coordinates(json: &str) -> Result<Vec<Coordinate>, JsValue> {
    let points: Vec<Coordinate> = serde_json::from_str(json)
        .map_err(|e| JsValue::from_str(&format!("JSON parse error: {}", e)))?;
    for point in &points {
        point.validate().map_err(to_js)?;
    }
    Ok(points)
}

/// Distance in kilometers between two points.
#[wasm_bindgen]
pub fn distance(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> Result<f64, JsValue> {
    let from = coordinate(lat1, lng1)?;
    let to = coordinate(lat2, lng2)?;
    Ok(crate::haversine_distance(&from, &to))
}

/// Display string for a distance in kilometers (`"850 m"`, `"3.20 km"`).
#[wasm_bindgen(js_name = formatDistance)]
pub fn format_distance(km: f64) -> Result<String, JsValue> {
    crate::format_distance(km).map_err(to_js)
}

/// Curved route between two points.
///
/// # Returns
/// JSON array of `[lat, lng]` pairs
#[wasm_bindgen(js_name = generateRoute)]
pub fn route(start_lat: f64, start_lng: f64, end_lat: f64, end_lng: f64) -> Result<String, JsValue> {
    let start = coordinate(start_lat, start_lng)?;
    let end = coordinate(end_lat, end_lng)?;

    let pairs: Vec<[f64; 2]> = generate_route(&start, &end).iter().map(Coordinate::to_pair).collect();

    serde_json::to_string(&pairs)
        .map_err(|e| JsValue::from_str(&format!("JSON serialize error: {}", e)))
}

/// Bounds of a JSON array of `{lat, lng}` objects.
///
/// # Returns
/// JSON `[[minLat, minLng], [maxLat, maxLng]]`, or `null` for an empty array
#[wasm_bindgen(js_name = getBounds)]
pub fn bounds(points_json: &str) -> Result<String, JsValue> {
    let points = parse_coordinates(points_json)?;

    let result = bounding_box(&points).map(|b| b.to_pairs());

    serde_json::to_string(&result)
        .map_err(|e| JsValue::from_str(&format!("JSON serialize error: {}", e)))
}

/// Ranks zones by distance from the user's position.
///
/// # Arguments
/// * `zones_json` - JSON array of zones with `id`, `name`, `lat` and `lng`
///
/// # Returns
/// JSON array of the same zones with a `distance` field, closest first
#[wasm_bindgen(js_name = sortZonesByDistance)]
pub fn rank_zones(zones_json: &str, user_lat: f64, user_lng: f64) -> Result<String, JsValue> {
    let reference = coordinate(user_lat, user_lng)?;
    let zones: Vec<NamedZone> = serde_json::from_str(zones_json)
        .map_err(|e| JsValue::from_str(&format!("JSON parse error: {}", e)))?;
    for zone in &zones {
        zone.coordinate.validate().map_err(to_js)?;
    }

    let ranked = rank_by_distance(&zones, &reference);

    serde_json::to_string(&ranked)
        .map_err(|e| JsValue::from_str(&format!("JSON serialize error: {}", e)))
}
