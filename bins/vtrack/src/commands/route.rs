//! Route command - curved path from the current position to a zone

use super::{print_json, Context};
use anyhow::Result;
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::debug;
use vatavaran_cli::output::{distance_label, Status};
use vatavaran_core::catalog::DumpZone;
use vatavaran_core::Error;
use vatavaran_geo::{bounding_box, generate_route_with, haversine_distance, BoundingBox, Coordinate, Locatable};

#[derive(Debug, Serialize)]
struct RouteOutput<'a> {
    zone: &'a DumpZone,
    distance: f64,
    path: Vec<[f64; 2]>,
    bounds: Option<[[f64; 2]; 2]>,
}

/// Run route command
pub fn run(ctx: &Context, zone_id: i64, position: Option<(f64, f64)>) -> Result<()> {
    let start = ctx.position(position)?;
    let catalog = ctx.catalog()?;
    let zone = catalog.get(zone_id)?;
    let end = zone.coordinate();

    let map = &ctx.config.schema.map;
    let path = generate_route_with(&start, &end, &map.route_options()).map_err(Error::from)?;
    let bounds = bounding_box([start, end]).map(|b| b.padded(map.viewport_padding));
    let distance = haversine_distance(&start, &end);
    debug!(zone = zone.id, points = path.len(), distance, "route generated");

    if ctx.is_json() {
        return print_json(&RouteOutput {
            zone,
            distance,
            path: path.iter().map(Coordinate::to_pair).collect(),
            bounds: bounds.as_ref().map(BoundingBox::to_pairs),
        });
    }

    Status::header(&format!("Route to {}", zone.name));
    println!("{} {}", "Distance:".dimmed(), distance_label(distance));
    println!("{} {}", "Address: ".dimmed(), zone.address);
    println!("{} {}", "Hours:   ".dimmed(), zone.operating_hours);
    println!();
    for (i, point) in path.iter().enumerate() {
        println!("{:>3}  {:.6}, {:.6}", i, point.latitude, point.longitude);
    }
    if let Some(b) = bounds {
        println!();
        Status::info(&format!(
            "Viewport {:.4},{:.4} to {:.4},{:.4}",
            b.sw.latitude, b.sw.longitude, b.ne.latitude, b.ne.longitude
        ));
    }
    Ok(())
}
