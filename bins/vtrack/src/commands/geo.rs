//! Distance and bounds commands

use super::{print_json, Context};
use anyhow::Result;
use owo_colors::OwoColorize;
use serde::Serialize;
use vatavaran_cli::output::Status;
use vatavaran_core::Error;
use vatavaran_geo::{bounding_box, format_distance, haversine_distance, Coordinate};

#[derive(Debug, Serialize)]
struct DistanceOutput {
    from: Coordinate,
    to: Coordinate,
    km: f64,
    formatted: String,
}

/// Run distance command
pub fn distance(ctx: &Context, from: (f64, f64), to: (f64, f64)) -> Result<()> {
    let from = Coordinate::try_new(from.0, from.1).map_err(Error::from)?;
    let to = Coordinate::try_new(to.0, to.1).map_err(Error::from)?;

    let km = haversine_distance(&from, &to);
    let output = DistanceOutput {
        from,
        to,
        km,
        formatted: format_distance(km).map_err(Error::from)?,
    };

    if ctx.is_json() {
        return print_json(&output);
    }

    println!("{}", output.formatted.bold());
    println!("{}", format!("{:.6} km (great-circle)", output.km).dimmed());
    Ok(())
}

/// Run bounds command
pub fn bounds(ctx: &Context, points: &[Coordinate]) -> Result<()> {
    let bounds = bounding_box(points);

    if ctx.is_json() {
        return print_json(&bounds.map(|b| b.to_pairs()));
    }

    match bounds {
        Some(b) => {
            println!("south-west: {:.6}, {:.6}", b.sw.latitude, b.sw.longitude);
            println!("north-east: {:.6}, {:.6}", b.ne.latitude, b.ne.longitude);
            let center = b.center();
            println!("center:     {:.6}, {:.6}", center.latitude, center.longitude);
        }
        None => Status::info("No points given, nothing to fit"),
    }
    Ok(())
}
