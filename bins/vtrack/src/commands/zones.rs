//! Zones command - rank drop-off zones by distance

use super::{print_json, Context};
use anyhow::Result;
use serde::Serialize;
use tracing::debug;
use vatavaran_cli::output::{format_count, print_zone_table, Status};
use vatavaran_core::catalog::{DumpZone, ZoneKind};
use vatavaran_core::Error;
use vatavaran_geo::{rank_by_distance, rank_within_radius, Coordinate, Ranked};

/// Listing options from the command line
#[derive(Debug, Default)]
pub struct ZoneFilter {
    pub limit: Option<usize>,
    pub radius: Option<f64>,
    pub kind: Option<String>,
    pub accepts: Option<String>,
}

#[derive(Debug, Serialize)]
struct JsonZonesOutput {
    position: Coordinate,
    total: usize,
    zones: Vec<Ranked<DumpZone>>,
}

fn parse_kind(kind: &str) -> vatavaran_core::Result<ZoneKind> {
    match kind.to_ascii_lowercase().replace(['-', '_'], "").as_str() {
        "dump" | "dumpzone" => Ok(ZoneKind::DumpZone),
        "recycling" | "recyclingcenter" => Ok(ZoneKind::RecyclingCenter),
        _ => Err(Error::validation(format!("unknown zone kind {:?}", kind))
            .with_suggestion("Use one of: dump, recycling")),
    }
}

/// Run zones command
pub fn run(ctx: &Context, position: Option<(f64, f64)>, filter: &ZoneFilter) -> Result<()> {
    let position = ctx.position(position)?;
    let catalog = ctx.catalog()?;
    let defaults = &ctx.config.schema.zones;

    let kind = filter.kind.as_deref().map(parse_kind).transpose()?;
    let candidates: Vec<&DumpZone> = catalog
        .zones()
        .iter()
        .filter(|zone| kind.map_or(true, |k| zone.kind == k))
        .filter(|zone| filter.accepts.as_deref().map_or(true, |waste| zone.accepts(waste)))
        .collect();
    debug!(candidates = candidates.len(), "zones after filters");

    if let Some(r) = filter.radius {
        if !r.is_finite() || r < 0.0 {
            return Err(Error::validation(format!("invalid radius {}", r))
                .with_suggestion("Give the radius in kilometers, zero or more")
                .into());
        }
    }
    let radius = filter.radius.or(defaults.radius_km);
    let ranked = match radius {
        Some(r) => rank_within_radius(&candidates, &position, r),
        None => rank_by_distance(&candidates, &position),
    };

    let limit = filter.limit.or(defaults.max_results);
    let zones: Vec<Ranked<DumpZone>> = ranked
        .into_iter()
        .take(limit.unwrap_or(usize::MAX))
        .map(|r| Ranked {
            item: r.item.clone(),
            distance: r.distance,
        })
        .collect();

    if ctx.is_json() {
        return print_json(&JsonZonesOutput {
            position,
            total: zones.len(),
            zones,
        });
    }

    Status::header(&format!(
        "Drop-off zones near {:.4}, {:.4}",
        position.latitude, position.longitude
    ));
    if zones.is_empty() {
        Status::warning("No zones match");
        return Ok(());
    }
    print_zone_table(&zones);
    println!();
    Status::info(&format_count(zones.len(), "zone", "zones"));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_kind() {
        assert_eq!(parse_kind("dump").unwrap(), ZoneKind::DumpZone);
        assert_eq!(parse_kind("RECYCLING_CENTER").unwrap(), ZoneKind::RecyclingCenter);
        assert!(parse_kind("landfill").is_err());
    }
}
