//! Terminal output utilities
//!
//! Provides consistent formatting for CLI output.

use owo_colors::OwoColorize;
use vatavaran_core::catalog::{DumpZone, ZoneKind};
use vatavaran_geo::{format_distance, Ranked};

/// Status message helpers
pub struct Status;

impl Status {
    /// Print a success message
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Print an error message
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Print a warning message
    pub fn warning(message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print an info message
    pub fn info(message: &str) {
        println!("{} {}", "ℹ".blue(), message);
    }

    /// Print a header
    pub fn header(message: &str) {
        println!();
        println!("{}", message.bold());
        println!("{}", "─".repeat(message.chars().count()));
    }
}

/// Format a count with singular/plural
pub fn format_count(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}", count, plural)
    }
}

/// Distance label, or `"?"` when the distance cannot be shown.
pub fn distance_label(km: f64) -> String {
    format_distance(km).unwrap_or_else(|_| "?".to_string())
}

/// Short tag for the zone kind.
pub fn kind_label(kind: ZoneKind) -> &'static str {
    match kind {
        ZoneKind::DumpZone => "dump",
        ZoneKind::RecyclingCenter => "recycling",
    }
}

/// Ten-cell fill gauge, e.g. `[########--] 82%`.
pub fn capacity_gauge(percent: Option<u8>) -> String {
    match percent {
        Some(p) => {
            let p = p.min(100);
            let filled = usize::from(p).div_ceil(10);
            format!("[{}{}] {:>3}%", "#".repeat(filled), "-".repeat(10 - filled), p)
        }
        None => format!("[{}]    ?", " ".repeat(10)),
    }
}

/// One plain-text row of a ranked zone listing.
pub fn zone_row(rank: usize, zone: &Ranked<DumpZone>) -> String {
    format!(
        "{:>2}. {:<30} {:>10}  {:<9} {}  {}",
        rank,
        zone.item.name,
        distance_label(zone.distance),
        kind_label(zone.item.kind),
        capacity_gauge(zone.item.capacity_percent()),
        zone.item.address
    )
}

/// Print a ranked zone listing, highlighting nearly full zones.
pub fn print_zone_table(zones: &[Ranked<DumpZone>]) {
    for (i, zone) in zones.iter().enumerate() {
        let row = zone_row(i + 1, zone);
        match zone.item.capacity_percent() {
            Some(p) if p >= 90 => println!("{}", row.red()),
            Some(p) if p >= 75 => println!("{}", row.yellow()),
            _ => println!("{}", row),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vatavaran_core::catalog::{ZoneCatalog, FALLBACK_LOCATION};
    use vatavaran_geo::rank_by_distance;

    #[test]
    fn test_format_count_singular() {
        assert_eq!(format_count(1, "zone", "zones"), "1 zone");
    }

    #[test]
    fn test_format_count_plural() {
        assert_eq!(format_count(5, "zone", "zones"), "5 zones");
    }

    #[test]
    fn test_distance_label() {
        assert_eq!(distance_label(0.42), "420 m");
        assert_eq!(distance_label(f64::NAN), "?");
    }

    #[test]
    fn test_capacity_gauge() {
        assert_eq!(capacity_gauge(Some(82)), "[#########-]  82%");
        assert_eq!(capacity_gauge(Some(0)), "[----------]   0%");
        assert_eq!(capacity_gauge(Some(100)), "[##########] 100%");
        assert_eq!(capacity_gauge(None), "[          ]    ?");
    }

    #[test]
    fn test_zone_row() {
        let catalog = ZoneCatalog::delhi_ncr();
        let ranked = rank_by_distance(catalog.zones(), &FALLBACK_LOCATION);
        let row = zone_row(1, &ranked[0]);
        assert!(row.starts_with(" 1. Connaught Place Eco-bins"));
        assert!(row.contains("0 m"));
        assert!(row.contains("recycling"));
    }
}
