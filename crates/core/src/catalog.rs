//! Drop-off zone catalog
//!
//! The built-in catalog covers waste management locations across Delhi NCR,
//! split into general dump zones and specialised recycling centers. A catalog
//! in the same JSON shape can also be loaded from the backend or a file.

use crate::error::{Error, Result, ResultExt};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};
use vatavaran_geo::{Coordinate, Locatable};

/// Central Delhi (Connaught Place), used when the device position is unknown.
pub const FALLBACK_LOCATION: Coordinate = Coordinate::new(28.6304, 77.2177);

/// Kind of drop-off location
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ZoneKind {
    /// General waste dump zone
    DumpZone,
    /// Specialised recycling center
    RecyclingCenter,
}

/// Operational status of a zone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneStatus {
    /// Accepting drop-offs
    Active,
    /// Closed
    Inactive,
    /// At capacity
    Full,
}

/// A waste drop-off or collection location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DumpZone {
    /// Catalog id
    pub id: i64,
    /// Display name
    pub name: String,
    /// Latitude
    pub lat: f64,
    /// Longitude
    pub lng: f64,
    /// Dump zone or recycling center
    #[serde(rename = "type")]
    pub kind: ZoneKind,
    /// What the zone is for, e.g. `"Electronic Waste"`
    pub category: String,
    /// Fill level as shown on the dashboard, e.g. `"82%"`
    pub capacity: String,
    /// Operational status
    pub status: ZoneStatus,
    /// Street address
    pub address: String,
    /// Opening hours as shown to staff
    pub operating_hours: String,
    /// Waste categories taken; `"All Categories"` takes everything
    #[serde(default)]
    pub accepted_waste: Vec<String>,
}

impl DumpZone {
    /// Fill level in percent, if the capacity string is well formed.
    pub fn capacity_percent(&self) -> Option<u8> {
        self.capacity.trim().trim_end_matches('%').trim().parse().ok()
    }

    /// True when the zone lists `waste` (case-insensitive) or takes all categories.
    pub fn accepts(&self, waste: &str) -> bool {
        self.accepted_waste.iter().any(|accepted| {
            accepted.eq_ignore_ascii_case(waste) || accepted.eq_ignore_ascii_case("All Categories")
        })
    }
}

impl Locatable for DumpZone {
    fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lng)
    }
}

/// An ordered collection of zones.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ZoneCatalog {
    zones: Vec<DumpZone>,
}

impl ZoneCatalog {
    /// Builds a catalog, rejecting zones with invalid coordinates.
    pub fn new(zones: Vec<DumpZone>) -> Result<Self> {
        for zone in &zones {
            zone.coordinate()
                .validate()
                .map_err(Error::from)
                .context(format!("Zone {} ({})", zone.id, zone.name))?;
        }
        Ok(Self { zones })
    }

    /// Parses a JSON array of zones.
    pub fn from_json(json: &str) -> Result<Self> {
        let zones: Vec<DumpZone> = serde_json::from_str(json)?;
        debug!(count = zones.len(), "parsed zone catalog");
        Self::new(zones)
    }

    /// Reads a JSON catalog file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(Error::from)
            .context(format!("Reading zone catalog {}", path.display()))?;
        Self::from_json(&content).context(format!("Loading zone catalog {}", path.display()))
    }

    /// The built-in Delhi NCR catalog.
    pub fn delhi_ncr() -> Self {
        Self {
            zones: delhi_ncr_zones(),
        }
    }

    /// All zones, in catalog order.
    pub fn zones(&self) -> &[DumpZone] {
        &self.zones
    }

    /// Number of zones
    pub fn len(&self) -> usize {
        self.zones.len()
    }

    /// True when the catalog has no zones
    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    /// Zone with the given id.
    pub fn get(&self, id: i64) -> Result<&DumpZone> {
        self.zones
            .iter()
            .find(|zone| zone.id == id)
            .ok_or_else(|| Error::zone_not_found(id))
    }

    /// Zones currently accepting drop-offs.
    pub fn active(&self) -> Vec<&DumpZone> {
        self.zones
            .iter()
            .filter(|zone| zone.status == ZoneStatus::Active)
            .collect()
    }

    /// Zones of one kind.
    pub fn by_kind(&self, kind: ZoneKind) -> Vec<&DumpZone> {
        self.zones.iter().filter(|zone| zone.kind == kind).collect()
    }

    /// Zones accepting a waste category.
    pub fn accepting(&self, waste: &str) -> Vec<&DumpZone> {
        let zones: Vec<&DumpZone> = self.zones.iter().filter(|zone| zone.accepts(waste)).collect();
        if zones.is_empty() {
            warn!(waste, "no zone accepts this waste category");
        }
        zones
    }
}

#[allow(clippy::too_many_arguments)]
fn zone(
    id: i64,
    name: &str,
    (lat, lng): (f64, f64),
    kind: ZoneKind,
    category: &str,
    capacity: &str,
    address: &str,
    operating_hours: &str,
    accepted_waste: &[&str],
) -> DumpZone {
    DumpZone {
        id,
        name: name.to_string(),
        lat,
        lng,
        kind,
        category: category.to_string(),
        capacity: capacity.to_string(),
        status: ZoneStatus::Active,
        address: address.to_string(),
        operating_hours: operating_hours.to_string(),
        accepted_waste: accepted_waste.iter().map(|s| s.to_string()).collect(),
    }
}

fn delhi_ncr_zones() -> Vec<DumpZone> {
    use ZoneKind::{DumpZone as Dump, RecyclingCenter as Recycling};

    vec![
        // North Delhi
        zone(1, "Rohini Waste Management Hub", (28.7041, 77.1025), Dump, "General Waste", "82%",
            "Sector 11, Rohini, North Delhi", "24/7", &["Plastic", "Paper", "Metal", "Organic"]),
        zone(2, "Civil Lines Recycling Unit", (28.6811, 77.2228), Recycling, "Specialized Recycling", "45%",
            "Near Metro Station, Civil Lines", "9 AM - 8 PM", &["Paper", "Glass", "E-Waste"]),
        // South Delhi
        zone(3, "Okhla Integrated Facility", (28.5450, 77.2732), Dump, "Industrial & Domestic", "90%",
            "Okhla Industrial Estate Phase III", "24/7", &["Metal", "Plastic", "Industrial"]),
        zone(4, "Saket Eco-Point", (28.5244, 77.2167), Recycling, "Plastic & Paper", "30%",
            "Press Enclave Road, Saket", "8 AM - 10 PM", &["Plastic", "Paper"]),
        // East Delhi
        zone(5, "Gazipur Recovery Facility", (28.6250, 77.3300), Dump, "Bulk Collection", "95%",
            "Gazipur Border, East Delhi", "24/7", &["All Categories"]),
        zone(6, "Laxmi Nagar Bins", (28.6304, 77.2777), Dump, "Mixed Waste", "65%",
            "Main Vikas Marg, Laxmi Nagar", "24/7", &["Plastic", "Organic", "Paper"]),
        // West Delhi
        zone(7, "Dwarka Smart Bin A-1", (28.5921, 77.0460), Dump, "Residential Waste", "55%",
            "Sector 6, Dwarka, West Delhi", "24/7", &["Plastic", "Paper", "Metal"]),
        zone(8, "Janakpuri E-Waste Hub", (28.6214, 77.0878), Recycling, "Electronic Waste", "20%",
            "District Center, Janakpuri", "10 AM - 7 PM", &["Laptops", "Mobiles", "Batteries", "Plastics"]),
        // Central Delhi
        zone(9, "Connaught Place Eco-bins", (28.6304, 77.2177), Recycling, "Public Area Recycling", "40%",
            "Inner Circle, Connaught Place", "24/7", &["Plastic Bottles", "Cans", "Paper"]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use vatavaran_geo::rank_by_distance;

    #[test]
    fn test_builtin_catalog() {
        let catalog = ZoneCatalog::delhi_ncr();
        assert_eq!(catalog.len(), 9);
        assert!(catalog.zones().iter().all(|z| z.coordinate().is_valid()));
        assert_eq!(catalog.by_kind(ZoneKind::RecyclingCenter).len(), 4);
        assert_eq!(catalog.active().len(), 9);
    }

    #[test]
    fn test_get_zone() {
        let catalog = ZoneCatalog::delhi_ncr();
        assert_eq!(catalog.get(5).unwrap().name, "Gazipur Recovery Facility");
        let err = catalog.get(404).unwrap_err();
        assert_eq!(err.code, crate::ErrorCode::ZoneNotFound);
    }

    #[test]
    fn test_accepting_includes_all_categories_zone() {
        let catalog = ZoneCatalog::delhi_ncr();
        let glass: Vec<i64> = catalog.accepting("glass").iter().map(|z| z.id).collect();
        assert_eq!(glass, vec![2, 5]);
    }

    #[test]
    fn test_capacity_percent() {
        let catalog = ZoneCatalog::delhi_ncr();
        assert_eq!(catalog.get(1).unwrap().capacity_percent(), Some(82));

        let mut zone = catalog.get(1).unwrap().clone();
        zone.capacity = "unknown".into();
        assert_eq!(zone.capacity_percent(), None);
    }

    #[test]
    fn test_fallback_location_ranks_connaught_place_first() {
        let catalog = ZoneCatalog::delhi_ncr();
        let ranked = rank_by_distance(catalog.zones(), &FALLBACK_LOCATION);
        assert_eq!(ranked[0].item.id, 9);
        assert_eq!(ranked[0].distance, 0.0);
        // Ranking copies the zones; the catalog is unchanged.
        assert_eq!(catalog, ZoneCatalog::delhi_ncr());
    }

    #[test]
    fn test_json_round_trip_uses_backend_field_names() {
        let catalog = ZoneCatalog::delhi_ncr();
        let json = serde_json::to_value(&catalog).unwrap();
        assert_eq!(json[0]["type"], "DUMP_ZONE");
        assert_eq!(json[0]["operatingHours"], "24/7");
        assert_eq!(json[0]["status"], "active");

        let parsed = ZoneCatalog::from_json(&json.to_string()).unwrap();
        assert_eq!(parsed, catalog);
    }

    #[test]
    fn test_from_json_rejects_invalid_coordinates() {
        let json = r#"[{
            "id": 10, "name": "Nowhere", "lat": 128.0, "lng": 77.0,
            "type": "DUMP_ZONE", "category": "Mixed", "capacity": "10%",
            "status": "active", "address": "-", "operatingHours": "24/7"
        }]"#;
        let err = ZoneCatalog::from_json(json).unwrap_err();
        assert_eq!(err.code, crate::ErrorCode::InvalidCoordinate);
        assert!(err.context.unwrap().contains("Nowhere"));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("zones.json");
        std::fs::write(&path, serde_json::to_string(&ZoneCatalog::delhi_ncr()).unwrap()).unwrap();

        let catalog = ZoneCatalog::from_file(&path).unwrap();
        assert_eq!(catalog.len(), 9);

        let err = ZoneCatalog::from_file(&dir.path().join("missing.json")).unwrap_err();
        assert_eq!(err.code, crate::ErrorCode::FileNotFound);
    }
}
