//! Environmental impact of collected waste
//!
//! Converts the weight of a pickup into equivalent metrics (bottles saved,
//! trees, CO₂ avoided, ...) using fixed per-kilogram factors per category.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Waste category of a pickup.
///
/// Deserializes through [`FromStr`], so names match case-insensitively and
/// unknown names become [`WasteCategory::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum WasteCategory {
    /// Bottles, bags, packaging
    Plastic,
    /// Food and garden waste
    Organic,
    /// Paper and cardboard
    Paper,
    /// Electronics
    #[serde(rename = "E-Waste")]
    EWaste,
    /// Cans and scrap metal
    Metal,
    /// Glass bottles and jars
    Glass,
    /// Textiles
    Clothes,
    /// Any category without dedicated factors
    Other,
}

impl WasteCategory {
    /// Every category with dedicated factors.
    pub const KNOWN: [WasteCategory; 7] = [
        Self::Plastic,
        Self::Organic,
        Self::Paper,
        Self::EWaste,
        Self::Metal,
        Self::Glass,
        Self::Clothes,
    ];

    /// Name as used by the backend.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Plastic => "Plastic",
            Self::Organic => "Organic",
            Self::Paper => "Paper",
            Self::EWaste => "E-Waste",
            Self::Metal => "Metal",
            Self::Glass => "Glass",
            Self::Clothes => "Clothes",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for WasteCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown names parse to [`WasteCategory::Other`]; parsing never fails.
impl FromStr for WasteCategory {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let category = Self::KNOWN
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .unwrap_or(Self::Other);
        Ok(category)
    }
}

impl From<String> for WasteCategory {
    fn from(name: String) -> Self {
        match name.parse() {
            Ok(category) => category,
            Err(never) => match never {},
        }
    }
}

/// Impact metrics of a single pickup. Only the metrics relevant to the
/// category are set; CO₂ is always present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Impact {
    /// Kilograms of CO₂ avoided
    pub co2: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Bottles saved
    pub bottles: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Tree equivalents
    pub trees: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Compost produced, kg
    pub compost: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Sheets of paper saved
    pub sheets: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Devices recycled
    pub devices: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Metals recovered, kg
    pub metals: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Cans recycled
    pub cans: Option<f64>,
    /// Energy saved, kWh
    #[serde(skip_serializing_if = "Option::is_none")]
    pub energy: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Clothing items saved
    pub items: Option<f64>,
    /// Water saved, liters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub water: Option<f64>,
}

/// Computes the impact of `weight_kg` of waste in `category`.
///
/// A non-finite weight counts as zero.
///
/// # Example
/// ```
/// use vatavaran_core::impact::{calculate_impact, WasteCategory};
///
/// let impact = calculate_impact(WasteCategory::Plastic, 2.0);
/// assert_eq!(impact.bottles, Some(100.0));
/// assert_eq!(impact.co2, 5.0);
/// ```
pub fn calculate_impact(category: WasteCategory, weight_kg: f64) -> Impact {
    let w = if weight_kg.is_finite() { weight_kg } else { 0.0 };

    match category {
        WasteCategory::Plastic => Impact {
            bottles: Some(w * 50.0),
            trees: Some(w * 0.02),
            co2: w * 2.5,
            ..Impact::default()
        },
        WasteCategory::Organic => Impact {
            compost: Some(w * 0.8),
            trees: Some(w * 0.125),
            co2: w * 0.5,
            ..Impact::default()
        },
        WasteCategory::Paper => Impact {
            sheets: Some(w * 17.0),
            trees: Some(w * 0.017),
            co2: w * 1.5,
            ..Impact::default()
        },
        WasteCategory::EWaste => Impact {
            devices: Some(w * 5.0),
            metals: Some(w * 0.7),
            co2: w * 3.0,
            ..Impact::default()
        },
        WasteCategory::Metal => Impact {
            cans: Some(w * 20.0),
            energy: Some(w * 95.0),
            co2: w * 2.0,
            ..Impact::default()
        },
        WasteCategory::Glass => Impact {
            bottles: Some(w * 3.0),
            energy: Some(w * 30.0),
            co2: w * 0.8,
            ..Impact::default()
        },
        WasteCategory::Clothes => Impact {
            items: Some(w * 2.0),
            water: Some(w * 2700.0),
            co2: w * 3.5,
            ..Impact::default()
        },
        WasteCategory::Other => Impact {
            co2: w,
            ..Impact::default()
        },
    }
}

/// Review state of a logged pickup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PickupStatus {
    /// Waiting for a supervisor
    #[default]
    Pending,
    /// Verified by a supervisor
    Approved,
    /// Turned down by a supervisor
    Rejected,
}

impl PickupStatus {
    /// True once a supervisor has approved or rejected the pickup.
    pub fn is_reviewed(&self) -> bool {
        !matches!(self, PickupStatus::Pending)
    }
}

/// Staff member attached to a pickup by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffRef {
    /// Display name
    pub name: String,
}

/// A logged collection event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pickup {
    /// Waste category
    pub category: WasteCategory,
    /// Weight in kilograms
    #[serde(default)]
    pub weight: f64,
    /// Review state, pending until a supervisor acts
    #[serde(default)]
    pub status: PickupStatus,
    /// Staff member who logged the pickup
    #[serde(default, deserialize_with = "id_string")]
    pub staff_id: Option<String>,
    /// Staff details, when the backend includes them
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub staff: Option<StaffRef>,
}

impl Pickup {
    /// A pending pickup with no staff attached.
    pub fn new(category: WasteCategory, weight: f64) -> Self {
        Self {
            category,
            weight,
            status: PickupStatus::Pending,
            staff_id: None,
            staff: None,
        }
    }

    /// Attach the staff member who logged it.
    pub fn by(mut self, staff_id: impl Into<String>) -> Self {
        self.staff_id = Some(staff_id.into());
        self
    }

    /// Set the review state.
    pub fn with_status(mut self, status: PickupStatus) -> Self {
        self.status = status;
        self
    }
}

/// Staff ids arrive as strings or numbers depending on the backend.
fn id_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

/// Aggregate impact across pickups.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ImpactTotals {
    /// kg CO₂, rounded to two decimals
    pub co2: f64,
    /// Trees, rounded to two decimals
    pub trees: f64,
    /// Whole bottles
    pub bottles: u64,
    /// Whole sheets of paper
    pub sheets: u64,
}

impl fmt::Display for ImpactTotals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.2} kg CO₂, {:.2} trees, {} bottles, {} sheets",
            self.co2, self.trees, self.bottles, self.sheets
        )
    }
}

/// Sums the impact of every pickup.
pub fn total_impact(pickups: &[Pickup]) -> ImpactTotals {
    let (co2, trees, bottles, sheets) = pickups.iter().fold(
        (0.0, 0.0, 0.0, 0.0),
        |(co2, trees, bottles, sheets), pickup| {
            let impact = calculate_impact(pickup.category, pickup.weight);
            (
                co2 + impact.co2,
                trees + impact.trees.unwrap_or(0.0),
                bottles + impact.bottles.unwrap_or(0.0),
                sheets + impact.sheets.unwrap_or(0.0),
            )
        },
    );

    ImpactTotals {
        co2: round2(co2),
        trees: round2(trees),
        bottles: floor_count(bottles),
        sheets: floor_count(sheets),
    }
}

/// One-line summary shown after a pickup is logged.
///
/// # Example
/// ```
/// use vatavaran_core::impact::{impact_message, WasteCategory};
///
/// assert_eq!(impact_message(WasteCategory::Metal, 1.5), "30 aluminum cans recycled!");
/// ```
pub fn impact_message(category: WasteCategory, weight_kg: f64) -> String {
    let impact = calculate_impact(category, weight_kg);
    // Halves round up, as the web dashboard shows them.
    let whole = |value: Option<f64>| format!("{:.0}", value.unwrap_or(0.0).round());

    match category {
        WasteCategory::Plastic => format!("{} plastic bottles saved from landfills!", whole(impact.bottles)),
        WasteCategory::Organic => format!("Equivalent to planting {:.2} trees!", round2(impact.trees.unwrap_or(0.0))),
        WasteCategory::Paper => format!("{} sheets of paper saved!", whole(impact.sheets)),
        WasteCategory::EWaste => format!("{} electronic devices properly recycled!", whole(impact.devices)),
        WasteCategory::Metal => format!("{} aluminum cans recycled!", whole(impact.cans)),
        WasteCategory::Glass => format!("{} glass bottles recycled!", whole(impact.bottles)),
        WasteCategory::Clothes => format!("{} clothing items saved from waste!", whole(impact.items)),
        WasteCategory::Other => format!("{:.2} kg CO₂ saved!", round2(impact.co2)),
    }
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn floor_count(value: f64) -> u64 {
    // Saturating cast: negative weights floor to zero.
    value.floor() as u64
}
