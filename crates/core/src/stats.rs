//! Dashboard aggregates over logged pickups
//!
//! Review counts, approval rate, weight per category and the staff
//! leaderboard shown to supervisors and admins.

use crate::impact::{round2, Pickup, PickupStatus, WasteCategory};
use serde::{Deserialize, Serialize};

/// Staff shown on the leaderboard.
pub const LEADERBOARD_SIZE: usize = 5;

/// Weight collected in one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryShare {
    /// Waste category
    pub category: WasteCategory,
    /// Total kilograms, one decimal
    pub weight: f64,
    /// Share of all collected weight in percent, one decimal
    pub percentage: f64,
}

/// One leaderboard row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffStanding {
    /// Staff id as sent by the backend
    pub id: String,
    /// Display name, `"Champion <id>"` when unknown
    pub name: String,
    /// Pickups logged
    pub pickups: usize,
    /// Kilograms logged
    pub weight: f64,
    /// Pickups approved
    pub approved: usize,
}

/// Aggregates for the supervisor and admin dashboards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    /// All pickups
    pub total: usize,
    /// Pickups waiting for review
    pub pending: usize,
    /// Approved pickups
    pub approved: usize,
    /// Rejected pickups
    pub rejected: usize,
    /// Approved share of all pickups in percent, one decimal
    pub approval_rate: f64,
    /// Kilograms across all pickups, two decimals
    pub total_weight: f64,
    /// Categories, heaviest first
    pub categories: Vec<CategoryShare>,
    /// Top staff by weight
    pub leaderboard: Vec<StaffStanding>,
    /// Staff with at least one pickup
    pub active_staff: usize,
}

/// Computes dashboard aggregates.
///
/// Non-finite weights count as zero. Pickups without a staff id are left
/// off the leaderboard. Ties keep first-seen order.
///
/// # Example
/// ```
/// use vatavaran_core::impact::{Pickup, PickupStatus, WasteCategory};
/// use vatavaran_core::stats::dashboard_stats;
///
/// let pickups = [
///     Pickup::new(WasteCategory::Plastic, 3.0).by("asha").with_status(PickupStatus::Approved),
///     Pickup::new(WasteCategory::Paper, 1.0).by("ravi"),
/// ];
/// let stats = dashboard_stats(&pickups);
/// assert_eq!(stats.approval_rate, 50.0);
/// assert_eq!(stats.leaderboard[0].id, "asha");
/// ```
pub fn dashboard_stats(pickups: &[Pickup]) -> DashboardStats {
    let weight_of = |p: &Pickup| if p.weight.is_finite() { p.weight } else { 0.0 };

    let count = |status: PickupStatus| pickups.iter().filter(|p| p.status == status).count();
    let approved = count(PickupStatus::Approved);
    let total_weight: f64 = pickups.iter().map(weight_of).sum();

    let mut per_category: Vec<(WasteCategory, f64)> = Vec::new();
    for pickup in pickups {
        match per_category.iter_mut().find(|(c, _)| *c == pickup.category) {
            Some((_, weight)) => *weight += weight_of(pickup),
            None => per_category.push((pickup.category, weight_of(pickup))),
        }
    }
    per_category.sort_by(|a, b| b.1.total_cmp(&a.1));

    let categories = per_category
        .into_iter()
        .map(|(category, weight)| CategoryShare {
            category,
            weight: round1(weight),
            percentage: percent(weight, total_weight),
        })
        .collect();

    let mut staff: Vec<StaffStanding> = Vec::new();
    for pickup in pickups {
        let Some(id) = pickup.staff_id.as_deref() else {
            continue;
        };
        let index = match staff.iter().position(|s| s.id == id) {
            Some(index) => index,
            None => {
                let name = pickup
                    .staff
                    .as_ref()
                    .map(|s| s.name.clone())
                    .unwrap_or_else(|| format!("Champion {}", id));
                staff.push(StaffStanding {
                    id: id.to_string(),
                    name,
                    pickups: 0,
                    weight: 0.0,
                    approved: 0,
                });
                staff.len() - 1
            }
        };
        let standing = &mut staff[index];
        standing.pickups += 1;
        standing.weight += weight_of(pickup);
        if pickup.status == PickupStatus::Approved {
            standing.approved += 1;
        }
    }
    let active_staff = staff.len();
    staff.sort_by(|a, b| b.weight.total_cmp(&a.weight));
    staff.truncate(LEADERBOARD_SIZE);
    for standing in &mut staff {
        standing.weight = round2(standing.weight);
    }

    DashboardStats {
        total: pickups.len(),
        pending: count(PickupStatus::Pending),
        approved,
        rejected: count(PickupStatus::Rejected),
        approval_rate: percent(approved as f64, pickups.len() as f64),
        total_weight: round2(total_weight),
        categories,
        leaderboard: staff,
        active_staff,
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// `part` of `whole` in percent, zero when `whole` is zero.
fn percent(part: f64, whole: f64) -> f64 {
    if whole > 0.0 {
        round1(part / whole * 100.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::impact::StaffRef;

    fn sample() -> Vec<Pickup> {
        vec![
            Pickup::new(WasteCategory::Plastic, 5.0).by("staff1").with_status(PickupStatus::Approved),
            Pickup::new(WasteCategory::Paper, 2.0).by("staff1"),
            Pickup::new(WasteCategory::Plastic, 1.0).by("staff2").with_status(PickupStatus::Approved),
            Pickup::new(WasteCategory::Metal, 2.0).by("staff2").with_status(PickupStatus::Rejected),
        ]
    }

    #[test]
    fn test_review_counts() {
        let stats = dashboard_stats(&sample());
        assert_eq!((stats.total, stats.pending, stats.approved, stats.rejected), (4, 1, 2, 1));
        assert_eq!(stats.approval_rate, 50.0);
        assert_eq!(stats.total_weight, 10.0);
    }

    #[test]
    fn test_category_breakdown() {
        let stats = dashboard_stats(&sample());
        let shares: Vec<(WasteCategory, f64, f64)> =
            stats.categories.iter().map(|c| (c.category, c.weight, c.percentage)).collect();
        assert_eq!(
            shares,
            vec![
                (WasteCategory::Plastic, 6.0, 60.0),
                (WasteCategory::Paper, 2.0, 20.0),
                (WasteCategory::Metal, 2.0, 20.0),
            ]
        );
    }

    #[test]
    fn test_leaderboard() {
        let mut pickups = sample();
        pickups[2].staff = Some(StaffRef { name: "Jane".into() });

        let stats = dashboard_stats(&pickups);
        assert_eq!(stats.active_staff, 2);
        assert_eq!(stats.leaderboard[0].id, "staff1");
        assert_eq!(stats.leaderboard[0].name, "Champion staff1");
        assert_eq!((stats.leaderboard[0].pickups, stats.leaderboard[0].approved), (2, 1));
        assert_eq!(stats.leaderboard[0].weight, 7.0);
        assert_eq!(stats.leaderboard[1].name, "Jane");
    }

    #[test]
    fn test_leaderboard_keeps_top_five() {
        let pickups: Vec<Pickup> = (0..8)
            .map(|i| Pickup::new(WasteCategory::Glass, f64::from(i)).by(format!("s{i}")))
            .collect();

        let stats = dashboard_stats(&pickups);
        assert_eq!(stats.active_staff, 8);
        let ids: Vec<&str> = stats.leaderboard.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["s7", "s6", "s5", "s4", "s3"]);
    }

    #[test]
    fn test_pickups_without_staff_skip_leaderboard() {
        let stats = dashboard_stats(&[Pickup::new(WasteCategory::Organic, f64::NAN)]);
        assert!(stats.leaderboard.is_empty());
        assert_eq!(stats.total_weight, 0.0);
        assert_eq!(stats.categories[0].percentage, 0.0);
    }

    #[test]
    fn test_empty() {
        assert_eq!(dashboard_stats(&[]), DashboardStats::default());
    }
}
