//! Impact commands

use super::{print_json, Context};
use anyhow::Result;
use owo_colors::OwoColorize;
use serde::Serialize;
use std::path::Path;
use tracing::{debug, warn};
use vatavaran_cli::output::{format_count, Status};
use vatavaran_core::impact::{calculate_impact, impact_message, total_impact, Impact, ImpactTotals, Pickup, WasteCategory};
use vatavaran_core::stats::dashboard_stats;
use vatavaran_core::{Error, ResultExt};

#[derive(Debug, Serialize)]
struct ImpactOutput {
    category: WasteCategory,
    weight: f64,
    impact: Impact,
    message: String,
}

#[derive(Debug, Serialize)]
struct TotalsOutput {
    pickups: usize,
    totals: ImpactTotals,
}

/// Run impact command for one pickup
pub fn single(ctx: &Context, category: &str, weight: f64) -> Result<()> {
    if !weight.is_finite() || weight < 0.0 {
        return Err(Error::validation(format!("invalid weight {}", weight))
            .with_suggestion("Give the weight in kilograms, e.g. 2.5")
            .into());
    }

    let parsed: WasteCategory = category.parse()?;
    if parsed == WasteCategory::Other {
        warn!(category, "no dedicated factors for category, counting CO2 only");
    }

    let output = ImpactOutput {
        category: parsed,
        weight,
        impact: calculate_impact(parsed, weight),
        message: impact_message(parsed, weight),
    };

    if ctx.is_json() {
        return print_json(&output);
    }

    Status::success(&output.message);
    println!("{} {:.2} kg", "CO₂ avoided:".dimmed(), output.impact.co2);
    Ok(())
}

fn load_pickups(file: &Path) -> vatavaran_core::Result<Vec<Pickup>> {
    let content = std::fs::read_to_string(file)
        .map_err(Error::from)
        .context(format!("Reading {}", file.display()))?;
    let pickups: Vec<Pickup> = serde_json::from_str(&content)
        .map_err(Error::from)
        .context(format!("Parsing pickups in {}", file.display()))?;
    debug!(pickups = pickups.len(), "loaded pickups");
    Ok(pickups)
}

/// Run totals command over a JSON file of pickups
pub fn totals(ctx: &Context, file: &Path) -> Result<()> {
    let pickups = load_pickups(file)?;
    let totals = total_impact(&pickups);

    if ctx.is_json() {
        return print_json(&TotalsOutput {
            pickups: pickups.len(),
            totals,
        });
    }

    Status::header(&format!("Impact of {}", format_count(pickups.len(), "pickup", "pickups")));
    println!("{:>10.2} kg CO₂ avoided", totals.co2);
    println!("{:>10.2} trees", totals.trees);
    println!("{:>10} bottles", totals.bottles);
    println!("{:>10} sheets of paper", totals.sheets);
    Ok(())
}

/// Run stats command over a JSON file of pickups
pub fn stats(ctx: &Context, file: &Path) -> Result<()> {
    let pickups = load_pickups(file)?;
    let stats = dashboard_stats(&pickups);

    if ctx.is_json() {
        return print_json(&stats);
    }

    Status::header(&format!("Review of {}", format_count(stats.total, "pickup", "pickups")));
    println!(
        "{} pending, {} approved, {} rejected ({:.1}% approved)",
        stats.pending, stats.approved, stats.rejected, stats.approval_rate
    );
    println!("{:.2} kg from {}", stats.total_weight, format_count(stats.active_staff, "staff member", "staff members"));

    if !stats.categories.is_empty() {
        Status::header("By category");
        for share in &stats.categories {
            println!("{:<10} {:>8.1} kg {:>6.1}%", share.category.as_str(), share.weight, share.percentage);
        }
    }

    if !stats.leaderboard.is_empty() {
        Status::header("Leaderboard");
        for (i, standing) in stats.leaderboard.iter().enumerate() {
            println!(
                "{:>2}. {:<24} {:>8.2} kg  {} ({} approved)",
                i + 1,
                standing.name,
                standing.weight,
                format_count(standing.pickups, "pickup", "pickups"),
                standing.approved
            );
        }
    }
    Ok(())
}
