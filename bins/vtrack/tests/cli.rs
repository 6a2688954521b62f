//! End-to-end tests for the vtrack binary

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::path::Path;
use tempfile::TempDir;

/// vtrack with an empty config file and no environment overrides.
fn vtrack(dir: &Path) -> Command {
    let config = dir.join("vatavaran.toml");
    if !config.exists() {
        std::fs::write(&config, "").unwrap();
    }

    let mut cmd = Command::cargo_bin("vtrack").unwrap();
    cmd.current_dir(dir)
        .env_remove("VATAVARAN_API_URL")
        .env_remove("VATAVARAN_FALLBACK_LAT")
        .env_remove("VATAVARAN_FALLBACK_LNG")
        .env_remove("RUST_LOG")
        .arg("--config")
        .arg(&config);
    cmd
}

/// Like [`vtrack`], printing JSON.
fn vtrack_json(dir: &Path) -> Command {
    let mut cmd = vtrack(dir);
    cmd.args(["--format", "json"]);
    cmd
}

fn json_output(cmd: &mut Command) -> Value {
    let output = cmd.output().unwrap();
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn distance_between_delhi_landmarks() {
    let dir = TempDir::new().unwrap();
    vtrack(dir.path())
        .args(["distance", "28.6304", "77.2177", "28.5921", "77.0460"])
        .assert()
        .success()
        .stdout(predicate::str::contains(" km"));
}

#[test]
fn distance_to_same_point_is_zero_meters() {
    let dir = TempDir::new().unwrap();
    let json = json_output(vtrack_json(dir.path()).args(["distance", "28.6", "77.2", "28.6", "77.2"]));
    assert_eq!(json["km"], 0.0);
    assert_eq!(json["formatted"], "0 m");
}

#[test]
fn distance_accepts_negative_coordinates() {
    let dir = TempDir::new().unwrap();
    let json = json_output(vtrack_json(dir.path()).args(["distance", "-33.8688", "151.2093", "-37.8136", "144.9631"]));
    let km = json["km"].as_f64().unwrap();
    assert!((700.0..720.0).contains(&km), "got {km}");
}

#[test]
fn distance_rejects_out_of_range_latitude() {
    let dir = TempDir::new().unwrap();
    vtrack(dir.path())
        .args(["distance", "95", "0", "0", "0"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("latitude"));
}

#[test]
fn zones_default_to_fallback_location() {
    let dir = TempDir::new().unwrap();
    let json = json_output(vtrack_json(dir.path()).args(["zones", "-n", "3"]));

    assert_eq!(json["total"], 3);
    let zones = json["zones"].as_array().unwrap();
    assert_eq!(zones[0]["id"], 9);
    assert_eq!(zones[0]["distance"], 0.0);

    let distances: Vec<f64> = zones.iter().map(|z| z["distance"].as_f64().unwrap()).collect();
    assert!(distances.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn zones_filter_by_radius_and_kind() {
    let dir = TempDir::new().unwrap();
    let json = json_output(vtrack_json(dir.path()).args([
        "zones", "--lat", "28.6304", "--lng", "77.2177", "--radius", "10", "--kind", "recycling",
    ]));

    let zones = json["zones"].as_array().unwrap();
    assert!(!zones.is_empty());
    assert!(zones.iter().all(|z| z["type"] == "RECYCLING_CENTER"));
    assert!(zones.iter().all(|z| z["distance"].as_f64().unwrap() <= 10.0));
}

#[test]
fn zones_reject_unknown_kind() {
    let dir = TempDir::new().unwrap();
    vtrack(dir.path())
        .args(["zones", "--kind", "landfill"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("landfill"));
}

#[test]
fn zones_reject_invalid_radius() {
    let dir = TempDir::new().unwrap();
    vtrack(dir.path())
        .args(["zones", "--radius", "NaN"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("radius"));
}

#[test]
fn zones_text_output_lists_table() {
    let dir = TempDir::new().unwrap();
    vtrack(dir.path())
        .args(["zones", "-n", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Connaught Place Eco-bins"))
        .stdout(predicate::str::contains("2 zones"));
}

#[test]
fn route_has_twenty_one_points() {
    let dir = TempDir::new().unwrap();
    let json = json_output(vtrack_json(dir.path()).args(["route", "7", "--lat", "28.6304", "--lng", "77.2177"]));

    let path = json["path"].as_array().unwrap();
    assert_eq!(path.len(), 21);
    assert_eq!(path[0], serde_json::json!([28.6304, 77.2177]));
    assert_eq!(path[20], serde_json::json!([28.5921, 77.046]));
    assert_eq!(json["zone"]["name"], "Dwarka Smart Bin A-1");
    assert!(json["bounds"].is_array());
}

#[test]
fn route_uses_configured_step_count() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("vatavaran.toml"), "[map]\nroute_steps = 4\n").unwrap();

    let json = json_output(vtrack_json(dir.path()).args(["route", "1"]));
    assert_eq!(json["path"].as_array().unwrap().len(), 5);
}

#[test]
fn route_to_unknown_zone_fails() {
    let dir = TempDir::new().unwrap();
    vtrack(dir.path())
        .args(["route", "404"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("404"));
}

#[test]
fn bounds_of_points() {
    let dir = TempDir::new().unwrap();
    let json = json_output(vtrack_json(dir.path()).args(["bounds", "28.7,77.1", "28.5,77.3", "28.6,77.2"]));
    assert_eq!(json, serde_json::json!([[28.5, 77.1], [28.7, 77.3]]));
}

#[test]
fn bounds_of_nothing_is_null() {
    let dir = TempDir::new().unwrap();
    let json = json_output(vtrack_json(dir.path()).arg("bounds"));
    assert!(json.is_null());
}

#[test]
fn impact_message_for_plastic() {
    let dir = TempDir::new().unwrap();
    vtrack(dir.path())
        .args(["impact", "Plastic", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("100 plastic bottles saved from landfills!"));
}

#[test]
fn impact_of_unknown_category_counts_co2() {
    let dir = TempDir::new().unwrap();
    let json = json_output(vtrack_json(dir.path()).args(["impact", "Rubble", "3"]));
    assert_eq!(json["category"], "Other");
    assert_eq!(json["impact"]["co2"], 3.0);
}

#[test]
fn totals_from_pickup_file() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("pickups.json");
    std::fs::write(
        &file,
        r#"[
            {"category": "Plastic", "weight": 1.5},
            {"category": "Paper", "weight": 2},
            {"category": "Glass", "weight": 0.3}
        ]"#,
    )
    .unwrap();

    let json = json_output(vtrack_json(dir.path()).arg("totals").arg(&file));
    assert_eq!(json["pickups"], 3);
    assert_eq!(json["totals"]["co2"], 6.99);
    assert_eq!(json["totals"]["bottles"], 75);
    assert_eq!(json["totals"]["sheets"], 34);
}

#[test]
fn totals_accept_lowercase_categories() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("pickups.json");
    std::fs::write(&file, r#"[{"category": "plastic", "weight": 2}]"#).unwrap();

    let json = json_output(vtrack_json(dir.path()).arg("totals").arg(&file));
    assert_eq!(json["totals"]["bottles"], 100);
}

#[test]
fn stats_from_pickup_file() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("pickups.json");
    std::fs::write(
        &file,
        r#"[
            {"category": "Plastic", "weight": 5, "status": "APPROVED", "staffId": "staff1", "staff": {"name": "John Doe"}},
            {"category": "Paper", "weight": 2, "status": "PENDING", "staffId": "staff1"},
            {"category": "Plastic", "weight": 1, "status": "APPROVED", "staffId": 2},
            {"category": "Metal", "weight": 2, "status": "REJECTED", "staffId": 2}
        ]"#,
    )
    .unwrap();

    let json = json_output(vtrack_json(dir.path()).arg("stats").arg(&file));
    assert_eq!(json["total"], 4);
    assert_eq!(json["pending"], 1);
    assert_eq!(json["rejected"], 1);
    assert_eq!(json["approval_rate"], 50.0);
    assert_eq!(json["categories"][0]["category"], "Plastic");
    assert_eq!(json["categories"][0]["percentage"], 60.0);
    assert_eq!(json["leaderboard"][0]["name"], "John Doe");
    assert_eq!(json["leaderboard"][1]["name"], "Champion 2");
}

#[test]
fn stats_text_output() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("pickups.json");
    std::fs::write(&file, r#"[{"category": "Glass", "weight": 1.5, "status": "APPROVED", "staffId": "s1"}]"#).unwrap();

    vtrack(dir.path())
        .arg("stats")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("100.0% approved"))
        .stdout(predicate::str::contains("Champion s1"));
}

#[test]
fn totals_with_missing_file_fails() {
    let dir = TempDir::new().unwrap();
    vtrack(dir.path())
        .args(["totals", "missing.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing.json"));
}

#[test]
fn missing_config_file_is_a_config_error() {
    let dir = TempDir::new().unwrap();
    Command::cargo_bin("vtrack")
        .unwrap()
        .current_dir(dir.path())
        .args(["--config", "nope.toml", "distance", "0", "0", "0", "0"])
        .assert()
        .code(3);
}

#[test]
fn session_login_check_logout() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("session.json");
    let file = file.to_str().unwrap();

    vtrack(dir.path())
        .args(["session", "--file", file, "login", "--token", "abc123", "--name", "Asha", "--role", "staff"])
        .assert()
        .success()
        .stdout(predicate::str::contains("/staff"));

    vtrack(dir.path())
        .args(["session", "--file", file, "check", "staff", "supervisor"])
        .assert()
        .success();

    let denied = json_output_allowing_failure(vtrack_json(dir.path()).args(["session", "--file", file, "check", "admin"]));
    assert_eq!(denied.0, Some(5));
    assert_eq!(denied.1["redirect"], "/staff");

    vtrack(dir.path())
        .args(["session", "--file", file, "logout"])
        .assert()
        .success();

    let status = json_output(vtrack_json(dir.path()).args(["session", "--file", file, "status"]));
    assert_eq!(status["authenticated"], false);
}

#[test]
fn session_check_without_login_redirects_to_login() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("session.json");

    let (code, json) = json_output_allowing_failure(
        vtrack_json(dir.path()).arg("session").arg("--file").arg(&file).arg("check"),
    );
    assert_eq!(code, Some(5));
    assert_eq!(json["redirect"], "/login");
}

#[test]
fn session_login_rejects_blank_token() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("session.json");

    vtrack(dir.path())
        .arg("session")
        .arg("--file")
        .arg(&file)
        .args(["login", "--token", "  ", "--name", "Asha", "--role", "admin"])
        .assert()
        .code(2);
    assert!(!file.exists());
}

#[test]
fn session_file_with_blank_token_is_rejected() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("session.json");
    std::fs::write(&file, r#"{"token": "", "user": {"name": "X", "role": "ADMIN"}}"#).unwrap();

    vtrack(dir.path())
        .arg("session")
        .arg("--file")
        .arg(&file)
        .args(["check", "admin"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("token is empty"));
}

#[test]
fn distance_between_antipodes_is_half_circumference() {
    let dir = TempDir::new().unwrap();
    let json = json_output(vtrack_json(dir.path()).args([
        "distance",
        "-70.27585092261097",
        "-84.46129346961438",
        "70.27585092261097",
        "95.53870653038562",
    ]));
    let km = json["km"].as_f64().unwrap();
    assert!((km - 20015.09).abs() < 0.01, "got {km}");
    assert_eq!(json["formatted"], "20015.09 km");
}

fn json_output_allowing_failure(cmd: &mut Command) -> (Option<i32>, Value) {
    let output = cmd.output().unwrap();
    (output.status.code(), serde_json::from_slice(&output.stdout).unwrap())
}
