//! End-to-end tests for the haulcost binary against the fixture catalog

use std::path::PathBuf;
use std::process::{Command, Output};

use serde_json::Value;
use tempfile::{tempdir, TempDir};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Run the binary with an isolated config directory
fn run(config_home: &TempDir, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_haulcost"))
        .args(args)
        .env("HOME", config_home.path())
        .env("XDG_CONFIG_HOME", config_home.path())
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run haulcost")
}

fn run_json(args: &[&str]) -> Value {
    let home = tempdir().unwrap();
    let catalog = fixture("catalog.toml");
    let mut full = vec!["--catalog", catalog.to_str().unwrap(), "-f", "json"];
    full.extend_from_slice(args);

    let output = run(&home, &full);
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout is not JSON")
}

fn approx(value: &Value, expected: f64) -> bool {
    (value.as_f64().unwrap() - expected).abs() < 1e-3
}

#[test]
fn test_adhoc_estimate_reference_scenario() {
    let result = run_json(&[
        "estimate",
        "--distance",
        "500",
        "--km-per-liter",
        "3",
        "--diesel-price",
        "5.5",
        "--rate",
        "0.2",
        "--rate",
        "0.15",
        "--toll",
        "45",
        "--fixed",
        "3000",
        "--deliveries",
        "10",
    ]);

    assert!(approx(&result["fuel_consumption_liters"], 166.667));
    assert!(approx(&result["fuel_cost"], 916.667));
    assert!(approx(&result["variable_cost"], 175.0));
    assert!(approx(&result["toll_cost"], 45.0));
    assert!(approx(&result["daily_fixed_cost_share"], 100.0));
    assert!(approx(&result["total_cost"], 1236.667));
    assert!(approx(&result["cost_per_delivery"], 123.667));
    assert!(approx(&result["estimated_time_hours"], 8.333));
}

#[test]
fn test_adhoc_estimate_without_deliveries_omits_field() {
    let result = run_json(&[
        "estimate",
        "--distance",
        "100",
        "--km-per-liter",
        "4",
        "--diesel-price",
        "5",
    ]);
    assert!(result.get("cost_per_delivery").is_none());
    assert!(approx(&result["total_cost"], 125.0));
}

#[test]
fn test_zero_consumption_is_rejected() {
    let home = tempdir().unwrap();
    let output = run(
        &home,
        &[
            "estimate",
            "--distance",
            "100",
            "--km-per-liter",
            "0",
            "--diesel-price",
            "5",
        ],
    );
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error:"));
    assert!(stderr.contains("km_per_liter"));
}

#[test]
fn test_pairing_uses_active_catalog_entries() {
    let estimate = run_json(&[
        "pairing",
        "--vehicle",
        "v1",
        "--route",
        "r-santos",
        "--deliveries",
        "10",
    ]);

    let result = &estimate["result"];
    // washing and insurance are inactive
    assert!(approx(&result["variable_cost"], 175.0));
    assert!(approx(&result["daily_fixed_cost_share"], 100.0));
    assert!(approx(&result["total_cost"], 1236.667));
    assert_eq!(estimate["route_label"], "São Paulo → Santos");
    assert_eq!(estimate["kpis"]["efficiency"], "medium");
}

#[test]
fn test_pairing_maintenance_only() {
    let estimate = run_json(&[
        "pairing",
        "--vehicle",
        "v1",
        "--route",
        "r-santos",
        "--maintenance-only",
    ]);

    let result = &estimate["result"];
    // 500 km at the vehicle's 0.85 per km
    assert!(approx(&result["variable_cost"], 425.0));
    assert!(approx(&result["toll_cost"], 0.0));
    assert!(approx(&result["daily_fixed_cost_share"], 0.0));
    assert!(approx(&result["total_cost"], 1341.667));
}

#[test]
fn test_pairing_with_cargo() {
    let estimate = run_json(&[
        "pairing",
        "--vehicle",
        "v1",
        "--route",
        "r-santos",
        "--cargo",
        "c-steel",
    ]);
    assert!(estimate["kpis"]["cost_per_kg"].as_f64().unwrap() > 0.0);
    assert!(estimate["result"].get("cost_per_delivery").is_none());
}

#[test]
fn test_fleet_report_counts_rejections() {
    let report = run_json(&["trips"]);

    let summary = &report["summary"];
    assert_eq!(summary["trip_count"], 3);
    assert_eq!(summary["estimated_count"], 2);
    assert_eq!(summary["rejected_count"], 1);
    assert_eq!(report["currency"], "BRL");
    assert!(report["generated_at"].is_string());

    let trips = report["trips"].as_array().unwrap();
    assert_eq!(trips[1]["trip_id"], "t-002");
    assert_eq!(trips[1]["outcome"], "rejected");
}

#[test]
fn test_single_trip() {
    let trip = run_json(&["trip", "t-001"]);
    assert_eq!(trip["outcome"], "estimated");
    assert!(approx(&trip["result"]["total_cost"], 1236.667));
    assert!(trip["kpis"]["margin_pct"].as_f64().unwrap() > 0.0);
}

#[test]
fn test_simulation_with_adhoc_override() {
    let run = run_json(&["simulate", "s-001"]);
    assert!(approx(&run["simulated"]["input"]["diesel_price_per_liter"], 6.2));
    assert!(approx(&run["simulated"]["result"]["toll_cost"], 60.0));
    assert!(run["simulated"]["result"]["cost_per_delivery"].is_number());

    let run = run_json(&["simulate", "s-001", "--diesel-price", "5.0"]);
    assert!(approx(&run["simulated"]["input"]["diesel_price_per_liter"], 5.0));
    assert!(approx(&run["base_result"]["total_cost"], 1236.667));
}

#[test]
fn test_catalog_listing_is_owner_scoped() {
    let vehicles = run_json(&["catalog", "vehicles"]);
    assert_eq!(vehicles.as_array().unwrap().len(), 3);

    let vehicles = run_json(&["--owner", "transportes-sul", "catalog", "vehicles"]);
    let vehicles = vehicles.as_array().unwrap();
    assert_eq!(vehicles.len(), 1);
    assert_eq!(vehicles[0]["capacity_tons"], 20.0);

    let tolls = run_json(&["catalog", "tolls"]);
    assert_eq!(tolls.as_array().unwrap().len(), 2);
}

#[test]
fn test_unknown_trip_fails() {
    let home = tempdir().unwrap();
    let catalog = fixture("catalog.toml");
    let output = run(&home, &["--catalog", catalog.to_str().unwrap(), "trip", "t-999"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Trip not found: t-999"));
}

#[test]
fn test_batch_from_csv() {
    let csv = fixture("estimates.csv");
    let rows = run_json(&["batch", csv.to_str().unwrap()]);
    let rows = rows.as_array().unwrap();

    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0]["label"], "santos-reference");
    assert!(approx(&rows[0]["result"]["total_cost"], 1236.667));
    assert_eq!(rows[1]["outcome"], "estimated");
    assert_eq!(rows[2]["outcome"], "rejected");
}

#[test]
fn test_adhoc_estimate_uses_configured_speed() {
    let home = tempdir().unwrap();
    let output = run(&home, &["config", "--set-speed", "50"]);
    assert!(output.status.success());

    let args = [
        "-f",
        "json",
        "estimate",
        "--distance",
        "100",
        "--km-per-liter",
        "4",
        "--diesel-price",
        "5",
    ];
    let output = run(&home, &args);
    assert!(output.status.success());
    let result: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(approx(&result["estimated_time_hours"], 2.0));

    let mut with_speed = args.to_vec();
    with_speed.extend_from_slice(&["--speed", "80"]);
    let output = run(&home, &with_speed);
    let result: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(approx(&result["estimated_time_hours"], 1.25));
}

#[test]
fn test_config_set_and_show() {
    let home = tempdir().unwrap();
    let output = run(&home, &["config", "--set-owner", "transportes-sul", "--show"]);
    assert!(output.status.success());

    let output = run(&home, &["config"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("transportes-sul"));

    let output = run(&home, &["config", "--reset"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Owner:          default"));
}
