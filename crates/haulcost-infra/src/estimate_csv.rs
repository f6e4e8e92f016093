//! CSV loader for batch estimate inputs
//!
//! Expected header:
//! label,distance_km,km_per_liter,diesel_price_per_liter,average_speed_kmh,variable_rates,tolls,fixed_costs,deliveries
//!
//! The list columns hold `;`-separated numbers and may be empty.

use std::path::Path;

use haulcost_domain::service::CostInput;
use haulcost_types::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

const REQUIRED_COLUMNS: [&str; 9] = [
    "label",
    "distance_km",
    "km_per_liter",
    "diesel_price_per_liter",
    "average_speed_kmh",
    "variable_rates",
    "tolls",
    "fixed_costs",
    "deliveries",
];

/// One batch row: a caller-chosen label and the estimator input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelledInput {
    pub label: String,
    pub input: CostInput,
}

#[derive(Debug, Deserialize)]
struct EstimateRow {
    label: String,
    distance_km: f64,
    km_per_liter: f64,
    diesel_price_per_liter: f64,
    average_speed_kmh: f64,
    #[serde(default)]
    variable_rates: String,
    #[serde(default)]
    tolls: String,
    #[serde(default)]
    fixed_costs: String,
    #[serde(default)]
    deliveries: Option<u32>,
}

/// Load labelled estimate inputs from a UTF-8 CSV file
pub fn load_estimate_inputs_from_csv<P: AsRef<Path>>(path: P) -> Result<Vec<LabelledInput>> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(Error::FileNotFound(format!(
            "CSV file not found: {}",
            path.display()
        )));
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| Error::CsvLoader(format!("Failed to open CSV: {}", e)))?;

    let headers = reader
        .headers()
        .map_err(|e| Error::CsvLoader(format!("Failed to read CSV header: {}", e)))?
        .clone();
    validate_headers(&headers)?;

    let mut inputs = Vec::new();
    for (row_idx, result) in reader.deserialize::<EstimateRow>().enumerate() {
        // header is row 1
        let row_num = row_idx + 2;
        let row = result.map_err(|e| Error::CsvLoader(format!("row {}: {}", row_num, e)))?;
        inputs.push(row_to_input(row, row_num)?);
    }

    debug!(path = %path.display(), rows = inputs.len(), "estimate CSV loaded");
    Ok(inputs)
}

fn validate_headers(headers: &csv::StringRecord) -> Result<()> {
    for col in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == col) {
            return Err(Error::CsvLoader(format!("Missing required column: {}", col)));
        }
    }
    Ok(())
}

fn row_to_input(row: EstimateRow, row_num: usize) -> Result<LabelledInput> {
    let mut input = CostInput::new(
        row.distance_km,
        row.km_per_liter,
        row.diesel_price_per_liter,
        row.average_speed_kmh,
    )
    .with_variable_rates(parse_list(&row.variable_rates, row_num, "variable_rates")?)
    .with_tolls(parse_list(&row.tolls, row_num, "tolls")?)
    .with_fixed_costs(parse_list(&row.fixed_costs, row_num, "fixed_costs")?);
    input.deliveries_on_route = row.deliveries;

    Ok(LabelledInput {
        label: row.label,
        input,
    })
}

fn parse_list(s: &str, row: usize, column: &str) -> Result<Vec<f64>> {
    s.split(';')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| {
            item.parse::<f64>().map_err(|_| {
                Error::CsvLoader(format!(
                    "Invalid number in row {}, column {}: {}",
                    row, column, item
                ))
            })
        })
        .collect()
}
