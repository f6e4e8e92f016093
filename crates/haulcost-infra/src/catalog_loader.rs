//! Catalog loader from a TOML document
//!
//! One file holds every record kind as an array of tables:
//!
//! ```toml
//! [[vehicles]]
//! id = "v1"
//! kind = "Truck"
//! capacity_tons = 14.0
//! km_per_liter = 3.0
//!
//! [[parameters]]
//! diesel_price_per_liter = 5.50
//! ```

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use haulcost_domain::model::{
    Cargo, FixedCost, GlobalParameters, Route, Simulation, Toll, Trip, VariableCost, Vehicle,
};
use haulcost_types::{Error, Result};
use serde::Deserialize;
use tracing::debug;

/// Container for parsing a catalog file
#[derive(Debug, Default, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    vehicles: Vec<Vehicle>,
    #[serde(default)]
    routes: Vec<Route>,
    #[serde(default)]
    cargo: Vec<Cargo>,
    #[serde(default)]
    variable_costs: Vec<VariableCost>,
    #[serde(default)]
    fixed_costs: Vec<FixedCost>,
    #[serde(default)]
    tolls: Vec<Toll>,
    #[serde(default)]
    parameters: Vec<GlobalParameters>,
    #[serde(default)]
    trips: Vec<Trip>,
    #[serde(default)]
    simulations: Vec<Simulation>,
}

/// All catalog records, sorted by id within each kind
#[derive(Debug, Default)]
pub struct CatalogLoader {
    pub(crate) vehicles: Vec<Vehicle>,
    pub(crate) routes: Vec<Route>,
    pub(crate) cargo: Vec<Cargo>,
    pub(crate) variable_costs: Vec<VariableCost>,
    pub(crate) fixed_costs: Vec<FixedCost>,
    pub(crate) tolls: Vec<Toll>,
    pub(crate) parameters: Vec<GlobalParameters>,
    pub(crate) trips: Vec<Trip>,
    pub(crate) simulations: Vec<Simulation>,
}

/// Sort by id and reject an id used twice by the same owner
fn sorted_unique<T>(
    kind: &str,
    mut records: Vec<T>,
    key: impl Fn(&T) -> (&str, &str),
) -> Result<Vec<T>> {
    let mut seen = HashSet::new();
    for record in &records {
        let (owner, id) = key(record);
        if !seen.insert((owner.to_string(), id.to_string())) {
            return Err(Error::Catalog(format!(
                "duplicate {} id '{}' for owner '{}'",
                kind, id, owner
            )));
        }
    }
    records.sort_by(|a, b| key(a).1.cmp(key(b).1));
    Ok(records)
}

impl CatalogLoader {
    /// Load a catalog from a TOML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::FileNotFound(format!(
                "Catalog file not found: {}",
                path.display()
            )));
        }
        let content = fs::read_to_string(path)?;
        let loader = Self::load_from_str(&content)?;
        debug!(
            path = %path.display(),
            vehicles = loader.vehicles.len(),
            routes = loader.routes.len(),
            trips = loader.trips.len(),
            "catalog loaded"
        );
        Ok(loader)
    }

    /// Load a catalog from a TOML string
    pub fn load_from_str(toml_content: &str) -> Result<Self> {
        let file: CatalogFile = toml::from_str(toml_content)
            .map_err(|e| Error::Catalog(format!("Failed to parse catalog TOML: {}", e)))?;

        let mut owners = HashSet::new();
        for params in &file.parameters {
            if !owners.insert(params.owner.clone()) {
                return Err(Error::Catalog(format!(
                    "duplicate parameters for owner '{}'",
                    params.owner
                )));
            }
        }

        Ok(Self {
            vehicles: sorted_unique("vehicle", file.vehicles, |v| {
                (v.owner.as_str(), v.id.as_str())
            })?,
            routes: sorted_unique("route", file.routes, |r| (r.owner.as_str(), r.id.as_str()))?,
            cargo: sorted_unique("cargo", file.cargo, |c| (c.owner.as_str(), c.id.as_str()))?,
            variable_costs: sorted_unique("variable cost", file.variable_costs, |c| {
                (c.owner.as_str(), c.id.as_str())
            })?,
            fixed_costs: sorted_unique("fixed cost", file.fixed_costs, |c| {
                (c.owner.as_str(), c.id.as_str())
            })?,
            tolls: sorted_unique("toll", file.tolls, |t| (t.owner.as_str(), t.id.as_str()))?,
            parameters: file.parameters,
            trips: sorted_unique("trip", file.trips, |t| (t.owner.as_str(), t.id.as_str()))?,
            simulations: sorted_unique("simulation", file.simulations, |s| {
                (s.owner.as_str(), s.id.as_str())
            })?,
        })
    }

    /// Number of records across all kinds
    pub fn record_count(&self) -> usize {
        self.vehicles.len()
            + self.routes.len()
            + self.cargo.len()
            + self.variable_costs.len()
            + self.fixed_costs.len()
            + self.tolls.len()
            + self.parameters.len()
            + self.trips.len()
            + self.simulations.len()
    }
}
