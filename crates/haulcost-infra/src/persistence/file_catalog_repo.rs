//! File-based implementation of the catalog repositories
//!
//! The whole catalog is read once from a TOML file and served from memory.

use std::path::{Path, PathBuf};

use haulcost_domain::model::{
    Cargo, FixedCost, GlobalParameters, Route, Simulation, Toll, Trip, VariableCost, Vehicle,
};
use haulcost_domain::repository::{
    CargoRepository, CostCatalogRepository, ParametersRepository, RouteRepository,
    SimulationRepository, TollRepository, TripRepository, VehicleRepository,
};
use haulcost_types::{Error, Result};

use crate::catalog_loader::CatalogLoader;

/// File-based catalog repository (TOML)
pub struct FileCatalogRepository {
    toml_path: Option<PathBuf>,
    loader: CatalogLoader,
}

fn owned_by<'a, T>(
    records: &'a [T],
    owner: &'a str,
    record_owner: impl Fn(&T) -> &str + 'a,
) -> impl Iterator<Item = &'a T> + 'a {
    records.iter().filter(move |r| record_owner(*r) == owner)
}

impl FileCatalogRepository {
    /// Create a new repository from a TOML file path
    pub fn new(toml_path: PathBuf) -> Result<Self> {
        let loader = CatalogLoader::load_from_file(&toml_path)?;
        Ok(Self {
            toml_path: Some(toml_path),
            loader,
        })
    }

    /// Create a repository over an already loaded catalog
    pub fn from_loader(loader: CatalogLoader) -> Self {
        Self {
            toml_path: None,
            loader,
        }
    }

    /// Get the TOML path, if the catalog came from a file
    pub fn toml_path(&self) -> Option<&Path> {
        self.toml_path.as_deref()
    }

    /// Reload data from TOML
    pub fn reload(&mut self) -> Result<()> {
        if let Some(path) = &self.toml_path {
            self.loader = CatalogLoader::load_from_file(path)?;
        }
        Ok(())
    }

    pub fn record_count(&self) -> usize {
        self.loader.record_count()
    }
}

impl VehicleRepository for FileCatalogRepository {
    fn find_vehicle(&self, owner: &str, id: &str) -> std::result::Result<Option<Vehicle>, Error> {
        Ok(owned_by(&self.loader.vehicles, owner, |v| v.owner.as_str())
            .find(|v| v.id == id)
            .cloned())
    }

    fn all_vehicles(&self, owner: &str) -> std::result::Result<Vec<Vehicle>, Error> {
        Ok(owned_by(&self.loader.vehicles, owner, |v| v.owner.as_str())
            .cloned()
            .collect())
    }
}

impl RouteRepository for FileCatalogRepository {
    fn find_route(&self, owner: &str, id: &str) -> std::result::Result<Option<Route>, Error> {
        Ok(owned_by(&self.loader.routes, owner, |r| r.owner.as_str())
            .find(|r| r.id == id)
            .cloned())
    }

    fn all_routes(&self, owner: &str) -> std::result::Result<Vec<Route>, Error> {
        Ok(owned_by(&self.loader.routes, owner, |r| r.owner.as_str())
            .cloned()
            .collect())
    }
}

impl CargoRepository for FileCatalogRepository {
    fn find_cargo(&self, owner: &str, id: &str) -> std::result::Result<Option<Cargo>, Error> {
        Ok(owned_by(&self.loader.cargo, owner, |c| c.owner.as_str())
            .find(|c| c.id == id)
            .cloned())
    }

    fn all_cargo(&self, owner: &str) -> std::result::Result<Vec<Cargo>, Error> {
        Ok(owned_by(&self.loader.cargo, owner, |c| c.owner.as_str())
            .cloned()
            .collect())
    }
}

impl CostCatalogRepository for FileCatalogRepository {
    fn variable_costs(&self, owner: &str) -> std::result::Result<Vec<VariableCost>, Error> {
        Ok(owned_by(&self.loader.variable_costs, owner, |c| c.owner.as_str())
            .cloned()
            .collect())
    }

    fn fixed_costs(&self, owner: &str) -> std::result::Result<Vec<FixedCost>, Error> {
        Ok(owned_by(&self.loader.fixed_costs, owner, |c| c.owner.as_str())
            .cloned()
            .collect())
    }
}

impl TollRepository for FileCatalogRepository {
    fn tolls_for_route(&self, owner: &str, route_id: &str) -> std::result::Result<Vec<Toll>, Error> {
        Ok(owned_by(&self.loader.tolls, owner, |t| t.owner.as_str())
            .filter(|t| t.route_id == route_id)
            .cloned()
            .collect())
    }
}

impl ParametersRepository for FileCatalogRepository {
    fn find_parameters(&self, owner: &str) -> std::result::Result<Option<GlobalParameters>, Error> {
        Ok(owned_by(&self.loader.parameters, owner, |p| p.owner.as_str())
            .next()
            .cloned())
    }
}

impl TripRepository for FileCatalogRepository {
    fn find_trip(&self, owner: &str, id: &str) -> std::result::Result<Option<Trip>, Error> {
        Ok(owned_by(&self.loader.trips, owner, |t| t.owner.as_str())
            .find(|t| t.id == id)
            .cloned())
    }

    fn all_trips(&self, owner: &str) -> std::result::Result<Vec<Trip>, Error> {
        Ok(owned_by(&self.loader.trips, owner, |t| t.owner.as_str())
            .cloned()
            .collect())
    }
}

impl SimulationRepository for FileCatalogRepository {
    fn find_simulation(&self, owner: &str, id: &str) -> std::result::Result<Option<Simulation>, Error> {
        Ok(owned_by(&self.loader.simulations, owner, |s| s.owner.as_str())
            .find(|s| s.id == id)
            .cloned())
    }

    fn all_simulations(&self, owner: &str) -> std::result::Result<Vec<Simulation>, Error> {
        Ok(owned_by(&self.loader.simulations, owner, |s| s.owner.as_str())
            .cloned()
            .collect())
    }
}
