//! Repository trait definitions for the records the estimator consumes
//!
//! Every lookup is scoped by owner. Implementations are read-only; creating
//! and editing records belongs to whatever system maintains the catalog.

use crate::model::{
    Cargo, FixedCost, GlobalParameters, Route, Simulation, Toll, Trip, VariableCost, Vehicle,
};
use haulcost_types::Error;

/// Repository for fleet vehicles
pub trait VehicleRepository {
    /// Find a vehicle by id
    fn find_vehicle(&self, owner: &str, id: &str) -> Result<Option<Vehicle>, Error>;

    /// Find all vehicles
    fn all_vehicles(&self, owner: &str) -> Result<Vec<Vehicle>, Error>;
}

/// Repository for routes
pub trait RouteRepository {
    fn find_route(&self, owner: &str, id: &str) -> Result<Option<Route>, Error>;

    fn all_routes(&self, owner: &str) -> Result<Vec<Route>, Error>;
}

/// Repository for cargo items
pub trait CargoRepository {
    fn find_cargo(&self, owner: &str, id: &str) -> Result<Option<Cargo>, Error>;

    fn all_cargo(&self, owner: &str) -> Result<Vec<Cargo>, Error>;
}

/// Repository for variable and fixed cost catalogs
///
/// The `active_*` methods are the one place where catalog membership is
/// decided: only records flagged active take part in a calculation.
pub trait CostCatalogRepository {
    /// All variable costs, active or not
    fn variable_costs(&self, owner: &str) -> Result<Vec<VariableCost>, Error>;

    /// All fixed costs, active or not
    fn fixed_costs(&self, owner: &str) -> Result<Vec<FixedCost>, Error>;

    /// Per-km rates of the active variable costs
    fn active_variable_rates(&self, owner: &str) -> Result<Vec<f64>, Error> {
        Ok(self
            .variable_costs(owner)?
            .into_iter()
            .filter(|c| c.active)
            .map(|c| c.rate_per_km)
            .collect())
    }

    /// Monthly amounts of the active fixed costs
    fn active_monthly_fixed_costs(&self, owner: &str) -> Result<Vec<f64>, Error> {
        Ok(self
            .fixed_costs(owner)?
            .into_iter()
            .filter(|c| c.active)
            .map(|c| c.monthly_amount)
            .collect())
    }
}

/// Repository for route tolls
pub trait TollRepository {
    /// Tolls charged on the given route
    fn tolls_for_route(&self, owner: &str, route_id: &str) -> Result<Vec<Toll>, Error>;

    /// Toll amounts charged on the given route
    fn toll_amounts(&self, owner: &str, route_id: &str) -> Result<Vec<f64>, Error> {
        Ok(self
            .tolls_for_route(owner, route_id)?
            .into_iter()
            .map(|t| t.amount)
            .collect())
    }
}

/// Repository for per-owner pricing parameters
pub trait ParametersRepository {
    fn find_parameters(&self, owner: &str) -> Result<Option<GlobalParameters>, Error>;
}

/// Repository for trips
pub trait TripRepository {
    fn find_trip(&self, owner: &str, id: &str) -> Result<Option<Trip>, Error>;

    fn all_trips(&self, owner: &str) -> Result<Vec<Trip>, Error>;
}

/// Repository for saved simulations
pub trait SimulationRepository {
    fn find_simulation(&self, owner: &str, id: &str) -> Result<Option<Simulation>, Error>;

    fn all_simulations(&self, owner: &str) -> Result<Vec<Simulation>, Error>;
}

/// Every record provider a cost use case may consult
pub trait CatalogRepository:
    VehicleRepository
    + RouteRepository
    + CargoRepository
    + CostCatalogRepository
    + TollRepository
    + ParametersRepository
    + TripRepository
    + SimulationRepository
{
}

impl<T> CatalogRepository for T where
    T: VehicleRepository
        + RouteRepository
        + CargoRepository
        + CostCatalogRepository
        + TollRepository
        + ParametersRepository
        + TripRepository
        + SimulationRepository
{
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedCatalog;

    impl CostCatalogRepository for FixedCatalog {
        fn variable_costs(&self, owner: &str) -> Result<Vec<VariableCost>, Error> {
            Ok(vec![
                VariableCost {
                    id: "tyres".to_string(),
                    name: "Tyres".to_string(),
                    rate_per_km: 0.20,
                    active: true,
                    owner: owner.to_string(),
                },
                VariableCost {
                    id: "washing".to_string(),
                    name: "Washing".to_string(),
                    rate_per_km: 0.05,
                    active: false,
                    owner: owner.to_string(),
                },
            ])
        }

        fn fixed_costs(&self, owner: &str) -> Result<Vec<FixedCost>, Error> {
            Ok(vec![
                FixedCost {
                    id: "insurance".to_string(),
                    name: "Insurance".to_string(),
                    monthly_amount: 1200.0,
                    active: false,
                    owner: owner.to_string(),
                },
                FixedCost {
                    id: "salary".to_string(),
                    name: "Driver salary".to_string(),
                    monthly_amount: 3000.0,
                    active: true,
                    owner: owner.to_string(),
                },
            ])
        }
    }

    #[test]
    fn test_active_filters_exclude_inactive() {
        let catalog = FixedCatalog;
        assert_eq!(catalog.active_variable_rates("u1").unwrap(), vec![0.20]);
        assert_eq!(catalog.active_monthly_fixed_costs("u1").unwrap(), vec![3000.0]);
    }
}
