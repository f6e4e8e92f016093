//! Cost Service - trip and pairing cost use cases
//!
//! Every use case follows the same path:
//! 1. Gather records for the session owner
//! 2. Build a `CostInput`
//! 3. Validate it
//! 4. Run the estimator
//! 5. Reject non-finite results
//! 6. Attach indicators

use haulcost_domain::model::{GlobalParameters, Route, SimulationOverrides, Trip, Vehicle};
use haulcost_domain::repository::CatalogRepository;
use haulcost_domain::service::{
    compute_kpis, ensure_finite, estimate_cost, simulate, validate_cost_input, validate_trip,
    CostInput, CostKpis, CostResult, KpiBasis, SimulationOutcome, TripEstimate, TripOutcome,
};
use haulcost_infra::estimate_csv::LabelledInput;
use haulcost_types::Error;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::session::Session;

/// Errors specific to the cost service
#[derive(Debug, Error)]
pub enum CostServiceError {
    #[error("{0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Repository error: {0}")]
    Repository(String),
}

impl From<Error> for CostServiceError {
    fn from(err: Error) -> Self {
        match err {
            Error::RecordNotFound { .. } => CostServiceError::NotFound(err.to_string()),
            Error::InvalidInput(msg) | Error::NonFiniteResult(msg) => {
                CostServiceError::InvalidInput(msg)
            }
            _ => CostServiceError::Repository(err.to_string()),
        }
    }
}

impl CostServiceError {
    /// Caused by the records themselves rather than by the storage
    fn is_record_problem(&self) -> bool {
        matches!(
            self,
            CostServiceError::NotFound(_) | CostServiceError::InvalidInput(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, CostServiceError>;

/// Options for a vehicle/route pairing estimate
#[derive(Debug, Clone, Default)]
pub struct PairingOptions {
    /// Deliveries made along the route
    pub deliveries: Option<u32>,

    /// Cargo item whose weight unlocks per-kg and per-ton-km figures
    pub cargo_id: Option<String>,

    /// Diesel price to use instead of the owner's parameter
    pub diesel_price_per_liter: Option<f64>,

    /// Cost only fuel plus the vehicle's own maintenance rate per km
    pub maintenance_only: bool,
}

impl PairingOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_deliveries(mut self, deliveries: u32) -> Self {
        self.deliveries = Some(deliveries);
        self
    }

    pub fn with_cargo(mut self, cargo_id: String) -> Self {
        self.cargo_id = Some(cargo_id);
        self
    }

    pub fn with_diesel_price(mut self, price: f64) -> Self {
        self.diesel_price_per_liter = Some(price);
        self
    }

    pub fn with_maintenance_only(mut self) -> Self {
        self.maintenance_only = true;
        self
    }
}

/// Cost of running one vehicle over one route
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairingEstimate {
    pub vehicle_id: String,
    pub route_id: String,
    pub route_label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cargo_id: Option<String>,
    pub input: CostInput,
    pub result: CostResult,
    pub kpis: CostKpis,
}

/// A saved simulation next to the trip it modifies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationRun {
    pub simulation_id: String,
    pub base_trip_id: String,
    pub overrides: SimulationOverrides,
    pub base_result: CostResult,
    pub simulated: SimulationOutcome,
}

impl SimulationRun {
    /// Simulated total minus base total
    pub fn total_cost_delta(&self) -> f64 {
        self.simulated.result.total_cost - self.base_result.total_cost
    }
}

/// One labelled row of a batch run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchEstimate {
    pub label: String,
    pub distance_km: f64,
    #[serde(flatten)]
    pub outcome: TripOutcome,
}

fn load_vehicle<R: CatalogRepository + ?Sized>(
    repo: &R,
    session: &Session,
    id: &str,
) -> Result<Vehicle> {
    repo.find_vehicle(session.owner(), id)?
        .ok_or_else(|| Error::not_found("Vehicle", id).into())
}

fn load_route<R: CatalogRepository + ?Sized>(
    repo: &R,
    session: &Session,
    id: &str,
) -> Result<Route> {
    repo.find_route(session.owner(), id)?
        .ok_or_else(|| Error::not_found("Route", id).into())
}

fn load_parameters<R: CatalogRepository + ?Sized>(
    repo: &R,
    session: &Session,
) -> Result<GlobalParameters> {
    repo.find_parameters(session.owner())?
        .ok_or_else(|| Error::not_found("Parameters for owner", session.owner()).into())
}

/// Owner's speed, else the route's own time baseline, else the session default
fn average_speed(params: &GlobalParameters, route: &Route, session: &Session) -> f64 {
    params
        .average_speed_kmh
        .or_else(|| {
            route
                .estimated_time_h
                .filter(|h| *h > 0.0)
                .map(|h| route.distance_km / h)
        })
        .unwrap_or(session.default_average_speed_kmh)
}

/// Build the estimator input for a vehicle on a route from catalog records
fn build_input<R: CatalogRepository + ?Sized>(
    repo: &R,
    session: &Session,
    vehicle: &Vehicle,
    route: &Route,
    params: &GlobalParameters,
) -> Result<CostInput> {
    let owner = session.owner();
    let input = CostInput::new(
        route.distance_km,
        vehicle.km_per_liter,
        params.diesel_price_per_liter,
        average_speed(params, route, session),
    )
    .with_variable_rates(repo.active_variable_rates(owner)?)
    .with_tolls(repo.toll_amounts(owner, &route.id)?)
    .with_fixed_costs(repo.active_monthly_fixed_costs(owner)?);

    debug!(
        vehicle = %vehicle.id,
        route = %route.id,
        variable_rates = input.variable_cost_rates.len(),
        tolls = input.toll_amounts.len(),
        fixed_costs = input.monthly_fixed_costs.len(),
        "cost input assembled"
    );
    Ok(input)
}

/// Fuel plus the vehicle's maintenance rate; no catalog costs, tolls or fixed share
fn maintenance_input(
    session: &Session,
    vehicle: &Vehicle,
    route: &Route,
    params: &GlobalParameters,
) -> CostInput {
    debug!(
        vehicle = %vehicle.id,
        route = %route.id,
        rate = vehicle.cost_per_km,
        "maintenance-only input"
    );
    CostInput::new(
        route.distance_km,
        vehicle.km_per_liter,
        params.diesel_price_per_liter,
        average_speed(params, route, session),
    )
    .with_variable_rates(vec![vehicle.cost_per_km])
}

/// Validate, estimate, and reject non-finite output
fn checked_estimate(input: &CostInput) -> Result<CostResult> {
    validate_cost_input(input).map_err(Error::from)?;
    let result = estimate_cost(input);
    ensure_finite(&result).map_err(Error::from)?;
    Ok(result)
}

/// Estimate the cost of a vehicle running a route
pub fn estimate_pairing<R: CatalogRepository + ?Sized>(
    repo: &R,
    session: &Session,
    vehicle_id: &str,
    route_id: &str,
    options: &PairingOptions,
) -> Result<PairingEstimate> {
    let vehicle = load_vehicle(repo, session, vehicle_id)?;
    let route = load_route(repo, session, route_id)?;
    let params = load_parameters(repo, session)?;

    let mut input = if options.maintenance_only {
        maintenance_input(session, &vehicle, &route, &params)
    } else {
        build_input(repo, session, &vehicle, &route, &params)?
    };
    if let Some(price) = options.diesel_price_per_liter {
        input.diesel_price_per_liter = price;
    }
    input.deliveries_on_route = options.deliveries;

    let mut basis = KpiBasis::default();
    if let Some(cargo_id) = &options.cargo_id {
        let cargo = repo
            .find_cargo(session.owner(), cargo_id)?
            .ok_or_else(|| Error::not_found("Cargo", cargo_id.as_str()))?;
        basis.cargo_weight_kg = Some(cargo.weight_kg);
        basis.weight_tons = Some(cargo.weight_kg / 1000.0);
    }

    let result = checked_estimate(&input)?;
    let kpis = compute_kpis(&result, input.distance_km, &basis);
    info!(
        vehicle = vehicle_id,
        route = route_id,
        total_cost = result.total_cost,
        "pairing estimated"
    );

    Ok(PairingEstimate {
        vehicle_id: vehicle.id,
        route_id: route.id.clone(),
        route_label: route.label(),
        cargo_id: options.cargo_id.clone(),
        input,
        result,
        kpis,
    })
}

fn trip_basis(trip: &Trip) -> KpiBasis {
    KpiBasis {
        weight_tons: trip.weight_tons,
        revenue: trip.revenue,
        cargo_weight_kg: None,
    }
}

/// Records behind a trip, validated, with the input they produce
struct TripContext {
    route: Route,
    input: CostInput,
}

fn trip_context<R: CatalogRepository + ?Sized>(
    repo: &R,
    session: &Session,
    trip: &Trip,
) -> Result<TripContext> {
    let vehicle = load_vehicle(repo, session, &trip.vehicle_id)?;
    let route = load_route(repo, session, &trip.route_id)?;
    validate_trip(trip, Some(&vehicle)).map_err(Error::from)?;
    let params = load_parameters(repo, session)?;
    let input = build_input(repo, session, &vehicle, &route, &params)?;
    Ok(TripContext { route, input })
}

fn estimate_loaded_trip<R: CatalogRepository + ?Sized>(
    repo: &R,
    session: &Session,
    trip: &Trip,
) -> Result<TripEstimate> {
    let ctx = trip_context(repo, session, trip)?;
    let result = checked_estimate(&ctx.input)?;
    let kpis = compute_kpis(&result, ctx.input.distance_km, &trip_basis(trip));

    Ok(TripEstimate {
        trip_id: trip.id.clone(),
        vehicle_id: trip.vehicle_id.clone(),
        route_label: ctx.route.label(),
        distance_km: ctx.route.distance_km,
        outcome: TripOutcome::Estimated { result, kpis },
    })
}

/// Recalculate the cost of a stored trip
pub fn estimate_trip<R: CatalogRepository + ?Sized>(
    repo: &R,
    session: &Session,
    trip_id: &str,
) -> Result<TripEstimate> {
    let trip = repo
        .find_trip(session.owner(), trip_id)?
        .ok_or_else(|| Error::not_found("Trip", trip_id))?;
    let estimate = estimate_loaded_trip(repo, session, &trip)?;
    info!(trip = trip_id, "trip estimated");
    Ok(estimate)
}

/// Estimate every trip of the session owner
///
/// A trip with missing references or invalid figures is recorded as
/// rejected; storage failures abort the run.
pub fn estimate_all_trips<R: CatalogRepository + ?Sized>(
    repo: &R,
    session: &Session,
) -> Result<Vec<TripEstimate>> {
    let trips = repo.all_trips(session.owner())?;
    let mut estimates = Vec::with_capacity(trips.len());

    for trip in &trips {
        match estimate_loaded_trip(repo, session, trip) {
            Ok(estimate) => estimates.push(estimate),
            Err(e) if e.is_record_problem() => {
                warn!(trip = %trip.id, error = %e, "trip rejected");
                let route = repo.find_route(session.owner(), &trip.route_id)?;
                estimates.push(TripEstimate {
                    trip_id: trip.id.clone(),
                    vehicle_id: trip.vehicle_id.clone(),
                    route_label: route
                        .as_ref()
                        .map(Route::label)
                        .unwrap_or_else(|| trip.route_id.clone()),
                    distance_km: route.map(|r| r.distance_km).unwrap_or(0.0),
                    outcome: TripOutcome::Rejected {
                        reason: e.to_string(),
                    },
                });
            }
            Err(e) => return Err(e),
        }
    }

    info!(
        trips = estimates.len(),
        rejected = estimates.iter().filter(|e| e.is_rejected()).count(),
        "fleet estimated"
    );
    Ok(estimates)
}

/// Run a saved simulation; `extra` overrides win over the stored ones
pub fn run_simulation<R: CatalogRepository + ?Sized>(
    repo: &R,
    session: &Session,
    simulation_id: &str,
    extra: &SimulationOverrides,
) -> Result<SimulationRun> {
    let simulation = repo
        .find_simulation(session.owner(), simulation_id)?
        .ok_or_else(|| Error::not_found("Simulation", simulation_id))?;
    let trip = repo
        .find_trip(session.owner(), &simulation.base_trip_id)?
        .ok_or_else(|| Error::not_found("Trip", simulation.base_trip_id.as_str()))?;

    let ctx = trip_context(repo, session, &trip)?;
    let base_result = checked_estimate(&ctx.input)?;

    let overrides = simulation.overrides.merged_with(extra);
    let simulated = simulate(&ctx.input, &overrides, &trip_basis(&trip));
    validate_cost_input(&simulated.input).map_err(Error::from)?;
    ensure_finite(&simulated.result).map_err(Error::from)?;

    info!(
        simulation = simulation_id,
        trip = %trip.id,
        base_total = base_result.total_cost,
        simulated_total = simulated.result.total_cost,
        "simulation run"
    );

    Ok(SimulationRun {
        simulation_id: simulation.id,
        base_trip_id: trip.id,
        overrides,
        base_result,
        simulated,
    })
}

/// Estimate labelled inputs independently; invalid rows are rejected
pub fn estimate_batch(inputs: &[LabelledInput]) -> Vec<BatchEstimate> {
    inputs
        .iter()
        .map(|row| {
            let outcome = match checked_estimate(&row.input) {
                Ok(result) => {
                    let kpis = compute_kpis(&result, row.input.distance_km, &KpiBasis::default());
                    TripOutcome::Estimated { result, kpis }
                }
                Err(e) => {
                    warn!(label = %row.label, error = %e, "batch row rejected");
                    TripOutcome::Rejected {
                        reason: e.to_string(),
                    }
                }
            };
            BatchEstimate {
                label: row.label.clone(),
                distance_km: row.input.distance_km,
                outcome,
            }
        })
        .collect()
}

/// Estimate ad-hoc numbers with the same checks as the catalog use cases
pub fn estimate_input(input: &CostInput) -> Result<CostResult> {
    checked_estimate(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use haulcost_infra::catalog_loader::CatalogLoader;
    use haulcost_infra::persistence::FileCatalogRepository;

    const CATALOG: &str = r#"
[[vehicles]]
id = "truck"
kind = "Truck"
capacity_tons = 14.0
km_per_liter = 3.0
cost_per_km = 0.85

[[vehicles]]
id = "broken"
kind = "Truck"
capacity_tons = 14.0
km_per_liter = 0.0

[[vehicles]]
id = "truck"
kind = "Truck"
capacity_tons = 14.0
km_per_liter = 4.0
owner = "nospeed"

[[routes]]
id = "santos"
origin = "São Paulo"
destination = "Santos"
distance_km = 500.0

[[routes]]
id = "timed"
origin = "A"
destination = "B"
distance_km = 100.0
estimated_time_h = 2.5

[[routes]]
id = "timed"
origin = "A"
destination = "B"
distance_km = 100.0
estimated_time_h = 2.5
owner = "nospeed"

[[routes]]
id = "plain"
origin = "A"
destination = "C"
distance_km = 90.0
owner = "nospeed"

[[cargo]]
id = "steel"
name = "Steel coils"
weight_kg = 10000.0

[[variable_costs]]
id = "tyres"
name = "Tyres"
rate_per_km = 0.20

[[variable_costs]]
id = "maintenance"
name = "Maintenance"
rate_per_km = 0.15

[[variable_costs]]
id = "retired"
name = "Retired"
rate_per_km = 9.0
active = false

[[fixed_costs]]
id = "salary"
name = "Salary"
monthly_amount = 3000.0

[[tolls]]
id = "anchieta"
route_id = "santos"
amount = 45.0

[[parameters]]
diesel_price_per_liter = 5.50
average_speed_kmh = 60.0

[[parameters]]
diesel_price_per_liter = 6.00
owner = "nospeed"

[[trips]]
id = "t1"
vehicle_id = "truck"
route_id = "santos"
start_date = "2024-03-01"
end_date = "2024-03-02"
weight_tons = 10.0
revenue = 2000.0

[[trips]]
id = "t2"
vehicle_id = "broken"
route_id = "santos"
start_date = "2024-03-05"
end_date = "2024-03-06"

[[trips]]
id = "t3"
vehicle_id = "ghost"
route_id = "santos"
start_date = "2024-03-07"
end_date = "2024-03-08"

[[trips]]
id = "t4"
vehicle_id = "truck"
route_id = "timed"
start_date = "2024-03-01"
end_date = "2024-03-01"
owner = "nospeed"

[[simulations]]
id = "s1"
base_trip_id = "t1"
diesel_price_per_liter = 6.0
extra_tolls = 20.0

[[simulations]]
id = "s2"
base_trip_id = "t1"
deliveries_on_route = 5
"#;

    fn repo() -> FileCatalogRepository {
        FileCatalogRepository::from_loader(CatalogLoader::load_from_str(CATALOG).unwrap())
    }

    #[test]
    fn test_pairing_matches_reference_scenario() {
        let estimate = estimate_pairing(
            &repo(),
            &Session::default(),
            "truck",
            "santos",
            &PairingOptions::new().with_deliveries(10),
        )
        .unwrap();

        let r = &estimate.result;
        assert!((r.fuel_consumption_liters - 166.667).abs() < 1e-3);
        assert!((r.variable_cost - 175.0).abs() < 1e-9);
        assert!((r.toll_cost - 45.0).abs() < 1e-9);
        assert!((r.daily_fixed_cost_share - 100.0).abs() < 1e-9);
        assert!((r.total_cost - 1236.667).abs() < 1e-3);
        assert!((r.cost_per_delivery.unwrap() - 123.667).abs() < 1e-3);
        assert_eq!(estimate.route_label, "São Paulo → Santos");
    }

    #[test]
    fn test_pairing_with_cargo_and_price_override() {
        let options = PairingOptions::new()
            .with_cargo("steel".to_string())
            .with_diesel_price(0.0);
        let estimate =
            estimate_pairing(&repo(), &Session::default(), "truck", "santos", &options).unwrap();

        assert_eq!(estimate.result.fuel_cost, 0.0);
        assert!(estimate.kpis.cost_per_kg.is_some());
        assert!(estimate.kpis.cost_per_ton_km.is_some());
        assert!(estimate.result.cost_per_delivery.is_none());
    }

    #[test]
    fn test_pairing_maintenance_only_uses_vehicle_rate() {
        let options = PairingOptions::new().with_maintenance_only();
        let estimate =
            estimate_pairing(&repo(), &Session::default(), "truck", "santos", &options).unwrap();

        assert_eq!(estimate.input.variable_cost_rates, vec![0.85]);
        let r = &estimate.result;
        assert!((r.variable_cost - 425.0).abs() < 1e-9);
        assert_eq!(r.toll_cost, 0.0);
        assert_eq!(r.daily_fixed_cost_share, 0.0);
        assert!((r.total_cost - (r.fuel_cost + 425.0)).abs() < 1e-9);
    }

    #[test]
    fn test_pairing_unknown_records() {
        let err = estimate_pairing(
            &repo(),
            &Session::default(),
            "ghost",
            "santos",
            &PairingOptions::new(),
        )
        .unwrap_err();
        assert!(matches!(err, CostServiceError::NotFound(_)));
        assert!(err.to_string().contains("ghost"));

        let err = estimate_pairing(
            &repo(),
            &Session::new("nobody"),
            "truck",
            "santos",
            &PairingOptions::new(),
        )
        .unwrap_err();
        assert!(matches!(err, CostServiceError::NotFound(_)));
    }

    #[test]
    fn test_speed_fallbacks() {
        let session = Session::new("nospeed").with_default_speed(45.0);

        // route baseline: 100 km in 2.5 h
        let timed = estimate_pairing(&repo(), &session, "truck", "timed", &PairingOptions::new())
            .unwrap();
        assert!((timed.input.average_speed_kmh - 40.0).abs() < 1e-9);

        let plain = estimate_pairing(&repo(), &session, "truck", "plain", &PairingOptions::new())
            .unwrap();
        assert_eq!(plain.input.average_speed_kmh, 45.0);
        assert!((plain.result.estimated_time_hours - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_trip_estimate_has_kpis() {
        let estimate = estimate_trip(&repo(), &Session::default(), "t1").unwrap();
        match &estimate.outcome {
            TripOutcome::Estimated { result, kpis } => {
                assert!(result.cost_per_delivery.is_none());
                assert!(kpis.cost_per_ton_km.is_some());
                assert!(kpis.margin_pct.unwrap() > 0.0);
            }
            TripOutcome::Rejected { reason } => panic!("unexpected rejection: {}", reason),
        }
    }

    #[test]
    fn test_same_day_trip_is_estimated() {
        let estimate = estimate_trip(&repo(), &Session::new("nospeed"), "t4").unwrap();
        match &estimate.outcome {
            TripOutcome::Estimated { result, .. } => assert!(result.total_cost > 0.0),
            TripOutcome::Rejected { reason } => panic!("unexpected rejection: {}", reason),
        }
    }

    #[test]
    fn test_trip_with_zero_consumption_rejected() {
        let err = estimate_trip(&repo(), &Session::default(), "t2").unwrap_err();
        assert!(matches!(err, CostServiceError::InvalidInput(_)));
        assert!(err.to_string().contains("km_per_liter"));
    }

    #[test]
    fn test_all_trips_records_rejections() {
        let estimates = estimate_all_trips(&repo(), &Session::default()).unwrap();
        assert_eq!(estimates.len(), 3);
        assert!(!estimates[0].is_rejected());
        assert!(estimates[1].is_rejected());
        assert!(estimates[2].is_rejected());
        assert_eq!(estimates[2].distance_km, 500.0);
    }

    #[test]
    fn test_simulation_merges_overrides() {
        let run = run_simulation(&repo(), &Session::default(), "s1", &SimulationOverrides::default())
            .unwrap();
        assert_eq!(run.simulated.input.diesel_price_per_liter, 6.0);
        assert_eq!(run.simulated.input.toll_amounts, vec![45.0, 20.0]);
        assert!(run.simulated.result.cost_per_delivery.is_some());
        assert!(run.total_cost_delta() > 0.0);

        let extra = SimulationOverrides {
            diesel_price_per_liter: Some(5.0),
            ..Default::default()
        };
        let run = run_simulation(&repo(), &Session::default(), "s1", &extra).unwrap();
        assert_eq!(run.simulated.input.diesel_price_per_liter, 5.0);
    }

    #[test]
    fn test_zero_extra_override_keeps_stored_value() {
        let extra = SimulationOverrides {
            deliveries_on_route: Some(0),
            diesel_price_per_liter: Some(0.0),
            ..Default::default()
        };
        let run = run_simulation(&repo(), &Session::default(), "s2", &extra).unwrap();
        assert_eq!(run.simulated.input.deliveries_on_route, Some(5));
        assert_eq!(run.simulated.input.diesel_price_per_liter, 5.5);
    }

    #[test]
    fn test_simulation_negative_override_rejected() {
        let extra = SimulationOverrides {
            km_per_liter: Some(-2.0),
            ..Default::default()
        };
        let err = run_simulation(&repo(), &Session::default(), "s1", &extra).unwrap_err();
        assert!(matches!(err, CostServiceError::InvalidInput(_)));
    }

    #[test]
    fn test_batch_rows_independent() {
        let rows = vec![
            LabelledInput {
                label: "ok".to_string(),
                input: CostInput::new(100.0, 4.0, 5.0, 50.0),
            },
            LabelledInput {
                label: "no speed".to_string(),
                input: CostInput::new(100.0, 4.0, 5.0, 0.0),
            },
        ];
        let estimates = estimate_batch(&rows);
        assert_eq!(estimates.len(), 2);
        assert!(matches!(estimates[0].outcome, TripOutcome::Estimated { .. }));
        assert!(matches!(estimates[1].outcome, TripOutcome::Rejected { .. }));
    }
}
