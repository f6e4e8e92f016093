//! Domain services

pub mod estimator;
pub mod kpi;
pub mod report;
pub mod simulation;
pub mod validation;

pub use estimator::{estimate_cost, CostInput, CostResult, PRORATION_DAYS};
pub use kpi::{compute_kpis, CostKpis, KpiBasis};
pub use report::{generate_trip_report, summarize_trips, FleetSummary, TripEstimate, TripOutcome};
pub use simulation::{apply_overrides, simulate, SimulationOutcome};
pub use validation::{
    ensure_finite, validate_cost_input, validate_trip, InputError, TripValidationError,
};
