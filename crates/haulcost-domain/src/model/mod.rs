//! Domain model types

pub mod cargo;
pub mod cost;
pub mod parameters;
pub mod route;
pub mod simulation;
pub mod trip;
pub mod vehicle;

pub use cargo::Cargo;
pub use cost::{FixedCost, Toll, VariableCost};
pub use parameters::GlobalParameters;
pub use route::Route;
pub use simulation::{Simulation, SimulationOverrides};
pub use trip::Trip;
pub use vehicle::Vehicle;

/// Owner assigned to records that do not name one
pub const DEFAULT_OWNER: &str = "default";

pub(crate) fn default_owner() -> String {
    DEFAULT_OWNER.to_string()
}
