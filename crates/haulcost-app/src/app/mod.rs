//! Application use cases

pub mod cost_service;

pub use cost_service::{
    estimate_all_trips, estimate_batch, estimate_input, estimate_pairing, estimate_trip,
    run_simulation, BatchEstimate, CostServiceError, PairingEstimate, PairingOptions,
    SimulationRun,
};
