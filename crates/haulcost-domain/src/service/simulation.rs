//! What-if runs on top of a trip's cost inputs

use serde::{Deserialize, Serialize};

use crate::model::SimulationOverrides;
use crate::service::estimator::{estimate_cost, CostInput, CostResult};
use crate::service::kpi::{compute_kpis, CostKpis, KpiBasis};

/// Input actually used, its breakdown, and indicators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationOutcome {
    pub input: CostInput,
    pub result: CostResult,
    pub kpis: CostKpis,
}

/// Zero and NaN overrides fall back to the base value
fn set(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v != 0.0 && !v.is_nan())
}

/// Build the simulated input from a base input and overrides
///
/// Deliveries default to one so a simulation always reports a cost per
/// delivery.
pub fn apply_overrides(base: &CostInput, overrides: &SimulationOverrides) -> CostInput {
    let mut input = base.clone();

    if let Some(price) = set(overrides.diesel_price_per_liter) {
        input.diesel_price_per_liter = price;
    }
    if let Some(kmpl) = set(overrides.km_per_liter) {
        input.km_per_liter = kmpl;
    }
    if let Some(speed) = set(overrides.average_speed_kmh) {
        input.average_speed_kmh = speed;
    }
    if let Some(extra) = overrides.extra_variable_cost_per_km {
        input.variable_cost_rates.push(extra);
    }
    if let Some(extra) = overrides.extra_tolls {
        input.toll_amounts.push(extra);
    }

    input.deliveries_on_route = overrides
        .deliveries_on_route
        .filter(|&n| n > 0)
        .or(base.deliveries_on_route.filter(|&n| n > 0))
        .or(Some(1));

    input
}

/// Apply overrides, estimate, and attach indicators
pub fn simulate(base: &CostInput, overrides: &SimulationOverrides, basis: &KpiBasis) -> SimulationOutcome {
    let input = apply_overrides(base, overrides);
    let result = estimate_cost(&input);
    let kpis = compute_kpis(&result, input.distance_km, basis);
    SimulationOutcome { input, result, kpis }
}
