//! Derived indicators for a cost result

use haulcost_types::EfficiencyRating;
use serde::{Deserialize, Serialize};

use crate::service::estimator::CostResult;

/// Optional figures that unlock extra indicators
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct KpiBasis {
    /// Load carried on the trip
    pub weight_tons: Option<f64>,
    /// Freight revenue of the trip
    pub revenue: Option<f64>,
    /// Weight of the selected cargo item
    pub cargo_weight_kg: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostKpis {
    pub cost_per_km: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_per_ton_km: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_per_kg: Option<f64>,
    /// Profit margin in percent of revenue
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_pct: Option<f64>,
    pub efficiency: EfficiencyRating,
}

fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v > 0.0)
}

pub fn compute_kpis(result: &CostResult, distance_km: f64, basis: &KpiBasis) -> CostKpis {
    let total = result.total_cost;
    let cost_per_km = total / distance_km;

    CostKpis {
        cost_per_km,
        cost_per_ton_km: positive(basis.weight_tons).map(|w| total / (w * distance_km)),
        cost_per_kg: positive(basis.cargo_weight_kg).map(|kg| total / kg),
        margin_pct: positive(basis.revenue).map(|r| (r - total) / r * 100.0),
        efficiency: EfficiencyRating::from_cost_per_km(cost_per_km),
    }
}
