use serde::{Deserialize, Serialize};

/// What-if adjustments applied on top of a trip's inputs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationOverrides {
    #[serde(default)]
    pub diesel_price_per_liter: Option<f64>,
    #[serde(default)]
    pub km_per_liter: Option<f64>,
    #[serde(default)]
    pub average_speed_kmh: Option<f64>,
    #[serde(default)]
    pub deliveries_on_route: Option<u32>,
    /// Added to the summed per-km rate
    #[serde(default)]
    pub extra_variable_cost_per_km: Option<f64>,
    /// Added to the route's toll total
    #[serde(default)]
    pub extra_tolls: Option<f64>,
}

/// Zero and NaN count as unset
fn given(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v != 0.0 && !v.is_nan())
}

impl SimulationOverrides {
    /// Overlay `other` on `self`; values set in `other` win, zeros in `other`
    /// leave `self` untouched
    pub fn merged_with(&self, other: &SimulationOverrides) -> SimulationOverrides {
        SimulationOverrides {
            diesel_price_per_liter: given(other.diesel_price_per_liter)
                .or(self.diesel_price_per_liter),
            km_per_liter: given(other.km_per_liter).or(self.km_per_liter),
            average_speed_kmh: given(other.average_speed_kmh).or(self.average_speed_kmh),
            deliveries_on_route: other
                .deliveries_on_route
                .filter(|d| *d > 0)
                .or(self.deliveries_on_route),
            extra_variable_cost_per_km: given(other.extra_variable_cost_per_km)
                .or(self.extra_variable_cost_per_km),
            extra_tolls: given(other.extra_tolls).or(self.extra_tolls),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Simulation {
    pub id: String,
    pub base_trip_id: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(flatten)]
    pub overrides: SimulationOverrides,
    #[serde(default = "super::default_owner")]
    pub owner: String,
}
