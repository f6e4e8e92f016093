//! Trip cost estimation
//!
//! Single pass over the inputs, in this order: fuel litres, fuel cost,
//! variable costs, tolls, prorated fixed costs, total, time, cost per
//! delivery. Inputs are not validated here; a zero divisor shows up as an
//! infinite or NaN field that the caller must reject (see
//! [`crate::service::validation`]).

use serde::{Deserialize, Serialize};

/// Days a monthly fixed cost is spread over
pub const PRORATION_DAYS: f64 = 30.0;

/// Numbers needed to cost one trip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostInput {
    pub distance_km: f64,
    pub km_per_liter: f64,
    pub diesel_price_per_liter: f64,
    pub average_speed_kmh: f64,
    /// Per-km rates of the applicable variable costs
    #[serde(default)]
    pub variable_cost_rates: Vec<f64>,
    /// Flat toll charges on the route
    #[serde(default)]
    pub toll_amounts: Vec<f64>,
    /// Monthly amounts of the applicable fixed costs
    #[serde(default)]
    pub monthly_fixed_costs: Vec<f64>,
    #[serde(default)]
    pub deliveries_on_route: Option<u32>,
}

impl CostInput {
    /// Input with empty cost catalogs and no delivery count
    pub fn new(
        distance_km: f64,
        km_per_liter: f64,
        diesel_price_per_liter: f64,
        average_speed_kmh: f64,
    ) -> Self {
        Self {
            distance_km,
            km_per_liter,
            diesel_price_per_liter,
            average_speed_kmh,
            variable_cost_rates: Vec::new(),
            toll_amounts: Vec::new(),
            monthly_fixed_costs: Vec::new(),
            deliveries_on_route: None,
        }
    }

    pub fn with_variable_rates(mut self, rates: Vec<f64>) -> Self {
        self.variable_cost_rates = rates;
        self
    }

    pub fn with_tolls(mut self, tolls: Vec<f64>) -> Self {
        self.toll_amounts = tolls;
        self
    }

    pub fn with_fixed_costs(mut self, monthly: Vec<f64>) -> Self {
        self.monthly_fixed_costs = monthly;
        self
    }

    pub fn with_deliveries(mut self, deliveries: u32) -> Self {
        self.deliveries_on_route = Some(deliveries);
        self
    }
}

/// Cost and time breakdown for one trip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostResult {
    pub fuel_consumption_liters: f64,
    pub fuel_cost: f64,
    pub variable_cost: f64,
    pub toll_cost: f64,
    pub daily_fixed_cost_share: f64,
    pub total_cost: f64,
    /// Absent unless a non-zero delivery count was supplied
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_per_delivery: Option<f64>,
    pub estimated_time_hours: f64,
}

impl CostResult {
    /// Named numeric fields, in calculation order
    pub fn fields(&self) -> Vec<(&'static str, f64)> {
        let mut fields = vec![
            ("fuel_consumption_liters", self.fuel_consumption_liters),
            ("fuel_cost", self.fuel_cost),
            ("variable_cost", self.variable_cost),
            ("toll_cost", self.toll_cost),
            ("daily_fixed_cost_share", self.daily_fixed_cost_share),
            ("total_cost", self.total_cost),
        ];
        if let Some(per_delivery) = self.cost_per_delivery {
            fields.push(("cost_per_delivery", per_delivery));
        }
        fields.push(("estimated_time_hours", self.estimated_time_hours));
        fields
    }

    /// Names of the fields holding infinity or NaN
    pub fn non_finite_fields(&self) -> Vec<&'static str> {
        self.fields()
            .into_iter()
            .filter(|(_, v)| !v.is_finite())
            .map(|(name, _)| name)
            .collect()
    }

    pub fn is_finite(&self) -> bool {
        self.non_finite_fields().is_empty()
    }
}

fn sum(values: &[f64]) -> f64 {
    values.iter().fold(0.0, |acc, v| acc + v)
}

/// Estimate the cost breakdown of a trip
pub fn estimate_cost(input: &CostInput) -> CostResult {
    let fuel_consumption_liters = input.distance_km / input.km_per_liter;
    let fuel_cost = fuel_consumption_liters * input.diesel_price_per_liter;

    // Rates are summed first so the aggregate is scaled by distance once.
    let variable_cost = sum(&input.variable_cost_rates) * input.distance_km;
    let toll_cost = sum(&input.toll_amounts);
    let daily_fixed_cost_share = sum(&input.monthly_fixed_costs) / PRORATION_DAYS;

    let total_cost = fuel_cost + variable_cost + toll_cost + daily_fixed_cost_share;
    let estimated_time_hours = input.distance_km / input.average_speed_kmh;

    let cost_per_delivery = input
        .deliveries_on_route
        .filter(|&n| n > 0)
        .map(|n| total_cost / f64::from(n));

    CostResult {
        fuel_consumption_liters,
        fuel_cost,
        variable_cost,
        toll_cost,
        daily_fixed_cost_share,
        total_cost,
        cost_per_delivery,
        estimated_time_hours,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_input() -> CostInput {
        CostInput::new(500.0, 3.0, 5.50, 60.0)
            .with_variable_rates(vec![0.20, 0.15])
            .with_tolls(vec![45.00])
            .with_fixed_costs(vec![3000.0])
            .with_deliveries(10)
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn test_reference_scenario() {
        let r = estimate_cost(&reference_input());
        assert!(approx(r.fuel_consumption_liters, 166.667));
        assert!(approx(r.fuel_cost, 916.667));
        assert!(approx(r.variable_cost, 175.0));
        assert!(approx(r.toll_cost, 45.0));
        assert!(approx(r.daily_fixed_cost_share, 100.0));
        assert!(approx(r.total_cost, 1236.667));
        assert!(approx(r.cost_per_delivery.unwrap(), 123.667));
        assert!(approx(r.estimated_time_hours, 8.333));
    }

    #[test]
    fn test_total_is_exact_sum_of_components() {
        let inputs = vec![
            reference_input(),
            CostInput::new(137.3, 7.1, 6.19, 48.0)
                .with_variable_rates(vec![0.013, 0.37, 0.0004])
                .with_tolls(vec![12.1, 7.35, 3.3])
                .with_fixed_costs(vec![1234.56, 99.99]),
            CostInput::new(0.1, 12.0, 0.0, 90.0),
        ];
        for input in inputs {
            let r = estimate_cost(&input);
            assert_eq!(
                r.total_cost,
                r.fuel_cost + r.variable_cost + r.toll_cost + r.daily_fixed_cost_share
            );
        }
    }

    #[test]
    fn test_doubling_distance() {
        let base = reference_input();
        let mut doubled = base.clone();
        doubled.distance_km *= 2.0;

        let a = estimate_cost(&base);
        let b = estimate_cost(&doubled);
        assert_eq!(b.fuel_consumption_liters, 2.0 * a.fuel_consumption_liters);
        assert_eq!(b.fuel_cost, 2.0 * a.fuel_cost);
        assert_eq!(b.variable_cost, 2.0 * a.variable_cost);
        assert_eq!(b.estimated_time_hours, 2.0 * a.estimated_time_hours);
        assert_eq!(b.toll_cost, a.toll_cost);
        assert_eq!(b.daily_fixed_cost_share, a.daily_fixed_cost_share);
    }

    #[test]
    fn test_empty_catalogs_total_is_fuel_cost() {
        let r = estimate_cost(&CostInput::new(320.0, 2.8, 6.09, 55.0));
        assert_eq!(r.variable_cost, 0.0);
        assert_eq!(r.toll_cost, 0.0);
        assert_eq!(r.daily_fixed_cost_share, 0.0);
        assert_eq!(r.total_cost, r.fuel_cost);
    }

    #[test]
    fn test_proration_divides_by_thirty() {
        let monthly = vec![1500.0, 2750.5, 0.0, 13.37];
        let r = estimate_cost(&CostInput::new(10.0, 5.0, 1.0, 50.0).with_fixed_costs(monthly.clone()));
        let expected = monthly.iter().fold(0.0, |acc, v| acc + v) / 30.0;
        assert_eq!(r.daily_fixed_cost_share, expected);
    }

    #[test]
    fn test_rates_summed_before_scaling() {
        let r = estimate_cost(&CostInput::new(250.0, 5.0, 0.0, 50.0).with_variable_rates(vec![0.1, 0.3]));
        assert_eq!(r.variable_cost, (0.1 + 0.3) * 250.0);
    }

    #[test]
    fn test_cost_per_delivery_presence() {
        let without = estimate_cost(&CostInput::new(100.0, 4.0, 5.0, 50.0));
        assert!(without.cost_per_delivery.is_none());

        let zero = estimate_cost(&CostInput::new(100.0, 4.0, 5.0, 50.0).with_deliveries(0));
        assert!(zero.cost_per_delivery.is_none());

        let four = estimate_cost(&CostInput::new(100.0, 4.0, 5.0, 50.0).with_deliveries(4));
        assert_eq!(four.cost_per_delivery, Some(four.total_cost / 4.0));
    }

    #[test]
    fn test_zero_km_per_liter_is_infinite() {
        let r = estimate_cost(&CostInput::new(500.0, 0.0, 5.5, 60.0));
        assert!(r.fuel_consumption_liters.is_infinite());
        assert!(!r.is_finite());
        assert!(r.non_finite_fields().contains(&"fuel_consumption_liters"));
        assert!(r.non_finite_fields().contains(&"total_cost"));
    }

    #[test]
    fn test_zero_speed_flags_time_only() {
        let r = estimate_cost(&CostInput::new(500.0, 3.0, 5.5, 0.0));
        assert_eq!(r.non_finite_fields(), vec!["estimated_time_hours"]);
    }

    #[test]
    fn test_cost_per_delivery_omitted_from_json() {
        let r = estimate_cost(&CostInput::new(100.0, 4.0, 5.0, 50.0));
        let json = serde_json::to_string(&r).unwrap();
        assert!(!json.contains("cost_per_delivery"));
    }
}
