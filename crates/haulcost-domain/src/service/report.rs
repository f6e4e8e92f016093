//! Fleet-wide trip cost summary and text report

use serde::{Deserialize, Serialize};

use crate::service::estimator::CostResult;
use crate::service::kpi::CostKpis;

/// Estimate outcome for one trip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum TripOutcome {
    Estimated { result: CostResult, kpis: CostKpis },
    Rejected { reason: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripEstimate {
    pub trip_id: String,
    pub vehicle_id: String,
    pub route_label: String,
    pub distance_km: f64,
    #[serde(flatten)]
    pub outcome: TripOutcome,
}

impl TripEstimate {
    pub fn result(&self) -> Option<&CostResult> {
        match &self.outcome {
            TripOutcome::Estimated { result, .. } => Some(result),
            TripOutcome::Rejected { .. } => None,
        }
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self.outcome, TripOutcome::Rejected { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FleetSummary {
    pub trip_count: usize,
    pub estimated_count: usize,
    pub rejected_count: usize,
    pub total_distance_km: f64,
    pub total_cost: f64,
    pub total_fuel_liters: f64,
    pub total_hours: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_cost_per_km: Option<f64>,
}

/// Totals over the estimated trips; rejected trips are only counted
pub fn summarize_trips(estimates: &[TripEstimate]) -> FleetSummary {
    let mut summary = FleetSummary {
        trip_count: estimates.len(),
        estimated_count: 0,
        rejected_count: 0,
        total_distance_km: 0.0,
        total_cost: 0.0,
        total_fuel_liters: 0.0,
        total_hours: 0.0,
        average_cost_per_km: None,
    };

    for estimate in estimates {
        match estimate.result() {
            Some(result) => {
                summary.estimated_count += 1;
                summary.total_distance_km += estimate.distance_km;
                summary.total_cost += result.total_cost;
                summary.total_fuel_liters += result.fuel_consumption_liters;
                summary.total_hours += result.estimated_time_hours;
            }
            None => summary.rejected_count += 1,
        }
    }

    if summary.total_distance_km > 0.0 {
        summary.average_cost_per_km = Some(summary.total_cost / summary.total_distance_km);
    }
    summary
}

pub fn generate_trip_report(estimates: &[TripEstimate], currency: &str) -> String {
    let summary = summarize_trips(estimates);

    let mut report = String::new();
    report.push_str("==================================================\n");
    report.push_str("               Trip Cost Report                    \n");
    report.push_str("==================================================\n\n");
    report.push_str("[Summary]\n");
    report.push_str(&format!("  Trips:              {}\n", summary.trip_count));
    report.push_str(&format!("  Estimated:          {}\n", summary.estimated_count));
    report.push_str(&format!("  Rejected:           {}\n", summary.rejected_count));
    report.push_str(&format!("  Total distance:     {:.1} km\n", summary.total_distance_km));
    report.push_str(&format!("  Total fuel:         {:.1} L\n", summary.total_fuel_liters));
    report.push_str(&format!("  Total time:         {:.1} h\n", summary.total_hours));
    report.push_str(&format!("  Total cost:         {} {:.2}\n", currency, summary.total_cost));
    if let Some(avg) = summary.average_cost_per_km {
        report.push_str(&format!("  Avg cost per km:    {} {:.2}\n", currency, avg));
    }
    report.push('\n');

    if summary.estimated_count > 0 {
        report.push_str("[Trips]\n");
        report.push_str("-".repeat(78).as_str());
        report.push('\n');
        report.push_str(&format!(
            "{:<10} {:<24} {:>9} {:>11} {:>11} {:>8}\n",
            "Trip", "Route", "Km", "Total", "Per km", "Hours"
        ));
        report.push_str("-".repeat(78).as_str());
        report.push('\n');
        for estimate in estimates {
            if let TripOutcome::Estimated { result, kpis } = &estimate.outcome {
                report.push_str(&format!(
                    "{:<10} {:<24} {:>9.1} {:>11.2} {:>11.2} {:>8.2}\n",
                    truncate_str(&estimate.trip_id, 9),
                    truncate_str(&estimate.route_label, 23),
                    estimate.distance_km,
                    result.total_cost,
                    kpis.cost_per_km,
                    result.estimated_time_hours
                ));
            }
        }
        report.push('\n');
    }

    if summary.rejected_count > 0 {
        report.push_str("[Rejected]\n");
        report.push_str("-".repeat(50).as_str());
        report.push('\n');
        for estimate in estimates {
            if let TripOutcome::Rejected { reason } = &estimate.outcome {
                report.push_str(&format!(
                    "{:<10} {}\n",
                    truncate_str(&estimate.trip_id, 9),
                    reason
                ));
            }
        }
        report.push('\n');
    }

    report.push_str("==================================================\n");
    report
}

fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() > max_len {
        let truncated: String = s.chars().take(max_len.saturating_sub(2)).collect();
        format!("{}..", truncated)
    } else {
        s.to_string()
    }
}
