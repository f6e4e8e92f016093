//! Output formatting module

use chrono::{DateTime, Utc};
use haulcost_app::app::{BatchEstimate, PairingEstimate, SimulationRun};
use haulcost_domain::service::{
    generate_trip_report, summarize_trips, CostKpis, CostResult, FleetSummary, TripEstimate,
    TripOutcome,
};
use haulcost_types::{OutputFormat, Result};
use serde::Serialize;

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let content = serde_json::to_string_pretty(value)?;
    println!("{}", content);
    Ok(())
}

fn print_breakdown(result: &CostResult, currency: &str) {
    println!("Fuel:            {:.3} L", result.fuel_consumption_liters);
    println!("Fuel cost:       {} {:.2}", currency, result.fuel_cost);
    println!("Variable cost:   {} {:.2}", currency, result.variable_cost);
    println!("Tolls:           {} {:.2}", currency, result.toll_cost);
    println!("Fixed (daily):   {} {:.2}", currency, result.daily_fixed_cost_share);
    println!("-------------------------");
    println!("Total:           {} {:.2}", currency, result.total_cost);
    if let Some(per_delivery) = result.cost_per_delivery {
        println!("Per delivery:    {} {:.2}", currency, per_delivery);
    }
    println!("Time:            {:.2} h", result.estimated_time_hours);
}

fn print_kpis(kpis: &CostKpis, currency: &str) {
    println!("\n--- Indicators ---");
    println!("Cost per km:     {} {:.2}", currency, kpis.cost_per_km);
    if let Some(v) = kpis.cost_per_ton_km {
        println!("Cost per t·km:   {} {:.4}", currency, v);
    }
    if let Some(v) = kpis.cost_per_kg {
        println!("Cost per kg:     {} {:.4}", currency, v);
    }
    if let Some(v) = kpis.margin_pct {
        println!("Margin:          {:.1}%", v);
    }
    println!(
        "Efficiency:      {} ({})",
        kpis.efficiency.label(),
        kpis.efficiency.advice()
    );
}

pub fn output_cost_result(format: OutputFormat, result: &CostResult, currency: &str) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(result);
    }
    println!("\nCost Estimate");
    println!("=============");
    print_breakdown(result, currency);
    Ok(())
}

pub fn output_pairing(format: OutputFormat, estimate: &PairingEstimate, currency: &str) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(estimate);
    }
    println!("\nPairing Estimate");
    println!("================");
    println!("Vehicle:         {}", estimate.vehicle_id);
    println!("Route:           {} ({:.1} km)", estimate.route_label, estimate.input.distance_km);
    if let Some(ref cargo) = estimate.cargo_id {
        println!("Cargo:           {}", cargo);
    }
    println!();
    print_breakdown(&estimate.result, currency);
    print_kpis(&estimate.kpis, currency);
    Ok(())
}

pub fn output_trip(format: OutputFormat, estimate: &TripEstimate, currency: &str) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(estimate);
    }
    println!("\nTrip {}", estimate.trip_id);
    println!("==========");
    println!("Vehicle:         {}", estimate.vehicle_id);
    println!("Route:           {} ({:.1} km)", estimate.route_label, estimate.distance_km);
    println!();
    match &estimate.outcome {
        TripOutcome::Estimated { result, kpis } => {
            print_breakdown(result, currency);
            print_kpis(kpis, currency);
        }
        TripOutcome::Rejected { reason } => println!("Rejected:        {}", reason),
    }
    Ok(())
}

#[derive(Serialize)]
struct TripsReport<'a> {
    generated_at: DateTime<Utc>,
    currency: &'a str,
    summary: FleetSummary,
    trips: &'a [TripEstimate],
}

pub fn output_trips(format: OutputFormat, estimates: &[TripEstimate], currency: &str) -> Result<()> {
    let generated_at = Utc::now();
    if format == OutputFormat::Json {
        return print_json(&TripsReport {
            generated_at,
            currency,
            summary: summarize_trips(estimates),
            trips: estimates,
        });
    }
    print!("{}", generate_trip_report(estimates, currency));
    println!("Generated: {}", generated_at.format("%Y-%m-%d %H:%M:%S UTC"));
    Ok(())
}

pub fn output_simulation(format: OutputFormat, run: &SimulationRun, currency: &str) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(run);
    }
    let base = &run.base_result;
    let sim = &run.simulated.result;

    println!("\nSimulation {} (trip {})", run.simulation_id, run.base_trip_id);
    println!("==============================");
    println!("{:<16} {:>12} {:>12}", "", "Base", "Simulated");
    let rows = [
        ("Fuel (L)", base.fuel_consumption_liters, sim.fuel_consumption_liters),
        ("Fuel cost", base.fuel_cost, sim.fuel_cost),
        ("Variable cost", base.variable_cost, sim.variable_cost),
        ("Tolls", base.toll_cost, sim.toll_cost),
        ("Fixed (daily)", base.daily_fixed_cost_share, sim.daily_fixed_cost_share),
        ("Total", base.total_cost, sim.total_cost),
        ("Time (h)", base.estimated_time_hours, sim.estimated_time_hours),
    ];
    for (name, b, s) in rows {
        println!("{:<16} {:>12.2} {:>12.2}", name, b, s);
    }
    if let Some(per_delivery) = sim.cost_per_delivery {
        println!("{:<16} {:>12} {:>12.2}", "Per delivery", "-", per_delivery);
    }
    println!();
    println!("Difference:      {} {:+.2}", currency, run.total_cost_delta());
    print_kpis(&run.simulated.kpis, currency);
    Ok(())
}

pub fn output_batch(format: OutputFormat, estimates: &[BatchEstimate], currency: &str) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(estimates);
    }
    println!("\nBatch Estimate ({} rows)", estimates.len());
    println!("{}", "-".repeat(72));
    println!(
        "{:<20} {:>9} {:>12} {:>12} {:>12}",
        "Label", "Km", "Total", "Per km", "Hours"
    );
    println!("{}", "-".repeat(72));
    for estimate in estimates {
        match &estimate.outcome {
            TripOutcome::Estimated { result, kpis } => println!(
                "{:<20} {:>9.1} {:>12.2} {:>12.2} {:>12.2}",
                estimate.label,
                estimate.distance_km,
                result.total_cost,
                kpis.cost_per_km,
                result.estimated_time_hours
            ),
            TripOutcome::Rejected { reason } => {
                println!("{:<20} rejected: {}", estimate.label, reason)
            }
        }
    }
    let total: f64 = estimates
        .iter()
        .filter_map(|e| match &e.outcome {
            TripOutcome::Estimated { result, .. } => Some(result.total_cost),
            TripOutcome::Rejected { .. } => None,
        })
        .sum();
    println!("{}", "-".repeat(72));
    println!("Total: {} {:.2}", currency, total);
    Ok(())
}

/// Print catalog records as JSON or as pre-formatted table lines
pub fn output_records<T: Serialize>(
    format: OutputFormat,
    title: &str,
    records: &[T],
    header: &str,
    line: impl Fn(&T) -> String,
) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(records);
    }
    println!("\n{} ({})", title, records.len());
    println!("{}", "-".repeat(header.chars().count().max(40)));
    println!("{}", header);
    println!("{}", "-".repeat(header.chars().count().max(40)));
    for record in records {
        println!("{}", line(record));
    }
    Ok(())
}
