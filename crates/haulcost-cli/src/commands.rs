//! Command handlers

use crate::cli::{CatalogKind, Cli, Commands};
use crate::output::{
    output_batch, output_cost_result, output_pairing, output_records, output_simulation,
    output_trip, output_trips,
};
use haulcost_app::app::{self, CostServiceError, PairingOptions};
use haulcost_app::config::Config;
use haulcost_app::repository::{open_catalog_repo, open_catalog_repo_at};
use haulcost_app::session::Session;
use haulcost_domain::model::{SimulationOverrides, Toll};
use haulcost_domain::repository::{
    CargoRepository, CostCatalogRepository, ParametersRepository, RouteRepository,
    SimulationRepository, TollRepository, TripRepository, VehicleRepository,
};
use haulcost_domain::service::CostInput;
use haulcost_infra::estimate_csv::load_estimate_inputs_from_csv;
use haulcost_infra::persistence::FileCatalogRepository;
use haulcost_types::{Error, OutputFormat, Result};
use serde::Serialize;
use std::path::PathBuf;
use tracing::debug;

const DEFAULT_CURRENCY: &str = "BRL";

fn service_error(e: CostServiceError) -> Error {
    Error::EstimationFailed(e.to_string())
}

/// Everything a catalog-backed command needs
struct Context {
    repo: FileCatalogRepository,
    session: Session,
    format: OutputFormat,
}

impl Context {
    fn open(cli: &Cli, config: &Config) -> Result<Self> {
        let repo = match &cli.catalog {
            Some(path) => open_catalog_repo_at(path.clone())?,
            None => open_catalog_repo(config)?,
        };
        debug!(records = repo.record_count(), "catalog opened");
        Ok(Self {
            repo,
            session: Session::from_config(config),
            format: cli.format.unwrap_or(config.output_format),
        })
    }

    fn owner(&self) -> &str {
        self.session.owner()
    }

    fn currency(&self) -> Result<String> {
        Ok(self
            .repo
            .find_parameters(self.owner())?
            .map(|p| p.currency)
            .unwrap_or_else(|| DEFAULT_CURRENCY.to_string()))
    }
}

pub fn execute(cli: Cli) -> Result<()> {
    // Load config
    let mut config = Config::load()?;

    // Override from CLI args
    if let Some(ref owner) = cli.owner {
        config.owner = owner.clone();
    }
    let output_format = cli.format.unwrap_or(config.output_format);

    match &cli.command {
        Commands::Estimate {
            distance,
            km_per_liter,
            diesel_price,
            speed,
            rates,
            tolls,
            fixed_costs,
            deliveries,
        } => {
            let speed =
                speed.unwrap_or(Session::from_config(&config).default_average_speed_kmh);
            let mut input = CostInput::new(*distance, *km_per_liter, *diesel_price, speed)
                .with_variable_rates(rates.clone())
                .with_tolls(tolls.clone())
                .with_fixed_costs(fixed_costs.clone());
            input.deliveries_on_route = *deliveries;
            cmd_estimate(&input, output_format)
        }
        Commands::Batch { csv } => cmd_batch(csv.clone(), output_format),
        Commands::Pairing {
            vehicle,
            route,
            deliveries,
            cargo,
            diesel_price,
            maintenance_only,
        } => {
            let ctx = Context::open(&cli, &config)?;
            let options = PairingOptions {
                deliveries: *deliveries,
                cargo_id: cargo.clone(),
                diesel_price_per_liter: *diesel_price,
                maintenance_only: *maintenance_only,
            };
            cmd_pairing(&ctx, vehicle, route, &options)
        }
        Commands::Trip { id } => {
            let ctx = Context::open(&cli, &config)?;
            cmd_trip(&ctx, id)
        }
        Commands::Trips => {
            let ctx = Context::open(&cli, &config)?;
            cmd_trips(&ctx)
        }
        Commands::Simulate {
            id,
            diesel_price,
            km_per_liter,
            speed,
            deliveries,
            extra_rate,
            extra_tolls,
        } => {
            let ctx = Context::open(&cli, &config)?;
            let overrides = SimulationOverrides {
                diesel_price_per_liter: *diesel_price,
                km_per_liter: *km_per_liter,
                average_speed_kmh: *speed,
                deliveries_on_route: *deliveries,
                extra_variable_cost_per_km: *extra_rate,
                extra_tolls: *extra_tolls,
            };
            cmd_simulate(&ctx, id, &overrides)
        }
        Commands::Catalog { kind } => {
            let ctx = Context::open(&cli, &config)?;
            cmd_catalog(&ctx, *kind)
        }
        Commands::Config {
            show,
            set_catalog,
            set_owner,
            set_output,
            set_speed,
            reset,
        } => cmd_config(
            *show,
            set_catalog.clone(),
            set_owner.clone(),
            *set_output,
            *set_speed,
            *reset,
        ),
    }
}

fn cmd_estimate(input: &CostInput, output_format: OutputFormat) -> Result<()> {
    let result = app::estimate_input(input).map_err(service_error)?;
    output_cost_result(output_format, &result, DEFAULT_CURRENCY)
}

fn cmd_batch(csv: PathBuf, output_format: OutputFormat) -> Result<()> {
    let inputs = load_estimate_inputs_from_csv(&csv)?;
    let estimates = app::estimate_batch(&inputs);
    output_batch(output_format, &estimates, DEFAULT_CURRENCY)
}

fn cmd_pairing(ctx: &Context, vehicle: &str, route: &str, options: &PairingOptions) -> Result<()> {
    let estimate = app::estimate_pairing(&ctx.repo, &ctx.session, vehicle, route, options)
        .map_err(service_error)?;
    output_pairing(ctx.format, &estimate, &ctx.currency()?)
}

fn cmd_trip(ctx: &Context, id: &str) -> Result<()> {
    let estimate = app::estimate_trip(&ctx.repo, &ctx.session, id).map_err(service_error)?;
    output_trip(ctx.format, &estimate, &ctx.currency()?)
}

fn cmd_trips(ctx: &Context) -> Result<()> {
    let estimates = app::estimate_all_trips(&ctx.repo, &ctx.session).map_err(service_error)?;
    output_trips(ctx.format, &estimates, &ctx.currency()?)
}

fn cmd_simulate(ctx: &Context, id: &str, overrides: &SimulationOverrides) -> Result<()> {
    let run = app::run_simulation(&ctx.repo, &ctx.session, id, overrides).map_err(service_error)?;
    output_simulation(ctx.format, &run, &ctx.currency()?)
}

/// Variable and fixed costs listed together
#[derive(Serialize)]
struct CostLine {
    id: String,
    name: String,
    kind: &'static str,
    amount: f64,
    active: bool,
}

fn cmd_catalog(ctx: &Context, kind: CatalogKind) -> Result<()> {
    let owner = ctx.owner();
    let format = ctx.format;

    match kind {
        CatalogKind::Vehicles => output_records(
            format,
            "Vehicles",
            &ctx.repo.all_vehicles(owner)?,
            &format!(
                "{:<12} {:<14} {:>9} {:>9} {:<12}",
                "ID", "Kind", "Cap (t)", "km/L", "Status"
            ),
            |v| {
                format!(
                    "{:<12} {:<14} {:>9.1} {:>9.2} {:<12}",
                    v.id,
                    v.kind,
                    v.capacity_tons,
                    v.km_per_liter,
                    v.status.label()
                )
            },
        ),
        CatalogKind::Routes => output_records(
            format,
            "Routes",
            &ctx.repo.all_routes(owner)?,
            &format!("{:<12} {:<36} {:>9}", "ID", "Route", "Km"),
            |r| format!("{:<12} {:<36} {:>9.1}", r.id, r.label(), r.distance_km),
        ),
        CatalogKind::Cargo => output_records(
            format,
            "Cargo",
            &ctx.repo.all_cargo(owner)?,
            &format!("{:<12} {:<24} {:>10} {:>12}", "ID", "Name", "Kg", "Value"),
            |c| format!("{:<12} {:<24} {:>10.1} {:>12.2}", c.id, c.name, c.weight_kg, c.value),
        ),
        CatalogKind::Costs => {
            let mut lines: Vec<CostLine> = ctx
                .repo
                .variable_costs(owner)?
                .into_iter()
                .map(|c| CostLine {
                    id: c.id,
                    name: c.name,
                    kind: "per_km",
                    amount: c.rate_per_km,
                    active: c.active,
                })
                .collect();
            lines.extend(ctx.repo.fixed_costs(owner)?.into_iter().map(|c| CostLine {
                id: c.id,
                name: c.name,
                kind: "monthly",
                amount: c.monthly_amount,
                active: c.active,
            }));
            output_records(
                format,
                "Costs",
                &lines,
                &format!(
                    "{:<12} {:<24} {:<8} {:>10} {:<6}",
                    "ID", "Name", "Kind", "Amount", "Active"
                ),
                |c| {
                    format!(
                        "{:<12} {:<24} {:<8} {:>10.2} {:<6}",
                        c.id,
                        c.name,
                        c.kind,
                        c.amount,
                        if c.active { "yes" } else { "no" }
                    )
                },
            )
        }
        CatalogKind::Tolls => {
            let mut tolls: Vec<Toll> = Vec::new();
            for route in ctx.repo.all_routes(owner)? {
                tolls.extend(ctx.repo.tolls_for_route(owner, &route.id)?);
            }
            output_records(
                format,
                "Tolls",
                &tolls,
                &format!("{:<12} {:<12} {:<24} {:>10}", "ID", "Route", "Description", "Amount"),
                |t| {
                    format!(
                        "{:<12} {:<12} {:<24} {:>10.2}",
                        t.id, t.route_id, t.description, t.amount
                    )
                },
            )
        }
        CatalogKind::Trips => output_records(
            format,
            "Trips",
            &ctx.repo.all_trips(owner)?,
            &format!(
                "{:<10} {:<10} {:<12} {:<10} {:<10} {:<12}",
                "ID", "Vehicle", "Route", "Start", "End", "Status"
            ),
            |t| {
                format!(
                    "{:<10} {:<10} {:<12} {:<10} {:<10} {:<12}",
                    t.id,
                    t.vehicle_id,
                    t.route_id,
                    t.start_date,
                    t.end_date,
                    t.status.label()
                )
            },
        ),
        CatalogKind::Simulations => output_records(
            format,
            "Simulations",
            &ctx.repo.all_simulations(owner)?,
            &format!("{:<10} {:<10} {:<40}", "ID", "Trip", "Description"),
            |s| {
                format!(
                    "{:<10} {:<10} {:<40}",
                    s.id,
                    s.base_trip_id,
                    s.description.as_deref().unwrap_or("-")
                )
            },
        ),
    }
}

fn cmd_config(
    show: bool,
    set_catalog: Option<PathBuf>,
    set_owner: Option<String>,
    set_output: Option<OutputFormat>,
    set_speed: Option<f64>,
    reset: bool,
) -> Result<()> {
    if reset {
        let config = Config::default();
        config.save()?;
        println!("Configuration reset to defaults");
        println!("\n{}", config);
        return Ok(());
    }

    let mut config = Config::load()?;
    let mut modified = false;

    if let Some(catalog) = set_catalog {
        config.catalog_path = Some(catalog);
        modified = true;
    }

    if let Some(owner) = set_owner {
        config.owner = owner;
        modified = true;
    }

    if let Some(output_format) = set_output {
        config.output_format = output_format;
        modified = true;
    }

    if let Some(speed) = set_speed {
        config.default_average_speed_kmh = speed;
        modified = true;
    }

    if modified {
        config.save()?;
        println!("Configuration updated");
    }

    if show || !modified {
        println!("{}", config);
    }

    Ok(())
}
