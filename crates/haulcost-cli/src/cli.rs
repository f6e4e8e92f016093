//! CLI definition using clap

use clap::{Parser, Subcommand, ValueEnum};
use haulcost_types::OutputFormat;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "haulcost")]
#[command(author = "yuuji")]
#[command(version)]
#[command(about = "Road freight trip cost estimation from a fleet catalog")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Catalog TOML file. Uses config value if not specified.
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    /// Owner whose records are used. Uses config value if not specified.
    #[arg(long, global = true)]
    pub owner: Option<String>,

    /// Output format (json, table). Uses config value if not specified.
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

/// Record kinds listed by `catalog`
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum CatalogKind {
    Vehicles,
    Routes,
    Cargo,
    Costs,
    Tolls,
    Trips,
    Simulations,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Estimate a trip from numbers given on the command line
    Estimate {
        /// Trip distance in km
        #[arg(long, short = 'd')]
        distance: f64,

        /// Vehicle consumption in km per litre
        #[arg(long)]
        km_per_liter: f64,

        /// Diesel price per litre
        #[arg(long)]
        diesel_price: f64,

        /// Average speed in km/h. Uses config value if not specified.
        #[arg(long)]
        speed: Option<f64>,

        /// Per-km variable cost rate (repeatable)
        #[arg(long = "rate")]
        rates: Vec<f64>,

        /// Toll amount (repeatable)
        #[arg(long = "toll")]
        tolls: Vec<f64>,

        /// Monthly fixed cost (repeatable)
        #[arg(long = "fixed")]
        fixed_costs: Vec<f64>,

        /// Deliveries made along the route
        #[arg(long)]
        deliveries: Option<u32>,
    },

    /// Estimate every row of a CSV file
    Batch {
        /// CSV with label, distance_km, km_per_liter, diesel_price_per_liter,
        /// average_speed_kmh, variable_rates, tolls, fixed_costs, deliveries
        csv: PathBuf,
    },

    /// Estimate a vehicle running a route from the catalog
    Pairing {
        /// Vehicle id
        #[arg(long)]
        vehicle: String,

        /// Route id
        #[arg(long)]
        route: String,

        /// Deliveries made along the route
        #[arg(long)]
        deliveries: Option<u32>,

        /// Cargo id for per-kg figures
        #[arg(long)]
        cargo: Option<String>,

        /// Diesel price per litre instead of the catalog parameter
        #[arg(long)]
        diesel_price: Option<f64>,

        /// Fuel plus the vehicle's maintenance rate only
        #[arg(long)]
        maintenance_only: bool,
    },

    /// Recalculate the cost of a stored trip
    Trip {
        /// Trip id
        id: String,
    },

    /// Cost report over every trip
    Trips,

    /// Run a saved simulation, optionally with further overrides
    Simulate {
        /// Simulation id
        id: String,

        /// Diesel price per litre
        #[arg(long)]
        diesel_price: Option<f64>,

        /// Vehicle consumption in km per litre
        #[arg(long)]
        km_per_liter: Option<f64>,

        /// Average speed in km/h
        #[arg(long)]
        speed: Option<f64>,

        /// Deliveries made along the route
        #[arg(long)]
        deliveries: Option<u32>,

        /// Extra per-km cost
        #[arg(long)]
        extra_rate: Option<f64>,

        /// Extra toll amount
        #[arg(long)]
        extra_tolls: Option<f64>,
    },

    /// List catalog records
    Catalog {
        /// Record kind
        #[arg(value_enum)]
        kind: CatalogKind,
    },

    /// Manage configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Set catalog file
        #[arg(long)]
        set_catalog: Option<PathBuf>,

        /// Set owner
        #[arg(long)]
        set_owner: Option<String>,

        /// Set default output format
        #[arg(long)]
        set_output: Option<OutputFormat>,

        /// Set default average speed in km/h
        #[arg(long)]
        set_speed: Option<f64>,

        /// Reset to default configuration
        #[arg(long)]
        reset: bool,
    },
}
