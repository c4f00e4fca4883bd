//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::map::Projection;
use crate::vehicle::Vehicle;

/// Navigator - plan, route and simulate trips between world cities.
#[derive(Debug, Parser)]
#[command(name = "navigator")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// City data CSV file (overrides the config file)
    #[arg(short, long, global = true, env = "NAVIGATOR_DATA")]
    pub data: Option<PathBuf>,

    /// Path to config file (overrides ./navigator.yml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Whether the chosen command drives the interactive menus.
    pub fn is_interactive(&self) -> bool {
        matches!(self.command, None | Some(Commands::Interactive))
    }
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Open the interactive menus (default if no command specified)
    Interactive,

    /// Find the fastest route between two cities for a vehicle
    Route(RouteArgs),

    /// Find the fastest vehicle for a trip
    Fastest(FastestArgs),

    /// Export a trip map as SVG
    Map(MapArgs),

    /// Search the city data
    Cities(CitiesArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `route` command.
#[derive(Debug, Clone, clap::Args)]
pub struct RouteArgs {
    /// Vehicle spec: car:SPEED, dinghy:IN_COUNTRY:BETWEEN_CAPITALS or trolley:HOURS:MAX_KM
    #[arg(long)]
    pub vehicle: Vehicle,

    /// Departure city search term
    #[arg(long)]
    pub from: String,

    /// Arrival city search term
    #[arg(long)]
    pub to: String,

    /// Print the route as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `fastest` command.
#[derive(Debug, Clone, clap::Args)]
pub struct FastestArgs {
    /// Cities of the trip, in order
    #[arg(required = true, num_args = 1..)]
    pub cities: Vec<String>,

    /// Vehicle spec to compare (repeatable; defaults to the configured fleet)
    #[arg(long = "vehicle")]
    pub vehicles: Vec<Vehicle>,
}

/// Arguments for the `map` command.
#[derive(Debug, Clone, clap::Args)]
pub struct MapArgs {
    /// Cities of the trip, in order
    #[arg(required = true, num_args = 1..)]
    pub cities: Vec<String>,

    /// Output directory (defaults to map.output_dir from the config)
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Map projection: merc or cyl
    #[arg(long)]
    pub projection: Option<Projection>,
}

/// Arguments for the `cities` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CitiesArgs {
    /// Search term, matched against "Name (ISO)"
    pub term: String,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
