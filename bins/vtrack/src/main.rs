//! vtrack - VatavaranTrack command line
//!
//! Ranks drop-off zones, draws routes, and reports the impact of collected waste.

use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use vatavaran_core::config::Config;
use vatavaran_core::error::exit_codes;
use vatavaran_core::session::Role;
use vatavaran_geo::Coordinate;

mod commands;

use commands::{geo, impact, route, session, zones, Context};

/// Waste collection helper for VatavaranTrack staff
#[derive(Parser)]
#[command(name = "vtrack")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format (text, json)
    #[arg(short, long, global = true, default_value = "text")]
    format: String,

    /// Configuration file (defaults to .vatavaran.toml lookup)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Distance between two points
    Distance {
        #[arg(allow_negative_numbers = true)]
        lat1: f64,
        #[arg(allow_negative_numbers = true)]
        lng1: f64,
        #[arg(allow_negative_numbers = true)]
        lat2: f64,
        #[arg(allow_negative_numbers = true)]
        lng2: f64,
    },

    /// List drop-off zones, closest first
    Zones {
        /// Current latitude (fallback location if omitted)
        #[arg(long, allow_negative_numbers = true, requires = "lng")]
        lat: Option<f64>,

        /// Current longitude (fallback location if omitted)
        #[arg(long, allow_negative_numbers = true, requires = "lat")]
        lng: Option<f64>,

        /// Maximum zones to show
        #[arg(short = 'n', long)]
        limit: Option<usize>,

        /// Only zones within this many kilometers
        #[arg(short, long)]
        radius: Option<f64>,

        /// Only this kind of zone (dump, recycling)
        #[arg(short, long)]
        kind: Option<String>,

        /// Only zones accepting this waste category
        #[arg(short, long)]
        accepts: Option<String>,
    },

    /// Route from the current position to a zone
    Route {
        /// Zone ID
        zone: i64,

        /// Current latitude (fallback location if omitted)
        #[arg(long, allow_negative_numbers = true, requires = "lng")]
        lat: Option<f64>,

        /// Current longitude (fallback location if omitted)
        #[arg(long, allow_negative_numbers = true, requires = "lat")]
        lng: Option<f64>,
    },

    /// Bounding box of a set of points
    Bounds {
        /// Points as LAT,LNG
        #[arg(allow_hyphen_values = true, value_parser = parse_point)]
        points: Vec<Coordinate>,
    },

    /// Impact of a single pickup
    Impact {
        /// Waste category (Plastic, Organic, Paper, E-Waste, Metal, Glass, Clothes, ...)
        category: String,

        /// Weight in kilograms
        weight: f64,
    },

    /// Impact totals for a JSON file of pickups
    Totals {
        /// File containing `[{"category": ..., "weight": ...}, ...]`
        file: PathBuf,
    },

    /// Review counts, category split and staff leaderboard for a JSON file of pickups
    Stats {
        /// File containing `[{"category": ..., "weight": ..., "status": ..., "staffId": ...}, ...]`
        file: PathBuf,
    },

    /// Manage the saved login session
    Session {
        /// Session file (defaults to the user data directory)
        #[arg(long)]
        file: Option<PathBuf>,

        #[command(subcommand)]
        action: SessionAction,
    },
}

#[derive(Subcommand)]
enum SessionAction {
    /// Save a session issued by the backend
    Login {
        /// Access token
        #[arg(long)]
        token: String,

        /// Display name
        #[arg(long)]
        name: String,

        /// Role (staff, supervisor, admin)
        #[arg(long, value_parser = parse_role)]
        role: Role,
    },

    /// Forget the saved session
    Logout,

    /// Show the saved session
    Status,

    /// Check whether the saved session may open a page for the given roles
    Check {
        /// Allowed roles (any role when none given)
        #[arg(value_parser = parse_role)]
        allow: Vec<Role>,
    },
}

fn parse_point(s: &str) -> Result<Coordinate, String> {
    let (lat, lng) = s
        .split_once(',')
        .ok_or_else(|| format!("expected LAT,LNG, got {:?}", s))?;
    let lat: f64 = lat.trim().parse().map_err(|_| format!("invalid latitude {:?}", lat))?;
    let lng: f64 = lng.trim().parse().map_err(|_| format!("invalid longitude {:?}", lng))?;
    Coordinate::try_new(lat, lng).map_err(|e| e.to_string())
}

fn parse_role(s: &str) -> Result<Role, String> {
    match s.to_ascii_lowercase().as_str() {
        "staff" => Ok(Role::Staff),
        "supervisor" => Ok(Role::Supervisor),
        "admin" => Ok(Role::Admin),
        _ => Err(format!("unknown role {:?} (staff, supervisor, admin)", s)),
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("vtrack=debug,vatavaran_core=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::load(cli.config.as_deref())?;
    let ctx = Context::new(config, &cli.format);

    match cli.command {
        Commands::Distance { lat1, lng1, lat2, lng2 } => geo::distance(&ctx, (lat1, lng1), (lat2, lng2)),

        Commands::Zones { lat, lng, limit, radius, kind, accepts } => {
            let filter = zones::ZoneFilter { limit, radius, kind, accepts };
            zones::run(&ctx, lat.zip(lng), &filter)
        }

        Commands::Route { zone, lat, lng } => route::run(&ctx, zone, lat.zip(lng)),

        Commands::Bounds { points } => geo::bounds(&ctx, &points),

        Commands::Impact { category, weight } => impact::single(&ctx, &category, weight),

        Commands::Totals { file } => impact::totals(&ctx, &file),

        Commands::Stats { file } => impact::stats(&ctx, &file),

        Commands::Session { file, action } => {
            let store = session::open_store(file)?;
            match action {
                SessionAction::Login { token, name, role } => session::login(&ctx, &store, token, name, role),
                SessionAction::Logout => session::logout(&ctx, &store),
                SessionAction::Status => session::status(&ctx, &store),
                SessionAction::Check { allow } => session::check(&ctx, &store, &allow),
            }
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            let code = e
                .downcast_ref::<vatavaran_core::Error>()
                .map(|err| exit_codes::for_code(err.code))
                .unwrap_or(exit_codes::FAILURE);
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}
