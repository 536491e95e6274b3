//! Mech Forge - Development Tools

use std::path::Path;

use clap::{Parser, Subcommand, ValueEnum};
use mech_core::catalog::ComponentCatalog;
use mech_core::components::EngineType;
use mech_core::tech_base::TechBase;
use mech_tools::lookup::{armor_plan, engine_summary, heat_row};
use mech_tools::validate::validate_data_directory;
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "mech-tools")]
#[command(about = "Development tools for Mech Forge construction rules")]
struct Cli {
    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate equipment data files
    Validate {
        /// Path to a data directory or a single file
        #[arg(default_value = "assets/data")]
        path: String,
    },
    /// Look up engine rating, weight and slots
    Engine {
        /// Unit tonnage
        #[arg(long)]
        tonnage: u32,
        /// Walking MP
        #[arg(long)]
        walk: u32,
        /// Engine type
        #[arg(long, value_enum, default_value_t = EngineArg::Standard)]
        engine: EngineArg,
        /// Tech base tag, e.g. "IS" or "Clan"
        #[arg(long, default_value = "IS")]
        tech_base: String,
    },
    /// Look up the heat scale
    Heat {
        /// Current heat
        value: u32,
    },
    /// Spread armor points with the optimizer
    Armor {
        /// Armor points to spread
        #[arg(long)]
        points: u32,
        /// Unit tonnage
        #[arg(long)]
        tonnage: u32,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum EngineArg {
    Standard,
    Xl,
    Light,
    Xxl,
    Compact,
    Ice,
    FuelCell,
    Fission,
}

impl From<EngineArg> for EngineType {
    fn from(arg: EngineArg) -> Self {
        match arg {
            EngineArg::Standard => EngineType::Standard,
            EngineArg::Xl => EngineType::ExtraLight,
            EngineArg::Light => EngineType::Light,
            EngineArg::Xxl => EngineType::ExtraExtraLight,
            EngineArg::Compact => EngineType::Compact,
            EngineArg::Ice => EngineType::InternalCombustion,
            EngineArg::FuelCell => EngineType::FuelCell,
            EngineArg::Fission => EngineType::Fission,
        }
    }
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{text}"),
        Err(e) => {
            tracing::error!("Failed to encode output: {e}");
            std::process::exit(1);
        }
    }
}

fn fail(message: impl std::fmt::Display) -> ! {
    tracing::error!("{message}");
    std::process::exit(1);
}

fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { path } => {
            tracing::info!("Validating data files in: {path}");
            let report = validate_data_directory(Path::new(&path))
                .unwrap_or_else(|e| fail(format!("Validation failed: {e}")));
            if cli.json {
                print_json(&report);
            } else {
                for file in &report.files {
                    println!("{}: {} entries", file.source_name, file.entries);
                    for issue in &file.issues {
                        println!("  {issue}");
                    }
                }
                for duplicate in &report.duplicates {
                    println!(
                        "'{}' defined in both {} and {}",
                        duplicate.id, duplicate.first, duplicate.second
                    );
                }
            }
            if report.is_clean() {
                tracing::info!("Validation passed");
            } else {
                fail(format!("Validation found {} problem(s)", report.problem_count()));
            }
        }
        Commands::Engine {
            tonnage,
            walk,
            engine,
            tech_base,
        } => {
            let catalog = ComponentCatalog::standard();
            let summary = engine_summary(&catalog, tonnage, walk, engine.into(), TechBase::from_tag(&tech_base))
                .unwrap_or_else(|e| fail(e));
            if cli.json {
                print_json(&summary);
            } else {
                println!(
                    "{} {} rating {}: {} t, {} CT / {} per side torso, {} integral heat sinks (gyro {} t)",
                    summary.tech_base,
                    summary.engine,
                    summary.rating,
                    summary.weight,
                    summary.center_slots,
                    summary.side_slots,
                    summary.integral_heat_sinks,
                    summary.gyro_weight
                );
            }
        }
        Commands::Heat { value } => {
            let row = heat_row(value);
            if cli.json {
                print_json(&row);
            } else {
                println!(
                    "heat {value}: movement {}, to-hit +{}, shutdown {}, ammo explosion {}",
                    row.movement_penalty,
                    row.to_hit_penalty,
                    describe_roll(row.shutdown_roll),
                    describe_roll(row.ammo_explosion_roll)
                );
            }
        }
        Commands::Armor { points, tonnage } => {
            let plan = armor_plan(points, tonnage).unwrap_or_else(|e| fail(e));
            if cli.json {
                print_json(&plan);
            } else {
                println!("{} of {} points ({} max)", plan.allocated, plan.requested, plan.maximum);
                for row in &plan.locations {
                    println!("  {:>2}: {:>3} / {:>2}", row.location, row.front, row.rear);
                }
            }
        }
    }
}

fn describe_roll(roll: Option<u8>) -> String {
    match roll {
        None => "none".to_string(),
        Some(0) => "automatic".to_string(),
        Some(target) => format!("avoid on {target}+"),
    }
}
