//! # quire
//!
//! Build-time tooling for TSX component libraries.
//!
//! ## Name Origin
//!
//! A **quire** is a gathering of folded sheets, the unit a book is bound
//! from. This tool gathers a component library's loose sheets (source
//! files, barrel exports, hand-written metadata) and binds them into one
//! documentation artifact per component, keeping the sources' public type
//! naming in sync along the way.

mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "quire")]
#[command(about = "Build-time API documentation and codemod toolkit for TSX component libraries", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate component API documentation artifacts
    Api(commands::api::ApiArgs),

    /// Apply a type-promotion request file
    Promote(commands::promote::PromoteArgs),
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Api(args) => commands::api::run(args),
        Commands::Promote(args) => commands::promote::run(args),
    }
}
