//! CLI application for supplier extraction from accounting narrations.

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{batch, config, extract, suggest};

/// Supplier extraction - link accounting narrations to supplier records
#[derive(Parser)]
#[command(name = "supplink")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract the supplier from a single narration
    Extract(extract::ExtractArgs),

    /// Import narrations from CSV files into the supplier store
    Batch(batch::BatchArgs),

    /// Suggest existing suppliers similar to a name
    Suggest(suggest::SuggestArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Extract(args) => extract::run(args, config_path),
        Commands::Batch(args) => batch::run(args, config_path),
        Commands::Suggest(args) => suggest::run(args, config_path),
        Commands::Config(args) => config::run(args, config_path),
    }
}
