//! Suggest command - rank stored suppliers by similarity to a name.

use std::path::PathBuf;

use clap::Args;
use console::style;
use serde::Serialize;

use supplink_core::{InMemoryStore, Supplier, SupplierResolver};

/// Arguments for the suggest command.
#[derive(Args)]
pub struct SuggestArgs {
    /// Supplier name to look up
    #[arg(required = true)]
    name: String,

    /// Supplier store file (default: from configuration)
    #[arg(short, long)]
    store: Option<PathBuf>,

    /// Minimum similarity score (default: from configuration)
    #[arg(long)]
    min_score: Option<f64>,

    /// Maximum number of suggestions (default: from configuration)
    #[arg(short, long)]
    limit: Option<usize>,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct Suggestion<'a> {
    code: &'a str,
    name: &'a str,
    score: f64,
}

#[derive(Serialize)]
struct SuggestOutput<'a> {
    exact: Option<&'a Supplier>,
    suggestions: Vec<Suggestion<'a>>,
}

pub fn run(args: SuggestArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = super::load_config(config_path)?;

    let store_path = args.store.clone().unwrap_or_else(|| config.store.path.clone());
    if !store_path.exists() {
        anyhow::bail!("Supplier store not found: {}", store_path.display());
    }
    let store = InMemoryStore::load(&store_path)?;

    let min_score = args.min_score.unwrap_or(config.resolver.suggestion_threshold);
    let limit = args.limit.unwrap_or(config.resolver.suggestion_limit);
    if !(0.0..=1.0).contains(&min_score) {
        anyhow::bail!("--min-score must be between 0 and 1, got {}", min_score);
    }

    let resolver = SupplierResolver::with_config(store, config.resolver.clone());
    let exact = resolver.find_exact(&args.name)?;
    let ranked = resolver.suggest(&args.name, min_score, limit)?;

    if args.json {
        let output = SuggestOutput {
            exact: exact.as_ref(),
            suggestions: ranked
                .iter()
                .map(|(supplier, score)| Suggestion {
                    code: &supplier.code,
                    name: &supplier.name,
                    score: *score,
                })
                .collect(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if let Some(supplier) = &exact {
        println!(
            "{} Exact match: {} {}",
            style("✓").green(),
            supplier.code,
            style(&supplier.name).bold()
        );
    }

    if ranked.is_empty() {
        println!("{} No similar suppliers above {:.2}", style("ℹ").blue(), min_score);
        return Ok(());
    }

    println!("Suggestions:");
    for (supplier, score) in &ranked {
        println!("  {:.2}  {:<12} {}", score, supplier.code, supplier.name);
    }

    Ok(())
}
