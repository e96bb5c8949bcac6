//! Extract command - find the supplier named in a single narration.

use chrono::NaiveDate;
use clap::Args;
use console::style;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use supplink_core::{
    extract_document_number, ErrorJournal, ExtractionCandidate, FailureRecord, NarrationContext,
    SupplierExtractor,
};

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Narration text
    #[arg(required = true)]
    narration: String,

    /// Movement date (YYYY-MM-DD)
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Movement amount
    #[arg(long, allow_hyphen_values = true)]
    amount: Option<Decimal>,

    /// Document reference of the row
    #[arg(long)]
    document: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// Plain text summary
    Text,
}

#[derive(Serialize)]
struct ExtractOutput {
    ignored: bool,
    candidate: Option<ExtractionCandidate>,
    document_number: String,
    failure: Option<FailureRecord>,
}

pub fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = super::load_config(config_path)?;
    let extractor = SupplierExtractor::from_config(&config.extraction);
    let mut journal = ErrorJournal::with_excerpt_len(config.extraction.journal_excerpt_len);

    let mut context = NarrationContext::new();
    context.date = args.date;
    context.amount = args.amount;
    context.document = args.document.clone();

    let candidate = extractor.extract(&args.narration, Some(&context), &mut journal);
    let output = ExtractOutput {
        ignored: candidate.is_none() && journal.is_empty(),
        document_number: extract_document_number(&args.narration),
        failure: journal.records().first().cloned(),
        candidate,
    };
    debug!("Extraction finished, ignored: {}", output.ignored);

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&output)?),
        OutputFormat::Text => print_text(&output, &journal),
    }

    Ok(())
}

fn print_text(output: &ExtractOutput, journal: &ErrorJournal) {
    if output.ignored {
        println!("{} Narration ignored (not a supplier reference)", style("ℹ").blue());
        return;
    }

    match &output.candidate {
        Some(candidate) => {
            println!("{} {}", style("✓").green(), style(&candidate.name).bold());
            println!("  Type:       {}", candidate.entity_type);
            println!("  Rule:       {}", candidate.rule);
            println!("  Confidence: {:.2}", candidate.confidence);
            if !candidate.document.is_empty() {
                println!("  Document:   {}", candidate.document);
            }
            if let Some(tax_id) = &candidate.tax_id {
                println!("  Tax ID:     {}", tax_id);
            }
        }
        None => {
            println!("{} No supplier extracted", style("✗").red());
            println!();
            print!("{}", journal.report());
        }
    }

    if !output.document_number.is_empty() {
        println!("  Document number: {}", output.document_number);
    }
}
