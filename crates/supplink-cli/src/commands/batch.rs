//! Batch command - import narrations from CSV files.
//!
//! Each CSV has a header row with the columns `narration,date,amount,document`;
//! only `narration` is required.

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Instant;

use chrono::NaiveDate;
use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use rust_decimal::Decimal;
use tracing::{debug, error, warn};

use supplink_core::{ImportSession, InMemoryStore, NarrationContext, Supplier};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input CSV files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Supplier store file (default: from configuration)
    #[arg(short, long)]
    store: Option<PathBuf>,

    /// Do not write the store back
    #[arg(long)]
    dry_run: bool,

    /// Write a per-row summary CSV
    #[arg(long)]
    summary: Option<PathBuf>,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

/// One input row.
#[derive(Debug)]
struct NarrationRow {
    narration: String,
    date: Option<String>,
    amount: Option<String>,
    document: Option<String>,
    /// False when the narration bytes were not valid UTF-8; `narration`
    /// then holds a lossy decoding.
    readable: bool,
}

/// Positions of the known columns in a header row.
struct Columns {
    narration: usize,
    date: Option<usize>,
    amount: Option<usize>,
    document: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &csv::ByteRecord) -> anyhow::Result<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| String::from_utf8_lossy(h).trim().eq_ignore_ascii_case(name))
        };
        let Some(narration) = find("narration") else {
            anyhow::bail!("missing 'narration' column");
        };
        Ok(Self {
            narration,
            date: find("date"),
            amount: find("amount"),
            document: find("document"),
        })
    }

    fn row(&self, record: &csv::ByteRecord) -> NarrationRow {
        let text = |idx: Option<usize>| {
            idx.and_then(|i| record.get(i))
                .and_then(|field| std::str::from_utf8(field).ok())
                .map(str::to_string)
        };
        let raw = record.get(self.narration).unwrap_or_default();
        let (narration, readable) = match std::str::from_utf8(raw) {
            Ok(narration) => (narration.to_string(), true),
            Err(_) => (String::from_utf8_lossy(raw).into_owned(), false),
        };
        NarrationRow {
            narration,
            date: text(self.date),
            amount: text(self.amount),
            document: text(self.document),
            readable,
        }
    }
}

/// Outcome of a single row.
struct RowResult {
    source: String,
    line: usize,
    narration: String,
    supplier: Option<Supplier>,
    error: Option<String>,
}

pub fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = super::load_config(config_path)?;

    // Expand glob pattern
    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            p.extension()
                .and_then(|e| e.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    let mut rows = Vec::new();
    for path in &files {
        match read_rows(path) {
            Ok(file_rows) => rows.extend(file_rows),
            Err(e) if args.continue_on_error => {
                warn!("Failed to read {}: {}", path.display(), e);
            }
            Err(e) => {
                error!("Failed to read {}: {}", path.display(), e);
                anyhow::bail!("Reading {} failed: {}", path.display(), e);
            }
        }
    }

    println!(
        "{} Found {} narrations in {} files",
        style("ℹ").blue(),
        rows.len(),
        files.len()
    );

    let store_path = args.store.clone().unwrap_or_else(|| config.store.path.clone());
    let store = InMemoryStore::load(&store_path)?;
    let initial_count = store.len();
    let mut session = ImportSession::from_config(store, &config);

    let pb = ProgressBar::new(rows.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} rows")?
            .progress_chars("=>-"),
    );

    let mut results = Vec::with_capacity(rows.len());
    for (source, line, row) in rows {
        let context = row_context(&row);

        if !row.readable {
            warn!("Row {}:{} is not valid UTF-8", source, line);
            session.record_malformed(&row.narration, Some(&context));
            results.push(RowResult {
                source,
                line,
                narration: row.narration,
                supplier: None,
                error: None,
            });
            pb.inc(1);
            continue;
        }

        let result = match session.process(&row.narration, Some(&context)) {
            Ok(supplier) => RowResult {
                source,
                line,
                narration: row.narration,
                supplier,
                error: None,
            },
            Err(e) if args.continue_on_error => {
                warn!("Row {}:{} failed: {}", source, line, e);
                RowResult {
                    source,
                    line,
                    narration: row.narration,
                    supplier: None,
                    error: Some(e.to_string()),
                }
            }
            Err(e) => {
                pb.abandon();
                error!("Row {}:{} failed: {}", source, line, e);
                anyhow::bail!("Processing failed: {}", e);
            }
        };

        results.push(result);
        pb.inc(1);
    }

    pb.finish_with_message("Complete");

    let report = session.report();
    let failures = session.errors().len();
    let store = session.into_resolver().into_store();
    let created = store.len() - initial_count;

    if args.dry_run {
        debug!("Dry run, store not written");
    } else {
        store.save(&store_path)?;
        debug!("Wrote {} suppliers to {}", store.len(), store_path.display());
    }

    if let Some(summary_path) = &args.summary {
        write_summary(summary_path, &results)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    let resolved = results.iter().filter(|r| r.supplier.is_some()).count();
    let errors = results.iter().filter(|r| r.error.is_some()).count();

    println!();
    println!(
        "{} Processed {} narrations in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} resolved ({} new suppliers), {} unresolved, {} errors",
        style(resolved).green(),
        created,
        style(failures).yellow(),
        style(errors).red()
    );
    if args.dry_run {
        println!("   {}", style("dry run: store not written").yellow());
    }

    if failures > 0 {
        println!();
        print!("{}", report);
    }

    Ok(())
}

fn read_rows(path: &Path) -> anyhow::Result<Vec<(String, usize, NarrationRow)>> {
    let source = path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_string();

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)?;

    let columns = Columns::from_headers(reader.byte_headers()?)?;

    // Undecodable fields are kept per row, so one bad row never drops the file.
    let mut rows = Vec::new();
    for (idx, record) in reader.byte_records().enumerate() {
        // header is line 1
        rows.push((source.clone(), idx + 2, columns.row(&record?)));
    }
    Ok(rows)
}

fn row_context(row: &NarrationRow) -> NarrationContext {
    let mut context = NarrationContext::new();
    context.date = row.date.as_deref().and_then(parse_date);
    context.amount = row.amount.as_deref().and_then(parse_amount);
    context.document = row.document.clone().filter(|d| !d.is_empty());
    context
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    let parsed = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(value, "%d/%m/%Y"))
        .ok();
    if parsed.is_none() {
        warn!("Unrecognized date: {}", value);
    }
    parsed
}

/// Accepts `1234.56` and the Brazilian `1.234,56`.
fn parse_amount(value: &str) -> Option<Decimal> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    let parsed = Decimal::from_str(value).ok().or_else(|| {
        let normalized = value.replace('.', "").replace(',', ".");
        Decimal::from_str(&normalized).ok()
    });
    if parsed.is_none() {
        warn!("Unrecognized amount: {}", value);
    }
    parsed
}

fn write_summary(path: &Path, results: &[RowResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "source",
        "line",
        "status",
        "supplier_code",
        "supplier_name",
        "narration",
        "error",
    ])?;

    for result in results {
        let line = result.line.to_string();
        match (&result.supplier, &result.error) {
            (Some(supplier), _) => wtr.write_record([
                result.source.as_str(),
                &line,
                "resolved",
                &supplier.code,
                &supplier.name,
                &result.narration,
                "",
            ])?,
            (None, Some(error)) => wtr.write_record([
                result.source.as_str(),
                &line,
                "error",
                "",
                "",
                &result.narration,
                error,
            ])?,
            (None, None) => wtr.write_record([
                result.source.as_str(),
                &line,
                "unresolved",
                "",
                "",
                &result.narration,
                "",
            ])?,
        }
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount_formats() {
        assert_eq!(parse_amount("1234.56"), Some(Decimal::new(123456, 2)));
        assert_eq!(parse_amount("-1.234,56"), Some(Decimal::new(-123456, 2)));
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("abc"), None);
    }

    #[test]
    fn test_undecodable_narration_kept_as_lossy_row() {
        let headers = csv::ByteRecord::from(vec!["amount", "Narration", "document"]);
        let columns = Columns::from_headers(&headers).unwrap();

        let record = csv::ByteRecord::from(vec![&b"10.00"[..], &b"PGTO \xff\xfe BAD"[..], &b"NF-1"[..]]);
        let row = columns.row(&record);

        assert!(!row.readable);
        assert!(row.narration.starts_with("PGTO "));
        assert_eq!(row.amount.as_deref(), Some("10.00"));
        assert_eq!(row.document.as_deref(), Some("NF-1"));
        assert_eq!(row.date, None);
    }

    #[test]
    fn test_missing_narration_column() {
        let headers = csv::ByteRecord::from(vec!["date", "amount"]);
        assert!(Columns::from_headers(&headers).is_err());
    }

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 7, 15);
        assert_eq!(parse_date("2024-07-15"), expected);
        assert_eq!(parse_date("15/07/2024"), expected);
        assert_eq!(parse_date("julho"), None);
    }
}
