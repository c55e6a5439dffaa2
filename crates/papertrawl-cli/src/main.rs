//! papertrawl - find PubMed papers with non-academic authors
//!
//! Queries PubMed for a search term and reports, per article, the
//! authors whose affiliations look commercial rather than academic.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use clap::Parser;

use papertrawl_pubmed::{ArticleRecord, Authors, EntrezClient, print_console, write_csv};

mod config;

use config::Config;

#[derive(Parser)]
#[command(name = "papertrawl")]
#[command(about = "Fetch PubMed papers based on a query")]
#[command(version)]
struct Cli {
    /// PubMed query string
    query: String,

    /// Number of results to fetch
    #[arg(short = 'n', long, default_value_t = 100)]
    num_results: usize,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Filename to save the results (CSV)
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Config file path (default: ./papertrawl.toml or ~/.config/papertrawl/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Progress context (TTY auto-detect)
    let progress = Arc::new(papertrawl_core::ProgressContext::new());

    // Logging:
    //   TTY:     quiet (warn) unless --debug  — the spinner shows activity
    //   non-TTY: info unless --debug          — logs are the only indicator
    let is_tty = progress.is_tty();
    let multi = if is_tty { Some(progress.multi()) } else { None };
    let quiet = if is_tty { !cli.debug } else { false };
    papertrawl_core::init_logging(quiet, cli.debug, multi);

    let config = match cli.config {
        Some(path) => Config::from_file(&path)?,
        None => Config::load()?,
    };

    let client = EntrezClient {
        esearch_url: config.pubmed.esearch_url,
        efetch_url: config.pubmed.efetch_url,
        api_key: config.pubmed.api_key,
    };

    let start = Instant::now();

    // The spinner guard spans both network calls and the parse; dropping
    // it clears the line before any output is produced, also when an
    // error propagates out of the block.
    let records = {
        let _spinner = progress.spinner("Processing...");
        papertrawl_pubmed::run(&client, &cli.query, cli.num_results)?
    };

    let Some(records) = records else {
        println!("No results found for the query.");
        return Ok(());
    };

    match &cli.file {
        Some(path) => {
            write_csv(&records, path)?;
            println!("Results saved to {}", path.display());
            print_summary(&records, start.elapsed());
        }
        None => print_console(&records),
    }

    Ok(())
}

/// Key-value run summary on stderr; keeps stdout reserved for data rows.
fn print_summary(records: &[ArticleRecord], elapsed: std::time::Duration) {
    use comfy_table::{Cell, Color, Table, modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL};

    let with_authors = records
        .iter()
        .filter(|r| matches!(r.authors, Authors::NonAcademic(_)))
        .count();

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(vec![
            Cell::new("Run").fg(Color::Cyan),
            Cell::new("Value").fg(Color::Cyan),
        ]);
    table.add_row(vec!["Articles".to_string(), records.len().to_string()]);
    table.add_row(vec![
        "With non-academic authors".to_string(),
        with_authors.to_string(),
    ]);
    table.add_row(vec![
        "Time".to_string(),
        format!("{:.1}s", elapsed.as_secs_f64()),
    ]);
    eprintln!("\n{table}");
}
