#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for biomarker extraction.
//!
//! With no arguments, reads every PDF in `data/` and writes
//! `extracted/biomarker_data.json`. The `summarize` subcommand prints
//! statistics and reference-range interpretations for a results file.

use std::path::{Path, PathBuf};

use biomarker_extract::output::{read_results, write_results};
use biomarker_extract::patterns::{BiomarkerPattern, default_patterns, load_patterns};
use biomarker_extract::report::{ReportWindow, summarize};
use biomarker_extract::walker::{
    BatchOptions, DEFAULT_PREVIEW_CHARS, ListingOrder, process_directory,
};
use biomarker_extract::{DEFAULT_INPUT_DIR, DEFAULT_OUTPUT_PATH};
use biomarker_extract_cli_utils::{IndicatifProgress, MultiProgress};
use biomarker_extract_pdf::PdfExtractReader;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "biomarker_extract",
    about = "Extract lab biomarker values from PDF reports"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Directory containing the PDF reports
    #[arg(long, default_value = DEFAULT_INPUT_DIR)]
    input: PathBuf,

    /// Where to write the extracted JSON (the directory must exist)
    #[arg(long, default_value = DEFAULT_OUTPUT_PATH)]
    output: PathBuf,

    /// TOML file replacing the built-in biomarker patterns
    #[arg(long)]
    patterns: Option<PathBuf>,

    /// Process files sorted by name instead of filesystem order
    #[arg(long)]
    sorted: bool,

    /// Number of characters of extracted text to echo per file
    #[arg(long, default_value_t = DEFAULT_PREVIEW_CHARS)]
    preview_chars: usize,
}

#[derive(Subcommand)]
enum Commands {
    /// Print statistics and interpretations for an extracted results file
    Summarize {
        /// Results file written by a previous extraction run
        #[arg(long, default_value = DEFAULT_OUTPUT_PATH)]
        results: PathBuf,
        /// Which reports to include: `all`, `recent` (last 3) or `last`
        #[arg(long, default_value = "all")]
        window: ReportWindow,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let multi = biomarker_extract_cli_utils::init_logger();
    let cli = Cli::parse();

    match &cli.command {
        Some(Commands::Summarize { results, window }) => print_summary(results, *window)?,
        None => extract(&cli, &multi)?,
    }

    Ok(())
}

fn extract(cli: &Cli, multi: &MultiProgress) -> Result<(), Box<dyn std::error::Error>> {
    let loaded;
    let patterns: &[BiomarkerPattern] = match &cli.patterns {
        Some(path) => {
            loaded = load_patterns(path)?;
            &loaded
        }
        None => default_patterns(),
    };

    let options = BatchOptions {
        order: if cli.sorted {
            ListingOrder::Sorted
        } else {
            ListingOrder::Filesystem
        },
        preview_chars: cli.preview_chars,
    };

    let progress = IndicatifProgress::files_bar(multi, "Extracting");
    let results = process_directory(&cli.input, &PdfExtractReader, patterns, &options, &progress)?;
    progress.finish_and_clear();

    write_results(&cli.output, &results)?;

    log::info!("Wrote {} record(s)", results.len());
    println!("\nExtracted data saved to {}", cli.output.display());

    Ok(())
}

fn print_summary(path: &Path, window: ReportWindow) -> Result<(), Box<dyn std::error::Error>> {
    let results = read_results(path)?;
    let summary = summarize(&results, window);

    println!(
        "Summary of {} report(s) ({window} of {})",
        window.select(&results).len(),
        results.len()
    );

    if summary.stats.is_empty() {
        println!("No significant biomarker trends or abnormalities detected.");
        return Ok(());
    }

    println!();
    for stats in &summary.stats {
        println!("{stats}");
    }

    println!();
    for interpretation in &summary.interpretations {
        println!("- {interpretation}");
    }

    Ok(())
}
