//! # news_scrub
//!
//! A batch cleaning pipeline for scraped newspaper articles. Takes the dirty
//! CSV produced by the extraction stage, runs it through an ordered set of
//! record transforms, and writes a `clean_`-prefixed CSV ready for the
//! warehouse loader.
//!
//! ## Usage
//!
//! ```sh
//! news_scrub eluniversal_2025_08_27_articles.csv
//! ```
//!
//! ## Architecture
//!
//! The application is a single synchronous pass over one in-memory record
//! table:
//! 1. **Load**: read the dirty CSV into a record table
//! 2. **Transform**: site tagging, host extraction, title recovery, uid
//!    assignment, text normalization, token counting, deduplication, and the
//!    terminal quality filter
//! 3. **Persist**: write the surviving records to `clean_<input-name>`
//!
//! A run either completes with one output file or fails with a nonzero exit
//! and no output. Dirty rows are never fatal: they are absorbed as missing
//! fields and dropped by the quality filter, with the drop counts logged.

use chrono::Local;
use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod error;
mod io;
mod models;
mod pipeline;
mod tokenize;
mod utils;

use cli::Cli;
use error::ScrubError;
use tokenize::TokenizerContext;

fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    let args = Cli::parse();
    info!(
        input = %args.input.display(),
        run_date = %Local::now().date_naive(),
        "Starting cleaning process"
    );
    debug!(?args.output_dir, ?args.stop_words, "Parsed CLI arguments");

    if let Err(e) = run(&args) {
        error!(error = %e, "Cleaning run failed");
        return Err(e.into());
    }

    let elapsed = start_time.elapsed();
    info!(
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );
    Ok(())
}

fn run(args: &Cli) -> Result<(), ScrubError> {
    // The linguistic resource is loaded once, before any stage executes;
    // a missing or empty list aborts the run here.
    let ctx = match &args.stop_words {
        Some(path) => TokenizerContext::from_file(path)?,
        None => TokenizerContext::spanish()?,
    };

    let table = io::read_table(&args.input)?;
    let site_id = utils::site_id_from_path(&args.input);

    let (table, _report) = pipeline::run(table, &site_id, &ctx);

    let output = utils::clean_output_path(&args.input, args.output_dir.as_deref());
    io::write_table(&table, &output)?;
    info!(output = %output.display(), rows = table.len(), "Cleaned batch written");
    Ok(())
}
