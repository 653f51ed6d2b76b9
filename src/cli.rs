//! Command-line interface definitions for news_scrub.
//!
//! This module defines the CLI arguments and options using the `clap` crate.

use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for the news_scrub application.
///
/// # Examples
///
/// ```sh
/// # Clean a scraped batch in place (writes clean_<name> next to the input)
/// news_scrub eluniversal_2025_08_27_articles.csv
///
/// # Write the cleaned batch somewhere else
/// news_scrub eluniversal_2025_08_27_articles.csv -o ./load
///
/// # Use a custom stop-word list instead of the embedded Spanish one
/// news_scrub elpais_2025_08_27_articles.csv --stop-words ./stopwords.txt
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Path to the dirty articles CSV, conventionally <site>_<date>_articles.csv
    pub input: PathBuf,

    /// Directory for the cleaned CSV; defaults to the input's directory
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Newline-delimited stop-word list replacing the embedded Spanish list
    #[arg(long, env = "NEWS_SCRUB_STOP_WORDS")]
    pub stop_words: Option<PathBuf>,
}
