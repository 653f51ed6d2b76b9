//! Fatal error taxonomy for a cleaning run.
//!
//! Only whole-run failures live here: an unreadable input, a missing or empty
//! stop-word resource, an unwritable destination. Per-record anomalies are not
//! errors at all — they propagate as `None` fields and are removed by the
//! quality filter at the end of the pipeline.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScrubError {
    /// The input CSV could not be read or parsed at the file level.
    #[error("failed to read input {path}: {source}")]
    ReadInput {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// The cleaned CSV could not be written.
    #[error("failed to write output {path}: {source}")]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A user-supplied stop-word list could not be read.
    #[error("failed to read stop-word list {path}: {source}")]
    ReadStopWords {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The stop-word list contained no words. Tokenization cannot proceed.
    #[error("stop-word list is empty")]
    EmptyStopWords,
}
