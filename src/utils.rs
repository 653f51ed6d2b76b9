//! Helpers for batch naming conventions.
//!
//! Input batches follow the `<site>_<date>_articles.csv` convention; these
//! functions derive the site identifier from that name and build the
//! `clean_`-prefixed output path.

use std::path::{Path, PathBuf};
use tracing::info;

/// Derive the batch's site identifier from the input path.
///
/// The identifier is the leading token of the file stem, up to the first `_`.
/// A path with no usable stem yields an empty identifier; the batch proceeds
/// with it rather than failing.
pub fn site_id_from_path(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    let site_id = stem.split('_').next().unwrap_or_default().to_string();
    info!(%site_id, "Detected site id");
    site_id
}

/// Output path for a cleaned batch: `clean_<input-name>` next to the input,
/// or under `output_dir` when given.
pub fn clean_output_path(input: &Path, output_dir: Option<&Path>) -> PathBuf {
    let name = input
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "articles.csv".to_string());
    let dir = output_dir
        .map(Path::to_path_buf)
        .or_else(|| input.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."));
    dir.join(format!("clean_{name}"))
}

/// Collapse empty strings to `None` so "empty" and "missing" are one state.
pub fn non_empty(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}
