//! CSV loader and persister for article batches.
//!
//! The loader turns the upstream extraction output into a fresh record table;
//! the persister writes the cleaned table back out. Both are thin collaborators
//! around the pipeline: file-level problems are fatal, while row-level defects
//! (a record with no URL) are logged and skipped here so the pipeline never
//! sees them.

use std::path::Path;

use serde::Deserialize;
use tracing::{info, instrument, warn};

use crate::error::ScrubError;
use crate::models::Record;
use crate::utils::non_empty;

/// Shape of one raw input row. Extra columns from partially processed batches
/// (`newspaper_uid`, stale uid or token-count columns) are ignored; missing
/// columns default to empty.
#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    body: Option<String>,
}

/// Read a dirty batch into a record table.
///
/// Empty cells load as `None`. Rows without a URL can never acquire an
/// identity, so they are dropped here with a warning rather than carried
/// through the pipeline.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub fn read_table(path: &Path) -> Result<Vec<Record>, ScrubError> {
    info!("Reading dirty data");
    let mut reader = csv::Reader::from_path(path).map_err(|source| ScrubError::ReadInput {
        path: path.to_path_buf(),
        source,
    })?;

    let mut table = Vec::new();
    let mut skipped = 0usize;
    for (index, row) in reader.deserialize::<RawRow>().enumerate() {
        let row = row.map_err(|source| ScrubError::ReadInput {
            path: path.to_path_buf(),
            source,
        })?;
        match row.url.and_then(non_empty) {
            Some(url) => {
                let title = row.title.and_then(non_empty);
                let body = row.body.and_then(non_empty);
                table.push(Record::new(url, title, body));
            }
            None => {
                warn!(row = index + 1, "Row has no url; skipping");
                skipped += 1;
            }
        }
    }

    info!(rows = table.len(), skipped, "Loaded record table");
    Ok(table)
}

/// Write the cleaned table to `path`.
///
/// An unwritable destination is fatal and surfaced to the caller; there is no
/// retry.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub fn write_table(table: &[Record], path: &Path) -> Result<(), ScrubError> {
    info!(rows = table.len(), "Saving cleaned data");
    let wrap = |source: csv::Error| ScrubError::WriteOutput {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = csv::Writer::from_path(path).map_err(wrap)?;
    for record in table {
        writer.serialize(record).map_err(wrap)?;
    }
    writer.flush().map_err(|source| ScrubError::WriteOutput {
        path: path.to_path_buf(),
        source: source.into(),
    })?;
    info!("Wrote cleaned table");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("news_scrub_{}_{}", std::process::id(), name))
    }

    #[test]
    fn test_read_table_maps_empty_cells_to_none() {
        let path = temp_path("read.csv");
        std::fs::write(
            &path,
            "url,title,body\n\
             http://example.com/a-b,,cuerpo uno\n\
             http://example.com/c,Titular,\n",
        )
        .unwrap();

        let table = read_table(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(table.len(), 2);
        assert!(table[0].title.is_none());
        assert_eq!(table[0].body.as_deref(), Some("cuerpo uno"));
        assert_eq!(table[1].title.as_deref(), Some("Titular"));
        assert!(table[1].body.is_none());
    }

    #[test]
    fn test_read_table_skips_rows_without_url() {
        let path = temp_path("nourl.csv");
        std::fs::write(
            &path,
            "url,title,body\n\
             ,Sin Enlace,cuerpo\n\
             http://example.com/x,Con Enlace,cuerpo\n",
        )
        .unwrap();

        let table = read_table(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(table.len(), 1);
        assert_eq!(table[0].url, "http://example.com/x");
    }

    #[test]
    fn test_read_table_ignores_stale_columns() {
        let path = temp_path("stale.csv");
        std::fs::write(
            &path,
            "uid,newspaper_uid,url,title,body,n_token_title\n\
             deadbeef,elpais,http://example.com/y,Titular,cuerpo,4\n",
        )
        .unwrap();

        let table = read_table(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(table.len(), 1);
        // Stale identity and feature columns are recomputed by the pipeline.
        assert!(table[0].uid.is_none());
        assert!(table[0].site_id.is_none());
        assert!(table[0].title_token_count.is_none());
    }

    #[test]
    fn test_read_table_missing_file_is_fatal() {
        let result = read_table(Path::new("/nonexistent/batch.csv"));
        assert!(matches!(result, Err(ScrubError::ReadInput { .. })));
    }

    #[test]
    fn test_write_table_emits_all_columns() {
        let path = temp_path("write.csv");
        let record = Record {
            uid: Some("900150983cd24fb0d6963f7d28e17f72".to_string()),
            site_id: Some("elpais".to_string()),
            url: "http://elpais.com/a-b".to_string(),
            host: Some("elpais.com".to_string()),
            title: Some("a b".to_string()),
            body: Some("cuerpo".to_string()),
            title_token_count: Some(2),
            body_token_count: Some(1),
        };

        write_table(&[record], &path).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        let mut lines = written.lines();
        assert_eq!(
            lines.next(),
            Some("uid,site_id,url,host,title,body,title_token_count,body_token_count")
        );
        assert_eq!(
            lines.next(),
            Some("900150983cd24fb0d6963f7d28e17f72,elpais,http://elpais.com/a-b,elpais.com,a b,cuerpo,2,1")
        );
    }

    #[test]
    fn test_write_table_unwritable_destination_is_fatal() {
        let result = write_table(&[], Path::new("/nonexistent/dir/out.csv"));
        assert!(matches!(result, Err(ScrubError::WriteOutput { .. })));
    }
}
