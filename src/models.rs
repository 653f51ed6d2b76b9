//! Data model for scraped article records moving through the cleaning pipeline.
//!
//! A [`Record`] is one scraped article. Raw input provides `url`, `title`, and
//! `body`; every other field is derived by a pipeline stage. Derived fields are
//! explicit `Option`s so that per-record failures (malformed URL, unrecoverable
//! title, skipped token count) never abort a batch — they leave a `None` behind
//! that the terminal quality filter removes in one place.

use serde::Serialize;

/// One scraped news article and its derived features.
///
/// Field order here is the column order of the output CSV: the `uid` key
/// first, then provenance, then text, then token features.
#[derive(Debug, Clone, Serialize)]
pub struct Record {
    /// Deterministic identity: lowercase hex MD5 of the UTF-8 bytes of `url`.
    pub uid: Option<String>,
    /// Identifier of the originating news site, uniform across a batch.
    pub site_id: Option<String>,
    /// Source URL as scraped. The only field required at load time.
    pub url: String,
    /// Network host component of `url`; `None` when the URL does not parse.
    pub host: Option<String>,
    /// Headline. `None` until recovered from the URL path, if recoverable.
    pub title: Option<String>,
    /// Article text. An empty CSV cell loads as `None`.
    pub body: Option<String>,
    /// Significant-token count of the cleaned title.
    pub title_token_count: Option<usize>,
    /// Significant-token count of the cleaned body.
    pub body_token_count: Option<usize>,
}

impl Record {
    /// Build a record fresh from loader output. All derived fields start empty.
    pub fn new(url: String, title: Option<String>, body: Option<String>) -> Self {
        Record {
            uid: None,
            site_id: None,
            url,
            host: None,
            title,
            body,
            title_token_count: None,
            body_token_count: None,
        }
    }

    /// The quality-filter predicate: every field has a value.
    ///
    /// This is the single point where rows carrying any residual `None` —
    /// malformed host, failed title recovery, skipped token count — are
    /// judged incomplete.
    pub fn is_complete(&self) -> bool {
        self.uid.is_some()
            && self.site_id.is_some()
            && self.host.is_some()
            && self.title.is_some()
            && self.body.is_some()
            && self.title_token_count.is_some()
            && self.body_token_count.is_some()
    }
}
