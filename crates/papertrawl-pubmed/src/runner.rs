//! Fetch pipeline runner
//!
//! Wires the search, fetch, and extraction steps in sequence.

use anyhow::Result;

use crate::eutils::EntrezClient;
use crate::transform::{ArticleRecord, extract_records};

/// Run the full fetch pipeline for a query.
///
/// Returns `None` when the search matched nothing; efetch is never
/// called in that case. Any HTTP or parse failure propagates and ends
/// the run.
pub fn run(
    client: &EntrezClient,
    query: &str,
    retmax: usize,
) -> Result<Option<Vec<ArticleRecord>>> {
    let ids = client.search_ids(query, retmax)?;
    if ids.is_empty() {
        return Ok(None);
    }

    let xml = client.fetch_article_xml(&ids)?;
    Ok(Some(extract_records(&xml)?))
}
