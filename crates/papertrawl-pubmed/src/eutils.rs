//! NCBI E-utilities client (esearch + efetch).
//!
//! Two endpoints are used: esearch returns matching PMIDs as JSON,
//! efetch returns the full article records as XML for a comma-joined
//! PMID list.

use anyhow::{Context, Result};
use papertrawl_core::get_text;

pub const ESEARCH_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils/esearch.fcgi";
pub const EFETCH_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils/efetch.fcgi";

/// Client for the two E-utilities endpoints.
#[derive(Debug, Clone)]
pub struct EntrezClient {
    pub esearch_url: String,
    pub efetch_url: String,
    /// NCBI API key; raises the server-side rate limit when present.
    pub api_key: Option<String>,
}

impl Default for EntrezClient {
    fn default() -> Self {
        Self {
            esearch_url: ESEARCH_URL.to_string(),
            efetch_url: EFETCH_URL.to_string(),
            api_key: None,
        }
    }
}

impl EntrezClient {
    /// Search PubMed and return matching PMIDs in server order.
    ///
    /// An empty idlist is not an error; the caller decides how to report
    /// a query with no hits.
    pub fn search_ids(&self, query: &str, retmax: usize) -> Result<Vec<String>> {
        let mut params = vec![
            ("db", "pubmed".to_string()),
            ("term", query.to_string()),
            ("retmode", "json".to_string()),
            ("retmax", retmax.to_string()),
        ];
        if let Some(key) = &self.api_key {
            params.push(("api_key", key.clone()));
        }

        log::debug!("Fetching PubMed IDs with query: {query}");
        let body = get_text(&self.esearch_url, &params).context("esearch request failed")?;
        parse_esearch(&body)
    }

    /// Fetch full article XML for the given PMIDs.
    pub fn fetch_article_xml(&self, pmids: &[String]) -> Result<String> {
        let ids = pmids.join(",");
        let mut params = vec![
            ("db", "pubmed".to_string()),
            ("id", ids.clone()),
            ("retmode", "xml".to_string()),
        ];
        if let Some(key) = &self.api_key {
            params.push(("api_key", key.clone()));
        }

        log::debug!("Fetching details for PubMed IDs: {ids}");
        get_text(&self.efetch_url, &params).context("efetch request failed")
    }
}

/// Extract `esearchresult.idlist` from an esearch JSON body.
/// A missing list yields an empty vec.
fn parse_esearch(body: &str) -> Result<Vec<String>> {
    let data: serde_json::Value = serde_json::from_str(body).context("Invalid esearch JSON")?;
    let ids = data["esearchresult"]["idlist"]
        .as_array()
        .map(|list| {
            list.iter()
                .filter_map(|v| v.as_str().map(String::from))
                .collect()
        })
        .unwrap_or_default();
    Ok(ids)
}
