//! Papertrawl PubMed - article fetch and extraction
//!
//! Queries the NCBI E-utilities endpoints, parses the efetch XML
//! payload, and extracts per-article records listing the authors whose
//! affiliations look commercial rather than academic.
//!
//! # Example
//!
//! ```ignore
//! use papertrawl_pubmed::{EntrezClient, extract_records};
//!
//! let client = EntrezClient::default();
//! let ids = client.search_ids("crispr therapeutics", 20)?;
//! let xml = client.fetch_article_xml(&ids)?;
//! let records = extract_records(&xml)?;
//! println!("Extracted {} articles", records.len());
//! ```

pub mod eutils;
pub mod parser;
pub mod runner;
pub mod sink;
pub mod transform;

// Re-exports
pub use eutils::EntrezClient;
pub use runner::run;
pub use sink::{HEADER, print_console, write_csv};
pub use transform::{ArticleRecord, AuthorRecord, Authors, extract_records};
