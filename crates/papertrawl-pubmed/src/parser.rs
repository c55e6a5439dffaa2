//! PubMed XML parser using quick-xml
//!
//! Streaming parser for the efetch article payload. Produces raw
//! articles; classification happens in [`crate::transform`].

use anyhow::{Context, Result};
use quick_xml::Reader;
use quick_xml::events::Event;

/// Raw article as it appears in the efetch XML.
#[derive(Debug, Default)]
pub struct PubmedArticle {
    /// Text of the first PMID element; empty string when absent.
    pub pmid: String,
    pub title: Option<String>,
    /// Raw PubDate components. Month may be text ("Jun"); kept verbatim.
    pub pub_year: Option<String>,
    pub pub_month: Option<String>,
    pub pub_day: Option<String>,
    pub authors: Vec<Author>,
}

#[derive(Debug, Default, Clone)]
pub struct Author {
    pub last_name: Option<String>,
    pub fore_name: Option<String>,
    /// First Affiliation text under AffiliationInfo.
    pub affiliation: Option<String>,
}

/// Parse a `<PubmedArticleSet>` payload into raw articles.
///
/// A malformed payload is an error for the whole batch; there is no
/// partial recovery.
pub fn parse_article_set(xml: &str) -> Result<Vec<PubmedArticle>> {
    let mut reader = Reader::from_str(xml);

    let mut articles = Vec::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) if e.name().as_ref() == b"PubmedArticle" => {
                articles.push(parse_article(&mut reader)?);
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(e).context("XML parse error"),
            _ => {}
        }
        buf.clear();
    }

    Ok(articles)
}

fn parse_article(reader: &mut Reader<&[u8]>) -> Result<PubmedArticle> {
    let mut article = PubmedArticle::default();
    let mut saw_pub_date = false;
    let mut buf = Vec::new();

    // Flat loop over the whole article: unmatched containers fall
    // through, so PMID, ArticleTitle, PubDate, and Author are matched at
    // any depth. First occurrence wins for the scalar fields
    // (CommentsCorrections blocks carry additional PMIDs).
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => match e.name().as_ref() {
                b"PMID" if article.pmid.is_empty() => article.pmid = read_trimmed_text(reader)?,
                b"ArticleTitle" if article.title.is_none() => {
                    article.title = Some(read_text_content(reader, b"ArticleTitle")?)
                }
                b"PubDate" if !saw_pub_date => {
                    saw_pub_date = true;
                    parse_pub_date(reader, &mut article)?;
                }
                b"Author" => article.authors.push(parse_author(reader)?),
                _ => {}
            },
            Event::End(e) if e.name().as_ref() == b"PubmedArticle" => break,
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(article)
}

/// Read Year/Month/Day as raw strings. MedlineDate-only dates leave all
/// three components absent.
fn parse_pub_date(reader: &mut Reader<&[u8]>, article: &mut PubmedArticle) -> Result<()> {
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => match e.name().as_ref() {
                b"Year" => article.pub_year = Some(read_trimmed_text(reader)?),
                b"Month" => article.pub_month = Some(read_trimmed_text(reader)?),
                b"Day" => article.pub_day = Some(read_trimmed_text(reader)?),
                _ => {}
            },
            Event::End(e) if e.name().as_ref() == b"PubDate" => break,
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(())
}

fn parse_author(reader: &mut Reader<&[u8]>) -> Result<Author> {
    let mut author = Author::default();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => match e.name().as_ref() {
                b"LastName" => author.last_name = Some(read_trimmed_text(reader)?),
                b"ForeName" => author.fore_name = Some(read_trimmed_text(reader)?),
                b"Affiliation" if author.affiliation.is_none() => {
                    author.affiliation = Some(read_trimmed_text(reader)?)
                }
                _ => {}
            },
            Event::End(e) if e.name().as_ref() == b"Author" => break,
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(author)
}

/// Read text content until next end tag
fn read_text(reader: &mut Reader<&[u8]>) -> Result<String> {
    let mut buf = Vec::new();
    let mut text = String::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Text(e) => text.push_str(&e.unescape()?),
            Event::End(_) => break,
            Event::Start(_) => {
                // Handle nested elements (like <i>, <b>, etc.)
                text.push_str(&read_text(reader)?);
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(text)
}

/// Read trimmed text for scalar fields (PMID, names, date parts).
///
/// Text is not trimmed globally: `read_text_content` must keep the
/// interior whitespace of title elements with inline markup.
fn read_trimmed_text(reader: &mut Reader<&[u8]>) -> Result<String> {
    Ok(read_text(reader)?.trim().to_string())
}

/// Read text content of a specific element, handling nested tags
fn read_text_content(reader: &mut Reader<&[u8]>, end_tag: &[u8]) -> Result<String> {
    let mut buf = Vec::new();
    let mut text = String::new();
    let mut depth = 1;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Text(e) => text.push_str(&e.unescape()?),
            Event::Start(_) => depth += 1,
            Event::End(e) => {
                depth -= 1;
                if depth == 0 && e.name().as_ref() == end_tag {
                    break;
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(text)
}
