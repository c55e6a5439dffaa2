//! Record extraction and the non-academic author heuristic.
//!
//! Turns raw parsed articles into flat [`ArticleRecord`]s, keeping only
//! authors whose affiliation text matches none of the academic keywords.

use std::fmt;

use anyhow::Result;

use crate::parser::{self, Author};

/// Affiliation keywords marking an author as academic.
const ACADEMIC_KEYWORDS: [&str; 6] = [
    "university",
    "college",
    "institute",
    "academy",
    "labs",
    "school",
];

/// Company-style keywords. Deliberately not part of the inclusion test:
/// an author is kept purely for lacking academic keywords. Kept as a
/// separate predicate so the asymmetry stays visible.
const COMPANY_KEYWORDS: [&str; 6] = [
    "company",
    "biotech",
    "pharmaceutical",
    "corporation",
    "inc",
    "ltd",
];

/// Sentinel rendered when an article has no non-academic authors.
pub const NO_AUTHORS_SENTINEL: &str = "There are no non-academic authors";

/// One non-academic author with the email split out of the affiliation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorRecord {
    pub name: String,
    /// Affiliation text with the email substring removed.
    pub affiliation: String,
    /// First whitespace-delimited token of the affiliation containing
    /// `@`; empty when none was found.
    pub email: String,
}

impl fmt::Display for AuthorRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {} - {}", self.name, self.affiliation, self.email)
    }
}

/// Non-academic author list, or the explicit "none" case.
///
/// The display form picks the sentinel text for the empty case, so the
/// distinction never leaks into the output format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Authors {
    NonAcademic(Vec<AuthorRecord>),
    NoneFound,
}

impl fmt::Display for Authors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonAcademic(list) => {
                let joined: Vec<String> = list.iter().map(|a| a.to_string()).collect();
                write!(f, "{}", joined.join(", "))
            }
            Self::NoneFound => write!(f, "{NO_AUTHORS_SENTINEL}"),
        }
    }
}

/// Flat per-article record, ready for the sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleRecord {
    pub pmid: String,
    pub title: String,
    /// Present date components joined with `-`; `None` when the source
    /// had no components at all (distinct from the empty string).
    pub pub_date: Option<String>,
    pub authors: Authors,
}

/// Parse an efetch payload and extract one record per article.
pub fn extract_records(xml: &str) -> Result<Vec<ArticleRecord>> {
    let articles = parser::parse_article_set(xml)?;
    Ok(articles.into_iter().map(build_record).collect())
}

fn build_record(article: parser::PubmedArticle) -> ArticleRecord {
    let authors = filter_non_academic(&article.authors);
    ArticleRecord {
        pmid: article.pmid,
        title: article.title.unwrap_or_default(),
        pub_date: assemble_date(
            article.pub_year.as_deref(),
            article.pub_month.as_deref(),
            article.pub_day.as_deref(),
        ),
        authors: if authors.is_empty() {
            Authors::NoneFound
        } else {
            Authors::NonAcademic(authors)
        },
    }
}

/// Join the present date components with `-`.
///
/// Absent or empty components are skipped rather than padded, so
/// year + day without a month yields "2020-15". All-absent yields None.
pub fn assemble_date(
    year: Option<&str>,
    month: Option<&str>,
    day: Option<&str>,
) -> Option<String> {
    let parts: Vec<&str> = [year, month, day]
        .into_iter()
        .flatten()
        .filter(|s| !s.is_empty())
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("-"))
    }
}

/// First whitespace-delimited token containing `@`, or empty.
pub fn extract_email(affiliation: &str) -> String {
    affiliation
        .split_whitespace()
        .find(|word| word.contains('@'))
        .unwrap_or("")
        .to_string()
}

/// Whether the affiliation text matches any academic keyword.
pub fn is_academic_affiliation(affiliation: &str) -> bool {
    let lower = affiliation.to_lowercase();
    ACADEMIC_KEYWORDS.iter().any(|kw| lower.contains(kw))
}

/// Whether the affiliation text matches any company keyword.
///
/// Not consulted by [`filter_non_academic`]: inclusion is driven solely
/// by the absence of academic keywords.
pub fn is_company_affiliation(affiliation: &str) -> bool {
    let lower = affiliation.to_lowercase();
    COMPANY_KEYWORDS.iter().any(|kw| lower.contains(kw))
}

fn filter_non_academic(authors: &[Author]) -> Vec<AuthorRecord> {
    let mut records = Vec::new();

    for author in authors {
        let fore = author.fore_name.as_deref().unwrap_or("");
        let last = author.last_name.as_deref().unwrap_or("");
        let name = format!("{fore} {last}").trim().to_string();

        let affiliation = author.affiliation.clone().unwrap_or_default();
        let email = extract_email(&affiliation);

        if is_academic_affiliation(&affiliation) {
            continue;
        }

        // Remove the email from the affiliation (first occurrence only)
        let affiliation = if email.is_empty() {
            affiliation
        } else {
            affiliation.replacen(&email, "", 1).trim().to_string()
        };

        records.push(AuthorRecord {
            name,
            affiliation,
            email,
        });
    }

    records
}

#[cfg(test)]
mod tests {
    use super::*;

    fn author(fore: &str, last: &str, affiliation: Option<&str>) -> Author {
        Author {
            fore_name: Some(fore.to_string()),
            last_name: Some(last.to_string()),
            affiliation: affiliation.map(String::from),
        }
    }

    #[test]
    fn date_year_and_day_without_month() {
        assert_eq!(
            assemble_date(Some("2020"), None, Some("15")),
            Some("2020-15".to_string())
        );
    }

    #[test]
    fn date_all_components() {
        assert_eq!(
            assemble_date(Some("2020"), Some("Jun"), Some("15")),
            Some("2020-Jun-15".to_string())
        );
    }

    #[test]
    fn date_all_absent_is_none() {
        assert_eq!(assemble_date(None, None, None), None);
    }

    #[test]
    fn date_empty_strings_are_skipped() {
        assert_eq!(assemble_date(Some(""), Some(""), Some("")), None);
        assert_eq!(
            assemble_date(Some("1999"), Some(""), None),
            Some("1999".to_string())
        );
    }

    #[test]
    fn email_first_token_with_at() {
        assert_eq!(
            extract_email("Acme Biotech Inc, jdoe@acme.com"),
            "jdoe@acme.com"
        );
        assert_eq!(extract_email("No email here"), "");
        assert_eq!(extract_email(""), "");
    }

    #[test]
    fn academic_keywords_case_insensitive() {
        assert!(is_academic_affiliation("Harvard UNIVERSITY, Boston"));
        assert!(is_academic_affiliation("Broad Institute"));
        assert!(!is_academic_affiliation("Acme Biotech Inc"));
    }

    #[test]
    fn company_keywords_do_not_drive_inclusion() {
        // A plain affiliation with no keywords at all is still kept.
        let authors = vec![author("Jane", "Doe", Some("Some Clinic, Berlin"))];
        let records = filter_non_academic(&authors);
        assert_eq!(records.len(), 1);
        assert!(!is_company_affiliation("Some Clinic, Berlin"));
    }

    #[test]
    fn academic_author_excluded() {
        let authors = vec![author("John", "Smith", Some("University of Test"))];
        assert!(filter_non_academic(&authors).is_empty());
    }

    #[test]
    fn email_stripped_from_affiliation() {
        let authors = vec![author(
            "Jane",
            "Doe",
            Some("Acme Biotech Inc, jdoe@acme.com"),
        )];
        let records = filter_non_academic(&authors);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].email, "jdoe@acme.com");
        assert!(!records[0].affiliation.contains("jdoe@acme.com"));
        assert_eq!(records[0].affiliation, "Acme Biotech Inc,");
    }

    #[test]
    fn name_parts_default_to_empty() {
        let authors = vec![Author {
            fore_name: None,
            last_name: Some("Mononym".to_string()),
            affiliation: None,
        }];
        let records = filter_non_academic(&authors);
        assert_eq!(records[0].name, "Mononym");
        assert_eq!(records[0].affiliation, "");
        assert_eq!(records[0].email, "");
    }

    #[test]
    fn sole_academic_author_yields_sentinel() {
        let xml = r#"<?xml version="1.0"?>
<PubmedArticleSet>
  <PubmedArticle>
    <MedlineCitation>
      <PMID>1</PMID>
      <Article>
        <ArticleTitle>Campus work</ArticleTitle>
        <AuthorList>
          <Author>
            <LastName>Smith</LastName>
            <ForeName>John</ForeName>
            <AffiliationInfo>
              <Affiliation>University of Somewhere</Affiliation>
            </AffiliationInfo>
          </Author>
        </AuthorList>
      </Article>
    </MedlineCitation>
  </PubmedArticle>
</PubmedArticleSet>"#;

        let records = extract_records(xml).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].authors, Authors::NoneFound);
        assert_eq!(records[0].authors.to_string(), NO_AUTHORS_SENTINEL);
    }

    #[test]
    fn extract_full_record() {
        let xml = r#"<?xml version="1.0"?>
<PubmedArticleSet>
  <PubmedArticle>
    <MedlineCitation>
      <PMID>314159</PMID>
      <Article>
        <Journal>
          <JournalIssue>
            <PubDate>
              <Year>2021</Year>
              <Month>03</Month>
            </PubDate>
          </JournalIssue>
        </Journal>
        <ArticleTitle>Industry trial</ArticleTitle>
        <AuthorList>
          <Author>
            <LastName>Smith</LastName>
            <ForeName>John</ForeName>
            <AffiliationInfo>
              <Affiliation>University of Test</Affiliation>
            </AffiliationInfo>
          </Author>
          <Author>
            <LastName>Doe</LastName>
            <ForeName>Jane</ForeName>
            <AffiliationInfo>
              <Affiliation>Acme Biotech Inc, jdoe@acme.com</Affiliation>
            </AffiliationInfo>
          </Author>
        </AuthorList>
      </Article>
    </MedlineCitation>
  </PubmedArticle>
</PubmedArticleSet>"#;

        let records = extract_records(xml).unwrap();
        let record = &records[0];
        assert_eq!(record.pmid, "314159");
        assert_eq!(record.title, "Industry trial");
        assert_eq!(record.pub_date, Some("2021-03".to_string()));

        let Authors::NonAcademic(authors) = &record.authors else {
            panic!("expected non-academic authors");
        };
        assert_eq!(authors.len(), 1);
        assert_eq!(authors[0].name, "Jane Doe");
        assert_eq!(authors[0].email, "jdoe@acme.com");
    }

    #[test]
    fn authors_display_joined() {
        let authors = Authors::NonAcademic(vec![
            AuthorRecord {
                name: "Jane Doe".to_string(),
                affiliation: "Acme Biotech Inc,".to_string(),
                email: "jdoe@acme.com".to_string(),
            },
            AuthorRecord {
                name: "Max Power".to_string(),
                affiliation: "Initech".to_string(),
                email: String::new(),
            },
        ]);
        assert_eq!(
            authors.to_string(),
            "Jane Doe - Acme Biotech Inc, - jdoe@acme.com, Max Power - Initech - "
        );
    }
}
