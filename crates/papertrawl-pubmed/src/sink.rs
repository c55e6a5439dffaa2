//! CSV and console output for extracted records.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use crate::transform::ArticleRecord;

/// Header used for both the CSV file and console output. The double
/// space after "Authors - " is part of the published format.
pub const HEADER: &str = "PubmedID, Title, Publication Date, Non academic Authors -  Company Affiliations - Corresponding Author Email";

/// Write records as UTF-8 CSV: the fixed header line, then one row per
/// article. Field quoting is left to the csv crate, so a title
/// containing commas stays on one line.
pub fn write_csv(records: &[ArticleRecord], path: &Path) -> Result<()> {
    let mut file =
        File::create(path).with_context(|| format!("Cannot create {}", path.display()))?;
    writeln!(file, "{HEADER}")?;

    let mut writer = csv::Writer::from_writer(file);
    for record in records {
        let authors = record.authors.to_string();
        writer.write_record([
            record.pmid.as_str(),
            record.title.as_str(),
            // Absent date is the empty field in CSV
            record.pub_date.as_deref().unwrap_or(""),
            authors.as_str(),
        ])?;
    }
    writer.flush()?;

    Ok(())
}

/// Print the header and one flattened, comma-joined row per record.
pub fn print_console(records: &[ArticleRecord]) {
    println!("{HEADER}");
    for record in records {
        println!("{}", flatten_row(record).join(", "));
    }
}

/// Flatten a record to plain strings: the author list renders through
/// its display form, an absent date as "None".
fn flatten_row(record: &ArticleRecord) -> [String; 4] {
    [
        record.pmid.clone(),
        record.title.clone(),
        record
            .pub_date
            .clone()
            .unwrap_or_else(|| "None".to_string()),
        record.authors.to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::{AuthorRecord, Authors};

    fn sample_record(pmid: &str, title: &str) -> ArticleRecord {
        ArticleRecord {
            pmid: pmid.to_string(),
            title: title.to_string(),
            pub_date: Some("2021-03".to_string()),
            authors: Authors::NonAcademic(vec![AuthorRecord {
                name: "Jane Doe".to_string(),
                affiliation: "Acme Biotech Inc,".to_string(),
                email: "jdoe@acme.com".to_string(),
            }]),
        }
    }

    #[test]
    fn csv_round_trip_line_count_and_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");

        let records = vec![
            sample_record("1", "First"),
            sample_record("2", "Second"),
            sample_record("3", "Third"),
        ];
        write_csv(&records, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], HEADER);
    }

    #[test]
    fn csv_quotes_title_with_commas() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");

        let records = vec![sample_record("1", "Formate assay, revisited")];
        write_csv(&records, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        // Header + one data row, despite the embedded comma
        assert_eq!(content.lines().count(), 2);

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_reader(content.lines().nth(1).unwrap().as_bytes());
        let row = reader.records().next().unwrap().unwrap();
        assert_eq!(&row[1], "Formate assay, revisited");
    }

    #[test]
    fn csv_sentinel_and_absent_date() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");

        let records = vec![ArticleRecord {
            pmid: "9".to_string(),
            title: "Campus only".to_string(),
            pub_date: None,
            authors: Authors::NoneFound,
        }];
        write_csv(&records, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let row = content.lines().nth(1).unwrap();
        assert_eq!(row, "9,Campus only,,There are no non-academic authors");
    }

    #[test]
    fn flatten_absent_date_renders_none() {
        let record = ArticleRecord {
            pmid: "9".to_string(),
            title: "T".to_string(),
            pub_date: None,
            authors: Authors::NoneFound,
        };
        let row = flatten_row(&record);
        assert_eq!(row[2], "None");
        assert_eq!(row[3], "There are no non-academic authors");
    }
}
