//! Export of filtered papers to CSV and the console
//!
//! Every exporter emits the same six fields in the same order; downstream
//! consumers depend on exactly this shape.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;

use crate::models::Paper;

/// One exported row; field order here is the output contract
#[derive(Debug, Serialize)]
struct PaperRow {
    #[serde(rename = "PubmedID")]
    pubmed_id: String,
    #[serde(rename = "Title")]
    title: String,
    #[serde(rename = "Publication Date")]
    publication_date: String,
    #[serde(rename = "Non-academic Author(s)")]
    non_academic_authors: String,
    #[serde(rename = "Company Affiliation(s)")]
    company_affiliations: String,
    #[serde(rename = "Corresponding Author Email")]
    corresponding_author_email: String,
}

impl PaperRow {
    fn from_paper(paper: &Paper) -> Self {
        Self {
            pubmed_id: paper.pubmed_id.clone(),
            title: paper.title.clone(),
            publication_date: paper.publication_date.format("%Y-%m-%d").to_string(),
            non_academic_authors: paper.non_academic_authors().join("; "),
            company_affiliations: paper.company_affiliations().join("; "),
            corresponding_author_email: paper
                .corresponding_author_email
                .clone()
                .unwrap_or_default(),
        }
    }
}

/// Exports papers to CSV files, strings, or the console.
#[derive(Debug, Default)]
pub struct CsvExporter;

impl CsvExporter {
    pub fn new() -> Self {
        Self
    }

    /// Write papers as CSV to any writer
    pub fn write_csv<W: Write>(&self, papers: &[Paper], writer: W) -> csv::Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        for paper in papers {
            csv_writer.serialize(PaperRow::from_paper(paper))?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    /// Write papers as CSV to a file path
    pub fn write_csv_file(&self, papers: &[Paper], path: impl AsRef<Path>) -> csv::Result<()> {
        let file = File::create(path)?;
        self.write_csv(papers, file)
    }

    /// Render papers as a CSV string
    pub fn to_csv_string(&self, papers: &[Paper]) -> csv::Result<String> {
        let mut buffer = Vec::new();
        self.write_csv(papers, &mut buffer)?;
        Ok(String::from_utf8(buffer).expect("csv output is valid UTF-8"))
    }

    /// Print a numbered human-readable listing to stdout
    pub fn print_console(&self, papers: &[Paper]) -> io::Result<()> {
        self.write_console(papers, &mut io::stdout())
    }

    fn write_console<W: Write>(&self, papers: &[Paper], out: &mut W) -> io::Result<()> {
        if papers.is_empty() {
            writeln!(out, "No papers found with pharmaceutical/biotech affiliations.")?;
            return Ok(());
        }

        writeln!(
            out,
            "Found {} papers with pharmaceutical/biotech affiliations:\n",
            papers.len()
        )?;

        for (i, paper) in papers.iter().enumerate() {
            writeln!(out, "Paper {}:", i + 1)?;
            writeln!(out, "  PubmedID: {}", paper.pubmed_id)?;
            writeln!(out, "  Title: {}", paper.title)?;
            writeln!(
                out,
                "  Publication Date: {}",
                paper.publication_date.format("%Y-%m-%d")
            )?;
            writeln!(
                out,
                "  Non-academic Author(s): {}",
                paper.non_academic_authors().join(", ")
            )?;
            writeln!(
                out,
                "  Company Affiliation(s): {}",
                paper.company_affiliations().join(", ")
            )?;
            writeln!(
                out,
                "  Corresponding Author Email: {}",
                paper.corresponding_author_email.as_deref().unwrap_or("N/A")
            )?;
            writeln!(out)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Affiliation, Author};
    use chrono::NaiveDate;

    fn sample_paper() -> Paper {
        Paper {
            pubmed_id: "12345678".to_string(),
            title: "Novel Cancer Treatment".to_string(),
            publication_date: NaiveDate::from_ymd_opt(2023, 6, 15).unwrap(),
            authors: vec![
                Author {
                    name: "John Smith".to_string(),
                    email: None,
                    affiliations: vec![Affiliation {
                        name: "Pfizer Inc.".to_string(),
                        is_academic: false,
                        company_name: Some("Pfizer Inc.".to_string()),
                    }],
                },
                Author {
                    name: "Jane Doe".to_string(),
                    email: None,
                    affiliations: vec![Affiliation {
                        name: "Harvard University".to_string(),
                        is_academic: true,
                        company_name: None,
                    }],
                },
            ],
            corresponding_author_email: Some("john.smith@pfizer.com".to_string()),
        }
    }

    #[test]
    fn test_csv_header_and_field_order() {
        let exporter = CsvExporter::new();
        let csv = exporter.to_csv_string(&[sample_paper()]).unwrap();

        let mut lines = csv.lines();
        assert_eq!(
            lines.next().unwrap(),
            "PubmedID,Title,Publication Date,Non-academic Author(s),Company Affiliation(s),Corresponding Author Email"
        );
        assert_eq!(
            lines.next().unwrap(),
            "12345678,Novel Cancer Treatment,2023-06-15,John Smith,Pfizer Inc.,john.smith@pfizer.com"
        );
    }

    #[test]
    fn test_csv_missing_email_is_empty_string() {
        let mut paper = sample_paper();
        paper.corresponding_author_email = None;

        let exporter = CsvExporter::new();
        let csv = exporter.to_csv_string(&[paper]).unwrap();
        assert!(csv.lines().nth(1).unwrap().ends_with("Pfizer Inc.,"));
    }

    #[test]
    fn test_csv_joins_multiple_values_with_semicolons() {
        let mut paper = sample_paper();
        paper.authors.push(Author {
            name: "Ann Brown".to_string(),
            email: None,
            affiliations: vec![Affiliation {
                name: "Novartis Pharmaceuticals".to_string(),
                is_academic: false,
                company_name: Some("Novartis Pharmaceuticals".to_string()),
            }],
        });

        let exporter = CsvExporter::new();
        let csv = exporter.to_csv_string(&[paper]).unwrap();
        let row = csv.lines().nth(1).unwrap();
        assert!(row.contains("John Smith; Ann Brown"));
        assert!(row.contains("Pfizer Inc.; Novartis Pharmaceuticals"));
    }

    #[test]
    fn test_console_listing() {
        let exporter = CsvExporter::new();
        let mut out = Vec::new();
        exporter.write_console(&[sample_paper()], &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("Found 1 papers"));
        assert!(text.contains("Paper 1:"));
        assert!(text.contains("PubmedID: 12345678"));
        assert!(text.contains("Publication Date: 2023-06-15"));
    }

    #[test]
    fn test_console_empty_message() {
        let exporter = CsvExporter::new();
        let mut out = Vec::new();
        exporter.write_console(&[], &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("No papers found"));
    }
}
