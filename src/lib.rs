//! # pharma-papers
//!
//! Fetch PubMed papers whose authors hold pharmaceutical/biotech company
//! affiliations.
//!
//! The pipeline searches PubMed, fetches each paper's summary and detail
//! payloads, parses author and affiliation data from the loosely
//! structured detail markup, classifies each affiliation as academic or
//! commercial, and keeps only papers with at least one commercially
//! affiliated author.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pharma_papers::{CsvExporter, PubMedClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = PubMedClient::new();
//!
//!     let papers = client
//!         .fetch_papers_with_pharma_authors("cancer immunotherapy", 20)
//!         .await?;
//!
//!     for paper in &papers {
//!         println!("{}: {}", paper.pubmed_id, paper.title);
//!         println!("  Companies: {}", paper.company_affiliations().join(", "));
//!     }
//!
//!     CsvExporter::new().write_csv_file(&papers, "results.csv")?;
//!     Ok(())
//! }
//! ```
//!
//! ## Classification policy
//!
//! Keyword policy is configuration data, not code: see
//! [`classify::AffiliationClassifier::with_keywords`] to inject a custom
//! table. Commercial keywords always take precedence over academic ones,
//! and affiliations matching neither keyword set are treated as
//! commercial-leaning.

pub mod classify;
pub mod client;
pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod parser;
pub mod rate_limit;
mod responses;
pub mod text;

// Re-export main types for convenience
pub use classify::{AffiliationClassifier, KeywordClass};
pub use client::PubMedClient;
pub use config::ClientConfig;
pub use error::{PubMedError, Result};
pub use export::CsvExporter;
pub use models::{Affiliation, Author, Paper};
pub use parser::RecordParser;
pub use rate_limit::RateLimiter;
