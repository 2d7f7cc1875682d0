//! Data model for papers, authors, and affiliations
//!
//! Entities are built once during a retrieval pass and read-only after.
//! Ownership is strictly hierarchical: a [`Paper`] owns its [`Author`]s,
//! an [`Author`] owns its [`Affiliation`]s.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single author's stated institutional/organizational association
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Affiliation {
    /// Cleaned raw affiliation text, never empty
    pub name: String,
    /// Whether the affiliation was classified as academic
    pub is_academic: bool,
    /// Extracted company name; set only when `is_academic` is false
    pub company_name: Option<String>,
}

/// A paper author with their affiliations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Author {
    /// Author name, never empty (nameless authors are dropped at parse time)
    pub name: String,
    /// Email found in the author's block, if any
    pub email: Option<String>,
    /// Affiliations in document order
    pub affiliations: Vec<Affiliation>,
}

impl Author {
    /// True iff at least one affiliation is non-academic
    pub fn has_pharma_affiliation(&self) -> bool {
        self.affiliations.iter().any(|aff| !aff.is_academic)
    }

    /// Company names of all non-academic affiliations, in affiliation
    /// order; duplicates allowed at this level
    pub fn pharma_companies(&self) -> Vec<&str> {
        self.affiliations
            .iter()
            .filter(|aff| !aff.is_academic)
            .filter_map(|aff| aff.company_name.as_deref())
            .collect()
    }
}

/// A research paper with its parsed author records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paper {
    /// PubMed identifier
    pub pubmed_id: String,
    /// Cleaned article title
    pub title: String,
    /// Resolved publication date
    pub publication_date: NaiveDate,
    /// Authors in document order
    pub authors: Vec<Author>,
    /// Corresponding author email, if one could be found
    pub corresponding_author_email: Option<String>,
}

impl Paper {
    /// True iff any author has a non-academic affiliation
    pub fn has_pharma_authors(&self) -> bool {
        self.authors.iter().any(Author::has_pharma_affiliation)
    }

    /// Names of authors with non-academic affiliations, order preserved;
    /// may contain duplicates if the same name was parsed twice
    pub fn non_academic_authors(&self) -> Vec<&str> {
        self.authors
            .iter()
            .filter(|author| author.has_pharma_affiliation())
            .map(|author| author.name.as_str())
            .collect()
    }

    /// Distinct company names across all authors, deduplicated in
    /// first-seen order
    pub fn company_affiliations(&self) -> Vec<&str> {
        let mut companies: Vec<&str> = Vec::new();
        for author in &self.authors {
            for company in author.pharma_companies() {
                if !companies.contains(&company) {
                    companies.push(company);
                }
            }
        }
        companies
    }
}
