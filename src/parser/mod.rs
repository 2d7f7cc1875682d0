//! Record parsing: raw per-paper payloads into structured records
//!
//! The detail payload is treated as untrusted, partially-malformed input.
//! Author-list extraction runs an ordered chain of strategies — a
//! structured streaming parse first, then progressively looser tag-pattern
//! scans — and the first strategy yielding any author blocks wins. Every
//! field degrades independently; a bad field never fails the whole record.

mod patterns;
mod structured;

use chrono::{Local, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::classify::AffiliationClassifier;
use crate::models::{Affiliation, Author, Paper};
use crate::text::{clean_text, extract_emails, parse_date};

/// An author block as extracted by a strategy, before name resolution
/// and affiliation classification
#[derive(Debug, Default)]
pub(crate) struct RawAuthor {
    fore_name: Option<String>,
    last_name: Option<String>,
    collective_name: Option<String>,
    affiliations: Vec<String>,
    email: Option<String>,
    /// Markup-stripped text of the whole block, the last-resort name source
    block_text: String,
}

static CORRESPONDING_EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)<CorrespondingAuthorEmail>(.*?)</CorrespondingAuthorEmail>").unwrap()
});

/// Affiliation texts this short carry no classifiable signal
const MIN_AFFILIATION_LEN: usize = 3;
/// Last-resort author names longer than this are junk, not names
const MAX_FALLBACK_NAME_LEN: usize = 100;

/// Parses one paper's summary fields and detail payload into a [`Paper`].
#[derive(Debug, Clone, Default)]
pub struct RecordParser {
    classifier: AffiliationClassifier,
}

impl RecordParser {
    /// Parser with the default classification policy
    pub fn new() -> Self {
        Self {
            classifier: AffiliationClassifier::new(),
        }
    }

    /// Parser with an injected classifier
    pub fn with_classifier(classifier: AffiliationClassifier) -> Self {
        Self { classifier }
    }

    /// Build a [`Paper`] from the summary fields and the detail payload.
    ///
    /// The publication date falls back to the current system date when the
    /// raw string does not parse — a bad date never fails the record.
    pub fn parse_paper(
        &self,
        pubmed_id: &str,
        title: &str,
        pub_date: &str,
        detail_payload: &str,
    ) -> Paper {
        let authors = self.parse_authors(detail_payload);
        debug!(
            pubmed_id = %pubmed_id,
            authors = authors.len(),
            "parsed detail payload"
        );

        Paper {
            pubmed_id: pubmed_id.to_string(),
            title: clean_text(title),
            publication_date: resolve_publication_date(pub_date),
            authors,
            corresponding_author_email: corresponding_author_email(detail_payload),
        }
    }

    /// Extract all authors from a detail payload.
    ///
    /// Author blocks that yield no name under any naming rule are dropped.
    pub fn parse_authors(&self, payload: &str) -> Vec<Author> {
        extract_author_blocks(payload)
            .into_iter()
            .filter_map(|raw| self.resolve_author(raw))
            .collect()
    }

    fn resolve_author(&self, raw: RawAuthor) -> Option<Author> {
        let name = resolve_name(&raw)?;

        let mut affiliations: Vec<Affiliation> = Vec::new();
        for raw_affiliation in &raw.affiliations {
            let cleaned = clean_text(raw_affiliation);
            if cleaned.chars().count() <= MIN_AFFILIATION_LEN {
                continue;
            }
            // The bare-tag pattern re-matches text already captured through
            // the wrapper pattern; identical texts collapse to one record.
            if affiliations.iter().any(|existing| existing.name == cleaned) {
                continue;
            }
            affiliations.push(self.classifier.classify(&cleaned));
        }

        Some(Author {
            name,
            email: raw.email.filter(|email| !email.is_empty()),
            affiliations,
        })
    }
}

/// Ordered strategy chain: structured parse, strict tag pattern, loose
/// tag pattern. First strategy yielding any blocks wins.
fn extract_author_blocks(payload: &str) -> Vec<RawAuthor> {
    match structured::extract_authors(payload) {
        Ok(authors) if !authors.is_empty() => return authors,
        Ok(_) => debug!("structured strategy found no author blocks"),
        Err(e) => debug!(error = %e, "structured strategy failed, trying patterns"),
    }

    let strict = patterns::strict_blocks(payload);
    if !strict.is_empty() {
        return strict;
    }

    patterns::loose_blocks(payload)
}

/// Name priority: "given family" from the name fields, then the collective
/// name, then the markup-stripped block text when it is plausibly a name.
fn resolve_name(raw: &RawAuthor) -> Option<String> {
    let fore = raw.fore_name.as_deref().map(clean_text).unwrap_or_default();
    let last = raw.last_name.as_deref().map(clean_text).unwrap_or_default();
    let combined = format!("{fore} {last}");
    let combined = combined.trim();
    if !combined.is_empty() {
        return Some(combined.to_string());
    }

    if let Some(collective) = raw.collective_name.as_deref() {
        let cleaned = clean_text(collective);
        if !cleaned.is_empty() {
            return Some(cleaned);
        }
    }

    let stripped = clean_text(&raw.block_text);
    if !stripped.is_empty() && stripped.chars().count() < MAX_FALLBACK_NAME_LEN {
        return Some(stripped);
    }

    None
}

/// Corresponding email: the explicit tag anywhere in the payload wins;
/// otherwise the first email found by the generic extractor. The fallback
/// may not belong to a listed author — that ambiguity is in the source data.
fn corresponding_author_email(payload: &str) -> Option<String> {
    if let Some(captures) = CORRESPONDING_EMAIL_RE.captures(payload) {
        let email = captures[1].trim().to_string();
        if !email.is_empty() {
            return Some(email);
        }
    }

    extract_emails(payload).into_iter().next()
}

fn resolve_publication_date(raw: &str) -> NaiveDate {
    parse_date(raw).unwrap_or_else(|| Local::now().date_naive())
}
