//! Pattern-based fallback extraction for author blocks
//!
//! Used when the structured strategy finds nothing: payloads that are not
//! well-formed XML, or that delimit or attribute their author blocks in
//! nonstandard ways. Blocks are carved out with tag-shaped patterns and
//! fields are read with per-field patterns inside each block.

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};

use super::RawAuthor;
use crate::text::clean_text;

static AUTHOR_BLOCK_STRICT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<Author>(.*?)</Author>").unwrap());

/// Any block resembling an author tag: attributes allowed, case ignored
static AUTHOR_BLOCK_LOOSE: Lazy<Regex> = Lazy::new(|| {
    RegexBuilder::new(r"(?s)<Author\b[^>]*>(.*?)</Author>")
        .case_insensitive(true)
        .build()
        .unwrap()
});

static LAST_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<LastName>(.*?)</LastName>").unwrap());
static FORE_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<ForeName>(.*?)</ForeName>").unwrap());
static COLLECTIVE_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<CollectiveName>(.*?)</CollectiveName>").unwrap());
static EMAIL_TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<Email>(.*?)</Email>").unwrap());

/// Affiliation sub-block patterns; all of them contribute matches
static AFFILIATION_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"(?s)<AffiliationInfo>(.*?)</AffiliationInfo>").unwrap(),
        Regex::new(r"(?s)<Affiliation>(.*?)</Affiliation>").unwrap(),
        Regex::new(r"(?s)<Affiliation\s[^>]*>(.*?)</Affiliation>").unwrap(),
    ]
});

/// Strict strategy: plain `<Author>` blocks only
pub(super) fn strict_blocks(payload: &str) -> Vec<RawAuthor> {
    AUTHOR_BLOCK_STRICT
        .captures_iter(payload)
        .map(|captures| parse_block(&captures[1]))
        .collect()
}

/// Loose strategy: attributed and case-variant author tags as a last resort
pub(super) fn loose_blocks(payload: &str) -> Vec<RawAuthor> {
    AUTHOR_BLOCK_LOOSE
        .captures_iter(payload)
        .map(|captures| parse_block(&captures[1]))
        .collect()
}

fn parse_block(block: &str) -> RawAuthor {
    let mut affiliations = Vec::new();
    for pattern in AFFILIATION_PATTERNS.iter() {
        for captures in pattern.captures_iter(block) {
            affiliations.push(captures[1].to_string());
        }
    }

    RawAuthor {
        fore_name: first_capture(&FORE_NAME_RE, block),
        last_name: first_capture(&LAST_NAME_RE, block),
        collective_name: first_capture(&COLLECTIVE_NAME_RE, block),
        affiliations,
        email: first_capture(&EMAIL_TAG_RE, block).map(|email| email.trim().to_string()),
        block_text: clean_text(block),
    }
}

fn first_capture(pattern: &Regex, block: &str) -> Option<String> {
    pattern
        .captures(block)
        .map(|captures| captures[1].to_string())
}
