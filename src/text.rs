//! Text normalization helpers shared by the parser and classifier
//!
//! PubMed payloads mix JSON string fields with tag-shaped markup and
//! free-text affiliations; these helpers reduce all of it to clean,
//! comparable text. All functions are total — malformed input degrades
//! to empty output, never to an error.

use chrono::format::{Parsed, StrftimeItems, parse};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").unwrap());
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").unwrap());

/// Accepted publication date formats, tried in order. Formats without a
/// month or day component default the missing parts to 1.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d", "%Y %m %d", "%Y/%m/%d", "%Y-%m", "%Y %m", "%Y/%m", "%Y",
];

/// Strip markup tags, collapse whitespace runs to single spaces, and trim.
///
/// Idempotent: `clean_text(clean_text(x)) == clean_text(x)`.
///
/// # Example
///
/// ```
/// use pharma_papers::text::clean_text;
///
/// assert_eq!(clean_text("  Hello   World  "), "Hello World");
/// assert_eq!(clean_text("<p>Hello</p>"), "Hello");
/// ```
pub fn clean_text(text: &str) -> String {
    let without_tags = TAG_RE.replace_all(text, " ");
    WHITESPACE_RE.replace_all(&without_tags, " ").trim().to_string()
}

/// Extract all email addresses in order of first appearance.
///
/// Duplicates are preserved; empty input yields an empty vector.
pub fn extract_emails(text: &str) -> Vec<String> {
    EMAIL_RE
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Remove all email addresses from the text, leaving the rest untouched.
pub fn strip_emails(text: &str) -> String {
    EMAIL_RE.replace_all(text, "").into_owned()
}

/// Parse a publication date string against the accepted format list.
///
/// The first matching format wins; a missing day or month defaults to 1,
/// so `"2023"` parses to January 1, 2023 and `"2023-06"` to June 1, 2023.
/// Returns `None` when no format matches — the caller decides the
/// fallback.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use pharma_papers::text::parse_date;
///
/// assert_eq!(parse_date("2023-06"), NaiveDate::from_ymd_opt(2023, 6, 1));
/// assert_eq!(parse_date("not-a-date"), None);
/// ```
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    for format in DATE_FORMATS {
        let mut parsed = Parsed::new();
        if parse(&mut parsed, trimmed, StrftimeItems::new(format)).is_err() {
            continue;
        }
        let year = parsed.year?;
        let month = parsed.month.unwrap_or(1);
        let day = parsed.day.unwrap_or(1);
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("  Hello   World  ", "Hello World")]
    #[case("<p>Hello World</p>", "Hello World")]
    #[case("<p>Hello</p> <b>World</b>", "Hello World")]
    #[case("", "")]
    #[case("\n\nHello\n\nWorld\n\n", "Hello World")]
    fn test_clean_text(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(clean_text(input), expected);
    }

    #[rstest]
    #[case("  Hello   World  ")]
    #[case("<p>Hello</p>")]
    #[case("x << y >> z")]
    #[case("Department of Medicine,\nHarvard University")]
    fn test_clean_text_idempotent(#[case] input: &str) {
        let once = clean_text(input);
        assert_eq!(clean_text(&once), once);
    }

    #[test]
    fn test_extract_emails() {
        assert_eq!(
            extract_emails("Contact: john.doe@example.com"),
            vec!["john.doe@example.com"]
        );
        assert_eq!(
            extract_emails("Email: jane@company.com and bob@university.edu"),
            vec!["jane@company.com", "bob@university.edu"]
        );
        assert!(extract_emails("No email here").is_empty());
        assert!(extract_emails("").is_empty());
    }

    #[test]
    fn test_extract_emails_preserves_duplicates() {
        assert_eq!(
            extract_emails("a@b.com then again a@b.com"),
            vec!["a@b.com", "a@b.com"]
        );
    }

    #[rstest]
    #[case("2023-01-15", 2023, 1, 15)]
    #[case("2023 01 15", 2023, 1, 15)]
    #[case("2023/01/15", 2023, 1, 15)]
    #[case("2023-06", 2023, 6, 1)]
    #[case("2023 06", 2023, 6, 1)]
    #[case("2023/06", 2023, 6, 1)]
    #[case("2023", 2023, 1, 1)]
    fn test_parse_date_valid(
        #[case] input: &str,
        #[case] year: i32,
        #[case] month: u32,
        #[case] day: u32,
    ) {
        assert_eq!(parse_date(input), NaiveDate::from_ymd_opt(year, month, day));
    }

    #[rstest]
    #[case("")]
    #[case("invalid-date")]
    #[case("2023-13-45")]
    #[case("June 2023")]
    fn test_parse_date_invalid(#[case] input: &str) {
        assert_eq!(parse_date(input), None);
    }
}
