//! Affiliation classification: academic vs. commercial
//!
//! Classification policy is data, not code: a table of keyword/class pairs
//! is compiled into case-insensitive word-boundary matchers at construction
//! time, so the policy can be swapped without touching the classification
//! logic. Commercial keywords take precedence over academic ones: an
//! affiliation mentioning both a university and a company is commercial.
//! Affiliations matching nothing lean commercial as well.

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};

use crate::models::Affiliation;
use crate::text::{clean_text, extract_emails, strip_emails};

/// Classification assigned to a keyword in the policy table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeywordClass {
    /// Indicates a pharmaceutical/biotech or other for-profit entity
    Commercial,
    /// Indicates a university, hospital, or other research institution
    Academic,
}

/// Default keyword policy table
pub const DEFAULT_KEYWORDS: &[(&str, KeywordClass)] = &[
    // Commercial indicators
    ("pharmaceuticals", KeywordClass::Commercial),
    ("pharmaceutical", KeywordClass::Commercial),
    ("pharma", KeywordClass::Commercial),
    ("biotech", KeywordClass::Commercial),
    ("biotechnology", KeywordClass::Commercial),
    ("biosciences", KeywordClass::Commercial),
    ("therapeutics", KeywordClass::Commercial),
    ("inc", KeywordClass::Commercial),
    ("corp", KeywordClass::Commercial),
    ("corporation", KeywordClass::Commercial),
    ("ltd", KeywordClass::Commercial),
    ("llc", KeywordClass::Commercial),
    ("gmbh", KeywordClass::Commercial),
    ("limited", KeywordClass::Commercial),
    ("company", KeywordClass::Commercial),
    ("consulting", KeywordClass::Commercial),
    ("consultants", KeywordClass::Commercial),
    ("vaccines", KeywordClass::Commercial),
    ("diagnostics", KeywordClass::Commercial),
    // Academic indicators
    ("university", KeywordClass::Academic),
    ("college", KeywordClass::Academic),
    ("institute", KeywordClass::Academic),
    ("school", KeywordClass::Academic),
    ("academy", KeywordClass::Academic),
    ("medical center", KeywordClass::Academic),
    ("hospital", KeywordClass::Academic),
    ("clinic", KeywordClass::Academic),
    ("research center", KeywordClass::Academic),
    ("laboratory", KeywordClass::Academic),
    ("lab", KeywordClass::Academic),
    ("department", KeywordClass::Academic),
    ("faculty", KeywordClass::Academic),
    ("professor", KeywordClass::Academic),
    ("associate professor", KeywordClass::Academic),
    ("assistant professor", KeywordClass::Academic),
    ("lecturer", KeywordClass::Academic),
    ("researcher", KeywordClass::Academic),
    ("scientist", KeywordClass::Academic),
    ("phd", KeywordClass::Academic),
    ("postdoc", KeywordClass::Academic),
    ("postdoctoral", KeywordClass::Academic),
];

/// Honorific prefixes stripped before company-name extraction.
/// Longest variants first so "Associate Professor" is not left as "Associate".
const HONORIFIC_PREFIXES: &[&str] = &[
    "Associate Professor",
    "Assistant Professor",
    "Professor",
    "Prof.",
    "Dr.",
];

/// Bare country/region tokens that disqualify a comma-split first segment
const COUNTRY_TOKENS: &[&str] = &[
    "usa",
    "united states",
    "uk",
    "united kingdom",
    "australia",
    "canada",
    "germany",
    "france",
    "japan",
    "china",
    "india",
];

/// Capitalized-word runs ending in a company suffix, tried in order;
/// the first pattern that matches wins and its capture is the company name.
static COMPANY_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    const SUFFIXES: &[&str] = &[
        "Consultants",
        "Pharmaceuticals",
        r"Inc\.?",
        r"Corp\.?",
        "Limited",
        r"Ltd\.?",
        "Company",
        "Therapeutics",
        "Biotech",
        "Vaccines",
    ];
    SUFFIXES
        .iter()
        .map(|suffix| {
            Regex::new(&format!(
                r"\b([A-Z][A-Za-z0-9-]*(?:\s+(?:&\s+)?[A-Z][A-Za-z0-9-]*)*\s+(?:{suffix}))"
            ))
            .unwrap()
        })
        .collect()
});

static EDGE_PUNCT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[,\s]+|[,\s]+$").unwrap());

/// Classifies affiliation strings and extracts company names.
#[derive(Debug, Clone)]
pub struct AffiliationClassifier {
    commercial: Option<Regex>,
    academic: Option<Regex>,
}

impl AffiliationClassifier {
    /// Classifier with the default keyword policy
    pub fn new() -> Self {
        Self::with_keywords(DEFAULT_KEYWORDS)
    }

    /// Classifier with an injected keyword policy table
    pub fn with_keywords(keywords: &[(&str, KeywordClass)]) -> Self {
        Self {
            commercial: compile_keyword_matcher(keywords, KeywordClass::Commercial),
            academic: compile_keyword_matcher(keywords, KeywordClass::Academic),
        }
    }

    /// Decide whether an affiliation string is academic.
    ///
    /// Empty input is not academic. Commercial keywords short-circuit
    /// before academic ones; an `.edu` email domain counts as academic
    /// when no keyword matched at all.
    pub fn is_academic(&self, affiliation: &str) -> bool {
        if affiliation.trim().is_empty() {
            return false;
        }

        if let Some(commercial) = &self.commercial {
            if commercial.is_match(affiliation) {
                return false;
            }
        }

        if let Some(academic) = &self.academic {
            if academic.is_match(affiliation) {
                return true;
            }
        }

        extract_emails(affiliation)
            .iter()
            .any(|email| email.to_lowercase().ends_with(".edu"))
    }

    /// Extract a company name from a non-academic affiliation string.
    ///
    /// Best-effort heuristic: honorifics and emails are stripped, then an
    /// ordered suffix-pattern ladder is tried, then a comma-split fallback,
    /// then the cleaned remainder if it is plausibly name-sized. `None`
    /// means "commercial but name unknown", not an error.
    pub fn extract_company_name(&self, affiliation: &str) -> Option<String> {
        let cleaned = clean_text(affiliation);
        if cleaned.is_empty() || self.is_academic(&cleaned) {
            return None;
        }

        let mut working = clean_text(&strip_emails(&cleaned));
        for prefix in HONORIFIC_PREFIXES {
            if let Some(rest) = working.strip_prefix(prefix) {
                working = rest.trim_start().to_string();
                break;
            }
        }
        working = EDGE_PUNCT_RE.replace_all(&working, "").into_owned();
        if working.is_empty() {
            return None;
        }

        for pattern in COMPANY_PATTERNS.iter() {
            if let Some(captures) = pattern.captures(&working) {
                return Some(captures[1].to_string());
            }
        }

        if let Some((first, _)) = working.split_once(',') {
            let candidate = first.trim();
            if candidate.len() > 3 && !COUNTRY_TOKENS.contains(&candidate.to_lowercase().as_str())
            {
                return Some(candidate.to_string());
            }
        }

        let len = working.chars().count();
        if len > 3 && len < 50 {
            return Some(working);
        }

        None
    }

    /// Classify one cleaned affiliation string into an [`Affiliation`] record.
    pub fn classify(&self, name: &str) -> Affiliation {
        let is_academic = self.is_academic(name);
        let company_name = if is_academic {
            None
        } else {
            self.extract_company_name(name)
        };
        Affiliation {
            name: name.to_string(),
            is_academic,
            company_name,
        }
    }
}

impl Default for AffiliationClassifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Compile all keywords of one class into a single word-boundary
/// alternation. Word boundaries keep short tokens such as "inc" or "lab"
/// from firing inside unrelated words ("Princeton", "Laboratories").
fn compile_keyword_matcher(
    keywords: &[(&str, KeywordClass)],
    class: KeywordClass,
) -> Option<Regex> {
    let alternation: Vec<String> = keywords
        .iter()
        .filter(|(_, c)| *c == class)
        .map(|(keyword, _)| regex::escape(keyword))
        .collect();
    if alternation.is_empty() {
        return None;
    }

    let pattern = format!(r"\b(?:{})\b", alternation.join("|"));
    Some(
        RegexBuilder::new(&pattern)
            .case_insensitive(true)
            .build()
            .expect("keyword table must compile"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Harvard University")]
    #[case("Department of Medicine, Stanford University")]
    #[case("John Smith, PhD, University of California")]
    #[case("Research Laboratory, MIT")]
    #[case("john.doe@harvard.edu")]
    #[case("researcher@school.edu")]
    #[case("Medical Center, Johns Hopkins University")]
    fn test_academic_affiliations(#[case] affiliation: &str) {
        let classifier = AffiliationClassifier::new();
        assert!(classifier.is_academic(affiliation), "should be academic: {affiliation}");
    }

    #[rstest]
    #[case("Pfizer Inc.")]
    #[case("Novartis Pharmaceuticals")]
    #[case("Biotech Company Ltd.")]
    #[case("Acme Therapeutics GmbH")]
    #[case("john.doe@company.com")]
    #[case("")]
    fn test_non_academic_affiliations(#[case] affiliation: &str) {
        let classifier = AffiliationClassifier::new();
        assert!(!classifier.is_academic(affiliation), "should not be academic: {affiliation}");
    }

    /// Commercial keywords beat academic keywords regardless of position.
    #[rstest]
    #[case("University spin-off, Pfizer Inc.")]
    #[case("Novartis Pharmaceuticals and Harvard University joint program")]
    #[case("Consulting group, Department of Oncology")]
    fn test_commercial_keyword_precedence(#[case] affiliation: &str) {
        let classifier = AffiliationClassifier::new();
        assert!(!classifier.is_academic(affiliation));
    }

    #[test]
    fn test_edu_email_fallback_without_keywords() {
        let classifier = AffiliationClassifier::new();
        // No keyword matches here; the .edu domain is the only signal
        assert!(classifier.is_academic("jdoe@caltech.edu"));
        assert!(!classifier.is_academic("jdoe@caltech.com"));
    }

    #[test]
    fn test_word_boundary_matching() {
        let classifier = AffiliationClassifier::new();
        // "inc" must not fire inside "Princeton"
        assert!(classifier.is_academic("Princeton University"));
        // "lab" must not fire inside "Laboratories", so this stays commercial
        assert!(!classifier.is_academic("Abbott Laboratories"));
    }

    #[test]
    fn test_injected_keyword_table() {
        let classifier = AffiliationClassifier::with_keywords(&[
            ("observatory", KeywordClass::Academic),
            ("startup", KeywordClass::Commercial),
        ]);
        assert!(classifier.is_academic("Royal Observatory Greenwich"));
        assert!(!classifier.is_academic("Observatory Analytics startup"));
        // Default keywords are absent from the injected policy
        assert!(!classifier.is_academic("Harvard University"));
    }

    #[test]
    fn test_extract_company_name_empty() {
        let classifier = AffiliationClassifier::new();
        assert_eq!(classifier.extract_company_name(""), None);
    }

    #[test]
    fn test_extract_company_name_academic_is_none() {
        let classifier = AffiliationClassifier::new();
        assert_eq!(classifier.extract_company_name("Harvard University"), None);
    }

    #[rstest]
    #[case("Pfizer Inc.", "Pfizer Inc.")]
    #[case("Dr. John Smith, Pfizer Inc.", "Pfizer Inc.")]
    #[case("Novartis Pharmaceuticals, Inc.", "Novartis Pharmaceuticals")]
    #[case("Acme Therapeutics", "Acme Therapeutics")]
    #[case("Orion Consultants", "Orion Consultants")]
    #[case("Helix Vaccines, Cambridge, UK", "Helix Vaccines")]
    fn test_extract_company_name_patterns(#[case] input: &str, #[case] expected: &str) {
        let classifier = AffiliationClassifier::new();
        assert_eq!(classifier.extract_company_name(input).as_deref(), Some(expected));
    }

    #[test]
    fn test_extract_company_name_comma_fallback() {
        let classifier = AffiliationClassifier::new();
        // No suffix pattern fires; first comma segment is the organization
        assert_eq!(
            classifier.extract_company_name("Sanofi Oncology, Cambridge, MA"),
            Some("Sanofi Oncology".to_string())
        );
        // A bare country token is not an organization
        assert_eq!(
            classifier.extract_company_name("USA, Genmab Oncology Division"),
            Some("USA, Genmab Oncology Division".to_string())
        );
    }

    #[test]
    fn test_extract_company_name_length_fallback() {
        let classifier = AffiliationClassifier::new();
        // Plausibly name-sized remainder is returned as-is
        assert_eq!(
            classifier.extract_company_name("Genmab"),
            Some("Genmab".to_string())
        );
        // Too short to be confident
        assert_eq!(classifier.extract_company_name("Gmb"), None);
        // Too long to be a bare company name
        let long = "B".repeat(60);
        assert_eq!(classifier.extract_company_name(&long), None);
    }

    #[test]
    fn test_extract_company_name_strips_email() {
        let classifier = AffiliationClassifier::new();
        assert_eq!(
            classifier.extract_company_name("Pfizer Inc. contact@pfizer.com"),
            Some("Pfizer Inc.".to_string())
        );
    }

    #[test]
    fn test_classify_builds_record() {
        let classifier = AffiliationClassifier::new();

        let commercial = classifier.classify("Pfizer Inc.");
        assert_eq!(commercial.name, "Pfizer Inc.");
        assert!(!commercial.is_academic);
        assert_eq!(commercial.company_name.as_deref(), Some("Pfizer Inc."));

        let academic = classifier.classify("Harvard University");
        assert!(academic.is_academic);
        assert_eq!(academic.company_name, None);
    }
}
