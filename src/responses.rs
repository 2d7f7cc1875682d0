//! Serde types for the JSON-shaped E-utilities payloads
//!
//! Both payloads come from an external service and may be partially
//! malformed; every field defaults rather than failing deserialization
//! of the whole response.

use std::collections::HashMap;

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(crate) struct ESearchResponse {
    #[serde(default)]
    pub esearchresult: ESearchResult,
}

#[derive(Debug, Deserialize, Default)]
pub(crate) struct ESearchResult {
    #[serde(default)]
    pub idlist: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ESummaryResponse {
    #[serde(default)]
    pub result: ESummaryResult,
}

/// Per-uid documents are kept as raw JSON values and read field-by-field;
/// a malformed document degrades that one paper, never the whole batch.
#[derive(Debug, Deserialize, Default)]
pub(crate) struct ESummaryResult {
    #[serde(default)]
    pub uids: Vec<String>,
    #[serde(flatten)]
    pub docs: HashMap<String, serde_json::Value>,
}

impl ESummaryResult {
    /// Look up a string field on the document for `uid`, empty if absent
    pub fn str_field<'a>(&'a self, uid: &str, field: &str) -> &'a str {
        self.docs
            .get(uid)
            .and_then(|doc| doc.get(field))
            .and_then(|value| value.as_str())
            .unwrap_or("")
    }

    /// Whether the response carries a document for `uid` at all
    pub fn contains(&self, uid: &str) -> bool {
        self.docs.get(uid).is_some_and(|doc| doc.is_object())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_esearch_parses_idlist() {
        let json = r#"{"esearchresult": {"count": "3", "idlist": ["111", "222", "333"]}}"#;
        let parsed: ESearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.esearchresult.idlist, vec!["111", "222", "333"]);
    }

    #[test]
    fn test_esearch_tolerates_missing_fields() {
        let parsed: ESearchResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.esearchresult.idlist.is_empty());
    }

    #[test]
    fn test_esummary_field_lookup() {
        let json = r#"{"result": {"uids": ["12345"], "12345": {"title": "A Paper", "pubdate": "2023 Jun 15"}}}"#;
        let parsed: ESummaryResponse = serde_json::from_str(json).unwrap();
        assert!(parsed.result.contains("12345"));
        assert_eq!(parsed.result.str_field("12345", "title"), "A Paper");
        assert_eq!(parsed.result.str_field("12345", "pubdate"), "2023 Jun 15");
        assert_eq!(parsed.result.str_field("12345", "missing"), "");
        assert!(!parsed.result.contains("99999"));
    }

    #[test]
    fn test_esummary_tolerates_malformed_document() {
        // Document is a bare string instead of an object
        let json = r#"{"result": {"uids": ["12345"], "12345": "oops"}}"#;
        let parsed: ESummaryResponse = serde_json::from_str(json).unwrap();
        assert!(!parsed.result.contains("12345"));
        assert_eq!(parsed.result.str_field("12345", "title"), "");
    }
}
