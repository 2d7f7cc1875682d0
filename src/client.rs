//! PubMed retrieval orchestration
//!
//! Thin boundary component: issues the E-utilities calls, feeds payloads
//! to the record parser, and filters papers by pharma relevance. A failure
//! fetching or parsing one paper is logged and that paper is skipped; only
//! a failed search aborts the whole query.

use reqwest::Client;
use tracing::{debug, info, instrument, warn};

use crate::config::ClientConfig;
use crate::error::{PubMedError, Result};
use crate::models::Paper;
use crate::parser::RecordParser;
use crate::rate_limit::RateLimiter;
use crate::responses::{ESearchResponse, ESummaryResponse};

/// Client for searching PubMed and fetching pharma-relevant papers
#[derive(Clone)]
pub struct PubMedClient {
    client: Client,
    base_url: String,
    rate_limiter: RateLimiter,
    config: ClientConfig,
    parser: RecordParser,
}

impl PubMedClient {
    /// Create a new client with default configuration
    ///
    /// Uses default NCBI rate limiting (3 requests/second) and no API key.
    ///
    /// # Example
    ///
    /// ```
    /// use pharma_papers::PubMedClient;
    ///
    /// let client = PubMedClient::new();
    /// ```
    pub fn new() -> Self {
        Self::with_config(ClientConfig::new())
    }

    /// Create a new client with custom configuration
    ///
    /// # Example
    ///
    /// ```
    /// use pharma_papers::{ClientConfig, PubMedClient};
    ///
    /// let config = ClientConfig::new()
    ///     .with_api_key("your_api_key_here")
    ///     .with_email("researcher@university.edu");
    ///
    /// let client = PubMedClient::with_config(config);
    /// ```
    pub fn with_config(config: ClientConfig) -> Self {
        let rate_limiter = config.create_rate_limiter();
        let base_url = config.effective_base_url().to_string();

        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.effective_user_agent())
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url,
            rate_limiter,
            config,
            parser: RecordParser::new(),
        }
    }

    /// Replace the record parser (e.g. to inject a custom classification policy)
    pub fn with_parser(mut self, parser: RecordParser) -> Self {
        self.parser = parser;
        self
    }

    /// Search for papers, returning PubMed IDs in relevance order
    ///
    /// A failed call or an undecodable response is fatal to the query and
    /// surfaced to the caller; nothing partial is returned for it.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use pharma_papers::PubMedClient;
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = PubMedClient::new();
    ///     let pmids = client.search_papers("cancer immunotherapy", 10).await?;
    ///     println!("Found {} papers", pmids.len());
    ///     Ok(())
    /// }
    /// ```
    #[instrument(skip(self), fields(query = %query, max_results = max_results))]
    pub async fn search_papers(&self, query: &str, max_results: usize) -> Result<Vec<String>> {
        if query.trim().is_empty() {
            debug!("Empty query provided, returning empty results");
            return Ok(Vec::new());
        }

        self.rate_limiter.acquire().await;

        let url = self.build_url(
            "esearch.fcgi",
            &format!(
                "db=pubmed&term={}&retmax={}&retmode=json&sort=relevance",
                urlencoding::encode(query),
                max_results
            ),
        );

        debug!("Making ESearch API request");
        let response = self.client.get(&url).send().await?;
        Self::check_status(&response)?;

        let body = response.text().await?;
        let search_result: ESearchResponse = serde_json::from_str(&body)?;
        let pmids = search_result.esearchresult.idlist;

        info!(results_found = pmids.len(), "Search completed");
        Ok(pmids)
    }

    /// Fetch and parse one paper: summary fields plus the detail payload
    ///
    /// # Errors
    ///
    /// * `PubMedError::InvalidPmid` - PMID is not a plain number
    /// * `PubMedError::PaperNotFound` - summary response has no record for it
    /// * `PubMedError::RequestError` / `ApiError` - a fetch call failed
    #[instrument(skip(self), fields(pmid = %pmid))]
    pub async fn fetch_paper(&self, pmid: &str) -> Result<Paper> {
        if pmid.trim().is_empty() || !pmid.chars().all(|c| c.is_ascii_digit()) {
            warn!("Invalid PMID format provided");
            return Err(PubMedError::InvalidPmid {
                pmid: pmid.to_string(),
            });
        }

        self.rate_limiter.acquire().await;

        let summary_url = self.build_url(
            "esummary.fcgi",
            &format!("db=pubmed&id={pmid}&retmode=json"),
        );

        debug!("Making ESummary API request");
        let response = self.client.get(&summary_url).send().await?;
        Self::check_status(&response)?;
        let body = response.text().await?;
        let summary: ESummaryResponse = serde_json::from_str(&body)?;

        if !summary.result.contains(pmid) {
            return Err(PubMedError::PaperNotFound {
                pmid: pmid.to_string(),
            });
        }

        let title = summary.result.str_field(pmid, "title").to_string();
        let pub_date = summary.result.str_field(pmid, "pubdate").to_string();

        self.rate_limiter.acquire().await;

        let detail_url = self.build_url("efetch.fcgi", &format!("db=pubmed&id={pmid}&retmode=xml"));

        debug!("Making EFetch API request");
        let response = self.client.get(&detail_url).send().await?;
        Self::check_status(&response)?;
        let detail_payload = response.text().await?;

        let paper = self.parser.parse_paper(pmid, &title, &pub_date, &detail_payload);
        info!(
            title = %paper.title,
            authors = paper.authors.len(),
            has_pharma_authors = paper.has_pharma_authors(),
            "Fetched paper"
        );

        Ok(paper)
    }

    /// Search and fetch papers, keeping only those with at least one
    /// author holding a pharmaceutical/biotech affiliation
    ///
    /// Papers are processed sequentially in search order; a failure on one
    /// paper is logged and skipped, never aborting the batch. A query that
    /// yields no pharma-affiliated papers returns an empty vector.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use pharma_papers::PubMedClient;
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = PubMedClient::new();
    ///     let papers = client
    ///         .fetch_papers_with_pharma_authors("cancer immunotherapy", 20)
    ///         .await?;
    ///     for paper in papers {
    ///         println!("{}: {}", paper.pubmed_id, paper.title);
    ///     }
    ///     Ok(())
    /// }
    /// ```
    #[instrument(skip(self), fields(query = %query, max_results = max_results))]
    pub async fn fetch_papers_with_pharma_authors(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<Paper>> {
        let pmids = self.search_papers(query, max_results).await?;

        let mut papers = Vec::new();
        for pmid in pmids {
            match self.fetch_paper(&pmid).await {
                Ok(paper) => {
                    if paper.has_pharma_authors() {
                        debug!(pmid = %pmid, "Paper has pharma-affiliated authors");
                        papers.push(paper);
                    }
                }
                Err(e) => {
                    warn!(pmid = %pmid, error = %e, "Skipping paper");
                }
            }
        }

        info!(papers_found = papers.len(), "Pharma-relevance filtering completed");
        Ok(papers)
    }

    fn build_url(&self, endpoint: &str, query_string: &str) -> String {
        let mut url = format!("{}/{}?{}", self.base_url, endpoint, query_string);
        for (key, value) in self.config.build_api_params() {
            url.push('&');
            url.push_str(&key);
            url.push('=');
            url.push_str(&urlencoding::encode(&value));
        }
        url
    }

    fn check_status(response: &reqwest::Response) -> Result<()> {
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        warn!("API request failed with status: {}", status);
        Err(PubMedError::ApiError {
            message: format!(
                "HTTP {}: {}",
                status,
                status.canonical_reason().unwrap_or("Unknown error")
            ),
        })
    }
}

impl Default for PubMedClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_invalid_pmid_rejected_before_any_request() {
        let client = PubMedClient::new();
        let result = client.fetch_paper("not_a_number").await;
        assert!(matches!(result, Err(PubMedError::InvalidPmid { .. })));
    }

    #[tokio::test]
    async fn test_empty_query_short_circuits() {
        let client = PubMedClient::new();
        let pmids = client.search_papers("   ", 10).await.unwrap();
        assert!(pmids.is_empty());
    }

    #[test]
    fn test_build_url_appends_api_params() {
        let config = ClientConfig::new()
            .with_api_key("key123")
            .with_tool("TestTool");
        let client = PubMedClient::with_config(config);

        let url = client.build_url("esearch.fcgi", "db=pubmed&term=test");
        assert!(url.contains("esearch.fcgi?db=pubmed&term=test"));
        assert!(url.contains("&api_key=key123"));
        assert!(url.contains("&tool=TestTool"));
    }
}
