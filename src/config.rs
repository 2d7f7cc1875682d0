//! Client configuration for NCBI E-utilities access
//!
//! NCBI asks API consumers to identify themselves (tool/email), allows an
//! optional API key that raises the permitted request rate, and expects
//! clients to stay within the published rate limits.

use std::time::Duration;

use crate::rate_limit::RateLimiter;

const DEFAULT_BASE_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils";
const DEFAULT_TOOL: &str = "pharma-papers";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Rate limit without an API key (requests per second)
const DEFAULT_RATE_LIMIT: f64 = 3.0;
/// Rate limit with an API key (requests per second)
const API_KEY_RATE_LIMIT: f64 = 10.0;

/// Configuration for [`PubMedClient`](crate::PubMedClient)
///
/// # Example
///
/// ```
/// use pharma_papers::ClientConfig;
///
/// let config = ClientConfig::new()
///     .with_api_key("your_api_key_here")
///     .with_email("researcher@university.edu");
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    api_key: Option<String>,
    email: Option<String>,
    tool: Option<String>,
    base_url: Option<String>,
    rate_limit: Option<f64>,
    /// Timeout applied to each outbound HTTP call
    pub timeout: Duration,
}

impl ClientConfig {
    /// Create a new configuration with defaults (no API key, 3 req/sec)
    pub fn new() -> Self {
        Self {
            api_key: None,
            email: None,
            tool: None,
            base_url: None,
            rate_limit: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set the NCBI API key (raises the default rate limit to 10 req/sec)
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the contact email sent with each request
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Set the tool name sent with each request
    pub fn with_tool(mut self, tool: impl Into<String>) -> Self {
        self.tool = Some(tool.into());
        self
    }

    /// Override the E-utilities base URL (used by tests to point at a mock server)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Override the outbound request rate (requests per second)
    pub fn with_rate_limit(mut self, requests_per_second: f64) -> Self {
        self.rate_limit = Some(requests_per_second);
        self
    }

    /// Set the per-request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Effective base URL for E-utilities calls
    pub fn effective_base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    /// Effective tool name
    pub fn effective_tool(&self) -> &str {
        self.tool.as_deref().unwrap_or(DEFAULT_TOOL)
    }

    /// Effective user agent string
    pub fn effective_user_agent(&self) -> String {
        format!("{}/{}", DEFAULT_TOOL, env!("CARGO_PKG_VERSION"))
    }

    /// Effective request rate: explicit override wins, otherwise the API key
    /// presence selects between the two NCBI defaults
    pub fn effective_rate_limit(&self) -> f64 {
        if let Some(rate) = self.rate_limit {
            return rate;
        }
        if self.api_key.is_some() {
            API_KEY_RATE_LIMIT
        } else {
            DEFAULT_RATE_LIMIT
        }
    }

    /// Build the identification query parameters (api_key, email, tool)
    pub fn build_api_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        if let Some(api_key) = &self.api_key {
            params.push(("api_key".to_string(), api_key.clone()));
        }
        if let Some(email) = &self.email {
            params.push(("email".to_string(), email.clone()));
        }
        if let Some(tool) = &self.tool {
            params.push(("tool".to_string(), tool.clone()));
        }
        params
    }

    /// Create a rate limiter matching the effective rate
    pub fn create_rate_limiter(&self) -> RateLimiter {
        RateLimiter::new(self.effective_rate_limit())
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new()
    }
}
