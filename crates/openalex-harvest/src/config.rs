//! Configuration for the OpenAlex harvester.

use std::path::PathBuf;
use std::time::Duration;

/// API configuration constants.
pub mod api {
    use std::time::Duration;

    /// Base URL for the OpenAlex API.
    pub const BASE_URL: &str = "https://api.openalex.org";

    /// Page size for institution searches.
    pub const INSTITUTIONS_PER_PAGE: u32 = 200;

    /// Page size for works queries.
    pub const WORKS_PER_PAGE: u32 = 50;

    /// Default per-institution cap on collected works.
    ///
    /// Equal to [`WORKS_PER_PAGE`], so with defaults only the first page of
    /// works is ever fetched for an institution.
    pub const MAX_WORKS: u32 = 50;

    /// Cursor value requesting the first page of a paginated query.
    pub const FIRST_PAGE_CURSOR: &str = "*";

    /// Delay before each page request, to stay inside OpenAlex rate limits.
    pub const RATE_LIMIT_DELAY: Duration = Duration::from_secs(1);

    /// Request timeout.
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

    /// Connection timeout.
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Maximum retries for transient failures (connection errors, 5xx, 429).
    pub const MAX_RETRIES: u32 = 3;

    /// Default institution display-name filter.
    pub const NAME_FILTER: &str = "Illinois";

    /// Default output file path, overwritten on every run.
    pub const OUTPUT_PATH: &str = "illinois_open_research.json";
}

/// Harvester configuration.
///
/// Everything the client and pipeline need is carried here explicitly so
/// tests can point at a mock server and a temporary output path.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL for the OpenAlex API (overridable for mock servers).
    pub base_url: String,

    /// Contact address folded into the User-Agent, per OpenAlex's
    /// "polite pool" convention (optional).
    pub mailto: Option<String>,

    /// Institution display-name filter.
    pub name_filter: String,

    /// Per-institution cap on collected works.
    pub max_works: u32,

    /// Page size for institution searches.
    pub institutions_per_page: u32,

    /// Page size for works queries.
    pub works_per_page: u32,

    /// Delay before each page request.
    pub rate_limit_delay: Duration,

    /// Request timeout.
    pub request_timeout: Duration,

    /// Connection timeout.
    pub connect_timeout: Duration,

    /// Maximum retries for transient failures.
    pub max_retries: u32,

    /// Output file path.
    pub output_path: PathBuf,
}

impl Config {
    /// Create a configuration with API defaults and an optional contact
    /// address for the User-Agent.
    #[must_use]
    pub fn new(mailto: Option<String>) -> Self {
        Self {
            base_url: api::BASE_URL.to_string(),
            mailto,
            name_filter: api::NAME_FILTER.to_string(),
            max_works: api::MAX_WORKS,
            institutions_per_page: api::INSTITUTIONS_PER_PAGE,
            works_per_page: api::WORKS_PER_PAGE,
            rate_limit_delay: api::RATE_LIMIT_DELAY,
            request_timeout: api::REQUEST_TIMEOUT,
            connect_timeout: api::CONNECT_TIMEOUT,
            max_retries: api::MAX_RETRIES,
            output_path: PathBuf::from(api::OUTPUT_PATH),
        }
    }

    /// Create a test configuration pointed at a mock server.
    ///
    /// No rate-limit delay, no retries, short timeouts.
    #[must_use]
    pub fn for_testing(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            mailto: None,
            name_filter: api::NAME_FILTER.to_string(),
            max_works: api::MAX_WORKS,
            institutions_per_page: api::INSTITUTIONS_PER_PAGE,
            works_per_page: api::WORKS_PER_PAGE,
            rate_limit_delay: Duration::from_millis(0),
            request_timeout: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(2),
            max_retries: 0,
            output_path: PathBuf::from("harvest_output.json"),
        }
    }

    /// Create configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns error if environment variables are invalid.
    pub fn from_env() -> anyhow::Result<Self> {
        let mailto = std::env::var("OPENALEX_MAILTO").ok();
        Ok(Self::new(mailto))
    }

    /// Descriptive client-identity string sent as the User-Agent header.
    #[must_use]
    pub fn user_agent(&self) -> String {
        let base = concat!("openalex-harvest/", env!("CARGO_PKG_VERSION"));
        match &self.mailto {
            Some(addr) => format!("{base} (mailto:{addr})"),
            None => base.to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(None)
    }
}
