//! OpenAlex API client.
//!
//! Provides an async HTTP client with:
//! - Connection pooling via reqwest
//! - Retry middleware with exponential backoff for transient failures
//! - A fixed inter-page delay to stay inside OpenAlex rate limits
//! - Cursor-based pagination over the institutions and works endpoints

use std::time::Duration;

use reqwest::Client;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};

use crate::config::{Config, api};
use crate::error::{ClientError, ClientResult};
use crate::models::{Institution, Page, RawWork, Work};

/// OpenAlex API client.
#[derive(Clone)]
pub struct OpenAlexClient {
    /// HTTP client with middleware.
    client: ClientWithMiddleware,

    /// API base URL.
    base_url: String,

    /// Page size for institution searches.
    institutions_per_page: u32,

    /// Page size for works queries.
    works_per_page: u32,

    /// Delay before each page request.
    rate_limit_delay: Duration,
}

impl OpenAlexClient {
    /// Create a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(reqwest::header::USER_AGENT, config.user_agent().parse()?);

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .gzip(true)
            .build()?;

        let retry_policy = ExponentialBackoff::builder()
            .retry_bounds(Duration::from_secs(1), Duration::from_secs(30))
            .build_with_max_retries(config.max_retries);

        let client = ClientBuilder::new(client)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            institutions_per_page: config.institutions_per_page,
            works_per_page: config.works_per_page,
            rate_limit_delay: config.rate_limit_delay,
        })
    }

    /// Fetch every institution whose display name matches `filter`.
    ///
    /// Follows the cursor chain until the API reports no further page,
    /// preserving API order across pages.
    ///
    /// # Errors
    ///
    /// Returns error on API failure or a malformed page.
    pub async fn find_institutions(&self, filter: &str) -> ClientResult<Vec<Institution>> {
        let url = format!("{}/institutions", self.base_url);
        let mut institutions = Vec::new();
        let mut cursor = api::FIRST_PAGE_CURSOR.to_string();

        loop {
            let params = vec![
                ("filter".to_string(), format!("display_name.search:{filter}")),
                ("per-page".to_string(), self.institutions_per_page.to_string()),
                ("cursor".to_string(), cursor.clone()),
            ];

            let page: Page<Institution> = self.get(&url, &params).await?;
            tracing::debug!(filter, page_size = page.results.len(), "institutions page");
            institutions.extend(page.results);

            match page.meta.next_cursor() {
                Some(next) => cursor = next.to_string(),
                None => break,
            }
        }

        Ok(institutions)
    }

    /// Fetch open-access works authored by affiliates of `institution_id`.
    ///
    /// Stops once `max_works` entries have been fetched or the cursor chain
    /// ends. The cap gates further page fetches only; the last page is not
    /// truncated, so slightly more than `max_works` entries may be returned.
    /// Each record carries `institution_id` but an empty institution name,
    /// which the caller attaches.
    ///
    /// # Errors
    ///
    /// Returns error on API failure or a malformed page, including an
    /// authorship entry with no author.
    pub async fn find_open_access_works(
        &self,
        institution_id: &str,
        max_works: u32,
    ) -> ClientResult<Vec<Work>> {
        let url = format!("{}/works", self.base_url);
        let mut works = Vec::new();
        let mut cursor = api::FIRST_PAGE_CURSOR.to_string();
        let mut fetched: u32 = 0;

        while fetched < max_works {
            let params = vec![
                (
                    "filter".to_string(),
                    format!("authorships.institutions.id:{institution_id},open_access.is_oa:true"),
                ),
                ("per-page".to_string(), self.works_per_page.to_string()),
                ("cursor".to_string(), cursor.clone()),
            ];

            let page: Page<RawWork> = self.get(&url, &params).await?;
            tracing::debug!(institution_id, page_size = page.results.len(), "works page");
            fetched += page.results.len() as u32;
            works.extend(page.results.into_iter().map(|w| w.into_work(institution_id)));

            match page.meta.next_cursor() {
                Some(next) => cursor = next.to_string(),
                None => break,
            }
        }

        Ok(works)
    }

    /// Make a GET request.
    async fn get<T>(&self, url: &str, params: &[(String, String)]) -> ClientResult<T>
    where
        T: serde::de::DeserializeOwned,
    {
        // Rate limit
        tokio::time::sleep(self.rate_limit_delay).await;

        let response = self.client.get(url).query(params).send().await?;

        let response = self.handle_response(response).await?;
        let body = response.text().await?;

        serde_json::from_str(&body).map_err(ClientError::from)
    }

    /// Handle API response status codes.
    async fn handle_response(
        &self,
        response: reqwest::Response,
    ) -> ClientResult<reqwest::Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        match status.as_u16() {
            429 => {
                let retry_after = response
                    .headers()
                    .get("Retry-After")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(60);

                Err(ClientError::rate_limited(retry_after))
            }
            404 => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::not_found(text))
            }
            400 => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::bad_request(text))
            }
            500..=599 => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::server(status.as_u16(), text))
            }
            _ => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::UnexpectedStatus { status: status.as_u16(), message: text })
            }
        }
    }
}

impl std::fmt::Debug for OpenAlexClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAlexClient").field("base_url", &self.base_url).finish()
    }
}
