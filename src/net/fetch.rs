use std::time::Duration;

use url::Url;

/// Result of fetching a URL
#[derive(Clone)]
pub struct FetchResult {
    pub html: String,
    pub url: String,
    pub status: u16,
    pub content_type: String,
}

/// Error during fetch
#[derive(Debug, Clone)]
pub struct FetchError {
    pub message: String,
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Seam between the navigator and the network, so preload and click-time
/// fetches can be stubbed in tests.
pub trait Fetch: Send + Sync {
    fn fetch(&self, url: &str) -> Result<FetchResult, FetchError>;
}

/// Blocking HTTP fetcher expecting full HTML documents in response.
pub struct HttpFetcher {
    user_agent: String,
}

impl HttpFetcher {
    pub fn new(user_agent: impl Into<String>) -> Self {
        Self {
            user_agent: user_agent.into(),
        }
    }
}

impl Fetch for HttpFetcher {
    fn fetch(&self, url_str: &str) -> Result<FetchResult, FetchError> {
        let parsed = Url::parse(url_str).map_err(|e| FetchError {
            message: format!("Invalid URL: {}", e),
        })?;

        let client = reqwest::blocking::Client::builder()
            .user_agent(self.user_agent.clone())
            .timeout(Duration::from_secs(15))
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(|e| FetchError {
                message: format!("Client error: {}", e),
            })?;

        let response = client
            .get(parsed.as_str())
            .header(
                "Accept",
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            )
            .send()
            .map_err(|e| FetchError {
                message: format!("Request failed: {}", e),
            })?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("text/html")
            .to_string();

        let final_url = response.url().to_string();

        let html = response.text().map_err(|e| FetchError {
            message: format!("Failed to read body: {}", e),
        })?;

        Ok(FetchResult {
            html,
            url: final_url,
            status,
            content_type,
        })
    }
}
