use crate::config::{show_url, DEFAULT_BASE_URL};
use crate::headers::add_page_headers;
use crate::source::ShowSource;
use crate::{Result, ScrapeError};
use async_trait::async_trait;
use http_client::{HttpClient, Request};
use http_types::{Method, StatusCode, Url};
use std::time::Duration;

const MAX_REDIRECTS: u32 = 5;

/// A fetched page: final status and body.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub status: u16,
    pub body: String,
}

/// Client for the public WEFUNK show archive.
///
/// # Examples
///
/// ```rust,no_run
/// use wefunk_playlists::{ShowSource, WefunkClient};
///
/// # async fn run() -> wefunk_playlists::Result<()> {
/// let client = WefunkClient::new(Box::new(http_client::native::NativeClient::new()));
/// let body = client.fetch_show(1000).await?;
/// println!("{} bytes", body.len());
/// # Ok(())
/// # }
/// ```
pub struct WefunkClient {
    client: Box<dyn HttpClient>,
    base_url: String,
    timeout: Duration,
}

impl WefunkClient {
    /// Create a client for the default archive URL with a 10 second timeout.
    pub fn new(client: Box<dyn HttpClient>) -> Self {
        Self::with_base_url(client, DEFAULT_BASE_URL.to_string())
    }

    /// Create a client for a custom archive root (mirrors, local test servers).
    pub fn with_base_url(client: Box<dyn HttpClient>, base_url: String) -> Self {
        Self {
            client,
            base_url,
            timeout: Duration::from_secs(10),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET a page, following redirects.
    pub async fn get(&self, url: &str) -> Result<FetchedPage> {
        let url = url
            .parse::<Url>()
            .map_err(|e| ScrapeError::Http(format!("Invalid URL {url}: {e}")))?;
        self.get_with_redirects(url, None, 0).await
    }

    async fn get_with_redirects(
        &self,
        url: Url,
        referer: Option<&str>,
        redirect_count: u32,
    ) -> Result<FetchedPage> {
        if redirect_count > MAX_REDIRECTS {
            return Err(ScrapeError::Http("Too many redirects".to_string()));
        }

        let mut request = Request::new(Method::Get, url.clone());
        add_page_headers(&mut request, referer);

        let mut response = tokio::time::timeout(self.timeout, self.client.send(request))
            .await
            .map_err(|_| {
                ScrapeError::Http(format!("Request to {url} timed out after {:?}", self.timeout))
            })?
            .map_err(|e| ScrapeError::Http(e.to_string()))?;

        let status = response.status();
        log::debug!("GET {url} -> {status}");

        if is_redirect(status) {
            if let Some(location) = response.header("location").and_then(|h| h.get(0)) {
                let next = url.join(location.as_str()).map_err(|e| {
                    ScrapeError::Http(format!("Bad redirect target {}: {e}", location.as_str()))
                })?;
                log::debug!("Following redirect from {url} to {next}");
                return Box::pin(self.get_with_redirects(
                    next,
                    Some(url.as_str()),
                    redirect_count + 1,
                ))
                .await;
            }
        }

        let body = response
            .body_string()
            .await
            .map_err(|e| ScrapeError::Http(e.to_string()))?;

        Ok(FetchedPage {
            status: status.into(),
            body,
        })
    }
}

fn is_redirect(status: StatusCode) -> bool {
    matches!(u16::from(status), 301 | 302 | 303 | 307 | 308)
}

#[async_trait(?Send)]
impl ShowSource for WefunkClient {
    async fn fetch_show(&self, show_id: u32) -> Result<String> {
        let url = show_url(&self.base_url, show_id);
        let page = self.get(&url).await?;

        match page.status {
            200..=299 => Ok(page.body),
            404 => Err(ScrapeError::NotFound { show_id }),
            status => Err(ScrapeError::Status { show_id, status }),
        }
    }
}
