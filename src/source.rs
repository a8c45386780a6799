use crate::Result;
use async_trait::async_trait;

/// Anything that can hand over the raw HTML of a show page.
///
/// The harvester only talks to this trait, so tests and offline mirrors can
/// stand in for the live archive.
///
/// # Mocking Support
///
/// When the `mock` feature is enabled, this crate provides `MockShowSource`
/// that implements this trait using the `mockall` library.
#[cfg_attr(feature = "mock", mockall::automock)]
#[async_trait(?Send)]
pub trait ShowSource {
    /// Fetch the page body for a show id.
    ///
    /// Only 2xx responses produce a body. A missing show is
    /// [`ScrapeError::NotFound`](crate::ScrapeError::NotFound), other statuses
    /// [`ScrapeError::Status`](crate::ScrapeError::Status) and transport
    /// failures [`ScrapeError::Http`](crate::ScrapeError::Http).
    async fn fetch_show(&self, show_id: u32) -> Result<String>;
}
