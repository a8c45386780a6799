use thiserror::Error;

/// Error types for show archive operations.
///
/// This enum covers everything that can go wrong between requesting a show id
/// and persisting its record: transport failures, pages that belong to another
/// show, pages with nothing worth extracting, and local I/O.
///
/// Most variants are per-show skips rather than failures of the whole batch.
/// Use [`ScrapeError::is_skip`] to tell them apart:
///
/// ```rust
/// use wefunk_playlists::ScrapeError;
///
/// let err = ScrapeError::NotFound { show_id: 42 };
/// assert!(err.is_skip());
/// assert!(!ScrapeError::Cancelled.is_skip());
/// ```
#[derive(Error, Debug)]
pub enum ScrapeError {
    /// The archive reported that the show does not exist (HTTP 404).
    #[error("Show {show_id} not found (404)")]
    NotFound { show_id: u32 },

    /// Any other non-2xx response for a show page.
    #[error("Show {show_id} returned status {status}")]
    Status { show_id: u32, status: u16 },

    /// HTTP/network related errors.
    ///
    /// This includes connection failures, timeouts, DNS errors and too many
    /// redirects.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The fetched page declares a different show than the one requested.
    ///
    /// Usually the archive silently redirected an unknown id to a neighbouring show.
    #[error("Show {requested} mismatch (redirected to show {found})")]
    IdentityMismatch { requested: u32, found: u32 },

    /// The page title carries no show number at all (homepage, soft 404).
    #[error("Show {requested} invalid (id not found in page title)")]
    MissingIdentity { requested: u32 },

    /// Neither a playlist nor a description could be recovered.
    #[error("Show {show_id} appears empty")]
    EmptyPage { show_id: u32 },

    /// Unexpected failure while parsing a page.
    #[error("Failed to parse page: {0}")]
    Parse(String),

    /// The batch was interrupted by the operator.
    #[error("Operation cancelled")]
    Cancelled,

    /// File system I/O errors while writing snapshots.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization of the output collection failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ScrapeError {
    /// Whether this error only means "skip this show id and carry on".
    pub fn is_skip(&self) -> bool {
        matches!(
            self,
            ScrapeError::NotFound { .. }
                | ScrapeError::Status { .. }
                | ScrapeError::Http(_)
                | ScrapeError::IdentityMismatch { .. }
                | ScrapeError::MissingIdentity { .. }
                | ScrapeError::EmptyPage { .. }
        )
    }
}
