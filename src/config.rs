use std::path::PathBuf;
use std::time::Duration;

/// Root of the WEFUNK show archive.
pub const DEFAULT_BASE_URL: &str = "https://www.wefunkradio.com";

/// Public URL of a show page.
pub fn show_url(base_url: &str, show_id: u32) -> String {
    format!("{}/show/{show_id}", base_url.trim_end_matches('/'))
}

/// Default output file for an id range.
pub fn default_output_path(start: u32, end: u32) -> PathBuf {
    PathBuf::from(format!("wefunk_shows_{start}_{end}.json"))
}

/// Configuration for a harvesting run.
#[derive(Debug, Clone)]
pub struct HarvestConfig {
    /// Archive root, without the `/show/{id}` suffix
    pub base_url: String,
    /// Lower bound of the randomized pause between pages
    pub min_delay: Duration,
    /// Upper bound of the randomized pause between pages
    pub max_delay: Duration,
    /// Every show id divisible by this gets the longer milestone pause
    pub milestone_every: u32,
    /// Fixed pause taken at milestones instead of the random one
    pub milestone_pause: Duration,
    /// Write a snapshot after every show id divisible by this
    pub checkpoint_every: u32,
    /// Per-request timeout
    pub request_timeout: Duration,
    /// Where the JSON array is written
    pub output_path: PathBuf,
}

impl HarvestConfig {
    pub fn new(output_path: impl Into<PathBuf>) -> Self {
        Self {
            output_path: output_path.into(),
            ..Self::default()
        }
    }

    /// Disable every pause, for tests and local mirrors.
    pub fn without_delays(mut self) -> Self {
        self.min_delay = Duration::ZERO;
        self.max_delay = Duration::ZERO;
        self.milestone_pause = Duration::ZERO;
        self
    }
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            min_delay: Duration::from_secs(3),
            max_delay: Duration::from_secs(5),
            milestone_every: 50,
            milestone_pause: Duration::from_secs(10),
            checkpoint_every: 20,
            request_timeout: Duration::from_secs(10),
            output_path: PathBuf::from("wefunk_shows.json"),
        }
    }
}
