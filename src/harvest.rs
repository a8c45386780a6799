//! Sequential harvesting of a show id range.
//!
//! One show is fetched and parsed before the next is requested. Per-show
//! failures are logged and skipped; only cancellation ends a run early, and
//! even then everything gathered so far is written out.

use crate::cancel::{sleep_with_cancel, CancellationState};
use crate::config::HarvestConfig;
use crate::parsing::ShowParser;
use crate::persistence::SnapshotPersistence;
use crate::source::ShowSource;
use crate::throttle::{pause_after, PauseKind};
use crate::{Result, ScrapeError, ShowRecord};

/// Counters for a finished run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HarvestStats {
    pub requested: u32,
    pub accepted: u32,
    pub skipped: u32,
    pub errors: u32,
    pub cancelled: bool,
}

#[derive(Debug, Clone)]
pub struct HarvestReport {
    pub shows: Vec<ShowRecord>,
    pub stats: HarvestStats,
}

pub struct Harvester<S: ShowSource> {
    source: S,
    parser: ShowParser,
    config: HarvestConfig,
    cancel: CancellationState,
}

impl<S: ShowSource> Harvester<S> {
    pub fn new(source: S, config: HarvestConfig) -> Self {
        Self {
            source,
            parser: ShowParser::new(config.base_url.clone()),
            config,
            cancel: CancellationState::new(),
        }
    }

    /// Share a cancellation flag with the caller (e.g. a Ctrl-C handler).
    pub fn with_cancellation(mut self, cancel: CancellationState) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn config(&self) -> &HarvestConfig {
        &self.config
    }

    /// Fetch and parse a single show.
    pub async fn process_show(&self, show_id: u32) -> Result<ShowRecord> {
        let body = self.source.fetch_show(show_id).await?;
        self.parser.parse_show(&body, show_id)
    }

    /// Harvest every show id in `start..=end` (bounds may be given in either order).
    ///
    /// Snapshots are written every `checkpoint_every` ids and once more at the
    /// end. Only the final write can fail the run.
    pub async fn run(&self, start: u32, end: u32) -> Result<HarvestReport> {
        let (start, end) = if start > end { (end, start) } else { (start, end) };
        let mut shows = Vec::new();
        let mut stats = HarvestStats::default();

        log::info!(
            "Starting scrape from show {start} to {end}, saving to {}",
            self.config.output_path.display()
        );

        for show_id in start..=end {
            if self.cancel.is_cancelled() {
                stats.cancelled = true;
                break;
            }
            stats.requested += 1;

            match self.process_show(show_id).await {
                Ok(show) => {
                    log::info!(
                        "Processed show {show_id}: date='{}', tracks={}, links={}",
                        show.meta.recorded,
                        show.tracks.len(),
                        show.link_count()
                    );
                    stats.accepted += 1;
                    shows.push(show);
                }
                Err(e) if e.is_skip() => {
                    log::warn!("{e} - skipping");
                    stats.skipped += 1;
                }
                Err(e) => {
                    log::error!("Error processing show {show_id}: {e}");
                    stats.errors += 1;
                }
            }

            if self.config.checkpoint_every > 0 && show_id % self.config.checkpoint_every == 0 {
                match SnapshotPersistence::save(&self.config.output_path, &shows) {
                    Ok(()) => log::info!("Saved progress ({} shows)", shows.len()),
                    Err(e) => log::warn!("Failed to save progress: {e}"),
                }
            }

            if show_id == end {
                break;
            }

            let (pause, kind) = pause_after(show_id, &self.config);
            if kind == PauseKind::Milestone {
                log::info!("Taking a {}s break", pause.as_secs());
            }
            match sleep_with_cancel(self.cancel.subscribe(), pause).await {
                Ok(()) => {}
                Err(ScrapeError::Cancelled) => {
                    stats.cancelled = true;
                    break;
                }
                Err(e) => return Err(e),
            }
        }

        if stats.cancelled {
            log::warn!("Stopping early, keeping {} shows", shows.len());
        }
        SnapshotPersistence::save(&self.config.output_path, &shows)?;
        log::info!(
            "Done. Scraped {} shows. Saved to {}",
            shows.len(),
            self.config.output_path.display()
        );

        Ok(HarvestReport { shows, stats })
    }
}
