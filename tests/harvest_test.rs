use async_trait::async_trait;
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::PathBuf;
use wefunk_playlists::{
    CancellationState, HarvestConfig, Harvester, Result, ScrapeError, ShowSource,
    SnapshotPersistence,
};

/// Serves canned pages and remembers which ids were requested.
#[derive(Default)]
struct CannedSource {
    pages: HashMap<u32, String>,
    requested: RefCell<Vec<u32>>,
    cancel_after: Option<(u32, CancellationState)>,
}

impl CannedSource {
    fn with_show(mut self, show_id: u32, body: String) -> Self {
        self.pages.insert(show_id, body);
        self
    }
}

#[async_trait(?Send)]
impl ShowSource for CannedSource {
    async fn fetch_show(&self, show_id: u32) -> Result<String> {
        self.requested.borrow_mut().push(show_id);
        if let Some((after, cancel)) = &self.cancel_after {
            if show_id == *after {
                cancel.cancel();
            }
        }
        match show_id {
            13 => Err(ScrapeError::Status {
                show_id,
                status: 503,
            }),
            14 => Err(ScrapeError::Http("connection reset".to_string())),
            _ => self
                .pages
                .get(&show_id)
                .cloned()
                .ok_or(ScrapeError::NotFound { show_id }),
        }
    }
}

fn show_page(show_id: u32, title_id: u32) -> String {
    format!(
        r#"<html><head><title>WEFUNK Show {title_id}</title></head><body>
        <p id="showdescription">Show number {show_id}</p>
        <div id="playlistbox"><div>Artist {show_id} - Track {show_id}</div></div>
        </body></html>"#
    )
}

fn output_path(name: &str) -> PathBuf {
    std::env::temp_dir()
        .join(format!("wefunk-harvest-{}", std::process::id()))
        .join(name)
}

#[test_log::test(tokio::test)]
async fn test_run_skips_bad_pages_and_keeps_order() {
    let path = output_path("range.json");
    let source = CannedSource::default()
        .with_show(10, show_page(10, 10))
        .with_show(11, show_page(11, 12)) // redirected to another show
        .with_show(12, "<html><head><title>Show 12</title></head></html>".to_string())
        .with_show(15, show_page(15, 15));

    let config = HarvestConfig::new(&path).without_delays();
    let harvester = Harvester::new(source, config);
    let report = harvester.run(16, 10).await.unwrap();

    let ids: Vec<&str> = report.shows.iter().map(|s| s.show_id.as_str()).collect();
    assert_eq!(ids, vec!["10", "15"]);
    assert_eq!(report.stats.requested, 7);
    assert_eq!(report.stats.accepted, 2);
    // 11 mismatch, 12 empty, 13 status, 14 transport, 16 not found
    assert_eq!(report.stats.skipped, 5);
    assert_eq!(report.stats.errors, 0);
    assert!(!report.stats.cancelled);

    let saved = SnapshotPersistence::load(&path).unwrap();
    assert_eq!(saved, report.shows);
    assert_eq!(saved[1].tracks[0].artist, "Artist 15");
}

#[test_log::test(tokio::test)]
async fn test_cancellation_flushes_collected_shows() {
    let path = output_path("cancelled.json");
    let cancel = CancellationState::new();
    let source = CannedSource {
        cancel_after: Some((21, cancel.clone())),
        ..CannedSource::default()
    }
    .with_show(20, show_page(20, 20))
    .with_show(21, show_page(21, 21))
    .with_show(22, show_page(22, 22));

    let harvester =
        Harvester::new(source, HarvestConfig::new(&path).without_delays()).with_cancellation(cancel);
    let report = harvester.run(20, 22).await.unwrap();

    assert!(report.stats.cancelled);
    assert_eq!(report.stats.accepted, 2);
    assert_eq!(SnapshotPersistence::load(&path).unwrap().len(), 2);
}

#[test_log::test(tokio::test)]
async fn test_process_single_show() {
    let source = CannedSource::default().with_show(7, show_page(7, 7));
    let harvester = Harvester::new(source, HarvestConfig::default().without_delays());

    let show = harvester.process_show(7).await.unwrap();
    assert_eq!(show.description, "Show number 7");

    assert!(matches!(
        harvester.process_show(8).await,
        Err(ScrapeError::NotFound { show_id: 8 })
    ));
}
