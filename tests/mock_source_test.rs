#[cfg(feature = "mock")]
mod mock_tests {
    use mockall::predicate::*;
    use wefunk_playlists::{HarvestConfig, Harvester, MockShowSource, ScrapeError};

    #[tokio::test]
    async fn test_mock_source_drives_parser() {
        let mut source = MockShowSource::new();
        source
            .expect_fetch_show()
            .with(eq(501))
            .times(1)
            .returning(|_| {
                Ok(r#"<html><head><title>Show 501</title></head><body>
                    <div id="playlistbox"><div><span class="artist">Ohio Players</span>
                    <span class="song">Funky Worm</span></div></div>
                    <a href="/dl/WEFUNK_Show_501_2003-07-14.mp3">mp3</a>
                    </body></html>"#
                    .to_string())
            });
        source
            .expect_fetch_show()
            .with(eq(502))
            .times(1)
            .returning(|show_id| Err(ScrapeError::NotFound { show_id }));

        let harvester = Harvester::new(source, HarvestConfig::default().without_delays());

        let show = harvester.process_show(501).await.unwrap();
        assert_eq!(show.tracks[0].track, "Funky Worm");
        assert_eq!(show.meta.recorded, "July 14, 2003");

        let err = harvester.process_show(502).await.unwrap_err();
        assert!(err.is_skip());
    }
}
