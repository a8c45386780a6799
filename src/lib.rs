pub mod cancel;
pub mod client;
pub mod config;
pub mod document;
pub mod error;
pub mod harvest;
pub mod headers;
pub mod parsing;
pub mod persistence;
pub mod show;
pub mod source;
pub mod text;
pub mod throttle;
pub mod track;

pub use cancel::CancellationState;
pub use client::WefunkClient;
pub use config::HarvestConfig;
pub use document::ShowDocument;
pub use error::ScrapeError;
pub use harvest::{HarvestReport, HarvestStats, Harvester};
pub use parsing::ShowParser;
pub use persistence::SnapshotPersistence;
pub use show::{MetaInfo, ShowRecord, UNKNOWN_DATE};
pub use source::ShowSource;
pub use track::TrackEntry;

#[cfg(feature = "mock")]
pub use source::MockShowSource;

pub type Result<T> = std::result::Result<T, ScrapeError>;
