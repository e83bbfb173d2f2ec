//! Sitewatch engine: fetching, record storage and the check pipeline.
mod batch;
mod checker;
mod clock;
mod decode;
mod error;
mod fetch;
mod persist;
mod service;
mod store;
mod types;

pub use batch::{BatchRunner, DEFAULT_MAX_CONCURRENCY};
pub use checker::SiteChecker;
pub use clock::{fixed_clock, system_clock, Clock};
pub use decode::{decode_body, DecodedBody};
pub use error::{MonitorError, StoreError};
pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher, DEFAULT_USER_AGENT};
pub use persist::{ensure_parent_dir, AtomicFile, PersistError};
pub use service::{
    AddSiteResponse, ManualCheckResponse, MonitorService, RemoveSiteResponse, SingleCheckResponse,
};
pub use store::{JsonFileSiteStore, MemorySiteStore, SiteStore};
pub use types::{BatchReport, CheckSummary, FailureKind, FetchError, FetchMetadata, FetchOutput};
