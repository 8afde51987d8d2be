//! Dork engine: provider registry, fetching and the concurrent run coordinator.
mod control;
mod coordinator;
mod decode;
mod delay;
mod extract;
mod fetch;
mod headers;
mod persist;
mod provider;
mod types;
mod worker;

pub use coordinator::{Coordinator, EngineSettings, TimestampFn};
pub use decode::{decode_body, DecodedBody};
pub use delay::DelayRange;
pub use extract::LinkExtractor;
pub use fetch::{
    FailureKind, FetchError, FetchMetadata, FetchOutput, FetchSettings, Fetcher, ReqwestFetcher,
};
pub use headers::{header_set_with, random_header_set, USER_AGENTS};
pub use persist::{
    ensure_output_dir, flush_results, local_timestamp, results_filename, write_atomic,
    PersistError,
};
pub use provider::{
    Provider, ProviderRegistry, AOL, BING, BING_NEWS, DUCKDUCKGO, GOOGLE_API, NAVER, YAHOO, YANDEX,
};
pub use types::{
    EngineError, EngineEvent, FlushOutcome, PageFailure, PageProgress, PageRequest, RunSummary,
};

pub use dork_core::{EngineStats, ProviderStats, RunState};
