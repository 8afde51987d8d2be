//! Dork core: pure run-state machine, work partitioning and result filtering.
mod accumulated;
mod dorks;
mod filter;
mod state;
mod stats;

pub use accumulated::AccumulatedUrls;
pub use dorks::{parse_dorks, ClaimedDork, DorkQueue};
pub use filter::{UrlFilter, ACCEPTED_SCHEMES, DEFAULT_EXCLUDED_DOMAINS};
pub use state::{transition, RunCommand, RunState};
pub use stats::{EngineStats, ProviderStats};
