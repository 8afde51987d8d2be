use std::path::PathBuf;

use dork_core::{EngineStats, RunState};

/// One page request issued by a worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub provider: String,
    pub dork: String,
    pub page: usize,
    pub url: String,
}

/// A page that was fetched and filtered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageProgress {
    pub provider: String,
    pub dork: String,
    /// Zero-based page index.
    pub page: usize,
    /// Candidates the extractor produced.
    pub total_found: usize,
    /// Candidates that survived filtering.
    pub valid_found: usize,
    /// Size of the accumulated URL set after this page.
    pub accumulated: usize,
}

/// A page whose request failed; the run continues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageFailure {
    pub provider: String,
    pub dork: String,
    pub page: usize,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlushOutcome {
    /// Nothing was accumulated, so no file was written.
    Skipped,
    Written(PathBuf),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub urls: Vec<String>,
    pub stats: EngineStats,
    pub dorks_total: usize,
    pub dorks_claimed: usize,
    pub flush: FlushOutcome,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    Page(PageProgress),
    PageFailed(PageFailure),
    StateChanged(RunState),
    /// Last event of a run.
    RunCompleted(RunSummary),
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("a run is already in progress")]
    AlreadyRunning,
    #[error("no tokio runtime available to spawn workers")]
    NoRuntime,
}
