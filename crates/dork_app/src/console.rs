use chrono::NaiveTime;
use dork_engine::{EngineEvent, EngineStats, FlushOutcome, RunState};

/// One progress line for an engine event.
pub(crate) fn describe(event: &EngineEvent) -> String {
    match event {
        EngineEvent::Page(progress) => format!(
            "{} - Dork: '{}' - Page {} - Found: {} - Valid: {}",
            progress.provider,
            progress.dork,
            progress.page + 1,
            progress.total_found,
            progress.valid_found
        ),
        EngineEvent::PageFailed(failure) => format!(
            "Error in {} for dork '{}' (page {}): {}",
            failure.provider,
            failure.dork,
            failure.page + 1,
            failure.message
        ),
        EngineEvent::StateChanged(state) => match state {
            RunState::Running => "Search running".to_string(),
            RunState::Paused => "Search paused".to_string(),
            RunState::Stopping => "Stopping search...".to_string(),
            RunState::Completed => "Search completed".to_string(),
            RunState::Idle => "Idle".to_string(),
        },
        EngineEvent::RunCompleted(summary) => match &summary.flush {
            FlushOutcome::Written(path) => format!("Results saved to {}", path.display()),
            FlushOutcome::Failed(err) => format!("Error saving results: {err}"),
            FlushOutcome::Skipped => "No valid URLs found; nothing saved".to_string(),
        },
    }
}

/// Lines printed for `event`. Page events are followed by the live
/// counters; `stats` is only read for those.
pub(crate) fn progress_lines(
    event: &EngineEvent,
    stats: impl FnOnce() -> EngineStats,
) -> Vec<String> {
    let mut lines = vec![describe(event)];
    if matches!(event, EngineEvent::Page(_)) {
        lines.push(counters(&stats()));
    }
    lines
}

pub(crate) fn counters(stats: &EngineStats) -> String {
    let totals = stats.totals();
    format!("URLs found: {} | Valid URLs: {}", totals.total, totals.valid)
}

pub(crate) fn stamped(time: NaiveTime, message: &str) -> String {
    format!("[{}] {}", time.format("%H:%M:%S"), message)
}
