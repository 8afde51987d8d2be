use std::fmt;

/// Process-wide lifecycle of one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    #[default]
    Idle,
    Running,
    Paused,
    Stopping,
    Completed,
}

impl RunState {
    /// Workers may keep claiming and fetching only while the run is live.
    pub fn is_live(self) -> bool {
        matches!(self, RunState::Running | RunState::Paused)
    }

    pub fn is_paused(self) -> bool {
        self == RunState::Paused
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RunState::Idle => "idle",
            RunState::Running => "running",
            RunState::Paused => "paused",
            RunState::Stopping => "stopping",
            RunState::Completed => "completed",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunCommand {
    Start,
    Pause,
    Resume,
    Stop,
    /// Every worker has exited and the results were flushed.
    Drained,
}

/// Pure transition function: returns the next state, or `None` when the
/// command is a no-op in the current state.
pub fn transition(state: RunState, command: RunCommand) -> Option<RunState> {
    use RunState::*;

    match (state, command) {
        (Idle | Completed, RunCommand::Start) => Some(Running),
        (Running, RunCommand::Pause) => Some(Paused),
        (Paused, RunCommand::Resume) => Some(Running),
        (Running | Paused, RunCommand::Stop) => Some(Stopping),
        (Stopping, RunCommand::Drained) => Some(Completed),
        _ => None,
    }
}
