use std::time::Duration;

use dork_core::{transition, RunCommand, RunState};
use tokio::sync::watch;

/// Shared run/pause/stop flags observed by every worker.
///
/// Backed by a watch channel so paused workers sleep until the state
/// changes instead of polling, and every observer reads the current value.
#[derive(Debug)]
pub(crate) struct RunControl {
    state: watch::Sender<RunState>,
}

impl RunControl {
    pub(crate) fn new() -> Self {
        let (state, _) = watch::channel(RunState::Idle);
        Self { state }
    }

    pub(crate) fn state(&self) -> RunState {
        *self.state.borrow()
    }

    /// Applies `command` atomically; returns the new state if it changed.
    pub(crate) fn apply(&self, command: RunCommand) -> Option<RunState> {
        let mut next = None;
        self.state.send_if_modified(|state| match transition(*state, command) {
            Some(new_state) => {
                *state = new_state;
                next = Some(new_state);
                true
            }
            None => false,
        });
        next
    }

    /// Waits while the run is paused. Returns whether the run is still live.
    pub(crate) async fn wait_while_paused(&self) -> bool {
        let mut rx = self.state.subscribe();
        rx.wait_for(|state| !state.is_paused())
            .await
            .map(|state| state.is_live())
            .unwrap_or(false)
    }

    /// Sleeps for `delay` unless a stop arrives first. Returns whether the
    /// run is still live afterwards.
    pub(crate) async fn sleep_unless_stopped(&self, delay: Duration) -> bool {
        if delay.is_zero() {
            return self.state().is_live();
        }
        let mut rx = self.state.subscribe();
        tokio::select! {
            _ = tokio::time::sleep(delay) => self.state().is_live(),
            _ = rx.wait_for(|state| !state.is_live()) => false,
        }
    }

    pub(crate) async fn wait_for_state(&self, target: RunState) {
        let mut rx = self.state.subscribe();
        let _ = rx.wait_for(|state| *state == target).await;
    }
}
