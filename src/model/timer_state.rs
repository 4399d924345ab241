use std::time::Duration;

use serde_with::serde_as;
use serde_with::DurationSeconds;

/// Elapsed play time, advanced by a once-a-second tick that does nothing
/// while the timer is paused or stopped.
#[serde_as]
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TimerState {
    #[serde_as(as = "DurationSeconds<u64>")]
    pub elapsed: Duration,
    pub paused: bool,
    pub stopped: bool,
}

impl TimerState {
    pub fn is_running(&self) -> bool {
        !self.paused && !self.stopped
    }

    pub fn seconds(&self) -> u64 {
        self.elapsed.as_secs()
    }

    /// Returns true when the tick advanced the timer.
    pub fn tick(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        self.elapsed = self.elapsed.saturating_add(Duration::from_secs(1));
        true
    }

    pub fn paused(&self) -> TimerState {
        let mut new_state = self.clone();
        new_state.paused = true;
        new_state
    }

    pub fn resumed(&self) -> TimerState {
        let mut new_state = self.clone();
        new_state.paused = false;
        new_state
    }

    pub fn stopped(&self) -> TimerState {
        let mut new_state = self.clone();
        new_state.stopped = true;
        new_state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_is_noop_while_paused() {
        let mut timer = TimerState::default();
        assert!(timer.tick());
        assert!(timer.tick());

        timer = timer.paused();
        assert!(!timer.tick());
        assert_eq!(timer.seconds(), 2);

        timer = timer.resumed();
        assert!(timer.tick());
        assert_eq!(timer.seconds(), 3);
    }

    #[test]
    fn test_stopped_timer_ignores_resume() {
        let mut timer = TimerState::default().stopped().resumed();
        assert!(!timer.tick());
        assert_eq!(timer.seconds(), 0);
    }

    #[test]
    fn test_serializes_elapsed_as_seconds() {
        let mut timer = TimerState::default();
        for _ in 0..42 {
            timer.tick();
        }
        let json = serde_json::to_value(&timer).unwrap();
        assert_eq!(json["elapsed"], 42);
    }
}
