//! Pure stopwatch logic with no platform dependencies.
//! Testable on host, drivable by any tick source.

mod clock;
mod engine;
pub mod format;
mod laps;

pub use clock::{Clock, ManualClock, MonotonicClock};
pub use engine::Stopwatch;
pub use format::{format, format_delta, format_hms_cs, format_lap_time, FormattedTime};
pub use laps::{Lap, LapList, LapRow};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TimerState {
    Idle,
    Running,
    Paused,
}

impl TimerState {
    pub fn label(self) -> &'static str {
        match self {
            TimerState::Idle => "Ready",
            TimerState::Running => "Running",
            TimerState::Paused => "Paused",
        }
    }
}

/// Pause/resume state machine. Every call takes the current time explicitly,
/// so the same core serves interval and frame driven callers.
#[derive(Clone, Debug)]
pub struct TimerCore {
    state: TimerState,
    accumulated_ms: u64,
    segment_start_ms: Option<u64>,
}

impl Default for TimerCore {
    fn default() -> Self {
        Self::new()
    }
}

impl TimerCore {
    pub fn new() -> Self {
        Self {
            state: TimerState::Idle,
            accumulated_ms: 0,
            segment_start_ms: None,
        }
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }

    pub fn start(&mut self, now_ms: u64) {
        if self.state == TimerState::Running {
            return;
        }
        self.segment_start_ms = Some(now_ms);
        self.state = TimerState::Running;
    }

    pub fn pause(&mut self, now_ms: u64) {
        if self.state != TimerState::Running {
            return;
        }
        if let Some(start) = self.segment_start_ms.take() {
            self.accumulated_ms += now_ms.saturating_sub(start);
        }
        self.state = TimerState::Paused;
    }

    pub fn reset(&mut self) {
        self.accumulated_ms = 0;
        self.segment_start_ms = None;
        self.state = TimerState::Idle;
    }

    /// Stored time, excluding the open running segment.
    pub fn accumulated_ms(&self) -> u64 {
        self.accumulated_ms
    }

    pub fn elapsed_ms(&self, now_ms: u64) -> u64 {
        match (self.state, self.segment_start_ms) {
            (TimerState::Running, Some(start)) => {
                self.accumulated_ms + now_ms.saturating_sub(start)
            }
            _ => self.accumulated_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_basic() {
        let mut t = TimerCore::new();
        assert_eq!(t.state(), TimerState::Idle);
        assert_eq!(t.elapsed_ms(0), 0);

        t.start(1000);
        assert_eq!(t.state(), TimerState::Running);
        assert_eq!(t.elapsed_ms(1500), 500);
        assert_eq!(t.elapsed_ms(2000), 1000);

        t.pause(2000);
        assert_eq!(t.state(), TimerState::Paused);
        assert_eq!(t.elapsed_ms(5000), 1000); // Stays at 1000 when paused

        t.start(5000);
        assert_eq!(t.elapsed_ms(5500), 1500);

        t.reset();
        assert_eq!(t.state(), TimerState::Idle);
        assert_eq!(t.elapsed_ms(10000), 0);
    }

    #[test]
    fn test_start_twice_keeps_segment() {
        let mut t = TimerCore::new();
        t.start(100);
        t.start(400);
        assert_eq!(t.elapsed_ms(600), 500);
    }

    #[test]
    fn test_pause_when_not_running() {
        let mut t = TimerCore::new();
        t.pause(1000);
        assert_eq!(t.state(), TimerState::Idle);
        assert_eq!(t.accumulated_ms(), 0);

        t.start(0);
        t.pause(300);
        t.pause(900);
        assert_eq!(t.accumulated_ms(), 300);
    }

    #[test]
    fn test_clock_going_backwards() {
        let mut t = TimerCore::new();
        t.start(5000);
        assert_eq!(t.elapsed_ms(4000), 0);
        t.pause(4000);
        assert_eq!(t.accumulated_ms(), 0);
        assert_eq!(t.state(), TimerState::Paused);
    }

    #[test]
    fn test_accumulated_excludes_open_segment() {
        let mut t = TimerCore::new();
        t.start(0);
        t.pause(250);
        t.start(1000);
        assert_eq!(t.accumulated_ms(), 250);
        assert_eq!(t.elapsed_ms(1100), 350);
    }
}
