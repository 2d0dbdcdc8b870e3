use crate::clock::{Clock, MonotonicClock};
use crate::format::{format, FormattedTime};
use crate::laps::{Lap, LapList};
use crate::{TimerCore, TimerState};

/// Stopwatch engine: timer state, lap history and the published elapsed time.
///
/// Not internally synchronised. The owner calls every method, including
/// [`Stopwatch::tick`], from one thread. Commands that do not apply to the
/// current state are silent no-ops.
#[derive(Debug)]
pub struct Stopwatch<C: Clock = MonotonicClock> {
    clock: C,
    timer: TimerCore,
    laps: LapList,
    live_ms: u64,
}

impl Default for Stopwatch<MonotonicClock> {
    fn default() -> Self {
        Self::new(MonotonicClock::new())
    }
}

impl<C: Clock> Stopwatch<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            timer: TimerCore::new(),
            laps: LapList::new(),
            live_ms: 0,
        }
    }

    pub fn start(&mut self) {
        let now = self.clock.now_ms();
        self.timer.start(now);
    }

    pub fn pause(&mut self) {
        if !self.timer.is_running() {
            return;
        }
        let now = self.clock.now_ms();
        self.timer.pause(now);
        self.live_ms = self.timer.accumulated_ms();
    }

    /// Same as [`Stopwatch::pause`]: time freezes, laps are kept.
    pub fn stop(&mut self) {
        self.pause();
    }

    pub fn reset(&mut self) {
        self.timer.reset();
        self.laps.reset();
        self.live_ms = 0;
    }

    /// Record a lap at the current elapsed time. `None` unless running.
    pub fn lap(&mut self) -> Option<Lap> {
        if !self.timer.is_running() {
            return None;
        }
        self.tick();
        Some(self.laps.record(self.live_ms))
    }

    pub fn remove_lap(&mut self, sequence: u64) -> Option<Lap> {
        self.laps.remove(sequence)
    }

    pub fn clear_laps(&mut self) {
        self.laps.clear();
    }

    /// Recompute the live elapsed time. Stored time only changes on pause,
    /// so repeated ticks never accumulate rounding error.
    pub fn tick(&mut self) {
        let now = self.clock.now_ms();
        self.live_ms = self.timer.elapsed_ms(now);
    }

    /// Last published elapsed time.
    pub fn elapsed_ms(&self) -> u64 {
        if self.timer.is_running() {
            self.live_ms
        } else {
            self.timer.accumulated_ms()
        }
    }

    pub fn formatted_time(&self) -> FormattedTime {
        format(self.elapsed_ms())
    }

    pub fn state(&self) -> TimerState {
        self.timer.state()
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_running()
    }

    pub fn laps(&self) -> &LapList {
        &self.laps
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}
