use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use anyhow::{Context, Result};

use crate::config::DEFAULT_TICK_MS;

enum PumpOp {
    Start(Duration),
    Stop,
    Quit,
}

/// Periodic tick source on its own thread.
///
/// The thread only calls `on_tick`; the engine itself stays on the caller's
/// thread. Dropping the handle stops and joins the thread.
pub struct Pump {
    control: Sender<PumpOp>,
    handle: Option<JoinHandle<()>>,
    running: bool,
}

impl Pump {
    /// Spawn the pump thread, idle. `on_tick` returns `false` once its
    /// receiver is gone, which ends the thread.
    pub fn spawn<F>(on_tick: F) -> Result<Self>
    where
        F: FnMut() -> bool + Send + 'static,
    {
        let (control, rx) = mpsc::channel();
        let handle = thread::Builder::new()
            .name("pump".into())
            .spawn(move || pump_thread(rx, on_tick))
            .context("can't spawn pump thread")?;
        Ok(Self {
            control,
            handle: Some(handle),
            running: false,
        })
    }

    pub fn start(&mut self, interval: Duration) {
        if self.running {
            return;
        }
        self.running = true;
        self.control.send(PumpOp::Start(interval)).ok();
    }

    pub fn stop(&mut self) {
        if self.running {
            self.running = false;
            self.control.send(PumpOp::Stop).ok();
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}

impl Drop for Pump {
    fn drop(&mut self) {
        self.control.send(PumpOp::Quit).ok();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::error!("pump thread panicked");
            }
        }
    }
}

fn pump_thread<F: FnMut() -> bool>(rx: Receiver<PumpOp>, mut on_tick: F) {
    let mut interval = Duration::from_millis(DEFAULT_TICK_MS);
    let mut running = false;

    loop {
        // Block when stopped, wait at most one interval when running.
        let op = if running {
            match rx.recv_timeout(interval) {
                Ok(op) => Some(op),
                Err(RecvTimeoutError::Timeout) => None,
                Err(RecvTimeoutError::Disconnected) => break,
            }
        } else {
            match rx.recv() {
                Ok(op) => Some(op),
                Err(_) => break,
            }
        };

        match op {
            None => {
                if !on_tick() {
                    log::debug!("tick receiver gone, pump exiting");
                    break;
                }
            }
            Some(PumpOp::Start(requested)) => {
                interval = if requested.is_zero() {
                    Duration::from_millis(DEFAULT_TICK_MS)
                } else {
                    requested
                };
                running = true;
                log::trace!("pump started, interval {:?}", interval);
            }
            Some(PumpOp::Stop) => {
                running = false;
                log::trace!("pump stopped");
            }
            Some(PumpOp::Quit) => break,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn counting_pump() -> (Pump, Arc<AtomicUsize>) {
        let ticks = Arc::new(AtomicUsize::new(0));
        let counter = ticks.clone();
        let pump = Pump::spawn(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            true
        })
        .unwrap();
        (pump, ticks)
    }

    #[test]
    fn test_idle_pump_does_not_tick() {
        let (pump, ticks) = counting_pump();
        thread::sleep(Duration::from_millis(50));
        assert!(!pump.is_running());
        assert_eq!(ticks.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_ticks_while_running() {
        let (mut pump, ticks) = counting_pump();
        pump.start(Duration::from_millis(2));
        assert!(pump.is_running());
        thread::sleep(Duration::from_millis(100));
        pump.stop();
        assert!(ticks.load(Ordering::SeqCst) > 0);
    }

    #[test]
    fn test_stop_is_idempotent() {
        let (mut pump, ticks) = counting_pump();
        pump.stop();
        pump.start(Duration::from_millis(2));
        pump.stop();
        pump.stop();
        assert!(!pump.is_running());

        // Give the thread time to see the stop, then check it stays quiet.
        thread::sleep(Duration::from_millis(30));
        let settled = ticks.load(Ordering::SeqCst);
        thread::sleep(Duration::from_millis(50));
        assert_eq!(ticks.load(Ordering::SeqCst), settled);
    }

    #[test]
    fn test_restart_after_stop() {
        let (mut pump, ticks) = counting_pump();
        pump.start(Duration::from_millis(2));
        pump.stop();
        thread::sleep(Duration::from_millis(20));
        let before = ticks.load(Ordering::SeqCst);
        pump.start(Duration::from_millis(2));
        thread::sleep(Duration::from_millis(100));
        assert!(ticks.load(Ordering::SeqCst) > before);
    }

    #[test]
    fn test_exits_when_sink_gone() {
        let (tx, rx) = mpsc::channel::<()>();
        let mut pump = Pump::spawn(move || tx.send(()).is_ok()).unwrap();
        drop(rx);
        pump.start(Duration::from_millis(1));
        thread::sleep(Duration::from_millis(20));
        drop(pump);
    }
}
