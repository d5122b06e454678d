use std::{
    thread,
    time::{Duration, Instant},
};

use crate::draw::engine::{DrawCompleted, DrawTick};

/// Clock that paces the ticks of a running draw.
pub trait Scheduler {
    /// Marks the start of a draw; `elapsed_ms` counts from here.
    fn restart(&mut self);
    fn elapsed_ms(&self) -> u64;
    fn sleep_ms(&mut self, ms: u64);
}

/// Sleeps the calling thread for real.
#[derive(Debug)]
pub struct ThreadScheduler {
    started: Instant,
}

impl Default for ThreadScheduler {
    fn default() -> Self {
        Self {
            started: Instant::now(),
        }
    }
}

impl Scheduler for ThreadScheduler {
    fn restart(&mut self) {
        self.started = Instant::now();
    }

    fn elapsed_ms(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }

    fn sleep_ms(&mut self, ms: u64) {
        thread::sleep(Duration::from_millis(ms));
    }
}

/// Logical clock that jumps forward instead of sleeping.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    now_ms: u64,
    sleeps: usize,
}

impl ManualScheduler {
    /// Number of times a caller asked to wait since the last restart.
    pub fn sleeps(&self) -> usize {
        self.sleeps
    }
}

impl Scheduler for ManualScheduler {
    fn restart(&mut self) {
        self.now_ms = 0;
        self.sleeps = 0;
    }

    fn elapsed_ms(&self) -> u64 {
        self.now_ms
    }

    fn sleep_ms(&mut self, ms: u64) {
        self.now_ms = self.now_ms.saturating_add(ms);
        self.sleeps += 1;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawSignal {
    Continue,
    /// Tear the draw down; nothing is awarded
    Abandon,
}

/// Receives the events of a draw driven by `Raffle::run_draw`.
pub trait DrawObserver {
    fn on_tick(&mut self, _tick: &DrawTick) -> DrawSignal {
        DrawSignal::Continue
    }

    fn on_completed(&mut self, _completed: &DrawCompleted) {}
}

impl DrawObserver for () {}
