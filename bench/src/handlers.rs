//! Handler types used across benchmarks.
//!
//! Each handler does a small, observable amount of work so the optimizer cannot discard the
//! call, without the work itself dominating the measurement.

use std::cell::Cell;

use rusty_hub::{Handler, HandlerError};

/// Broadcast payload resembling a small game or UI event (32 bytes).
#[derive(Clone, Copy, Debug, Default)]
pub struct Tick {
    pub frame: u64,
    pub delta: f64,
    pub x: f32,
    pub y: f32,
    pub flags: u64,
}

/// Counts how often it was invoked.
#[derive(Default)]
pub struct Counter {
    pub calls: Cell<u64>,
}

impl Handler<(Tick,)> for Counter {
    #[inline]
    fn call(&self, _: &(Tick,)) -> Result<(), HandlerError> {
        self.calls.set(self.calls.get() + 1);
        Ok(())
    }
}

/// Folds every payload into a running total.
#[derive(Default)]
pub struct Accumulator {
    pub total: Cell<f64>,
}

impl Handler<(Tick,)> for Accumulator {
    #[inline]
    fn call(&self, (event,): &(Tick,)) -> Result<(), HandlerError> {
        let value = event.delta + f64::from(event.x) * f64::from(event.y);
        self.total.set(self.total.get() + value);
        Ok(())
    }
}

/// A tick for the given frame number.
pub fn tick(frame: u64) -> Tick {
    Tick {
        frame,
        delta: 1.0 / 60.0,
        x: frame as f32,
        y: 0.5,
        flags: frame & 0xff,
    }
}
