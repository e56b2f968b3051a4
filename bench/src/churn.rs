//! Subscribe/unsubscribe churn scenario.
//!
//! Models a hub whose listeners come and go: a fixed population of shared handlers is
//! registered, then removed in a seeded random order so runs are reproducible.

use std::rc::Rc;

use rand::{SeedableRng, seq::SliceRandom};
use rand_chacha::ChaCha8Rng;
use rusty_hub::EventHub;

use crate::handlers::{Counter, Tick};

/// A hub together with the shared handlers registered on it.
pub struct Churn {
    pub hub: EventHub<(Tick,)>,
    pub handlers: Vec<Rc<Counter>>,
    rng: ChaCha8Rng,
}

impl Churn {
    /// Create a hub with `count` shared counters registered.
    pub fn new(count: usize, seed: u64) -> Self {
        let hub = EventHub::with_capacity(count);
        let handlers: Vec<_> = (0..count).map(|_| Rc::new(Counter::default())).collect();
        for handler in &handlers {
            hub.subscribe_shared(handler);
        }

        Self {
            hub,
            handlers,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Remove every handler in a random order, then register them all again.
    ///
    /// Returns the number of registrations removed.
    pub fn cycle(&mut self) -> usize {
        let mut order: Vec<usize> = (0..self.handlers.len()).collect();
        order.shuffle(&mut self.rng);

        let removed = order
            .iter()
            .map(|&index| self.hub.unsubscribe(&self.handlers[index]))
            .sum();

        for handler in &self.handlers {
            self.hub.subscribe_shared(handler);
        }

        removed
    }
}
