//! Benchmark utilities for rusty_hub.
//!
//! - **Handlers**: representative handlers of different weights
//! - **Churn**: hubs that are subscribed to and unsubscribed from in a seeded random order
//!
//! # Running Benchmarks
//!
//! ```bash
//! # Run all benchmarks
//! cargo bench -p rusty_hub_bench
//!
//! # Run specific benchmark group
//! cargo bench -p rusty_hub_bench -- broadcast
//! ```
//!
//! Results are written to `target/criterion/` with HTML reports.

pub mod churn;
pub mod handlers;
