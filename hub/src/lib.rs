//! Synchronous, single-threaded publish/subscribe.
//!
//! An [`EventHub`] keeps an ordered list of handlers and invokes all of them, in
//! registration order, every time it broadcasts. Parts of a program can react to something
//! happening without the emitter knowing who is listening.
//!
//! ```rust,ignore
//! use rusty_hub::EventHub;
//!
//! let hub = EventHub::<(String, u32)>::new();
//!
//! let greeter = hub.subscribe(|name: &String, visits: &u32| println!("hello {name} (#{visits})"));
//! hub.broadcast(("ada".to_string(), 3))?;
//!
//! hub.cancel(greeter);
//! ```
//!
//! - [`hub`]: the registry, subscription tokens and dispatch rules.
//! - [`handler`]: what counts as a handler and how return values become failures.
//! - [`error`]: errors raised by the hub and by handlers.
//! - [`forward`]: a handler that moves broadcasts into a channel.

pub mod error;
pub mod forward;
pub mod handler;
pub mod hub;
pub(crate) mod util;

pub use error::{BroadcastError, HandlerError, HubError};
pub use forward::Forwarder;
pub use handler::{Handler, HandlerRef, Outcome};
pub use hub::{EventHub, Subscription};
