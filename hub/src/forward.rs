//! Forwarding broadcasts into a channel.
//!
//! An [`EventHub`](crate::EventHub) is single-threaded. [`Forwarder`] is a handler that clones
//! each broadcast's arguments into a crossbeam channel, so another thread (or a later stage of
//! the same thread) can consume them without touching the hub.
//!
//! ```rust,ignore
//! let hub = EventHub::<(String, u16)>::new();
//! let (forwarder, receiver) = forward::channel();
//! hub.subscribe(forwarder);
//!
//! std::thread::spawn(move || {
//!     for (host, port) in receiver {
//!         println!("connect {host}:{port}");
//!     }
//! });
//!
//! hub.broadcast(("localhost".into(), 8080))?;
//! ```
//!
//! A receiver that has been dropped, or a bounded channel that is full, makes the forwarder
//! fail; the broadcast stops there like with any other failing handler.

use crossbeam::channel::{self, Receiver, Sender, TrySendError};

use crate::{error::HandlerError, handler::Handler};

/// Handler that sends a clone of every broadcast into a channel.
pub struct Forwarder<Args> {
    sender: Sender<Args>,
}

impl<Args> Forwarder<Args> {
    /// Wraps an existing sender; use [`channel()`] or [`bounded()`] to get the receiver too.
    pub fn new(sender: Sender<Args>) -> Self {
        Self { sender }
    }
}

/// Creates a forwarder backed by an unbounded channel.
pub fn channel<Args>() -> (Forwarder<Args>, Receiver<Args>) {
    let (sender, receiver) = channel::unbounded();
    (Forwarder::new(sender), receiver)
}

/// Creates a forwarder backed by a channel holding at most `capacity` pending broadcasts.
pub fn bounded<Args>(capacity: usize) -> (Forwarder<Args>, Receiver<Args>) {
    let (sender, receiver) = channel::bounded(capacity);
    (Forwarder::new(sender), receiver)
}

impl<Args: Clone + 'static> Handler<Args> for Forwarder<Args> {
    fn call(&self, args: &Args) -> Result<(), HandlerError> {
        match self.sender.try_send(args.clone()) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(_)) => Err(HandlerError::new("forward channel is full")),
            Err(TrySendError::Disconnected(_)) => {
                Err(HandlerError::new("forward channel is disconnected"))
            }
        }
    }
}
