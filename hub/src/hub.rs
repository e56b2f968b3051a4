//! The handler registry and its synchronous dispatcher.
//!
//! This module provides [`EventHub`], an ordered list of handlers that are all invoked, in
//! registration order, whenever the hub broadcasts.
//!
//! # Overview
//!
//! - **Registration**: [`subscribe()`](EventHub::subscribe) appends a handler and returns a
//!   [`Subscription`] token naming that one registration. Nothing is deduplicated.
//! - **Deregistration**: [`unsubscribe()`](EventHub::unsubscribe) removes every registration
//!   of a shared handler by pointer identity; [`cancel()`](EventHub::cancel) removes exactly
//!   one registration by token.
//! - **Dispatch**: [`broadcast()`](EventHub::broadcast) hands the same argument tuple to every
//!   handler and stops at the first failure.
//!
//! # Identity
//!
//! Two handlers that would behave identically are still different handlers. Identity is the
//! `Rc` allocation a handler lives in, never value equality:
//!
//! ```rust,ignore
//! let audit = Rc::new(|user: &String| println!("login: {user}"));
//!
//! hub.subscribe_shared(&audit);
//! hub.subscribe_shared(&audit);   // registered twice, invoked twice
//!
//! assert_eq!(hub.unsubscribe(&audit), 2);
//! ```
//!
//! Handlers given by value with [`subscribe()`](EventHub::subscribe) have no shared handle, so
//! their token is their only identity.
//!
//! # Dispatch Policy
//!
//! A broadcast works on a snapshot of the handler list taken when it starts, and the registry
//! is not borrowed while handlers run. Handlers may therefore subscribe, unsubscribe or even
//! broadcast on the same hub. Such changes apply from the next broadcast on:
//!
//! - a handler added during a broadcast is not invoked by that broadcast;
//! - a handler removed during a broadcast is still invoked by that broadcast if it had not
//!   been reached yet.
//!
//! A handler that returns an error aborts the broadcast; the remaining handlers are skipped and
//! the caller gets a [`BroadcastError`]. A handler that panics unwinds through `broadcast` the
//! same way. In both cases the hub stays intact and usable.
//!
//! # Thread Safety
//!
//! `EventHub` is neither `Send` nor `Sync`. Use [`Forwarder`](crate::forward::Forwarder) to
//! hand broadcasts over to another thread.

use std::{
    any::Any,
    cell::{Cell, RefCell},
    fmt,
    rc::Rc,
};

use log::{debug, trace, warn};

use crate::{
    error::{BroadcastError, HubError},
    handler::{Handler, HandlerRef},
};

/// Token naming a single registration on an [`EventHub`].
///
/// Tokens are unique within one hub and never reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Subscription(u64);

impl Subscription {
    #[inline]
    pub(crate) const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Numeric value of the token.
    #[inline]
    pub const fn id(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One registration: the token and the handler it names.
struct Entry<Args> {
    subscription: Subscription,
    handler: HandlerRef<Args>,
}

impl<Args> Clone for Entry<Args> {
    fn clone(&self) -> Self {
        Self {
            subscription: self.subscription,
            handler: Rc::clone(&self.handler),
        }
    }
}

/// Data address of an `Rc` allocation, ignoring any pointer metadata.
#[inline]
fn identity<T: ?Sized>(rc: &Rc<T>) -> *const () {
    Rc::as_ptr(rc).cast::<()>()
}

/// Ordered registry of handlers sharing the argument tuple `Args`.
///
/// See the [module documentation](self) for identity and dispatch rules.
///
/// # Example
///
/// ```rust,ignore
/// let hub = EventHub::<(u32, u32)>::new();
///
/// let moved = hub.subscribe(|x: &u32, y: &u32| println!("moved to {x},{y}"));
///
/// hub.broadcast((3, 4))?;
/// hub.cancel(moved);
/// hub.broadcast((5, 6))?;   // nobody listening, still fine
/// ```
pub struct EventHub<Args> {
    entries: RefCell<Vec<Entry<Args>>>,
    next_id: Cell<u64>,
}

impl<Args: 'static> EventHub<Args> {
    /// Creates a new hub with no handlers.
    pub const fn new() -> Self {
        Self {
            entries: RefCell::new(Vec::new()),
            next_id: Cell::new(0),
        }
    }

    /// Creates a new hub with room for `capacity` registrations before reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: RefCell::new(Vec::with_capacity(capacity)),
            next_id: Cell::new(0),
        }
    }

    /// Appends a handler owned by the hub.
    ///
    /// The returned token is the only way to remove this registration again.
    pub fn subscribe<H: Handler<Args>>(&self, handler: H) -> Subscription {
        self.register(Rc::new(handler))
    }

    /// Appends a shared handler.
    ///
    /// The hub keeps a clone of the `Rc`; passing the same `Rc` to
    /// [`unsubscribe()`](Self::unsubscribe) removes every registration made from it.
    pub fn subscribe_shared<H: Handler<Args>>(&self, handler: &Rc<H>) -> Subscription {
        let handler: HandlerRef<Args> = Rc::clone(handler) as HandlerRef<Args>;
        self.register(handler)
    }

    /// Appends a value whose type is only known at runtime.
    ///
    /// The value is accepted only if it is a [`HandlerRef<Args>`], that is, already coerced to
    /// `Rc<dyn Handler<Args>>`. A concrete `Rc<H>` is rejected even when `H` implements
    /// [`Handler<Args>`]: the concrete type is not nameable here. Anything else is rejected
    /// with [`HubError::NotCallable`] and the hub is left unchanged.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let handler: HandlerRef<(i32,)> = Rc::new(|v: &i32| println!("{v}"));
    ///
    /// assert!(hub.subscribe_any(&handler).is_ok());
    /// assert_eq!(hub.subscribe_any(&42), Err(HubError::NotCallable));
    /// ```
    pub fn subscribe_any(&self, value: &dyn Any) -> Result<Subscription, HubError> {
        match value.downcast_ref::<HandlerRef<Args>>() {
            Some(handler) => Ok(self.register(Rc::clone(handler))),
            None => {
                warn!(
                    "rejected subscription: value is not a handler for {}",
                    std::any::type_name::<Args>()
                );
                Err(HubError::NotCallable)
            }
        }
    }

    fn register(&self, handler: HandlerRef<Args>) -> Subscription {
        let subscription = Subscription::new(self.next_id.get());
        self.next_id.set(subscription.id() + 1);

        let mut entries = self.entries.borrow_mut();
        entries.push(Entry {
            subscription,
            handler,
        });
        trace!("subscribed {subscription} ({} registered)", entries.len());

        subscription
    }

    /// Removes every registration of `handler`, matched by pointer identity.
    ///
    /// Any `Rc` may be passed, including ones that were never subscribed or are not handlers
    /// at all; those simply match nothing. Returns the number of registrations removed.
    pub fn unsubscribe<T: ?Sized>(&self, handler: &Rc<T>) -> usize {
        let target = identity(handler);
        let mut entries = self.entries.borrow_mut();
        let (removed, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut *entries)
            .into_iter()
            .partition(|entry| identity(&entry.handler) == target);
        *entries = kept;
        trace!(
            "unsubscribed {} registration(s) ({} registered)",
            removed.len(),
            entries.len()
        );
        // Removed handlers may touch the hub when dropped.
        drop(entries);
        removed.len()
    }

    /// Removes the single registration named by `subscription`.
    ///
    /// Returns `false` if the token is unknown or was already removed.
    pub fn cancel(&self, subscription: Subscription) -> bool {
        let mut entries = self.entries.borrow_mut();
        let Some(index) = entries
            .iter()
            .position(|entry| entry.subscription == subscription)
        else {
            return false;
        };

        let removed = entries.remove(index);
        trace!("cancelled {subscription} ({} registered)", entries.len());
        drop(entries);
        drop(removed);
        true
    }

    /// Removes every handler.
    pub fn clear(&self) {
        let removed = std::mem::take(&mut *self.entries.borrow_mut());
        trace!("cleared {} registration(s)", removed.len());
    }

    /// Number of registrations, counting duplicates.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Returns `true` if no handler is registered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Returns `true` if `handler` is registered at least once.
    pub fn contains<T: ?Sized>(&self, handler: &Rc<T>) -> bool {
        let target = identity(handler);
        self.entries
            .borrow()
            .iter()
            .any(|entry| identity(&entry.handler) == target)
    }

    /// Returns `true` if the registration named by `subscription` is still present.
    pub fn is_subscribed(&self, subscription: Subscription) -> bool {
        self.entries
            .borrow()
            .iter()
            .any(|entry| entry.subscription == subscription)
    }

    /// Invokes every handler, in registration order, with `args`.
    ///
    /// Equivalent to [`broadcast_ref(&args)`](Self::broadcast_ref).
    #[inline]
    pub fn broadcast(&self, args: Args) -> Result<(), BroadcastError> {
        self.broadcast_ref(&args)
    }

    /// Invokes every handler, in registration order, with a borrowed argument tuple.
    ///
    /// Every handler sees the very same `args`; nothing is cloned. Stops at the first handler
    /// that fails and returns which registration it was.
    pub fn broadcast_ref(&self, args: &Args) -> Result<(), BroadcastError> {
        let snapshot = self.snapshot();
        trace!("broadcasting to {} handler(s)", snapshot.len());

        for (position, entry) in snapshot.iter().enumerate() {
            if let Err(error) = entry.handler.call(args) {
                debug!(
                    "handler {} failed at position {position}, skipping {} remaining: {error}",
                    entry.subscription,
                    snapshot.len() - position - 1
                );
                return Err(BroadcastError::new(entry.subscription, position, error));
            }
        }

        Ok(())
    }

    /// Copies the current registrations so no borrow is held while handlers run.
    fn snapshot(&self) -> Vec<Entry<Args>> {
        self.entries.borrow().clone()
    }
}

impl<Args: 'static> Default for EventHub<Args> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args> fmt::Debug for EventHub<Args> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let entries = self.entries.borrow();
        f.debug_struct("EventHub")
            .field(
                "subscriptions",
                &entries.iter().map(|e| e.subscription).collect::<Vec<_>>(),
            )
            .field("next_id", &self.next_id.get())
            .finish()
    }
}
