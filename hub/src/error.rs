//! Error types for the hub and its handlers.
//!
//! - [`HubError`] is raised by the hub itself. Its only kind is
//!   [`HubError::NotCallable`], returned when a dynamically typed value offered to
//!   [`EventHub::subscribe_any`](crate::EventHub::subscribe_any) is not a handler.
//! - [`HandlerError`] is whatever a handler reported through its return value.
//! - [`BroadcastError`] ties a [`HandlerError`] to the registration that produced it.
//!
//! Unsubscribing never fails, so it has no error type.

use std::{error::Error, fmt};

use crate::hub::Subscription;

/// Errors produced by the hub itself.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HubError {
    /// The value offered for subscription cannot be invoked as a handler.
    NotCallable,
}

impl HubError {
    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            HubError::NotCallable => "hub_not_callable",
        }
    }
}

impl fmt::Display for HubError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            HubError::NotCallable => write!(f, "value is not callable"),
        }
    }
}

impl Error for HubError {}

/// A failure reported by a handler.
///
/// Handlers produce this by returning `Err(e)` for any `e` convertible into a boxed
/// error (see [`Outcome`](crate::handler::Outcome)).
#[derive(Debug)]
pub struct HandlerError {
    inner: Box<dyn Error + 'static>,
}

impl HandlerError {
    /// Wraps any error a handler wants to report.
    pub fn new(error: impl Into<Box<dyn Error + 'static>>) -> Self {
        Self {
            inner: error.into(),
        }
    }

    /// Returns the error reported by the handler.
    #[inline]
    pub fn get_ref(&self) -> &(dyn Error + 'static) {
        self.inner.as_ref()
    }

    /// Unwraps the boxed error reported by the handler.
    #[inline]
    pub fn into_inner(self) -> Box<dyn Error + 'static> {
        self.inner
    }
}

impl fmt::Display for HandlerError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.inner, f)
    }
}

impl Error for HandlerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.inner.source()
    }
}

/// A broadcast stopped because one of its handlers failed.
///
/// Handlers after the failing one were not invoked for that broadcast.
#[derive(Debug)]
pub struct BroadcastError {
    subscription: Subscription,
    position: usize,
    source: HandlerError,
}

impl BroadcastError {
    pub(crate) const fn new(
        subscription: Subscription,
        position: usize,
        source: HandlerError,
    ) -> Self {
        Self {
            subscription,
            position,
            source,
        }
    }

    /// The registration whose handler failed.
    #[inline]
    pub const fn subscription(&self) -> Subscription {
        self.subscription
    }

    /// Zero-based dispatch position of the failing handler within the broadcast.
    ///
    /// This is also the number of handlers that completed before the failure.
    #[inline]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// The error reported by the handler.
    #[inline]
    pub fn handler_error(&self) -> &HandlerError {
        &self.source
    }

    /// Consumes the broadcast error, returning the handler's error.
    #[inline]
    pub fn into_handler_error(self) -> HandlerError {
        self.source
    }

    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        "hub_handler_failed"
    }
}

impl fmt::Display for BroadcastError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "handler {} at position {} failed: {}",
            self.subscription, self.position, self.source
        )
    }
}

impl Error for BroadcastError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.source)
    }
}
