//! Handler trait and return-value conversion.
//!
//! A handler is anything implementing [`Handler<Args>`], where `Args` is the argument tuple
//! shared by every handler of one [`EventHub`](crate::EventHub). Closures and functions of
//! up to twelve parameters are handlers out of the box: each parameter receives a reference
//! to the matching tuple element.
//!
//! ```rust,ignore
//! let hub = EventHub::<(u32, String)>::new();
//!
//! hub.subscribe(|id: &u32, name: &String| println!("{id}: {name}"));
//! hub.subscribe(|id: &u32, _: &String| -> Result<(), String> {
//!     if *id == 0 { Err("id 0 is reserved".into()) } else { Ok(()) }
//! });
//! ```
//!
//! # Return values
//!
//! Handlers have no fixed return type. Anything implementing [`Outcome`] is accepted:
//! `()` always succeeds, and `Result<(), E>` reports `Err(e)` as a [`HandlerError`], which
//! stops the broadcast.
//!
//! # Custom handlers
//!
//! Types with their own state implement the trait directly:
//!
//! ```rust,ignore
//! struct Recorder(RefCell<Vec<u32>>);
//!
//! impl Handler<(u32,)> for Recorder {
//!     fn call(&self, (value,): &(u32,)) -> Result<(), HandlerError> {
//!         self.0.borrow_mut().push(*value);
//!         Ok(())
//!     }
//! }
//! ```

use std::{error::Error, rc::Rc};

use crate::{all_arities, error::HandlerError};

/// Something that can be invoked with the argument tuple `Args`.
pub trait Handler<Args>: 'static {
    /// Invoke the handler with one broadcast's arguments.
    fn call(&self, args: &Args) -> Result<(), HandlerError>;
}

/// A shared, type-erased handler.
///
/// This is the form handlers take inside the hub, and the only form accepted across the
/// dynamic boundary of [`EventHub::subscribe_any`](crate::EventHub::subscribe_any).
pub type HandlerRef<Args> = Rc<dyn Handler<Args>>;

/// Conversion from a handler's return value into success or failure.
pub trait Outcome {
    fn into_outcome(self) -> Result<(), HandlerError>;
}

impl Outcome for () {
    #[inline]
    fn into_outcome(self) -> Result<(), HandlerError> {
        Ok(())
    }
}

impl<E> Outcome for Result<(), E>
where
    E: Into<Box<dyn Error + 'static>>,
{
    #[inline]
    fn into_outcome(self) -> Result<(), HandlerError> {
        self.map_err(HandlerError::new)
    }
}

macro_rules! impl_handler {
    ($($arg:ident),*) => {
        #[allow(non_snake_case)]
        impl<Func, Out, $($arg),*> Handler<($($arg,)*)> for Func
        where
            Func: Fn($(&$arg),*) -> Out + 'static,
            Out: Outcome,
        {
            #[inline]
            fn call(&self, args: &($($arg,)*)) -> Result<(), HandlerError> {
                let ($($arg,)*) = args;
                (self)($($arg),*).into_outcome()
            }
        }
    };
}

all_arities!(impl_handler);
