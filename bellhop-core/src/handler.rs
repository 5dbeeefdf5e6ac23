//! # Handlers
//!
//! A [`Handler`] is a shared callback bound to an event name. It receives the
//! host it is registered on plus the invocation arguments, and decides
//! whether it stays registered:
//!
//! - truthy ([`Retain::Keep`]) - run again on the next invocation
//! - falsy ([`Retain::Drop`]) - removed once the current invocation finishes
//! - `Err(..)` - a failure, routed to the error event
//!
//! Closures may return anything implementing [`IntoRetain`].

use crate::{error::BoxError, host::DispatchHost};
use std::{fmt, rc::Rc};

/// Whether a handler stays registered after running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Retain {
    /// Keep the handler for future invocations.
    Keep,
    /// Remove the handler after this invocation.
    Drop,
}

impl Retain {
    /// Returns `true` for [`Retain::Keep`].
    pub const fn is_keep(self) -> bool {
        matches!(self, Retain::Keep)
    }
}

impl From<bool> for Retain {
    fn from(keep: bool) -> Self {
        if keep { Retain::Keep } else { Retain::Drop }
    }
}

/// Trait for converting a handler's return value into a [`Retain`] decision.
///
/// # Default Implementations
///
/// - `bool` → `true` = Keep, `false` = Drop
/// - integers → non-zero = Keep, zero = Drop
/// - `Retain` → As is
/// - `Option<T>` → `None` = Drop, otherwise delegates to `T`
/// - `Result<T, E>` → Delegates to `T` or reports a failure
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be returned from a handler",
    label = "missing `IntoRetain` implementation",
    note = "Handlers must return a truthy/falsy value such as `bool` or `Retain`."
)]
pub trait IntoRetain {
    /// Convert the output into a retain decision or a failure.
    fn into_retain(self) -> Result<Retain, BoxError>;
}

impl IntoRetain for Retain {
    fn into_retain(self) -> Result<Retain, BoxError> {
        Ok(self)
    }
}

impl IntoRetain for bool {
    fn into_retain(self) -> Result<Retain, BoxError> {
        Ok(self.into())
    }
}

macro_rules! int_into_retain {
    ($($t:ty),*) => {
        $(
            impl IntoRetain for $t {
                fn into_retain(self) -> Result<Retain, BoxError> {
                    Ok((self != 0).into())
                }
            }
        )*
    };
}

int_into_retain!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl<T: IntoRetain> IntoRetain for Option<T> {
    fn into_retain(self) -> Result<Retain, BoxError> {
        match self {
            Some(t) => t.into_retain(),
            None => Ok(Retain::Drop),
        }
    }
}

impl<T, E> IntoRetain for Result<T, E>
where
    T: IntoRetain,
    E: Into<BoxError>,
{
    fn into_retain(self) -> Result<Retain, BoxError> {
        match self {
            Ok(t) => t.into_retain(),
            Err(e) => Err(e.into()),
        }
    }
}

type HandlerFn<H> = dyn Fn(&mut H, &[<H as DispatchHost>::Arg]) -> Result<Retain, BoxError>;

/// A registered callback.
///
/// Cloning shares the callback. Two clones are the *same* handler as far as
/// the registry is concerned, see [`Handler::ptr_eq`].
pub struct Handler<H: DispatchHost> {
    inner: Rc<HandlerFn<H>>,
}

impl<H: DispatchHost> Handler<H> {
    /// Wrap a closure or function as a handler.
    pub fn new<F, R>(callback: F) -> Self
    where
        F: Fn(&mut H, &[H::Arg]) -> R + 'static,
        R: IntoRetain + 'static,
    {
        Self {
            inner: Rc::new(move |host: &mut H, args: &[H::Arg]| {
                callback(host, args).into_retain()
            }),
        }
    }

    /// Run the handler against `host`.
    pub fn call(&self, host: &mut H, args: &[H::Arg]) -> Result<Retain, BoxError> {
        (self.inner)(host, args)
    }

    /// Whether both handles point at the same callback.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        std::ptr::addr_eq(Rc::as_ptr(&self.inner), Rc::as_ptr(&other.inner))
    }
}

impl<H: DispatchHost> Clone for Handler<H> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<H: DispatchHost> fmt::Debug for Handler<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Handler")
            .field(&Rc::as_ptr(&self.inner).cast::<()>())
            .finish()
    }
}
