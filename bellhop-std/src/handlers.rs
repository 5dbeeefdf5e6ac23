//! Standard handler constructors.
//!
//! - [`once`] - runs a single time, then unregisters itself
//! - [`persistent`] - wraps a unit-returning closure that always stays
//! - [`logging`] - logs each invocation and stays registered

use bellhop_core::{DispatchHost, Handler, Retain};
use std::fmt::Debug;

/// A handler that runs `callback` once and is then removed.
pub fn once<H, F>(callback: F) -> Handler<H>
where
    H: DispatchHost,
    F: Fn(&mut H, &[H::Arg]) + 'static,
{
    Handler::new(move |host: &mut H, args: &[H::Arg]| {
        callback(host, args);
        Retain::Drop
    })
}

/// A handler that runs `callback` and stays registered.
pub fn persistent<H, F>(callback: F) -> Handler<H>
where
    H: DispatchHost,
    F: Fn(&mut H, &[H::Arg]) + 'static,
{
    Handler::new(move |host: &mut H, args: &[H::Arg]| {
        callback(host, args);
        Retain::Keep
    })
}

/// A handler that logs its arguments for observation.
///
/// Uses `tracing` when the `tracing` feature is enabled and does nothing
/// otherwise. Always stays registered.
///
/// # Example
///
/// ```rust,ignore
/// use bellhop::{Bus, Dispatch, handlers::logging};
///
/// let mut bus = Bus::new();
/// bus.register_handler("greet", logging("greeter"));
/// ```
pub fn logging<H>(name: &'static str) -> Handler<H>
where
    H: DispatchHost,
    H::Arg: Debug,
{
    Handler::new(move |_: &mut H, args: &[H::Arg]| {
        #[cfg(feature = "tracing")]
        {
            tracing::debug!(name = %name, args = ?args, "event received");
        }

        #[cfg(not(feature = "tracing"))]
        {
            let _ = (name, args);
        }

        Retain::Keep
    })
}
