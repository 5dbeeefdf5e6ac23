//! # Dispatch hosts
//!
//! Any type can become an event dispatch point by implementing
//! [`DispatchHost`]: it only has to say where its [`Registry`] lives and
//! what argument type its handlers take. The operations themselves
//! (`register`, `invoke`, `clear`, ...) come for free from the blanket
//! [`Dispatch`] implementation.
//!
//! Storage is up to the host. The usual shape is an
//! `Option<Registry<Self>>` field, which `#[derive(DispatchHost)]` wires up.
//!
//! [`Dispatch`]: crate::Dispatch

use crate::{error::Failure, handler::Handler, registry::Registry};

/// Default name of the reserved error event.
pub const ERROR_EVENT: &str = "event_error";

/// A type that owns a handler registry.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a dispatch host",
    label = "missing `DispatchHost` implementation",
    note = "Implement `DispatchHost` or add `#[derive(DispatchHost)]` to give `{Self}` a registry."
)]
pub trait DispatchHost: Sized + 'static {
    /// Argument type passed to every handler.
    ///
    /// Must accept a [`Failure`] so handler failures can be delivered to the
    /// error event.
    type Arg: From<Failure>;

    /// Event that receives handler failures.
    const ERROR_EVENT: &'static str = ERROR_EVENT;

    /// The registry, or `None` if nothing was ever registered.
    fn registry(&self) -> Option<&Registry<Self>>;

    /// Mutable access to the registry, or `None` if uninitialized.
    ///
    /// Once [`set_registry`](DispatchHost::set_registry) has run, this must
    /// hand back the registry it stored.
    fn registry_mut(&mut self) -> Option<&mut Registry<Self>>;

    /// Replace the registry and return the stored one.
    fn set_registry(&mut self, registry: Registry<Self>) -> &mut Registry<Self>;

    /// Handler to run when `event` has no registered handlers.
    ///
    /// Fallbacks are looked up fresh on each invocation and never enter the
    /// registry, so they cannot be dropped.
    fn fallback(&self, event: &str) -> Option<Handler<Self>> {
        let _ = event;
        None
    }
}

/// A table of per-event fallback handlers.
///
/// Generated by `#[fallbacks]` from `on_<event>` methods; a host opts in by
/// forwarding [`DispatchHost::fallback`] to [`Fallbacks::resolve`].
pub trait Fallbacks: DispatchHost {
    /// Fallback handler for `event`, if the host defines one.
    fn resolve(&self, event: &str) -> Option<Handler<Self>>;
}
