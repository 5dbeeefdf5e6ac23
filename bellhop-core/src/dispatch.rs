//! # Dispatch
//!
//! The operations every [`DispatchHost`] gets through the blanket [`Dispatch`]
//! implementation.
//!
//! # Invocation
//!
//! [`Dispatch::invoke`] resolves handlers in this order:
//!
//! 1. Registered handlers for the event. All of them run, in registration
//!    order, and the ones that return falsy (or fail) are removed afterwards.
//! 2. The host's [`fallback`] for the event. It runs once and is never stored.
//! 3. Nothing: the event is unhandled and `invoke` returns `Ok(None)`.
//!
//! # Failures
//!
//! A failing handler is reported to the host's error event with a
//! [`Failure`] argument and then removed, as if it had returned falsy. If
//! nothing handles the error event the failure escapes as
//! [`DispatchError::Unhandled`]. A failure inside an error handler escapes
//! immediately as [`DispatchError::ErrorHandler`].
//!
//! # Re-entrancy
//!
//! Handlers receive `&mut` access to the host and may register, clear, or
//! invoke while running. An invocation runs over a snapshot of the handlers
//! present when it started and removes dropped registrations by identity, so
//! concurrent changes to the live sequence are preserved. A handler
//! registered twice counts as two registrations.
//!
//! [`fallback`]: DispatchHost::fallback

use crate::{
    error::{DispatchError, Failure},
    handler::{Handler, IntoRetain, Retain},
    host::DispatchHost,
    registry::{Entry, Registry},
};

/// Event operations available on every [`DispatchHost`].
pub trait Dispatch: DispatchHost {
    /// Register `callback` for `event`, after any existing handlers.
    ///
    /// Returns the host so registrations can be chained.
    fn register<F, R>(&mut self, event: impl Into<String>, callback: F) -> &mut Self
    where
        F: Fn(&mut Self, &[Self::Arg]) -> R + 'static,
        R: IntoRetain + 'static,
    {
        self.register_handler(event, Handler::new(callback))
    }

    /// Register an already constructed handler for `event`.
    fn register_handler(&mut self, event: impl Into<String>, handler: Handler<Self>) -> &mut Self {
        let event = event.into();

        #[cfg(feature = "tracing")]
        tracing::trace!(event = %event, "registering handler");

        if let Some(registry) = self.registry_mut() {
            registry.push(event, handler);
            return self;
        }

        // First registration: start from a cleared registry.
        #[cfg(feature = "tracing")]
        tracing::trace!("initializing registry");

        self.set_registry(Registry::new()).push(event, handler);
        self
    }

    /// Register several `(event, handler)` pairs, left to right.
    fn register_all<I, S>(&mut self, pairs: I) -> &mut Self
    where
        I: IntoIterator<Item = (S, Handler<Self>)>,
        S: Into<String>,
    {
        for (event, handler) in pairs {
            self.register_handler(event, handler);
        }
        self
    }

    /// Discard every handler for every event.
    fn clear(&mut self) -> &mut Self {
        #[cfg(feature = "tracing")]
        tracing::trace!("clearing registry");

        self.set_registry(Registry::new());
        self
    }

    /// Run the handlers for `event` with `args`.
    ///
    /// Returns `Ok(Some(host))` if a registered handler or a fallback ran,
    /// and `Ok(None)` if the event is unhandled.
    fn invoke(
        &mut self,
        event: &str,
        args: &[Self::Arg],
    ) -> Result<Option<&mut Self>, DispatchError> {
        let snapshot = self
            .registry()
            .map(|registry| registry.entries(event))
            .filter(|entries| !entries.is_empty())
            .map(<[Entry<Self>]>::to_vec);

        let Some(snapshot) = snapshot else {
            let Some(fallback) = self.fallback(event) else {
                #[cfg(feature = "tracing")]
                tracing::trace!(event = %event, "unhandled event");
                return Ok(None);
            };

            #[cfg(feature = "tracing")]
            tracing::trace!(event = %event, "running fallback");

            run_guarded(self, event, &fallback, args)?;
            return Ok(Some(self));
        };

        #[cfg(feature = "tracing")]
        tracing::trace!(event = %event, handlers = snapshot.len(), "invoking");

        let mut dropped = Vec::new();
        let mut outcome = Ok(());
        for entry in &snapshot {
            match run_guarded(self, event, entry, args) {
                Ok(Retain::Keep) => {}
                Ok(Retain::Drop) => dropped.push(entry.clone()),
                Err(err) => {
                    outcome = Err(err);
                    break;
                }
            }
        }

        if !dropped.is_empty() {
            #[cfg(feature = "tracing")]
            tracing::debug!(event = %event, dropped = dropped.len(), "dropping handlers");

            if let Some(registry) = self.registry_mut() {
                registry.remove(event, &dropped);
            }
        }

        outcome?;
        Ok(Some(self))
    }

    /// Like [`invoke`](Dispatch::invoke), reporting only whether the event
    /// was handled.
    fn emit(&mut self, event: &str, args: &[Self::Arg]) -> Result<bool, DispatchError> {
        Ok(self.invoke(event, args)?.is_some())
    }
}

impl<H: DispatchHost> Dispatch for H {}

/// Run one handler, routing a failure to the error event.
///
/// A failure that the error event handles turns into [`Retain::Drop`].
fn run_guarded<H: DispatchHost>(
    host: &mut H,
    event: &str,
    handler: &Handler<H>,
    args: &[H::Arg],
) -> Result<Retain, DispatchError> {
    let error = match handler.call(host, args) {
        Ok(retain) => return Ok(retain),
        Err(error) => error,
    };

    if event == H::ERROR_EVENT {
        #[cfg(feature = "tracing")]
        tracing::error!(event = %event, error = %error, "error handler failed");

        return Err(DispatchError::ErrorHandler {
            event: event.to_owned(),
            source: error,
        });
    }

    let failure = Failure::new(event, error);

    #[cfg(feature = "tracing")]
    tracing::warn!(event = %event, error = %failure.error(), "handler failed");

    let handled = host
        .invoke(H::ERROR_EVENT, &[failure.clone().into()])?
        .is_some();

    if handled {
        Ok(Retain::Drop)
    } else {
        #[cfg(feature = "tracing")]
        tracing::error!(event = %event, error = %failure.error(), "no error handler found");

        Err(DispatchError::Unhandled {
            error_event: H::ERROR_EVENT,
            failure,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Value;
    use std::{cell::RefCell, rc::Rc};

    #[derive(Default)]
    struct Host {
        registry: Option<Registry<Self>>,
        log: Vec<String>,
    }

    impl DispatchHost for Host {
        type Arg = Value;

        fn registry(&self) -> Option<&Registry<Self>> {
            self.registry.as_ref()
        }

        fn registry_mut(&mut self) -> Option<&mut Registry<Self>> {
            self.registry.as_mut()
        }

        fn set_registry(&mut self, registry: Registry<Self>) -> &mut Registry<Self> {
            self.registry.insert(registry)
        }

        fn fallback(&self, event: &str) -> Option<Handler<Self>> {
            match event {
                "ping" => Some(Handler::new(|host: &mut Host, _: &[Value]| {
                    host.log.push("pong".into());
                    false
                })),
                _ => None,
            }
        }
    }

    #[test]
    fn registry_is_lazy() {
        let mut host = Host::default();
        assert!(host.registry().is_none());

        host.register("greet", |_, _| true);
        assert_eq!(host.registry().unwrap().handler_count("greet"), 1);
    }

    #[test]
    fn first_registration_is_kept() {
        let mut host = Host::default();
        host.register("greet", |_, _| true)
            .register("greet", |_, _| true)
            .register("wave", |_, _| true);

        let registry = host.registry().unwrap();
        assert_eq!(registry.handler_count("greet"), 2);
        assert_eq!(registry.handler_count("wave"), 1);
    }

    #[test]
    fn register_appends() {
        let mut host = Host::default();
        host.register("greet", |h: &mut Host, _: &[Value]| {
            h.log.push("a".into());
            true
        })
        .register("greet", |h: &mut Host, _: &[Value]| {
            h.log.push("b".into());
            true
        });

        host.invoke("greet", &[]).unwrap();
        assert_eq!(host.log, ["a", "b"]);
    }

    #[test]
    fn args_reach_every_handler() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut host = Host::default();
        for _ in 0..2 {
            let seen = seen.clone();
            host.register("greet", move |_, args: &[Value]| {
                seen.borrow_mut().push(args[0].to_string());
                true
            });
        }

        host.invoke("greet", &["world".into()]).unwrap();
        assert_eq!(*seen.borrow(), ["world", "world"]);
    }

    #[test]
    fn fallback_runs_when_nothing_registered() {
        let mut host = Host::default();
        assert!(host.invoke("ping", &[]).unwrap().is_some());
        assert!(host.invoke("ping", &[]).unwrap().is_some());
        assert_eq!(host.log, ["pong", "pong"]);
        assert!(host.registry().is_none());
    }

    #[test]
    fn registered_handlers_shadow_fallback() {
        let mut host = Host::default();
        host.register("ping", |h: &mut Host, _: &[Value]| {
            h.log.push("registered".into());
            false
        });

        host.invoke("ping", &[]).unwrap();
        host.invoke("ping", &[]).unwrap();
        assert_eq!(host.log, ["registered", "pong"]);
    }

    #[test]
    fn unhandled_event_returns_none() {
        let mut host = Host::default();
        assert!(host.invoke("nothing", &[]).unwrap().is_none());
        assert!(!host.emit("nothing", &[]).unwrap());
    }

    #[test]
    fn clear_resets_registry() {
        let mut host = Host::default();
        host.register("greet", |_, _| true);
        host.clear();

        assert!(host.registry().unwrap().is_empty());
        assert!(host.invoke("greet", &[]).unwrap().is_none());
    }

    #[test]
    fn register_all_in_order() {
        let mut host = Host::default();
        host.register_all([
            (
                "greet",
                Handler::new(|h: &mut Host, _: &[Value]| {
                    h.log.push("first".into());
                    true
                }),
            ),
            (
                "greet",
                Handler::new(|h: &mut Host, _: &[Value]| {
                    h.log.push("second".into());
                    true
                }),
            ),
        ]);

        host.invoke("greet", &[]).unwrap();
        assert_eq!(host.log, ["first", "second"]);
    }
}
