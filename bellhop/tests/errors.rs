//! Failure routing through the error event.

use bellhop::{
    Bus, Dispatch, DispatchError, DispatchHost, ERROR_EVENT, Registry, Retain, Value,
    testing::{CallCounter, Recorder, failing},
};

mod common;
use common::{Journal, Order, handler_count, recording};

#[test]
fn test_risky_failure_reaches_error_handler() {
    let errors = Recorder::<Value>::new();
    let mut bus: Bus = Bus::new();
    bus.register_handler("risky", failing("boom"))
        .register_handler(ERROR_EVENT, errors.handler());

    let handled = bus.invoke("risky", &[]).unwrap().is_some();

    assert!(handled);
    let calls = errors.calls();
    assert_eq!(calls.len(), 1);
    let failure = calls[0][0].as_failure().expect("failure argument");
    assert_eq!(failure.event(), "risky");
    assert_eq!(failure.error().to_string(), "boom");

    assert_eq!(bus.registry().unwrap().handler_count("risky"), 0);
    assert_eq!(bus.registry().unwrap().handler_count(ERROR_EVENT), 1);
}

#[test]
fn test_failure_without_error_handler_escalates() {
    let mut bus: Bus = Bus::new();
    bus.register_handler("risky", failing("boom"));

    let err = bus.invoke("risky", &[]).unwrap_err();

    assert!(matches!(err, DispatchError::Unhandled { .. }));
    assert_eq!(err.failure().map(|f| f.event()), Some("risky"));
    assert!(err.to_string().contains("boom"));
    assert!(err.to_string().contains("no `event_error` handler found"));
}

#[test]
fn test_error_handler_failure_does_not_recurse() {
    let attempts = CallCounter::new();
    let mut bus: Bus = Bus::new();
    bus.register_handler(ERROR_EVENT, attempts.handler())
        .register_handler(ERROR_EVENT, failing("error handler broke"));

    let err = bus
        .invoke(ERROR_EVENT, &[Value::from("direct")])
        .unwrap_err();

    assert!(matches!(err, DispatchError::ErrorHandler { .. }));
    assert_eq!(attempts.count(), 1);
}

#[test]
fn test_error_handler_failure_surfaces_from_original_invoke() {
    let mut bus: Bus = Bus::new();
    bus.register_handler("risky", failing("boom"))
        .register_handler(ERROR_EVENT, failing("also boom"));

    let err = bus.invoke("risky", &[]).unwrap_err();

    match err {
        DispatchError::ErrorHandler { event, source } => {
            assert_eq!(event, ERROR_EVENT);
            assert_eq!(source.to_string(), "also boom");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_failing_handler_does_not_stop_later_handlers() {
    let order = Order::default();
    let mut host = Journal::default();
    host.register("tick", recording(&order, 1, true))
        .register_handler("tick", failing("boom"))
        .register("tick", recording(&order, 3, true))
        .register(ERROR_EVENT, |host: &mut Journal, args: &[Value]| {
            host.entries.push(args[0].to_string());
            true
        });

    host.invoke("tick", &[]).unwrap();
    host.invoke("tick", &[]).unwrap();

    assert_eq!(*order.borrow(), [1, 3, 1, 3]);
    assert_eq!(host.entries, ["handler for `tick` failed: boom"]);
    assert_eq!(handler_count(&host, "tick"), 2);
}

#[test]
fn test_error_handler_can_drop_itself() {
    let errors = Recorder::<Value>::with_result(Retain::Drop);
    let mut bus: Bus = Bus::new();
    bus.register_handler("risky", failing("first"))
        .register_handler("risky", failing("second"))
        .register_handler(ERROR_EVENT, errors.handler());

    // The error handler consumes the first failure and leaves; the second
    // failure then has nowhere to go.
    let err = bus.invoke("risky", &[]).unwrap_err();

    assert_eq!(errors.count(), 1);
    assert_eq!(err.failure().map(|f| f.error().to_string()).as_deref(), Some("second"));
    // The first failing handler was already settled before the escalation.
    assert_eq!(bus.registry().unwrap().handler_count("risky"), 1);
}

#[derive(Default)]
struct Renamed {
    registry: Option<Registry<Self>>,
}

impl DispatchHost for Renamed {
    type Arg = Value;
    const ERROR_EVENT: &'static str = "oops";

    fn registry(&self) -> Option<&Registry<Self>> {
        self.registry.as_ref()
    }

    fn registry_mut(&mut self) -> Option<&mut Registry<Self>> {
        self.registry.as_mut()
    }

    fn set_registry(&mut self, registry: Registry<Self>) -> &mut Registry<Self> {
        self.registry.insert(registry)
    }
}

#[test]
fn test_custom_error_event_name() {
    let oops = CallCounter::new();
    let default_channel = CallCounter::new();
    let mut host = Renamed::default();
    host.register_handler("risky", failing("boom"))
        .register_handler("oops", oops.handler())
        .register_handler(ERROR_EVENT, default_channel.handler());

    assert!(host.emit("risky", &[]).unwrap());
    assert_eq!(oops.count(), 1);
    assert_eq!(default_channel.count(), 0);
}
