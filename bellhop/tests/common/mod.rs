#![allow(dead_code)]

use bellhop::{Registry, Value};
use std::{cell::RefCell, rc::Rc};

// ============================================================================
// Test Hosts
// ============================================================================

/// A host that keeps a log handlers can append to.
#[derive(Default)]
pub struct Journal {
    pub registry: Option<Registry<Self>>,
    pub entries: Vec<String>,
}

impl bellhop::DispatchHost for Journal {
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
}

// ============================================================================
// Test Handlers
// ============================================================================

/// Shared, ordered record of which handler ran.
pub type Order = Rc<RefCell<Vec<usize>>>;

/// A handler closure that records `id` and returns `keep`.
pub fn recording(
    order: &Order,
    id: usize,
    keep: bool,
) -> impl Fn(&mut Journal, &[Value]) -> bool + use<> {
    let order = order.clone();
    move |_, _| {
        order.borrow_mut().push(id);
        keep
    }
}

/// Number of handlers currently registered for `event`.
pub fn handler_count(host: &Journal, event: &str) -> usize {
    use bellhop::DispatchHost;
    host.registry().map_or(0, |r| r.handler_count(event))
}
