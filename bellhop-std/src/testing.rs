//! Testing utilities for bellhop.
//!
//! This module provides utilities to make testing hosts and handlers easier.
//!
//! # Features
//!
//! - [`CallCounter`]: A handler that counts invocations
//! - [`Recorder`]: A handler that records the arguments of every call
//! - [`failing`]: A handler that always fails

use bellhop_core::{BoxError, DispatchHost, Handler, Retain};
use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

// ============================================================================
// Call Counter
// ============================================================================

/// A handler that counts invocations.
///
/// # Example
///
/// ```rust,ignore
/// let counter = CallCounter::new();
/// bus.register_handler("greet", counter.handler());
///
/// bus.invoke("greet", &[])?;
/// assert_eq!(counter.count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct CallCounter {
    count: Rc<Cell<usize>>,
    result: Retain,
}

impl CallCounter {
    /// Create a counter whose handlers stay registered.
    pub fn new() -> Self {
        Self::with_result(Retain::Keep)
    }

    /// Create a counter whose handlers return `result`.
    pub fn with_result(result: Retain) -> Self {
        Self {
            count: Rc::new(Cell::new(0)),
            result,
        }
    }

    /// Get the current count.
    pub fn count(&self) -> usize {
        self.count.get()
    }

    /// Reset the counter.
    pub fn reset(&self) {
        self.count.set(0);
    }

    /// A handler that bumps this counter.
    pub fn handler<H: DispatchHost>(&self) -> Handler<H> {
        let count = Rc::clone(&self.count);
        let result = self.result;
        Handler::new(move |_: &mut H, _: &[H::Arg]| {
            count.set(count.get() + 1);
            result
        })
    }
}

impl Default for CallCounter {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Recorder
// ============================================================================

/// A handler that records the arguments it receives.
///
/// Useful for verifying what reached a handler, and in which order.
///
/// # Example
///
/// ```rust,ignore
/// let recorder = Recorder::<Value>::new();
/// bus.register_handler("greet", recorder.handler());
///
/// bus.invoke("greet", &["world".into()])?;
/// assert_eq!(recorder.calls().len(), 1);
/// ```
#[derive(Debug)]
pub struct Recorder<A: Clone> {
    calls: Rc<RefCell<Vec<Vec<A>>>>,
    result: Retain,
}

impl<A: Clone> Recorder<A> {
    /// Create a recorder whose handlers stay registered.
    pub fn new() -> Self {
        Self::with_result(Retain::Keep)
    }

    /// Create a recorder whose handlers return `result`.
    pub fn with_result(result: Retain) -> Self {
        Self {
            calls: Rc::new(RefCell::new(Vec::new())),
            result,
        }
    }

    /// Arguments of every recorded call, oldest first.
    pub fn calls(&self) -> Vec<Vec<A>> {
        self.calls.borrow().clone()
    }

    /// Get the number of recorded calls.
    pub fn count(&self) -> usize {
        self.calls.borrow().len()
    }

    /// Clear all recorded calls.
    pub fn clear(&self) {
        self.calls.borrow_mut().clear();
    }

    /// A handler that records into this recorder.
    pub fn handler<H>(&self) -> Handler<H>
    where
        H: DispatchHost<Arg = A>,
        A: 'static,
    {
        let calls = Rc::clone(&self.calls);
        let result = self.result;
        Handler::new(move |_: &mut H, args: &[A]| {
            calls.borrow_mut().push(args.to_vec());
            result
        })
    }
}

impl<A: Clone> Default for Recorder<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: Clone> Clone for Recorder<A> {
    fn clone(&self) -> Self {
        Self {
            calls: self.calls.clone(),
            result: self.result,
        }
    }
}

// ============================================================================
// Failing Handler
// ============================================================================

/// A handler that always fails with `message`.
pub fn failing<H: DispatchHost>(message: &'static str) -> Handler<H> {
    Handler::new(move |_: &mut H, _: &[H::Arg]| Err::<Retain, BoxError>(message.into()))
}
