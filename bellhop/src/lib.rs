//! # bellhop - Synchronous Named-Event Dispatch
//!
//! `bellhop` lets any type register named callbacks and invoke them by name.
//! A type becomes a dispatch host by implementing [`DispatchHost`] (or
//! deriving it); every host then gets the [`Dispatch`] operations.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use bellhop::prelude::*;
//!
//! let mut bus = Bus::new();
//! bus.register("greet", |_, args: &[Value]| {
//!     println!("hello {}", args[0]);
//!     true // keep me registered
//! });
//!
//! // Failures go to the error event instead of the caller.
//! bus.register(ERROR_EVENT, |_, args: &[Value]| {
//!     eprintln!("{}", args[0]);
//!     true
//! });
//!
//! assert!(bus.invoke("greet", &["world".into()])?.is_some());
//! assert!(bus.invoke("nobody-listens", &[])?.is_none());
//! ```
//!
//! ## Custom hosts
//!
//! ```rust,ignore
//! #[derive(Default, bellhop::DispatchHost)]
//! #[dispatch(fallbacks)]
//! struct Greeter {
//!     registry: Option<bellhop::Registry<Self>>,
//!     greeted: usize,
//! }
//!
//! #[bellhop::fallbacks]
//! impl Greeter {
//!     fn on_greet(&mut self, _args: &[bellhop::Value]) -> bool {
//!         self.greeted += 1;
//!         true
//!     }
//! }
//! ```

#![deny(clippy::pub_use, clippy::wildcard_imports)]
#![warn(missing_docs)]

pub use bellhop_core::{
    // Error types
    BoxError,
    // Operations
    Dispatch,
    DispatchError,
    // Host
    DispatchHost,
    ERROR_EVENT,
    Failure,
    Fallbacks,
    // Handlers
    Handler,
    IntoRetain,
    Registry,
    Retain,
    // Arguments
    Value,
};

pub use bellhop_std::Bus;

/// Standard handler constructors.
pub mod handlers {
    pub use bellhop_std::handlers::{logging, once, persistent};
}

/// Testing utilities.
pub mod testing {
    #![allow(clippy::wildcard_imports)]
    pub use bellhop_std::testing::*;
}

/// Prelude module - common imports for bellhop.
///
/// # Usage
///
/// ```rust,ignore
/// use bellhop::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        Bus, Dispatch, DispatchError, DispatchHost, ERROR_EVENT, Failure, Handler, Registry,
        Retain, Value,
    };
}

#[cfg(feature = "macros")]
pub use bellhop_macros::{DispatchHost, fallbacks};
