//! # bellhop-core
//!
//! Core traits and the dispatch algorithm for bellhop.
//!
//! This crate has minimal dependencies and is designed to be imported by
//! libraries that want to make their own types dispatch hosts without
//! pulling in `bellhop-std`.
//!
//! # Building Blocks
//!
//! ## Host ([`DispatchHost`])
//!
//! The capability a type implements to own a handler [`Registry`]. It decides
//! where the registry lives, which argument type handlers take, the name of
//! its error event, and optionally a [`fallback`] per event.
//!
//! ## Operations ([`Dispatch`])
//!
//! Blanket-implemented for every host: `register`, `register_all`, `clear`,
//! `invoke`, `emit`.
//!
//! ## Handlers ([`Handler`])
//!
//! Shared callbacks taking `(&mut host, &[args])`. Their return value, via
//! [`IntoRetain`], decides whether they stay registered.
//!
//! # Error Types
//!
//! - [`BoxError`] - What a failing handler returns
//! - [`Failure`] - A failure as delivered to the error event
//! - [`DispatchError`] - Failures escaping `invoke`
//!
//! [`fallback`]: DispatchHost::fallback

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod dispatch;
mod error;
mod handler;
mod host;
mod registry;
mod value;

// Re-exports
pub use dispatch::Dispatch;
pub use error::{BoxError, DispatchError, Failure};
pub use handler::{Handler, IntoRetain, Retain};
pub use host::{DispatchHost, ERROR_EVENT, Fallbacks};
pub use registry::Registry;
pub use value::Value;
