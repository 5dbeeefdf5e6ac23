//! # bellhop-std
//!
//! Standard implementations for the bellhop event dispatch library.
//!
//! This crate provides:
//! - **Bus**: [`Bus`], a standalone dispatch point
//! - **Standard handlers**: [`handlers::once`], [`handlers::persistent`],
//!   [`handlers::logging`]
//! - **Testing utilities**: [`testing`]

#![deny(clippy::pub_use, clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core traits
pub use bellhop_core;

// Modules
pub mod bus;
pub mod handlers;
pub mod testing;

#[allow(clippy::pub_use)]
pub use bus::Bus;
