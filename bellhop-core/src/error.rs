//! Error types for bellhop.
//!
//! - [`BoxError`] - What a failing handler returns
//! - [`Failure`] - A handler failure as delivered to the error event
//! - [`DispatchError`] - Failures that escape [`invoke`]
//!
//! [`invoke`]: crate::Dispatch::invoke

use std::{error::Error as StdError, fmt, sync::Arc};
use thiserror::Error;

/// A boxed error type for dynamic error handling.
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// A handler failure, as passed to the error event.
///
/// Cloning is cheap: the underlying error is shared, so the same failure can
/// be handed to the error handlers and still be re-raised afterwards.
#[derive(Clone, Debug)]
pub struct Failure {
    event: String,
    error: Arc<BoxError>,
}

impl Failure {
    /// Create a failure for a handler of `event`.
    pub fn new(event: impl Into<String>, error: BoxError) -> Self {
        Self {
            event: event.into(),
            error: Arc::new(error),
        }
    }

    /// Name of the event whose handler failed.
    pub fn event(&self) -> &str {
        &self.event
    }

    /// The error the handler returned.
    pub fn error(&self) -> &(dyn StdError + Send + Sync + 'static) {
        &**self.error
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "handler for `{}` failed: {}", self.event, self.error)
    }
}

/// Two failures are equal when they report the same error for the same event.
impl PartialEq for Failure {
    fn eq(&self, other: &Self) -> bool {
        self.event == other.event && Arc::ptr_eq(&self.error, &other.error)
    }
}

impl StdError for Failure {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(&**self.error)
    }
}

/// Errors that escape an invocation.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// A handler of the error event itself failed. Never routed again.
    #[error("error handler for `{event}` failed")]
    ErrorHandler {
        /// The error event being dispatched.
        event: String,
        /// What the error handler returned.
        #[source]
        source: BoxError,
    },

    /// A handler failed and nothing was registered to receive the failure.
    #[error("{failure} (no `{error_event}` handler found)")]
    Unhandled {
        /// The error event that had no handler.
        error_event: &'static str,
        /// The original failure.
        #[source]
        failure: Failure,
    },
}

impl DispatchError {
    /// The original handler failure, if this error carries one.
    pub fn failure(&self) -> Option<&Failure> {
        match self {
            DispatchError::Unhandled { failure, .. } => Some(failure),
            DispatchError::ErrorHandler { .. } => None,
        }
    }
}
