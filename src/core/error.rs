// ============================================================================
// observable-collections - Errors
// One error type for every fallible mutation and for the dispatcher
// ============================================================================

use thiserror::Error;

/// Error returned by a change handler.
///
/// Handlers report failure with any boxed error; the dispatcher stops the
/// current pass and hands it back to the caller wrapped in [`Error::Handler`].
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

/// Result returned by a change handler.
pub type HandlerResult = std::result::Result<(), HandlerError>;

/// Crate-wide result alias.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors raised by observable collections and their change events.
#[derive(Debug, Error)]
pub enum Error {
    /// A positional index fell outside the collection.
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange { index: isize, len: usize },

    /// A range bound fell outside the collection or was inverted.
    #[error("range {start}..{end} out of range for length {len}")]
    RangeOutOfRange { start: usize, end: usize, len: usize },

    /// The value searched for is not in the collection.
    #[error("item not found in collection")]
    ItemNotFound,

    /// The key searched for is not in the map.
    #[error("key not found in map")]
    KeyNotFound,

    /// Pop on an empty collection.
    #[error("collection is empty")]
    EmptyCollection,

    /// Unsubscribe of a handler that is not registered.
    #[error("handler is not subscribed")]
    HandlerNotFound,

    /// Insert into a bounded deque that is already at its maximum size.
    #[error("deque already at its maximum size of {maxlen}")]
    DequeFull { maxlen: usize },

    /// A change handler failed. The mutation that triggered it has committed.
    #[error("change handler failed")]
    Handler(#[source] HandlerError),
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn display_messages() {
        let err = Error::IndexOutOfRange { index: -9, len: 8 };
        assert_eq!(err.to_string(), "index -9 out of range for length 8");

        let err = Error::DequeFull { maxlen: 3 };
        assert_eq!(err.to_string(), "deque already at its maximum size of 3");
    }

    #[test]
    fn handler_error_keeps_source() {
        let err = Error::Handler("boom".into());
        assert_eq!(err.to_string(), "change handler failed");
        assert_eq!(err.source().map(|s| s.to_string()), Some("boom".to_string()));
    }
}
