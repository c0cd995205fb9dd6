// ============================================================================
// observable-collections - Core Module
// Payload types, the action taxonomy, errors and index helpers
// ============================================================================

pub mod change;
pub mod error;
pub mod index;

// Re-export commonly used items
pub use change::{ChangeAction, CollectionChange, Items, MapChange, MapItems, SequenceChange, SetChange};
pub use error::{Error, HandlerError, HandlerResult, Result};
