// ============================================================================
// observable-collections - Primitives Module
// The multicast change event shared by every collection
// ============================================================================

pub mod event;

// Re-export for convenience
pub use event::{Event, Handler, HandlerFn};
