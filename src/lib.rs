// ============================================================================
// observable-collections - Collections That Report Their Own Changes
// ============================================================================
//
// Four container wrappers (Vec, VecDeque, HashSet, IndexMap) that emit a
// structured change notification after every mutating call, plus the
// multicast Event they publish through.
//
// Every mutation runs to completion first; then each subscribed handler is
// called synchronously, in subscription order, with the collection and a
// CollectionChange describing what happened. Nothing here is thread-safe:
// wrap a collection yourself if it has to cross threads.
// ============================================================================

//! Observable collections.
//!
//! ```
//! use observable_collections::{ChangeAction, Items, ObservableVec};
//!
//! let mut list: ObservableVec<char> = "abcdefgh".chars().collect();
//!
//! list.collection_changed().listen(|list, change| {
//!     assert_eq!(change.action(), ChangeAction::Remove);
//!     assert_eq!(change.old_starting_index(), Some(0));
//!     assert_eq!(change.old_items(), Some(&Items::One('a')));
//!     assert_eq!(list.len(), 7);
//!     Ok(())
//! });
//!
//! list.remove(&'a').unwrap();
//! ```

pub mod collections;
pub mod core;
pub mod primitives;

mod macros;

// Re-export core items at crate root for ergonomic access
pub use crate::core::change::{
    ChangeAction, CollectionChange, Items, MapChange, MapItems, SequenceChange, SetChange,
};
pub use crate::core::error::{Error, HandlerError, HandlerResult, Result};

// Re-export the dispatcher
pub use primitives::event::{Event, Handler, HandlerFn};

// Re-export collections
pub use collections::{
    DequeHandler, MapHandler, ObservableDeque, ObservableMap, ObservableSet, ObservableVec,
    SetHandler, VecHandler,
};

// =============================================================================
// TESTS
// =============================================================================
