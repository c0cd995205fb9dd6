// ============================================================================
// observable-collections - Observable Collections
// Vec, VecDeque, HashSet and IndexMap wrappers that notify on every mutation
// ============================================================================
//
// Each wrapper owns its container and one Event. A mutating method performs
// the container operation first, then builds a CollectionChange and invokes
// the Event with (self, change). Handlers therefore always observe the
// already-mutated collection, and a failing precondition (missing item, bad
// index, empty collection) returns before anything is touched.
//
// Reads go through Deref to the underlying container and never notify.
// ============================================================================

mod deque;
mod map;
mod set;
mod vec;

pub use deque::{DequeHandler, ObservableDeque};
pub use map::{MapHandler, ObservableMap};
pub use set::{ObservableSet, SetHandler};
pub use vec::{ObservableVec, VecHandler};
