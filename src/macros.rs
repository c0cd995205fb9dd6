// ============================================================================
// observable-collections - Ergonomic Macros
// ============================================================================

/// Helper macro to clone variables into a move closure.
///
/// Handlers must be `'static`, so any shared state they touch is usually an
/// `Rc` cloned into the closure. This removes the clone boilerplate.
///
/// # Usage
///
/// ```rust
/// use observable_collections::{cloned, ObservableVec};
/// use std::cell::Cell;
/// use std::rc::Rc;
///
/// let mut vec: ObservableVec<i32> = ObservableVec::new();
/// let count = Rc::new(Cell::new(0));
///
/// vec.collection_changed().listen(cloned!(count => move |_, _| {
///     count.set(count.get() + 1);
///     Ok(())
/// }));
///
/// vec.append(1).unwrap();
/// assert_eq!(count.get(), 1);
/// ```
#[macro_export]
macro_rules! cloned {
    ($($n:ident),+ => $e:expr) => {
        {
            $( let $n = $n.clone(); )+
            $e
        }
    };
}

/// Subscribe a handler to a collection's change event, with capturing.
///
/// Wraps `collection.collection_changed().listen(cloned!(... => handler))`
/// and evaluates to the [`Handler`](crate::Handler) so it can be
/// unsubscribed later.
///
/// # Usage
///
/// ```rust
/// use observable_collections::{listen, ChangeAction, ObservableSet};
/// use std::cell::RefCell;
/// use std::rc::Rc;
///
/// let mut set: ObservableSet<u8> = ObservableSet::new();
/// let log = Rc::new(RefCell::new(Vec::new()));
///
/// // Capture list => handler
/// let handler = listen!(set, log => move |_, change| {
///     log.borrow_mut().push(change.action());
///     Ok(())
/// });
///
/// set.add(1).unwrap();
/// set.collection_changed().unsubscribe(&handler).unwrap();
/// set.add(2).unwrap();
///
/// assert_eq!(*log.borrow(), vec![ChangeAction::Add]);
/// ```
#[macro_export]
macro_rules! listen {
    // Case 1: With captures
    ($collection:expr, $($n:ident),+ => $handler:expr) => {
        $crate::cloned!($($n),+ => $collection.collection_changed().listen($handler))
    };
    // Case 2: No captures
    ($collection:expr, $handler:expr) => {
        $collection.collection_changed().listen($handler)
    };
}
