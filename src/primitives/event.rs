// ============================================================================
// observable-collections - Event
// Multicast dispatcher: ordered handler list, snapshot dispatch
// ============================================================================
//
// An Event owns an ordered list of handlers. Each handler is called with the
// sender and the payload, synchronously, in subscription order.
//
// Dispatch iterates over a snapshot of the list taken when `invoke` starts, so
// a handler that subscribes or unsubscribes (through the `&` sender it was
// given) only affects later dispatches. The list lives in a RefCell for that
// reason: subscription works through a shared reference.
// ============================================================================

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use tracing::{debug, trace, warn};

use crate::core::error::{Error, HandlerResult, Result};

// =============================================================================
// HANDLER
// =============================================================================

/// Signature every change handler implements.
pub type HandlerFn<S, A> = dyn Fn(&S, &A) -> HandlerResult;

/// A subscribable handler.
///
/// Handles are cheap to clone and compare by identity: two handles are equal
/// when they share the same closure. Keep a clone around to unsubscribe later.
pub struct Handler<S: ?Sized, A> {
    callback: Rc<HandlerFn<S, A>>,
}

impl<S: ?Sized, A> Handler<S, A> {
    /// Wrap a closure in a handler.
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(&S, &A) -> HandlerResult + 'static,
    {
        Self {
            callback: Rc::new(callback),
        }
    }

    /// Call the handler directly.
    pub fn call(&self, sender: &S, args: &A) -> HandlerResult {
        (self.callback)(sender, args)
    }
}

impl<S: ?Sized, A> Clone for Handler<S, A> {
    fn clone(&self) -> Self {
        Self {
            callback: self.callback.clone(),
        }
    }
}

impl<S: ?Sized, A> PartialEq for Handler<S, A> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.callback, &other.callback)
    }
}

impl<S: ?Sized, A> Eq for Handler<S, A> {}

impl<S: ?Sized, A> fmt::Debug for Handler<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Handler")
            .field(&Rc::as_ptr(&self.callback).cast::<()>())
            .finish()
    }
}

// =============================================================================
// EVENT
// =============================================================================

/// Ordered multicast dispatcher.
///
/// # Example
///
/// ```
/// use observable_collections::Event;
/// use std::cell::Cell;
/// use std::rc::Rc;
///
/// let event: Event<str, u32> = Event::new();
/// let total = Rc::new(Cell::new(0));
///
/// let handler = event.listen({
///     let total = total.clone();
///     move |_sender, n| {
///         total.set(total.get() + n);
///         Ok(())
///     }
/// });
///
/// event.invoke("sender", &5).unwrap();
/// event.unsubscribe(&handler).unwrap();
/// event.invoke("sender", &5).unwrap();
///
/// assert_eq!(total.get(), 5);
/// ```
pub struct Event<S: ?Sized, A> {
    handlers: RefCell<Vec<Handler<S, A>>>,
}

impl<S: ?Sized, A> Event<S, A> {
    /// Create an event with no handlers.
    pub fn new() -> Self {
        Self {
            handlers: RefCell::new(Vec::new()),
        }
    }

    /// Append a handler. The same handler may be subscribed more than once
    /// and then fires once per registration.
    pub fn subscribe(&self, handler: Handler<S, A>) {
        let mut handlers = self.handlers.borrow_mut();
        handlers.push(handler);
        debug!(handlers = handlers.len(), "handler subscribed");
    }

    /// Wrap `callback` in a handler, subscribe it and return the handle.
    pub fn listen<F>(&self, callback: F) -> Handler<S, A>
    where
        F: Fn(&S, &A) -> HandlerResult + 'static,
    {
        let handler = Handler::new(callback);
        self.subscribe(handler.clone());
        handler
    }

    /// Remove the first registration of `handler`.
    ///
    /// Fails with [`Error::HandlerNotFound`] when it is not registered.
    pub fn unsubscribe(&self, handler: &Handler<S, A>) -> Result<()> {
        let mut handlers = self.handlers.borrow_mut();
        let position = handlers
            .iter()
            .position(|h| h == handler)
            .ok_or(Error::HandlerNotFound)?;
        handlers.remove(position);
        debug!(handlers = handlers.len(), "handler unsubscribed");
        Ok(())
    }

    /// Call every registered handler with `(sender, args)`.
    ///
    /// Stops at the first handler that fails and returns its error wrapped in
    /// [`Error::Handler`]; the handlers after it are not called.
    pub fn invoke(&self, sender: &S, args: &A) -> Result<()> {
        let snapshot = self.handlers();
        trace!(handlers = snapshot.len(), "dispatching change");

        for (position, handler) in snapshot.iter().enumerate() {
            if let Err(err) = handler.call(sender, args) {
                warn!(position, error = %err, "change handler failed, skipping the rest");
                return Err(Error::Handler(err));
            }
        }
        Ok(())
    }

    /// Snapshot of the registered handlers in subscription order.
    pub fn handlers(&self) -> Vec<Handler<S, A>> {
        self.handlers.borrow().clone()
    }

    /// Returns true if `handler` has at least one registration.
    pub fn contains(&self, handler: &Handler<S, A>) -> bool {
        self.handlers.borrow().contains(handler)
    }

    /// Number of registrations.
    pub fn len(&self) -> usize {
        self.handlers.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.borrow().is_empty()
    }
}

impl<S: ?Sized, A> Default for Event<S, A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: ?Sized, A> fmt::Debug for Event<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("handlers", &self.handlers.borrow().len())
            .finish()
    }
}

// =============================================================================
// TESTS
// =============================================================================
