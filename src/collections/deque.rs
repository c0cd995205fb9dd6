// ============================================================================
// observable-collections - ObservableDeque
// A VecDeque that reports every mutation, optionally bounded by `maxlen`
// ============================================================================
//
// Shares the positional mapping of ObservableVec, plus the head operations:
// `append_left` and `extend_left` report index 0, `pop_left` reports 0.
//
// A bounded deque silently evicts from the opposite end when an append or
// extend overflows it. Eviction is part of the Add it came with and does not
// get a notification of its own. `insert` into a full bounded deque fails.
// ============================================================================

use std::collections::VecDeque;
use std::fmt;
use std::ops::{Deref, RangeBounds};

use tracing::trace;

use crate::core::change::{CollectionChange, Items, SequenceChange};
use crate::core::error::{Error, Result};
use crate::core::index::{insertion_point, resolve, resolve_range};
use crate::primitives::event::{Event, Handler};

/// Handler type accepted by [`ObservableDeque::collection_changed`].
pub type DequeHandler<T> = Handler<ObservableDeque<T>, SequenceChange<T>>;

// =============================================================================
// OBSERVABLE DEQUE
// =============================================================================

/// A double-ended queue that emits a [`SequenceChange`] after every mutation.
///
/// # Example
///
/// ```
/// use observable_collections::{Items, ObservableDeque};
///
/// let mut queue: ObservableDeque<char> = "abc".chars().collect();
///
/// queue.collection_changed().listen(|_sender, change| {
///     assert_eq!(change.old_starting_index(), Some(0));
///     assert_eq!(change.old_items(), Some(&Items::One('a')));
///     Ok(())
/// });
///
/// assert_eq!(queue.pop_left().unwrap(), 'a');
/// assert_eq!(queue.len(), 2);
/// ```
pub struct ObservableDeque<T> {
    data: VecDeque<T>,
    maxlen: Option<usize>,
    collection_changed: Event<ObservableDeque<T>, SequenceChange<T>>,
}

impl<T> ObservableDeque<T> {
    /// Create a new empty, unbounded deque.
    pub fn new() -> Self {
        Self::from_deque(VecDeque::new())
    }

    /// Create an unbounded deque with initial capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::from_deque(VecDeque::with_capacity(capacity))
    }

    /// Create a deque holding at most `maxlen` items.
    ///
    /// When `iter` yields more than `maxlen` items only the last `maxlen` are
    /// kept.
    pub fn with_maxlen<I: IntoIterator<Item = T>>(iter: I, maxlen: usize) -> Self {
        let mut data = VecDeque::with_capacity(maxlen);
        for item in iter {
            if maxlen == 0 {
                continue;
            }
            if data.len() == maxlen {
                data.pop_front();
            }
            data.push_back(item);
        }
        Self {
            data,
            maxlen: Some(maxlen),
            collection_changed: Event::new(),
        }
    }

    /// Wrap an existing deque. No notification is emitted.
    pub fn from_deque(data: VecDeque<T>) -> Self {
        Self {
            data,
            maxlen: None,
            collection_changed: Event::new(),
        }
    }

    /// The event fired after every mutation.
    pub fn collection_changed(&self) -> &Event<ObservableDeque<T>, SequenceChange<T>> {
        &self.collection_changed
    }

    /// Maximum size, if bounded.
    pub fn maxlen(&self) -> Option<usize> {
        self.maxlen
    }

    pub fn into_inner(self) -> VecDeque<T> {
        self.data
    }

    fn notify(&self, change: SequenceChange<T>) -> Result<()> {
        trace!(action = ?change.action(), len = self.data.len(), "deque changed");
        self.collection_changed.invoke(self, &change)
    }

    /// Push to the back, evicting from the front when bounded and full.
    fn push_back_bounded(&mut self, value: T) {
        match self.maxlen {
            Some(0) => {}
            Some(max) if self.data.len() == max => {
                self.data.pop_front();
                self.data.push_back(value);
            }
            _ => self.data.push_back(value),
        }
    }

    /// Push to the front, evicting from the back when bounded and full.
    fn push_front_bounded(&mut self, value: T) {
        match self.maxlen {
            Some(0) => {}
            Some(max) if self.data.len() == max => {
                self.data.pop_back();
                self.data.push_front(value);
            }
            _ => self.data.push_front(value),
        }
    }
}

impl<T: Clone> ObservableDeque<T> {
    // =========================================================================
    // ADD
    // =========================================================================

    /// Appends to the back. `new_starting_index` is the new last position.
    pub fn append(&mut self, value: T) -> Result<()> {
        self.push_back_bounded(value.clone());
        let index = self.data.len() as isize - 1;
        self.notify(CollectionChange::add_at(Items::One(value), index))
    }

    /// Prepends to the front. `new_starting_index` is 0.
    pub fn append_left(&mut self, value: T) -> Result<()> {
        self.push_front_bounded(value.clone());
        self.notify(CollectionChange::add_at(Items::One(value), 0))
    }

    /// Appends every item of `iter` at the back.
    ///
    /// `new_starting_index` is the length before extension.
    pub fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) -> Result<()> {
        let items: Vec<T> = iter.into_iter().collect();
        let start = self.data.len() as isize;
        for item in items.iter().cloned() {
            self.push_back_bounded(item);
        }
        self.notify(CollectionChange::add_at(Items::Many(items), start))
    }

    /// Pushes every item of `iter` onto the front, one at a time.
    ///
    /// The items end up in reverse encounter order: `extend_left("xy")` on
    /// `"ab"` gives `"yxab"`. `new_items` lists them in encounter order.
    pub fn extend_left<I: IntoIterator<Item = T>>(&mut self, iter: I) -> Result<()> {
        let items: Vec<T> = iter.into_iter().collect();
        for item in items.iter().cloned() {
            self.push_front_bounded(item);
        }
        self.notify(CollectionChange::add_at(Items::Many(items), 0))
    }

    /// Inserts `value` before position `index`, clamping to the ends.
    ///
    /// Fails with [`Error::DequeFull`] on a full bounded deque.
    pub fn insert(&mut self, index: isize, value: T) -> Result<()> {
        if let Some(maxlen) = self.maxlen.filter(|&max| self.data.len() >= max) {
            return Err(Error::DequeFull { maxlen });
        }
        let at = insertion_point(index, self.data.len());
        self.data.insert(at, value.clone());
        self.notify(CollectionChange::add_at(Items::One(value), index))
    }

    // =========================================================================
    // MOVE
    // =========================================================================

    /// Moves the element at `old_index` to `new_index`, counting a negative
    /// `new_index` from the end of the deque without the moved element.
    pub fn move_item(&mut self, old_index: isize, new_index: isize) -> Result<()> {
        let from = resolve(old_index, self.data.len())?;
        let Some(item) = self.data.remove(from) else {
            return Err(Error::IndexOutOfRange {
                index: old_index,
                len: self.data.len(),
            });
        };

        let remaining = self.data.len() as isize;
        let target = if new_index < 0 {
            remaining + new_index + 1
        } else {
            new_index
        };
        let at = insertion_point(target, self.data.len());
        self.data.insert(at, item.clone());

        self.notify(CollectionChange::moved(Items::One(item), new_index, old_index))
    }

    // =========================================================================
    // REMOVE
    // =========================================================================

    /// Removes and returns the back element.
    ///
    /// Reports the absolute position it was taken from.
    pub fn pop(&mut self) -> Result<T> {
        let value = self.data.pop_back().ok_or(Error::EmptyCollection)?;
        let index = self.data.len() as isize;
        self.notify(CollectionChange::remove_at(Items::One(value.clone()), index))?;
        Ok(value)
    }

    /// Removes and returns the front element. Reports index 0.
    pub fn pop_left(&mut self) -> Result<T> {
        let value = self.data.pop_front().ok_or(Error::EmptyCollection)?;
        self.notify(CollectionChange::remove_at(Items::One(value.clone()), 0))?;
        Ok(value)
    }

    /// Removes the first element equal to `value`.
    pub fn remove(&mut self, value: &T) -> Result<()>
    where
        T: PartialEq,
    {
        let at = self.index_of(value).ok_or(Error::ItemNotFound)?;
        let removed = self.data.remove(at).ok_or(Error::ItemNotFound)?;
        self.notify(CollectionChange::remove_at(Items::One(removed), at as isize))
    }

    /// Removes the element at `index`.
    pub fn delete(&mut self, index: isize) -> Result<()> {
        let len = self.data.len();
        let removed = resolve(index, len)
            .ok()
            .and_then(|at| self.data.remove(at))
            .ok_or(Error::IndexOutOfRange { index, len })?;
        self.notify(CollectionChange::remove_at(Items::One(removed), index))
    }

    /// Removes a contiguous range, reporting its start.
    pub fn delete_range<R: RangeBounds<usize>>(&mut self, range: R) -> Result<()> {
        let range = resolve_range(range, self.data.len())?;
        let start = range.start as isize;
        let removed: Vec<T> = self.data.drain(range).collect();
        self.notify(CollectionChange::remove_at(Items::Many(removed), start))
    }

    /// Removes all elements. Emits `Reset`.
    pub fn clear(&mut self) -> Result<()> {
        self.data.clear();
        self.notify(CollectionChange::reset())
    }

    // =========================================================================
    // REPLACE
    // =========================================================================

    /// Replaces the element at `index`, returning the old value.
    pub fn set(&mut self, index: isize, value: T) -> Result<T> {
        let at = resolve(index, self.data.len())?;
        let old = std::mem::replace(&mut self.data[at], value.clone());
        self.notify(CollectionChange::replace_at(
            Items::One(value),
            Items::One(old.clone()),
            index,
        ))?;
        Ok(old)
    }

    // =========================================================================
    // QUERIES
    // =========================================================================

    /// Position of the first element equal to `value`.
    pub fn index_of(&self, value: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.data.iter().position(|v| v == value)
    }
}

impl<T> Deref for ObservableDeque<T> {
    type Target = VecDeque<T>;

    fn deref(&self) -> &Self::Target {
        &self.data
    }
}

impl<T> Default for ObservableDeque<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for ObservableDeque<T> {
    fn clone(&self) -> Self {
        Self {
            data: self.data.clone(),
            maxlen: self.maxlen,
            collection_changed: Event::new(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for ObservableDeque<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObservableDeque")
            .field("data", &self.data)
            .field("maxlen", &self.maxlen)
            .field("handlers", &self.collection_changed.len())
            .finish()
    }
}

impl<T> From<VecDeque<T>> for ObservableDeque<T> {
    fn from(data: VecDeque<T>) -> Self {
        Self::from_deque(data)
    }
}

impl<T> FromIterator<T> for ObservableDeque<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_deque(iter.into_iter().collect())
    }
}

impl<'a, T> IntoIterator for &'a ObservableDeque<T> {
    type Item = &'a T;
    type IntoIter = std::collections::vec_deque::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

// =============================================================================
// TESTS
// =============================================================================
