// ============================================================================
// observable-collections - ObservableVec
// A Vec that reports every mutation to its subscribers
// ============================================================================

use std::fmt;
use std::ops::{Deref, RangeBounds};

use tracing::trace;

use crate::core::change::{CollectionChange, Items, SequenceChange};
use crate::core::error::{Error, Result};
use crate::core::index::{insertion_point, resolve, resolve_range};
use crate::primitives::event::{Event, Handler};

/// Handler type accepted by [`ObservableVec::collection_changed`].
pub type VecHandler<T> = Handler<ObservableVec<T>, SequenceChange<T>>;

// =============================================================================
// OBSERVABLE VEC
// =============================================================================

/// An ordered, indexable sequence that emits a [`SequenceChange`] after every
/// mutation.
///
/// Indices are signed: `-1` is the last element. Payload indices echo what the
/// caller passed, unnormalized.
///
/// Reads go through `Deref<Target = Vec<T>>` and never notify. There is no
/// `DerefMut`; every write goes through a method below.
///
/// # Example
///
/// ```
/// use observable_collections::{ChangeAction, ObservableVec};
/// use std::cell::RefCell;
/// use std::rc::Rc;
///
/// let mut letters: ObservableVec<char> = "abc".chars().collect();
/// let actions = Rc::new(RefCell::new(Vec::new()));
///
/// letters.collection_changed().listen({
///     let actions = actions.clone();
///     move |_sender, change| {
///         actions.borrow_mut().push(change.action());
///         Ok(())
///     }
/// });
///
/// letters.append('d').unwrap();
/// letters.remove(&'a').unwrap();
///
/// assert_eq!(*actions.borrow(), vec![ChangeAction::Add, ChangeAction::Remove]);
/// assert_eq!(letters.len(), 3);
/// assert_eq!(letters[0], 'b');
/// ```
pub struct ObservableVec<T> {
    /// The underlying data
    data: Vec<T>,

    /// Fired after every mutation with `(self, change)`
    collection_changed: Event<ObservableVec<T>, SequenceChange<T>>,
}

impl<T> ObservableVec<T> {
    /// Create a new empty observable vec.
    pub fn new() -> Self {
        Self::from_vec(Vec::new())
    }

    /// Create an observable vec with initial capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::from_vec(Vec::with_capacity(capacity))
    }

    /// Wrap an existing vec. No notification is emitted.
    pub fn from_vec(data: Vec<T>) -> Self {
        Self {
            data,
            collection_changed: Event::new(),
        }
    }

    /// The event fired after every mutation.
    pub fn collection_changed(&self) -> &Event<ObservableVec<T>, SequenceChange<T>> {
        &self.collection_changed
    }

    /// Converts into the underlying Vec, dropping all subscriptions.
    pub fn into_inner(self) -> Vec<T> {
        self.data
    }

    fn notify(&self, change: SequenceChange<T>) -> Result<()> {
        trace!(action = ?change.action(), len = self.data.len(), "vec changed");
        self.collection_changed.invoke(self, &change)
    }
}

impl<T: Clone> ObservableVec<T> {
    // =========================================================================
    // ADD
    // =========================================================================

    /// Appends an element to the back.
    ///
    /// Emits `Add` with `new_starting_index` = the new last position.
    pub fn append(&mut self, value: T) -> Result<()> {
        self.data.push(value.clone());
        let index = self.data.len() as isize - 1;
        self.notify(CollectionChange::add_at(Items::One(value), index))
    }

    /// Appends every item of `iter`.
    ///
    /// The items are collected before the vec is touched, so handlers always
    /// receive the full list in `new_items`. `new_starting_index` is the
    /// length before extension.
    pub fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) -> Result<()> {
        let items: Vec<T> = iter.into_iter().collect();
        let start = self.data.len() as isize;
        self.data.extend(items.iter().cloned());
        self.notify(CollectionChange::add_at(Items::Many(items), start))
    }

    /// Inserts `value` before position `index`.
    ///
    /// Out-of-range indices clamp to the ends. The payload reports `index`
    /// exactly as supplied.
    pub fn insert(&mut self, index: isize, value: T) -> Result<()> {
        let at = insertion_point(index, self.data.len());
        self.data.insert(at, value.clone());
        self.notify(CollectionChange::add_at(Items::One(value), index))
    }

    // =========================================================================
    // MOVE
    // =========================================================================

    /// Moves the element at `old_index` to `new_index`.
    ///
    /// A negative `new_index` counts from the end of the vec as it is after
    /// the element was taken out, so `move_item(0, -1)` moves the first
    /// element to the back.
    pub fn move_item(&mut self, old_index: isize, new_index: isize) -> Result<()> {
        let from = resolve(old_index, self.data.len())?;
        let item = self.data.remove(from);

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

    /// Removes and returns the last element.
    ///
    /// Reports `old_starting_index = -1`, the default index of `pop_at`.
    pub fn pop(&mut self) -> Result<T> {
        self.pop_at(-1)
    }

    /// Removes and returns the element at `index`.
    pub fn pop_at(&mut self, index: isize) -> Result<T> {
        if self.data.is_empty() {
            return Err(Error::EmptyCollection);
        }
        let at = resolve(index, self.data.len())?;
        let value = self.data.remove(at);
        self.notify(CollectionChange::remove_at(Items::One(value.clone()), index))?;
        Ok(value)
    }

    /// Removes the first element equal to `value`.
    pub fn remove(&mut self, value: &T) -> Result<()>
    where
        T: PartialEq,
    {
        let at = self.index_of(value).ok_or(Error::ItemNotFound)?;
        let removed = self.data.remove(at);
        self.notify(CollectionChange::remove_at(Items::One(removed), at as isize))
    }

    /// Removes the element at `index`.
    pub fn delete(&mut self, index: isize) -> Result<()> {
        let at = resolve(index, self.data.len())?;
        let removed = self.data.remove(at);
        self.notify(CollectionChange::remove_at(Items::One(removed), index))
    }

    /// Removes a contiguous range.
    ///
    /// `old_starting_index` is the range start, `old_items` the removed run.
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

impl<T> Deref for ObservableVec<T> {
    type Target = Vec<T>;

    fn deref(&self) -> &Self::Target {
        &self.data
    }
}

impl<T> Default for ObservableVec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for ObservableVec<T> {
    fn clone(&self) -> Self {
        // Same data, no subscribers
        Self::from_vec(self.data.clone())
    }
}

impl<T: fmt::Debug> fmt::Debug for ObservableVec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObservableVec")
            .field("data", &self.data)
            .field("handlers", &self.collection_changed.len())
            .finish()
    }
}

impl<T> From<Vec<T>> for ObservableVec<T> {
    fn from(data: Vec<T>) -> Self {
        Self::from_vec(data)
    }
}

impl<T> FromIterator<T> for ObservableVec<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}

impl<'a, T> IntoIterator for &'a ObservableVec<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::change::ChangeAction;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn letters() -> ObservableVec<char> {
        "abcdefgh".chars().collect()
    }

    fn record<T: Clone + 'static>(vec: &ObservableVec<T>) -> Rc<RefCell<Vec<SequenceChange<T>>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        crate::listen!(vec, log => move |_, change| {
            log.borrow_mut().push(change.clone());
            Ok(())
        });
        log
    }

    #[test]
    fn append_reports_new_last_index() {
        let mut vec = letters();
        let log = record(&vec);

        vec.append('x').unwrap();

        let change = &log.borrow()[0];
        assert_eq!(change.action(), ChangeAction::Add);
        assert_eq!(change.new_items(), Some(&Items::One('x')));
        assert_eq!(change.new_starting_index(), Some(8));
        assert_eq!(change.old_items(), None);
        assert_eq!(vec.last(), Some(&'x'));
    }

    #[test]
    fn extend_reports_materialized_items() {
        let mut vec = letters();
        let log = record(&vec);

        // A single-pass iterator still shows up in full
        vec.extend("xy".chars()).unwrap();

        let change = &log.borrow()[0];
        assert_eq!(change.action(), ChangeAction::Add);
        assert_eq!(change.new_items(), Some(&Items::Many(vec!['x', 'y'])));
        assert_eq!(change.new_starting_index(), Some(8));
        assert_eq!(vec[vec.len() - 2], 'x');
        assert_eq!(vec[vec.len() - 1], 'y');
    }

    #[test]
    fn insert_echoes_supplied_index() {
        let mut vec = letters();
        let log = record(&vec);

        vec.insert(0, 'x').unwrap();
        assert_eq!(&vec[..2], &['x', 'a']);

        vec.insert(-1, 'y').unwrap();
        assert_eq!(&vec[vec.len() - 2..], &['y', 'h']);

        let log = log.borrow();
        assert_eq!(log[0].new_starting_index(), Some(0));
        assert_eq!(log[1].new_starting_index(), Some(-1));
        assert_eq!(log[1].new_items(), Some(&Items::One('y')));
    }

    #[test]
    fn insert_past_end_appends() {
        let mut vec = letters();
        vec.insert(100, 'z').unwrap();
        assert_eq!(vec.last(), Some(&'z'));
    }

    #[test]
    fn move_to_end_and_near_end() {
        let mut vec = letters();
        let log = record(&vec);

        vec.move_item(0, -1).unwrap();
        assert_eq!(vec.last(), Some(&'a'));
        assert_eq!(vec.len(), 8);

        vec.move_item(0, -2).unwrap();
        assert_eq!(vec[vec.len() - 2], 'b');
        assert_eq!(vec.len(), 8);

        let log = log.borrow();
        assert_eq!(log[0].action(), ChangeAction::Move);
        assert_eq!(log[0].new_starting_index(), Some(-1));
        assert_eq!(log[0].old_starting_index(), Some(0));
        assert_eq!(log[0].old_items(), Some(&Items::One('a')));
        assert_eq!(log[0].new_items(), None);
    }

    #[test]
    fn move_takes_element_by_position_not_value() {
        let mut vec = ObservableVec::from_vec(vec![1, 2, 1]);
        vec.move_item(2, 1).unwrap();
        assert_eq!(*vec, vec![1, 1, 2]);
    }

    #[test]
    fn move_forward() {
        let mut vec = letters();
        vec.move_item(1, 3).unwrap();
        assert_eq!(vec.iter().collect::<String>(), "acdbefgh");
    }

    #[test]
    fn pop_defaults_to_last() {
        let mut vec = letters();
        let log = record(&vec);

        assert_eq!(vec.pop().unwrap(), 'h');
        assert_eq!(vec.len(), 7);

        let change = &log.borrow()[0];
        assert_eq!(change.action(), ChangeAction::Remove);
        assert_eq!(change.old_starting_index(), Some(-1));
        assert_eq!(change.old_items(), Some(&Items::One('h')));
    }

    #[test]
    fn pop_at_index() {
        let mut vec = letters();
        let log = record(&vec);

        assert_eq!(vec.pop_at(2).unwrap(), 'c');
        assert_eq!(log.borrow()[0].old_starting_index(), Some(2));
    }

    #[test]
    fn pop_failures_do_not_notify() {
        let mut vec: ObservableVec<i32> = ObservableVec::new();
        let log = record(&vec);

        assert!(matches!(vec.pop(), Err(Error::EmptyCollection)));
        vec.append(1).unwrap();
        assert!(matches!(vec.pop_at(5), Err(Error::IndexOutOfRange { index: 5, len: 1 })));
        assert_eq!(log.borrow().len(), 1);
    }

    #[test]
    fn remove_reports_found_index() {
        let mut vec = letters();
        let log = record(&vec);

        vec.remove(&'c').unwrap();
        assert!(!vec.contains(&'c'));

        let change = &log.borrow()[0];
        assert_eq!(change.old_starting_index(), Some(2));
        assert_eq!(change.old_items(), Some(&Items::One('c')));
    }

    #[test]
    fn remove_missing_fails_without_mutating() {
        let mut vec = letters();
        let log = record(&vec);

        assert!(matches!(vec.remove(&'z'), Err(Error::ItemNotFound)));
        assert_eq!(vec.len(), 8);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn set_reports_replace() {
        let mut vec = letters();
        let log = record(&vec);

        assert_eq!(vec.set(0, 'x').unwrap(), 'a');
        assert!(!vec.contains(&'a'));
        assert_eq!(vec[0], 'x');

        let change = &log.borrow()[0];
        assert_eq!(change.action(), ChangeAction::Replace);
        assert_eq!(change.new_items(), Some(&Items::One('x')));
        assert_eq!(change.old_items(), Some(&Items::One('a')));
        assert_eq!(change.new_starting_index(), Some(0));
        assert_eq!(change.old_starting_index(), Some(0));
    }

    #[test]
    fn delete_single() {
        let mut vec = letters();
        let log = record(&vec);

        vec.delete(-8).unwrap();
        assert!(!vec.contains(&'a'));
        assert_eq!(vec.len(), 7);

        let change = &log.borrow()[0];
        assert_eq!(change.action(), ChangeAction::Remove);
        assert_eq!(change.old_starting_index(), Some(-8));
        assert_eq!(change.old_items(), Some(&Items::One('a')));
    }

    #[test]
    fn delete_range_reports_start_and_run() {
        let mut vec = letters();
        let log = record(&vec);

        vec.delete_range(2..5).unwrap();
        assert_eq!(vec.iter().collect::<String>(), "abfgh");

        let change = &log.borrow()[0];
        assert_eq!(change.old_starting_index(), Some(2));
        assert_eq!(change.old_items(), Some(&Items::Many(vec!['c', 'd', 'e'])));

        assert!(vec.delete_range(3..9).is_err());
        assert_eq!(log.borrow().len(), 1);
    }

    #[test]
    fn clear_resets() {
        let mut vec = letters();
        let log = record(&vec);

        vec.clear().unwrap();
        assert!(vec.is_empty());
        assert_eq!(log.borrow()[0], CollectionChange::reset());
    }

    #[test]
    fn reads_never_notify() {
        let vec = letters();
        let log = record(&vec);

        assert_eq!(vec.len(), 8);
        assert_eq!(vec[3], 'd');
        assert!(vec.contains(&'e'));
        assert_eq!(vec.index_of(&'f'), Some(5));
        assert_eq!((&vec).into_iter().count(), 8);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn clone_has_no_subscribers() {
        let vec = letters();
        let _log = record(&vec);

        let copy = vec.clone();
        assert_eq!(*copy, *vec);
        assert!(copy.collection_changed().is_empty());
    }

    #[test]
    fn debug_format() {
        let vec = ObservableVec::from_vec(vec![1, 2, 3]);
        let debug = format!("{:?}", vec);
        assert!(debug.contains("ObservableVec"));
        assert!(debug.contains("[1, 2, 3]"));
    }
}
