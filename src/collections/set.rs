// ============================================================================
// observable-collections - ObservableSet
// A HashSet that reports every state-changing mutation
// ============================================================================

use std::borrow::Borrow;
use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;
use std::ops::Deref;

use tracing::trace;

use crate::core::change::{CollectionChange, Items, SetChange};
use crate::core::error::{Error, Result};
use crate::primitives::event::{Event, Handler};

/// Handler type accepted by [`ObservableSet::collection_changed`].
pub type SetHandler<T> = Handler<ObservableSet<T>, SetChange<T>>;

// =============================================================================
// OBSERVABLE SET
// =============================================================================

/// A HashSet that emits a [`SetChange`] after every mutation.
///
/// `add` and `discard` are idempotent: a call that leaves the set unchanged
/// emits nothing. Set payloads never carry indices.
///
/// The bulk updates take any number of sources (`update([a, b])`), each an
/// iterable of elements. They always notify, even when nothing changed.
///
/// # Example
///
/// ```
/// use observable_collections::{Items, ObservableSet};
///
/// let mut tags: ObservableSet<&str> = ["rust", "async"].into_iter().collect();
///
/// tags.collection_changed().listen(|_sender, change| {
///     assert_eq!(change.new_items(), Some(&Items::One("io")));
///     Ok(())
/// });
///
/// assert!(tags.add("io").unwrap());
/// assert!(!tags.add("io").unwrap()); // already present, no notification
/// assert_eq!(tags.len(), 3);
/// ```
pub struct ObservableSet<T>
where
    T: Eq + Hash + Clone,
{
    data: HashSet<T>,
    collection_changed: Event<ObservableSet<T>, SetChange<T>>,
}

impl<T> ObservableSet<T>
where
    T: Eq + Hash + Clone,
{
    /// Create a new empty observable set.
    pub fn new() -> Self {
        Self::from_set(HashSet::new())
    }

    /// Create an observable set with initial capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::from_set(HashSet::with_capacity(capacity))
    }

    /// Wrap an existing set. No notification is emitted.
    pub fn from_set(data: HashSet<T>) -> Self {
        Self {
            data,
            collection_changed: Event::new(),
        }
    }

    /// The event fired after every mutation.
    pub fn collection_changed(&self) -> &Event<ObservableSet<T>, SetChange<T>> {
        &self.collection_changed
    }

    pub fn into_inner(self) -> HashSet<T> {
        self.data
    }

    fn notify(&self, change: SetChange<T>) -> Result<()> {
        trace!(action = ?change.action(), len = self.data.len(), "set changed");
        self.collection_changed.invoke(self, &change)
    }

    // =========================================================================
    // SINGLE ELEMENT
    // =========================================================================

    /// Adds `item`. Returns false, without notifying, if it was already there.
    pub fn add(&mut self, item: T) -> Result<bool> {
        if self.data.contains(&item) {
            return Ok(false);
        }
        self.data.insert(item.clone());
        self.notify(CollectionChange::add(Items::One(item)))?;
        Ok(true)
    }

    /// Removes `item` if present. Returns false, without notifying, if absent.
    pub fn discard<Q>(&mut self, item: &Q) -> Result<bool>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        match self.data.take(item) {
            Some(removed) => {
                self.notify(CollectionChange::remove(Items::One(removed)))?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Removes `item`, failing with [`Error::ItemNotFound`] if absent.
    pub fn remove<Q>(&mut self, item: &Q) -> Result<()>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let removed = self.data.take(item).ok_or(Error::ItemNotFound)?;
        self.notify(CollectionChange::remove(Items::One(removed)))
    }

    /// Removes and returns an arbitrary element.
    pub fn pop(&mut self) -> Result<T> {
        let item = self
            .data
            .iter()
            .next()
            .cloned()
            .ok_or(Error::EmptyCollection)?;
        self.data.remove(&item);
        self.notify(CollectionChange::remove(Items::One(item.clone())))?;
        Ok(item)
    }

    /// Removes all elements. Emits `Reset`.
    pub fn clear(&mut self) -> Result<()> {
        self.data.clear();
        self.notify(CollectionChange::reset())
    }

    // =========================================================================
    // BULK UPDATES
    // =========================================================================

    /// Adds every element of every source.
    ///
    /// `new_items` holds only the elements that were not already present, in
    /// encounter order.
    pub fn update<I, S>(&mut self, sources: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: IntoIterator<Item = T>,
    {
        let mut added = Vec::new();
        for item in sources.into_iter().flatten() {
            if !self.data.contains(&item) {
                self.data.insert(item.clone());
                added.push(item);
            }
        }
        self.notify(CollectionChange::add(Items::Many(added)))
    }

    /// Removes every element found in any source.
    ///
    /// `old_items` holds the elements that were actually removed.
    pub fn difference_update<I, S>(&mut self, sources: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: IntoIterator<Item = T>,
    {
        let mut removed = Vec::new();
        for item in sources.into_iter().flatten() {
            if let Some(item) = self.data.take(&item) {
                removed.push(item);
            }
        }
        self.notify(CollectionChange::remove(Items::Many(removed)))
    }

    /// Keeps only the elements found in every source.
    ///
    /// `old_items` holds the elements that were dropped. With no sources at
    /// all the set is left as is.
    ///
    /// An element missing from any single source is dropped, so with several
    /// sources `old_items` also includes elements that some sources do
    /// contain. It always equals the set of elements that left the set.
    pub fn intersection_update<I, S>(&mut self, sources: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: IntoIterator<Item = T>,
    {
        let sources: Vec<HashSet<T>> = sources
            .into_iter()
            .map(|source| source.into_iter().collect())
            .collect();

        let dropped: Vec<T> = self
            .data
            .iter()
            .filter(|item| !sources.iter().all(|source| source.contains(*item)))
            .cloned()
            .collect();
        for item in &dropped {
            self.data.remove(item);
        }

        self.notify(CollectionChange::remove(Items::Many(dropped)))
    }
}

impl<T> Deref for ObservableSet<T>
where
    T: Eq + Hash + Clone,
{
    type Target = HashSet<T>;

    fn deref(&self) -> &Self::Target {
        &self.data
    }
}

impl<T> Default for ObservableSet<T>
where
    T: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for ObservableSet<T>
where
    T: Eq + Hash + Clone,
{
    fn clone(&self) -> Self {
        Self::from_set(self.data.clone())
    }
}

impl<T> fmt::Debug for ObservableSet<T>
where
    T: Eq + Hash + Clone + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObservableSet")
            .field("data", &self.data)
            .field("handlers", &self.collection_changed.len())
            .finish()
    }
}

impl<T> FromIterator<T> for ObservableSet<T>
where
    T: Eq + Hash + Clone,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_set(iter.into_iter().collect())
    }
}

impl<'a, T> IntoIterator for &'a ObservableSet<T>
where
    T: Eq + Hash + Clone,
{
    type Item = &'a T;
    type IntoIter = std::collections::hash_set::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

// =============================================================================
// TESTS
// =============================================================================
