// ============================================================================
// observable-collections - ObservableMap
// An insertion-ordered map that reports every mutation
// ============================================================================
//
// Backed by IndexMap so `popitem` is deterministic: it removes the most
// recently inserted entry. Removals by key use `shift_remove`, which keeps the
// relative order of the remaining entries.
//
// Keyed assignment decides Add vs Replace on key presence alone. A stored
// value is never treated as absent, whatever it is (an `Option::None` value
// still counts as present).
// ============================================================================

use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;
use std::ops::Deref;

use indexmap::IndexMap;
use tracing::trace;

use crate::core::change::{CollectionChange, MapChange, MapItems};
use crate::core::error::{Error, Result};
use crate::primitives::event::{Event, Handler};

/// Handler type accepted by [`ObservableMap::collection_changed`].
pub type MapHandler<K, V> = Handler<ObservableMap<K, V>, MapChange<K, V>>;

// =============================================================================
// OBSERVABLE MAP
// =============================================================================

/// A key-value map that emits a [`MapChange`] after every mutation.
///
/// The sender passed to handlers is the map itself, like every other
/// observable collection.
///
/// # Example
///
/// ```
/// use observable_collections::{ChangeAction, MapItems, ObservableMap};
///
/// let mut scores: ObservableMap<&str, i32> = [("a", 1), ("b", 2)].into_iter().collect();
///
/// scores.collection_changed().listen(|map, change| {
///     assert_eq!(change.action(), ChangeAction::Replace);
///     assert_eq!(change.new_items(), Some(&MapItems::Value(10)));
///     assert_eq!(change.old_items(), Some(&MapItems::Value(1)));
///     assert_eq!(map.get("a"), Some(&10));
///     Ok(())
/// });
///
/// assert_eq!(scores.insert("a", 10).unwrap(), Some(1));
/// ```
pub struct ObservableMap<K, V>
where
    K: Eq + Hash + Clone,
{
    data: IndexMap<K, V>,
    collection_changed: Event<ObservableMap<K, V>, MapChange<K, V>>,
}

impl<K, V> ObservableMap<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Create a new empty observable map.
    pub fn new() -> Self {
        Self::from_map(IndexMap::new())
    }

    /// Create an observable map with initial capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::from_map(IndexMap::with_capacity(capacity))
    }

    /// Wrap an existing map. No notification is emitted.
    pub fn from_map(data: IndexMap<K, V>) -> Self {
        Self {
            data,
            collection_changed: Event::new(),
        }
    }

    /// Build a map from a positional source and explicit entries.
    ///
    /// On a key collision the positional entry wins, as in [`update_with`].
    ///
    /// [`update_with`]: ObservableMap::update_with
    pub fn from_entries<P, E>(positional: P, explicit: E) -> Self
    where
        P: IntoIterator<Item = (K, V)>,
        E: IntoIterator<Item = (K, V)>,
    {
        Self::from_map(merge(positional, explicit))
    }

    /// The event fired after every mutation.
    pub fn collection_changed(&self) -> &Event<ObservableMap<K, V>, MapChange<K, V>> {
        &self.collection_changed
    }

    pub fn into_inner(self) -> IndexMap<K, V> {
        self.data
    }

    fn notify(&self, change: MapChange<K, V>) -> Result<()> {
        trace!(action = ?change.action(), len = self.data.len(), "map changed");
        self.collection_changed.invoke(self, &change)
    }
}

impl<K, V> ObservableMap<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    // =========================================================================
    // ASSIGNMENT
    // =========================================================================

    /// Assigns `value` to `key`, returning the previous value.
    ///
    /// Emits `Add` for a new key and `Replace` (with the previous value in
    /// `old_items`) for an existing one.
    pub fn insert(&mut self, key: K, value: V) -> Result<Option<V>> {
        let previous = self.data.insert(key, value.clone());
        let change = match &previous {
            None => CollectionChange::add(MapItems::Value(value)),
            Some(old) => {
                CollectionChange::replace(MapItems::Value(value), MapItems::Value(old.clone()))
            }
        };
        self.notify(change)?;
        Ok(previous)
    }

    /// Merges `entries` into the map. See [`update_with`].
    ///
    /// [`update_with`]: ObservableMap::update_with
    pub fn update<P>(&mut self, entries: P) -> Result<()>
    where
        P: IntoIterator<Item = (K, V)>,
    {
        self.update_with(entries, std::iter::empty())
    }

    /// Merges a positional source and explicit entries into the map.
    ///
    /// The two are merged first, positional entries winning on a key
    /// collision. The notification is always a single `Add`, even when every
    /// key already existed: `new_items` holds the merged entries and
    /// `old_items` the previous values of the keys that were overwritten.
    pub fn update_with<P, E>(&mut self, positional: P, explicit: E) -> Result<()>
    where
        P: IntoIterator<Item = (K, V)>,
        E: IntoIterator<Item = (K, V)>,
    {
        let merged = merge(positional, explicit);

        let replaced: Vec<(K, V)> = merged
            .keys()
            .filter_map(|key| self.data.get(key).map(|old| (key.clone(), old.clone())))
            .collect();
        let merged: Vec<(K, V)> = merged.into_iter().collect();

        self.data.extend(merged.iter().cloned());
        self.notify(CollectionChange::merge(
            MapItems::Entries(merged),
            MapItems::Entries(replaced),
        ))
    }

    // =========================================================================
    // REMOVAL
    // =========================================================================

    /// Removes `key` and returns its value.
    pub fn pop<Q>(&mut self, key: &Q) -> Result<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let value = self.data.shift_remove(key).ok_or(Error::KeyNotFound)?;
        self.notify(CollectionChange::remove(MapItems::Value(value.clone())))?;
        Ok(value)
    }

    /// Removes and returns the most recently inserted entry.
    pub fn popitem(&mut self) -> Result<(K, V)> {
        let (key, value) = self.data.pop().ok_or(Error::EmptyCollection)?;
        self.notify(CollectionChange::remove(MapItems::Entry(key.clone(), value.clone())))?;
        Ok((key, value))
    }

    /// Removes `key`, failing with [`Error::KeyNotFound`] if absent.
    pub fn delete<Q>(&mut self, key: &Q) -> Result<()>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let value = self.data.shift_remove(key).ok_or(Error::KeyNotFound)?;
        self.notify(CollectionChange::remove(MapItems::Value(value)))
    }

    /// Removes all entries. Emits `Reset`.
    pub fn clear(&mut self) -> Result<()> {
        self.data.clear();
        self.notify(CollectionChange::reset())
    }
}

/// Merge explicit entries with a positional source; positional wins.
fn merge<K, V, P, E>(positional: P, explicit: E) -> IndexMap<K, V>
where
    K: Eq + Hash,
    P: IntoIterator<Item = (K, V)>,
    E: IntoIterator<Item = (K, V)>,
{
    let mut merged: IndexMap<K, V> = explicit.into_iter().collect();
    merged.extend(positional);
    merged
}

impl<K, V> Deref for ObservableMap<K, V>
where
    K: Eq + Hash + Clone,
{
    type Target = IndexMap<K, V>;

    fn deref(&self) -> &Self::Target {
        &self.data
    }
}

impl<K, V> Default for ObservableMap<K, V>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Clone for ObservableMap<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    fn clone(&self) -> Self {
        Self::from_map(self.data.clone())
    }
}

impl<K, V> fmt::Debug for ObservableMap<K, V>
where
    K: Eq + Hash + Clone + fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObservableMap")
            .field("data", &self.data)
            .field("handlers", &self.collection_changed.len())
            .finish()
    }
}

impl<K, V> FromIterator<(K, V)> for ObservableMap<K, V>
where
    K: Eq + Hash + Clone,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_map(iter.into_iter().collect())
    }
}

impl<'a, K, V> IntoIterator for &'a ObservableMap<K, V>
where
    K: Eq + Hash + Clone,
{
    type Item = (&'a K, &'a V);
    type IntoIter = indexmap::map::Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

// =============================================================================
// TESTS
// =============================================================================
