// ============================================================================
// observable-collections - Change Payloads
// The action taxonomy and the immutable record handed to every handler
// ============================================================================
//
// A single payload struct is used for every collection. The constructors are
// the only way to build one, and each constructor fills exactly the fields the
// action calls for:
//
//   Action  | new_items | new_starting_index | old_starting_index | old_items
//   --------+-----------+--------------------+--------------------+----------
//   Add     | set       | set (ordered)      | -                  | -
//   Remove  | -         | -                  | set (ordered)      | set
//   Replace | set       | set (ordered)      | set (ordered)      | set
//   Reset   | -         | -                  | -                  | -
//   Move    | -         | set (new pos)      | set (old pos)      | set
//
// Map and set payloads never carry indices. The one deliberate exception to the
// table is the map merge (`ObservableMap::update`), which is an Add that also
// reports the entries it overwrote.
// ============================================================================

// =============================================================================
// CHANGE ACTION
// =============================================================================

/// Kind of mutation a notification describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeAction {
    /// One or more items were added.
    Add,
    /// One or more items were removed.
    Remove,
    /// An item was replaced in place.
    Replace,
    /// The collection was cleared.
    Reset,
    /// An item moved to a different position.
    Move,
}

// =============================================================================
// PAYLOAD ITEMS
// =============================================================================

/// Items carried by a sequence, deque or set notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Items<T> {
    /// A single element (append, insert, remove, replace, ...).
    One(T),
    /// Several elements (extend, range delete, set bulk updates).
    Many(Vec<T>),
}

impl<T> Items<T> {
    /// View the items as a slice, whichever variant holds them.
    pub fn as_slice(&self) -> &[T] {
        match self {
            Items::One(item) => std::slice::from_ref(item),
            Items::Many(items) => items,
        }
    }

    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }

    /// The single item, if this is [`Items::One`].
    pub fn as_one(&self) -> Option<&T> {
        match self {
            Items::One(item) => Some(item),
            Items::Many(_) => None,
        }
    }

    pub fn into_vec(self) -> Vec<T> {
        match self {
            Items::One(item) => vec![item],
            Items::Many(items) => items,
        }
    }
}

/// Items carried by a map notification.
///
/// Which variant appears depends on the operation: keyed assignment, `pop` and
/// `delete` report the bare value, `popitem` reports the removed entry, and
/// `update` reports whole entry lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapItems<K, V> {
    Value(V),
    Entry(K, V),
    Entries(Vec<(K, V)>),
}

impl<K, V> MapItems<K, V> {
    pub fn as_value(&self) -> Option<&V> {
        match self {
            MapItems::Value(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_entry(&self) -> Option<(&K, &V)> {
        match self {
            MapItems::Entry(key, value) => Some((key, value)),
            _ => None,
        }
    }

    pub fn as_entries(&self) -> Option<&[(K, V)]> {
        match self {
            MapItems::Entries(entries) => Some(entries),
            _ => None,
        }
    }
}

// =============================================================================
// COLLECTION CHANGE
// =============================================================================

/// Immutable description of one mutation.
///
/// Indices are reported exactly as the caller supplied them, so a negative
/// index passed to `insert` or `pop_at` shows up negative here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionChange<I> {
    action: ChangeAction,
    new_items: Option<I>,
    new_starting_index: Option<isize>,
    old_starting_index: Option<isize>,
    old_items: Option<I>,
}

/// Payload emitted by `ObservableVec` and `ObservableDeque`.
pub type SequenceChange<T> = CollectionChange<Items<T>>;

/// Payload emitted by `ObservableSet`. Never carries indices.
pub type SetChange<T> = CollectionChange<Items<T>>;

/// Payload emitted by `ObservableMap`. Never carries indices.
pub type MapChange<K, V> = CollectionChange<MapItems<K, V>>;

impl<I> CollectionChange<I> {
    fn build(
        action: ChangeAction,
        new_items: Option<I>,
        new_starting_index: Option<isize>,
        old_starting_index: Option<isize>,
        old_items: Option<I>,
    ) -> Self {
        Self {
            action,
            new_items,
            new_starting_index,
            old_starting_index,
            old_items,
        }
    }

    /// Items added to an unordered collection.
    pub fn add(new_items: I) -> Self {
        Self::build(ChangeAction::Add, Some(new_items), None, None, None)
    }

    /// Items added to an ordered collection starting at `index`.
    pub fn add_at(new_items: I, index: isize) -> Self {
        Self::build(ChangeAction::Add, Some(new_items), Some(index), None, None)
    }

    /// Entries merged into a map, with the prior values of keys that existed.
    pub fn merge(new_items: I, replaced: I) -> Self {
        Self::build(ChangeAction::Add, Some(new_items), None, None, Some(replaced))
    }

    /// Items removed from an unordered collection.
    pub fn remove(old_items: I) -> Self {
        Self::build(ChangeAction::Remove, None, None, None, Some(old_items))
    }

    /// Items removed from an ordered collection starting at `index`.
    pub fn remove_at(old_items: I, index: isize) -> Self {
        Self::build(ChangeAction::Remove, None, None, Some(index), Some(old_items))
    }

    /// A value replaced in an unordered collection.
    pub fn replace(new_items: I, old_items: I) -> Self {
        Self::build(ChangeAction::Replace, Some(new_items), None, None, Some(old_items))
    }

    /// An element replaced in place at `index`.
    pub fn replace_at(new_items: I, old_items: I, index: isize) -> Self {
        Self::build(
            ChangeAction::Replace,
            Some(new_items),
            Some(index),
            Some(index),
            Some(old_items),
        )
    }

    /// The collection was cleared.
    pub fn reset() -> Self {
        Self::build(ChangeAction::Reset, None, None, None, None)
    }

    /// `item` moved from `old_index` to `new_index`.
    pub fn moved(item: I, new_index: isize, old_index: isize) -> Self {
        Self::build(
            ChangeAction::Move,
            None,
            Some(new_index),
            Some(old_index),
            Some(item),
        )
    }

    pub fn action(&self) -> ChangeAction {
        self.action
    }

    pub fn new_items(&self) -> Option<&I> {
        self.new_items.as_ref()
    }

    pub fn new_starting_index(&self) -> Option<isize> {
        self.new_starting_index
    }

    pub fn old_starting_index(&self) -> Option<isize> {
        self.old_starting_index
    }

    pub fn old_items(&self) -> Option<&I> {
        self.old_items.as_ref()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_fills_new_side_only() {
        let change: SequenceChange<char> = CollectionChange::add_at(Items::One('x'), 7);
        assert_eq!(change.action(), ChangeAction::Add);
        assert_eq!(change.new_items(), Some(&Items::One('x')));
        assert_eq!(change.new_starting_index(), Some(7));
        assert_eq!(change.old_starting_index(), None);
        assert_eq!(change.old_items(), None);
    }

    #[test]
    fn remove_fills_old_side_only() {
        let change: SetChange<char> = CollectionChange::remove(Items::One('a'));
        assert_eq!(change.action(), ChangeAction::Remove);
        assert_eq!(change.new_items(), None);
        assert_eq!(change.new_starting_index(), None);
        assert_eq!(change.old_starting_index(), None);
        assert_eq!(change.old_items(), Some(&Items::One('a')));
    }

    #[test]
    fn replace_at_uses_same_index_twice() {
        let change = CollectionChange::replace_at(Items::One(2), Items::One(1), -3);
        assert_eq!(change.action(), ChangeAction::Replace);
        assert_eq!(change.new_starting_index(), Some(-3));
        assert_eq!(change.old_starting_index(), Some(-3));
    }

    #[test]
    fn reset_is_empty() {
        let change: MapChange<&str, i32> = CollectionChange::reset();
        assert_eq!(change.action(), ChangeAction::Reset);
        assert!(change.new_items().is_none() && change.old_items().is_none());
        assert!(change.new_starting_index().is_none() && change.old_starting_index().is_none());
    }

    #[test]
    fn move_has_no_new_items() {
        let change = CollectionChange::moved(Items::One('a'), -1, 0);
        assert_eq!(change.action(), ChangeAction::Move);
        assert_eq!(change.new_items(), None);
        assert_eq!(change.new_starting_index(), Some(-1));
        assert_eq!(change.old_starting_index(), Some(0));
        assert_eq!(change.old_items(), Some(&Items::One('a')));
    }

    #[test]
    fn items_views() {
        let one = Items::One(5);
        assert_eq!(one.as_slice(), &[5]);
        assert_eq!(one.as_one(), Some(&5));

        let many = Items::Many(vec![1, 2, 3]);
        assert_eq!(many.len(), 3);
        assert_eq!(many.as_one(), None);
        assert_eq!(many.into_vec(), vec![1, 2, 3]);

        assert!(Items::<i32>::Many(Vec::new()).is_empty());
    }

    #[test]
    fn map_items_views() {
        let value: MapItems<&str, i32> = MapItems::Value(1);
        assert_eq!(value.as_value(), Some(&1));
        assert_eq!(value.as_entry(), None);

        let entry = MapItems::Entry("a", 1);
        assert_eq!(entry.as_entry(), Some((&"a", &1)));

        let entries = MapItems::Entries(vec![("a", 1)]);
        assert_eq!(entries.as_entries(), Some(&[("a", 1)][..]));
    }
}
