//! Copy-on-write visibility map

use crate::element::ElementId;

/// Snapshot of per-element visibility
///
/// Backed by a persistent hash map: cloning is O(1) and every update yields a
/// new map while previously published snapshots stay untouched. Consumers can
/// compare snapshots with [`ptr_eq`](Self::ptr_eq) to decide whether to re-render.
#[derive(Debug, Clone, Default)]
pub struct VisibilityMap {
    entries: im::HashMap<ElementId, bool>,
    revision: u64,
}

impl VisibilityMap {
    /// Create empty map
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Visibility of an element; `false` for unknown ids
    #[inline]
    #[must_use]
    pub fn is_visible(&self, id: &str) -> bool {
        self.entries.get(id).copied().unwrap_or(false)
    }

    /// Check if an element has an entry
    #[inline]
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Number of entries
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if map is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Publication counter, bumped on every update
    #[inline]
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Check if two snapshots are the same publication
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.revision == other.revision && self.entries.ptr_eq(&other.entries)
    }

    /// Ids currently visible, sorted
    #[must_use]
    pub fn visible_ids(&self) -> Vec<&ElementId> {
        let mut ids: Vec<_> = self
            .entries
            .iter()
            .filter(|(_, visible)| **visible)
            .map(|(id, _)| id)
            .collect();
        ids.sort();
        ids
    }

    /// Iterate entries in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = (&ElementId, bool)> {
        self.entries.iter().map(|(id, visible)| (id, *visible))
    }

    /// New publication with `changes` applied
    pub(crate) fn updated<I>(&self, changes: I) -> Self
    where
        I: IntoIterator<Item = (ElementId, bool)>,
    {
        let mut entries = self.entries.clone();
        for (id, visible) in changes {
            entries.insert(id, visible);
        }
        Self {
            entries,
            revision: self.revision + 1,
        }
    }

    /// New publication without `id`
    pub(crate) fn without(&self, id: &str) -> Self {
        let mut entries = self.entries.clone();
        entries.remove(id);
        Self {
            entries,
            revision: self.revision + 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_ids_are_hidden() {
        let map = VisibilityMap::new();
        assert!(!map.is_visible("nowhere"));
        assert!(map.is_empty());
    }

    #[test]
    fn update_publishes_new_identity() {
        let first = VisibilityMap::new().updated([(ElementId::from("a"), false)]);
        let second = first.updated([(ElementId::from("a"), true)]);

        assert!(!first.ptr_eq(&second));
        assert!(!first.is_visible("a"));
        assert!(second.is_visible("a"));
        assert_eq!(second.revision(), first.revision() + 1);
    }

    #[test]
    fn clone_shares_identity() {
        let map = VisibilityMap::new().updated([(ElementId::from("a"), true)]);
        let copy = map.clone();
        assert!(map.ptr_eq(&copy));
    }

    #[test]
    fn overwrite_keeps_single_entry() {
        let map = VisibilityMap::new()
            .updated([(ElementId::from("a"), true)])
            .updated([(ElementId::from("a"), false)]);
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn without_removes() {
        let map = VisibilityMap::new().updated([
            (ElementId::from("a"), true),
            (ElementId::from("b"), true),
        ]);
        let trimmed = map.without("a");
        assert!(!trimmed.contains("a"));
        assert!(map.contains("a"));
        assert_eq!(trimmed.visible_ids(), vec![&ElementId::from("b")]);
    }
}
