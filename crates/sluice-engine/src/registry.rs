//! Per-kind identifier tables.
//!
//! Every object of every kind is registered here at construction. The
//! position of an identifier in its kind's table is the object's index, so
//! `count(kind)` is the table length and identifiers resolve back to the
//! index they were registered under.

use indexmap::IndexSet;
use sluice_core::ObjectKind;

/// Identifier tables for all object kinds.
#[derive(Clone, Debug)]
pub struct ObjectRegistry {
    tables: [IndexSet<String>; ObjectKind::COUNT],
}

impl ObjectRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            tables: std::array::from_fn(|_| IndexSet::new()),
        }
    }

    /// Number of registered objects of `kind`.
    pub fn count(&self, kind: ObjectKind) -> usize {
        self.tables[kind.slot()].len()
    }

    /// Identifier of the object at `index`, if any.
    pub fn id(&self, kind: ObjectKind, index: usize) -> Option<&str> {
        self.tables[kind.slot()].get_index(index).map(String::as_str)
    }

    /// Index of the object registered as `id`, if any.
    pub fn index_of(&self, kind: ObjectKind, id: &str) -> Option<usize> {
        self.tables[kind.slot()].get_index_of(id)
    }

    /// Register `id`, returning its index, or `None` if it is already taken
    /// within `kind`.
    pub(crate) fn insert(&mut self, kind: ObjectKind, id: &str) -> Option<usize> {
        let (index, inserted) = self.tables[kind.slot()].insert_full(id.to_owned());
        inserted.then_some(index)
    }

    /// Drop every identifier.
    pub(crate) fn clear(&mut self) {
        for table in &mut self.tables {
            table.clear();
        }
    }
}

impl Default for ObjectRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_follow_insertion_order() {
        let mut r = ObjectRegistry::new();
        assert_eq!(r.insert(ObjectKind::Node, "J1"), Some(0));
        assert_eq!(r.insert(ObjectKind::Node, "J2"), Some(1));
        assert_eq!(r.insert(ObjectKind::Link, "J1"), Some(0));
        assert_eq!(r.count(ObjectKind::Node), 2);
        assert_eq!(r.id(ObjectKind::Node, 1), Some("J2"));
        assert_eq!(r.index_of(ObjectKind::Node, "J2"), Some(1));
    }

    #[test]
    fn duplicates_within_kind_rejected() {
        let mut r = ObjectRegistry::new();
        r.insert(ObjectKind::Gage, "RG1");
        assert_eq!(r.insert(ObjectKind::Gage, "RG1"), None);
        assert_eq!(r.count(ObjectKind::Gage), 1);
    }

    #[test]
    fn clear_empties_all_kinds() {
        let mut r = ObjectRegistry::new();
        r.insert(ObjectKind::Curve, "C1");
        r.insert(ObjectKind::Lid, "L1");
        r.clear();
        for kind in ObjectKind::ALL {
            assert_eq!(r.count(kind), 0);
        }
        assert_eq!(r.id(ObjectKind::Curve, 0), None);
    }
}
