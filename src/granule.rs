//! Granule store: the universe of discourse.
//!
//! A universe is an ordered, deduplicated sequence of element identifiers.
//! Each element is wrapped in a [`Granule`] carrying a free-form tag
//! (e.g. a role label). Tags are metadata only; no algorithm reads them.

use std::collections::{BTreeSet, HashMap};
use std::fmt::Debug;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

/// Bound satisfied by every type usable as a universe element.
///
/// Elements need hashing for the membership index and a total order so that
/// categories, partitions and matrices are deterministic, comparable values.
pub trait Element: Clone + Eq + Hash + Ord + Debug {}

impl<T: Clone + Eq + Hash + Ord + Debug> Element for T {}

/// One universe element plus its tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Granule<T> {
    /// The element identifier.
    pub element: T,
    /// Free-form metadata label.
    pub tag: String,
}

impl<T> Granule<T> {
    /// Create a granule.
    pub fn new(element: T, tag: impl Into<String>) -> Self {
        Self {
            element,
            tag: tag.into(),
        }
    }
}

/// The ordered universe plus an element → position lookup.
#[derive(Debug, Clone)]
pub struct GranuleStore<T> {
    granules: Vec<Granule<T>>,
    positions: HashMap<T, usize>,
}

impl<T: Element> GranuleStore<T> {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            granules: Vec::new(),
            positions: HashMap::new(),
        }
    }

    /// Build a store from `elements`, all tagged with `tag`.
    ///
    /// Duplicates are dropped, keeping the first occurrence's position.
    pub fn from_elements<I>(elements: I, tag: &str) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut store = Self::new();
        for element in elements {
            if store.positions.contains_key(&element) {
                continue;
            }
            store.positions.insert(element.clone(), store.granules.len());
            store.granules.push(Granule::new(element, tag));
        }
        store
    }

    /// Whether `element` belongs to the universe.
    pub fn contains(&self, element: &T) -> bool {
        self.positions.contains_key(element)
    }

    /// Position of `element` in universe order.
    pub fn position(&self, element: &T) -> Option<usize> {
        self.positions.get(element).copied()
    }

    /// Granule for `element`, if present.
    pub fn get(&self, element: &T) -> Option<&Granule<T>> {
        self.position(element).map(|idx| &self.granules[idx])
    }

    /// All granules in universe order.
    pub fn granules(&self) -> &[Granule<T>] {
        &self.granules
    }

    /// Elements in universe order.
    pub fn elements(&self) -> impl Iterator<Item = &T> {
        self.granules.iter().map(|g| &g.element)
    }

    /// The universe as a set.
    pub fn to_set(&self) -> BTreeSet<T> {
        self.elements().cloned().collect()
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.granules.len()
    }

    /// Whether the universe is empty.
    pub fn is_empty(&self) -> bool {
        self.granules.is_empty()
    }
}

impl<T: Element> Default for GranuleStore<T> {
    fn default() -> Self {
        Self::new()
    }
}
