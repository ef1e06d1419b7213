//! Relation store: named block families over the universe.
//!
//! Each relation is a name plus a family of non-empty, pairwise disjoint
//! blocks. The store keeps a [`MembershipIndex`] (element → relation → block)
//! so per-element lookups are O(1) instead of a scan over every block.
//! Relations are append-only; the index is extended on every insertion.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::error::{RoughError, RoughResult};
use crate::granule::{Element, GranuleStore};

/// A set of universe elements: a block of a relation, an equivalence class,
/// or an arbitrary target set being approximated.
pub type Category<T> = BTreeSet<T>;

/// A family of categories, e.g. the equivalence classes of a relation group.
pub type Partition<T> = BTreeSet<Category<T>>;

/// A set of relation names.
pub type RelationGroup = BTreeSet<String>;

/// Collect relation names into a [`RelationGroup`].
pub fn group<I, S>(names: I) -> RelationGroup
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    names.into_iter().map(|n| n.as_ref().to_string()).collect()
}

/// A named relation: its blocks in insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relation<T> {
    name: String,
    blocks: Vec<Category<T>>,
}

impl<T: Element> Relation<T> {
    /// The relation name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Blocks in insertion order.
    pub fn blocks(&self) -> &[Category<T>] {
        &self.blocks
    }

    /// Blocks as a set of sets.
    pub fn block_family(&self) -> Partition<T> {
        self.blocks.iter().cloned().collect()
    }

    /// Union of all blocks.
    pub fn coverage(&self) -> Category<T> {
        self.blocks.iter().flatten().cloned().collect()
    }

    /// The single designated block of a family relation.
    pub fn designated_block(&self) -> RoughResult<&Category<T>> {
        match self.blocks.as_slice() {
            [block] => Ok(block),
            blocks => Err(RoughError::malformed(
                &self.name,
                format!(
                    "family operators need exactly one designated block, found {}",
                    blocks.len()
                ),
            )),
        }
    }
}

// ---------------------------------------------------------------------------
// Membership index
// ---------------------------------------------------------------------------

/// Element → (relation name → block position) lookup.
#[derive(Debug, Clone)]
pub struct MembershipIndex<T> {
    slots: HashMap<T, BTreeMap<String, usize>>,
}

impl<T: Element> MembershipIndex<T> {
    /// Create an empty index.
    pub fn new() -> Self {
        Self {
            slots: HashMap::new(),
        }
    }

    /// Block position of `element` within relation `name`.
    pub fn block_position(&self, element: &T, name: &str) -> Option<usize> {
        self.slots.get(element).and_then(|m| m.get(name)).copied()
    }

    /// All (relation, block position) entries for `element`.
    pub fn entries(&self, element: &T) -> Option<&BTreeMap<String, usize>> {
        self.slots.get(element)
    }

    /// Commit a fully validated batch of entries for one relation.
    fn extend(&mut self, name: &str, entries: HashMap<T, usize>) {
        for (element, position) in entries {
            self.slots
                .entry(element)
                .or_default()
                .insert(name.to_string(), position);
        }
    }
}

impl<T: Element> Default for MembershipIndex<T> {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Relation store
// ---------------------------------------------------------------------------

/// Append-only store of named relations plus their membership index.
#[derive(Debug, Clone)]
pub struct RelationStore<T> {
    relations: BTreeMap<String, Relation<T>>,
    index: MembershipIndex<T>,
}

impl<T: Element> RelationStore<T> {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            relations: BTreeMap::new(),
            index: MembershipIndex::new(),
        }
    }

    /// Validate and register a relation over `universe`.
    ///
    /// The index entries are staged in full before anything is committed, so
    /// a rejected relation leaves the store untouched.
    pub fn insert<B, I>(
        &mut self,
        name: &str,
        blocks: B,
        universe: &GranuleStore<T>,
    ) -> RoughResult<&Relation<T>>
    where
        B: IntoIterator<Item = I>,
        I: IntoIterator<Item = T>,
    {
        if self.relations.contains_key(name) {
            return Err(RoughError::malformed(name, "relation is already defined"));
        }

        let mut staged: HashMap<T, usize> = HashMap::new();
        let mut collected = Vec::new();
        for block in blocks {
            let block: Category<T> = block.into_iter().collect();
            if block.is_empty() {
                return Err(RoughError::malformed(name, "blocks must be non-empty"));
            }
            let position = collected.len();
            for element in &block {
                if !universe.contains(element) {
                    return Err(RoughError::malformed(
                        name,
                        format!("element {element:?} is not part of the universe"),
                    ));
                }
                if staged.insert(element.clone(), position).is_some() {
                    return Err(RoughError::malformed(
                        name,
                        format!("element {element:?} appears in more than one block"),
                    ));
                }
            }
            collected.push(block);
        }

        self.index.extend(name, staged);
        let relation = self
            .relations
            .entry(name.to_string())
            .or_insert(Relation {
                name: name.to_string(),
                blocks: collected,
            });
        Ok(&*relation)
    }

    /// Look up a relation by name.
    pub fn get(&self, name: &str) -> RoughResult<&Relation<T>> {
        self.relations
            .get(name)
            .ok_or_else(|| RoughError::UnknownRelation {
                name: name.to_string(),
            })
    }

    /// Whether a relation with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.relations.contains_key(name)
    }

    /// Block position of `element` in relation `name`, if covered.
    pub fn block_position(&self, name: &str, element: &T) -> Option<usize> {
        self.index.block_position(element, name)
    }

    /// Block of relation `name` containing `element`, if covered.
    pub fn block_of(&self, name: &str, element: &T) -> Option<&Category<T>> {
        let position = self.block_position(name, element)?;
        self.relations
            .get(name)
            .and_then(|r| r.blocks.get(position))
    }

    /// Relation name → containing block, for every relation covering `element`.
    pub fn lookup(&self, element: &T) -> BTreeMap<String, Category<T>> {
        let Some(entries) = self.index.entries(element) else {
            return BTreeMap::new();
        };
        entries
            .iter()
            .filter_map(|(name, &position)| {
                let block = self.relations.get(name)?.blocks.get(position)?;
                Some((name.clone(), block.clone()))
            })
            .collect()
    }

    /// Relation names in lexicographic order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.relations.keys().map(|k| k.as_str())
    }

    /// Number of relations.
    pub fn len(&self) -> usize {
        self.relations.len()
    }

    /// Whether no relation has been registered.
    pub fn is_empty(&self) -> bool {
        self.relations.is_empty()
    }
}

impl<T: Element> Default for RelationStore<T> {
    fn default() -> Self {
        Self::new()
    }
}
