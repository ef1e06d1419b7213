//! Knowledge base facade: top-level API for one analysis session.
//!
//! The [`KnowledgeBase`] owns the universe, the relation store and the
//! session configuration. Construction (`set_granules`,
//! `add_parent_relation`) needs `&mut self`; every query takes `&self` and
//! derives its result from current store state without caching.
//!
//! The query operations live next to the algorithms that implement them:
//! [`approx`](crate::approx), [`dependency`](crate::dependency),
//! [`reduct`](crate::reduct) and [`discern`](crate::discern).

use std::collections::BTreeMap;

use crate::config::AnalysisConfig;
use crate::error::{RoughError, RoughResult};
use crate::granule::{Element, Granule, GranuleStore};
use crate::relation::{Category, Partition, Relation, RelationGroup, RelationStore, group};

/// A rough-set knowledge base over elements of type `T`.
#[derive(Debug, Clone)]
pub struct KnowledgeBase<T> {
    config: AnalysisConfig,
    granules: GranuleStore<T>,
    relations: RelationStore<T>,
}

impl<T: Element> KnowledgeBase<T> {
    /// Create an empty knowledge base with the default configuration.
    pub fn new() -> Self {
        Self::with_config(AnalysisConfig::default())
    }

    /// Create an empty knowledge base with the given configuration.
    pub fn with_config(config: AnalysisConfig) -> Self {
        Self {
            config,
            granules: GranuleStore::new(),
            relations: RelationStore::new(),
        }
    }

    /// Set the universe, tagging every element with `tag`.
    ///
    /// Fails on an empty sequence, or once relations reference the current
    /// universe.
    pub fn set_granules<I>(&mut self, universe: I, tag: &str) -> RoughResult<()>
    where
        I: IntoIterator<Item = T>,
    {
        if !self.relations.is_empty() {
            return Err(RoughError::invalid_argument(
                "the universe cannot be replaced after relations have been defined",
            ));
        }
        let granules = GranuleStore::from_elements(universe, tag);
        if granules.is_empty() {
            return Err(RoughError::invalid_argument(
                "a knowledge base needs at least one element",
            ));
        }

        tracing::info!(elements = granules.len(), tag, "universe initialized");
        self.granules = granules;
        Ok(())
    }

    /// Set the universe using the configured default tag.
    pub fn set_granules_untagged<I>(&mut self, universe: I) -> RoughResult<()>
    where
        I: IntoIterator<Item = T>,
    {
        let tag = self.config.default_tag.clone();
        self.set_granules(universe, &tag)
    }

    /// Register a partition relation over the current universe.
    pub fn add_parent_relation<B, I>(&mut self, name: &str, blocks: B) -> RoughResult<()>
    where
        B: IntoIterator<Item = I>,
        I: IntoIterator<Item = T>,
    {
        if self.granules.is_empty() {
            return Err(RoughError::malformed(
                name,
                "call set_granules before defining relations",
            ));
        }
        let relation = self.relations.insert(name, blocks, &self.granules)?;
        tracing::debug!(
            relation = name,
            blocks = relation.blocks().len(),
            "relation registered"
        );
        Ok(())
    }

    /// Relation name → block containing `element`, for every covering relation.
    pub fn lookup(&self, element: &T) -> BTreeMap<String, Category<T>> {
        self.relations.lookup(element)
    }

    /// Block family of one relation, or the indiscernibility classes of several.
    pub fn relation_blocks<I, S>(&self, names: I) -> RoughResult<Partition<T>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names = group(names);
        match names.first() {
            Some(name) if names.len() == 1 => Ok(self.relations.get(name)?.block_family()),
            _ => self.indiscernibility(&names),
        }
    }

    /// The universe as an ordered set.
    pub fn universe(&self) -> Category<T> {
        self.granules.to_set()
    }

    /// Number of elements in the universe.
    pub fn universe_len(&self) -> usize {
        self.granules.len()
    }

    /// Whether `element` belongs to the universe.
    pub fn contains(&self, element: &T) -> bool {
        self.granules.contains(element)
    }

    /// All granules in universe order.
    pub fn granules(&self) -> &[Granule<T>] {
        self.granules.granules()
    }

    /// Granule (element plus tag) for `element`.
    pub fn granule(&self, element: &T) -> Option<&Granule<T>> {
        self.granules.get(element)
    }

    /// Elements in universe order.
    pub(crate) fn elements(&self) -> impl Iterator<Item = &T> {
        self.granules.elements()
    }

    /// Look up a relation.
    pub fn relation(&self, name: &str) -> RoughResult<&Relation<T>> {
        self.relations.get(name)
    }

    /// Names of all defined relations.
    pub fn relation_names(&self) -> RelationGroup {
        group(self.relations.names())
    }

    /// Block position of `element` in relation `name`, if covered.
    pub(crate) fn block_position(&self, name: &str, element: &T) -> Option<usize> {
        self.relations.block_position(name, element)
    }

    /// Fail with `UnknownRelation` unless every name in `names` is defined.
    pub(crate) fn ensure_defined(&self, names: &RelationGroup) -> RoughResult<()> {
        match names.iter().find(|n| !self.relations.contains(n)) {
            Some(missing) => Err(RoughError::UnknownRelation {
                name: missing.clone(),
            }),
            None => Ok(()),
        }
    }

    /// Fail with `InvalidArgument` if `names` is empty.
    pub(crate) fn ensure_nonempty(&self, names: &RelationGroup, what: &str) -> RoughResult<()> {
        if names.is_empty() {
            return Err(RoughError::invalid_argument(format!(
                "{what} needs at least one relation"
            )));
        }
        Ok(())
    }

    /// Get the session configuration.
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }
}

impl<T: Element> Default for KnowledgeBase<T> {
    fn default() -> Self {
        Self::new()
    }
}
