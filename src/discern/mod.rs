//! Discernibility engine.
//!
//! The discernibility matrix records, for each unordered pair of elements,
//! which relations place the two in different blocks. Cells are keyed by
//! `(min, max)` so every pair appears once, and empty cells are omitted.
//! Decision-table operations built on the same pairwise view live in
//! [`decision`].

pub mod decision;

use std::collections::BTreeMap;

use crate::error::RoughResult;
use crate::granule::Element;
use crate::knowledge::KnowledgeBase;
use crate::relation::{RelationGroup, group};

/// Pair `(min, max)` → relations discerning the pair.
pub type DiscernibilityMatrix<T> = BTreeMap<(T, T), RelationGroup>;

impl<T: Element> KnowledgeBase<T> {
    /// Relations in `relations` that place `x` and `y` in different blocks.
    ///
    /// An element outside a relation's coverage is discerned from a covered
    /// one, but two uncovered elements are not.
    pub(crate) fn discerning(&self, relations: &RelationGroup, x: &T, y: &T) -> RelationGroup {
        relations
            .iter()
            .filter(|name| self.block_position(name, x) != self.block_position(name, y))
            .cloned()
            .collect()
    }

    /// Whether `x` and `y` fall in the same class of every relation in `group`.
    pub(crate) fn same_class(&self, group: &RelationGroup, x: &T, y: &T) -> bool {
        self.discerning(group, x, y).is_empty()
    }

    /// Discernibility matrix of `relations` over the universe.
    ///
    /// With a `decision` group, pairs that share a decision class are left
    /// out.
    pub fn discernibility_matrix<I, S>(
        &self,
        relations: I,
        decision: Option<&RelationGroup>,
    ) -> RoughResult<DiscernibilityMatrix<T>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let relations = group(relations);
        self.ensure_defined(&relations)?;
        if let Some(decision) = decision {
            self.ensure_defined(decision)?;
        }
        Ok(self.matrix_of(&relations, decision))
    }

    pub(crate) fn matrix_of(
        &self,
        relations: &RelationGroup,
        decision: Option<&RelationGroup>,
    ) -> DiscernibilityMatrix<T> {
        let universe: Vec<T> = self.universe().into_iter().collect();
        let mut matrix = DiscernibilityMatrix::new();
        for (i, x) in universe.iter().enumerate() {
            for y in &universe[i + 1..] {
                if decision.is_some_and(|d| self.same_class(d, x, y)) {
                    continue;
                }
                let cell = self.discerning(relations, x, y);
                if !cell.is_empty() {
                    matrix.insert((x.clone(), y.clone()), cell);
                }
            }
        }
        tracing::debug!(
            relations = relations.len(),
            cells = matrix.len(),
            relative = decision.is_some(),
            "discernibility matrix built"
        );
        matrix
    }

    /// Discernibility matrix reduced to the relations that matter.
    ///
    /// A cell holding a core relation keeps only its core relations. Any
    /// other cell keeps the relations that occur in some reduct; cells left
    /// empty are dropped. Core and reducts are taken relative to `decision`
    /// when one is given.
    pub fn minimum_discernibility_matrix<I, S>(
        &self,
        relations: I,
        decision: Option<&RelationGroup>,
    ) -> RoughResult<DiscernibilityMatrix<T>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let relations = group(relations);
        let matrix = self.discernibility_matrix(&relations, decision)?;
        let core = self.find_core(&relations, decision)?;
        let in_reducts: RelationGroup = self
            .find_reducts(&relations, decision)?
            .into_iter()
            .flatten()
            .collect();

        Ok(matrix
            .into_iter()
            .filter_map(|(pair, cell)| {
                let kept: RelationGroup = if cell.is_disjoint(&core) {
                    cell.intersection(&in_reducts).cloned().collect()
                } else {
                    cell.intersection(&core).cloned().collect()
                };
                (!kept.is_empty()).then_some((pair, kept))
            })
            .collect())
    }
}
