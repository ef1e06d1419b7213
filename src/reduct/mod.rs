//! Reduct engine: dispensability, cores and reducts.
//!
//! Every operation is parameterized by a [`Characterization`]: a relation
//! `r ∈ R` is dispensable when `φ(R − {r}) == φ(R)`, the core collects the
//! indispensable relations, and a reduct is an inclusion-minimal `R' ⊆ R`
//! with `φ(R') == φ(R)`.
//!
//! The plain entry points pick the characterization from their arguments:
//! indiscernibility without a `relative_to` group, the relative positive
//! region with one. The `*_with` variants take any strategy, including the
//! family intersection and union of single-block relations.

pub(crate) mod search;
pub mod strategy;

use std::collections::BTreeSet;

use crate::error::{RoughError, RoughResult};
use crate::granule::Element;
use crate::knowledge::KnowledgeBase;
use crate::relation::{Category, RelationGroup, group};

use self::search::SubsetSearch;
use self::strategy::{Characterization, Indiscernibility, RelativePositiveRegion};

/// `R − {r}`.
fn without(relations: &RelationGroup, name: &str) -> RelationGroup {
    relations.iter().filter(|n| *n != name).cloned().collect()
}

pub(crate) fn require_member(relations: &RelationGroup, name: &str) -> RoughResult<()> {
    if relations.contains(name) {
        Ok(())
    } else {
        Err(RoughError::invalid_argument(format!(
            "relation `{name}` is not a member of the group"
        )))
    }
}

impl<T: Element> KnowledgeBase<T> {
    // -----------------------------------------------------------------------
    // Dispensability
    // -----------------------------------------------------------------------

    /// Whether `relation` can be dropped from `relations` without changing
    /// the indiscernibility partition, or the positive region of
    /// `relative_to` when given.
    pub fn dispensable<I, S>(
        &self,
        relations: I,
        relation: &str,
        relative_to: Option<&RelationGroup>,
    ) -> RoughResult<bool>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        match relative_to {
            None => self.dispensable_with(relations, relation, &Indiscernibility),
            Some(decision) => {
                let strategy = RelativePositiveRegion::new(decision);
                self.dispensable_with(relations, relation, &strategy)
            }
        }
    }

    /// [`dispensable`](Self::dispensable) under a custom characterization.
    pub fn dispensable_with<I, S, C>(
        &self,
        relations: I,
        relation: &str,
        strategy: &C,
    ) -> RoughResult<bool>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        C: Characterization<T>,
    {
        let relations = group(relations);
        require_member(&relations, relation)?;
        self.ensure_defined(&relations)?;
        self.is_dispensable(&relations, relation, strategy)
    }

    fn is_dispensable<C: Characterization<T>>(
        &self,
        relations: &RelationGroup,
        relation: &str,
        strategy: &C,
    ) -> RoughResult<bool> {
        let full = strategy.characterize(self, relations)?;
        let reduced = strategy.characterize(self, &without(relations, relation))?;
        Ok(full == reduced)
    }

    /// Whether no member of `relations` is dispensable.
    pub fn independent<I, S>(
        &self,
        relations: I,
        relative_to: Option<&RelationGroup>,
    ) -> RoughResult<bool>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        match relative_to {
            None => self.independent_with(relations, &Indiscernibility),
            Some(decision) => {
                let strategy = RelativePositiveRegion::new(decision);
                self.independent_with(relations, &strategy)
            }
        }
    }

    /// [`independent`](Self::independent) under a custom characterization.
    pub fn independent_with<I, S, C>(&self, relations: I, strategy: &C) -> RoughResult<bool>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        C: Characterization<T>,
    {
        let relations = group(relations);
        self.ensure_defined(&relations)?;
        Ok(self.core_of(&relations, strategy)?.len() == relations.len())
    }

    // -----------------------------------------------------------------------
    // Core and reducts
    // -----------------------------------------------------------------------

    /// Indispensable members of `relations`.
    pub fn find_core<I, S>(
        &self,
        relations: I,
        relative_to: Option<&RelationGroup>,
    ) -> RoughResult<RelationGroup>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        match relative_to {
            None => self.find_core_with(relations, &Indiscernibility),
            Some(decision) => {
                let strategy = RelativePositiveRegion::new(decision);
                self.find_core_with(relations, &strategy)
            }
        }
    }

    /// [`find_core`](Self::find_core) under a custom characterization.
    pub fn find_core_with<I, S, C>(&self, relations: I, strategy: &C) -> RoughResult<RelationGroup>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        C: Characterization<T>,
    {
        let relations = group(relations);
        self.ensure_defined(&relations)?;
        self.check_search_limit(&relations)?;
        let core = self.core_of(&relations, strategy)?;
        tracing::debug!(
            relations = relations.len(),
            core = core.len(),
            "core computed"
        );
        Ok(core)
    }

    pub(crate) fn core_of<C: Characterization<T>>(
        &self,
        relations: &RelationGroup,
        strategy: &C,
    ) -> RoughResult<RelationGroup> {
        let full = strategy.characterize(self, relations)?;
        let mut core = RelationGroup::new();
        for name in relations {
            if strategy.characterize(self, &without(relations, name))? != full {
                core.insert(name.clone());
            }
        }
        Ok(core)
    }

    /// All reducts of `relations`: minimal subgroups that preserve the
    /// indiscernibility partition, or the positive region of `relative_to`.
    pub fn find_reducts<I, S>(
        &self,
        relations: I,
        relative_to: Option<&RelationGroup>,
    ) -> RoughResult<BTreeSet<RelationGroup>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        match relative_to {
            None => self.find_reducts_with(relations, &Indiscernibility),
            Some(decision) => {
                let strategy = RelativePositiveRegion::new(decision);
                self.find_reducts_with(relations, &strategy)
            }
        }
    }

    /// [`find_reducts`](Self::find_reducts) under a custom characterization.
    pub fn find_reducts_with<I, S, C>(
        &self,
        relations: I,
        strategy: &C,
    ) -> RoughResult<BTreeSet<RelationGroup>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        C: Characterization<T>,
    {
        let relations = group(relations);
        self.ensure_defined(&relations)?;
        let reducts = self.reducts_of(&relations, strategy)?;
        tracing::debug!(
            relations = relations.len(),
            reducts = reducts.len(),
            "reduct search complete"
        );
        Ok(reducts.into_iter().collect())
    }

    /// Reducts in size-then-lexicographic order.
    pub(crate) fn reducts_of<C: Characterization<T>>(
        &self,
        relations: &RelationGroup,
        strategy: &C,
    ) -> RoughResult<Vec<RelationGroup>> {
        let full = strategy.characterize(self, relations)?;
        let items: Vec<String> = relations.iter().cloned().collect();
        SubsetSearch::new(&items, self.config().reduct_search_limit)
            .including_empty()
            .minimal(|candidate| Ok(strategy.characterize(self, candidate)? == full))
    }

    fn check_search_limit(&self, relations: &RelationGroup) -> RoughResult<()> {
        match self.config().reduct_search_limit {
            Some(limit) if relations.len() > limit => Err(RoughError::SearchLimitExceeded {
                size: relations.len(),
                limit,
            }),
            _ => Ok(()),
        }
    }

    // -----------------------------------------------------------------------
    // Families of single-block relations
    // -----------------------------------------------------------------------

    /// Intersection of the designated blocks of `relations`.
    pub fn family_intersection<I, S>(&self, relations: I) -> RoughResult<Category<T>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let relations = group(relations);
        if relations.is_empty() {
            return Err(RoughError::invalid_argument(
                "family intersection needs at least one relation",
            ));
        }
        self.family_meet(&relations)
    }

    /// Union of the designated blocks of `relations`.
    pub fn family_union<I, S>(&self, relations: I) -> RoughResult<Category<T>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let relations = group(relations);
        if relations.is_empty() {
            return Err(RoughError::invalid_argument(
                "family union needs at least one relation",
            ));
        }
        self.family_join(&relations)
    }

    /// Intersection of designated blocks; the empty group yields `U`.
    pub(crate) fn family_meet(&self, relations: &RelationGroup) -> RoughResult<Category<T>> {
        let mut meet: Option<Category<T>> = None;
        for name in relations {
            let block = self.relation(name)?.designated_block()?;
            meet = Some(match meet {
                None => block.clone(),
                Some(acc) => acc.intersection(block).cloned().collect(),
            });
        }
        Ok(meet.unwrap_or_else(|| self.universe()))
    }

    /// Union of designated blocks; the empty group yields `∅`.
    pub(crate) fn family_join(&self, relations: &RelationGroup) -> RoughResult<Category<T>> {
        let mut join = Category::new();
        for name in relations {
            join.extend(self.relation(name)?.designated_block()?.iter().cloned());
        }
        Ok(join)
    }

    /// Whether `relation` is `y`-dispensable in `relations`: the family
    /// intersection without it still lies inside the block of `y`.
    pub fn y_dispensable<I, S>(&self, relations: I, y: &str, relation: &str) -> RoughResult<bool>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.y_dispensable_with(relations, y, relation, &strategy::FamilyIntersection)
    }

    /// [`y_dispensable`](Self::y_dispensable) under a custom set-valued
    /// characterization.
    pub fn y_dispensable_with<I, S, C>(
        &self,
        relations: I,
        y: &str,
        relation: &str,
        strategy: &C,
    ) -> RoughResult<bool>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        C: Characterization<T, Value = Category<T>>,
    {
        let relations = group(relations);
        require_member(&relations, relation)?;
        self.ensure_defined(&relations)?;
        let target = self.relation(y)?.designated_block()?;
        self.is_y_dispensable(&relations, target, relation, strategy)
    }

    fn is_y_dispensable<C>(
        &self,
        relations: &RelationGroup,
        target: &Category<T>,
        relation: &str,
        strategy: &C,
    ) -> RoughResult<bool>
    where
        C: Characterization<T, Value = Category<T>>,
    {
        let reduced = strategy.characterize(self, &without(relations, relation))?;
        Ok(reduced.is_subset(target))
    }

    /// Whether no member of `relations` is `y`-dispensable.
    pub fn y_independent<I, S>(&self, relations: I, y: &str) -> RoughResult<bool>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let relations = group(relations);
        self.ensure_defined(&relations)?;
        let target = self.relation(y)?.designated_block()?;
        for name in &relations {
            if self.is_y_dispensable(&relations, target, name, &strategy::FamilyIntersection)? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}
