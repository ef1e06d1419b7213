//! Characterization strategies for dispensability and reduct search.
//!
//! A characterization maps a relation group to a comparable value. An
//! attribute is dispensable when removing it leaves that value unchanged,
//! and a reduct is a minimal subgroup with the same value as the whole.

use std::marker::PhantomData;

use crate::error::RoughResult;
use crate::granule::Element;
use crate::knowledge::KnowledgeBase;
use crate::relation::{Category, Partition, RelationGroup, group};

/// Maps a relation group to the value that reduction must preserve.
///
/// Implementations must accept the empty group: reduct and core search probe
/// `R − {r}`, which is empty when `R` has a single member.
pub trait Characterization<T: Element> {
    /// The preserved value.
    type Value: PartialEq;

    /// Characterize `relations` in `kb`.
    fn characterize(
        &self,
        kb: &KnowledgeBase<T>,
        relations: &RelationGroup,
    ) -> RoughResult<Self::Value>;
}

/// `U / IND(R)`. The empty group yields the single class `U`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Indiscernibility;

impl<T: Element> Characterization<T> for Indiscernibility {
    type Value = Partition<T>;

    fn characterize(
        &self,
        kb: &KnowledgeBase<T>,
        relations: &RelationGroup,
    ) -> RoughResult<Partition<T>> {
        kb.coarsest_classes(relations)
    }
}

/// `POS_R(D)` for a fixed decision group `D`.
#[derive(Debug, Clone, Default)]
pub struct RelativePositiveRegion {
    relative_to: RelationGroup,
}

impl RelativePositiveRegion {
    /// Positive region relative to `relative_to`.
    pub fn new<I, S>(relative_to: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            relative_to: group(relative_to),
        }
    }

    /// The decision group.
    pub fn relative_to(&self) -> &RelationGroup {
        &self.relative_to
    }
}

impl<T: Element> Characterization<T> for RelativePositiveRegion {
    type Value = Category<T>;

    fn characterize(
        &self,
        kb: &KnowledgeBase<T>,
        relations: &RelationGroup,
    ) -> RoughResult<Category<T>> {
        kb.relative_positive_region(relations, &self.relative_to)
    }
}

/// Intersection of the designated blocks. The empty group yields `U`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FamilyIntersection;

impl<T: Element> Characterization<T> for FamilyIntersection {
    type Value = Category<T>;

    fn characterize(
        &self,
        kb: &KnowledgeBase<T>,
        relations: &RelationGroup,
    ) -> RoughResult<Category<T>> {
        if relations.is_empty() {
            return Ok(kb.universe());
        }
        kb.family_meet(relations)
    }
}

/// Union of the designated blocks. The empty group yields `∅`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FamilyUnion;

impl<T: Element> Characterization<T> for FamilyUnion {
    type Value = Category<T>;

    fn characterize(
        &self,
        kb: &KnowledgeBase<T>,
        relations: &RelationGroup,
    ) -> RoughResult<Category<T>> {
        kb.family_join(relations)
    }
}

/// A characterization backed by a closure. Build one with [`from_fn`].
pub struct FromFn<F, V> {
    f: F,
    _value: PhantomData<fn() -> V>,
}

/// Wrap a closure as a [`Characterization`].
///
/// ```
/// use rough_medu::knowledge::KnowledgeBase;
/// use rough_medu::reduct::strategy::from_fn;
///
/// let mut kb = KnowledgeBase::new();
/// kb.set_granules(1..=4, "element").unwrap();
/// kb.add_parent_relation("a", [vec![1, 2], vec![3, 4]]).unwrap();
/// kb.add_parent_relation("b", [vec![1, 2, 3, 4]]).unwrap();
///
/// // Preserve only the number of equivalence classes.
/// let class_count = from_fn(|kb: &KnowledgeBase<i32>, relations| {
///     Ok(kb.indiscernibility(relations)?.len())
/// });
/// let core = kb.find_core_with(["a", "b"], &class_count).unwrap();
/// assert_eq!(core.len(), 1);
/// ```
pub fn from_fn<T, V, F>(f: F) -> FromFn<F, V>
where
    T: Element,
    V: PartialEq,
    F: Fn(&KnowledgeBase<T>, &RelationGroup) -> RoughResult<V>,
{
    FromFn {
        f,
        _value: PhantomData,
    }
}

impl<T, V, F> Characterization<T> for FromFn<F, V>
where
    T: Element,
    V: PartialEq,
    F: Fn(&KnowledgeBase<T>, &RelationGroup) -> RoughResult<V>,
{
    type Value = V;

    fn characterize(&self, kb: &KnowledgeBase<T>, relations: &RelationGroup) -> RoughResult<V> {
        (self.f)(kb, relations)
    }
}
