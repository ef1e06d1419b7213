//! Dependency between relation groups.
//!
//! `Q` depends on `P` (written `P ⇒ Q`) when the partition of `P` is already
//! as fine as the partition of `P ∪ Q`. The partial degree
//! `γ(P, Q) = |POS_P(Q)| / |U|` measures how much of the universe `P` can
//! classify into `Q`-classes.

use crate::error::RoughResult;
use crate::granule::Element;
use crate::knowledge::KnowledgeBase;
use crate::reduct::require_member;
use crate::relation::{Category, RelationGroup, group};

impl<T: Element> KnowledgeBase<T> {
    /// Whether `q` depends totally on `p`: `IND(p ∪ q) == IND(p)`.
    pub fn depends_on<P, Q, S1, S2>(&self, p: P, q: Q) -> RoughResult<bool>
    where
        P: IntoIterator<Item = S1>,
        Q: IntoIterator<Item = S2>,
        S1: AsRef<str>,
        S2: AsRef<str>,
    {
        let p = group(p);
        let joint: RelationGroup = p.union(&group(q)).cloned().collect();
        Ok(self.classes(&joint)? == self.classes(&p)?)
    }

    /// `POS_p(q)`: elements classifiable into `IND(q)` classes using `p` alone.
    pub fn find_relative_positive_region<P, Q, S1, S2>(
        &self,
        p: P,
        q: Q,
    ) -> RoughResult<Category<T>>
    where
        P: IntoIterator<Item = S1>,
        Q: IntoIterator<Item = S2>,
        S1: AsRef<str>,
        S2: AsRef<str>,
    {
        let p = group(p);
        self.ensure_nonempty(&p, "a positive region")?;
        self.relative_positive_region(&p, &group(q))
    }

    pub(crate) fn relative_positive_region(
        &self,
        p: &RelationGroup,
        q: &RelationGroup,
    ) -> RoughResult<Category<T>> {
        let knowledge = self.coarsest_classes(p)?;
        let targets = self.classes(q)?;
        Ok(knowledge
            .iter()
            .filter(|class| targets.iter().any(|target| class.is_subset(target)))
            .flatten()
            .cloned()
            .collect())
    }

    /// Degree of dependency `γ(p, q) = |POS_p(q)| / |U|`, in `[0, 1]`.
    pub fn partial_depends_on<P, Q, S1, S2>(&self, p: P, q: Q) -> RoughResult<f64>
    where
        P: IntoIterator<Item = S1>,
        Q: IntoIterator<Item = S2>,
        S1: AsRef<str>,
        S2: AsRef<str>,
    {
        let p = group(p);
        self.ensure_nonempty(&p, "a dependency degree")?;
        self.dependency_degree(&p, &group(q))
    }

    pub(crate) fn dependency_degree(
        &self,
        p: &RelationGroup,
        q: &RelationGroup,
    ) -> RoughResult<f64> {
        let positive = self.relative_positive_region(p, q)?;
        Ok(positive.len() as f64 / self.universe_len() as f64)
    }

    /// Whether `q` depends on `p` only partially (degree below 1).
    pub fn independent_of<P, Q, S1, S2>(&self, p: P, q: Q) -> RoughResult<bool>
    where
        P: IntoIterator<Item = S1>,
        Q: IntoIterator<Item = S2>,
        S1: AsRef<str>,
        S2: AsRef<str>,
    {
        Ok(self.partial_depends_on(p, q)? < 1.0)
    }

    /// Significance of `attribute` in `c` with respect to `d`: the drop in
    /// `γ(c, d)` when the attribute is removed.
    pub fn significance<C, D, S1, S2>(&self, c: C, d: D, attribute: &str) -> RoughResult<f64>
    where
        C: IntoIterator<Item = S1>,
        D: IntoIterator<Item = S2>,
        S1: AsRef<str>,
        S2: AsRef<str>,
    {
        let c = group(c);
        let d = group(d);
        self.ensure_defined(&group([attribute]))?;
        require_member(&c, attribute)?;
        let full = self.dependency_degree(&c, &d)?;
        let reduced: RelationGroup = c.iter().filter(|n| *n != attribute).cloned().collect();
        Ok(full - self.dependency_degree(&reduced, &d)?)
    }
}
