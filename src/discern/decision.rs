//! Decision tables: condition attributes `C` against decision attributes `D`.
//!
//! A decision table is consistent when `D` depends totally on `C`. The
//! operations here split the universe by consistency, drop redundant
//! condition attributes, and compute per-element decision rules (local cores
//! and local reducts).

use std::collections::{BTreeMap, BTreeSet};

use crate::error::{RoughError, RoughResult};
use crate::granule::Element;
use crate::knowledge::KnowledgeBase;
use crate::reduct::search::SubsetSearch;
use crate::relation::{Category, RelationGroup, group};

/// Element → attributes required by every decision rule for it.
pub type LocalCores<T> = BTreeMap<T, RelationGroup>;

/// Element → minimal attribute sets that still determine its decision.
pub type LocalReducts<T> = BTreeMap<T, BTreeSet<RelationGroup>>;

impl<T: Element> KnowledgeBase<T> {
    /// Split the universe into `(consistent, inconsistent)` elements, where
    /// the consistent ones form `POS_C(D)`.
    pub fn decompose_decision_table<C, D, S1, S2>(
        &self,
        conditions: C,
        decisions: D,
    ) -> RoughResult<(Category<T>, Category<T>)>
    where
        C: IntoIterator<Item = S1>,
        D: IntoIterator<Item = S2>,
        S1: AsRef<str>,
        S2: AsRef<str>,
    {
        let conditions = group(conditions);
        self.ensure_nonempty(&conditions, "a decision table")?;
        let consistent = self.relative_positive_region(&conditions, &group(decisions))?;
        let inconsistent = self.universe().difference(&consistent).cloned().collect();
        Ok((consistent, inconsistent))
    }

    /// Whether the decision attributes depend totally on the conditions.
    pub fn is_consistent<C, D, S1, S2>(&self, conditions: C, decisions: D) -> RoughResult<bool>
    where
        C: IntoIterator<Item = S1>,
        D: IntoIterator<Item = S2>,
        S1: AsRef<str>,
        S2: AsRef<str>,
    {
        self.depends_on(conditions, decisions)
    }

    /// The first relative reduct of `conditions` with respect to `decisions`,
    /// in lexicographic order.
    pub fn remove_redundant_attributes<C, D, S1, S2>(
        &self,
        conditions: C,
        decisions: D,
    ) -> RoughResult<RelationGroup>
    where
        C: IntoIterator<Item = S1>,
        D: IntoIterator<Item = S2>,
        S1: AsRef<str>,
        S2: AsRef<str>,
    {
        let conditions = group(conditions);
        let decisions = group(decisions);
        if conditions.is_empty() {
            return Err(RoughError::invalid_argument(
                "a decision table needs at least one condition attribute",
            ));
        }
        self.find_reducts(&conditions, Some(&decisions))?
            .into_iter()
            .next()
            .ok_or_else(|| RoughError::invalid_argument("no reduct preserves the decision"))
    }

    /// Per-element decision rules over the reduced condition attributes.
    ///
    /// For each element `x`, every element with a different decision class
    /// contributes the clause of attributes discerning it from `x`. The local
    /// core of `x` is the set of attributes appearing as singleton clauses;
    /// elements with an empty local core are not listed. The local reducts
    /// of `x` are the minimal attribute sets meeting every clause.
    pub fn simplify_decision_table<C, D, S1, S2>(
        &self,
        conditions: C,
        decisions: D,
    ) -> RoughResult<(LocalCores<T>, LocalReducts<T>)>
    where
        C: IntoIterator<Item = S1>,
        D: IntoIterator<Item = S2>,
        S1: AsRef<str>,
        S2: AsRef<str>,
    {
        let decisions = group(decisions);
        let reduced = self.remove_redundant_attributes(conditions, &decisions)?;
        let attributes: Vec<String> = reduced.iter().cloned().collect();

        let mut cores = LocalCores::new();
        let mut reducts = LocalReducts::new();
        for x in self.elements() {
            let clauses: BTreeSet<RelationGroup> = self
                .elements()
                .filter(|y| !self.same_class(&decisions, x, y))
                .map(|y| self.discerning(&reduced, x, y))
                .filter(|clause| !clause.is_empty())
                .collect();

            let core: RelationGroup = clauses
                .iter()
                .filter(|clause| clause.len() == 1)
                .flatten()
                .cloned()
                .collect();
            if !core.is_empty() {
                cores.insert(x.clone(), core);
            }

            let hitting = SubsetSearch::new(&attributes, None)
                .including_empty()
                .minimal(|candidate| {
                    Ok(clauses.iter().all(|clause| !clause.is_disjoint(candidate)))
                })?;
            reducts.insert(x.clone(), hitting.into_iter().collect());
        }

        tracing::debug!(
            attributes = attributes.len(),
            cores = cores.len(),
            "decision table simplified"
        );
        Ok((cores, reducts))
    }
}
