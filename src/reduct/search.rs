//! Size-ordered search for inclusion-minimal subsets.
//!
//! Subsets are enumerated level by level (size 1, 2, …, n). Each level is
//! materialized as an explicit frontier of index combinations. A candidate
//! that contains an already accepted subset is skipped without evaluation,
//! so every accepted candidate is minimal: all of its proper subsets were
//! either rejected or are themselves supersets of an accepted one.

use crate::error::{RoughError, RoughResult};
use crate::relation::RelationGroup;

/// All `k`-element index combinations of `0..n`, in lexicographic order.
pub(crate) fn combinations(n: usize, k: usize) -> Vec<Vec<usize>> {
    if k > n {
        return Vec::new();
    }
    let mut frontier = Vec::new();
    let mut current: Vec<usize> = (0..k).collect();
    loop {
        frontier.push(current.clone());
        // Rightmost position that can still advance.
        let Some(pos) = (0..k).rev().find(|&i| current[i] < n - k + i) else {
            break;
        };
        current[pos] += 1;
        for i in pos + 1..k {
            current[i] = current[i - 1] + 1;
        }
    }
    frontier
}

fn contains_all(candidate: &[usize], subset: &[usize]) -> bool {
    subset.iter().all(|i| candidate.binary_search(i).is_ok())
}

/// Search over the subsets of `items` for the minimal ones that `accept`.
#[derive(Debug, Clone)]
pub(crate) struct SubsetSearch<'a> {
    items: &'a [String],
    limit: Option<usize>,
    include_empty: bool,
}

impl<'a> SubsetSearch<'a> {
    pub(crate) fn new(items: &'a [String], limit: Option<usize>) -> Self {
        Self {
            items,
            limit,
            include_empty: false,
        }
    }

    /// Also evaluate the empty subset first.
    pub(crate) fn including_empty(mut self) -> Self {
        self.include_empty = true;
        self
    }

    fn names(&self, indices: &[usize]) -> RelationGroup {
        indices.iter().map(|&i| self.items[i].clone()).collect()
    }

    /// Every inclusion-minimal subset for which `accept` returns true,
    /// in size-then-lexicographic order.
    pub(crate) fn minimal<F>(&self, mut accept: F) -> RoughResult<Vec<RelationGroup>>
    where
        F: FnMut(&RelationGroup) -> RoughResult<bool>,
    {
        let n = self.items.len();
        if let Some(limit) = self.limit {
            if n > limit {
                return Err(RoughError::SearchLimitExceeded { size: n, limit });
            }
        }

        let mut accepted: Vec<Vec<usize>> = Vec::new();
        let mut evaluated = 0usize;
        let first_level = if self.include_empty { 0 } else { 1 };
        for size in first_level..=n {
            let frontier = combinations(n, size);
            for candidate in frontier {
                if accepted.iter().any(|found| contains_all(&candidate, found)) {
                    continue;
                }
                let names = self.names(&candidate);
                evaluated += 1;
                let ok = accept(&names)?;
                tracing::trace!(?names, ok, "subset candidate");
                if ok {
                    accepted.push(candidate);
                }
            }
            // The empty subset is contained in every candidate.
            if accepted.iter().any(|found| found.is_empty()) {
                break;
            }
        }

        tracing::debug!(items = n, evaluated, found = accepted.len(), "subset search complete");
        Ok(accepted.iter().map(|indices| self.names(indices)).collect())
    }
}
