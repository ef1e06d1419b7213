//! Approximation engine: indiscernibility and set approximations.
//!
//! Given a relation group `R`, the indiscernibility partition `U / IND(R)`
//! is the common refinement of the group's block families. A target category
//! `X` is then approximated from below (classes inside `X`) and from above
//! (classes touching `X`); the gap between the two is the boundary region.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{RoughError, RoughResult};
use crate::granule::Element;
use crate::knowledge::KnowledgeBase;
use crate::relation::{Category, Partition, RelationGroup, group};

/// Definability of a category with respect to a relation group.
///
/// Mutually exclusive and exhaustive, decided from the lower (L) and upper
/// (U) approximations against the universe (Ω).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Definability {
    /// L == U: the boundary is empty.
    Definable,
    /// L ≠ ∅, U ≠ Ω, L ≠ U.
    RoughlyDefinable,
    /// L == ∅, U ≠ Ω.
    InternallyUndefinable,
    /// L ≠ ∅, U == Ω, L ≠ U.
    ExternallyUndefinable,
    /// L == ∅, U == Ω.
    TotallyUndefinable,
}

impl fmt::Display for Definability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Definability::Definable => "Definable",
            Definability::RoughlyDefinable => "RoughlyDefinable",
            Definability::InternallyUndefinable => "InternallyUndefinable",
            Definability::ExternallyUndefinable => "ExternallyUndefinable",
            Definability::TotallyUndefinable => "TotallyUndefinable",
        };
        f.write_str(name)
    }
}

/// Which approximations a rough comparison looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RoughMode {
    /// Compare lower approximations.
    Bottom,
    /// Compare upper approximations.
    Top,
    /// Both the bottom and the top condition must hold.
    #[default]
    Both,
}

impl FromStr for RoughMode {
    type Err = RoughError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bottom" => Ok(RoughMode::Bottom),
            "top" => Ok(RoughMode::Top),
            "" | "both" => Ok(RoughMode::Both),
            other => Err(RoughError::InvalidMode {
                mode: other.to_string(),
            }),
        }
    }
}

/// All approximations of one category, computed from a single partition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Approximation<T: Ord> {
    /// Union of classes fully inside the category.
    pub lower: Category<T>,
    /// Union of classes intersecting the category.
    pub upper: Category<T>,
    /// `upper − lower`.
    pub boundary: Category<T>,
    /// `universe − upper`.
    pub negative: Category<T>,
    /// `|lower| / |upper|`, or `None` when no class touches the category.
    pub accuracy: Option<f64>,
    /// Classification of the category.
    pub definability: Definability,
}

fn lower_from<T: Element>(classes: &Partition<T>, category: &Category<T>) -> Category<T> {
    classes
        .iter()
        .filter(|class| class.is_subset(category))
        .flatten()
        .cloned()
        .collect()
}

fn upper_from<T: Element>(classes: &Partition<T>, category: &Category<T>) -> Category<T> {
    classes
        .iter()
        .filter(|class| !class.is_disjoint(category))
        .flatten()
        .cloned()
        .collect()
}

fn require_category<T>(category: &Category<T>) -> RoughResult<()> {
    if category.is_empty() {
        return Err(RoughError::invalid_argument(
            "the category must contain at least one element",
        ));
    }
    Ok(())
}

impl<T: Element> KnowledgeBase<T> {
    /// Equivalence classes `U / IND(relations)`.
    ///
    /// For a single relation this is its block family; for several it is
    /// every non-empty intersection of one block per relation.
    pub fn indiscernibility<I, S>(&self, relations: I) -> RoughResult<Partition<T>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.classes(&group(relations))
    }

    pub(crate) fn classes(&self, names: &RelationGroup) -> RoughResult<Partition<T>> {
        self.ensure_defined(names)?;
        let mut names = names.iter();
        let Some(first) = names.next() else {
            return Err(RoughError::invalid_argument(
                "indiscernibility needs at least one relation",
            ));
        };

        let mut classes: Vec<Category<T>> = self.relation(first)?.blocks().to_vec();
        for name in names {
            let blocks = self.relation(name)?.blocks();
            classes = classes
                .iter()
                .flat_map(|class| {
                    blocks
                        .iter()
                        .map(move |block| class.intersection(block).cloned().collect::<Category<T>>())
                })
                .filter(|class| !class.is_empty())
                .collect();
        }
        Ok(classes.into_iter().collect())
    }

    /// Like [`classes`](Self::classes), but the empty group discerns nothing
    /// and yields the single class `U`.
    pub(crate) fn coarsest_classes(&self, names: &RelationGroup) -> RoughResult<Partition<T>> {
        if names.is_empty() {
            return Ok(Partition::from([self.universe()]));
        }
        self.classes(names)
    }

    /// Lower approximation: union of classes contained in `categories`.
    pub fn lower_approximation<I, S>(
        &self,
        relations: I,
        categories: &Category<T>,
    ) -> RoughResult<Category<T>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        require_category(categories)?;
        let classes = self.indiscernibility(relations)?;
        Ok(lower_from(&classes, categories))
    }

    /// Alias of [`lower_approximation`](Self::lower_approximation).
    pub fn positive_region<I, S>(
        &self,
        relations: I,
        categories: &Category<T>,
    ) -> RoughResult<Category<T>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.lower_approximation(relations, categories)
    }

    /// Upper approximation: union of classes intersecting `categories`.
    pub fn upper_approximation<I, S>(
        &self,
        relations: I,
        categories: &Category<T>,
    ) -> RoughResult<Category<T>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        require_category(categories)?;
        let classes = self.indiscernibility(relations)?;
        Ok(upper_from(&classes, categories))
    }

    /// Boundary region: upper minus lower approximation.
    pub fn boundary_region<I, S>(
        &self,
        relations: I,
        categories: &Category<T>,
    ) -> RoughResult<Category<T>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let approximation = self.approximate(relations, categories)?;
        Ok(approximation.boundary)
    }

    /// Negative region: universe minus upper approximation.
    pub fn negative_region<I, S>(
        &self,
        relations: I,
        categories: &Category<T>,
    ) -> RoughResult<Category<T>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let upper = self.upper_approximation(relations, categories)?;
        Ok(self.universe().difference(&upper).cloned().collect())
    }

    /// Accuracy of approximation: `|lower| / |upper|`.
    pub fn accuracy<I, S>(&self, relations: I, category: &Category<T>) -> RoughResult<f64>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.approximate(relations, category)?
            .accuracy
            .ok_or_else(|| {
                RoughError::invalid_argument("the category is not covered by the relation group")
            })
    }

    /// Roughness: `1 − accuracy`.
    pub fn roughness<I, S>(&self, relations: I, category: &Category<T>) -> RoughResult<f64>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(1.0 - self.accuracy(relations, category)?)
    }

    /// Classify `category` into one of the five definability kinds.
    pub fn definable<I, S>(&self, relations: I, category: &Category<T>) -> RoughResult<Definability>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(self.approximate(relations, category)?.definability)
    }

    /// Every approximation of `category` from one indiscernibility pass.
    pub fn approximate<I, S>(
        &self,
        relations: I,
        category: &Category<T>,
    ) -> RoughResult<Approximation<T>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        require_category(category)?;
        let classes = self.indiscernibility(relations)?;
        let lower = lower_from(&classes, category);
        let upper = upper_from(&classes, category);

        let universe = self.universe();
        let whole = upper == universe;
        let definability = if lower == upper {
            Definability::Definable
        } else {
            match (lower.is_empty(), whole) {
                (false, false) => Definability::RoughlyDefinable,
                (true, false) => Definability::InternallyUndefinable,
                (false, true) => Definability::ExternallyUndefinable,
                (true, true) => Definability::TotallyUndefinable,
            }
        };

        Ok(Approximation {
            accuracy: (!upper.is_empty()).then(|| lower.len() as f64 / upper.len() as f64),
            boundary: upper.difference(&lower).cloned().collect(),
            negative: universe.difference(&upper).cloned().collect(),
            lower,
            upper,
            definability,
        })
    }

    /// Rough equality of `x` and `y` under `mode`.
    pub fn roughly_equal<I, S>(
        &self,
        relations: I,
        x: &Category<T>,
        y: &Category<T>,
        mode: RoughMode,
    ) -> RoughResult<bool>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let relations = group(relations);
        let ax = self.approximate(&relations, x)?;
        let ay = self.approximate(&relations, y)?;
        let bottom = ax.lower == ay.lower;
        let top = ax.upper == ay.upper;
        Ok(match mode {
            RoughMode::Bottom => bottom,
            RoughMode::Top => top,
            RoughMode::Both => bottom && top,
        })
    }

    /// Rough inclusion of `x` in `y` under `mode`.
    pub fn roughly_included<I, S>(
        &self,
        relations: I,
        x: &Category<T>,
        y: &Category<T>,
        mode: RoughMode,
    ) -> RoughResult<bool>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let relations = group(relations);
        let ax = self.approximate(&relations, x)?;
        let ay = self.approximate(&relations, y)?;
        let bottom = ax.lower.is_subset(&ay.lower);
        let top = ax.upper.is_subset(&ay.upper);
        Ok(match mode {
            RoughMode::Bottom => bottom,
            RoughMode::Top => top,
            RoughMode::Both => bottom && top,
        })
    }
}
