// thiserror's #[error("...{field}...")] format strings reference struct fields,
// but the compiler doesn't see through the derive macro and reports false positives.
#![allow(unused_assignments)]

//! # rough-medu
//!
//! A rough set analysis engine: partition relations over a finite universe,
//! approximations of target categories, dependency between attribute groups,
//! reducts and cores, and decision-table simplification.
//!
//! ## Architecture
//!
//! - **Store** (`granule`, `relation`): the universe and named partition
//!   relations, with a per-element membership index
//! - **Knowledge base** (`knowledge`): the session facade owning both stores
//! - **Approximation** (`approx`): indiscernibility, lower/upper
//!   approximations, accuracy and definability
//! - **Dependency** (`dependency`): total and partial dependency, relative
//!   positive regions and attribute significance
//! - **Reducts** (`reduct`): dispensability, cores and reducts under a
//!   pluggable characterization
//! - **Discernibility** (`discern`): discernibility matrices and decision
//!   tables
//!
//! ## Library usage
//!
//! ```
//! use std::collections::BTreeSet;
//! use rough_medu::knowledge::KnowledgeBase;
//! use rough_medu::approx::Definability;
//!
//! let mut kb = KnowledgeBase::new();
//! kb.set_granules(1..=6, "patient").unwrap();
//! kb.add_parent_relation("headache", [vec![1, 2, 3], vec![4, 5, 6]]).unwrap();
//! kb.add_parent_relation("temperature", [vec![1, 4], vec![2, 5], vec![3, 6]]).unwrap();
//!
//! let flu = BTreeSet::from([1, 2, 4]);
//! let summary = kb.approximate(["headache", "temperature"], &flu).unwrap();
//! assert_eq!(summary.definability, Definability::Definable);
//!
//! let reducts = kb.find_reducts(["headache", "temperature"], None).unwrap();
//! assert_eq!(reducts.len(), 1);
//! ```

pub mod approx;
pub mod config;
pub mod dependency;
pub mod discern;
pub mod error;
pub mod granule;
pub mod knowledge;
pub mod reduct;
pub mod relation;
