//! End-to-end tests for the rough-medu knowledge base.
//!
//! These tests build small knowledge bases by hand and check approximation,
//! dependency and reduct results against worked examples.

use std::collections::BTreeSet;

use rough_medu::approx::{Definability, RoughMode};
use rough_medu::config::AnalysisConfig;
use rough_medu::error::RoughError;
use rough_medu::knowledge::KnowledgeBase;
use rough_medu::reduct::strategy::{FamilyIntersection, from_fn};
use rough_medu::relation::{Category, RelationGroup, group};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn set(items: &[u32]) -> Category<u32> {
    items.iter().copied().collect()
}

fn xs(items: &[u32]) -> Category<String> {
    items.iter().map(|i| format!("x{i}")).collect()
}

/// Universe 1..8 with five three-block attributes `a` to `e`.
fn five_attributes() -> KnowledgeBase<u32> {
    let mut kb = KnowledgeBase::new();
    kb.set_granules(1..=8, "element").unwrap();
    kb.add_parent_relation("a", [vec![2, 8], vec![1, 4, 5], vec![3, 6, 7]])
        .unwrap();
    kb.add_parent_relation("b", [vec![1, 3, 5], vec![2, 4, 7, 8], vec![6]])
        .unwrap();
    kb.add_parent_relation("c", [vec![3, 4, 6], vec![2, 7, 8], vec![1, 5]])
        .unwrap();
    kb.add_parent_relation("d", [vec![5, 8], vec![2, 3, 6, 7], vec![1, 4]])
        .unwrap();
    kb.add_parent_relation("e", [vec![1], vec![3, 5, 6, 8], vec![2, 4, 7]])
        .unwrap();
    kb
}

/// Universe x0..x10 with a single five-block relation `R`.
fn definable_example() -> KnowledgeBase<String> {
    let mut kb = KnowledgeBase::new();
    kb.set_granules((0..=10).map(|i| format!("x{i}")), "element")
        .unwrap();
    kb.add_parent_relation(
        "R",
        [
            xs(&[0, 1]),
            xs(&[2, 6, 9]),
            xs(&[3, 5]),
            xs(&[4, 8]),
            xs(&[7, 10]),
        ],
    )
    .unwrap();
    kb
}

// ---------------------------------------------------------------------------
// Indiscernibility and approximations
// ---------------------------------------------------------------------------

#[test]
fn indiscernibility_of_attribute_pairs() {
    init_tracing();
    let kb = five_attributes();
    assert_eq!(
        kb.indiscernibility(["c", "d"]).unwrap(),
        BTreeSet::from([
            set(&[3, 6]),
            set(&[8]),
            set(&[1]),
            set(&[5]),
            set(&[2, 7]),
            set(&[4]),
        ])
    );
    assert_eq!(
        kb.indiscernibility(["d", "e"]).unwrap(),
        BTreeSet::from([set(&[1]), set(&[2, 7]), set(&[3, 6]), set(&[4]), set(&[5, 8])])
    );
    let coarse = kb.indiscernibility(["a", "b", "c"]).unwrap();
    assert_eq!(coarse.iter().filter(|class| class.len() > 1).count(), 2);
}

#[test]
fn partition_covers_only_covered_elements() {
    init_tracing();
    let mut kb = KnowledgeBase::new();
    kb.set_granules((1..=9).map(|i| format!("x{i}")), "element")
        .unwrap();
    kb.add_parent_relation("P", [xs(&[1, 4, 5]), xs(&[2, 8]), xs(&[3]), xs(&[6, 7])])
        .unwrap();
    kb.add_parent_relation("Q", [xs(&[1, 3, 5]), xs(&[6]), xs(&[2, 4, 7, 8])])
        .unwrap();
    let classes = kb.indiscernibility(["P", "Q"]).unwrap();
    let covered: Category<String> = classes.into_iter().flatten().collect();
    assert_eq!(covered, xs(&[1, 2, 3, 4, 5, 6, 7, 8]));
    assert!(kb.lookup(&"x9".to_string()).is_empty());
}

#[test]
fn definability_of_categories() {
    init_tracing();
    let kb = definable_example();
    let cases = [
        (xs(&[0, 1, 4, 8]), Definability::Definable),
        (xs(&[3, 4, 5, 8]), Definability::Definable),
        (xs(&[0, 3, 4, 5, 8, 10]), Definability::RoughlyDefinable),
        (xs(&[1, 7, 8, 10]), Definability::RoughlyDefinable),
        (xs(&[0, 1, 2, 3, 4, 7]), Definability::ExternallyUndefinable),
        (xs(&[0, 2, 3, 4, 7]), Definability::TotallyUndefinable),
        (xs(&[0, 2, 3]), Definability::InternallyUndefinable),
    ];
    for (category, expected) in cases {
        assert_eq!(kb.definable(["R"], &category).unwrap(), expected, "{category:?}");
    }
}

#[test]
fn roughly_definable_regions_and_accuracy() {
    init_tracing();
    let kb = definable_example();
    let x = xs(&[0, 3, 4, 5, 8, 10]);
    assert_eq!(kb.lower_approximation(["R"], &x).unwrap(), xs(&[3, 4, 5, 8]));
    assert_eq!(
        kb.upper_approximation(["R"], &x).unwrap(),
        xs(&[0, 1, 3, 4, 5, 7, 8, 10])
    );
    assert_eq!(kb.boundary_region(["R"], &x).unwrap(), xs(&[0, 1, 7, 10]));
    assert_eq!(kb.accuracy(["R"], &x).unwrap(), 1.0 / 2.0);
    assert_eq!(kb.accuracy(["R"], &xs(&[1, 7, 8, 10])).unwrap(), 1.0 / 3.0);
    assert_eq!(kb.accuracy(["R"], &xs(&[2, 3, 4, 8])).unwrap(), 2.0 / 7.0);
    assert_eq!(kb.accuracy(["R"], &xs(&[0, 1, 2, 3, 4, 7])).unwrap(), 2.0 / 11.0);
    assert_eq!(
        kb.accuracy(["R"], &xs(&[0, 2, 3, 4, 6, 7, 9])).unwrap(),
        3.0 / 11.0
    );
}

#[test]
fn approximation_laws_hold() {
    init_tracing();
    let kb = five_attributes();
    let relations = ["a", "c"];
    let x = set(&[1, 2, 4, 5]);
    let y = set(&[3, 4, 7, 8]);
    let union: Category<u32> = x.union(&y).copied().collect();
    let meet: Category<u32> = x.intersection(&y).copied().collect();

    for category in [&x, &y, &union] {
        let lower = kb.lower_approximation(relations, category).unwrap();
        let upper = kb.upper_approximation(relations, category).unwrap();
        assert!(lower.is_subset(&upper));
        let accuracy = kb.accuracy(relations, category).unwrap();
        let roughness = kb.roughness(relations, category).unwrap();
        assert!((accuracy + roughness - 1.0).abs() < f64::EPSILON);
    }

    let lower_x = kb.lower_approximation(relations, &x).unwrap();
    let lower_y = kb.lower_approximation(relations, &y).unwrap();
    let lower_union = kb.lower_approximation(relations, &union).unwrap();
    assert!(lower_x.union(&lower_y).all(|e| lower_union.contains(e)));

    let upper_meet = kb.upper_approximation(relations, &meet).unwrap();
    let upper_x = kb.upper_approximation(relations, &x).unwrap();
    let upper_y = kb.upper_approximation(relations, &y).unwrap();
    assert!(upper_meet.iter().all(|e| upper_x.contains(e) && upper_y.contains(e)));
}

#[test]
fn rough_comparison_modes_parse_from_strings() {
    init_tracing();
    let kb = definable_example();
    let x = xs(&[0, 3]);
    let y = xs(&[1, 5]);
    let mode: RoughMode = "top".parse().unwrap();
    assert!(kb.roughly_equal(["R"], &x, &y, mode).unwrap());
    assert!(kb.roughly_equal(["R"], &x, &y, RoughMode::Bottom).unwrap());
    assert!(kb.roughly_included(["R"], &x, &y, RoughMode::Both).unwrap());
    assert!(!kb
        .roughly_equal(["R"], &x, &xs(&[0, 2]), RoughMode::Top)
        .unwrap());
    assert!(matches!(
        "sideways".parse::<RoughMode>().unwrap_err(),
        RoughError::InvalidMode { .. }
    ));
}

#[test]
fn approximation_summary_serializes() {
    init_tracing();
    let kb = definable_example();
    let summary = kb.approximate(["R"], &xs(&[2, 3, 4, 8])).unwrap();
    let json = serde_json::to_value(&summary).unwrap();
    assert_eq!(json["definability"], "RoughlyDefinable");
    assert_eq!(json["lower"], serde_json::json!(["x4", "x8"]));
    assert_eq!(json["negative"].as_array().unwrap().len(), 4);
}

// ---------------------------------------------------------------------------
// Dependency, reducts and core
// ---------------------------------------------------------------------------

#[test]
fn reducts_and_core_of_conditions() {
    init_tracing();
    let kb = five_attributes();
    let reducts = kb.find_reducts(["a", "b", "c"], None).unwrap();
    assert_eq!(reducts, BTreeSet::from([group(["a", "b"])]));
    assert_eq!(kb.find_core(["a", "b", "c"], None).unwrap(), group(["a", "b"]));
    assert!(kb.dispensable(["a", "b", "c"], "c", None).unwrap());
    assert!(kb.depends_on(["a", "b"], ["c"]).unwrap());

    // Every reduct preserves the partition and is minimal.
    let full = kb.indiscernibility(["a", "b", "c"]).unwrap();
    for reduct in &reducts {
        assert_eq!(kb.indiscernibility(reduct).unwrap(), full);
        assert!(kb.independent(reduct, None).unwrap());
    }
}

#[test]
fn core_is_intersection_of_reducts() {
    init_tracing();
    let kb = five_attributes();
    let all = ["a", "b", "c", "d", "e"];
    let reducts = kb.find_reducts(all, None).unwrap();
    let core = kb.find_core(all, None).unwrap();
    let mut reducts_iter = reducts.iter();
    let first = reducts_iter.next().unwrap().clone();
    let meet = reducts_iter.fold(first, |acc: RelationGroup, r| {
        acc.intersection(r).cloned().collect()
    });
    assert_eq!(core, meet);
    for name in all {
        assert_eq!(
            kb.dispensable(all, name, None).unwrap(),
            !core.contains(name)
        );
    }
}

#[test]
fn partial_dependency_on_decisions() {
    init_tracing();
    let kb = five_attributes();
    let c = ["a", "b", "c"];
    let d = ["d", "e"];
    assert_eq!(kb.find_relative_positive_region(c, d).unwrap(), set(&[3, 4, 6, 7]));
    assert_eq!(kb.partial_depends_on(c, d).unwrap(), 0.5);
    assert!(kb.independent_of(c, d).unwrap());
    assert!(!kb.depends_on(c, d).unwrap());
    assert_eq!(
        kb.find_relative_positive_region(["b", "c"], d).unwrap(),
        set(&[3, 4, 6])
    );
    assert_eq!(
        kb.find_relative_positive_region(["a", "c"], d).unwrap(),
        set(&[3, 4, 6, 7])
    );
    assert_eq!(kb.significance(c, d, "a").unwrap(), 0.125);
    assert_eq!(kb.significance(c, d, "b").unwrap(), 0.0);
    assert_eq!(kb.significance(c, d, "c").unwrap(), 0.0);
}

#[test]
fn total_dependency_matches_degree_one() {
    init_tracing();
    let kb = five_attributes();
    for (p, q) in [(["a", "b"], ["c", "c"]), (["c", "d"], ["d", "e"]), (["a", "e"], ["b", "d"])] {
        let total = kb.depends_on(p, q).unwrap();
        let degree = kb.partial_depends_on(p, q).unwrap();
        assert_eq!(total, degree == 1.0, "{p:?} => {q:?}");
    }
}

#[test]
fn relative_reducts_of_conditions() {
    init_tracing();
    let kb = five_attributes();
    let d = group(["d", "e"]);
    assert_eq!(kb.find_core(["a", "b", "c"], Some(&d)).unwrap(), group(["a"]));
    assert_eq!(
        kb.find_reducts(["a", "b", "c"], Some(&d)).unwrap(),
        BTreeSet::from([group(["a", "b"]), group(["a", "c"])])
    );
}

#[test]
fn family_intersection_reducts() {
    init_tracing();
    let mut kb = KnowledgeBase::new();
    kb.set_granules((1..=8).map(|i| format!("x{i}")), "element")
        .unwrap();
    kb.add_parent_relation("X", [xs(&[1, 3, 8])]).unwrap();
    kb.add_parent_relation("Y", [xs(&[1, 3, 4, 5, 6])]).unwrap();
    kb.add_parent_relation("Z", [xs(&[1, 3, 4, 6, 7])]).unwrap();

    let family = ["X", "Y", "Z"];
    assert_eq!(
        kb.find_reducts_with(family, &FamilyIntersection).unwrap(),
        BTreeSet::from([group(["X", "Y"]), group(["X", "Z"])])
    );
    assert_eq!(
        kb.find_core_with(family, &FamilyIntersection).unwrap(),
        group(["X"])
    );
    assert!(!kb.independent_with(family, &FamilyIntersection).unwrap());
}

#[test]
fn custom_characterization_by_closure() {
    init_tracing();
    let kb = five_attributes();
    // Preserve only which elements are singled out.
    let singletons = from_fn(|kb: &KnowledgeBase<u32>, relations: &RelationGroup| {
        if relations.is_empty() {
            return Ok(Category::new());
        }
        let classes = kb.indiscernibility(relations)?;
        Ok(classes
            .into_iter()
            .filter(|class| class.len() == 1)
            .flatten()
            .collect::<Category<u32>>())
    });
    let reducts = kb.find_reducts_with(["c", "d", "e"], &singletons).unwrap();
    assert!(!reducts.is_empty());
    for reduct in &reducts {
        assert_eq!(
            singletons_of(&kb, reduct),
            singletons_of(&kb, &group(["c", "d", "e"]))
        );
    }
}

fn singletons_of(kb: &KnowledgeBase<u32>, relations: &RelationGroup) -> Category<u32> {
    if relations.is_empty() {
        return Category::new();
    }
    kb.indiscernibility(relations)
        .unwrap()
        .into_iter()
        .filter(|class| class.len() == 1)
        .flatten()
        .collect()
}

// ---------------------------------------------------------------------------
// Errors and configuration
// ---------------------------------------------------------------------------

#[test]
fn unknown_relations_are_reported() {
    init_tracing();
    let kb = five_attributes();
    for result in [
        kb.find_reducts(["a", "z"], None).map(|_| ()),
        kb.find_core(["a", "z"], None).map(|_| ()),
        kb.depends_on(["a"], ["z"]).map(|_| ()),
        kb.indiscernibility(["z"]).map(|_| ()),
    ] {
        assert!(matches!(result, Err(RoughError::UnknownRelation { .. })));
    }
}

#[test]
fn malformed_relations_leave_store_unchanged() {
    init_tracing();
    let mut kb = five_attributes();
    let before = kb.relation_names();
    assert!(matches!(
        kb.add_parent_relation("f", [vec![1, 2], vec![2, 3]]).unwrap_err(),
        RoughError::MalformedRelation { .. }
    ));
    assert!(kb.add_parent_relation("g", [vec![1, 99]]).is_err());
    assert!(kb.add_parent_relation("a", [vec![1]]).is_err());
    assert_eq!(kb.relation_names(), before);
    assert_eq!(kb.lookup(&1).len(), 5);
}

#[test]
fn search_limit_from_config_file() {
    init_tracing();
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("analysis.toml");
    AnalysisConfig::default()
        .with_search_limit(2)
        .save(&path)
        .unwrap();

    let mut kb = KnowledgeBase::with_config(AnalysisConfig::load(&path).unwrap());
    kb.set_granules(1..=8, "element").unwrap();
    kb.add_parent_relation("a", [vec![2, 8], vec![1, 4, 5], vec![3, 6, 7]])
        .unwrap();
    kb.add_parent_relation("b", [vec![1, 3, 5], vec![2, 4, 7, 8], vec![6]])
        .unwrap();
    kb.add_parent_relation("c", [vec![3, 4, 6], vec![2, 7, 8], vec![1, 5]])
        .unwrap();

    assert!(matches!(
        kb.find_reducts(["a", "b", "c"], None).unwrap_err(),
        RoughError::SearchLimitExceeded { size: 3, limit: 2 }
    ));
    assert_eq!(kb.find_reducts(["a", "b"], None).unwrap().len(), 1);
}
