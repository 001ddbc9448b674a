//! Closure sharing between structurally identical graphs.

use linkvars_analysis::{ClosureEngine, LinkLevel, LinkMap, Variable, WeightedGraph};
use linkvars_core::config::LinkvarsConfig;
use rayon::prelude::*;

fn var(name: &str) -> Variable {
    Variable::local(name)
}

/// `first` -1- `second`, `second` -4- `third`
fn chain(engine: &ClosureEngine, names: [&str; 3]) -> WeightedGraph {
    let [first, second, third] = names;
    let mut wg = engine.graph();
    wg.add_node(var(first), [(var(second), LinkLevel::Assigned)]).unwrap();
    wg.add_node(
        var(second),
        [(var(third), LinkLevel::common_hc(LinkMap::single(0, 0, false)).unwrap())],
    )
    .unwrap();
    wg
}

fn config(toml: &str) -> LinkvarsConfig {
    LinkvarsConfig::from_toml(toml).unwrap()
}

#[test]
fn test_identical_shapes_share_one_entry() {
    let engine = ClosureEngine::default();
    let sp1 = chain(&engine, ["a", "b", "c"]).shortest_path();
    let sp2 = chain(&engine, ["x", "y", "z"]).shortest_path();
    assert_eq!(sp1.signature(), sp2.signature());

    let cache = engine.cache().unwrap();
    assert_eq!(cache.misses(), 1);
    assert_eq!(cache.hits(), 1);
    assert_eq!(cache.entry_count(), 1);
    assert!((cache.hit_rate() - 0.5).abs() < f64::EPSILON);

    let row1 = sp1.links(&var("a"), None).unwrap();
    assert_eq!(sp2.savings(), 0);
    let row2 = sp2.links(&var("x"), None).unwrap();
    assert_eq!(sp2.savings(), 1);

    // Same levels, each graph's own variables.
    assert_eq!(row1.len(), row2.len());
    assert_eq!(row1.get(&var("c")), row2.get(&var("z")));
    assert!(row2.contains_key(&var("y")));
}

#[test]
fn test_floor_is_part_of_the_row_key() {
    let engine = ClosureEngine::default();
    let sp = chain(&engine, ["a", "b", "c"]).shortest_path();
    let all = sp.links(&var("a"), None).unwrap();
    let assigned = sp.links(&var("a"), Some(&LinkLevel::Assigned)).unwrap();
    assert_eq!(all.len(), 3);
    assert_eq!(assigned.len(), 2);
    assert_eq!(sp.savings(), 0);
}

#[test]
fn test_delay_causes_separate_entries() {
    let engine = ClosureEngine::default();
    let build = |cause: &str| {
        let mut wg = engine.graph();
        wg.add_node(var("a"), [(var("b"), LinkLevel::delayed(cause))]).unwrap();
        wg.shortest_path()
    };
    let p = build("p");
    let q = build("q");
    assert_eq!(p.signature(), q.signature());
    assert_ne!(p.signature_hash(), q.signature_hash());

    let cache = engine.cache().unwrap();
    assert_eq!(cache.misses(), 2);
    assert_eq!(cache.hits(), 0);

    let row = q.links(&var("a"), None).unwrap();
    let causes: Vec<&str> = row[&var("b")].delay_causes().unwrap().iter().collect();
    assert_eq!(causes, ["q"]);
}

#[test]
fn test_disabled_cache() {
    let engine = ClosureEngine::new(&config("[cache]\nenabled = false\n"));
    assert!(engine.cache().is_none());
    let sp1 = chain(&engine, ["a", "b", "c"]).shortest_path();
    let sp2 = chain(&engine, ["a", "b", "c"]).shortest_path();
    sp1.links(&var("a"), None).unwrap();
    sp2.links(&var("a"), None).unwrap();
    assert_eq!(sp2.savings(), 0);
    engine.report();
}

#[test]
fn test_standalone_graph_has_no_cache() {
    let mut wg = WeightedGraph::new();
    wg.add_node(var("a"), [(var("b"), LinkLevel::Assigned)]).unwrap();
    let sp = wg.shortest_path();
    sp.links(&var("a"), None).unwrap();
    sp.links(&var("a"), None).unwrap();
    assert_eq!(sp.savings(), 1);
}

#[test]
fn test_eager_closure_computes_every_row() {
    let engine = ClosureEngine::new(&config("[engine]\neager_closure = true\n"));
    let sp = chain(&engine, ["a", "b", "c"]).shortest_path();
    assert_eq!(sp.savings(), 0);
    for name in ["a", "b", "c"] {
        sp.links(&var(name), None).unwrap();
    }
    assert_eq!(sp.savings(), 3);
}

#[test]
fn test_concurrent_graphs_share_the_cache() {
    let engine = ClosureEngine::default();
    let rows: Vec<String> = (0..64)
        .into_par_iter()
        .map(|i| {
            let names = [format!("a{i}"), format!("b{i}"), format!("c{i}")];
            let sp = chain(&engine, [names[0].as_str(), names[1].as_str(), names[2].as_str()]).shortest_path();
            let row = sp.links(&var(&names[0]), None).unwrap();
            let mut labels: Vec<String> = row.values().map(ToString::to_string).collect();
            labels.sort();
            labels.join(" ")
        })
        .collect();

    assert!(rows.windows(2).all(|w| w[0] == w[1]));
    let cache = engine.cache().unwrap();
    assert_eq!(cache.hits() + cache.misses(), 64);
    assert_eq!(cache.entry_count(), 1);
}

#[test]
fn test_capacity_bounds_entry_count() {
    let engine = ClosureEngine::new(&config("[cache]\nmax_entries = 1\n"));
    for n in 1..6 {
        let mut wg = engine.graph();
        for i in 0..n {
            wg.add_node(var(&format!("v{i}")), [(var(&format!("v{}", i + 1)), LinkLevel::Assigned)])
                .unwrap();
        }
        wg.shortest_path();
    }
    let cache = engine.cache().unwrap();
    assert_eq!(cache.misses(), 5);
    assert!(cache.entry_count() <= 1);
}

#[test]
fn test_invalidated_shape_misses_again() {
    let engine = ClosureEngine::default();
    chain(&engine, ["a", "b", "c"]).shortest_path();
    let cache = engine.cache().unwrap();
    cache.invalidate_all();
    chain(&engine, ["a", "b", "c"]).shortest_path();
    assert_eq!(cache.misses(), 2);
    assert_eq!(cache.hits(), 0);
}

#[test]
fn test_frozen_modification_area_gets_its_own_entry() {
    let engine = ClosureEngine::default();
    let build = |a_r: LinkMap| {
        let mut wg = engine.graph();
        wg.add_node(var("a"), [(var("r"), LinkLevel::dependent(a_r))]).unwrap();
        wg.add_node(var("r"), [(var("b"), LinkLevel::dependent(LinkMap::single(1, 0, false)))])
            .unwrap();
        wg.shortest_path()
    };
    let open = build(LinkMap::single(0, 0, false));
    let frozen = build(LinkMap::single(0, 0, false).ensure_no_modification());

    // The abbreviated signature cannot tell them apart; the cache key can.
    assert_eq!(open.signature(), frozen.signature());
    assert_ne!(open.signature_hash(), frozen.signature_hash());
    let cache = engine.cache().unwrap();
    assert_eq!(cache.misses(), 2);
    assert_eq!(cache.hits(), 0);

    assert!(open.links(&var("a"), None).unwrap().contains_key(&var("b")));
    assert!(!frozen.links(&var("a"), None).unwrap().contains_key(&var("b")));
}
