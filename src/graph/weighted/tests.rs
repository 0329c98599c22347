use super::*;

fn abcd() -> WeightedGraph<&'static str> {
    let mut graph = WeightedGraph::new();
    graph.add(["A", "B", "C", "D"]).unwrap();
    graph.set(&"A", &"B", 1);
    graph.set(&"B", &"C", 2);
    graph.set(&"A", &"C", 10);
    graph.set(&"C", &"D", 1);
    graph
}

#[test]
fn test_get_set_roundtrip() {
    let mut graph = WeightedGraph::new();
    graph.add(["x", "y"]).unwrap();
    assert_eq!(graph.get(&"x", &"y"), None);
    assert_eq!(graph.set(&"x", &"y", 5), None);
    assert_eq!(graph.get(&"x", &"y"), Some(5));
    assert_eq!(graph.set(&"x", &"y", 7), Some(5));
    assert_eq!(graph.get(&"x", &"y"), Some(7));
    // Directed: the reverse edge is untouched
    assert_eq!(graph.get(&"y", &"x"), None);
}

#[test]
fn test_set_coerces_zero_weight() {
    let mut graph = WeightedGraph::new();
    graph.add(["x", "y"]).unwrap();
    graph.set(&"x", &"y", 0);
    assert_eq!(graph.get(&"x", &"y"), Some(1));
}

#[test]
fn test_get_set_unknown_label_is_absence() {
    let mut graph = WeightedGraph::new();
    graph.add(["x"]).unwrap();
    assert_eq!(graph.get(&"x", &"nope"), None);
    assert_eq!(graph.set(&"nope", &"x", 3), None);
    // The no-op set must not have created anything
    assert_eq!(graph.len(), 1);
    assert!(!graph.contains(&"nope"));
}

#[test]
fn test_add_rejects_duplicates_atomically() {
    let mut graph = WeightedGraph::new();
    graph.add(["a", "b"]).unwrap();
    let err = graph.add(["c", "a", "d"]).unwrap_err();
    assert_eq!(
        err,
        GraphError::DuplicateVertex {
            label: "\"a\"".to_string()
        }
    );
    // Nothing from the failed batch was added
    assert_eq!(graph.len(), 2);
    assert!(!graph.contains(&"c"));
    assert!(!graph.contains(&"d"));

    // Duplicate within the batch itself is also rejected
    assert!(graph.add(["e", "e"]).is_err());
    assert!(!graph.contains(&"e"));
}

#[test]
fn test_add_grows_matrix_preserving_edges() {
    let mut graph = WeightedGraph::new();
    graph.add(["a", "b"]).unwrap();
    graph.set(&"a", &"b", 4);
    graph.add(["c"]).unwrap();
    assert_eq!(graph.get(&"a", &"b"), Some(4));
    // No edges to or from the newcomer
    assert_eq!(graph.get(&"a", &"c"), None);
    assert_eq!(graph.get(&"c", &"b"), None);
}

#[test]
fn test_remove_compacts_and_shifts() {
    let mut graph = WeightedGraph::new();
    graph.add(["a", "b", "c", "d"]).unwrap();
    graph.set(&"a", &"d", 9);
    graph.set(&"c", &"a", 2);
    graph.remove(&["b"]);

    assert_eq!(graph.len(), 3);
    assert!(!graph.contains(&"b"));
    // Surviving edges are intact across the index shift
    assert_eq!(graph.get(&"a", &"d"), Some(9));
    assert_eq!(graph.get(&"c", &"a"), Some(2));
    // Index order stays dense and ordered
    let labels: Vec<_> = graph.vertices().copied().collect();
    assert_eq!(labels, vec!["a", "c", "d"]);
}

#[test]
fn test_remove_unknown_is_ignored() {
    let mut graph = WeightedGraph::new();
    graph.add(["a"]).unwrap();
    graph.remove(&["ghost", "phantom"]);
    assert_eq!(graph.len(), 1);
}

#[test]
fn test_remove_then_add_keeps_indices_dense() {
    let mut graph = WeightedGraph::new();
    graph.add(["a", "b", "c"]).unwrap();
    graph.remove(&["a", "c"]);
    graph.add(["p", "q"]).unwrap();
    assert_eq!(graph.len(), 3);
    let labels: Vec<_> = graph.vertices().copied().collect();
    assert_eq!(labels, vec!["b", "p", "q"]);
    // Dense indices: every label resolves and edges work end to end
    graph.set(&"b", &"q", 1);
    assert_eq!(graph.get(&"b", &"q"), Some(1));
}

#[test]
fn test_clear_edges_keeps_vertices() {
    let mut graph = abcd();
    graph.clear_edges();
    assert_eq!(graph.len(), 4);
    assert_eq!(graph.get(&"A", &"B"), None);
    assert_eq!(graph.distance(&"A", &"D").unwrap(), None);
}

#[test]
fn test_from_edges_builder_defaults_missing_weights() {
    let mut graph = WeightedGraph::from_edges([
        ("a", vec!["b", "c"], vec![3]),
        ("b", vec!["c"], vec![]),
    ]);
    assert_eq!(graph.len(), 3);
    assert_eq!(graph.get(&"a", &"b"), Some(3));
    // Unpaired weights default to 1
    assert_eq!(graph.get(&"a", &"c"), Some(1));
    assert_eq!(graph.get(&"b", &"c"), Some(1));
    assert_eq!(graph.distance(&"a", &"c").unwrap(), Some(2));
}

#[test]
fn test_scenario_abcd() {
    let mut graph = abcd();
    assert_eq!(graph.distance(&"A", &"D").unwrap(), Some(4));
    assert_eq!(graph.path(&"A", &"D").unwrap(), vec!["A", "B", "C", "D"]);

    graph.remove(&["B"]);
    // A -> C is now only the weight-10 edge
    assert_eq!(graph.distance(&"A", &"D").unwrap(), Some(11));
    graph.set(&"A", &"C", 0); // coerced to 1
    assert_eq!(graph.distance(&"A", &"D").unwrap(), Some(2));
}

#[test]
fn test_unreachable_is_not_an_error() {
    let mut graph = WeightedGraph::new();
    graph.add(["a", "b"]).unwrap();
    assert_eq!(graph.distance(&"a", &"b").unwrap(), None);
    assert_eq!(graph.path(&"a", &"b").unwrap(), Vec::<&str>::new());
}

#[test]
fn test_unknown_vertex_query_fails_loudly() {
    let mut graph = WeightedGraph::new();
    graph.add(["a"]).unwrap();
    let err = graph.distance(&"a", &"zzz").unwrap_err();
    assert!(matches!(err, GraphError::UnknownVertex { .. }));
    assert!(graph.path(&"zzz", &"a").is_err());
}

#[test]
fn test_query_populates_cache() {
    let mut graph = abcd();
    assert_eq!(graph.cached_sources(), 0);
    graph.distance(&"A", &"D").unwrap();
    assert_eq!(graph.cached_sources(), 1);
    // Second query from the same source reuses the table
    graph.path(&"A", &"C").unwrap();
    assert_eq!(graph.cached_sources(), 1);
    // A different source computes its own table
    graph.distance(&"B", &"D").unwrap();
    assert_eq!(graph.cached_sources(), 2);
}

#[test]
fn test_every_mutation_invalidates_cache() {
    let mut graph = abcd();

    graph.distance(&"A", &"D").unwrap();
    graph.set(&"A", &"B", 1);
    assert_eq!(graph.cached_sources(), 0);

    graph.distance(&"A", &"D").unwrap();
    graph.add(["E"]).unwrap();
    assert_eq!(graph.cached_sources(), 0);

    graph.distance(&"A", &"D").unwrap();
    graph.remove(&["E"]);
    assert_eq!(graph.cached_sources(), 0);

    graph.distance(&"A", &"D").unwrap();
    graph.randomize(1, 10, 0.5);
    assert_eq!(graph.cached_sources(), 0);

    graph.distance(&"A", &"D").unwrap();
    graph.clear_edges();
    assert_eq!(graph.cached_sources(), 0);
}

#[test]
fn test_no_stale_answers_after_mutation() {
    let mut graph = abcd();
    assert_eq!(graph.distance(&"A", &"D").unwrap(), Some(4));
    // Make the detour cheaper than the cached best path
    graph.set(&"A", &"C", 1);
    assert_eq!(graph.distance(&"A", &"D").unwrap(), Some(2));
    assert_eq!(graph.path(&"A", &"D").unwrap(), vec!["A", "C", "D"]);
}

#[test]
fn test_noop_mutation_yields_same_answers() {
    let mut graph = abcd();
    let before = graph.distance(&"A", &"D").unwrap();
    graph.set(&"A", &"B", 1);
    graph.set(&"A", &"B", 1);
    assert_eq!(graph.distance(&"A", &"D").unwrap(), before);
}

#[test]
fn test_randomize_is_deterministic() {
    let mut a = WeightedGraph::new();
    let mut b = WeightedGraph::new();
    a.add(0..20u32).unwrap();
    b.add(0..20u32).unwrap();
    a.randomize(42, 9, 0.3);
    b.randomize(42, 9, 0.3);
    for i in 0..20u32 {
        for j in 0..20u32 {
            let w = a.get(&i, &j);
            assert_eq!(w, b.get(&i, &j));
            if let Some(w) = w {
                assert!((1..=9).contains(&w));
            }
        }
    }
    // A different seed produces a different matrix
    b.randomize(43, 9, 0.3);
    let same = (0..20u32)
        .flat_map(|i| (0..20u32).map(move |j| (i, j)))
        .all(|(i, j)| a.get(&i, &j) == b.get(&i, &j));
    assert!(!same);
}

#[test]
fn test_randomize_density_extremes() {
    let mut graph = WeightedGraph::new();
    graph.add(0..10u32).unwrap();
    graph.randomize(7, 5, 0.0);
    assert!((0..10u32).all(|i| (0..10u32).all(|j| graph.get(&i, &j).is_none())));
    graph.randomize(7, 5, 1.0);
    assert!((0..10u32).all(|i| (0..10u32).all(|j| graph.get(&i, &j).is_some())));
}

#[test]
fn test_display_matrix_dump() {
    let mut graph = WeightedGraph::new();
    graph.add(["a", "b"]).unwrap();
    graph.set(&"a", &"b", 12);
    let dump = graph.to_string();
    let lines: Vec<&str> = dump.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0].trim(), "a  b");
    // Row "a" holds the weight, row "b" is blank cells
    assert!(lines[1].contains("12"));
    assert!(!lines[2].contains("12"));
}

#[test]
fn test_strategies_agree_through_the_graph_api() {
    let mut heap = WeightedGraph::with_strategy(Strategy::Heap);
    let mut linear = WeightedGraph::with_strategy(Strategy::Linear);
    for g in [&mut heap, &mut linear] {
        g.add(0..30u32).unwrap();
        g.randomize(11, 15, 0.2);
    }
    for from in [0u32, 13, 29] {
        for to in 0..30u32 {
            assert_eq!(
                heap.distance(&from, &to).unwrap(),
                linear.distance(&from, &to).unwrap()
            );
            assert_eq!(heap.path(&from, &to).unwrap(), linear.path(&from, &to).unwrap());
        }
    }
}

#[test]
fn test_empty_graph() {
    let graph: WeightedGraph<String> = WeightedGraph::new();
    assert!(graph.is_empty());
    assert_eq!(graph.to_string().lines().count(), 1);
}
