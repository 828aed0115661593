use super::*;

fn graph(entries: &[(&str, Vec<&str>)]) -> AncestryGraph {
    entries
        .iter()
        .map(|(n, ps)| (n.to_string(), ps.iter().map(|p| p.to_string()).collect::<Vec<String>>()))
        .collect()
}

fn assert_edges_increase(g: &AncestryGraph, la: &Layering) {
    for (parent, child) in g.edges() {
        let p = la.layer_of(parent).unwrap();
        let c = la.layer_of(child).unwrap();
        assert!(p < c, "{parent} ({p}) should sit above {child} ({c})");
    }
}

// ── Layer Assignment ─────────────────────────────────────────────────────

#[test]
fn test_layering_two_parents() {
    let g = graph(&[("A", vec!["B", "C"]), ("B", vec![]), ("C", vec![])]);
    let la = Layering::assign(&g).unwrap();
    assert_eq!(la.layers(), [vec!["B", "C"], vec!["A"]]);
    assert_eq!(la.len(), 2);
    assert_eq!(la.node_count(), 3);
}

#[test]
fn test_layering_single_node() {
    let g = graph(&[("A", vec![]), ("B", vec![])]);
    let la = Layering::assign(&g).unwrap();
    assert_eq!(la.layers(), [vec!["A", "B"]]);
    assert_eq!(la.layer_of("A"), Some(0));
}

#[test]
fn test_layering_empty_graph() {
    let la = Layering::assign(&AncestryGraph::new()).unwrap();
    assert!(la.is_empty());
    assert_eq!(la.node_count(), 0);
}

#[test]
fn test_layering_longest_path() {
    // D has parents at depth 0 (C) and depth 2 (B); it must land below B.
    let g = graph(&[
        ("A", vec![]),
        ("B", vec!["A"]),
        ("C", vec![]),
        ("D", vec!["C", "E"]),
        ("E", vec!["B"]),
    ]);
    let la = Layering::assign(&g).unwrap();
    assert_eq!(la.layer_of("A"), Some(0));
    assert_eq!(la.layer_of("C"), Some(0));
    assert_eq!(la.layer_of("B"), Some(1));
    assert_eq!(la.layer_of("E"), Some(2));
    assert_eq!(la.layer_of("D"), Some(3));
    assert_edges_increase(&g, &la);
}

#[test]
fn test_layering_zero_iff_no_parents() {
    let g = graph(&[
        ("Hestia", vec!["Aladin", "Madame Martinet"]),
        ("Madame Martinet", vec!["Aladin", "insigne"]),
        ("Aladin", vec!["villosum", "barbatum"]),
        ("villosum", vec![]),
        ("barbatum", vec![]),
        ("insigne", vec![]),
    ]);
    let la = Layering::assign(&g).unwrap();
    for (node, parents) in g.iter() {
        assert_eq!(la.layer_of(node) == Some(0), parents.is_empty(), "{node}");
    }
    assert_edges_increase(&g, &la);
    assert_eq!(
        la.iter().collect::<Vec<_>>(),
        vec!["barbatum", "insigne", "villosum", "Aladin", "Madame Martinet", "Hestia"]
    );
}

#[test]
fn test_layering_duplicate_parent_slots() {
    let g = graph(&[("A", vec!["B", "B"]), ("B", vec![])]);
    let la = Layering::assign(&g).unwrap();
    assert_eq!(la.layers(), [vec!["B"], vec!["A"]]);
}

#[test]
fn test_layering_missing_parent_key_is_leaf() {
    let g = graph(&[("A", vec!["Ghost"])]);
    let la = Layering::assign(&g).unwrap();
    assert_eq!(la.layer_of("Ghost"), Some(0));
    assert_eq!(la.layer_of("A"), Some(1));
}

#[test]
fn test_layering_layers_sorted() {
    let g = graph(&[("z", vec![]), ("m", vec![]), ("a", vec![]), ("Q", vec!["z", "a"])]);
    let la = Layering::assign(&g).unwrap();
    assert_eq!(la.layers()[0], vec!["a", "m", "z"]);
}

// ── Cycles ───────────────────────────────────────────────────────────────

#[test]
fn test_layering_self_cycle() {
    let g = graph(&[("A", vec!["A", "X"]), ("X", vec![])]);
    match Layering::assign(&g) {
        Err(PlotError::CyclicGraph { nodes }) => assert_eq!(nodes, vec!["A"]),
        other => panic!("expected CyclicGraph, got {:?}", other),
    }
}

#[test]
fn test_layering_long_cycle() {
    let g = graph(&[
        ("root", vec![]),
        ("A", vec!["root", "D"]),
        ("B", vec!["A"]),
        ("C", vec!["B"]),
        ("D", vec!["C"]),
        ("E", vec!["D"]),
    ]);
    match Layering::assign(&g) {
        Err(PlotError::CyclicGraph { nodes }) => {
            assert_eq!(nodes, vec!["A", "B", "C", "D", "E"]);
        }
        other => panic!("expected CyclicGraph, got {:?}", other),
    }
}

#[test]
fn test_layering_two_cycle_message() {
    let g = graph(&[("A", vec!["B"]), ("B", vec!["A"])]);
    let err = Layering::assign(&g).unwrap_err();
    assert_eq!(err.to_string(), "graph has cycles: A, B");
}
