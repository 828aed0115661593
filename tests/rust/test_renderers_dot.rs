use super::*;
use crate::lineage::{Layering, pull};
use crate::registry::{Grex, Registry};

fn registry() -> Registry {
    Registry::from_grexes([
        Grex::new("A", "B", "C").with_origin("Lance", "1987"),
        Grex::new("B", "", "").with_origin("Vacherot", "1921"),
        Grex::new("C", "", "").with_origin("Sander", "1901"),
    ])
}

fn render(r: &Registry, names: &[&str]) -> String {
    let g = pull(r, names).unwrap();
    let la = Layering::assign(&g).unwrap();
    let sources: Vec<String> = names.iter().map(|s| s.to_string()).collect();
    let plot = LineagePlot {
        graph: &g,
        layering: &la,
        sources: &sources,
    };
    DotRenderer::new(r).render(&plot)
}

#[test]
fn test_render_two_parents() {
    let out = render(&registry(), &["A"]);
    let expected = "\
digraph {
\t{rank=same;
\t\tN0 [label=\"B\\nVacherot\\n1921\"]
\t\tN1 [label=\"C\\nSander\\n1901\"]
\t}
\t{rank=same;
\t\tN2 [label=\"A\\nLance\\n1987\" style=filled]
\t}
\tN0 -> N2
\tN1 -> N2
}
";
    assert_eq!(out, expected);
}

#[test]
fn test_render_highlight_is_case_insensitive() {
    let out = render(&registry(), &["a", "c"]);
    assert!(out.contains("N1 [label=\"C\\nSander\\n1901\" style=filled]"));
    assert!(out.contains("N2 [label=\"A\\nLance\\n1987\" style=filled]"));
    assert!(out.contains("N0 [label=\"B\\nVacherot\\n1921\"]\n"));
}

#[test]
fn test_render_untraced_leaf_bare_label() {
    let r = Registry::from_grexes([Grex::new("Hybrid", "insigne", "").with_origin("Me", "2000")]);
    let out = render(&r, &["Hybrid"]);
    assert!(out.contains("\t\tN0 [label=\"insigne\"]\n"));
    assert!(out.contains("\t\tN1 [label=\"Hybrid\\nMe\\n2000\" style=filled]\n"));
    assert!(out.contains("\tN0 -> N1\n"));
}

#[test]
fn test_render_one_group_per_layer_edges_last() {
    let out = render(&registry(), &["A"]);
    assert_eq!(out.matches("{rank=same;").count(), 2);
    let last_node = out.rfind("[label=").unwrap();
    let first_edge = out.find("->").unwrap();
    assert!(last_node < first_edge);
    assert!(out.starts_with("digraph {\n"));
    assert!(out.ends_with("}\n"));
}

#[test]
fn test_render_duplicate_parent_two_edges() {
    let r = Registry::from_grexes([Grex::new("Self", "P", "P"), Grex::new("P", "", "")]);
    let out = render(&r, &["Self"]);
    assert_eq!(out.matches("\tN0 -> N1\n").count(), 2);
}

#[test]
fn test_render_custom_highlight_style() {
    let r = registry();
    let g = pull(&r, &["B"]).unwrap();
    let la = Layering::assign(&g).unwrap();
    let sources = vec!["B".to_string()];
    let plot = LineagePlot {
        graph: &g,
        layering: &la,
        sources: &sources,
    };
    let out = DotRenderer::new(&r)
        .with_highlight_style("\"filled,bold\"")
        .render(&plot);
    assert!(out.contains("style=\"filled,bold\""));
}

#[test]
fn test_render_skips_edges_outside_layering() {
    let r = registry();
    let full = pull(&r, &["A"]).unwrap();
    let partial = pull(&r, &["B"]).unwrap();
    let la = Layering::assign(&partial).unwrap();
    let sources = vec!["A".to_string()];
    let plot = LineagePlot {
        graph: &full,
        layering: &la,
        sources: &sources,
    };
    let out = DotRenderer::new(&r).render(&plot);
    assert!(!out.contains("->"));
    assert_eq!(out.matches("[label=").count(), 1);
    assert!(out.ends_with("\t}\n}\n"));
}

#[test]
fn test_default_highlight_matches_config() {
    let r = registry();
    let out = render(&r, &["B"]);
    let style = format!("style={}", PlotConfig::default().highlight_style);
    assert!(out.contains(&style));
}
