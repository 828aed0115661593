//! Layering engine: longest-path generation assignment.
//!
//! Kahn's algorithm over a parent → child petgraph `DiGraph`. A node's layer
//! is `1 + max(layer(parent))`, or 0 when it has no parents; whatever is left
//! with unresolved in-degree after the ready set drains sits on a cycle.

use std::collections::{BTreeSet, HashMap};

use log::debug;
use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};

use super::closure::AncestryGraph;
use crate::error::{PlotError, Result};

/// Generations of an ancestry graph, oldest first. Every layer is sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Layering {
    layers: Vec<Vec<String>>,
    depth: HashMap<String, usize>,
}

impl Layering {
    /// Assign every node of `graph` to a layer.
    ///
    /// Parent names that are not keys of `graph` are treated as untraced
    /// leaves.
    pub fn assign(graph: &AncestryGraph) -> Result<Self> {
        let (digraph, node_index) = to_digraph(graph);

        let mut in_degree: HashMap<NodeIndex, usize> = digraph
            .node_indices()
            .map(|idx| {
                let n = digraph.edges_directed(idx, Direction::Incoming).count();
                (idx, n)
            })
            .collect();

        // Ordered by name so processing order is reproducible.
        let mut ready: BTreeSet<(&str, NodeIndex)> = in_degree
            .iter()
            .filter(|&(_, &n)| n == 0)
            .map(|(&idx, _)| (digraph[idx], idx))
            .collect();

        let mut depth: HashMap<NodeIndex, usize> = HashMap::new();
        let mut max_depth = 0;
        while let Some((_, idx)) = ready.pop_first() {
            in_degree.remove(&idx);

            let d = digraph
                .neighbors_directed(idx, Direction::Incoming)
                .filter_map(|p| depth.get(&p))
                .max()
                .map_or(0, |&h| h + 1);
            depth.insert(idx, d);
            max_depth = max_depth.max(d);

            // Parallel edges (seed == pollen) show up twice here, matching
            // the two in-degree units they contributed.
            for child in digraph.neighbors_directed(idx, Direction::Outgoing) {
                if let Some(n) = in_degree.get_mut(&child) {
                    *n -= 1;
                    if *n == 0 {
                        ready.insert((digraph[child], child));
                    }
                }
            }
        }

        if !in_degree.is_empty() {
            let mut nodes: Vec<String> =
                in_degree.keys().map(|&idx| digraph[idx].to_string()).collect();
            nodes.sort();
            return Err(PlotError::CyclicGraph { nodes });
        }

        let mut layers: Vec<Vec<String>> = if depth.is_empty() {
            Vec::new()
        } else {
            vec![Vec::new(); max_depth + 1]
        };
        for (&idx, &d) in &depth {
            layers[d].push(digraph[idx].to_string());
        }
        for layer in &mut layers {
            layer.sort();
        }
        debug!(
            "layered {} nodes into {} generations",
            node_index.len(),
            layers.len()
        );

        let depth = depth
            .into_iter()
            .map(|(idx, d)| (digraph[idx].to_string(), d))
            .collect();
        Ok(Self { layers, depth })
    }

    /// Layers from generation 0 upward.
    pub fn layers(&self) -> &[Vec<String>] {
        &self.layers
    }

    /// Generation of `name`, if it was laid out.
    pub fn layer_of(&self, name: &str) -> Option<usize> {
        self.depth.get(name).copied()
    }

    /// Number of generations.
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn node_count(&self) -> usize {
        self.depth.len()
    }

    /// Node names in layer order, sorted within each layer.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.layers.iter().flatten().map(|s| s.as_str())
    }
}

/// Build the parent → child digraph, one edge per parent slot.
fn to_digraph(graph: &AncestryGraph) -> (DiGraph<&str, ()>, HashMap<&str, NodeIndex>) {
    let mut digraph: DiGraph<&str, ()> = DiGraph::new();
    let mut node_index: HashMap<&str, NodeIndex> = HashMap::new();

    for name in graph.nodes() {
        ensure_node(&mut digraph, &mut node_index, name);
    }
    for (parent, child) in graph.edges() {
        let from = ensure_node(&mut digraph, &mut node_index, parent);
        let to = ensure_node(&mut digraph, &mut node_index, child);
        digraph.add_edge(from, to, ());
    }
    (digraph, node_index)
}

fn ensure_node<'a>(
    digraph: &mut DiGraph<&'a str, ()>,
    node_index: &mut HashMap<&'a str, NodeIndex>,
    name: &'a str,
) -> NodeIndex {
    *node_index
        .entry(name)
        .or_insert_with(|| digraph.add_node(name))
}

#[cfg(test)]
#[path = "../../tests/rust/test_lineage_layering.rs"]
mod tests;
