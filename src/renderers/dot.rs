//! DOT serializer: one `rank=same` block per generation, then the edges.

use std::collections::{HashMap, HashSet};
use std::fmt::Write;

use log::warn;

use super::{LineagePlot, Renderer};
use crate::config::PlotConfig;
use crate::registry::GrexLookup;

/// Node-id prefix; ids keep arbitrary grex names out of DOT syntax.
const NODE_PREFIX: &str = "N";

/// Serializes a [`LineagePlot`] to Graphviz DOT, labelling nodes from the
/// register.
pub struct DotRenderer<'r, L: GrexLookup + ?Sized> {
    registry: &'r L,
    highlight_style: String,
}

impl<'r, L: GrexLookup + ?Sized> DotRenderer<'r, L> {
    pub fn new(registry: &'r L) -> Self {
        Self {
            registry,
            highlight_style: PlotConfig::default().highlight_style,
        }
    }

    pub fn with_highlight_style(mut self, style: &str) -> Self {
        self.highlight_style = style.to_string();
        self
    }

    /// `name\noriginator\ndate` for registered grexes, bare name otherwise.
    fn label(&self, name: &str) -> String {
        match self.registry.lookup(name) {
            Some(grex) => format!("{}\\n{}\\n{}", name, grex.originator, grex.date),
            None => name.to_string(),
        }
    }
}

impl<L: GrexLookup + ?Sized> Renderer for DotRenderer<'_, L> {
    fn render(&self, plot: &LineagePlot<'_>) -> String {
        let highlight: HashSet<String> =
            plot.sources.iter().map(|s| s.to_lowercase()).collect();

        let mut id: HashMap<&str, usize> = HashMap::new();
        let mut out = String::new();
        // Writing to a String cannot fail.
        let _ = writeln!(out, "digraph {{");
        for layer in plot.layering.layers() {
            let _ = writeln!(out, "\t{{rank=same;");
            for node in layer {
                let n = id.len();
                id.insert(node.as_str(), n);

                let style = if highlight.contains(&node.to_lowercase()) {
                    format!(" style={}", self.highlight_style)
                } else {
                    String::new()
                };
                let _ = writeln!(
                    out,
                    "\t\t{NODE_PREFIX}{n} [label=\"{}\"{style}]",
                    self.label(node)
                );
            }
            let _ = writeln!(out, "\t}}");
        }

        for (parent, child) in plot.graph.edges() {
            match (id.get(parent), id.get(child)) {
                (Some(p), Some(c)) => {
                    let _ = writeln!(out, "\t{NODE_PREFIX}{p} -> {NODE_PREFIX}{c}");
                }
                _ => warn!("edge {parent:?} -> {child:?} has an endpoint outside the layering; skipped"),
            }
        }
        out.push_str("}\n");
        out
    }
}

#[cfg(test)]
#[path = "../../tests/rust/test_renderers_dot.rs"]
mod tests;
