//! Renderers: turn a laid-out lineage into output.
//!
//! `dot` serializes to the Graphviz language; `graphviz` pipes that text
//! through the external `dot` binary when an image is wanted.

pub mod dot;
pub mod graphviz;

pub use dot::DotRenderer;

use crate::lineage::{AncestryGraph, Layering};

/// Everything a renderer needs for one plot.
#[derive(Debug, Clone, Copy)]
pub struct LineagePlot<'a> {
    pub graph: &'a AncestryGraph,
    pub layering: &'a Layering,
    /// Names as the user typed them; matched case-insensitively.
    pub sources: &'a [String],
}

/// Trait for lineage renderers.
pub trait Renderer {
    /// Render a laid-out lineage to a string.
    fn render(&self, plot: &LineagePlot<'_>) -> String;
}
