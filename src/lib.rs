//! orchid-lineage: ancestry plots for registered orchid grexes.
//!
//! Given up to five grex names, pulls their full ancestry out of the RHS
//! register, layers it by generation and emits a Graphviz graph with the
//! queried grexes highlighted.
//!
//! Public API: `plot_dot()` for the whole pipeline, or the pieces in
//! [`lineage`] and [`renderers`].

pub mod config;
pub mod error;
pub mod lineage;
pub mod plotter;
pub mod query;
pub mod registry;
pub mod renderers;
#[cfg(feature = "server")]
pub mod server;

pub use config::{OutputFormat, PlotConfig};
pub use error::{PlotError, Result};
pub use lineage::{AncestryGraph, Layering};
pub use plotter::{Plotted, Plotter};
pub use query::Query;
pub use registry::{Grex, GrexLookup, Registry};

use renderers::{DotRenderer, LineagePlot, Renderer};

/// Build the ancestry of `names` and serialize it to DOT.
pub fn plot_dot<L, S>(registry: &L, names: &[S]) -> Result<String>
where
    L: GrexLookup + ?Sized,
    S: AsRef<str>,
{
    plot_dot_with_config(registry, names, &PlotConfig::default())
}

/// [`plot_dot`] honouring the highlight style in `config`.
pub fn plot_dot_with_config<L, S>(registry: &L, names: &[S], config: &PlotConfig) -> Result<String>
where
    L: GrexLookup + ?Sized,
    S: AsRef<str>,
{
    let graph = lineage::pull(registry, names)?;
    let layering = Layering::assign(&graph)?;
    let sources: Vec<String> = names.iter().map(|s| s.as_ref().to_string()).collect();
    let plot = LineagePlot {
        graph: &graph,
        layering: &layering,
        sources: &sources,
    };
    let renderer = DotRenderer::new(registry).with_highlight_style(&config.highlight_style);
    Ok(renderer.render(&plot))
}
