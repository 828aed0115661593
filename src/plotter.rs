//! Plot request lifecycle: query → closure → layers → DOT → image.
//!
//! A `Plotter` is built once around the shared register and serves any
//! number of requests, concurrently if the host wants. The only state it
//! mutates is the request counter used to correlate log lines.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use log::info;

use crate::config::{OutputFormat, PlotConfig};
use crate::error::Result;
use crate::query::Query;
use crate::registry::GrexLookup;
use crate::renderers::graphviz;

/// Output of one successful plot.
#[derive(Debug, Clone)]
pub struct Plotted {
    pub request_id: u64,
    pub format: OutputFormat,
    pub bytes: Vec<u8>,
}

impl Plotted {
    /// Suggested file name, e.g. `image.jpg`.
    pub fn file_name(&self) -> String {
        format!("image.{}", self.format)
    }
}

pub struct Plotter<L: GrexLookup> {
    registry: Arc<L>,
    config: PlotConfig,
    next_id: AtomicU64,
}

impl<L: GrexLookup> Plotter<L> {
    pub fn new(registry: Arc<L>, config: PlotConfig) -> Self {
        Self {
            registry,
            config,
            next_id: AtomicU64::new(0),
        }
    }

    pub fn registry(&self) -> &L {
        &self.registry
    }

    pub fn config(&self) -> &PlotConfig {
        &self.config
    }

    /// Serve one local request for the comma-separated names in `raw_query`.
    pub fn plot(&self, raw_query: &str) -> Result<Plotted> {
        self.plot_for("local", raw_query)
    }

    /// Serve one request, logging its start and end. `origin` describes the
    /// caller (for HTTP: peer address, method and URL).
    pub fn plot_for(&self, origin: &str, raw_query: &str) -> Result<Plotted> {
        let request_id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        info!("start_request,{},{},{:?}", request_id, origin, raw_query);
        let t0 = Instant::now();

        let result = Query::parse(raw_query, self.config.max_names)
            .and_then(|query| self.render_query(&query, self.config.format));

        let elapsed = t0.elapsed();
        match &result {
            Ok(_) => info!("end_request,{},dt={:?} err=none", request_id, elapsed),
            Err(e) => info!("end_request,{},dt={:?} err={}", request_id, elapsed, e),
        }
        result.map(|bytes| Plotted {
            request_id,
            format: self.config.format,
            bytes,
        })
    }

    /// DOT text for a validated query.
    pub fn dot(&self, query: &Query) -> Result<String> {
        crate::plot_dot_with_config(&*self.registry, query.names(), &self.config)
    }

    fn render_query(&self, query: &Query, format: OutputFormat) -> Result<Vec<u8>> {
        let dot = self.dot(query)?;
        graphviz::dottify(&dot, format, &self.config)
    }
}

#[cfg(test)]
#[path = "../tests/rust/test_plotter.rs"]
mod tests;
