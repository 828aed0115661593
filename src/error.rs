//! Error types for the plotting pipeline.
//!
//! `NotFound`, `CyclicGraph` and `InvalidQuery` are the engine-level kinds;
//! every one of them is terminal for the request that raised it.

use std::time::Duration;

use thiserror::Error;

use crate::registry::RegistryError;

#[derive(Debug, Error)]
pub enum PlotError {
    /// A query name (or a name the closure walk expected to resolve) has no
    /// record in the register.
    #[error("not found: {0}")]
    NotFound(String),

    /// The ancestry closure is not a DAG. Carries the nodes left unresolved
    /// by the layering pass, sorted.
    #[error("graph has cycles: {}", .nodes.join(", "))]
    CyclicGraph { nodes: Vec<String> },

    /// Zero names, or more than the configured maximum.
    #[error("{0}")]
    InvalidQuery(String),

    #[error("register: {0}")]
    Registry(#[from] RegistryError),

    /// The external renderer exited unsuccessfully.
    #[error("render failed: {0}")]
    Render(String),

    #[error("render timed out after {0:?}")]
    RenderTimeout(Duration),

    /// The HTTP host could not start or stopped unexpectedly.
    #[error("server: {0}")]
    Server(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PlotError>;
