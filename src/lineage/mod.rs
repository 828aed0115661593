//! Lineage engine: ancestry closure and generation layering.
//!
//! Pipeline: query names → [`closure::pull`] → [`AncestryGraph`] →
//! [`layering::Layering::assign`] → ordered generations.

pub mod closure;
pub mod layering;

pub use closure::{AncestryGraph, pull};
pub use layering::Layering;
