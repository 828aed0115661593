//! Query parsing: the comma-separated grex list a plot is requested for.

use std::collections::HashSet;

use crate::error::{PlotError, Result};

/// Validated, ordered list of grex names to plot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    names: Vec<String>,
}

impl Query {
    /// Split `raw` on commas, trim, drop blanks and exact duplicates.
    ///
    /// Deduplication is case-sensitive: `Dup` and `dup` both survive and are
    /// later resolved against the register case-insensitively.
    pub fn parse(raw: &str, max_names: usize) -> Result<Self> {
        Self::from_names(raw.split(','), max_names)
    }

    /// Same cleaning as [`Query::parse`], over names that are already split.
    pub fn from_names<I, S>(names: I, max_names: usize) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut cleaned = Vec::new();
        for name in names {
            let name = name.as_ref().trim();
            if !name.is_empty() && seen.insert(name.to_string()) {
                cleaned.push(name.to_string());
            }
        }
        match cleaned.len() {
            0 => Err(PlotError::InvalidQuery("no grex specified".to_string())),
            n if n > max_names => Err(PlotError::InvalidQuery(
                "too many grexes specified".to_string(),
            )),
            _ => Ok(Self { names: cleaned }),
        }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
#[path = "../tests/rust/test_query.rs"]
mod tests;
