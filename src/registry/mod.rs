//! Registry: the read-only name → grex table every plot resolves against.
//!
//! Loaded once at startup (see [`reader`]) and shared by reference between
//! requests; nothing here mutates after construction.

pub mod reader;

use std::collections::HashMap;
use std::path::Path;

use thiserror::Error;

/// One registered grex. Empty `seed`/`pollen` mean no parent was recorded.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Grex {
    pub name: String,
    pub seed: String,
    pub pollen: String,
    pub originator: String,
    pub date: String,
}

impl Grex {
    pub fn new(name: &str, seed: &str, pollen: &str) -> Self {
        Self {
            name: name.to_string(),
            seed: seed.to_string(),
            pollen: pollen.to_string(),
            ..Default::default()
        }
    }

    pub fn with_origin(mut self, originator: &str, date: &str) -> Self {
        self.originator = originator.to_string();
        self.date = date.to_string();
        self
    }

    /// Non-empty parent references, seed first.
    pub fn parents(&self) -> impl Iterator<Item = &str> {
        [self.seed.as_str(), self.pollen.as_str()]
            .into_iter()
            .filter(|p| !p.is_empty())
    }
}

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("register is empty (no header row)")]
    EmptyInput,

    #[error("missing column: {0}")]
    MissingColumn(String),

    #[error("line {line}: expected at least {expected} fields, found {found}")]
    ShortRow {
        line: usize,
        expected: usize,
        found: usize,
    },
}

/// Lookup contract the lineage engine consumes.
///
/// Implementations must be free of side effects so one instance can serve
/// concurrent requests.
pub trait GrexLookup: Send + Sync {
    /// Exact, case-sensitive lookup.
    fn lookup(&self, name: &str) -> Option<&Grex>;

    /// Every record whose name equals `name` ignoring case, sorted by name.
    fn fuzzy_candidates(&self, name: &str) -> Vec<&Grex>;

    /// Case-insensitive lookup.
    ///
    /// With several candidates, a byte-for-byte match wins, otherwise the
    /// lexicographically smallest name.
    fn fuzzy_lookup(&self, name: &str) -> Option<&Grex> {
        let candidates = self.fuzzy_candidates(name);
        candidates
            .iter()
            .find(|g| g.name == name)
            .or_else(|| candidates.first())
            .copied()
    }
}

/// In-memory register keyed by exact name, with a lowercase side index.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    grexes: HashMap<String, Grex>,
    /// lowercase name → exact names sharing it, sorted.
    folded: HashMap<String, Vec<String>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from records; a later record with the same exact name replaces
    /// the earlier one.
    pub fn from_grexes<I: IntoIterator<Item = Grex>>(grexes: I) -> Self {
        let mut registry = Self::new();
        for grex in grexes {
            registry.insert(grex);
        }
        registry
    }

    /// Read a `;`-delimited RHS register export from disk.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, RegistryError> {
        let file = std::fs::File::open(path)?;
        reader::read_register(file)
    }

    /// Read a `;`-delimited RHS register export.
    pub fn from_reader<R: std::io::Read>(rd: R) -> Result<Self, RegistryError> {
        reader::read_register(rd)
    }

    /// Insert a record, returning the one it replaced.
    pub fn insert(&mut self, grex: Grex) -> Option<Grex> {
        let folded = self.folded.entry(grex.name.to_lowercase()).or_default();
        if let Err(pos) = folded.binary_search(&grex.name) {
            folded.insert(pos, grex.name.clone());
        }
        self.grexes.insert(grex.name.clone(), grex)
    }

    pub fn len(&self) -> usize {
        self.grexes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grexes.is_empty()
    }

    /// All registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.grexes.keys().map(|k| k.as_str()).collect();
        names.sort();
        names
    }
}

impl GrexLookup for Registry {
    fn lookup(&self, name: &str) -> Option<&Grex> {
        self.grexes.get(name)
    }

    fn fuzzy_candidates(&self, name: &str) -> Vec<&Grex> {
        self.folded
            .get(&name.to_lowercase())
            .map(|names| names.iter().filter_map(|n| self.grexes.get(n)).collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
#[path = "../../tests/rust/test_registry.rs"]
mod tests;
