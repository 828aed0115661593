//! Closure builder: walks parent references from the queried grexes until
//! every reachable ancestor is either a registered grex or an untraced leaf.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use log::{debug, warn};

use crate::error::{PlotError, Result};
use crate::registry::GrexLookup;

/// Node name → parent names (seed first). Untraced leaves map to an empty
/// list; every parent name is itself a key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AncestryGraph {
    parents: BTreeMap<String, Vec<String>>,
}

impl AncestryGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `name` with its parents, replacing any previous entry.
    pub fn insert(&mut self, name: &str, parents: Vec<String>) {
        self.parents.insert(name.to_string(), parents);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.parents.contains_key(name)
    }

    /// Parents of `name`; empty for leaves and for unknown names.
    pub fn parents_of(&self, name: &str) -> &[String] {
        self.parents.get(name).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// Node names, sorted.
    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.parents.keys().map(|k| k.as_str())
    }

    /// `(node, parents)` pairs in sorted node order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.parents.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// `(parent, child)` pairs, child-major in sorted order, parents in slot
    /// order.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> {
        self.iter()
            .flat_map(|(child, parents)| parents.iter().map(move |p| (p.as_str(), child)))
    }

    pub fn len(&self) -> usize {
        self.parents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }
}

impl<S: Into<String>, P: Into<String>> FromIterator<(S, Vec<P>)> for AncestryGraph {
    fn from_iter<I: IntoIterator<Item = (S, Vec<P>)>>(iter: I) -> Self {
        Self {
            parents: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into_iter().map(Into::into).collect()))
                .collect(),
        }
    }
}

/// Resolve `names` against `registry` and collect their full ancestry.
///
/// Query names are matched case-insensitively; everything after that is
/// exact. Fails with `NotFound` naming the first query that does not
/// resolve.
pub fn pull<L, S>(registry: &L, names: &[S]) -> Result<AncestryGraph>
where
    L: GrexLookup + ?Sized,
    S: AsRef<str>,
{
    let mut todo: VecDeque<String> = VecDeque::new();
    let mut queued: BTreeSet<String> = BTreeSet::new();
    for name in names {
        let name = name.as_ref();
        let candidates = registry.fuzzy_candidates(name);
        if candidates.len() > 1 {
            let all: Vec<&str> = candidates.iter().map(|g| g.name.as_str()).collect();
            warn!("ambiguous grex {:?}: matches {}", name, all.join(", "));
        }
        let grex = registry
            .fuzzy_lookup(name)
            .ok_or_else(|| PlotError::NotFound(name.to_string()))?;
        if queued.insert(grex.name.clone()) {
            todo.push_back(grex.name.clone());
        }
    }

    let mut graph = AncestryGraph::new();
    let mut unknown: BTreeSet<String> = BTreeSet::new();
    while let Some(name) = todo.pop_front() {
        let grex = registry
            .lookup(&name)
            .ok_or_else(|| PlotError::NotFound(name.clone()))?;

        let mut parents = Vec::with_capacity(2);
        for parent in grex.parents() {
            parents.push(parent.to_string());
            if registry.lookup(parent).is_some() {
                if queued.insert(parent.to_string()) {
                    todo.push_back(parent.to_string());
                }
            } else {
                unknown.insert(parent.to_string());
            }
        }
        graph.insert(&grex.name, parents);
    }

    // Untraced names only become leaves once the walk is done; a resolved
    // entry always wins.
    for name in unknown {
        if !graph.contains(&name) {
            graph.insert(&name, Vec::new());
        }
    }
    debug!("ancestry closure of {} queries has {} nodes", names.len(), graph.len());
    Ok(graph)
}

#[cfg(test)]
#[path = "../../tests/rust/test_lineage_closure.rs"]
mod tests;
