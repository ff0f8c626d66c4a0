//! Single-source shortest paths over the working subgraph.

use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashMap};

use crate::graph::Subgraph;

/// Total-ordering wrapper so edge weights can live in a [`BinaryHeap`].
#[derive(Debug, Clone, Copy)]
pub(crate) struct FloatOrd(pub f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// The settled result of one Dijkstra run.
///
/// A pure function of (subgraph, source): minimum cumulative weights and
/// predecessors are held in side tables keyed by point ident rather than on
/// the points themselves, so repeated or interleaved searches need no reset
/// or session bookkeeping. Absence from `dist` means the point is
/// unreachable (the classical +infinity label); absence from `prev` means
/// no predecessor.
#[derive(Debug, Clone)]
pub struct ShortestPaths {
    source: String,
    dist: HashMap<String, f64>,
    prev: HashMap<String, String>,
}

impl ShortestPaths {
    /// Runs Dijkstra's algorithm from `source` over the subgraph.
    ///
    /// The frontier is a binary heap with lazy deletion: decrease-key is
    /// modeled by pushing a fresh entry and skipping any popped entry whose
    /// recorded weight is worse than the best known. Externally this behaves
    /// identically to a remove-and-reinsert frontier. The loop runs to
    /// frontier exhaustion and always terminates: a settled point is never
    /// re-expanded, and the settled set is bounded by the subgraph.
    pub fn compute(graph: &Subgraph, source: &str) -> Self {
        let mut dist: HashMap<String, f64> = HashMap::new();
        let mut prev: HashMap<String, String> = HashMap::new();
        let mut frontier: BinaryHeap<Reverse<(FloatOrd, String)>> = BinaryHeap::new();

        dist.insert(source.to_string(), 0.0);
        frontier.push(Reverse((FloatOrd(0.0), source.to_string())));

        while let Some(Reverse((FloatOrd(weight), ident))) = frontier.pop() {
            // Stale entry: this point was relaxed again after the push.
            if dist.get(&ident).is_some_and(|&best| weight > best) {
                continue;
            }

            for leg in graph.legs_from(&ident) {
                let through = weight + leg.weight_km;
                let improves = dist.get(&leg.to).is_none_or(|&current| through < current);
                if improves {
                    dist.insert(leg.to.clone(), through);
                    prev.insert(leg.to.clone(), ident.clone());
                    frontier.push(Reverse((FloatOrd(through), leg.to.clone())));
                }
            }
        }

        Self {
            source: source.to_string(),
            dist,
            prev,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Minimum cumulative weight from the source, or `None` if unreachable.
    pub fn distance_to(&self, ident: &str) -> Option<f64> {
        self.dist.get(ident).copied()
    }

    /// Predecessor of `ident` on its shortest path, if any.
    pub fn predecessor(&self, ident: &str) -> Option<&str> {
        self.prev.get(ident).map(String::as_str)
    }
}
