//! Depth-bounded enumeration of simple paths

use crate::filters::IgnoreFilters;
use causeway_core::{CandidatePath, CommGraph};
use std::collections::HashSet;

/// Enumerate every simple path from `source` to `destination` with at most
/// `max_hops` edges
///
/// Filters are applied at edge-expansion time: an edge whose topic or
/// subscriber is ignored is never followed. A node already on the current
/// walk is never revisited, so results are cycle-free by construction.
/// Results come back in discovery order (edges expand in description
/// order), which keeps repeated runs deterministic.
pub fn enumerate_paths(
    graph: &CommGraph,
    source: &str,
    destination: &str,
    max_hops: u32,
    filters: &IgnoreFilters,
) -> Vec<CandidatePath> {
    let mut results = Vec::new();

    if !graph.contains_node(source) || !graph.contains_node(destination) {
        return results;
    }
    if !filters.passes_node(source) || !filters.passes_node(destination) {
        return results;
    }
    if source == destination {
        results.push(CandidatePath::new(vec![source.to_string()], Vec::new()));
        return results;
    }

    let mut walk = Walk {
        nodes: vec![source.to_string()],
        topics: Vec::new(),
        visited: HashSet::from([source.to_string()]),
    };
    expand(
        graph,
        filters,
        source,
        destination,
        max_hops as usize,
        &mut walk,
        &mut results,
    );
    results
}

/// Mutable state of the walk currently being extended
struct Walk {
    nodes: Vec<String>,
    topics: Vec<String>,
    visited: HashSet<String>,
}

fn expand(
    graph: &CommGraph,
    filters: &IgnoreFilters,
    current: &str,
    destination: &str,
    hops_left: usize,
    walk: &mut Walk,
    results: &mut Vec<CandidatePath>,
) {
    if hops_left == 0 {
        return;
    }

    for comm in graph.edges_from(current) {
        if !filters.passes_edge(comm) {
            continue;
        }
        let next = comm.subscriber.as_str();
        if walk.visited.contains(next) {
            continue;
        }

        walk.nodes.push(next.to_string());
        walk.topics.push(comm.topic_name.clone());

        if next == destination {
            // A simple path cannot pass through the destination and come
            // back, so the walk always ends here.
            results.push(CandidatePath::new(walk.nodes.clone(), walk.topics.clone()));
        } else {
            walk.visited.insert(next.to_string());
            expand(
                graph,
                filters,
                next,
                destination,
                hops_left - 1,
                walk,
                results,
            );
            walk.visited.remove(next);
        }

        walk.nodes.pop();
        walk.topics.pop();
    }
}
