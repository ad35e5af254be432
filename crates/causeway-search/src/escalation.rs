//! Depth escalation driver

use crate::dfs::enumerate_paths;
use crate::error::SearchResult;
use crate::filters::IgnoreFilters;
use crate::matcher::CompiledBlock;
use crate::supervisor::run_with_deadline;
use causeway_core::limits::MIN_SEARCH_DEPTH;
use causeway_core::{CandidatePath, CommGraph};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Result of one block search
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// Matched paths, in discovery order
    Found(Vec<CandidatePath>),
    /// The wall-clock budget for the whole escalation expired
    Timeout,
    /// Every depth up to the ceiling was searched without a match
    NotFound,
}

/// Search one specification block, escalating the depth bound
///
/// Runs the path search at depth 1, 2, ... up to `max_depth`, matching the
/// candidates of each depth against the block, and stops at the first
/// depth that yields at least one match. The `budget` is a ceiling on the
/// entire escalation: each attempt gets whatever remains, and expiry
/// aborts the block with [`SearchOutcome::Timeout`].
pub async fn search_with_budget(
    graph: Arc<CommGraph>,
    filters: Arc<IgnoreFilters>,
    block: Arc<CompiledBlock>,
    max_depth: u32,
    budget: Duration,
) -> SearchResult<SearchOutcome> {
    let sources = anchor_nodes(&graph, &block, Anchor::Source);
    let destinations = anchor_nodes(&graph, &block, Anchor::Destination);
    if sources.is_empty() || destinations.is_empty() {
        tracing::debug!("no node matches the source or destination anchor pattern");
        return Ok(SearchOutcome::NotFound);
    }
    tracing::debug!(
        sources = sources.len(),
        destinations = destinations.len(),
        "resolved anchors"
    );

    let started = Instant::now();
    for depth in MIN_SEARCH_DEPTH..=max_depth {
        let Some(remaining) = budget.checked_sub(started.elapsed()).filter(|d| !d.is_zero())
        else {
            tracing::warn!("Timeout happens. Please specify more details for the path");
            return Ok(SearchOutcome::Timeout);
        };

        let attempt_graph = Arc::clone(&graph);
        let attempt_filters = Arc::clone(&filters);
        let attempt_sources = sources.clone();
        let attempt_destinations = destinations.clone();
        let candidates = run_with_deadline(remaining, move || {
            let mut found = Vec::new();
            for source in &attempt_sources {
                for destination in &attempt_destinations {
                    found.extend(enumerate_paths(
                        &attempt_graph,
                        source,
                        destination,
                        depth,
                        &attempt_filters,
                    ));
                }
            }
            found
        })
        .await?;

        let Some(mut candidates) = candidates else {
            tracing::warn!("Timeout happens. Please specify more details for the path");
            return Ok(SearchOutcome::Timeout);
        };
        tracing::info!(depth, "found path num = {}", candidates.len());

        // The generator never produces loops; re-check anyway
        candidates.retain(|path| !path.has_repeated_node());

        let matched: Vec<CandidatePath> = candidates
            .into_iter()
            .filter(|path| block.matches(path))
            .collect();
        tracing::info!(depth, "checked path num = {}", matched.len());

        if !matched.is_empty() {
            return Ok(SearchOutcome::Found(matched));
        }
    }

    Ok(SearchOutcome::NotFound)
}

enum Anchor {
    Source,
    Destination,
}

/// Concrete nodes matching the block's first or last node pattern
///
/// A literal anchor name resolves to exactly that node through the same
/// full-match path as a regex anchor.
fn anchor_nodes(graph: &CommGraph, block: &CompiledBlock, anchor: Anchor) -> Vec<String> {
    let step = match anchor {
        Anchor::Source => block.first_step(),
        Anchor::Destination => block.last_step(),
    };
    match step {
        Some(step) => graph
            .nodes()
            .iter()
            .filter(|node| step.node_matches(node))
            .cloned()
            .collect(),
        None => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use causeway_core::{ArchDescription, Communication, PatternStep};

    fn sample_graph() -> Arc<CommGraph> {
        let desc = ArchDescription::new()
            .with_nodes(vec!["/n1".into(), "/n2".into(), "/n3".into()])
            .with_communications(vec![
                Communication::new("/topic_a", "/n1", "/n2"),
                Communication::new("/topic_b", "/n2", "/n3"),
                Communication::new("/topic_a", "/n1", "/n3"),
            ]);
        Arc::new(CommGraph::from_description(desc).unwrap())
    }

    fn compiled(steps: &[PatternStep]) -> Arc<CompiledBlock> {
        Arc::new(CompiledBlock::compile(steps).unwrap())
    }

    #[tokio::test]
    async fn test_direct_match_stops_at_depth_one() {
        let block = compiled(&[PatternStep::node("/n1"), PatternStep::node("/n3")]);
        let outcome = search_with_budget(
            sample_graph(),
            Arc::new(IgnoreFilters::none()),
            block,
            10,
            Duration::from_secs(30),
        )
        .await
        .unwrap();

        let SearchOutcome::Found(paths) = outcome else {
            panic!("expected a match");
        };
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].nodes, vec!["/n1", "/n3"]);
        assert_eq!(paths[0].topics, vec!["/topic_a"]);
    }

    #[tokio::test]
    async fn test_escalates_until_deep_match() {
        let block = compiled(&[
            PatternStep::node("/n1"),
            PatternStep::node("/n2"),
            PatternStep::node("/n3"),
        ]);
        let outcome = search_with_budget(
            sample_graph(),
            Arc::new(IgnoreFilters::none()),
            block,
            10,
            Duration::from_secs(30),
        )
        .await
        .unwrap();

        let SearchOutcome::Found(paths) = outcome else {
            panic!("expected a match");
        };
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].nodes, vec!["/n1", "/n2", "/n3"]);
    }

    #[tokio::test]
    async fn test_regex_anchor_resolution() {
        let block = compiled(&[PatternStep::node("/n[12]"), PatternStep::node("/n3")]);
        let outcome = search_with_budget(
            sample_graph(),
            Arc::new(IgnoreFilters::none()),
            block,
            10,
            Duration::from_secs(30),
        )
        .await
        .unwrap();

        let SearchOutcome::Found(paths) = outcome else {
            panic!("expected a match");
        };
        // Both /n1 -> /n3 and /n2 -> /n3 are one-hop matches
        assert_eq!(paths.len(), 2);
    }

    #[tokio::test]
    async fn test_not_found_when_depth_exhausted() {
        let block = compiled(&[PatternStep::node("/n3"), PatternStep::node("/n1")]);
        let outcome = search_with_budget(
            sample_graph(),
            Arc::new(IgnoreFilters::none()),
            block,
            10,
            Duration::from_secs(30),
        )
        .await
        .unwrap();

        assert_eq!(outcome, SearchOutcome::NotFound);
    }

    #[tokio::test]
    async fn test_unmatched_anchor_is_not_found() {
        let block = compiled(&[PatternStep::node("/ghost"), PatternStep::node("/n3")]);
        let outcome = search_with_budget(
            sample_graph(),
            Arc::new(IgnoreFilters::none()),
            block,
            10,
            Duration::from_secs(30),
        )
        .await
        .unwrap();

        assert_eq!(outcome, SearchOutcome::NotFound);
    }

    #[tokio::test]
    async fn test_exhausted_budget_reports_timeout() {
        let block = compiled(&[PatternStep::node("/n1"), PatternStep::node("/n3")]);
        let outcome = search_with_budget(
            sample_graph(),
            Arc::new(IgnoreFilters::none()),
            block,
            10,
            Duration::ZERO,
        )
        .await
        .unwrap();

        assert_eq!(outcome, SearchOutcome::Timeout);
    }

    #[tokio::test]
    async fn test_topic_constraint_selects_route() {
        let block = compiled(&[
            PatternStep::node("/n1"),
            PatternStep::with_topic("/n3", "/topic_a"),
        ]);
        let outcome = search_with_budget(
            sample_graph(),
            Arc::new(IgnoreFilters::none()),
            block,
            10,
            Duration::from_secs(30),
        )
        .await
        .unwrap();

        let SearchOutcome::Found(paths) = outcome else {
            panic!("expected a match");
        };
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].topics, vec!["/topic_a"]);
    }

    #[tokio::test]
    async fn test_idempotent_across_runs() {
        let block = compiled(&[PatternStep::node("/n[12]"), PatternStep::node("/n3")]);
        let graph = sample_graph();
        let filters = Arc::new(IgnoreFilters::none());

        let first = search_with_budget(
            Arc::clone(&graph),
            Arc::clone(&filters),
            Arc::clone(&block),
            10,
            Duration::from_secs(30),
        )
        .await
        .unwrap();
        let second = search_with_budget(graph, filters, block, 10, Duration::from_secs(30))
            .await
            .unwrap();

        assert_eq!(first, second);
    }
}
