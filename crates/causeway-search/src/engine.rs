//! Per-target search orchestration

use crate::error::{SearchError, SearchResult};
use crate::escalation::{search_with_budget, SearchOutcome};
use crate::filters::IgnoreFilters;
use crate::matcher::CompiledBlock;
use crate::merger::merge_blocks;
use causeway_core::limits::{validate_search_depth, DEFAULT_MAX_NODE_DEPTH, DEFAULT_TIMEOUT_SECS};
use causeway_core::{CandidatePath, CommGraph, MergedPath, NamedPath, TargetPathFile};
use std::sync::Arc;
use std::time::Duration;

/// Tunables for one engine invocation
#[derive(Debug, Clone)]
pub struct SearchOptions {
    /// Search depth ceiling (hops)
    pub max_node_depth: u32,

    /// Wall-clock budget per block search
    pub timeout: Duration,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            max_node_depth: DEFAULT_MAX_NODE_DEPTH,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl SearchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_node_depth(mut self, depth: u32) -> Self {
        self.max_node_depth = depth;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Outcome for one named target
#[derive(Debug, Clone, PartialEq)]
pub enum TargetOutcome {
    /// Paths to hand to the downstream analysis pipeline
    Found(Vec<NamedPath>),
    /// A block search exceeded its wall-clock budget
    Timeout,
    /// No match within the depth ceiling (or the blocks could not be
    /// spliced)
    NotFound,
}

/// Result for one named target
#[derive(Debug, Clone, PartialEq)]
pub struct TargetResult {
    pub name: String,
    pub outcome: TargetOutcome,
}

impl TargetResult {
    pub fn is_found(&self) -> bool {
        matches!(self.outcome, TargetOutcome::Found(_))
    }
}

/// Path discovery engine over one communication graph
///
/// The graph is read-only and shared across all search attempts; every
/// attempt owns its private accumulators, so targets fail or succeed
/// independently.
pub struct PathEngine {
    graph: Arc<CommGraph>,
}

impl PathEngine {
    pub fn new(graph: CommGraph) -> Self {
        Self {
            graph: Arc::new(graph),
        }
    }

    pub fn graph(&self) -> &CommGraph {
        &self.graph
    }

    /// Search every named target in a target-path document
    ///
    /// Configuration problems (malformed steps, bad regexes, bad options)
    /// fail the whole batch before any search starts. Search failures are
    /// scoped to their target: a timeout or a miss on one target never
    /// aborts its siblings.
    pub async fn find_target_paths(
        &self,
        file: &TargetPathFile,
        options: &SearchOptions,
    ) -> SearchResult<Vec<TargetResult>> {
        validate_search_depth(options.max_node_depth)
            .map_err(causeway_core::Error::Validation)?;
        file.validate()?;

        let filters = Arc::new(IgnoreFilters::from_lists(
            file.ignore_topic_list.as_deref(),
            file.ignore_node_list.as_deref(),
        )?);

        // Compile everything first so a bad pattern anywhere in the file
        // surfaces before any search runs
        let mut compiled: Vec<(String, Vec<Arc<CompiledBlock>>)> = Vec::new();
        for target in &file.target_path_list {
            let blocks = target
                .blocks
                .iter()
                .map(|block| CompiledBlock::compile(block).map(Arc::new))
                .collect::<SearchResult<Vec<_>>>()?;
            compiled.push((target.name.clone(), blocks));
        }

        let mut results = Vec::with_capacity(compiled.len());
        for (name, blocks) in compiled {
            tracing::info!("Processing: {}", name);
            let outcome = self.search_target(&name, &blocks, &filters, options).await?;
            results.push(TargetResult { name, outcome });
        }
        Ok(results)
    }

    async fn search_target(
        &self,
        name: &str,
        blocks: &[Arc<CompiledBlock>],
        filters: &Arc<IgnoreFilters>,
        options: &SearchOptions,
    ) -> SearchResult<TargetOutcome> {
        let mut block_matches: Vec<Vec<CandidatePath>> = Vec::new();
        let mut timed_out = false;

        for (index, block) in blocks.iter().enumerate() {
            let outcome = search_with_budget(
                Arc::clone(&self.graph),
                Arc::clone(filters),
                Arc::clone(block),
                options.max_node_depth,
                options.timeout,
            )
            .await?;

            match outcome {
                SearchOutcome::Found(paths) => {
                    tracing::info!("Target path found: {}_{}", name, index);
                    block_matches.push(paths);
                }
                SearchOutcome::Timeout => {
                    tracing::error!("Target path not found: {}_{}", name, index);
                    timed_out = true;
                }
                SearchOutcome::NotFound => {
                    tracing::error!("Target path not found: {}_{}", name, index);
                }
            }
        }

        if block_matches.len() != blocks.len() {
            tracing::error!(
                "Path not found. Check the target path file, or consider to increase \
                 max_node_depth and timeout: {}",
                name
            );
            return Ok(if timed_out {
                TargetOutcome::Timeout
            } else {
                TargetOutcome::NotFound
            });
        }

        if block_matches.len() == 1 {
            let named = block_matches[0]
                .iter()
                .enumerate()
                .map(|(index, path)| {
                    NamedPath::new(format!("{}_{}", name, index), MergedPath::from_candidate(path))
                })
                .collect();
            return Ok(TargetOutcome::Found(named));
        }

        // Chains are expensive to compute, so use the first found path of
        // every block
        let firsts: Vec<CandidatePath> = block_matches
            .iter()
            .filter_map(|matches| matches.first().cloned())
            .collect();
        match merge_blocks(&firsts) {
            Ok(merged) => Ok(TargetOutcome::Found(vec![NamedPath::new(name, merged)])),
            Err(SearchError::BoundaryMismatch { left, right }) => {
                tracing::error!(
                    "Target path not found: {} (blocks end at '{}' but continue from '{}')",
                    name,
                    left,
                    right
                );
                Ok(TargetOutcome::NotFound)
            }
            Err(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use causeway_core::{ArchDescription, Communication, PatternStep, TargetPathSpec};

    fn pipeline_graph() -> CommGraph {
        let desc = ArchDescription::new()
            .with_nodes(vec![
                "/driver".into(),
                "/filter".into(),
                "/planner".into(),
                "/actuator".into(),
            ])
            .with_communications(vec![
                Communication::new("/points_raw", "/driver", "/filter"),
                Communication::new("/points", "/filter", "/planner"),
                Communication::new("/cmd", "/planner", "/actuator"),
            ]);
        CommGraph::from_description(desc).unwrap()
    }

    fn file_with(targets: Vec<TargetPathSpec>) -> TargetPathFile {
        TargetPathFile {
            target_path_list: targets,
            ignore_topic_list: None,
            ignore_node_list: None,
        }
    }

    #[tokio::test]
    async fn test_single_block_target() {
        let engine = PathEngine::new(pipeline_graph());
        let file = file_with(vec![TargetPathSpec::single_block(
            "main",
            vec![
                PatternStep::node("/driver"),
                PatternStep::node("/filter"),
                PatternStep::node("/planner"),
            ],
        )]);

        let results = engine
            .find_target_paths(&file, &SearchOptions::default())
            .await
            .unwrap();

        assert_eq!(results.len(), 1);
        let TargetOutcome::Found(paths) = &results[0].outcome else {
            panic!("expected a match");
        };
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].name, "main_0");
        assert_eq!(paths[0].path.node_names(), vec!["/driver", "/filter", "/planner"]);
    }

    #[tokio::test]
    async fn test_multi_block_target_is_merged() {
        let engine = PathEngine::new(pipeline_graph());
        let file = file_with(vec![TargetPathSpec::new(
            "chain",
            vec![
                vec![
                    PatternStep::node("/driver"),
                    PatternStep::node("/filter"),
                    PatternStep::node("/planner"),
                ],
                vec![PatternStep::node("/planner"), PatternStep::node("/actuator")],
            ],
        )]);

        let results = engine
            .find_target_paths(&file, &SearchOptions::default())
            .await
            .unwrap();

        let TargetOutcome::Found(paths) = &results[0].outcome else {
            panic!("expected a match");
        };
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].name, "chain");
        assert_eq!(
            paths[0].path.node_names(),
            vec!["/driver", "/filter", "/planner", "/actuator"]
        );
    }

    #[tokio::test]
    async fn test_failing_target_does_not_abort_siblings() {
        let engine = PathEngine::new(pipeline_graph());
        let file = file_with(vec![
            TargetPathSpec::single_block(
                "missing",
                vec![PatternStep::node("/actuator"), PatternStep::node("/driver")],
            ),
            TargetPathSpec::single_block(
                "present",
                vec![PatternStep::node("/driver"), PatternStep::node("/filter")],
            ),
        ]);

        let results = engine
            .find_target_paths(&file, &SearchOptions::default())
            .await
            .unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].outcome, TargetOutcome::NotFound);
        assert!(results[1].is_found());
    }

    #[tokio::test]
    async fn test_bad_pattern_fails_the_batch() {
        let engine = PathEngine::new(pipeline_graph());
        let file = file_with(vec![TargetPathSpec::single_block(
            "broken",
            vec![PatternStep::node("("), PatternStep::node("/filter")],
        )]);

        let result = engine
            .find_target_paths(&file, &SearchOptions::default())
            .await;
        assert!(matches!(result, Err(SearchError::Pattern { .. })));
    }

    #[tokio::test]
    async fn test_invalid_depth_rejected() {
        let engine = PathEngine::new(pipeline_graph());
        let file = file_with(vec![]);
        let options = SearchOptions::default().with_max_node_depth(0);

        assert!(engine.find_target_paths(&file, &options).await.is_err());
    }

    #[tokio::test]
    async fn test_ignore_override_can_hide_a_route() {
        let engine = PathEngine::new(pipeline_graph());
        let mut file = file_with(vec![TargetPathSpec::single_block(
            "main",
            vec![PatternStep::node("/driver"), PatternStep::node("/filter")],
        )]);
        file.ignore_topic_list = Some(vec!["/points_raw".to_string()]);

        let results = engine
            .find_target_paths(&file, &SearchOptions::default())
            .await
            .unwrap();

        assert_eq!(results[0].outcome, TargetOutcome::NotFound);
    }

    #[tokio::test]
    async fn test_multi_block_boundary_mismatch_is_not_found() {
        let engine = PathEngine::new(pipeline_graph());
        let file = file_with(vec![TargetPathSpec::new(
            "broken_chain",
            vec![
                vec![PatternStep::node("/driver"), PatternStep::node("/filter")],
                vec![PatternStep::node("/planner"), PatternStep::node("/actuator")],
            ],
        )]);

        let results = engine
            .find_target_paths(&file, &SearchOptions::default())
            .await
            .unwrap();

        assert_eq!(results[0].outcome, TargetOutcome::NotFound);
    }
}
