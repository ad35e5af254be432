//! Node/topic ignore filters

use crate::error::{SearchError, SearchResult};
use causeway_core::Communication;
use regex::Regex;

/// Default topic ignore patterns (transform frames, diagnostics)
const DEFAULT_IGNORE_TOPICS: &[&str] = &["/tf", "/tf_static", "/diagnostics"];

/// Default node ignore patterns (tooling/launcher nodes)
const DEFAULT_IGNORE_NODES: &[&str] = &["/_ros2cli_/*", "/launch_ros_*"];

/// Compiled ignore predicate sets for pruning the graph during search
///
/// An explicit value passed into every search call; there is no global
/// filter state. Patterns use search semantics: a name is ignored when any
/// pattern matches anywhere in it.
#[derive(Debug, Clone)]
pub struct IgnoreFilters {
    topics: Vec<Regex>,
    nodes: Vec<Regex>,
}

impl IgnoreFilters {
    /// Filters with the default ignore patterns
    pub fn defaults() -> Self {
        // Safe: the default patterns are known-good literals
        Self {
            topics: DEFAULT_IGNORE_TOPICS
                .iter()
                .map(|p| Regex::new(p).expect("default topic pattern is valid"))
                .collect(),
            nodes: DEFAULT_IGNORE_NODES
                .iter()
                .map(|p| Regex::new(p).expect("default node pattern is valid"))
                .collect(),
        }
    }

    /// Filters from per-file override lists; `None` keeps the default set
    pub fn from_lists(
        ignore_topics: Option<&[String]>,
        ignore_nodes: Option<&[String]>,
    ) -> SearchResult<Self> {
        let defaults = Self::defaults();
        let topics = match ignore_topics {
            Some(list) => compile_all(list.iter().cloned())?,
            None => defaults.topics,
        };
        let nodes = match ignore_nodes {
            Some(list) => compile_all(list.iter().cloned())?,
            None => defaults.nodes,
        };
        Ok(Self { topics, nodes })
    }

    /// Filters that ignore nothing
    pub fn none() -> Self {
        Self {
            topics: Vec::new(),
            nodes: Vec::new(),
        }
    }

    /// Whether a topic name passes (is not ignored)
    pub fn passes_topic(&self, topic_name: &str) -> bool {
        !self.topics.iter().any(|re| re.is_match(topic_name))
    }

    /// Whether a node name passes (is not ignored)
    pub fn passes_node(&self, node_name: &str) -> bool {
        !self.nodes.iter().any(|re| re.is_match(node_name))
    }

    /// Whether an edge may be followed during search
    ///
    /// Checks the topic and the subscriber endpoint; the publisher side is
    /// checked when that node is entered.
    pub fn passes_edge(&self, comm: &Communication) -> bool {
        self.passes_topic(&comm.topic_name) && self.passes_node(&comm.subscriber)
    }
}

impl Default for IgnoreFilters {
    fn default() -> Self {
        Self::defaults()
    }
}

fn compile_all(patterns: impl Iterator<Item = String>) -> SearchResult<Vec<Regex>> {
    patterns
        .map(|pattern| {
            Regex::new(&pattern).map_err(|source| SearchError::Pattern { pattern, source })
        })
        .collect()
}
