//! Concrete path value types

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A concrete walk through the communication graph
///
/// `node_0 -(topic_0)-> node_1 -(topic_1)-> ... -> node_k`, so
/// `topics.len() == nodes.len() - 1`. Produced by the path search;
/// cycle-free by construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidatePath {
    /// Node names in walk order
    pub nodes: Vec<String>,

    /// Topic names connecting consecutive nodes
    pub topics: Vec<String>,
}

impl CandidatePath {
    pub fn new(nodes: Vec<String>, topics: Vec<String>) -> Self {
        debug_assert_eq!(topics.len() + 1, nodes.len());
        Self { nodes, topics }
    }

    /// Number of edges in the walk
    pub fn hops(&self) -> usize {
        self.topics.len()
    }

    /// Number of nodes in the walk
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn first_node(&self) -> Option<&str> {
        self.nodes.first().map(String::as_str)
    }

    pub fn last_node(&self) -> Option<&str> {
        self.nodes.last().map(String::as_str)
    }

    /// Topic feeding the node at `index`, if any
    pub fn incoming_topic(&self, index: usize) -> Option<&str> {
        if index == 0 {
            None
        } else {
            self.topics.get(index - 1).map(String::as_str)
        }
    }

    /// Topic leaving the node at `index`, if any
    pub fn outgoing_topic(&self, index: usize) -> Option<&str> {
        self.topics.get(index).map(String::as_str)
    }

    /// Whether any node name appears more than once
    pub fn has_repeated_node(&self) -> bool {
        let mut seen = HashSet::new();
        self.nodes.iter().any(|n| !seen.insert(n.as_str()))
    }
}

impl std::fmt::Display for CandidatePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (index, node) in self.nodes.iter().enumerate() {
            if index > 0 {
                write!(f, " -({})-> ", self.topics[index - 1])?;
            }
            write!(f, "{}", node)?;
        }
        Ok(())
    }
}

/// One node entry of a merged path, with its adjacent topics
///
/// At a block junction the subscription side comes from one block and the
/// publication side from the next, so the two halves are kept explicit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathNode {
    /// Node name
    pub name: String,

    /// Topic this node subscribes to within the path, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscribe_topic: Option<String>,

    /// Topic this node publishes within the path, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publish_topic: Option<String>,
}

impl PathNode {
    pub fn new(
        name: impl Into<String>,
        subscribe_topic: Option<String>,
        publish_topic: Option<String>,
    ) -> Self {
        Self {
            name: name.into(),
            subscribe_topic,
            publish_topic,
        }
    }

    /// Splice entry joining two independently searched path segments
    ///
    /// The subscription half comes from the left segment's terminal node,
    /// the publication half from the right segment's initial node. The
    /// caller is responsible for checking that the boundary node names
    /// agree.
    pub fn junction(left: &CandidatePath, right: &CandidatePath) -> Self {
        Self {
            name: left.last_node().unwrap_or_default().to_string(),
            subscribe_topic: left.topics.last().cloned(),
            publish_topic: right.topics.first().cloned(),
        }
    }
}

/// An end-to-end path assembled from one or more matched segments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergedPath {
    pub nodes: Vec<PathNode>,
}

impl MergedPath {
    pub fn new(nodes: Vec<PathNode>) -> Self {
        Self { nodes }
    }

    /// Lift a single-segment path into merged form
    pub fn from_candidate(path: &CandidatePath) -> Self {
        let nodes = path
            .nodes
            .iter()
            .enumerate()
            .map(|(index, name)| {
                PathNode::new(
                    name.clone(),
                    path.incoming_topic(index).map(str::to_string),
                    path.outgoing_topic(index).map(str::to_string),
                )
            })
            .collect();
        Self { nodes }
    }

    /// Node names in path order
    pub fn node_names(&self) -> Vec<&str> {
        self.nodes.iter().map(|n| n.name.as_str()).collect()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

impl std::fmt::Display for MergedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (index, node) in self.nodes.iter().enumerate() {
            if index > 0 {
                match &self.nodes[index - 1].publish_topic {
                    Some(topic) => write!(f, " -({})-> ", topic)?,
                    None => write!(f, " -> ")?,
                }
            }
            write!(f, "{}", node.name)?;
        }
        Ok(())
    }
}

/// A found path, named for the downstream analysis pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedPath {
    pub name: String,
    pub path: MergedPath,
}

impl NamedPath {
    pub fn new(name: impl Into<String>, path: MergedPath) -> Self {
        Self {
            name: name.into(),
            path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_path() -> CandidatePath {
        CandidatePath::new(
            vec!["/a".into(), "/b".into(), "/c".into()],
            vec!["/t1".into(), "/t2".into()],
        )
    }

    #[test]
    fn test_adjacent_topics() {
        let path = sample_path();

        assert_eq!(path.incoming_topic(0), None);
        assert_eq!(path.outgoing_topic(0), Some("/t1"));
        assert_eq!(path.incoming_topic(1), Some("/t1"));
        assert_eq!(path.outgoing_topic(1), Some("/t2"));
        assert_eq!(path.incoming_topic(2), Some("/t2"));
        assert_eq!(path.outgoing_topic(2), None);
    }

    #[test]
    fn test_repeated_node_detection() {
        assert!(!sample_path().has_repeated_node());

        let looped = CandidatePath::new(
            vec!["/a".into(), "/b".into(), "/a".into()],
            vec!["/t1".into(), "/t2".into()],
        );
        assert!(looped.has_repeated_node());
    }

    #[test]
    fn test_display() {
        assert_eq!(sample_path().to_string(), "/a -(/t1)-> /b -(/t2)-> /c");
    }

    #[test]
    fn test_junction_node() {
        let left = sample_path();
        let right = CandidatePath::new(
            vec!["/c".into(), "/d".into()],
            vec!["/t3".into()],
        );

        let junction = PathNode::junction(&left, &right);
        assert_eq!(junction.name, "/c");
        assert_eq!(junction.subscribe_topic.as_deref(), Some("/t2"));
        assert_eq!(junction.publish_topic.as_deref(), Some("/t3"));
    }

    #[test]
    fn test_merged_from_candidate() {
        let merged = MergedPath::from_candidate(&sample_path());

        assert_eq!(merged.node_names(), vec!["/a", "/b", "/c"]);
        assert_eq!(merged.nodes[0].subscribe_topic, None);
        assert_eq!(merged.nodes[0].publish_topic.as_deref(), Some("/t1"));
        assert_eq!(merged.nodes[2].subscribe_topic.as_deref(), Some("/t2"));
        assert_eq!(merged.nodes[2].publish_topic, None);
        assert_eq!(merged.to_string(), "/a -(/t1)-> /b -(/t2)-> /c");
    }
}
