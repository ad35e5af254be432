//! Communication graph built from an architecture description

use crate::comm::Communication;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Architecture description as authored/exported by the surrounding system
///
/// The JSON shape is `{ "nodes": [...], "communications": [...] }` where
/// nodes are bare name strings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArchDescription {
    /// Node names, e.g. `/planning/behavior`
    pub nodes: Vec<String>,

    /// Directed publisher -> topic -> subscriber edges
    pub communications: Vec<Communication>,
}

impl ArchDescription {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_nodes(mut self, nodes: Vec<String>) -> Self {
        self.nodes = nodes;
        self
    }

    pub fn with_communications(mut self, communications: Vec<Communication>) -> Self {
        self.communications = communications;
        self
    }
}

/// In-memory publish/subscribe graph
///
/// Built once from an [`ArchDescription`] and read-only afterwards. Edge
/// order is preserved from the description, which keeps traversal results
/// deterministic.
#[derive(Debug, Clone)]
pub struct CommGraph {
    nodes: Vec<String>,
    comms: Vec<Communication>,
    /// Outgoing edge indexes per node, in description order
    out_edges: HashMap<String, Vec<usize>>,
    /// Incoming edge indexes per node, in description order
    in_edges: HashMap<String, Vec<usize>>,
}

impl CommGraph {
    /// Build a graph from an architecture description
    ///
    /// Rejects duplicate node names and communications that reference a
    /// node missing from the node list.
    pub fn from_description(desc: ArchDescription) -> Result<Self> {
        let mut out_edges: HashMap<String, Vec<usize>> = HashMap::new();
        let mut in_edges: HashMap<String, Vec<usize>> = HashMap::new();

        for node in &desc.nodes {
            if out_edges.contains_key(node) {
                return Err(Error::DuplicateNode(node.clone()));
            }
            out_edges.insert(node.clone(), Vec::new());
            in_edges.insert(node.clone(), Vec::new());
        }

        for (index, comm) in desc.communications.iter().enumerate() {
            let outgoing = out_edges.get_mut(&comm.publisher).ok_or_else(|| {
                Error::DanglingNodeRef {
                    topic: comm.topic_name.clone(),
                    node: comm.publisher.clone(),
                }
            })?;
            outgoing.push(index);

            let incoming = in_edges.get_mut(&comm.subscriber).ok_or_else(|| {
                Error::DanglingNodeRef {
                    topic: comm.topic_name.clone(),
                    node: comm.subscriber.clone(),
                }
            })?;
            incoming.push(index);
        }

        Ok(Self {
            nodes: desc.nodes,
            comms: desc.communications,
            out_edges,
            in_edges,
        })
    }

    /// All node names, in description order
    pub fn nodes(&self) -> &[String] {
        &self.nodes
    }

    /// All communication edges, in description order
    pub fn communications(&self) -> &[Communication] {
        &self.comms
    }

    /// Whether a node with this exact name exists
    pub fn contains_node(&self, name: &str) -> bool {
        self.out_edges.contains_key(name)
    }

    /// Edges published by `node`, in description order
    pub fn edges_from<'a>(&'a self, node: &str) -> impl Iterator<Item = &'a Communication> {
        self.out_edges
            .get(node)
            .into_iter()
            .flatten()
            .map(move |&i| &self.comms[i])
    }

    /// Edges subscribed to by `node`, in description order
    pub fn edges_to<'a>(&'a self, node: &str) -> impl Iterator<Item = &'a Communication> {
        self.in_edges
            .get(node)
            .into_iter()
            .flatten()
            .map(move |&i| &self.comms[i])
    }

    /// Distinct topic names, sorted
    pub fn topic_names(&self) -> Vec<String> {
        let mut topics: Vec<String> = self.comms.iter().map(|c| c.topic_name.clone()).collect();
        topics.sort();
        topics.dedup();
        topics
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn comm_count(&self) -> usize {
        self.comms.len()
    }
}
