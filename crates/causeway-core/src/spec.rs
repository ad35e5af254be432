//! Target-path specification types

use crate::error::{Error, Result};
use serde::de::Error as _;
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// One step of a target-path specification
///
/// `node_pattern` is matched against a node name with anchored full-match
/// semantics. `topic_pattern`, when present, constrains the topic adjacent
/// to that step (incoming and/or outgoing depending on position).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternStep {
    pub node_pattern: String,
    pub topic_pattern: Option<String>,
}

impl PatternStep {
    /// Step matching a node only
    pub fn node(node_pattern: impl Into<String>) -> Self {
        Self {
            node_pattern: node_pattern.into(),
            topic_pattern: None,
        }
    }

    /// Step matching a node and an adjacent topic
    pub fn with_topic(node_pattern: impl Into<String>, topic_pattern: impl Into<String>) -> Self {
        Self {
            node_pattern: node_pattern.into(),
            topic_pattern: Some(topic_pattern.into()),
        }
    }
}

// A step is authored either as a bare node string or a [node, topic] pair.
impl<'de> Deserialize<'de> for PatternStep {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Bare(String),
            Pair(Vec<String>),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Bare(node) => Ok(PatternStep::node(node)),
            Repr::Pair(items) => match items.as_slice() {
                [node, topic] => Ok(PatternStep::with_topic(node.clone(), topic.clone())),
                other => Err(D::Error::custom(format!(
                    "pattern step must be a node name or a [node, topic] pair, got {} element(s)",
                    other.len()
                ))),
            },
        }
    }
}

impl Serialize for PatternStep {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match &self.topic_pattern {
            None => serializer.serialize_str(&self.node_pattern),
            Some(topic) => {
                let mut seq = serializer.serialize_seq(Some(2))?;
                seq.serialize_element(&self.node_pattern)?;
                seq.serialize_element(topic)?;
                seq.end()
            }
        }
    }
}

/// A named target path: one or more ordered blocks of pattern steps
///
/// The JSON `path` field is either a flat step list (one block) or a list
/// of step lists. A path whose elements are all arrays is read as blocks;
/// chained blocks are used when a direct single-segment search would be
/// too expensive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetPathSpec {
    /// Name given to the found path(s)
    pub name: String,

    /// Ordered blocks, each an ordered step list
    #[serde(rename = "path", with = "path_field")]
    pub blocks: Vec<Vec<PatternStep>>,
}

mod path_field {
    use super::*;

    pub fn deserialize<'de, D>(
        deserializer: D,
    ) -> std::result::Result<Vec<Vec<PatternStep>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Blocks(Vec<Vec<PatternStep>>),
            Flat(Vec<PatternStep>),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Blocks(blocks) => Ok(blocks),
            Repr::Flat(steps) => Ok(vec![steps]),
        }
    }

    pub fn serialize<S>(
        blocks: &Vec<Vec<PatternStep>>,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if blocks.len() == 1 {
            blocks[0].serialize(serializer)
        } else {
            blocks.serialize(serializer)
        }
    }
}

impl TargetPathSpec {
    /// Multi-block target path
    pub fn new(name: impl Into<String>, blocks: Vec<Vec<PatternStep>>) -> Self {
        Self {
            name: name.into(),
            blocks,
        }
    }

    /// Single-block target path
    pub fn single_block(name: impl Into<String>, steps: Vec<PatternStep>) -> Self {
        Self::new(name, vec![steps])
    }

    /// Check the shape of this specification
    ///
    /// A search anchors on each block's first and last step, so every block
    /// needs at least two steps.
    pub fn validate(&self) -> Result<()> {
        if self.blocks.is_empty() || self.blocks.iter().any(|b| b.is_empty()) {
            return Err(Error::EmptyPath(self.name.clone()));
        }
        for block in &self.blocks {
            if block.len() < 2 {
                return Err(Error::ShortBlock {
                    target: self.name.clone(),
                    steps: block.len(),
                });
            }
            crate::limits::validate_step_count(block.len())?;
        }
        Ok(())
    }
}

/// The user-authored target-path document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TargetPathFile {
    /// Named target paths to search for
    pub target_path_list: Vec<TargetPathSpec>,

    /// Override for the default topic ignore patterns
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ignore_topic_list: Option<Vec<String>>,

    /// Override for the default node ignore patterns
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ignore_node_list: Option<Vec<String>>,
}

impl TargetPathFile {
    /// Parse and shape-check a target-path document
    pub fn from_json(json: &str) -> Result<Self> {
        let file: TargetPathFile = serde_json::from_str(json)?;
        file.validate()?;
        Ok(file)
    }

    /// Check every contained target specification
    pub fn validate(&self) -> Result<()> {
        for target in &self.target_path_list {
            target.validate()?;
        }
        Ok(())
    }
}
