//! Pattern matching of candidate paths against a specification block

use crate::error::{SearchError, SearchResult};
use causeway_core::{CandidatePath, PatternStep};
use regex::Regex;

/// Compile a pattern with anchored full-match semantics
///
/// `/foo` must not match `/foobar`; a literal name degenerates to equality
/// through the same code path.
pub fn full_match_regex(pattern: &str) -> SearchResult<Regex> {
    Regex::new(&format!("^(?:{})$", pattern)).map_err(|source| SearchError::Pattern {
        pattern: pattern.to_string(),
        source,
    })
}

/// A pattern step with its regexes compiled
#[derive(Debug, Clone)]
pub struct CompiledStep {
    node: Regex,
    topic: Option<Regex>,
}

impl CompiledStep {
    pub fn compile(step: &PatternStep) -> SearchResult<Self> {
        Ok(Self {
            node: full_match_regex(&step.node_pattern)?,
            topic: step
                .topic_pattern
                .as_deref()
                .map(full_match_regex)
                .transpose()?,
        })
    }

    /// Whether a node name fully matches this step's node pattern
    pub fn node_matches(&self, node_name: &str) -> bool {
        self.node.is_match(node_name)
    }

    fn topic_matches(&self, topic_name: &str) -> bool {
        match &self.topic {
            Some(re) => re.is_match(topic_name),
            None => true,
        }
    }
}

/// One specification block compiled for matching
#[derive(Debug, Clone)]
pub struct CompiledBlock {
    steps: Vec<CompiledStep>,
}

impl CompiledBlock {
    /// Compile every step of a block; any bad regex is a configuration
    /// error surfaced before searching starts
    pub fn compile(steps: &[PatternStep]) -> SearchResult<Self> {
        Ok(Self {
            steps: steps
                .iter()
                .map(CompiledStep::compile)
                .collect::<SearchResult<Vec<_>>>()?,
        })
    }

    pub fn steps(&self) -> &[CompiledStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn first_step(&self) -> Option<&CompiledStep> {
        self.steps.first()
    }

    pub fn last_step(&self) -> Option<&CompiledStep> {
        self.steps.last()
    }

    /// Whether a candidate path satisfies this block element-for-element
    ///
    /// The node at each position must fully match that step's node pattern.
    /// A step with a topic pattern passes when the topic feeding the node
    /// or the topic leaving it fully matches; with neither matching the
    /// whole candidate is rejected.
    pub fn matches(&self, path: &CandidatePath) -> bool {
        if self.steps.len() != path.node_count() {
            return false;
        }

        for (index, step) in self.steps.iter().enumerate() {
            if !step.node_matches(&path.nodes[index]) {
                return false;
            }
            if step.topic.is_some() {
                let incoming = path
                    .incoming_topic(index)
                    .map(|t| step.topic_matches(t))
                    .unwrap_or(false);
                let outgoing = path
                    .outgoing_topic(index)
                    .map(|t| step.topic_matches(t))
                    .unwrap_or(false);
                if !incoming && !outgoing {
                    return false;
                }
            }
        }
        true
    }
}
