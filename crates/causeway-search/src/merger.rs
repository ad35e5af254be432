//! Splicing of per-block matched paths into one end-to-end path

use crate::error::{SearchError, SearchResult};
use causeway_core::{CandidatePath, MergedPath, PathNode};

/// Splice one matched path per block into a single merged path
///
/// Adjacent blocks share their boundary node: each junction entry takes
/// its subscription side from the left block's terminal node and its
/// publication side from the right block's initial node, so the merged
/// node sequence has exactly one entry per junction. Blocks that do not
/// agree on the boundary node name cannot be spliced.
pub fn merge_blocks(blocks: &[CandidatePath]) -> SearchResult<MergedPath> {
    if blocks.is_empty() {
        return Err(SearchError::Internal("no blocks to merge".to_string()));
    }

    let mut nodes: Vec<PathNode> = Vec::new();
    for (index, block) in blocks.iter().enumerate() {
        let entries = MergedPath::from_candidate(block).nodes;
        let is_first = index == 0;
        let is_last = index == blocks.len() - 1;

        let start = usize::from(!is_first);
        let end = entries.len().saturating_sub(1);
        nodes.extend(entries[start..end].iter().cloned());

        if is_last {
            if let Some(terminal) = entries.last() {
                nodes.push(terminal.clone());
            }
        } else {
            let next = &blocks[index + 1];
            let left_name = block.last_node().unwrap_or_default();
            let right_name = next.first_node().unwrap_or_default();
            if left_name != right_name {
                return Err(SearchError::BoundaryMismatch {
                    left: left_name.to_string(),
                    right: right_name.to_string(),
                });
            }
            nodes.push(PathNode::junction(block, next));
        }
    }

    Ok(MergedPath::new(nodes))
}
