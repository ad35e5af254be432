//! Causeway Search - path search engine for publish/subscribe graphs
//!
//! Enumerates concrete paths through a communication graph that satisfy a
//! declarative node/topic pattern specification, under a depth budget and
//! a wall-clock timeout, splicing multi-block specifications into single
//! end-to-end paths.

pub mod dfs;
pub mod engine;
pub mod error;
pub mod escalation;
pub mod filters;
pub mod matcher;
pub mod merger;
pub mod supervisor;

pub use dfs::enumerate_paths;
pub use engine::{PathEngine, SearchOptions, TargetOutcome, TargetResult};
pub use error::{SearchError, SearchResult};
pub use escalation::{search_with_budget, SearchOutcome};
pub use filters::IgnoreFilters;
pub use matcher::{CompiledBlock, CompiledStep};
pub use merger::merge_blocks;
pub use supervisor::run_with_deadline;
