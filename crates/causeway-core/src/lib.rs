//! Causeway Core - data model for publish/subscribe path discovery
//!
//! This crate provides the communication graph, target-path specification
//! and concrete path value types shared by the Causeway tools.

pub mod comm;
pub mod error;
pub mod graph;
pub mod limits;
pub mod path;
pub mod spec;

pub use comm::Communication;
pub use error::{Error, Result};
pub use graph::{ArchDescription, CommGraph};
pub use path::{CandidatePath, MergedPath, NamedPath, PathNode};
pub use spec::{PatternStep, TargetPathFile, TargetPathSpec};
