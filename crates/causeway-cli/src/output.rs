//! Output formatting utilities

use causeway_core::NamedPath;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}

impl From<&str> for OutputFormat {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Table,
        }
    }
}

/// Document written for the downstream analysis pipeline
#[derive(Debug, Clone, Serialize)]
pub struct ResultDocument {
    pub generated_at: DateTime<Utc>,
    pub paths: Vec<NamedPath>,
}

impl ResultDocument {
    pub fn new(paths: Vec<NamedPath>) -> Self {
        Self {
            generated_at: Utc::now(),
            paths,
        }
    }
}

/// Serialize as pretty JSON
pub fn to_json<T: Serialize>(data: &T) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(data)?)
}

/// Print found paths as one line per path
pub fn print_paths(paths: &[NamedPath]) {
    for named in paths {
        println!("{}: {}", named.name, named.path);
    }
}
