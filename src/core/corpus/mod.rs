use crate::core::fingerprint;
use crate::core::workflow::Workflow;
use serde::{Deserialize, Serialize};
use thiserror::Error;

fn default_artifact() -> String {
    "{}".to_string()
}

fn default_category() -> String {
    "General".to_string()
}

/// One line of the raw corpus as it appears on disk. Absent fields take the
/// corpus conventions: empty instruction, empty artifact, "General", score 0.
#[derive(Debug, Clone, Deserialize)]
pub struct RawExample {
    #[serde(default)]
    pub instruction: String,
    #[serde(default = "default_artifact")]
    pub output: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub score: f64,
}

/// One line of the cleaned corpus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleanedExample {
    pub instruction: String,
    pub output: String,
    pub category: String,
    pub score: f64,
}

/// A decoded example annotated with its structural facts, buffered in its
/// signature bucket between the two passes.
#[derive(Debug, Clone)]
pub struct ParsedExample {
    pub workflow: Workflow,
    pub signature: String,
    pub primary_trigger: String,
    pub node_types: Vec<String>,
    pub category: String,
    pub score: f64,
}

/// Failure while decoding one corpus line. Always recovered: the line is
/// counted and skipped, the run continues.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("invalid record: {0}")]
    Record(#[source] serde_json::Error),

    #[error("invalid artifact JSON: {0}")]
    Artifact(#[source] serde_json::Error),
}

/// Decode one corpus line in two stages: the outer record, then the
/// JSON-encoded artifact it carries. `Ok(None)` means the artifact parsed but
/// has no nodes and the example is unusable.
pub fn parse_record(line: &str) -> Result<Option<ParsedExample>, DecodeError> {
    let raw: RawExample = serde_json::from_str(line).map_err(DecodeError::Record)?;
    let workflow: Workflow = serde_json::from_str(&raw.output).map_err(DecodeError::Artifact)?;

    if workflow.nodes.is_empty() {
        return Ok(None);
    }

    let signature = fingerprint::signature(&workflow);
    let primary_trigger = fingerprint::primary_trigger(&workflow.nodes);
    let node_types = fingerprint::node_type_list(&workflow.nodes);

    Ok(Some(ParsedExample {
        workflow,
        signature,
        primary_trigger,
        node_types,
        category: raw.category,
        score: raw.score,
    }))
}
