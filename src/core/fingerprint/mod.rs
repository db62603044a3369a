//! Pure structural facts derived from a workflow's node sequence. Everything
//! here runs before any mutation of node data.

use crate::core::workflow::{Workflow, WorkflowNode};

/// Sentinel returned when no node looks like a trigger.
pub const UNKNOWN_TRIGGER: &str = "unknown";

/// Structural deduplication key: every node's full type string, sorted and
/// joined with `-`, then `:` and the connection-entry count. Stable under
/// node-order permutation; a missing type contributes an empty string.
pub fn signature(workflow: &Workflow) -> String {
    let mut types: Vec<&str> = workflow
        .nodes
        .iter()
        .map(|node| node.node_type.as_str())
        .collect();
    types.sort_unstable();
    format!("{}:{}", types.join("-"), workflow.connections.len())
}

/// Platform key of the first trigger node in document order: the base type
/// with its trailing "Trigger"/"trigger" suffix stripped, lower-cased.
pub fn primary_trigger(nodes: &[WorkflowNode]) -> String {
    for node in nodes {
        if node.node_type.contains("Trigger") || node.node_type.contains("trigger") {
            let base = base_type(&node.node_type);
            let base = base
                .strip_suffix("Trigger")
                .or_else(|| base.strip_suffix("trigger"))
                .unwrap_or(base);
            return base.to_lowercase();
        }
    }
    UNKNOWN_TRIGGER.to_string()
}

/// Base type of every node, de-duplicated preserving first appearance.
/// Empty types are skipped.
pub fn node_type_list(nodes: &[WorkflowNode]) -> Vec<String> {
    let mut types: Vec<String> = Vec::new();
    for node in nodes {
        let base = base_type(&node.node_type);
        if !base.is_empty() && !types.iter().any(|seen| seen.as_str() == base) {
            types.push(base.to_string());
        }
    }
    types
}

/// Comma-joined rendering of a type list, capped at `max_listed` entries with
/// an overflow suffix.
pub fn render_type_list(types: &[String], max_listed: usize) -> String {
    let shown = types
        .iter()
        .take(max_listed)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    if types.len() > max_listed {
        format!("{} (+{} more)", shown, types.len() - max_listed)
    } else {
        shown
    }
}

fn base_type(node_type: &str) -> &str {
    node_type.rsplit('.').next().unwrap_or_default()
}
