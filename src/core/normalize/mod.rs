//! The three corpus transforms: platform-name correction, lossy artifact
//! projection, and instruction synthesis.

use crate::core::fingerprint;
use crate::core::workflow::{value_is_present, Workflow, WorkflowNode};
use regex::Regex;
use serde_json::Map;
use tracing::debug;

/// Ordered platform enumeration. Order fixes which mismatch is rewritten
/// first when a name mentions several platforms.
pub const PLATFORMS: &[(&str, &str)] = &[
    ("telegram", "Telegram"),
    ("slack", "Slack"),
    ("discord", "Discord"),
    ("whatsapp", "WhatsApp"),
    ("microsoft", "Teams"),
];

const DEFAULT_NAME: &str = "Unnamed";

/// Name used for correction and instruction synthesis when the artifact
/// carries none.
pub fn effective_name(workflow: &Workflow) -> &str {
    if workflow.name.is_empty() {
        DEFAULT_NAME
    } else {
        &workflow.name
    }
}

/// Canonical display label for a platform key, if the key is known.
pub fn platform_label(key: &str) -> Option<&'static str> {
    PLATFORMS
        .iter()
        .find(|(known, _)| *known == key)
        .map(|(_, label)| *label)
}

/// Rewrite a workflow name whose platform wording contradicts the actual
/// trigger platform, after stripping a trailing `_v<digits>` suffix.
///
/// Every correction is whole-word and case-insensitive. A regex that fails to
/// build never aborts the run: the affected rewrite is skipped.
pub fn fix_workflow_name(original_name: &str, primary_trigger: &str) -> String {
    let mut name = strip_version_suffix(original_name);

    for (key, label) in PLATFORMS {
        if *key == primary_trigger {
            continue;
        }
        let word = match Regex::new(&format!(r"(?i)\b{}\b", regex::escape(label))) {
            Ok(word) => word,
            Err(err) => {
                debug!(label = *label, error = %err, "skipping unbuildable platform pattern");
                continue;
            }
        };
        if !word.is_match(&name) {
            continue;
        }
        match platform_label(primary_trigger) {
            Some(actual) => name = word.replace_all(&name, actual).into_owned(),
            None => debug!(
                label = *label,
                trigger = primary_trigger,
                "platform mention left uncorrected; trigger is not in the platform table"
            ),
        }
    }

    name
}

fn strip_version_suffix(name: &str) -> String {
    match Regex::new(r"_v\d+$") {
        Ok(suffix) => suffix.replace(name, "").into_owned(),
        Err(_) => name.to_string(),
    }
}

/// Lossy projection keeping only the fields that matter for training: name,
/// reduced nodes, connections verbatim, and a non-empty description.
pub fn compact_workflow(workflow: &Workflow) -> Workflow {
    let nodes = workflow.nodes.iter().map(compact_node).collect();

    let mut extra = Map::new();
    if let Some(description) = workflow.extra.get("description") {
        if value_is_present(description) {
            extra.insert("description".to_string(), description.clone());
        }
    }

    Workflow {
        name: workflow.name.clone(),
        nodes,
        connections: workflow.connections.clone(),
        extra,
    }
}

fn compact_node(node: &WorkflowNode) -> WorkflowNode {
    WorkflowNode {
        id: node.id.clone(),
        name: node.name.clone(),
        node_type: node.node_type.clone(),
        position: node.position.clone(),
        parameters: node.parameters.clone(),
        credentials: node.credentials.clone().filter(value_is_present),
        type_version: node.type_version.clone().filter(value_is_present),
        extra: Map::new(),
    }
}

/// Rebuild the instruction sentence from the current name and node facts.
pub fn rebuild_instruction(
    name: &str,
    category: &str,
    node_types: &[String],
    max_listed: usize,
) -> String {
    format!(
        "Create a workflow for: {} (Category: {}) using {}",
        name,
        category,
        fingerprint::render_type_list(node_types, max_listed)
    )
}
