use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

fn default_position() -> Value {
    Value::Array(vec![Value::from(0), Value::from(0)])
}

/// An automation-workflow artifact as found in the corpus.
///
/// Only the fields the pipeline reasons about are typed. Everything else the
/// document carries lands in `extra` so a passthrough run re-serializes it
/// intact; the lossy projection drops `extra` on purpose.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Workflow {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub nodes: Vec<WorkflowNode>,
    #[serde(default)]
    pub connections: Map<String, Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One node of a workflow document. The dotted `type` string is the
/// structural identity; its last dot-separated segment is the base type.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WorkflowNode {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub node_type: String,
    #[serde(default = "default_position")]
    pub position: Value,
    #[serde(default)]
    pub parameters: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credentials: Option<Value>,
    #[serde(rename = "typeVersion", default, skip_serializing_if = "Option::is_none")]
    pub type_version: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Whether an optional artifact field counts as present for projection.
/// Null, empty strings/arrays/objects, zero, and false all read as absent.
pub fn value_is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}
