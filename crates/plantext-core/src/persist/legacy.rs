//! Tolerance for legacy persisted shapes, kept apart from the main mapper.
//!
//! Old documents carried details payloads as bare strings, estimation as a
//! single free-text string, and sometimes tasks with no structure node to
//! declare their type. Everything here exists to absorb those shapes; new
//! writes never produce them.

use serde_json::{Map, Value};

use crate::models::NodeType;

const AREA_KEYS: &[&str] = &["purpose", "goals", "constraints"];
const COMPONENT_KEYS: &[&str] = &["responsibilities", "interfaces", "risks"];
const JOB_KEYS: &[&str] = &[
    "in_scope",
    "out_of_scope",
    "outcome_dod",
    "approach",
    "completed",
];
const FREEFORM_KEYS: &[&str] = &["body"];

/// Infers a node type from which fields a details object carries.
///
/// Only consulted for tasks that have no structure node; a declared type
/// always wins over sniffing. Job markers are checked first since
/// `context_why` is shared between Job and Component payloads.
pub(crate) fn sniff_node_type(map: &Map<String, Value>) -> NodeType {
    let has_any = |keys: &[&str]| keys.iter().any(|key| map.contains_key(*key));
    if has_any(JOB_KEYS) {
        NodeType::Job
    } else if has_any(COMPONENT_KEYS) {
        NodeType::Component
    } else if has_any(AREA_KEYS) {
        NodeType::Area
    } else {
        NodeType::Freeform
    }
}

/// True when a details object fits the given type's shape: every key is a
/// field of that variant (or `custom`). Foreign-type fields would be
/// silently dropped by a straight decode, so they force migration instead.
pub(crate) fn matches_shape(map: &Map<String, Value>, node_type: NodeType) -> bool {
    let own: &[&str] = match node_type {
        NodeType::Area => AREA_KEYS,
        NodeType::Component => COMPONENT_KEYS,
        NodeType::Job => JOB_KEYS,
        NodeType::Freeform => FREEFORM_KEYS,
    };
    let has_context = matches!(node_type, NodeType::Component | NodeType::Job);
    map.keys().all(|key| {
        key == "custom" || (has_context && key == "context_why") || own.contains(&key.as_str())
    })
}

/// Renders an arbitrary JSON payload as migration text. Strings pass
/// through verbatim; anything else becomes pretty-printed JSON.
pub(crate) fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => serde_json::to_string_pretty(other).unwrap_or_default(),
    }
}
