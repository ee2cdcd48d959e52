//! Persisted-document schema and the project <-> document mapping.
//!
//! One project persists as one JSON document:
//!
//! ```text
//! Project  --project_to_document-->  Document  --serde_json-->  bytes
//! Project  <--document_to_project--  Document  <--serde_json--  bytes
//! ```
//!
//! Absent optional fields signal absence; empty strings, lists and maps
//! are omitted on write and defaulted on read, so documents stay minimal
//! and old documents missing newer fields decode unchanged.
//!
//! Loading never fails: every byte-level or shape-level problem degrades
//! to a usable project plus a [`Notice`]. Shape-level legacy tolerance
//! (string details, string estimation, typeless tasks) lives in
//! [`legacy`].

mod legacy;

use std::collections::BTreeMap;

use log::{info, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;
use crate::models::{
    CustomFields, Details, Estimation, NodeType, Project, ProjectInfo, Session, StructureNode,
    StructureTree, Task,
};
use crate::store::ByteStore;

/// Marker line prepended to project notes when stored bytes cannot be
/// decoded as a document. The original bytes follow verbatim.
pub const RECOVERY_MARKER: &str = "RECOVERED CONTENT (unparseable):";

/// Marker line prepended to task notes when a details payload had to be
/// migrated out of a shape the decoder no longer accepts.
pub const MIGRATED_DETAILS_MARKER: &str = "Migrated details:";

/// Persisted form of one project.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Document {
    /// Project identity
    #[serde(default)]
    pub project_info: ProjectInfo,

    /// Structure tree as nested maps keyed by node id
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub structure: BTreeMap<String, NodeDoc>,

    /// Tasks keyed by node id
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub task_list: BTreeMap<String, TaskDoc>,

    /// Ordered time log
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub time_log: Vec<Session>,

    /// Project-level tags
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    /// Project-level notes
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub notes: String,
}

/// One structure node in persisted form.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct NodeDoc {
    #[serde(rename = "type", default)]
    pub node_type: NodeType,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub subtasks: BTreeMap<String, NodeDoc>,
}

/// One task in persisted form.
///
/// `details` and `estimation` stay raw [`Value`]s here: their decoded shape
/// depends on the node's type and on legacy tolerance, which only the
/// mapper can resolve.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TaskDoc {
    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimation: Option<Value>,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub notes: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    #[serde(default, skip_serializing_if = "CustomFields::is_empty")]
    pub custom: CustomFields,
}

/// Severity of a load notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
}

/// A non-fatal note produced while loading a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub severity: Severity,
    pub message: String,
}

impl Notice {
    fn info(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            message: message.into(),
        }
    }

    fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
        }
    }
}

/// Result of loading a project: always a usable project, plus any notices
/// describing degradation along the way.
#[derive(Debug, Clone)]
pub struct Loaded {
    pub project: Project,
    pub notices: Vec<Notice>,
}

/// Project persistence over any [`ByteStore`].
pub struct ProjectStore<S: ByteStore> {
    store: S,
}

impl<S: ByteStore> ProjectStore<S> {
    /// Wraps a byte store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Loads a project by name. Never fails: missing, empty, unreadable or
    /// undecodable content each degrade to a fresh or recovered project
    /// with a notice.
    pub fn load(&self, name: &str) -> Loaded {
        if !self.store.exists(name) {
            info!("no saved project '{name}', starting fresh");
            return Loaded {
                project: Project::named(name),
                notices: vec![Notice::info(format!(
                    "no saved project '{name}', starting fresh"
                ))],
            };
        }

        let bytes = match self.store.read(name) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("project '{name}' could not be read: {e}");
                return Loaded {
                    project: Project::named(name),
                    notices: vec![Notice::warning(format!(
                        "project '{name}' could not be read ({e}), starting fresh"
                    ))],
                };
            }
        };

        let text = String::from_utf8_lossy(&bytes);
        if text.trim().is_empty() {
            info!("project '{name}' is empty, starting fresh");
            return Loaded {
                project: Project::named(name),
                notices: vec![Notice::info(format!(
                    "project '{name}' is empty, starting fresh"
                ))],
            };
        }

        match serde_json::from_str::<Document>(&text) {
            Ok(document) => {
                let project = document_to_project(document, name);
                info!(
                    "loaded project '{name}' ({} tasks, {} sessions)",
                    project.task_list.len(),
                    project.time_log.len()
                );
                Loaded {
                    project,
                    notices: Vec::new(),
                }
            }
            Err(e) => {
                warn!("project '{name}' could not be decoded: {e}");
                let mut project = Project::named(name);
                project.notes = format!("{RECOVERY_MARKER}\n\n{text}");
                Loaded {
                    project,
                    notices: vec![Notice::warning(format!(
                        "project '{name}' could not be decoded ({e}); \
                         original content preserved in project notes"
                    ))],
                }
            }
        }
    }

    /// Saves a project under its own name, replacing any previous document
    /// wholesale.
    pub fn save(&mut self, project: &Project) -> Result<()> {
        let document = project_to_document(project)?;
        let bytes = serde_json::to_vec_pretty(&document)?;
        self.store.write(&project.info.name, &bytes)?;
        info!("saved project '{}'", project.info.name);
        Ok(())
    }

    /// Lists the names of all stored projects.
    pub fn list(&self) -> Result<Vec<String>> {
        self.store.list()
    }

    /// The underlying byte store, for hosts that need direct access.
    pub fn store(&self) -> &S {
        &self.store
    }
}

/// Maps a project to its persisted document. Empty optional content is
/// omitted so the document stays minimal.
pub fn project_to_document(project: &Project) -> Result<Document> {
    let mut task_list = BTreeMap::new();
    for (id, task) in &project.task_list {
        task_list.insert(id.clone(), task_to_doc(task)?);
    }
    Ok(Document {
        project_info: project.info.clone(),
        structure: nodes_to_docs(&project.structure.roots),
        task_list,
        time_log: project.time_log.clone(),
        tags: project.tags.iter().cloned().collect(),
        notes: project.notes.clone(),
    })
}

fn task_to_doc(task: &Task) -> Result<TaskDoc> {
    let details = if task.details == Details::empty_for(task.details.node_type()) {
        None
    } else {
        Some(details_to_value(&task.details)?)
    };
    let estimation = match &task.estimation {
        Some(estimation) => Some(serde_json::to_value(estimation)?),
        None => None,
    };
    Ok(TaskDoc {
        name: task.name.clone(),
        details,
        estimation,
        notes: task.notes.clone(),
        tags: task.tags.iter().cloned().collect(),
        custom: task.custom.clone(),
    })
}

fn details_to_value(details: &Details) -> Result<Value> {
    let value = match details {
        Details::Area(d) => serde_json::to_value(d)?,
        Details::Component(d) => serde_json::to_value(d)?,
        Details::Job(d) => serde_json::to_value(d)?,
        Details::Freeform(d) => serde_json::to_value(d)?,
    };
    Ok(value)
}

fn nodes_to_docs(nodes: &BTreeMap<String, StructureNode>) -> BTreeMap<String, NodeDoc> {
    nodes
        .iter()
        .map(|(id, node)| {
            (
                id.clone(),
                NodeDoc {
                    node_type: node.node_type,
                    subtasks: nodes_to_docs(&node.children),
                },
            )
        })
        .collect()
}

/// Maps a persisted document to a project, applying legacy migrations.
/// Cannot fail: every tolerated legacy shape degrades into notes.
pub fn document_to_project(document: Document, name: &str) -> Project {
    let mut info = document.project_info;
    if info.name.is_empty() {
        info.name = name.to_string();
    }
    if info.id.is_empty() {
        info.id = info.name.clone();
    }

    let mut structure = StructureTree::new();
    insert_nodes(&mut structure, &document.structure);

    let mut task_list = BTreeMap::new();
    for (id, doc) in document.task_list {
        let node_type = structure
            .node_type(&id)
            .unwrap_or_else(|| sniffed_type(&doc));
        task_list.insert(id.clone(), doc_to_task(id, doc, node_type));
    }

    Project {
        info,
        structure,
        task_list,
        time_log: document.time_log,
        tags: document.tags.into_iter().collect(),
        notes: document.notes,
    }
}

fn insert_nodes(tree: &mut StructureTree, docs: &BTreeMap<String, NodeDoc>) {
    // Parents always precede their children because nesting carries the
    // hierarchy; sibling order within a level does not matter here.
    for (id, doc) in docs {
        tree.insert(StructureNode::new(id.clone(), doc.node_type));
        insert_nodes(tree, &doc.subtasks);
    }
}

/// Type for a task with no structure node: sniffed from the details shape
/// when there is an object to sniff, Freeform otherwise.
fn sniffed_type(doc: &TaskDoc) -> NodeType {
    match &doc.details {
        Some(Value::Object(map)) => legacy::sniff_node_type(map),
        _ => NodeType::Freeform,
    }
}

fn doc_to_task(id: String, doc: TaskDoc, node_type: NodeType) -> Task {
    let mut task = Task::new(id, doc.name, node_type);
    task.notes = doc.notes;
    task.tags = doc.tags.into_iter().collect();
    task.custom = doc.custom;

    // Details first, then estimation, so migrated fragments land in notes
    // in that order.
    if let Some(value) = doc.details {
        match decode_details(&value, node_type) {
            Some(details) => task.details = details,
            None => {
                warn!(
                    "task '{}' has a legacy details payload, migrating to notes",
                    task.id
                );
                task.append_notes(&format!(
                    "{MIGRATED_DETAILS_MARKER}\n{}",
                    legacy::render_value(&value)
                ));
            }
        }
    }

    if let Some(value) = doc.estimation {
        match decode_estimation(&value) {
            Some(estimation) => task.estimation = Some(estimation),
            None => {
                warn!(
                    "task '{}' has a legacy estimation payload, migrating to notes",
                    task.id
                );
                task.append_notes(&legacy::render_value(&value));
            }
        }
    }

    task
}

fn decode_details(value: &Value, node_type: NodeType) -> Option<Details> {
    let map = match value {
        Value::Object(map) => map,
        _ => return None,
    };
    if !legacy::matches_shape(map, node_type) {
        return None;
    }
    let value = value.clone();
    let details = match node_type {
        NodeType::Area => Details::Area(serde_json::from_value(value).ok()?),
        NodeType::Component => Details::Component(serde_json::from_value(value).ok()?),
        NodeType::Job => Details::Job(serde_json::from_value(value).ok()?),
        NodeType::Freeform => Details::Freeform(serde_json::from_value(value).ok()?),
    };
    Some(details)
}

fn decode_estimation(value: &Value) -> Option<Estimation> {
    match value {
        Value::Object(_) => serde_json::from_value(value.clone()).ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::JobDetails;
    use crate::store::MemStore;
    use serde_json::json;

    fn store_with(name: &str, content: &str) -> ProjectStore<MemStore> {
        let mut mem = MemStore::new();
        mem.seed(name, content.as_bytes().to_vec());
        ProjectStore::new(mem)
    }

    #[test]
    fn missing_project_loads_fresh_with_info_notice() {
        let store = ProjectStore::new(MemStore::new());
        let loaded = store.load("demo");
        assert_eq!(loaded.project.info.name, "demo");
        assert!(loaded.project.task_list.is_empty());
        assert_eq!(loaded.notices.len(), 1);
        assert_eq!(loaded.notices[0].severity, Severity::Info);
    }

    #[test]
    fn empty_entry_loads_fresh_with_info_notice() {
        let store = store_with("demo", "  \n");
        let loaded = store.load("demo");
        assert!(loaded.project.task_list.is_empty());
        assert_eq!(loaded.notices[0].severity, Severity::Info);
    }

    #[test]
    fn undecodable_bytes_are_preserved_in_notes() {
        let store = store_with("demo", "{ not json");
        let loaded = store.load("demo");
        assert_eq!(loaded.notices[0].severity, Severity::Warning);
        assert_eq!(
            loaded.project.notes,
            format!("{RECOVERY_MARKER}\n\n{{ not json")
        );
    }

    #[test]
    fn save_then_load_round_trips_a_project() {
        let mut store = ProjectStore::new(MemStore::new());
        let mut project = Project::named("demo");
        crate::codec::apply_structure_text(
            &mut project,
            "1 Area: Auth\n  1.1 Job: Login\n",
        );
        project.task_list.get_mut("1.1").unwrap().notes = "notes".to_string();
        store.save(&project).unwrap();

        let loaded = store.load("demo");
        assert!(loaded.notices.is_empty());
        assert_eq!(loaded.project, project);
    }

    #[test]
    fn empty_optionals_are_omitted_from_the_document() {
        let mut project = Project::named("demo");
        crate::codec::apply_structure_text(&mut project, "1 Job: Login\n");
        let document = project_to_document(&project).unwrap();
        let value = serde_json::to_value(&document).unwrap();
        let task = &value["task_list"]["1"];
        assert_eq!(task.get("details"), None);
        assert_eq!(task.get("estimation"), None);
        assert_eq!(task.get("notes"), None);
        assert_eq!(value.get("time_log"), None);
        assert_eq!(value.get("notes"), None);
    }

    #[test]
    fn legacy_string_estimation_migrates_to_notes() {
        let document: Document = serde_json::from_value(json!({
            "project_info": {"id": "p", "name": "p"},
            "structure": {"1": {"type": "job"}},
            "task_list": {"1": {"name": "Login", "estimation": "2h"}}
        }))
        .unwrap();
        let project = document_to_project(document, "p");
        let task = &project.task_list["1"];
        assert_eq!(task.estimation, None);
        assert_eq!(task.notes, "2h");
    }

    #[test]
    fn legacy_string_details_migrate_before_estimation() {
        let document: Document = serde_json::from_value(json!({
            "structure": {"1": {"type": "job"}},
            "task_list": {"1": {
                "name": "Login",
                "details": "old prose",
                "estimation": "2h"
            }}
        }))
        .unwrap();
        let project = document_to_project(document, "p");
        let task = &project.task_list["1"];
        assert_eq!(
            task.notes,
            format!("{MIGRATED_DETAILS_MARKER}\nold prose\n\n2h")
        );
        // Details reset to a type-correct empty payload.
        assert_eq!(task.details, Details::Job(JobDetails::default()));
    }

    #[test]
    fn typeless_task_gets_sniffed_details_type() {
        let document: Document = serde_json::from_value(json!({
            "task_list": {"9": {
                "name": "Mystery",
                "details": {"in_scope": "- something"}
            }}
        }))
        .unwrap();
        let project = document_to_project(document, "p");
        let task = &project.task_list["9"];
        match &task.details {
            Details::Job(details) => assert_eq!(details.in_scope, "- something"),
            other => panic!("expected job details, got {other:?}"),
        }
    }

    #[test]
    fn declared_type_wins_over_details_shape() {
        let document: Document = serde_json::from_value(json!({
            "structure": {"1": {"type": "area"}},
            "task_list": {"1": {
                "name": "Auth",
                "details": {"in_scope": "- job-shaped"}
            }}
        }))
        .unwrap();
        let project = document_to_project(document, "p");
        let task = &project.task_list["1"];
        // Shape does not fit Area, so the payload migrates to notes.
        assert!(matches!(task.details, Details::Area(_)));
        assert!(task.notes.starts_with(MIGRATED_DETAILS_MARKER));
        assert!(task.notes.contains("in_scope"));
    }

    #[test]
    fn nested_structure_decodes_into_tree() {
        let document: Document = serde_json::from_value(json!({
            "structure": {
                "1": {"type": "area", "subtasks": {"1.1": {"type": "job"}}}
            }
        }))
        .unwrap();
        let project = document_to_project(document, "p");
        assert_eq!(project.structure.node_type("1"), Some(NodeType::Area));
        assert_eq!(project.structure.node_type("1.1"), Some(NodeType::Job));
    }

    #[test]
    fn document_missing_newer_fields_decodes_with_defaults() {
        let document: Document =
            serde_json::from_value(json!({"project_info": {"name": "old"}})).unwrap();
        let project = document_to_project(document, "old");
        assert_eq!(project.info.id, "old");
        assert!(project.time_log.is_empty());
        assert!(project.tags.is_empty());
    }
}
