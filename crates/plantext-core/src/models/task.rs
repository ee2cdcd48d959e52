//! Task model and its type-selected details variants.

use std::collections::BTreeSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::estimation::Estimation;
use super::structure::NodeType;
use crate::codec::bullets::deserialize_bullet_text;

/// Forward-compatible extension fields captured from unrecognized headers.
///
/// Insertion order is preserved through every serialized form.
pub type CustomFields = IndexMap<String, String>;

/// A task mirrors a structure node and carries its editable content.
///
/// Tasks do not serialize directly: the persisted shape of `details` and
/// `estimation` depends on legacy tolerance, so the mapping lives in
/// [`crate::persist`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Task {
    /// Hierarchical id, mirroring a [`super::StructureNode`] id
    pub id: String,

    /// Human-readable name, shared with the structure outline
    pub name: String,

    /// Type-specific structured payload, selected by the owning node's type
    pub details: Details,

    /// Estimation block; only meaningful for Job-type nodes
    pub estimation: Option<Estimation>,

    /// Free text; also the destination for migrated or unrecognized legacy
    /// content
    pub notes: String,

    /// Tags attached to this task
    pub tags: BTreeSet<String>,

    /// Custom fields captured from unrecognized top-level headers
    pub custom: CustomFields,
}

impl Task {
    /// Creates a task with type-correct empty details for the node type.
    pub fn new(id: impl Into<String>, name: impl Into<String>, node_type: NodeType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            details: Details::empty_for(node_type),
            ..Self::default()
        }
    }

    /// Appends a fragment to the notes field, separated by a blank line.
    pub fn append_notes(&mut self, fragment: &str) {
        if fragment.is_empty() {
            return;
        }
        if !self.notes.is_empty() {
            self.notes.push_str("\n\n");
        }
        self.notes.push_str(fragment);
    }
}

/// Type-specific structured payload of a task.
///
/// The variant is always selected by the owning structure node's declared
/// type, never inferred from which fields a payload happens to carry. The
/// shape-sniffing fallback for typeless legacy records lives apart in
/// [`crate::persist::legacy`].
#[derive(Debug, Clone, PartialEq)]
pub enum Details {
    Area(AreaDetails),
    Component(ComponentDetails),
    Job(JobDetails),
    Freeform(FreeformDetails),
}

impl Default for Details {
    fn default() -> Self {
        Details::Freeform(FreeformDetails::default())
    }
}

impl Details {
    /// Fresh, empty details of the variant matching a node type.
    pub fn empty_for(node_type: NodeType) -> Self {
        match node_type {
            NodeType::Area => Details::Area(AreaDetails::default()),
            NodeType::Component => Details::Component(ComponentDetails::default()),
            NodeType::Job => Details::Job(JobDetails::default()),
            NodeType::Freeform => Details::Freeform(FreeformDetails::default()),
        }
    }

    /// The node type this variant belongs to.
    pub fn node_type(&self) -> NodeType {
        match self {
            Details::Area(_) => NodeType::Area,
            Details::Component(_) => NodeType::Component,
            Details::Job(_) => NodeType::Job,
            Details::Freeform(_) => NodeType::Freeform,
        }
    }

    /// The variant's own custom-field map.
    pub fn custom(&self) -> &CustomFields {
        match self {
            Details::Area(d) => &d.custom,
            Details::Component(d) => &d.custom,
            Details::Job(d) => &d.custom,
            Details::Freeform(d) => &d.custom,
        }
    }
}

/// Details payload for Area nodes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct AreaDetails {
    /// Why this area exists (plain text)
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub purpose: String,

    /// Standing goals (bullet-text)
    #[serde(
        default,
        deserialize_with = "deserialize_bullet_text",
        skip_serializing_if = "String::is_empty"
    )]
    pub goals: String,

    /// Constraints the area operates under (bullet-text)
    #[serde(
        default,
        deserialize_with = "deserialize_bullet_text",
        skip_serializing_if = "String::is_empty"
    )]
    pub constraints: String,

    /// Unrecognized sub-headers found within this details body
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub custom: CustomFields,
}

/// Details payload for Component nodes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ComponentDetails {
    /// Background and motivation (plain text)
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub context_why: String,

    /// What the component is responsible for (bullet-text)
    #[serde(
        default,
        deserialize_with = "deserialize_bullet_text",
        skip_serializing_if = "String::is_empty"
    )]
    pub responsibilities: String,

    /// Interfaces it exposes or consumes (bullet-text)
    #[serde(
        default,
        deserialize_with = "deserialize_bullet_text",
        skip_serializing_if = "String::is_empty"
    )]
    pub interfaces: String,

    /// Known risks (bullet-text)
    #[serde(
        default,
        deserialize_with = "deserialize_bullet_text",
        skip_serializing_if = "String::is_empty"
    )]
    pub risks: String,

    /// Unrecognized sub-headers found within this details body
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub custom: CustomFields,
}

/// Details payload for Job nodes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct JobDetails {
    /// Background and motivation (plain text)
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub context_why: String,

    /// Work included in the job (bullet-text)
    #[serde(
        default,
        deserialize_with = "deserialize_bullet_text",
        skip_serializing_if = "String::is_empty"
    )]
    pub in_scope: String,

    /// Work explicitly excluded (bullet-text)
    #[serde(
        default,
        deserialize_with = "deserialize_bullet_text",
        skip_serializing_if = "String::is_empty"
    )]
    pub out_of_scope: String,

    /// Outcome / definition of done (bullet-text)
    #[serde(
        default,
        deserialize_with = "deserialize_bullet_text",
        skip_serializing_if = "String::is_empty"
    )]
    pub outcome_dod: String,

    /// Planned approach (plain text)
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub approach: String,

    /// Whether the job is finished
    #[serde(default)]
    pub completed: bool,

    /// Unrecognized sub-headers found within this details body
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub custom: CustomFields,
}

/// Details payload for Freeform nodes: a single plain body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct FreeformDetails {
    /// Unstructured body text
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub body: String,

    /// Unrecognized sub-headers found within this details body
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub custom: CustomFields,
}
