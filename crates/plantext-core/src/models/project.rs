//! Project root aggregate.

use std::collections::{BTreeMap, BTreeSet};

use super::session::Session;
use super::structure::StructureTree;
use super::task::Task;

/// Identity of a project.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq, Eq, Default)]
pub struct ProjectInfo {
    /// Stable identifier
    #[serde(default)]
    pub id: String,

    /// Display name; also the persisted-document name
    #[serde(default)]
    pub name: String,
}

/// Root aggregate owning all project state for one loaded project.
///
/// Entities live for the process lifetime of one load and are replaced
/// wholesale on reload. Constructors always yield fully-populated values
/// with type-correct defaults for missing fields.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Project {
    /// Project identity
    pub info: ProjectInfo,

    /// Hierarchical structure tree
    pub structure: StructureTree,

    /// Tasks keyed by structure node id
    pub task_list: BTreeMap<String, Task>,

    /// Ordered time log
    pub time_log: Vec<Session>,

    /// Project-level tags
    pub tags: BTreeSet<String>,

    /// Free text; doubles as the overflow/recovery buffer when persisted
    /// content cannot be decoded
    pub notes: String,
}

impl Project {
    /// Creates a fresh, empty project with the given name. The id mirrors
    /// the name until a host assigns something else.
    pub fn named(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            info: ProjectInfo {
                id: name.clone(),
                name,
            },
            ..Self::default()
        }
    }
}
