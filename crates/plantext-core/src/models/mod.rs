//! Data models for projects, structure nodes, tasks, and time sessions.
//!
//! These are the in-memory entities the codecs and the persistence mapper
//! operate on, independent of any serialized form. Text rendering lives in
//! [`crate::codec`]; the persisted-document mapping (including all legacy
//! tolerance) lives in [`crate::persist`].

pub mod estimation;
pub mod project;
pub mod session;
pub mod structure;
pub mod task;

#[cfg(test)]
mod tests;

// Re-export all public types at the models level
pub use estimation::{
    Confidence, Effort, EstimateMethod, Estimation, Milestone, PostEstimateNotes, Schedule,
    WorkType,
};
pub use project::{Project, ProjectInfo};
pub use session::{Defects, EnergyLevel, Retrospective, Session, SessionType};
pub use structure::{compare_ids, parent_id, NodeType, StructureNode, StructureTree};
pub use task::{
    AreaDetails, ComponentDetails, CustomFields, Details, FreeformDetails, JobDetails, Task,
};
