//! Core library for the Plantext project planning engine.
//!
//! This crate turns a project's plan — its structure tree, tasks, and time
//! log — into editable plain-text documents and back, and persists the
//! whole project as a single JSON document.
//!
//! # Architecture
//!
//! - **Domain Models** ([`models`]): projects, structure nodes, typed task
//!   details, estimation, and sessions
//! - **Text Codecs** ([`codec`]): bidirectional mapping between models and
//!   their editable document forms (task, session, and structure outline)
//! - **Persistence** ([`persist`]): the persisted-document schema, legacy
//!   migrations, and the never-failing load path
//! - **Storage** ([`store`]): the byte-store seam, with file-backed and
//!   in-memory implementations
//!
//! The codecs are lenient on input and canonical on output: anything a
//! renderer produced parses back losslessly, hand edits are absorbed, and
//! one render-parse round trip reaches a fixed point.
//!
//! # Quick Start
//!
//! ```rust
//! use plantext_core::codec::{apply_structure_text, task_to_text};
//! use plantext_core::persist::ProjectStore;
//! use plantext_core::store::MemStore;
//!
//! # fn example() -> plantext_core::Result<()> {
//! // Load a project (a missing one starts fresh).
//! let mut store = ProjectStore::new(MemStore::new());
//! let mut project = store.load("demo").project;
//!
//! // Edit the structure as text; companion tasks appear automatically.
//! apply_structure_text(&mut project, "1 Area: Authentication\n  1.1 Job: Login form\n");
//!
//! // Each task has an editable document form.
//! let doc = task_to_text(&project.task_list["1.1"], plantext_core::models::NodeType::Job);
//! assert!(doc.starts_with("# 1.1 Job: Login form"));
//!
//! store.save(&project)?;
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod codec;
pub mod config;
pub mod error;
pub mod models;
pub mod persist;
pub mod store;

// Re-export commonly used types
pub use codec::{
    apply_structure_text, session_to_text, structure_to_text, task_to_text, text_to_session,
    text_to_structure, text_to_task,
};
pub use config::EngineConfig;
pub use error::{EngineError, Result};
pub use models::{Details, NodeType, Project, Session, Task};
pub use persist::{Loaded, Notice, ProjectStore, Severity};
pub use store::{ByteStore, FsStore, MemStore};
