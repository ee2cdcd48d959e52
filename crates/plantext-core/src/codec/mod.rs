//! Codecs between the data model and its editable plain-text forms.
//!
//! Three concrete document codecs share the same building blocks:
//!
//! ```text
//! ┌──────────────────┐   ┌──────────────────┐   ┌──────────────────┐
//! │   task_text      │   │   session_text   │   │  structure_text  │
//! │ Task <-> text    │   │ Session <-> text │   │  Tree <-> text   │
//! └────────┬─────────┘   └────────┬─────────┘   └────────┬─────────┘
//!          │                      │                      │
//!          └───────────┬──────────┴──────────────────────┘
//!                      ▼
//!        ┌──────────────────────────┐   ┌──────────────────────┐
//!        │  section (line scanner)  │   │  bullets (list<->text)│
//!        └──────────────────────────┘   └──────────────────────┘
//! ```
//!
//! Every codec is idempotent across one round trip: parsing the text a codec
//! produced and rendering it again reproduces the same text, and the parsed
//! value is equivalent to the original up to canonical whitespace.

pub mod bullets;
pub mod section;
pub mod session_text;
pub mod structure_text;
pub mod task_text;

pub use bullets::{list_to_text, text_to_list};
pub use session_text::{session_to_text, text_to_session};
pub use structure_text::{apply_structure_text, structure_to_text, text_to_structure};
pub use task_text::{task_to_text, text_to_task};
