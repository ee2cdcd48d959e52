//! Session text codec: the editable document form of one time-log entry.
//!
//! Scalars come first, sections after, all from a fixed vocabulary:
//!
//! ```text
//! Start: 2024-01-01T10:00:00Z
//! End: 2024-01-01T11:30:00Z
//!
//! Type:
//!   [x] Deep work
//!   ...
//!
//! Planned (minutes): 90
//! ...
//!
//! Tasks:
//!   - 1.1.1
//! ...
//! ```
//!
//! The session format has no custom-field extension: unrecognized
//! header-shaped lines stay content, the way legacy bodies are handled.

use crate::codec::bullets::{canonicalize, list_to_text, text_to_list};
use crate::codec::section::{
    canonical_text, indent_block, last_checked_label, lenient_count, render_checkbox_group,
    Capture, HeaderShape, SectionScanner, TextDoc, UnknownHeaders,
};
use crate::models::{Session, SessionType};

const SESSION_VOCAB: &[&str] = &[
    "Type",
    "Tasks",
    "Interruptions",
    "Deliverables",
    "Blockers",
    "Defects found",
    "Defects fixed",
    "What went well",
    "What needs improvement",
    "Lessons learned",
    "Notes",
];

const SESSION_SCALARS: &[&str] = &[
    "Start",
    "End",
    "Planned (minutes)",
    "Focus (1-5)",
    "Energy start (1-5)",
    "Energy end (1-5)",
    "Context switches",
    "Interruption minutes",
];

/// Renders a session as its editable document. The full skeleton is always
/// present; an open session has an empty `End:` line.
pub fn session_to_text(session: &Session) -> String {
    let mut doc = TextDoc::new();
    doc.line(&scalar_line("Start", &session.start));
    doc.line(&scalar_line("End", &session.end));

    doc.blank();
    doc.line("Type:");
    doc.block(&render_checkbox_group(
        &SessionType::OPTIONS.map(|o| o.as_str()),
        session.session_type.as_str(),
        2,
    ));
    doc.blank();

    doc.line(&format!("Planned (minutes): {}", session.planned_minutes));
    doc.line(&format!("Focus (1-5): {}", session.focus_rating));
    doc.line(&format!("Energy start (1-5): {}", session.energy.start));
    doc.line(&format!("Energy end (1-5): {}", session.energy.end));
    doc.line(&format!("Context switches: {}", session.context_switches));
    doc.line(&format!(
        "Interruption minutes: {}",
        session.interruption_minutes
    ));

    doc.blank();
    render_section(&mut doc, "Tasks", &list_to_text(&session.tasks), true);
    render_section(&mut doc, "Interruptions", &session.interruptions, false);
    render_section(&mut doc, "Deliverables", &session.deliverables, false);
    render_section(&mut doc, "Blockers", &session.blockers, true);
    render_section(&mut doc, "Defects found", &session.defects.found, true);
    render_section(&mut doc, "Defects fixed", &session.defects.fixed, true);
    let retro = &session.retrospective;
    render_section(&mut doc, "What went well", &retro.what_went_well, true);
    render_section(
        &mut doc,
        "What needs improvement",
        &retro.what_needs_improvement,
        true,
    );
    render_section(&mut doc, "Lessons learned", &retro.lessons_learned, true);
    render_section(&mut doc, "Notes", &session.notes, false);

    doc.into_string()
}

fn render_section(doc: &mut TextDoc, header: &str, value: &str, bulleted: bool) {
    doc.line(&format!("{header}:"));
    let body = if bulleted {
        let canonical = canonicalize(value);
        if canonical.is_empty() {
            "- ".to_string()
        } else {
            canonical
        }
    } else {
        canonical_text(value)
    };
    doc.block(&indent_block(&body, 2));
    doc.blank();
}

fn scalar_line(key: &str, value: &str) -> String {
    if value.is_empty() {
        format!("{key}:")
    } else {
        format!("{key}: {value}")
    }
}

/// Parses an edited session document back into a [`Session`].
///
/// Accepts anything [`session_to_text`] produced; numeric lines parse
/// leniently (trailing junk ignored, unparseable values become 0) and the
/// endpoints are kept verbatim however they were typed.
pub fn text_to_session(text: &str) -> Session {
    let scan = SectionScanner::new(
        HeaderShape::Colon,
        SESSION_VOCAB,
        UnknownHeaders::Content,
        Capture::Indented(2),
    )
    .with_scalars(SESSION_SCALARS)
    .scan(text);

    let count = |key: &str| lenient_count(scan.scalar(key).unwrap_or(""));
    let plain = |key: &str| scan.section(key).unwrap_or("").to_string();
    let bullets = |key: &str| canonicalize(scan.section(key).unwrap_or(""));

    let mut session = Session {
        start: scan.scalar("Start").unwrap_or("").to_string(),
        end: scan.scalar("End").unwrap_or("").to_string(),
        planned_minutes: count("Planned (minutes)"),
        focus_rating: count("Focus (1-5)"),
        context_switches: count("Context switches"),
        interruption_minutes: count("Interruption minutes"),
        tasks: text_to_list(scan.section("Tasks").unwrap_or("")),
        interruptions: plain("Interruptions"),
        deliverables: plain("Deliverables"),
        blockers: bullets("Blockers"),
        notes: plain("Notes"),
        ..Session::default()
    };
    session.energy.start = count("Energy start (1-5)");
    session.energy.end = count("Energy end (1-5)");
    session.defects.found = bullets("Defects found");
    session.defects.fixed = bullets("Defects fixed");
    session.retrospective.what_went_well = bullets("What went well");
    session.retrospective.what_needs_improvement = bullets("What needs improvement");
    session.retrospective.lessons_learned = bullets("Lessons learned");

    if let Some(group) = scan.section("Type") {
        session.session_type = last_checked_label(group)
            .and_then(|label| label.parse().ok())
            .unwrap_or_default();
    }

    if !scan.preamble.is_empty() {
        if !session.notes.is_empty() {
            session.notes.push_str("\n\n");
        }
        session.notes.push_str(&scan.preamble);
    }

    session
}
