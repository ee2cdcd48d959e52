//! Task text codec: the editable document form of a single task.
//!
//! Document layout (state machine order: header, details, estimation for
//! Jobs, notes, tags):
//!
//! ```text
//! # 1.1.1 Job: Implement login
//!
//! ## Details
//! ...variant subsections...
//!
//! ## Estimation        (Job only)
//! ...
//!
//! ## Notes
//! ...
//!
//! ## Tags
//! a, b
//! ```
//!
//! Top-level sections are `## ` headers; unknown ones are promoted to the
//! task's `custom` map and stray top-level prose is appended to notes.
//! Subsections inside `## Details` are `Header:` lines with 2-space-indented
//! bodies; unknown subsection headers land in the details variant's own
//! `custom` map. `task_to_text` always emits the full skeleton — empty
//! bullet sections render a lone placeholder bullet, empty plain sections a
//! blank body — and one parse/render round trip is a fixed point.

use crate::codec::bullets::canonicalize;
use crate::codec::section::{
    canonical_text, header_from_key, indent_block, last_checked_label, lenient_number,
    normalize_header, render_checkbox_group, Capture, HeaderShape, Scan, SectionKey,
    SectionScanner, TextDoc, UnknownHeaders,
};
use crate::models::{
    AreaDetails, ComponentDetails, Confidence, CustomFields, Details, EstimateMethod, Estimation,
    FreeformDetails, JobDetails, Milestone, NodeType, Task, WorkType,
};

const TOP_VOCAB: &[&str] = &["Details", "Estimation", "Notes", "Tags"];

const AREA_VOCAB: &[&str] = &["Purpose", "Goals", "Constraints"];
const COMPONENT_VOCAB: &[&str] = &["Context / Why", "Responsibilities", "Interfaces", "Risks"];
const JOB_VOCAB: &[&str] = &[
    "Context / Why",
    "Scope",
    "Outcome / Definition of Done",
    "Approach",
];
const SCOPE_VOCAB: &[&str] = &["In scope", "Out of scope"];

const ESTIMATION_VOCAB: &[&str] = &[
    "Type",
    "Assumptions",
    "Effort",
    "Confidence",
    "Schedule",
    "Could be smaller",
    "Could be bigger",
    "Ignored last time",
];
const EFFORT_VOCAB: &[&str] = &["Method", "Estimate"];
const SCHEDULE_VOCAB: &[&str] = &["Milestones"];

/// Milestone separator; a name containing this exact sequence confuses the
/// split. Known fragility of the format, preserved as-is.
const MILESTONE_SEP: &str = " — ";

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Renders a task as its editable document.
///
/// The full section skeleton is always present, including for empty fields,
/// so the user edits named slots rather than remembering the vocabulary.
/// The estimation section appears only for Job-type nodes.
pub fn task_to_text(task: &Task, node_type: NodeType) -> String {
    let mut doc = TextDoc::new();
    doc.line(&format!(
        "# {} {}: {}",
        task.id,
        node_type.as_str(),
        task.name
    ));

    doc.blank();
    doc.line("## Details");
    doc.blank();
    render_details(&mut doc, &task.details);

    if node_type == NodeType::Job {
        doc.blank();
        doc.line("## Estimation");
        doc.blank();
        let default_estimation;
        let estimation = match &task.estimation {
            Some(estimation) => estimation,
            None => {
                default_estimation = Estimation::default();
                &default_estimation
            }
        };
        render_estimation(&mut doc, estimation);
    }

    for (key, body) in &task.custom {
        doc.blank();
        doc.line(&format!("## {}", header_from_key(key)));
        doc.blank();
        doc.block(&canonical_text(body));
    }

    doc.blank();
    doc.line("## Notes");
    doc.blank();
    doc.block(&canonical_text(&task.notes));

    doc.blank();
    doc.line("## Tags");
    doc.blank();
    if !task.tags.is_empty() {
        let tags: Vec<&str> = task.tags.iter().map(String::as_str).collect();
        doc.line(&tags.join(", "));
    }

    doc.into_string()
}

fn render_details(doc: &mut TextDoc, details: &Details) {
    match details {
        Details::Area(d) => {
            render_plain_field(doc, "Purpose", &d.purpose);
            render_bullet_field(doc, "Goals", &d.goals, 2);
            render_bullet_field(doc, "Constraints", &d.constraints, 2);
            render_custom_subsections(doc, &d.custom);
        }
        Details::Component(d) => {
            render_plain_field(doc, "Context / Why", &d.context_why);
            render_bullet_field(doc, "Responsibilities", &d.responsibilities, 2);
            render_bullet_field(doc, "Interfaces", &d.interfaces, 2);
            render_bullet_field(doc, "Risks", &d.risks, 2);
            render_custom_subsections(doc, &d.custom);
        }
        Details::Job(d) => {
            render_plain_field(doc, "Context / Why", &d.context_why);
            doc.line("Scope:");
            doc.line("  In scope:");
            doc.block(&indent_block(&bullets_or_placeholder(&d.in_scope), 4));
            doc.line("  Out of scope:");
            doc.block(&indent_block(&bullets_or_placeholder(&d.out_of_scope), 4));
            doc.blank();
            render_bullet_field(doc, "Outcome / Definition of Done", &d.outcome_dod, 2);
            render_plain_field(doc, "Approach", &d.approach);
            doc.line(&format!(
                "Completed: [{}]",
                if d.completed { 'x' } else { ' ' }
            ));
            render_custom_subsections(doc, &d.custom);
        }
        Details::Freeform(d) => {
            doc.block(&canonical_text(&d.body));
        }
    }
}

fn render_plain_field(doc: &mut TextDoc, header: &str, value: &str) {
    doc.line(&format!("{header}:"));
    doc.block(&indent_block(&canonical_text(value), 2));
    doc.blank();
}

fn render_bullet_field(doc: &mut TextDoc, header: &str, value: &str, indent: usize) {
    doc.line(&format!("{header}:"));
    doc.block(&indent_block(&bullets_or_placeholder(value), indent));
    doc.blank();
}

fn render_custom_subsections(doc: &mut TextDoc, custom: &CustomFields) {
    for (key, body) in custom {
        doc.blank();
        doc.line(&format!("{}:", header_from_key(key)));
        doc.block(&indent_block(&canonical_text(body), 2));
    }
}

fn bullets_or_placeholder(value: &str) -> String {
    let canonical = canonicalize(value);
    if canonical.is_empty() {
        "- ".to_string()
    } else {
        canonical
    }
}

fn render_estimation(doc: &mut TextDoc, estimation: &Estimation) {
    doc.line("Type:");
    doc.block(&render_checkbox_group(
        &WorkType::OPTIONS.map(|o| o.as_str()),
        estimation.work_type.as_str(),
        2,
    ));
    doc.blank();

    render_bullet_field(doc, "Assumptions", &estimation.assumptions, 2);

    doc.line("Effort:");
    doc.line("  Method:");
    doc.block(&render_checkbox_group(
        &EstimateMethod::OPTIONS.map(|o| o.as_str()),
        estimation.effort.method.as_str(),
        4,
    ));
    doc.line("  Estimate:");
    doc.line(&format!(
        "    Base effort: {}",
        fmt_num(estimation.effort.base_hours)
    ));
    if estimation.effort.buffer_reason.is_empty() {
        doc.line(&format!(
            "    Buffer: {}%",
            fmt_num(estimation.effort.buffer_percent)
        ));
    } else {
        doc.line(&format!(
            "    Buffer: {}% (reason: {})",
            fmt_num(estimation.effort.buffer_percent),
            estimation.effort.buffer_reason
        ));
    }
    doc.line(&format!(
        "    Total: {}",
        fmt_num(estimation.effort.total_hours)
    ));
    doc.blank();

    doc.line("Confidence:");
    doc.block(&render_checkbox_group(
        &Confidence::OPTIONS.map(|o| o.as_str()),
        estimation.confidence.as_str(),
        2,
    ));
    doc.blank();

    doc.line("Schedule:");
    doc.line(&scalar_line("  Start", &estimation.schedule.start_date));
    doc.line(&scalar_line(
        "  Target finish",
        &estimation.schedule.target_finish,
    ));
    doc.line("  Milestones:");
    if estimation.schedule.milestones.is_empty() {
        doc.line("    - ");
    } else {
        for milestone in &estimation.schedule.milestones {
            if milestone.date.is_empty() {
                doc.line(&format!("    - {}", milestone.name));
            } else {
                doc.line(&format!(
                    "    - {}{}{}",
                    milestone.name, MILESTONE_SEP, milestone.date
                ));
            }
        }
    }
    doc.blank();

    let notes = &estimation.post_estimate_notes;
    render_bullet_field(doc, "Could be smaller", &notes.could_be_smaller, 2);
    render_bullet_field(doc, "Could be bigger", &notes.could_be_bigger, 2);
    render_bullet_field(doc, "Ignored last time", &notes.ignored_last_time, 2);
}

fn scalar_line(key: &str, value: &str) -> String {
    if value.is_empty() {
        format!("{key}:")
    } else {
        format!("{key}: {value}")
    }
}

fn fmt_num(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Parses an edited task document back into a [`Task`].
///
/// Accepts anything [`task_to_text`] produced and reproduces an equivalent
/// task (idempotence up to canonical whitespace). Unknown `## ` headers
/// become custom fields; stray top-level prose is appended to notes; an
/// estimation section on a non-Job node is preserved in notes rather than
/// dropped.
pub fn text_to_task(text: &str, node_type: NodeType) -> Task {
    let (title, rest) = split_title(text);
    let (id, name) = parse_title(title);

    let scan = SectionScanner::new(
        HeaderShape::Markdown,
        TOP_VOCAB,
        UnknownHeaders::Capture,
        Capture::Freeform,
    )
    .scan(rest);

    let mut task = Task::new(id, name, node_type);

    task.details = parse_details(scan.section("Details").unwrap_or(""), node_type);
    task.notes = scan.section("Notes").unwrap_or("").to_string();

    if let Some(body) = scan.section("Estimation") {
        if node_type == NodeType::Job {
            let estimation = parse_estimation(body);
            task.estimation = (estimation != Estimation::default()).then_some(estimation);
        } else if !body.is_empty() {
            // Not meaningful here, but never dropped.
            task.append_notes(body);
        }
    }

    if !scan.preamble.is_empty() {
        task.append_notes(&scan.preamble);
    }

    if let Some(tags) = scan.section("Tags") {
        task.tags = tags
            .split([',', '\n'])
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(str::to_string)
            .collect();
    }

    for (key, body) in &scan.sections {
        if let SectionKey::Custom(header) = key {
            task.custom
                .insert(normalize_header(header), body.clone());
        }
    }

    task
}

fn split_title(text: &str) -> (&str, &str) {
    for (offset, line) in text.lines().map(|line| (line.as_ptr() as usize - text.as_ptr() as usize, line)) {
        if line.trim().is_empty() {
            continue;
        }
        if line.starts_with("# ") && !line.starts_with("## ") {
            let after = offset + line.len();
            return (line, &text[after..]);
        }
        break;
    }
    ("", text)
}

fn parse_title(title: &str) -> (String, String) {
    let Some(rest) = title.strip_prefix("# ") else {
        return (String::new(), String::new());
    };
    let rest = rest.trim();
    let (id, rest) = match rest.split_once(' ') {
        Some(parts) => parts,
        // A lone `Type:` token means the id is missing, not that the id is
        // the type word.
        None if rest.contains(':') => ("", rest),
        None => (rest, ""),
    };
    let name = rest.split_once(':').map(|(_, name)| name).unwrap_or("");
    (id.trim().to_string(), name.trim().to_string())
}

fn parse_details(body: &str, node_type: NodeType) -> Details {
    if node_type == NodeType::Freeform {
        return Details::Freeform(FreeformDetails {
            body: body.to_string(),
            custom: CustomFields::new(),
        });
    }

    let vocab = match node_type {
        NodeType::Area => AREA_VOCAB,
        NodeType::Component => COMPONENT_VOCAB,
        NodeType::Job => JOB_VOCAB,
        NodeType::Freeform => unreachable!(),
    };
    let scanner = SectionScanner::new(
        HeaderShape::Colon,
        vocab,
        UnknownHeaders::Capture,
        Capture::Indented(2),
    );
    let scanner = if node_type == NodeType::Job {
        scanner.with_scalars(&["Completed"])
    } else {
        scanner
    };
    let scan = scanner.scan(body);

    let custom = collect_custom(&scan);
    let plain = |key: &str| scan.section(key).unwrap_or("").to_string();
    let bullets = |key: &str| canonicalize(scan.section(key).unwrap_or(""));

    match node_type {
        NodeType::Area => Details::Area(AreaDetails {
            purpose: with_preamble(&scan.preamble, plain("Purpose")),
            goals: bullets("Goals"),
            constraints: bullets("Constraints"),
            custom,
        }),
        NodeType::Component => Details::Component(ComponentDetails {
            context_why: with_preamble(&scan.preamble, plain("Context / Why")),
            responsibilities: bullets("Responsibilities"),
            interfaces: bullets("Interfaces"),
            risks: bullets("Risks"),
            custom,
        }),
        NodeType::Job => {
            let scope = SectionScanner::new(
                HeaderShape::Colon,
                SCOPE_VOCAB,
                UnknownHeaders::Content,
                Capture::Indented(2),
            )
            .scan(scan.section("Scope").unwrap_or(""));
            Details::Job(JobDetails {
                context_why: with_preamble(&scan.preamble, plain("Context / Why")),
                in_scope: canonicalize(scope.section("In scope").unwrap_or("")),
                out_of_scope: canonicalize(scope.section("Out of scope").unwrap_or("")),
                outcome_dod: bullets("Outcome / Definition of Done"),
                approach: plain("Approach"),
                completed: scan
                    .scalar("Completed")
                    .is_some_and(|value| value.contains("[x]") || value.contains("[X]")),
                custom,
            })
        }
        NodeType::Freeform => unreachable!(),
    }
}

fn with_preamble(preamble: &str, field: String) -> String {
    if preamble.is_empty() {
        field
    } else if field.is_empty() {
        preamble.to_string()
    } else {
        format!("{preamble}\n\n{field}")
    }
}

fn collect_custom(scan: &Scan) -> CustomFields {
    let mut custom = CustomFields::new();
    for (key, body) in &scan.sections {
        if let SectionKey::Custom(header) = key {
            custom.insert(normalize_header(header), body.clone());
        }
    }
    custom
}

fn parse_estimation(body: &str) -> Estimation {
    let scan = SectionScanner::new(
        HeaderShape::Colon,
        ESTIMATION_VOCAB,
        UnknownHeaders::Content,
        Capture::Indented(2),
    )
    .scan(body);

    let mut estimation = Estimation::default();

    if let Some(group) = scan.section("Type") {
        estimation.work_type = checked_enum(group);
    }
    estimation.assumptions = canonicalize(scan.section("Assumptions").unwrap_or(""));

    if let Some(effort_body) = scan.section("Effort") {
        let effort = SectionScanner::new(
            HeaderShape::Colon,
            EFFORT_VOCAB,
            UnknownHeaders::Content,
            Capture::Indented(2),
        )
        .scan(effort_body);
        if let Some(group) = effort.section("Method") {
            estimation.effort.method = checked_enum(group);
        }
        if let Some(estimate) = effort.section("Estimate") {
            for line in estimate.lines() {
                let line = line.trim();
                if let Some(value) = line.strip_prefix("Base effort:") {
                    estimation.effort.base_hours = lenient_number(value);
                } else if let Some(value) = line.strip_prefix("Buffer:") {
                    let (percent, reason) = parse_buffer(value);
                    estimation.effort.buffer_percent = percent;
                    estimation.effort.buffer_reason = reason;
                } else if let Some(value) = line.strip_prefix("Total:") {
                    estimation.effort.total_hours = lenient_number(value);
                }
            }
        }
    }

    if let Some(group) = scan.section("Confidence") {
        estimation.confidence = checked_enum(group);
    }

    if let Some(schedule_body) = scan.section("Schedule") {
        let schedule = SectionScanner::new(
            HeaderShape::Colon,
            SCHEDULE_VOCAB,
            UnknownHeaders::Content,
            Capture::Indented(2),
        )
        .with_scalars(&["Start", "Target finish"])
        .scan(schedule_body);
        estimation.schedule.start_date = schedule.scalar("Start").unwrap_or("").to_string();
        estimation.schedule.target_finish =
            schedule.scalar("Target finish").unwrap_or("").to_string();
        estimation.schedule.milestones =
            parse_milestones(schedule.section("Milestones").unwrap_or(""));
    }

    let notes = &mut estimation.post_estimate_notes;
    notes.could_be_smaller = canonicalize(scan.section("Could be smaller").unwrap_or(""));
    notes.could_be_bigger = canonicalize(scan.section("Could be bigger").unwrap_or(""));
    notes.ignored_last_time = canonicalize(scan.section("Ignored last time").unwrap_or(""));

    estimation
}

fn checked_enum<T>(group: &str) -> T
where
    T: std::str::FromStr + Default,
{
    last_checked_label(group)
        .and_then(|label| label.parse().ok())
        .unwrap_or_default()
}

/// Splits `name — date` milestone items on the last em-dash separator.
/// A name that itself contains the separator loses its tail to the date
/// field; documented fragility of the format, kept rather than fixed.
fn parse_milestones(body: &str) -> Vec<Milestone> {
    crate::codec::bullets::text_to_list(body)
        .into_iter()
        .map(|item| match item.rsplit_once(MILESTONE_SEP) {
            Some((name, date)) => Milestone {
                name: name.trim().to_string(),
                date: date.trim().to_string(),
            },
            None => Milestone {
                name: item,
                date: String::new(),
            },
        })
        .collect()
}

fn parse_buffer(value: &str) -> (f64, String) {
    let percent = lenient_number(value);
    let reason = value
        .find("(reason:")
        .map(|pos| {
            let rest = &value[pos + "(reason:".len()..];
            let end = rest.rfind(')').unwrap_or(rest.len());
            rest[..end].trim().to_string()
        })
        .unwrap_or_default();
    (percent, reason)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Effort, Schedule};

    fn create_job_task() -> Task {
        let mut task = Task::new("1.1.1", "Implement login", NodeType::Job);
        task.details = Details::Job(JobDetails {
            context_why: "Users need to sign in.".to_string(),
            in_scope: "- Password auth".to_string(),
            out_of_scope: "- SSO".to_string(),
            outcome_dod: "- A\n- B".to_string(),
            approach: "Start from the session middleware.".to_string(),
            completed: false,
            custom: CustomFields::new(),
        });
        task.estimation = Some(Estimation {
            work_type: WorkType::Feature,
            assumptions: "- The schema is final".to_string(),
            effort: Effort {
                method: EstimateMethod::Decomposition,
                base_hours: 6.0,
                buffer_percent: 25.0,
                buffer_reason: "unknown integration".to_string(),
                total_hours: 7.5,
            },
            confidence: Confidence::Medium,
            schedule: Schedule {
                start_date: "2024-05-01".to_string(),
                target_finish: "2024-05-15".to_string(),
                milestones: vec![
                    Milestone {
                        name: "API ready".to_string(),
                        date: "2024-05-08".to_string(),
                    },
                    Milestone {
                        name: "UI done".to_string(),
                        date: "2024-05-12".to_string(),
                    },
                ],
            },
            post_estimate_notes: Default::default(),
        });
        task.notes = "Remember the rate limiter.".to_string();
        task.tags = ["auth", "backend"].iter().map(|s| s.to_string()).collect();
        task
    }

    #[test]
    fn job_render_contains_expected_sections() {
        let text = task_to_text(&create_job_task(), NodeType::Job);
        assert!(text.starts_with("# 1.1.1 Job: Implement login\n"));
        assert!(text.contains("## Details"));
        assert!(text.contains("Outcome / Definition of Done"));
        assert!(text.contains("  - A\n  - B"));
        assert!(text.contains("## Estimation"));
        assert!(text.contains("  [x] Feature"));
        assert!(text.contains("    Buffer: 25% (reason: unknown integration)"));
        assert!(text.contains("    - API ready — 2024-05-08"));
        assert!(text.contains("## Tags"));
        assert!(text.contains("auth, backend"));
    }

    #[test]
    fn job_round_trip_preserves_task() {
        let task = create_job_task();
        let text = task_to_text(&task, NodeType::Job);
        let parsed = text_to_task(&text, NodeType::Job);
        assert_eq!(parsed, task);
    }

    #[test]
    fn render_is_idempotent_across_one_round_trip() {
        let samples = [
            create_job_task(),
            Task::new("1", "Auth", NodeType::Area),
            Task::new("1.1", "Login", NodeType::Component),
            Task::new("2", "Scratch", NodeType::Freeform),
        ];
        for task in samples {
            let node_type = task.details.node_type();
            let text = task_to_text(&task, node_type);
            let reparsed = text_to_task(&text, node_type);
            assert_eq!(task_to_text(&reparsed, node_type), text);
        }
    }

    #[test]
    fn outcome_dod_round_trips_through_indented_bullets() {
        let mut task = Task::new("1.1.1", "J", NodeType::Job);
        if let Details::Job(d) = &mut task.details {
            d.outcome_dod = "- A\n- B".to_string();
        }
        let text = task_to_text(&task, NodeType::Job);
        assert!(text.contains("Outcome / Definition of Done"));
        assert!(text.contains("  - A"));
        assert!(text.contains("  - B"));
        let parsed = text_to_task(&text, NodeType::Job);
        if let Details::Job(d) = parsed.details {
            assert_eq!(d.outcome_dod, "- A\n- B");
        } else {
            panic!("expected Job details");
        }
    }

    #[test]
    fn empty_task_renders_full_skeleton() {
        let text = task_to_text(&Task::new("1.1.1", "New", NodeType::Job), NodeType::Job);
        for header in ["## Details", "## Estimation", "## Notes", "## Tags"] {
            assert!(text.contains(header), "missing {header}");
        }
        assert!(text.contains("  In scope:\n    -\n"));
        let parsed = text_to_task(&text, NodeType::Job);
        assert_eq!(parsed.estimation, None);
        assert!(parsed.notes.is_empty());
    }

    #[test]
    fn unknown_top_level_headers_become_custom_fields() {
        let text = "# 1 Area: Auth\n\n## Details\n\n## Review Checklist\n\n- security pass\n\n## Notes\n";
        let task = text_to_task(text, NodeType::Area);
        assert_eq!(
            task.custom.get("review_checklist").map(String::as_str),
            Some("- security pass")
        );
        // And they survive a render/parse cycle.
        let rendered = task_to_text(&task, NodeType::Area);
        assert!(rendered.contains("## Review checklist"));
        let reparsed = text_to_task(&rendered, NodeType::Area);
        assert_eq!(reparsed.custom, task.custom);
    }

    #[test]
    fn duplicated_notes_sections_are_concatenated() {
        let text = "# 1 Area: Auth\n\n## Notes\n\nfirst half\n\n## Tags\n\na\n\n## Notes\n\nsecond half\n";
        let task = text_to_task(text, NodeType::Area);
        assert_eq!(task.notes, "first half\n\nsecond half");
    }

    #[test]
    fn stray_prose_is_appended_to_notes() {
        let text = "# 1 Area: Auth\nthis floats\n\n## Notes\n\nkept\n";
        let task = text_to_task(text, NodeType::Area);
        assert_eq!(task.notes, "kept\n\nthis floats");
    }

    #[test]
    fn unknown_details_subsection_goes_to_variant_custom() {
        let text = "# 1.1 Component: Login\n\n## Details\n\nContext / Why:\n  because\n\nOperational Notes:\n  - pager\n";
        let task = text_to_task(text, NodeType::Component);
        if let Details::Component(d) = &task.details {
            assert_eq!(d.context_why, "because");
            assert_eq!(
                d.custom.get("operational_notes").map(String::as_str),
                Some("- pager")
            );
        } else {
            panic!("expected Component details");
        }
    }

    #[test]
    fn checkbox_last_match_wins_and_unchecked_means_unspecified() {
        let mut task = Task::new("1.1.1", "J", NodeType::Job);
        task.estimation = Some(Estimation {
            confidence: Confidence::High,
            ..Default::default()
        });
        let text = task_to_text(&task, NodeType::Job);
        // Double-check two boxes by hand.
        let doctored = text.replace("  [ ] Low", "  [x] Low");
        let parsed = text_to_task(&doctored, NodeType::Job);
        assert_eq!(parsed.estimation.unwrap().confidence, Confidence::High);

        let cleared = text.replace("  [x] High", "  [ ] High");
        let parsed = text_to_task(&cleared, NodeType::Job);
        assert_eq!(parsed.estimation, None);
    }

    #[test]
    fn milestone_split_uses_last_em_dash() {
        let milestones = parse_milestones("- design — review — 2024-06-01\n- loose end");
        assert_eq!(milestones[0].name, "design — review");
        assert_eq!(milestones[0].date, "2024-06-01");
        assert_eq!(milestones[1].name, "loose end");
        assert_eq!(milestones[1].date, "");
    }

    #[test]
    fn completed_checkbox_round_trips() {
        let mut task = Task::new("1.1.1", "J", NodeType::Job);
        if let Details::Job(d) = &mut task.details {
            d.completed = true;
        }
        let text = task_to_text(&task, NodeType::Job);
        assert!(text.contains("Completed: [x]"));
        let parsed = text_to_task(&text, NodeType::Job);
        if let Details::Job(d) = parsed.details {
            assert!(d.completed);
        } else {
            panic!("expected Job details");
        }
    }

    #[test]
    fn estimation_on_non_job_is_kept_in_notes() {
        let text = "# 1 Area: Auth\n\n## Estimation\n\nType:\n  [x] Feature\n\n## Notes\n";
        let task = text_to_task(text, NodeType::Area);
        assert!(task.estimation.is_none());
        assert!(task.notes.contains("[x] Feature"));
    }
}
