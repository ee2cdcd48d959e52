//! Structure tree text codec: the editable outline of a project.
//!
//! One line per node, depth-first, children sorted numerically by id
//! segment:
//!
//! ```text
//! 1 Area: Auth
//!   1.1 Component: Login
//!     1.1.1 Job: Implement login
//! 2 Freeform: Scratch
//! ```
//!
//! Hierarchy on the way back in is derived from each id (parent = id minus
//! its last segment), never from the line's indentation, so indentation
//! noise cannot corrupt the tree. An id whose computed parent is absent
//! falls back to root-level insertion.

use log::debug;

use crate::codec::section::TextDoc;
use crate::models::{compare_ids, NodeType, Project, StructureNode, StructureTree, Task};

/// One parsed outline line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineEntry {
    pub id: String,
    pub node_type: NodeType,
    pub name: String,
}

/// Renders the project structure as an outline, indented two spaces per
/// depth level. Node names come from the companion tasks.
pub fn structure_to_text(project: &Project) -> String {
    let mut doc = TextDoc::new();
    for (node, depth) in project.structure.walk() {
        let name = project
            .task_list
            .get(&node.id)
            .map(|task| task.name.as_str())
            .unwrap_or("");
        let indent = "  ".repeat(depth);
        doc.line(&format!(
            "{indent}{} {}: {name}",
            node.id,
            node.node_type.as_str()
        ));
    }
    doc.into_string()
}

/// Parses outline text into entries, one per well-formed line.
///
/// Lines that do not start with a dot-segmented numeric id are skipped (a
/// debug trace is left); unknown type words parse as Freeform.
pub fn text_to_structure(text: &str) -> Vec<OutlineEntry> {
    let mut entries = Vec::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let (id, rest) = line.split_once(' ').unwrap_or((line, ""));
        if id.is_empty() || !id.chars().all(|c| c.is_ascii_digit() || c == '.') {
            debug!("skipping outline line without a numeric id: {line}");
            continue;
        }
        let (type_word, name) = match rest.split_once(':') {
            Some((type_word, name)) => (type_word.trim(), name.trim()),
            None => (rest.trim(), ""),
        };
        let node_type = type_word.parse().unwrap_or(NodeType::Freeform);
        entries.push(OutlineEntry {
            id: id.to_string(),
            node_type,
            name: name.to_string(),
        });
    }
    entries
}

/// Replaces the project's structure tree with the parsed outline and syncs
/// companion tasks.
///
/// An entry with a non-empty name gets a companion task (created with
/// type-correct empty details if new, renamed if existing); an empty name
/// does not create one. Tasks whose nodes disappeared from the outline are
/// kept — the outline edits structure, it never deletes content.
pub fn apply_structure_text(project: &mut Project, text: &str) {
    let entries = text_to_structure(text);
    let mut tree = StructureTree::new();
    // Insert parents before children regardless of line order, so a
    // hand-reordered outline still attaches every node to its parent.
    let mut ordered: Vec<&OutlineEntry> = entries.iter().collect();
    ordered.sort_by(|a, b| compare_ids(&a.id, &b.id));
    for entry in ordered {
        tree.insert(StructureNode::new(entry.id.clone(), entry.node_type));
    }
    project.structure = tree;

    for entry in entries {
        if entry.name.is_empty() {
            continue;
        }
        match project.task_list.get_mut(&entry.id) {
            Some(task) => task.name = entry.name,
            None => {
                project.task_list.insert(
                    entry.id.clone(),
                    Task::new(entry.id, entry.name, entry.node_type),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Details;

    fn create_test_project() -> Project {
        let mut project = Project::named("demo");
        apply_structure_text(
            &mut project,
            "1 Area: Auth\n  1.1 Component: Login\n    1.1.1 Job: Implement login\n2 Freeform: Scratch\n",
        );
        project
    }

    #[test]
    fn parse_builds_tree_and_companion_tasks() {
        let project = create_test_project();
        assert_eq!(project.structure.node_type("1"), Some(NodeType::Area));
        assert_eq!(project.structure.node_type("1.1"), Some(NodeType::Component));
        let root = project.structure.roots.get("1").expect("root node");
        assert!(root.children.contains_key("1.1"));

        let auth = project.task_list.get("1").expect("companion task");
        assert_eq!(auth.name, "Auth");
        assert!(matches!(auth.details, Details::Area(_)));
        let login = project.task_list.get("1.1").expect("companion task");
        assert_eq!(login.name, "Login");
    }

    #[test]
    fn render_parse_round_trip_preserves_triples() {
        let project = create_test_project();
        let text = structure_to_text(&project);
        let entries = text_to_structure(&text);
        let triples: Vec<(String, NodeType, String)> = entries
            .into_iter()
            .map(|e| (e.id, e.node_type, e.name))
            .collect();
        assert_eq!(
            triples,
            vec![
                ("1".into(), NodeType::Area, "Auth".into()),
                ("1.1".into(), NodeType::Component, "Login".into()),
                ("1.1.1".into(), NodeType::Job, "Implement login".into()),
                ("2".into(), NodeType::Freeform, "Scratch".into()),
            ]
        );
    }

    #[test]
    fn indentation_noise_does_not_corrupt_hierarchy() {
        let mut project = Project::named("demo");
        // Wildly wrong indentation; hierarchy still comes from the ids.
        apply_structure_text(
            &mut project,
            "        1 Area: Auth\n1.1 Component: Login\n      1.1.1 Job: X\n",
        );
        let root = project.structure.roots.get("1").expect("root");
        let child = root.children.get("1.1").expect("child under 1");
        assert!(child.children.contains_key("1.1.1"));
    }

    #[test]
    fn child_listed_before_its_parent_still_nests() {
        let mut project = Project::named("demo");
        apply_structure_text(&mut project, "1.1 Component: Login\n1 Area: Auth\n");
        let root = project.structure.roots.get("1").expect("root");
        assert!(root.children.contains_key("1.1"));
        assert!(!project.structure.roots.contains_key("1.1"));
    }

    #[test]
    fn missing_parent_falls_back_to_root_level() {
        let mut project = Project::named("demo");
        apply_structure_text(&mut project, "1 Area: Auth\n7.7.7 Job: Orphan\n");
        assert!(project.structure.roots.contains_key("7.7.7"));
        assert_eq!(project.structure.node_type("7.7.7"), Some(NodeType::Job));
    }

    #[test]
    fn empty_name_creates_node_but_no_task() {
        let mut project = Project::named("demo");
        apply_structure_text(&mut project, "1 Area:\n");
        assert_eq!(project.structure.node_type("1"), Some(NodeType::Area));
        assert!(!project.task_list.contains_key("1"));
    }

    #[test]
    fn numeric_sort_orders_ten_after_three() {
        let mut project = Project::named("demo");
        apply_structure_text(
            &mut project,
            "1 Area: A\n  1.10 Job: Ten\n  1.3 Job: Three\n  1.2 Job: Two\n",
        );
        let text = structure_to_text(&project);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "1 Area: A",
                "  1.2 Job: Two",
                "  1.3 Job: Three",
                "  1.10 Job: Ten",
            ]
        );
    }

    #[test]
    fn malformed_lines_are_skipped() {
        let entries = text_to_structure("not an outline line\n1 Area: Ok\n");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id, "1");
    }

    #[test]
    fn unknown_type_word_parses_as_freeform() {
        let entries = text_to_structure("1 Gizmo: Thing\n");
        assert_eq!(entries[0].node_type, NodeType::Freeform);
    }

    #[test]
    fn reapplying_outline_keeps_existing_task_content() {
        let mut project = create_test_project();
        project.task_list.get_mut("1.1.1").unwrap().notes = "keep me".to_string();
        apply_structure_text(&mut project, "1 Area: Auth\n  1.1 Component: Login\n    1.1.1 Job: Renamed\n");
        let task = project.task_list.get("1.1.1").unwrap();
        assert_eq!(task.name, "Renamed");
        assert_eq!(task.notes, "keep me");
        // The scratch node is gone from the tree but its task would remain
        // if it had one; structure edits never delete tasks.
        assert!(project.structure.node_type("2").is_none());
    }
}
