#[cfg(test)]
mod model_tests {
    use std::str::FromStr;

    use crate::models::{
        compare_ids, parent_id, Confidence, Details, NodeType, Session, SessionType,
        StructureNode, StructureTree, Task, WorkType,
    };

    fn create_test_tree() -> StructureTree {
        let mut tree = StructureTree::new();
        tree.insert(StructureNode::new("1", NodeType::Area));
        tree.insert(StructureNode::new("1.1", NodeType::Component));
        tree.insert(StructureNode::new("1.1.1", NodeType::Job));
        tree.insert(StructureNode::new("1.1.2", NodeType::Job));
        tree.insert(StructureNode::new("1.1.10", NodeType::Job));
        tree.insert(StructureNode::new("2", NodeType::Freeform));
        tree
    }

    #[test]
    fn test_parent_id_strips_last_segment() {
        assert_eq!(parent_id("1.2.3"), Some("1.2"));
        assert_eq!(parent_id("1.2"), Some("1"));
        assert_eq!(parent_id("1"), None);
    }

    #[test]
    fn test_compare_ids_is_numeric_per_segment() {
        use std::cmp::Ordering;
        assert_eq!(compare_ids("1.2.3", "1.2.10"), Ordering::Less);
        assert_eq!(compare_ids("1.10", "1.9"), Ordering::Greater);
        assert_eq!(compare_ids("2", "2"), Ordering::Equal);
    }

    #[test]
    fn test_tree_insert_and_lookup() {
        let tree = create_test_tree();
        assert_eq!(tree.node_type("1.1.1"), Some(NodeType::Job));
        assert_eq!(tree.node_type("1"), Some(NodeType::Area));
        assert_eq!(tree.node_type("9"), None);
        assert!(tree.roots.contains_key("1"));
        assert!(!tree.roots.contains_key("1.1"));
    }

    #[test]
    fn test_tree_missing_parent_falls_back_to_root() {
        let mut tree = StructureTree::new();
        tree.insert(StructureNode::new("3.4.5", NodeType::Job));
        // No "3.4" exists, so the node lands at the root level.
        assert!(tree.roots.contains_key("3.4.5"));
        assert_eq!(tree.node_type("3.4.5"), Some(NodeType::Job));
    }

    #[test]
    fn test_tree_walk_orders_numerically() {
        let tree = create_test_tree();
        let order: Vec<&str> = tree.walk().iter().map(|(n, _)| n.id.as_str()).collect();
        assert_eq!(order, ["1", "1.1", "1.1.1", "1.1.2", "1.1.10", "2"]);
        let depths: Vec<usize> = tree.walk().iter().map(|(_, d)| *d).collect();
        assert_eq!(depths, [0, 1, 2, 2, 2, 0]);
    }

    #[test]
    fn test_task_new_selects_details_variant_from_node_type() {
        let task = Task::new("1.1.1", "Login", NodeType::Job);
        assert_eq!(task.details.node_type(), NodeType::Job);
        assert!(matches!(task.details, Details::Job(_)));

        let area = Task::new("1", "Auth", NodeType::Area);
        assert!(matches!(area.details, Details::Area(_)));
    }

    #[test]
    fn test_append_notes_separates_with_blank_line() {
        let mut task = Task::new("1", "Auth", NodeType::Area);
        task.append_notes("first");
        task.append_notes("second");
        task.append_notes("");
        assert_eq!(task.notes, "first\n\nsecond");
    }

    #[test]
    fn test_checkbox_enums_round_trip_labels() {
        for work_type in WorkType::OPTIONS {
            assert_eq!(WorkType::from_str(work_type.as_str()), Ok(work_type));
        }
        assert_eq!(WorkType::default().as_str(), "");
        assert!(WorkType::from_str("nonsense").is_err());
        assert_eq!(Confidence::from_str("medium"), Ok(Confidence::Medium));
        assert_eq!(SessionType::from_str("Deep work"), Ok(SessionType::DeepWork));
    }

    #[test]
    fn test_session_open_and_duration() {
        let mut session = Session {
            start: "2024-01-01T10:00:00Z".to_string(),
            ..Session::default()
        };
        assert!(session.is_open());
        assert_eq!(session.duration_minutes(), None);

        session.end = "2024-01-01T11:30:00Z".to_string();
        assert!(!session.is_open());
        assert_eq!(session.duration_minutes(), Some(90));

        session.end = "not a timestamp".to_string();
        assert_eq!(session.duration_minutes(), None);
    }
}
