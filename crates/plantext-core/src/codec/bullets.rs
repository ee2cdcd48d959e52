//! Bullet-text codec: lossless conversion between an ordered list of strings
//! and a single newline-delimited string of `- ` items.
//!
//! The string form is the canonical internal representation of every
//! list-shaped field; the array form only survives in legacy persisted
//! documents and is converted on the way in (see [`deserialize_bullet_text`]).

use serde::{Deserialize, Deserializer};

/// Renders a list of items as bullet text, one `- ` item per line.
///
/// Items are trimmed; empty items are skipped. An empty input list yields an
/// empty string.
pub fn list_to_text<S: AsRef<str>>(items: &[S]) -> String {
    let mut out = String::new();
    for item in items {
        let item = item.as_ref().trim();
        if item.is_empty() {
            continue;
        }
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str("- ");
        out.push_str(item);
    }
    out
}

/// Splits bullet text back into a list of items.
///
/// Each line loses an optional leading `- ` marker and surrounding
/// whitespace; blank lines are dropped. For any list of non-empty,
/// newline-free strings this is the exact inverse of [`list_to_text`]. The
/// reverse direction is not guaranteed: free-form paragraphs collapse into
/// items, so the string is the canonical form and the list a legacy view.
pub fn text_to_list(text: &str) -> Vec<String> {
    text.lines()
        .map(|line| {
            let line = line.trim();
            let line = line.strip_prefix("- ").unwrap_or(line);
            let line = if line == "-" { "" } else { line };
            line.trim().to_string()
        })
        .filter(|item| !item.is_empty())
        .collect()
}

/// Re-canonicalizes bullet text: strips indentation and stray whitespace,
/// drops blank lines, and restores the `- ` marker on every item.
pub fn canonicalize(text: &str) -> String {
    list_to_text(&text_to_list(text))
}

/// Serde helper accepting either the canonical string form or the legacy
/// array-of-strings form for a bullet-text field.
///
/// Old persisted documents stored list fields as JSON arrays; they pass
/// through [`list_to_text`] transparently at construction time. Strings are
/// always preferred going forward, so serialization stays plain.
pub fn deserialize_bullet_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum TextOrItems {
        Text(String),
        Items(Vec<String>),
    }

    Ok(match TextOrItems::deserialize(deserializer)? {
        TextOrItems::Text(text) => text,
        TextOrItems::Items(items) => list_to_text(&items),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_to_text_joins_items_with_markers() {
        let items = ["Item 1".to_string(), "Item 2".to_string()];
        assert_eq!(list_to_text(&items), "- Item 1\n- Item 2");
    }

    #[test]
    fn list_to_text_skips_empty_items() {
        let items = ["One".to_string(), "  ".to_string(), String::new()];
        assert_eq!(list_to_text(&items), "- One");
        assert_eq!(list_to_text::<String>(&[]), "");
    }

    #[test]
    fn text_to_list_strips_markers_and_blanks() {
        assert_eq!(text_to_list("- Item 1\n- Item 2"), vec!["Item 1", "Item 2"]);
        assert_eq!(text_to_list("  - padded \n\n-\nplain"), vec!["padded", "plain"]);
        assert_eq!(text_to_list(""), Vec::<String>::new());
    }

    #[test]
    fn round_trip_is_exact_for_clean_lists() {
        let lists: Vec<Vec<String>> = vec![
            vec!["a".into()],
            vec!["Item 1".into(), "Item 2".into()],
            vec!["with - inner dash".into(), "trailing".into()],
        ];
        for list in lists {
            assert_eq!(text_to_list(&list_to_text(&list)), list);
        }
    }

    #[test]
    fn canonicalize_normalizes_free_form_text() {
        assert_eq!(canonicalize("  one\n\n- two  "), "- one\n- two");
    }

    #[test]
    fn legacy_arrays_deserialize_to_bullet_text() {
        #[derive(serde::Deserialize)]
        struct Holder {
            #[serde(deserialize_with = "deserialize_bullet_text")]
            field: String,
        }

        let from_array: Holder = serde_json::from_str(r#"{"field": ["A", "B"]}"#).unwrap();
        assert_eq!(from_array.field, "- A\n- B");

        let from_string: Holder = serde_json::from_str(r#"{"field": "- A\n- B"}"#).unwrap();
        assert_eq!(from_string.field, "- A\n- B");
    }
}
