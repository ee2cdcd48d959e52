//! Time-log session model.

use std::str::FromStr;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::codec::bullets::deserialize_bullet_text;

/// Kind of session. Rendered as a checkbox group; no checked box means
/// [`SessionType::Unspecified`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SessionType {
    #[default]
    #[serde(rename = "")]
    Unspecified,
    DeepWork,
    Collaboration,
    Planning,
    Admin,
}

impl SessionType {
    /// All selectable options in render order.
    pub const OPTIONS: [SessionType; 4] = [
        SessionType::DeepWork,
        SessionType::Collaboration,
        SessionType::Planning,
        SessionType::Admin,
    ];

    /// Checkbox label; empty for [`SessionType::Unspecified`].
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionType::Unspecified => "",
            SessionType::DeepWork => "Deep work",
            SessionType::Collaboration => "Collaboration",
            SessionType::Planning => "Planning",
            SessionType::Admin => "Admin",
        }
    }
}

impl FromStr for SessionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SessionType::OPTIONS
            .iter()
            .find(|option| option.as_str().eq_ignore_ascii_case(s.trim()))
            .copied()
            .ok_or_else(|| format!("Invalid session type: {s}"))
    }
}

/// Energy level at the start and end of a session (1-5 scale; 0 = unset).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct EnergyLevel {
    #[serde(default)]
    pub start: u32,
    #[serde(default)]
    pub end: u32,
}

/// Defects surfaced during a session (bullet-text fields).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Defects {
    #[serde(
        default,
        deserialize_with = "deserialize_bullet_text",
        skip_serializing_if = "String::is_empty"
    )]
    pub found: String,

    #[serde(
        default,
        deserialize_with = "deserialize_bullet_text",
        skip_serializing_if = "String::is_empty"
    )]
    pub fixed: String,
}

/// End-of-session retrospective (bullet-text fields).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Retrospective {
    #[serde(
        default,
        deserialize_with = "deserialize_bullet_text",
        skip_serializing_if = "String::is_empty"
    )]
    pub what_went_well: String,

    #[serde(
        default,
        deserialize_with = "deserialize_bullet_text",
        skip_serializing_if = "String::is_empty"
    )]
    pub what_needs_improvement: String,

    #[serde(
        default,
        deserialize_with = "deserialize_bullet_text",
        skip_serializing_if = "String::is_empty"
    )]
    pub lessons_learned: String,
}

/// One time-log entry.
///
/// Timestamps are ISO-8601 strings as typed by the user; an empty `end`
/// marks an active (open) session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Session {
    /// Session start (ISO-8601)
    #[serde(default)]
    pub start: String,

    /// Session end (ISO-8601); empty while the session is open
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub end: String,

    /// Free-form session notes
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub notes: String,

    /// What interrupted the session
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub interruptions: String,

    /// Total interrupted time in minutes
    #[serde(default)]
    pub interruption_minutes: u32,

    /// Ids of tasks worked on, in order. Always a list; this field is never
    /// migrated to bullet-text.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tasks: Vec<String>,

    /// Kind of session
    #[serde(default)]
    pub session_type: SessionType,

    /// Planned duration in minutes
    #[serde(default)]
    pub planned_minutes: u32,

    /// Focus rating, 1-5 (0 = unset)
    #[serde(default)]
    pub focus_rating: u32,

    /// Energy at start and end
    #[serde(default)]
    pub energy: EnergyLevel,

    /// Number of context switches
    #[serde(default)]
    pub context_switches: u32,

    /// Defects found and fixed
    #[serde(default)]
    pub defects: Defects,

    /// What the session produced
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub deliverables: String,

    /// Blockers encountered (bullet-text)
    #[serde(
        default,
        deserialize_with = "deserialize_bullet_text",
        skip_serializing_if = "String::is_empty"
    )]
    pub blockers: String,

    /// End-of-session retrospective
    #[serde(default)]
    pub retrospective: Retrospective,
}

impl Session {
    /// True while the session has no end timestamp.
    pub fn is_open(&self) -> bool {
        self.end.trim().is_empty()
    }

    /// Elapsed minutes between start and end.
    ///
    /// Returns `None` for open sessions and for endpoints that do not parse
    /// as ISO-8601 timestamps (the strings are human-edited and kept
    /// verbatim either way).
    pub fn duration_minutes(&self) -> Option<i64> {
        if self.is_open() {
            return None;
        }
        let start: Timestamp = self.start.trim().parse().ok()?;
        let end: Timestamp = self.end.trim().parse().ok()?;
        Some((end.as_second() - start.as_second()) / 60)
    }
}
