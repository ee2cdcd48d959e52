//! Estimation block attached to Job tasks.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::codec::bullets::deserialize_bullet_text;

/// Kind of work being estimated. Rendered as a checkbox group; no checked
/// box means [`WorkType::Unspecified`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum WorkType {
    #[default]
    #[serde(rename = "")]
    Unspecified,
    Feature,
    BugFix,
    Refactoring,
    Research,
}

impl WorkType {
    /// All selectable options in render order.
    pub const OPTIONS: [WorkType; 4] = [
        WorkType::Feature,
        WorkType::BugFix,
        WorkType::Refactoring,
        WorkType::Research,
    ];

    /// Checkbox label; empty for [`WorkType::Unspecified`].
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkType::Unspecified => "",
            WorkType::Feature => "Feature",
            WorkType::BugFix => "Bug fix",
            WorkType::Refactoring => "Refactoring",
            WorkType::Research => "Research",
        }
    }
}

impl FromStr for WorkType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WorkType::OPTIONS
            .iter()
            .find(|option| option.as_str().eq_ignore_ascii_case(s.trim()))
            .copied()
            .ok_or_else(|| format!("Invalid work type: {s}"))
    }
}

/// How the effort number was produced.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum EstimateMethod {
    #[default]
    #[serde(rename = "")]
    Unspecified,
    Analogy,
    Decomposition,
    GutFeel,
}

impl EstimateMethod {
    /// All selectable options in render order.
    pub const OPTIONS: [EstimateMethod; 3] = [
        EstimateMethod::Analogy,
        EstimateMethod::Decomposition,
        EstimateMethod::GutFeel,
    ];

    /// Checkbox label; empty for [`EstimateMethod::Unspecified`].
    pub fn as_str(&self) -> &'static str {
        match self {
            EstimateMethod::Unspecified => "",
            EstimateMethod::Analogy => "Analogy",
            EstimateMethod::Decomposition => "Decomposition",
            EstimateMethod::GutFeel => "Gut feel",
        }
    }
}

impl FromStr for EstimateMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EstimateMethod::OPTIONS
            .iter()
            .find(|option| option.as_str().eq_ignore_ascii_case(s.trim()))
            .copied()
            .ok_or_else(|| format!("Invalid estimate method: {s}"))
    }
}

/// Confidence in the estimate.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    #[default]
    #[serde(rename = "")]
    Unspecified,
    Low,
    Medium,
    High,
}

impl Confidence {
    /// All selectable options in render order.
    pub const OPTIONS: [Confidence; 3] = [Confidence::Low, Confidence::Medium, Confidence::High];

    /// Checkbox label; empty for [`Confidence::Unspecified`].
    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::Unspecified => "",
            Confidence::Low => "Low",
            Confidence::Medium => "Medium",
            Confidence::High => "High",
        }
    }
}

impl FromStr for Confidence {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Confidence::OPTIONS
            .iter()
            .find(|option| option.as_str().eq_ignore_ascii_case(s.trim()))
            .copied()
            .ok_or_else(|| format!("Invalid confidence: {s}"))
    }
}

/// Effort numbers and their derivation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Effort {
    /// Estimation method used
    #[serde(default)]
    pub method: EstimateMethod,

    /// Base effort in hours, before buffer
    #[serde(default)]
    pub base_hours: f64,

    /// Buffer on top of the base, in percent
    #[serde(default)]
    pub buffer_percent: f64,

    /// Why the buffer is sized the way it is
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub buffer_reason: String,

    /// Total effort in hours
    #[serde(default)]
    pub total_hours: f64,
}

/// A named schedule milestone.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Milestone {
    pub name: String,
    pub date: String,
}

/// Scheduling data for the estimate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Schedule {
    /// Planned start date (free-form date text)
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub start_date: String,

    /// Planned finish date (free-form date text)
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub target_finish: String,

    /// Ordered list of milestones
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub milestones: Vec<Milestone>,
}

/// Reflection fields filled in after estimating.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct PostEstimateNotes {
    /// Reasons the job could turn out smaller (bullet-text)
    #[serde(
        default,
        deserialize_with = "deserialize_bullet_text",
        skip_serializing_if = "String::is_empty"
    )]
    pub could_be_smaller: String,

    /// Reasons the job could turn out bigger (bullet-text)
    #[serde(
        default,
        deserialize_with = "deserialize_bullet_text",
        skip_serializing_if = "String::is_empty"
    )]
    pub could_be_bigger: String,

    /// Factors ignored in the previous estimate (bullet-text)
    #[serde(
        default,
        deserialize_with = "deserialize_bullet_text",
        skip_serializing_if = "String::is_empty"
    )]
    pub ignored_last_time: String,
}

/// Full estimation block for a Job task.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Estimation {
    /// Kind of work
    #[serde(default)]
    pub work_type: WorkType,

    /// Assumptions behind the estimate (bullet-text)
    #[serde(
        default,
        deserialize_with = "deserialize_bullet_text",
        skip_serializing_if = "String::is_empty"
    )]
    pub assumptions: String,

    /// Effort numbers
    #[serde(default)]
    pub effort: Effort,

    /// Confidence level
    #[serde(default)]
    pub confidence: Confidence,

    /// Schedule and milestones
    #[serde(default)]
    pub schedule: Schedule,

    /// Post-estimate reflections
    #[serde(default)]
    pub post_estimate_notes: PostEstimateNotes,
}
