use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub text: String,
    pub time: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DayRecord {
    pub count: u64,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

/// Day records keyed by ISO date (`YYYY-MM-DD`).
pub type TaskLog = BTreeMap<String, DayRecord>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RangeKind {
    #[default]
    Week,
    Month,
    Year,
}

impl RangeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            RangeKind::Week => "week",
            RangeKind::Month => "month",
            RangeKind::Year => "year",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRow {
    pub date: String,
    pub count: u64,
    pub comments: String,
}

/// Pending confirmation for a comment edit or delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Prompt {
    EditComment {
        date: String,
        index: usize,
        current: String,
    },
    DeleteComment {
        date: String,
        index: usize,
        text: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reply", content = "text", rename_all = "snake_case")]
pub enum Reply {
    Cancel,
    Confirm,
    Text(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Applied,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommentOutcome {
    Added,
    /// Whitespace-only text; nothing was stored.
    Rejected,
}

#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct CountRequest {
    pub delta: i64,
}

#[derive(Debug, Deserialize)]
pub struct CommentRequest {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct DateRequest {
    pub date: String,
}

#[derive(Debug, Deserialize)]
pub struct ShiftRequest {
    pub days: i64,
}

#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    pub prompt: Prompt,
    pub reply: Reply,
}

#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    #[serde(default)]
    pub range: RangeKind,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionResponse {
    pub user: Option<String>,
    pub date: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DayResponse {
    pub date: String,
    pub count: u64,
    pub comments: Vec<Comment>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CommentResponse {
    pub outcome: CommentOutcome,
    pub day: DayResponse,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AnswerResponse {
    pub outcome: Outcome,
    pub day: DayResponse,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CopyResponse {
    pub text: String,
}
