use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One addition request: two absent-capable digit sequences, optionally labeled.
/// Digits are most-significant-first; elements are carried as `i32` so that
/// out-of-range encodings survive deserialization and reach validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddCase {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub left: Option<Vec<i32>>,
    #[serde(default)]
    pub right: Option<Vec<i32>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Sum { digits: Vec<i32> },
    Absent,
    Invalid { reason: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseOutcome {
    pub case: AddCase,
    pub outcome: Outcome,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchSummary {
    pub total: usize,
    pub summed: usize,
    pub absent: usize,
    pub invalid: usize,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct BatchResult {
    pub outcomes: Vec<CaseOutcome>,
    pub csv_output: String,
    pub rejected: Vec<CaseOutcome>,
    pub summary: BatchSummary,
}
