//! Task Entity
//!
//! A unit of work belonging to exactly one column. Intra-column order is the
//! task's position in the board's `tasks` sequence.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use super::column::ColumnId;
use super::error::{DomainError, DomainResult};

pub type TaskId = u32;

/// A board task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique identifier within the board
    pub id: TaskId,
    /// Owning column
    pub column_id: ColumnId,
    /// Task text
    pub content: String,
    /// Optional due date
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
}

impl Task {
    pub fn new(id: TaskId, column_id: ColumnId, content: String) -> Self {
        Self {
            id,
            column_id,
            content,
            due_date: None,
        }
    }

    pub fn with_due_date(mut self, due_date: Option<DateTime<Utc>>) -> Self {
        self.due_date = due_date;
        self
    }
}

/// Parse a user-entered due date.
///
/// Accepts `YYYY-MM-DD HH:MM`, `YYYY-MM-DD` (midnight) or RFC 3339. Naive
/// inputs are taken as UTC. Blank input means no due date.
pub fn parse_due_date(input: &str) -> DomainResult<Option<DateTime<Utc>>> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(Some(dt.with_timezone(&Utc)));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(input, "%Y-%m-%d %H:%M") {
        return Ok(Some(Utc.from_utc_datetime(&naive)));
    }
    if let Some(naive) = NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
    {
        return Ok(Some(Utc.from_utc_datetime(&naive)));
    }

    Err(DomainError::InvalidInput(format!("unrecognized due date: {}", input)))
}
