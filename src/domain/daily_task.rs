//! Daily to-do item.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyTask {
    /// Storage-assigned identifier; `0` until persisted.
    pub id: i64,
    pub description: String,
    pub is_completed: bool,
    pub due_date: NaiveDateTime,
}

impl DailyTask {
    /// Create an open (not completed) task.
    pub fn new(description: impl Into<String>, due_date: NaiveDateTime) -> Self {
        Self {
            id: 0,
            description: description.into(),
            is_completed: false,
            due_date,
        }
    }

    /// Create an open task due at the start of `day`.
    pub fn due_on(description: impl Into<String>, day: NaiveDate) -> Self {
        Self::new(description, day.and_time(chrono::NaiveTime::MIN))
    }
}
