use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Every recorded day, keyed by date-key (`YYYY-MM-DD`).
pub type LogMap = BTreeMap<String, DayLog>;

/// Area key -> cleaned flag.
pub type CleaningState = BTreeMap<String, bool>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Todo {
    pub id: i64,
    pub text: String,
    pub done: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseItem {
    pub id: i64,
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub created_at: i64,
}

/// One day's record. Absent fields have not been recorded yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DayLog {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wake_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sleep_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub study_minutes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub todos: Option<Vec<Todo>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expenses: Option<Vec<ExpenseItem>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cleaning: Option<CleaningState>,
}

impl DayLog {
    pub fn todos(&self) -> &[Todo] {
        self.todos.as_deref().unwrap_or_default()
    }

    pub fn expenses(&self) -> &[ExpenseItem] {
        self.expenses.as_deref().unwrap_or_default()
    }
}

/// Partial update for a [`DayLog`]. A present field replaces the stored one
/// wholesale, lists and maps included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DayLogPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wake_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sleep_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub study_minutes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub todos: Option<Vec<Todo>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expenses: Option<Vec<ExpenseItem>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cleaning: Option<CleaningState>,
}

impl DayLogPatch {
    pub fn apply_to(self, day: &mut DayLog) {
        if self.wake_time.is_some() {
            day.wake_time = self.wake_time;
        }
        if self.sleep_time.is_some() {
            day.sleep_time = self.sleep_time;
        }
        if self.steps.is_some() {
            day.steps = self.steps;
        }
        if self.study_minutes.is_some() {
            day.study_minutes = self.study_minutes;
        }
        if self.weight.is_some() {
            day.weight = self.weight;
        }
        if self.memo.is_some() {
            day.memo = self.memo;
        }
        if self.todos.is_some() {
            day.todos = self.todos;
        }
        if self.expenses.is_some() {
            day.expenses = self.expenses;
        }
        if self.cleaning.is_some() {
            day.cleaning = self.cleaning;
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct TodoRequest {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct ExpenseRequest {
    pub amount: f64,
    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PhotoRequest {
    pub photo: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PhotoResponse {
    pub date: String,
    pub photo: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DaySummary {
    pub wake_time: Option<String>,
    pub steps: Option<String>,
    pub study_minutes: Option<String>,
    pub weight: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayView {
    pub date: String,
    pub log: DayLog,
    pub summary: DaySummary,
    pub all_todos_done: bool,
    pub sorted_expenses: Vec<ExpenseItem>,
    pub daily_total: f64,
    pub monthly_total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDay {
    pub date: String,
    pub wake_time: Option<String>,
    pub all_todos_done: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MonthOverview {
    pub year: i32,
    pub month: u32,
    pub days: Vec<CalendarDay>,
}
