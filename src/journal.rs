//! Per-section edits and derived views over the record mapping.
//!
//! Every edit takes the current mapping and returns the next one; callers
//! persist it with [`RecordStore::save_all`](crate::storage::RecordStore::save_all).

use crate::date::{days_in_month, next_day_key, parse_date_key, same_month, to_date_key};
use crate::models::{
    CalendarDay, DayLog, DaySummary, DayView, ExpenseItem, LogMap, MonthOverview, Todo,
};
use crate::storage::{get_day, set_day};
use chrono::NaiveDate;
use rand::Rng;

/// Fixed cleaning areas of the room map.
pub const CLEANING_AREAS: [&str; 8] = [
    "veranda",
    "room",
    "closet",
    "kitchen",
    "toilet",
    "bath",
    "washbasin",
    "entrance",
];

const CARRY_OVER_JITTER: i64 = 100_000;

pub fn is_cleaning_area(area: &str) -> bool {
    CLEANING_AREAS.contains(&area)
}

pub fn all_todos_done(day: &DayLog) -> bool {
    let todos = day.todos();
    !todos.is_empty() && todos.iter().all(|todo| todo.done)
}

pub fn daily_expense_total(day: &DayLog) -> f64 {
    day.expenses().iter().map(|item| item.amount).sum()
}

/// Sum of every expense recorded in the calendar month containing `date`.
pub fn monthly_expense_total(all: &LogMap, date: NaiveDate) -> f64 {
    all.iter()
        .filter(|(key, _)| parse_date_key(key).is_some_and(|day| same_month(day, date)))
        .map(|(_, day)| daily_expense_total(day))
        .sum()
}

pub fn sorted_expenses(day: &DayLog) -> Vec<ExpenseItem> {
    let mut items = day.expenses().to_vec();
    items.sort_by_key(|item| item.created_at);
    items
}

/// Copies the unfinished todos of `key` onto the end of the next day's list.
///
/// Returns `None` when `key` is not a date-key. The source day is unchanged.
pub fn carry_over(all: &LogMap, key: &str, now_ms: i64, rng: &mut impl Rng) -> Option<LogMap> {
    let next_key = next_day_key(key)?;
    let day = get_day(all, key);
    let remain: Vec<&Todo> = day.todos().iter().filter(|t| !t.done).collect();
    if remain.is_empty() {
        return Some(all.clone());
    }

    let mut next_day = get_day(all, &next_key);
    let todos = next_day.todos.get_or_insert_with(Vec::new);
    for todo in remain {
        todos.push(Todo {
            id: now_ms + rng.random_range(0..CARRY_OVER_JITTER),
            ..todo.clone()
        });
    }
    Some(set_day(all, &next_key, next_day))
}

/// Newest todo goes first.
pub fn add_todo(all: &LogMap, key: &str, text: &str, now_ms: i64) -> LogMap {
    let mut day = get_day(all, key);
    let todos = day.todos.get_or_insert_with(Vec::new);
    todos.insert(
        0,
        Todo {
            id: now_ms,
            text: text.trim().to_string(),
            done: false,
        },
    );
    set_day(all, key, day)
}

pub fn toggle_todo(all: &LogMap, key: &str, id: i64) -> LogMap {
    let mut day = get_day(all, key);
    if let Some(todos) = day.todos.as_mut() {
        for todo in todos.iter_mut().filter(|todo| todo.id == id) {
            todo.done = !todo.done;
        }
    }
    set_day(all, key, day)
}

pub fn remove_todo(all: &LogMap, key: &str, id: i64) -> LogMap {
    let mut day = get_day(all, key);
    if let Some(todos) = day.todos.as_mut() {
        todos.retain(|todo| todo.id != id);
    }
    set_day(all, key, day)
}

/// Amounts are floored to whole units; returns `None` unless the result is
/// finite and positive.
pub fn add_expense(
    all: &LogMap,
    key: &str,
    amount: f64,
    note: Option<&str>,
    now_ms: i64,
) -> Option<LogMap> {
    let amount = amount.floor();
    if !amount.is_finite() || amount <= 0.0 {
        return None;
    }

    let note = note
        .map(str::trim)
        .filter(|note| !note.is_empty())
        .map(str::to_string);

    let mut day = get_day(all, key);
    day.expenses.get_or_insert_with(Vec::new).push(ExpenseItem {
        id: now_ms,
        amount,
        note,
        created_at: now_ms,
    });
    Some(set_day(all, key, day))
}

pub fn remove_expense(all: &LogMap, key: &str, id: i64) -> LogMap {
    let mut day = get_day(all, key);
    if let Some(expenses) = day.expenses.as_mut() {
        expenses.retain(|item| item.id != id);
    }
    set_day(all, key, day)
}

pub fn toggle_cleaning(all: &LogMap, key: &str, area: &str) -> LogMap {
    let mut day = get_day(all, key);
    let cleaning = day.cleaning.get_or_insert_with(Default::default);
    let flag = cleaning.entry(area.to_string()).or_insert(false);
    *flag = !*flag;
    set_day(all, key, day)
}

pub fn reset_cleaning(all: &LogMap, key: &str) -> LogMap {
    let mut day = get_day(all, key);
    day.cleaning = Some(Default::default());
    set_day(all, key, day)
}

pub fn day_summary(day: &DayLog) -> DaySummary {
    DaySummary {
        wake_time: short_time(day.wake_time.as_deref()),
        steps: non_empty(day.steps.as_deref()),
        study_minutes: non_empty(day.study_minutes.as_deref()),
        weight: non_empty(day.weight.as_deref()),
    }
}

pub fn day_view(all: &LogMap, date: NaiveDate) -> DayView {
    let key = to_date_key(date);
    let log = get_day(all, &key);
    DayView {
        summary: day_summary(&log),
        all_todos_done: all_todos_done(&log),
        sorted_expenses: sorted_expenses(&log),
        daily_total: daily_expense_total(&log),
        monthly_total: monthly_expense_total(all, date),
        date: key,
        log,
    }
}

pub fn month_overview(all: &LogMap, year: i32, month: u32) -> Option<MonthOverview> {
    let len = days_in_month(year, month)?;
    let days = (1..=len)
        .filter_map(|day| NaiveDate::from_ymd_opt(year, month, day))
        .map(|date| {
            let key = to_date_key(date);
            let log = get_day(all, &key);
            CalendarDay {
                wake_time: short_time(log.wake_time.as_deref()),
                all_todos_done: all_todos_done(&log),
                date: key,
            }
        })
        .collect();

    Some(MonthOverview { year, month, days })
}

// `HH:MM` from a time string that may carry seconds.
fn short_time(value: Option<&str>) -> Option<String> {
    non_empty(value).map(|time| time.chars().take(5).collect())
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}
