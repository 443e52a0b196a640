use crate::date::{next_day_key, parse_date_key};
use crate::errors::AppError;
use crate::journal;
use crate::models::{
    DayLog, DayLogPatch, DayView, ExpenseRequest, LogMap, MonthOverview, PhotoRequest,
    PhotoResponse, TodoRequest,
};
use crate::state::AppState;
use crate::storage::{get_day, update_day};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::{Local, NaiveDate, Utc};
use tracing::info;

pub async fn get_today(State(state): State<AppState>) -> Json<DayView> {
    let data = state.data.lock().await;
    Json(journal::day_view(&data, Local::now().date_naive()))
}

pub async fn get_calendar(
    State(state): State<AppState>,
    Path((year, month)): Path<(i32, u32)>,
) -> Result<Json<MonthOverview>, AppError> {
    let data = state.data.lock().await;
    journal::month_overview(&data, year, month)
        .map(Json)
        .ok_or_else(|| AppError::bad_request("invalid year or month"))
}

pub async fn get_day_view(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<Json<DayView>, AppError> {
    let day = parse_key(&date)?;
    let data = state.data.lock().await;
    Ok(Json(journal::day_view(&data, day)))
}

pub async fn patch_day(
    State(state): State<AppState>,
    Path(date): Path<String>,
    Json(patch): Json<DayLogPatch>,
) -> Result<Json<DayLog>, AppError> {
    parse_key(&date)?;
    let day = commit(&state, &date, |all| Ok(update_day(all, &date, patch))).await?;
    Ok(Json(day))
}

pub async fn add_todo(
    State(state): State<AppState>,
    Path(date): Path<String>,
    Json(payload): Json<TodoRequest>,
) -> Result<Json<DayLog>, AppError> {
    parse_key(&date)?;
    let text = payload.text.trim();
    if text.is_empty() {
        return Err(AppError::bad_request("todo text must not be empty"));
    }

    let now = now_ms();
    let day = commit(&state, &date, |all| Ok(journal::add_todo(all, &date, text, now))).await?;
    Ok(Json(day))
}

pub async fn toggle_todo(
    State(state): State<AppState>,
    Path((date, id)): Path<(String, i64)>,
) -> Result<Json<DayLog>, AppError> {
    parse_key(&date)?;
    let day = commit(&state, &date, |all| Ok(journal::toggle_todo(all, &date, id))).await?;
    Ok(Json(day))
}

pub async fn remove_todo(
    State(state): State<AppState>,
    Path((date, id)): Path<(String, i64)>,
) -> Result<Json<DayLog>, AppError> {
    parse_key(&date)?;
    let day = commit(&state, &date, |all| Ok(journal::remove_todo(all, &date, id))).await?;
    Ok(Json(day))
}

/// Returns the next day's record after the copy.
pub async fn carry_over(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<Json<DayLog>, AppError> {
    let next_key =
        next_day_key(&date).ok_or_else(|| AppError::bad_request("invalid date key"))?;

    let now = now_ms();
    let day = commit(&state, &next_key, |all| {
        journal::carry_over(all, &date, now, &mut rand::rng())
            .ok_or_else(|| AppError::bad_request("invalid date key"))
    })
    .await?;

    info!("carried open todos from {date} to {next_key}");
    Ok(Json(day))
}

pub async fn add_expense(
    State(state): State<AppState>,
    Path(date): Path<String>,
    Json(payload): Json<ExpenseRequest>,
) -> Result<Json<DayLog>, AppError> {
    parse_key(&date)?;
    let now = now_ms();
    let day = commit(&state, &date, |all| {
        journal::add_expense(all, &date, payload.amount, payload.note.as_deref(), now)
            .ok_or_else(|| AppError::bad_request("amount must be a positive number"))
    })
    .await?;
    Ok(Json(day))
}

pub async fn remove_expense(
    State(state): State<AppState>,
    Path((date, id)): Path<(String, i64)>,
) -> Result<Json<DayLog>, AppError> {
    parse_key(&date)?;
    let day = commit(&state, &date, |all| Ok(journal::remove_expense(all, &date, id))).await?;
    Ok(Json(day))
}

pub async fn toggle_cleaning(
    State(state): State<AppState>,
    Path((date, area)): Path<(String, String)>,
) -> Result<Json<DayLog>, AppError> {
    parse_key(&date)?;
    if !journal::is_cleaning_area(&area) {
        return Err(AppError::bad_request(format!("unknown cleaning area: {area}")));
    }

    let day = commit(&state, &date, |all| Ok(journal::toggle_cleaning(all, &date, &area))).await?;
    Ok(Json(day))
}

pub async fn reset_cleaning(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<Json<DayLog>, AppError> {
    parse_key(&date)?;
    let day = commit(&state, &date, |all| Ok(journal::reset_cleaning(all, &date))).await?;
    Ok(Json(day))
}

pub async fn get_photo(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<Json<PhotoResponse>, AppError> {
    let photo = state.photos.get_photo(&date).await?;
    Ok(Json(PhotoResponse { date, photo }))
}

pub async fn put_photo(
    State(state): State<AppState>,
    Path(date): Path<String>,
    Json(payload): Json<PhotoRequest>,
) -> Result<StatusCode, AppError> {
    if payload.photo.is_empty() {
        return Err(AppError::bad_request("photo must not be empty"));
    }

    state.photos.save_photo(&date, &payload.photo).await?;
    info!("saved photo for {date} ({} bytes)", payload.photo.len());
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_photo(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<StatusCode, AppError> {
    state.photos.delete_photo(&date).await?;
    info!("deleted photo for {date}");
    Ok(StatusCode::NO_CONTENT)
}

/// Applies `edit` to the mapping, persists the result, then swaps it in.
/// Returns the record stored under `key` afterwards.
async fn commit<F>(state: &AppState, key: &str, edit: F) -> Result<DayLog, AppError>
where
    F: FnOnce(&LogMap) -> Result<LogMap, AppError>,
{
    let mut data = state.data.lock().await;
    let next = edit(&data)?;

    let records = state.records.clone();
    let next = tokio::task::spawn_blocking(move || records.save_all(&next).map(|()| next))
        .await??;
    *data = next;

    Ok(get_day(&data, key))
}

fn parse_key(date: &str) -> Result<NaiveDate, AppError> {
    parse_date_key(date).ok_or_else(|| AppError::bad_request("invalid date key"))
}

fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}
