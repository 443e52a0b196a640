use crate::handlers;
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/today", get(handlers::get_today))
        .route("/api/calendar/:year/:month", get(handlers::get_calendar))
        .route(
            "/api/days/:date",
            get(handlers::get_day_view).patch(handlers::patch_day),
        )
        .route("/api/days/:date/todos", post(handlers::add_todo))
        .route("/api/days/:date/todos/carry-over", post(handlers::carry_over))
        .route("/api/days/:date/todos/:id/toggle", post(handlers::toggle_todo))
        .route(
            "/api/days/:date/todos/:id",
            axum::routing::delete(handlers::remove_todo),
        )
        .route("/api/days/:date/expenses", post(handlers::add_expense))
        .route(
            "/api/days/:date/expenses/:id",
            axum::routing::delete(handlers::remove_expense),
        )
        .route(
            "/api/days/:date/cleaning",
            axum::routing::delete(handlers::reset_cleaning),
        )
        .route(
            "/api/days/:date/cleaning/:area/toggle",
            post(handlers::toggle_cleaning),
        )
        .route(
            "/api/days/:date/photo",
            get(handlers::get_photo)
                .put(handlers::put_photo)
                .delete(handlers::delete_photo),
        )
        .with_state(state)
}
