use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/session", get(handlers::get_session))
        .route("/api/register", post(handlers::register))
        .route("/api/login", post(handlers::login))
        .route("/api/logout", post(handlers::logout))
        .route("/api/day", get(handlers::get_day))
        .route("/api/date", post(handlers::set_date))
        .route("/api/date/shift", post(handlers::shift_date))
        .route("/api/count", post(handlers::adjust_count))
        .route("/api/comments", post(handlers::add_comment))
        .route("/api/comments/:index/edit", post(handlers::request_edit))
        .route("/api/comments/:index/delete", post(handlers::request_delete))
        .route("/api/comments/:index/copy", get(handlers::copy_comment))
        .route("/api/prompts/answer", post(handlers::answer_prompt))
        .route("/api/export", get(handlers::export))
        .with_state(state)
}
