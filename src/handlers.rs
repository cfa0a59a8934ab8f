use crate::errors::AppError;
use crate::models::{
    AnswerRequest, AnswerResponse, CommentRequest, CommentResponse, CopyResponse, CountRequest,
    CredentialsRequest, DateRequest, DayResponse, ExportQuery, Prompt, SessionResponse,
    ShiftRequest,
};
use crate::state::AppState;
use crate::storage::FileStore;
use crate::tracker::Tracker;
use crate::ui::render_index;
use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse},
    Json,
};

const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let tracker = state.tracker.lock().await;
    Html(render_index(tracker.user(), tracker.current_date()))
}

pub async fn get_session(State(state): State<AppState>) -> Json<SessionResponse> {
    let tracker = state.tracker.lock().await;
    Json(session_response(&tracker))
}

pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<CredentialsRequest>,
) -> Result<StatusCode, AppError> {
    let mut tracker = state.tracker.lock().await;
    tracker.register(&payload.username, &payload.password)?;
    Ok(StatusCode::CREATED)
}

pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<CredentialsRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    let mut tracker = state.tracker.lock().await;
    tracker.login(&payload.username, &payload.password)?;
    Ok(Json(session_response(&tracker)))
}

pub async fn logout(State(state): State<AppState>) -> Result<Json<SessionResponse>, AppError> {
    let mut tracker = state.tracker.lock().await;
    tracker.logout()?;
    Ok(Json(session_response(&tracker)))
}

pub async fn get_day(State(state): State<AppState>) -> Result<Json<DayResponse>, AppError> {
    let tracker = state.tracker.lock().await;
    Ok(Json(day_response(&tracker)?))
}

pub async fn set_date(
    State(state): State<AppState>,
    Json(payload): Json<DateRequest>,
) -> Result<Json<DayResponse>, AppError> {
    let mut tracker = state.tracker.lock().await;
    tracker.set_date(&payload.date)?;
    Ok(Json(day_response(&tracker)?))
}

pub async fn shift_date(
    State(state): State<AppState>,
    Json(payload): Json<ShiftRequest>,
) -> Result<Json<DayResponse>, AppError> {
    let mut tracker = state.tracker.lock().await;
    tracker.shift_date(payload.days)?;
    Ok(Json(day_response(&tracker)?))
}

pub async fn adjust_count(
    State(state): State<AppState>,
    Json(payload): Json<CountRequest>,
) -> Result<Json<DayResponse>, AppError> {
    let mut tracker = state.tracker.lock().await;
    tracker.adjust_count(payload.delta)?;
    Ok(Json(day_response(&tracker)?))
}

pub async fn add_comment(
    State(state): State<AppState>,
    Json(payload): Json<CommentRequest>,
) -> Result<Json<CommentResponse>, AppError> {
    let mut tracker = state.tracker.lock().await;
    let outcome = tracker.add_comment(&payload.text)?;
    Ok(Json(CommentResponse {
        outcome,
        day: day_response(&tracker)?,
    }))
}

pub async fn request_edit(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Json<Prompt>, AppError> {
    let tracker = state.tracker.lock().await;
    Ok(Json(tracker.request_edit(index)?))
}

pub async fn request_delete(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Json<Prompt>, AppError> {
    let tracker = state.tracker.lock().await;
    Ok(Json(tracker.request_delete(index)?))
}

pub async fn copy_comment(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Json<CopyResponse>, AppError> {
    let tracker = state.tracker.lock().await;
    Ok(Json(CopyResponse {
        text: tracker.copy_comment(index)?,
    }))
}

pub async fn answer_prompt(
    State(state): State<AppState>,
    Json(payload): Json<AnswerRequest>,
) -> Result<Json<AnswerResponse>, AppError> {
    let mut tracker = state.tracker.lock().await;
    let outcome = tracker.answer(payload.prompt, payload.reply)?;
    Ok(Json(AnswerResponse {
        outcome,
        day: day_response(&tracker)?,
    }))
}

pub async fn export(
    State(state): State<AppState>,
    Query(query): Query<ExportQuery>,
) -> Result<impl IntoResponse, AppError> {
    let tracker = state.tracker.lock().await;
    let file = tracker.export(query.range)?;
    let bytes = file.to_bytes()?;
    let disposition = content_disposition(&file.file_name);

    Ok((
        [
            (header::CONTENT_TYPE, XLSX_MIME.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    ))
}

/// Attachment header with an ASCII fallback name and an RFC 5987 UTF-8 name.
fn content_disposition(file_name: &str) -> String {
    let fallback: String = file_name
        .chars()
        .map(|ch| match ch {
            ' '..='~' if ch != '"' && ch != '\\' => ch,
            _ => '_',
        })
        .collect();
    let mut encoded = String::with_capacity(file_name.len());
    for byte in file_name.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                encoded.push(byte as char)
            }
            _ => encoded.push_str(&format!("%{byte:02X}")),
        }
    }
    format!("attachment; filename=\"{fallback}\"; filename*=UTF-8''{encoded}")
}

fn session_response(tracker: &Tracker<FileStore>) -> SessionResponse {
    SessionResponse {
        user: tracker.user().map(str::to_string),
        date: tracker.current_date().to_string(),
    }
}

fn day_response(tracker: &Tracker<FileStore>) -> Result<DayResponse, AppError> {
    let record = tracker.current_day()?;
    Ok(DayResponse {
        date: tracker.current_date().to_string(),
        count: record.count,
        comments: record.comments,
    })
}
