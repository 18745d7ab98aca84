use std::sync::{Arc, Mutex, MutexGuard};

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use tracing::error;

use super::domain::{InterviewStatus, Position};
use super::intake::FormInput;
use super::session::{InterviewSession, SessionError};
use super::store::RecordStore;

/// Session shared between request handlers. One user, one lock.
pub type SharedSession<S> = Arc<Mutex<InterviewSession<S>>>;

/// Name offered to browsers when the table is downloaded.
pub const EXPORT_FILE_NAME: &str = "interview_data.csv";

/// Router builder exposing the interview table, form submission, and summaries.
pub fn interview_router<S>(session: SharedSession<S>) -> Router
where
    S: RecordStore + 'static,
{
    Router::new()
        .route(
            "/api/v1/interviews",
            get(table_handler::<S>)
                .post(submit_handler::<S>)
                .delete(clear_handler::<S>),
        )
        .route("/api/v1/interviews/summary", get(summary_handler::<S>))
        .route("/api/v1/interviews/export", get(export_handler::<S>))
        .route("/api/v1/interviews/options", get(options_handler))
        .with_state(session)
}

fn lock<S>(
    session: &SharedSession<S>,
) -> Result<MutexGuard<'_, InterviewSession<S>>, SessionError> {
    session.lock().map_err(|_| SessionError::Poisoned)
}

fn error_response(err: SessionError) -> Response {
    error!(error = %err, "interview request failed");
    let payload = json!({ "error": err.to_string() });
    (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
}

pub(crate) async fn table_handler<S>(State(session): State<SharedSession<S>>) -> Response
where
    S: RecordStore + 'static,
{
    match lock(&session) {
        Ok(guard) => (StatusCode::OK, Json(guard.records().table_view())).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn submit_handler<S>(
    State(session): State<SharedSession<S>>,
    Json(input): Json<FormInput>,
) -> Response
where
    S: RecordStore + 'static,
{
    let result = lock(&session).and_then(|mut guard| guard.submit(input));
    match result {
        Ok(record) => (StatusCode::CREATED, Json(record)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn clear_handler<S>(State(session): State<SharedSession<S>>) -> Response
where
    S: RecordStore + 'static,
{
    let result = lock(&session)
        .and_then(|mut guard| guard.clear_data().map(|records| records.len()));
    match result {
        Ok(total_entries) => {
            (StatusCode::OK, Json(json!({ "total_entries": total_entries }))).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn summary_handler<S>(State(session): State<SharedSession<S>>) -> Response
where
    S: RecordStore + 'static,
{
    match lock(&session) {
        Ok(guard) => (StatusCode::OK, Json(guard.summary().view())).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn export_handler<S>(State(session): State<SharedSession<S>>) -> Response
where
    S: RecordStore + 'static,
{
    match lock(&session).and_then(|guard| guard.export_csv()) {
        Ok(text) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, mime::TEXT_CSV_UTF_8.to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{EXPORT_FILE_NAME}\""),
                ),
            ],
            text,
        )
            .into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn options_handler() -> Json<serde_json::Value> {
    let positions: Vec<String> = Position::options().into_iter().map(String::from).collect();
    let statuses: Vec<String> = InterviewStatus::options()
        .into_iter()
        .map(String::from)
        .collect();
    Json(json!({ "positions": positions, "statuses": statuses }))
}
