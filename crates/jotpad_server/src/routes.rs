use std::{sync::Arc, time::Instant};

use axum::{
    extract::{rejection::JsonRejection, Path, Query, Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
    Json,
};
use jotpad_core::{NewNote, Note, NoteChanges, NoteId};
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::{error::ApiError, state::AppState};

#[derive(Debug, Default, Deserialize)]
pub struct ListNotesQuery {
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
}

/// Create body. Every field is optional so a missing title maps to 400
/// with a clear message instead of a generic decode failure.
#[derive(Debug, Default, Deserialize)]
pub struct CreateNoteBody {
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
    pub title: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateNoteBody {
    pub title: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeleteAck {
    pub ok: bool,
}

pub async fn health_handler() -> &'static str {
    "API is running..."
}

pub async fn list_notes(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListNotesQuery>,
) -> Result<Json<Vec<Note>>, ApiError> {
    let notes = state
        .with_service(move |service| service.list_notes(query.user_id))
        .await?;

    Ok(Json(notes))
}

pub async fn create_note(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateNoteBody>, JsonRejection>,
) -> Result<(StatusCode, Json<Note>), ApiError> {
    let Json(body) = payload?;
    let title = body.title.ok_or(ApiError::MissingTitle)?;
    let note = NewNote::new(title, body.content.unwrap_or_default()).owned_by(body.user_id);

    let created = state
        .with_service(move |service| service.create_note(note))
        .await?;

    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_note(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateNoteBody>, JsonRejection>,
) -> Result<Json<Note>, ApiError> {
    let id = parse_note_id(&id)?;
    let Json(body) = payload?;
    let changes = NoteChanges {
        title: body.title,
        content: body.content,
    };

    let updated = state
        .with_service(move |service| service.update_note(id, changes))
        .await?;

    Ok(Json(updated))
}

pub async fn delete_note(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<DeleteAck>, ApiError> {
    let id = parse_note_id(&id)?;
    state
        .with_service(move |service| service.delete_note(id))
        .await?;

    Ok(Json(DeleteAck { ok: true }))
}

/// Ids that are not UUIDs cannot exist in the store, so they are unknown.
fn parse_note_id(raw: &str) -> Result<NoteId, ApiError> {
    NoteId::parse_str(raw).map_err(|_| ApiError::NotFound(raw.to_string()))
}

/// Access log: one line per request, no bodies.
pub async fn log_requests(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let started_at = Instant::now();

    let response = next.run(req).await;

    let http_status = response.status();
    let duration_ms = started_at.elapsed().as_millis();
    if http_status.is_server_error() {
        warn!(
            "event=http_request module=server status=error method={method} path={path} http_status={} duration_ms={duration_ms}",
            http_status.as_u16()
        );
    } else {
        info!(
            "event=http_request module=server status=ok method={method} path={path} http_status={} duration_ms={duration_ms}",
            http_status.as_u16()
        );
    }

    response
}
