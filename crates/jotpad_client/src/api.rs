//! Typed HTTP client for the notes API.
//!
//! # Responsibility
//! - Map list/create/update/delete onto async calls.
//! - Turn non-2xx responses into `ClientError::Http` carrying the server's
//!   status and `{message}` text.
//!
//! # Invariants
//! - No retries and no client-side timeouts beyond the transport defaults.

use async_trait::async_trait;
use jotpad_core::{NewNote, Note, NoteChanges, NoteId};
use log::debug;
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("invalid base url `{0}`")]
    InvalidBaseUrl(String),

    #[error("request failed with status {status}: {message}")]
    Http { status: u16, message: String },

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ClientError {
    /// HTTP status for server-reported failures.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// The four note operations the UI needs.
#[async_trait]
pub trait NotesGateway: Send + Sync {
    async fn list(&self, owner_id: Option<&str>) -> Result<Vec<Note>, ClientError>;
    async fn create(&self, note: &NewNote) -> Result<Note, ClientError>;
    async fn update(&self, id: NoteId, changes: &NoteChanges) -> Result<Note, ClientError>;
    async fn remove(&self, id: NoteId) -> Result<(), ClientError>;
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

#[derive(Deserialize)]
struct DeleteAck {
    ok: bool,
}

/// reqwest-backed notes API client.
#[derive(Debug, Clone)]
pub struct NotesApi {
    http: Client,
    notes_url: Url,
}

impl NotesApi {
    /// Creates a client rooted at `base_url` (for example `http://localhost:5000`).
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let trimmed = base_url.trim().trim_end_matches('/');
        let notes_url = Url::parse(&format!("{trimmed}/api/notes"))
            .map_err(|_| ClientError::InvalidBaseUrl(base_url.to_string()))?;
        if notes_url.cannot_be_a_base() {
            return Err(ClientError::InvalidBaseUrl(base_url.to_string()));
        }

        Ok(Self {
            http: Client::new(),
            notes_url,
        })
    }

    fn note_url(&self, id: NoteId) -> Url {
        let mut url = self.notes_url.clone();
        // `cannot_be_a_base` was rejected in `new`, so segments are available.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.push(&id.to_string());
        }
        url
    }
}

#[async_trait]
impl NotesGateway for NotesApi {
    async fn list(&self, owner_id: Option<&str>) -> Result<Vec<Note>, ClientError> {
        let mut request = self.http.get(self.notes_url.clone());
        if let Some(owner_id) = owner_id.filter(|value| !value.is_empty()) {
            request = request.query(&[("userId", owner_id)]);
        }
        let notes: Vec<Note> = read_json(request.send().await?).await?;
        debug!("event=api_list module=client status=ok count={}", notes.len());
        Ok(notes)
    }

    async fn create(&self, note: &NewNote) -> Result<Note, ClientError> {
        let response = self
            .http
            .post(self.notes_url.clone())
            .json(note)
            .send()
            .await?;
        read_json(response).await
    }

    async fn update(&self, id: NoteId, changes: &NoteChanges) -> Result<Note, ClientError> {
        let response = self.http.put(self.note_url(id)).json(changes).send().await?;
        read_json(response).await
    }

    async fn remove(&self, id: NoteId) -> Result<(), ClientError> {
        let response = self.http.delete(self.note_url(id)).send().await?;
        let ack: DeleteAck = read_json(response).await?;
        if !ack.ok {
            return Err(ClientError::Http {
                status: 200,
                message: "delete was not acknowledged".to_string(),
            });
        }
        Ok(())
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();
    let body = response.bytes().await?;

    if !status.is_success() {
        let message = serde_json::from_slice::<ErrorBody>(&body)
            .map(|error| error.message)
            .unwrap_or_else(|_| {
                let text = String::from_utf8_lossy(&body).trim().to_string();
                if text.is_empty() {
                    status
                        .canonical_reason()
                        .unwrap_or("request failed")
                        .to_string()
                } else {
                    text
                }
            });
        return Err(ClientError::Http {
            status: status.as_u16(),
            message,
        });
    }

    Ok(serde_json::from_slice(&body)?)
}
