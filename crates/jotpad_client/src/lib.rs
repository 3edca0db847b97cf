//! Client side of Jotpad notes.
//!
//! # Responsibility
//! - `api`: typed HTTP calls against the notes server.
//! - `state`: pure reducer holding the list, dialog and edit drafts.
//! - `dashboard`: wires user intents to the gateway and the reducer.
//!
//! # Invariants
//! - Nothing here renders. Front ends read `NotesState` and call `Dashboard`.

pub mod api;
pub mod dashboard;
pub mod state;

pub use api::{ClientError, NotesApi, NotesGateway};
pub use dashboard::Dashboard;
pub use state::{LoadStatus, NoteDraft, NotesAction, NotesState};
