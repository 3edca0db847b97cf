//! Note store abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the data access contract for note records.
//! - Keep SQLite query details out of the service and HTTP layers.
//!
//! # Invariants
//! - Store APIs return semantic errors (`NotFound`, `Validation`) in
//!   addition to DB transport errors.

pub mod note_store;
