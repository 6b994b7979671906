//! # flownote-client
//!
//! Client-side note store for FlowNote.
//!
//! A [`NoteStore`] owns the session's notes and runs every mutation through
//! one [`NoteBackend`]:
//! - [`RemoteBackend`] talks to the Notes API; the server assigns ids and
//!   timestamps.
//! - [`LocalBackend`] keeps the whole collection in local storage and seeds
//!   example notes on first use.
//!
//! ## Example
//!
//! ```rust,ignore
//! use flownote_client::{NoteStore, RemoteBackend};
//! use flownote_core::{NoteCategory, NoteDraft};
//!
//! let mut store = NoteStore::open(Box::new(RemoteBackend::new(
//!     "http://localhost:3000/api/notes",
//! )))
//! .await?;
//! store.create(NoteDraft::new(NoteCategory::Ideas).title("Hello")).await?;
//! ```

pub mod backend;
pub mod local;
pub mod remote;
pub mod seed;
pub mod store;

pub use backend::NoteBackend;
pub use local::{FileKeyValueStore, LocalBackend};
pub use remote::{default_api_url, RemoteBackend};
pub use seed::seed_notes;
pub use store::NoteStore;
