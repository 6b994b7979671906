//! # flownote-core
//!
//! Core types, traits, and rules for FlowNote.
//!
//! This crate provides the note data model, the filter engine, the editor's
//! save rules and the repository trait that the other FlowNote crates build
//! on.

pub mod defaults;
pub mod editor;
pub mod error;
pub mod filter;
pub mod models;
pub mod traits;

// Re-export commonly used types at crate root
pub use editor::{join_tags, parse_tags, EditorInput};
pub use error::{Error, Result};
pub use filter::{filter_notes, pinned_first, NoteFilters};
pub use models::*;
pub use traits::*;
