//! Centralized default constants for FlowNote.
//!
//! Every crate references these instead of repeating literals, so the server,
//! the client and the CLI agree on ports, keys and fallback values.

// =============================================================================
// NOTES
// =============================================================================

/// Title saved by the editor when the title field is blank.
pub const UNTITLED_NOTE_TITLE: &str = "Untitled Note";

/// Separator for the editor's tag input.
pub const TAG_SEPARATOR: char = ',';

// =============================================================================
// SERVER
// =============================================================================

/// Default HTTP bind host.
pub const SERVER_HOST: &str = "0.0.0.0";

/// Default HTTP server port.
pub const SERVER_PORT: u16 = 3000;

/// Default database URL.
pub const DATABASE_URL: &str = "postgres://localhost/flownote";

/// Default CORS origins (local dev front-ends).
pub const ALLOWED_ORIGINS: &str = "http://localhost,http://localhost:5173,http://localhost:8080";

/// Default CORS max-age in seconds (1 hour).
pub const CORS_MAX_AGE_SECS: u64 = 3600;

/// Maximum request body size in bytes (1 MB; notes are short text).
pub const MAX_BODY_SIZE_BYTES: usize = 1024 * 1024;

/// Route prefix of the notes resource.
pub const NOTES_PATH: &str = "/api/notes";

// =============================================================================
// CLIENT
// =============================================================================

/// API base URL used when none is configured at build or run time.
pub const API_URL: &str = "http://localhost/api/notes";

/// Storage key holding the whole note collection in the local backend.
pub const LOCAL_STORAGE_KEY: &str = "flownote-notes";

/// Default directory for the local backend.
pub const LOCAL_DATA_DIR: &str = ".flownote";
