//! HTTP handlers for flownote-api.

pub mod notes;
pub mod system;
