//! Bridge between the UI thread and the async registration backend.

pub mod commands;
pub mod runtime;
