//! Bridge between the UI thread and the backend worker that owns the async runtime.

pub mod commands;
pub mod runtime;
