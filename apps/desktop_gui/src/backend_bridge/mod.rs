//! Bridge between the UI thread and the tokio worker that owns the gateways.

pub mod commands;
pub mod runtime;
