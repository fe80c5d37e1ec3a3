//! Error types surfaced at the HTTP boundary

pub mod app_error;
