//! HTTP request handlers
//!
//! This module organizes all API handlers into logical groups:
//! - `api` - Health check endpoint
//! - `chat` - Chat relay to the completion provider
//! - `call` - Outbound call dispatch through the telephony provider

pub mod api;
pub mod call;
pub mod chat;

// Re-export commonly used handlers for convenient access
pub use call::call_handler;
pub use chat::chat_handler;
