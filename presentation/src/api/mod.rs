//! JSON API surface
//!
//! Request and response bodies, and a JSON-lines server that dispatches
//! them to the [`ConversationOrchestrator`](triage_application::ConversationOrchestrator).

pub mod dto;
pub mod server;

pub use server::{ApiRequest, ApiResponse, RequestServer, ServeError};
