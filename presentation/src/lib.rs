//! Presentation layer for symptom-triage
//!
//! This crate contains CLI definitions, JSON request/response bodies,
//! the JSON-lines request server, console formatting, and the interactive
//! chat interface.

pub mod api;
pub mod chat;
pub mod cli;
pub mod config;
pub mod output;

// Re-export commonly used types
pub use api::{ApiRequest, ApiResponse, RequestServer, ServeError};
pub use chat::{ChatRepl, ReplAction};
pub use cli::commands::{Cli, Command};
pub use config::ReplConfig;
pub use output::console::ConsoleFormatter;
