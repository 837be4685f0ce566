//! Interactive chat module
//!
//! Provides a readline-based interactive chat interface over a triage session.

mod repl;

pub use repl::{ChatRepl, ReplAction};
