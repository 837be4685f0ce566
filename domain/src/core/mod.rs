//! Core domain concepts shared across all subdomains.
//!
//! - [`clock::Clock`] - injectable time source
//! - [`message::MessageText`] - validated user text
//! - [`error::DomainError`] - domain-level errors

pub mod clock;
pub mod error;
pub mod message;
