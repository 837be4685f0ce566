//! Session storage adapters
//!
//! - [`InMemorySessionStore`] - volatile [`SessionStore`](triage_domain::SessionStore)
//! - [`CleanupScheduler`] - periodic expiry of idle sessions

mod cleanup;
mod store;

pub use cleanup::{CleanupHandle, CleanupScheduler};
pub use store::InMemorySessionStore;
