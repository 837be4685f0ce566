//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.
//! The session store contract lives in the domain layer
//! ([`triage_domain::SessionStore`]).

pub mod knowledge_source;
