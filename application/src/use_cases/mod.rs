//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod load_knowledge;
pub mod orchestrator;
pub mod triage;

#[cfg(test)]
pub(crate) mod test_support;
