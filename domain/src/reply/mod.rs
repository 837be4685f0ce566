//! Reply composition.
//!
//! Emergency replies take precedence over anything else; an empty prediction
//! list asks a clarifying question; otherwise the top predictions are
//! summarized.

pub mod template;
