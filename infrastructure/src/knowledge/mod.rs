//! Knowledge base adapters
//!
//! - [`FileKnowledgeSource`] - TOML or JSON dataset on disk
//! - [`BuiltinKnowledgeSource`] - the dataset compiled into the binary

mod loader;

pub use loader::{
    BuiltinKnowledgeSource, FileKnowledgeSource, KnowledgeLoadError, builtin_knowledge,
    load_knowledge_file, parse_json, parse_toml,
};
