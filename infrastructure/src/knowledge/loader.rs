//! Knowledge base file loading.
//!
//! Accepts TOML or JSON. A document is either a table with an optional
//! `emergency_symptoms` list and `disease` records, or (JSON only) a bare
//! array of records, one per dataset row:
//!
//! ```toml
//! emergency_symptoms = ["chest pain"]
//!
//! [[disease]]
//! name = "Flu"
//! symptoms = ["fever", "cough"]   # or "fever, cough"
//! prevalence = 0.8                 # optional
//! emergency = false                # optional
//! ```
//!
//! Repeated rows for the same disease are merged into one entry with the
//! union of their symptoms.

use async_trait::async_trait;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;
use triage_application::{KnowledgeSourceError, KnowledgeSourcePort};
use triage_domain::{DiseaseKnowledge, DomainError};

const BUILTIN_KNOWLEDGE: &str = include_str!("builtin_knowledge.toml");

/// Errors raised while loading a knowledge base file
#[derive(Error, Debug)]
pub enum KnowledgeLoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid TOML in {path}: {source}")]
    Toml {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("unsupported knowledge file format: {0} (expected .toml or .json)")]
    UnsupportedFormat(PathBuf),

    #[error(transparent)]
    Invalid(#[from] DomainError),
}

impl From<KnowledgeLoadError> for KnowledgeSourceError {
    fn from(err: KnowledgeLoadError) -> Self {
        match err {
            e @ KnowledgeLoadError::Io { .. } => KnowledgeSourceError::Unreadable(e.to_string()),
            KnowledgeLoadError::Invalid(e) => KnowledgeSourceError::Invalid(e),
            other => KnowledgeSourceError::Malformed(other.to_string()),
        }
    }
}

/// Symptom list as an array or a comma-joined string
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SymptomList {
    List(Vec<String>),
    Joined(String),
}

impl SymptomList {
    fn into_vec(self) -> Vec<String> {
        match self {
            SymptomList::List(items) => items,
            SymptomList::Joined(joined) => joined.split(',').map(str::to_string).collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct DiseaseRecord {
    #[serde(alias = "disease")]
    name: String,
    symptoms: SymptomList,
    #[serde(default)]
    prevalence: Option<f64>,
    #[serde(default)]
    emergency: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct KnowledgeTable {
    emergency_symptoms: Vec<String>,
    #[serde(alias = "diseases")]
    disease: Vec<DiseaseRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum KnowledgeDocument {
    Table(KnowledgeTable),
    Rows(Vec<DiseaseRecord>),
}

impl KnowledgeDocument {
    fn into_knowledge(self) -> Result<DiseaseKnowledge, DomainError> {
        let table = match self {
            KnowledgeDocument::Table(table) => table,
            KnowledgeDocument::Rows(rows) => KnowledgeTable {
                emergency_symptoms: Vec::new(),
                disease: rows,
            },
        };

        let mut builder = DiseaseKnowledge::builder();
        for record in table.disease {
            builder.add_disease(
                &record.name,
                record.symptoms.into_vec(),
                record.prevalence,
                record.emergency,
            );
        }
        for symptom in &table.emergency_symptoms {
            builder.add_emergency_symptom(symptom);
        }
        builder.build()
    }
}

/// Parse a TOML knowledge document
pub fn parse_toml(text: &str, path: &Path) -> Result<DiseaseKnowledge, KnowledgeLoadError> {
    let table: KnowledgeTable = toml::from_str(text).map_err(|source| KnowledgeLoadError::Toml {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(KnowledgeDocument::Table(table).into_knowledge()?)
}

/// Parse a JSON knowledge document
pub fn parse_json(text: &str, path: &Path) -> Result<DiseaseKnowledge, KnowledgeLoadError> {
    let doc: KnowledgeDocument =
        serde_json::from_str(text).map_err(|source| KnowledgeLoadError::Json {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(doc.into_knowledge()?)
}

/// The knowledge base compiled into the binary
pub fn builtin_knowledge() -> Result<DiseaseKnowledge, KnowledgeLoadError> {
    parse_toml(BUILTIN_KNOWLEDGE, Path::new("<builtin>"))
}

/// Load a knowledge file, choosing the parser by extension
pub async fn load_knowledge_file(path: &Path) -> Result<DiseaseKnowledge, KnowledgeLoadError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    let parse: fn(&str, &Path) -> Result<DiseaseKnowledge, KnowledgeLoadError> =
        match extension.as_deref() {
            Some("toml") => parse_toml,
            Some("json") => parse_json,
            _ => return Err(KnowledgeLoadError::UnsupportedFormat(path.to_path_buf())),
        };

    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| KnowledgeLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    debug!("Read {} bytes of knowledge from {}", text.len(), path.display());
    parse(&text, path)
}

/// [`KnowledgeSourcePort`] over a TOML or JSON file
#[derive(Debug, Clone)]
pub struct FileKnowledgeSource {
    path: PathBuf,
}

impl FileKnowledgeSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl KnowledgeSourcePort for FileKnowledgeSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn load(&self) -> Result<DiseaseKnowledge, KnowledgeSourceError> {
        Ok(load_knowledge_file(&self.path).await?)
    }
}

/// [`KnowledgeSourcePort`] over the compiled-in knowledge base
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinKnowledgeSource;

#[async_trait]
impl KnowledgeSourcePort for BuiltinKnowledgeSource {
    fn describe(&self) -> String {
        "builtin".to_string()
    }

    async fn load(&self) -> Result<DiseaseKnowledge, KnowledgeSourceError> {
        Ok(builtin_knowledge()?)
    }
}
