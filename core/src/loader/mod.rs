pub mod builtins;

use async_trait::async_trait;
use ndarray::Array2;
use std::collections::BTreeMap;
use std::path::PathBuf;
use thiserror::Error;

use crate::chunk::DocumentInfo;

#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("Failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed CSV in {path}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("Malformed model artifact {path}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Column '{column}' not found in {path}")]
    MissingColumn { path: PathBuf, column: String },
    #[error("Topic row {row} in {path} has {found} documents, expected {expected}")]
    RaggedMatrix {
        path: PathBuf,
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// The startup inputs of a visualization.
#[derive(Debug, Clone, PartialEq)]
pub struct Corpus {
    /// One source-document label per chunk, in chunk order.
    pub labels: Vec<String>,
    /// Chunks x topics.
    pub topic_matrix: Array2<f64>,
    pub documents: BTreeMap<String, DocumentInfo>,
}

/// Reads a [`Corpus`] once, fully.
#[async_trait]
pub trait CorpusLoader: Send + Sync {
    async fn load(&self) -> Result<Corpus, LoaderError>;
}
