//! Module for loading a corpus from files.
//!
//! The chunk table and metadata table are CSV with a header row; the model
//! artifact is a JSON object holding the `topic-document-matrix`.

mod utils;

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::{
    config::{DataPaths, VisualizationConfig},
    loader::{Corpus, CorpusLoader, LoaderError},
};
use utils::{parse_chunk_labels, parse_metadata, parse_topic_document_matrix};

/// Reads the chunk table, the optional metadata table and the model artifact
/// from disk.
#[derive(Debug, Clone)]
pub struct FileCorpusLoader {
    paths: DataPaths,
    label_column: String,
    title_column: String,
}

impl FileCorpusLoader {
    pub fn new(paths: DataPaths, label_column: impl Into<String>) -> Self {
        Self {
            paths,
            label_column: label_column.into(),
            title_column: "title".to_string(),
        }
    }

    pub fn from_config(config: &VisualizationConfig) -> Self {
        Self::new(config.resolve_paths(), config.label_column.clone())
            .with_title_column(config.title_column.clone())
    }

    pub fn with_title_column(mut self, title_column: impl Into<String>) -> Self {
        self.title_column = title_column.into();
        self
    }

    pub fn paths(&self) -> &DataPaths {
        &self.paths
    }
}

async fn read(path: &Path) -> Result<String, LoaderError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| LoaderError::Io {
            path: PathBuf::from(path),
            source,
        })
}

#[async_trait]
impl CorpusLoader for FileCorpusLoader {
    async fn load(&self) -> Result<Corpus, LoaderError> {
        let paths = &self.paths;

        let labels = parse_chunk_labels(&read(&paths.chunks).await?, &self.label_column, &paths.chunks)?;
        tracing::info!(chunks = labels.len(), path = %paths.chunks.display(), "loaded chunk table");

        let documents = match &paths.metadata {
            Some(path) => parse_metadata(&read(path).await?, &self.label_column, &self.title_column, path)?,
            None => BTreeMap::new(),
        };
        if paths.metadata.is_some() {
            tracing::info!(documents = documents.len(), "loaded metadata table");
        }

        let topic_matrix = parse_topic_document_matrix(&read(&paths.model).await?, &paths.model)?;
        let (rows, topics) = topic_matrix.dim();
        tracing::info!(rows, topics, path = %paths.model.display(), "loaded topic-document matrix");

        Ok(Corpus {
            labels,
            topic_matrix,
            documents,
        })
    }
}
