use ndarray::Array2;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

use crate::{chunk::DocumentInfo, loader::LoaderError};

#[derive(Debug, Deserialize)]
struct ModelArtifact {
    #[serde(rename = "topic-document-matrix")]
    topic_document_matrix: Vec<Vec<f64>>,
}

fn csv_error(path: &Path) -> impl Fn(csv::Error) -> LoaderError + '_ {
    move |source| LoaderError::Csv {
        path: path.to_path_buf(),
        source,
    }
}

fn column_index(
    headers: &csv::StringRecord,
    column: &str,
    path: &Path,
) -> Result<usize, LoaderError> {
    headers
        .iter()
        .position(|h| h.trim() == column)
        .ok_or_else(|| LoaderError::MissingColumn {
            path: path.to_path_buf(),
            column: column.to_string(),
        })
}

/// One label per data row of the chunk table; blank cells become `""`.
pub(super) fn parse_chunk_labels(
    text: &str,
    label_column: &str,
    path: &Path,
) -> Result<Vec<String>, LoaderError> {
    let mut reader = csv::Reader::from_reader(text.as_bytes());
    let idx = column_index(reader.headers().map_err(csv_error(path))?, label_column, path)?;

    reader
        .records()
        .map(|record| -> Result<String, LoaderError> {
            let record = record.map_err(csv_error(path))?;
            Ok(record.get(idx).unwrap_or_default().to_string())
        })
        .collect()
}

/// Metadata rows keyed by label. A missing title column yields untitled entries.
pub(super) fn parse_metadata(
    text: &str,
    label_column: &str,
    title_column: &str,
    path: &Path,
) -> Result<BTreeMap<String, DocumentInfo>, LoaderError> {
    let mut reader = csv::Reader::from_reader(text.as_bytes());
    let headers = reader.headers().map_err(csv_error(path))?.clone();
    let label_idx = column_index(&headers, label_column, path)?;
    let title_idx = column_index(&headers, title_column, path).ok();

    let mut documents = BTreeMap::new();
    for record in reader.records() {
        let record = record.map_err(csv_error(path))?;
        let label = record.get(label_idx).unwrap_or_default().to_string();
        let title = title_idx
            .and_then(|i| record.get(i))
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string);
        documents.insert(label, DocumentInfo { title });
    }
    Ok(documents)
}

/// Reads the topics x documents matrix of a model artifact and returns it
/// transposed, documents x topics.
pub(super) fn parse_topic_document_matrix(
    text: &str,
    path: &Path,
) -> Result<Array2<f64>, LoaderError> {
    let artifact: ModelArtifact =
        serde_json::from_str(text).map_err(|source| LoaderError::Json {
            path: path.to_path_buf(),
            source,
        })?;
    let topics = artifact.topic_document_matrix;
    let documents = topics.first().map_or(0, Vec::len);

    if let Some((row, found)) = topics
        .iter()
        .map(Vec::len)
        .enumerate()
        .find(|(_, len)| *len != documents)
    {
        return Err(LoaderError::RaggedMatrix {
            path: path.to_path_buf(),
            row,
            expected: documents,
            found,
        });
    }

    Ok(Array2::from_shape_fn((documents, topics.len()), |(doc, topic)| {
        topics[topic][doc]
    }))
}
