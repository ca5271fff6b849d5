use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config")]
    Parse(#[from] serde_json::Error),
}

/// Startup configuration for a visualization.
///
/// Deserialized from a JSON document; every field is optional and
/// falls back to the ChiLit data layout.
///
/// ```json
/// {
///     "data_dir": "./data/",
///     "chunk_size": 200,
///     "default_selection": ["squirrel", "bunny"]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VisualizationConfig {
    pub data_dir: PathBuf,
    pub chunk_size: u32,
    /// Chunk table file name; `{chunk_size}` is substituted.
    pub chunks_file: String,
    /// Metadata table file name; `null` skips the metadata table.
    pub metadata_file: Option<String>,
    pub model_file: String,
    pub label_column: String,
    pub title_column: String,
    pub default_selection: Vec<String>,
    pub bind: String,
}

impl Default for VisualizationConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data/"),
            chunk_size: 200,
            chunks_file: "ChiLit_Chunks_{chunk_size}.csv".to_string(),
            metadata_file: Some("ChiLit_metadata.csv".to_string()),
            model_file: "Optuna_ProdLDA_output.json".to_string(),
            label_column: "book_id".to_string(),
            title_column: "title".to_string(),
            default_selection: ["squirrel", "bunny", "mice", "rabbit", "jemima", "flopsy"]
                .into_iter()
                .map(str::to_string)
                .collect(),
            bind: "127.0.0.1:8050".to_string(),
        }
    }
}

/// Concrete input files of a visualization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    pub chunks: PathBuf,
    pub metadata: Option<PathBuf>,
    pub model: PathBuf,
}

impl VisualizationConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn resolve_paths(&self) -> DataPaths {
        let chunks = self
            .chunks_file
            .replace("{chunk_size}", &self.chunk_size.to_string());
        DataPaths {
            chunks: self.data_dir.join(chunks),
            metadata: self.metadata_file.as_ref().map(|f| self.data_dir.join(f)),
            model: self.data_dir.join(&self.model_file),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_chilit_layout() {
        let paths = VisualizationConfig::default().resolve_paths();
        assert_eq!(paths.chunks, PathBuf::from("./data/ChiLit_Chunks_200.csv"));
        assert_eq!(
            paths.metadata,
            Some(PathBuf::from("./data/ChiLit_metadata.csv"))
        );
        assert_eq!(paths.model, PathBuf::from("./data/Optuna_ProdLDA_output.json"));
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = VisualizationConfig::from_json_str(
            r#"{
                "data_dir": "/srv/chilit",
                "chunk_size": 500,
                "metadata_file": null
            }"#,
        )
        .unwrap();

        assert_eq!(config.label_column, "book_id");
        assert_eq!(config.default_selection.len(), 6);
        let paths = config.resolve_paths();
        assert_eq!(paths.chunks, PathBuf::from("/srv/chilit/ChiLit_Chunks_500.csv"));
        assert_eq!(paths.metadata, None);
    }

    #[test]
    fn test_unknown_fields_are_rejected() {
        let result = VisualizationConfig::from_json_str(r#"{"port": 8050}"#);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = VisualizationConfig::from_file("/nonexistent/topicscope.json");
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
