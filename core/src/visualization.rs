use serde::Serialize;
use std::collections::BTreeMap;

use crate::{
    chunk::{ChunkTable, DocumentInfo, LabelSet, Selection},
    config::VisualizationConfig,
    error::Result,
    figure::{render_figure_with_info, FigureSpec},
    loader::{builtins::file_loaders::FileCorpusLoader, Corpus, CorpusLoader},
    projection,
};

/// A dropdown entry: display text and the raw label it selects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelOption {
    pub label: String,
    pub value: String,
}

/// Projected chunks and everything needed to render them.
///
/// Built once at startup and read-only afterwards, so it can be shared
/// between request handlers behind an `Arc`.
#[derive(Debug, Clone)]
pub struct Visualization {
    table: ChunkTable,
    documents: BTreeMap<String, DocumentInfo>,
    default_selection: Selection,
    explained_variance_ratio: [f64; 2],
}

impl Visualization {
    /// Loads the configured files and builds the visualization.
    pub async fn load(config: &VisualizationConfig) -> Result<Self> {
        let loader = FileCorpusLoader::from_config(config);
        Self::load_with(&loader, config.default_selection.iter().cloned().collect()).await
    }

    pub async fn load_with(
        loader: &dyn CorpusLoader,
        default_selection: Selection,
    ) -> Result<Self> {
        let corpus = loader.load().await?;
        Self::from_corpus(corpus, default_selection)
    }

    /// Projects the corpus and partitions its chunks by label.
    ///
    /// # Errors
    /// Fails when the matrix is empty or non-finite, or when the chunk table
    /// and the matrix disagree on the number of chunks.
    pub fn from_corpus(corpus: Corpus, default_selection: Selection) -> Result<Self> {
        let projection = projection::project(&corpus.topic_matrix)?;
        let table = ChunkTable::new(corpus.labels, &projection.coords)?;
        let [pc1, pc2] = projection.explained_variance_ratio;
        tracing::info!(
            chunks = table.len(),
            labels = table.labels().len(),
            pc1,
            pc2,
            "projected chunks to topic space"
        );

        for label in default_selection.unmatched(table.labels()) {
            tracing::warn!(label, "default selection names an unknown label");
        }

        Ok(Self {
            table,
            documents: corpus.documents,
            default_selection,
            explained_variance_ratio: projection.explained_variance_ratio,
        })
    }

    pub fn render(&self, selection: &Selection) -> FigureSpec {
        tracing::debug!(selected = selection.len(), "rendering figure");
        render_figure_with_info(&self.table, selection, &self.documents)
    }

    pub fn label_options(&self) -> Vec<LabelOption> {
        self.labels()
            .iter()
            .map(|label| LabelOption {
                label: DocumentInfo::display_name(self.documents.get(label), label),
                value: label.to_string(),
            })
            .collect()
    }

    pub fn labels(&self) -> &LabelSet {
        self.table.labels()
    }

    pub fn table(&self) -> &ChunkTable {
        &self.table
    }

    pub fn default_selection(&self) -> &Selection {
        &self.default_selection
    }

    pub fn explained_variance_ratio(&self) -> [f64; 2] {
        self.explained_variance_ratio
    }
}
