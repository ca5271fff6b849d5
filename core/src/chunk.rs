use ndarray::Array2;
use std::collections::BTreeSet;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChunkTableError {
    #[error("Label source has {labels} chunks but the projection has {rows} rows")]
    CountMismatch { labels: usize, rows: usize },
    #[error("Projection must have 2 columns, got {0}")]
    NotPlanar(usize),
}

/// One row of the projected topic-document matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct Chunk {
    pub index: usize,
    pub label: String,
    pub coords: [f64; 2],
}

/// Display metadata for a source document, keyed by its label.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentInfo {
    pub title: Option<String>,
}

impl DocumentInfo {
    /// `title (label)` when a non-empty title is known, else the bare label.
    pub fn display_name(info: Option<&Self>, label: &str) -> String {
        match info.and_then(|i| i.title.as_deref()).filter(|t| !t.is_empty()) {
            Some(title) => format!("{title} ({label})"),
            None => label.to_string(),
        }
    }
}

/// The sorted, deduplicated labels of a chunk table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelSet {
    labels: Vec<String>,
}

impl LabelSet {
    pub fn from_labels<'a>(labels: impl IntoIterator<Item = &'a str>) -> Self {
        let labels = labels
            .into_iter()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect();
        Self { labels }
    }

    /// Position of `label` in sorted order, used as the palette index.
    pub fn rank(&self, label: &str) -> Option<usize> {
        self.labels
            .binary_search_by(|probe| probe.as_str().cmp(label))
            .ok()
    }

    pub fn contains(&self, label: &str) -> bool {
        self.rank(label).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Labels the user asked to highlight.
///
/// Labels missing from the [`LabelSet`] are kept but never match a group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection(BTreeSet<String>);

impl Selection {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn contains(&self, label: &str) -> bool {
        self.0.contains(label)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Selected labels that match no chunk.
    pub fn unmatched<'a>(&'a self, labels: &'a LabelSet) -> impl Iterator<Item = &'a str> {
        self.iter().filter(|label| !labels.contains(label))
    }
}

impl<S: Into<String>> FromIterator<S> for Selection {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// All chunks, their label set, and the chunk indices of every label group.
#[derive(Debug, Clone)]
pub struct ChunkTable {
    chunks: Vec<Chunk>,
    labels: LabelSet,
    // groups[rank] holds the indices of chunks whose label has that rank
    groups: Vec<Vec<usize>>,
}

impl ChunkTable {
    /// Pairs each label with its projected row.
    ///
    /// # Errors
    /// * `CountMismatch` if `labels` and `coords` disagree on the number of chunks.
    /// * `NotPlanar` if `coords` does not have exactly two columns.
    pub fn new(labels: Vec<String>, coords: &Array2<f64>) -> Result<Self, ChunkTableError> {
        let (rows, cols) = coords.dim();
        if cols != 2 {
            return Err(ChunkTableError::NotPlanar(cols));
        }
        if labels.len() != rows {
            return Err(ChunkTableError::CountMismatch {
                labels: labels.len(),
                rows,
            });
        }

        let label_set = LabelSet::from_labels(labels.iter().map(String::as_str));
        let mut groups = vec![Vec::new(); label_set.len()];
        let chunks = labels
            .into_iter()
            .zip(coords.rows())
            .enumerate()
            .map(|(index, (label, row))| {
                if let Some(rank) = label_set.rank(&label) {
                    groups[rank].push(index);
                }
                Chunk {
                    index,
                    label,
                    coords: [row[0], row[1]],
                }
            })
            .collect();

        Ok(Self {
            chunks,
            labels: label_set,
            groups,
        })
    }

    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    pub fn labels(&self) -> &LabelSet {
        &self.labels
    }

    /// Label groups in sorted label order, with their rank.
    pub fn groups(&self) -> impl Iterator<Item = LabelGroup<'_>> {
        self.labels
            .iter()
            .zip(&self.groups)
            .enumerate()
            .map(|(rank, (label, members))| LabelGroup {
                rank,
                label,
                chunks: members.iter().map(|&i| &self.chunks[i]).collect(),
            })
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }
}

#[derive(Debug)]
pub struct LabelGroup<'a> {
    pub rank: usize,
    pub label: &'a str,
    pub chunks: Vec<&'a Chunk>,
}
