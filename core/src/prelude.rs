pub use crate::chunk::{Chunk, ChunkTable, DocumentInfo, LabelSet, Selection};
pub use crate::config::VisualizationConfig;
pub use crate::figure::{render_figure, FigureSpec, VisualState};
pub use crate::loader::{builtins::file_loaders::FileCorpusLoader, Corpus, CorpusLoader};
pub use crate::visualization::{LabelOption, Visualization};
