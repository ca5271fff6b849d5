/// Module for loading a corpus from files on disk.
///
/// Includes the one-shot file loader (`file_loaders::FileCorpusLoader`) and its table parsers.
pub mod file_loaders;
