use crate::{
    chunk::ChunkTableError, config::ConfigError, loader::LoaderError,
    projection::ProjectionError,
};
use thiserror::Error;

/// Fatal startup errors. Rendering itself never fails.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Config error")]
    Config(#[from] ConfigError),
    #[error("Loader error")]
    Loader(#[from] LoaderError),
    #[error("Projection error")]
    Projection(#[from] ProjectionError),
    #[error("Chunk table error")]
    ChunkTable(#[from] ChunkTableError),
}

pub type Result<T> = std::result::Result<T, Error>;
