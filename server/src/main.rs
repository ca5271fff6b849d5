//! topicscope - serve an interactive PCA scatter plot of a topic model.
//!
//! # Usage
//!
//! ```bash
//! # ./data/ChiLit_Chunks_200.csv, ./data/ChiLit_metadata.csv, ./data/Optuna_ProdLDA_output.json
//! topicscope
//!
//! topicscope --data-dir /srv/chilit --chunk-size 500 --bind 0.0.0.0:8050
//! topicscope --config topicscope.json -v
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use topicscope::prelude::*;
use tracing_subscriber::EnvFilter;

/// Interactive PCA scatter plot of a topic-document matrix.
#[derive(Parser)]
#[command(name = "topicscope", version, about)]
struct Cli {
    /// JSON config file; flags below override its fields
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory holding the chunk table, metadata table and model artifact
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Chunk size the chunk table was produced with
    #[arg(long)]
    chunk_size: Option<u32>,

    /// Address to listen on
    #[arg(long)]
    bind: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn into_config(self) -> Result<VisualizationConfig> {
        let mut config = match &self.config {
            Some(path) => VisualizationConfig::from_file(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => VisualizationConfig::default(),
        };
        if let Some(data_dir) = self.data_dir {
            config.data_dir = data_dir;
        }
        if let Some(chunk_size) = self.chunk_size {
            config.chunk_size = chunk_size;
        }
        if let Some(bind) = self.bind {
            config.bind = bind;
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let config = cli.into_config()?;
    let vis = Visualization::load(&config)
        .await
        .context("failed to build visualization")?;

    let listener = tokio::net::TcpListener::bind(config.bind.as_str())
        .await
        .with_context(|| format!("binding {}", config.bind))?;
    topicscope_server::serve(listener, Arc::new(vis)).await
}
