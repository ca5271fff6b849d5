//! # topicscope - Core API Documentation
//!
//! topicscope projects the topic-document matrix of a topic model to two
//! dimensions and renders it as a scatter figure where chosen source documents
//! are highlighted.
//!
//! ## Pipeline
//!
//! - **Loaders**: read the chunk table, the optional metadata table and the
//!   model artifact, once, at startup
//! - **Projection**: principal component analysis down to PC1/PC2
//! - **Chunk table**: projected chunks partitioned by source-document label
//! - **Figure**: a pure `selection -> figure` function producing plotly.js JSON
//!
//! ## Example
//!
//! ```rust,no_run
//! use topicscope::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> topicscope::error::Result<()> {
//!     let config = VisualizationConfig::default();
//!     let vis = Visualization::load(&config).await?;
//!
//!     let figure = vis.render(&Selection::from_iter(["squirrel", "jemima"]));
//!     println!("{}", serde_json::to_string(&figure).unwrap());
//!     Ok(())
//! }
//! ```
//!
//! ## Sign of the principal axes
//!
//! Eigenvectors are defined up to sign. [`projection::project`] flips every
//! axis so that its largest-magnitude entry is positive; other PCA
//! implementations may disagree by a per-axis reflection.

/// Chunks, label sets, selections and the per-label grouping
pub mod chunk;

/// Startup configuration
pub mod config;

/// Error types for all library operations
pub mod error;

/// Plotly figure specs and the render function
pub mod figure;

/// Corpus loading
pub mod loader;

/// Convenience prelude exports
pub mod prelude;

/// Principal component projection
pub mod projection;

/// Startup orchestration and the shared read-only render state
pub mod visualization;
