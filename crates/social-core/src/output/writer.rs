//! Output Writer
//!
//! Writes run results as pretty-printed JSON files into an output directory.

use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use social_events::{FollowerGraphSnapshot, MetricsSeries, ModelSnapshot};

/// File name for the metrics time series
pub const METRICS_FILE: &str = "metrics.json";
/// File name for the follower graph
pub const GRAPH_FILE: &str = "graph.json";
/// File name for the final model state
pub const FINAL_STATE_FILE: &str = "final_state.json";

/// Errors that can occur while writing output.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("could not write '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Writes JSON files under a single directory.
#[derive(Debug, Clone)]
pub struct OutputWriter {
    dir: PathBuf,
}

impl OutputWriter {
    /// Create the writer, creating `dir` if needed.
    pub fn new(dir: impl AsRef<Path>) -> Result<Self, OutputError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).map_err(|source| OutputError::Io {
            path: dir.clone(),
            source,
        })?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn write_json<T: Serialize>(&self, file_name: &str, value: &T) -> Result<PathBuf, OutputError> {
        let path = self.dir.join(file_name);
        let json = serde_json::to_string_pretty(value)?;
        fs::write(&path, json).map_err(|source| OutputError::Io {
            path: path.clone(),
            source,
        })?;
        tracing::info!(path = %path.display(), "Wrote output");
        Ok(path)
    }

    pub fn write_metrics(&self, series: &MetricsSeries) -> Result<PathBuf, OutputError> {
        self.write_json(METRICS_FILE, series)
    }

    pub fn write_graph(&self, graph: &FollowerGraphSnapshot) -> Result<PathBuf, OutputError> {
        self.write_json(GRAPH_FILE, graph)
    }

    pub fn write_final_state(&self, snapshot: &ModelSnapshot) -> Result<PathBuf, OutputError> {
        self.write_json(FINAL_STATE_FILE, snapshot)
    }
}
