//! Follower Graph
//!
//! Adjacency-matrix parsing and installation of follow relations between
//! user agents.

pub mod builder;
pub mod loader;

pub use builder::{
    install_follower_edges, user_binding, FollowLoadReport, UnresolvedEndpoint, UnresolvedReason,
};
pub use loader::AdjacencyMatrix;

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading an adjacency matrix.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("the file '{}' does not exist", .path.display())]
    NotFound { path: PathBuf },
    #[error("could not read '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("line {line}, column {column}: '{token}' is not an integer")]
    InvalidToken {
        line: usize,
        column: usize,
        token: String,
    },
    #[error("line {line}: expected {expected} entries, found {found}")]
    RaggedRow {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("matrix is not square: {rows} rows of {cols} entries")]
    NotSquare { rows: usize, cols: usize },
}
