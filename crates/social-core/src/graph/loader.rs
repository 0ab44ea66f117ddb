//! Adjacency Matrix Loading
//!
//! Parses whitespace-separated integer rows into a square matrix and exposes
//! its nonzero cells as a directed edge list over node indices.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use super::GraphError;

/// Square integer matrix; any nonzero cell `(i, j)` is an edge `i → j`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdjacencyMatrix {
    rows: Vec<Vec<i64>>,
}

impl AdjacencyMatrix {
    /// Load and parse a matrix file.
    ///
    /// Fails with [`GraphError::NotFound`] before attempting any read when
    /// the path does not exist.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, GraphError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(GraphError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let content = fs::read_to_string(path).map_err(|source| GraphError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let matrix = Self::parse(&content)?;
        tracing::info!(
            path = %path.display(),
            size = matrix.size(),
            edges = matrix.edge_count(),
            "Loaded adjacency matrix"
        );
        Ok(matrix)
    }

    /// Parse matrix text: one row per line, blank lines ignored.
    pub fn parse(content: &str) -> Result<Self, GraphError> {
        let mut rows: Vec<Vec<i64>> = Vec::new();

        for (line_index, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let line_no = line_index + 1;
            let row = line
                .split_whitespace()
                .enumerate()
                .map(|(column, token)| {
                    token.parse::<i64>().map_err(|_| GraphError::InvalidToken {
                        line: line_no,
                        column: column + 1,
                        token: token.to_string(),
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;

            if let Some(first) = rows.first() {
                if row.len() != first.len() {
                    return Err(GraphError::RaggedRow {
                        line: line_no,
                        expected: first.len(),
                        found: row.len(),
                    });
                }
            }
            rows.push(row);
        }

        Self::from_rows(rows)
    }

    /// Build from already-split rows, checking the matrix is square.
    pub fn from_rows(rows: Vec<Vec<i64>>) -> Result<Self, GraphError> {
        let size = rows.len();
        for (index, row) in rows.iter().enumerate() {
            if row.len() != size {
                if index > 0 && row.len() != rows[0].len() {
                    return Err(GraphError::RaggedRow {
                        line: index + 1,
                        expected: rows[0].len(),
                        found: row.len(),
                    });
                }
                return Err(GraphError::NotSquare {
                    rows: size,
                    cols: row.len(),
                });
            }
        }
        Ok(Self { rows })
    }

    /// Number of nodes (rows).
    pub fn size(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell value, or `None` when out of range.
    pub fn get(&self, i: usize, j: usize) -> Option<i64> {
        self.rows.get(i).and_then(|row| row.get(j)).copied()
    }

    /// The raw parsed rows.
    pub fn rows(&self) -> &[Vec<i64>] {
        &self.rows
    }

    /// Directed edges `(i, j)` for every nonzero cell, row-major.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.rows.iter().enumerate().flat_map(|(i, row)| {
            row.iter()
                .enumerate()
                .filter(|&(_, &value)| value != 0)
                .map(move |(j, _)| (i, j))
        })
    }

    pub fn edge_count(&self) -> usize {
        self.rows
            .iter()
            .map(|row| row.iter().filter(|&&v| v != 0).count())
            .sum()
    }
}

impl FromStr for AdjacencyMatrix {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
