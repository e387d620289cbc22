//! Normalized adjacency matrix and path validation.

use super::types::PathCheck;
use crate::error::{ConfigurationError, Result};

/// Weight used to render "no edge" cells in dense exports.
///
/// Raw input values at or above this threshold are also read as "no edge".
pub const NO_EDGE_WEIGHT: f64 = 1e9;

/// A weighted directed graph stored as a dense matrix.
///
/// Construct with [`NetworkModel::configure`]. Once built the model is
/// immutable, so it can be shared freely between evaluator threads.
///
/// # Examples
///
/// ```
/// use u_pathga::network::{NetworkModel, PathCheck};
///
/// let net = NetworkModel::configure(3, &[
///     [0.0, 4.0, 0.0],
///     [4.0, 0.0, 2.0],
///     [0.0, 2.0, 0.0],
/// ]).unwrap();
///
/// assert_eq!(net.validate_path(&[0, 1, 2]), PathCheck::Feasible(6.0));
/// assert_eq!(net.validate_path(&[0, 2]), PathCheck::Infeasible);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkModel {
    size: usize,
    /// Row-major cells; `None` is "no edge", the diagonal is `Some(0.0)`.
    weights: Vec<Option<f64>>,
}

impl NetworkModel {
    /// Validates and normalizes a raw `size × size` matrix.
    ///
    /// Off-diagonal `0.0`, `+∞` and anything `>= NO_EDGE_WEIGHT` become
    /// "no edge"; the diagonal is forced to zero regardless of input.
    ///
    /// # Errors
    /// - [`ConfigurationError::NetworkTooSmall`] if `size < 2`
    /// - [`ConfigurationError::RowCount`] / [`ConfigurationError::RowLength`]
    ///   if the matrix is not `size × size`
    /// - [`ConfigurationError::InvalidWeight`] for negative or NaN entries
    pub fn configure<M: AsRef<[f64]>>(size: usize, matrix: &[M]) -> Result<Self> {
        if size < 2 {
            return Err(ConfigurationError::NetworkTooSmall { size });
        }
        if matrix.len() != size {
            return Err(ConfigurationError::RowCount {
                expected: size,
                rows: matrix.len(),
            });
        }

        let mut weights = Vec::with_capacity(size * size);
        let mut edges = 0usize;
        for (row, cells) in matrix.iter().enumerate() {
            let cells = cells.as_ref();
            if cells.len() != size {
                return Err(ConfigurationError::RowLength {
                    row,
                    expected: size,
                    len: cells.len(),
                });
            }
            for (col, &value) in cells.iter().enumerate() {
                if row == col {
                    weights.push(Some(0.0));
                    continue;
                }
                if value.is_nan() || value < 0.0 {
                    return Err(ConfigurationError::InvalidWeight { row, col, value });
                }
                if value == 0.0 || value >= NO_EDGE_WEIGHT {
                    weights.push(None);
                } else {
                    edges += 1;
                    weights.push(Some(value));
                }
            }
        }

        tracing::trace!(size, edges, "network configured");
        Ok(Self { size, weights })
    }

    /// Number of nodes.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Weight of the edge `from → to`, or `None` if there is no edge.
    ///
    /// Self-transitions return `Some(0.0)`; out-of-range nodes return `None`.
    pub fn weight(&self, from: usize, to: usize) -> Option<f64> {
        if from >= self.size || to >= self.size {
            return None;
        }
        self.weights[from * self.size + to]
    }

    /// Returns `true` if a real (non-diagonal) edge `from → to` exists.
    pub fn has_edge(&self, from: usize, to: usize) -> bool {
        from != to && self.weight(from, to).is_some()
    }

    /// Nodes reachable from `node` in one hop, with their edge weights.
    pub fn neighbors(&self, node: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        (0..self.size).filter_map(move |to| {
            if to == node {
                None
            } else {
                self.weight(node, to).map(|w| (to, w))
            }
        })
    }

    /// Dense copy of the matrix with "no edge" cells set to [`NO_EDGE_WEIGHT`].
    ///
    /// Feeding the result back into [`configure`](Self::configure) yields an
    /// identical model.
    pub fn dense_matrix(&self) -> Vec<Vec<f64>> {
        self.weights
            .chunks(self.size)
            .map(|row| row.iter().map(|w| w.unwrap_or(NO_EDGE_WEIGHT)).collect())
            .collect()
    }

    /// Walks consecutive node pairs and sums their weights.
    ///
    /// Stops at the first self-transition, missing edge, or out-of-range
    /// node and reports [`PathCheck::Infeasible`]; no partial length is kept.
    pub fn validate_path(&self, path: &[usize]) -> PathCheck {
        let mut total = 0.0;
        for hop in path.windows(2) {
            let (from, to) = (hop[0], hop[1]);
            if from == to {
                return PathCheck::Infeasible;
            }
            match self.weight(from, to) {
                Some(w) => total += w,
                None => return PathCheck::Infeasible,
            }
        }
        PathCheck::Feasible(total)
    }
}
