//! Dense weighted graph model.
//!
//! A network is `N` nodes and an `N×N` weight matrix. Every off-diagonal
//! cell is either a positive weight or an explicit "no edge" marker, so
//! missing connections never take part in cost arithmetic.
//!
//! # Key Types
//!
//! - [`NetworkModel`]: validated, normalized adjacency matrix
//! - [`PathCheck`]: feasibility and length of a node sequence
//!
//! # Input Encoding
//!
//! Raw matrices use `0.0` off the diagonal to mean "no edge". Values at or
//! above [`NO_EDGE_WEIGHT`] and `+∞` are read the same way.

mod model;
mod types;

pub use model::{NetworkModel, NO_EDGE_WEIGHT};
pub use types::PathCheck;
