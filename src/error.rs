//! Configuration-time errors.
//!
//! Everything that can go wrong before a search starts is reported as a
//! [`ConfigurationError`]. Outcomes of the search itself (infeasible
//! candidates, no route found) are data, never errors.

/// Errors raised while configuring a network, the algorithm, or endpoints.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigurationError {
    #[error("network must have at least 2 nodes, got {size}")]
    NetworkTooSmall { size: usize },

    #[error("matrix has {rows} rows, expected {expected}")]
    RowCount { expected: usize, rows: usize },

    #[error("matrix row {row} has {len} entries, expected {expected}")]
    RowLength { row: usize, expected: usize, len: usize },

    #[error("invalid edge weight {value} at ({row}, {col})")]
    InvalidWeight { row: usize, col: usize, value: f64 },

    #[error("endpoint {node} is out of range for a network of {size} nodes")]
    EndpointOutOfRange { node: usize, size: usize },

    #[error("path endpoints have not been set")]
    EndpointsNotSet,

    #[error("network has not been configured")]
    NetworkNotConfigured,

    #[error("population_size must be at least 2, got {0}")]
    PopulationTooSmall(usize),

    #[error("{name} must be within [0, 1], got {value}")]
    RateOutOfRange { name: &'static str, value: f64 },

    #[error("tournament_size must be in [1, {population_size}), got {tournament_size}")]
    InvalidTournamentSize {
        tournament_size: usize,
        population_size: usize,
    },

    #[error("chromosome_length must be at least 1")]
    EmptyChromosome,
}

/// Shorthand for results carrying a [`ConfigurationError`].
pub type Result<T> = std::result::Result<T, ConfigurationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_offending_value() {
        let err = ConfigurationError::RateOutOfRange {
            name: "mutation_rate",
            value: 1.5,
        };
        assert_eq!(err.to_string(), "mutation_rate must be within [0, 1], got 1.5");

        let err = ConfigurationError::EndpointOutOfRange { node: 7, size: 5 };
        assert!(err.to_string().contains('7'));
    }
}
