//! Path validation outcome.

/// Result of walking a node sequence through a [`NetworkModel`](super::NetworkModel).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCheck {
    /// Every hop exists; carries the summed edge weight.
    Feasible(f64),

    /// Some hop is missing, a self-transition, or leaves the network.
    Infeasible,
}

impl PathCheck {
    /// Returns `true` for [`PathCheck::Feasible`].
    pub fn is_feasible(self) -> bool {
        matches!(self, PathCheck::Feasible(_))
    }

    /// Total path length, `+∞` when infeasible.
    pub fn length(self) -> f64 {
        match self {
            PathCheck::Feasible(len) => len,
            PathCheck::Infeasible => f64::INFINITY,
        }
    }

    /// The `(feasible, length)` pair form.
    pub fn into_pair(self) -> (bool, f64) {
        (self.is_feasible(), self.length())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infeasible_has_infinite_length() {
        assert_eq!(PathCheck::Infeasible.into_pair(), (false, f64::INFINITY));
        assert_eq!(PathCheck::Feasible(12.5).into_pair(), (true, 12.5));
    }
}
