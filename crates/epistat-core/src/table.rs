//! The 2x2 contingency table.
//!
//! Rows are exposure (exposed, unexposed), columns are outcome
//! (cases, non-cases):
//!
//! ```text
//!              cases   non-cases
//! exposed        a         b
//! unexposed      c         d
//! ```

use serde::{Deserialize, Serialize};

/// Four non-negative counts cross-tabulating two binary variables.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContingencyTable {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
}

impl ContingencyTable {
    pub fn new(a: f64, b: f64, c: f64, d: f64) -> Self {
        Self { a, b, c, d }
    }

    /// Exposed row total (`a + b`).
    pub fn row1(&self) -> f64 {
        self.a + self.b
    }

    /// Unexposed row total (`c + d`).
    pub fn row2(&self) -> f64 {
        self.c + self.d
    }

    /// Cases column total (`a + c`).
    pub fn col1(&self) -> f64 {
        self.a + self.c
    }

    /// Non-cases column total (`b + d`).
    pub fn col2(&self) -> f64 {
        self.b + self.d
    }

    pub fn total(&self) -> f64 {
        self.a + self.b + self.c + self.d
    }

    pub fn cells(&self) -> [f64; 4] {
        [self.a, self.b, self.c, self.d]
    }

    pub fn has_zero_cell(&self) -> bool {
        self.cells().iter().any(|&v| v == 0.0)
    }

    /// True if any row or column total is zero.
    pub fn has_zero_marginal(&self) -> bool {
        [self.row1(), self.row2(), self.col1(), self.col2()]
            .iter()
            .any(|&v| v == 0.0)
    }

    /// A copy with `delta` added to every cell.
    pub fn corrected(&self, delta: f64) -> Self {
        Self {
            a: self.a + delta,
            b: self.b + delta,
            c: self.c + delta,
            d: self.d + delta,
        }
    }

    /// Risk of the outcome among the exposed, `a / (a + b)`.
    pub fn risk_exposed(&self) -> f64 {
        proportion(self.a, self.row1())
    }

    /// Risk of the outcome among the unexposed, `c / (c + d)`.
    pub fn risk_unexposed(&self) -> f64 {
        proportion(self.c, self.row2())
    }
}

/// `numerator / denominator`, or 0 when the denominator is zero.
pub fn proportion(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marginals() {
        let t = ContingencyTable::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(t.row1(), 30.0);
        assert_eq!(t.row2(), 70.0);
        assert_eq!(t.col1(), 40.0);
        assert_eq!(t.col2(), 60.0);
        assert_eq!(t.total(), 100.0);
        assert!(!t.has_zero_marginal());
    }

    #[test]
    fn zero_row_detected() {
        let t = ContingencyTable::new(0.0, 0.0, 5.0, 5.0);
        assert!(t.has_zero_cell());
        assert!(t.has_zero_marginal());
        assert_eq!(t.risk_exposed(), 0.0);
    }

    #[test]
    fn corrected_adds_to_every_cell() {
        let t = ContingencyTable::new(0.0, 1.0, 2.0, 3.0).corrected(0.5);
        assert_eq!(t.cells(), [0.5, 1.5, 2.5, 3.5]);
        assert!(!t.has_zero_cell());
    }
}
