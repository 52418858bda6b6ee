//! Dense linear solvers: Gaussian elimination with partial (row) pivoting.
//!
//! All solves go through the single LU kernel in [`dense`]. The augmented-matrix entry points in
//! [`gauss`] split off the right-hand side column and reuse it.

mod dense;
mod gauss;
pub mod tolerance;
mod traits;

pub use dense::Dense;
pub use gauss::{solve, solve_augmented, solve_augmented_with_tolerance, solve_with_tolerance};
pub use tolerance::{DefaultTolerance, Tolerance};
pub use traits::LSolver;

use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("A zero pivot was encountered during Gaussian elimination (col {col})")]
    ZeroPivot { col: usize },

    #[error("The system has {unknowns} unknowns but only {equations} equations")]
    Underdetermined { unknowns: usize, equations: usize },

    #[error("Right-hand side has {len} entries, but the system has {rows} rows")]
    DimensionMismatch { rows: usize, len: usize },

    #[error("The augmented matrix has no right-hand side column")]
    MissingRightHandSide,

    #[error("Non-finite value at ({row}, {col})")]
    NonFinite { row: usize, col: usize },
}
