use nalgebra::{DMatrix, DVector, Scalar};

use crate::Error;

/// A direct linear solver: factor once in `setup`, then `solve` for any number of right-hand
/// sides.
pub trait LSolver<T: Scalar> {
    /// Performs any linear solver setup needed for the system matrix A, consuming it. Fails if A
    /// has more columns than rows, or if the elimination runs into a zero pivot.
    fn setup(&mut self, mat_a: DMatrix<T>) -> Result<(), Error>;

    /// Solves the linear system A x = b for the A given to the last `setup`.
    ///
    /// ## Arguments
    /// * `b` the linear system right-hand side, one entry per row of A.
    ///
    /// Returns x, one entry per column of A.
    fn solve(&self, b: &DVector<T>) -> Result<DVector<T>, Error>;
}
