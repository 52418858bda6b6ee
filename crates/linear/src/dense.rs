//! Linear solver for dense matrices.
//!
use nalgebra::{DMatrix, DVector, RealField};

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

use crate::{DefaultTolerance, Error, LSolver, Tolerance};

/// LU factorization of an M by N dense matrix (M >= N), reusable across right-hand sides.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde-serialize",
    serde(bound(serialize = "T: Serialize", deserialize = "T: Deserialize<'de>"))
)]
#[derive(Clone, Debug)]
pub struct Dense<T>
where
    T: RealField + Copy,
{
    /// U in the upper triangle, the multipliers of L strictly below the diagonal
    lu: DMatrix<T>,
    /// row exchanged with row k at elimination step k
    pivots: Vec<usize>,
    tolerance: Tolerance<T>,
}

impl<T> Dense<T>
where
    T: RealField + Copy,
{
    /// Creates an empty dense solver. Call [`LSolver::setup`] before solving.
    pub fn new(tolerance: Tolerance<T>) -> Self {
        Dense {
            lu: DMatrix::zeros(0, 0),
            pivots: Vec::new(),
            tolerance,
        }
    }

    /// Factors `mat_a` with the default tolerance for `T`.
    pub fn factor(mat_a: DMatrix<T>) -> Result<Self, Error>
    where
        T: DefaultTolerance,
    {
        Self::factor_with_tolerance(mat_a, Tolerance::default())
    }

    pub fn factor_with_tolerance(
        mat_a: DMatrix<T>,
        tolerance: Tolerance<T>,
    ) -> Result<Self, Error> {
        let mut dense = Self::new(tolerance);
        dense.setup(mat_a)?;
        Ok(dense)
    }

    /// Number of equations.
    pub fn nrows(&self) -> usize {
        self.lu.nrows()
    }

    /// Number of unknowns.
    pub fn ncols(&self) -> usize {
        self.lu.ncols()
    }

    pub fn pivots(&self) -> &[usize] {
        &self.pivots
    }
}

/// Position of the first NaN or infinite entry, in column-major order.
fn find_non_finite<T: RealField + Copy>(mat: &DMatrix<T>) -> Option<(usize, usize)> {
    let nrows = mat.nrows();
    mat.iter()
        .position(|x| !x.is_finite())
        .map(|i| (i % nrows, i / nrows))
}

impl<T> LSolver<T> for Dense<T>
where
    T: RealField + Copy,
{
    fn setup(&mut self, mut mat_a: DMatrix<T>) -> Result<(), Error> {
        let (m, n) = mat_a.shape();
        if n > m {
            return Err(Error::Underdetermined {
                unknowns: n,
                equations: m,
            });
        }

        if let Some((row, col)) = find_non_finite(&mat_a) {
            return Err(Error::NonFinite { row, col });
        }

        let mut pivots = vec![0; n];
        dense_get_rf(&mut mat_a, &mut pivots, &self.tolerance)
            .map_err(|col| Error::ZeroPivot { col })?;

        self.lu = mat_a;
        self.pivots = pivots;
        Ok(())
    }

    fn solve(&self, b: &DVector<T>) -> Result<DVector<T>, Error> {
        if b.len() != self.nrows() {
            return Err(Error::DimensionMismatch {
                rows: self.nrows(),
                len: b.len(),
            });
        }

        if let Some(row) = b.iter().position(|x| !x.is_finite()) {
            return Err(Error::NonFinite { row, col: 0 });
        }

        let mut x = b.clone();
        dense_get_rs(&self.lu, &self.pivots, &mut x);
        Ok(x.rows(0, self.ncols()).into_owned())
    }
}

/// Performs the LU factorization of the M by N dense matrix A.
///
/// This is done using standard Gaussian elimination with partial (row) pivoting. Note that this
/// applies only to matrices with M >= N.
///
/// A successful LU factorization leaves the matrix A and the pivot array p with the following
/// information:
///
/// 1. p[k] contains the row number of the pivot element chosen at the beginning of elimination
///     step k, k=0, 1, ..., N-1.
///
/// 2. If the unique LU factorization of A is given by PA = LU, where P is a permutation matrix,
///     L is a lower trapezoidal matrix with all 1's on the diagonal, and U is an upper triangular
///     matrix, then the upper triangular part of A (including its diagonal) contains U and the
///     strictly lower trapezoidal part of A contains the multipliers, I-L.
///
/// The pivot is the largest-magnitude entry on or below the diagonal of column k (the first one on
/// ties). It is treated as zero when it is within `tolerance` of zero, in which case the
/// (zero-based) column index is returned.
fn dense_get_rf<T>(
    mat_a: &mut DMatrix<T>,
    pivots: &mut [usize],
    tolerance: &Tolerance<T>,
) -> Result<(), usize>
where
    T: RealField + Copy,
{
    let (m, n) = mat_a.shape();
    debug_assert!(m >= n, "Number of rows must be >= number of columns");

    // k-th elimination step number
    for k in 0..n {
        // find l = pivot row number
        let mut l = k;
        for i in (k + 1)..m {
            if mat_a[(i, k)].abs() > mat_a[(l, k)].abs() {
                l = i;
            }
        }
        pivots[k] = l;
        log::trace!("dense_get_rf: col {} pivot row {}", k, l);

        // check for zero pivot element
        if tolerance.is_zero(mat_a[(l, k)].abs()) {
            return Err(k);
        }

        // swap a(k,0:n) and a(l,0:n) if necessary
        if l != k {
            mat_a.swap_rows(k, l);
        }

        // Scale the elements below the diagonal in column k by 1.0 / a[k,k]. After the swap a[k,k]
        // holds the pivot element. This stores the multipliers a(i,k)/a(k,k) in a(i,k).
        let mult = mat_a[(k, k)].recip();
        for i in (k + 1)..m {
            mat_a[(i, k)] *= mult;
        }

        // row_i = row_i - [a(i,k)/a(k,k)] row_k, i=k+1, ..., m-1
        for j in (k + 1)..n {
            let a_kj = mat_a[(k, j)];
            if a_kj != T::zero() {
                for i in (k + 1)..m {
                    let a_ik = mat_a[(i, k)];
                    mat_a[(i, j)] -= a_kj * a_ik;
                }
            }
        }
    }

    Ok(())
}

/// Solves A x = b using the factorization in `mat_a` and the pivot information computed in
/// `dense_get_rf`. The solution is returned in the first N entries of b; rows beyond N of an
/// over-determined system are left as they were after permutation. This routine cannot fail if
/// the corresponding call to `dense_get_rf` did not fail.
fn dense_get_rs<T>(mat_a: &DMatrix<T>, pivots: &[usize], b: &mut DVector<T>)
where
    T: RealField + Copy,
{
    let n = mat_a.ncols();

    // Permute b, based on pivot information in p
    for (k, &pk) in pivots.iter().enumerate() {
        if pk != k {
            b.swap((k, 0), (pk, 0));
        }
    }

    // Solve Ly = b, store solution y in b
    for k in 0..n {
        let bk = b[k];
        for i in (k + 1)..n {
            b[i] -= mat_a[(i, k)] * bk;
        }
    }

    // Solve Ux = y, store solution x in b
    for k in (0..n).rev() {
        b[k] /= mat_a[(k, k)];
        let bk = b[k];
        for i in 0..k {
            b[i] -= mat_a[(i, k)] * bk;
        }
    }
}
