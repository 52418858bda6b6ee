//! Single-shot Gaussian elimination on a coefficient matrix and right-hand side.

use nalgebra::{DMatrix, DVector, RealField};

use crate::{Dense, DefaultTolerance, Error, LSolver, Tolerance};

/// Solves `coefficients * x = rhs` using the default tolerance for `T`.
///
/// Fails if `rhs` does not have one entry per row, if there are more unknowns (columns) than
/// equations (rows), or if a zero pivot remains after row exchange. Extra equations of an
/// over-determined system take part in pivot selection but are not checked for consistency.
pub fn solve<T>(coefficients: &DMatrix<T>, rhs: &DVector<T>) -> Result<DVector<T>, Error>
where
    T: DefaultTolerance,
{
    solve_with_tolerance(coefficients, rhs, Tolerance::default())
}

pub fn solve_with_tolerance<T>(
    coefficients: &DMatrix<T>,
    rhs: &DVector<T>,
    tolerance: Tolerance<T>,
) -> Result<DVector<T>, Error>
where
    T: RealField + Copy,
{
    let (rows, cols) = coefficients.shape();
    if rhs.len() != rows {
        return Err(Error::DimensionMismatch {
            rows,
            len: rhs.len(),
        });
    }
    if cols > rows {
        return Err(Error::Underdetermined {
            unknowns: cols,
            equations: rows,
        });
    }

    let dense = Dense::factor_with_tolerance(coefficients.clone(), tolerance)?;
    dense.solve(rhs)
}

/// Solves the system held in `augmented`, whose last column is the right-hand side.
pub fn solve_augmented<T>(augmented: DMatrix<T>) -> Result<DVector<T>, Error>
where
    T: DefaultTolerance,
{
    solve_augmented_with_tolerance(augmented, Tolerance::default())
}

pub fn solve_augmented_with_tolerance<T>(
    augmented: DMatrix<T>,
    tolerance: Tolerance<T>,
) -> Result<DVector<T>, Error>
where
    T: RealField + Copy,
{
    let (rows, ncols) = augmented.shape();
    let unknowns = ncols.checked_sub(1).ok_or(Error::MissingRightHandSide)?;
    if unknowns > rows {
        return Err(Error::Underdetermined {
            unknowns,
            equations: rows,
        });
    }

    let rhs = augmented.column(unknowns).into_owned();
    let coefficients = augmented.remove_column(unknowns);

    let dense = Dense::factor_with_tolerance(coefficients, tolerance)?;
    dense.solve(&rhs)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use nalgebra::{dmatrix, dvector};

    use super::*;

    #[test]
    fn test_identity() {
        let x = solve(&DMatrix::<f64>::identity(2, 2), &dvector![3.0, 5.0]).unwrap();
        assert_relative_eq!(x, dvector![3.0, 5.0]);

        let x = solve(&DMatrix::<f32>::identity(2, 2), &dvector![3.0f32, 5.0]).unwrap();
        assert_relative_eq!(x, dvector![3.0f32, 5.0]);
    }

    #[test]
    fn test_singular() {
        let err = solve(&dmatrix![1.0, 1.0; 1.0, 1.0], &dvector![2.0, 4.0]).unwrap_err();
        assert_eq!(err, Error::ZeroPivot { col: 1 });
    }

    #[test]
    fn test_near_singular_is_rejected() {
        // the second pivot ends up at 5e-9, below the f64 absolute bound of 1e-8
        let err = solve(&dmatrix![1.0, 1.0; 1.0, 1.0 + 5e-9], &dvector![2.0, 2.0]).unwrap_err();
        assert_eq!(err, Error::ZeroPivot { col: 1 });

        // a looser custom tolerance rejects more, a tighter one accepts
        let a = dmatrix![1.0, 0.0; 0.0, 5e-3];
        let b = dvector![1.0, 1.0];
        let loose = Tolerance::new(1e-2, 0.0);
        assert!(solve_with_tolerance(&a, &b, loose).is_err());

        let tight = Tolerance::new(1e-12, 0.0);
        let x = solve_with_tolerance(&a, &b, tight).unwrap();
        assert_relative_eq!(x, dvector![1.0, 200.0], max_relative = 1e-12);
    }

    #[test]
    fn test_single_precision_tolerance() {
        // 5e-6 is a usable pivot in f64 but below the f32 absolute bound of 1e-5
        let err = solve(&dmatrix![1.0f32, 0.0; 0.0, 5e-6], &dvector![1.0f32, 1.0]).unwrap_err();
        assert_eq!(err, Error::ZeroPivot { col: 1 });

        let err = solve_augmented(dmatrix![1.0f32, 1.0, 2.0; 1.0, 1.0 + 5e-6, 2.0]).unwrap_err();
        assert_eq!(err, Error::ZeroPivot { col: 1 });

        let x = solve(&dmatrix![1.0f64, 0.0; 0.0, 5e-6], &dvector![1.0, 1.0]).unwrap();
        assert_relative_eq!(x, dvector![1.0, 2.0e5], max_relative = 1e-12);

        let x = solve(&dmatrix![2.0f32, 1.0; 1.0, 3.0], &dvector![3.0f32, 4.0]).unwrap();
        assert_relative_eq!(x, dvector![1.0f32, 1.0], epsilon = 1e-6);
    }

    #[test]
    fn test_non_finite_input() {
        let err = solve(&dmatrix![1.0, f64::NAN; 0.0, 1.0], &dvector![1.0, 1.0]).unwrap_err();
        assert_eq!(err, Error::NonFinite { row: 0, col: 1 });

        let identity = DMatrix::<f64>::identity(2, 2);
        let err = solve(&identity, &dvector![f64::INFINITY, 1.0]).unwrap_err();
        assert_eq!(err, Error::NonFinite { row: 0, col: 0 });
    }

    #[test]
    fn test_underdetermined() {
        let err = solve(&dmatrix![1.0, 2.0, 3.0], &dvector![1.0]).unwrap_err();
        assert_eq!(
            err,
            Error::Underdetermined {
                unknowns: 3,
                equations: 1
            }
        );

        let err = solve_augmented(dmatrix![1.0, 2.0, 3.0, 4.0; 0.0, 1.0, 1.0, 1.0]).unwrap_err();
        assert_eq!(
            err,
            Error::Underdetermined {
                unknowns: 3,
                equations: 2
            }
        );
    }

    #[test]
    fn test_rhs_length_mismatch() {
        let err = solve(&DMatrix::<f64>::identity(3, 3), &dvector![1.0, 2.0]).unwrap_err();
        assert_eq!(err, Error::DimensionMismatch { rows: 3, len: 2 });
    }

    #[test]
    fn test_augmented() {
        // x + y + z = 6, 2y + 5z = -4, 2x + 5y - z = 27
        let x = solve_augmented(dmatrix![
            1.0, 1.0, 1.0, 6.0;
            0.0, 2.0, 5.0, -4.0;
            2.0, 5.0, -1.0, 27.0;
        ])
        .unwrap();
        assert_relative_eq!(x, dvector![5.0, 3.0, -2.0], epsilon = 1e-12);
    }

    #[test]
    fn test_augmented_edge_shapes() {
        assert_eq!(
            solve_augmented(DMatrix::<f64>::zeros(2, 0)).unwrap_err(),
            Error::MissingRightHandSide
        );

        // only a right-hand side column: nothing to solve for
        let x = solve_augmented(dmatrix![1.0; 2.0]).unwrap();
        assert_eq!(x.len(), 0);
    }

    #[test]
    fn test_matches_coefficient_form() {
        let a = dmatrix![
            2.0, -1.0, 0.0;
            -1.0, 2.0, -1.0;
            0.0, -1.0, 2.0;
        ];
        let b = dvector![1.0, 0.0, 1.0];
        let x = solve(&a, &b).unwrap();
        let mut augmented = a.clone().insert_column(3, 0.0);
        augmented.set_column(3, &b);
        let y = solve_augmented(augmented).unwrap();
        assert_relative_eq!(x, y);
        assert_relative_eq!(&a * &x, b, epsilon = 1e-12);
    }
}
