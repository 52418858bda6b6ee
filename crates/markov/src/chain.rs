use nalgebra::{DMatrix, DVector, RealField};

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

use crate::{check_holding_times, check_transitions, DefaultTolerance, Error, Tolerance};

/// A Markov chain described by its generator matrix.
///
/// Off-diagonal entry `(i, j)` of the generator is the flow rate from state `i` to state `j`; the
/// diagonal holds the negated sum of the row's outgoing flow.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct MarkovChain<T> {
    generator: DMatrix<T>,
}

impl<T> MarkovChain<T>
where
    T: RealField + Copy,
{
    /// Wraps an already built generator matrix. Only the shape is checked.
    pub fn from_generator(generator: DMatrix<T>) -> Result<Self, Error> {
        check_transitions(&generator)?;
        Ok(MarkovChain { generator })
    }

    /// Builds the generator of a discrete-time chain from its `(from, to)` transition
    /// probabilities.
    pub fn from_transitions(transitions: &DMatrix<T>) -> Result<Self, Error> {
        check_transitions(transitions)?;
        Ok(MarkovChain {
            generator: build_generator(transitions, None),
        })
    }

    /// Builds the generator of a continuous-time chain, where state `i` is held for
    /// `holding_times[i]` on average before a transition is taken.
    pub fn from_timed_transitions(
        holding_times: &DVector<T>,
        transitions: &DMatrix<T>,
    ) -> Result<Self, Error> {
        let states = check_transitions(transitions)?;
        check_holding_times(holding_times, states)?;
        Ok(MarkovChain {
            generator: build_generator(transitions, Some(holding_times)),
        })
    }

    pub fn num_states(&self) -> usize {
        self.generator.nrows()
    }

    pub fn generator(&self) -> &DMatrix<T> {
        &self.generator
    }

    pub fn steady_state(&self) -> Result<DVector<T>, Error>
    where
        T: DefaultTolerance,
    {
        self.steady_state_with_tolerance(Tolerance::default())
    }

    /// Solves `Qᵀ π = 0` with `Σ π = 1` appended as an extra equation. One of the balance
    /// equations is always redundant, so the normalization row takes its place in the
    /// elimination.
    pub fn steady_state_with_tolerance(
        &self,
        tolerance: Tolerance<T>,
    ) -> Result<DVector<T>, Error> {
        let n = self.num_states();

        // balance equations in the first n rows with zero right-hand side, then the
        // normalization row of ones
        let mut augmented = DMatrix::zeros(n + 1, n + 1);
        augmented
            .view_mut((0, 0), (n, n))
            .copy_from(&self.generator.transpose());
        augmented.row_mut(n).fill(T::one());

        linear::solve_augmented_with_tolerance(augmented, tolerance).map_err(|e| {
            log::warn!("Steady state equations are not solvable: {}", e);
            Error::from(e)
        })
    }

    /// Net flow into each state, `(Qᵀ π)_j`: flow in minus flow out. Zero for a steady state.
    pub fn balance_residual(&self, probabilities: &DVector<T>) -> Result<DVector<T>, Error> {
        if probabilities.len() != self.num_states() {
            return Err(Error::DimensionMismatch {
                states: self.num_states(),
                len: probabilities.len(),
            });
        }
        Ok(self.generator.tr_mul(probabilities))
    }
}

fn build_generator<T>(transitions: &DMatrix<T>, holding_times: Option<&DVector<T>>) -> DMatrix<T>
where
    T: RealField + Copy,
{
    let n = transitions.nrows();
    let mut generator = DMatrix::zeros(n, n);

    for i in 0..n {
        let holding_time = holding_times.map_or(T::one(), |h| h[i]);
        let mut outflow = T::zero();
        for j in (0..n).filter(|&j| j != i) {
            let rate = transitions[(i, j)] / holding_time;
            generator[(i, j)] = rate;
            outflow += rate;
        }
        generator[(i, i)] = -outflow;
    }

    generator
}
