//! Steady-state probabilities of Markov chains.
//!
//! Transition matrices are indexed `(from, to)`: entry `(i, j)` is the probability of moving from
//! state `i` to state `j`, so each row of a stochastic matrix sums to one.
//!
//! The steady state `π` solves the flow-balance equations `Qᵀ π = 0` of the generator matrix `Q`
//! together with the normalization `Σ π = 1`. The resulting over-determined system is handed to
//! [`linear::solve_augmented`].

use nalgebra::{DMatrix, DVector, RealField};
use thiserror::Error;

mod chain;
pub mod simulate;

pub use chain::MarkovChain;
pub use linear::{DefaultTolerance, Tolerance};

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("Transition matrix is {nrows}x{ncols}, expected a square matrix")]
    NotSquare { nrows: usize, ncols: usize },

    #[error("A Markov chain needs at least one state")]
    Empty,

    #[error("Got {len} holding times for {states} states")]
    HoldingTimesMismatch { states: usize, len: usize },

    #[error("Holding time of state {state} is zero")]
    ZeroHoldingTime { state: usize },

    #[error("Holding time of state {state} is negative or not finite")]
    InvalidHoldingTime { state: usize },

    #[error("Transition matrix entry ({row}, {col}) is not finite")]
    NonFinite { row: usize, col: usize },

    #[error("Got {len} probabilities for {states} states")]
    DimensionMismatch { states: usize, len: usize },

    #[error("Steady state equations are not solvable: {0}")]
    Unsolvable(#[from] linear::Error),

    #[error("Cannot pick an index from an empty set of weights")]
    EmptyWeights,

    #[error("Weight {index} is negative")]
    NegativeWeight { index: usize },

    #[error("Weights sum to zero")]
    ZeroWeightSum,

    #[error("Start state {start} is out of range for {states} states")]
    StartOutOfRange { start: usize, states: usize },

    #[error("A simulation needs at least one step")]
    NoSteps,
}

/// Steady-state probabilities of a discrete-time chain.
///
/// The generator is `P - I` with the diagonal taken as the negated off-diagonal row sum, so
/// the self-transition probabilities only matter through the rows they belong to.
pub fn steady_state<T>(transitions: &DMatrix<T>) -> Result<DVector<T>, Error>
where
    T: DefaultTolerance,
{
    MarkovChain::from_transitions(transitions)?.steady_state()
}

/// Steady-state probabilities of a continuous-time chain.
///
/// # Arguments
/// * `holding_times` - mean time spent in each state per visit, none of which may be zero
/// * `transitions` - probability of moving `(from, to)` when leaving a state
///
/// The rate from `i` to `j` is `p_ij / h_i`. The result is the long-run fraction of time spent in
/// each state.
pub fn timed_steady_state<T>(
    holding_times: &DVector<T>,
    transitions: &DMatrix<T>,
) -> Result<DVector<T>, Error>
where
    T: DefaultTolerance,
{
    MarkovChain::from_timed_transitions(holding_times, transitions)?.steady_state()
}

/// Checks that `transitions` is a non-empty square matrix of finite entries and returns its number
/// of states.
pub(crate) fn check_transitions<T>(transitions: &DMatrix<T>) -> Result<usize, Error>
where
    T: RealField + Copy,
{
    let (nrows, ncols) = transitions.shape();
    if nrows != ncols {
        log::warn!(
            "Dimensions do not match: transition matrix is {}x{}",
            nrows,
            ncols
        );
        return Err(Error::NotSquare { nrows, ncols });
    }
    if nrows == 0 {
        log::warn!("Transition matrix has no states");
        return Err(Error::Empty);
    }
    if let Some(i) = transitions.iter().position(|x| !x.is_finite()) {
        let (row, col) = (i % nrows, i / nrows);
        log::warn!("Transition matrix entry ({}, {}) is not finite", row, col);
        return Err(Error::NonFinite { row, col });
    }
    Ok(nrows)
}

pub(crate) fn check_holding_times<T>(holding_times: &DVector<T>, states: usize) -> Result<(), Error>
where
    T: RealField + Copy,
{
    if holding_times.len() != states {
        log::warn!(
            "Dimensions do not match: {} holding times for {} states",
            holding_times.len(),
            states
        );
        return Err(Error::HoldingTimesMismatch {
            states,
            len: holding_times.len(),
        });
    }
    if let Some(state) = holding_times.iter().position(|h| *h == T::zero()) {
        log::warn!("Holding time of zero for state {}", state);
        return Err(Error::ZeroHoldingTime { state });
    }
    if let Some(state) = holding_times
        .iter()
        .position(|h| !h.is_finite() || *h < T::zero())
    {
        log::warn!("Invalid holding time {} for state {}", holding_times[state], state);
        return Err(Error::InvalidHoldingTime { state });
    }
    Ok(())
}
