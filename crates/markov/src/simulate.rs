//! Sampling a chain, as a cross-check of the analytic steady state.

use nalgebra::{DMatrix, DVector};
use rand::Rng;

use crate::{check_holding_times, check_transitions, DefaultTolerance, Error, Tolerance};

/// Returns a random index, each with probability proportional to its weight.
///
/// The weights need not be normalized. Zero weights are never picked.
pub fn pick_weighted_index<T, R>(weights: &[T], rng: &mut R) -> Result<usize, Error>
where
    T: DefaultTolerance,
    R: Rng,
{
    if weights.is_empty() {
        return Err(Error::EmptyWeights);
    }
    if let Some(index) = weights.iter().position(|w| *w < T::zero()) {
        return Err(Error::NegativeWeight { index });
    }
    let sum = weights.iter().fold(T::zero(), |acc, &w| acc + w);
    if sum <= T::zero() {
        return Err(Error::ZeroWeightSum);
    }

    let sample: T = nalgebra::convert(rng.gen::<f64>());
    let tolerance = Tolerance::default();

    let mut cumulative = T::zero();
    let mut last = 0;
    for (index, &w) in weights.iter().enumerate() {
        if w == T::zero() {
            continue;
        }
        cumulative += w / sum;
        if tolerance.is_lesser_equal(sample, cumulative) {
            return Ok(index);
        }
        last = index;
    }

    // rounding left the cumulative sum just short of the sample
    Ok(last)
}

/// Walks the chain for `steps` transitions from `start` and returns the fraction of time spent in
/// each state.
///
/// Every visit to state `i` lasts `holding_times[i]`, or one time unit when no holding times are
/// given. For an irreducible chain the result approaches the steady state as `steps` grows.
pub fn simulate_occupancy<T, R>(
    transitions: &DMatrix<T>,
    holding_times: Option<&DVector<T>>,
    start: usize,
    steps: usize,
    rng: &mut R,
) -> Result<DVector<T>, Error>
where
    T: DefaultTolerance,
    R: Rng,
{
    let states = check_transitions(transitions)?;
    if let Some(holding_times) = holding_times {
        check_holding_times(holding_times, states)?;
    }
    if start >= states {
        return Err(Error::StartOutOfRange { start, states });
    }
    if steps == 0 {
        return Err(Error::NoSteps);
    }

    let rows: Vec<Vec<T>> = transitions
        .row_iter()
        .map(|row| row.iter().copied().collect())
        .collect();

    let mut occupancy = DVector::<T>::zeros(states);
    let mut state = start;
    for _ in 0..steps {
        occupancy[state] += holding_times.map_or(T::one(), |h| h[state]);
        state = pick_weighted_index(&rows[state], rng)?;
    }

    let total = occupancy.sum();
    log::debug!(
        "simulated {} steps over {} states, total time {}",
        steps,
        states,
        total
    );
    Ok(occupancy / total)
}
