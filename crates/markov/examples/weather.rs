//! Long-run weather: a three-state chain solved analytically and by simulation.
//!
//! cargo run -p markov --example weather

use markov::{simulate::simulate_occupancy, steady_state, timed_steady_state, MarkovChain};
use nalgebra::{dmatrix, dvector};
use rand::{rngs::StdRng, SeedableRng};

const STATES: [&str; 3] = ["sunny", "cloudy", "rainy"];
const STEPS: usize = 100_000;

fn main() -> Result<(), markov::Error> {
    tracing_subscriber::fmt::init();

    let transitions = dmatrix![
        0.7, 0.2, 0.1;
        0.3, 0.4, 0.3;
        0.2, 0.3, 0.5;
    ];
    // mean number of days a spell lasts once it starts
    let holding_times = dvector![3.0, 1.0, 2.0];

    let daily = steady_state(&transitions)?;
    let timed = timed_steady_state(&holding_times, &transitions)?;

    let mut rng = StdRng::seed_from_u64(2024);
    let simulated = simulate_occupancy(&transitions, Some(&holding_times), 0, STEPS, &mut rng)?;

    println!("{:>8} {:>10} {:>10} {:>10}", "state", "daily", "timed", "simulated");
    for (i, name) in STATES.iter().enumerate() {
        println!(
            "{:>8} {:>10.5} {:>10.5} {:>10.5}",
            name, daily[i], timed[i], simulated[i]
        );
    }

    let chain = MarkovChain::from_timed_transitions(&holding_times, &transitions)?;
    let residual = chain.balance_residual(&timed)?;
    println!("max balance residual: {:.3e}", residual.amax());

    // a zero holding time is rejected, with a warning in the log
    if let Err(e) = timed_steady_state(&dvector![3.0, 0.0, 2.0], &transitions) {
        println!("rejected: {e}");
    }

    Ok(())
}
