//! Timing and cross-checking of transform chains

use std::fmt;
use std::hint::black_box;
use std::time::{Duration, Instant};

use rigid4_math::Vec4;

use crate::chains::{Chain, Step};

/// Result of timing one chain
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrialReport {
    /// Chain that was timed
    pub chain: Chain,
    /// Number of trials run
    pub trials: usize,
    /// Sum of the per-trial wall-clock times
    pub elapsed: Duration,
}

impl TrialReport {
    /// Mean time per trial
    pub fn per_trial(&self) -> Duration {
        if self.trials == 0 {
            Duration::ZERO
        } else {
            self.elapsed / self.trials as u32
        }
    }
}

impl fmt::Display for TrialReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Finished running {} trials. Time elapsed: {:.6}s.",
            self.trials,
            self.elapsed.as_secs_f64()
        )
    }
}

/// Compose `steps` with `chain` `trials` times, timing each trial
pub fn run_trials(chain: Chain, steps: &[Step], trials: usize) -> TrialReport {
    log::debug!("Running {} trials of the {} chain", trials, chain);

    let mut elapsed = Duration::ZERO;
    for _ in 0..trials {
        let start = Instant::now();
        black_box(chain.run(black_box(steps)));
        elapsed += start.elapsed();
    }

    TrialReport { chain, trials, elapsed }
}

/// Two chains moved a probe point to different places
#[derive(Debug, Clone, PartialEq)]
pub struct EquivalenceError {
    /// Chain used as the reference
    pub expected_chain: Chain,
    /// Chain that disagreed
    pub actual_chain: Chain,
    /// Probe point
    pub point: Vec4,
    /// Reference result
    pub expected: Vec4,
    /// Disagreeing result
    pub actual: Vec4,
    /// Largest per-lane difference
    pub difference: f32,
}

impl fmt::Display for EquivalenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} chain disagrees with {} chain on point ({}): expected ({}), got ({}), difference {:e}",
            self.actual_chain,
            self.expected_chain,
            self.point,
            self.expected,
            self.actual,
            self.difference
        )
    }
}

impl std::error::Error for EquivalenceError {}

/// Check that every chain moves every probe point where the first chain does
///
/// `tolerance` is relative to the larger of the two results' magnitudes
/// (and absolute below magnitude 1).
pub fn verify_equivalence(
    chains: &[Chain],
    steps: &[Step],
    points: &[Vec4],
    tolerance: f32,
) -> Result<(), EquivalenceError> {
    let Some((&reference, others)) = chains.split_first() else {
        return Ok(());
    };
    let expected_matrix = reference.run(steps);

    for &chain in others {
        let matrix = chain.run(steps);
        for &point in points {
            let expected = expected_matrix * point;
            let actual = matrix * point;
            let lanes = (actual - expected).to_array();
            let scale = expected.magnitude().max(actual.magnitude()).max(1.0);

            // NaN lanes fail the comparison
            if !lanes.iter().all(|d| d.abs() <= tolerance * scale) {
                let difference = lanes
                    .iter()
                    .map(|d| d.abs())
                    .fold(0.0f32, |worst, d| if d > worst || d.is_nan() { d } else { worst });
                return Err(EquivalenceError {
                    expected_chain: reference,
                    actual_chain: chain,
                    point,
                    expected,
                    actual,
                    difference,
                });
            }
        }
        log::debug!("{} chain matches {} chain on {} points", chain, reference, points.len());
    }

    Ok(())
}
