// Precision-at-1 with a moving-average convergence check.
//
// The overall precision is always reported. On top of it, the running
// average over growing prefixes is scanned from sample 100 onward: at index
// i the averages over the first i-1, i and i+1 indicators are compared, and
// the scan stops at the first i where both neighbours are within a relative
// tolerance of the middle one. The i-1 / i / i+1 windowing is deliberate and
// determines the reported convergence point.
//
// Prefix sums make the scan O(n); every prefix average is the same exact
// integer count divided by the prefix length.

use tracing::info;

use crate::config::validate_tolerance;
use crate::error::{RankError, Result};

/// Index at which the convergence scan starts.
pub const MIN_CONVERGENCE_SAMPLES: usize = 100;

#[derive(Debug, Clone, PartialEq)]
pub struct PrecisionReport {
    /// Number of indicators evaluated
    pub samples: usize,
    /// Hits over all samples
    pub overall: f64,
    /// Reported estimate: the converged average, or `overall` if none
    pub average: f64,
    /// Index where the moving average converged
    pub converged_at: Option<usize>,
}

impl PrecisionReport {
    pub fn converged(&self) -> bool {
        self.converged_at.is_some()
    }

    /// The estimate together with the convergence flag.
    pub fn estimate(&self) -> (f64, bool) {
        (self.average, self.converged())
    }
}

/// Evaluate precision-at-1 over ordered correctness indicators.
pub fn evaluate(indicators: &[bool], tolerance: f64) -> Result<PrecisionReport> {
    if indicators.is_empty() {
        return Err(RankError::EmptyInput);
    }
    validate_tolerance(tolerance)?;

    let n = indicators.len();
    // prefix[k] = hits among the first k indicators
    let mut prefix = Vec::with_capacity(n + 1);
    prefix.push(0usize);
    for &hit in indicators {
        let last = prefix[prefix.len() - 1];
        prefix.push(last + usize::from(hit));
    }

    let overall = prefix[n] as f64 / n as f64;
    let avg = |k: usize| prefix[k] as f64 / k as f64;

    let mut converged_at = None;
    let mut average = overall;
    for i in MIN_CONVERGENCE_SAMPLES..n {
        let last = avg(i - 1);
        let current = avg(i);
        let next = avg(i + 1);
        // ratios are undefined while no hit has been seen
        if current == 0.0 {
            continue;
        }
        if (last / current - 1.0).abs() <= tolerance && (next / current - 1.0).abs() <= tolerance {
            converged_at = Some(i);
            average = current;
            break;
        }
    }

    match converged_at {
        Some(i) => {
            info!(index = i, "The AP at 1 converged at {i} th samples");
            info!("The AP at 1 is {average:.4}.");
        }
        None => {
            info!("The AP does not converge.");
            info!("The AP at 1 is {overall:.4}.");
        }
    }
    info!("The final AP at 1 is {overall:.4}.");

    Ok(PrecisionReport {
        samples: n,
        overall,
        average,
        converged_at,
    })
}
