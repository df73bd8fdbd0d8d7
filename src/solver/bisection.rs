//! Bisection over a monotone non-decreasing objective

use log::{trace, warn};

use super::{SolverConfig, SolverResult};
use crate::error::PlanningResult;

/// Find `x` in the configured bracket with `f(x) ≈ target`
///
/// `f` must be non-decreasing in `x`. When the objective is below the target
/// the lower bound moves up, otherwise the upper bound moves down. With
/// `integer_periods` set, each candidate is truncated before evaluation, so the
/// answer is only accurate to one period.
///
/// Never fails for lack of convergence: the midpoint of the final bracket is
/// returned with `converged == false`. Errors from `f` are propagated.
pub fn bisect_increasing<F>(f: F, target: f64, config: &SolverConfig) -> PlanningResult<SolverResult>
where
    F: Fn(f64) -> PlanningResult<f64>,
{
    config.validate()?;

    let candidate = |x: f64| if config.integer_periods { x.trunc() } else { x };

    let mut low = config.lower;
    let mut high = config.upper;

    for iteration in 0..config.max_iterations {
        let mid = (low + high) / 2.0;
        let residual = f(candidate(mid))? - target;

        if residual.abs() < config.tolerance {
            trace!("bisection converged at {} after {} iterations", mid, iteration + 1);
            return Ok(SolverResult {
                periods: candidate(mid),
                iterations: iteration + 1,
                residual,
                converged: true,
            });
        }

        if residual < 0.0 {
            low = mid;
        } else {
            high = mid;
        }

        // The bracket cannot shrink any further in f64
        if (high - low) <= f64::EPSILON * high.abs().max(1.0) {
            let estimate = snap_to_boundary((low + high) / 2.0, config);
            let residual = f(candidate(estimate))? - target;
            trace!(
                "bisection bracket collapsed at {} after {} iterations (residual {})",
                estimate,
                iteration + 1,
                residual
            );
            return Ok(SolverResult {
                periods: estimate,
                iterations: iteration + 1,
                residual,
                converged: false,
            });
        }
    }

    let estimate = (low + high) / 2.0;
    let residual = f(candidate(estimate))? - target;
    warn!(
        "bisection did not converge in {} iterations; best estimate {} (residual {})",
        config.max_iterations, estimate, residual
    );

    Ok(SolverResult {
        periods: estimate,
        iterations: config.max_iterations,
        residual,
        converged: false,
    })
}

/// With truncated candidates a collapsed bracket sits on a whole period;
/// remove the last-ulp noise so `ceil` does not round up a full period.
fn snap_to_boundary(estimate: f64, config: &SolverConfig) -> f64 {
    let nearest = estimate.round();
    if config.integer_periods && (estimate - nearest).abs() < 1e-9 {
        nearest
    } else {
        estimate
    }
}
