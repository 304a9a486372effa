//! Secant goal seek

use crate::error::{ensure_finite, TvmError, TvmResult};
use super::{Evaluate, SolverConfig, SolverResult};

/// Sign-change interval seen so far; the root lies strictly inside it
#[derive(Debug, Clone, Copy)]
struct Bracket {
    a: f64,
    fa: f64,
    b: f64,
}

impl Bracket {
    fn open(x0: f64, f0: f64, x1: f64, f1: f64) -> Option<Self> {
        if (f0 < 0.0) != (f1 < 0.0) {
            Some(Self { a: x0, fa: f0, b: x1 })
        } else {
            None
        }
    }

    /// Replace whichever end shares the new point's sign
    fn tighten(&mut self, x: f64, fx: f64) {
        if (fx < 0.0) == (self.fa < 0.0) {
            self.a = x;
            self.fa = fx;
        } else {
            self.b = x;
        }
    }

    fn width(&self) -> f64 {
        (self.b - self.a).abs()
    }

    fn contains(&self, x: f64) -> bool {
        x > self.a.min(self.b) && x < self.a.max(self.b)
    }

    fn midpoint(&self) -> f64 {
        (self.a + self.b) / 2.0
    }
}

/// Secant root finder over an [`Evaluate`] capability.
///
/// Keeps the two most recent estimates and projects the next one through the
/// line joining them:
///
/// ```text
/// x₂ = x₁ - g(x₁)·(x₁ - x₀) / (g(x₁) - g(x₀)),   g(x) = evaluate(x) - target
/// ```
///
/// Once two estimates straddle the root, a projection that leaves that
/// interval, or a step that failed to halve the residual, is replaced by a
/// bisection step. A candidate
/// whose evaluation overflows is pulled halfway back towards the last good
/// estimate.
///
/// Stops when `|g(x₁)|` falls under the residual tolerance, or when the
/// estimates stop moving: two consecutive steps below the step tolerance, or a
/// straddling interval narrower than it. Fails with
/// [`TvmError::StalledSolver`] when the secant is flat even after one
/// perturbation, and with [`TvmError::NoConvergence`] when the iteration cap
/// is hit or the estimates run into a bound twice in a row.
#[derive(Debug, Clone, Copy, Default)]
pub struct SecantSolver {
    config: SolverConfig,
}

/// Halvings tried before an overflowing step counts as divergence
const MAX_BACKTRACKS: u32 = 64;

impl SecantSolver {
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    /// Find `x` with `evaluator.evaluate(x) == target` within tolerance
    pub fn solve<E>(&self, evaluator: &E, target: f64) -> TvmResult<SolverResult>
    where
        E: Evaluate + ?Sized,
    {
        let target = ensure_finite("target", target)?;
        self.validate()?;

        let cfg = &self.config;
        let tolerance = cfg.tolerance_for(target);
        let residual = |x: f64| -> TvmResult<f64> {
            let value = evaluator.evaluate(x)? - target;
            if value.is_finite() {
                Ok(value)
            } else {
                Err(TvmError::NumericOverflow { operation: "evaluate" })
            }
        };

        let mut x0 = self.bounded(cfg.initial_guess);
        let mut f0 = residual(x0)?;
        if f0.abs() < tolerance {
            return Ok(SolverResult { root: x0, iterations: 0, residual: f0 });
        }

        let mut x1 = self.bounded(cfg.initial_guess + cfg.initial_step);
        let mut f1 = residual(x1)?;

        let mut bracket = Bracket::open(x0, f0, x1, f1);
        let mut perturbed = false;
        let mut pinned = false;
        let mut slow = false;

        for iteration in 0..cfg.max_iterations {
            if f1.abs() < tolerance {
                return Ok(SolverResult { root: x1, iterations: iteration, residual: f1 });
            }
            if bracket.is_some_and(|br| br.width() < cfg.step_tolerance) {
                return Ok(SolverResult { root: x1, iterations: iteration, residual: f1 });
            }

            let slope = f1 - f0;
            if slope == 0.0 && bracket.is_none() {
                if perturbed {
                    return Err(TvmError::StalledSolver { estimate: x1, residual: f1 });
                }
                perturbed = true;
                x1 = self.bounded(x1 + cfg.flat_perturbation);
                f1 = residual(x1)?;
                bracket = Bracket::open(x0, f0, x1, f1);
                continue;
            }

            let mut projected = x1 - f1 * (x1 - x0) / slope;
            match bracket {
                Some(br) if slow || !br.contains(projected) => projected = br.midpoint(),
                Some(_) => {}
                None if !projected.is_finite() => {
                    return Err(TvmError::NoConvergence {
                        iterations: iteration + 1,
                        estimate: x1,
                        residual: f1,
                    });
                }
                None => {}
            }

            let mut x2 = self.bounded(projected);
            let clamped = x2 != projected;
            if clamped && pinned {
                // Two projections in a row outside the search interval
                return Err(TvmError::NoConvergence {
                    iterations: iteration + 1,
                    estimate: x1,
                    residual: f1,
                });
            }
            pinned = clamped;

            let mut backtracks = 0;
            let f2 = loop {
                match residual(x2) {
                    Ok(value) => break value,
                    Err(TvmError::NumericOverflow { .. }) if backtracks < MAX_BACKTRACKS => {
                        backtracks += 1;
                        x2 = x1 + (x2 - x1) / 2.0;
                    }
                    Err(TvmError::NumericOverflow { .. }) => {
                        return Err(TvmError::NoConvergence {
                            iterations: iteration + 1,
                            estimate: x1,
                            residual: f1,
                        });
                    }
                    Err(e) => return Err(e),
                }
            };

            match bracket.as_mut() {
                Some(br) => br.tighten(x2, f2),
                None => bracket = Bracket::open(x1, f1, x2, f2),
            }
            slow = bracket.is_some() && f2.abs() > 0.5 * f1.abs();

            if !clamped
                && (x2 - x1).abs() < cfg.step_tolerance
                && (x1 - x0).abs() < cfg.step_tolerance
            {
                return Ok(SolverResult { root: x2, iterations: iteration + 1, residual: f2 });
            }

            x0 = x1;
            f0 = f1;
            x1 = x2;
            f1 = f2;
        }

        Err(TvmError::NoConvergence {
            iterations: cfg.max_iterations,
            estimate: x1,
            residual: f1,
        })
    }

    fn bounded(&self, x: f64) -> f64 {
        x.clamp(self.config.lower_bound, self.config.upper_bound)
    }

    fn validate(&self) -> TvmResult<()> {
        let cfg = &self.config;
        if !(cfg.lower_bound < cfg.upper_bound) {
            return Err(TvmError::invalid_input(
                "bounds",
                format!("lower {} must be below upper {}", cfg.lower_bound, cfg.upper_bound),
            ));
        }
        if cfg.initial_step == 0.0 || !cfg.initial_step.is_finite() {
            return Err(TvmError::invalid_input("initial_step", "seeds must differ"));
        }
        if cfg.max_iterations == 0 {
            return Err(TvmError::invalid_input("max_iterations", "must be at least 1"));
        }
        Ok(())
    }
}
